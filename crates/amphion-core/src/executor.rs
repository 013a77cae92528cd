use serde_json::{json, Value};
use std::sync::Arc;

use crate::catalog::is_prefill_command;
use crate::config::DispatchConfig;
use crate::diagnostics::{
    build_failure_reason, DiagnosticsSink, DispatchAttempt, DispatchDiagnostics, DispatchResult,
    Reporter, TracingSink,
};
use crate::host::{ChatHost, TYPE_COMMAND};
use crate::payload::payload_variants;
use crate::plan::resolve_dispatch_commands;
use crate::provider::detect_provider;
use crate::types::{DispatchMode, DispatchStage};

const UNKNOWN_APP: &str = "unknown";

/// Sends chat text to a host's AI chat panel.
///
/// Candidates are tried strictly one at a time: opening a chat panel changes
/// host UI state, so no two invocations are ever in flight together.
pub struct Dispatcher<H> {
    host: H,
    config: DispatchConfig,
    reporter: Reporter,
}

impl<H: ChatHost> Dispatcher<H> {
    /// Diagnostics go to `tracing` when the config enables logging; use
    /// [`Dispatcher::with_sink`] to send them elsewhere.
    pub fn new(host: H, config: DispatchConfig) -> Self {
        let reporter = Reporter::new(config.enable_diagnostics_logging, Arc::new(TracingSink));
        Self {
            host,
            config,
            reporter,
        }
    }

    /// Route finished diagnostics to `sink` when the config enables logging.
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticsSink>) -> Self {
        self.reporter = Reporter::new(self.config.enable_diagnostics_logging, sink);
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Deliver `chat_text` to the host's chat panel. `DryRun` resolves the
    /// plan without touching the host.
    pub async fn dispatch(&self, chat_text: &str, mode: DispatchMode) -> DispatchResult {
        self.diagnose(chat_text, mode).await.into()
    }

    /// Run a dispatch in `mode` and return the full diagnostics record.
    ///
    /// Never fails: host errors are captured per attempt and a terminal
    /// failure is reported through `failure_reason`.
    pub async fn diagnose(&self, chat_text: &str, mode: DispatchMode) -> DispatchDiagnostics {
        let diagnostics = self.run(chat_text, mode).await;
        self.reporter.report(&diagnostics);
        diagnostics
    }

    async fn run(&self, chat_text: &str, mode: DispatchMode) -> DispatchDiagnostics {
        let mut app_name = self.host.app_name();
        if app_name.is_empty() {
            app_name = UNKNOWN_APP.to_string();
        }
        let provider = detect_provider(&app_name);
        let available = self.host.get_all_commands().await;
        let overrides = self.config.overrides_for(provider).to_vec();
        let plan = resolve_dispatch_commands(provider, &available, &overrides);

        tracing::debug!(
            app = %app_name,
            %provider,
            %mode,
            available = available.len(),
            resolved = plan.resolved.len(),
            "resolved chat dispatch plan"
        );

        let mut diagnostics = DispatchDiagnostics {
            app_name,
            provider,
            input: chat_text.to_string(),
            mode,
            timestamp: chrono::Utc::now().to_rfc3339(),
            available_command_count: available.len(),
            override_commands: overrides,
            discovered_commands: plan.discovered.clone(),
            resolved_commands: plan.resolved.clone(),
            attempts: Vec::new(),
            success: false,
            success_command: None,
            failure_reason: None,
        };

        if mode == DispatchMode::DryRun {
            diagnostics.failure_reason =
                Some(build_failure_reason(chat_text, &plan.resolved, &[]));
            return diagnostics;
        }

        let text = chat_text.trim();
        if text.is_empty() {
            diagnostics.failure_reason = Some(build_failure_reason(text, &plan.resolved, &[]));
            return diagnostics;
        }

        // Phase 1: commands that take the text directly.
        let variants = payload_variants(text);
        for command_id in plan.resolved.iter().filter(|c| is_prefill_command(c)) {
            for variant in &variants {
                match self.invoke(command_id, Some(variant.value.clone())).await {
                    Ok(()) => {
                        diagnostics.attempts.push(DispatchAttempt::succeeded(
                            DispatchStage::Prefill,
                            command_id,
                            Some(variant.kind),
                        ));
                        return succeed(diagnostics, command_id);
                    }
                    Err(error) => {
                        tracing::debug!(command = %command_id, payload = %variant.kind, %error, "prefill rejected");
                        diagnostics.attempts.push(DispatchAttempt::failed(
                            DispatchStage::Prefill,
                            command_id,
                            Some(variant.kind),
                            error,
                        ));
                    }
                }
            }
        }

        // Phase 2: open the panel, wait for focus, then type.
        for command_id in &plan.resolved {
            if let Err(error) = self.invoke(command_id, None).await {
                tracing::debug!(command = %command_id, %error, "open failed");
                diagnostics.attempts.push(DispatchAttempt::failed(
                    DispatchStage::Open,
                    command_id,
                    None,
                    error,
                ));
                continue;
            }
            diagnostics
                .attempts
                .push(DispatchAttempt::succeeded(DispatchStage::Open, command_id, None));

            tokio::time::sleep(self.config.open_delay()).await;

            match self.invoke(TYPE_COMMAND, Some(json!({ "text": text }))).await {
                Ok(()) => {
                    diagnostics.attempts.push(DispatchAttempt::succeeded(
                        DispatchStage::Type,
                        command_id,
                        None,
                    ));
                    return succeed(diagnostics, command_id);
                }
                Err(error) => {
                    tracing::debug!(command = %command_id, %error, "type failed after open");
                    diagnostics.attempts.push(DispatchAttempt::failed(
                        DispatchStage::Type,
                        command_id,
                        None,
                        error,
                    ));
                }
            }
        }

        let reason = build_failure_reason(text, &plan.resolved, &diagnostics.attempts);
        tracing::warn!(
            provider = %diagnostics.provider,
            attempts = diagnostics.attempts.len(),
            %reason,
            "chat dispatch failed"
        );
        diagnostics.failure_reason = Some(reason);
        diagnostics
    }

    /// Invoke one host command, flattening any failure into a message.
    async fn invoke(&self, command_id: &str, payload: Option<Value>) -> Result<(), String> {
        let call = self.host.execute_command(command_id, payload);
        let outcome = match self.config.attempt_timeout() {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(outcome) => outcome,
                Err(_) => return Err(format!("timed out after {}ms", limit.as_millis())),
            },
            None => call.await,
        };
        outcome.map(|_| ()).map_err(|e| e.to_string())
    }
}

fn succeed(mut diagnostics: DispatchDiagnostics, command_id: &str) -> DispatchDiagnostics {
    tracing::info!(
        provider = %diagnostics.provider,
        command = %command_id,
        attempts = diagnostics.attempts.len(),
        "chat dispatch delivered"
    );
    diagnostics.success = true;
    diagnostics.success_command = Some(command_id.to_string());
    diagnostics
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
