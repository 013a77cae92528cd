use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::Result;
use crate::payload::PayloadKind;
use crate::types::{DispatchMode, DispatchStage, FailureReason, Provider};

// ---------------------------------------------------------------------------
// DispatchAttempt
// ---------------------------------------------------------------------------

/// One host invocation made while dispatching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchAttempt {
    pub stage: DispatchStage,
    pub command_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload_kind: Option<PayloadKind>,
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DispatchAttempt {
    pub fn succeeded(
        stage: DispatchStage,
        command_id: &str,
        payload_kind: Option<PayloadKind>,
    ) -> Self {
        Self {
            stage,
            command_id: command_id.to_string(),
            payload_kind,
            ok: true,
            error: None,
        }
    }

    pub fn failed(
        stage: DispatchStage,
        command_id: &str,
        payload_kind: Option<PayloadKind>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            stage,
            command_id: command_id.to_string(),
            payload_kind,
            ok: false,
            error: Some(error.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// DispatchDiagnostics
// ---------------------------------------------------------------------------

/// Full account of one dispatch call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchDiagnostics {
    pub app_name: String,
    pub provider: Provider,
    pub input: String,
    pub mode: DispatchMode,
    pub timestamp: String,
    pub available_command_count: usize,
    pub override_commands: Vec<String>,
    pub discovered_commands: Vec<String>,
    pub resolved_commands: Vec<String>,
    pub attempts: Vec<DispatchAttempt>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<FailureReason>,
}

impl DispatchDiagnostics {
    /// The one attempt that delivered the text, if any.
    pub fn delivering_attempt(&self) -> Option<&DispatchAttempt> {
        self.attempts
            .iter()
            .find(|a| a.ok && matches!(a.stage, DispatchStage::Prefill | DispatchStage::Type))
    }

    /// Header line written ahead of the JSON body in the diagnostics log.
    pub fn header(&self) -> String {
        format!(
            "[{}] app={} provider={}",
            self.timestamp, self.app_name, self.provider
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchResult {
    pub ok: bool,
    pub diagnostics: DispatchDiagnostics,
}

impl From<DispatchDiagnostics> for DispatchResult {
    fn from(diagnostics: DispatchDiagnostics) -> Self {
        Self {
            ok: diagnostics.success,
            diagnostics,
        }
    }
}

// ---------------------------------------------------------------------------
// Failure classification
// ---------------------------------------------------------------------------

/// Explain why nothing was delivered, from the input, the plan and the log.
pub fn build_failure_reason(
    input: &str,
    resolved: &[String],
    attempts: &[DispatchAttempt],
) -> FailureReason {
    if input.trim().is_empty() {
        return FailureReason::EmptyInput;
    }
    if resolved.is_empty() {
        return FailureReason::NoSupportedChatCommands;
    }
    if attempts.is_empty() {
        return FailureReason::NoAttemptsExecuted;
    }
    let failed_at = |stage: DispatchStage| attempts.iter().any(|a| a.stage == stage && !a.ok);
    let open_fail = failed_at(DispatchStage::Open);
    let type_fail = failed_at(DispatchStage::Type);
    let prefill_fail = failed_at(DispatchStage::Prefill);

    if type_fail && !open_fail {
        return FailureReason::ChatOpenedButTypeFailed;
    }
    if open_fail && !type_fail && !prefill_fail {
        return FailureReason::ChatOpenFailed;
    }
    if prefill_fail && !open_fail && !type_fail {
        return FailureReason::PrefillNotSupported;
    }
    FailureReason::AllDispatchAttemptsFailed
}

// ---------------------------------------------------------------------------
// Sinks
// ---------------------------------------------------------------------------

/// Destination for finished diagnostics records.
///
/// Sinks are created once by the caller and shared across dispatch calls;
/// they are append-only.
pub trait DiagnosticsSink: Send + Sync {
    fn write(&self, diagnostics: &DispatchDiagnostics) -> Result<()>;
}

/// Emits diagnostics through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn write(&self, diagnostics: &DispatchDiagnostics) -> Result<()> {
        let body = serde_json::to_string(diagnostics)?;
        tracing::info!(
            target: "amphion::dispatch",
            app = %diagnostics.app_name,
            provider = %diagnostics.provider,
            success = diagnostics.success,
            diagnostics = %body,
            "chat dispatch diagnostics"
        );
        Ok(())
    }
}

/// Appends a header line and the pretty-printed record to a log file.
///
/// The append is a blocking `std::fs` write made from inside
/// `Dispatcher::diagnose`. That is fine on the CLI's current-thread runtime;
/// callers on a shared multi-threaded runtime should wrap this sink in one
/// that hands the write to `tokio::task::spawn_blocking`.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DiagnosticsSink for FileSink {
    fn write(&self, diagnostics: &DispatchDiagnostics) -> Result<()> {
        let body = serde_json::to_string_pretty(diagnostics)?;
        let entry = format!("{}\n{}\n", diagnostics.header(), body);
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        crate::io::append_text(&self.path, &entry)
    }
}

// ---------------------------------------------------------------------------
// Reporter
// ---------------------------------------------------------------------------

/// Forwards finished diagnostics to a sink when logging is enabled.
#[derive(Clone)]
pub struct Reporter {
    enabled: bool,
    sink: Arc<dyn DiagnosticsSink>,
}

impl Reporter {
    pub fn new(enabled: bool, sink: Arc<dyn DiagnosticsSink>) -> Self {
        Self { enabled, sink }
    }

    pub fn disabled() -> Self {
        Self::new(false, Arc::new(TracingSink))
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn report(&self, diagnostics: &DispatchDiagnostics) {
        if !self.enabled {
            return;
        }
        if let Err(e) = self.sink.write(diagnostics) {
            tracing::warn!(error = %e, "failed to write chat dispatch diagnostics");
        }
    }
}

impl std::fmt::Debug for Reporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reporter")
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
