pub mod catalog;
pub mod config;
pub mod detect;
pub mod plan;
pub mod simulate;

use amphion_core::paths;
use amphion_core::snapshot::{HostSnapshot, SnapshotHost};
use amphion_core::{DispatchConfig, Dispatcher, FileSink};
use anyhow::Context;
use std::future::Future;
use std::path::Path;
use std::sync::Arc;

/// Build a dispatcher over a recorded host, logging diagnostics to the
/// project log file when the config enables it.
pub(crate) fn snapshot_dispatcher(
    root: &Path,
    config_path: &Path,
    snapshot_path: &Path,
) -> anyhow::Result<Dispatcher<SnapshotHost>> {
    let config = DispatchConfig::load(config_path)
        .with_context(|| format!("failed to load config {}", config_path.display()))?;
    let snapshot = HostSnapshot::load(snapshot_path)
        .with_context(|| format!("failed to load snapshot {}", snapshot_path.display()))?;
    tracing::debug!(
        app = %snapshot.app_name,
        commands = snapshot.commands.len(),
        "loaded host snapshot"
    );
    let sink = Arc::new(FileSink::new(paths::dispatch_log_path(root)));
    Ok(Dispatcher::new(SnapshotHost::new(snapshot), config).with_sink(sink))
}

pub(crate) fn block_on<F: Future>(future: F) -> anyhow::Result<F::Output> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("failed to start tokio runtime")?;
    Ok(rt.block_on(future))
}
