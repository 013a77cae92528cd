//! `amphion-core` resolves and drives AI chat dispatch inside editor hosts.
//!
//! Given a host (VS Code, Cursor, Windsurf, Antigravity or an unknown fork),
//! the engine works out which registered command opens the host's chat panel
//! and delivers text to it, recording every attempt.
//!
//! ```text
//! app name ──► detect_provider ──► catalog (defaults + patterns)
//!                                        │
//! live registry + overrides ──► resolve_dispatch_commands
//!                                        │
//!                                        ▼
//!                    Dispatcher: prefill phase ──► open + type phase
//!                                        │
//!                                        ▼
//!                    DispatchDiagnostics ──► Reporter ──► DiagnosticsSink
//! ```
//!
//! Everything up to the [`Dispatcher`] is pure; only the dispatcher talks to
//! the [`ChatHost`].

pub mod catalog;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod executor;
pub mod host;
pub mod io;
pub mod paths;
pub mod payload;
pub mod plan;
pub mod provider;
pub mod snapshot;
pub mod types;

pub use catalog::{default_commands, discovery_patterns, is_prefill_command};
pub use config::{DispatchConfig, RejectReason, RejectedOverride};
pub use diagnostics::{
    DiagnosticsSink, DispatchAttempt, DispatchDiagnostics, DispatchResult, FileSink, Reporter,
    TracingSink,
};
pub use error::{AmphionError, Result};
pub use executor::Dispatcher;
pub use host::{ChatHost, HostError};
pub use plan::{resolve_dispatch_commands, unique_command_list, DispatchPlan};
pub use provider::detect_provider;
pub use types::{DispatchMode, DispatchStage, FailureReason, Provider};
