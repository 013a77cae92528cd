use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Host command that types text into whatever currently holds focus.
pub const TYPE_COMMAND: &str = "type";

/// Failure reported by the host when a command invocation is rejected.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum HostError {
    #[error("command '{0}' not found")]
    UnknownCommand(String),

    #[error("command '{command}' rejected the request: {reason}")]
    Rejected { command: String, reason: String },

    #[error("{0}")]
    Other(String),
}

/// The editor's command surface.
///
/// Implementations wrap a live editor (an extension bridge) or a recorded
/// snapshot. Every method is called sequentially; an invocation is awaited
/// before the next one starts.
#[async_trait]
pub trait ChatHost: Send + Sync {
    /// Self-reported application name, e.g. "Visual Studio Code".
    fn app_name(&self) -> String;

    /// Every command id currently registered on the host.
    async fn get_all_commands(&self) -> Vec<String>;

    /// Invoke `command_id`, optionally with a structured argument.
    async fn execute_command(
        &self,
        command_id: &str,
        payload: Option<Value>,
    ) -> Result<Value, HostError>;
}

#[async_trait]
impl<T: ChatHost + ?Sized> ChatHost for std::sync::Arc<T> {
    fn app_name(&self) -> String {
        (**self).app_name()
    }

    async fn get_all_commands(&self) -> Vec<String> {
        (**self).get_all_commands().await
    }

    async fn execute_command(
        &self,
        command_id: &str,
        payload: Option<Value>,
    ) -> Result<Value, HostError> {
        (**self).execute_command(command_id, payload).await
    }
}
