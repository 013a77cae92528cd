use thiserror::Error;

#[derive(Debug, Error)]
pub enum AmphionError {
    #[error("unknown provider '{0}': expected vscode, cursor, windsurf, antigravity or generic")]
    UnknownProvider(String),

    #[error("unknown dispatch mode '{0}': expected dry-run or live")]
    UnknownMode(String),

    #[error("unknown failure reason: {0}")]
    UnknownFailureReason(String),

    #[error("unknown payload kind: {0}")]
    UnknownPayloadKind(String),

    #[error("config already exists: {0}")]
    ConfigExists(String),

    #[error("snapshot not found: {0}")]
    SnapshotNotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AmphionError>;
