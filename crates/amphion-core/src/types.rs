use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AmphionError;

// ---------------------------------------------------------------------------
// Provider
// ---------------------------------------------------------------------------

/// The host editor family whose chat surface is being targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Vscode,
    Cursor,
    Windsurf,
    Antigravity,
    Generic,
}

impl Provider {
    pub fn all() -> &'static [Provider] {
        &[
            Provider::Vscode,
            Provider::Cursor,
            Provider::Windsurf,
            Provider::Antigravity,
            Provider::Generic,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Provider::Vscode => "vscode",
            Provider::Cursor => "cursor",
            Provider::Windsurf => "windsurf",
            Provider::Antigravity => "antigravity",
            Provider::Generic => "generic",
        }
    }

    /// VS Code and Cursor already expose the generic chat surface, so the
    /// generic catalog is only appended for the other providers.
    pub fn covers_generic(self) -> bool {
        matches!(self, Provider::Vscode | Provider::Cursor)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Provider {
    type Err = AmphionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vscode" => Ok(Provider::Vscode),
            "cursor" => Ok(Provider::Cursor),
            "windsurf" => Ok(Provider::Windsurf),
            "antigravity" => Ok(Provider::Antigravity),
            "generic" => Ok(Provider::Generic),
            _ => Err(AmphionError::UnknownProvider(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// DispatchMode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DispatchMode {
    /// Resolve and classify only; no host command is invoked.
    DryRun,
    Live,
}

impl DispatchMode {
    pub fn as_str(self) -> &'static str {
        match self {
            DispatchMode::DryRun => "dry-run",
            DispatchMode::Live => "live",
        }
    }
}

impl fmt::Display for DispatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DispatchMode {
    type Err = AmphionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dry-run" => Ok(DispatchMode::DryRun),
            "live" => Ok(DispatchMode::Live),
            _ => Err(AmphionError::UnknownMode(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// DispatchStage
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchStage {
    Prefill,
    Open,
    Type,
}

impl DispatchStage {
    pub fn as_str(self) -> &'static str {
        match self {
            DispatchStage::Prefill => "prefill",
            DispatchStage::Open => "open",
            DispatchStage::Type => "type",
        }
    }
}

impl fmt::Display for DispatchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FailureReason
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureReason {
    EmptyInput,
    NoSupportedChatCommands,
    NoAttemptsExecuted,
    ChatOpenedButTypeFailed,
    ChatOpenFailed,
    PrefillNotSupported,
    AllDispatchAttemptsFailed,
}

impl FailureReason {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureReason::EmptyInput => "empty-input",
            FailureReason::NoSupportedChatCommands => "no-supported-chat-commands",
            FailureReason::NoAttemptsExecuted => "no-attempts-executed",
            FailureReason::ChatOpenedButTypeFailed => "chat-opened-but-type-failed",
            FailureReason::ChatOpenFailed => "chat-open-failed",
            FailureReason::PrefillNotSupported => "prefill-not-supported",
            FailureReason::AllDispatchAttemptsFailed => "all-dispatch-attempts-failed",
        }
    }

    /// Short, actionable message for callers that surface the failure to a user.
    pub fn hint(self) -> &'static str {
        match self {
            FailureReason::EmptyInput => "nothing to send: the chat text is empty",
            FailureReason::NoSupportedChatCommands => {
                "no known chat command is registered in this editor; configure a command override"
            }
            FailureReason::NoAttemptsExecuted => "no dispatch attempt was made",
            FailureReason::ChatOpenedButTypeFailed => {
                "chat opened but typing failed; paste the text manually"
            }
            FailureReason::ChatOpenFailed => "no chat command could be opened",
            FailureReason::PrefillNotSupported => {
                "the chat command rejected every prefill payload"
            }
            FailureReason::AllDispatchAttemptsFailed => {
                "every dispatch attempt failed; copy the text and paste it manually"
            }
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FailureReason {
    type Err = AmphionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "empty-input" => Ok(FailureReason::EmptyInput),
            "no-supported-chat-commands" => Ok(FailureReason::NoSupportedChatCommands),
            "no-attempts-executed" => Ok(FailureReason::NoAttemptsExecuted),
            "chat-opened-but-type-failed" => Ok(FailureReason::ChatOpenedButTypeFailed),
            "chat-open-failed" => Ok(FailureReason::ChatOpenFailed),
            "prefill-not-supported" => Ok(FailureReason::PrefillNotSupported),
            "all-dispatch-attempts-failed" => Ok(FailureReason::AllDispatchAttemptsFailed),
            _ => Err(AmphionError::UnknownFailureReason(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
