//! A recorded editor command surface that can stand in for a live host.
//!
//! Snapshots are captured from a real editor (app name + registered command
//! ids) and annotated with which commands open chat and which payload shapes
//! each prefill command accepts. [`SnapshotHost`] replays those rules and keeps
//! a log of every invocation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Mutex;

use crate::error::{AmphionError, Result};
use crate::host::{ChatHost, HostError, TYPE_COMMAND};
use crate::payload::PayloadKind;

// ---------------------------------------------------------------------------
// HostSnapshot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostSnapshot {
    #[serde(default)]
    pub app_name: String,
    /// Full command registry, in host order.
    #[serde(default)]
    pub commands: Vec<String>,
    /// Commands that succeed when invoked without an argument.
    #[serde(default)]
    pub open_commands: Vec<String>,
    /// Payload shapes each command accepts.
    #[serde(default)]
    pub prefill: BTreeMap<String, Vec<PayloadKind>>,
    /// Whether the `type` command succeeds after a panel is opened.
    #[serde(default = "default_type_succeeds")]
    pub type_succeeds: bool,
}

fn default_type_succeeds() -> bool {
    true
}

impl Default for HostSnapshot {
    fn default() -> Self {
        Self {
            app_name: String::new(),
            commands: Vec::new(),
            open_commands: Vec::new(),
            prefill: BTreeMap::new(),
            type_succeeds: default_type_succeeds(),
        }
    }
}

impl HostSnapshot {
    /// Load a snapshot from a `.json` or YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AmphionError::SnapshotNotFound(path.display().to_string()));
        }
        let data = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        let snapshot = if is_json {
            serde_json::from_str(&data)?
        } else {
            serde_yaml::from_str(&data)?
        };
        Ok(snapshot)
    }
}

// ---------------------------------------------------------------------------
// SnapshotHost
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct HostCall {
    pub command_id: String,
    pub payload: Option<Value>,
}

#[derive(Debug)]
pub struct SnapshotHost {
    snapshot: HostSnapshot,
    calls: Mutex<Vec<HostCall>>,
}

impl SnapshotHost {
    pub fn new(snapshot: HostSnapshot) -> Self {
        Self {
            snapshot,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn snapshot(&self) -> &HostSnapshot {
        &self.snapshot
    }

    /// Every `execute_command` call so far, in order.
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn record(&self, command_id: &str, payload: &Option<Value>) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(HostCall {
                command_id: command_id.to_string(),
                payload: payload.clone(),
            });
    }

    fn respond(
        &self,
        command_id: &str,
        payload: Option<&Value>,
    ) -> std::result::Result<Value, HostError> {
        if command_id == TYPE_COMMAND {
            let has_text = payload.and_then(|p| p.get("text")).is_some();
            if !has_text {
                return Err(HostError::Rejected {
                    command: command_id.to_string(),
                    reason: "missing text".to_string(),
                });
            }
            if !self.snapshot.type_succeeds {
                return Err(HostError::Other("no focused input to type into".to_string()));
            }
            return Ok(Value::Null);
        }

        if !self.snapshot.commands.iter().any(|c| c == command_id) {
            return Err(HostError::UnknownCommand(command_id.to_string()));
        }

        match payload {
            None => {
                if self.snapshot.open_commands.iter().any(|c| c == command_id) {
                    Ok(Value::Null)
                } else {
                    Err(HostError::Rejected {
                        command: command_id.to_string(),
                        reason: "command did not open a chat panel".to_string(),
                    })
                }
            }
            Some(value) => {
                let accepted = PayloadKind::of(value).is_some_and(|kind| {
                    self.snapshot
                        .prefill
                        .get(command_id)
                        .is_some_and(|kinds| kinds.contains(&kind))
                });
                if accepted {
                    Ok(Value::Null)
                } else {
                    Err(HostError::Rejected {
                        command: command_id.to_string(),
                        reason: "unsupported argument shape".to_string(),
                    })
                }
            }
        }
    }
}

#[async_trait]
impl ChatHost for SnapshotHost {
    fn app_name(&self) -> String {
        self.snapshot.app_name.clone()
    }

    async fn get_all_commands(&self) -> Vec<String> {
        self.snapshot.commands.clone()
    }

    async fn execute_command(
        &self,
        command_id: &str,
        payload: Option<Value>,
    ) -> std::result::Result<Value, HostError> {
        self.record(command_id, &payload);
        self.respond(command_id, payload.as_ref())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
