use crate::error::{AmphionError, Result};
use crate::paths;
use crate::types::Provider;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_OPEN_DELAY_MS: u64 = 120;
pub const MIN_OPEN_DELAY_MS: u64 = 30;
pub const MAX_OPEN_DELAY_MS: u64 = 1500;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// CommandOverrides
// ---------------------------------------------------------------------------

/// User-supplied command ids tried before the built-in catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawCommandOverrides")]
pub struct CommandOverrides {
    pub vscode_commands: Vec<String>,
    pub cursor_commands: Vec<String>,
    pub windsurf_commands: Vec<String>,
    pub antigravity_commands: Vec<String>,
    pub generic_commands: Vec<String>,
    /// Entries discarded while reading the config file.
    #[serde(skip)]
    pub rejected: Vec<RejectedOverride>,
}

impl CommandOverrides {
    pub fn for_provider(&self, provider: Provider) -> &[String] {
        match provider {
            Provider::Vscode => &self.vscode_commands,
            Provider::Cursor => &self.cursor_commands,
            Provider::Windsurf => &self.windsurf_commands,
            Provider::Antigravity => &self.antigravity_commands,
            Provider::Generic => &self.generic_commands,
        }
    }

    /// The provider's own list, or the generic list when the provider has none.
    pub fn effective_for(&self, provider: Provider) -> &[String] {
        let own = self.for_provider(provider);
        if own.is_empty() {
            &self.generic_commands
        } else {
            own
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RejectedOverride {
    pub provider: Provider,
    /// The offending value, rendered as JSON.
    pub entry: String,
    pub reason: RejectReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    NotAList,
    NotAString,
    Blank,
    Duplicate,
}

impl RejectReason {
    pub fn as_str(self) -> &'static str {
        match self {
            RejectReason::NotAList => "not a list",
            RejectReason::NotAString => "not a string",
            RejectReason::Blank => "blank",
            RejectReason::Duplicate => "duplicate",
        }
    }
}

/// On-disk shape: every list is read as an arbitrary value so one bad entry
/// never fails the whole file.
#[derive(Deserialize)]
struct RawCommandOverrides {
    #[serde(default)]
    vscode_commands: serde_json::Value,
    #[serde(default)]
    cursor_commands: serde_json::Value,
    #[serde(default)]
    windsurf_commands: serde_json::Value,
    #[serde(default)]
    antigravity_commands: serde_json::Value,
    #[serde(default)]
    generic_commands: serde_json::Value,
}

impl From<RawCommandOverrides> for CommandOverrides {
    fn from(raw: RawCommandOverrides) -> Self {
        let mut rejected = Vec::new();
        let vscode_commands =
            lenient_command_list(Provider::Vscode, raw.vscode_commands, &mut rejected);
        let cursor_commands =
            lenient_command_list(Provider::Cursor, raw.cursor_commands, &mut rejected);
        let windsurf_commands =
            lenient_command_list(Provider::Windsurf, raw.windsurf_commands, &mut rejected);
        let antigravity_commands =
            lenient_command_list(Provider::Antigravity, raw.antigravity_commands, &mut rejected);
        let generic_commands =
            lenient_command_list(Provider::Generic, raw.generic_commands, &mut rejected);
        Self {
            vscode_commands,
            cursor_commands,
            windsurf_commands,
            antigravity_commands,
            generic_commands,
            rejected,
        }
    }
}

/// Keep the trimmed, first-seen string entries of a sequence. Everything
/// else is dropped and noted in `rejected`; a missing or null list is empty.
fn lenient_command_list(
    provider: Provider,
    value: serde_json::Value,
    rejected: &mut Vec<RejectedOverride>,
) -> Vec<String> {
    let mut reject = |entry: &serde_json::Value, reason| {
        rejected.push(RejectedOverride {
            provider,
            entry: entry.to_string(),
            reason,
        })
    };
    let items = match value {
        serde_json::Value::Null => return Vec::new(),
        serde_json::Value::Array(items) => items,
        other => {
            reject(&other, RejectReason::NotAList);
            return Vec::new();
        }
    };

    let mut commands: Vec<String> = Vec::new();
    for item in &items {
        let Some(raw) = item.as_str() else {
            reject(item, RejectReason::NotAString);
            continue;
        };
        let id = raw.trim();
        if id.is_empty() {
            reject(item, RejectReason::Blank);
        } else if commands.iter().any(|c| c == id) {
            reject(item, RejectReason::Duplicate);
        } else {
            commands.push(id.to_string());
        }
    }
    commands
}

// ---------------------------------------------------------------------------
// DispatchConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Pause between opening a chat panel and typing into it.
    #[serde(default = "default_open_delay_ms")]
    pub open_delay_ms: f64,
    #[serde(default)]
    pub enable_diagnostics_logging: bool,
    /// Upper bound on a single host invocation. `None` waits indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempt_timeout_ms: Option<u64>,
    #[serde(default)]
    pub overrides: CommandOverrides,
}

fn default_open_delay_ms() -> f64 {
    DEFAULT_OPEN_DELAY_MS as f64
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            open_delay_ms: default_open_delay_ms(),
            enable_diagnostics_logging: false,
            attempt_timeout_ms: None,
            overrides: CommandOverrides::default(),
        }
    }
}

impl DispatchConfig {
    /// Load from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)?;
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: DispatchConfig = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn load_from_root(root: &Path) -> Result<Self> {
        Self::load(&paths::config_path(root))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(path, data.as_bytes())
    }

    /// Write a default config at `path`, refusing to overwrite an existing one.
    pub fn init(path: &Path) -> Result<Self> {
        let cfg = Self::default();
        let data = serde_yaml::to_string(&cfg)?;
        if !crate::io::write_if_missing(path, data.as_bytes())? {
            return Err(AmphionError::ConfigExists(path.display().to_string()));
        }
        Ok(cfg)
    }

    /// Effective delay: rounded, clamped to the supported range, and falling
    /// back to the default for non-finite input.
    pub fn open_delay_ms(&self) -> u64 {
        clamp_open_delay(self.open_delay_ms)
    }

    pub fn open_delay(&self) -> Duration {
        Duration::from_millis(self.open_delay_ms())
    }

    pub fn attempt_timeout(&self) -> Option<Duration> {
        self.attempt_timeout_ms.map(Duration::from_millis)
    }

    pub fn overrides_for(&self, provider: Provider) -> &[String] {
        self.overrides.effective_for(provider)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if !self.open_delay_ms.is_finite() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "open_delay_ms is not a finite number; using {DEFAULT_OPEN_DELAY_MS}"
                ),
            });
        } else {
            let effective = self.open_delay_ms();
            if (effective as f64 - self.open_delay_ms).abs() >= 1.0 {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!(
                        "open_delay_ms={} is outside {MIN_OPEN_DELAY_MS}..={MAX_OPEN_DELAY_MS}; clamped to {effective}",
                        self.open_delay_ms
                    ),
                });
            }
        }

        if self.attempt_timeout_ms == Some(0) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "attempt_timeout_ms=0 fails every host invocation".to_string(),
            });
        }

        for provider in Provider::all() {
            for cmd in self.overrides.for_provider(*provider) {
                if cmd.chars().any(char::is_whitespace) {
                    warnings.push(ConfigWarning {
                        level: WarnLevel::Warning,
                        message: format!(
                            "override '{cmd}' for {provider} contains whitespace and will never match a command id"
                        ),
                    });
                }
            }
        }

        for r in &self.overrides.rejected {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "override {} for {} ignored: {}",
                    r.entry,
                    r.provider,
                    r.reason.as_str()
                ),
            });
        }

        warnings
    }
}

fn clamp_open_delay(value: f64) -> u64 {
    if !value.is_finite() {
        return DEFAULT_OPEN_DELAY_MS;
    }
    let rounded = value.round();
    rounded.clamp(MIN_OPEN_DELAY_MS as f64, MAX_OPEN_DELAY_MS as f64) as u64
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let cfg = DispatchConfig::default();
        assert_eq!(cfg.open_delay_ms(), 120);
        assert!(!cfg.enable_diagnostics_logging);
        assert!(cfg.attempt_timeout().is_none());
        assert!(cfg.overrides_for(Provider::Cursor).is_empty());
    }

    #[test]
    fn empty_yaml_uses_defaults() {
        let cfg: DispatchConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(cfg, DispatchConfig::default());
    }

    #[test]
    fn open_delay_is_clamped_and_rounded() {
        assert_eq!(clamp_open_delay(5.0), 30);
        assert_eq!(clamp_open_delay(99_999.0), 1500);
        assert_eq!(clamp_open_delay(200.6), 201);
        assert_eq!(clamp_open_delay(f64::NAN), 120);
        assert_eq!(clamp_open_delay(f64::INFINITY), 120);
    }

    #[test]
    fn overrides_tolerate_junk_entries() {
        let yaml = r#"
overrides:
  windsurf_commands: ["windsurf.triggerCascade", 42, "  windsurf.triggerCascade ", "", null, "custom.chat"]
  cursor_commands: "not-a-list"
"#;
        let cfg: DispatchConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            cfg.overrides.windsurf_commands,
            vec!["windsurf.triggerCascade".to_string(), "custom.chat".to_string()]
        );
        assert!(cfg.overrides.cursor_commands.is_empty());

        let reasons: Vec<(Provider, RejectReason)> = cfg
            .overrides
            .rejected
            .iter()
            .map(|r| (r.provider, r.reason))
            .collect();
        assert_eq!(
            reasons,
            vec![
                (Provider::Cursor, RejectReason::NotAList),
                (Provider::Windsurf, RejectReason::NotAString),
                (Provider::Windsurf, RejectReason::Duplicate),
                (Provider::Windsurf, RejectReason::Blank),
                (Provider::Windsurf, RejectReason::NotAString),
            ]
        );
    }

    #[test]
    fn validate_reports_dropped_override_entries() {
        let yaml = r#"
overrides:
  windsurf_commands: ["a.b", 42, "a.b", null]
"#;
        let cfg: DispatchConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.overrides.windsurf_commands, vec!["a.b".to_string()]);

        let warnings = cfg.validate();
        let messages: Vec<&str> = warnings.iter().map(|w| w.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "override 42 for windsurf ignored: not a string",
                "override \"a.b\" for windsurf ignored: duplicate",
                "override null for windsurf ignored: not a string",
            ]
        );
        assert!(warnings.iter().all(|w| w.level == WarnLevel::Warning));
    }

    #[test]
    fn rejected_entries_are_not_saved() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cfg.yaml");
        std::fs::write(&path, "overrides:\n  cursor_commands: [chat.open, 7]\n").unwrap();
        let cfg = DispatchConfig::load(&path).unwrap();
        assert_eq!(cfg.overrides.rejected.len(), 1);

        cfg.save(&path).unwrap();
        let reloaded = DispatchConfig::load(&path).unwrap();
        assert!(reloaded.overrides.rejected.is_empty());
        assert_eq!(reloaded.overrides.cursor_commands, vec!["chat.open".to_string()]);
    }

    #[test]
    fn provider_overrides_fall_back_to_generic() {
        let mut cfg = DispatchConfig::default();
        cfg.overrides.generic_commands = vec!["generic.chat".into()];
        cfg.overrides.cursor_commands = vec!["cursor.chat".into()];
        assert_eq!(cfg.overrides_for(Provider::Cursor), ["cursor.chat".to_string()]);
        assert_eq!(cfg.overrides_for(Provider::Windsurf), ["generic.chat".to_string()]);
    }

    #[test]
    fn load_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let cfg = DispatchConfig::load_from_root(dir.path()).unwrap();
        assert_eq!(cfg, DispatchConfig::default());
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = paths::config_path(dir.path());
        let mut cfg = DispatchConfig::default();
        cfg.open_delay_ms = 300.0;
        cfg.enable_diagnostics_logging = true;
        cfg.attempt_timeout_ms = Some(2_000);
        cfg.overrides.vscode_commands = vec!["my.chat".into()];
        cfg.save(&path).unwrap();

        let loaded = DispatchConfig::load(&path).unwrap();
        assert_eq!(loaded, cfg);
        assert_eq!(loaded.attempt_timeout(), Some(Duration::from_millis(2_000)));
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = paths::config_path(dir.path());
        DispatchConfig::init(&path).unwrap();
        let err = DispatchConfig::init(&path).unwrap_err();
        assert!(matches!(err, AmphionError::ConfigExists(_)));
    }

    #[test]
    fn invalid_yaml_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "open_delay_ms: [unterminated").unwrap();
        assert!(DispatchConfig::load(&path).is_err());
    }

    #[test]
    fn validate_default_is_clean() {
        assert!(DispatchConfig::default().validate().is_empty());
    }

    #[test]
    fn validate_flags_out_of_range_delay() {
        let cfg = DispatchConfig {
            open_delay_ms: 5_000.0,
            ..Default::default()
        };
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("clamped to 1500"));
    }

    #[test]
    fn validate_flags_zero_timeout_as_error() {
        let cfg = DispatchConfig {
            attempt_timeout_ms: Some(0),
            ..Default::default()
        };
        let warnings = cfg.validate();
        assert!(warnings.iter().any(|w| w.level == WarnLevel::Error));
    }

    #[test]
    fn validate_flags_whitespace_override() {
        let mut cfg = DispatchConfig::default();
        cfg.overrides.antigravity_commands = vec!["open chat".into()];
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("antigravity"));
    }
}
