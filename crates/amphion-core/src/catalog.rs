//! Static command catalog: curated default command ids per provider, regexes
//! for discovering renamed or new chat commands in the live registry, and
//! the set of commands that accept a prefilled text payload.

use regex::Regex;
use std::sync::OnceLock;

use crate::types::Provider;

// ---------------------------------------------------------------------------
// Default commands
// ---------------------------------------------------------------------------

const VSCODE_COMMANDS: &[&str] = &[
    "workbench.action.chat.open",
    "workbench.action.quickchat.open",
    "chat.open",
    "chat.new",
    "chat.focus",
    "aichat.open",
    "aichat.newChat",
    "aichat.newchat",
    "composer.openChat",
    "composer.newChat",
    "composer.newAgentChat",
];

const CURSOR_COMMANDS: &[&str] = &[
    "cursor.composer.newChat",
    "composer.newAgentChat",
    "composer.openChat",
    "composer.newChat",
    "workbench.action.chat.open",
    "workbench.action.quickchat.open",
    "chat.open",
    "chat.new",
    "chat.focus",
];

const WINDSURF_COMMANDS: &[&str] = &[
    "windsurf.triggerCascade",
    "windsurf.prioritized.command.open",
    "windsurf.openCascadeInNewGroup",
    "windsurf.cascade.openAgentPicker",
    "windsurf.prioritized.chat.toggleWriteChatMode",
];

const ANTIGRAVITY_COMMANDS: &[&str] = &[
    "antigravity.prioritized.command.open",
    "antigravity.openConversationPicker",
    "antigravity.openConversationWorkspaceQuickPick",
    "antigravity.toggleChatFocus",
    "antigravity.prioritized.chat.open",
];

const GENERIC_COMMANDS: &[&str] = &[
    "workbench.action.chat.open",
    "workbench.action.quickchat.open",
    "chat.open",
    "chat.new",
    "chat.focus",
];

/// Known-good chat commands for `provider`, most likely to succeed first.
pub fn default_commands(provider: Provider) -> &'static [&'static str] {
    match provider {
        Provider::Vscode => VSCODE_COMMANDS,
        Provider::Cursor => CURSOR_COMMANDS,
        Provider::Windsurf => WINDSURF_COMMANDS,
        Provider::Antigravity => ANTIGRAVITY_COMMANDS,
        Provider::Generic => GENERIC_COMMANDS,
    }
}

// ---------------------------------------------------------------------------
// Discovery patterns
// ---------------------------------------------------------------------------

const VSCODE_PATTERNS: &[&str] = &[
    r"(?i)^workbench\.action\.chat\.open$",
    r"(?i)^workbench\.action\.quickchat\.open$",
    r"(?i)^chat\.(open|new|focus)$",
    r"(?i)^aichat\.[\w.-]+$",
    r"(?i)^composer\.(openChat|newChat|newAgentChat)$",
];

const CURSOR_PATTERNS: &[&str] = &[
    r"(?i)^cursor\.composer\.[\w.-]+$",
    r"(?i)^composer\.(openChat|newChat|newAgentChat)$",
    r"(?i)^workbench\.action\.chat\.open$",
    r"(?i)^workbench\.action\.quickchat\.open$",
    r"(?i)^chat\.(open|new|focus)$",
];

const WINDSURF_PATTERNS: &[&str] = &[
    r"(?i)^windsurf\.triggerCascade$",
    r"(?i)^windsurf\.prioritized\.command\.open$",
    r"(?i)^windsurf\.openCascadeInNewGroup$",
    r"(?i)^windsurf\.cascade\.openAgentPicker$",
    r"(?i)^windsurf\.prioritized\.chat\.toggleWriteChatMode$",
];

const ANTIGRAVITY_PATTERNS: &[&str] = &[
    r"(?i)^antigravity\.prioritized\.command\.open$",
    r"(?i)^antigravity\.openConversationPicker$",
    r"(?i)^antigravity\.openConversationWorkspaceQuickPick$",
    r"(?i)^antigravity\.toggleChatFocus$",
    r"(?i)^antigravity\.prioritized\.chat\.open$",
];

const GENERIC_PATTERNS: &[&str] = &[
    r"(?i)^workbench\.action\.chat\.open$",
    r"(?i)^workbench\.action\.quickchat\.open$",
    r"(?i)^chat\.(open|new|focus)$",
    r"(?i)^aichat\.[\w.-]+$",
    r"(?i)^composer\.(openChat|newChat|newAgentChat)$",
    r"(?i)^cursor\.composer\.[\w.-]+$",
];

fn pattern_sources(provider: Provider) -> &'static [&'static str] {
    match provider {
        Provider::Vscode => VSCODE_PATTERNS,
        Provider::Cursor => CURSOR_PATTERNS,
        Provider::Windsurf => WINDSURF_PATTERNS,
        Provider::Antigravity => ANTIGRAVITY_PATTERNS,
        Provider::Generic => GENERIC_PATTERNS,
    }
}

static VSCODE_RE: OnceLock<Vec<Regex>> = OnceLock::new();
static CURSOR_RE: OnceLock<Vec<Regex>> = OnceLock::new();
static WINDSURF_RE: OnceLock<Vec<Regex>> = OnceLock::new();
static ANTIGRAVITY_RE: OnceLock<Vec<Regex>> = OnceLock::new();
static GENERIC_RE: OnceLock<Vec<Regex>> = OnceLock::new();

fn compile(sources: &[&str]) -> Vec<Regex> {
    sources
        .iter()
        .map(|src| Regex::new(src).unwrap())
        .collect()
}

/// Compiled discovery patterns for `provider`, built once per process.
pub fn discovery_patterns(provider: Provider) -> &'static [Regex] {
    let cell = match provider {
        Provider::Vscode => &VSCODE_RE,
        Provider::Cursor => &CURSOR_RE,
        Provider::Windsurf => &WINDSURF_RE,
        Provider::Antigravity => &ANTIGRAVITY_RE,
        Provider::Generic => &GENERIC_RE,
    };
    cell.get_or_init(|| compile(pattern_sources(provider)))
}

/// True if any of `provider`'s discovery patterns matches `command_id`.
pub fn matches_provider(provider: Provider, command_id: &str) -> bool {
    discovery_patterns(provider)
        .iter()
        .any(|re| re.is_match(command_id))
}

// ---------------------------------------------------------------------------
// Prefill classifier
// ---------------------------------------------------------------------------

/// Commands verified to accept a text payload and open chat pre-populated.
const PREFILL_COMMANDS: &[&str] = &[
    "workbench.action.chat.open",
    "workbench.action.quickchat.open",
    "chat.open",
    "chat.new",
];

pub fn prefill_commands() -> &'static [&'static str] {
    PREFILL_COMMANDS
}

pub fn is_prefill_command(command_id: &str) -> bool {
    PREFILL_COMMANDS.contains(&command_id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
