use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::catalog::{default_commands, matches_provider};
use crate::types::Provider;

// ---------------------------------------------------------------------------
// DispatchPlan
// ---------------------------------------------------------------------------

/// Candidate commands for one dispatch call.
///
/// `resolved` is the attempt order: overrides, then provider defaults, then
/// discovered commands, then generic defaults (only for providers that don't
/// already cover the generic surface), de-duplicated and filtered to commands
/// the host has registered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchPlan {
    pub discovered: Vec<String>,
    pub resolved: Vec<String>,
}

/// Trim, drop blanks, and keep the first occurrence of each command id.
pub fn unique_command_list<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut result = Vec::new();
    for value in values {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() || !seen.insert(trimmed.to_string()) {
            continue;
        }
        result.push(trimmed.to_string());
    }
    result
}

/// Live registry commands that match `provider`'s discovery patterns, in
/// registry order.
pub fn discover_provider_commands(provider: Provider, available: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut discovered = Vec::new();
    for cmd in available {
        if matches_provider(provider, cmd) && seen.insert(cmd.as_str()) {
            discovered.push(cmd.clone());
        }
    }
    discovered
}

pub fn resolve_dispatch_commands(
    provider: Provider,
    available: &[String],
    overrides: &[String],
) -> DispatchPlan {
    let registry: HashSet<&str> = available.iter().map(String::as_str).collect();
    let discovered = discover_provider_commands(provider, available);

    let generic: &[&str] = if provider.covers_generic() {
        &[]
    } else {
        default_commands(Provider::Generic)
    };

    let ordered = unique_command_list(
        overrides
            .iter()
            .map(String::as_str)
            .chain(default_commands(provider).iter().copied())
            .chain(discovered.iter().map(String::as_str))
            .chain(generic.iter().copied()),
    );

    let resolved = ordered
        .into_iter()
        .filter(|cmd| registry.contains(cmd.as_str()))
        .collect();

    DispatchPlan {
        discovered,
        resolved,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn unique_command_list_trims_and_dedups() {
        let out = unique_command_list(["  a ", "b", "a", "", "   ", "b ", "c"]);
        assert_eq!(out, strings(&["a", "b", "c"]));
    }

    #[test]
    fn windsurf_plan_excludes_unrelated_commands() {
        let available = strings(&[
            "windsurf.openProfile",
            "windsurf.triggerCascade",
            "windsurf.prioritized.command.open",
            "windsurf.openBillingPage",
        ]);
        let plan = resolve_dispatch_commands(Provider::Windsurf, &available, &[]);
        assert!(plan.resolved.contains(&"windsurf.triggerCascade".to_string()));
        assert!(!plan.resolved.contains(&"windsurf.openProfile".to_string()));
        assert!(!plan.resolved.contains(&"windsurf.openBillingPage".to_string()));
        assert_eq!(
            plan.resolved,
            strings(&["windsurf.triggerCascade", "windsurf.prioritized.command.open"])
        );
    }

    #[test]
    fn antigravity_plan_excludes_unrelated_commands() {
        let available = strings(&[
            "antigravity.openConversationPicker",
            "antigravity.prioritized.command.open",
            "antigravity.openChangeLog",
        ]);
        let plan = resolve_dispatch_commands(Provider::Antigravity, &available, &[]);
        assert!(plan
            .resolved
            .contains(&"antigravity.openConversationPicker".to_string()));
        assert!(!plan.resolved.contains(&"antigravity.openChangeLog".to_string()));
        // default-list order wins over registry order
        assert_eq!(
            plan.resolved,
            strings(&[
                "antigravity.prioritized.command.open",
                "antigravity.openConversationPicker",
            ])
        );
    }

    #[test]
    fn overrides_come_first_but_must_be_registered() {
        let available = strings(&["chat.open", "my.custom.chat", "workbench.action.chat.open"]);
        let overrides = strings(&["my.custom.chat", "not.registered"]);
        let plan = resolve_dispatch_commands(Provider::Vscode, &available, &overrides);
        assert_eq!(
            plan.resolved,
            strings(&["my.custom.chat", "workbench.action.chat.open", "chat.open"])
        );
    }

    #[test]
    fn discovered_commands_follow_defaults() {
        let available = strings(&["aichat.experimentalPanel", "chat.open"]);
        let plan = resolve_dispatch_commands(Provider::Vscode, &available, &[]);
        assert_eq!(plan.discovered, strings(&["aichat.experimentalPanel", "chat.open"]));
        assert_eq!(plan.resolved, strings(&["chat.open", "aichat.experimentalPanel"]));
    }

    #[test]
    fn generic_defaults_appended_for_windsurf() {
        let available = strings(&["windsurf.triggerCascade", "workbench.action.chat.open"]);
        let plan = resolve_dispatch_commands(Provider::Windsurf, &available, &[]);
        assert_eq!(
            plan.resolved,
            strings(&["windsurf.triggerCascade", "workbench.action.chat.open"])
        );
        assert_eq!(plan.discovered, strings(&["windsurf.triggerCascade"]));
    }

    #[test]
    fn generic_defaults_not_appended_for_cursor() {
        // chat.focus is a generic default, but cursor lists it itself, so only
        // the cursor ordering applies.
        let available = strings(&["chat.focus", "cursor.composer.newChat"]);
        let plan = resolve_dispatch_commands(Provider::Cursor, &available, &[]);
        assert_eq!(plan.resolved, strings(&["cursor.composer.newChat", "chat.focus"]));
    }

    #[test]
    fn resolved_is_subset_of_registry() {
        let available = strings(&["chat.open", "aichat.foo", "unrelated.command"]);
        let overrides = strings(&["ghost.command", "chat.open"]);
        for p in Provider::all() {
            let plan = resolve_dispatch_commands(*p, &available, &overrides);
            for cmd in &plan.resolved {
                assert!(available.contains(cmd), "{p}: {cmd} not in registry");
            }
            for cmd in &plan.discovered {
                assert!(available.contains(cmd), "{p}: {cmd} not in registry");
            }
        }
    }

    #[test]
    fn duplicates_are_removed_everywhere() {
        let available = strings(&[
            "chat.open",
            "chat.open",
            "aichat.foo",
            "aichat.foo",
            "workbench.action.chat.open",
        ]);
        let overrides = strings(&["chat.open", "aichat.foo", "chat.open"]);
        for p in Provider::all() {
            let plan = resolve_dispatch_commands(*p, &available, &overrides);
            let resolved: HashSet<_> = plan.resolved.iter().collect();
            let discovered: HashSet<_> = plan.discovered.iter().collect();
            assert_eq!(resolved.len(), plan.resolved.len(), "{p}: resolved has dups");
            assert_eq!(discovered.len(), plan.discovered.len(), "{p}: discovered has dups");
        }
    }

    #[test]
    fn empty_inputs_yield_empty_plan() {
        let plan = resolve_dispatch_commands(Provider::Generic, &[], &[]);
        assert_eq!(plan, DispatchPlan::default());
    }
}
