use crate::types::Provider;

/// Classify a host application name into a [`Provider`].
///
/// Matching is by substring so forks like "Cursor Nightly" still resolve.
/// Specific names are checked before the broad `code` match, which would
/// otherwise swallow any fork that mentions VS Code in its name.
pub fn detect_provider(app_name: &str) -> Provider {
    let normalized = app_name.trim().to_lowercase();
    if normalized.is_empty() {
        return Provider::Generic;
    }
    if normalized.contains("cursor") {
        return Provider::Cursor;
    }
    if normalized.contains("windsurf") {
        return Provider::Windsurf;
    }
    if normalized.contains("antigravity") {
        return Provider::Antigravity;
    }
    if normalized.contains("visual studio code")
        || normalized.contains("vscode")
        || normalized.contains("code")
    {
        return Provider::Vscode;
    }
    Provider::Generic
}
