use crate::cmd::{block_on, snapshot_dispatcher};
use crate::output::{print_fields, print_json, print_table};
use amphion_core::{
    default_commands, is_prefill_command, DispatchDiagnostics, DispatchMode, Provider,
};
use std::path::Path;

pub fn run(
    root: &Path,
    config_path: &Path,
    snapshot_path: &Path,
    text: &str,
    json: bool,
) -> anyhow::Result<()> {
    let dispatcher = snapshot_dispatcher(root, config_path, snapshot_path)?;
    let diagnostics = block_on(dispatcher.diagnose(text, DispatchMode::DryRun))?;

    if json {
        return print_json(&diagnostics);
    }

    print_summary(&diagnostics);
    if diagnostics.resolved_commands.is_empty() {
        println!("No chat command is registered on this host.");
        return Ok(());
    }
    let rows = diagnostics
        .resolved_commands
        .iter()
        .enumerate()
        .map(|(i, cmd)| {
            vec![
                (i + 1).to_string(),
                cmd.clone(),
                command_source(&diagnostics, cmd).to_string(),
                if is_prefill_command(cmd) { "yes" } else { "" }.to_string(),
            ]
        })
        .collect();
    print_table(&["#", "COMMAND", "SOURCE", "PREFILL"], rows);
    Ok(())
}

pub(crate) fn print_summary(d: &DispatchDiagnostics) {
    print_fields(&[
        ("app", d.app_name.clone()),
        ("provider", d.provider.to_string()),
        ("mode", d.mode.to_string()),
        ("registered", d.available_command_count.to_string()),
        ("overrides", d.override_commands.len().to_string()),
        ("discovered", d.discovered_commands.len().to_string()),
    ]);
    println!();
}

/// Where a resolved command entered the plan, by priority.
fn command_source(d: &DispatchDiagnostics, cmd: &str) -> &'static str {
    if d.override_commands.iter().any(|c| c == cmd) {
        "override"
    } else if default_commands(d.provider).contains(&cmd) {
        "default"
    } else if d.discovered_commands.iter().any(|c| c == cmd) {
        "discovered"
    } else if default_commands(Provider::Generic).contains(&cmd) {
        "generic"
    } else {
        "unknown"
    }
}
