use crate::cmd::plan::print_summary;
use crate::cmd::{block_on, snapshot_dispatcher};
use crate::output::{print_json, print_table};
use amphion_core::DispatchMode;
use std::path::Path;

pub fn run(
    root: &Path,
    config_path: &Path,
    snapshot_path: &Path,
    text: &str,
    json: bool,
) -> anyhow::Result<()> {
    let dispatcher = snapshot_dispatcher(root, config_path, snapshot_path)?;
    let result = block_on(dispatcher.dispatch(text, DispatchMode::Live))?;
    let diagnostics = &result.diagnostics;

    if json {
        print_json(&result)?;
    } else {
        print_summary(diagnostics);
        let rows = diagnostics
            .attempts
            .iter()
            .map(|a| {
                vec![
                    a.stage.to_string(),
                    a.command_id.clone(),
                    a.payload_kind.map(|k| k.to_string()).unwrap_or_default(),
                    if a.ok {
                        "ok".to_string()
                    } else {
                        a.error.clone().unwrap_or_else(|| "failed".to_string())
                    },
                ]
            })
            .collect();
        print_table(&["STAGE", "COMMAND", "PAYLOAD", "RESULT"], rows);
    }

    match (&diagnostics.success_command, diagnostics.failure_reason) {
        (Some(cmd), _) if result.ok => {
            if !json {
                println!();
                println!("Delivered via {cmd}");
            }
            Ok(())
        }
        (_, Some(reason)) => anyhow::bail!("dispatch failed: {reason} ({})", reason.hint()),
        _ => anyhow::bail!("dispatch failed"),
    }
}
