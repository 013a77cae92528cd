use crate::output::{print_json, print_table};
use amphion_core::{default_commands, discovery_patterns, is_prefill_command, Provider};
use anyhow::Context;
use serde::Serialize;

#[derive(Serialize)]
struct CatalogEntry {
    provider: Provider,
    includes_generic: bool,
    commands: Vec<CommandEntry>,
    patterns: Vec<String>,
}

#[derive(Serialize)]
struct CommandEntry {
    id: &'static str,
    prefill: bool,
}

pub fn run(provider: Option<&str>, json: bool) -> anyhow::Result<()> {
    let providers: Vec<Provider> = match provider {
        Some(name) => vec![name
            .parse::<Provider>()
            .context("invalid --provider")?],
        None => Provider::all().to_vec(),
    };

    let entries: Vec<CatalogEntry> = providers
        .into_iter()
        .map(|p| CatalogEntry {
            provider: p,
            includes_generic: !p.covers_generic() && p != Provider::Generic,
            commands: default_commands(p)
                .iter()
                .map(|&id| CommandEntry {
                    id,
                    prefill: is_prefill_command(id),
                })
                .collect(),
            patterns: discovery_patterns(p)
                .iter()
                .map(|re| re.as_str().to_string())
                .collect(),
        })
        .collect();

    if json {
        return print_json(&entries);
    }

    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", entry.provider);
        let rows = entry
            .commands
            .iter()
            .enumerate()
            .map(|(n, c)| {
                vec![
                    (n + 1).to_string(),
                    c.id.to_string(),
                    if c.prefill { "yes" } else { "" }.to_string(),
                ]
            })
            .collect();
        print_table(&["#", "COMMAND", "PREFILL"], rows);
        println!("patterns:");
        for pattern in &entry.patterns {
            println!("  {pattern}");
        }
        if entry.includes_generic {
            println!("(generic commands are appended as a fallback)");
        }
    }
    Ok(())
}
