use crate::output::print_json;
use amphion_core::detect_provider;

pub fn run(app_name: &str, json: bool) -> anyhow::Result<()> {
    let provider = detect_provider(app_name);
    if json {
        print_json(&serde_json::json!({
            "app_name": app_name,
            "provider": provider,
        }))?;
    } else {
        println!("{provider}");
    }
    Ok(())
}
