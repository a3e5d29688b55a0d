use crate::cmd::Sources;
use crate::output::{print_json, print_table};
use pldf_core::types::Stage;

pub fn run(sources: &Sources, stage: &str, json: bool) -> anyhow::Result<()> {
    let stage: Stage = stage.parse()?;
    let kb = sources.load()?;

    let entries: Vec<(&str, &str)> = kb
        .hints
        .validation_hints(stage)
        .map(|hints| {
            hints
                .iter()
                .map(|(key, e)| (key, e.message.as_deref().unwrap_or("")))
                .collect()
        })
        .unwrap_or_default();

    if json {
        let out: Vec<_> = entries
            .iter()
            .map(|(key, message)| serde_json::json!({ "key": key, "message": message }))
            .collect();
        return print_json(&out);
    }

    if entries.is_empty() {
        println!("No hints defined for stage '{stage}'.");
        return Ok(());
    }

    let rows = entries
        .iter()
        .map(|(key, message)| vec![key.to_string(), message.to_string()])
        .collect();
    print_table(&["KEY", "MESSAGE"], rows);
    Ok(())
}
