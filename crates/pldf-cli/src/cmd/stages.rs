use crate::cmd::Sources;
use crate::output::{print_json, print_table};
use pldf_core::types::Stage;

pub fn run(sources: &Sources, json: bool) -> anyhow::Result<()> {
    let kb = sources.load()?;

    let counts: Vec<(Stage, usize)> = Stage::all()
        .iter()
        .map(|&s| (s, kb.hints.validation_hints(s).map_or(0, |h| h.len())))
        .collect();

    if json {
        let out: Vec<_> = counts
            .iter()
            .map(|(stage, n)| serde_json::json!({ "stage": stage, "hints": n }))
            .collect();
        return print_json(&out);
    }

    let rows = counts
        .iter()
        .map(|(stage, n)| vec![stage.to_string(), n.to_string()])
        .collect();
    print_table(&["STAGE", "HINTS"], rows);
    Ok(())
}
