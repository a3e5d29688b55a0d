use crate::cmd::Sources;
use crate::output::print_json;
use pldf_core::{resolver::Resolver, types::Stage, Query, ResolvedHint};
use serde::Serialize;

#[derive(Serialize)]
struct HintReport<'a> {
    success: bool,
    #[serde(flatten)]
    hint: &'a ResolvedHint,
}

pub fn run(
    sources: &Sources,
    stage: &str,
    category: Option<&str>,
    error_key: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    // Reject a bad stage before touching the filesystem.
    let _: Stage = stage.parse()?;

    let kb = sources.load()?;
    let query = Query {
        stage,
        category,
        error_key,
    };
    let resolved = Resolver::new(&kb.hints, &kb.resources)
        .with_general_key(&kb.config.general_key)
        .resolve(&query)?;

    if json {
        print_json(&HintReport {
            success: true,
            hint: &resolved,
        })
    } else {
        print_text(&resolved);
        Ok(())
    }
}

fn print_text(r: &ResolvedHint) {
    println!("Hint for stage: {}", r.stage);
    if let Some(ref message) = r.message {
        println!("Error:   {message}");
    }
    println!();
    println!("{}", r.hint);
    if !r.resources.is_empty() {
        println!();
        println!("Resources:");
        for res in &r.resources {
            println!("  - {}: {}", res.title, res.url);
        }
    }
}
