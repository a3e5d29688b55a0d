use crate::cmd::{AlreadyReported, Sources};
use crate::output::print_json;
use pldf_core::check::{check, has_errors, Level};

pub fn run(sources: &Sources, json: bool) -> anyhow::Result<()> {
    let kb = sources.load()?;
    let findings = check(&kb.hints, &kb.resources, &kb.config.general_key);

    let failed = has_errors(&findings);

    if json {
        let value = serde_json::json!({
            "success": !failed,
            "findings": findings,
        });
        print_json(&value)?;
        if failed {
            return Err(AlreadyReported("knowledge base check found errors").into());
        }
    } else if findings.is_empty() {
        println!(
            "Knowledge base at {} is valid. No warnings.",
            sources.root().display()
        );
    } else {
        for f in &findings {
            let prefix = match f.level {
                Level::Warning => "warning",
                Level::Error => "error",
            };
            println!("[{prefix}] {}", f.message);
        }
    }

    if failed {
        anyhow::bail!("knowledge base check found errors");
    }

    Ok(())
}
