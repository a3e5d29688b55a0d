use crate::store::{HintEntry, HintStore, ResourceStore};
use crate::types::Stage;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Finding / Level
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub level: Level,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Warning,
    Error,
}

impl Finding {
    fn warning(message: String) -> Self {
        Self {
            level: Level::Warning,
            message,
        }
    }

    fn error(message: String) -> Self {
        Self {
            level: Level::Error,
            message,
        }
    }
}

pub fn has_errors(findings: &[Finding]) -> bool {
    findings.iter().any(|f| f.level == Level::Error)
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

/// Lint a loaded knowledge base. Loading already guarantees structure, so
/// this only looks at content that would make lookups silently degrade.
pub fn check(hints: &HintStore, resources: &ResourceStore, general_key: &str) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (stage, bucket) in hints.stages.iter() {
        if !Stage::is_valid(stage) {
            findings.push(Finding::warning(format!(
                "unknown stage '{stage}' in hints; its entries can never be resolved"
            )));
        }
        for (key, entry) in bucket.validation_hints.iter() {
            check_entry(&format!("{stage}/{key}"), entry, resources, &mut findings);
        }
    }

    for (key, entry) in hints.general_hints.iter() {
        check_entry(&format!("general/{key}"), entry, resources, &mut findings);
    }

    if hints.general(general_key).is_none() {
        findings.push(Finding::warning(format!(
            "no general hint '{general_key}'; stages without entries will fail to resolve"
        )));
    }

    for (id, record) in resources.resources.iter() {
        if record.url.trim().is_empty() {
            findings.push(Finding::warning(format!("resource '{id}' has an empty url")));
        }
    }

    findings
}

fn check_entry(
    path: &str,
    entry: &HintEntry,
    resources: &ResourceStore,
    findings: &mut Vec<Finding>,
) {
    if entry.hint.trim().is_empty() {
        findings.push(Finding::error(format!("hint '{path}' has empty hint text")));
    }
    for id in &entry.resources {
        if resources.get(id).is_none() {
            findings.push(Finding::warning(format!(
                "hint '{path}' references undefined resource '{id}'"
            )));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean_store() -> (HintStore, ResourceStore) {
        let mut hints = HintStore::new();
        hints.add_validation_hint("design", "no-adr", HintEntry::new(None, "Write one", &["adr"]));
        hints.add_general_hint("stuck", HintEntry::new(None, "Step back", &[]));
        let mut resources = ResourceStore::new();
        resources.add("adr", "ADR", "https://example.com/adr");
        (hints, resources)
    }

    #[test]
    fn clean_knowledge_base_has_no_findings() {
        let (hints, resources) = clean_store();
        assert!(check(&hints, &resources, "stuck").is_empty());
    }

    #[test]
    fn dangling_resource_is_a_warning() {
        let (mut hints, resources) = clean_store();
        hints.add_validation_hint("plan", "x", HintEntry::new(None, "h", &["ghost"]));
        let findings = check(&hints, &resources, "stuck");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].level, Level::Warning);
        assert!(findings[0].message.contains("plan/x"));
        assert!(findings[0].message.contains("'ghost'"));
        assert!(!has_errors(&findings));
    }

    #[test]
    fn empty_hint_text_is_an_error() {
        let (mut hints, resources) = clean_store();
        hints.add_validation_hint("tech", "blank", HintEntry::new(None, "  ", &[]));
        let findings = check(&hints, &resources, "stuck");
        assert!(has_errors(&findings));
    }

    #[test]
    fn unknown_stage_and_missing_general_are_reported() {
        let mut hints = HintStore::new();
        hints.add_validation_hint("deploy", "k", HintEntry::new(None, "h", &[]));
        let findings = check(&hints, &ResourceStore::new(), "stuck");
        assert!(findings
            .iter()
            .any(|f| f.message.contains("unknown stage 'deploy'")));
        assert!(findings
            .iter()
            .any(|f| f.message.contains("no general hint 'stuck'")));
    }

    #[test]
    fn empty_resource_url_is_reported() {
        let (hints, mut resources) = clean_store();
        resources.add("blank", "Blank", "");
        let findings = check(&hints, &resources, "stuck");
        assert!(findings
            .iter()
            .any(|f| f.message.contains("resource 'blank' has an empty url")));
    }
}
