use crate::config::DEFAULT_GENERAL_KEY;
use crate::error::{HintError, Result};
use crate::store::{HintEntry, HintStore, OrderedMap, ResourceRecord, ResourceStore};
use crate::types::{HintType, Stage};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Query / ResolvedHint
// ---------------------------------------------------------------------------

/// A hint lookup. Empty `category` or `error_key` strings count as absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct Query<'a> {
    pub stage: &'a str,
    pub category: Option<&'a str>,
    pub error_key: Option<&'a str>,
}

impl<'a> Query<'a> {
    pub fn stage(stage: &'a str) -> Self {
        Self {
            stage,
            ..Self::default()
        }
    }

    pub fn category(mut self, category: &'a str) -> Self {
        self.category = Some(category);
        self
    }

    pub fn error_key(mut self, key: &'a str) -> Self {
        self.error_key = Some(key);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedHint {
    pub stage: Stage,
    /// Echo of the query category; empty when none was given.
    pub category: String,
    pub hint_type: HintType,
    /// Key of the entry that satisfied the query.
    pub error_key: String,
    pub message: Option<String>,
    pub hint: String,
    pub resources: Vec<ResourceRecord>,
}

// ---------------------------------------------------------------------------
// Fallback chain
// ---------------------------------------------------------------------------

struct Lookup<'s> {
    category: Option<&'s str>,
    error_key: Option<&'s str>,
    entries: Option<&'s OrderedMap<HintEntry>>,
    hints: &'s HintStore,
    general_key: &'s str,
}

struct Selection<'s> {
    hint_type: HintType,
    key: &'s str,
    entry: &'s HintEntry,
}

impl<'s> Selection<'s> {
    fn validation(key: &'s str, entry: &'s HintEntry) -> Self {
        Self {
            hint_type: HintType::Validation,
            key,
            entry,
        }
    }
}

/// One link of the fallback chain. Steps run in order; the first to
/// select an entry wins.
struct Step {
    id: &'static str,
    select: for<'s> fn(&Lookup<'s>) -> Option<Selection<'s>>,
}

const CHAIN: &[Step] = &[
    Step {
        id: "exact_key",
        select: exact_key,
    },
    Step {
        id: "category_message",
        select: category_in_message,
    },
    Step {
        id: "category_key",
        select: category_in_key,
    },
    Step {
        id: "first_entry",
        select: first_entry,
    },
    Step {
        id: "general",
        select: general,
    },
];

fn exact_key<'s>(l: &Lookup<'s>) -> Option<Selection<'s>> {
    let key = l.error_key?;
    let (key, entry) = l.entries?.iter().find(|(k, _)| *k == key)?;
    Some(Selection::validation(key, entry))
}

fn category_in_message<'s>(l: &Lookup<'s>) -> Option<Selection<'s>> {
    let needle = l.category?.to_lowercase();
    let (key, entry) = l.entries?.iter().find(|(_, e)| {
        e.message
            .as_deref()
            .is_some_and(|m| m.to_lowercase().contains(&needle))
    })?;
    Some(Selection::validation(key, entry))
}

fn category_in_key<'s>(l: &Lookup<'s>) -> Option<Selection<'s>> {
    let needle = l.category?.to_lowercase();
    let (key, entry) = l
        .entries?
        .iter()
        .find(|(k, _)| k.to_lowercase().contains(&needle))?;
    Some(Selection::validation(key, entry))
}

fn first_entry<'s>(l: &Lookup<'s>) -> Option<Selection<'s>> {
    let (key, entry) = l.entries?.first()?;
    Some(Selection::validation(key, entry))
}

fn general<'s>(l: &Lookup<'s>) -> Option<Selection<'s>> {
    let entry = l.hints.general(l.general_key)?;
    Some(Selection {
        hint_type: HintType::General,
        key: l.general_key,
        entry,
    })
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// Resolves queries against one immutable snapshot of both stores.
pub struct Resolver<'a> {
    hints: &'a HintStore,
    resources: &'a ResourceStore,
    general_key: &'a str,
}

impl<'a> Resolver<'a> {
    pub fn new(hints: &'a HintStore, resources: &'a ResourceStore) -> Self {
        Self {
            hints,
            resources,
            general_key: DEFAULT_GENERAL_KEY,
        }
    }

    pub fn with_general_key(mut self, key: &'a str) -> Self {
        self.general_key = key;
        self
    }

    pub fn resolve(&self, query: &Query<'_>) -> Result<ResolvedHint> {
        let stage: Stage = query.stage.parse()?;
        let category = query.category.filter(|c| !c.is_empty());

        let lookup = Lookup {
            category,
            error_key: query.error_key.filter(|k| !k.is_empty()),
            entries: self.hints.validation_hints(stage),
            hints: self.hints,
            general_key: self.general_key,
        };

        for step in CHAIN {
            if let Some(sel) = (step.select)(&lookup) {
                tracing::debug!(%stage, step = step.id, key = sel.key, "hint resolved");
                return Ok(ResolvedHint {
                    stage,
                    category: category.unwrap_or_default().to_string(),
                    hint_type: sel.hint_type,
                    error_key: sel.key.to_string(),
                    message: sel.entry.message.clone(),
                    hint: sel.entry.hint.clone(),
                    resources: self.resolve_resources(&sel.entry.resources),
                });
            }
        }

        Err(HintError::HintNotFound(stage.to_string()))
    }

    /// Map ids through the resource store in order. Unknown ids are
    /// dropped; duplicates are kept.
    fn resolve_resources(&self, ids: &[String]) -> Vec<ResourceRecord> {
        ids.iter()
            .filter_map(|id| {
                let record = self.resources.get(id);
                if record.is_none() {
                    tracing::debug!(resource = %id, "dropping unknown resource id");
                }
                record.cloned()
            })
            .collect()
    }
}

/// Resolve `query` with the default general fallback key.
pub fn resolve(
    query: &Query<'_>,
    hints: &HintStore,
    resources: &ResourceStore,
) -> Result<ResolvedHint> {
    Resolver::new(hints, resources).resolve(query)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
