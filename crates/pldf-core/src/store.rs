use crate::error::{HintError, Result};
use crate::io::{read_structured, ReadOutcome};
use crate::types::Stage;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

// ---------------------------------------------------------------------------
// OrderedMap
// ---------------------------------------------------------------------------

/// String-keyed mapping that keeps the declaration order of its source.
///
/// A repeated key replaces the earlier value in place, so position is
/// decided by the first occurrence and content by the last.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Linear scan per insert; stores are config-sized.
    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn first(&self) -> Option<(&str, &V)> {
        self.entries.first().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct OrderedMapVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
            type Value = OrderedMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map with string keys")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut map = OrderedMap::new();
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

// ---------------------------------------------------------------------------
// Hint store
// ---------------------------------------------------------------------------

/// One advisory record, keyed by error key (or general key) in its bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HintEntry {
    #[serde(default)]
    pub message: Option<String>,
    pub hint: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub resources: Vec<String>,
}

/// Treat an explicit `null` list the same as an absent one.
fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl HintEntry {
    pub fn new(message: Option<&str>, hint: &str, resources: &[&str]) -> Self {
        Self {
            message: message.map(str::to_string),
            hint: hint.to_string(),
            resources: resources.iter().map(|r| r.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageHints {
    #[serde(default)]
    pub validation_hints: OrderedMap<HintEntry>,
}

/// Per-stage validation hints plus the general fallback bucket.
///
/// Stage names are kept as written in the source; names outside the fixed
/// stage set load fine but can never be queried.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HintStore {
    #[serde(default)]
    pub stages: OrderedMap<StageHints>,
    #[serde(default)]
    pub general_hints: OrderedMap<HintEntry>,
}

impl HintStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the hint store. A missing or malformed source is fatal.
    pub fn load(path: &Path) -> Result<Self> {
        match read_structured::<HintStore>(path) {
            Ok(ReadOutcome::Parsed(store)) => {
                tracing::debug!(
                    path = %path.display(),
                    stages = store.stages.len(),
                    general = store.general_hints.len(),
                    "loaded hint store"
                );
                Ok(store)
            }
            Ok(ReadOutcome::Missing) => Err(HintError::unavailable(path, "file not found")),
            Err(reason) => Err(HintError::unavailable(path, reason)),
        }
    }

    pub fn validation_hints(&self, stage: Stage) -> Option<&OrderedMap<HintEntry>> {
        self.stages
            .get(stage.as_str())
            .map(|s| &s.validation_hints)
    }

    pub fn general(&self, key: &str) -> Option<&HintEntry> {
        self.general_hints.get(key)
    }

    pub fn add_validation_hint(&mut self, stage: &str, key: &str, entry: HintEntry) {
        if self.stages.get(stage).is_none() {
            self.stages.insert(stage, StageHints::default());
        }
        if let Some(bucket) = self.stages.get_mut(stage) {
            bucket.validation_hints.insert(key, entry);
        }
    }

    pub fn add_general_hint(&mut self, key: &str, entry: HintEntry) {
        self.general_hints.insert(key, entry);
    }
}

// ---------------------------------------------------------------------------
// Resource store
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub title: String,
    pub url: String,
}

/// Flat resource-id → record mapping.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResourceStore {
    #[serde(default)]
    pub resources: OrderedMap<ResourceRecord>,
}

impl ResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the resource store. A missing source yields an empty store; a
    /// malformed one is fatal.
    pub fn load(path: &Path) -> Result<Self> {
        match read_structured::<ResourceStore>(path) {
            Ok(ReadOutcome::Parsed(store)) => {
                tracing::debug!(
                    path = %path.display(),
                    resources = store.resources.len(),
                    "loaded resource store"
                );
                Ok(store)
            }
            Ok(ReadOutcome::Missing) => {
                tracing::warn!(
                    path = %path.display(),
                    "resource store not found, resource links will be omitted"
                );
                Ok(ResourceStore::default())
            }
            Err(reason) => Err(HintError::unavailable(path, reason)),
        }
    }

    pub fn get(&self, id: &str) -> Option<&ResourceRecord> {
        self.resources.get(id)
    }

    pub fn add(&mut self, id: &str, title: &str, url: &str) {
        self.resources.insert(
            id,
            ResourceRecord {
                title: title.to_string(),
                url: url.to_string(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HINTS_JSON: &str = r#"{
        "stages": {
            "design": {
                "validationHints": {
                    "zeta": { "message": "Last alphabetically", "hint": "z" },
                    "alpha": { "hint": "a", "resources": ["r1"] }
                }
            },
            "plan": {}
        },
        "generalHints": {
            "stuck": { "message": "Stuck?", "hint": "Take a step back" }
        }
    }"#;

    #[test]
    fn load_preserves_declaration_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hints.json");
        std::fs::write(&path, HINTS_JSON).unwrap();

        let store = HintStore::load(&path).unwrap();
        let design = store.validation_hints(Stage::Design).unwrap();
        let keys: Vec<&str> = design.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
        assert_eq!(design.first().unwrap().0, "zeta");
        assert_eq!(design.get("alpha").unwrap().resources, vec!["r1"]);
        assert!(design.get("alpha").unwrap().message.is_none());
    }

    #[test]
    fn stage_without_validation_hints_loads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hints.json");
        std::fs::write(&path, HINTS_JSON).unwrap();

        let store = HintStore::load(&path).unwrap();
        assert!(store.validation_hints(Stage::Plan).unwrap().is_empty());
        assert!(store.validation_hints(Stage::Review).is_none());
        assert_eq!(store.general("stuck").unwrap().hint, "Take a step back");
    }

    #[test]
    fn yaml_hint_store_loads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hints.yaml");
        std::fs::write(
            &path,
            "stages:\n  tech:\n    validationHints:\n      no-stack:\n        hint: Pick a stack\n",
        )
        .unwrap();
        let store = HintStore::load(&path).unwrap();
        let tech = store.validation_hints(Stage::Tech).unwrap();
        assert_eq!(tech.get("no-stack").unwrap().hint, "Pick a stack");
    }

    #[test]
    fn missing_hint_store_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let err = HintStore::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, HintError::StoreUnavailable { .. }));
    }

    #[test]
    fn entry_without_hint_text_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hints.json");
        std::fs::write(
            &path,
            r#"{"stages": {"design": {"validationHints": {"x": {"message": "m"}}}}}"#,
        )
        .unwrap();
        let err = HintStore::load(&path).unwrap_err();
        assert!(matches!(err, HintError::StoreUnavailable { .. }));
    }

    #[test]
    fn null_message_and_resources_load_as_absent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hints.json");
        std::fs::write(
            &path,
            r#"{"stages":{"design":{"validationHints":{"a":{"message":null,"hint":"x","resources":null}}}}}"#,
        )
        .unwrap();
        let store = HintStore::load(&path).unwrap();
        let entry = store
            .validation_hints(Stage::Design)
            .unwrap()
            .get("a")
            .unwrap();
        assert!(entry.message.is_none());
        assert!(entry.resources.is_empty());
    }

    #[test]
    fn non_object_hint_store_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hints.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(HintStore::load(&path).is_err());
    }

    #[test]
    fn missing_resource_store_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = ResourceStore::load(&dir.path().join("resources.json")).unwrap();
        assert!(store.resources.is_empty());
    }

    #[test]
    fn malformed_resource_store_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("resources.json");
        std::fs::write(&path, r#"{"resources": {"a": {"title": "no url"}}}"#).unwrap();
        let err = ResourceStore::load(&path).unwrap_err();
        assert!(matches!(err, HintError::StoreUnavailable { .. }));
    }

    #[test]
    fn duplicate_key_keeps_first_position_last_value() {
        let json = r#"{"a": {"title": "A", "url": "1"}, "b": {"title": "B", "url": "2"}, "a": {"title": "A2", "url": "3"}}"#;
        let map: OrderedMap<ResourceRecord> = serde_json::from_str(json).unwrap();
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(map.get("a").unwrap().title, "A2");
    }

    #[test]
    fn builders_create_stage_buckets() {
        let mut store = HintStore::new();
        store.add_validation_hint("design", "one", HintEntry::new(None, "1", &[]));
        store.add_validation_hint("design", "two", HintEntry::new(None, "2", &[]));
        let design = store.validation_hints(Stage::Design).unwrap();
        assert_eq!(design.len(), 2);
        assert_eq!(store.stages.len(), 1);
    }
}
