use serde::de::DeserializeOwned;
use std::path::Path;

/// On-disk encoding of a knowledge-base or config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Pick a format from the file extension. Anything that is not
    /// `.yaml`/`.yml` is read as JSON.
    pub fn from_path(path: &Path) -> Format {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Format::Yaml
            }
            _ => Format::Json,
        }
    }

    pub fn parse<T: DeserializeOwned>(self, data: &str) -> Result<T, String> {
        match self {
            Format::Json => serde_json::from_str(data).map_err(|e| e.to_string()),
            Format::Yaml => serde_yaml::from_str(data).map_err(|e| e.to_string()),
        }
    }
}

/// Outcome of reading a structured file that may legitimately be absent.
pub enum ReadOutcome<T> {
    Missing,
    Parsed(T),
}

/// Read and decode `path`, reporting a missing file separately from
/// read or decode failures.
pub fn read_structured<T: DeserializeOwned>(path: &Path) -> Result<ReadOutcome<T>, String> {
    let data = match std::fs::read_to_string(path) {
        Ok(d) => d,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(ReadOutcome::Missing),
        Err(e) => return Err(e.to_string()),
    };
    Format::from_path(path).parse(&data).map(ReadOutcome::Parsed)
}
