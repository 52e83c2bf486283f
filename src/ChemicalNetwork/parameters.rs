//! Parameter lookup for mechanisms.
//!
//! Values are keyed by `(mechanism, part_id, name)`; either of the first two may be left out to
//! make a value more general. A lookup tries the most specific key first:
//! `(mechanism, part_id, name)` → `(-, part_id, name)` → `(mechanism, -, name)` → `(-, -, name)`
//! and fails if none of them is set.
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParameterError {
    #[error("Parameter '{name}' is not set for part_id '{part_id}' and mechanism '{mechanism}'")]
    Missing {
        name: String,
        part_id: String,
        mechanism: String,
    },
    #[error("Failed to read parameter file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse parameter file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ParameterKey {
    mechanism: Option<String>,
    part_id: Option<String>,
    name: String,
}

/// one record of a parameter file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParameterEntry {
    #[serde(default)]
    pub mechanism: Option<String>,
    #[serde(default)]
    pub part_id: Option<String>,
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ParameterDatabase {
    values: HashMap<ParameterKey, f64>,
}

impl ParameterDatabase {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// set (or overwrite) a value
    pub fn set_parameter(
        &mut self,
        name: &str,
        part_id: Option<&str>,
        mechanism: Option<&str>,
        value: f64,
    ) {
        let key = ParameterKey {
            mechanism: mechanism.map(str::to_string),
            part_id: part_id.map(str::to_string),
            name: name.to_string(),
        };
        self.values.insert(key, value);
    }

    pub fn add_entries(&mut self, entries: Vec<ParameterEntry>) {
        for entry in entries {
            self.set_parameter(
                &entry.name,
                entry.part_id.as_deref(),
                entry.mechanism.as_deref(),
                entry.value,
            );
        }
    }

    /// Look a value up for a part of a mechanism, falling back to more general keys
    pub fn get_parameter(
        &self,
        name: &str,
        part_id: &str,
        mechanism: &str,
    ) -> Result<f64, ParameterError> {
        let candidates = [
            (Some(mechanism), Some(part_id)),
            (None, Some(part_id)),
            (Some(mechanism), None),
            (None, None),
        ];
        for (mech, part) in candidates {
            let key = ParameterKey {
                mechanism: mech.map(str::to_string),
                part_id: part.map(str::to_string),
                name: name.to_string(),
            };
            if let Some(value) = self.values.get(&key) {
                return Ok(*value);
            }
        }
        Err(ParameterError::Missing {
            name: name.to_string(),
            part_id: part_id.to_string(),
            mechanism: mechanism.to_string(),
        })
    }

    /// Read a JSON list of [`ParameterEntry`] records
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ParameterError> {
        let path_str = path.as_ref().display().to_string();
        let content = fs::read_to_string(path.as_ref()).map_err(|source| ParameterError::Io {
            path: path_str.clone(),
            source,
        })?;
        let entries: Vec<ParameterEntry> = match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(e) => {
                error!(
                    "Error parsing parameter file '{}' at line {}, column {}",
                    path_str,
                    e.line(),
                    e.column()
                );
                return Err(ParameterError::Parse {
                    path: path_str,
                    source: e,
                });
            }
        };
        if entries.is_empty() {
            warn!("Parameter file '{}' contains no entries", path_str);
        }
        let mut db = ParameterDatabase::new();
        db.add_entries(entries);
        info!("Loaded {} parameters from '{}'", db.len(), path_str);
        Ok(db)
    }

    /// Default rate constants for genelet circuits (nM, s). Switch values are registered for
    /// both rate conventions, so `ku_*` and `kb_*` are present.
    pub fn genelet_defaults() -> Self {
        let mut db = ParameterDatabase::new();
        let switch = [
            ("ktx", 0.05),
            ("kleak", 0.001),
            ("kdeg", 0.02),
            ("ku_tx", 0.1),
            ("ku_leak", 0.1),
            ("ku_deg", 0.1),
            ("kM_tx", 250.0),
            ("kM_leak", 250.0),
            ("kM_deg", 50.0),
            ("kb_tx", 6.0e-4),
            ("kb_leak", 4.04e-4),
            ("kb_deg", 2.4e-3),
            ("kon", 5.0e-4),
            ("koff", 5.0e-4),
            ("ka", 5.0e-4),
        ];
        for (name, value) in switch {
            db.set_parameter(name, Some("Switch"), None, value);
        }
        let source = [("kb", 6.0e-4), ("ku", 0.1), ("ktx", 0.05)];
        for (name, value) in source {
            db.set_parameter(name, Some("Source"), None, value);
        }
        db
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn lookup_prefers_specific_keys() {
        let mut db = ParameterDatabase::new();
        db.set_parameter("k", None, None, 1.0);
        db.set_parameter("k", None, Some("mech"), 2.0);
        db.set_parameter("k", Some("part"), None, 3.0);
        db.set_parameter("k", Some("part"), Some("mech"), 4.0);
        assert_eq!(db.get_parameter("k", "part", "mech").unwrap(), 4.0);
        assert_eq!(db.get_parameter("k", "part", "other").unwrap(), 3.0);
        assert_eq!(db.get_parameter("k", "other", "mech").unwrap(), 2.0);
        assert_eq!(db.get_parameter("k", "other", "other").unwrap(), 1.0);
    }

    #[test]
    fn missing_parameter_fails_loudly() {
        let db = ParameterDatabase::new();
        let err = db.get_parameter("kon", "Switch", "transcription_switch");
        match err {
            Err(ParameterError::Missing {
                name,
                part_id,
                mechanism,
            }) => {
                assert_eq!(name, "kon");
                assert_eq!(part_id, "Switch");
                assert_eq!(mechanism, "transcription_switch");
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn reads_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"part_id": "Switch", "name": "kon", "value": 0.3}},
                {{"mechanism": "transcription_mm", "name": "ku", "value": 0.2}}]"#
        )
        .unwrap();
        let db = ParameterDatabase::from_json_file(file.path()).unwrap();
        assert_eq!(db.len(), 2);
        assert_eq!(db.get_parameter("kon", "Switch", "any").unwrap(), 0.3);
        assert_eq!(
            db.get_parameter("ku", "Source", "transcription_mm").unwrap(),
            0.2
        );
    }

    #[test]
    fn broken_json_file_is_a_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[{{\"name\": ").unwrap();
        assert!(matches!(
            ParameterDatabase::from_json_file(file.path()),
            Err(ParameterError::Parse { .. })
        ));
    }
}
