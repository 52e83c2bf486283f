//! # Settings Module
//!
//! ## Purpose
//! User settings of the genelet tools, stored as JSON (`genelet_settings.json` next to the
//! binary by default). Every field has a default, so a settings file only needs the fields it
//! changes:
//! ```json
//! { "log_level": "debug", "rate_convention": "FixedUnbinding" }
//! ```
//!
//! ## Fields
//! | Field | Default | Meaning |
//! |-------|---------|---------|
//! | log_level | "info" | off, error, warn, info, debug, trace |
//! | log_file | none | also write the log to this file |
//! | rate_convention | MichaelisDerived | how switch binding rates are obtained |
//! | parameter_file | none | JSON parameter file replacing the built-in genelet defaults |
//! | rnap | "RNAP" | polymerase species name |
//! | rnase_h | "RNAseH" | RNAseH species name |
use crate::ChemicalNetwork::parameters::{ParameterDatabase, ParameterError};
use crate::Genelet::gate::GeneletGate;
use crate::Genelet::mechanism::RateConvention;
use crate::Genelet::switch::{DEFAULT_RNAP, DEFAULT_RNASE_H};
use log::{LevelFilter, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

pub const SETTINGS_FILE: &str = "genelet_settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub log_level: String,
    pub log_file: Option<String>,
    pub rate_convention: RateConvention,
    pub parameter_file: Option<String>,
    pub rnap: String,
    pub rnase_h: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_file: None,
            rate_convention: RateConvention::default(),
            parameter_file: None,
            rnap: DEFAULT_RNAP.to_string(),
            rnase_h: DEFAULT_RNASE_H.to_string(),
        }
    }
}

impl Settings {
    /// Reads settings from a JSON file.
    ///
    /// # Returns
    /// * `Err(String)` - if the file cannot be read or is not valid settings JSON
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read settings file '{}': {}", path.display(), e))?;
        serde_json::from_str(&content).map_err(|e| {
            format!(
                "Error parsing settings file '{}' at line {}, column {}: {}",
                path.display(),
                e.line(),
                e.column(),
                e
            )
        })
    }

    /// Settings from `path` when it exists, defaults otherwise. A broken file is reported and
    /// replaced by the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Settings::default();
        }
        match Settings::from_file(path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("{}; using default settings", e);
                Settings::default()
            }
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, content)
            .map_err(|e| format!("Failed to write settings file '{}': {}", path.display(), e))
    }

    /// `log_level` as a filter; unknown names fall back to Info
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    /// the parameter file when one is configured, the genelet defaults otherwise
    pub fn parameters(&self) -> Result<ParameterDatabase, ParameterError> {
        match &self.parameter_file {
            Some(file) => ParameterDatabase::from_json_file(file),
            None => {
                info!("Using built-in genelet parameters");
                Ok(ParameterDatabase::genelet_defaults())
            }
        }
    }

    /// apply enzyme names and rate convention to a freshly assembled gate
    pub fn configure_gate(&self, gate: GeneletGate) -> GeneletGate {
        let gate = gate.with_rate_convention(self.rate_convention);
        if self.rnap == DEFAULT_RNAP && self.rnase_h == DEFAULT_RNASE_H {
            gate
        } else {
            gate.with_enzymes(&self.rnap, &self.rnase_h)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Genelet::gate::{GateType, RegulatorOverrides, genelet_gate};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"log_level": "debug", "rate_convention": "FixedUnbinding"}}"#
        )
        .unwrap();
        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(settings.level_filter(), LevelFilter::Debug);
        assert_eq!(settings.rate_convention, RateConvention::FixedUnbinding);
        assert_eq!(settings.rnap, "RNAP");
        assert_eq!(settings.parameter_file, None);
    }

    #[test]
    fn save_and_reload() {
        let file = NamedTempFile::new().unwrap();
        let settings = Settings {
            rnap: "T7".to_string(),
            log_file: Some("genelet.log".to_string()),
            ..Default::default()
        };
        settings.save(file.path()).unwrap();
        assert_eq!(Settings::from_file(file.path()).unwrap(), settings);
    }

    #[test]
    fn broken_or_missing_file_gives_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(Settings::from_file(file.path()).is_err());
        assert_eq!(Settings::load_or_default(file.path()), Settings::default());
        assert_eq!(
            Settings::load_or_default("/nonexistent/genelet_settings.json"),
            Settings::default()
        );
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        let settings = Settings {
            log_level: "loud".to_string(),
            ..Default::default()
        };
        assert_eq!(settings.level_filter(), LevelFilter::Info);
    }

    #[test]
    fn configured_gate_uses_custom_polymerase() {
        let settings = Settings {
            rnap: "T7".to_string(),
            ..Default::default()
        };
        let gate = genelet_gate("G1", "Y", &RegulatorOverrides::default(), GateType::AND).unwrap();
        let gate = settings.configure_gate(gate);
        assert_eq!(gate.initial_condition("protein_T7"), Some(100.0));
        let params = settings.parameters().unwrap();
        let crn = gate.compile(&params).unwrap();
        assert!(crn.find_species("protein_T7").is_some());
        assert!(crn.find_species("protein_RNAP").is_none());
    }
}
