//! Loading SBML documents.
//!
//! The converter only sees [`SbmlLoader`]; [`JsonSbmlLoader`] reads the JSON serialization of
//! [`SbmlDocument`]/[`SbmlModel`]. Read failures do not abort loading: they come back as a
//! document carrying a `Fatal` diagnostic, the way SBML readers report them.
use super::model::{SbmlDocument, SbmlModel, Severity};
use log::{error, info, warn};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

pub trait SbmlLoader {
    fn load(&self, path: &Path) -> SbmlDocument;
}

/// SBML SId: letter or underscore followed by letters, digits and underscores
const SID_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*$";
static SID_REGEX: OnceLock<Regex> = OnceLock::new();

fn sid_regex() -> &'static Regex {
    SID_REGEX.get_or_init(|| Regex::new(SID_PATTERN).expect("SId pattern is a valid regex"))
}

fn fatal_document(message: String) -> SbmlDocument {
    error!("{}", message);
    let mut document = SbmlDocument::default();
    document.add_diagnostic(Severity::Fatal, &message);
    document
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSbmlLoader;

impl JsonSbmlLoader {
    pub fn new() -> Self {
        JsonSbmlLoader
    }

    /// Accepts both `{"model": {..}, "diagnostics": [..]}` and a bare model object
    pub fn parse_str(&self, content: &str) -> SbmlDocument {
        let value: serde_json::Value = match serde_json::from_str(content) {
            Ok(value) => value,
            Err(e) => {
                return fatal_document(format!(
                    "Error parsing SBML JSON at line {}, column {}: {}",
                    e.line(),
                    e.column(),
                    e
                ));
            }
        };
        let parsed = if value.get("model").is_some() {
            serde_json::from_value::<SbmlDocument>(value)
        } else {
            serde_json::from_value::<SbmlModel>(value).map(SbmlDocument::new)
        };
        match parsed {
            Ok(mut document) => {
                self.check_identifiers(&mut document);
                document
            }
            Err(e) => fatal_document(format!("Invalid SBML model structure: {}", e)),
        }
    }

    /// Record every invalid or duplicate identifier as an `Error` diagnostic
    fn check_identifiers(&self, document: &mut SbmlDocument) {
        let model = &document.model;
        let mut ids: Vec<(&str, &str)> = Vec::new();
        ids.extend(model.species.iter().map(|s| ("species", s.id.as_str())));
        ids.extend(model.parameters.iter().map(|p| ("parameter", p.id.as_str())));
        ids.extend(model.reactions.iter().map(|r| ("reaction", r.id.as_str())));
        ids.extend(
            model
                .function_definitions
                .iter()
                .map(|f| ("function definition", f.id.as_str())),
        );
        let mut problems = Vec::new();
        let mut seen: Vec<&str> = Vec::new();
        for (kind, id) in ids {
            if !sid_regex().is_match(id) {
                problems.push(format!("Invalid {} id '{}'", kind, id));
            }
            if seen.contains(&id) {
                problems.push(format!("Duplicate id '{}'", id));
            }
            seen.push(id);
        }
        for problem in problems {
            warn!("{}", problem);
            document.add_diagnostic(Severity::Error, &problem);
        }
    }
}

impl SbmlLoader for JsonSbmlLoader {
    fn load(&self, path: &Path) -> SbmlDocument {
        match fs::read_to_string(path) {
            Ok(content) => {
                let document = self.parse_str(&content);
                info!(
                    "Loaded SBML model '{}' from {}: {} species, {} reactions",
                    document.model.id,
                    path.display(),
                    document.model.species.len(),
                    document.model.reactions.len()
                );
                document
            }
            Err(e) => fatal_document(format!(
                "Failed to read SBML file {}: {}",
                path.display(),
                e
            )),
        }
    }
}
