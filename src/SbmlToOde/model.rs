//! In-memory SBML model: the subset of SBML Level 3 core that reaction-network ODEs need.
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
    Fatal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.severity, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SbmlSpecies {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub compartment: Option<String>,
    #[serde(default)]
    pub initial_concentration: Option<f64>,
    #[serde(default)]
    pub initial_amount: Option<f64>,
}

impl SbmlSpecies {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: None,
            compartment: None,
            initial_concentration: None,
            initial_amount: None,
        }
    }

    /// initial concentration, else initial amount, else 0
    pub fn initial_value(&self) -> f64 {
        self.initial_concentration
            .or(self.initial_amount)
            .unwrap_or(0.0)
    }
}

/// Global parameter, also used for kinetic-law local parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SbmlParameter {
    pub id: String,
    #[serde(default)]
    pub value: Option<f64>,
}

impl SbmlParameter {
    pub fn new(id: &str, value: f64) -> Self {
        Self {
            id: id.to_string(),
            value: Some(value),
        }
    }
}

fn unit_stoichiometry() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesReference {
    pub species: String,
    #[serde(default = "unit_stoichiometry")]
    pub stoichiometry: f64,
}

impl SpeciesReference {
    pub fn new(species: &str, stoichiometry: f64) -> Self {
        Self {
            species: species.to_string(),
            stoichiometry,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KineticLaw {
    /// infix formula, see [`crate::SbmlToOde::math`]
    pub formula: String,
    #[serde(default)]
    pub local_parameters: Vec<SbmlParameter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SbmlReaction {
    pub id: String,
    #[serde(default)]
    pub reactants: Vec<SpeciesReference>,
    #[serde(default)]
    pub products: Vec<SpeciesReference>,
    #[serde(default)]
    pub kinetic_law: Option<KineticLaw>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub id: String,
    #[serde(default)]
    pub arguments: Vec<String>,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitialAssignment {
    /// id of a species or parameter
    pub symbol: String,
    pub math: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SbmlModel {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub species: Vec<SbmlSpecies>,
    #[serde(default)]
    pub parameters: Vec<SbmlParameter>,
    #[serde(default)]
    pub reactions: Vec<SbmlReaction>,
    #[serde(default)]
    pub function_definitions: Vec<FunctionDefinition>,
    #[serde(default)]
    pub initial_assignments: Vec<InitialAssignment>,
}

impl SbmlModel {
    pub fn species_index(&self, id: &str) -> Option<usize> {
        self.species.iter().position(|s| s.id == id)
    }

    pub fn parameter_index(&self, id: &str) -> Option<usize> {
        self.parameters.iter().position(|p| p.id == id)
    }
}

/// A model together with the diagnostics produced while reading or converting it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SbmlDocument {
    pub model: SbmlModel,
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
}

impl SbmlDocument {
    pub fn new(model: SbmlModel) -> Self {
        Self {
            model,
            diagnostics: Vec::new(),
        }
    }

    pub fn add_diagnostic(&mut self, severity: Severity, message: &str) {
        self.diagnostics.push(Diagnostic {
            severity,
            message: message.to_string(),
        });
    }

    pub fn num_diagnostics(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    pub fn has_fatal_errors(&self) -> bool {
        self.num_diagnostics(Severity::Fatal) > 0
    }

    /// all diagnostics, one per line
    pub fn error_log(&self) -> String {
        self.diagnostics
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn clear_log(&mut self) {
        self.diagnostics.clear();
    }
}
