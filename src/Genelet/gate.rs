//! Genelet logic gates.
//!
//! A gate is two input switches (INP1, INP2) that both transcribe the shared activator
//! `{name}_out_A` of an output switch (OUT), plus a constitutive source of the output switch's
//! inhibitor `{name}_out_I`. The output switch transcribes `out`. AND and OR gates share the
//! topology and only differ in the source DNA concentration.
use super::mechanism::RateConvention;
use super::source::Source;
use super::switch::{DEFAULT_RNAP, Switch};
use crate::ChemicalNetwork::component::{Component, GeneratedNetwork};
use crate::ChemicalNetwork::crn_error::CrnError;
use crate::ChemicalNetwork::network::ChemicalReactionNetwork;
use crate::ChemicalNetwork::parameters::ParameterDatabase;
use crate::ChemicalNetwork::reaction::Reaction;
use crate::ChemicalNetwork::species::Species;
use enum_dispatch::enum_dispatch;
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

pub const SWITCH_OFF_CONCENTRATION: f64 = 500.0;
pub const ACTIVATOR_CONCENTRATION: f64 = 700.0;
pub const INHIBITOR_CONCENTRATION: f64 = 200.0;
pub const AND_SOURCE_CONCENTRATION: f64 = 170.0;
pub const OR_SOURCE_CONCENTRATION: f64 = 102.0;
pub const RNAP_CONCENTRATION: f64 = 100.0;

#[derive(Debug, Error)]
pub enum GateError {
    #[error("gate name must be a string")]
    InvalidName,
    #[error("type must be AND or OR")]
    InvalidType,
    #[error("Failed to read circuit file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse circuit file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GateType {
    #[default]
    AND,
    OR,
}

impl GateType {
    /// Source DNA concentration setting the gate's threshold
    pub fn source_concentration(&self) -> f64 {
        match self {
            GateType::AND => AND_SOURCE_CONCENTRATION,
            GateType::OR => OR_SOURCE_CONCENTRATION,
        }
    }
}

impl FromStr for GateType {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AND" => Ok(GateType::AND),
            "OR" => Ok(GateType::OR),
            _ => Err(GateError::InvalidType),
        }
    }
}

impl fmt::Display for GateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateType::AND => write!(f, "AND"),
            GateType::OR => write!(f, "OR"),
        }
    }
}

/// Activator (`on_*`) and inhibitor (`off_*`) strand names of the two gate inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegulatorNames {
    pub on_1: String,
    pub on_2: String,
    pub off_1: String,
    pub off_2: String,
}

/// `{name}_A1`, `{name}_A2`, `{name}_I1`, `{name}_I2`
pub fn default_regulator_names(gate_name: &str) -> RegulatorNames {
    RegulatorNames {
        on_1: format!("{}_A1", gate_name),
        on_2: format!("{}_A2", gate_name),
        off_1: format!("{}_I1", gate_name),
        off_2: format!("{}_I2", gate_name),
    }
}

/// Optional replacements for the default regulator names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegulatorOverrides {
    #[serde(default)]
    pub on_1: Option<String>,
    #[serde(default)]
    pub on_2: Option<String>,
    #[serde(default)]
    pub off_1: Option<String>,
    #[serde(default)]
    pub off_2: Option<String>,
}

impl RegulatorOverrides {
    pub fn resolve(&self, gate_name: &str) -> RegulatorNames {
        let defaults = default_regulator_names(gate_name);
        RegulatorNames {
            on_1: self.on_1.clone().unwrap_or(defaults.on_1),
            on_2: self.on_2.clone().unwrap_or(defaults.on_2),
            off_1: self.off_1.clone().unwrap_or(defaults.off_1),
            off_2: self.off_2.clone().unwrap_or(defaults.off_2),
        }
    }
}

#[enum_dispatch(Component)]
#[derive(Debug, Clone, PartialEq)]
pub enum GateComponent {
    Switch,
    Source,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneletGate {
    pub name: String,
    pub gate_type: GateType,
    pub regulators: RegulatorNames,
    /// `[S1, S2, S3, Source]`
    pub components: Vec<GateComponent>,
    /// fully-qualified species name -> initial concentration, in insertion order
    pub initial_conditions: Vec<(String, f64)>,
}

/// Assemble a genelet gate named `name` whose output switch transcribes `out`.
///
/// # Examples
/// ```
/// use GeneletCRN::Genelet::gate::{genelet_gate, GateType, RegulatorOverrides};
/// let gate = genelet_gate("G1", "Y", &RegulatorOverrides::default(), GateType::OR).unwrap();
/// assert_eq!(gate.components.len(), 4);
/// assert_eq!(gate.initial_condition("G1_SOU"), Some(102.0));
/// ```
pub fn genelet_gate(
    name: &str,
    out: &str,
    overrides: &RegulatorOverrides,
    gate_type: GateType,
) -> Result<GeneletGate, GateError> {
    if name.is_empty() {
        return Err(GateError::InvalidName);
    }
    let regulators = overrides.resolve(name);
    // S1/S2 product and S3 activator must be the very same species
    let out_a = Species::rna(&format!("{}_out_A", name));
    let out_i = Species::rna(&format!("{}_out_I", name));

    let s1 = Switch::new(
        &format!("{}_INP1", name),
        &out_a,
        Species::rna(&regulators.on_1),
        Species::rna(&regulators.off_1),
    );
    let s2 = Switch::new(
        &format!("{}_INP2", name),
        &out_a,
        Species::rna(&regulators.on_2),
        Species::rna(&regulators.off_2),
    );
    let s3 = Switch::new(&format!("{}_OUT", name), out, &out_a, &out_i);
    let source = Source::new(&format!("{}_SOU", name), &out_i);

    let initial_conditions = vec![
        (s1.switch_off().full_name(), SWITCH_OFF_CONCENTRATION),
        (Species::rna(&regulators.on_1).full_name(), ACTIVATOR_CONCENTRATION),
        (Species::rna(&regulators.off_1).full_name(), INHIBITOR_CONCENTRATION),
        (s2.switch_off().full_name(), SWITCH_OFF_CONCENTRATION),
        (Species::rna(&regulators.on_2).full_name(), ACTIVATOR_CONCENTRATION),
        (Species::rna(&regulators.off_2).full_name(), INHIBITOR_CONCENTRATION),
        (s3.switch_off().full_name(), SWITCH_OFF_CONCENTRATION),
        (out_a.full_name(), 0.0),
        (out_i.full_name(), 0.0),
        (source.dna().full_name(), gate_type.source_concentration()),
        (Species::protein(DEFAULT_RNAP).full_name(), RNAP_CONCENTRATION),
    ];
    info!("Assembled {} gate '{}' with output '{}'", gate_type, name, out);
    Ok(GeneletGate {
        name: name.to_string(),
        gate_type,
        regulators,
        components: vec![s1.into(), s2.into(), s3.into(), source.into()],
        initial_conditions,
    })
}

impl GeneletGate {
    pub fn initial_condition(&self, species: &str) -> Option<f64> {
        self.initial_conditions
            .iter()
            .find(|(name, _)| name == species)
            .map(|(_, value)| *value)
    }

    /// Rate convention for all switches of the gate
    pub fn with_rate_convention(mut self, convention: RateConvention) -> Self {
        self.components = self
            .components
            .into_iter()
            .map(|component| match component {
                GateComponent::Switch(switch) => {
                    GateComponent::Switch(switch.with_rate_convention(convention))
                }
                other => other,
            })
            .collect();
        self
    }

    /// Rename the polymerase and RNAseH used by every component; the RNAP initial condition
    /// follows the new polymerase name.
    pub fn with_enzymes(mut self, rnap: &str, rnase_h: &str) -> Self {
        let old_rnap = Species::protein(DEFAULT_RNAP).full_name();
        let new_rnap = Species::protein(rnap);
        self.components = self
            .components
            .into_iter()
            .map(|component| match component {
                GateComponent::Switch(switch) => {
                    GateComponent::Switch(switch.with_rnap(&new_rnap).with_rnase_h(rnase_h))
                }
                GateComponent::Source(source) => {
                    GateComponent::Source(source.with_rnap(&new_rnap))
                }
            })
            .collect();
        for (name, _) in self.initial_conditions.iter_mut() {
            if *name == old_rnap {
                *name = new_rnap.full_name();
            }
        }
        self
    }

    /// Merge the gate's components into one network carrying the gate's initial conditions
    pub fn compile(&self, params: &ParameterDatabase) -> Result<ChemicalReactionNetwork, CrnError> {
        let mut crn = ChemicalReactionNetwork::compile(&self.components, params)?;
        crn.set_initial_conditions(&self.initial_conditions);
        Ok(crn)
    }
}

/// Several gates in one network: species shared between gates (one gate's output is another
/// gate's regulator) are merged, initial conditions are taken in gate order.
pub fn compile_circuit(
    gates: &[GeneletGate],
    params: &ParameterDatabase,
) -> Result<ChemicalReactionNetwork, CrnError> {
    let components: Vec<GateComponent> = gates
        .iter()
        .flat_map(|gate| gate.components.iter().cloned())
        .collect();
    let mut crn = ChemicalReactionNetwork::compile(&components, params)?;
    for gate in gates {
        crn.set_initial_conditions(&gate.initial_conditions);
    }
    Ok(crn)
}

/// Gate description as found in JSON circuit files:
/// `{"name": "G1", "out": "Y", "type": "OR", "on_1": "X1"}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateSpec {
    pub name: serde_json::Value,
    pub out: String,
    #[serde(rename = "type", default = "default_gate_type")]
    pub gate_type: String,
    #[serde(flatten)]
    pub overrides: RegulatorOverrides,
}

fn default_gate_type() -> String {
    GateType::AND.to_string()
}

impl GateSpec {
    pub fn build(&self) -> Result<GeneletGate, GateError> {
        let name = self.name.as_str().ok_or(GateError::InvalidName)?;
        let gate_type = GateType::from_str(&self.gate_type)?;
        genelet_gate(name, &self.out, &self.overrides, gate_type)
    }

    /// Read a JSON list of gate descriptions
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Vec<GateSpec>, GateError> {
        let path_str = path.as_ref().display().to_string();
        let content = fs::read_to_string(path.as_ref()).map_err(|source| GateError::Io {
            path: path_str.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|e| {
            error!(
                "Error parsing circuit file '{}' at line {}, column {}",
                path_str,
                e.line(),
                e.column()
            );
            GateError::Parse {
                path: path_str,
                source: e,
            }
        })
    }
}
