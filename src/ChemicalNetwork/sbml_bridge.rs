//! Writing a compiled network as an SBML model with mass-action kinetics
use super::network::ChemicalReactionNetwork;
use super::reaction::Reaction;
use super::species::Species;
use crate::SbmlToOde::math::{BinaryOp, MathNode};
use crate::SbmlToOde::model::{
    KineticLaw, SbmlDocument, SbmlModel, SbmlParameter, SbmlReaction, SbmlSpecies,
    SpeciesReference,
};
use log::warn;
use std::collections::{HashMap, HashSet};

/// SBML SId for a species name: characters outside `[A-Za-z0-9_]` become `_`, a leading digit
/// gets a `_` prefix
fn sanitize_id(name: &str) -> String {
    let mut id: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if id.is_empty() || id.starts_with(|c: char| c.is_ascii_digit()) {
        id.insert(0, '_');
    }
    id
}

/// species -> SBML id, unique within the model
fn species_ids(species: &[Species]) -> HashMap<Species, String> {
    let mut ids: HashMap<Species, String> = HashMap::new();
    let mut taken: HashSet<String> = HashSet::new();
    for s in species {
        let base = sanitize_id(&s.full_name());
        let mut id = base.clone();
        let mut n = 1;
        while taken.contains(&id) {
            id = format!("{}_{}", base, n);
            n += 1;
        }
        if id != s.full_name() {
            warn!("Species '{}' exported with SBML id '{}'", s.full_name(), id);
        }
        taken.insert(id.clone());
        ids.insert(s.clone(), id);
    }
    ids
}

fn id_of(ids: &HashMap<Species, String>, species: &Species) -> String {
    ids.get(species)
        .cloned()
        .unwrap_or_else(|| sanitize_id(&species.full_name()))
}

/// `k * A * B^2`
fn mass_action_term(rate: &str, side: &[Species], ids: &HashMap<Species, String>) -> MathNode {
    let mut term = MathNode::symbol(rate);
    for (species, count) in Reaction::counts(side) {
        let symbol = MathNode::Symbol(id_of(ids, &species));
        let factor = if count == 1 {
            symbol
        } else {
            MathNode::binary(BinaryOp::Pow, symbol, MathNode::Number(count as f64))
        };
        term = MathNode::binary(BinaryOp::Mul, term, factor);
    }
    term
}

fn references(side: &[Species], ids: &HashMap<Species, String>) -> Vec<SpeciesReference> {
    Reaction::counts(side)
        .into_iter()
        .map(|(species, count)| SpeciesReference::new(&id_of(ids, &species), count as f64))
        .collect()
}

impl ChemicalReactionNetwork {
    /// SBML model named `model_id`: species ids are fully-qualified names made SId-safe, reaction
    /// `i` is `R{i}` with rate parameters `k_{i}` (and `k_rev_{i}` when reversible)
    pub fn to_sbml_document(&self, model_id: &str) -> SbmlDocument {
        let ids = species_ids(&self.species);
        let species = self
            .species
            .iter()
            .map(|s| {
                let mut sbml = SbmlSpecies::new(&id_of(&ids, s));
                sbml.name = Some(s.full_name());
                sbml.initial_concentration = Some(self.initial_concentration(s));
                sbml
            })
            .collect();
        let mut parameters = Vec::new();
        let mut reactions = Vec::new();
        for (i, reaction) in self.reactions.iter().enumerate() {
            let k = format!("k_{}", i);
            parameters.push(SbmlParameter::new(&k, reaction.k));
            let mut law = mass_action_term(&k, &reaction.inputs, &ids);
            if let Some(k_rev_value) = reaction.k_rev {
                let k_rev = format!("k_rev_{}", i);
                parameters.push(SbmlParameter::new(&k_rev, k_rev_value));
                law = MathNode::binary(
                    BinaryOp::Sub,
                    law,
                    mass_action_term(&k_rev, &reaction.outputs, &ids),
                );
            }
            reactions.push(SbmlReaction {
                id: format!("R{}", i),
                reactants: references(&reaction.inputs, &ids),
                products: references(&reaction.outputs, &ids),
                kinetic_law: Some(KineticLaw {
                    formula: law.to_string(),
                    local_parameters: Vec::new(),
                }),
            });
        }
        SbmlDocument::new(SbmlModel {
            id: model_id.to_string(),
            species,
            parameters,
            reactions,
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChemicalNetwork::parameters::ParameterDatabase;
    use crate::Genelet::gate::{GateType, RegulatorOverrides, genelet_gate};
    use crate::SbmlToOde::converter::OdeSystem;
    use approx::assert_relative_eq;

    fn binding_network() -> ChemicalReactionNetwork {
        let a = Species::rna("A");
        let b = Species::dna("B");
        let ab = Species::complex(&[a.clone(), b.clone()], Some("AB"));
        let reactions = vec![
            Reaction::reversible(vec![a.clone(), b.clone()], vec![ab.clone()], 2.0, 0.5).unwrap(),
            Reaction::irreversible(vec![a.clone(), a.clone()], vec![], 0.1).unwrap(),
        ];
        let mut crn = ChemicalReactionNetwork::new(vec![a, b, ab], reactions).unwrap();
        crn.set_initial_conditions(&[("rna_A".to_string(), 1.0), ("dna_B".to_string(), 2.0)]);
        crn
    }

    #[test]
    fn mass_action_formulas() {
        let document = binding_network().to_sbml_document("binding");
        let model = &document.model;
        let formulas: Vec<&str> = model
            .reactions
            .iter()
            .map(|r| r.kinetic_law.as_ref().unwrap().formula.as_str())
            .collect();
        assert_eq!(
            formulas,
            vec!["k_0 * rna_A * dna_B - k_rev_0 * complex_AB", "k_1 * rna_A ^ 2"]
        );
        let ids: Vec<&str> = model.parameters.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["k_0", "k_rev_0", "k_1"]);
        assert_eq!(model.reactions[1].reactants[0].stoichiometry, 2.0);
        assert_eq!(model.species[0].initial_concentration, Some(1.0));
        assert_eq!(model.species[2].initial_concentration, Some(0.0));
    }

    #[test]
    fn network_to_ode_chain() {
        let document = binding_network().to_sbml_document("binding");
        let ode = OdeSystem::from_document(&document).unwrap();
        assert_eq!(ode.x_init, vec![1.0, 2.0, 0.0]);
        // A = 1, B = 2, AB = 0.4
        let rhs = ode.evaluate(&[1.0, 2.0, 0.4]).unwrap();
        let v0 = 2.0 * 1.0 * 2.0 - 0.5 * 0.4;
        let v1 = 0.1 * 1.0;
        assert_relative_eq!(rhs[0], -v0 - 2.0 * v1, epsilon = 1e-12);
        assert_relative_eq!(rhs[1], -v0, epsilon = 1e-12);
        assert_relative_eq!(rhs[2], v0, epsilon = 1e-12);
    }

    #[test]
    fn gate_to_ode_chain() {
        let params = ParameterDatabase::genelet_defaults();
        let gate = genelet_gate("G1", "Y", &RegulatorOverrides::default(), GateType::AND).unwrap();
        let crn = gate.compile(&params).unwrap();
        let ode = OdeSystem::from_document(&crn.to_sbml_document("G1")).unwrap();
        assert_eq!(ode.x.len(), crn.species.len());
        assert_eq!(ode.f.len(), crn.species.len());
        assert_eq!(ode.p.len(), ode.params_values.len());
        let names = ode.species_names();
        let sou = names.iter().position(|n| *n == "G1_SOU").unwrap();
        assert_eq!(ode.x_init[sou], 170.0);
        // at the initial state nothing is bound yet, so the source DNA is only consumed
        let rhs = ode.evaluate(&ode.x_init).unwrap();
        assert!(rhs[sou] < 0.0);
    }

    #[test]
    fn ids_are_made_sbml_safe_and_unique() {
        let plain = Species::bare("a_b");
        let dashed = Species::bare("a-b");
        let digit = Species::bare("1x");
        let ids = species_ids(&[plain.clone(), dashed.clone(), digit.clone()]);
        assert_eq!(ids[&plain], "a_b");
        assert_eq!(ids[&dashed], "a_b_1");
        assert_eq!(ids[&digit], "_1x");
    }

    #[test]
    fn gate_with_dash_in_name_converts() {
        let params = ParameterDatabase::genelet_defaults();
        let gate = genelet_gate("G-1", "Y", &RegulatorOverrides::default(), GateType::OR).unwrap();
        let crn = gate.compile(&params).unwrap();
        let document = crn.to_sbml_document("G-1");
        let sou = document
            .model
            .species
            .iter()
            .find(|s| s.name.as_deref() == Some("G-1_SOU"))
            .unwrap();
        assert_eq!(sou.id, "G_1_SOU");
        assert_eq!(sou.initial_concentration, Some(102.0));
        let formula = &document.model.reactions[0].kinetic_law.as_ref().unwrap().formula;
        assert!(!formula.contains('-'));
        let ode = OdeSystem::from_document(&document).unwrap();
        assert_eq!(ode.x.len(), crn.species.len());
        assert!(ode.evaluate(&ode.x_init).is_ok());
    }
}
