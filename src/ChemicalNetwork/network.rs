//! Compiled chemical reaction networks
use super::component::{Component, GeneratedNetwork};
use super::crn_error::CrnError;
use super::parameters::ParameterDatabase;
use super::reaction::Reaction;
use super::species::Species;
use log::{info, warn};
use nalgebra::DMatrix;
use prettytable::{Table, row};
use std::collections::HashSet;

/// Deduplicated species, reactions and initial concentrations of a set of components
#[derive(Debug, Clone, PartialEq)]
pub struct ChemicalReactionNetwork {
    pub species: Vec<Species>,
    pub reactions: Vec<Reaction>,
    /// fully-qualified species name -> initial concentration
    pub initial_conditions: Vec<(String, f64)>,
}

impl ChemicalReactionNetwork {
    /// Network from explicit species and reactions; every reaction species must be listed
    pub fn new(species: Vec<Species>, reactions: Vec<Reaction>) -> Result<Self, CrnError> {
        let mut crn = ChemicalReactionNetwork {
            species: Vec::new(),
            reactions: Vec::new(),
            initial_conditions: Vec::new(),
        };
        crn.merge(
            GeneratedNetwork { species, reactions },
            "network",
        )?;
        Ok(crn)
    }

    /// Derive each component and merge the results, species in first-seen order
    pub fn compile<C: Component>(
        components: &[C],
        params: &ParameterDatabase,
    ) -> Result<Self, CrnError> {
        let mut crn = ChemicalReactionNetwork {
            species: Vec::new(),
            reactions: Vec::new(),
            initial_conditions: Vec::new(),
        };
        for component in components {
            let generated = component.derive(params)?;
            crn.merge(generated, component.name())?;
        }
        info!(
            "Compiled network of {} components: {} species, {} reactions",
            components.len(),
            crn.species.len(),
            crn.reactions.len()
        );
        Ok(crn)
    }

    fn merge(&mut self, generated: GeneratedNetwork, component: &str) -> Result<(), CrnError> {
        generated.check_closed(component)?;
        let mut known: HashSet<Species> = self.species.iter().cloned().collect();
        for s in generated.species {
            if known.insert(s.clone()) {
                self.species.push(s);
            }
        }
        self.reactions.extend(generated.reactions);
        Ok(())
    }

    pub fn species_index(&self, species: &Species) -> Option<usize> {
        self.species.iter().position(|s| s == species)
    }

    pub fn find_species(&self, full_name: &str) -> Option<&Species> {
        self.species.iter().find(|s| s.full_name() == full_name)
    }

    /// Set initial concentrations by fully-qualified name; names that match no species are
    /// logged and dropped, a repeated name overwrites the earlier value
    pub fn set_initial_conditions(&mut self, conditions: &[(String, f64)]) {
        for (name, value) in conditions {
            if self.find_species(name).is_none() {
                warn!("Initial condition for unknown species '{}' ignored", name);
                continue;
            }
            match self.initial_conditions.iter_mut().find(|(n, _)| n == name) {
                Some((_, old)) => *old = *value,
                None => self.initial_conditions.push((name.clone(), *value)),
            }
        }
    }

    /// initial concentration of a species, 0 when unset
    pub fn initial_concentration(&self, species: &Species) -> f64 {
        let name = species.full_name();
        self.initial_conditions
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
            .unwrap_or(0.0)
    }

    /// species × reactions matrix of net stoichiometric coefficients
    pub fn stoichiometry_matrix(&self) -> DMatrix<f64> {
        let mut matrix = DMatrix::zeros(self.species.len(), self.reactions.len());
        for (j, reaction) in self.reactions.iter().enumerate() {
            for species in reaction.species() {
                if let Some(i) = self.species_index(&species) {
                    matrix[(i, j)] = reaction.net_stoichiometry(&species);
                }
            }
        }
        matrix
    }

    pub fn species_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(row!["#", "Species", "Initial concentration"]);
        for (i, s) in self.species.iter().enumerate() {
            table.add_row(row![i, s.full_name(), self.initial_concentration(s)]);
        }
        table
    }

    pub fn reaction_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(row!["#", "Reaction", "k", "k_rev"]);
        for (j, r) in self.reactions.iter().enumerate() {
            let k_rev = r.k_rev.map(|k| format!("{:.4e}", k)).unwrap_or_default();
            table.add_row(row![j, r.equation(), format!("{:.4e}", r.k), k_rev]);
        }
        table
    }

    pub fn pretty_print(&self) {
        println!(
            "Chemical reaction network: {} species, {} reactions",
            self.species.len(),
            self.reactions.len()
        );
        self.species_table().printstd();
        self.reaction_table().printstd();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy() -> ChemicalReactionNetwork {
        let a = Species::rna("A");
        let b = Species::dna("B");
        let ab = Species::complex(&[a.clone(), b.clone()], None);
        let reactions = vec![
            Reaction::reversible(vec![a.clone(), b.clone()], vec![ab.clone()], 1.0, 0.5).unwrap(),
            Reaction::irreversible(vec![a.clone(), a.clone()], vec![], 0.1).unwrap(),
        ];
        ChemicalReactionNetwork::new(vec![a, b, ab], reactions).unwrap()
    }

    #[test]
    fn stoichiometry_matrix_columns() {
        let crn = toy();
        let m = crn.stoichiometry_matrix();
        assert_eq!(m.shape(), (3, 2));
        assert_eq!(m[(0, 0)], -1.0);
        assert_eq!(m[(1, 0)], -1.0);
        assert_eq!(m[(2, 0)], 1.0);
        assert_eq!(m[(0, 1)], -2.0);
        assert_eq!(m[(1, 1)], 0.0);
    }

    #[test]
    fn orphan_species_are_rejected() {
        let a = Species::rna("A");
        let reaction =
            Reaction::irreversible(vec![a.clone()], vec![Species::rna("B")], 1.0).unwrap();
        match ChemicalReactionNetwork::new(vec![a], vec![reaction]) {
            Err(CrnError::OrphanSpecies { species, .. }) => assert_eq!(species, "rna_B"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn duplicate_species_are_merged() {
        let a = Species::rna("A");
        let crn = ChemicalReactionNetwork::new(
            vec![a.clone(), Species::rna("A"), Species::dna("A")],
            vec![],
        )
        .unwrap();
        assert_eq!(crn.species.len(), 2);
        assert_eq!(crn.species_index(&Species::dna("A")), Some(1));
    }

    #[test]
    fn initial_conditions_by_full_name() {
        let mut crn = toy();
        crn.set_initial_conditions(&[
            ("rna_A".to_string(), 3.0),
            ("nothing".to_string(), 1.0),
            ("rna_A".to_string(), 4.0),
        ]);
        assert_eq!(crn.initial_conditions, vec![("rna_A".to_string(), 4.0)]);
        assert_eq!(crn.initial_concentration(&Species::rna("A")), 4.0);
        assert_eq!(crn.initial_concentration(&Species::dna("B")), 0.0);
    }

    #[test]
    fn tables_have_one_row_per_entry() {
        let crn = toy();
        assert_eq!(crn.species_table().len(), 4);
        assert_eq!(crn.reaction_table().len(), 3);
        assert!(crn.reaction_table().to_string().contains("rna_A + dna_B <--> "));
    }
}
