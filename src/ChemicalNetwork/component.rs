//! Components are named, instantiable parts of a circuit that contribute species and reactions.
use super::crn_error::CrnError;
use super::parameters::ParameterDatabase;
use super::reaction::Reaction;
use super::species::{Species, SpeciesInput};
use enum_dispatch::enum_dispatch;
use std::collections::HashSet;

/// Species and reactions produced by one derivation step
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedNetwork {
    pub species: Vec<Species>,
    pub reactions: Vec<Reaction>,
}

impl GeneratedNetwork {
    /// Check that every species used by a reaction is part of `species`
    pub fn check_closed(&self, component: &str) -> Result<(), CrnError> {
        let known: HashSet<&Species> = self.species.iter().collect();
        for reaction in &self.reactions {
            for s in reaction.inputs.iter().chain(reaction.outputs.iter()) {
                if !known.contains(s) {
                    return Err(CrnError::OrphanSpecies {
                        species: s.full_name(),
                        reaction: reaction.equation(),
                        component: component.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[enum_dispatch]
pub trait Component {
    fn name(&self) -> &str;
    /// part id used for parameter lookup
    fn part_id(&self) -> &str;
    /// species standing for the component when it is used as another component's input
    fn get_species(&self) -> Species;
    fn update_species(&self) -> Vec<Species>;
    fn update_reactions(&self, params: &ParameterDatabase) -> Result<Vec<Reaction>, CrnError>;
    /// species and reactions in one call
    fn derive(&self, params: &ParameterDatabase) -> Result<GeneratedNetwork, CrnError> {
        let network = GeneratedNetwork {
            species: self.update_species(),
            reactions: self.update_reactions(params)?,
        };
        network.check_closed(self.name())?;
        Ok(network)
    }
}

impl SpeciesInput {
    /// use another component's species as an input
    pub fn from_component<C: Component>(component: &C) -> Self {
        SpeciesInput::Species(component.get_species())
    }
}
