use super::parameters::ParameterError;
use thiserror::Error;

/// Errors raised while generating or compiling a reaction network
#[derive(Debug, Error)]
pub enum CrnError {
    #[error("Invalid rate constant {value} in reaction {reaction}")]
    InvalidRate { reaction: String, value: f64 },
    #[error("Reaction has neither inputs nor outputs")]
    EmptyReaction,
    #[error(transparent)]
    Parameter(#[from] ParameterError),
    #[error(
        "Species {species} used by reaction {reaction} is missing from the species list of component {component}"
    )]
    OrphanSpecies {
        species: String,
        reaction: String,
        component: String,
    },
}
