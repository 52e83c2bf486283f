use super::conversion::ConversionOption;
use super::math::MathError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SbmlError {
    #[error("Encountered serious errors while reading file:\n{0}")]
    Fatal(String),
    #[error("Reaction '{0}' has no kinetic law")]
    MissingKineticLaw(String),
    #[error("Reaction '{reaction}' refers to unknown species '{species}'")]
    UnknownSpecies { reaction: String, species: String },
    #[error("Invalid formula in {context}: {source}")]
    Math {
        context: String,
        #[source]
        source: MathError,
    },
    #[error("Symbol '{0}' is neither a species nor a parameter")]
    UnknownSymbol(String),
    #[error("Initial assignment to unknown symbol '{0}'")]
    UnknownAssignmentTarget(String),
    #[error("The document could not be converted ({option:?}): {message}")]
    Conversion {
        option: ConversionOption,
        message: String,
    },
}
