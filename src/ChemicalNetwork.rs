/// Species with structural identity: equal name and material kind means the same species.
/// Complex species are built from their constituents (unordered) and named canonically.
/// # Examples
/// ```
/// use GeneletCRN::ChemicalNetwork::species::Species;
/// let on = Species::complex(&[Species::bare("G1_INP1_OFF"), Species::rna("G1_A1")], Some("G1_INP1_ON"));
/// assert_eq!(on.full_name(), "complex_G1_INP1_ON");
/// assert_eq!(Species::protein("RNAP").to_string(), "protein_RNAP");
/// ```
pub mod species;
/// reactions: input and output multisets, forward rate and optional reverse rate
pub mod reaction;
pub mod crn_error;
/// eng
/// Rate constants looked up by (mechanism, part_id, name) with fallback to more general keys.
/// Values can be set in code, read from a JSON file, or taken from the genelet default set.
pub mod parameters;
/// Component trait: anything that produces species and reactions from a ParameterDatabase
pub mod component;
/// ChemicalReactionNetwork: components merged into one deduplicated network with initial
/// conditions, stoichiometric matrix (nalgebra) and table output (prettytable)
pub mod network;
/// export of a network as an SBML model with mass-action kinetic laws, ready for SbmlToOde
pub mod sbml_bridge;
