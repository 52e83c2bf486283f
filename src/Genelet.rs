/// Transcription-switch mechanism of a genelet: species derivation (switch ON state,
/// activator–inhibitor complexes, enzyme-bound transients) and the 9 (single regulator pair) or
/// 16 (two pairs) reactions with rates looked up from a ParameterDatabase.
/// Two rate conventions are supported, see RateConvention.
pub mod mechanism;
/// Switch component: binds the switch mechanism to the concrete species of one circuit position
/// # Examples
/// ```
/// use GeneletCRN::Genelet::switch::Switch;
/// use GeneletCRN::ChemicalNetwork::component::Component;
/// use GeneletCRN::ChemicalNetwork::parameters::ParameterDatabase;
/// let params = ParameterDatabase::genelet_defaults();
/// let s = Switch::new("G1_INP1", "G1_out_A", "G1_A1", "G1_I1").with_second_pair("G1_A2", "G1_I2");
/// let network = s.derive(&params).unwrap();
/// assert_eq!(network.species.len(), 17);
/// assert_eq!(network.reactions.len(), 16);
/// ```
pub mod switch;
/// Unregulated source of a transcript (Michaelis–Menten transcription)
pub mod source;
/// AND/OR genelet gates: two input switches, an output switch and an inhibitor source, with the
/// initial concentrations used in the lab. Gates can also be read from JSON circuit files.
pub mod gate;
