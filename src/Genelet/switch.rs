//! Genelet switch component: fixes the free inputs of the transcription-switch mechanism to
//! concrete species of one circuit position.
use super::mechanism::{
    RateConvention, RegulatorPair, SwitchRates, SwitchRegulators, SwitchSpecies,
    TranscriptionSwitch,
};
use crate::ChemicalNetwork::component::{Component, GeneratedNetwork};
use crate::ChemicalNetwork::crn_error::CrnError;
use crate::ChemicalNetwork::parameters::ParameterDatabase;
use crate::ChemicalNetwork::reaction::Reaction;
use crate::ChemicalNetwork::species::{MaterialKind, Species, SpeciesInput};

pub const SWITCH_PART_ID: &str = "Switch";
pub const DEFAULT_RNAP: &str = "RNAP";
pub const DEFAULT_RNASE_H: &str = "RNAseH";

#[derive(Debug, Clone, PartialEq)]
pub struct Switch {
    name: String,
    switch_off: Species,
    transcript: Species,
    rnap: Species,
    rnase_h: Species,
    regulators: SwitchRegulators,
    rate_convention: RateConvention,
    mechanism: TranscriptionSwitch,
    /// derived once per input set, read by both species and reaction generation
    derived: SwitchSpecies,
}

fn promote_pair(activator: SpeciesInput, inhibitor: SpeciesInput) -> RegulatorPair {
    RegulatorPair::new(
        activator.resolve(Some(MaterialKind::Dna)),
        inhibitor.resolve(Some(MaterialKind::Rna)),
    )
}

impl Switch {
    /// Switch `name` transcribing `transcript` while activated by `activator`.
    ///
    /// Names are promoted to species: activator → dna, inhibitor and transcript → rna.
    /// The switch-off base species is `"{name}_OFF"` without material tag; RNAP and RNAseH
    /// default to `protein_RNAP` and `protein_RNAseH`.
    ///
    /// # Examples
    /// ```
    /// use GeneletCRN::Genelet::switch::Switch;
    /// use GeneletCRN::ChemicalNetwork::component::Component;
    /// let s = Switch::new("G1_INP1", "G1_out_A", "G1_A1", "G1_I1");
    /// assert_eq!(s.switch_off().full_name(), "G1_INP1_OFF");
    /// assert_eq!(s.update_species().len(), 11);
    /// ```
    pub fn new(
        name: &str,
        transcript: impl Into<SpeciesInput>,
        activator: impl Into<SpeciesInput>,
        inhibitor: impl Into<SpeciesInput>,
    ) -> Self {
        let switch_off = Species::bare(&format!("{}_OFF", name));
        let transcript = transcript.into().resolve(Some(MaterialKind::Rna));
        let rnap = Species::protein(DEFAULT_RNAP);
        let rnase_h = Species::protein(DEFAULT_RNASE_H);
        let regulators =
            SwitchRegulators::SinglePair(promote_pair(activator.into(), inhibitor.into()));
        let mechanism = TranscriptionSwitch::new();
        let derived =
            mechanism.derive_species(&switch_off, &transcript, &rnap, &rnase_h, &regulators);
        Self {
            name: name.to_string(),
            switch_off,
            transcript,
            rnap,
            rnase_h,
            regulators,
            rate_convention: RateConvention::default(),
            mechanism,
            derived,
        }
    }

    pub fn with_rnap(mut self, rnap: impl Into<SpeciesInput>) -> Self {
        self.rnap = rnap.into().resolve(Some(MaterialKind::Protein));
        self.rederive();
        self
    }

    pub fn with_rnase_h(mut self, rnase_h: impl Into<SpeciesInput>) -> Self {
        self.rnase_h = rnase_h.into().resolve(Some(MaterialKind::Protein));
        self.rederive();
        self
    }

    /// Add a second, independent activator/inhibitor pair
    pub fn with_second_pair(
        mut self,
        activator2: impl Into<SpeciesInput>,
        inhibitor2: impl Into<SpeciesInput>,
    ) -> Self {
        let second = promote_pair(activator2.into(), inhibitor2.into());
        self.regulators = match self.regulators {
            SwitchRegulators::SinglePair(first) | SwitchRegulators::DualPair(first, _) => {
                SwitchRegulators::DualPair(first, second)
            }
        };
        self.rederive();
        self
    }

    pub fn with_rate_convention(mut self, convention: RateConvention) -> Self {
        self.rate_convention = convention;
        self
    }

    fn rederive(&mut self) {
        self.derived = self.mechanism.derive_species(
            &self.switch_off,
            &self.transcript,
            &self.rnap,
            &self.rnase_h,
            &self.regulators,
        );
    }

    pub fn switch_off(&self) -> &Species {
        &self.switch_off
    }

    pub fn switch_on(&self) -> &Species {
        &self.derived.primary().switch_on
    }

    pub fn transcript(&self) -> &Species {
        &self.transcript
    }

    pub fn rnap(&self) -> &Species {
        &self.rnap
    }

    pub fn rnase_h(&self) -> &Species {
        &self.rnase_h
    }

    pub fn regulators(&self) -> &SwitchRegulators {
        &self.regulators
    }

    pub fn derived_species(&self) -> &SwitchSpecies {
        &self.derived
    }

    pub fn rate_convention(&self) -> RateConvention {
        self.rate_convention
    }

    pub fn rates(&self, params: &ParameterDatabase) -> Result<SwitchRates, CrnError> {
        SwitchRates::from_parameters(
            params,
            SWITCH_PART_ID,
            &self.mechanism.name,
            self.rate_convention,
        )
    }
}

impl Component for Switch {
    fn name(&self) -> &str {
        &self.name
    }

    fn part_id(&self) -> &str {
        SWITCH_PART_ID
    }

    fn get_species(&self) -> Species {
        self.switch_off.clone()
    }

    fn update_species(&self) -> Vec<Species> {
        self.derived.species()
    }

    fn update_reactions(&self, params: &ParameterDatabase) -> Result<Vec<Reaction>, CrnError> {
        let rates = self.rates(params)?;
        self.mechanism.derive_reactions(&self.derived, &rates)
    }

    fn derive(&self, params: &ParameterDatabase) -> Result<GeneratedNetwork, CrnError> {
        let network =
            self.mechanism
                .derive(&self.derived, params, SWITCH_PART_ID, self.rate_convention)?;
        network.check_closed(&self.name)?;
        Ok(network)
    }
}
