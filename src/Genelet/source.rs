//! Unregulated transcription source and its Michaelis–Menten transcription mechanism.
use crate::ChemicalNetwork::component::Component;
use crate::ChemicalNetwork::crn_error::CrnError;
use crate::ChemicalNetwork::parameters::ParameterDatabase;
use crate::ChemicalNetwork::reaction::Reaction;
use crate::ChemicalNetwork::species::{MaterialKind, Species, SpeciesInput};

pub const SOURCE_PART_ID: &str = "Source";
pub const TRANSCRIPTION_MM_MECHANISM: &str = "transcription_mm";

/// `dna + rnap <-> rnap:dna -> dna + transcript + rnap`
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionMM {
    pub name: String,
}

impl Default for TranscriptionMM {
    fn default() -> Self {
        Self {
            name: TRANSCRIPTION_MM_MECHANISM.to_string(),
        }
    }
}

impl TranscriptionMM {
    pub fn update_species(&self, dna: &Species, transcript: &Species, rnap: &Species) -> Vec<Species> {
        vec![
            dna.clone(),
            transcript.clone(),
            rnap.clone(),
            Species::complex(&[dna.clone(), rnap.clone()], None),
        ]
    }

    pub fn update_reactions(
        &self,
        dna: &Species,
        transcript: &Species,
        rnap: &Species,
        params: &ParameterDatabase,
        part_id: &str,
    ) -> Result<Vec<Reaction>, CrnError> {
        let kb = params.get_parameter("kb", part_id, &self.name)?;
        let ku = params.get_parameter("ku", part_id, &self.name)?;
        let ktx = params.get_parameter("ktx", part_id, &self.name)?;
        let bound = Species::complex(&[dna.clone(), rnap.clone()], None);
        Ok(vec![
            Reaction::reversible(vec![dna.clone(), rnap.clone()], vec![bound.clone()], kb, ku)?,
            Reaction::irreversible(
                vec![bound],
                vec![dna.clone(), transcript.clone(), rnap.clone()],
                ktx,
            )?,
        ])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    name: String,
    dna: Species,
    transcript: Species,
    rnap: Species,
    mechanism: TranscriptionMM,
}

impl Source {
    /// DNA species is the bare `name`, `transcript` is promoted to rna
    pub fn new(name: &str, transcript: impl Into<SpeciesInput>) -> Self {
        Self {
            name: name.to_string(),
            dna: Species::bare(name),
            transcript: transcript.into().resolve(Some(MaterialKind::Rna)),
            rnap: Species::protein(super::switch::DEFAULT_RNAP),
            mechanism: TranscriptionMM::default(),
        }
    }

    pub fn with_rnap(mut self, rnap: impl Into<SpeciesInput>) -> Self {
        self.rnap = rnap.into().resolve(Some(MaterialKind::Protein));
        self
    }

    pub fn dna(&self) -> &Species {
        &self.dna
    }

    pub fn transcript(&self) -> &Species {
        &self.transcript
    }

    pub fn rnap(&self) -> &Species {
        &self.rnap
    }
}

impl Component for Source {
    fn name(&self) -> &str {
        &self.name
    }

    fn part_id(&self) -> &str {
        SOURCE_PART_ID
    }

    fn get_species(&self) -> Species {
        self.dna.clone()
    }

    fn update_species(&self) -> Vec<Species> {
        self.mechanism
            .update_species(&self.dna, &self.transcript, &self.rnap)
    }

    fn update_reactions(&self, params: &ParameterDatabase) -> Result<Vec<Reaction>, CrnError> {
        self.mechanism
            .update_reactions(&self.dna, &self.transcript, &self.rnap, params, SOURCE_PART_ID)
    }
}
