//! Transcription-switch mechanism of a genelet.
//!
//! A genelet is a DNA switch that is OFF until an activator strand binds it (ON). An inhibitor
//! strand strips the activator again, leaving an activator–inhibitor (AI) complex that RNAseH
//! degrades, releasing the activator. Transcription by RNAP runs from the ON state and, as a
//! leak, from the OFF state; both transcription and degradation are two-step
//! binding-then-catalysis pathways.
//!
//! Every two-step pathway `E + S <-> E:S -> P` is parametrised by its catalytic rate `kcat`,
//! unbinding rate `ku` and Michaelis constant `kM`; the binding rate follows from
//! `kb = (ku + kcat) / kM`.
use crate::ChemicalNetwork::component::GeneratedNetwork;
use crate::ChemicalNetwork::crn_error::CrnError;
use crate::ChemicalNetwork::parameters::ParameterDatabase;
use crate::ChemicalNetwork::reaction::Reaction;
use crate::ChemicalNetwork::species::Species;
use serde::{Deserialize, Serialize};

pub const SWITCH_MECHANISM: &str = "transcription_switch";
/// unbinding rate used by [`RateConvention::FixedUnbinding`]
pub const FIXED_UNBINDING_RATE: f64 = 0.1;

/// Binding rate of a two-step binding/catalysis pathway with an effective Michaelis constant
pub fn binding_rate(ku: f64, kcat: f64, k_m: f64) -> f64 {
    (ku + kcat) / k_m
}

/// How binding/unbinding rates of the two-step pathways are obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RateConvention {
    /// `ku_*` are parameters, `kb_* = (ku_* + kcat) / kM_*`
    #[default]
    MichaelisDerived,
    /// `kb_*` are parameters, `ku_*` fixed at [`FIXED_UNBINDING_RATE`]
    FixedUnbinding,
}

/// activator/inhibitor strands regulating one switch input
#[derive(Debug, Clone, PartialEq)]
pub struct RegulatorPair {
    pub activator: Species,
    pub inhibitor: Species,
}

impl RegulatorPair {
    pub fn new(activator: Species, inhibitor: Species) -> Self {
        Self {
            activator,
            inhibitor,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SwitchRegulators {
    SinglePair(RegulatorPair),
    DualPair(RegulatorPair, RegulatorPair),
}

/// Rate constants of the switch mechanism, shared by both regulator pairs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwitchRates {
    pub kon: f64,
    pub koff: f64,
    pub ka: f64,
    pub ktx: f64,
    pub kb_tx: f64,
    pub ku_tx: f64,
    pub kleak: f64,
    pub kb_leak: f64,
    pub ku_leak: f64,
    pub kdeg: f64,
    pub kb_deg: f64,
    pub ku_deg: f64,
}

impl SwitchRates {
    pub fn from_parameters(
        params: &ParameterDatabase,
        part_id: &str,
        mechanism: &str,
        convention: RateConvention,
    ) -> Result<Self, CrnError> {
        let get = |name: &str| params.get_parameter(name, part_id, mechanism);
        let ktx = get("ktx")?;
        let kleak = get("kleak")?;
        let kdeg = get("kdeg")?;
        let kon = get("kon")?;
        let koff = get("koff")?;
        let ka = get("ka")?;
        let rates = match convention {
            RateConvention::MichaelisDerived => {
                let ku_tx = get("ku_tx")?;
                let ku_leak = get("ku_leak")?;
                let ku_deg = get("ku_deg")?;
                let km_tx = get("kM_tx")?;
                let km_leak = get("kM_leak")?;
                let km_deg = get("kM_deg")?;
                SwitchRates {
                    kon,
                    koff,
                    ka,
                    ktx,
                    kb_tx: binding_rate(ku_tx, ktx, km_tx),
                    ku_tx,
                    kleak,
                    kb_leak: binding_rate(ku_leak, kleak, km_leak),
                    ku_leak,
                    kdeg,
                    kb_deg: binding_rate(ku_deg, kdeg, km_deg),
                    ku_deg,
                }
            }
            RateConvention::FixedUnbinding => SwitchRates {
                kon,
                koff,
                ka,
                ktx,
                kb_tx: get("kb_tx")?,
                ku_tx: FIXED_UNBINDING_RATE,
                kleak,
                kb_leak: get("kb_leak")?,
                ku_leak: FIXED_UNBINDING_RATE,
                kdeg,
                kb_deg: get("kb_deg")?,
                ku_deg: FIXED_UNBINDING_RATE,
            },
        };
        Ok(rates)
    }
}

/// Species derived for one regulator pair
#[derive(Debug, Clone, PartialEq)]
pub struct PairSpecies {
    pub activator: Species,
    pub inhibitor: Species,
    pub switch_on: Species,
    pub ai_complex: Species,
    /// RNAP bound to the ON switch
    pub rnap_on: Species,
    /// RNAseH bound to the AI complex
    pub rnase_h_ai: Species,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SwitchComplexes {
    SinglePair(PairSpecies),
    DualPair(PairSpecies, PairSpecies),
}

/// Every species of one switch, derived once and reused by reaction generation
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchSpecies {
    pub switch_off: Species,
    pub transcript: Species,
    pub rnap: Species,
    pub rnase_h: Species,
    /// RNAP bound to the OFF switch (leak pathway)
    pub rnap_off: Species,
    pub complexes: SwitchComplexes,
}

impl SwitchSpecies {
    pub fn pairs(&self) -> Vec<&PairSpecies> {
        match &self.complexes {
            SwitchComplexes::SinglePair(first) => vec![first],
            SwitchComplexes::DualPair(first, second) => vec![first, second],
        }
    }

    pub fn primary(&self) -> &PairSpecies {
        match &self.complexes {
            SwitchComplexes::SinglePair(first) | SwitchComplexes::DualPair(first, _) => first,
        }
    }

    /// the complete species list, 11 entries for a single pair and 17 for two pairs
    pub fn species(&self) -> Vec<Species> {
        let first = self.primary();
        let mut species = vec![
            self.switch_off.clone(),
            first.switch_on.clone(),
            self.transcript.clone(),
            first.activator.clone(),
            first.inhibitor.clone(),
            self.rnap.clone(),
            self.rnase_h.clone(),
            first.ai_complex.clone(),
            first.rnap_on.clone(),
            self.rnap_off.clone(),
            first.rnase_h_ai.clone(),
        ];
        if let SwitchComplexes::DualPair(_, second) = &self.complexes {
            species.extend([
                second.activator.clone(),
                second.inhibitor.clone(),
                second.switch_on.clone(),
                second.ai_complex.clone(),
                second.rnap_on.clone(),
                second.rnase_h_ai.clone(),
            ]);
        }
        species
    }
}

/// The switch mechanism itself carries no state besides its name
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionSwitch {
    pub name: String,
}

impl Default for TranscriptionSwitch {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptionSwitch {
    pub fn new() -> Self {
        Self {
            name: SWITCH_MECHANISM.to_string(),
        }
    }

    /// Derive switch_on, AI complexes and enzyme-bound transients for the given inputs.
    ///
    /// Names are built from the switch-off name with its `_OFF` suffix stripped: `_ON`/`_AI`
    /// for a single pair, `_ON_1`/`_AI` and `_ON_2`/`_AI_2` for two pairs.
    pub fn derive_species(
        &self,
        switch_off: &Species,
        transcript: &Species,
        rnap: &Species,
        rnase_h: &Species,
        regulators: &SwitchRegulators,
    ) -> SwitchSpecies {
        let base = switch_off
            .name
            .strip_suffix("_OFF")
            .unwrap_or(&switch_off.name)
            .to_string();
        let pair_species = |pair: &RegulatorPair, on_suffix: &str, ai_suffix: &str| {
            let switch_on = Species::complex(
                &[switch_off.clone(), pair.activator.clone()],
                Some(&format!("{}{}", base, on_suffix)),
            );
            let ai_complex = Species::complex(
                &[pair.inhibitor.clone(), pair.activator.clone()],
                Some(&format!("{}{}", base, ai_suffix)),
            );
            PairSpecies {
                activator: pair.activator.clone(),
                inhibitor: pair.inhibitor.clone(),
                rnap_on: Species::complex(&[rnap.clone(), switch_on.clone()], None),
                rnase_h_ai: Species::complex(&[rnase_h.clone(), ai_complex.clone()], None),
                switch_on,
                ai_complex,
            }
        };
        let complexes = match regulators {
            SwitchRegulators::SinglePair(first) => {
                SwitchComplexes::SinglePair(pair_species(first, "_ON", "_AI"))
            }
            SwitchRegulators::DualPair(first, second) => SwitchComplexes::DualPair(
                pair_species(first, "_ON_1", "_AI"),
                pair_species(second, "_ON_2", "_AI_2"),
            ),
        };
        SwitchSpecies {
            switch_off: switch_off.clone(),
            transcript: transcript.clone(),
            rnap: rnap.clone(),
            rnase_h: rnase_h.clone(),
            rnap_off: Species::complex(&[rnap.clone(), switch_off.clone()], None),
            complexes,
        }
    }

    /// Reactions of one regulator pair, without the leak pathway
    fn pair_reactions(
        &self,
        species: &SwitchSpecies,
        pair: &PairSpecies,
        rates: &SwitchRates,
    ) -> Result<Vec<Reaction>, CrnError> {
        let off = &species.switch_off;
        let rnap = &species.rnap;
        let rnase_h = &species.rnase_h;
        Ok(vec![
            // activation
            Reaction::irreversible(
                vec![off.clone(), pair.activator.clone()],
                vec![pair.switch_on.clone()],
                rates.kon,
            )?,
            // deactivation
            Reaction::irreversible(
                vec![pair.switch_on.clone(), pair.inhibitor.clone()],
                vec![off.clone(), pair.ai_complex.clone()],
                rates.koff,
            )?,
            // free activator/inhibitor annealing
            Reaction::irreversible(
                vec![pair.activator.clone(), pair.inhibitor.clone()],
                vec![pair.ai_complex.clone()],
                rates.ka,
            )?,
            Reaction::reversible(
                vec![pair.switch_on.clone(), rnap.clone()],
                vec![pair.rnap_on.clone()],
                rates.kb_tx,
                rates.ku_tx,
            )?,
            Reaction::irreversible(
                vec![pair.rnap_on.clone()],
                vec![
                    pair.switch_on.clone(),
                    species.transcript.clone(),
                    rnap.clone(),
                ],
                rates.ktx,
            )?,
            Reaction::reversible(
                vec![pair.ai_complex.clone(), rnase_h.clone()],
                vec![pair.rnase_h_ai.clone()],
                rates.kb_deg,
                rates.ku_deg,
            )?,
            Reaction::irreversible(
                vec![pair.rnase_h_ai.clone()],
                vec![rnase_h.clone(), pair.activator.clone()],
                rates.kdeg,
            )?,
        ])
    }

    fn leak_reactions(
        &self,
        species: &SwitchSpecies,
        rates: &SwitchRates,
    ) -> Result<Vec<Reaction>, CrnError> {
        let off = &species.switch_off;
        let rnap = &species.rnap;
        Ok(vec![
            Reaction::reversible(
                vec![off.clone(), rnap.clone()],
                vec![species.rnap_off.clone()],
                rates.kb_leak,
                rates.ku_leak,
            )?,
            Reaction::irreversible(
                vec![species.rnap_off.clone()],
                vec![off.clone(), species.transcript.clone(), rnap.clone()],
                rates.kleak,
            )?,
        ])
    }

    /// 9 reactions for a single pair, 16 for two pairs (the leak pathway is not duplicated)
    pub fn derive_reactions(
        &self,
        species: &SwitchSpecies,
        rates: &SwitchRates,
    ) -> Result<Vec<Reaction>, CrnError> {
        // primary pair: activation .. transcription, leak, then degradation
        let mut reactions = self.pair_reactions(species, species.primary(), rates)?;
        let degradation = reactions.split_off(5);
        reactions.extend(self.leak_reactions(species, rates)?);
        reactions.extend(degradation);
        match &species.complexes {
            SwitchComplexes::SinglePair(_) => {}
            SwitchComplexes::DualPair(_, second) => {
                reactions.extend(self.pair_reactions(species, second, rates)?);
            }
        }
        Ok(reactions)
    }

    /// Species and reactions of a switch in one step
    pub fn derive(
        &self,
        species: &SwitchSpecies,
        params: &ParameterDatabase,
        part_id: &str,
        convention: RateConvention,
    ) -> Result<GeneratedNetwork, CrnError> {
        let rates = SwitchRates::from_parameters(params, part_id, &self.name, convention)?;
        Ok(GeneratedNetwork {
            species: species.species(),
            reactions: self.derive_reactions(species, &rates)?,
        })
    }
}
