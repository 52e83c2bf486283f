//! Stoichiometric reactions with mass-action style rate constants.
use super::crn_error::CrnError;
use super::species::Species;
use std::fmt;

/// Reaction with an input multiset, an output multiset, a forward rate and an optional reverse
/// rate. A reaction is reversible exactly when `k_rev` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct Reaction {
    pub inputs: Vec<Species>,
    pub outputs: Vec<Species>,
    pub k: f64,
    pub k_rev: Option<f64>,
}

impl Reaction {
    pub fn new(
        inputs: Vec<Species>,
        outputs: Vec<Species>,
        k: f64,
        k_rev: Option<f64>,
    ) -> Result<Self, CrnError> {
        if inputs.is_empty() && outputs.is_empty() {
            return Err(CrnError::EmptyReaction);
        }
        let reaction = Self {
            inputs,
            outputs,
            k,
            k_rev,
        };
        for value in std::iter::once(k).chain(k_rev) {
            if !value.is_finite() || value < 0.0 {
                return Err(CrnError::InvalidRate {
                    reaction: reaction.equation(),
                    value,
                });
            }
        }
        Ok(reaction)
    }

    /// irreversible reaction
    pub fn irreversible(
        inputs: Vec<Species>,
        outputs: Vec<Species>,
        k: f64,
    ) -> Result<Self, CrnError> {
        Reaction::new(inputs, outputs, k, None)
    }

    /// reversible reaction with forward rate `k` and reverse rate `k_rev`
    pub fn reversible(
        inputs: Vec<Species>,
        outputs: Vec<Species>,
        k: f64,
        k_rev: f64,
    ) -> Result<Self, CrnError> {
        Reaction::new(inputs, outputs, k, Some(k_rev))
    }

    pub fn is_reversible(&self) -> bool {
        self.k_rev.is_some()
    }

    /// every species taking part in the reaction, first-seen order, no repeats
    pub fn species(&self) -> Vec<Species> {
        let mut seen: Vec<Species> = Vec::new();
        for s in self.inputs.iter().chain(self.outputs.iter()) {
            if !seen.contains(s) {
                seen.push(s.clone());
            }
        }
        seen
    }

    /// collapse a multiset into (species, count) pairs, first-seen order
    pub fn counts(side: &[Species]) -> Vec<(Species, usize)> {
        let mut counts: Vec<(Species, usize)> = Vec::new();
        for s in side {
            match counts.iter_mut().find(|(seen, _)| seen == s) {
                Some((_, n)) => *n += 1,
                None => counts.push((s.clone(), 1)),
            }
        }
        counts
    }

    /// net stoichiometric coefficient of `species` (outputs minus inputs)
    pub fn net_stoichiometry(&self, species: &Species) -> f64 {
        let produced = self.outputs.iter().filter(|s| *s == species).count() as f64;
        let consumed = self.inputs.iter().filter(|s| *s == species).count() as f64;
        produced - consumed
    }

    /// "A + B <--> C" style equation without rates
    pub fn equation(&self) -> String {
        let side = |species: &[Species]| -> String {
            if species.is_empty() {
                return "0".to_string();
            }
            Reaction::counts(species)
                .iter()
                .map(|(s, n)| {
                    if *n == 1 {
                        s.full_name()
                    } else {
                        format!("{}{}", n, s.full_name())
                    }
                })
                .collect::<Vec<String>>()
                .join(" + ")
        };
        let arrow = if self.is_reversible() { "<-->" } else { "-->" };
        format!("{} {} {}", side(&self.inputs), arrow, side(&self.outputs))
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.k_rev {
            Some(k_rev) => write!(f, "{}  k_f={} k_r={}", self.equation(), self.k, k_rev),
            None => write!(f, "{}  k_f={}", self.equation(), self.k),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equation_and_counts() {
        let a = Species::rna("A");
        let b = Species::dna("B");
        let r = Reaction::reversible(vec![a.clone(), a.clone(), b.clone()], vec![b.clone()], 1.0, 0.5)
            .unwrap();
        assert!(r.is_reversible());
        assert_eq!(r.equation(), "2rna_A + dna_B <--> dna_B");
        assert_eq!(r.net_stoichiometry(&a), -2.0);
        assert_eq!(r.net_stoichiometry(&b), 0.0);
        assert_eq!(r.species(), vec![a, b]);
    }

    #[test]
    fn degradation_has_empty_output_side() {
        let a = Species::rna("A");
        let r = Reaction::irreversible(vec![a], vec![], 0.1).unwrap();
        assert_eq!(r.equation(), "rna_A --> 0");
    }

    #[test]
    fn rejects_invalid_rates() {
        let a = Species::rna("A");
        assert!(matches!(
            Reaction::irreversible(vec![a.clone()], vec![], -1.0),
            Err(CrnError::InvalidRate { .. })
        ));
        assert!(matches!(
            Reaction::reversible(vec![a], vec![], 1.0, f64::NAN),
            Err(CrnError::InvalidRate { .. })
        ));
        assert!(matches!(
            Reaction::irreversible(vec![], vec![], 1.0),
            Err(CrnError::EmptyReaction)
        ));
    }
}
