//! Chemical species with structural identity.
//!
//! A species is identified by its name and its material kind only; two species built from the
//! same name/kind compare equal and hash equally no matter how they were obtained. Complex
//! species additionally remember their constituents, but those do not take part in identity.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Material kind tag of a species ("dna", "rna", "protein", "complex")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MaterialKind {
    Dna,
    Rna,
    Protein,
    Complex,
}

impl MaterialKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialKind::Dna => "dna",
            MaterialKind::Rna => "rna",
            MaterialKind::Protein => "protein",
            MaterialKind::Complex => "complex",
        }
    }
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Species {
    pub name: String,
    pub material: Option<MaterialKind>,
    /// constituents of a complex species, empty for simple species
    #[serde(default)]
    pub components: Vec<Species>,
}

impl Species {
    pub fn new(name: &str, material: Option<MaterialKind>) -> Self {
        Self {
            name: name.to_string(),
            material,
            components: Vec::new(),
        }
    }

    /// species without a material tag
    pub fn bare(name: &str) -> Self {
        Species::new(name, None)
    }

    pub fn dna(name: &str) -> Self {
        Species::new(name, Some(MaterialKind::Dna))
    }

    pub fn rna(name: &str) -> Self {
        Species::new(name, Some(MaterialKind::Rna))
    }

    pub fn protein(name: &str) -> Self {
        Species::new(name, Some(MaterialKind::Protein))
    }

    /// Build a complex species from its constituents.
    ///
    /// Constituents form an unordered multiset: they are sorted by fully-qualified name before
    /// the canonical name is derived, so `complex([a, b])` and `complex([b, a])` are equal.
    /// When `name_override` is given it replaces the derived name.
    ///
    /// # Examples
    /// ```
    /// use GeneletCRN::ChemicalNetwork::species::Species;
    /// let rnap = Species::protein("RNAP");
    /// let dna = Species::dna("G");
    /// let c1 = Species::complex(&[rnap.clone(), dna.clone()], None);
    /// let c2 = Species::complex(&[dna, rnap], None);
    /// assert_eq!(c1, c2);
    /// assert_eq!(c1.to_string(), "complex_dna_G_protein_RNAP");
    /// ```
    pub fn complex(parts: &[Species], name_override: Option<&str>) -> Self {
        let mut components: Vec<Species> = parts.to_vec();
        components.sort_by_key(|s| s.full_name());
        let name = match name_override {
            Some(name) => name.to_string(),
            None => components
                .iter()
                .map(|s| s.full_name())
                .collect::<Vec<String>>()
                .join("_"),
        };
        Self {
            name,
            material: Some(MaterialKind::Complex),
            components,
        }
    }

    pub fn is_complex(&self) -> bool {
        self.material == Some(MaterialKind::Complex)
    }

    /// fully-qualified name: "{material}_{name}" or the bare name
    pub fn full_name(&self) -> String {
        match self.material {
            Some(material) => format!("{}_{}", material, self.name),
            None => self.name.clone(),
        }
    }
}

impl PartialEq for Species {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.material == other.material
    }
}

impl Eq for Species {}

impl Hash for Species {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.material.hash(state);
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_name())
    }
}

/// Anything that can be promoted to a concrete species: a bare name, an existing species or the
/// species exposed by another component.
#[derive(Debug, Clone)]
pub enum SpeciesInput {
    Name(String),
    Species(Species),
}

impl SpeciesInput {
    /// Resolve to a species. Names get the requested material tag, existing species are kept
    /// exactly as they are.
    pub fn resolve(self, material: Option<MaterialKind>) -> Species {
        match self {
            SpeciesInput::Name(name) => Species::new(&name, material),
            SpeciesInput::Species(species) => species,
        }
    }
}

impl From<&str> for SpeciesInput {
    fn from(name: &str) -> Self {
        SpeciesInput::Name(name.to_string())
    }
}

impl From<String> for SpeciesInput {
    fn from(name: String) -> Self {
        SpeciesInput::Name(name)
    }
}

impl From<&String> for SpeciesInput {
    fn from(name: &String) -> Self {
        SpeciesInput::Name(name.clone())
    }
}

impl From<Species> for SpeciesInput {
    fn from(species: Species) -> Self {
        SpeciesInput::Species(species)
    }
}

impl From<&Species> for SpeciesInput {
    fn from(species: &Species) -> Self {
        SpeciesInput::Species(species.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn identity_is_name_and_material() {
        assert_eq!(Species::rna("X"), Species::rna("X"));
        assert_ne!(Species::rna("X"), Species::dna("X"));
        assert_ne!(Species::bare("X"), Species::rna("X"));
        let set: HashSet<Species> = vec![Species::rna("X"), Species::rna("X"), Species::dna("X")]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn full_names() {
        assert_eq!(Species::protein("RNAP").full_name(), "protein_RNAP");
        assert_eq!(Species::bare("G1_INP1_OFF").full_name(), "G1_INP1_OFF");
    }

    #[test]
    fn complex_naming_is_deterministic() {
        let a = Species::bare("S_OFF");
        let b = Species::dna("A");
        let c1 = Species::complex(&[a.clone(), b.clone()], None);
        let c2 = Species::complex(&[b.clone(), a.clone()], None);
        assert_eq!(c1, c2);
        assert_eq!(c1.name, "S_OFF_dna_A");
        let named = Species::complex(&[a, b], Some("S_ON"));
        assert_eq!(named.full_name(), "complex_S_ON");
        assert_eq!(named.components.len(), 2);
        assert!(named.is_complex());
    }

    #[test]
    fn input_promotion() {
        let from_name = SpeciesInput::from("A").resolve(Some(MaterialKind::Dna));
        assert_eq!(from_name, Species::dna("A"));
        // an existing species keeps its own tag
        let from_species =
            SpeciesInput::from(Species::rna("A")).resolve(Some(MaterialKind::Dna));
        assert_eq!(from_species, Species::rna("A"));
    }
}
