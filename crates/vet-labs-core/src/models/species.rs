//! Patient species as used for reference-range selection.

use serde::{Deserialize, Serialize};

/// Normalized patient species.
///
/// Only dogs and cats have reference ranges. Every other animal (exotics,
/// livestock, typos in the animal record) maps to [`Species::Unknown`] and
/// gets no range at all.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Dog,
    Cat,
    Unknown,
}

impl Species {
    /// Map the species field of an animal record ("Canino", "Felino", ...).
    pub fn from_animal_species(raw: &str) -> Self {
        match raw.trim() {
            "Canino" => Species::Dog,
            "Felino" => Species::Cat,
            _ => Species::Unknown,
        }
    }

    /// Whether reference ranges can exist for this species.
    pub fn has_ranges(&self) -> bool {
        !matches!(self, Species::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Species::Dog => "dog",
            Species::Cat => "cat",
            Species::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_animal_species() {
        assert_eq!(Species::from_animal_species("Canino"), Species::Dog);
        assert_eq!(Species::from_animal_species("Felino"), Species::Cat);
        assert_eq!(Species::from_animal_species(" Felino "), Species::Cat);
    }

    #[test]
    fn test_unrecognized_species_is_unknown() {
        assert_eq!(Species::from_animal_species("Ave"), Species::Unknown);
        assert_eq!(Species::from_animal_species("canino"), Species::Unknown);
        assert_eq!(Species::from_animal_species(""), Species::Unknown);
        assert!(!Species::Unknown.has_ranges());
    }
}
