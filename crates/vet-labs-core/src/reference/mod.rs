//! Species-specific reference ranges.
//!
//! The table is loaded once (built-in data or a JSON file) and is immutable
//! afterwards. Lookups are plain reads that return `None` instead of
//! guessing when a species or parameter has no entry.

mod builtin;

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::models::{ParameterKey, ReferenceRange, Species};

/// Reference table errors.
#[derive(Error, Debug)]
pub enum ReferenceTableError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Non-finite bound for {parameter} ({species}, {field})")]
    NonFiniteBound {
        parameter: ParameterKey,
        species: Species,
        field: &'static str,
    },

    #[error("Inverted bounds for {parameter} ({species}, {field}): min {min} > max {max}")]
    InvertedBounds {
        parameter: ParameterKey,
        species: Species,
        field: &'static str,
        min: f64,
        max: f64,
    },

    #[error("Range shape for {parameter} ({species}) does not match the parameter kind")]
    ShapeMismatch {
        parameter: ParameterKey,
        species: Species,
    },
}

pub type ReferenceResult<T> = Result<T, ReferenceTableError>;

/// Ranges of one parameter, per species.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SpeciesRanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dog: Option<ReferenceRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cat: Option<ReferenceRange>,
}

impl SpeciesRanges {
    pub fn new(dog: ReferenceRange, cat: ReferenceRange) -> Self {
        Self {
            dog: Some(dog),
            cat: Some(cat),
        }
    }

    pub fn get(&self, species: Species) -> Option<&ReferenceRange> {
        match species {
            Species::Dog => self.dog.as_ref(),
            Species::Cat => self.cat.as_ref(),
            Species::Unknown => None,
        }
    }

    fn entries(&self) -> impl Iterator<Item = (Species, &ReferenceRange)> {
        [(Species::Dog, self.dog.as_ref()), (Species::Cat, self.cat.as_ref())]
            .into_iter()
            .filter_map(|(species, range)| range.map(|r| (species, r)))
    }
}

/// Immutable reference-range table.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTable {
    parameters: BTreeMap<ParameterKey, SpeciesRanges>,
    digest: String,
}

impl ReferenceTable {
    /// The built-in canine/feline blood count table.
    pub fn builtin() -> Self {
        Self::from_trusted(builtin::entries())
    }

    /// Build a validated table from entries.
    pub fn from_entries<I>(entries: I) -> ReferenceResult<Self>
    where
        I: IntoIterator<Item = (ParameterKey, SpeciesRanges)>,
    {
        let parameters: BTreeMap<_, _> = entries.into_iter().collect();
        validate(&parameters)?;
        Ok(Self::from_trusted(parameters))
    }

    /// Parse and validate a table from JSON.
    ///
    /// The format is `{ "<parameterKey>": { "dog": <range>, "cat": <range> } }`.
    pub fn from_json(json: &str) -> ReferenceResult<Self> {
        let parameters: BTreeMap<ParameterKey, SpeciesRanges> = serde_json::from_str(json)?;
        Self::from_entries(parameters)
    }

    /// Load and validate a table from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> ReferenceResult<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let table = Self::from_json(&json)?;
        tracing::info!(path = %path.as_ref().display(), "Loaded reference table from file");
        Ok(table)
    }

    fn from_trusted(parameters: BTreeMap<ParameterKey, SpeciesRanges>) -> Self {
        let digest = compute_digest(&parameters);
        tracing::debug!(parameters = parameters.len(), digest = %digest, "Reference table ready");
        Self { parameters, digest }
    }

    /// Range for a parameter and species.
    pub fn resolve(&self, key: ParameterKey, species: Species) -> Option<&ReferenceRange> {
        if !species.has_ranges() {
            return None;
        }
        self.parameters.get(&key)?.get(species)
    }

    /// Range for a string parameter key; unknown keys resolve to `None`.
    pub fn resolve_key(&self, key: &str, species: Species) -> Option<&ReferenceRange> {
        let key = key.parse::<ParameterKey>().ok()?;
        self.resolve(key, species)
    }

    /// Hex SHA-256 of the canonical JSON form of the table.
    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// Export to JSON (same format accepted by [`ReferenceTable::from_json`]).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.parameters)
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

impl Default for ReferenceTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate(parameters: &BTreeMap<ParameterKey, SpeciesRanges>) -> ReferenceResult<()> {
    for (&parameter, ranges) in parameters {
        for (species, range) in ranges.entries() {
            if range.is_dual() != parameter.is_dual() {
                return Err(ReferenceTableError::ShapeMismatch { parameter, species });
            }

            for (field, bounds) in range.named_bounds() {
                if [bounds.min, bounds.max]
                    .into_iter()
                    .flatten()
                    .any(|b| !b.is_finite())
                {
                    return Err(ReferenceTableError::NonFiniteBound {
                        parameter,
                        species,
                        field,
                    });
                }
                if let Some((min, max)) = bounds.both() {
                    if min > max {
                        return Err(ReferenceTableError::InvertedBounds {
                            parameter,
                            species,
                            field,
                            min,
                            max,
                        });
                    }
                }
            }
        }
    }
    Ok(())
}

fn compute_digest(parameters: &BTreeMap<ParameterKey, SpeciesRanges>) -> String {
    let canonical = serde_json::to_vec(parameters).unwrap_or_default();
    hex::encode(Sha256::digest(&canonical))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RangeBand, SingleRange};

    #[test]
    fn test_resolve_dog_and_cat() {
        let table = ReferenceTable::builtin();

        let dog = table.resolve(ParameterKey::Eritrocitos, Species::Dog).unwrap();
        assert_eq!(dog.driving_bounds().both(), Some((5.5, 8.5)));

        let cat = table.resolve(ParameterKey::Eritrocitos, Species::Cat).unwrap();
        assert_eq!(cat.driving_bounds().both(), Some((5.0, 10.0)));
    }

    #[test]
    fn test_unknown_species_resolves_to_none() {
        let table = ReferenceTable::builtin();
        for key in ParameterKey::ALL {
            assert!(table.resolve(key, Species::Unknown).is_none());
        }
    }

    #[test]
    fn test_resolve_key() {
        let table = ReferenceTable::builtin();
        assert!(table.resolve_key("hemoglobina", Species::Dog).is_some());
        assert!(table.resolve_key("leucocitosTotais", Species::Cat).is_some());
        assert!(table.resolve_key("hemoglobin", Species::Dog).is_none());
        assert!(table.resolve_key("", Species::Dog).is_none());
    }

    #[test]
    fn test_builtin_covers_catalog() {
        let table = ReferenceTable::builtin();
        assert_eq!(table.len(), ParameterKey::ALL.len());
        for key in ParameterKey::ALL {
            for species in [Species::Dog, Species::Cat] {
                let range = table.resolve(key, species).unwrap();
                assert_eq!(range.is_dual(), key.is_dual(), "{key} ({species})");
            }
        }
    }

    #[test]
    fn test_builtin_passes_validation() {
        let table = ReferenceTable::builtin();
        let rebuilt = ReferenceTable::from_entries(table.parameters.clone()).unwrap();
        assert_eq!(rebuilt, table);
    }

    #[test]
    fn test_json_round_trip_keeps_digest() {
        let table = ReferenceTable::builtin();
        let json = table.to_json().unwrap();
        let loaded = ReferenceTable::from_json(&json).unwrap();
        assert_eq!(loaded.digest(), table.digest());
        assert_eq!(table.digest().len(), 64);
    }

    #[test]
    fn test_digest_changes_with_content() {
        let a = ReferenceTable::from_entries([(
            ParameterKey::Plaquetas,
            SpeciesRanges {
                dog: Some(ReferenceRange::single(200.0, 500.0, "200 - 500")),
                cat: None,
            },
        )])
        .unwrap();
        let b = ReferenceTable::from_entries([(
            ParameterKey::Plaquetas,
            SpeciesRanges {
                dog: Some(ReferenceRange::single(200.0, 600.0, "200 - 600")),
                cat: None,
            },
        )])
        .unwrap();
        assert_ne!(a.digest(), b.digest());
    }

    #[test]
    fn test_missing_species_entry() {
        let table = ReferenceTable::from_json(
            r#"{"plaquetas":{"dog":{"shape":"single","min":200,"max":500,"full":"200 - 500"}}}"#,
        )
        .unwrap();
        assert!(table.resolve(ParameterKey::Plaquetas, Species::Dog).is_some());
        assert!(table.resolve(ParameterKey::Plaquetas, Species::Cat).is_none());
        assert!(table.resolve(ParameterKey::Hemoglobina, Species::Dog).is_none());
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let result = ReferenceTable::from_json(
            r#"{"hemoglobina":{"dog":{"shape":"single","min":18,"max":12}}}"#,
        );
        assert!(matches!(
            result,
            Err(ReferenceTableError::InvertedBounds {
                parameter: ParameterKey::Hemoglobina,
                species: Species::Dog,
                ..
            })
        ));
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let result = ReferenceTable::from_entries([(
            ParameterKey::Bastonetes,
            SpeciesRanges {
                dog: None,
                cat: Some(ReferenceRange::Single(SingleRange::default())),
            },
        )]);
        assert!(matches!(
            result,
            Err(ReferenceTableError::ShapeMismatch {
                parameter: ParameterKey::Bastonetes,
                species: Species::Cat,
            })
        ));
    }

    #[test]
    fn test_non_finite_bound_rejected() {
        let result = ReferenceTable::from_entries([(
            ParameterKey::Segmentados,
            SpeciesRanges {
                dog: Some(ReferenceRange::dual(
                    RangeBand::new(60.0, 77.0, "60 - 77"),
                    RangeBand::new(f64::NEG_INFINITY, 11500.0, "até 11.500"),
                )),
                cat: None,
            },
        )]);
        assert!(matches!(
            result,
            Err(ReferenceTableError::NonFiniteBound { field: "absolute", .. })
        ));
    }

    #[test]
    fn test_unknown_parameter_in_json_rejected() {
        let result = ReferenceTable::from_json(r#"{"glicose":{}}"#);
        assert!(matches!(result, Err(ReferenceTableError::Json(_))));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranges.json");
        std::fs::write(&path, ReferenceTable::builtin().to_json().unwrap()).unwrap();

        let table = ReferenceTable::from_path(&path).unwrap();
        assert_eq!(table, ReferenceTable::builtin());

        let missing = ReferenceTable::from_path(dir.path().join("missing.json"));
        assert!(matches!(missing, Err(ReferenceTableError::Io(_))));
    }
}
