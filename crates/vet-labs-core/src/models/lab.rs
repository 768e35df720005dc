//! Raw lab values as entered on the exam form.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ParameterKey;

/// Raw value(s) for one parameter, exactly as typed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum LabValue {
    Single(Option<String>),
    Dual {
        relative: Option<String>,
        absolute: Option<String>,
    },
}

impl LabValue {
    pub fn single(raw: impl Into<String>) -> Self {
        LabValue::Single(Some(raw.into()))
    }

    pub fn dual(relative: Option<&str>, absolute: Option<&str>) -> Self {
        LabValue::Dual {
            relative: relative.map(str::to_string),
            absolute: absolute.map(str::to_string),
        }
    }

    /// True when nothing usable was entered.
    ///
    /// A dual value is absent only when both halves are.
    pub fn is_absent(&self) -> bool {
        match self {
            LabValue::Single(raw) => is_blank(raw.as_deref()),
            LabValue::Dual { relative, absolute } => {
                is_blank(relative.as_deref()) && is_blank(absolute.as_deref())
            }
        }
    }
}

/// Whether a raw form value counts as "not entered".
pub fn is_blank(raw: Option<&str>) -> bool {
    raw.map_or(true, |s| s.trim().is_empty())
}

/// Lab values of one exam, keyed by parameter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct LabResults {
    values: BTreeMap<ParameterKey, LabValue>,
}

impl LabResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a single-value parameter.
    pub fn with_single(mut self, key: ParameterKey, raw: &str) -> Self {
        self.insert(key, LabValue::single(raw));
        self
    }

    /// Builder-style insert of a relative/absolute pair.
    pub fn with_dual(
        mut self,
        key: ParameterKey,
        relative: Option<&str>,
        absolute: Option<&str>,
    ) -> Self {
        self.insert(key, LabValue::dual(relative, absolute));
        self
    }

    pub fn insert(&mut self, key: ParameterKey, value: LabValue) -> Option<LabValue> {
        self.values.insert(key, value)
    }

    pub fn get(&self, key: ParameterKey) -> Option<&LabValue> {
        self.values.get(&key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(ParameterKey, LabValue)> for LabResults {
    fn from_iter<I: IntoIterator<Item = (ParameterKey, LabValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
