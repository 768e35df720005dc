//! Lab values from the exam-intake form payload.
//!
//! The form posts flat fields: one per single-value parameter and a
//! `<key>Relativo` / `<key>Absoluto` pair per leukocyte-family parameter.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;
use thiserror::Error;
use vet_labs_core::models::{LabResults, LabValue, ParameterKey, Species};

/// Suffix of the relative (%) field of a dual parameter.
pub const RELATIVE_SUFFIX: &str = "Relativo";

/// Suffix of the absolute (/µL) field of a dual parameter.
pub const ABSOLUTE_SUFFIX: &str = "Absoluto";

/// Minimum similarity for suggesting a known field name.
const SUGGESTION_THRESHOLD: f64 = 0.85;

/// Intake errors.
#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid value for field {field}: expected text, number or null")]
    InvalidFieldValue { field: String },
}

pub type IntakeResult<T> = Result<T, IntakeError>;

/// Exam form payload as posted by the front end.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExamForm {
    /// Species field of the animal record ("Canino", "Felino", ...)
    pub species: String,
    /// Raw form fields
    #[serde(default)]
    pub values: BTreeMap<String, serde_json::Value>,
}

/// A form field that matched no lab parameter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnknownField {
    pub field: String,
    /// Closest known field name, if any is similar enough
    pub suggestion: Option<String>,
}

/// Exam intake ready for the report assembler.
#[derive(Debug, Clone, PartialEq)]
pub struct ExamIntake {
    pub species: Species,
    pub results: LabResults,
    pub unknown_fields: Vec<UnknownField>,
}

/// Parse the exam form JSON.
pub fn parse_exam_form(json: &str) -> IntakeResult<ExamForm> {
    Ok(serde_json::from_str(json)?)
}

/// Parse the exam form JSON straight into an intake.
pub fn parse_exam_intake(json: &str) -> IntakeResult<ExamIntake> {
    to_exam_intake(&parse_exam_form(json)?)
}

/// Form field names used for a parameter.
pub fn form_fields(key: ParameterKey) -> Vec<String> {
    if key.is_dual() {
        vec![
            format!("{}{}", key.as_str(), RELATIVE_SUFFIX),
            format!("{}{}", key.as_str(), ABSOLUTE_SUFFIX),
        ]
    } else {
        vec![key.as_str().to_string()]
    }
}

/// Convert a form payload into lab results.
///
/// Parameters with no field on the form are left out; blank fields are kept
/// and later skipped by the assembler.
pub fn to_exam_intake(form: &ExamForm) -> IntakeResult<ExamIntake> {
    let mut results = LabResults::new();
    let mut consumed = BTreeSet::new();

    for key in ParameterKey::ALL {
        let fields = form_fields(key);
        let present = fields.iter().any(|f| form.values.contains_key(f));
        if !present {
            continue;
        }

        let value = if key.is_dual() {
            LabValue::Dual {
                relative: field_text(form, &fields[0])?,
                absolute: field_text(form, &fields[1])?,
            }
        } else {
            LabValue::Single(field_text(form, &fields[0])?)
        };

        results.insert(key, value);
        consumed.extend(fields);
    }

    let unknown_fields: Vec<UnknownField> = form
        .values
        .keys()
        .filter(|field| !consumed.contains(*field))
        .map(|field| {
            let suggestion = suggest_field(field);
            tracing::warn!(
                field = %field,
                suggestion = suggestion.as_deref().unwrap_or(""),
                "Unknown exam form field"
            );
            UnknownField {
                field: field.clone(),
                suggestion,
            }
        })
        .collect();

    let species = Species::from_animal_species(&form.species);
    tracing::debug!(
        species = %species,
        parameters = results.len(),
        unknown = unknown_fields.len(),
        "Exam intake parsed"
    );

    Ok(ExamIntake {
        species,
        results,
        unknown_fields,
    })
}

/// Raw text of a form field; numbers are kept in their JSON spelling.
fn field_text(form: &ExamForm, field: &str) -> IntakeResult<Option<String>> {
    match form.values.get(field) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s.clone())),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(_) => Err(IntakeError::InvalidFieldValue {
            field: field.to_string(),
        }),
    }
}

/// Closest known field name for a misspelled one.
fn suggest_field(field: &str) -> Option<String> {
    ParameterKey::ALL
        .into_iter()
        .flat_map(form_fields)
        .map(|known| (jaro_winkler(field, &known), known))
        .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(_, known)| known)
}
