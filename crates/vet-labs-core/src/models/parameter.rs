//! Lab parameter catalog for the complete blood count.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a string does not name a known lab parameter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown lab parameter: {0}")]
pub struct UnknownParameter(pub String);

/// Identity of a lab parameter.
///
/// The serialized form is the camelCase key used by the exam form and the
/// reference table (e.g. `"leucocitosTotais"`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum ParameterKey {
    // Eritrograma
    Eritrocitos,
    Hemoglobina,
    Hematocrito,
    Vcm,
    Hcm,
    Chcm,
    ProteinasTotais,
    // Leucograma
    LeucocitosTotais,
    Bastonetes,
    Segmentados,
    Linfocitos,
    Monocitos,
    Eosinofilos,
    Basofilos,
    // Plaquetograma
    Plaquetas,
}

impl ParameterKey {
    /// Every parameter, in report order.
    pub const ALL: [ParameterKey; 15] = [
        ParameterKey::Eritrocitos,
        ParameterKey::Hemoglobina,
        ParameterKey::Hematocrito,
        ParameterKey::Vcm,
        ParameterKey::Hcm,
        ParameterKey::Chcm,
        ParameterKey::ProteinasTotais,
        ParameterKey::LeucocitosTotais,
        ParameterKey::Bastonetes,
        ParameterKey::Segmentados,
        ParameterKey::Linfocitos,
        ParameterKey::Monocitos,
        ParameterKey::Eosinofilos,
        ParameterKey::Basofilos,
        ParameterKey::Plaquetas,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterKey::Eritrocitos => "eritrocitos",
            ParameterKey::Hemoglobina => "hemoglobina",
            ParameterKey::Hematocrito => "hematocrito",
            ParameterKey::Vcm => "vcm",
            ParameterKey::Hcm => "hcm",
            ParameterKey::Chcm => "chcm",
            ParameterKey::ProteinasTotais => "proteinasTotais",
            ParameterKey::LeucocitosTotais => "leucocitosTotais",
            ParameterKey::Bastonetes => "bastonetes",
            ParameterKey::Segmentados => "segmentados",
            ParameterKey::Linfocitos => "linfocitos",
            ParameterKey::Monocitos => "monocitos",
            ParameterKey::Eosinofilos => "eosinofilos",
            ParameterKey::Basofilos => "basofilos",
            ParameterKey::Plaquetas => "plaquetas",
        }
    }

    /// Static catalog entry for this parameter.
    pub fn spec(self) -> ParameterSpec {
        use ParameterKind::{Dual, Single};
        use Section::{Platelets, RedCellSeries, WhiteCellSeries};

        const LEUKOCYTE: ParameterKind = Dual {
            relative_unit: "%",
            absolute_unit: "/µL",
        };

        let (label, section, kind) = match self {
            ParameterKey::Eritrocitos => ("Eritrócitos", RedCellSeries, Single { unit: "x10⁶/µL" }),
            ParameterKey::Hemoglobina => ("Hemoglobina", RedCellSeries, Single { unit: "g/dL" }),
            ParameterKey::Hematocrito => ("Hematócrito", RedCellSeries, Single { unit: "%" }),
            ParameterKey::Vcm => ("VCM", RedCellSeries, Single { unit: "fL" }),
            ParameterKey::Hcm => ("HCM", RedCellSeries, Single { unit: "pg" }),
            ParameterKey::Chcm => ("CHCM", RedCellSeries, Single { unit: "g/dL" }),
            ParameterKey::ProteinasTotais => {
                ("Proteínas Totais", RedCellSeries, Single { unit: "g/dL" })
            }
            ParameterKey::LeucocitosTotais => {
                ("Leucócitos Totais", WhiteCellSeries, Single { unit: "x10³/µL" })
            }
            ParameterKey::Bastonetes => ("Bastonetes", WhiteCellSeries, LEUKOCYTE),
            ParameterKey::Segmentados => ("Segmentados", WhiteCellSeries, LEUKOCYTE),
            ParameterKey::Linfocitos => ("Linfócitos", WhiteCellSeries, LEUKOCYTE),
            ParameterKey::Monocitos => ("Monócitos", WhiteCellSeries, LEUKOCYTE),
            ParameterKey::Eosinofilos => ("Eosinófilos", WhiteCellSeries, LEUKOCYTE),
            ParameterKey::Basofilos => ("Basófilos", WhiteCellSeries, LEUKOCYTE),
            ParameterKey::Plaquetas => ("Plaquetas", Platelets, Single { unit: "x10³/µL" }),
        };

        ParameterSpec {
            key: self,
            label,
            section,
            kind,
        }
    }

    pub fn is_dual(self) -> bool {
        self.spec().kind.is_dual()
    }
}

impl FromStr for ParameterKey {
    type Err = UnknownParameter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParameterKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownParameter(s.to_string()))
    }
}

impl std::fmt::Display for ParameterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clinical section of the blood count report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// Eritrograma
    RedCellSeries,
    /// Leucograma
    WhiteCellSeries,
    /// Plaquetograma
    Platelets,
}

impl Section {
    /// Sections in report order.
    pub const ALL: [Section; 3] = [
        Section::RedCellSeries,
        Section::WhiteCellSeries,
        Section::Platelets,
    ];

    /// Printed section heading.
    pub fn title(&self) -> &'static str {
        match self {
            Section::RedCellSeries => "Eritrograma",
            Section::WhiteCellSeries => "Leucograma",
            Section::Platelets => "Plaquetograma",
        }
    }

    /// Parameters of this section, in report order.
    pub fn parameters(self) -> impl Iterator<Item = ParameterSpec> {
        ParameterKey::ALL
            .into_iter()
            .map(ParameterKey::spec)
            .filter(move |spec| spec.section == self)
    }
}

/// How a parameter is reported.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParameterKind {
    /// One value with one unit.
    Single { unit: &'static str },
    /// Leukocyte-family: relative percentage plus absolute count.
    Dual {
        relative_unit: &'static str,
        absolute_unit: &'static str,
    },
}

impl ParameterKind {
    pub fn is_dual(&self) -> bool {
        matches!(self, ParameterKind::Dual { .. })
    }
}

/// Catalog entry describing how a parameter is labelled and grouped.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ParameterSpec {
    pub key: ParameterKey,
    /// Printed label (e.g. "Hemoglobina")
    pub label: &'static str,
    pub section: Section,
    pub kind: ParameterKind,
}
