//! Built-in canine and feline blood count reference ranges.

use std::collections::BTreeMap;

use crate::models::{ParameterKey, RangeBand, ReferenceRange};

use super::SpeciesRanges;

/// Default table entries.
pub(super) fn entries() -> BTreeMap<ParameterKey, SpeciesRanges> {
    let mut map = BTreeMap::new();

    // Eritrograma
    map.insert(
        ParameterKey::Eritrocitos,
        SpeciesRanges::new(single(5.5, 8.5, "5,5 - 8,5"), single(5.0, 10.0, "5,0 - 10,0")),
    );
    map.insert(
        ParameterKey::Hemoglobina,
        SpeciesRanges::new(single(12.0, 18.0, "12 - 18"), single(8.0, 15.0, "8 - 15")),
    );
    map.insert(
        ParameterKey::Hematocrito,
        SpeciesRanges::new(single(37.0, 55.0, "37 - 55"), single(24.0, 45.0, "24 - 45")),
    );
    map.insert(
        ParameterKey::Vcm,
        SpeciesRanges::new(single(60.0, 77.0, "60 - 77"), single(39.0, 55.0, "39 - 55")),
    );
    map.insert(
        ParameterKey::Hcm,
        SpeciesRanges::new(
            single(19.5, 24.5, "19,5 - 24,5"),
            single(12.5, 17.5, "12,5 - 17,5"),
        ),
    );
    map.insert(
        ParameterKey::Chcm,
        SpeciesRanges::new(single(32.0, 36.0, "32 - 36"), single(30.0, 36.0, "30 - 36")),
    );
    map.insert(
        ParameterKey::ProteinasTotais,
        SpeciesRanges::new(single(6.0, 8.0, "6,0 - 8,0"), single(6.0, 8.0, "6,0 - 8,0")),
    );

    // Leucograma
    map.insert(
        ParameterKey::LeucocitosTotais,
        SpeciesRanges::new(
            single(6.0, 17.0, "6,0 - 17,0"),
            single(5.5, 19.5, "5,5 - 19,5"),
        ),
    );
    map.insert(
        ParameterKey::Bastonetes,
        SpeciesRanges::new(
            leukocyte((0.0, 3.0, "0 - 3"), (0.0, 300.0, "0 - 300")),
            leukocyte((0.0, 3.0, "0 - 3"), (0.0, 300.0, "0 - 300")),
        ),
    );
    map.insert(
        ParameterKey::Segmentados,
        SpeciesRanges::new(
            leukocyte((60.0, 77.0, "60 - 77"), (3000.0, 11500.0, "3.000 - 11.500")),
            leukocyte((35.0, 75.0, "35 - 75"), (2500.0, 12500.0, "2.500 - 12.500")),
        ),
    );
    map.insert(
        ParameterKey::Linfocitos,
        SpeciesRanges::new(
            leukocyte((12.0, 30.0, "12 - 30"), (1000.0, 4800.0, "1.000 - 4.800")),
            leukocyte((20.0, 55.0, "20 - 55"), (1500.0, 7000.0, "1.500 - 7.000")),
        ),
    );
    map.insert(
        ParameterKey::Monocitos,
        SpeciesRanges::new(
            leukocyte((3.0, 10.0, "3 - 10"), (150.0, 1350.0, "150 - 1.350")),
            leukocyte((1.0, 4.0, "1 - 4"), (0.0, 850.0, "0 - 850")),
        ),
    );
    map.insert(
        ParameterKey::Eosinofilos,
        SpeciesRanges::new(
            leukocyte((2.0, 10.0, "2 - 10"), (100.0, 1250.0, "100 - 1.250")),
            leukocyte((2.0, 12.0, "2 - 12"), (0.0, 1500.0, "0 - 1.500")),
        ),
    );
    // Basophils are rarely seen in either species; the range is a point.
    map.insert(
        ParameterKey::Basofilos,
        SpeciesRanges::new(
            leukocyte((0.0, 0.0, "Raros"), (0.0, 0.0, "Raros")),
            leukocyte((0.0, 0.0, "Raros"), (0.0, 0.0, "Raros")),
        ),
    );

    // Plaquetograma
    map.insert(
        ParameterKey::Plaquetas,
        SpeciesRanges::new(
            single(200.0, 500.0, "200 - 500"),
            single(300.0, 800.0, "300 - 800"),
        ),
    );

    map
}

fn single(min: f64, max: f64, full: &str) -> ReferenceRange {
    ReferenceRange::single(min, max, full)
}

fn leukocyte(relative: (f64, f64, &str), absolute: (f64, f64, &str)) -> ReferenceRange {
    ReferenceRange::dual(
        RangeBand::new(relative.0, relative.1, relative.2),
        RangeBand::new(absolute.0, absolute.1, absolute.2),
    )
}
