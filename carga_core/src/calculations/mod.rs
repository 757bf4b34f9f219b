//! # Calculations
//!
//! Each calculation follows the pattern:
//!
//! - input records (JSON-serializable)
//! - a `*Result` record (JSON-serializable, full precision)
//! - a pure function from inputs to result
//!
//! ## Available Calculations
//!
//! - [`fire_load`] - Fire load density, classification, extinguisher potential
//! - [`occupancy`] - Occupant count and egress sizing
//!
//! [`classify_report`] composes both into the single record consumed by the
//! summary view and the PDF.

pub mod fire_load;
pub mod occupancy;

use serde::{Deserialize, Serialize};

pub use fire_load::{classify_fire_load, FireLoadClass, FireLoadResult, MaterialEntry, SectorParameters};
pub use occupancy::{
    compute_egress, compute_occupancy, EgressSizing, OccupancyParameters, OccupancyResult,
};

/// Everything derived from a filled form.
///
/// Never persisted as authoritative; recomputed from the inputs each time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    #[serde(flatten)]
    pub fire_load: FireLoadResult,

    pub occupancy_factor: u32,

    pub occupancy_factor_with_clearance: u32,

    pub egress: EgressSizing,
}

impl ClassificationResult {
    pub fn classification(&self) -> FireLoadClass {
        self.fire_load.classification
    }
}

/// Classify a sector and size its occupancy.
///
/// ```rust
/// use carga_core::calculations::{
///     classify_report, MaterialEntry, OccupancyParameters, SectorParameters,
/// };
///
/// let materials = vec![MaterialEntry::new("Cartón").with_weight(500.0).with_heat(4000.0)];
/// let sector = SectorParameters { surface_area_m2: 100.0, risk_type: 4, ..Default::default() };
/// let occupancy = OccupancyParameters { selected_use_index: Some(4), ..Default::default() };
///
/// let result = classify_report(&materials, &sector, &occupancy);
/// assert_eq!(result.occupancy_factor, 13);
/// ```
pub fn classify_report(
    materials: &[MaterialEntry],
    sector: &SectorParameters,
    occupancy: &OccupancyParameters,
) -> ClassificationResult {
    let fire_load = classify_fire_load(materials, sector);
    let people = compute_occupancy(sector.surface_area_m2, occupancy.m2_per_person());
    let egress = compute_egress(people.factor, occupancy.exit_unit_count);

    ClassificationResult {
        fire_load,
        occupancy_factor: people.factor,
        occupancy_factor_with_clearance: people.factor_with_clearance,
        egress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_report_combines_both() {
        let materials = vec![MaterialEntry::new("Madera").with_weight(100.0).with_heat(4400.0)];
        let sector = SectorParameters {
            surface_area_m2: 100.0,
            risk_type: 3,
            sector_name: "Taller".to_string(),
            sector_count: 1,
        };
        let occupancy = OccupancyParameters {
            selected_use_index: None,
            custom_m2_per_person: 8.0,
            exit_unit_count: 2,
        };

        let result = classify_report(&materials, &sector, &occupancy);
        assert_eq!(result.classification(), FireLoadClass::Leve);
        assert_eq!(result.occupancy_factor, 13);
        assert_eq!(result.occupancy_factor_with_clearance, 10);
        assert!(result.egress.sufficient);
    }

    #[test]
    fn test_result_json_is_flat() {
        let result = classify_report(&[], &SectorParameters::default(), &OccupancyParameters::default());
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("total_fire_load_density").is_some());
        assert!(json.get("occupancy_factor").is_some());
        assert_eq!(json["classification"], "LEVE");

        let back: ClassificationResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, result);
    }
}
