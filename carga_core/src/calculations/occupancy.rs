//! # Occupancy and Egress
//!
//! Occupant count for the sector surface and the exit width it requires.
//!
//! ## Example
//!
//! ```rust
//! use carga_core::calculations::occupancy::compute_occupancy;
//!
//! let occupancy = compute_occupancy(100.0, 8.0);
//! assert_eq!(occupancy.factor, 13);
//! assert_eq!(occupancy.factor_with_clearance, 10);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::occupancy::{
    exit_width_m, occupancy_factor, occupancy_with_clearance, required_exit_units,
};
use crate::tables::occupancy_use::{occupancy_use, OccupancyUse};

/// Occupancy selection of the form.
///
/// A selected table entry overrides `custom_m2_per_person`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupancyParameters {
    /// Index into [`crate::tables::OCCUPANCY_USES`]
    pub selected_use_index: Option<usize>,

    /// m² per person used when nothing is selected
    pub custom_m2_per_person: f64,

    /// Exit width units declared by the operator
    pub exit_unit_count: u32,
}

impl Default for OccupancyParameters {
    fn default() -> Self {
        OccupancyParameters {
            selected_use_index: None,
            custom_m2_per_person: 16.0,
            exit_unit_count: 0,
        }
    }
}

impl OccupancyParameters {
    /// Selected table entry, if the index is valid
    pub fn selected_use(&self) -> Option<&'static OccupancyUse> {
        self.selected_use_index.and_then(occupancy_use)
    }

    /// Effective area allowance per person
    ///
    /// An index pointing past the table is treated as no selection.
    pub fn m2_per_person(&self) -> f64 {
        match self.selected_use() {
            Some(entry) => entry.m2_per_person,
            None => self.custom_m2_per_person,
        }
    }
}

/// Occupant count with and without the circulation reserve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancyResult {
    pub factor: u32,
    pub factor_with_clearance: u32,
}

/// Exit sizing against what the operator declared.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EgressSizing {
    pub required_exit_units: u32,
    pub declared_exit_units: u32,
    /// Clear width the declared units provide (m)
    pub declared_width_m: f64,
    /// Clear width the requirement calls for (m)
    pub required_width_m: f64,
    pub sufficient: bool,
}

/// Occupant count for a surface
pub fn compute_occupancy(surface_area_m2: f64, m2_per_person: f64) -> OccupancyResult {
    let factor = occupancy_factor(surface_area_m2, m2_per_person);
    OccupancyResult {
        factor,
        factor_with_clearance: occupancy_with_clearance(factor),
    }
}

/// Exit sizing for `occupants` against the declared exit units
pub fn compute_egress(occupants: u32, declared_exit_units: u32) -> EgressSizing {
    let required = required_exit_units(occupants);
    EgressSizing {
        required_exit_units: required,
        declared_exit_units,
        declared_width_m: exit_width_m(declared_exit_units),
        required_width_m: exit_width_m(required),
        sufficient: declared_exit_units >= required,
    }
}
