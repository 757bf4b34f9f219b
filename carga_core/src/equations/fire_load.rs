//! # Fire Load Formulas
//!
//! The arithmetic of Decreto 351/79, Anexo VII: caloric totals, wood
//! equivalent, fire load density, the three-tier classification and the
//! table coordinates used to read the extinguisher potential.
//!
//! ## Notation
//!
//! - `Q` = Total heat content of the sector (kcal)
//! - `Pem` = Wood-equivalent weight (kg)
//! - `S` = Sector floor surface (m²)
//! - `Qf` = Fire load density (kg of wood per m²)
//! - `n` = Number of sectors
//!
//! ## Boundaries
//!
//! Two independent bracketings exist and they do NOT agree:
//!
//! - [`classify`]: half-open intervals, boundaries go to the higher class
//!   (60 is COMÚN, 120 is MAYOR).
//! - [`potential_row_index`]: inclusive upper bounds (15 is row 0, 100 is
//!   row 3).
//!
//! Both are reproduced exactly as the annex prints them.
//!
//! No function here validates its input. NaN and negative values follow
//! plain IEEE arithmetic; callers coerce form text before reaching this
//! module (see [`crate::input`]).

use crate::calculations::fire_load::{FireLoadClass, MaterialEntry};
use crate::tables::potential::{PotentialTable, TO_BE_DETERMINED};

/// Heat of combustion of wood (kcal/kg), the normalization reference
pub const WOOD_CALORIFIC_VALUE: f64 = 4400.0;

/// Total fire load density (kg/m²) at which a sector becomes COMÚN
pub const COMMON_THRESHOLD: f64 = 60.0;

/// Total fire load density (kg/m²) at which a sector becomes MAYOR
pub const MAJOR_THRESHOLD: f64 = 120.0;

/// Floor surface covered by one extinguisher (m²)
pub const SURFACE_PER_EXTINGUISHER_M2: f64 = 200.0;

/// Risk column used when the risk type is outside 1..=5
pub const FALLBACK_RISK_COLUMN: usize = 3;

/// Inclusive upper bounds of the potential table rows (kg/m²)
const ROW_UPPER_BOUNDS: [f64; 4] = [15.0, 30.0, 60.0, 100.0];

// =============================================================================
// CALORIC CONTENT
// =============================================================================

/// Total heat content of all materials
///
/// # Formula
/// Q = Σ (weight_kg × heat_of_combustion)
///
/// # Returns
/// Heat content in kcal. An empty list yields 0.
pub fn compute_calories(materials: &[MaterialEntry]) -> f64 {
    materials
        .iter()
        .map(|m| m.weight_kg * m.heat_of_combustion)
        .sum()
}

/// Total stored weight (kg)
pub fn compute_total_weight(materials: &[MaterialEntry]) -> f64 {
    materials.iter().map(|m| m.weight_kg).sum()
}

/// Weight of wood that releases the same heat
///
/// # Formula
/// Pem = Q / 4400
#[inline]
pub fn compute_wood_equivalent(total_calories: f64) -> f64 {
    total_calories / WOOD_CALORIFIC_VALUE
}

// =============================================================================
// DENSITY
// =============================================================================

/// Fire load density of one sector
///
/// # Formula
/// Qf = Pem / S
///
/// A surface of zero (or less) yields 0 rather than infinity or NaN.
#[inline]
pub fn compute_fire_load_density(wood_equivalent_kg: f64, surface_area_m2: f64) -> f64 {
    if surface_area_m2 > 0.0 {
        wood_equivalent_kg / surface_area_m2
    } else {
        0.0
    }
}

/// Density across all sectors: Qf × n, unclamped
#[inline]
pub fn compute_total_fire_load_density(density: f64, sector_count: u32) -> f64 {
    density * f64::from(sector_count)
}

// =============================================================================
// CLASSIFICATION AND TABLE COORDINATES
// =============================================================================

/// Three-tier hazard classification
///
/// - `d < 60` → LEVE
/// - `60 ≤ d < 120` → COMÚN
/// - `d ≥ 120` → MAYOR
pub fn classify(total_density: f64) -> FireLoadClass {
    if total_density >= MAJOR_THRESHOLD {
        FireLoadClass::Mayor
    } else if total_density >= COMMON_THRESHOLD {
        FireLoadClass::Comun
    } else {
        FireLoadClass::Leve
    }
}

/// Potential table row for a density
///
/// `≤15` → 0, `≤30` → 1, `≤60` → 2, `≤100` → 3, anything else → 4.
/// NaN compares false against every bound and lands on row 4.
pub fn potential_row_index(total_density: f64) -> usize {
    ROW_UPPER_BOUNDS
        .iter()
        .position(|&upper| total_density <= upper)
        .unwrap_or(ROW_UPPER_BOUNDS.len())
}

/// Potential table column for a risk type
///
/// Risk types 1..=5 map to their own column. Every other code (0, 6, 7 or
/// garbage) reads column 3.
// TODO: confirm with the safety department whether risk 6/7 should read
// column 5 instead of column 3.
pub fn risk_column(risk_type: u8) -> usize {
    match risk_type {
        1..=5 => risk_type as usize,
        _ => FALLBACK_RISK_COLUMN,
    }
}

/// Read a potential cell, degrading to "A determinar" outside the table
pub fn lookup_potential(table: &PotentialTable, row_index: usize, column: usize) -> &'static str {
    table.cell(row_index, column).unwrap_or(TO_BE_DETERMINED)
}

// =============================================================================
// EXTINGUISHERS
// =============================================================================

/// One extinguisher per 200 m², rounded up
///
/// A surface of zero yields zero extinguishers, not one.
pub fn suggested_extinguisher_count(surface_area_m2: f64) -> u32 {
    if surface_area_m2 > 0.0 {
        (surface_area_m2 / SURFACE_PER_EXTINGUISHER_M2).ceil() as u32
    } else {
        0
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================
