//! # Occupancy and Egress Formulas
//!
//! Decreto 351/79, Anexo VII, 3.1: occupant count from floor area and the
//! exit width those occupants need.
//!
//! ## Notation
//!
//! - `S` = Floor surface (m²)
//! - `X` = Area allowance per person (m²)
//! - `N` = Occupant count
//! - `n` = Exit width units ("unidades de ancho de salida")

/// Share of the occupancy kept after reserving circulation space
pub const CLEARANCE_RATIO: f64 = 0.8;

/// Occupants served by one exit width unit
pub const OCCUPANTS_PER_EXIT_UNIT: f64 = 100.0;

/// Minimum exit units for any occupied space
pub const MIN_EXIT_UNITS: u32 = 2;

/// Width of each of the first two exit units (m)
pub const FIRST_UNITS_WIDTH_M: f64 = 0.55;

/// Width of every exit unit after the second (m)
pub const EXTRA_UNIT_WIDTH_M: f64 = 0.45;

/// Occupant count
///
/// # Formula
/// N = ceil(S / X), or 0 when either value is not positive
pub fn occupancy_factor(surface_area_m2: f64, m2_per_person: f64) -> u32 {
    if m2_per_person > 0.0 && surface_area_m2 > 0.0 {
        (surface_area_m2 / m2_per_person).ceil() as u32
    } else {
        0
    }
}

/// Occupancy after reserving 20% for circulation: floor(N × 0.8)
pub fn occupancy_with_clearance(occupancy_factor: u32) -> u32 {
    (f64::from(occupancy_factor) * CLEARANCE_RATIO).floor() as u32
}

/// Exit width units needed for `occupants`
///
/// # Formula
/// n = ceil(N / 100), never below 2 once N > 0
pub fn required_exit_units(occupants: u32) -> u32 {
    if occupants == 0 {
        return 0;
    }
    let units = (f64::from(occupants) / OCCUPANTS_PER_EXIT_UNIT).ceil() as u32;
    units.max(MIN_EXIT_UNITS)
}

/// Clear width (m) provided by `units` exit units
///
/// 0.55 m for each of the first two units, 0.45 m for each one after.
pub fn exit_width_m(units: u32) -> f64 {
    let first = units.min(2);
    let extra = units.saturating_sub(2);
    f64::from(first) * FIRST_UNITS_WIDTH_M + f64::from(extra) * EXTRA_UNIT_WIDTH_M
}
