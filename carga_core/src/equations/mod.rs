//! # Fire Load Equations
//!
//! Every formula used by the calculations lives here, as plain functions
//! over numbers. Keeping them in one place makes them easy to check
//! against the annex and lets the report list exactly what was applied.
//!
//! ## Modules
//!
//! - [`fire_load`] - Caloric content, density, classification, table coordinates
//! - [`occupancy`] - Occupant count and exit sizing
//! - [`registry`] - Equation metadata and tracking for the PDF appendix
//!
//! ## References
//!
//! - Ley 19.587 de Higiene y Seguridad en el Trabajo
//! - Decreto 351/79, Anexo VII: Protección contra incendios

pub mod fire_load;
pub mod occupancy;
pub mod registry;

pub use fire_load::{
    classify, compute_calories, compute_fire_load_density, compute_total_fire_load_density,
    compute_total_weight, compute_wood_equivalent, lookup_potential, potential_row_index,
    risk_column, suggested_extinguisher_count, WOOD_CALORIFIC_VALUE,
};

pub use occupancy::{exit_width_m, occupancy_factor, occupancy_with_clearance, required_exit_units};

pub use registry::{
    generate_equations_markdown, CodeReference, Equation, EquationCategory, EquationMetadata,
    EquationTracker, EquationUsage,
};
