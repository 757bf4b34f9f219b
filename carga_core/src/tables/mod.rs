//! # Regulatory Reference Tables
//!
//! Immutable data consulted by the fire load engine and printed in reports.
//! Tables are static arrays of records, so a regulatory update touches
//! only this module and never the classification algorithm.
//!
//! - [`potential`] - Class A / Class B extinguisher potential tables
//! - [`occupancy_use`] - m² per person by use type
//! - [`extinguishers`] - extinguisher catalog (reference only)
//! - [`combustibles`] - heats of combustion for common materials
//! - [`risk`] - risk type codes and names
//!
//! ## Example
//!
//! ```rust
//! use carga_core::tables::{CLASS_A, OCCUPANCY_USES};
//!
//! assert_eq!(CLASS_A.cell(2, 3), Some("3A"));
//! assert!(OCCUPANCY_USES.len() > 10);
//! ```

pub mod combustibles;
pub mod extinguishers;
pub mod occupancy_use;
pub mod potential;
pub mod risk;

pub use combustibles::{find_combustible, Combustible, COMBUSTIBLES};
pub use extinguishers::{ExtinguisherSpec, EXTINGUISHER_CATALOG};
pub use occupancy_use::{occupancy_use, OccupancyUse, OCCUPANCY_USES};
pub use potential::{
    table_for, FireClass, PotentialRow, PotentialTable, CLASS_A, CLASS_B, NOT_APPLICABLE,
    TO_BE_DETERMINED,
};
pub use risk::{risk_label, RiskType};
