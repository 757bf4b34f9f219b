//! # Fire Load Classification
//!
//! Turns the stored materials of a fire sector into its fire load density,
//! hazard classification and required extinguisher potential.
//!
//! ## Pipeline
//!
//! ```text
//! materials ──Σ p·K──> Q ──/4400──> Pem ──/S──> Qf ──×n──> Qft
//!                                                          │
//!                          ┌───────────────┬───────────────┤
//!                          ▼               ▼               ▼
//!                      classify     potential row    (risk column)
//!                    LEVE/COMÚN/MAYOR      └──── Class A / Class B cell
//! ```
//!
//! ## Example
//!
//! ```rust
//! use carga_core::calculations::fire_load::{
//!     classify_fire_load, FireLoadClass, MaterialEntry, SectorParameters,
//! };
//!
//! let materials = vec![MaterialEntry::new("Pallets").with_weight(100.0).with_heat(4400.0)];
//! let sector = SectorParameters {
//!     surface_area_m2: 100.0,
//!     risk_type: 3,
//!     sector_name: "Depósito".to_string(),
//!     sector_count: 1,
//! };
//!
//! let result = classify_fire_load(&materials, &sector);
//! assert_eq!(result.total_calories_kcal, 440_000.0);
//! assert_eq!(result.classification, FireLoadClass::Leve);
//! assert_eq!(result.required_potential_class_a, "1A");
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::equations::fire_load::{
    classify, compute_calories, compute_fire_load_density, compute_total_fire_load_density,
    compute_total_weight, compute_wood_equivalent, lookup_potential, potential_row_index,
    risk_column, suggested_extinguisher_count,
};
use crate::tables::potential::{CLASS_A, CLASS_B};

/// One row of the materials table.
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": "7c0d1a9e-1f55-4d0b-9a8e-0f3b2f0e6a11",
///   "name": "Gasoil",
///   "weight_kg": 850.0,
///   "heat_of_combustion": 10200.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialEntry {
    /// Unique within a report
    pub id: Uuid,

    pub name: String,

    /// Stored weight (kg)
    pub weight_kg: f64,

    /// Heat of combustion (kcal/kg)
    pub heat_of_combustion: f64,
}

impl MaterialEntry {
    /// New row with zero weight and heat, as created by "add row"
    pub fn new(name: impl Into<String>) -> Self {
        MaterialEntry {
            id: Uuid::new_v4(),
            name: name.into(),
            weight_kg: 0.0,
            heat_of_combustion: 0.0,
        }
    }

    pub fn with_weight(mut self, weight_kg: f64) -> Self {
        self.weight_kg = weight_kg;
        self
    }

    pub fn with_heat(mut self, heat_of_combustion: f64) -> Self {
        self.heat_of_combustion = heat_of_combustion;
        self
    }

    /// Heat content of this row (kcal)
    pub fn calories(&self) -> f64 {
        self.weight_kg * self.heat_of_combustion
    }
}

/// Geometry and risk of the fire sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorParameters {
    /// Floor surface (m²)
    pub surface_area_m2: f64,

    /// Risk type code 1..=7, 0 = not permitted
    pub risk_type: u8,

    pub sector_name: String,

    /// Number of identical sectors, at least 1
    pub sector_count: u32,
}

impl Default for SectorParameters {
    fn default() -> Self {
        SectorParameters {
            surface_area_m2: 0.0,
            risk_type: 0,
            sector_name: String::new(),
            sector_count: 1,
        }
    }
}

/// Three-tier hazard classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FireLoadClass {
    #[serde(rename = "LEVE")]
    Leve,
    #[serde(rename = "COMÚN")]
    Comun,
    #[serde(rename = "MAYOR")]
    Mayor,
}

impl FireLoadClass {
    /// Label as printed in reports
    pub fn label(&self) -> &'static str {
        match self {
            FireLoadClass::Leve => "LEVE",
            FireLoadClass::Comun => "COMÚN",
            FireLoadClass::Mayor => "MAYOR",
        }
    }
}

impl std::fmt::Display for FireLoadClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Results of the fire load classification, at full precision.
///
/// ## JSON Example
///
/// ```json
/// {
///   "total_weight_kg": 100.0,
///   "total_calories_kcal": 440000.0,
///   "wood_equivalent_kg": 100.0,
///   "fire_load_density": 1.0,
///   "total_fire_load_density": 1.0,
///   "classification": "LEVE",
///   "potential_row": 0,
///   "risk_column": 3,
///   "required_potential_class_a": "1A",
///   "required_potential_class_b": "4B",
///   "suggested_extinguisher_count": 1
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireLoadResult {
    pub total_weight_kg: f64,

    pub total_calories_kcal: f64,

    /// Pem (kg of wood)
    pub wood_equivalent_kg: f64,

    /// Qf (kg/m²)
    pub fire_load_density: f64,

    /// Qf × sector count (kg/m²)
    pub total_fire_load_density: f64,

    pub classification: FireLoadClass,

    /// Row of the potential tables (0..=4)
    pub potential_row: usize,

    /// Risk column of the potential tables (1..=5)
    pub risk_column: usize,

    pub required_potential_class_a: String,

    pub required_potential_class_b: String,

    pub suggested_extinguisher_count: u32,
}

/// Classify a sector from its materials.
///
/// Pure: no I/O, inputs untouched, no error path.
pub fn classify_fire_load(materials: &[MaterialEntry], sector: &SectorParameters) -> FireLoadResult {
    let total_weight_kg = compute_total_weight(materials);
    let total_calories_kcal = compute_calories(materials);
    let wood_equivalent_kg = compute_wood_equivalent(total_calories_kcal);
    let fire_load_density = compute_fire_load_density(wood_equivalent_kg, sector.surface_area_m2);
    let total_fire_load_density = compute_total_fire_load_density(fire_load_density, sector.sector_count);

    let row = potential_row_index(total_fire_load_density);
    let column = risk_column(sector.risk_type);

    FireLoadResult {
        total_weight_kg,
        total_calories_kcal,
        wood_equivalent_kg,
        fire_load_density,
        total_fire_load_density,
        classification: classify(total_fire_load_density),
        potential_row: row,
        risk_column: column,
        required_potential_class_a: lookup_potential(&CLASS_A, row, column).to_string(),
        required_potential_class_b: lookup_potential(&CLASS_B, row, column).to_string(),
        suggested_extinguisher_count: suggested_extinguisher_count(sector.surface_area_m2),
    }
}
