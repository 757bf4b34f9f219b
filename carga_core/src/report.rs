//! # Report State
//!
//! `FireLoadReport` is the root container for one fire load study. Reports
//! serialize to `.carga` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! FireLoadReport
//! ├── meta: ReportMetadata (schema version, company, operator, timestamps)
//! ├── settings: ReportSettings (regulation, paper, display decimals)
//! ├── sector: SectorParameters
//! ├── materials: Vec<MaterialEntry> (insertion order = row numbers)
//! ├── occupancy: OccupancyParameters
//! └── extinguishers: Vec<ExtinguisherSelection>
//! ```
//!
//! ## Editing
//!
//! The report is never mutated in place by callers. Each form action is a
//! [`FormEdit`]; [`FireLoadReport::apply`] returns the next state and
//! leaves the current one as it was, so a rejected edit changes nothing.
//!
//! ```rust
//! use carga_core::report::{FireLoadReport, FormEdit};
//!
//! let report = FireLoadReport::new("Servicios Petroleros SA", "J. Pérez", "Añelo");
//! let report = report.apply(FormEdit::AddMaterialFromCatalog { name: "gasoil".into() }).unwrap();
//! let id = report.materials[0].id;
//! let report = report.apply(FormEdit::SetMaterialWeight { id, raw: "850".into() }).unwrap();
//! let report = report.apply(FormEdit::SetSurface { raw: "100".into() }).unwrap();
//!
//! let results = report.results();
//! assert_eq!(results.fire_load.total_calories_kcal, 8_670_000.0);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::{
    classify_report, ClassificationResult, MaterialEntry, OccupancyParameters, SectorParameters,
};
use crate::errors::{CalcError, CalcResult};
use crate::input::{coerce_count, coerce_f64, coerce_risk_type};
use crate::tables::{find_combustible, occupancy_use};

/// Current schema version for .carga files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Regulation cited in reports unless changed
pub const DEFAULT_REGULATION: &str = "Ley 19.587 - Decreto 351/79, Anexo VII";

/// Root report container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireLoadReport {
    pub meta: ReportMetadata,

    pub settings: ReportSettings,

    pub sector: SectorParameters,

    /// Material rows in the order they were added
    pub materials: Vec<MaterialEntry>,

    pub occupancy: OccupancyParameters,

    /// Extinguishers the operator selected, printed as entered
    pub extinguishers: Vec<ExtinguisherSelection>,
}

impl FireLoadReport {
    /// Create an empty report.
    ///
    /// ```rust
    /// use carga_core::report::FireLoadReport;
    ///
    /// let report = FireLoadReport::new("ACME", "Operador", "Base Neuquén");
    /// assert!(report.materials.is_empty());
    /// assert_eq!(report.sector.sector_count, 1);
    /// ```
    pub fn new(
        company: impl Into<String>,
        operator: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        FireLoadReport {
            meta: ReportMetadata {
                schema_version: SCHEMA_VERSION.to_string(),
                company: company.into(),
                operator: operator.into(),
                location: location.into(),
                created: now,
                modified: now,
            },
            settings: ReportSettings::default(),
            sector: SectorParameters::default(),
            materials: Vec::new(),
            occupancy: OccupancyParameters::default(),
            extinguishers: Vec::new(),
        }
    }

    /// Apply one form edit and return the resulting report.
    ///
    /// `self` is never modified. On error nothing is produced, so the
    /// caller keeps showing the state it already has.
    pub fn apply(&self, edit: FormEdit) -> CalcResult<FireLoadReport> {
        let mut next = self.clone();
        next.apply_in_place(edit)?;
        next.touch();
        Ok(next)
    }

    /// Classify the current inputs.
    ///
    /// The engine gets copies of the inputs; results are recomputed on
    /// every call and never stored in the report.
    pub fn results(&self) -> ClassificationResult {
        classify_report(&self.materials, &self.sector, &self.occupancy)
    }

    /// Material row by id
    pub fn material(&self, id: &Uuid) -> Option<&MaterialEntry> {
        self.materials.iter().find(|m| m.id == *id)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    fn material_mut(&mut self, id: Uuid) -> CalcResult<&mut MaterialEntry> {
        self.materials
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| CalcError::invalid_input("material_id", id.to_string(), "No material row with this id"))
    }

    fn extinguisher_mut(&mut self, index: usize) -> CalcResult<&mut ExtinguisherSelection> {
        let len = self.extinguishers.len();
        self.extinguishers.get_mut(index).ok_or_else(|| {
            CalcError::invalid_input(
                "extinguisher_index",
                index.to_string(),
                format!("Only {} extinguisher rows", len),
            )
        })
    }

    fn apply_in_place(&mut self, edit: FormEdit) -> CalcResult<()> {
        match edit {
            FormEdit::AddMaterial => {
                self.materials.push(MaterialEntry::new(""));
            }
            FormEdit::AddMaterialFromCatalog { name } => {
                let combustible =
                    find_combustible(&name).ok_or_else(|| CalcError::material_not_found(name.trim()))?;
                self.materials.push(
                    MaterialEntry::new(combustible.name).with_heat(combustible.heat_of_combustion),
                );
            }
            FormEdit::RemoveMaterial { id } => {
                let position = self.materials.iter().position(|m| m.id == id).ok_or_else(|| {
                    CalcError::invalid_input("material_id", id.to_string(), "No material row with this id")
                })?;
                self.materials.remove(position);
            }
            FormEdit::SetMaterialName { id, name } => {
                self.material_mut(id)?.name = name;
            }
            FormEdit::SetMaterialWeight { id, raw } => {
                self.material_mut(id)?.weight_kg = coerce_f64(&raw);
            }
            FormEdit::SetMaterialHeat { id, raw } => {
                self.material_mut(id)?.heat_of_combustion = coerce_f64(&raw);
            }

            FormEdit::SetSurface { raw } => {
                self.sector.surface_area_m2 = coerce_f64(&raw);
            }
            FormEdit::SetRiskType { raw } => {
                self.sector.risk_type = coerce_risk_type(&raw);
            }
            FormEdit::SetSectorName { name } => {
                self.sector.sector_name = name;
            }
            FormEdit::SetSectorCount { raw } => {
                self.sector.sector_count = coerce_count(&raw, 1);
            }

            FormEdit::SelectOccupancyUse { index } => {
                if let Some(i) = index {
                    if occupancy_use(i).is_none() {
                        return Err(CalcError::invalid_input(
                            "selected_use_index",
                            i.to_string(),
                            "Not an entry of the occupancy table",
                        ));
                    }
                }
                self.occupancy.selected_use_index = index;
            }
            FormEdit::SetCustomM2PerPerson { raw } => {
                self.occupancy.custom_m2_per_person = coerce_f64(&raw);
            }
            FormEdit::SetExitUnitCount { raw } => {
                self.occupancy.exit_unit_count = coerce_count(&raw, 0);
            }

            FormEdit::AddExtinguisher => {
                self.extinguishers.push(ExtinguisherSelection::default());
            }
            FormEdit::RemoveExtinguisher { index } => {
                self.extinguisher_mut(index)?;
                self.extinguishers.remove(index);
            }
            FormEdit::EditExtinguisher { index, field, value } => {
                let row = self.extinguisher_mut(index)?;
                *row.field_mut(field) = value;
            }

            FormEdit::SetCompany { value } => self.meta.company = value,
            FormEdit::SetOperator { value } => self.meta.operator = value,
            FormEdit::SetLocation { value } => self.meta.location = value,
        }
        Ok(())
    }
}

impl Default for FireLoadReport {
    fn default() -> Self {
        FireLoadReport::new("", "", "")
    }
}

/// Report metadata stored in the file header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Schema version (for migration compatibility)
    pub schema_version: String,

    pub company: String,

    /// Person who surveyed the sector
    pub operator: String,

    /// Site, base or well pad
    pub location: String,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}

/// Per-report settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Regulation cited in the header
    pub regulation: String,

    pub paper: PaperSize,

    /// Decimal places shown for densities and weights
    pub decimals: u8,
}

impl Default for ReportSettings {
    fn default() -> Self {
        ReportSettings {
            regulation: DEFAULT_REGULATION.to_string(),
            paper: PaperSize::default(),
            decimals: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaperSize {
    #[default]
    A4,
    Letter,
}

impl PaperSize {
    /// Typst paper name
    pub fn typst_name(&self) -> &'static str {
        match self {
            PaperSize::A4 => "a4",
            PaperSize::Letter => "us-letter",
        }
    }
}

/// One extinguisher row. Free text, printed as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtinguisherSelection {
    pub quantity: String,
    pub brand: String,
    pub capacity: String,
    pub agent: String,
    pub certified_potential: String,
    pub required_potential: String,
}

/// Column of an extinguisher row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtinguisherField {
    Quantity,
    Brand,
    Capacity,
    Agent,
    CertifiedPotential,
    RequiredPotential,
}

impl ExtinguisherSelection {
    fn field_mut(&mut self, field: ExtinguisherField) -> &mut String {
        match field {
            ExtinguisherField::Quantity => &mut self.quantity,
            ExtinguisherField::Brand => &mut self.brand,
            ExtinguisherField::Capacity => &mut self.capacity,
            ExtinguisherField::Agent => &mut self.agent,
            ExtinguisherField::CertifiedPotential => &mut self.certified_potential,
            ExtinguisherField::RequiredPotential => &mut self.required_potential,
        }
    }
}

/// A single form action.
///
/// Numeric fields carry the raw text typed by the operator and are
/// coerced when applied (see [`crate::input`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "edit")]
pub enum FormEdit {
    /// Empty material row (zero weight and heat)
    AddMaterial,
    /// Material row pre-filled from the combustible catalog
    AddMaterialFromCatalog { name: String },
    RemoveMaterial { id: Uuid },
    SetMaterialName { id: Uuid, name: String },
    SetMaterialWeight { id: Uuid, raw: String },
    SetMaterialHeat { id: Uuid, raw: String },

    SetSurface { raw: String },
    SetRiskType { raw: String },
    SetSectorName { name: String },
    SetSectorCount { raw: String },

    /// `None` clears the selection
    SelectOccupancyUse { index: Option<usize> },
    SetCustomM2PerPerson { raw: String },
    SetExitUnitCount { raw: String },

    AddExtinguisher,
    RemoveExtinguisher { index: usize },
    EditExtinguisher { index: usize, field: ExtinguisherField, value: String },

    SetCompany { value: String },
    SetOperator { value: String },
    SetLocation { value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::FireLoadClass;

    fn with_wood(kg: &str) -> FireLoadReport {
        let report = FireLoadReport::new("ACME", "Operador", "Base")
            .apply(FormEdit::AddMaterialFromCatalog { name: "Madera".into() })
            .unwrap();
        let id = report.materials[0].id;
        report
            .apply(FormEdit::SetMaterialWeight { id, raw: kg.into() })
            .unwrap()
            .apply(FormEdit::SetSurface { raw: "100".into() })
            .unwrap()
            .apply(FormEdit::SetRiskType { raw: "3".into() })
            .unwrap()
    }

    #[test]
    fn test_report_creation() {
        let report = FireLoadReport::new("ACME", "Operador", "Base");
        assert_eq!(report.meta.company, "ACME");
        assert_eq!(report.meta.schema_version, SCHEMA_VERSION);
        assert_eq!(report.settings.decimals, 2);
        assert_eq!(report.settings.paper, PaperSize::A4);
        assert_eq!(report.occupancy.custom_m2_per_person, 16.0);
    }

    #[test]
    fn test_apply_leaves_previous_state() {
        let before = FireLoadReport::default();
        let after = before.apply(FormEdit::AddMaterial).unwrap();
        assert!(before.materials.is_empty());
        assert_eq!(after.materials.len(), 1);
        assert_eq!(after.materials[0].weight_kg, 0.0);
        assert!(after.meta.modified >= before.meta.modified);
    }

    #[test]
    fn test_catalog_row_prefills_heat() {
        let report = FireLoadReport::default()
            .apply(FormEdit::AddMaterialFromCatalog { name: " GASOIL ".into() })
            .unwrap();
        assert_eq!(report.materials[0].name, "Gasoil");
        assert_eq!(report.materials[0].heat_of_combustion, 10200.0);

        let err = report
            .apply(FormEdit::AddMaterialFromCatalog { name: "Unobtainium".into() })
            .unwrap_err();
        assert_eq!(err.error_code(), "MATERIAL_NOT_FOUND");
    }

    #[test]
    fn test_unknown_material_id_is_rejected() {
        let report = FireLoadReport::default().apply(FormEdit::AddMaterial).unwrap();
        let stranger = Uuid::new_v4();

        for edit in [
            FormEdit::RemoveMaterial { id: stranger },
            FormEdit::SetMaterialName { id: stranger, name: "x".into() },
            FormEdit::SetMaterialWeight { id: stranger, raw: "1".into() },
            FormEdit::SetMaterialHeat { id: stranger, raw: "1".into() },
        ] {
            let err = report.apply(edit).unwrap_err();
            assert_eq!(err.error_code(), "INVALID_INPUT");
        }
        assert_eq!(report.materials.len(), 1);
    }

    #[test]
    fn test_remove_material_keeps_order() {
        let report = FireLoadReport::default()
            .apply(FormEdit::AddMaterialFromCatalog { name: "Papel".into() })
            .unwrap()
            .apply(FormEdit::AddMaterialFromCatalog { name: "Cartón".into() })
            .unwrap()
            .apply(FormEdit::AddMaterialFromCatalog { name: "Nafta".into() })
            .unwrap();
        let middle = report.materials[1].id;
        let report = report.apply(FormEdit::RemoveMaterial { id: middle }).unwrap();
        let names: Vec<_> = report.materials.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Papel", "Nafta"]);
        assert!(report.material(&middle).is_none());
    }

    #[test]
    fn test_numeric_edits_are_coerced() {
        let report = with_wood("1.200,5");
        assert_eq!(report.materials[0].weight_kg, 1200.5);

        let report = report
            .apply(FormEdit::SetSectorCount { raw: "0".into() })
            .unwrap()
            .apply(FormEdit::SetRiskType { raw: "9".into() })
            .unwrap()
            .apply(FormEdit::SetSurface { raw: "-5".into() })
            .unwrap();
        assert_eq!(report.sector.sector_count, 1);
        assert_eq!(report.sector.risk_type, 0);
        assert_eq!(report.sector.surface_area_m2, 0.0);
    }

    #[test]
    fn test_results_follow_edits() {
        let light = with_wood("100");
        assert_eq!(light.results().classification(), FireLoadClass::Leve);

        let heavy = light.apply(FormEdit::SetSectorCount { raw: "120".into() }).unwrap();
        assert_eq!(heavy.results().classification(), FireLoadClass::Mayor);
        assert_eq!(light.results().classification(), FireLoadClass::Leve);
    }

    #[test]
    fn test_occupancy_selection() {
        let report = with_wood("10")
            .apply(FormEdit::SelectOccupancyUse { index: Some(4) })
            .unwrap();
        assert_eq!(report.results().occupancy_factor, 13);

        let err = report.apply(FormEdit::SelectOccupancyUse { index: Some(500) }).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert_eq!(report.occupancy.selected_use_index, Some(4));

        let cleared = report
            .apply(FormEdit::SelectOccupancyUse { index: None })
            .unwrap()
            .apply(FormEdit::SetCustomM2PerPerson { raw: "10".into() })
            .unwrap();
        assert_eq!(cleared.results().occupancy_factor, 10);
    }

    #[test]
    fn test_extinguisher_rows() {
        let report = FireLoadReport::default()
            .apply(FormEdit::AddExtinguisher)
            .unwrap()
            .apply(FormEdit::EditExtinguisher {
                index: 0,
                field: ExtinguisherField::Agent,
                value: "Polvo químico ABC".into(),
            })
            .unwrap();
        assert_eq!(report.extinguishers[0].agent, "Polvo químico ABC");

        assert!(report.apply(FormEdit::RemoveExtinguisher { index: 3 }).is_err());
        let report = report.apply(FormEdit::RemoveExtinguisher { index: 0 }).unwrap();
        assert!(report.extinguishers.is_empty());
    }

    #[test]
    fn test_report_serialization() {
        let report = with_wood("250");
        let json = serde_json::to_string_pretty(&report).unwrap();
        assert!(json.contains("\"schema_version\": \"0.1.0\""));
        assert!(json.contains("Madera"));

        let roundtrip: FireLoadReport = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, report);
    }

    #[test]
    fn test_form_edit_json() {
        let edit: FormEdit =
            serde_json::from_str(r#"{"edit":"SetSurface","raw":"120,5"}"#).unwrap();
        let report = FireLoadReport::default().apply(edit).unwrap();
        assert_eq!(report.sector.surface_area_m2, 120.5);
    }
}
