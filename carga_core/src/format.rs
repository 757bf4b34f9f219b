//! # Presentation Formatting
//!
//! Numbers leave the engine at full precision and are rounded only here.
//! Reports use Argentine notation: `.` groups thousands, `,` marks decimals.
//!
//! [`ResultSummary`] formats a [`ClassificationResult`] once; the CLI and
//! the PDF both print from it, so they always show the same digits.
//!
//! ```rust
//! use carga_core::format::format_number;
//!
//! assert_eq!(format_number(1234567.891, 2), "1.234.567,89");
//! assert_eq!(format_number(1500.0, 0), "1.500");
//! ```

use serde::Serialize;

use crate::calculations::ClassificationResult;
use crate::tables::risk_label;

/// Format `value` with `decimals` places in es-AR notation.
///
/// Non-finite values print as "-".
pub fn format_number(value: f64, decimals: u8) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }

    let fixed = format!("{:.*}", usize::from(decimals), value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    let mut out = String::new();
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push(',');
        out.push_str(frac);
    }
    out
}

/// Whole count with thousands grouping
pub fn format_count(value: u32) -> String {
    format_number(f64::from(value), 0)
}

/// Width in metres, always two decimals
pub fn format_meters(value: f64) -> String {
    format!("{} m", format_number(value, 2))
}

/// Pre-formatted view of a classification result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultSummary {
    pub total_weight_kg: String,
    pub total_calories_kcal: String,
    pub wood_equivalent_kg: String,
    pub fire_load_density: String,
    pub total_fire_load_density: String,
    pub classification: String,
    pub risk: String,
    pub required_potential_class_a: String,
    pub required_potential_class_b: String,
    pub suggested_extinguisher_count: String,
    pub occupancy_factor: String,
    pub occupancy_factor_with_clearance: String,
    pub required_exit_units: String,
    pub required_exit_width: String,
    pub declared_exit_width: String,
    pub egress_sufficient: bool,
}

impl ResultSummary {
    /// Format `result`. `risk_type` is the raw code from the sector, shown
    /// next to the column it resolved to.
    pub fn new(result: &ClassificationResult, risk_type: u8, decimals: u8) -> Self {
        let fire = &result.fire_load;
        let egress = &result.egress;

        let risk = if usize::from(risk_type) == fire.risk_column {
            risk_label(risk_type)
        } else {
            format!("{} (columna {})", risk_label(risk_type), fire.risk_column)
        };

        ResultSummary {
            total_weight_kg: format_number(fire.total_weight_kg, decimals),
            total_calories_kcal: format_number(fire.total_calories_kcal, 0),
            wood_equivalent_kg: format_number(fire.wood_equivalent_kg, decimals),
            fire_load_density: format_number(fire.fire_load_density, decimals),
            total_fire_load_density: format_number(fire.total_fire_load_density, decimals),
            classification: fire.classification.label().to_string(),
            risk,
            required_potential_class_a: fire.required_potential_class_a.clone(),
            required_potential_class_b: fire.required_potential_class_b.clone(),
            suggested_extinguisher_count: format_count(fire.suggested_extinguisher_count),
            occupancy_factor: format_count(result.occupancy_factor),
            occupancy_factor_with_clearance: format_count(result.occupancy_factor_with_clearance),
            required_exit_units: format_count(egress.required_exit_units),
            required_exit_width: format_meters(egress.required_width_m),
            declared_exit_width: format_meters(egress.declared_width_m),
            egress_sufficient: egress.sufficient,
        }
    }

    /// Label/value pairs in report order
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Peso total", format!("{} kg", self.total_weight_kg)),
            ("Calorías totales", format!("{} kcal", self.total_calories_kcal)),
            ("Peso equivalente en madera", format!("{} kg", self.wood_equivalent_kg)),
            ("Carga de fuego", format!("{} kg/m²", self.fire_load_density)),
            ("Carga de fuego total", format!("{} kg/m²", self.total_fire_load_density)),
            ("Clasificación", self.classification.clone()),
            ("Riesgo", self.risk.clone()),
            ("Potencial extintor clase A", self.required_potential_class_a.clone()),
            ("Potencial extintor clase B", self.required_potential_class_b.clone()),
            ("Matafuegos sugeridos", self.suggested_extinguisher_count.clone()),
            ("Factor de ocupación", format!("{} personas", self.occupancy_factor)),
            (
                "Factor de ocupación con despeje",
                format!("{} personas", self.occupancy_factor_with_clearance),
            ),
            ("Unidades de ancho de salida", self.required_exit_units.clone()),
            ("Ancho de salida requerido", self.required_exit_width.clone()),
            (
                "Ancho de salida declarado",
                format!(
                    "{} ({})",
                    self.declared_exit_width,
                    if self.egress_sufficient { "suficiente" } else { "insuficiente" }
                ),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{classify_report, MaterialEntry, OccupancyParameters, SectorParameters};

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0, 2), "0,00");
        assert_eq!(format_number(999.0, 0), "999");
        assert_eq!(format_number(1000.0, 0), "1.000");
        assert_eq!(format_number(440_000.0, 0), "440.000");
        assert_eq!(format_number(12.345, 1), "12,3");
        assert_eq!(format_number(-1500.25, 2), "-1.500,25");
        assert_eq!(format_number(-0.001, 2), "0,00");
        assert_eq!(format_number(f64::NAN, 2), "-");
    }

    #[test]
    fn test_format_helpers() {
        assert_eq!(format_count(12_000), "12.000");
        assert_eq!(format_meters(1.1), "1,10 m");
    }

    #[test]
    fn test_summary_digits() {
        let materials = vec![MaterialEntry::new("Madera").with_weight(100.0).with_heat(4400.0)];
        let sector = SectorParameters {
            surface_area_m2: 300.0,
            risk_type: 7,
            sector_name: "Depósito".into(),
            sector_count: 1,
        };
        let result = classify_report(&materials, &sector, &OccupancyParameters::default());
        let summary = ResultSummary::new(&result, sector.risk_type, 2);

        assert_eq!(summary.total_calories_kcal, "440.000");
        assert_eq!(summary.wood_equivalent_kg, "100,00");
        assert_eq!(summary.fire_load_density, "0,33");
        assert_eq!(summary.classification, "LEVE");
        assert_eq!(summary.suggested_extinguisher_count, "2");
        assert_eq!(summary.risk, "Riesgo 7 - Refractario (columna 3)");
        assert_eq!(summary.occupancy_factor, "19");
        assert!(!summary.egress_sufficient);
        assert_eq!(summary.rows().len(), 15);
    }
}
