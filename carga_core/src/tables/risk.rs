//! Risk types by combustibility (Decreto 351/79, Anexo VII, 1.5)
//!
//! Reports store the risk type as its integer code. This enum exists for
//! display; the engine works on the raw code so that out-of-range values
//! still reach the column fallback.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskType {
    NotPermitted,
    Explosive,
    Flammable,
    HighlyCombustible,
    Combustible,
    SlightlyCombustible,
    NonCombustible,
    Refractory,
}

impl RiskType {
    pub const ALL: [RiskType; 8] = [
        RiskType::NotPermitted,
        RiskType::Explosive,
        RiskType::Flammable,
        RiskType::HighlyCombustible,
        RiskType::Combustible,
        RiskType::SlightlyCombustible,
        RiskType::NonCombustible,
        RiskType::Refractory,
    ];

    /// Decode a stored risk code (0..=7)
    pub fn from_code(code: u8) -> Option<RiskType> {
        Self::ALL.get(code as usize).copied()
    }

    pub fn code(&self) -> u8 {
        match self {
            RiskType::NotPermitted => 0,
            RiskType::Explosive => 1,
            RiskType::Flammable => 2,
            RiskType::HighlyCombustible => 3,
            RiskType::Combustible => 4,
            RiskType::SlightlyCombustible => 5,
            RiskType::NonCombustible => 6,
            RiskType::Refractory => 7,
        }
    }

    /// Name as printed in the annex
    pub fn display_name(&self) -> &'static str {
        match self {
            RiskType::NotPermitted => "No permitido",
            RiskType::Explosive => "Explosivo",
            RiskType::Flammable => "Inflamable",
            RiskType::HighlyCombustible => "Muy combustible",
            RiskType::Combustible => "Combustible",
            RiskType::SlightlyCombustible => "Poco combustible",
            RiskType::NonCombustible => "Incombustible",
            RiskType::Refractory => "Refractario",
        }
    }
}

/// Display label for a raw code, including unknown ones
pub fn risk_label(code: u8) -> String {
    match RiskType::from_code(code) {
        Some(risk) => format!("Riesgo {} - {}", code, risk.display_name()),
        None => format!("Riesgo {} - desconocido", code),
    }
}
