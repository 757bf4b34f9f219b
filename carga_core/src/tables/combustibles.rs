//! Heats of combustion for common stored materials (kcal/kg)
//!
//! Operators can type any value; this list only pre-fills a new material
//! row when they pick a known material.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use serde::Serialize;

use crate::equations::fire_load::WOOD_CALORIFIC_VALUE;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Combustible {
    pub name: &'static str,
    /// Heat of combustion (kcal/kg)
    pub heat_of_combustion: f64,
}

pub static COMBUSTIBLES: &[Combustible] = &[
    Combustible { name: "Madera", heat_of_combustion: WOOD_CALORIFIC_VALUE },
    Combustible { name: "Papel", heat_of_combustion: 4000.0 },
    Combustible { name: "Cartón", heat_of_combustion: 4000.0 },
    Combustible { name: "Algodón", heat_of_combustion: 4000.0 },
    Combustible { name: "Trapos", heat_of_combustion: 4000.0 },
    Combustible { name: "PVC", heat_of_combustion: 5000.0 },
    Combustible { name: "Caucho", heat_of_combustion: 10000.0 },
    Combustible { name: "Neumáticos", heat_of_combustion: 8000.0 },
    Combustible { name: "Aceite lubricante", heat_of_combustion: 10000.0 },
    Combustible { name: "Aceite hidráulico", heat_of_combustion: 10000.0 },
    Combustible { name: "Grasa", heat_of_combustion: 9000.0 },
    Combustible { name: "Gasoil", heat_of_combustion: 10200.0 },
    Combustible { name: "Nafta", heat_of_combustion: 10500.0 },
    Combustible { name: "Kerosene", heat_of_combustion: 10300.0 },
    Combustible { name: "Petróleo crudo", heat_of_combustion: 10000.0 },
    Combustible { name: "Propano", heat_of_combustion: 11000.0 },
    Combustible { name: "Butano", heat_of_combustion: 10900.0 },
    Combustible { name: "Polietileno", heat_of_combustion: 11000.0 },
    Combustible { name: "Polipropileno", heat_of_combustion: 11000.0 },
    Combustible { name: "Pintura", heat_of_combustion: 5000.0 },
];

static BY_NAME: Lazy<HashMap<String, &'static Combustible>> = Lazy::new(|| {
    COMBUSTIBLES
        .iter()
        .map(|c| (c.name.to_lowercase(), c))
        .collect()
});

/// Case-insensitive lookup by name
pub fn find_combustible(name: &str) -> Option<&'static Combustible> {
    BY_NAME.get(&name.trim().to_lowercase()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_is_case_insensitive() {
        assert_eq!(find_combustible("gasoil").map(|c| c.heat_of_combustion), Some(10200.0));
        assert_eq!(find_combustible("  CARTÓN ").map(|c| c.name), Some("Cartón"));
    }

    #[test]
    fn test_wood_matches_reference_value() {
        assert_eq!(find_combustible("Madera").map(|c| c.heat_of_combustion), Some(4400.0));
    }

    #[test]
    fn test_unknown_material() {
        assert!(find_combustible("Unobtainium").is_none());
    }

    #[test]
    fn test_names_unique() {
        assert_eq!(BY_NAME.len(), COMBUSTIBLES.len());
    }
}
