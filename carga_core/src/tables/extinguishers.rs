//! Portable extinguisher catalog
//!
//! Typical certified ratings by agent and charge, printed in the report as
//! a reference next to the operator's own selection. Nothing is computed
//! from this table.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExtinguisherSpec {
    pub agent: &'static str,
    /// Charge as labelled on the unit ("5 kg", "10 L")
    pub weight_or_volume: &'static str,
    pub rating: &'static str,
}

pub static EXTINGUISHER_CATALOG: &[ExtinguisherSpec] = &[
    ExtinguisherSpec { agent: "Polvo químico ABC", weight_or_volume: "1 kg", rating: "1A 5BC" },
    ExtinguisherSpec { agent: "Polvo químico ABC", weight_or_volume: "2,5 kg", rating: "2A 10BC" },
    ExtinguisherSpec { agent: "Polvo químico ABC", weight_or_volume: "5 kg", rating: "3A 40BC" },
    ExtinguisherSpec { agent: "Polvo químico ABC", weight_or_volume: "10 kg", rating: "6A 60BC" },
    ExtinguisherSpec { agent: "Polvo químico ABC", weight_or_volume: "50 kg (rodante)", rating: "10A 120BC" },
    ExtinguisherSpec { agent: "Dióxido de carbono", weight_or_volume: "3,5 kg", rating: "5BC" },
    ExtinguisherSpec { agent: "Dióxido de carbono", weight_or_volume: "5 kg", rating: "10BC" },
    ExtinguisherSpec { agent: "Dióxido de carbono", weight_or_volume: "10 kg", rating: "10BC" },
    ExtinguisherSpec { agent: "Agua presurizada", weight_or_volume: "10 L", rating: "2A" },
    ExtinguisherSpec { agent: "Espuma AFFF", weight_or_volume: "10 L", rating: "2A 20B" },
    ExtinguisherSpec { agent: "HCFC 123", weight_or_volume: "5 kg", rating: "1A 10BC" },
];

/// Catalog entries for one agent (exact match)
pub fn by_agent(agent: &str) -> impl Iterator<Item = &'static ExtinguisherSpec> + '_ {
    EXTINGUISHER_CATALOG.iter().filter(move |spec| spec.agent == agent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_agent() {
        assert_eq!(by_agent("Dióxido de carbono").count(), 3);
        assert_eq!(by_agent("Halon 1211").count(), 0);
    }
}
