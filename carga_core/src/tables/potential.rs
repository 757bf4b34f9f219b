//! Extinguisher potential tables (Decreto 351/79, Anexo VII, 4.1 and 4.2)
//!
//! Rows are fire load density brackets, columns are risk types 1 through 5.
//! The tables are plain data; picking the row and column is the engine's job
//! (see [`crate::equations::fire_load`]).

use serde::{Deserialize, Serialize};

/// Cell value meaning the risk type does not need this fire class covered
pub const NOT_APPLICABLE: &str = "--";

/// Cell value meaning the potential must be assessed case by case
pub const TO_BE_DETERMINED: &str = "A determinar";

/// Number of density brackets (rows) in each table
pub const ROW_COUNT: usize = 5;

/// Number of risk columns in each table (risk types 1..=5)
pub const COLUMN_COUNT: usize = 5;

/// Fire class covered by a potential table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FireClass {
    /// Ordinary solid combustibles
    A,
    /// Flammable liquids and gases
    B,
}

impl FireClass {
    pub fn display_name(&self) -> &'static str {
        match self {
            FireClass::A => "Clase A",
            FireClass::B => "Clase B",
        }
    }
}

/// One density bracket of a potential table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PotentialRow {
    /// Bracket label as printed in the annex (e.g. "16 a 30 kg/m²")
    pub bracket: &'static str,
    /// Cells for risk columns 1..=5
    pub cells: [&'static str; COLUMN_COUNT],
}

/// A regulatory potential table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PotentialTable {
    pub fire_class: FireClass,
    pub rows: [PotentialRow; ROW_COUNT],
}

impl PotentialTable {
    /// Cell at `row` (0-based) and risk `column` (1-based, as in the annex).
    ///
    /// Returns `None` when either index falls outside the table.
    pub fn cell(&self, row: usize, column: usize) -> Option<&'static str> {
        if column == 0 {
            return None;
        }
        self.rows.get(row)?.cells.get(column - 1).copied()
    }

    /// Bracket labels in row order
    pub fn brackets(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rows.iter().map(|r| r.bracket)
    }
}

const BEYOND_TABLE: PotentialRow = PotentialRow {
    bracket: "más de 100 kg/m²",
    cells: [TO_BE_DETERMINED; COLUMN_COUNT],
};

/// Table 1: potential required for Class A fires
pub static CLASS_A: PotentialTable = PotentialTable {
    fire_class: FireClass::A,
    rows: [
        PotentialRow { bracket: "hasta 15 kg/m²", cells: ["--", "--", "1A", "1A", "1A"] },
        PotentialRow { bracket: "16 a 30 kg/m²", cells: ["--", "--", "2A", "1A", "1A"] },
        PotentialRow { bracket: "31 a 60 kg/m²", cells: ["--", "--", "3A", "2A", "1A"] },
        PotentialRow { bracket: "61 a 100 kg/m²", cells: ["--", "--", "6A", "4A", "3A"] },
        BEYOND_TABLE,
    ],
};

/// Table 2: potential required for Class B fires
pub static CLASS_B: PotentialTable = PotentialTable {
    fire_class: FireClass::B,
    rows: [
        PotentialRow { bracket: "hasta 15 kg/m²", cells: ["--", "6B", "4B", "--", "--"] },
        PotentialRow { bracket: "16 a 30 kg/m²", cells: ["--", "8B", "6B", "--", "--"] },
        PotentialRow { bracket: "31 a 60 kg/m²", cells: ["--", "10B", "8B", "--", "--"] },
        PotentialRow { bracket: "61 a 100 kg/m²", cells: ["--", "20B", "10B", "--", "--"] },
        BEYOND_TABLE,
    ],
};

/// Table for a fire class
pub fn table_for(fire_class: FireClass) -> &'static PotentialTable {
    match fire_class {
        FireClass::A => &CLASS_A,
        FireClass::B => &CLASS_B,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_row_is_always_to_be_determined() {
        for table in [&CLASS_A, &CLASS_B] {
            for column in 1..=COLUMN_COUNT {
                assert_eq!(table.cell(4, column), Some(TO_BE_DETERMINED));
            }
        }
    }

    #[test]
    fn test_cell_is_one_based_on_columns() {
        assert_eq!(CLASS_A.cell(2, 3), Some("3A"));
        assert_eq!(CLASS_B.cell(3, 2), Some("20B"));
        assert_eq!(CLASS_B.cell(0, 1), Some(NOT_APPLICABLE));
    }

    #[test]
    fn test_cell_out_of_range() {
        assert_eq!(CLASS_A.cell(5, 1), None);
        assert_eq!(CLASS_A.cell(0, 0), None);
        assert_eq!(CLASS_A.cell(0, 6), None);
    }

    #[test]
    fn test_table_for() {
        assert_eq!(table_for(FireClass::A).fire_class, FireClass::A);
        assert_eq!(table_for(FireClass::B).brackets().count(), ROW_COUNT);
    }
}
