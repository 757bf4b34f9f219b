//! # carga_core - Fire Load Classification Engine
//!
//! `carga_core` computes the fire load ("carga de fuego") of a fire sector
//! under Ley 19.587, Decreto 351/79 Anexo VII: wood-equivalent density,
//! LEVE / COMÚN / MAYOR classification, minimum extinguisher potential,
//! occupancy and exit sizing. Inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Pure engine**: [`calculations`] never does I/O and never fails
//! - **Static tables**: regulatory data lives in [`tables`], not in branches
//! - **Coerce at the edge**: raw form text becomes numbers in [`input`]
//! - **Rich errors**: everything around the engine returns [`CalcResult`]
//!
//! ## Quick Start
//!
//! ```rust
//! use carga_core::calculations::{classify_fire_load, FireLoadClass, MaterialEntry, SectorParameters};
//!
//! let materials = vec![MaterialEntry::new("Madera").with_weight(6_000.0).with_heat(4400.0)];
//! let sector = SectorParameters {
//!     surface_area_m2: 100.0,
//!     risk_type: 3,
//!     sector_name: "Depósito".to_string(),
//!     sector_count: 1,
//! };
//!
//! let result = classify_fire_load(&materials, &sector);
//! assert_eq!(result.classification, FireLoadClass::Comun);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Fire load classification and occupancy
//! - [`equations`] - Formulas and the registry printed in report appendices
//! - [`tables`] - Potential, occupancy, extinguisher and combustible tables
//! - [`report`] - Report state and form edits
//! - [`input`] - Raw text coercion
//! - [`format`] - es-AR number formatting and result summaries
//! - [`file_io`] - `.carga` files with atomic saves and locking
//! - [`pdf`] - Typst PDF rendering
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod format;
pub mod input;
pub mod pdf;
pub mod report;
pub mod tables;

pub use calculations::{classify_report, ClassificationResult, FireLoadClass};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_report, save_report, FileLock};
pub use format::ResultSummary;
pub use pdf::render_report_pdf;
pub use report::{FireLoadReport, FormEdit, ReportMetadata, ReportSettings};
