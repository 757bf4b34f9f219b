//! Write EQUATIONS.md from the equation registry.
//!
//! ```bash
//! cargo run --bin gen-equations
//! ```
//!
//! Run from the workspace root; the file lands in
//! `carga_core/src/equations/EQUATIONS.md`.

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use carga_core::equations::generate_equations_markdown;
use carga_core::equations::registry::ALL_EQUATIONS;

fn main() -> ExitCode {
    let markdown = generate_equations_markdown();
    let output_path = Path::new("carga_core/src/equations/EQUATIONS.md");

    match fs::write(output_path, &markdown) {
        Ok(()) => {
            println!(
                "Wrote {} equations ({} bytes) to {}",
                ALL_EQUATIONS.len(),
                markdown.len(),
                output_path.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error writing {}: {}", output_path.display(), e);
            ExitCode::FAILURE
        }
    }
}
