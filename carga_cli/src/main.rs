//! # Carga de Fuego CLI
//!
//! Command-line front end for `.carga` fire load reports.
//!
//! ```text
//! carga init deposito.carga --company "ACME" --operator "J. Pérez"
//! carga sector deposito.carga --name "Depósito" --surface 120 --risk 3
//! carga add deposito.carga Gasoil --weight 850
//! carga summary deposito.carga
//! carga summary deposito.carga --json
//! carga pdf deposito.carga -o deposito.pdf
//! carga tables
//! ```
//!
//! Logging goes to stderr. `-v` raises verbosity, `--quiet` keeps only
//! errors, and `CARGA_LOG` (an `EnvFilter` directive) overrides both.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use carga_core::file_io::{load_report, load_report_with_lock_check, save_report, FileLock, REPORT_EXTENSION};
use carga_core::format::ResultSummary;
use carga_core::input::{parse_count_strict, parse_f64_strict, MAX_RISK_TYPE};
use carga_core::pdf::render_report_pdf;
use carga_core::report::{FireLoadReport, FormEdit};
use carga_core::tables::{RiskType, CLASS_A, CLASS_B, COMBUSTIBLES, EXTINGUISHER_CATALOG, OCCUPANCY_USES};
use carga_core::{CalcError, CalcResult};

/// Environment variable holding a tracing filter directive
const LOG_ENV: &str = "CARGA_LOG";

/// Exit code when the report is locked by someone else (EX_TEMPFAIL)
const EXIT_LOCKED: u8 = 75;

#[derive(Debug, Parser)]
#[command(name = "carga", version, about = "Fire load studies under Decreto 351/79 Anexo VII")]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Machine-readable output (results and errors as JSON)
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write an empty report
    Init {
        path: PathBuf,
        #[arg(long, default_value = "")]
        company: String,
        #[arg(long, default_value = "")]
        operator: String,
        #[arg(long, default_value = "")]
        location: String,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Set sector data; omitted options keep their value
    Sector {
        path: PathBuf,
        #[arg(long)]
        name: Option<String>,
        /// Surface in m² ("120" or "120,5")
        #[arg(long)]
        surface: Option<String>,
        /// Risk type 1-7 (0 = not permitted)
        #[arg(long)]
        risk: Option<String>,
        /// Number of identical sectors
        #[arg(long)]
        count: Option<String>,
    },
    /// Append a material row
    Add {
        path: PathBuf,
        name: String,
        /// Stored weight in kg
        #[arg(long)]
        weight: String,
        /// Heat of combustion in kcal/kg (looked up by name when omitted)
        #[arg(long)]
        heat: Option<String>,
    },
    /// Classify a report and print the results
    Summary { path: PathBuf },
    /// Render a report to PDF
    Pdf {
        path: PathBuf,
        /// Output file (defaults to the report path with a .pdf extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the regulatory reference tables
    Tables,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    debug!(?cli, "parsed arguments");

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e, cli.json);
            if e.is_recoverable() {
                ExitCode::from(EXIT_LOCKED)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn default_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level(verbose, quiet)));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn report_error(error: &CalcError, json: bool) {
    if json {
        let body = serde_json::json!({
            "code": error.error_code(),
            "message": error.to_string(),
            "error": error,
        });
        match serde_json::to_string_pretty(&body) {
            Ok(text) => eprintln!("{}", text),
            Err(_) => eprintln!("Error: {}", error),
        }
    } else {
        eprintln!("Error [{}]: {}", error.error_code(), error);
    }
}

fn run(cli: &Cli) -> CalcResult<()> {
    match &cli.command {
        Command::Init { path, company, operator, location, force } => {
            init_report(path, company, operator, location, *force)
        }
        Command::Sector { path, name, surface, risk, count } => {
            edit_sector(path, name.as_deref(), surface.as_deref(), risk.as_deref(), count.as_deref())
        }
        Command::Add { path, name, weight, heat } => add_material(path, name, weight, heat.as_deref()),
        Command::Summary { path } => print_summary(path, cli.json),
        Command::Pdf { path, output } => write_pdf(path, output.as_deref()),
        Command::Tables => {
            print_tables(cli.json)?;
            Ok(())
        }
    }
}

fn init_report(path: &Path, company: &str, operator: &str, location: &str, force: bool) -> CalcResult<()> {
    if path.exists() && !force {
        return Err(CalcError::file_error(
            "init",
            path.display().to_string(),
            "File already exists (use --force to overwrite)",
        ));
    }
    if path.extension().map_or(true, |ext| ext != REPORT_EXTENSION) {
        info!(path = %path.display(), "report files normally use the .{} extension", REPORT_EXTENSION);
    }

    let _lock = FileLock::acquire(path, current_user())?;
    let report = FireLoadReport::new(company, operator, location);
    save_report(&report, path)?;
    println!("Created {}", path.display());
    Ok(())
}

/// Load, apply `edits` under the file lock, save
fn edit_report(path: &Path, edits: Vec<FormEdit>) -> CalcResult<FireLoadReport> {
    let _lock = FileLock::acquire(path, current_user())?;
    let mut report = load_report(path)?;
    for edit in edits {
        report = report.apply(edit)?;
    }
    save_report(&report, path)?;
    Ok(report)
}

fn edit_sector(
    path: &Path,
    name: Option<&str>,
    surface: Option<&str>,
    risk: Option<&str>,
    count: Option<&str>,
) -> CalcResult<()> {
    let mut edits = Vec::new();
    if let Some(name) = name {
        edits.push(FormEdit::SetSectorName { name: name.to_string() });
    }
    if let Some(raw) = surface {
        let value = parse_f64_strict("surface", raw)?;
        edits.push(FormEdit::SetSurface { raw: value.to_string() });
    }
    if let Some(raw) = risk {
        let value = parse_count_strict("risk", raw, 0)?;
        if value > u32::from(MAX_RISK_TYPE) {
            return Err(CalcError::invalid_input("risk", raw, format!("Must be between 0 and {}", MAX_RISK_TYPE)));
        }
        edits.push(FormEdit::SetRiskType { raw: value.to_string() });
    }
    if let Some(raw) = count {
        let value = parse_count_strict("count", raw, 1)?;
        edits.push(FormEdit::SetSectorCount { raw: value.to_string() });
    }
    if edits.is_empty() {
        return Err(CalcError::missing_field("--name, --surface, --risk or --count"));
    }

    let report = edit_report(path, edits)?;
    info!(path = %path.display(), sector = %report.sector.sector_name, "sector updated");
    Ok(())
}

fn add_material(path: &Path, name: &str, weight: &str, heat: Option<&str>) -> CalcResult<()> {
    let weight = parse_f64_strict("weight", weight)?;
    let heat = heat.map(|raw| parse_f64_strict("heat", raw)).transpose()?;

    let _lock = FileLock::acquire(path, current_user())?;
    let report = load_report(path)?;
    let mut next = match heat {
        None => report.apply(FormEdit::AddMaterialFromCatalog { name: name.to_string() })?,
        Some(_) => report.apply(FormEdit::AddMaterial)?,
    };
    let id = next
        .materials
        .last()
        .map(|m| m.id)
        .ok_or_else(|| CalcError::Internal { message: "material row was not added".to_string() })?;

    if let Some(heat) = heat {
        next = next
            .apply(FormEdit::SetMaterialName { id, name: name.to_string() })?
            .apply(FormEdit::SetMaterialHeat { id, raw: heat.to_string() })?;
    }
    next = next.apply(FormEdit::SetMaterialWeight { id, raw: weight.to_string() })?;

    save_report(&next, path)?;
    println!("Added row {} ({}) to {}", next.materials.len(), name, path.display());
    Ok(())
}

fn print_summary(path: &Path, json: bool) -> CalcResult<()> {
    let (report, lock) = load_report_with_lock_check(path)?;
    let result = report.results();

    if json {
        let body = serde_json::json!({
            "meta": report.meta,
            "sector": report.sector,
            "results": result,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    let summary = ResultSummary::new(&result, report.sector.risk_type, report.settings.decimals);
    let title = if report.sector.sector_name.is_empty() {
        "(sector sin nombre)"
    } else {
        report.sector.sector_name.as_str()
    };

    println!("═══════════════════════════════════════════════");
    println!("  CARGA DE FUEGO - {}", title);
    println!("═══════════════════════════════════════════════");
    println!("  Empresa:   {}", report.meta.company);
    println!("  Relevó:    {}", report.meta.operator);
    println!("  Ubicación: {}", report.meta.location);
    if let Some(holder) = lock {
        println!("  (en edición por {})", holder.holder());
    }
    println!();
    println!("Materiales:");
    if report.materials.is_empty() {
        println!("  (ninguno)");
    }
    for (i, material) in report.materials.iter().enumerate() {
        println!(
            "  {:>2}. {:<24} {:>12} kg  x {:>8} kcal/kg",
            i + 1,
            material.name,
            carga_core::format::format_number(material.weight_kg, report.settings.decimals),
            carga_core::format::format_number(material.heat_of_combustion, 0),
        );
    }
    println!();
    println!("Resultados:");
    for (label, value) in summary.rows() {
        println!("  {:<34} {}", label, value);
    }
    println!("═══════════════════════════════════════════════");
    Ok(())
}

fn write_pdf(path: &Path, output: Option<&Path>) -> CalcResult<()> {
    let report = load_report(path)?;
    let output = output.map(Path::to_path_buf).unwrap_or_else(|| path.with_extension("pdf"));

    let bytes = render_report_pdf(&report)?;
    fs::write(&output, &bytes)
        .map_err(|e| CalcError::file_error("write pdf", output.display().to_string(), e.to_string()))?;

    info!(path = %output.display(), bytes = bytes.len(), "pdf written");
    println!("Wrote {}", output.display());
    Ok(())
}

fn print_tables(json: bool) -> CalcResult<()> {
    if json {
        let body = serde_json::json!({
            "class_a": CLASS_A.rows.iter().map(|r| (r.bracket, r.cells)).collect::<Vec<_>>(),
            "class_b": CLASS_B.rows.iter().map(|r| (r.bracket, r.cells)).collect::<Vec<_>>(),
            "occupancy_uses": OCCUPANCY_USES,
            "extinguishers": EXTINGUISHER_CATALOG,
            "combustibles": COMBUSTIBLES,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    for table in [&CLASS_A, &CLASS_B] {
        println!("Potencial extintor mínimo - {}", table.fire_class.display_name());
        println!("  {:<20} {:>12} {:>12} {:>12} {:>12} {:>12}", "Carga de fuego", "R1", "R2", "R3", "R4", "R5");
        for row in table.rows.iter() {
            print!("  {:<20}", row.bracket);
            for cell in row.cells {
                print!(" {:>12}", cell);
            }
            println!();
        }
        println!();
    }

    println!("Tipos de riesgo");
    for risk in RiskType::ALL {
        println!("  {} {}", risk.code(), risk.display_name());
    }
    println!();

    println!("Factor de ocupación");
    for (i, entry) in OCCUPANCY_USES.iter().enumerate() {
        println!("  {:>2}. {:<50} {:>6} m²/persona", i, entry.description, entry.m2_per_person);
    }
    println!();

    println!("Matafuegos de referencia");
    for spec in EXTINGUISHER_CATALOG {
        println!("  {:<22} {:<16} {}", spec.agent, spec.weight_or_volume, spec.rating);
    }
    println!();

    println!("Poder calorífico (kcal/kg)");
    for combustible in COMBUSTIBLES {
        println!("  {:<22} {:>8}", combustible.name, combustible.heat_of_combustion);
    }
    Ok(())
}

fn current_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["carga", "summary", "a.carga", "--json", "-vv"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Summary { .. }));
    }

    #[test]
    fn test_pdf_output_flag() {
        let cli = Cli::try_parse_from(["carga", "pdf", "a.carga", "-o", "b.pdf"]).unwrap();
        match cli.command {
            Command::Pdf { output, .. } => assert_eq!(output, Some(PathBuf::from("b.pdf"))),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["carga", "-q", "-v", "tables"]).is_err());
    }

    #[test]
    fn test_default_level() {
        assert_eq!(default_level(0, false), "warn");
        assert_eq!(default_level(1, false), "info");
        assert_eq!(default_level(5, false), "trace");
        assert_eq!(default_level(0, true), "error");
    }

    #[test]
    fn test_sector_and_add_edit_the_file() {
        let path = std::env::temp_dir().join(format!("carga_cli_edit_{}.carga", std::process::id()));
        init_report(&path, "ACME", "Op", "Base", true).unwrap();

        edit_sector(&path, Some("Depósito"), Some("100"), Some("3"), Some("2")).unwrap();
        add_material(&path, "Gasoil", "400", None).unwrap();
        add_material(&path, "Pallets", "272,7", Some("4400")).unwrap();

        let report = load_report(&path).unwrap();
        assert_eq!(report.sector.sector_name, "Depósito");
        assert_eq!(report.sector.sector_count, 2);
        assert_eq!(report.materials.len(), 2);
        assert_eq!(report.materials[0].heat_of_combustion, 10200.0);
        assert_eq!(report.materials[1].name, "Pallets");
        assert_eq!(report.materials[1].weight_kg, 272.7);

        assert_eq!(
            edit_sector(&path, None, None, Some("9"), None).unwrap_err().error_code(),
            "INVALID_INPUT"
        );
        assert_eq!(
            add_material(&path, "Gasoil", "mucho", None).unwrap_err().error_code(),
            "INVALID_INPUT"
        );
        assert_eq!(
            add_material(&path, "Unobtainium", "1", None).unwrap_err().error_code(),
            "MATERIAL_NOT_FOUND"
        );
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let path = std::env::temp_dir().join(format!("carga_cli_init_{}.carga", std::process::id()));
        init_report(&path, "ACME", "Op", "Base", false).unwrap();
        let err = init_report(&path, "ACME", "Op", "Base", false).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
        init_report(&path, "ACME", "Op", "Base", true).unwrap();

        let loaded = load_report(&path).unwrap();
        assert_eq!(loaded.meta.company, "ACME");
        let _ = fs::remove_file(&path);
    }
}
