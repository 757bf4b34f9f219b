//! # PDF Generation
//!
//! Renders a fire load report to PDF with an in-process Typst compiler.
//!
//! - The document is a Typst source assembled with `format!`
//! - All numbers come from [`ResultSummary`], the same strings the CLI prints
//! - Output is raw PDF bytes (`Vec<u8>`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use carga_core::pdf::render_report_pdf;
//! use carga_core::report::FireLoadReport;
//!
//! let report = FireLoadReport::new("ACME", "J. Pérez", "Añelo");
//! let bytes = render_report_pdf(&report)?;
//! std::fs::write("carga-de-fuego.pdf", bytes).unwrap();
//! # Ok::<(), carga_core::errors::CalcError>(())
//! ```

use chrono::{Datelike, Utc};
use once_cell::sync::Lazy;
use tracing::{debug, info};
use typst::diag::{FileError, FileResult, SourceDiagnostic};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::calculations::{ClassificationResult, FireLoadClass};
use crate::equations::registry::{Equation, EquationTracker};
use crate::errors::{CalcError, CalcResult};
use crate::format::{format_number, ResultSummary};
use crate::report::FireLoadReport;
use crate::tables::{FireClass, PotentialTable, CLASS_A, CLASS_B, OCCUPANCY_USES};

// ============================================================================
// Typst World Implementation
// ============================================================================

/// Fonts bundled with typst-assets, parsed once per process
static FONTS: Lazy<(FontBook, Vec<Font>)> = Lazy::new(|| {
    let fonts: Vec<Font> = typst_assets::fonts()
        .flat_map(|data| Font::iter(Bytes::new(data)))
        .collect();
    debug!(count = fonts.len(), "loaded bundled fonts");
    (FontBook::from_fonts(&fonts), fonts)
});

/// Single-file Typst world; no file system access.
struct PdfWorld {
    main: Source,
    book: LazyHash<FontBook>,
    fonts: Vec<Font>,
    library: LazyHash<Library>,
}

impl PdfWorld {
    fn new(source: String) -> Self {
        let (book, fonts) = &*FONTS;
        PdfWorld {
            main: Source::detached(source),
            book: LazyHash::new(book.clone()),
            fonts: fonts.clone(),
            library: LazyHash::new(Library::default()),
        }
    }
}

impl World for PdfWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.fonts.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Utc::now();
        Datetime::from_ymd(now.year(), now.month() as u8, now.day() as u8)
    }
}

// ============================================================================
// Report Rendering
// ============================================================================

const HIGHLIGHT: &str = r##"rgb("#ffe08a")"##;

/// Render `report` to PDF bytes.
///
/// Results are recomputed from the report inputs; nothing cached in the
/// file is trusted.
pub fn render_report_pdf(report: &FireLoadReport) -> CalcResult<Vec<u8>> {
    let result = report.results();
    let source = build_report_source(report, &result);
    debug!(bytes = source.len(), "typst source assembled");

    let bytes = compile_pdf(source)?;
    info!(
        sector = %report.sector.sector_name,
        classification = %result.classification(),
        bytes = bytes.len(),
        "report pdf rendered"
    );
    Ok(bytes)
}

fn compile_pdf(source: String) -> CalcResult<Vec<u8>> {
    let world = PdfWorld::new(source);
    let warned = typst::compile(&world);

    let document = warned
        .output
        .map_err(|errors| CalcError::render_failed("compile", join_diagnostics(&errors)))?;

    typst_pdf::pdf(&document, &PdfOptions::default())
        .map_err(|errors| CalcError::render_failed("export", join_diagnostics(&errors)))
}

fn join_diagnostics(errors: &[SourceDiagnostic]) -> String {
    errors
        .iter()
        .map(|e| e.message.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Complete Typst source for a report
fn build_report_source(report: &FireLoadReport, result: &ClassificationResult) -> String {
    let decimals = report.settings.decimals;
    let summary = ResultSummary::new(result, report.sector.risk_type, decimals);
    let date = Utc::now().format("%d/%m/%Y").to_string();

    let mut source = format!(
        r##"
#set page(
  paper: "{paper}",
  margin: (top: 2cm, bottom: 2cm, left: 2cm, right: 2cm),
  header: align(right)[
    #text(size: 8pt, fill: gray)[{regulation}]
  ],
  footer: context [
    #line(length: 100%, stroke: 0.5pt + gray)
    #v(4pt)
    #grid(
      columns: (1fr, 1fr, 1fr),
      align(left)[#text(size: 8pt)[{company}]],
      align(center)[#text(size: 8pt)[Página #counter(page).display()]],
      align(right)[#text(size: 8pt)[{date}]],
    )
  ]
)

#set text(font: "Libertinus Serif", size: 10pt, lang: "es")

#align(center)[
  #block(width: 100%, fill: rgb("#f0f0f0"), inset: 12pt, radius: 4pt)[
    #text(size: 18pt, weight: "bold")[Estudio de Carga de Fuego]
    #v(4pt)
    #text(size: 13pt)[{sector_name}]
  ]
]

#v(10pt)

#table(
  columns: (auto, 1fr),
  stroke: none,
  row-gutter: 3pt,
  [*Empresa:*], [{company}],
  [*Relevó:*], [{operator}],
  [*Ubicación:*], [{location}],
  [*Fecha:*], [{date}],
)

== Materiales almacenados

{materials}

== Datos del sector

#table(
  columns: (1fr, auto),
  inset: 6pt,
  stroke: 0.5pt,
  align: (left, right),
  [Superficie], [{surface} m²],
  [Tipo de riesgo], [{risk}],
  [Sectores de incendio], [{sector_count}],
)

== Resultados

#table(
  columns: (1fr, auto),
  inset: 6pt,
  stroke: 0.5pt,
  align: (left, right),
{result_rows}
)

#v(10pt)

#align(center)[
  #block(width: auto, fill: {banner_color}, inset: 14pt, radius: 4pt)[
    #text(size: 15pt, weight: "bold")[CARGA DE FUEGO {classification}]
    #v(4pt)
    #text(size: 11pt)[Potencial mínimo: {class_a} (clase A) / {class_b} (clase B)]
  ]
]

== Matafuegos seleccionados

{extinguishers}
"##,
        paper = report.settings.paper.typst_name(),
        regulation = escape_typst(&report.settings.regulation),
        company = escape_typst(&report.meta.company),
        operator = escape_typst(&report.meta.operator),
        location = escape_typst(&report.meta.location),
        date = date,
        sector_name = escape_typst(&report.sector.sector_name),
        materials = build_materials_table(report, decimals),
        surface = escape_typst(&format_number(report.sector.surface_area_m2, decimals)),
        risk = escape_typst(&summary.risk),
        sector_count = report.sector.sector_count,
        result_rows = build_result_rows(&summary),
        banner_color = banner_color(result.classification()),
        classification = summary.classification,
        class_a = escape_typst(&summary.required_potential_class_a),
        class_b = escape_typst(&summary.required_potential_class_b),
        extinguishers = build_extinguisher_table(report),
    );

    source.push_str("\n#pagebreak()\n\n== Tablas de referencia\n\n");
    for table in [&CLASS_A, &CLASS_B] {
        source.push_str(&build_potential_excerpt(table, result.fire_load.potential_row, result.fire_load.risk_column));
    }
    source.push_str(&build_occupancy_excerpt(report));

    source.push_str(&equations_applied(report).generate_appendix_typst());
    source
}

fn banner_color(class: FireLoadClass) -> &'static str {
    match class {
        FireLoadClass::Leve => r##"rgb("#d4edda")"##,
        FireLoadClass::Comun => r##"rgb("#fff3cd")"##,
        FireLoadClass::Mayor => r##"rgb("#f8d7da")"##,
    }
}

fn build_materials_table(report: &FireLoadReport, decimals: u8) -> String {
    if report.materials.is_empty() {
        return "#text(style: \"italic\")[Sin materiales cargados.]\n".to_string();
    }

    let mut out = String::from(
        "#table(\n  columns: (auto, 1fr, auto, auto, auto),\n  inset: 6pt,\n  stroke: 0.5pt,\n  align: (center, left, right, right, right),\n  table.header([*N°*], [*Material*], [*Peso (kg)*], [*Poder calorífico (kcal/kg)*], [*Calorías (kcal)*]),\n",
    );
    for (i, material) in report.materials.iter().enumerate() {
        out.push_str(&format!(
            "  [{}], [{}], [{}], [{}], [{}],\n",
            i + 1,
            escape_typst(&material.name),
            escape_typst(&format_number(material.weight_kg, decimals)),
            escape_typst(&format_number(material.heat_of_combustion, 0)),
            escape_typst(&format_number(material.calories(), 0)),
        ));
    }
    out.push_str(")\n");
    out
}

fn build_result_rows(summary: &ResultSummary) -> String {
    summary
        .rows()
        .into_iter()
        .map(|(label, value)| format!("  [{}], [{}],", label, escape_typst(&value)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn build_extinguisher_table(report: &FireLoadReport) -> String {
    if report.extinguishers.is_empty() {
        return "#text(style: \"italic\")[Sin matafuegos declarados.]\n".to_string();
    }

    let mut out = String::from(
        "#table(\n  columns: (auto, 1fr, auto, 1fr, auto, auto),\n  inset: 6pt,\n  stroke: 0.5pt,\n  table.header([*Cant.*], [*Marca*], [*Capacidad*], [*Agente*], [*Potencial certificado*], [*Potencial requerido*]),\n",
    );
    for row in &report.extinguishers {
        out.push_str(&format!(
            "  [{}], [{}], [{}], [{}], [{}], [{}],\n",
            escape_typst(&row.quantity),
            escape_typst(&row.brand),
            escape_typst(&row.capacity),
            escape_typst(&row.agent),
            escape_typst(&row.certified_potential),
            escape_typst(&row.required_potential),
        ));
    }
    out.push_str(")\n");
    out
}

/// Potential table with the applied cell highlighted
fn build_potential_excerpt(table: &PotentialTable, row: usize, column: usize) -> String {
    let title = match table.fire_class {
        FireClass::A => "Potencial extintor mínimo - fuegos clase A",
        FireClass::B => "Potencial extintor mínimo - fuegos clase B",
    };

    let mut out = format!(
        "=== {}\n\n#table(\n  columns: (1fr, auto, auto, auto, auto, auto),\n  inset: 5pt,\n  stroke: 0.5pt,\n  align: center,\n  table.header([*Carga de fuego*], [*R1*], [*R2*], [*R3*], [*R4*], [*R5*]),\n",
        title
    );
    for (r, potential_row) in table.rows.iter().enumerate() {
        let bracket = escape_typst(potential_row.bracket);
        if r == row {
            out.push_str(&format!("  [*{}*],", bracket));
        } else {
            out.push_str(&format!("  [{}],", bracket));
        }
        for (c, cell) in potential_row.cells.iter().enumerate() {
            let cell = escape_typst(cell);
            if r == row && c + 1 == column {
                out.push_str(&format!(" table.cell(fill: {})[*{}*],", HIGHLIGHT, cell));
            } else {
                out.push_str(&format!(" [{}],", cell));
            }
        }
        out.push('\n');
    }
    out.push_str(")\n\n");
    out
}

/// Occupancy table with the selected use highlighted
fn build_occupancy_excerpt(report: &FireLoadReport) -> String {
    let selected = report
        .occupancy
        .selected_use()
        .and(report.occupancy.selected_use_index);

    let mut out = String::from(
        "=== Factor de ocupación\n\n#table(\n  columns: (1fr, auto),\n  inset: 5pt,\n  stroke: 0.5pt,\n  align: (left, right),\n  table.header([*Uso*], [*m² por persona*]),\n",
    );
    for (i, entry) in OCCUPANCY_USES.iter().enumerate() {
        let description = escape_typst(entry.description);
        let m2 = escape_typst(&format_number(entry.m2_per_person, 1));
        if selected == Some(i) {
            out.push_str(&format!(
                "  table.cell(fill: {hl})[*{d}*], table.cell(fill: {hl})[*{m}*],\n",
                hl = HIGHLIGHT,
                d = description,
                m = m2
            ));
        } else {
            out.push_str(&format!("  [{}], [{}],\n", description, m2));
        }
    }
    out.push_str(")\n");

    if selected.is_none() {
        out.push_str(&format!(
            "\nValor adoptado: {} m² por persona.\n",
            escape_typst(&format_number(report.occupancy.custom_m2_per_person, 1))
        ));
    }
    out
}

/// Every formula the report's numbers went through
fn equations_applied(report: &FireLoadReport) -> EquationTracker {
    let sector = if report.sector.sector_name.trim().is_empty() {
        "Sector sin nombre".to_string()
    } else {
        escape_typst(&report.sector.sector_name)
    };

    let mut tracker = EquationTracker::new();
    let steps = [
        (Equation::HeatContent, "Calorías de los materiales"),
        (Equation::WoodEquivalent, "Peso equivalente en madera"),
        (Equation::FireLoadDensity, "Carga de fuego"),
        (Equation::TotalFireLoadDensity, "Carga de fuego total"),
        (Equation::HazardClassification, "Clasificación"),
        (Equation::PotentialRow, "Tabla de potencial"),
        (Equation::RiskColumn, "Tabla de potencial"),
        (Equation::ExtinguisherCount, "Matafuegos sugeridos"),
        (Equation::OccupancyFactor, "Factor de ocupación"),
        (Equation::OccupancyClearance, "Factor de ocupación"),
        (Equation::ExitUnits, "Medios de escape"),
        (Equation::ExitWidth, "Medios de escape"),
    ];
    for (equation, context) in steps {
        tracker.record_for_sector(equation, context, sector.clone());
    }
    tracker
}

/// Escape Typst markup characters in user-provided text
fn escape_typst(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(
            c,
            '*' | '_' | '#' | '$' | '@' | '<' | '>' | '\\' | '`' | '[' | ']' | '/' | '~' | '-' | '='
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
