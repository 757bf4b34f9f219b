//! # Equation Registry
//!
//! Every formula the engine applies, with the metadata needed to print it
//! in the report appendix and to audit it against the annex.
//!
//! ## Usage
//!
//! ```rust
//! use carga_core::equations::registry::{Equation, EquationTracker};
//!
//! let mut tracker = EquationTracker::new();
//! tracker.record_for_sector(Equation::FireLoadDensity, "Densidad", "Depósito 1");
//!
//! let meta = Equation::FireLoadDensity.metadata();
//! assert_eq!(meta.formula_plain, "Qf = Pem / S");
//! ```

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

// ============================================================================
// Code References
// ============================================================================

/// Source a formula is taken from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeReference {
    /// Decreto 351/79, reglamentario de la Ley 19.587
    Decreto351 {
        annex: &'static str,
        section: &'static str,
    },
    /// Company practice not prescribed by the regulation
    CompanyPractice { note: &'static str },
}

impl CodeReference {
    /// Format the reference for display in PDF reports
    pub fn citation(&self) -> String {
        match self {
            CodeReference::Decreto351 { annex, section } => {
                format!("Decreto 351/79, Anexo {}, punto {}", annex, section)
            }
            CodeReference::CompanyPractice { note } => format!("Práctica de la empresa: {}", note),
        }
    }

    /// Short form for inline references
    pub fn short_form(&self) -> &'static str {
        match self {
            CodeReference::Decreto351 { .. } => "Dto. 351/79",
            CodeReference::CompanyPractice { .. } => "Empresa",
        }
    }
}

const ANNEX_VII: &str = "VII";

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for organizing equations in the PDF appendix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Heat content and wood equivalent
    CaloricContent,
    /// Fire load density
    Density,
    /// Hazard classification and table coordinates
    Classification,
    /// Extinguisher count
    Extinguishers,
    /// Occupant count
    Occupancy,
    /// Exit sizing
    Egress,
}

impl EquationCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::CaloricContent => "Contenido calórico",
            EquationCategory::Density => "Carga de fuego",
            EquationCategory::Classification => "Clasificación",
            EquationCategory::Extinguishers => "Matafuegos",
            EquationCategory::Occupancy => "Factor de ocupación",
            EquationCategory::Egress => "Medios de escape",
        }
    }

    /// Sort order for PDF appendix (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::CaloricContent => 1,
            EquationCategory::Density => 2,
            EquationCategory::Classification => 3,
            EquationCategory::Extinguishers => 4,
            EquationCategory::Occupancy => 5,
            EquationCategory::Egress => 6,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone)]
pub struct Variable {
    pub symbol: &'static str,
    pub description: &'static str,
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for one formula.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name, as printed in the report
    pub name: &'static str,
    pub description: &'static str,
    /// The formula in Typst math notation for PDF rendering
    pub formula_typst: &'static str,
    /// The formula in plain text for markdown
    pub formula_plain: &'static str,
    pub reference: CodeReference,
    pub variables: Vec<Variable>,
    pub assumptions: Vec<&'static str>,
    pub category: EquationCategory,
    /// Source module where the equation implementation lives
    pub source_module: &'static str,
    /// Function name implementing the equation
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All formulas applied by the fire load engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    /// Q = Σ p_i K_i
    HeatContent,
    /// Pem = Q / 4400
    WoodEquivalent,
    /// Qf = Pem / S
    FireLoadDensity,
    /// Qf_t = Qf n
    TotalFireLoadDensity,
    /// LEVE / COMÚN / MAYOR thresholds
    HazardClassification,
    /// Density bracket for the potential tables
    PotentialRow,
    /// Risk column with fallback
    RiskColumn,
    /// ceil(S / 200)
    ExtinguisherCount,
    /// N = ceil(S / X)
    OccupancyFactor,
    /// floor(0.8 N)
    OccupancyClearance,
    /// n = ceil(N / 100), min 2
    ExitUnits,
    /// Width of n exit units
    ExitWidth,
}

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::HeatContent => EquationMetadata {
                name: "Contenido calórico total",
                description: "Suma del calor de combustión de cada material almacenado en el sector",
                formula_typst: r#"$Q = sum_i p_i dot K_i$"#,
                formula_plain: "Q = Σ p_i * K_i",
                reference: CodeReference::Decreto351 { annex: ANNEX_VII, section: "1.4" },
                variables: vec![
                    Variable::new("Q", "Contenido calórico total", "kcal"),
                    Variable::new("p_i", "Peso del material i", "kg"),
                    Variable::new("K_i", "Poder calorífico del material i", "kcal/kg"),
                ],
                assumptions: vec!["Todo el material almacenado participa del incendio"],
                category: EquationCategory::CaloricContent,
                source_module: "equations/fire_load.rs",
                source_function: "compute_calories",
            },

            Equation::WoodEquivalent => EquationMetadata {
                name: "Peso equivalente en madera",
                description: "Kilogramos de madera que liberan el mismo calor que los materiales del sector",
                formula_typst: r#"$P_(e m) = Q / 4400$"#,
                formula_plain: "Pem = Q / 4400",
                reference: CodeReference::Decreto351 { annex: ANNEX_VII, section: "1.4" },
                variables: vec![
                    Variable::new("P_(e m)", "Peso equivalente en madera", "kg"),
                    Variable::new("Q", "Contenido calórico total", "kcal"),
                ],
                assumptions: vec!["Poder calorífico de la madera: 4400 kcal/kg"],
                category: EquationCategory::CaloricContent,
                source_module: "equations/fire_load.rs",
                source_function: "compute_wood_equivalent",
            },

            Equation::FireLoadDensity => EquationMetadata {
                name: "Carga de fuego",
                description: "Peso equivalente en madera por unidad de superficie del sector de incendio",
                formula_typst: r#"$Q_f = P_(e m) / S$"#,
                formula_plain: "Qf = Pem / S",
                reference: CodeReference::Decreto351 { annex: ANNEX_VII, section: "1.4" },
                variables: vec![
                    Variable::new("Q_f", "Carga de fuego", "kg/m²"),
                    Variable::new("S", "Superficie del sector", "m²"),
                ],
                assumptions: vec!["Con superficie nula la carga de fuego se informa como 0"],
                category: EquationCategory::Density,
                source_module: "equations/fire_load.rs",
                source_function: "compute_fire_load_density",
            },

            Equation::TotalFireLoadDensity => EquationMetadata {
                name: "Carga de fuego total",
                description: "Carga de fuego multiplicada por la cantidad de sectores iguales",
                formula_typst: r#"$Q_(f t) = Q_f dot n$"#,
                formula_plain: "Qft = Qf * n",
                reference: CodeReference::CompanyPractice { note: "sectores iguales se suman" },
                variables: vec![
                    Variable::new("Q_(f t)", "Carga de fuego total", "kg/m²"),
                    Variable::new("n", "Cantidad de sectores", "-"),
                ],
                assumptions: vec![],
                category: EquationCategory::Density,
                source_module: "equations/fire_load.rs",
                source_function: "compute_total_fire_load_density",
            },

            Equation::HazardClassification => EquationMetadata {
                name: "Clasificación del riesgo",
                description: "LEVE por debajo de 60 kg/m², COMÚN desde 60 y por debajo de 120, MAYOR desde 120",
                formula_typst: r#"$Q_(f t) < 60 -> "LEVE"$, $60 <= Q_(f t) < 120 -> "COMÚN"$, $Q_(f t) >= 120 -> "MAYOR"$"#,
                formula_plain: "Qft < 60 LEVE; 60 <= Qft < 120 COMÚN; Qft >= 120 MAYOR",
                reference: CodeReference::CompanyPractice { note: "umbrales de clasificación interna" },
                variables: vec![Variable::new("Q_(f t)", "Carga de fuego total", "kg/m²")],
                assumptions: vec!["Los límites pertenecen a la categoría superior"],
                category: EquationCategory::Classification,
                source_module: "equations/fire_load.rs",
                source_function: "classify",
            },

            Equation::PotentialRow => EquationMetadata {
                name: "Fila de potencial extintor",
                description: "Rango de carga de fuego usado para leer las tablas de potencial extintor",
                formula_typst: r#"$Q_(f t) <= 15, <= 30, <= 60, <= 100, > 100$"#,
                formula_plain: "Qft <= 15 | <= 30 | <= 60 | <= 100 | > 100",
                reference: CodeReference::Decreto351 { annex: ANNEX_VII, section: "4.1 y 4.2" },
                variables: vec![Variable::new("Q_(f t)", "Carga de fuego total", "kg/m²")],
                assumptions: vec!["Límites superiores inclusivos", "Más de 100 kg/m²: a determinar en cada caso"],
                category: EquationCategory::Classification,
                source_module: "equations/fire_load.rs",
                source_function: "potential_row_index",
            },

            Equation::RiskColumn => EquationMetadata {
                name: "Columna de riesgo",
                description: "Los riesgos 1 a 5 leen su propia columna; cualquier otro valor lee la columna de riesgo 3",
                formula_typst: r#"$c = r$ si $1 <= r <= 5$, si no $c = 3$"#,
                formula_plain: "c = r if 1 <= r <= 5 else 3",
                reference: CodeReference::CompanyPractice { note: "riesgos fuera de tabla" },
                variables: vec![
                    Variable::new("r", "Tipo de riesgo", "-"),
                    Variable::new("c", "Columna de la tabla", "-"),
                ],
                assumptions: vec!["Pendiente de confirmación para riesgos 6 y 7"],
                category: EquationCategory::Classification,
                source_module: "equations/fire_load.rs",
                source_function: "risk_column",
            },

            Equation::ExtinguisherCount => EquationMetadata {
                name: "Cantidad de matafuegos",
                description: "Un matafuego cada 200 m² de superficie, redondeando hacia arriba",
                formula_typst: r#"$M = ceil(S / 200)$"#,
                formula_plain: "M = ceil(S / 200)",
                reference: CodeReference::Decreto351 { annex: ANNEX_VII, section: "6.1" },
                variables: vec![
                    Variable::new("M", "Cantidad de matafuegos", "u"),
                    Variable::new("S", "Superficie del sector", "m²"),
                ],
                assumptions: vec!["Superficie nula: ningún matafuego"],
                category: EquationCategory::Extinguishers,
                source_module: "equations/fire_load.rs",
                source_function: "suggested_extinguisher_count",
            },

            Equation::OccupancyFactor => EquationMetadata {
                name: "Factor de ocupación",
                description: "Cantidad de personas según la superficie y el destino del local",
                formula_typst: r#"$N = ceil(S / X)$"#,
                formula_plain: "N = ceil(S / X)",
                reference: CodeReference::Decreto351 { annex: ANNEX_VII, section: "3.1.2" },
                variables: vec![
                    Variable::new("N", "Número de ocupantes", "personas"),
                    Variable::new("X", "Superficie por persona", "m²/persona"),
                ],
                assumptions: vec![],
                category: EquationCategory::Occupancy,
                source_module: "equations/occupancy.rs",
                source_function: "occupancy_factor",
            },

            Equation::OccupancyClearance => EquationMetadata {
                name: "Ocupación con circulación",
                description: "Se reserva el 20% de la capacidad para circulación",
                formula_typst: r#"$N_c = floor(0.8 dot N)$"#,
                formula_plain: "Nc = floor(0.8 * N)",
                reference: CodeReference::CompanyPractice { note: "reserva de circulación" },
                variables: vec![Variable::new("N_c", "Ocupantes con circulación", "personas")],
                assumptions: vec![],
                category: EquationCategory::Occupancy,
                source_module: "equations/occupancy.rs",
                source_function: "occupancy_with_clearance",
            },

            Equation::ExitUnits => EquationMetadata {
                name: "Unidades de ancho de salida",
                description: "Una unidad cada 100 personas, mínimo dos unidades",
                formula_typst: r#"$n = max(2, ceil(N / 100))$"#,
                formula_plain: "n = max(2, ceil(N / 100))",
                reference: CodeReference::Decreto351 { annex: ANNEX_VII, section: "3.1.1" },
                variables: vec![
                    Variable::new("n", "Unidades de ancho de salida", "u.a.s."),
                    Variable::new("N", "Número de ocupantes", "personas"),
                ],
                assumptions: vec!["Sin ocupantes no se exigen unidades"],
                category: EquationCategory::Egress,
                source_module: "equations/occupancy.rs",
                source_function: "required_exit_units",
            },

            Equation::ExitWidth => EquationMetadata {
                name: "Ancho de salida",
                description: "0,55 m por cada una de las dos primeras unidades y 0,45 m por cada unidad adicional",
                formula_typst: r#"$a = 0.55 dot min(n, 2) + 0.45 dot max(n - 2, 0)$"#,
                formula_plain: "a = 0.55 * min(n, 2) + 0.45 * max(n - 2, 0)",
                reference: CodeReference::Decreto351 { annex: ANNEX_VII, section: "3.1.1" },
                variables: vec![Variable::new("a", "Ancho total de salida", "m")],
                assumptions: vec![],
                category: EquationCategory::Egress,
                source_module: "equations/occupancy.rs",
                source_function: "exit_width_m",
            },
        }
    }

    /// Get all equations in a given category
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .filter(|eq| eq.metadata().category == category)
            .copied()
            .collect()
    }

    /// Get all categories in appendix order
    pub fn all_categories() -> Vec<EquationCategory> {
        use EquationCategory::*;
        let mut cats = vec![CaloricContent, Density, Classification, Extinguishers, Occupancy, Egress];
        cats.sort_by_key(|c| c.sort_order());
        cats
    }
}

/// All equations in the registry (for iteration)
pub static ALL_EQUATIONS: &[Equation] = &[
    Equation::HeatContent,
    Equation::WoodEquivalent,
    Equation::FireLoadDensity,
    Equation::TotalFireLoadDensity,
    Equation::HazardClassification,
    Equation::PotentialRow,
    Equation::RiskColumn,
    Equation::ExtinguisherCount,
    Equation::OccupancyFactor,
    Equation::OccupancyClearance,
    Equation::ExitUnits,
    Equation::ExitWidth,
];

/// Equations applied by one full report calculation
pub fn fire_load_equations() -> Vec<Equation> {
    ALL_EQUATIONS.to_vec()
}

// ============================================================================
// Equation Usage Tracking
// ============================================================================

/// Record of an equation being applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquationUsage {
    pub equation: Equation,
    /// Where/why it was used (e.g., "Clasificación")
    pub context: String,
    /// Sector this usage belongs to, if any
    pub sector_name: Option<String>,
}

impl EquationUsage {
    pub fn new(equation: Equation, context: impl Into<String>) -> Self {
        Self {
            equation,
            context: context.into(),
            sector_name: None,
        }
    }

    pub fn for_sector(equation: Equation, context: impl Into<String>, sector: impl Into<String>) -> Self {
        Self {
            equation,
            context: context.into(),
            sector_name: Some(sector.into()),
        }
    }
}

/// Collector for equation usage, feeding the report appendix.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquationTracker {
    usages: Vec<EquationUsage>,
}

impl EquationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, equation: Equation, context: impl Into<String>) {
        self.usages.push(EquationUsage::new(equation, context));
    }

    pub fn record_for_sector(&mut self, equation: Equation, context: impl Into<String>, sector: impl Into<String>) {
        self.usages.push(EquationUsage::for_sector(equation, context, sector));
    }

    pub fn usages(&self) -> &[EquationUsage] {
        &self.usages
    }

    /// Unique equations in first-use order
    pub fn unique_equations(&self) -> Vec<Equation> {
        let mut seen = HashSet::new();
        self.usages
            .iter()
            .filter(|u| seen.insert(u.equation))
            .map(|u| u.equation)
            .collect()
    }

    pub fn by_equation(&self) -> HashMap<Equation, Vec<&EquationUsage>> {
        let mut map: HashMap<Equation, Vec<&EquationUsage>> = HashMap::new();
        for usage in &self.usages {
            map.entry(usage.equation).or_default().push(usage);
        }
        map
    }

    /// Unique equations grouped by category, categories in appendix order
    pub fn by_category(&self) -> Vec<(EquationCategory, Vec<Equation>)> {
        let mut by_cat: HashMap<EquationCategory, Vec<Equation>> = HashMap::new();
        for eq in self.unique_equations() {
            by_cat.entry(eq.metadata().category).or_default().push(eq);
        }

        let mut result: Vec<_> = by_cat.into_iter().collect();
        result.sort_by_key(|(cat, _)| cat.sort_order());
        result
    }

    pub fn merge(&mut self, other: EquationTracker) {
        self.usages.extend(other.usages);
    }
}

// ============================================================================
// Typst Appendix Generation
// ============================================================================

impl EquationTracker {
    /// Typst markup for the "Fórmulas aplicadas" appendix.
    ///
    /// ```rust
    /// use carga_core::equations::registry::{Equation, EquationTracker};
    ///
    /// let mut tracker = EquationTracker::new();
    /// tracker.record_for_sector(Equation::WoodEquivalent, "Peso equivalente", "Taller");
    ///
    /// let typst = tracker.generate_appendix_typst();
    /// assert!(typst.contains("Peso equivalente en madera"));
    /// ```
    pub fn generate_appendix_typst(&self) -> String {
        let mut output = String::new();

        output.push_str(r##"
#pagebreak()

#align(center)[
  #block(width: 100%, fill: rgb("#f0f0f0"), inset: 12pt, radius: 4pt)[
    #text(size: 18pt, weight: "bold")[Anexo: Fórmulas aplicadas]
  ]
]

#v(12pt)

#text(size: 10pt)[
  Este anexo detalla las fórmulas utilizadas en el cálculo de carga de fuego,
  con su referencia normativa y los sectores a los que se aplicaron.
]

#v(16pt)
"##);

        let by_category = self.by_category();

        if by_category.is_empty() {
            output.push_str("#text(style: \"italic\")[No se registraron fórmulas.]\n");
            return output;
        }

        let usage_by_eq = self.by_equation();

        for (category, equations) in by_category {
            output.push_str(&format!("\n== {}\n\n", category.display_name()));

            for equation in equations {
                let meta = equation.metadata();

                output.push_str(&format!("=== {}\n\n", meta.name));
                output.push_str(&format!("#text(size: 10pt)[{}]\n\n", meta.description));
                output.push_str(&format!("*Fórmula:* {}\n\n", meta.formula_typst));
                output.push_str(&format!("*Referencia:* {}\n\n", meta.reference.citation()));

                if !meta.variables.is_empty() {
                    output.push_str("*Variables:*\n");
                    output.push_str("#table(\n");
                    output.push_str("  columns: (auto, 1fr, auto),\n");
                    output.push_str("  inset: 6pt,\n");
                    output.push_str("  stroke: 0.5pt,\n");
                    output.push_str("  table.header([*Símbolo*], [*Descripción*], [*Unidad*]),\n");
                    for var in &meta.variables {
                        output.push_str(&format!(
                            "  [${}$], [{}], [{}],\n",
                            escape_typst_math(var.symbol),
                            var.description,
                            var.units
                        ));
                    }
                    output.push_str(")\n\n");
                }

                if let Some(usages) = usage_by_eq.get(&equation) {
                    let mut sectors: Vec<&str> = usages
                        .iter()
                        .filter_map(|u| u.sector_name.as_deref())
                        .collect();
                    sectors.sort();
                    sectors.dedup();

                    if !sectors.is_empty() {
                        output.push_str(&format!("*Aplicada a:* {}\n\n", sectors.join(", ")));
                    }
                }

                if !meta.assumptions.is_empty() {
                    output.push_str("*Supuestos:*\n");
                    for assumption in &meta.assumptions {
                        output.push_str(&format!("- {}\n", assumption));
                    }
                    output.push('\n');
                }

                output.push_str("#v(8pt)\n");
                output.push_str("#line(length: 100%, stroke: 0.25pt + gray)\n");
                output.push_str("#v(8pt)\n\n");
            }
        }

        output
    }
}

/// Escape special characters for Typst math mode
fn escape_typst_math(s: &str) -> String {
    s.replace('\\', "\\\\")
}

// ============================================================================
// Markdown Generation for EQUATIONS.md
// ============================================================================

/// Full markdown reference of every registered equation.
///
/// ```rust
/// use carga_core::equations::registry::generate_equations_markdown;
///
/// let markdown = generate_equations_markdown();
/// assert!(markdown.contains("Carga de Fuego - Fórmulas"));
/// ```
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(8_000);

    output.push_str(r#"# Carga de Fuego - Fórmulas

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-equations`

Formulas applied by the fire load engine, with their regulatory reference
and the function implementing each one.

"#);

    let categories = Equation::all_categories();

    for category in &categories {
        let equations = Equation::in_category(*category);
        if equations.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for equation in equations {
            let meta = equation.metadata();
            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!("| {} | {} | {} |\n", var.symbol, var.description, var.units));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            output.push_str(&format!(
                "**Source:** [`{}`]({})\n\n",
                meta.source_function, meta.source_module
            ));
            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Equations:** {}\n- **Categories:** {}\n",
        ALL_EQUATIONS.len(),
        categories.len()
    ));

    output
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_equations_have_metadata() {
        assert_eq!(ALL_EQUATIONS.len(), 12);

        for eq in ALL_EQUATIONS {
            let meta = eq.metadata();
            assert!(!meta.name.is_empty(), "Equation {:?} has no name", eq);
            assert!(!meta.formula_typst.is_empty(), "Equation {:?} has no formula", eq);
            assert!(!meta.variables.is_empty(), "Equation {:?} has no variables", eq);
            assert!(!meta.source_function.is_empty(), "Equation {:?} missing source_function", eq);
        }

        assert!(Equation::WoodEquivalent.metadata().formula_plain.contains("4400"));
    }

    #[test]
    fn test_code_reference_citation() {
        let r = CodeReference::Decreto351 { annex: "VII", section: "4.1" };
        assert_eq!(r.citation(), "Decreto 351/79, Anexo VII, punto 4.1");
        assert_eq!(r.short_form(), "Dto. 351/79");
    }

    #[test]
    fn test_equation_tracker() {
        let mut tracker = EquationTracker::new();
        tracker.record(Equation::HeatContent, "Sector 1");
        tracker.record(Equation::WoodEquivalent, "Sector 1");
        tracker.record(Equation::HeatContent, "Sector 2");

        assert_eq!(tracker.usages().len(), 3);
        assert_eq!(tracker.unique_equations(), vec![Equation::HeatContent, Equation::WoodEquivalent]);
    }

    #[test]
    fn test_by_category_sorted() {
        let mut tracker = EquationTracker::new();
        tracker.record(Equation::ExitUnits, "test");
        tracker.record(Equation::HeatContent, "test");
        tracker.record(Equation::HazardClassification, "test");

        let cats: Vec<_> = tracker.by_category().into_iter().map(|(c, _)| c).collect();
        assert_eq!(
            cats,
            vec![
                EquationCategory::CaloricContent,
                EquationCategory::Classification,
                EquationCategory::Egress
            ]
        );
    }

    #[test]
    fn test_every_category_has_equations() {
        for cat in Equation::all_categories() {
            assert!(!Equation::in_category(cat).is_empty(), "{:?} is empty", cat);
        }
    }

    #[test]
    fn test_generate_appendix_typst() {
        let mut tracker = EquationTracker::new();
        for eq in fire_load_equations() {
            tracker.record_for_sector(eq, "Cálculo", "Depósito de aceites");
        }

        let typst = tracker.generate_appendix_typst();
        assert!(typst.contains("Anexo: Fórmulas aplicadas"));
        assert!(typst.contains("Carga de fuego total"));
        assert!(typst.contains("Decreto 351/79"));
        assert!(typst.contains("*Aplicada a:* Depósito de aceites"));
    }

    #[test]
    fn test_generate_appendix_empty_tracker() {
        let typst = EquationTracker::new().generate_appendix_typst();
        assert!(typst.contains("No se registraron fórmulas"));
    }

    #[test]
    fn test_generate_equations_markdown() {
        let markdown = generate_equations_markdown();
        assert!(markdown.contains("## Contenido calórico"));
        assert!(markdown.contains("`Qf = Pem / S`"));
        assert!(markdown.contains("equations/occupancy.rs"));
        assert!(markdown.contains("**Total Equations:** 12"));
        assert!(markdown.contains("**Categories:** 6"));
    }
}
