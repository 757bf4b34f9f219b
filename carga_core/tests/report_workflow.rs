use std::fs;

use carga_core::calculations::FireLoadClass;
use carga_core::file_io::{load_report, load_report_with_lock_check, save_report, FileLock};
use carga_core::format::ResultSummary;
use carga_core::report::{FireLoadReport, FormEdit};

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("carga_it_{}_{}.carga", name, std::process::id()))
}

fn fill(report: FireLoadReport, edits: Vec<FormEdit>) -> FireLoadReport {
    edits
        .into_iter()
        .fold(report, |state, edit| state.apply(edit).expect("edit applies"))
}

#[test]
fn workshop_survey_end_to_end() {
    let report = fill(
        FireLoadReport::new("Servicios Petroleros SA", "J. Pérez", "Base Añelo"),
        vec![
            FormEdit::SetSectorName { name: "Taller de mantenimiento".into() },
            FormEdit::SetSurface { raw: "100".into() },
            FormEdit::SetRiskType { raw: "3".into() },
            FormEdit::SetSectorCount { raw: "1".into() },
            FormEdit::AddMaterialFromCatalog { name: "Madera".into() },
        ],
    );
    let id = report.materials[0].id;
    let report = report.apply(FormEdit::SetMaterialWeight { id, raw: "100".into() }).unwrap();

    let result = report.results();
    assert_eq!(result.fire_load.total_calories_kcal, 440_000.0);
    assert!((result.fire_load.wood_equivalent_kg - 100.0).abs() < 1e-9);
    assert!((result.fire_load.total_fire_load_density - 1.0).abs() < 1e-12);
    assert_eq!(result.classification(), FireLoadClass::Leve);
    assert_eq!(result.fire_load.potential_row, 0);

    let summary = ResultSummary::new(&result, report.sector.risk_type, report.settings.decimals);
    assert_eq!(summary.total_calories_kcal, "440.000");
    assert_eq!(summary.total_fire_load_density, "1,00");

    let path = temp_path("workshop");
    {
        let _lock = FileLock::acquire(&path, "jperez").unwrap();
        save_report(&report, &path).unwrap();
        let (_, holder) = load_report_with_lock_check(&path).unwrap();
        assert_eq!(holder.map(|h| h.user_id), Some("jperez".to_string()));
    }

    let loaded = load_report(&path).unwrap();
    assert_eq!(loaded.results(), result);
    let _ = fs::remove_file(&path);
}

#[test]
fn risk_seven_resolves_like_risk_three() {
    let base = fill(
        FireLoadReport::default(),
        vec![
            FormEdit::SetSurface { raw: "250".into() },
            FormEdit::AddMaterialFromCatalog { name: "Gasoil".into() },
        ],
    );
    let id = base.materials[0].id;
    let base = base.apply(FormEdit::SetMaterialWeight { id, raw: "3000".into() }).unwrap();

    let three = base.apply(FormEdit::SetRiskType { raw: "3".into() }).unwrap().results();
    let seven = base.apply(FormEdit::SetRiskType { raw: "7".into() }).unwrap().results();
    assert_eq!(three.fire_load.risk_column, seven.fire_load.risk_column);
    assert_eq!(
        three.fire_load.required_potential_class_a,
        seven.fire_load.required_potential_class_a
    );
    assert_eq!(
        three.fire_load.required_potential_class_b,
        seven.fire_load.required_potential_class_b
    );
}

#[test]
fn rejected_edit_keeps_previous_state() {
    let report = FireLoadReport::default().apply(FormEdit::AddMaterial).unwrap();
    let snapshot = report.clone();

    let err = report
        .apply(FormEdit::RemoveMaterial { id: uuid::Uuid::nil() })
        .unwrap_err();
    assert_eq!(err.error_code(), "INVALID_INPUT");
    assert_eq!(report, snapshot);
}
