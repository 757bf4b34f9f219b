use carga_core::calculations::{classify_fire_load, FireLoadClass, MaterialEntry, SectorParameters};
use carga_core::equations::{classify, potential_row_index};
use carga_core::input::{coerce_count, coerce_f64};
use proptest::prelude::*;
use proptest::test_runner::Config;

fn class_rank(class: FireLoadClass) -> u8 {
    match class {
        FireLoadClass::Leve => 0,
        FireLoadClass::Comun => 1,
        FireLoadClass::Mayor => 2,
    }
}

fn materials_strategy() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((0.0_f64..50_000.0, 0.0_f64..12_000.0), 0..12)
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn material_order_does_not_change_result(
        rows in materials_strategy(),
        surface in 1.0_f64..5_000.0,
        count in 1_u32..10,
        risk in 0_u8..8,
    ) {
        let materials: Vec<MaterialEntry> = rows
            .iter()
            .map(|(w, h)| MaterialEntry::new("m").with_weight(*w).with_heat(*h))
            .collect();
        let mut reversed = materials.clone();
        reversed.reverse();

        let sector = SectorParameters {
            surface_area_m2: surface,
            risk_type: risk,
            sector_name: "Sector".to_string(),
            sector_count: count,
        };
        let a = classify_fire_load(&materials, &sector);
        let b = classify_fire_load(&reversed, &sector);

        let tolerance = 1e-9 * a.total_calories_kcal.abs().max(1.0);
        prop_assert!((a.total_calories_kcal - b.total_calories_kcal).abs() <= tolerance);
        prop_assert!((a.total_weight_kg - b.total_weight_kg).abs() <= 1e-9 * a.total_weight_kg.max(1.0));
        prop_assert_eq!(a.risk_column, b.risk_column);
    }

    #[test]
    fn brackets_never_decrease(a in 0.0_f64..500.0, b in 0.0_f64..500.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(potential_row_index(low) <= potential_row_index(high));
        prop_assert!(class_rank(classify(low)) <= class_rank(classify(high)));
    }

    #[test]
    fn more_sectors_never_lower_the_class(
        weight in 0.0_f64..20_000.0,
        surface in 1.0_f64..2_000.0,
        count in 1_u32..20,
    ) {
        let materials = vec![MaterialEntry::new("Madera").with_weight(weight).with_heat(4400.0)];
        let base = SectorParameters {
            surface_area_m2: surface,
            risk_type: 3,
            sector_name: "Sector".to_string(),
            sector_count: count,
        };
        let more = SectorParameters { sector_count: count + 1, ..base.clone() };

        let r1 = classify_fire_load(&materials, &base);
        let r2 = classify_fire_load(&materials, &more);
        prop_assert!(class_rank(r1.classification) <= class_rank(r2.classification));
        prop_assert!(r1.potential_row <= r2.potential_row);
    }

    #[test]
    fn coercion_never_yields_negative_or_nan(raw in ".{0,12}") {
        let value = coerce_f64(&raw);
        prop_assert!(value.is_finite());
        prop_assert!(value >= 0.0);
        prop_assert!(coerce_count(&raw, 1) >= 1);
    }

    #[test]
    fn comma_decimals_parse_like_dot_decimals(whole in 0_u32..1_000_000, frac in 0_u32..100) {
        let dotted = format!("{whole}.{frac:02}");
        let comma = format!("{whole},{frac:02}");
        prop_assert_eq!(coerce_f64(&dotted), coerce_f64(&comma));
    }
}
