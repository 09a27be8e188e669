use budguide_common::{Product, ProductCategory, StrainType};

use crate::classifier::NeedCategory;

/// Presentation cap observed across every consultation surface.
pub const DEFAULT_CAP: usize = 3;

/// Pick products for a need category, preserving catalog order, truncated
/// to `cap`. No scoring or ranking: the catalog's own order is the order.
pub fn select(category: NeedCategory, catalog: &[Product], cap: usize) -> Vec<Product> {
    match category {
        NeedCategory::General => select_general(catalog, cap),
        _ => catalog
            .iter()
            .filter(|p| matches(category, p))
            .take(cap)
            .cloned()
            .collect(),
    }
}

/// One rule per category. Potency thresholds compare the magnitude in the
/// product's own unit; effect tags match case-insensitively.
fn matches(category: NeedCategory, p: &Product) -> bool {
    match category {
        NeedCategory::Sleep => {
            p.strain == StrainType::Indica || has_any_effect(p, &["sleepy", "sedating"])
        }
        NeedCategory::Energy => {
            p.strain == StrainType::Sativa || has_any_effect(p, &["energetic", "focused"])
        }
        NeedCategory::Anxiety => p.cbd.amount() > 0.0 || has_any_effect(p, &["relaxed", "calm"]),
        NeedCategory::Pain => {
            p.strain == StrainType::Indica || p.thc.amount() > 20.0 || p.cbd.amount() > 0.0
        }
        NeedCategory::Beginner => {
            (p.category == ProductCategory::Edibles && p.thc.amount() <= 10.0)
                || (p.category == ProductCategory::Flower && p.thc.amount() <= 20.0)
                || p.cbd.amount() > 0.0
        }
        NeedCategory::General => true,
    }
}

fn has_any_effect(p: &Product, tags: &[&str]) -> bool {
    tags.iter().any(|t| p.has_effect(t))
}

/// General picks one representative per strain type — first catalog match
/// for indica, then sativa, then hybrid — skipping absent types.
fn select_general(catalog: &[Product], cap: usize) -> Vec<Product> {
    let mut picks = Vec::new();
    for strain in [StrainType::Indica, StrainType::Sativa, StrainType::Hybrid] {
        if let Some(p) = catalog.iter().find(|p| p.strain == strain) {
            picks.push(p.clone());
        }
    }
    picks.truncate(cap);
    picks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{edible, flower, with_effects};
    use budguide_common::Potency;

    fn demo_catalog() -> Vec<Product> {
        vec![
            with_effects(
                flower("f_indica", "Granddaddy Purple", StrainType::Indica, 19.2),
                &["sleepy", "relaxed"],
            ),
            with_effects(
                flower("f_sativa", "Blue Dream", StrainType::Sativa, 22.5),
                &["energetic", "uplifted"],
            ),
            with_effects(
                flower("f_hybrid", "Wedding Cake", StrainType::Hybrid, 24.0),
                &["relaxed", "happy"],
            ),
            edible("e_gummies", "Sour Gummies", StrainType::Hybrid, 10.0),
        ]
    }

    #[test]
    fn sleep_picks_indica_or_sedating() {
        let catalog = demo_catalog();
        let picks = select(NeedCategory::Sleep, &catalog, DEFAULT_CAP);
        assert_eq!(picks.len(), 1);
        assert_eq!(picks[0].id, "f_indica");
    }

    #[test]
    fn sleep_matches_sedating_effect_on_non_indica() {
        let catalog = vec![with_effects(
            flower("v1", "Midnight Vape", StrainType::Hybrid, 80.0),
            &["Sedating"],
        )];
        let picks = select(NeedCategory::Sleep, &catalog, DEFAULT_CAP);
        assert_eq!(picks.len(), 1);
    }

    #[test]
    fn energy_picks_sativa_or_focused() {
        let catalog = demo_catalog();
        let picks = select(NeedCategory::Energy, &catalog, DEFAULT_CAP);
        assert_eq!(picks.len(), 1);
        assert_eq!(picks[0].id, "f_sativa");
    }

    #[test]
    fn anxiety_picks_cbd_or_calming() {
        let mut catalog = demo_catalog();
        catalog.push({
            let mut p = edible("e_cbd", "Calm Drops", StrainType::CbdOnly, 0.0);
            p.cbd = Potency::Milligrams(25.0);
            p
        });
        let picks = select(NeedCategory::Anxiety, &catalog, DEFAULT_CAP);
        // f_indica (relaxed), f_hybrid (relaxed), e_cbd (cbd > 0) — capped order
        let ids: Vec<&str> = picks.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["f_indica", "f_hybrid", "e_cbd"]);
    }

    #[test]
    fn pain_picks_indica_high_thc_or_cbd() {
        let catalog = demo_catalog();
        let picks = select(NeedCategory::Pain, &catalog, DEFAULT_CAP);
        let ids: Vec<&str> = picks.iter().map(|p| p.id.as_str()).collect();
        // indica, 22.5% thc, 24% thc — in catalog order
        assert_eq!(ids, vec!["f_indica", "f_sativa", "f_hybrid"]);
    }

    #[test]
    fn beginner_picks_low_dose_edibles_and_mild_flower() {
        let catalog = demo_catalog();
        let picks = select(NeedCategory::Beginner, &catalog, DEFAULT_CAP);
        let ids: Vec<&str> = picks.iter().map(|p| p.id.as_str()).collect();
        // 19.2% flower passes the <=20 flower rule; 10mg gummies pass the
        // <=10 edible rule; the 22.5/24% flowers fail.
        assert_eq!(ids, vec!["f_indica", "e_gummies"]);
    }

    #[test]
    fn general_returns_one_per_strain_in_fixed_order() {
        // Catalog order is sativa-first, but general output is indica,
        // sativa, hybrid.
        let catalog = vec![
            flower("s1", "Sativa One", StrainType::Sativa, 20.0),
            flower("h1", "Hybrid One", StrainType::Hybrid, 20.0),
            flower("i1", "Indica One", StrainType::Indica, 20.0),
            flower("i2", "Indica Two", StrainType::Indica, 18.0),
        ];
        let picks = select(NeedCategory::General, &catalog, DEFAULT_CAP);
        let ids: Vec<&str> = picks.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["i1", "s1", "h1"]);
    }

    #[test]
    fn general_skips_missing_strain_types() {
        let catalog = vec![flower("h1", "Hybrid One", StrainType::Hybrid, 20.0)];
        let picks = select(NeedCategory::General, &catalog, DEFAULT_CAP);
        let ids: Vec<&str> = picks.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["h1"]);
    }

    #[test]
    fn empty_catalog_yields_empty_result() {
        assert!(select(NeedCategory::Sleep, &[], DEFAULT_CAP).is_empty());
        assert!(select(NeedCategory::General, &[], DEFAULT_CAP).is_empty());
    }

    #[test]
    fn cap_truncates_in_catalog_order() {
        let catalog: Vec<Product> = (0..5)
            .map(|i| flower(&format!("i{i}"), "Indica", StrainType::Indica, 18.0))
            .collect();
        let picks = select(NeedCategory::Sleep, &catalog, DEFAULT_CAP);
        let ids: Vec<&str> = picks.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["i0", "i1", "i2"]);
    }
}
