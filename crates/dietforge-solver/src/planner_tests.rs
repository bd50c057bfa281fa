//! Tests for the allocation planner.

use super::*;
use dietforge_core::{known, ModifierFlag};
use dietforge_test::catalog::{
    booze, food, fork, mayo, mayoflex, salad, seasoning, slider, spice_melange, spleen,
};
use dietforge_test::snapshot_with_capacity;

fn planner<'a>(mpa: f64, catalog: &[Entry], snapshot: &'a Snapshot) -> AllocationPlanner<'a> {
    AllocationPlanner::new(mpa, catalog, snapshot, &InteractionTable::default())
}

fn target_names(bundle: &Bundle) -> Vec<String> {
    bundle.entries().map(|e| e.id().to_string()).collect()
}

#[test]
fn test_working_set_partition() {
    let snapshot = snapshot_with_capacity(10, 10, 10);
    let mut high_level = food("lobster", 10, 12, 2);
    high_level.resource.level_requirement = 5;
    let catalog = vec![
        food("pizza", 3, 5, 1),
        fork(50.0),
        spice_melange(1000.0),
        high_level,
        food("broken", 3, 5, -1),
        spleen("agua", 4, 6, 4),
    ];
    let planner = planner(100.0, &catalog, &snapshot);

    let simple: Vec<_> = planner
        .simple_entries()
        .iter()
        .map(|e| e.id().to_string())
        .collect();
    assert_eq!(simple, vec!["pizza", "agua"]);
    assert_eq!(planner.interacting().len(), 1);
    assert!(planner.interacting()[0].entry.is("spice melange"));
}

#[test]
fn test_unbounded_free_rows_are_skipped() {
    let snapshot = snapshot_with_capacity(2, 0, 2).with_remaining_uses("spleen soother", 3);
    let catalog = vec![
        food("pizza", 3, 5, 1),
        Entry::restoring("sweet syrup", Organ::Spleen, -1),
        Entry::restoring("spleen soother", Organ::Spleen, -1),
        spleen("free pill", 4, 4, 0),
        spleen("counted pill", 4, 4, 0).with_maximum(1),
    ];
    let planner = planner(100.0, &catalog, &snapshot);

    let simple: Vec<_> = planner
        .simple_entries()
        .iter()
        .map(|e| e.id().to_string())
        .collect();
    assert_eq!(simple, vec!["pizza", "spleen soother", "counted pill"]);
    assert!(planner
        .plan_categories(&Capacities::new(2, 0, 2), ModifierOverrides::none())
        .is_ok());
}

#[test]
fn test_non_finite_price_is_skipped() {
    let snapshot = snapshot_with_capacity(2, 2, 0)
        .with_price("gin", f64::NAN)
        .with_price(known::SALAD_FORK, f64::INFINITY);
    let catalog = vec![
        food("pizza", 4, 4, 1),
        booze("gin", 3, 3, 1),
        Entry::helper(known::SALAD_FORK),
    ];
    let planner = planner(100.0, &catalog, &snapshot);

    let simple: Vec<_> = planner
        .simple_entries()
        .iter()
        .map(|e| e.id().to_string())
        .collect();
    assert_eq!(simple, vec!["pizza"]);

    let pizza = Arc::clone(&planner.simple_entries()[0]);
    let (bundle, value) = planner.consumption_value_and_bundle(&pizza, ModifierOverrides::none());
    assert_eq!(target_names(&bundle), vec!["pizza"]);
    assert_eq!(value, 400.0);
}

#[test]
fn test_fork_bundled_on_range() {
    // 3, 4, 5 become 3, 5, 6 under the fork.
    let snapshot = snapshot_with_capacity(2, 0, 0);
    let catalog = vec![food("pizza", 3, 5, 1), fork(50.0)];
    let planner = planner(100.0, &catalog, &snapshot);
    let pizza = Arc::clone(&planner.simple_entries()[0]);

    let (bundle, value) = planner.consumption_value_and_bundle(&pizza, ModifierOverrides::none());
    assert_eq!(target_names(&bundle), vec!["pizza", known::SALAD_FORK]);
    assert!((value - (1400.0 / 3.0 - 50.0)).abs() < 1e-9);
}

#[test]
fn test_fork_bundled_when_strictly_better() {
    // floor(4 * 1.3) = 5: 500 - 50 beats 400.
    let snapshot = snapshot_with_capacity(2, 0, 0);
    let catalog = vec![food("pizza", 4, 4, 1), fork(50.0)];
    let planner = planner(100.0, &catalog, &snapshot);
    let pizza = Arc::clone(&planner.simple_entries()[0]);

    let (bundle, value) = planner.consumption_value_and_bundle(&pizza, ModifierOverrides::none());
    assert!(bundle.flags().contains(ModifierFlag::ForkMug));
    assert_eq!(value, 450.0);
}

#[test]
fn test_fork_tie_keeps_plain_bundle() {
    // floor(10 * 1.3) = 13: 130 - 30 ties with 100.
    let snapshot = snapshot_with_capacity(2, 0, 0);
    let catalog = vec![food("stew", 10, 10, 1), fork(30.0)];
    let planner = planner(10.0, &catalog, &snapshot);
    let stew = Arc::clone(&planner.simple_entries()[0]);

    let (bundle, value) = planner.consumption_value_and_bundle(&stew, ModifierOverrides::none());
    assert!(bundle.helpers().is_empty());
    assert_eq!(value, 100.0);
}

#[test]
fn test_fork_never_lowers_value() {
    let snapshot = snapshot_with_capacity(10, 0, 0);
    let entries = [food("pizza", 3, 5, 1), salad("chef's salad", 8, 10, 3), food("x", 1, 1, 1)];
    for price in [0.0, 10.0, 80.0, 150.0, 500.0, 5000.0] {
        let with_fork: Vec<Entry> = entries.iter().cloned().chain([fork(price)]).collect();
        let forked = planner(100.0, &with_fork, &snapshot);
        let plain = planner(100.0, &entries, &snapshot);
        for (a, b) in forked.simple_entries().iter().zip(plain.simple_entries()) {
            let with = forked.consumption_value(a, ModifierOverrides::none());
            let without = plain.consumption_value(b, ModifierOverrides::none());
            assert!(with >= without, "{a} at fork price {price}: {with} < {without}");
        }
    }
}

#[test]
fn test_seasoning_bundled_when_worth_it() {
    let snapshot = snapshot_with_capacity(2, 0, 0);
    // spread 1: seasoning is worth a full adventure
    let cheap = vec![food("taco", 3, 4, 1), seasoning(50.0)];
    let planner_cheap = planner(100.0, &cheap, &snapshot);
    let taco = Arc::clone(&planner_cheap.simple_entries()[0]);
    let (bundle, value) =
        planner_cheap.consumption_value_and_bundle(&taco, ModifierOverrides::none());
    assert!(bundle.flags().contains(ModifierFlag::Seasoning));
    assert_eq!(value, 400.0);

    let dear = vec![food("taco", 3, 4, 1), seasoning(150.0)];
    let planner_dear = planner(100.0, &dear, &snapshot);
    let taco = Arc::clone(&planner_dear.simple_entries()[0]);
    let (bundle, value) = planner_dear.consumption_value_and_bundle(&taco, ModifierOverrides::none());
    assert!(bundle.helpers().is_empty());
    assert_eq!(value, 350.0);
}

#[test]
fn test_mayoflex_bundled_without_designation() {
    let snapshot = snapshot_with_capacity(2, 0, 0);
    let catalog = vec![food("burger", 5, 5, 1), mayoflex(30.0)];
    let planner = planner(100.0, &catalog, &snapshot);
    let burger = Arc::clone(&planner.simple_entries()[0]);

    let (bundle, value) = planner.consumption_value_and_bundle(&burger, ModifierOverrides::none());
    assert_eq!(target_names(&bundle), vec!["burger", known::MAYOFLEX]);
    assert_eq!(value, 570.0);
}

#[test]
fn test_designated_mayo_wins() {
    let snapshot = snapshot_with_capacity(2, 0, 0);
    let catalog = vec![
        food("burger", 5, 5, 1).with_mayo("Mayodiol"),
        food("fries", 5, 5, 1).with_mayo("Mayostat"),
        mayo("Mayodiol", 10.0),
        mayoflex(30.0),
    ];
    let planner = planner(100.0, &catalog, &snapshot);
    let burger = Arc::clone(&planner.simple_entries()[0]);
    let fries = Arc::clone(&planner.simple_entries()[1]);

    let (bundle, value) = planner.consumption_value_and_bundle(&burger, ModifierOverrides::none());
    assert_eq!(target_names(&bundle), vec!["burger", "Mayodiol"]);
    assert_eq!(value, 490.0);

    // designated but not in the catalog: no mayo at all
    let (bundle, value) = planner.consumption_value_and_bundle(&fries, ModifierOverrides::none());
    assert!(bundle.helpers().is_empty());
    assert_eq!(value, 500.0);
}

#[test]
fn test_spleen_value_and_cleaner_bonus() {
    let snapshot = snapshot_with_capacity(5, 0, 4);
    let catalog = vec![
        spleen("agua", 4, 6, 4).with_price(100.0),
        spleen("junk", 1, 1, 1).with_price(1000.0),
        slider(0.0),
    ];
    let planner = planner(100.0, &catalog, &snapshot);
    assert_eq!(planner.spleen_value(), 100.0);

    let slider = Arc::clone(&planner.simple_entries()[2]);
    // 22 adventures plus 5 spleen at 100 each
    assert_eq!(
        planner.consumption_value(&slider, ModifierOverrides::none()),
        2700.0
    );
}

#[test]
fn test_spleen_value_never_negative() {
    let snapshot = snapshot_with_capacity(0, 0, 4);
    let catalog = vec![spleen("junk", 1, 1, 1).with_price(1000.0)];
    assert_eq!(planner(100.0, &catalog, &snapshot).spleen_value(), 0.0);
}

#[test]
fn test_plan_category_respects_capacity_and_maximum() {
    let snapshot = snapshot_with_capacity(0, 0, 0);
    let catalog = vec![
        food("hot dog", 3, 5, 2),
        food("sushi", 6, 6, 1).with_maximum(2),
        salad("salad", 9, 12, 3),
    ];
    let planner = planner(100.0, &catalog, &snapshot);

    for capacity in 0..=12 {
        let (value, plan) = planner
            .plan_category(Organ::Food, capacity, ModifierOverrides::none())
            .unwrap();
        let used: i64 = plan
            .iter()
            .map(|e| e.bundle.target().size * i64::from(e.quantity))
            .sum();
        assert!(used <= capacity);
        assert!(value >= 0.0);
        for entry in &plan {
            if entry.bundle.target().is("sushi") {
                assert!(entry.quantity <= 2);
            }
        }
    }
}

#[test]
fn test_plan_category_uses_remaining_uses() {
    let snapshot = snapshot_with_capacity(5, 0, 0).with_remaining_uses("sushi", 1);
    let catalog = vec![food("sushi", 6, 6, 1), food("rice", 1, 1, 1)];
    let planner = planner(100.0, &catalog, &snapshot);

    let (value, plan) = planner
        .plan_category(Organ::Food, 5, ModifierOverrides::none())
        .unwrap();
    assert_eq!(value, 1000.0);
    assert_eq!(plan[0].bundle.target().id().as_str(), "sushi");
    assert_eq!(plan[0].quantity, 1);
    assert_eq!(plan[1].quantity, 4);
}

#[test]
fn test_plan_category_rejects_negative_capacity() {
    let snapshot = snapshot_with_capacity(0, 0, 0);
    let catalog = vec![food("pizza", 3, 5, 1)];
    let err = planner(100.0, &catalog, &snapshot)
        .plan_category(Organ::Food, -1, ModifierOverrides::none())
        .unwrap_err();
    assert!(matches!(err, dietforge_core::DietForgeError::Precondition(_)));
}

#[test]
fn test_plan_categories_skips_negative_organs() {
    let snapshot = snapshot_with_capacity(0, 0, 0);
    let catalog = vec![food("pizza", 3, 5, 1), booze("gin", 2, 2, 1)];
    let planner = planner(100.0, &catalog, &snapshot);

    let (value, plan) = planner
        .plan_categories(&Capacities::new(-1, 2, 0), ModifierOverrides::none())
        .unwrap();
    assert_eq!(value, 400.0);
    assert_eq!(plan.len(), 1);
    assert!(plan[0].bundle.target().is("gin"));
    assert_eq!(planner.stats().snapshot().selector_calls, 1);
}

#[test]
fn test_zero_capacity_organ_takes_free_rows() {
    let snapshot = snapshot_with_capacity(0, 0, 0);
    let catalog = vec![
        booze("gin", 2, 2, 1),
        booze("free shot", 2, 2, 0).with_maximum(1),
    ];
    let planner = planner(100.0, &catalog, &snapshot);

    let (value, plan) = planner
        .plan_categories(&Capacities::new(-1, 0, 0), ModifierOverrides::none())
        .unwrap();
    assert_eq!(value, 200.0);
    assert_eq!(plan.len(), 1);
    assert!(plan[0].bundle.target().is("free shot"));
    assert_eq!(plan[0].quantity, 1);
}

#[test]
fn test_overrides_raise_values() {
    let snapshot = snapshot_with_capacity(0, 2, 0);
    let catalog = vec![dietforge_test::catalog::wine("red", 8, 8, 1)];
    let planner = planner(100.0, &catalog, &snapshot);
    let red = Arc::clone(&planner.simple_entries()[0]);

    let plain = planner.consumption_value(&red, ModifierOverrides::none());
    let palate = planner.consumption_value(
        &red,
        ModifierOverrides::none().with(ModifierFlag::RefinedPalate),
    );
    assert_eq!(plain, 800.0);
    assert_eq!(palate, 1000.0);
}
