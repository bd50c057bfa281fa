//! Tests for the interaction resolver.

use super::*;
use dietforge_core::{known, Entry, ModifierFlag, Snapshot};
use dietforge_test::catalog::{booze, food, pocket_wish, spice_melange, spleen, wine};
use dietforge_test::snapshot_with_capacity;

use crate::interaction::{InteractionRule, InteractionTable};

const TONIC: &str = "heavy tonic";

fn table() -> InteractionTable {
    InteractionTable::default().with_rule(
        InteractionRule::new(TONIC)
            .with_delta(Organ::Food, -3)
            .with_delta(Organ::Booze, -3),
    )
}

fn tonic(standalone: f64) -> Entry {
    Entry::helper(TONIC).with_additional_value(standalone)
}

fn base_catalog() -> Vec<Entry> {
    vec![food("pizza", 4, 4, 1), booze("gin", 3, 3, 1)]
}

fn resolve(catalog: &[Entry], snapshot: &Snapshot, capacities: Capacities) -> (Branch, u64, u64) {
    let planner = AllocationPlanner::new(100.0, catalog, snapshot, &table());
    let branch = InteractionResolver::new(&planner)
        .resolve(capacities, ModifierOverrides::none())
        .unwrap();
    let stats = planner.finish();
    (branch, stats.branches_explored, stats.branches_skipped)
}

fn quantities(branch: &Branch) -> Vec<(String, u32)> {
    branch
        .entries
        .iter()
        .map(|e| (e.bundle.target().id().to_string(), e.quantity))
        .collect()
}

#[test]
fn test_without_wins_when_cost_exceeds_value() {
    let snapshot = snapshot_with_capacity(0, 0, 0);
    let mut catalog = base_catalog();
    catalog.push(tonic(200.0));

    let (branch, explored, skipped) = resolve(&catalog, &snapshot, Capacities::new(5, 5, 0));
    // without: 5 * 400 + 5 * 300; with: 2 * 400 + 2 * 300 + 200
    assert_eq!(branch.value, 3500.0);
    assert_eq!(
        quantities(&branch),
        vec![("pizza".to_string(), 5), ("gin".to_string(), 5)]
    );
    assert_eq!(explored, 3);
    assert_eq!(skipped, 0);
}

#[test]
fn test_with_wins_and_shrinks_capacities() {
    let snapshot = snapshot_with_capacity(0, 0, 0);
    let mut catalog = base_catalog();
    catalog.push(tonic(3000.0));

    let (branch, _, _) = resolve(&catalog, &snapshot, Capacities::new(5, 5, 0));
    assert_eq!(branch.value, 4400.0);
    assert_eq!(
        quantities(&branch),
        vec![
            (TONIC.to_string(), 1),
            ("pizza".to_string(), 2),
            ("gin".to_string(), 2)
        ]
    );
}

#[test]
fn test_tie_favors_without() {
    let snapshot = snapshot_with_capacity(0, 0, 0);
    let mut catalog = base_catalog();
    catalog.push(tonic(2100.0));

    let (branch, _, _) = resolve(&catalog, &snapshot, Capacities::new(5, 5, 0));
    assert_eq!(branch.value, 3500.0);
    assert!(branch.entries.iter().all(|e| !e.bundle.target().is(TONIC)));
}

#[test]
fn test_overdrawn_organ_is_left_unplanned() {
    let snapshot = snapshot_with_capacity(0, 0, 0);
    let mut catalog = base_catalog();
    catalog.push(tonic(1_000_000.0));

    // with: food ends at -1 and is skipped, booze keeps 2 gin
    let (branch, explored, _) = resolve(&catalog, &snapshot, Capacities::new(2, 5, 0));
    assert_eq!(explored, 3);
    assert_eq!(branch.value, 1_000_600.0);
    assert_eq!(
        quantities(&branch),
        vec![(TONIC.to_string(), 1), ("gin".to_string(), 2)]
    );
}

#[test]
fn test_overdrawn_with_branch_still_competes() {
    let snapshot = snapshot_with_capacity(0, 0, 0);
    let mut catalog = base_catalog();
    catalog.push(tonic(200.0));

    // without: 2 * 400 + 5 * 300 beats 2 * 300 + 200
    let (branch, explored, _) = resolve(&catalog, &snapshot, Capacities::new(2, 5, 0));
    assert_eq!(explored, 3);
    assert_eq!(branch.value, 2300.0);
    assert_eq!(
        quantities(&branch),
        vec![("pizza".to_string(), 2), ("gin".to_string(), 5)]
    );
}

#[test]
fn test_exhausted_entry_is_skipped() {
    let snapshot = snapshot_with_capacity(0, 0, 0);
    let mut catalog = base_catalog();
    catalog.push(tonic(3000.0).with_maximum(0));

    let (branch, explored, skipped) = resolve(&catalog, &snapshot, Capacities::new(5, 5, 0));
    assert_eq!(explored, 2);
    assert_eq!(skipped, 1);
    assert_eq!(branch.value, 3500.0);
}

#[test]
fn test_freed_capacity_is_used() {
    let snapshot = snapshot_with_capacity(0, 0, 0);
    let mut catalog = base_catalog();
    catalog.push(spice_melange(500.0));

    let (branch, _, _) = resolve(&catalog, &snapshot, Capacities::new(1, 1, 0));
    // with: 4 * 400 + 4 * 300 - 500 beats 700
    assert_eq!(branch.value, 2300.0);
    assert_eq!(
        quantities(&branch),
        vec![
            ("spice melange".to_string(), 1),
            ("pizza".to_string(), 4),
            ("gin".to_string(), 4)
        ]
    );
}

#[test]
fn test_implied_flags_reach_the_leaves() {
    let snapshot = snapshot_with_capacity(0, 0, 0);
    let catalog = vec![wine("red", 8, 8, 1), pocket_wish(known::REFINED_PALATE, 100.0)];

    let (branch, _, _) = resolve(&catalog, &snapshot, Capacities::new(0, 2, 0));
    // 2 * 1000 - 100 beats 2 * 800
    assert_eq!(branch.value, 1900.0);
    assert!(branch.implied.contains(ModifierFlag::RefinedPalate));

    let pricey = vec![wine("red", 8, 8, 1), pocket_wish(known::REFINED_PALATE, 500.0)];
    let (branch, _, _) = resolve(&pricey, &snapshot, Capacities::new(0, 2, 0));
    assert_eq!(branch.value, 1600.0);
    assert!(branch.implied.is_empty());
}

#[test]
fn test_spleen_delta_valued_at_spleen_rate() {
    let snapshot = snapshot_with_capacity(0, 0, 0);
    let filter = Entry::helper("mojo filter");

    let catalog = vec![spleen("agua", 4, 6, 4).with_price(100.0), filter.clone()];
    let (branch, _, _) = resolve(&catalog, &snapshot, Capacities::new(0, 0, 0));
    assert_eq!(branch.secondary_delta, 1);
    assert!(branch.entries[0].bundle.target().is("mojo filter"));

    // without any spleen entry the extra spleen is worth nothing
    let (branch, _, _) = resolve(&[filter], &snapshot, Capacities::new(0, 0, 0));
    assert_eq!(branch.secondary_delta, 0);
    assert!(branch.entries.is_empty());
}

#[test]
fn test_parallel_matches_sequential() {
    let snapshot = snapshot_with_capacity(0, 0, 0);
    let catalog = vec![
        food("pizza", 3, 5, 1),
        food("salmon", 9, 11, 3),
        booze("gin", 2, 4, 1),
        wine("red", 8, 8, 1),
        spice_melange(900.0),
        pocket_wish(known::REFINED_PALATE, 150.0),
        tonic(1500.0),
    ];
    let planner = AllocationPlanner::new(100.0, &catalog, &snapshot, &table());
    let capacities = Capacities::new(6, 5, 0);

    let sequential = InteractionResolver::new(&planner)
        .resolve(capacities, ModifierOverrides::none())
        .unwrap();
    let parallel = InteractionResolver::new(&planner)
        .with_parallel_branches(true)
        .resolve(capacities, ModifierOverrides::none())
        .unwrap();
    assert_eq!(sequential, parallel);
}

#[test]
fn test_removing_an_interacting_entry_never_helps() {
    let snapshot = snapshot_with_capacity(0, 0, 0);
    let catalog = vec![
        food("pizza", 3, 5, 1),
        booze("gin", 2, 4, 1),
        wine("red", 8, 8, 1),
        spice_melange(900.0),
        pocket_wish(known::REFINED_PALATE, 150.0),
        tonic(1500.0),
    ];
    let capacities = Capacities::new(4, 4, 0);
    let (full, _, _) = resolve(&catalog, &snapshot, capacities);

    for removed in 3..catalog.len() {
        let reduced: Vec<Entry> = catalog
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != removed)
            .map(|(_, e)| e.clone())
            .collect();
        let (branch, _, _) = resolve(&reduced, &snapshot, capacities);
        assert!(
            full.score(0.0) + 1e-6 >= branch.score(0.0),
            "removing {} raised the value",
            catalog[removed]
        );
    }
}
