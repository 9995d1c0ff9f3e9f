//! The ten cross-cutting invariants from spec.md §8, exercised against the
//! public API the way a caller embedding this crate would observe them.
mod common;

use std::sync::Arc;

use plantgen_core::catalog::{CompatibilityPair, CompatibilityTable, Plant, PlantType, SunRequirement};
use plantgen_core::clustering::provider::{CategoryBreakdown, GardenRecord, InMemoryUserGardenProvider, UserRecord};
use plantgen_core::clustering::{extract_user_features, FeaturePipeline, MixedTypeClusterer, TrainingPipeline, TrainingSettings};
use plantgen_core::layout::{evaluate, GardenConstraints, GardenLayout, GardenObjective};
use plantgen_core::optimizer::{CancellationToken, GeneticConfig, GeneticOptimizer, LayoutRequest, OptimizationOutcome};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn plant(id: u32, species: &str, water: f64, size: f64, types: Vec<PlantType>) -> Plant {
    Plant::new(
        id,
        species,
        species,
        types,
        SunRequirement::Medium,
        water,
        60,
        "loam",
        5.0,
        vec![],
        size,
    )
    .unwrap()
}

fn plants_by_id(plants: &[Plant]) -> std::collections::HashMap<u32, Plant> {
    plants.iter().map(|p| (p.id, p.clone())).collect()
}

/// Invariant 1: every returned layout satisfies `1 <= width*height <= 5`,
/// and every non-empty cell references an existing plant id.
#[test]
fn invariant_1_layout_shape_and_cell_references_are_valid() {
    let (plants, compat) = common::fifty_plant_catalog();
    let known_ids: std::collections::HashSet<u32> = plants.iter().map(|p| p.id).collect();
    let request = LayoutRequest::new(
        GardenObjective::Alimenticio,
        GardenConstraints::new(2.0, 150.0, 400.0, 90).unwrap(),
    );
    let optimizer = GeneticOptimizer::new(GeneticConfig::default());
    let mut rng = StdRng::seed_from_u64(3);
    let outcome = optimizer.run(&request, &plants, &compat, &mut rng, &CancellationToken::new());

    let OptimizationOutcome::Solutions { solutions, .. } = outcome else {
        panic!("expected solutions");
    };
    for solution in &solutions {
        let area = solution.layout.width() * solution.layout.height();
        assert!((1.0..=5.0).contains(&area), "area {area} out of bounds");
        for id in solution.layout.distinct_ids() {
            assert!(known_ids.contains(&id), "layout references unknown plant id {id}");
        }
    }
}

/// Invariant 2: for every generation g >= 1, bestFitness(g) >= bestFitness(g-1)
/// (elitism monotonicity).
#[test]
fn invariant_2_best_fitness_is_monotonically_non_decreasing() {
    let (plants, compat) = common::fifty_plant_catalog();
    let request = LayoutRequest::new(
        GardenObjective::Alimenticio,
        GardenConstraints::new(2.0, 150.0, 400.0, 90).unwrap(),
    );
    let optimizer = GeneticOptimizer::new(GeneticConfig::default());
    let mut rng = StdRng::seed_from_u64(5);
    let outcome = optimizer.run(&request, &plants, &compat, &mut rng, &CancellationToken::new());

    let OptimizationOutcome::Solutions { history, .. } = outcome else {
        panic!("expected solutions");
    };
    for pair in history.windows(2) {
        assert!(
            pair[1].best_fitness >= pair[0].best_fitness - 1e-9,
            "generation {} best {} regressed from generation {} best {}",
            pair[1].generation,
            pair[1].best_fitness,
            pair[0].generation,
            pair[0].best_fitness
        );
    }
}

/// Invariant 3: all four component metrics and aggregate fitness lie in [0,1].
#[test]
fn invariant_3_metrics_and_fitness_are_bounded_in_unit_interval() {
    let plants = vec![plant(1, "a", 8.0, 0.3, vec![PlantType::Vegetable])];
    let plants_map = plants_by_id(&plants);
    let compat = CompatibilityTable::build(&[]);
    let constraints = GardenConstraints::new(2.0, 150.0, 400.0, 90).unwrap();
    let mut layout = GardenLayout::new(1.0, 2.0, vec![vec![Some(1); 2]; 2]).unwrap();
    evaluate(&mut layout, &plants_map, &compat, GardenObjective::Alimenticio, &constraints);

    for value in [layout.cee, layout.psntpa, layout.wce, layout.ue, layout.fitness] {
        assert!((0.0..=1.0).contains(&value), "metric {value} out of [0,1]");
    }
}

/// Invariant 4: with water usage W > maxWaterWeekly, WCE = 0.
#[test]
fn invariant_4_wce_is_zero_over_water_budget() {
    let plants = vec![plant(1, "thirsty", 200.0, 0.2, vec![PlantType::Vegetable])];
    let plants_map = plants_by_id(&plants);
    let compat = CompatibilityTable::build(&[]);
    let constraints = GardenConstraints::new(1.0, 80.0, 400.0, 90).unwrap();
    let mut layout = GardenLayout::new(1.0, 1.0, vec![vec![Some(1)]]).unwrap();
    evaluate(&mut layout, &plants_map, &compat, GardenObjective::Alimenticio, &constraints);
    assert_eq!(layout.wce, 0.0);
}

/// Invariant 5: with utilization U <= 0.85, UE = U/0.85; at U = 0.85, UE = 1;
/// at U > 0.85, UE decreases linearly and stays non-negative.
#[test]
fn invariant_5_ue_peaks_at_085_and_decays_linearly_past_it() {
    let compat = CompatibilityTable::build(&[]);
    let constraints = GardenConstraints::new(2.0, 150.0, 400.0, 90).unwrap();
    let objective = GardenObjective::Alimenticio;

    // size 0.85 occupying a 1 m^2 cell area exactly hits the 0.85 optimum.
    let exact_plant = vec![plant(1, "exact", 1.0, 0.85, vec![PlantType::Vegetable])];
    let exact_map = plants_by_id(&exact_plant);
    let mut exact_layout = GardenLayout::new(1.0, 1.0, vec![vec![Some(1)]]).unwrap();
    evaluate(&mut exact_layout, &exact_map, &compat, objective, &constraints);
    assert!((exact_layout.ue - 1.0).abs() < 1e-9, "expected UE=1 at U=0.85, got {}", exact_layout.ue);

    // Half the optimum: U = 0.425, UE should be U/0.85 = 0.5.
    let half_plant = vec![plant(1, "half", 1.0, 0.425, vec![PlantType::Vegetable])];
    let half_map = plants_by_id(&half_plant);
    let mut half_layout = GardenLayout::new(1.0, 1.0, vec![vec![Some(1)]]).unwrap();
    evaluate(&mut half_layout, &half_map, &compat, objective, &constraints);
    assert!((half_layout.ue - 0.5).abs() < 1e-9, "expected UE=0.5 at U=0.425, got {}", half_layout.ue);

    // Over the optimum: U = 1.0, UE = 1 - 2*(1.0-0.85) = 0.7, still non-negative.
    let over_plant = vec![plant(1, "over", 1.0, 1.0, vec![PlantType::Vegetable])];
    let over_map = plants_by_id(&over_plant);
    let mut over_layout = GardenLayout::new(1.0, 1.0, vec![vec![Some(1)]]).unwrap();
    evaluate(&mut over_layout, &over_map, &compat, objective, &constraints);
    assert!((over_layout.ue - 0.7).abs() < 1e-9, "expected UE=0.7 at U=1.0, got {}", over_layout.ue);
    assert!(over_layout.ue >= 0.0);
    assert!(over_layout.ue < exact_layout.ue);
}

/// Invariant 6: CEE is symmetric in neighbor ordering — swapping the plants
/// at two adjacent cells whose contents are each other's species yields the
/// same CEE, since the multiset on the affected pair is preserved.
#[test]
fn invariant_6_cee_is_symmetric_under_a_multiset_preserving_swap() {
    let plants = vec![
        plant(1, "a", 5.0, 0.2, vec![PlantType::Vegetable]),
        plant(2, "b", 5.0, 0.2, vec![PlantType::Aromatic]),
    ];
    let plants_map = plants_by_id(&plants);
    let pairs = vec![CompatibilityPair::new("a", "b", 0.7).unwrap()];
    let compat = CompatibilityTable::build(&pairs);
    let constraints = GardenConstraints::new(2.0, 150.0, 400.0, 90).unwrap();

    let mut layout_ab = GardenLayout::new(1.0, 2.0, vec![vec![Some(1), Some(2)]]).unwrap();
    evaluate(&mut layout_ab, &plants_map, &compat, GardenObjective::Alimenticio, &constraints);

    let mut layout_ba = GardenLayout::new(1.0, 2.0, vec![vec![Some(2), Some(1)]]).unwrap();
    evaluate(&mut layout_ba, &plants_map, &compat, GardenObjective::Alimenticio, &constraints);

    assert!((layout_ab.cee - layout_ba.cee).abs() < 1e-12);
}

/// Invariant 7: determinism under seed — two runs with identical inputs and
/// identical PRNG seed produce bit-identical result lists.
#[test]
fn invariant_7_identical_seed_produces_bit_identical_results() {
    let (plants, compat) = common::fifty_plant_catalog();
    let request = LayoutRequest::new(
        GardenObjective::Medicinal,
        GardenConstraints::new(2.0, 150.0, 400.0, 90).unwrap(),
    );
    let optimizer = GeneticOptimizer::new(GeneticConfig::default());

    let mut rng_a = StdRng::seed_from_u64(99);
    let outcome_a = optimizer.run(&request, &plants, &compat, &mut rng_a, &CancellationToken::new());
    let mut rng_b = StdRng::seed_from_u64(99);
    let outcome_b = optimizer.run(&request, &plants, &compat, &mut rng_b, &CancellationToken::new());

    let (OptimizationOutcome::Solutions { solutions: a, .. }, OptimizationOutcome::Solutions { solutions: b, .. }) =
        (outcome_a, outcome_b)
    else {
        panic!("expected solutions from both runs");
    };
    assert_eq!(a.len(), b.len());
    for (sa, sb) in a.iter().zip(b.iter()) {
        assert_eq!(sa.layout.cells(), sb.layout.cells());
        assert_eq!(sa.layout.fitness, sb.layout.fitness);
    }
}

fn synthetic_user(id: &str, experience: u8) -> UserRecord {
    UserRecord {
        id: id.to_string(),
        experience_level: experience,
        has_push_token: experience % 2 == 0,
        profile_image_present: experience % 3 == 0,
        account_age_days: 30 + experience as u32 * 10,
    }
}

fn synthetic_garden(owner_id: &str, area: f64) -> GardenRecord {
    GardenRecord {
        id: format!("garden-{owner_id}"),
        owner_id: owner_id.to_string(),
        name: "plot".to_string(),
        description: String::new(),
        active: true,
        area,
        weekly_water_liters: 40.0 + area * 10.0,
        maintenance_minutes: 45.0,
        plant_count: 4,
        time_of_life_days: 60,
        streak_days: 5,
        plant_types_present: vec![PlantType::Vegetable],
        category_breakdown: CategoryBreakdown {
            vegetable: 0.5,
            medicinal: 0.2,
            ornamental: 0.2,
            aromatic: 0.1,
        },
        objective: Some(GardenObjective::Alimenticio),
        location: Some((16.75, -93.11)),
    }
}

/// Invariant 8: feature pipeline round-trip — `transform(fit_transform(X))`
/// equals `fit_transform(X)` up to floating-point tolerance on identical
/// input.
#[test]
fn invariant_8_feature_pipeline_transform_round_trips_fit_transform() {
    let users: Vec<UserRecord> = (0..20).map(|i| synthetic_user(&i.to_string(), (i % 5) as u8)).collect();
    let gardens: Vec<GardenRecord> = users.iter().map(|u| synthetic_garden(&u.id, 1.0 + (u.experience_level as f64) * 0.3)).collect();
    let raw: Vec<_> = users
        .iter()
        .map(|u| {
            let owned: Vec<_> = gardens.iter().filter(|g| g.owner_id == u.id).cloned().collect();
            extract_user_features(u, &owned)
        })
        .collect();

    let mut pipeline = FeaturePipeline::new();
    let fitted = pipeline.fit_transform(&raw);
    let transformed = pipeline.transform(&raw).unwrap();

    assert_eq!(fitted.len(), transformed.len());
    for (a, b) in fitted.iter().zip(transformed.iter()) {
        for (x, y) in a.numeric.iter().zip(b.numeric.iter()) {
            assert!((x - y).abs() < 1e-9, "numeric feature mismatch: {x} vs {y}");
        }
        assert_eq!(a.region_id, b.region_id);
        assert_eq!(a.objective, b.objective);
    }
}

/// Invariant 9: clusterer stability — `predict(X_train)` after `fit(X_train)`
/// agrees with the labels produced by `fit`.
#[test]
fn invariant_9_predict_after_fit_agrees_with_fit_labels() {
    let users: Vec<UserRecord> = (0..20).map(|i| synthetic_user(&i.to_string(), (i % 5) as u8)).collect();
    let gardens: Vec<GardenRecord> = users.iter().map(|u| synthetic_garden(&u.id, 1.0 + (u.experience_level as f64) * 0.3)).collect();
    let raw: Vec<_> = users
        .iter()
        .map(|u| {
            let owned: Vec<_> = gardens.iter().filter(|g| g.owner_id == u.id).cloned().collect();
            extract_user_features(u, &owned)
        })
        .collect();

    let mut pipeline = FeaturePipeline::new();
    let points = pipeline.fit_transform(&raw);
    let gamma = pipeline.scaler().mean_scale();

    let mut clusterer = MixedTypeClusterer::new(3, gamma, 10);
    let mut rng = StdRng::seed_from_u64(13);
    let outcome = clusterer.fit(&points, &mut rng);

    for (point, &label) in points.iter().zip(outcome.labels.iter()) {
        assert_eq!(clusterer.predict(point), label);
    }
}

/// Invariant 10: cluster sizes sum to N users; every user receives exactly
/// one label.
#[test]
fn invariant_10_every_user_gets_exactly_one_label_summing_to_n() {
    let users: Vec<UserRecord> = (0..20).map(|i| synthetic_user(&i.to_string(), (i % 5) as u8)).collect();
    let gardens: Vec<GardenRecord> = users.iter().map(|u| synthetic_garden(&u.id, 1.0 + (u.experience_level as f64) * 0.3)).collect();

    let provider = Arc::new(InMemoryUserGardenProvider::new(users.clone(), gardens));
    let dir = std::env::temp_dir().join(format!("plantgen-invariant10-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let pipeline = TrainingPipeline::new(provider.clone(), dir.join("model.bin"), TrainingSettings::default());
    let live = arc_swap::ArcSwap::from_pointee(plantgen_core::clustering::ClusterModel::new(
        1,
        1.0,
        Default::default(),
        None,
        vec![],
        0.0,
        0,
        chrono::Utc::now(),
    ));
    let mut rng = StdRng::seed_from_u64(21);
    pipeline.run(&live, &mut rng, &CancellationToken::new()).unwrap();

    let labels = provider.cluster_labels.lock().unwrap();
    assert_eq!(labels.len(), users.len());
    for user in &users {
        assert!(labels.contains_key(&user.id), "user {} has no cluster label", user.id);
    }
    std::fs::remove_dir_all(&dir).ok();
}
