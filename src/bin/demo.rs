//! Exercises both cores end to end against in-memory fakes: evolves a
//! garden layout for a chosen objective, then fits a cluster model over a
//! handful of synthetic users and ranks a recommendation.
use std::sync::Arc;

use plantgen_core::app::AppContext;
use plantgen_core::catalog::{
    CompatibilityPair, CompatibilityTable, InMemoryCatalogProvider, Plant, PlantType, SunRequirement,
};
use plantgen_core::clustering::provider::{CategoryBreakdown, GardenRecord, InMemoryUserGardenProvider, UserRecord};
use plantgen_core::clustering::{extract_user_features, FeaturePipeline, MixedTypeClusterer};
use plantgen_core::config::AppConfig;
use plantgen_core::layout::{GardenConstraints, GardenObjective};
use plantgen_core::notifications::LoggingNotifier;
use plantgen_core::optimizer::{CancellationToken, GeneticConfig, GeneticOptimizer, LayoutRequest, OptimizationOutcome};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn sample_catalog() -> InMemoryCatalogProvider {
    let plants = vec![
        Plant::new(
            1,
            "tomato",
            "Solanum lycopersicum",
            vec![PlantType::Vegetable],
            SunRequirement::High,
            8.0,
            80,
            "loam",
            10.0,
            vec!["rich in lycopene".to_string()],
            0.2,
        )
        .unwrap(),
        Plant::new(
            2,
            "basil",
            "Ocimum basilicum",
            vec![PlantType::Aromatic, PlantType::Medicinal],
            SunRequirement::Medium,
            4.0,
            60,
            "loam",
            8.0,
            vec!["digestive aid".to_string()],
            0.1,
        )
        .unwrap(),
        Plant::new(
            3,
            "marigold",
            "Tagetes erecta",
            vec![PlantType::Ornamental],
            SunRequirement::High,
            3.0,
            70,
            "sandy",
            5.0,
            vec!["pest deterrent".to_string()],
            0.15,
        )
        .unwrap(),
    ];
    let pairs = vec![CompatibilityPair::new("tomato", "basil", 0.8).unwrap()];
    InMemoryCatalogProvider::new(plants, pairs)
}

fn run_layout_demo() {
    let catalog = sample_catalog();
    let plants = plantgen_core::catalog::CatalogProvider::list_plants(&catalog).unwrap();
    let pairs = plantgen_core::catalog::CatalogProvider::list_compatibility_pairs(&catalog).unwrap();
    let compat = CompatibilityTable::build(&pairs);

    let request = LayoutRequest::new(
        GardenObjective::Alimenticio,
        GardenConstraints::new(2.0, 150.0, 500.0, 120).unwrap(),
    );
    let optimizer = GeneticOptimizer::new(GeneticConfig::default());
    let mut rng = StdRng::seed_from_u64(42);
    let outcome = optimizer.run(&request, &plants, &compat, &mut rng, &CancellationToken::new());

    match outcome {
        OptimizationOutcome::Solutions { solutions, generations_executed, convergence_reason, .. } => {
            println!("layout search ran {generations_executed} generations, stopped: {}", convergence_reason.as_str());
            for solution in &solutions {
                println!(
                    "  rank {}: fitness={:.3} water={:.1}L cost=${:.0} plants={:?}",
                    solution.rank, solution.layout.fitness, solution.total_water_weekly, solution.total_cost, solution.plant_counts
                );
            }
        }
        OptimizationOutcome::Empty { reason } => println!("layout search produced nothing: {reason}"),
    }
}

fn sample_users_and_gardens() -> (Vec<UserRecord>, Vec<GardenRecord>) {
    let mut users = Vec::new();
    let mut gardens = Vec::new();
    for i in 0..12 {
        let id = format!("user-{i}");
        users.push(UserRecord {
            id: id.clone(),
            experience_level: (i % 5) as u8,
            has_push_token: i % 2 == 0,
            profile_image_present: i % 3 == 0,
            account_age_days: 30 + i as u32 * 5,
        });
        gardens.push(GardenRecord {
            id: format!("garden-{i}"),
            owner_id: id,
            name: "backyard".to_string(),
            description: String::new(),
            active: true,
            area: 1.0 + (i % 3) as f64 * 0.5,
            weekly_water_liters: 80.0 + i as f64 * 4.0,
            maintenance_minutes: 60.0,
            plant_count: 6,
            time_of_life_days: 90,
            streak_days: 10,
            plant_types_present: vec![PlantType::Vegetable, PlantType::Aromatic],
            category_breakdown: CategoryBreakdown {
                vegetable: 0.6,
                medicinal: 0.1,
                ornamental: 0.1,
                aromatic: 0.2,
            },
            objective: Some(GardenObjective::Alimenticio),
            location: Some((16.75, -93.11)),
        });
    }
    (users, gardens)
}

fn run_clustering_demo() {
    let (users, gardens) = sample_users_and_gardens();

    let raw_features: Vec<_> = users
        .iter()
        .map(|user| {
            let owned: Vec<_> = gardens.iter().filter(|g| g.owner_id == user.id).cloned().collect();
            extract_user_features(user, &owned)
        })
        .collect();

    let mut pipeline = FeaturePipeline::new();
    let points = pipeline.fit_transform(&raw_features);
    let gamma = pipeline.scaler().mean_scale();

    let mut clusterer = MixedTypeClusterer::new(3, gamma, 10);
    let mut rng = StdRng::seed_from_u64(7);
    let outcome = clusterer.fit(&points, &mut rng);
    println!("clustering fit {} users into 3 clusters, cost={:.3}", points.len(), outcome.cost);
    println!("labels: {:?}", outcome.labels);
}

fn run_admin_demo() {
    let (users, gardens) = sample_users_and_gardens();
    let catalog = Arc::new(sample_catalog());
    let user_gardens = Arc::new(InMemoryUserGardenProvider::new(users, gardens));
    let notifier = Arc::new(LoggingNotifier);
    let ctx = AppContext::new(catalog, user_gardens, notifier, AppConfig::default());

    let admin = ctx.cluster_admin();
    let mut rng = StdRng::seed_from_u64(11);
    match admin.train(&mut rng, &CancellationToken::new()) {
        Ok(report) => println!(
            "admin: trained k={} n_samples={} silhouette={:.3}",
            report.k, report.n_samples, report.silhouette_score
        ),
        Err(err) => {
            println!("admin: training skipped ({err})");
            return;
        }
    }

    let status = admin.status().unwrap();
    println!("admin: status k={} silhouette={:.3}", status.k, status.silhouette_score);
    for cluster in admin.clusters().unwrap() {
        println!("admin: cluster {} has {} members", cluster.cluster_id, cluster.size);
        let report = admin.notify_cluster(cluster.cluster_id).unwrap();
        println!(
            "admin: notified {} users in cluster {} (skipped {})",
            report.notified, cluster.cluster_id, report.skipped_no_candidates
        );
    }
}

fn main() {
    run_layout_demo();
    run_clustering_demo();
    run_admin_demo();
}
