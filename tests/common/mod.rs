//! Shared fixtures for the black-box scenario tests: a standard 50-plant
//! catalog with a handful of compatibility pairs, matching the domain
//! bounds in spec.md §3 (`id in [1,50]`, positive size/harvest_days, etc).
use plantgen_core::catalog::{CompatibilityPair, CompatibilityTable, Plant, PlantType, SunRequirement};

/// Builds the standard 50-plant catalog used by S1, S3 and S4: ids 1..=50,
/// unique species names, types cycling through all four categories, and
/// sizes/water draws small enough that several plants fit within a
/// `[1.0, 5.0]` m^2 layout without blowing the default water/budget bounds.
pub fn fifty_plant_catalog() -> (Vec<Plant>, CompatibilityTable) {
    let all_types = [
        PlantType::Vegetable,
        PlantType::Medicinal,
        PlantType::Aromatic,
        PlantType::Ornamental,
    ];
    let all_suns = [SunRequirement::High, SunRequirement::Medium, SunRequirement::Low];

    let mut plants = Vec::with_capacity(50);
    for id in 1..=50u32 {
        let plant_type = vec![all_types[(id as usize - 1) % all_types.len()]];
        let sun = all_suns[(id as usize - 1) % all_suns.len()];
        let weekly_water = 1.0 + (id % 6) as f64;
        let harvest_days = 30 + (id * 3) % 90;
        let water_per_kg = 2.0 + (id % 4) as f64;
        let size = 0.05 + (id % 5) as f64 * 0.03;
        plants.push(
            Plant::new(
                id,
                format!("species-{id}"),
                format!("Species scientificus {id}"),
                plant_type,
                sun,
                weekly_water,
                harvest_days,
                "loam",
                water_per_kg,
                vec!["benefit".to_string()],
                size,
            )
            .unwrap(),
        );
    }

    let mut pairs = Vec::new();
    for id in 1..50u32 {
        pairs.push(
            CompatibilityPair::new(format!("species-{id}"), format!("species-{}", id + 1), 0.6)
                .unwrap(),
        );
    }
    let compat = CompatibilityTable::build(&pairs);
    (plants, compat)
}
