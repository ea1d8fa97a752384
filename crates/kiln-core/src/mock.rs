use crate::artifact::{Artifact, FragmentParts};
use crate::catalog::Catalog;
use crate::rng::{choose, RandomSource};

/// Size of the demo catalog.
pub const TOTAL_MOCK_ARTIFACTS: usize = 60;

pub const REGIONS: [&str; 6] = [
    "East Asia",
    "Mediterranean",
    "West Africa",
    "Mesoamerica",
    "Northern Europe",
    "Persia",
];

pub const PERIODS: [&str; 6] = [
    "Neolithic",
    "Bronze Age",
    "Iron Age",
    "Classical",
    "Ming Dynasty",
    "Modern",
];

const PLACEHOLDER_HOST: &str = "https://picsum.photos/seed";

/// Generate a catalog of `count` placeholder artifacts spread over the sphere.
pub fn mock_catalog(count: usize, rng: &mut impl RandomSource) -> Catalog {
    let mut catalog = Catalog::new();
    for i in 0..count {
        catalog.add(mock_artifact(i + 1, rng));
    }
    log::debug!("generated mock catalog with {} artifacts", catalog.len());
    catalog
}

fn mock_artifact(n: usize, rng: &mut impl RandomSource) -> Artifact {
    let id = format!("vase_{n}");
    let lat = rng.next_range(-90.0, 90.0);
    let lon = rng.next_range(-180.0, 180.0);
    let region = choose(&REGIONS, rng).copied().unwrap_or("Unknown");
    let period = choose(&PERIODS, rng).copied().unwrap_or("Unknown");

    // Seeded locators stay stable across reloads.
    let seed = format!("latent_kiln_{id}");
    Artifact::new(&id, region)
        .with_period(period)
        .with_coordinates(lon, lat)
        .with_preview(&format!("{PLACEHOLDER_HOST}/{seed}/300/400"))
        .with_parts(FragmentParts::new(
            &format!("{PLACEHOLDER_HOST}/{seed}_neck/150/100"),
            &format!("{PLACEHOLDER_HOST}/{seed}_body/200/200"),
            &format!("{PLACEHOLDER_HOST}/{seed}_base/150/80"),
        ))
}
