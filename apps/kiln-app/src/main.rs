//! `kiln [project.json] [catalog.json]`
//!
//! Loads the project settings and catalog (falling back to defaults and the
//! mock catalog), assembles one random hybrid and prints its layout as JSON.

use std::error::Error;
use std::fs::File;
use std::io::BufReader;

use kiln_app_lib::{assemble_hybrid, catalog_info, generate_hybrid, AppState};
use kiln_core::mock::{mock_catalog, TOTAL_MOCK_ARTIFACTS};
use kiln_core::{Catalog, SeededRng};
use kiln_io::{CatalogReader, ProjectMeta, ProjectSettings};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run().await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);

    let settings = match args.next() {
        Some(path) => ProjectMeta::load(&path)?.settings,
        None => ProjectSettings::default(),
    };

    let catalog = match args.next() {
        Some(path) => load_catalog(&path, &settings)?,
        None => {
            log::info!("no catalog given, generating {} mock artifacts", TOTAL_MOCK_ARTIFACTS);
            mock_catalog(TOTAL_MOCK_ARTIFACTS, &mut SeededRng::new(settings.seed))
        }
    };

    let state = AppState::from_settings(catalog, settings);
    let info = catalog_info(&state)?;
    log::info!(
        "catalog: {} artifacts across {} regions",
        info.artifact_count,
        info.regions.len()
    );

    let hybrid = generate_hybrid(&state)?;
    log::info!(
        "assembling {} / {} / {}",
        hybrid.neck.id,
        hybrid.body.id,
        hybrid.base.id
    );
    let layout = assemble_hybrid(&state).await?;
    println!("{}", serde_json::to_string_pretty(&layout)?);
    Ok(())
}

fn load_catalog(path: &str, settings: &ProjectSettings) -> Result<Catalog, Box<dyn Error>> {
    let file = File::open(path).map_err(|e| format!("Failed to open catalog {}: {}", path, e))?;
    let mut reader = CatalogReader::new(BufReader::new(file)).with_policy(settings.locator_policy());
    Ok(reader.read()?)
}
