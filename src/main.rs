use anyhow::Context;
use std::env;
use std::path::Path;
use treasure_finder::config::ConfigManager;
use treasure_finder::engines::generation::{EvolutionEngine, LogProgressCallback};

/// Usage: `treasure-finder [config.toml] [report.json]`
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let config_path = args.get(1).map(|s| s.as_str()).unwrap_or("finder.toml");
    let report_path = args.get(2);

    let manager = ConfigManager::new();
    manager
        .load_from_file(config_path)
        .with_context(|| format!("Failed to load configuration from '{}'", config_path))?;
    let config = manager.get();
    log::info!(
        "Configuration loaded: population {}, generations {}, seed {:?}",
        config.evolution.population_size,
        config.evolution.num_generations,
        config.evolution.seed
    );

    let mut engine = EvolutionEngine::new(&config)?;
    let report = engine.run(LogProgressCallback::new(config.evolution.num_generations))?;

    log::info!("Evolution complete after {} generations", report.generations_run());
    if let Some(champion) = &report.champion {
        log::info!(
            "Champion from generation {}: fitness {:.4}, position {}, treasures {:?}",
            champion.generation + 1,
            champion.fitness,
            champion.trace.final_position,
            champion.trace.found_indices()
        );
        log::debug!("\n{}", champion.genome.memory_table());
    }

    if let Some(path) = report_path {
        let json = report.to_json()?;
        std::fs::write(Path::new(path), json)
            .with_context(|| format!("Failed to write report to '{}'", path))?;
        log::info!("Report written to '{}'", path);
    }

    Ok(())
}
