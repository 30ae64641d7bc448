use super::{
    evolution::EvolutionConfig,
    fitness::FitnessConfig,
    traits::ConfigSection,
    world::WorldConfig,
};
use crate::error::FinderError;
use ::config::{Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

/// Environment variable prefix, e.g. `FINDER_EVOLUTION__POPULATION_SIZE=50`
pub const ENV_PREFIX: &str = "FINDER";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub fitness: FitnessConfig,
    pub evolution: EvolutionConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), FinderError> {
        validate_section(&self.world)?;
        validate_section(&self.fitness)?;
        validate_section(&self.evolution)?;
        Ok(())
    }
}

/// Tags a section's validation message with the TOML table it came from
fn validate_section<S: ConfigSection>(section: &S) -> Result<(), FinderError> {
    section.validate().map_err(|e| match e {
        FinderError::Configuration(msg) => {
            FinderError::Configuration(format!("[{}] {}", S::section_name(), msg))
        }
        other => other,
    })
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    /// Layers an optional TOML file and `FINDER_*` environment variables over the defaults
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), FinderError> {
        self.load_layered(path.as_ref(), ENV_PREFIX)
    }

    pub fn load_layered(&self, path: &Path, env_prefix: &str) -> Result<(), FinderError> {
        let settings = ::config::Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix(env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;

        log::debug!("Configuration loaded from '{}'", path.display());
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), FinderError> {
        let config = self.get();
        let toml_str = toml::to_string_pretty(&config)
            .map_err(|e| FinderError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Applies `f` and keeps the result only if it still validates
    pub fn update<F>(&self, f: F) -> Result<(), FinderError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.config.write().unwrap_or_else(PoisonError::into_inner);
        let mut candidate = config.clone();
        f(&mut candidate);
        candidate.validate()?;
        *config = candidate;
        Ok(())
    }
}
