pub mod traits;
pub mod world;
pub mod fitness;
pub mod evolution;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use world::WorldConfig;
pub use fitness::{FitnessConfig, TreasureBonus};
pub use evolution::{EvolutionConfig, BreedingSource, ReportMode};
pub use traits::ConfigSection;
