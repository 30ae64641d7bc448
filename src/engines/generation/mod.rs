pub mod genome;
pub mod operators;
pub mod population;
pub mod breeder;
pub mod evolution_engine;
pub mod progress;
pub mod report;

pub use genome::{Genome, GENOME_LENGTH};
pub use population::{EvaluatedGenome, PopulationManager};
pub use breeder::Breeder;
pub use evolution_engine::{EvolutionEngine, ProgressCallback};
pub use progress::{LogProgressCallback, ChannelProgressCallback, ProgressMessage};
pub use report::{Champion, EvolutionReport, GenerationSummary};
