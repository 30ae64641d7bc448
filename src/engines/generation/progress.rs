use super::evolution_engine::ProgressCallback;
use super::report::GenerationSummary;
use std::sync::mpsc::Sender;

/// Narrates progress through the `log` facade
pub struct LogProgressCallback {
    total_generations: usize,
}

impl LogProgressCallback {
    pub fn new(total_generations: usize) -> Self {
        Self { total_generations }
    }
}

impl ProgressCallback for LogProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        log::trace!("Generation {} starting...", generation + 1);
    }

    fn on_generation_complete(&mut self, summary: &GenerationSummary) {
        log::info!(
            "Generation {}/{} complete. Best fitness: {:.4}, treasures: {}",
            summary.generation + 1,
            self.total_generations,
            summary.best_fitness,
            summary.treasures_found
        );
        log::debug!("Best moves: {}", summary.best_moves_rendered());
    }
}

// For consumers on another thread (charting, UI)
pub struct ChannelProgressCallback {
    sender: Sender<ProgressMessage>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressMessage {
    GenerationStart(usize),
    GenerationComplete { generation: usize, fitness: f64, best_fitness: f64 },
}

impl ChannelProgressCallback {
    pub fn new(sender: Sender<ProgressMessage>) -> Self {
        Self { sender }
    }
}

impl ProgressCallback for ChannelProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationStart(generation));
    }

    fn on_generation_complete(&mut self, summary: &GenerationSummary) {
        let _ = self.sender.send(ProgressMessage::GenerationComplete {
            generation: summary.generation,
            fitness: summary.fitness,
            best_fitness: summary.best_fitness,
        });
    }
}
