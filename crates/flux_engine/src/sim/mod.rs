//! Simulation engine
//!
//! Orchestrates registration of scene objects, the per-pass octree
//! rebuild, and the sample-point x light accumulation that produces one
//! flux scalar per volume. Passes are non-reentrant and coalesce
//! superseding requests into exactly one trailing re-run.

mod config;
mod engine;
mod photometry;
mod scheduler;

pub use config::SimulationConfig;
pub use engine::Simulation;
pub use scheduler::PassScheduler;
