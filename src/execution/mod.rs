//! Pipeline execution engine

pub mod controller;
pub mod engine;
pub mod executor;
pub mod prompts;

pub use controller::{advance, Transition};
pub use engine::{EventHandler, ExecutionEngine, ExecutionEvent};
pub use executor::{ResearchSettings, StepExecutor, StepOutput};
