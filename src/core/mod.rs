//! Core domain models
//!
//! This module defines the pipeline state, the reports the advisory steps
//! produce, and the configuration that shapes a run.

pub mod config;
pub mod feedback;
pub mod metrics;
pub mod sections;
pub mod state;
pub mod step;

pub use config::BlogConfig;
pub use feedback::*;
pub use metrics::ContentMetrics;
pub use state::*;
pub use step::*;
