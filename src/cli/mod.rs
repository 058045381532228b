//! Command-line interface

pub mod output;

use crate::core::BlogConfig;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Generate a long-form technical blog post with iterative writer, reviewer
/// and SEO passes
#[derive(Debug, Parser, Clone)]
#[command(name = "blog-pipeline")]
#[command(version)]
#[command(about = "Iterative writer/reviewer/SEO blog generation on a hosted LLM", long_about = None)]
#[command(after_help = "Examples:\n  \
    blog-pipeline --topic \"Kubernetes Autoscaling\"\n  \
    blog-pipeline -t \"Rust Error Handling\" --iterations 5 --html\n  \
    blog-pipeline -t \"Vector Databases\" --research --json")]
pub struct Cli {
    /// Blog topic
    #[arg(short, long)]
    pub topic: String,

    /// Refinement iterations [default: 3]
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub iterations: Option<u32>,

    /// Hosted model name [default: gpt-4o]
    #[arg(short, long)]
    pub model: Option<String>,

    /// Output file name [default: <slug>_<YYYYmmdd_HHMM>.md]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output directory, created if missing [default: output]
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Also write an HTML version
    #[arg(long)]
    pub html: bool,

    /// Also write a JSON summary
    #[arg(long)]
    pub json: bool,

    /// Suppress progress output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to a YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Run web research before the first draft (needs TAVILY_API_KEY)
    #[arg(long)]
    pub research: bool,
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }

    /// Overlay the flags that were given onto a loaded configuration
    pub fn apply_to(&self, config: &mut BlogConfig) {
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if let Some(model) = &self.model {
            config.model.name = model.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if self.research {
            config.research.enabled = true;
        }
    }

    /// Default tracing filter directive for the chosen verbosity
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}
