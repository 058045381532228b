use anyhow::{bail, Context, Result};
use blog_pipeline::{
    agent::{AgentClientConfig, ChatCompletionsClient},
    cli::{output::*, Cli},
    core::{BlogConfig, BlogState},
    execution::{ExecutionEngine, ResearchSettings},
    format::{default_output_name, export, ExportOptions},
    research::TavilyClient,
};
use chrono::Local;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::from_args();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    let config = load_config(&cli)?;

    let api_key = match non_empty_env("OPENAI_API_KEY") {
        Some(key) => key,
        None => bail!(
            "OPENAI_API_KEY is not set.\n\
             Export it in your shell or add it to a .env file:\n  \
             export OPENAI_API_KEY=your-key-here"
        ),
    };

    let research = research_settings(&config)?;

    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!("Failed to create output directory {}", config.output_dir.display())
    })?;
    let output_name = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(default_output_name(&cli.topic, &Local::now())));
    let output_path = config.output_dir.join(output_name);

    if !cli.quiet {
        println!("{}\n", format_config_panel(&cli.topic, &config, &output_path));
    }

    let client = ChatCompletionsClient::new(AgentClientConfig::from_model_config(&config.model, api_key))
        .context("Failed to create model client")?;
    let mut engine = ExecutionEngine::new(client, config.targets.clone());
    if let Some(settings) = research {
        engine = engine.with_research(settings);
    }
    if !cli.quiet {
        engine.add_event_handler(progress_handler(create_spinner()));
    }

    let state = BlogState::new(cli.topic.clone(), config.iterations)?;
    let state = match engine.run(state).await {
        Ok(state) => state,
        Err(e) => {
            eprintln!("\n{} {}", CROSS, style("Generation failed").red());
            return Err(e).context("Blog generation failed");
        }
    };

    let files = export(
        &state,
        &output_path,
        ExportOptions {
            html: cli.html,
            json: cli.json,
        },
        Local::now(),
    )
    .context("Failed to export blog")?;

    println!("\n{}", format_saved_files(&files));
    if !cli.quiet {
        println!("\n{}", format_summary(&state));
    }

    Ok(())
}

/// Defaults, then the config file, then CLI flags, then environment
fn load_config(cli: &Cli) -> Result<BlogConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading config from {}", path.display());
            BlogConfig::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?
        }
        None => BlogConfig::default(),
    };

    cli.apply_to(&mut config);
    if let Some(base_url) = non_empty_env("OPENAI_BASE_URL") {
        config.model.base_url = base_url;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn research_settings(config: &BlogConfig) -> Result<Option<ResearchSettings>> {
    if !config.research.enabled {
        return Ok(None);
    }

    match non_empty_env("TAVILY_API_KEY") {
        Some(key) => {
            let client = TavilyClient::new(key).context("Failed to create search client")?;
            Ok(Some(ResearchSettings {
                provider: Box::new(client),
                max_results: config.research.max_results,
            }))
        }
        None => {
            warn!("Research requested but TAVILY_API_KEY is not set; continuing without research");
            Ok(None)
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
