#![deny(unsafe_code)]

//! GlowTech CLI: ask the skincare advisor from the command line.

use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use glowtech_config::AppConfig;
use glowtech_core::{Advisor, Ingredient, KnowledgeBase};

/// GlowTech: skincare ingredient compatibility and product advisor.
#[derive(Parser)]
#[command(name = "glowtech", version, about, long_about = None)]
struct Cli {
    /// Path to configuration file.
    #[arg(short, long, default_value = "glowtech.toml")]
    config: PathBuf,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a single message.
    Ask {
        /// The message, e.g. "can I use niacinamide with vitamin c?"
        #[arg(required = true)]
        message: Vec<String>,
    },

    /// Answer messages from stdin until EOF or "exit".
    Chat,

    /// Show how a message is classified, as JSON.
    Classify {
        #[arg(required = true)]
        message: Vec<String>,
    },

    /// Show an ingredient profile.
    Ingredient {
        #[arg(required = true)]
        name: Vec<String>,
    },

    /// List known ingredient combinations.
    Combinations,

    /// Validate and display configuration.
    Config {
        /// Show the resolved configuration.
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let (config, from_file) = load_config(&cli.config).await?;

    let filter = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    if !from_file {
        info!(path = %cli.config.display(), "Config file not found, using defaults");
    }

    match cli.command {
        Commands::Ask { message } => cmd_ask(&config, &message.join(" ")).await?,
        Commands::Chat => cmd_chat(&config).await?,
        Commands::Classify { message } => cmd_classify(&config, &message.join(" ")).await?,
        Commands::Ingredient { name } => cmd_ingredient(&config, &name.join(" ")).await?,
        Commands::Combinations => cmd_combinations(&config).await?,
        Commands::Config { show } => cmd_config(&cli.config, &config, show)?,
    }

    Ok(())
}

async fn cmd_ask(config: &AppConfig, message: &str) -> Result<()> {
    let advisor = Advisor::from_config(config).await?;
    println!("{}", advisor.handle_message(message).await);
    Ok(())
}

async fn cmd_chat(config: &AppConfig) -> Result<()> {
    let advisor = Advisor::from_config(config).await?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "exit" | "quit") {
            break;
        }
        println!("{}\n", advisor.handle_message(line).await);
    }

    info!("Chat session ended");
    Ok(())
}

async fn cmd_classify(config: &AppConfig, message: &str) -> Result<()> {
    let advisor = Advisor::from_config(config).await?;
    let classification = advisor.classify(message);
    println!("{}", serde_json::to_string_pretty(&classification)?);
    Ok(())
}

async fn cmd_ingredient(config: &AppConfig, name: &str) -> Result<()> {
    let knowledge = load_knowledge(config).await?;
    let name = name.trim().to_lowercase();
    match knowledge.ingredient(&name) {
        Some(ingredient) => print!("{}", render_ingredient(&name, ingredient)),
        None => println!("No profile for \"{name}\"."),
    }
    Ok(())
}

async fn cmd_combinations(config: &AppConfig) -> Result<()> {
    let knowledge = load_knowledge(config).await?;
    print!("{}", render_combinations(&knowledge));
    Ok(())
}

fn cmd_config(config_path: &Path, config: &AppConfig, show: bool) -> Result<()> {
    if show {
        let toml_str = toml::to_string_pretty(config).context("failed to render config")?;
        println!("{toml_str}");
    } else {
        println!("Configuration at '{}' is valid.", config_path.display());
    }
    Ok(())
}

/// Load the config file, or defaults when it does not exist.
/// The flag says whether the file was found.
async fn load_config(path: &Path) -> Result<(AppConfig, bool)> {
    if path.exists() {
        let config = AppConfig::load(path)
            .await
            .with_context(|| format!("invalid config '{}'", path.display()))?;
        Ok((config, true))
    } else {
        Ok((AppConfig::default(), false))
    }
}

async fn load_knowledge(config: &AppConfig) -> Result<Arc<KnowledgeBase>> {
    KnowledgeBase::from_config(&config.knowledge)
        .await
        .context("failed to load knowledge base")
}

fn join<'a>(items: impl IntoIterator<Item = &'a String>) -> String {
    let items: Vec<&str> = items.into_iter().map(String::as_str).collect();
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

fn render_ingredient(name: &str, ingredient: &Ingredient) -> String {
    let profile = &ingredient.compatibility;
    let mut out = format!("{}\n", name.to_uppercase());
    out.push_str(&format!("Benefits:      {}\n", join(&ingredient.benefits)));
    out.push_str(&format!("Suitable for:  {}\n", ingredient.suitable_for));
    out.push_str(&format!("Concentration: {}\n", ingredient.concentration));
    if let Some(ph) = &ingredient.ph_range {
        out.push_str(&format!("pH range:      {ph}\n"));
    }
    out.push_str(&format!("When to use:   {}\n", ingredient.when_to_use));
    out.push_str(&format!("Good with:     {}\n", join(&profile.good_with)));
    out.push_str(&format!("Avoid with:    {}\n", join(&profile.avoid_with)));
    if !profile.notes.is_empty() {
        out.push_str(&format!("Notes:         {}\n", profile.notes));
    }
    out
}

fn render_combinations(knowledge: &KnowledgeBase) -> String {
    knowledge
        .combinations()
        .map(|(key, combination)| {
            let verdict = if combination.compatible {
                "Compatible"
            } else {
                "Not Recommended"
            };
            format!("{}: {verdict}\n", key.as_str().to_uppercase())
        })
        .collect()
}
