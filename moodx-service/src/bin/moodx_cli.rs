use anyhow::Context as _;
use clap::{Parser, Subcommand};
use moodx::{Config, GroqClient, Language, MoodRequest, Preferences, Recommender, parse};
use moodx_service::init_cli_tracing;
use moodx_service::render::{render_tabs, tabs_to_text};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "moodx", about = "Mood-aware recommendations from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze how you feel and generate recommendations
    Recommend {
        /// How you're feeling, in your own words
        #[arg(default_value = "I'm excited and looking for new adventures!")]
        text: String,
        #[arg(long, default_value = "English")]
        language: Language,
        /// Leave out the "include products" preference
        #[arg(long)]
        no_products: bool,
        /// Skip the advisor suggestions
        #[arg(long)]
        no_advisors: bool,
        /// Print the raw completion text before the tabs
        #[arg(long)]
        raw: bool,
    },
    /// Parse a saved completion response without calling the API
    Parse {
        file: PathBuf,
        /// Print the parsed result as JSON instead of tabs
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_cli_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Recommend {
            text,
            language,
            no_products,
            no_advisors,
            raw,
        } => {
            let config = match Config::from_env() {
                Ok(config) => config,
                Err(e) => {
                    error!("{}", e);
                    eprintln!("❌ {e}. Set GROQ_API_KEY in the environment or a .env file.");
                    std::process::exit(1);
                }
            };
            let recommender = Recommender::new(Arc::new(GroqClient::from_config(&config)));
            let request = MoodRequest {
                text,
                preferences: Preferences {
                    language,
                    include_products: !no_products,
                },
                with_advisors: !no_advisors,
            };

            info!("Analyzing mood and generating recommendations...");
            let outcome = recommender.recommend(&request).await?;

            println!("Mood: {}\n", outcome.mood.trim());
            if raw {
                println!("Raw Recommendations Output:\n{}\n", outcome.raw);
            }
            print!("{}", tabs_to_text(&render_tabs(&outcome.recommendations)));
            println!("Recommendations generated successfully, Captain!");

            if !outcome.advisors.is_empty() {
                println!("\n🤖 Additional Agent Suggestions\n");
                for advisor in &outcome.advisors {
                    println!("== {} ==\n{}\n", advisor.label, advisor.suggestion.trim());
                }
            }
        }
        Command::Parse { file, json } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let parsed = parse(&raw);
            if json {
                println!("{}", serde_json::to_string_pretty(&parsed)?);
            } else {
                print!("{}", tabs_to_text(&render_tabs(&parsed)));
            }
        }
    }

    Ok(())
}
