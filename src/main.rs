use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use tagsmith::{
    config::StorePaths,
    hashtag,
    models::CompletionRequest,
    providers::{registry, DiscoveryParams, Dispatcher},
    server::{self, AppState},
    store::{HistoryStore, SettingsStore},
};

#[derive(Parser)]
#[command(name = "tagsmith")]
#[command(about = "Tagsmith — turns free-form text into clean, shareable hashtags")]
#[command(version)]
struct Cli {
    /// Data directory for settings and history (defaults to ~/.config/tagsmith)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a hashtag from text and record it in the history
    Generate {
        /// Input text
        #[arg(value_name = "TEXT")]
        text: String,
    },
    /// Show previously generated hashtags, most recent first
    History,
    /// List the known LLM providers
    Providers,
    /// List the models a provider currently serves
    Models {
        /// Provider id (e.g. openai, ollama)
        #[arg(value_name = "PROVIDER")]
        provider: String,
        /// API key for authenticated discovery (openai, mistral, huggingface)
        #[arg(long)]
        api_key: Option<String>,
        /// Base URL for local servers (ollama, lmstudio)
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Send a prompt to an LLM provider and print the completion
    Complete {
        /// Provider id
        #[arg(value_name = "PROVIDER")]
        provider: String,
        /// Prompt text
        #[arg(value_name = "PROMPT")]
        prompt: String,
        /// Model identifier
        #[arg(long, default_value = "")]
        model: String,
        /// API key
        #[arg(long)]
        api_key: Option<String>,
        /// Full endpoint URL (azure)
        #[arg(long)]
        endpoint: Option<String>,
        /// Base URL (ollama, lmstudio)
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Run the HTTP API server
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port to listen on
        #[arg(long, default_value_t = 5000)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = match &cli.data_dir {
        Some(dir) => StorePaths::new(dir.clone()),
        None => StorePaths::default_dir(),
    };

    match cli.command {
        Commands::Generate { text } => {
            paths.ensure_dir()?;
            let settings_store = SettingsStore::new(paths.settings_path());
            let history_store = HistoryStore::new(paths.history_path());

            let outcome = settings_store.load()?;
            if outcome.is_recovered() {
                eprintln!("Warning: settings file was unreadable, using defaults");
            }
            let settings = outcome.into_value();

            let input = hashtag::truncate_input(&text, settings.character_limit);
            if input.len() < text.len() {
                eprintln!(
                    "Input truncated to {} characters (character limit)",
                    settings.character_limit
                );
            }

            let hashtag = hashtag::generate(input, &settings);
            if hashtag.is_empty() {
                println!("Please enter some text");
                return Ok(());
            }

            let mut history = history_store.load()?.into_value();
            if history.record(&hashtag, settings.history_max_items) {
                history_store.save(&history)?;
            }

            println!("{hashtag}");
            if hashtag::exceeds_limit(&hashtag, settings.character_limit) {
                eprintln!("Warning: hashtag exceeds character limit");
            }
        }
        Commands::History => {
            paths.ensure_dir()?;
            let history_store = HistoryStore::new(paths.history_path());
            let history = history_store.load()?.into_value();
            if history.is_empty() {
                println!("No hashtags generated yet");
            } else {
                for entry in history.entries() {
                    println!("{entry}");
                }
            }
        }
        Commands::Providers => {
            for descriptor in registry::catalog() {
                let key = descriptor
                    .api_key_label
                    .as_deref()
                    .unwrap_or("no API key required");
                println!("{:12} {} ({})", descriptor.id, descriptor.name, key);
                println!("{:12} models: {}", "", descriptor.models.join(", "));
            }
        }
        Commands::Models {
            provider,
            api_key,
            base_url,
        } => {
            let params = DiscoveryParams { api_key, base_url };
            let client = reqwest::Client::new();
            let models = registry::list_models(&client, &provider, &params).await;
            if models.is_empty() {
                println!("No models reported for {provider}");
            } else {
                for model in models {
                    println!("{model}");
                }
            }
        }
        Commands::Complete {
            provider,
            prompt,
            model,
            api_key,
            endpoint,
            base_url,
        } => {
            let request = CompletionRequest {
                provider,
                prompt,
                model,
                api_key,
                endpoint,
                base_url,
            };
            let dispatcher = Dispatcher::new();
            let client = reqwest::Client::new();
            match dispatcher.complete(&client, &request).await {
                Ok(result) => println!("{result}"),
                Err(err) => {
                    eprintln!("Error ({}): {}", err.kind(), err);
                    std::process::exit(1);
                }
            }
        }
        Commands::Serve { host, port } => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| "tagsmith=info".into()),
                )
                .init();

            let addr: SocketAddr = format!("{host}:{port}")
                .parse()
                .with_context(|| format!("Invalid bind address: {host}:{port}"))?;
            let state = AppState::new(&paths)?;
            server::serve(state, addr).await?;
        }
    }

    Ok(())
}
