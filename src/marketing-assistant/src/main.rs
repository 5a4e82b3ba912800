//! Marketing Assistant command-line entry point.
//!
//! Loads configuration, installs logging and runs one tool call through the
//! root agent.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use marketing_agents::{AgentReply, AgentTool, Backends, RootAgent, SessionState};
use marketing_copy::CopyOutcome;
use marketing_core::formats::all_limits;
use marketing_core::{AdFormat, AdRequest, AppConfig, Component, FormatName, MarketingError};
use marketing_genai::{EditMode, GeminiClient};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

const DEFAULT_FILTER: &str = "marketing_assistant=info,marketing_copy=info,marketing_agents=info";

#[derive(Parser, Debug)]
#[command(name = "marketing-assistant")]
#[command(about = "Brand-aware ad copy, image generation and image editing")]
#[command(version)]
struct Cli {
    /// Configuration file (TOML); missing files are ignored
    #[arg(long, default_value = "marketing-assistant.toml")]
    config: PathBuf,

    /// Human-readable logs instead of JSON (default when `development` is set)
    #[arg(long, default_value_t = false)]
    pretty: bool,

    /// JSON logs even in development
    #[arg(long, default_value_t = false, conflicts_with = "pretty")]
    json_logs: bool,

    /// Print replies as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Generation API key (overrides config)
    #[arg(long, env = "MARKETING_ASSISTANT__GENAI__API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Image cache directory (overrides config)
    #[arg(long, env = "MARKETING_ASSISTANT__IMAGES__CACHE_DIR")]
    cache_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the word limits of every ad format
    Formats,

    /// Write new ad copy or improve existing copy
    Copy {
        /// Product or service being advertised
        #[arg(long, default_value = "")]
        product: String,

        /// Who the copy is for
        #[arg(long, default_value = "")]
        audience: String,

        /// Promotion details, e.g. "20% off all boots until Sunday"
        #[arg(long)]
        promotion: Option<String>,

        /// Ad format (BANNER_AD, SOCIAL_MEDIA_POST, EMAIL, BLOG_POST,
        /// BILLBOARD, POSTER, DIRECT_MAIL or GENERAL)
        #[arg(long, env = "MARKETING_ASSISTANT__COPY__FORMAT")]
        format: Option<String>,

        /// Comma-separated brand voice attributes
        #[arg(long, value_delimiter = ',')]
        voice: Vec<String>,

        /// File with existing copy to review and improve
        #[arg(long)]
        existing: Option<PathBuf>,
    },

    /// Generate an image from a text prompt
    GenerateImage {
        #[arg(long)]
        prompt: String,
    },

    /// Edit a previously generated image
    EditImage {
        /// Filename of the image in the cache
        #[arg(long)]
        image: String,

        #[arg(long)]
        prompt: String,

        /// Edit mode; chosen from the prompt when omitted
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
    },

    /// Run a tool call given as JSON, e.g. '{"tool":"list_artifacts"}'
    Call {
        tool: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Masked,
    Free,
}

impl From<ModeArg> for EditMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Masked => EditMode::Masked,
            ModeArg::Free => EditMode::Free,
        }
    }
}

/// Development configs log for humans unless JSON was asked for.
fn pretty_logs(pretty: bool, json_logs: bool, development: bool) -> bool {
    pretty || (development && !json_logs)
}

fn init_tracing(pretty: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_FILTER.into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if pretty {
        builder.pretty().init();
    } else {
        builder.json().init();
    }
}

fn print_formats() {
    let header: Vec<&str> = Component::ALL.iter().map(|c| c.label()).collect();
    println!("{:<20}{}", "FORMAT", header.join(" | "));
    for limits in all_limits() {
        let row: Vec<String> = limits
            .iter()
            .zip(&header)
            .map(|(limit, label)| format!("{:>width$}", limit.max_words, width = label.len()))
            .collect();
        println!("{:<20}{}", limits.format.as_str(), row.join(" | "));
    }
}

fn parse_format(input: Option<&str>) -> anyhow::Result<Option<FormatName>> {
    let Some(input) = input else {
        return Ok(None);
    };
    match AdFormat::parse(input) {
        Ok(format) => Ok(format.format_name()),
        Err(MarketingError::UnknownFormat(name)) => {
            let supported: Vec<&str> = FormatName::ALL.iter().map(|f| f.as_str()).collect();
            bail!(
                "unknown format '{name}'. Pick one of {} or GENERAL",
                supported.join(", ")
            )
        }
        Err(e) => Err(e.into()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let loaded = AppConfig::load(Some(cli.config.as_path()));
    let development = loaded.as_ref().is_ok_and(|config| config.development);
    init_tracing(pretty_logs(cli.pretty, cli.json_logs, development));

    let tool = match cli.command {
        Commands::Formats => {
            print_formats();
            return Ok(());
        }
        Commands::Copy {
            product,
            audience,
            promotion,
            format,
            voice,
            existing,
        } => {
            let mut request = AdRequest::new(product, audience);
            request.promotion_details = promotion;
            request.format = parse_format(format.as_deref())?;
            if !voice.is_empty() {
                request.brand_voice = Some(voice);
            }
            if let Some(path) = existing {
                let copy = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading existing copy from {}", path.display()))?;
                request.existing_copy = Some(copy);
            }
            AgentTool::WriteAdCopy(request)
        }
        Commands::GenerateImage { prompt } => AgentTool::GenerateImage { prompt },
        Commands::EditImage {
            image,
            prompt,
            mode,
        } => AgentTool::EditImage {
            image_filename: image,
            prompt,
            mode: mode.map(EditMode::from),
        },
        Commands::Call { tool } => AgentTool::from_json(&tool)?,
    };

    let mut config = loaded.unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(api_key) = cli.api_key {
        config.genai.api_key = Some(api_key);
    }
    if let Some(cache_dir) = cli.cache_dir {
        config.images.cache_dir = cache_dir;
    }
    config.validate()?;

    info!(
        vertex = config.genai.use_vertexai,
        text_model = %config.genai.text_model,
        cache_dir = %config.images.cache_dir,
        "Configuration loaded"
    );

    let client = Arc::new(GeminiClient::from_config(&config.genai)?);
    let agent = RootAgent::from_config(
        &config,
        Backends {
            text: client.clone(),
            images: client.clone(),
            editor: client,
        },
    );

    let mut session = SessionState::new();
    let reply = match agent.dispatch(tool, &mut session).await {
        Ok(reply) => reply,
        Err(e) => {
            error!(error = %e, "Request failed");
            return Err(e.into());
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reply)?);
    } else {
        println!("{}", reply.to_text());
    }

    match &reply {
        AgentReply::Image(output) if !output.success => {
            bail!(output.error.clone().unwrap_or_else(|| "image request failed".into()))
        }
        AgentReply::Copy(CopyOutcome::Clarification(_)) => {
            info!("Waiting for clarification");
            Ok(())
        }
        _ => Ok(()),
    }
}
