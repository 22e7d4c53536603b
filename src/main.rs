use std::io::Read;

use anyhow::{Context, Result};
use base64::{engine::general_purpose, Engine as _};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use compute_msg_encoder::config::Config;
use compute_msg_encoder::{Encoder, RawContractMsg};

#[derive(Parser)]
#[command(name = "compute-msg-encoder")]
#[command(about = "Translate contract messages into ledger messages", version)]
struct Cli {
    /// Configuration file path (defaults are used when omitted)
    #[arg(short, long, global = true, env = "ENCODER_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a contract message JSON file ("-" for stdin)
    Encode {
        /// Bech32 account address of the contract emitting the message
        #[arg(short, long)]
        sender: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        input: String,
    },

    /// Print the account and validator addresses for hex-encoded address bytes
    Address { bytes: String },

    /// Generate a default configuration file
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = "config.toml")]
        output: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Ledger messages as tagged JSON
    Json,
    /// Protobuf Any per message: type URL and base64 value
    Any,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path).with_context(|| format!("loading config from {}", path))?,
        None => Config::default(),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Encode { sender, format, input } => {
            run_encode(&config, &sender, format, &input)?;
        }
        Commands::Address { bytes } => {
            let codec = config.address_codec()?;
            let bytes = hex::decode(bytes.trim()).context("address bytes must be hex")?;
            println!("account:   {}", codec.account_from_bytes("address", bytes.clone())?);
            println!("validator: {}", codec.validator_from_bytes("address", bytes)?);
        }
        Commands::Init { output } => {
            let config = Config::default();
            config.save(&output)?;
            info!("Configuration file created at: {}", output);
        }
    }

    Ok(())
}

fn run_encode(config: &Config, sender: &str, format: OutputFormat, input: &str) -> Result<()> {
    let encoder = Encoder::new(config.address_codec()?);
    let sender = encoder.codec().decode_account("sender", sender)?;

    let bytes = if input == "-" {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        buf
    } else {
        std::fs::read(input).with_context(|| format!("reading {}", input))?
    };

    let raw = RawContractMsg::from_json(&bytes)?;
    let msgs = encoder.encode_raw(&sender, raw)?;
    info!("Encoded {} ledger message(s)", msgs.len());

    let output = match format {
        OutputFormat::Json => serde_json::to_value(&msgs)?,
        OutputFormat::Any => serde_json::Value::Array(
            msgs.iter()
                .map(|msg| {
                    let any = msg.to_any();
                    serde_json::json!({
                        "type_url": any.type_url,
                        "value": general_purpose::STANDARD.encode(&any.value),
                    })
                })
                .collect(),
        ),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
