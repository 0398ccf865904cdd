use clap::{Parser, Subcommand};
use qrgen::logger::{self, LoggerConfig};
use qrgen::{DirectoryTarget, DownloadOutcome, QrConfig, QrSession, SubmitOutcome};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "qrgen", version, about = "Generate QR codes through a public QR image service")]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the QR form
    #[cfg(feature = "server")]
    Serve {
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Generate one QR code and print its image url
    Generate {
        text: String,
        /// Also download the image into this directory
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_loaded = dotenv::dotenv().is_ok();
    let cli = Cli::parse();

    let (logger_config, warnings) = LoggerConfig::from_env(cli.verbose);
    logger::init_with_config(logger_config)?;
    for warning in warnings {
        log::warn!("{}", warning);
    }

    if env_loaded {
        log::debug!("✅ .env file loaded");
    }

    let config = QrConfig::from_env();

    match cli.command {
        #[cfg(feature = "server")]
        Command::Serve { port } => {
            let config = match port {
                Some(port) => config.with_port(port),
                None => config,
            };
            logger::log_startup_info("qrgen", env!("CARGO_PKG_VERSION"), &config);
            qrgen::server::run(config).await?;
        }
        Command::Generate { text, out } => {
            let session = QrSession::new(&config)?;
            session.set_text(text);

            match session.submit().await {
                SubmitOutcome::Generated(url) => println!("{}", url),
                SubmitOutcome::Ignored => return Err("nothing to encode: text is blank".into()),
                SubmitOutcome::Busy | SubmitOutcome::Failed => {
                    let message = session
                        .result()
                        .error_message()
                        .map(String::from)
                        .unwrap_or_default();
                    return Err(message.into());
                }
            }

            if let Some(dir) = out {
                let mut target = DirectoryTarget::new(&dir);
                match session.download(&mut target).await {
                    DownloadOutcome::Saved { filename } => {
                        println!("{}", dir.join(filename).display())
                    }
                    DownloadOutcome::NoResult | DownloadOutcome::Failed => {
                        log::warn!("⚠️  The QR code could not be saved to {}", dir.display())
                    }
                }
            }
        }
    }

    Ok(())
}
