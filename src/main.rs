use clap::{Args, Parser, Subcommand};
use log::info;
use std::process::ExitCode;
use std::time::Duration;

mod logging;

// Import the library
use vast_inspector::fetch::{FetchConfig, DEFAULT_USER_AGENT, SAMPLE_VAST_URL};
use vast_inspector::inspect::{self, Inspection};
use vast_inspector::render::{self, RenderOptions, NO_PLAYABLE_MEDIA};

/// VAST tag inspector
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a VAST tag and report its linear creative
    Inspect {
        #[command(flatten)]
        source: SourceArgs,

        /// Append the raw XML source to the report
        #[arg(long)]
        show_xml: bool,

        /// Append the extracted record as JSON
        #[arg(long)]
        show_json: bool,
    },

    /// Print only the URL of the media file picked for playback
    Playable {
        #[command(flatten)]
        source: SourceArgs,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// VAST tag URL, file:// URL or local path
    #[arg(short, long, required_unless_present = "sample", conflicts_with = "sample")]
    input: Option<String>,

    /// Use the bundled Google IMA sample tag
    #[arg(long)]
    sample: bool,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// User-Agent header sent with the request
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,
}

impl SourceArgs {
    fn location(&self) -> &str {
        match &self.input {
            Some(input) => input.as_str(),
            None => {
                info!("Using bundled sample VAST tag");
                SAMPLE_VAST_URL
            }
        }
    }

    fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            timeout: Duration::from_secs(self.timeout),
            user_agent: self.user_agent.clone(),
        }
    }
}

async fn load(source: &SourceArgs) -> Option<Inspection> {
    match inspect::inspect(source.location(), &source.fetch_config()).await {
        Ok(inspection) => Some(inspection),
        Err(e) => {
            eprintln!("Failed to load VAST: {}", e);
            None
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match &cli.command {
        Commands::Inspect {
            source,
            show_xml,
            show_json,
        } => {
            let Some(inspection) = load(source).await else {
                return ExitCode::FAILURE;
            };

            let options = RenderOptions {
                show_xml: *show_xml,
                show_json: *show_json,
            };
            print!("{}", render::render_inspection(&inspection, options));

            if inspection.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Commands::Playable { source } => {
            let Some(inspection) = load(source).await else {
                return ExitCode::FAILURE;
            };

            match &inspection.outcome {
                Ok(findings) => match &findings.playable_url {
                    Some(url) => {
                        println!("{}", url);
                        ExitCode::SUCCESS
                    }
                    None => {
                        eprintln!("{}", NO_PLAYABLE_MEDIA);
                        ExitCode::FAILURE
                    }
                },
                Err(e) => {
                    eprintln!("{}", e);
                    ExitCode::FAILURE
                }
            }
        }
    }
}
