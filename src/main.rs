mod error;
mod generate;
mod pipeline;
mod publish;
mod scrape;
mod settings;

use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use inquire::Text;
use tracing::info;

use generate::{Generator, OpenAiClient, TemplateKind};
use pipeline::Target;
use publish::{ProjectName, VercelCli};
use scrape::Extractor;
use settings::Settings;

#[derive(Parser)]
#[command(name = "pagegen", about = "Generate a landing page from a product page with an LLM")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the page and deploy it to Vercel
    Deploy {
        #[command(flatten)]
        run: RunArgs,
        /// Vercel project name (default: `project` setting)
        #[arg(short, long)]
        project: Option<String>,
    },
    /// Generate the page into ./<project>/
    Local {
        #[command(flatten)]
        run: RunArgs,
        /// Output directory name (prompted for when omitted)
        #[arg(short, long)]
        project: Option<String>,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Product page to scrape (prompted for when omitted)
    url: Option<String>,
    /// Instruction template sent to the model
    #[arg(short, long, value_enum)]
    template: Option<TemplateKind>,
    /// Model identifier (default: per template, or `model` setting)
    #[arg(short, long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load()?;
    info!(settings = ?settings, "Loaded settings");

    let (run, target_project, remote, default_template) = match cli.command {
        Commands::Deploy { run, project } => {
            let name = project.unwrap_or_else(|| settings.project.clone());
            (run, name, true, TemplateKind::Classic)
        }
        Commands::Local { run, project } => {
            let name = match project {
                Some(p) => p,
                None => Text::new("Enter the project name:").prompt()?,
            };
            (run, name, false, TemplateKind::Palette)
        }
    };

    let project = ProjectName::parse(target_project.trim())?;
    let raw_url = match run.url {
        Some(u) => u,
        None => Text::new("Enter the product page URL:").prompt()?,
    };
    let url = scrape::parse_source_url(&raw_url)?;

    let template = run.template.unwrap_or(default_template);
    let model = run
        .model
        .or_else(|| settings.model.clone())
        .unwrap_or_else(|| template.default_model().to_string());
    info!(%url, %project, %template, %model, "Starting run");

    let client = OpenAiClient::new(&settings.api_base, &settings.openai_api_key, &model)
        .with_limits(settings.max_tokens, settings.temperature);
    let generator = Generator::new(client, template.with_source(&url));
    let deployer = VercelCli::new(&settings.vercel_bin);

    let target = if remote {
        Target::Remote {
            deployer: &deployer,
            project,
            credential: settings.vercel_token.clone(),
        }
    } else {
        Target::Local {
            root: std::env::current_dir().context("Failed to read working directory")?,
            project,
        }
    };

    let outcome = match pipeline::run(&url, &Extractor::new(), &generator, target).await {
        Ok(outcome) => outcome,
        Err(e) => {
            let stage = e.stage();
            return Err(anyhow::Error::new(e).context(format!("{} stage failed for {}", stage, url)));
        }
    };
    println!("{}", outcome.report());

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }
    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
