use std::path::PathBuf;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use url::Url;

use crate::error::Result;
use crate::generate::{Completion, Generator};
use crate::publish::{self, Deploy, DeploymentResult, ProjectName};
use crate::scrape::Extractor;

/// Where the generated page ends up.
pub enum Target<'a> {
    Remote {
        deployer: &'a dyn Deploy,
        project: ProjectName,
        credential: String,
    },
    Local {
        root: PathBuf,
        project: ProjectName,
    },
}

#[derive(Debug)]
pub enum Outcome {
    Deployed(DeploymentResult),
    Saved(PathBuf),
}

impl Outcome {
    pub fn report(&self) -> String {
        match self {
            Outcome::Deployed(result) => result.report(),
            Outcome::Saved(dir) => format!("Site generated at {}", dir.display()),
        }
    }
}

/// One fetch, one completion, one publish, strictly in that order.
///
/// Generation runs even when the page had no rich text, and its output goes
/// to the publisher untouched.
pub async fn run<C: Completion>(
    url: &Url,
    extractor: &Extractor,
    generator: &Generator<C>,
    target: Target<'_>,
) -> Result<Outcome> {
    let content = extractor.extract(url).await?;
    if content.is_empty() {
        info!(%url, "No rich-text content found, generating from an empty description");
    }

    let document = {
        let _spinner = Spinner::start("Generating the site...");
        generator.generate(&content).await?
    };

    match target {
        Target::Remote {
            deployer,
            project,
            credential,
        } => {
            let _spinner = Spinner::start("Deploying to Vercel...");
            let result =
                publish::remote::publish(deployer, &document, &project, &credential).await?;
            Ok(Outcome::Deployed(result))
        }
        Target::Local { root, project } => {
            let dir = publish::local::publish(&root, &document, &project)?;
            Ok(Outcome::Saved(dir))
        }
    }
}

/// Stderr spinner, cleared on drop. Draws nothing when stderr is not a terminal.
struct Spinner(ProgressBar);

impl Spinner {
    fn start(message: &'static str) -> Self {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) =
            ProgressStyle::default_spinner().template("{spinner:.green} {msg} [{elapsed}]")
        {
            pb.set_style(style);
        }
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(120));
        Spinner(pb)
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.0.finish_and_clear();
    }
}
