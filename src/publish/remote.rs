use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, warn};

use super::{write_site, ProjectName, VercelDescriptor};
use crate::error::{Error, Result};

pub const DESCRIPTOR_FILE: &str = "vercel.json";

/// What the deployment command reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentResult {
    pub success: bool,
    /// `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl DeploymentResult {
    /// The deployment URL printed by a successful run.
    pub fn url(&self) -> Option<&str> {
        self.success.then(|| self.stdout.trim())
    }

    /// Operator-facing summary: the URL on success, the error stream verbatim otherwise.
    pub fn report(&self) -> String {
        match self.url() {
            Some(url) => format!("Deployment successful!\nDeployment URL: {url}"),
            None => format!("Deployment failed:\n{}", self.stderr),
        }
    }
}

/// Uploads a prepared project directory to the hosting platform.
#[async_trait]
pub trait Deploy: Send + Sync {
    async fn deploy(&self, dir: &Path, credential: &str) -> Result<DeploymentResult>;
}

#[async_trait]
impl<D: Deploy + ?Sized> Deploy for &D {
    async fn deploy(&self, dir: &Path, credential: &str) -> Result<DeploymentResult> {
        (**self).deploy(dir, credential).await
    }
}

/// The `vercel` command line, run non-interactively against production.
pub struct VercelCli {
    program: String,
}

impl VercelCli {
    pub fn new(program: &str) -> Self {
        VercelCli {
            program: program.to_string(),
        }
    }
}

impl Default for VercelCli {
    fn default() -> Self {
        Self::new("vercel")
    }
}

#[async_trait]
impl Deploy for VercelCli {
    async fn deploy(&self, dir: &Path, credential: &str) -> Result<DeploymentResult> {
        debug!(program = %self.program, dir = %dir.display(), "Running deployment command");
        let output = Command::new(&self.program)
            .args(["--token", credential, "-y", "--prod"])
            .current_dir(dir)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| Error::Launch {
                program: self.program.clone(),
                source,
            })?;

        Ok(DeploymentResult {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Stage `doc` in a temporary `<project>/` directory with a `vercel.json`, and deploy it.
///
/// A nonzero exit from the deployer is returned as an unsuccessful
/// [`DeploymentResult`], not an error. The temporary directory is removed on
/// every path out of this function.
pub async fn publish(
    deployer: &dyn Deploy,
    doc: &str,
    project: &ProjectName,
    credential: &str,
) -> Result<DeploymentResult> {
    let staging = tempfile::Builder::new().prefix("pagegen-").tempdir()?;
    let dir = staging.path().join(project.as_str());
    std::fs::create_dir(&dir)?;
    write_site(&dir, doc, DESCRIPTOR_FILE, &VercelDescriptor::new(project))?;

    info!(%project, "Deploying");
    let result = deployer.deploy(&dir, credential).await?;
    if result.success {
        info!(%project, url = result.stdout.trim(), "Deployment finished");
    } else {
        warn!(%project, code = ?result.code, "Deployment command failed");
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Mutex;

    use super::*;
    use crate::publish::ENTRY_FILE;

    /// Snapshot of what the deployer saw while the staging directory existed.
    #[derive(Default)]
    struct Seen {
        dir: Option<PathBuf>,
        credential: String,
        index: String,
        descriptor: serde_json::Value,
    }

    struct FakeDeployer {
        outcome: std::result::Result<DeploymentResult, &'static str>,
        seen: Mutex<Seen>,
    }

    impl FakeDeployer {
        fn new(outcome: std::result::Result<DeploymentResult, &'static str>) -> Self {
            FakeDeployer {
                outcome,
                seen: Mutex::new(Seen::default()),
            }
        }

        fn staged_dir(&self) -> PathBuf {
            self.seen.lock().unwrap().dir.clone().unwrap()
        }
    }

    #[async_trait]
    impl Deploy for FakeDeployer {
        async fn deploy(&self, dir: &Path, credential: &str) -> Result<DeploymentResult> {
            let mut seen = self.seen.lock().unwrap();
            seen.dir = Some(dir.to_path_buf());
            seen.credential = credential.to_string();
            seen.index = fs::read_to_string(dir.join(ENTRY_FILE)).unwrap();
            seen.descriptor =
                serde_json::from_slice(&fs::read(dir.join(DESCRIPTOR_FILE)).unwrap()).unwrap();
            match &self.outcome {
                Ok(r) => Ok(r.clone()),
                Err(msg) => Err(Error::Io(std::io::Error::other(*msg))),
            }
        }
    }

    fn exited(code: i32, stdout: &str, stderr: &str) -> DeploymentResult {
        DeploymentResult {
            success: code == 0,
            code: Some(code),
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    fn project() -> ProjectName {
        ProjectName::parse("pesmasterplus").unwrap()
    }

    #[tokio::test]
    async fn stages_files_then_cleans_up_on_success() {
        let fake = FakeDeployer::new(Ok(exited(0, "https://pesmasterplus.vercel.app\n", "")));
        let doc = "<html><body>hi</body></html>";

        let result = publish(&fake, doc, &project(), "vt-123").await.unwrap();

        assert_eq!(result.url(), Some("https://pesmasterplus.vercel.app"));
        let dir = fake.staged_dir();
        assert!(dir.ends_with("pesmasterplus"));
        assert!(!dir.exists());
        assert!(!dir.parent().unwrap().exists());

        let seen = fake.seen.lock().unwrap();
        assert_eq!(seen.credential, "vt-123");
        assert_eq!(seen.index, doc);
        assert_eq!(
            seen.descriptor,
            serde_json::json!({
                "name": "pesmasterplus",
                "version": 2,
                "builds": [{"src": "index.html", "use": "@vercel/static"}]
            })
        );
    }

    #[tokio::test]
    async fn nonzero_exit_is_reported_not_raised() {
        let fake = FakeDeployer::new(Ok(exited(1, "", "quota exceeded")));

        let result = publish(&fake, "<html></html>", &project(), "vt").await.unwrap();

        assert!(!result.success);
        assert_eq!(result.stderr, "quota exceeded");
        assert_eq!(result.url(), None);
        assert_eq!(result.report(), "Deployment failed:\nquota exceeded");
        assert!(!fake.staged_dir().exists());
    }

    #[tokio::test]
    async fn cleans_up_when_deployer_errors() {
        let fake = FakeDeployer::new(Err("spawn failed"));
        assert!(publish(&fake, "<html></html>", &project(), "vt").await.is_err());
        assert!(!fake.staged_dir().exists());
    }

    #[test]
    fn success_report() {
        let r = exited(0, "  https://demo.vercel.app \n", "Vercel CLI 33.0.0");
        assert_eq!(
            r.report(),
            "Deployment successful!\nDeployment URL: https://demo.vercel.app"
        );
    }

    #[tokio::test]
    async fn missing_program_is_launch_error() {
        let dir = tempfile::tempdir().unwrap();
        let cli = VercelCli::new("pagegen-no-such-deploy-tool");
        let err = cli.deploy(dir.path(), "t").await.unwrap_err();
        assert!(matches!(err, Error::Launch { .. }));
    }

    #[cfg(unix)]
    mod cli {
        use std::os::unix::fs::PermissionsExt;

        use super::*;

        /// A stand-in `vercel` that echoes its arguments and working directory.
        fn script(dir: &Path, body: &str) -> PathBuf {
            let path = dir.join("fake-vercel");
            fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        #[tokio::test]
        async fn passes_flags_and_runs_in_project_dir() {
            let bin = tempfile::tempdir().unwrap();
            let program = script(bin.path(), r#"echo "$* @ $(basename "$(pwd -P)")""#);
            let cli = VercelCli::new(program.to_str().unwrap());

            let result = publish(&cli, "<html></html>", &project(), "vt-9").await.unwrap();

            assert!(result.success);
            assert_eq!(result.code, Some(0));
            assert_eq!(result.url(), Some("--token vt-9 -y --prod @ pesmasterplus"));
        }

        #[tokio::test]
        async fn quota_exceeded_on_stderr() {
            let bin = tempfile::tempdir().unwrap();
            let program = script(bin.path(), "printf 'quota exceeded' >&2\nexit 1");
            let cli = VercelCli::new(program.to_str().unwrap());

            let result = publish(&cli, "<html></html>", &project(), "vt").await.unwrap();

            assert!(!result.success);
            assert_eq!(result.code, Some(1));
            assert_eq!(result.stderr, "quota exceeded");
        }
    }
}
