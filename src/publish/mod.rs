pub mod local;
pub mod remote;

use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{Error, Result};

pub use remote::{Deploy, DeploymentResult, VercelCli};

/// Entry file written by both publishers.
pub const ENTRY_FILE: &str = "index.html";
pub const SCHEMA_VERSION: u8 = 2;

static PROJECT_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9._-]+$").unwrap());

/// Output site name: a directory name locally and a deployment name on the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectName(String);

impl ProjectName {
    /// Lowercase letters, digits, `.`, `_` and `-`; at most 100 characters; no `---`.
    pub fn parse(name: &str) -> Result<Self> {
        let invalid = |reason| {
            Err(Error::InvalidProjectName {
                name: name.to_string(),
                reason,
            })
        };
        if name.is_empty() {
            return invalid("must not be empty");
        }
        if name.len() > 100 {
            return invalid("must be at most 100 characters");
        }
        if !PROJECT_NAME_RE.is_match(name) {
            return invalid("only lowercase letters, digits, '.', '_' and '-' are allowed");
        }
        if name.contains("---") {
            return invalid("must not contain '---'");
        }
        if name == "." || name == ".." {
            return invalid("must not be a relative path component");
        }
        Ok(ProjectName(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `config.json` next to a locally saved page.
#[derive(Debug, Serialize)]
pub struct LocalDescriptor<'a> {
    pub name: &'a str,
    pub version: u8,
}

/// `vercel.json` for a single static file.
#[derive(Debug, Serialize)]
pub struct VercelDescriptor<'a> {
    pub name: &'a str,
    pub version: u8,
    pub builds: [Build; 1],
}

#[derive(Debug, Serialize)]
pub struct Build {
    pub src: &'static str,
    #[serde(rename = "use")]
    pub builder: &'static str,
}

impl<'a> LocalDescriptor<'a> {
    pub fn new(project: &'a ProjectName) -> Self {
        LocalDescriptor {
            name: project.as_str(),
            version: SCHEMA_VERSION,
        }
    }
}

impl<'a> VercelDescriptor<'a> {
    pub fn new(project: &'a ProjectName) -> Self {
        VercelDescriptor {
            name: project.as_str(),
            version: SCHEMA_VERSION,
            builds: [Build {
                src: ENTRY_FILE,
                builder: "@vercel/static",
            }],
        }
    }
}

/// Write the page and its descriptor into `dir`, page first.
fn write_site(
    dir: &Path,
    doc: &str,
    descriptor_file: &str,
    descriptor: &impl Serialize,
) -> Result<()> {
    std::fs::write(dir.join(ENTRY_FILE), doc)?;
    std::fs::write(dir.join(descriptor_file), serde_json::to_vec(descriptor)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn accepts_hosting_safe_names() {
        for ok in ["demo", "pesmasterplus", "my-site.v2", "a_b", "x1"] {
            assert_eq!(ProjectName::parse(ok).unwrap().as_str(), ok);
        }
    }

    #[test]
    fn rejects_unsafe_names() {
        let long = "a".repeat(101);
        for bad in ["", "Demo", "my site", "../etc", "a/b", "a---b", ".", "..", long.as_str()] {
            assert!(
                matches!(ProjectName::parse(bad), Err(Error::InvalidProjectName { .. })),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn local_descriptor_schema() {
        let name = ProjectName::parse("demo").unwrap();
        let v: Value = serde_json::to_value(LocalDescriptor::new(&name)).unwrap();
        assert_eq!(v, json!({"name": "demo", "version": 2}));
    }

    #[test]
    fn vercel_descriptor_schema() {
        let name = ProjectName::parse("demo").unwrap();
        let v: Value = serde_json::to_value(VercelDescriptor::new(&name)).unwrap();
        assert_eq!(
            v,
            json!({
                "name": "demo",
                "version": 2,
                "builds": [{"src": "index.html", "use": "@vercel/static"}]
            })
        );
    }
}
