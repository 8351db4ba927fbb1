use std::path::PathBuf;

use async_trait::async_trait;
use common::{Config, CrawlerError, CrawlerResult, Publisher};
use tokio::process::Command;
use tracing::info;

pub const COMMIT_MESSAGE: &str = "Add new blog posts";

/// Stages everything, commits and pushes with the git command-line client.
pub struct GitPublisher {
    program: String,
    repo_dir: PathBuf,
    remote: String,
    branch: String,
}

impl GitPublisher {
    pub fn new(repo_dir: impl Into<PathBuf>, remote: &str, branch: &str) -> Self {
        Self {
            program: "git".to_string(),
            repo_dir: repo_dir.into(),
            remote: remote.to_string(),
            branch: branch.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.git.repo_dir, &config.git.remote, &config.git.branch)
    }

    /// Replaces the `git` executable, e.g. with an absolute path.
    pub fn with_program(mut self, program: &str) -> Self {
        self.program = program.to_string();
        self
    }

    fn steps(&self) -> [(&'static str, Vec<&str>); 3] {
        [
            ("add", vec!["add", "."]),
            ("commit", vec!["commit", "-m", COMMIT_MESSAGE]),
            ("push", vec!["push", self.remote.as_str(), self.branch.as_str()]),
        ]
    }

    async fn run_step(&self, step: &str, args: &[&str]) -> CrawlerResult<()> {
        info!("Running {} {}", self.program, args.join(" "));
        let output = Command::new(&self.program)
            .args(args)
            .current_dir(&self.repo_dir)
            .output()
            .await
            .map_err(|e| CrawlerError::Command(format!("{} {} could not start: {}", self.program, step, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CrawlerError::Command(format!(
                "{} {} failed ({}): {}",
                self.program,
                step,
                output.status,
                stderr.trim()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl Publisher for GitPublisher {
    /// Stops at the first failing step; later steps are not attempted.
    async fn publish(&self) -> CrawlerResult<()> {
        for (step, args) in self.steps() {
            self.run_step(step, &args).await?;
        }
        info!("Changes pushed to {}/{} successfully", self.remote, self.branch);
        Ok(())
    }
}
