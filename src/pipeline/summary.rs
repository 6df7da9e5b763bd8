use crate::deploy::DeployOutcome;
use std::fmt;

const SUMMARY_HEADER: &str = "======== Summary ========";
const SUMMARY_FOOTER: &str = "=========================";

/// Result of a complete run, printed once the last stage finishes
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub plan: String,
    pub repo_url: String,
    /// The repository URL was synthesized, not confirmed by the API
    pub repo_assumed: bool,
    pub uploaded: usize,
    pub skipped: usize,
    /// `None` when the deploy stage did not run or produced no deploy id
    pub deploy: Option<DeployOutcome>,
}

impl RunSummary {
    /// Service URLs, or the placeholder for a deploy without any
    pub fn live_urls(&self) -> Vec<String> {
        self.deploy
            .as_ref()
            .map(DeployOutcome::display_urls)
            .unwrap_or_default()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", SUMMARY_HEADER)?;
        writeln!(f, "Plan:\n{}\n", self.plan)?;
        if self.repo_assumed {
            writeln!(f, "GitHub: {} (assumed)", self.repo_url)?;
        } else {
            writeln!(f, "GitHub: {}", self.repo_url)?;
        }
        writeln!(f, "Files: {} uploaded, {} skipped", self.uploaded, self.skipped)?;
        for url in self.live_urls() {
            writeln!(f, "Live: {}", url)?;
        }
        write!(f, "{}", SUMMARY_FOOTER)
    }
}
