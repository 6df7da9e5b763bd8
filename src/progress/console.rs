//! Human-readable progress lines on stdout

use super::{ProgressEvent, ProgressHandler};

/// Handler printing `[i]`, `[!]` and `[✓]` prefixed lines
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleHandler;

impl ConsoleHandler {
    /// The line printed for `event`, if it is narrated at all
    pub fn render(event: &ProgressEvent) -> Option<String> {
        let line = match event {
            ProgressEvent::PlanningStarted { project } => {
                format!("[i] Planning project: {}", project)
            }
            ProgressEvent::RepairRequested { .. } => {
                "[!] Reply was not valid JSON; asking again for strict JSON".to_string()
            }
            ProgressEvent::PlanReady { .. } => return None,
            ProgressEvent::FilesWritten { count } => {
                format!("[i] Wrote {} LLM-generated file(s)", count)
            }
            ProgressEvent::FallbackScaffold { written } => format!(
                "[!] LLM returned no files; created minimal scaffold ({} new)",
                written
            ),
            ProgressEvent::PublishStarted { repo } => {
                format!("[i] Creating GitHub repo {} and pushing files...", repo)
            }
            ProgressEvent::RepoAssumed { url } => format!(
                "[!] Could not create repo; assuming it exists at {} (create it manually if not)",
                url
            ),
            ProgressEvent::FileSkipped { path, reason } => {
                format!("[!] Skipping {}: {}", reason, path)
            }
            ProgressEvent::PushComplete { uploaded, skipped } => {
                format!("[i] Uploaded {} file(s), skipped {}", uploaded, skipped)
            }
            ProgressEvent::RepoReady { url } => format!("[✓] Repo ready: {}", url),
            ProgressEvent::DeployStarted { deploy_id } => {
                format!("[i] Render Blueprint deploy {} started; waiting...", deploy_id)
            }
            ProgressEvent::DeploySkipped { reason } => format!("[i] {}; skipping deploy step", reason),
            ProgressEvent::DeployFinished { outcome, elapsed } => {
                format!("[i] Deploy {} after {}s", outcome, elapsed.as_secs())
            }
            ProgressEvent::Completed { .. } => return None,
            ProgressEvent::Failed { .. } => return None,
        };
        Some(line)
    }
}

impl ProgressHandler for ConsoleHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        if let Some(line) = Self::render(event) {
            println!("{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_stage_lines() {
        assert_eq!(
            ConsoleHandler::render(&ProgressEvent::PlanningStarted {
                project: "todo".to_string()
            })
            .unwrap(),
            "[i] Planning project: todo"
        );
        assert_eq!(
            ConsoleHandler::render(&ProgressEvent::RepoReady {
                url: "https://github.com/octo/todo".to_string()
            })
            .unwrap(),
            "[✓] Repo ready: https://github.com/octo/todo"
        );
        assert_eq!(
            ConsoleHandler::render(&ProgressEvent::FileSkipped {
                path: ".env".to_string(),
                reason: "sensitive file".to_string()
            })
            .unwrap(),
            "[!] Skipping sensitive file: .env"
        );
    }

    #[test]
    fn test_warnings_use_bang_prefix() {
        let line = ConsoleHandler::render(&ProgressEvent::FallbackScaffold { written: 5 }).unwrap();
        assert!(line.starts_with("[!] "));
    }

    #[test]
    fn test_silent_events() {
        assert!(ConsoleHandler::render(&ProgressEvent::Completed {
            total_time: Duration::from_secs(1)
        })
        .is_none());
        assert!(ConsoleHandler::render(&ProgressEvent::PlanReady {
            files: 1,
            elapsed: Duration::ZERO
        })
        .is_none());
    }
}
