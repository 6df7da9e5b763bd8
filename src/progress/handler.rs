//! Progress handler trait and events

use std::time::Duration;

/// Events emitted while a pipeline run advances through its stages
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Planning started for a project
    PlanningStarted { project: String },

    /// The first reply did not parse; a stricter prompt is being sent
    RepairRequested { error: String },

    /// The model produced a plan
    PlanReady { files: usize, elapsed: Duration },

    /// Model-generated files were written under the working root
    FilesWritten { count: usize },

    /// The model returned no files; fallback files that were missing were written
    FallbackScaffold { written: usize },

    /// Repository creation and push started
    PublishStarted { repo: String },

    /// Creation was refused and the repository URL is assumed
    RepoAssumed { url: String },

    /// A file was excluded from the push
    FileSkipped { path: String, reason: String },

    /// Every publishable file was uploaded
    PushComplete { uploaded: usize, skipped: usize },

    /// The repository is populated
    RepoReady { url: String },

    /// A deploy was triggered
    DeployStarted { deploy_id: String },

    /// The deploy stage did not run
    DeploySkipped { reason: String },

    /// Polling reached a terminal state or timed out
    DeployFinished {
        outcome: String,
        elapsed: Duration,
    },

    /// The run completed
    Completed { total_time: Duration },

    /// The run aborted
    Failed { error: String },
}

/// Trait for handling progress events during a run
pub trait ProgressHandler: Send + Sync {
    /// Called when a progress event occurs
    fn on_progress(&self, event: &ProgressEvent);
}

/// No-op handler that ignores all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpHandler;

impl ProgressHandler for NoOpHandler {
    fn on_progress(&self, _event: &ProgressEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingHandler {
        count: Arc<AtomicUsize>,
    }

    impl ProgressHandler for CountingHandler {
        fn on_progress(&self, _event: &ProgressEvent) {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_noop_handler() {
        NoOpHandler.on_progress(&ProgressEvent::PlanningStarted {
            project: "todo".to_string(),
        });
    }

    #[test]
    fn test_progress_events() {
        let count = Arc::new(AtomicUsize::new(0));
        let handler = CountingHandler {
            count: count.clone(),
        };

        handler.on_progress(&ProgressEvent::PlanningStarted {
            project: "todo".to_string(),
        });
        handler.on_progress(&ProgressEvent::PlanReady {
            files: 2,
            elapsed: Duration::from_millis(50),
        });
        handler.on_progress(&ProgressEvent::Completed {
            total_time: Duration::from_secs(5),
        });

        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_event_debug() {
        let event = ProgressEvent::FilesWritten { count: 1 };
        let debug_str = format!("{:?}", event);
        assert!(debug_str.contains("FilesWritten"));
        assert!(debug_str.contains("count: 1"));
    }
}
