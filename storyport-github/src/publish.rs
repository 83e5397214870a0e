//! Issue creation from parsed stories

use std::time::Duration;

use serde::{Deserialize, Serialize};
use storyport_core::{IssueRequest, Priority, StoryRecord};
use tracing::{debug, info, warn};

use crate::IssueTracker;

/// Options for publishing stories
#[derive(Debug, Clone)]
pub struct PublishOptions {
    /// Report what would be created without calling the tracker
    pub dry_run: bool,
    /// Only publish "Must Have" stories
    pub must_have_only: bool,
    /// Pause between consecutive live creations
    pub delay: Duration,
    /// Labels to add to all created issues
    pub extra_labels: Vec<String>,
}

impl Default for PublishOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            must_have_only: false,
            delay: Duration::from_millis(500),
            extra_labels: Vec::new(),
        }
    }
}

/// What happened to one story
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// Issue created
    Created {
        number: Option<u64>,
        url: Option<String>,
    },
    /// Dry run; the issue would have been created
    WouldCreate,
    /// Filtered out by the must-have-only option
    Skipped,
    /// The tracker rejected the issue
    Failed { error: String },
}

/// Per-story result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryOutcome {
    /// Story title
    pub title: String,
    /// Name of the story's epic, empty when it has none
    pub epic: String,
    /// Labels the issue was (or would be) created with
    pub labels: Vec<String>,
    /// Result for this story
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

/// Counts and outcomes of a publish run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublishReport {
    /// Stories that passed the filter and were attempted
    pub total: usize,
    /// Issues created (or that would be created in a dry run)
    pub created: usize,
    /// Stories filtered out
    pub skipped: usize,
    /// Stories whose creation failed
    pub failed: usize,
    /// Whether this was a dry run
    pub dry_run: bool,
    /// One entry per story, in document order
    pub outcomes: Vec<StoryOutcome>,
}

impl PublishReport {
    /// Outcomes whose creation failed
    pub fn failures(&self) -> impl Iterator<Item = &StoryOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, OutcomeStatus::Failed { .. }))
    }
}

/// Create one issue per story, in order
///
/// Creation failures are logged and recorded, and the run moves on to the
/// next story; previously created issues are left in place.
pub async fn publish_stories<T, I>(
    tracker: &T,
    stories: I,
    options: &PublishOptions,
) -> PublishReport
where
    T: IssueTracker + ?Sized,
    I: IntoIterator<Item = StoryRecord>,
{
    publish_stories_with(tracker, stories, options, |_| {}).await
}

/// Like [`publish_stories`], calling `on_outcome` as soon as each story
/// is settled
pub async fn publish_stories_with<T, I, F>(
    tracker: &T,
    stories: I,
    options: &PublishOptions,
    mut on_outcome: F,
) -> PublishReport
where
    T: IssueTracker + ?Sized,
    I: IntoIterator<Item = StoryRecord>,
    F: FnMut(&StoryOutcome),
{
    let mut report = PublishReport {
        dry_run: options.dry_run,
        ..Default::default()
    };
    let mut live_attempts = 0usize;

    for story in stories {
        let request = IssueRequest::from_story(&story, &options.extra_labels);

        let status = if options.must_have_only && story.priority_level() != Priority::MustHave {
            info!(title = %story.title, "Skipping story (not Must Have)");
            report.skipped += 1;
            OutcomeStatus::Skipped
        } else if options.dry_run {
            info!(title = %request.title, labels = ?request.labels, "[DRY RUN] Would create issue");
            report.total += 1;
            report.created += 1;
            OutcomeStatus::WouldCreate
        } else {
            report.total += 1;

            if live_attempts > 0 && !options.delay.is_zero() {
                debug!(delay = ?options.delay, "Pausing before next creation");
                tokio::time::sleep(options.delay).await;
            }
            live_attempts += 1;

            match tracker.create_issue(&request).await {
                Ok(created) => {
                    info!(
                        title = %request.title,
                        number = ?created.number,
                        tracker = tracker.name(),
                        "Created issue"
                    );
                    report.created += 1;
                    OutcomeStatus::Created {
                        number: created.number,
                        url: created.url,
                    }
                }
                Err(e) => {
                    warn!(title = %request.title, error = %e, "Failed to create issue");
                    report.failed += 1;
                    OutcomeStatus::Failed {
                        error: e.to_string(),
                    }
                }
            }
        };

        let outcome = StoryOutcome {
            title: request.title,
            epic: story.epic,
            labels: request.labels,
            status,
        };
        on_outcome(&outcome);
        report.outcomes.push(outcome);
    }

    report
}
