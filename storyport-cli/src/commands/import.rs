//! Import command - create issues from the stories document

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use storyport_core::config::CliOverrides;
use storyport_core::{load_document, Config, StoryParser};
use storyport_github::{
    publish_stories_with, GhCli, IssueTracker, OutcomeStatus, PublishOptions, PublishReport,
    StoryOutcome,
};

use super::emoji;

const RULE: &str = "==================================================";

/// Arguments for the import command
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Show what would be created without creating issues
    #[arg(long)]
    pub dry_run: bool,

    /// Only create "Must Have" stories
    #[arg(long, visible_alias = "mvp-only")]
    pub must_have_only: bool,

    /// Path to the stories document (default: USER_STORIES.md)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Repository (owner/repo format); gh infers it when omitted
    #[arg(short, long)]
    pub repo: Option<String>,

    /// Path to the gh executable
    #[arg(long)]
    pub gh_path: Option<String>,

    /// Additional labels to add to every issue
    #[arg(short, long)]
    pub label: Vec<String>,

    /// Pause between issue creations (e.g. "500ms", "1s")
    #[arg(long, value_parser = humantime::parse_duration)]
    pub delay: Option<Duration>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Use plain-text markers instead of emoji
    #[arg(long)]
    pub no_emoji: bool,
}

impl ImportArgs {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            stories_file: self.file.clone(),
            gh_path: self.gh_path.clone(),
            repo: self.repo.clone(),
            delay: self.delay,
            labels: self.label.clone(),
        }
    }

    /// Execute the import command
    ///
    /// Preflight failures (gh missing, not authenticated, document
    /// missing) are returned as errors; individual creation failures are
    /// only reported.
    pub async fn execute(&self) -> anyhow::Result<PublishReport> {
        let config = Config::load_with_overrides(self.overrides())?;

        if !self.json {
            println!("{}", RULE);
            println!("Storyport GitHub Issue Creator");
            println!("{}", RULE);
            println!();
            println!("User Stories File: {}", config.source.path.display());
            println!("Dry Run: {}", self.dry_run);
            println!("Must Have Only: {}", self.must_have_only);
            println!();
        }

        let tracker = GhCli::new()
            .with_path(&config.tracker.gh_path)
            .with_repo(config.tracker.repo.clone());
        tracing::debug!(tracker = tracker.name(), "Running preflight checks");
        tracker.preflight().await?;
        let content = load_document(&config.source.path)?;

        let options = PublishOptions {
            dry_run: self.dry_run,
            must_have_only: self.must_have_only,
            delay: config.publish.delay,
            extra_labels: config.publish.labels.clone(),
        };

        if !self.json {
            println!("Parsing user stories...");
        }

        let mut progress = Progress::new(self.no_emoji);
        let stories = StoryParser::new(&content);
        let report = publish_stories_with(&tracker, stories, &options, |outcome| {
            if !self.json {
                progress.print(outcome);
            }
        })
        .await;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            self.print_summary(&report);
        }

        Ok(report)
    }

    fn print_summary(&self, report: &PublishReport) {
        println!();
        println!("{}", RULE);
        println!("Summary");
        println!("{}", RULE);
        println!("Total stories: {}", report.total);

        if report.dry_run {
            println!("Would create: {} issues", report.created);
        } else {
            println!("Created: {} issues", report.created);
        }

        if report.failed > 0 {
            println!("Failed: {} issues", report.failed);
        }

        if report.skipped > 0 {
            println!("Skipped: {} issues (not Must Have)", report.skipped);
        }

        println!();
        println!("{}", done_line(self.no_emoji));
        println!();

        if report.dry_run {
            println!("This was a dry run. Run without --dry-run to create issues.");
        }

        if self.must_have_only {
            println!("Note: Only Must Have stories were processed.");
            println!("Remove --must-have-only to create all stories.");
        }
    }
}

/// Prints each story's outcome as soon as the publisher settles it
struct Progress {
    no_emoji: bool,
    current_epic: Option<String>,
}

impl Progress {
    fn new(no_emoji: bool) -> Self {
        Self {
            no_emoji,
            current_epic: None,
        }
    }

    fn print(&mut self, outcome: &StoryOutcome) {
        if self.current_epic.as_deref() != Some(outcome.epic.as_str()) {
            self.current_epic = Some(outcome.epic.clone());
            println!();
            if !outcome.epic.is_empty() {
                println!(
                    "{} EPIC: {}",
                    emoji(self.no_emoji, "📦", "[EPIC]"),
                    outcome.epic
                );
                println!("{}", "-".repeat(RULE.len()));
            }
        }

        match &outcome.status {
            OutcomeStatus::Skipped => {
                println!(
                    "  {}  SKIPPED (not Must Have): {}",
                    emoji(self.no_emoji, "⏭️", "[SKIP]"),
                    outcome.title
                );
            }
            OutcomeStatus::WouldCreate => {
                println!(
                    "  {} DRY RUN: Would create {}",
                    emoji(self.no_emoji, "🔍", "[DRY]"),
                    outcome.title
                );
                println!("     Labels: {}", outcome.labels.join(", "));
            }
            OutcomeStatus::Created { number, url } => {
                let reference = number.map(|n| format!("#{} ", n)).unwrap_or_default();
                println!(
                    "  {} Created {}{}",
                    emoji(self.no_emoji, "✅", "[OK]"),
                    reference,
                    outcome.title
                );
                if let Some(url) = url {
                    println!("     {}", url);
                }
            }
            OutcomeStatus::Failed { error } => {
                println!(
                    "  {}  Failed to create {}: {}",
                    emoji(self.no_emoji, "⚠️", "[WARN]"),
                    outcome.title,
                    error
                );
            }
        }
    }
}

fn done_line(no_emoji: bool) -> String {
    match emoji(no_emoji, "🎉", "") {
        "" => "Done!".to_string(),
        mark => format!("Done! {}", mark),
    }
}
