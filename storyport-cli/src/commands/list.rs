//! List command - show parsed stories without touching the tracker

use std::path::PathBuf;

use clap::Args;
use storyport_core::config::CliOverrides;
use storyport_core::{load_document, parse_stories, Config, Priority, StoryRecord};

use super::emoji;

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Path to the stories document (default: USER_STORIES.md)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Only list "Must Have" stories
    #[arg(long, visible_alias = "mvp-only")]
    pub must_have_only: bool,

    /// Print stories as JSON
    #[arg(long)]
    pub json: bool,

    /// Use plain-text markers instead of emoji
    #[arg(long)]
    pub no_emoji: bool,
}

impl ListArgs {
    /// Execute the list command
    pub fn execute(&self) -> anyhow::Result<()> {
        let config = Config::load_with_overrides(CliOverrides {
            stories_file: self.file.clone(),
            ..Default::default()
        })?;

        let content = load_document(&config.source.path)?;
        let stories: Vec<StoryRecord> = parse_stories(&content)
            .into_iter()
            .filter(|s| !self.must_have_only || s.priority_level() == Priority::MustHave)
            .collect();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&stories)?);
            return Ok(());
        }

        println!(
            "Parsed {}: {} stories",
            config.source.path.display(),
            stories.len()
        );

        let mut current_epic: Option<&str> = None;
        for story in &stories {
            if current_epic != Some(story.epic.as_str()) {
                current_epic = Some(story.epic.as_str());
                println!();
                if story.epic.is_empty() {
                    println!("{} (no epic)", emoji(self.no_emoji, "📦", "[EPIC]"));
                } else {
                    println!(
                        "{} {} ({})",
                        emoji(self.no_emoji, "📦", "[EPIC]"),
                        story.epic,
                        story.epic_label
                    );
                }
            }

            println!(
                "  {} {}: {}",
                emoji(self.no_emoji, "📝", "-"),
                story.number,
                story.title
            );
            println!("       {}", story.labels().to_vec().join(", "));
        }

        Ok(())
    }
}
