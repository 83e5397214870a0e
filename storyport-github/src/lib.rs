//! Storyport GitHub - Issue creation for storyport
//!
//! This crate provides the tracker capability (check availability, check
//! authentication, create an issue), its `gh` CLI implementation, and the
//! publisher that turns parsed stories into issues.

mod error;
mod gh;
mod publish;
mod tracker;

pub use error::{Error, Result};
pub use gh::GhCli;
pub use publish::{
    publish_stories, publish_stories_with, OutcomeStatus, PublishOptions, PublishReport,
    StoryOutcome,
};
pub use tracker::{CreatedIssue, IssueTracker};
