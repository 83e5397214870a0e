//! Storyport Core - Story parsing for the storyport issue importer
//!
//! This crate turns a USER_STORIES.md document into flat story records and
//! derives the tracker labels (epic, priority, effort) for each of them.

pub mod config;
pub mod error;
pub mod stories;

pub use config::Config;
pub use error::{Error, Result};
pub use stories::{
    load_document, parse_stories, IssueRequest, Priority, StoryLabels, StoryParser, StoryRecord,
};
