//! User story parsing and labelling
//!
//! This module handles parsing of USER_STORIES.md documents that group
//! numbered stories under numbered epics, and derives the labels each
//! story is tagged with when it becomes an issue.

mod labels;
mod parser;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

pub use labels::{effort_label, epic_label, Priority, StoryLabels, USER_STORY_LABEL};
pub use parser::{parse_stories, EpicContext, StoryParser};

/// A single story parsed from the document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryRecord {
    /// Dotted story number from the header (e.g., "2.1")
    pub number: String,
    /// Story title
    pub title: String,
    /// Raw body lines, metadata lines included
    pub body: Vec<String>,
    /// Priority text exactly as written
    pub priority: String,
    /// Effort with the "sp" suffix (e.g., "5sp"), empty when absent
    pub effort: String,
    /// Name of the enclosing epic, empty before any epic header
    pub epic: String,
    /// Label of the enclosing epic (e.g., "epic: payments")
    pub epic_label: String,
}

impl StoryRecord {
    /// Create an open story with no body or metadata yet
    pub fn open(number: impl Into<String>, title: impl Into<String>, epic: &EpicContext) -> Self {
        Self {
            number: number.into(),
            title: title.into(),
            epic: epic.name.clone(),
            epic_label: epic.label.clone(),
            ..Default::default()
        }
    }

    /// Body text as sent to the tracker
    pub fn body_text(&self) -> String {
        self.body.join("\n")
    }

    /// Priority parsed against the fixed vocabulary
    pub fn priority_level(&self) -> Priority {
        Priority::parse(&self.priority)
    }

    /// Labels for this story, in tracker order
    pub fn labels(&self) -> StoryLabels {
        StoryLabels::for_story(self)
    }
}

/// Everything needed to create one tracker item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRequest {
    /// Issue title
    pub title: String,
    /// Issue body
    pub body: String,
    /// Labels to attach
    pub labels: Vec<String>,
}

impl IssueRequest {
    /// Build the request for a story, appending any extra labels
    pub fn from_story(story: &StoryRecord, extra_labels: &[String]) -> Self {
        let mut labels = story.labels().to_vec();
        for label in extra_labels {
            if !label.is_empty() && !labels.contains(label) {
                labels.push(label.clone());
            }
        }

        Self {
            title: story.title.clone(),
            body: story.body_text(),
            labels,
        }
    }
}

/// Read the stories document into memory
pub fn load_document(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(Error::SourceNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = content.len(), "Loaded stories document");
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_story() -> StoryRecord {
        StoryRecord {
            number: "1.1".to_string(),
            title: "Search tracks".to_string(),
            body: vec![
                "**Priority:** Must Have".to_string(),
                String::new(),
                "**Estimated Effort:** 3 story points".to_string(),
            ],
            priority: "Must Have".to_string(),
            effort: "3sp".to_string(),
            epic: "Search & Discovery".to_string(),
            epic_label: "epic: search-and-discovery".to_string(),
        }
    }

    #[test]
    fn test_body_text_joins_with_newlines() {
        let story = sample_story();
        assert_eq!(
            story.body_text(),
            "**Priority:** Must Have\n\n**Estimated Effort:** 3 story points"
        );
    }

    #[test]
    fn test_issue_request_from_story() {
        let request = IssueRequest::from_story(&sample_story(), &[]);
        assert_eq!(request.title, "Search tracks");
        assert_eq!(
            request.labels,
            vec![
                "epic: search-and-discovery",
                "priority: must-have",
                "user-story",
                "effort: 3sp"
            ]
        );
    }

    #[test]
    fn test_issue_request_extra_labels_deduplicated() {
        let extra = vec!["mvp".to_string(), "user-story".to_string(), String::new()];
        let request = IssueRequest::from_story(&sample_story(), &extra);
        assert_eq!(request.labels.len(), 5);
        assert_eq!(request.labels.last().map(String::as_str), Some("mvp"));
    }

    #[test]
    fn test_load_document_missing() {
        let err = load_document("/nonexistent/USER_STORIES.md").unwrap_err();
        assert!(matches!(err, Error::SourceNotFound(_)));
    }

    #[test]
    fn test_load_document() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "## EPIC 1: Search").unwrap();
        let content = load_document(file.path()).unwrap();
        assert!(content.starts_with("## EPIC 1: Search"));
    }
}
