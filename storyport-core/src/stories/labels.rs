//! Label derivation for stories

use std::fmt;

use serde::{Deserialize, Serialize};

use super::StoryRecord;

/// Label attached to every imported story
pub const USER_STORY_LABEL: &str = "user-story";

/// Story priority on the MoSCoW scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    MustHave,
    ShouldHave,
    CouldHave,
    Unspecified,
}

impl Priority {
    /// Match the priority text against the fixed vocabulary
    ///
    /// Anything outside "Must Have", "Should Have" and "Could Have",
    /// including the empty string, is `Unspecified`.
    pub fn parse(text: &str) -> Self {
        match text {
            "Must Have" => Priority::MustHave,
            "Should Have" => Priority::ShouldHave,
            "Could Have" => Priority::CouldHave,
            _ => Priority::Unspecified,
        }
    }

    /// Tracker label for this priority
    pub fn label(self) -> &'static str {
        match self {
            Priority::MustHave => "priority: must-have",
            Priority::ShouldHave => "priority: should-have",
            Priority::CouldHave => "priority: could-have",
            Priority::Unspecified => "priority: unspecified",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Derive the epic label from an epic name
///
/// "Search & Discovery" becomes "epic: search-and-discovery".
pub fn epic_label(name: &str) -> String {
    format!(
        "epic: {}",
        name.to_lowercase().replace(' ', "-").replace('&', "and")
    )
}

/// Effort label for an already-suffixed effort value, if any
pub fn effort_label(effort: &str) -> Option<String> {
    if effort.is_empty() {
        None
    } else {
        Some(format!("effort: {}", effort))
    }
}

/// The labels derived from one story
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryLabels {
    /// Epic label, empty when the story precedes every epic header
    pub epic: String,
    /// Mapped priority
    pub priority: Priority,
    /// Effort label, when the story has an estimate
    pub effort: Option<String>,
}

impl StoryLabels {
    /// Map a story's fields to labels
    pub fn for_story(story: &StoryRecord) -> Self {
        Self {
            epic: story.epic_label.clone(),
            priority: Priority::parse(&story.priority),
            effort: effort_label(&story.effort),
        }
    }

    /// Ordered label list: epic, priority, user-story, then effort
    ///
    /// An empty epic label is left out since trackers reject empty names.
    pub fn to_vec(&self) -> Vec<String> {
        let mut labels = Vec::with_capacity(4);
        if !self.epic.is_empty() {
            labels.push(self.epic.clone());
        }
        labels.push(self.priority.label().to_string());
        labels.push(USER_STORY_LABEL.to_string());
        if let Some(ref effort) = self.effort {
            labels.push(effort.clone());
        }
        labels
    }
}
