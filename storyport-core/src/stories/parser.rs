//! USER_STORIES.md parser

use std::iter::FusedIterator;
use std::str::Lines;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use super::{epic_label, StoryRecord};

static EPIC_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^## EPIC (\d+): (.+)$").unwrap());

static STORY_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^### Story ([\d.]+): (.+)$").unwrap());

static SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^---+$").unwrap());

static PRIORITY_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\*Priority:\*\* (.+)$").unwrap());

static EFFORT_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\*Estimated Effort:\*\* (\d+) story point").unwrap());

static TERMINATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^## (Additional Considerations|Future Enhancements|Story Prioritization)")
        .unwrap()
});

/// The epic most recently seen while scanning
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpicContext {
    /// Epic name as written in the header
    pub name: String,
    /// Derived label (e.g., "epic: search-and-discovery")
    pub label: String,
}

impl EpicContext {
    /// Context for a newly seen epic header
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let label = epic_label(&name);
        Self { name, label }
    }
}

/// Single-pass scanner yielding stories in document order
///
/// A story is emitted when the next story header, a closing section
/// header, or the end of the document is reached. Closing sections
/// ("## Additional Considerations", "## Future Enhancements",
/// "## Story Prioritization") end the scan; nothing after them is read.
#[derive(Debug)]
pub struct StoryParser<'a> {
    lines: Lines<'a>,
    epic: EpicContext,
    current: Option<StoryRecord>,
    finished: bool,
}

impl<'a> StoryParser<'a> {
    /// Start scanning a document
    pub fn new(content: &'a str) -> Self {
        Self {
            lines: content.lines(),
            epic: EpicContext::default(),
            current: None,
            finished: false,
        }
    }

    /// The epic context at the current scan position
    pub fn epic(&self) -> &EpicContext {
        &self.epic
    }
}

impl Iterator for StoryParser<'_> {
    type Item = StoryRecord;

    fn next(&mut self) -> Option<StoryRecord> {
        if self.finished {
            return None;
        }

        for line in self.lines.by_ref() {
            if let Some(caps) = EPIC_HEADER.captures(line) {
                self.epic = EpicContext::new(&caps[2]);
                info!(number = &caps[1], epic = %self.epic.name, "Found epic");
                continue;
            }

            if let Some(caps) = STORY_HEADER.captures(line) {
                let story = StoryRecord::open(&caps[1], &caps[2], &self.epic);
                debug!(number = %story.number, title = %story.title, "Found story");
                if let Some(done) = self.current.replace(story) {
                    return Some(done);
                }
                continue;
            }

            if SEPARATOR.is_match(line) {
                continue;
            }

            if TERMINATOR.is_match(line) {
                debug!(line, "Reached closing section, stopping");
                self.finished = true;
                return self.current.take();
            }

            if let Some(story) = self.current.as_mut() {
                record_line(story, line);
            }
        }

        self.finished = true;
        self.current.take()
    }
}

impl FusedIterator for StoryParser<'_> {}

/// Add a body line to an open story, picking up metadata fields
///
/// Repeated Priority or Effort lines overwrite earlier values; every
/// line is kept in the body regardless.
fn record_line(story: &mut StoryRecord, line: &str) {
    if let Some(caps) = PRIORITY_FIELD.captures(line) {
        story.priority = caps[1].to_string();
    } else if let Some(caps) = EFFORT_FIELD.captures(line) {
        story.effort = format!("{}sp", &caps[1]);
    }
    story.body.push(line.to_string());
}

/// Parse every story in a USER_STORIES.md document
pub fn parse_stories(content: &str) -> Vec<StoryRecord> {
    StoryParser::new(content).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_STORIES: &str = r#"# Spotease User Stories

Intro text that belongs to no story.

---

## EPIC 1: Search & Discovery

### Story 1.1: Search for tracks
**As a** listener
**I want** to search tracks
**So that** I can add them to playlists

**Priority:** Must Have
**Estimated Effort:** 5 story points

---

### Story 1.2: Browse genres

**Priority:** Could Have
**Estimated Effort:** 3 story points

---

## EPIC 2: Payments

### Story 2.1: Checkout flow

**Priority:** Should Have

---

## Future Enhancements

### Story 9.1: Never parsed
**Priority:** Must Have
"#;

    #[test]
    fn test_parse_story_count_and_order() {
        let stories = parse_stories(SAMPLE_STORIES);
        let titles: Vec<&str> = stories.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Search for tracks", "Browse genres", "Checkout flow"]
        );
    }

    #[test]
    fn test_parse_story_numbers() {
        let stories = parse_stories(SAMPLE_STORIES);
        assert_eq!(stories[0].number, "1.1");
        assert_eq!(stories[2].number, "2.1");
    }

    #[test]
    fn test_epic_scoping() {
        let stories = parse_stories(SAMPLE_STORIES);
        assert_eq!(stories[0].epic, "Search & Discovery");
        assert_eq!(stories[0].epic_label, "epic: search-and-discovery");
        assert_eq!(stories[1].epic_label, "epic: search-and-discovery");
        assert_eq!(stories[2].epic_label, "epic: payments");
    }

    #[test]
    fn test_metadata_fields() {
        let stories = parse_stories(SAMPLE_STORIES);
        assert_eq!(stories[0].priority, "Must Have");
        assert_eq!(stories[0].effort, "5sp");
        assert_eq!(stories[1].priority, "Could Have");
        assert_eq!(stories[1].effort, "3sp");
        assert_eq!(stories[2].priority, "Should Have");
        assert_eq!(stories[2].effort, "");
    }

    #[test]
    fn test_body_keeps_metadata_and_blank_lines() {
        let stories = parse_stories(SAMPLE_STORIES);
        assert_eq!(
            stories[0].body,
            vec![
                "**As a** listener",
                "**I want** to search tracks",
                "**So that** I can add them to playlists",
                "",
                "**Priority:** Must Have",
                "**Estimated Effort:** 5 story points",
                "",
                "",
            ]
        );
    }

    #[test]
    fn test_headers_and_separators_not_in_body() {
        let stories = parse_stories(SAMPLE_STORIES);
        for story in &stories {
            assert!(!story.body.iter().any(|l| l.starts_with("---")));
            assert!(!story.body.iter().any(|l| l.starts_with("## ")));
            assert!(!story.body.iter().any(|l| l.starts_with("### ")));
        }
    }

    #[test]
    fn test_terminator_truncates() {
        let stories = parse_stories(SAMPLE_STORIES);
        assert!(stories.iter().all(|s| s.title != "Never parsed"));
    }

    #[test]
    fn test_terminator_emits_open_story() {
        let doc = "## EPIC 1: Core\n### Story 1.1: Last one\nbody\n## Story Prioritization\n### Story 1.2: Gone\n";
        let stories = parse_stories(doc);
        assert_eq!(stories.len(), 1);
        assert_eq!(stories[0].title, "Last one");
        assert_eq!(stories[0].body, vec!["body"]);
    }

    #[test]
    fn test_terminator_without_open_story_stops_scan() {
        let doc = "## Additional Considerations\n## EPIC 1: Core\n### Story 1.1: Hidden\n";
        assert!(parse_stories(doc).is_empty());
    }

    #[test]
    fn test_story_before_any_epic() {
        let doc = "### Story 0.1: Orphan\n**Priority:** Must Have\n";
        let stories = parse_stories(doc);
        assert_eq!(stories.len(), 1);
        assert_eq!(stories[0].epic_label, "");
        assert_eq!(stories[0].epic, "");
    }

    #[test]
    fn test_repeated_fields_last_wins() {
        let doc = "### Story 1.1: Twice\n\
                   **Priority:** Could Have\n\
                   **Estimated Effort:** 2 story points\n\
                   **Priority:** Must Have\n\
                   **Estimated Effort:** 13 story points\n";
        let stories = parse_stories(doc);
        assert_eq!(stories[0].priority, "Must Have");
        assert_eq!(stories[0].effort, "13sp");
        assert_eq!(stories[0].body.len(), 4);
    }

    #[test]
    fn test_unknown_priority_kept_verbatim() {
        let doc = "### Story 1.1: Odd\n**Priority:** Won't Have (this release)\n";
        let stories = parse_stories(doc);
        assert_eq!(stories[0].priority, "Won't Have (this release)");
    }

    #[test]
    fn test_effort_singular_point() {
        let doc = "### Story 1.1: Tiny\n**Estimated Effort:** 1 story point\n";
        assert_eq!(parse_stories(doc)[0].effort, "1sp");
    }

    #[test]
    fn test_effort_without_digits_is_body_only() {
        let doc = "### Story 1.1: Vague\n**Estimated Effort:** TBD\n";
        let stories = parse_stories(doc);
        assert_eq!(stories[0].effort, "");
        assert_eq!(stories[0].body, vec!["**Estimated Effort:** TBD"]);
    }

    #[test]
    fn test_epic_header_inside_story_keeps_story_epic() {
        let doc = "## EPIC 1: First\n### Story 1.1: Spans\nline a\n## EPIC 2: Second\nline b\n### Story 2.1: Next\n";
        let stories = parse_stories(doc);
        assert_eq!(stories[0].epic_label, "epic: first");
        assert_eq!(stories[0].body, vec!["line a", "line b"]);
        assert_eq!(stories[1].epic_label, "epic: second");
    }

    #[test]
    fn test_lines_outside_stories_ignored() {
        let doc = "## EPIC 1: Core\n**Priority:** Must Have\nstray text\n### Story 1.1: Clean\n";
        let stories = parse_stories(doc);
        assert_eq!(stories.len(), 1);
        assert!(stories[0].body.is_empty());
        assert_eq!(stories[0].priority, "");
    }

    #[test]
    fn test_malformed_headers_are_body_text() {
        let doc = "### Story 1.1: Real\n### Story: no number\n## EPIC one: Words\n";
        let stories = parse_stories(doc);
        assert_eq!(stories.len(), 1);
        assert_eq!(
            stories[0].body,
            vec!["### Story: no number", "## EPIC one: Words"]
        );
    }

    #[test]
    fn test_crlf_document() {
        let doc = "## EPIC 2: Payments\r\n### Story 2.1: Checkout flow\r\n**Priority:** Must Have\r\n";
        let stories = parse_stories(doc);
        assert_eq!(stories[0].title, "Checkout flow");
        assert_eq!(stories[0].priority, "Must Have");
    }

    #[test]
    fn test_no_stories() {
        assert!(parse_stories("").is_empty());
        assert!(parse_stories("# Title\n\n## EPIC 1: Empty\n---\n").is_empty());
    }

    #[test]
    fn test_parse_is_repeatable() {
        assert_eq!(parse_stories(SAMPLE_STORIES), parse_stories(SAMPLE_STORIES));
    }

    #[test]
    fn test_parser_is_fused() {
        let mut parser = StoryParser::new("### Story 1.1: Only\n## Future Enhancements\n");
        assert!(parser.next().is_some());
        assert!(parser.next().is_none());
        assert!(parser.next().is_none());
    }

    #[test]
    fn test_parser_tracks_epic() {
        let mut parser = StoryParser::new("## EPIC 3: Social & Sharing\n### Story 3.1: Share\n");
        let story = parser.next().unwrap();
        assert_eq!(parser.epic().label, "epic: social-and-sharing");
        assert_eq!(story.epic_label, parser.epic().label);
    }

    #[test]
    fn test_single_story_example() {
        let doc = "## EPIC 2: Payments\n### Story 2.1: Checkout flow\n**Priority:** Must Have\n---\n";
        let stories = parse_stories(doc);
        assert_eq!(
            stories,
            vec![StoryRecord {
                number: "2.1".to_string(),
                title: "Checkout flow".to_string(),
                body: vec!["**Priority:** Must Have".to_string()],
                priority: "Must Have".to_string(),
                effort: String::new(),
                epic: "Payments".to_string(),
                epic_label: "epic: payments".to_string(),
            }]
        );
    }
}
