//! Document parser.
//!
//! The document is a lightweight Markdown dialect:
//!
//! ```text
//! # Group name
//!
//! ## Snippet name
//! Optional one-line description
//! Body line 1
//!
//! Body line 3
//! ```
//!
//! * `# ` in column 0 opens a group, `## ` in column 0 opens a snippet inside
//!   the current group. The marker must be followed by a space, a tab or the
//!   end of the line. `###` and deeper are ordinary content.
//! * Lines between a snippet heading and the next heading form the snippet's
//!   block. Inside a fenced code block (a line starting, after indentation,
//!   with three backticks or three tildes) headings are content.
//! * Surrounding blank lines of the block are dropped. A block of two or more
//!   lines uses its first line as the description and the rest as the body.
//!   A single-line block is all body. An empty block drops the snippet. A
//!   first line that opens a fence is never a description.
//! * Anything before the first group heading, and anything inside a group
//!   before its first snippet heading, is ignored.
//!
//! Parsing never fails: unfinished or malformed documents produce whatever
//! groups could be recognised, possibly none.

use crate::models::{Snippet, SnippetGroup};

const FENCE_MARKERS: [&str; 2] = ["```", "~~~"];

enum Line<'a> {
    Group(&'a str),
    Snippet(&'a str),
    Content(&'a str),
}

fn classify(line: &str) -> Line<'_> {
    if let Some(name) = heading_text(line, "##") {
        Line::Snippet(name)
    } else if let Some(name) = heading_text(line, "#") {
        Line::Group(name)
    } else {
        Line::Content(line)
    }
}

fn heading_text<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(marker)?;
    if rest.is_empty() || rest.starts_with([' ', '\t']) {
        Some(rest.trim())
    } else {
        None
    }
}

fn fence_marker(line: &str) -> Option<&'static str> {
    let trimmed = line.trim_start();
    FENCE_MARKERS
        .into_iter()
        .find(|marker| trimmed.starts_with(marker))
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// A snippet whose heading has been seen but whose block is still open.
struct PendingSnippet<'a> {
    name: &'a str,
    lines: Vec<&'a str>,
    fence: Option<&'static str>,
}

impl<'a> PendingSnippet<'a> {
    fn new(name: &'a str) -> Self {
        Self {
            name,
            lines: Vec::new(),
            fence: None,
        }
    }

    fn push(&mut self, line: &'a str) {
        match (self.fence, fence_marker(line)) {
            (None, Some(marker)) => self.fence = Some(marker),
            (Some(open), Some(marker)) if open == marker => self.fence = None,
            _ => {}
        }
        self.lines.push(line);
    }

    fn in_fence(&self) -> bool {
        self.fence.is_some()
    }

    fn finish(self) -> Option<Snippet> {
        let start = self.lines.iter().position(|line| !is_blank(line))?;
        let end = self.lines.iter().rposition(|line| !is_blank(line))?;
        let block = &self.lines[start..=end];

        let (description, body) = match block {
            [first, rest @ ..] if !rest.is_empty() && fence_marker(first).is_none() => {
                let body_start = rest.iter().position(|line| !is_blank(line))?;
                (first.trim(), &rest[body_start..])
            }
            _ => ("", block),
        };

        Some(Snippet::new(
            self.name,
            description,
            body.join("\n").trim_end(),
        ))
    }
}

enum State<'a> {
    Outside,
    InGroup(SnippetGroup),
    InSnippet(SnippetGroup, PendingSnippet<'a>),
}

/// Parse document text into its ordered groups.
pub fn parse(text: &str) -> Vec<SnippetGroup> {
    let mut groups = Vec::new();
    let mut state = State::Outside;

    for line in text.lines() {
        state = match state {
            State::InSnippet(group, mut pending) if pending.in_fence() => {
                pending.push(line);
                State::InSnippet(group, pending)
            }
            state => step(state, classify(line), &mut groups),
        };
    }

    close_group(state, &mut groups);

    tracing::debug!(
        groups = groups.len(),
        snippets = groups.iter().map(|g| g.snippets.len()).sum::<usize>(),
        "parsed document"
    );

    groups
}

fn step<'a>(state: State<'a>, line: Line<'a>, groups: &mut Vec<SnippetGroup>) -> State<'a> {
    match (state, line) {
        (state, Line::Group(name)) => {
            close_group(state, groups);
            State::InGroup(SnippetGroup::new(name))
        }

        (State::Outside, _) => State::Outside,

        (State::InGroup(group), Line::Snippet(name)) => {
            State::InSnippet(group, PendingSnippet::new(name))
        }
        (State::InGroup(group), Line::Content(_)) => State::InGroup(group),

        (State::InSnippet(mut group, pending), Line::Snippet(name)) => {
            group.snippets.extend(pending.finish());
            State::InSnippet(group, PendingSnippet::new(name))
        }
        (State::InSnippet(group, mut pending), Line::Content(line)) => {
            pending.push(line);
            State::InSnippet(group, pending)
        }
    }
}

fn close_group(state: State<'_>, groups: &mut Vec<SnippetGroup>) {
    match state {
        State::Outside => {}
        State::InGroup(group) => groups.push(group),
        State::InSnippet(mut group, pending) => {
            group.snippets.extend(pending.finish());
            groups.push(group);
        }
    }
}
