// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Unified diff parsing into per-file change records.

/// Header line that opens a per-file section.
const FILE_HEADER: &str = "diff --git";

/// Marker in front of the post-change path in a file header.
const NEW_PATH_MARKER: &str = " b/";

/// One file touched by a diff.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeRecord {
    /// Repository-relative path, taken from the `b/` side of the header.
    pub path: String,
    /// Added lines, `+` stripped and trimmed.
    pub added_lines: Vec<String>,
    /// Removed lines, `-` stripped and trimmed.
    pub removed_lines: Vec<String>,
    /// Unchanged lines shown for context.
    pub context_lines: Vec<String>,
}

impl ChangeRecord {
    fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Whether this record adds or removes anything.
    pub fn has_changes(&self) -> bool {
        !self.added_lines.is_empty() || !self.removed_lines.is_empty()
    }

    /// Render the record back into diff-like text.
    ///
    /// Every line gets a space after its prefix so content starting with
    /// `++` or `--` is not read back as a file marker. Parsing the output
    /// with [`parse_diff`] yields an equal record.
    pub fn to_diff_text(&self) -> String {
        let mut out = format!(
            "{} a/{} b/{}\n--- a/{}\n+++ b/{}\n@@ @@\n",
            FILE_HEADER, self.path, self.path, self.path, self.path
        );
        let sections = [
            (' ', &self.context_lines),
            ('-', &self.removed_lines),
            ('+', &self.added_lines),
        ];
        for (prefix, lines) in sections {
            for line in lines {
                out.push(prefix);
                out.push(' ');
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }
}

/// Aggregate line counts over a set of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineStats {
    pub files: usize,
    pub added: usize,
    pub removed: usize,
}

impl LineStats {
    /// Count lines across all records.
    pub fn of(records: &[ChangeRecord]) -> Self {
        records.iter().fold(
            Self {
                files: records.len(),
                ..Self::default()
            },
            |mut stats, record| {
                stats.added += record.added_lines.len();
                stats.removed += record.removed_lines.len();
                stats
            },
        )
    }

    /// Calculate the total number of lines changed.
    pub fn total_lines_changed(&self) -> usize {
        self.added + self.removed
    }
}

enum ParserState {
    Idle,
    InFile(ChangeRecord),
}

/// Parse a unified diff into records, in order of first appearance.
///
/// Text without any `diff --git` header yields no records.
pub fn parse_diff(diff: &str) -> Vec<ChangeRecord> {
    let mut records = Vec::new();
    let mut state = ParserState::Idle;

    for line in diff.lines() {
        if line.starts_with(FILE_HEADER) {
            if let ParserState::InFile(record) = state {
                records.push(record);
            }
            state = ParserState::InFile(ChangeRecord::new(header_path(line)));
            continue;
        }

        if let ParserState::InFile(ref mut record) = state {
            if let Some(rest) = line.strip_prefix('+') {
                if !rest.starts_with("++") {
                    record.added_lines.push(rest.trim().to_string());
                }
            } else if let Some(rest) = line.strip_prefix('-') {
                if !rest.starts_with("--") {
                    record.removed_lines.push(rest.trim().to_string());
                }
            } else if let Some(rest) = line.strip_prefix(' ') {
                record.context_lines.push(rest.trim().to_string());
            }
        }
    }

    if let ParserState::InFile(record) = state {
        records.push(record);
    }

    tracing::debug!("Parsed {} file record(s) from diff", records.len());
    records
}

/// Extract the post-change path from a `diff --git a/x b/x` header.
fn header_path(line: &str) -> &str {
    if let Some(path) = line.split(NEW_PATH_MARKER).nth(1) {
        return path.trim_end();
    }

    let last = line[FILE_HEADER.len()..]
        .split_whitespace()
        .last()
        .unwrap_or("");
    last.strip_prefix("b/").unwrap_or(last)
}
