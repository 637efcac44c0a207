//! Role filtering - pruning the tag tree and serializing the survivors
//!
//! Filtering is a recursive walk over the parsed node tree: matched tags are
//! replaced by their (recursively filtered) children with the delimiters
//! stripped, unmatched tags vanish entirely, untagged text passes through
//! verbatim. Passes run in a fixed order: tag pruning, then the location
//! pass, then empty-environment cleanup.

use super::cleanup;
use super::parser::{Node, TagParser};
use crate::error::Result;
use std::path::Path;

/// Options for one filtering pass
#[derive(Debug, Clone)]
pub struct FilterOptions {
    /// The single target role this pass resolves tag membership against
    pub role: String,

    /// Whether \location content is retained in the output
    pub include_location: bool,

    /// Environments removed from the output when filtering empties them
    pub prune_environments: Vec<String>,
}

impl FilterOptions {
    pub fn new(role: &str, include_location: bool) -> Self {
        FilterOptions {
            role: role.to_string(),
            include_location,
            prune_environments: vec!["highlights".to_string()],
        }
    }

    pub fn with_prune_environments(mut self, environments: Vec<String>) -> Self {
        self.prune_environments = environments;
        self
    }
}

/// Filter for producing a single role's variant of a source file
pub struct TagFilter;

impl TagFilter {
    /// Run the full pipeline on one file's content.
    ///
    /// The output contains no tag markup and is valid LaTeX, ready for the
    /// compiler. The input is never mutated; filtering already-filtered
    /// content is the identity.
    pub fn filter_source(source: &str, file: &Path, options: &FilterOptions) -> Result<String> {
        let nodes = TagParser::parse(source, file)?;
        let rendered = Self::render(&nodes, &options.role);
        let located = cleanup::location_pass(&rendered, options.include_location, file)?;
        Ok(cleanup::prune_empty_environments(
            &located,
            &options.prune_environments,
        ))
    }

    /// Serialize a node tree for the given target role.
    pub fn render(nodes: &[Node], role: &str) -> String {
        let mut writer = LineWriter::new();
        render_nodes(nodes, role, &mut writer);
        writer.finish()
    }
}

fn render_nodes(nodes: &[Node], role: &str, writer: &mut LineWriter) {
    for node in nodes {
        match node {
            Node::Text(text) => writer.push_text(text),
            Node::Block { roles, children } => {
                writer.mark_removed();
                if roles.contains(role) {
                    render_nodes(children, role, writer);
                    // the closing marker is stripped too
                    writer.mark_removed();
                }
            }
            Node::Inline { roles, children } => {
                writer.mark_removed();
                if roles.contains(role) {
                    render_nodes(children, role, writer);
                }
            }
            Node::ExcludeBlock { .. } | Node::ExcludeInline { .. } => {
                writer.mark_removed();
            }
        }
    }
}

/// Line-aware output buffer.
///
/// Tracks whether filtering removed something on the line currently being
/// written; a line that was emptied by such a removal is dropped entirely,
/// while lines that were already blank in the source are kept. This is what
/// keeps marker-only lines from leaving blank holes in the output.
pub(crate) struct LineWriter {
    out: String,
    line_start: usize,
    removed_on_line: bool,
}

impl LineWriter {
    pub(crate) fn new() -> Self {
        LineWriter {
            out: String::new(),
            line_start: 0,
            removed_on_line: false,
        }
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                self.end_line();
            } else {
                self.out.push(ch);
            }
        }
    }

    /// Record that filtering removed a marker or span on the current line.
    pub(crate) fn mark_removed(&mut self) {
        self.removed_on_line = true;
    }

    fn end_line(&mut self) {
        if self.removed_on_line && self.current_line_is_blank() {
            // the line only ever held removed markup; drop it and its newline
            self.out.truncate(self.line_start);
        } else {
            self.out.push('\n');
            self.line_start = self.out.len();
        }
        self.removed_on_line = false;
    }

    fn current_line_is_blank(&self) -> bool {
        self.out[self.line_start..]
            .chars()
            .all(|c| c == ' ' || c == '\t' || c == '\r')
    }

    pub(crate) fn finish(mut self) -> String {
        if self.removed_on_line
            && self.current_line_is_blank()
            && self.out.len() > self.line_start
        {
            self.out.truncate(self.line_start);
        }
        self.out
    }
}
