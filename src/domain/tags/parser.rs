//! Tag parsing for LaTeX sources
//!
//! Parses the rolecontent/exclude marker grammar into a node tree. Nesting is
//! handled by recursion, so a block closing marker always pairs with the
//! innermost open block of its kind.

use crate::domain::roles::RoleSet;
use crate::error::{Result, RoletexError};
use std::path::{Path, PathBuf};

const BLOCK_OPEN: &str = "\\begin{rolecontent}";
const BLOCK_CLOSE: &str = "\\end{rolecontent}";
const EXCLUDE_OPEN: &str = "\\begin{exclude}";
const EXCLUDE_CLOSE: &str = "\\end{exclude}";
const INLINE: &str = "\\rolecontent{";
const EXCLUDE_INLINE: &str = "\\exclude{";

/// A parsed piece of tagged source
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Untagged text, emitted verbatim for every role
    Text(String),

    /// \begin{rolecontent}{roles} ... \end{rolecontent}
    Block { roles: RoleSet, children: Vec<Node> },

    /// \rolecontent{roles}{content}
    Inline { roles: RoleSet, children: Vec<Node> },

    /// \begin{exclude} ... \end{exclude} - dropped for every role
    ExcludeBlock { children: Vec<Node> },

    /// \exclude{content} - dropped for every role
    ExcludeInline { children: Vec<Node> },
}

pub struct TagParser;

impl TagParser {
    /// Parse source text into a node tree.
    ///
    /// The file path is used only for error context; the source itself is
    /// never mutated.
    pub fn parse(source: &str, file: &Path) -> Result<Vec<Node>> {
        let mut scanner = Scanner {
            src: source,
            pos: 0,
            file,
        };
        scanner.parse_nodes(Terminator::Eof, 0)
    }
}

/// What ends the node sequence currently being parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    /// Top level: end of input
    Eof,
    /// Inside \begin{rolecontent}: the matching \end{rolecontent}
    BlockClose,
    /// Inside \begin{exclude}: the matching \end{exclude}
    ExcludeClose,
    /// Inside a brace-delimited inline argument: the balancing }
    CloseBrace,
}

struct Scanner<'a> {
    src: &'a str,
    pos: usize,
    file: &'a Path,
}

impl<'a> Scanner<'a> {
    fn parse_nodes(&mut self, terminator: Terminator, opened_at: usize) -> Result<Vec<Node>> {
        let mut nodes = Vec::new();
        let mut text = String::new();
        // Brace depth within an inline argument; braces elsewhere are plain text.
        let mut brace_depth: usize = 0;

        loop {
            let rest = &self.src[self.pos..];

            if rest.is_empty() {
                match terminator {
                    Terminator::Eof => {
                        flush_text(&mut text, &mut nodes);
                        return Ok(nodes);
                    }
                    Terminator::BlockClose => {
                        return Err(self.malformed_at(
                            opened_at,
                            "unterminated rolecontent block (missing \\end{rolecontent})",
                        ))
                    }
                    Terminator::ExcludeClose => {
                        return Err(self.malformed_at(
                            opened_at,
                            "unterminated exclude block (missing \\end{exclude})",
                        ))
                    }
                    Terminator::CloseBrace => {
                        return Err(self
                            .malformed_at(opened_at, "unbalanced braces in inline tag argument"))
                    }
                }
            }

            if rest.starts_with(BLOCK_CLOSE) {
                if terminator == Terminator::BlockClose {
                    flush_text(&mut text, &mut nodes);
                    self.pos += BLOCK_CLOSE.len();
                    return Ok(nodes);
                }
                return Err(self.malformed_here("\\end{rolecontent} without matching \\begin"));
            }

            if rest.starts_with(EXCLUDE_CLOSE) {
                if terminator == Terminator::ExcludeClose {
                    flush_text(&mut text, &mut nodes);
                    self.pos += EXCLUDE_CLOSE.len();
                    return Ok(nodes);
                }
                return Err(self.malformed_here("\\end{exclude} without matching \\begin"));
            }

            if rest.starts_with(BLOCK_OPEN) {
                flush_text(&mut text, &mut nodes);
                let marker_pos = self.pos;
                self.pos += BLOCK_OPEN.len();
                let roles = self.parse_role_argument(marker_pos)?;
                let children = self.parse_nodes(Terminator::BlockClose, marker_pos)?;
                nodes.push(Node::Block { roles, children });
                continue;
            }

            if rest.starts_with(EXCLUDE_OPEN) {
                flush_text(&mut text, &mut nodes);
                let marker_pos = self.pos;
                self.pos += EXCLUDE_OPEN.len();
                let children = self.parse_nodes(Terminator::ExcludeClose, marker_pos)?;
                nodes.push(Node::ExcludeBlock { children });
                continue;
            }

            if rest.starts_with(INLINE) {
                flush_text(&mut text, &mut nodes);
                let marker_pos = self.pos;
                self.pos += INLINE.len() - 1; // leave the { for the role argument
                let roles = self.parse_role_argument(marker_pos)?;
                if !self.src[self.pos..].starts_with('{') {
                    return Err(
                        self.malformed_at(marker_pos, "inline tag is missing its content argument")
                    );
                }
                self.pos += 1;
                let children = self.parse_nodes(Terminator::CloseBrace, marker_pos)?;
                nodes.push(Node::Inline { roles, children });
                continue;
            }

            if rest.starts_with(EXCLUDE_INLINE) {
                flush_text(&mut text, &mut nodes);
                let marker_pos = self.pos;
                self.pos += EXCLUDE_INLINE.len();
                let children = self.parse_nodes(Terminator::CloseBrace, marker_pos)?;
                nodes.push(Node::ExcludeInline { children });
                continue;
            }

            // Plain text. Inside an inline argument, track brace depth so the
            // balancing close brace ends the argument.
            let ch = rest.chars().next().expect("non-empty rest");
            if terminator == Terminator::CloseBrace {
                if ch == '{' {
                    brace_depth += 1;
                } else if ch == '}' {
                    if brace_depth == 0 {
                        flush_text(&mut text, &mut nodes);
                        self.pos += 1;
                        return Ok(nodes);
                    }
                    brace_depth -= 1;
                }
            }
            text.push(ch);
            self.pos += ch.len_utf8();
        }
    }

    /// Parse a `{role1,role2}` argument at the current position.
    fn parse_role_argument(&mut self, marker_pos: usize) -> Result<RoleSet> {
        if !self.src[self.pos..].starts_with('{') {
            return Err(self.malformed_at(marker_pos, "tag is missing its role list"));
        }
        self.pos += 1;

        let rest = &self.src[self.pos..];
        let Some(close) = rest.find('}') else {
            return Err(self.malformed_at(marker_pos, "unterminated role list"));
        };

        let role_list = &rest[..close];
        self.pos += close + 1;

        RoleSet::parse(role_list).map_err(|message| self.malformed_at(marker_pos, &message))
    }

    fn malformed_here(&self, message: &str) -> RoletexError {
        self.malformed_at(self.pos, message)
    }

    fn malformed_at(&self, pos: usize, message: &str) -> RoletexError {
        RoletexError::MalformedTag {
            file: PathBuf::from(self.file),
            line: line_number(self.src, pos),
            message: message.to_string(),
        }
    }
}

fn flush_text(text: &mut String, nodes: &mut Vec<Node>) {
    if !text.is_empty() {
        nodes.push(Node::Text(std::mem::take(text)));
    }
}

/// 1-based line number of a byte position
pub(crate) fn line_number(src: &str, pos: usize) -> usize {
    src[..pos.min(src.len())].matches('\n').count() + 1
}
