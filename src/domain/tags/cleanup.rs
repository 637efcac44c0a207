//! Post-filter passes: the location marker and empty environments
//!
//! Both passes run on the already-filtered markup surface. The location pass
//! is independent of the role-tag system; the environment pass removes list
//! environments that filtering left without content.

use super::filter::LineWriter;
use super::parser::line_number;
use crate::error::{Result, RoletexError};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// Regex locating the start of a \location command; the argument itself is
/// brace-balanced, so it is scanned rather than matched.
fn location_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\\location\{").unwrap())
}

/// Retain or strip \location{...} content.
///
/// With the flag on, the content is kept verbatim. With the flag off, the
/// whole command is removed, and a line emptied by the removal is dropped.
/// The pass never consults the target role.
pub fn location_pass(content: &str, include_location: bool, file: &Path) -> Result<String> {
    // (start of \location, one past the closing brace)
    let mut spans: Vec<(usize, usize)> = Vec::new();
    let mut cursor = 0;

    while let Some(m) = location_regex().find(&content[cursor..]) {
        let start = cursor + m.start();
        let arg_start = cursor + m.end();
        let arg_end = matching_brace(content, arg_start).ok_or_else(|| {
            RoletexError::MalformedTag {
                file: file.to_path_buf(),
                line: line_number(content, start),
                message: "unterminated \\location argument".to_string(),
            }
        })?;
        spans.push((start, arg_end + 1));
        cursor = arg_end + 1;
    }

    if include_location || spans.is_empty() {
        return Ok(content.to_string());
    }

    let mut writer = LineWriter::new();
    let mut pos = 0;
    for (start, end) in spans {
        writer.push_text(&content[pos..start]);
        writer.mark_removed();
        pos = end;
    }
    writer.push_text(&content[pos..]);
    Ok(writer.finish())
}

/// Byte index of the brace balancing the one just before `open_end`.
fn matching_brace(content: &str, open_end: usize) -> Option<usize> {
    let mut depth = 1usize;
    for (offset, ch) in content[open_end..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open_end + offset);
                }
            }
            _ => {}
        }
    }
    None
}

/// Remove environments whose body filtering left with only whitespace and
/// `%` comments, so the compiler never sees an itemless list environment.
pub fn prune_empty_environments(content: &str, environments: &[String]) -> String {
    let mut result = content.to_string();

    for env in environments {
        let pattern = format!(
            r"\\begin\{{{0}\}}(?:\s|%[^\n]*)*\\end\{{{0}\}}",
            regex::escape(env)
        );
        let re = Regex::new(&pattern).expect("valid environment pattern");

        // removing an inner environment can empty an outer one
        loop {
            let next = re.replace_all(&result, "").into_owned();
            if next == result {
                break;
            }
            result = next;
        }
    }

    result
}
