//! Starter document templates for project scaffolding

use crate::error::{Result, RoletexError};
use std::fs;
use std::path::Path;

// Built-in template constants
const MAIN_TEMPLATE: &str = "\\documentclass[11pt]{article}\n\
\\newcommand{\\name}[1]{{\\LARGE #1}\\par\\medskip}\n\
\\newcommand{\\location}[1]{#1\\par}\n\
\\newenvironment{highlights}{\\begin{itemize}}{\\end{itemize}}\n\
\\input{role-def}\n\
\n\
% Roles for this project: {ROLE_LIST}\n\
\\begin{document}\n\
\n\
\\name{Your Name}\n\
\\location{Your City}\n\
\n\
\\section*{Experience}\n\
\n\
\\begin{rolecontent}{{FIRST_ROLE}}\n\
Content that only the {FIRST_ROLE} variant includes.\n\
\\end{rolecontent}\n\
\n\
\\begin{highlights}\n\
\\rolecontent{{ROLE_LIST}}{\\item A bullet shared by every role}\n\
\\end{highlights}\n\
\n\
\\end{document}\n";

/// Template for generated starter documents
#[derive(Debug)]
pub struct Template {
    content: String,
}

impl Template {
    /// Create template from built-in template name
    pub fn from_builtin(template_name: &str) -> Result<Self> {
        let content = match template_name {
            "main.tex" => MAIN_TEMPLATE,
            _ => {
                return Err(RoletexError::Config(format!(
                    "Unknown template: {}",
                    template_name
                )))
            }
        };

        Ok(Template {
            content: content.to_string(),
        })
    }

    /// Create template from custom template file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| RoletexError::Config(format!("Failed to read template file: {}", e)))?;

        Ok(Template { content })
    }

    /// Render template with role variable substitution
    pub fn render(&self, roles: &[String]) -> String {
        let first_role = roles.first().map(String::as_str).unwrap_or("default");

        self.content
            .replace("{ROLE_LIST}", &roles.join(","))
            .replace("{FIRST_ROLE}", first_role)
    }
}
