//! LaTeX compiler invocation

use crate::error::{Result, RoletexError};
use std::path::Path;
use std::process::Command;

/// Number of compiler passes per variant. LaTeX needs a second pass to
/// resolve cross-references.
const PASSES: u32 = 2;

/// Runner for the external LaTeX compiler
pub struct LatexRunner {
    command: String,
}

impl LatexRunner {
    /// Create a new runner with the given compiler command
    pub fn new(compiler_command: String) -> Self {
        LatexRunner {
            command: compiler_command,
        }
    }

    /// Compile the main file inside the given directory, twice.
    ///
    /// Waits for each pass to finish; a non-zero exit stops the run and
    /// surfaces the tail of the compiler output.
    pub fn compile(&self, working_dir: &Path, main_file: &str) -> Result<()> {
        let (program, args) = self.parse_command();

        for pass in 1..=PASSES {
            println!("  {} pass {}/{}: {}", program, pass, PASSES, main_file);

            let output = Command::new(&program)
                .args(&args)
                .arg("-interaction=nonstopmode")
                .arg("-halt-on-error")
                .arg(main_file)
                .current_dir(working_dir)
                .output()
                .map_err(|e| {
                    RoletexError::Compiler(format!(
                        "Failed to launch compiler '{}': {}",
                        program, e
                    ))
                })?;

            if !output.status.success() {
                return Err(RoletexError::Compiler(format!(
                    "{} failed on pass {} for {}:\n{}",
                    program,
                    pass,
                    main_file,
                    log_tail(&output.stdout)
                )));
            }
        }

        Ok(())
    }

    /// Parse command into program and arguments
    fn parse_command(&self) -> (String, Vec<String>) {
        let parts: Vec<&str> = self.command.split_whitespace().collect();

        if parts.is_empty() {
            // Fallback if the configured command is empty
            return ("pdflatex".to_string(), vec![]);
        }

        let program = parts[0].to_string();
        let args = parts[1..].iter().map(|s| s.to_string()).collect();

        (program, args)
    }
}

/// Last few lines of the compiler output, where LaTeX prints its errors
fn log_tail(stdout: &[u8]) -> String {
    const TAIL_LINES: usize = 20;

    let text = String::from_utf8_lossy(stdout);
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(TAIL_LINES);
    lines[start..].join("\n")
}
