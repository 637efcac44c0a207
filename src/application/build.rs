//! Variant build use case
//!
//! Orchestrates the full workflow of building role-specific variants:
//! filter each source file for the role, copy style files, regenerate the
//! role definition file, then run the LaTeX compiler twice.

use crate::domain::tags::{FilterOptions, TagFilter};
use crate::error::{Result, RoletexError};
use crate::infrastructure::repository::ProjectRepository;
use crate::infrastructure::{Config, FileSystemRepository, LatexRunner};
use std::path::PathBuf;

/// Options for a build run
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Roles to build (empty = the roles configured in roletex.toml)
    pub roles: Vec<String>,

    /// Source directory override
    pub source_dir: Option<String>,

    /// Output directory override
    pub output_dir: Option<String>,

    /// Retain \location content in the output
    pub include_location: bool,

    /// Only filter; do not invoke the LaTeX compiler
    pub skip_compile: bool,
}

/// Summary of one role's build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub role: String,
    pub files: usize,
    pub output_dir: PathBuf,
    pub compiled: bool,
}

/// Service for building role variants
pub struct BuildService {
    repository: FileSystemRepository,
}

impl BuildService {
    /// Create new build service
    pub fn new(repository: FileSystemRepository) -> Self {
        BuildService { repository }
    }

    /// Execute the build.
    ///
    /// A single role writes into the output directory itself; several roles
    /// each get their own subdirectory. Returns one report per role.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No roles are given and none are configured
    /// - The source directory is missing or holds no .tex files
    /// - A source file contains malformed tag markup (the batch aborts
    ///   before the compiler runs for that role)
    /// - The compiler fails
    pub fn execute(&self, options: BuildOptions) -> Result<Vec<BuildReport>> {
        // 1. Load config and resolve effective settings
        let mut config = self.repository.load_config()?;
        if let Some(source_dir) = options.source_dir {
            config.source_dir = source_dir;
        }
        if let Some(output_dir) = options.output_dir {
            config.output_dir = output_dir;
        }

        let roles = if options.roles.is_empty() {
            config.roles.clone()
        } else {
            options.roles
        };

        if roles.is_empty() {
            return Err(RoletexError::Config(
                "No roles to build. Pass --role/--roles or set 'roles' in roletex.toml."
                    .to_string(),
            ));
        }

        let include_location = options.include_location || config.include_location;

        // 2. List sources once; every role sees the same ordered set
        let sources = self.repository.list_sources(&config.source_dir)?;
        if sources.is_empty() {
            return Err(RoletexError::Config(format!(
                "No .tex files found in '{}'",
                config.source_dir
            )));
        }

        // 3. Build each role into its own output area
        let single_role = roles.len() == 1;
        let mut reports = Vec::new();

        for role in &roles {
            let output_dir = if single_role {
                config.output_dir.clone()
            } else {
                format!("{}/{}", config.output_dir, role)
            };

            let report = self.build_role(
                &config,
                role,
                &output_dir,
                include_location,
                options.skip_compile,
                &sources,
            )?;
            reports.push(report);
        }

        Ok(reports)
    }

    fn build_role(
        &self,
        config: &Config,
        role: &str,
        output_dir: &str,
        include_location: bool,
        skip_compile: bool,
        sources: &[String],
    ) -> Result<BuildReport> {
        println!("Building variant for role: {}", role);

        let filter_options = FilterOptions::new(role, include_location)
            .with_prune_environments(config.prune_environments.clone());

        // 1. Filter every source file, preserving relative paths
        for source in sources {
            let source_rel = format!("{}/{}", config.source_dir, source);
            let output_rel = format!("{}/{}", output_dir, source);
            println!("  {} -> {}", source_rel, output_rel);

            let content = self.repository.read_file(&source_rel)?;
            let source_path = self.repository.root().join(&source_rel);
            let filtered = TagFilter::filter_source(&content, &source_path, &filter_options)?;

            self.repository.write_file(&output_rel, &filtered)?;
        }

        // 2. Copy style files verbatim
        for style in self.repository.list_styles(&config.styles_dir)? {
            self.repository.copy_file(
                &format!("{}/{}", config.styles_dir, style),
                &format!("{}/{}", output_dir, style),
            )?;
        }

        // 3. Regenerate the role definition file
        let role_def = format!(
            "\\def\\buildrole{{{}}}\n\\def\\includelocation{{{}}}\n",
            role, include_location
        );
        self.repository
            .write_file(&format!("{}/role-def.tex", output_dir), &role_def)?;

        // 4. Two compiler passes, only on clean filter output
        let mut compiled = false;
        if !skip_compile {
            let runner = LatexRunner::new(config.compiler.clone());
            runner.compile(
                &self.repository.root().join(output_dir),
                &config.main_file,
            )?;
            compiled = true;
        }

        Ok(BuildReport {
            role: role.to_string(),
            files: sources.len(),
            output_dir: self.repository.root().join(output_dir),
            compiled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup_project(roles: &[&str]) -> (TempDir, BuildService) {
        let temp = TempDir::new().unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        let config = Config::new(roles.iter().map(|s| s.to_string()).collect());
        repo.save_config(&config).unwrap();
        fs::create_dir_all(temp.path().join("tex")).unwrap();
        (temp, BuildService::new(repo))
    }

    fn write_source(temp: &TempDir, name: &str, content: &str) {
        let path = temp.path().join("tex").join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn build_options(roles: &[&str]) -> BuildOptions {
        BuildOptions {
            roles: roles.iter().map(|s| s.to_string()).collect(),
            skip_compile: true,
            ..BuildOptions::default()
        }
    }

    #[test]
    fn test_single_role_builds_into_output_dir() {
        let (temp, service) = setup_project(&["qr", "qd"]);
        write_source(
            &temp,
            "main.tex",
            "\\begin{rolecontent}{qr}\nQ\n\\end{rolecontent}\nshared\n",
        );

        let reports = service.execute(build_options(&["qr"])).unwrap();

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].role, "qr");
        assert_eq!(reports[0].files, 1);
        assert!(!reports[0].compiled);

        let output = fs::read_to_string(temp.path().join("build/main.tex")).unwrap();
        assert_eq!(output, "Q\nshared\n");
    }

    #[test]
    fn test_batch_builds_per_role_subdirectories() {
        let (temp, service) = setup_project(&["qr", "qd"]);
        write_source(
            &temp,
            "main.tex",
            "\\begin{rolecontent}{qr}\nQ\n\\end{rolecontent}\nshared\n",
        );

        // empty roles = use configured batch
        let reports = service.execute(build_options(&[])).unwrap();

        assert_eq!(reports.len(), 2);
        let qr = fs::read_to_string(temp.path().join("build/qr/main.tex")).unwrap();
        let qd = fs::read_to_string(temp.path().join("build/qd/main.tex")).unwrap();
        assert_eq!(qr, "Q\nshared\n");
        assert_eq!(qd, "shared\n");
    }

    #[test]
    fn test_role_def_regenerated_per_role() {
        let (temp, service) = setup_project(&["qr", "qd"]);
        write_source(&temp, "main.tex", "shared\n");

        service.execute(build_options(&[])).unwrap();

        let qr = fs::read_to_string(temp.path().join("build/qr/role-def.tex")).unwrap();
        assert_eq!(qr, "\\def\\buildrole{qr}\n\\def\\includelocation{false}\n");

        let qd = fs::read_to_string(temp.path().join("build/qd/role-def.tex")).unwrap();
        assert!(qd.contains("\\def\\buildrole{qd}"));
    }

    #[test]
    fn test_include_location_reaches_role_def_and_filter() {
        let (temp, service) = setup_project(&["qr"]);
        write_source(&temp, "main.tex", "\\location{Berlin}\nrest\n");

        let mut options = build_options(&["qr"]);
        options.include_location = true;
        service.execute(options).unwrap();

        let output = fs::read_to_string(temp.path().join("build/main.tex")).unwrap();
        assert!(output.contains("Berlin"));

        let role_def = fs::read_to_string(temp.path().join("build/role-def.tex")).unwrap();
        assert!(role_def.contains("\\def\\includelocation{true}"));
    }

    #[test]
    fn test_relative_paths_preserved() {
        let (temp, service) = setup_project(&["qr"]);
        write_source(&temp, "main.tex", "top\n");
        write_source(&temp, "sections/work.tex", "work\n");

        service.execute(build_options(&["qr"])).unwrap();

        assert!(temp.path().join("build/main.tex").exists());
        assert!(temp.path().join("build/sections/work.tex").exists());
    }

    #[test]
    fn test_styles_copied_verbatim() {
        let (temp, service) = setup_project(&["qr"]);
        write_source(&temp, "main.tex", "x\n");
        fs::create_dir_all(temp.path().join("templates")).unwrap();
        fs::write(
            temp.path().join("templates/layout.sty"),
            "% style with \\rolecontent mention\n",
        )
        .unwrap();

        service.execute(build_options(&["qr"])).unwrap();

        let copied = fs::read_to_string(temp.path().join("build/layout.sty")).unwrap();
        assert_eq!(copied, "% style with \\rolecontent mention\n");
    }

    #[test]
    fn test_malformed_source_aborts_before_outputs_complete() {
        let (temp, service) = setup_project(&["qr"]);
        write_source(&temp, "main.tex", "\\begin{rolecontent}{qr}\nno close\n");

        let err = service.execute(build_options(&["qr"])).unwrap_err();

        match err {
            RoletexError::MalformedTag { file, .. } => {
                assert!(file.ends_with("tex/main.tex"));
            }
            other => panic!("Expected MalformedTag, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_role_builds_smaller_output() {
        let (temp, service) = setup_project(&["qr"]);
        write_source(
            &temp,
            "main.tex",
            "\\begin{rolecontent}{qr}\nQ\n\\end{rolecontent}\nshared\n",
        );

        service.execute(build_options(&["nonexistent-role"])).unwrap();

        let output = fs::read_to_string(temp.path().join("build/main.tex")).unwrap();
        assert_eq!(output, "shared\n");
    }

    #[test]
    fn test_no_roles_anywhere_fails() {
        let (temp, service) = setup_project(&[]);
        write_source(&temp, "main.tex", "x\n");

        let err = service.execute(build_options(&[])).unwrap_err();
        assert!(matches!(err, RoletexError::Config(_)));
    }

    #[test]
    fn test_no_sources_fails() {
        let (_temp, service) = setup_project(&["qr"]);

        let err = service.execute(build_options(&["qr"])).unwrap_err();
        match err {
            RoletexError::Config(msg) => assert!(msg.contains("No .tex files")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_rebuild_overwrites_previous_artifacts() {
        let (temp, service) = setup_project(&["qr"]);
        write_source(&temp, "main.tex", "first\n");
        service.execute(build_options(&["qr"])).unwrap();

        write_source(&temp, "main.tex", "second\n");
        service.execute(build_options(&["qr"])).unwrap();

        let output = fs::read_to_string(temp.path().join("build/main.tex")).unwrap();
        assert_eq!(output, "second\n");
    }

    #[test]
    fn test_source_dir_override() {
        let (temp, service) = setup_project(&["qr"]);
        fs::create_dir_all(temp.path().join("alt")).unwrap();
        fs::write(temp.path().join("alt/main.tex"), "alt content\n").unwrap();

        let mut options = build_options(&["qr"]);
        options.source_dir = Some("alt".to_string());
        service.execute(options).unwrap();

        let output = fs::read_to_string(temp.path().join("build/main.tex")).unwrap();
        assert_eq!(output, "alt content\n");
    }
}
