use clap::Parser;
use roletex::application::{clean, init, BuildOptions, BuildService, ConfigService};
use roletex::cli::{format_build_summary, Cli, Commands};
use roletex::error::RoletexError;
use roletex::infrastructure::FileSystemRepository;

fn main() {
    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<(), RoletexError> {
    match cli.command {
        Some(Commands::Init { path, roles }) => init::init(&path, &roles),
        Some(Commands::Build {
            role,
            roles,
            source_dir,
            output_dir,
            include_location,
            skip_compile,
        }) => {
            // --role narrows the build to exactly one role
            let roles = match role {
                Some(single) => vec![single],
                None => roles,
            };

            let repo = FileSystemRepository::discover()?;
            let service = BuildService::new(repo);
            let reports = service.execute(BuildOptions {
                roles,
                source_dir,
                output_dir,
                include_location,
                skip_compile,
            })?;

            print!("{}", format_build_summary(&reports));
            Ok(())
        }
        Some(Commands::Config { key, value, list }) => {
            let repo = FileSystemRepository::discover()?;
            let service = ConfigService::new(repo);

            if list {
                let config = service.list()?;
                println!("roles = {}", config.roles.join(","));
                println!("source_dir = {}", config.source_dir);
                println!("output_dir = {}", config.output_dir);
                println!("styles_dir = {}", config.styles_dir);
                println!("main_file = {}", config.main_file);
                println!("compiler = {}", config.compiler);
                println!("include_location = {}", config.include_location);
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                    Ok(())
                } else {
                    let val = service.get(&k)?;
                    println!("{}", val);
                    Ok(())
                }
            } else {
                println!("Usage: roletex config [--list | <key> [<value>]]");
                println!(
                    "Valid keys: roles, source_dir, output_dir, styles_dir, \
                    main_file, compiler, include_location"
                );
                Ok(())
            }
        }
        Some(Commands::Clean) => {
            let repo = FileSystemRepository::discover()?;
            clean::clean(&repo)
        }
        None => {
            println!("roletex - Role-based LaTeX variant builder");
            println!("Use --help for usage information");
            Ok(())
        }
    }
}
