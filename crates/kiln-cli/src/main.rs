use clap::{Parser, Subcommand};
use kiln_build::{BuildSpec, CompileCommand};
use kiln_driver::Driver;
use miette::{miette, Result};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kiln")]
#[command(author, version, about = "Generates and runs single-shot compile scripts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble the compile command, persist it as a script, and run it
    Build {
        /// Path to the build manifest
        #[arg(short, long, default_value = "compile_command.json")]
        manifest: PathBuf,

        /// Path of the generated build script
        #[arg(short, long, default_value = "compile.sh")]
        script: PathBuf,

        /// Write the executable script but do not run it
        #[arg(long)]
        no_run: bool,
    },

    /// Print the assembled compile command without touching the filesystem
    Print {
        /// Path to the build manifest
        #[arg(short, long, default_value = "compile_command.json")]
        manifest: PathBuf,
    },

    /// Write a starter manifest for a new project
    Init {
        /// Path of the manifest to create
        #[arg(short, long, default_value = "compile_command.json")]
        manifest: PathBuf,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .without_time()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            manifest,
            script,
            no_run,
        } => {
            let driver = Driver::new();

            if no_run {
                let spec = driver.load_spec(&manifest)?;
                let command = CompileCommand::from_spec(&spec);
                println!("{}", command);
                driver.write_script(&script, &command)?;
                driver.make_executable(&script)?;
                println!("Wrote {}", script.display());
            } else {
                let status = driver.generate_and_run(&manifest, &script)?;
                if !status.success() {
                    // Forward the build's outcome instead of exiting zero.
                    std::process::exit(status.code().unwrap_or(1));
                }
            }
        }

        Commands::Print { manifest } => {
            let driver = Driver::new();
            let spec = driver.load_spec(&manifest)?;
            println!("{}", CompileCommand::from_spec(&spec));
        }

        Commands::Init { manifest } => {
            if manifest.exists() {
                return Err(miette!("Manifest already exists: {}", manifest.display()));
            }

            let starter = BuildSpec {
                main: "main.c".to_string(),
                programs: Vec::new(),
                modules: Vec::new(),
                output: "a.out".to_string(),
            };
            let body = serde_json::to_string_pretty(&starter)
                .map_err(|e| miette!("Failed to serialize starter manifest: {}", e))?;
            std::fs::write(&manifest, body)
                .map_err(|e| miette!("Failed to write {}: {}", manifest.display(), e))?;
            println!("Created {}", manifest.display());
        }
    }

    Ok(())
}
