// ABOUTME: Main entry point for the markdown-to-presentation program.
// ABOUTME: Provides CLI interface and executes commands from the library.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the slide deck from markdown into the output directory
    RunBuild(RunBuildArgs),

    /// Publish a redirect file and build directory to the pages branch
    Push(PushArgs),

    /// Remove the persistent publish workspace
    Clean(CleanArgs),
}

#[derive(Args)]
struct RunBuildArgs {
    /// Path to the slides markdown file
    #[arg(short, long, default_value = "slides.md")]
    slides: PathBuf,

    /// Directory holding assets and the two scss sources
    #[arg(short, long, default_value = "assets")]
    assets: PathBuf,

    /// Build output directory
    #[arg(short, long, default_value = "build")]
    build_dir: PathBuf,

    /// Top-level redirect file to write
    #[arg(short, long, default_value = "index.htm")]
    redirect: PathBuf,

    /// Glob pattern selecting which asset files get copied
    #[arg(long, default_value = "*")]
    asset_pattern: String,
}

#[derive(Args)]
struct PushArgs {
    /// Redirect file produced by run-build
    redirect_file: PathBuf,

    /// Build directory produced by run-build
    build_dir: PathBuf,

    /// Pages branch to publish to
    #[arg(long)]
    branch: Option<String>,

    /// Remote whose URL is pushed to
    #[arg(long)]
    remote: Option<String>,

    /// Name of the environment variable holding the push token
    #[arg(long)]
    token_var: Option<String>,

    /// Persistent workspace directory for the pages checkout
    #[arg(long)]
    workspace: Option<PathBuf>,
}

#[derive(Args)]
struct CleanArgs {
    /// Persistent workspace directory to remove
    #[arg(long)]
    workspace: Option<PathBuf>,
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::RunBuild(args) => {
            let config = mtp::BuildConfig {
                slides_path: args.slides,
                assets_dir: args.assets,
                build_dir: args.build_dir,
                redirect_path: args.redirect,
                asset_pattern: args.asset_pattern,
            };
            mtp::run_build(&config)?;
            Ok(())
        }
        Commands::Push(args) => {
            let mut config = mtp::PublishConfig::from_env();
            if let Some(branch) = args.branch {
                config.branch = branch;
            }
            if let Some(remote) = args.remote {
                config.remote = remote;
            }
            if let Some(token_var) = args.token_var {
                config.token_var = token_var;
            }
            if let Some(workspace) = args.workspace {
                config.workspace_dir = workspace;
            }
            mtp::publish(&args.redirect_file, &args.build_dir, &config)?;
            Ok(())
        }
        Commands::Clean(args) => {
            let workspace_dir = args
                .workspace
                .unwrap_or_else(|| mtp::PublishConfig::from_env().workspace_dir);
            if workspace_dir.exists() {
                mtp::Workspace::open(&workspace_dir)?.destroy()?;
            }
            Ok(())
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
