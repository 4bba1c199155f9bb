use std::path::Path;

use anyhow::Result;
use clap::Parser;

mod config;
mod error;
mod git_ops;
mod manifest;
mod ui;
mod version;

#[derive(clap::Parser)]
#[command(
    name = "release-bump",
    about = "Bump the manifest patch version, then commit, tag, and push the release"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("release-bump {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Load configuration
    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    let manifest_path = Path::new(&config.manifest);

    // Read the current version; an absent manifest or version line reads
    // as 0.0.0 so a fresh project can still be bumped
    let current = match manifest::read_version(manifest_path) {
        Ok(current) => current,
        Err(e) => {
            ui::display_error(&format!("Failed to read {}: {}", config.manifest, e));
            std::process::exit(1);
        }
    };

    let next = version::next_patch(&current);

    // Persist the bump; from here on a missing manifest is fatal
    if let Err(e) = manifest::write_version(manifest_path, &next.to_string()) {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }

    let repo = match git_ops::GitRepo::discover() {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };

    ui::display_status(&format!("Publishing release {}", next));
    if let Err(e) = repo.publish(manifest_path, &next, &config.identity, &config.remote) {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }

    // The new version is the only stdout line
    println!("{}", next);
    Ok(())
}
