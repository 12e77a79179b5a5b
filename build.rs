//! Build script for the Spotify library exporter.
//!
//! Copies the `.env.example` configuration template from the crate root into
//! the user's local data directory so it sits next to the `.env` file the
//! application reads:
//! - Linux: `~/.local/share/spotify-export/.env.example`
//! - macOS: `~/Library/Application Support/spotify-export/.env.example`
//! - Windows: `%LOCALAPPDATA%/spotify-export/.env.example`
//!
//! The copy is a convenience: any failure is reported as a cargo warning and
//! never fails the build.

use std::{env, fs, path::PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    if !env_example_path.is_file() {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
        return Ok(());
    }

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("spotify-export");

    let copied = fs::create_dir_all(&out_dir)
        .and_then(|_| fs::copy(&env_example_path, out_dir.join(".env.example")));
    if let Err(e) = copied {
        println!(
            "cargo:warning=could not copy .env.example to {}: {}",
            out_dir.display(),
            e
        );
    }

    Ok(())
}
