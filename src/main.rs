//! Main entry point for the gtfszip CLI application.
//!
//! This binary locates a GTFS feed inside a (possibly nested) ZIP archive
//! and extracts its files into a directory.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::{Path, PathBuf};

use gtfszip::{Address, Cli, ZipSource};

/// Application entry point.
///
/// Parses command-line arguments, installs the logger and dispatches to the
/// listing or extraction mode.
fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .format_timestamp(None)
        .init();

    if !ZipSource::exists(&cli.address) {
        bail!("cannot find {}", Address::parse(&cli.address).archive_path.display());
    }

    let source = ZipSource::new(cli.source_options());
    let archive = Address::parse(&cli.address).archive_path;

    // List modes: display archive structure and exit
    if cli.list {
        return list_roots(&source, &archive);
    }
    if cli.verbose {
        return list_index(&source, &archive);
    }

    extract(&source, &cli)
}

/// Print every directory that holds a complete feed, one per line.
///
/// Each line is usable as the fragment of an address.
fn list_roots(source: &ZipSource, archive: &Path) -> Result<()> {
    let roots = source.find_roots(archive)?;
    for root in &roots {
        println!("{}#{}", archive.display(), root);
    }
    if roots.is_empty() {
        log::warn!("no feed root found in {}", archive.display());
    }
    Ok(())
}

/// Print the directory index: each directory followed by its files.
fn list_index(source: &ZipSource, archive: &Path) -> Result<()> {
    let index = source.index(archive)?;

    let mut file_count = 0usize;
    for (dir, files) in index.iter() {
        let marker = if source.file_table().required_files_present(files) {
            "  [feed]"
        } else {
            ""
        };
        let shown = if dir.is_empty() { "." } else { dir };
        println!("{shown}/{marker}");
        for name in files {
            println!("    {name}");
        }
        file_count += files.len();
    }

    println!("{}", "-".repeat(40));
    println!("{} directories, {} files", index.len(), file_count);
    Ok(())
}

/// Extract the addressed feed.
///
/// With `-d` the files land in that directory (created if needed).
/// Otherwise a fresh temporary directory is created, kept and printed.
fn extract(source: &ZipSource, cli: &Cli) -> Result<()> {
    let (workdir, seen) = match cli.extract_dir {
        Some(ref dir) => {
            let dir = PathBuf::from(dir);
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("cannot create {}", dir.display()))?;
            let seen = source.load_into(&cli.address, &dir)?;
            (dir, seen)
        }
        None => {
            let loaded = source.load(&cli.address)?;
            let seen = loaded.source_filenames().to_vec();
            (loaded.keep(), seen)
        }
    };

    if !cli.is_very_quiet() {
        for name in &seen {
            let status = if source.file_table().is_recognized(name) {
                "extracted"
            } else {
                "skipped"
            };
            if !cli.is_quiet() || status == "extracted" {
                println!("  {status}: {name}");
            }
        }
    }

    let missing: Vec<&str> = source
        .file_table()
        .required()
        .filter(|name| !seen.iter().any(|s| s == name))
        .collect();
    if !missing.is_empty() {
        log::warn!("feed is missing required files: {}", missing.join(", "));
    }

    println!("{}", workdir.display());
    Ok(())
}
