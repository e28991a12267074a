//! Linkdock CLI - inspect and migrate a bookmarks file
//!
//! Loads the bookmark store (platform config directory, or `--dir <path>`),
//! prints the folder tree, and with `--touch` writes the set back out in
//! normalized form.

use anyhow::{bail, Result};
use linkdock::{short_title, BookmarkStore};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

struct Args {
    dir: Option<PathBuf>,
    touch: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        dir: None,
        touch: false,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--dir" => match iter.next() {
                Some(dir) => args.dir = Some(PathBuf::from(dir)),
                None => bail!("--dir requires a path"),
            },
            "--touch" => args.touch = true,
            "--help" | "-h" => {
                println!("Usage: linkdock [--dir <config_dir>] [--touch]");
                std::process::exit(0);
            }
            other => bail!("unknown argument: {other}"),
        }
    }
    Ok(args)
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = parse_args()?;
    let mut store = match args.dir {
        Some(dir) => BookmarkStore::load(dir),
        None => BookmarkStore::load_default()?,
    };
    info!("Loaded bookmarks from {:?}", store.config_dir());

    for folder in store.tree().folders() {
        println!("{}", folder.title);
        for bookmark in &folder.entries {
            let icon = if bookmark.icon.is_some() { " [icon]" } else { "" };
            println!(
                "  {} -> {}{}",
                short_title(&bookmark.title),
                bookmark.url,
                icon
            );
        }
    }

    if args.touch {
        store.mark_modified();
        store.write()?;
    }

    Ok(())
}
