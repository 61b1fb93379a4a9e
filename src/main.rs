mod archive;
mod article;
mod dates;
mod homepage;
mod walk;

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

/// archive-gen - rebuild the news archive page and the homepage
/// latest-news feed from the article pages under materias/
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Site root containing index.html and the materias/ directory
    #[arg(default_value = ".")]
    site_root: PathBuf,

    /// Maximum number of items in the homepage latest-news feed
    #[arg(short = 'n', long = "latest-max", default_value_t = 4)]
    latest_max: usize,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    match run(&args) {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let content_dir = args.site_root.join("materias");
    let archive_file = args.site_root.join("materias.html");
    let index_file = args.site_root.join("index.html");

    info!("generating news archive from {}", content_dir.display());
    let mut articles = walk::collect_articles(&content_dir, &args.site_root)?;

    // Newest first. Both renderers require this ordering and neither
    // re-sorts, so the archive and the homepage feed always agree.
    articles.sort_by(|a, b| b.sort_timestamp.cmp(&a.sort_timestamp));

    homepage::update_index(&index_file, &articles, args.latest_max)?;

    fs::write(&archive_file, archive::render(&articles))?;
    info!("{} written ({} articles)", archive_file.display(), articles.len());

    Ok(())
}
