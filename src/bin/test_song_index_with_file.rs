use std::path::PathBuf;

use clap::Parser;
use echords_scraping::{config::DEFAULT_INDEX_URL, parser::song_index};
use scraper::Html;
use url::Url;

#[derive(Parser)]
struct Opts {
    input: PathBuf,
    /// Where the page was saved from; used to resolve relative links.
    #[arg(long, default_value = DEFAULT_INDEX_URL)]
    base_url: Url,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let opts = Opts::parse();
    let html = Html::parse_document(&fs_err::read_to_string(opts.input)?);
    for link in song_index::parse(&html, &opts.base_url)? {
        println!("{}\t{}", link.name(), link.url());
    }
    Ok(())
}
