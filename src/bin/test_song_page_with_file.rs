use std::path::PathBuf;

use clap::Parser;
use echords_scraping::{parser::song_page, schema::join_chords};
use scraper::Html;

#[derive(Parser)]
struct Opts {
    input: PathBuf,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let opts = Opts::parse();
    let html = Html::parse_document(&fs_err::read_to_string(opts.input)?);
    let page = song_page::parse(&html)?;
    println!("key: {}", page.key());
    println!("chords: {}", join_chords(page.chords()));
    Ok(())
}
