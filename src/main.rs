use std::path::PathBuf;

use clap::Parser;
use echords_scraping::api::{download_song_index, reqwest_client};
use echords_scraping::browser::SongBrowser;
use echords_scraping::config::ScrapeConfig;
use echords_scraping::data_collector::{collect_records, PolitenessDelay};
use echords_scraping::song_table;
use log::warn;

#[derive(Parser)]
struct Opts {
    /// TOML file with the same settings as the options below; replaces them when given.
    #[arg(long)]
    config: Option<PathBuf>,
    #[clap(flatten)]
    scrape: ScrapeConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let opts = Opts::parse();
    let config = ScrapeConfig::resolve(opts.config.as_deref(), opts.scrape)?;
    config.validate()?;

    let client = reqwest_client()?;
    let links = download_song_index(&client, &config.index_url).await?;

    let mut browser = SongBrowser::launch(&config).await?;
    let delay = PolitenessDelay::new(config.delay_secs());
    let records = collect_records(&mut browser, &links, &delay).await;
    if let Err(e) = browser.close().await {
        warn!("Failed to close the browser cleanly: {e}");
    }
    let records = records?;

    song_table::save(&config.output, &records)?;
    Ok(())
}
