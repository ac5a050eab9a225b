use anyhow::bail;
use log::{debug, info};
use scraper::Html;
use url::Url;

use crate::{parser::song_index, schema::SongLink};

pub fn reqwest_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().connection_verbose(true).build()
}

/// Fetches the listing page with a plain GET and returns the song links on it.
pub async fn download_song_index(
    client: &reqwest::Client,
    url: &Url,
) -> anyhow::Result<Vec<SongLink>> {
    info!("Fetching the song list from {url}");
    let response = client.get(url.clone()).send().await?;
    if !response.status().is_success() {
        bail!(
            "Failed to fetch the song list: server returned {:?}",
            response.status()
        );
    }
    // Relative links are resolved against where we actually ended up.
    let base = response.url().clone();
    let document = Html::parse_document(&response.text().await?);
    let links = song_index::parse(&document, &base)?;
    debug!(
        "Songs: {:?}",
        links.iter().map(|link| link.name()).collect::<Vec<_>>()
    );
    info!("Found {} songs", links.len());
    Ok(links)
}
