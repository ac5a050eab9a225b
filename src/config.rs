use std::{
    ops::RangeInclusive,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::bail;
use echords_scraping_utils::fs_util::read_toml;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;
use url::Url;

pub const DEFAULT_INDEX_URL: &str = "https://www.e-chords.com/chords/bill-evans/order-hits";
pub const DEFAULT_OUTPUT_PATH: &str = "bill_evans_sequence.csv";
pub const DEFAULT_BROWSER_CACHE_DIR: &str = "./ignore/chromium";

/// Everything a scraping run can be told.
/// Either given on the command line or loaded from a TOML file.
#[derive(Clone, Debug, PartialEq, TypedBuilder, Serialize, Deserialize, clap::Args)]
#[serde(default, deny_unknown_fields)]
pub struct ScrapeConfig {
    /// Listing page whose track links are visited.
    #[arg(long, default_value = DEFAULT_INDEX_URL)]
    #[builder(default = default_index_url())]
    pub index_url: Url,
    /// CSV file to write; an existing file is overwritten.
    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    #[builder(default = PathBuf::from(DEFAULT_OUTPUT_PATH))]
    pub output: PathBuf,
    /// Chrome or Chromium binary; searched for when omitted.
    #[arg(long)]
    #[builder(default)]
    pub chrome_path: Option<PathBuf>,
    /// Where Chromium is downloaded to when no installed Chrome is found.
    #[arg(long, default_value = DEFAULT_BROWSER_CACHE_DIR)]
    #[builder(default = PathBuf::from(DEFAULT_BROWSER_CACHE_DIR))]
    pub browser_cache_dir: PathBuf,
    /// Show the browser window instead of running headless.
    #[arg(long)]
    #[builder(default)]
    pub with_head: bool,
    /// Lower bound of the pause after each song page, in seconds.
    #[arg(long, default_value_t = 0)]
    #[builder(default = 0)]
    pub min_delay_secs: u64,
    /// Upper bound of the pause after each song page, in seconds.
    #[arg(long, default_value_t = 2)]
    #[builder(default = 2)]
    pub max_delay_secs: u64,
    /// How long to wait for the chord sheet to be rendered, in seconds.
    #[arg(long, default_value_t = 10)]
    #[builder(default = 10)]
    pub render_timeout_secs: u64,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

fn default_index_url() -> Url {
    Url::parse(DEFAULT_INDEX_URL).unwrap()
}

impl ScrapeConfig {
    /// Picks the settings for this run.
    /// A config file replaces the command-line settings as a whole, so any
    /// flag that differs from its default is reported as ignored.
    pub fn resolve(config_path: Option<&Path>, cli: ScrapeConfig) -> anyhow::Result<Self> {
        let Some(path) = config_path else {
            return Ok(cli);
        };
        info!("Loading settings from {path:?}");
        if cli != ScrapeConfig::default() {
            warn!("Command-line settings are ignored because {path:?} was given: {cli:?}");
        }
        read_toml(path)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.min_delay_secs > self.max_delay_secs {
            bail!(
                "The minimum delay ({}s) exceeds the maximum delay ({}s)",
                self.min_delay_secs,
                self.max_delay_secs
            );
        }
        if !matches!(self.index_url.scheme(), "http" | "https") {
            bail!("Unsupported scheme in index URL: {}", self.index_url);
        }
        Ok(())
    }

    pub fn delay_secs(&self) -> RangeInclusive<u64> {
        self.min_delay_secs..=self.max_delay_secs
    }

    pub fn render_timeout(&self) -> Duration {
        Duration::from_secs(self.render_timeout_secs)
    }
}
