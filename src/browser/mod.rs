use std::{
    io,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use chromiumoxide::{
    browser::{Browser, BrowserConfig},
    error::CdpError,
    fetcher::{BrowserFetcher, BrowserFetcherOptions},
    Page,
};
use futures::StreamExt;
use log::{debug, info, warn};
use tokio::{task::JoinHandle, time::sleep};
use url::Url;

use crate::{config::ScrapeConfig, page_source::PageSource, parser::song_page::CHORD_CONTAINER};

pub mod chrome_finder;

const RENDER_POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("Chrome not found at {0:?}. Use --chrome-path to specify its location.")]
    ChromeNotFound(PathBuf),
    #[error("Chrome binary is not executable: {0:?}")]
    NotExecutable(PathBuf),
    #[error("Invalid browser configuration: {0}")]
    Config(String),
    #[error("Failed to download Chromium into {0:?}: {1}")]
    Fetch(PathBuf, String),
    #[error("Browser protocol error: {0}")]
    Cdp(#[from] CdpError),
    #[error("I/O error while managing the browser: {0}")]
    Io(#[from] io::Error),
    #[error("Browser event handler task failed: {0}")]
    Handler(#[from] tokio::task::JoinError),
}

/// A single browser tab, reused for every song page.
///
/// Call [`SongBrowser::close`] when done. Dropping it without closing
/// still stops the event handler, and chromiumoxide kills the process.
pub struct SongBrowser {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    render_timeout: Duration,
}

impl SongBrowser {
    pub async fn launch(config: &ScrapeConfig) -> Result<Self, BrowserError> {
        let chrome = chrome_source(config, chrome_finder::default_paths())?
            .into_executable()
            .await?;
        let browser_config = browser_config(config, &chrome)?;
        let (mut browser, mut handler) = Browser::launch(browser_config).await?;

        // The protocol messages are only processed while this task runs.
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser handler event error (continuing): {e}");
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                if let Err(close_error) = browser.close().await {
                    warn!("Failed to close the browser after a launch error: {close_error}");
                }
                handler.abort();
                return Err(e.into());
            }
        };
        info!("Browser launched");

        Ok(Self {
            browser,
            page,
            handler,
            render_timeout: config.render_timeout(),
        })
    }

    /// Closes the browser and waits for its process and event handler to finish.
    pub async fn close(mut self) -> Result<(), BrowserError> {
        self.browser.close().await?;
        let status = self.browser.wait().await?;
        debug!("Browser exited with {status:?}");
        (&mut self.handler).await?;
        info!("Browser closed");
        Ok(())
    }

    /// Waits until the chord sheet shows up, or until the timeout passes.
    /// Running out of time is not an error; the page is read as it is.
    async fn wait_for_render(&self, url: &Url) {
        let deadline = Instant::now() + self.render_timeout;
        loop {
            if self.page.find_element(CHORD_CONTAINER).await.is_ok() {
                return;
            }
            if Instant::now() >= deadline {
                warn!(
                    "`{CHORD_CONTAINER}` did not appear within {:?} on {url}",
                    self.render_timeout
                );
                return;
            }
            sleep(RENDER_POLL_INTERVAL).await;
        }
    }
}

impl PageSource for SongBrowser {
    async fn page_source(&mut self, url: &Url) -> anyhow::Result<String> {
        self.page.goto(url.as_str()).await?;
        self.wait_for_render(url).await;
        Ok(self.page.content().await?)
    }
}

impl Drop for SongBrowser {
    fn drop(&mut self) {
        self.handler.abort();
    }
}

/// Where the browser binary comes from.
#[derive(Debug, PartialEq, Eq)]
enum ChromeSource {
    Installed(PathBuf),
    /// Nothing installed was found; a Chromium build is fetched into this directory.
    Download(PathBuf),
}

fn chrome_source(
    config: &ScrapeConfig,
    candidates: Vec<PathBuf>,
) -> Result<ChromeSource, BrowserError> {
    Ok(
        match chrome_finder::find_chrome(config.chrome_path.as_deref(), candidates)? {
            Some(path) => ChromeSource::Installed(path),
            None => ChromeSource::Download(config.browser_cache_dir.clone()),
        },
    )
}

impl ChromeSource {
    async fn into_executable(self) -> Result<PathBuf, BrowserError> {
        match self {
            ChromeSource::Installed(path) => Ok(path),
            ChromeSource::Download(dir) => fetch_chromium(&dir).await,
        }
    }
}

/// Downloads Chromium into `dir` unless a build is already there.
async fn fetch_chromium(dir: &Path) -> Result<PathBuf, BrowserError> {
    info!("No installed Chrome found. Fetching Chromium into {dir:?}");
    fs_err::create_dir_all(dir)?;
    let options = BrowserFetcherOptions::builder()
        .with_path(dir)
        .build()
        .map_err(|e| BrowserError::Fetch(dir.to_path_buf(), e.to_string()))?;
    let installation = BrowserFetcher::new(options)
        .fetch()
        .await
        .map_err(|e| BrowserError::Fetch(dir.to_path_buf(), e.to_string()))?;
    info!("Chromium is ready at {:?}", installation.executable_path);
    Ok(installation.executable_path)
}

fn browser_config(config: &ScrapeConfig, chrome: &Path) -> Result<BrowserConfig, BrowserError> {
    debug!("Using Chrome at {chrome:?}");
    let mut builder = BrowserConfig::builder().chrome_executable(chrome);
    if config.with_head {
        builder = builder.with_head();
    }
    builder.build().map_err(BrowserError::Config)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{chrome_source, BrowserError, ChromeSource};
    use crate::config::ScrapeConfig;

    #[test]
    fn missing_chrome_is_reported_before_launch() {
        let config = ScrapeConfig::builder()
            .chrome_path(Some(PathBuf::from("/nonexistent/chrome")))
            .build();
        assert!(matches!(
            chrome_source(&config, vec![]),
            Err(BrowserError::ChromeNotFound(_))
        ));
    }

    #[test]
    fn nothing_installed_falls_back_to_download() {
        let config = ScrapeConfig::builder()
            .browser_cache_dir(PathBuf::from("cache/chromium"))
            .build();
        let candidates = vec![PathBuf::from("/nonexistent/google-chrome")];
        assert_eq!(
            chrome_source(&config, candidates).unwrap(),
            ChromeSource::Download(PathBuf::from("cache/chromium"))
        );
    }

    #[test]
    fn installed_chrome_is_preferred() {
        let temp = tempfile::NamedTempFile::new().unwrap();

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(temp.path(), std::fs::Permissions::from_mode(0o755))
                .unwrap();
        }

        let config = ScrapeConfig::default();
        assert_eq!(
            chrome_source(&config, vec![temp.path().to_path_buf()]).unwrap(),
            ChromeSource::Installed(temp.path().to_path_buf())
        );
    }

    #[tokio::test]
    async fn installed_chrome_needs_no_download() {
        let path = PathBuf::from("/opt/chrome/chrome");
        assert_eq!(
            ChromeSource::Installed(path.clone())
                .into_executable()
                .await
                .unwrap(),
            path
        );
    }
}
