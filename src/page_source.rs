use url::Url;

/// Something that can turn a song page URL into the HTML a visitor would see,
/// including content rendered by scripts.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    async fn page_source(&mut self, url: &Url) -> anyhow::Result<String>;
}
