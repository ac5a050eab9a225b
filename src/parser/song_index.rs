use anyhow::Context;
use echords_scraping_utils::selector;
use scraper::{ElementRef, Html};
use url::Url;

use crate::schema::SongLink;

use super::element_text;

pub const TRACK: &str = "div.track";

/// Lists the song pages linked from an artist's listing page, in document order.
/// Relative links are resolved against `base`.
pub fn parse(html: &Html, base: &Url) -> anyhow::Result<Vec<SongLink>> {
    html.select(selector!(TRACK))
        .enumerate()
        .map(|(i, track)| {
            parse_track(track, base).with_context(|| format!("In track container #{i}"))
        })
        .collect()
}

fn parse_track(track: ElementRef, base: &Url) -> anyhow::Result<SongLink> {
    let anchor = track
        .select(selector!("a[href]"))
        .next()
        .context("Link to the song page not found")?;
    let href = anchor
        .value()
        .attr("href")
        .context("Anchor does not have `href` attribute")?;
    let url = base
        .join(href)
        .with_context(|| format!("Invalid song page link: {href:?}"))?;
    Ok(SongLink::builder()
        .url(url)
        .name(element_text(anchor))
        .build())
}

#[cfg(test)]
mod tests {
    use scraper::Html;
    use url::Url;

    use super::parse;
    use crate::schema::SongName;

    fn base() -> Url {
        Url::parse("https://www.e-chords.com/chords/bill-evans/order-hits").unwrap()
    }

    #[test]
    fn links_in_document_order() {
        let html = Html::parse_document(
            r#"<html><body>
            <div class="lista">
              <div class="track"><a href="https://www.e-chords.com/chords/bill-evans/waltz-for-debby">Waltz For Debby</a></div>
              <div class="ad">not a track</div>
              <div class="track">
                <span>2.</span>
                <a href="/chords/bill-evans/my-foolish-heart">
                  My Foolish Heart
                </a>
                <a href="/chords/bill-evans/ignored">second anchor</a>
              </div>
            </div>
            </body></html>"#,
        );
        let links = parse(&html, &base()).unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(
            links[0].url().as_str(),
            "https://www.e-chords.com/chords/bill-evans/waltz-for-debby"
        );
        assert_eq!(links[0].name(), &SongName::from("Waltz For Debby"));
        assert_eq!(
            links[1].url().as_str(),
            "https://www.e-chords.com/chords/bill-evans/my-foolish-heart"
        );
        assert_eq!(links[1].name(), &SongName::from("My Foolish Heart"));
    }

    #[test]
    fn anchor_without_href_is_skipped_within_track() {
        let html = Html::parse_document(
            r#"<div class="track"><a name="top">#</a><a href="peace-piece">Peace Piece</a></div>"#,
        );
        let links = parse(&html, &base()).unwrap();
        assert_eq!(
            links[0].url().as_str(),
            "https://www.e-chords.com/chords/bill-evans/peace-piece"
        );
        assert_eq!(links[0].name(), &SongName::from("Peace Piece"));
    }

    #[test]
    fn track_without_link_is_an_error() {
        let html = Html::parse_document(
            r#"<div class="track"><a href="a">A</a></div><div class="track">no link</div>"#,
        );
        let error = parse(&html, &base()).unwrap_err();
        assert!(format!("{error:?}").contains("#1"));
    }

    #[test]
    fn empty_listing() {
        let html = Html::parse_document("<html><body><p>nothing here</p></body></html>");
        assert!(parse(&html, &base()).unwrap().is_empty());
    }
}
