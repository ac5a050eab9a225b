use scraper::ElementRef;

pub mod song_index;
pub mod song_page;

/// Visible text of an element with surrounding whitespace removed.
fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_owned()
}
