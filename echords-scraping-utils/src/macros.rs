/// Compiles a CSS selector once and hands out a `&'static Selector`.
///
/// Only use this with literal selectors; an invalid one panics on first use.
#[macro_export]
macro_rules! selector {
    ($e: expr) => {{
        use $crate::__private::once_cell::sync::Lazy;
        use $crate::__private::scraper::Selector;
        static SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse($e).unwrap());
        &*SELECTOR
    }};
}
