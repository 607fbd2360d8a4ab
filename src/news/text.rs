use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("invalid whitespace regex"));
static IMG: Lazy<Selector> = Lazy::new(|| Selector::parse("img[src]").expect("invalid img selector"));

/// Text content of an HTML fragment with entities decoded and whitespace
/// collapsed.
pub fn strip_html(html: &str) -> String {
    if !html.contains('<') && !html.contains('&') {
        return WHITESPACE.replace_all(html.trim(), " ").into_owned();
    }

    let fragment = Html::parse_fragment(html);
    let text: String = fragment.root_element().text().collect();

    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// `src` of the first `<img>` in an HTML fragment.
pub fn first_image_src(html: &str) -> Option<String> {
    if !html.contains("<img") {
        return None;
    }

    Html::parse_fragment(html)
        .select(&IMG)
        .filter_map(|img| img.value().attr("src"))
        .map(str::trim)
        .find(|src| !src.is_empty())
        .map(str::to_string)
}

/// First `max` characters of `text`.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
