use scraper::{Html, Selector};

/// Human title of a site: the `<title>` text, else the first `<h1>`.
/// Whitespace is collapsed; empty titles count as missing.
pub fn site_title(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    ["title", "h1"]
        .iter()
        .filter_map(|selector| Selector::parse(selector).ok())
        .find_map(|selector| {
            doc.select(&selector)
                .next()
                .map(|node| collapse_whitespace(&node.text().collect::<String>()))
                .filter(|title| !title.is_empty())
        })
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
