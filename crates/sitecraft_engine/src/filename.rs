use sha2::{Digest, Sha256};

/// Slugs double as subdomain labels, which DNS caps at 63 bytes.
const MAX_SLUG_LEN: usize = 63;
const DEFAULT_SLUG: &str = "site";

/// Lowercase ASCII slug: alphanumerics kept, every other run becomes one `-`.
pub fn site_slug(title: Option<&str>) -> String {
    let mut slug = String::with_capacity(MAX_SLUG_LEN);
    let mut pending_dash = false;
    for c in title.unwrap_or_default().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
        if slug.len() >= MAX_SLUG_LEN {
            break;
        }
    }
    slug.truncate(MAX_SLUG_LEN);
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        DEFAULT_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

/// Deterministic output name: `{slug}--{short_hash(html)}.html`.
pub fn site_output_filename(title: Option<&str>, html: &str) -> String {
    format!("{}--{}.html", site_slug(title), short_hash(html))
}

fn short_hash(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    let mut hex = String::with_capacity(8);
    for byte in digest.iter().take(4) {
        use std::fmt::Write;
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}
