use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::codec::FALLBACK_IMAGE_URL;

static IMAGE_PROMPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"src="image-prompt:([^"]+)""#).expect("image prompt pattern")
});

/// Prompt texts of every `src="image-prompt:..."` token, in document order.
/// Duplicates are kept: each occurrence gets its own image.
pub fn collect_image_prompts(html: &str) -> Vec<String> {
    IMAGE_PROMPT
        .captures_iter(html)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Replace the n-th image-prompt token with `images[n]`.
///
/// A missing, `None` or empty entry resolves to [`FALLBACK_IMAGE_URL`], so no
/// token survives regardless of how many generations succeeded.
pub fn splice_generated_images(html: &str, images: &[Option<String>]) -> String {
    let mut position = 0usize;
    IMAGE_PROMPT
        .replace_all(html, |_: &Captures| {
            let resolved = images
                .get(position)
                .and_then(|image| image.as_deref())
                .filter(|url| !url.is_empty())
                .unwrap_or(FALLBACK_IMAGE_URL);
            position += 1;
            format!("src=\"{resolved}\"")
        })
        .into_owned()
}
