use std::sync::LazyLock;

use regex::{Captures, Regex};
use sitecraft_logging::site_debug;

/// Image reference used whenever a token cannot be resolved to a real image.
pub const FALLBACK_IMAGE_URL: &str = "https://placehold.co/600x400.png";

/// Marker that replaces inline images when a document is only being analysed.
pub const STRIPPED_IMAGE_SRC: &str = "image-placeholder";

static INLINE_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"src="(data:image/[^;]+;base64,[^"]+)""#).expect("inline image pattern")
});

static POSITIONAL_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"src="---image-placeholder-([0-9]+)---""#).expect("placeholder pattern")
});

/// Output of [`encode_images`]: the document with placeholders in place of
/// inline images, and the images themselves in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EncodedHtml {
    pub html: String,
    pub original_images: Vec<String>,
}

/// `src` attribute carrying the positional placeholder for image `index`.
pub fn placeholder_src(index: usize) -> String {
    format!("src=\"---image-placeholder-{index}---\"")
}

/// Swap every inline `data:image/...;base64,...` source for a positional
/// placeholder, numbered left to right from zero.
pub fn encode_images(html: &str) -> EncodedHtml {
    let mut original_images = Vec::new();
    let encoded = INLINE_IMAGE.replace_all(html, |caps: &Captures| {
        let index = original_images.len();
        original_images.push(caps[1].to_string());
        placeholder_src(index)
    });

    EncodedHtml {
        html: encoded.into_owned(),
        original_images,
    }
}

/// Put the original images back where their placeholders are.
///
/// Placeholders whose index has no original image (the model invented one)
/// get [`FALLBACK_IMAGE_URL`]. Originals whose placeholder disappeared are
/// dropped without notice.
pub fn restore_images(html: &str, original_images: &[String]) -> String {
    POSITIONAL_PLACEHOLDER
        .replace_all(html, |caps: &Captures| {
            let original = caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| original_images.get(index));
            match original {
                Some(image) => format!("src=\"{image}\""),
                None => {
                    site_debug!(
                        "placeholder {} has no original image ({} known), using fallback",
                        &caps[1],
                        original_images.len()
                    );
                    format!("src=\"{FALLBACK_IMAGE_URL}\"")
                }
            }
        })
        .into_owned()
}

/// Replace every inline image with a fixed marker. Used before sending a
/// document for analysis, where the image bytes only cost payload.
pub fn strip_images(html: &str) -> String {
    INLINE_IMAGE
        .replace_all(html, format!("src=\"{STRIPPED_IMAGE_SRC}\"").as_str())
        .into_owned()
}

/// Number of inline images in `html`.
pub fn count_inline_images(html: &str) -> usize {
    INLINE_IMAGE.find_iter(html).count()
}
