use pretty_assertions::assert_eq;
use sitecraft_core::{
    count_inline_images, encode_images, restore_images, strip_images, FALLBACK_IMAGE_URL,
};

const PNG: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk";
const JPEG: &str = "data:image/jpeg;base64,/9j/4AAQSkZJRgABAQAAAQABAAD/2wBDAAgGBgcGBQgHBwcJCQgKDA==";

fn page(srcs: &[&str]) -> String {
    let mut html = String::from("<!DOCTYPE html><html><body>\n");
    for (i, src) in srcs.iter().enumerate() {
        html.push_str(&format!("<section id=\"s{i}\"><img alt=\"pic {i}\" src=\"{src}\"></section>\n"));
    }
    html.push_str("</body></html>");
    html
}

#[test]
fn encode_replaces_images_left_to_right() {
    let html = page(&[PNG, JPEG, PNG]);
    let encoded = encode_images(&html);

    assert_eq!(encoded.original_images, vec![PNG, JPEG, PNG]);
    assert_eq!(count_inline_images(&encoded.html), 0);
    let first = encoded.html.find("---image-placeholder-0---").unwrap();
    let second = encoded.html.find("---image-placeholder-1---").unwrap();
    let third = encoded.html.find("---image-placeholder-2---").unwrap();
    assert!(first < second && second < third);
}

#[test]
fn encode_without_images_is_a_no_op() {
    let html = "<html><body><img src=\"https://cdn.example.com/a.png\"></body></html>";
    let encoded = encode_images(html);
    assert_eq!(encoded.html, html);
    assert!(encoded.original_images.is_empty());
}

#[test]
fn encoding_twice_finds_nothing_new() {
    for k in 0..5 {
        let srcs = vec![PNG; k];
        let encoded = encode_images(&page(&srcs));
        assert_eq!(encoded.original_images.len(), k);
        assert_eq!(encoded.html.matches("---image-placeholder-").count(), k);

        let again = encode_images(&encoded.html);
        assert!(again.original_images.is_empty());
        assert_eq!(again.html, encoded.html);
    }
}

#[test]
fn identity_rewrite_round_trips_byte_for_byte() {
    let html = page(&[JPEG, PNG, JPEG]);
    let encoded = encode_images(&html);
    let restored = restore_images(&encoded.html, &encoded.original_images);
    assert_eq!(restored, html);
}

#[test]
fn reordered_placeholders_restore_their_own_images() {
    let encoded = encode_images(&page(&[PNG, JPEG]));
    let swapped = r#"<img src="---image-placeholder-1---"><img src="---image-placeholder-0---">"#;
    let restored = restore_images(swapped, &encoded.original_images);
    assert_eq!(restored, format!(r#"<img src="{JPEG}"><img src="{PNG}">"#));
}

#[test]
fn out_of_range_placeholder_uses_fallback() {
    let originals = vec![PNG.to_string(), JPEG.to_string()];
    let html = r#"<img src="---image-placeholder-1---"><img src="---image-placeholder-99---">"#;
    let restored = restore_images(html, &originals);
    assert_eq!(
        restored,
        format!(r#"<img src="{JPEG}"><img src="{FALLBACK_IMAGE_URL}">"#)
    );
    assert!(!restored.contains("---image-placeholder-"));
}

#[test]
fn dropped_placeholder_drops_its_image() {
    let encoded = encode_images(&page(&[PNG, JPEG]));
    let without_first = encoded
        .html
        .replace(r#"<img alt="pic 0" src="---image-placeholder-0---">"#, "");
    let restored = restore_images(&without_first, &encoded.original_images);
    assert!(!restored.contains(PNG));
    assert!(restored.contains(JPEG));
}

#[test]
fn strip_images_uses_generic_marker() {
    let stripped = strip_images(&page(&[PNG, JPEG]));
    assert_eq!(stripped.matches(r#"src="image-placeholder""#).count(), 2);
    assert_eq!(count_inline_images(&stripped), 0);
}
