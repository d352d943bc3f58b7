use chardetng::EncodingDetector;
use encoding_rs::Encoding;

/// How far into the document a `<meta charset>` declaration is looked for.
const META_SNIFF_LIMIT: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSite {
    pub html: String,
    pub encoding_label: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("failed to decode site source as {encoding}")]
    Undecodable { encoding: String },
}

/// Decode a site file read from disk: BOM -> `<meta charset>` -> chardetng guess.
pub fn decode_site_source(bytes: &[u8]) -> Result<DecodedSite, DecodeError> {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if let Some(encoding) = sniff_meta_charset(bytes) {
        return decode_with(bytes, encoding);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    decode_with(bytes, detector.guess(None, true))
}

fn sniff_meta_charset(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(META_SNIFF_LIMIT)];
    let head = String::from_utf8_lossy(head).to_ascii_lowercase();
    let mut rest = head.as_str();

    while let Some(start) = rest.find("<meta") {
        let from_tag = &rest[start..];
        let tag_len = from_tag.find('>').map_or(from_tag.len(), |end| end + 1);
        let tag = &from_tag[..tag_len];
        if let Some(pos) = tag.find("charset=") {
            let value = tag[pos + "charset=".len()..].trim_start_matches(['"', '\'', ' ']);
            let label: String = value
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
                .collect();
            // A document that declares UTF-16 in ASCII is really UTF-8.
            if let Some(encoding) = Encoding::for_label(label.as_bytes()) {
                return Some(encoding.output_encoding());
            }
        }
        rest = &from_tag[tag_len..];
    }
    None
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> Result<DecodedSite, DecodeError> {
    let (text, actual, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(DecodeError::Undecodable {
            encoding: actual.name().to_string(),
        });
    }
    Ok(DecodedSite {
        html: text.into_owned(),
        encoding_label: actual.name().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_charset_wins_over_detection() {
        let mut bytes = b"<html><head><meta charset=\"windows-1252\"></head><body>caf".to_vec();
        bytes.push(0xe9);
        bytes.extend_from_slice(b"</body></html>");
        let decoded = decode_site_source(&bytes).unwrap();
        assert_eq!(decoded.encoding_label, "windows-1252");
        assert!(decoded.html.contains("café"));
    }

    #[test]
    fn http_equiv_content_type_is_understood() {
        let html = br#"<meta http-equiv="Content-Type" content="text/html; charset=ISO-8859-1"><p>ok</p>"#;
        let decoded = decode_site_source(html).unwrap();
        // encoding_rs maps ISO-8859-1 to windows-1252.
        assert_eq!(decoded.encoding_label, "windows-1252");
    }

    #[test]
    fn utf16_declaration_in_ascii_means_utf8() {
        let decoded = decode_site_source(b"<meta charset=utf-16><p>hi</p>").unwrap();
        assert_eq!(decoded.encoding_label, "UTF-8");
        assert_eq!(decoded.html, "<meta charset=utf-16><p>hi</p>");
    }
}
