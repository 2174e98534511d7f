use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use pagemark_logging::scrape_debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedHtml {
    pub html: String,
    pub encoding_label: String,
    /// Malformed byte sequences were replaced with U+FFFD.
    pub had_replacements: bool,
}

/// Decode raw bytes into UTF-8 using: BOM -> declared charset -> chardetng detection.
///
/// A missing charset and the HTTP default `ISO-8859-1` both count as
/// undeclared; servers that send the default usually did not mean it.
pub fn decode_html(bytes: &[u8], content_type: Option<&str>) -> DecodedHtml {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if let Some(label) = content_type.and_then(extract_charset) {
        if is_usable_declaration(&label) {
            if let Some(enc) = Encoding::for_label(label.as_bytes()) {
                return decode_with(bytes, enc);
            }
        }
        scrape_debug!("ignoring declared charset {label:?}, detecting from content");
    }

    decode_with(bytes, detect_encoding(bytes))
}

/// Statistical guess over the whole byte content.
pub fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}

fn is_usable_declaration(label: &str) -> bool {
    !label.eq_ignore_ascii_case("iso-8859-1") && !label.eq_ignore_ascii_case("latin1")
}

fn extract_charset(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .filter_map(|part| {
            let (key, value) = part.split_once('=')?;
            if !key.trim().eq_ignore_ascii_case("charset") {
                return None;
            }
            Some(value.trim().trim_matches(['"', '\''].as_ref()).to_string())
        })
        .find(|value| !value.is_empty())
}

fn decode_with(bytes: &[u8], enc: &'static Encoding) -> DecodedHtml {
    let (text, used, had_errors) = enc.decode(bytes);
    DecodedHtml {
        html: text.into_owned(),
        encoding_label: used.name().to_string(),
        had_replacements: had_errors,
    }
}
