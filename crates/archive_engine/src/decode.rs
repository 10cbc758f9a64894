use chardetng::EncodingDetector;
use encoding_rs::{Encoding, WINDOWS_1252};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedHtml {
    pub html: String,
    pub encoding_label: String,
}

/// Decode raw bytes into UTF-8 using: BOM -> Content-Type charset -> chardetng guess.
///
/// When the chosen encoding reports malformed input the bytes are decoded
/// again as latin-1 (windows-1252), which accepts every byte sequence.
pub fn decode_html(bytes: &[u8], content_type: Option<&str>) -> DecodedHtml {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_or_latin1(bytes, encoding);
    }

    if let Some(label) = content_type.and_then(extract_charset) {
        if let Some(enc) = Encoding::for_label(label.as_bytes()) {
            return decode_or_latin1(bytes, enc);
        }
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let enc = detector.guess(None, true);
    decode_or_latin1(bytes, enc)
}

fn extract_charset(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .filter_map(|part| {
            let (key, value) = part.split_once('=')?;
            if key.trim().eq_ignore_ascii_case("charset") {
                Some(value.trim().trim_matches(['"', '\'']).to_string())
            } else {
                None
            }
        })
        .next()
}

fn decode_or_latin1(bytes: &[u8], enc: &'static Encoding) -> DecodedHtml {
    let (text, actual, had_errors) = enc.decode(bytes);
    if !had_errors {
        return DecodedHtml {
            html: text.into_owned(),
            encoding_label: actual.name().to_string(),
        };
    }

    archive_logging::archive_debug!(
        "decoding as {} failed, falling back to latin-1",
        actual.name()
    );
    let (text, _, _) = WINDOWS_1252.decode(bytes);
    DecodedHtml {
        html: text.into_owned(),
        encoding_label: WINDOWS_1252.name().to_string(),
    }
}
