//! Signature image decoding.
//!
//! The signature travels end-to-end as an image data URI and is treated as an
//! opaque blob everywhere except here: the document renderer needs raster
//! pixels to embed. Decoding checks nothing beyond "embeddable or not" — any
//! malformed input simply yields `None` and the caller falls back to a
//! textual placeholder.

use base64::Engine;
use image::DynamicImage;

use shared::SignatureData;

/// Decode a signature data URI into an image, if possible.
///
/// Accepts `data:<mime>;base64,<payload>`. Returns `None` for an empty
/// signature, a missing or malformed header, invalid base64, or bytes the
/// image decoder does not recognize.
pub fn decode_signature(signature: &SignatureData) -> Option<DynamicImage> {
    if signature.is_empty() {
        return None;
    }

    let payload = strip_data_uri_header(signature.as_str())?;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .ok()?;

    image::load_from_memory(&bytes).ok()
}

/// Split off the `data:<mime>;base64,` prefix, returning the payload.
fn strip_data_uri_header(data_uri: &str) -> Option<&str> {
    let rest = data_uri.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    if !header.ends_with(";base64") {
        return None;
    }
    Some(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Encode a small solid image as a PNG data URI.
    fn png_data_uri() -> SignatureData {
        let img = image::RgbImage::from_pixel(8, 4, image::Rgb([0, 0, 0]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .expect("Failed to encode test PNG");
        let payload = base64::engine::general_purpose::STANDARD.encode(&bytes);
        SignatureData::new(format!("data:image/png;base64,{}", payload))
    }

    #[test]
    fn test_decode_valid_png_data_uri() {
        let decoded = decode_signature(&png_data_uri()).expect("Should decode");
        assert_eq!(decoded.width(), 8);
        assert_eq!(decoded.height(), 4);
    }

    #[test]
    fn test_decode_empty_signature() {
        assert!(decode_signature(&SignatureData::empty()).is_none());
    }

    #[test]
    fn test_decode_rejects_malformed_input() {
        let cases = [
            "not a data uri",
            "data:image/png;base64",          // no comma
            "data:image/png,AAAA",            // not base64-encoded
            "data:image/png;base64,!!!not-base64!!!",
            "data:image/png;base64,aGVsbG8=", // valid base64, not an image
        ];

        for case in cases {
            let signature = SignatureData::new(case);
            assert!(
                decode_signature(&signature).is_none(),
                "'{}' should not decode",
                case
            );
        }
    }
}
