//! Layer data decoding.
//!
//! A `<data>` element carries its tiles as text, optionally compressed. This
//! module turns that payload into a flat list of global tile ids in document
//! order (left to right, top to bottom). It does not reshape the result; the
//! assembler checks the length against the layer dimensions.

use std::io::Read;

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::error::TmxError;

/// Decode a layer payload into global tile ids.
///
/// `compression` is applied first (`""` or `"gzip"`), then `encoding`
/// (`"csv"` or `"base64"`).
///
/// # Example
/// ```
/// use bevy_tmxmap_core::decode_layer_data;
///
/// let tiles = decode_layer_data("csv", "", b"1,2,3\n4,5,6").unwrap();
/// assert_eq!(tiles, vec![1, 2, 3, 4, 5, 6]);
/// ```
pub fn decode_layer_data(
    encoding: &str,
    compression: &str,
    payload: &[u8],
) -> Result<Vec<u32>, TmxError> {
    let decompressed;
    let bytes = match compression {
        "" => payload,
        "gzip" => {
            decompressed = decompress_gzip(payload)?;
            &decompressed
        }
        other => return Err(TmxError::UnsupportedCompression(other.to_string())),
    };

    match encoding {
        "csv" => decode_csv(bytes),
        "base64" => decode_base64(bytes),
        other => Err(TmxError::UnsupportedEncoding(other.to_string())),
    }
}

fn decompress_gzip(payload: &[u8]) -> Result<Vec<u8>, TmxError> {
    let mut decoder = libflate::gzip::Decoder::new(payload).map_err(TmxError::Decompression)?;
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(TmxError::Decompression)?;
    Ok(out)
}

fn decode_csv(bytes: &[u8]) -> Result<Vec<u32>, TmxError> {
    let text = std::str::from_utf8(bytes)?;
    let text = text.replace('\r', "");

    // A line break ends a cell; Tiled also ends every row but the last with `,`
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .flat_map(|line| line.strip_suffix(',').unwrap_or(line).split(','))
        .map(|token| {
            token.parse::<u32>().map_err(|source| TmxError::MalformedInteger {
                token: token.to_string(),
                source,
            })
        })
        .collect()
}

fn decode_base64(bytes: &[u8]) -> Result<Vec<u32>, TmxError> {
    // Payloads are usually indented inside the XML
    let compact: Vec<u8> = bytes
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    let raw = STANDARD.decode(compact)?;

    if raw.len() % 4 != 0 {
        return Err(TmxError::InvalidPayloadLength(raw.len()));
    }

    Ok(raw
        .chunks_exact(4)
        .map(|word| u32::from_le_bytes([word[0], word[1], word[2], word[3]]))
        .collect())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn gzip(bytes: &[u8]) -> Vec<u8> {
        let mut encoder = libflate::gzip::Encoder::new(Vec::new()).unwrap();
        encoder.write_all(bytes).unwrap();
        encoder.finish().into_result().unwrap()
    }

    fn base64_words(words: &[u32]) -> String {
        let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
        STANDARD.encode(bytes)
    }

    #[test]
    fn test_csv_rows() {
        let tiles = decode_layer_data("csv", "", b"1,2,3\n4,5,6").unwrap();
        assert_eq!(tiles, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_csv_strips_carriage_returns() {
        let tiles = decode_layer_data("csv", "", b"\r\n7,0,\r\n0,9\r\n").unwrap();
        assert_eq!(tiles, vec![7, 0, 0, 9]);
    }

    #[test]
    fn test_csv_tiled_row_format() {
        let tiles = decode_layer_data("csv", "", b"\n1,2,3,\n4,5,6,\n7,8,9\n").unwrap();
        assert_eq!(tiles, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_csv_line_break_is_a_cell_boundary() {
        let tiles = decode_layer_data("csv", "", b"12\r\n34").unwrap();
        assert_eq!(tiles, vec![12, 34]);
    }

    #[test]
    fn test_csv_empty_cell_is_malformed() {
        let err = decode_layer_data("csv", "", b"1,,2").unwrap_err();
        assert!(matches!(err, TmxError::MalformedInteger { ref token, .. } if token.is_empty()));
    }

    #[test]
    fn test_csv_rejects_bad_token() {
        let err = decode_layer_data("csv", "", b"1,two,3").unwrap_err();
        assert!(matches!(err, TmxError::MalformedInteger { ref token, .. } if token == "two"));
    }

    #[test]
    fn test_csv_rejects_values_over_u32() {
        let err = decode_layer_data("csv", "", b"4294967296").unwrap_err();
        assert!(matches!(err, TmxError::MalformedInteger { .. }));
    }

    #[test]
    fn test_csv_keeps_flip_bits() {
        // Tiled stores flip flags in the high bits of the gid
        let tiles = decode_layer_data("csv", "", b"2147483649,1").unwrap();
        assert_eq!(tiles, vec![0x8000_0001, 1]);
    }

    #[test]
    fn test_base64_little_endian_words() {
        let payload = STANDARD.encode([0x01, 0x00, 0x00, 0x00, 0x04, 0x03, 0x02, 0x01]);
        let tiles = decode_layer_data("base64", "", payload.as_bytes()).unwrap();
        assert_eq!(tiles, vec![1, 0x0102_0304]);
    }

    #[test]
    fn test_base64_round_trip() {
        let words = [0, 1, 42, 0xFFFF_FFFF, 0x2000_0010, 7];
        let payload = base64_words(&words);
        let tiles = decode_layer_data("base64", "", payload.as_bytes()).unwrap();
        assert_eq!(tiles, words);
    }

    #[test]
    fn test_base64_ignores_xml_indentation() {
        let payload = format!("\n   {}\n  ", base64_words(&[3, 4]));
        let tiles = decode_layer_data("base64", "", payload.as_bytes()).unwrap();
        assert_eq!(tiles, vec![3, 4]);
    }

    #[test]
    fn test_base64_length_must_be_word_aligned() {
        let payload = STANDARD.encode([1, 2, 3, 4, 5, 6]);
        let err = decode_layer_data("base64", "", payload.as_bytes()).unwrap_err();
        assert!(matches!(err, TmxError::InvalidPayloadLength(6)));
    }

    #[test]
    fn test_base64_rejects_garbage() {
        let err = decode_layer_data("base64", "", b"not*base64").unwrap_err();
        assert!(matches!(err, TmxError::InvalidBase64(_)));
    }

    #[test]
    fn test_gzip_csv() {
        let payload = gzip(b"1,2,3\n4,5,6");
        let tiles = decode_layer_data("csv", "gzip", &payload).unwrap();
        assert_eq!(tiles, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_gzip_base64() {
        let payload = gzip(base64_words(&[10, 20, 30]).as_bytes());
        let tiles = decode_layer_data("base64", "gzip", &payload).unwrap();
        assert_eq!(tiles, vec![10, 20, 30]);
    }

    #[test]
    fn test_gzip_rejects_plain_bytes() {
        let err = decode_layer_data("csv", "gzip", b"1,2,3").unwrap_err();
        assert!(matches!(err, TmxError::Decompression(_)));
    }

    #[test]
    fn test_unsupported_compression() {
        let err = decode_layer_data("base64", "zlib", b"AAAA").unwrap_err();
        assert!(matches!(err, TmxError::UnsupportedCompression(ref c) if c == "zlib"));
    }

    #[test]
    fn test_unsupported_encoding() {
        let err = decode_layer_data("", "", b"").unwrap_err();
        assert!(matches!(err, TmxError::UnsupportedEncoding(ref e) if e.is_empty()));

        let err = decode_layer_data("xml", "", b"").unwrap_err();
        assert!(matches!(err, TmxError::UnsupportedEncoding(ref e) if e == "xml"));
    }

    #[test]
    fn test_decoding_is_deterministic() {
        let payload = base64_words(&[5, 6, 7, 8]);
        let first = decode_layer_data("base64", "", payload.as_bytes()).unwrap();
        let second = decode_layer_data("base64", "", payload.as_bytes()).unwrap();
        assert_eq!(first, second);
    }
}
