//! # Response Body Decoding
//!
//! The HTTP client runs without reqwest's compression features, so bodies are
//! inflated here according to `Content-Encoding` and then decoded to text
//! using the charset announced in `Content-Type`.

use super::transport::TransportError;
use bytes::Bytes;
use encoding_rs::{Encoding, UTF_8};
use flate2::read::{GzDecoder, ZlibDecoder};
use reqwest::header::{HeaderMap, CONTENT_ENCODING, CONTENT_TYPE};
use std::io::{self, Read};

/// Encodings advertised in `Accept-Encoding`
pub const ACCEPTED_ENCODINGS: &str = "gzip, deflate, zstd";

/// Inflate and decode a raw body into text
pub fn decode_body(headers: &HeaderMap, raw: Bytes) -> Result<String, TransportError> {
    let inflated = inflate(content_encodings(headers), raw)
        .map_err(|e| TransportError::Decode(format!("failed to decompress body: {e}")))?;
    let (text, _, _) = charset(headers).decode(&inflated);
    Ok(text.into_owned())
}

/// Codings listed in `Content-Encoding`, in the order they were applied
fn content_encodings(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(CONTENT_ENCODING)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(|coding| coding.trim().to_ascii_lowercase())
        .filter(|coding| !coding.is_empty() && coding != "identity")
        .collect()
}

fn inflate(encodings: Vec<String>, raw: Bytes) -> io::Result<Bytes> {
    let mut body = raw;
    // Undo the codings last-applied first
    for coding in encodings.iter().rev() {
        let mut out = Vec::new();
        match coding.as_str() {
            "gzip" | "x-gzip" => {
                GzDecoder::new(body.as_ref()).read_to_end(&mut out)?;
            }
            "deflate" => {
                ZlibDecoder::new(body.as_ref()).read_to_end(&mut out)?;
            }
            "zstd" => {
                out = zstd::stream::decode_all(body.as_ref())?;
            }
            other => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("unsupported content encoding '{other}'"),
                ));
            }
        }
        body = Bytes::from(out);
    }
    Ok(body)
}

fn charset(headers: &HeaderMap) -> &'static Encoding {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| {
            value.split(';').skip(1).find_map(|param| {
                let (name, label) = param.split_once('=')?;
                if name.trim().eq_ignore_ascii_case("charset") {
                    Encoding::for_label(label.trim().trim_matches('"').as_bytes())
                } else {
                    None
                }
            })
        })
        .unwrap_or(UTF_8)
}
