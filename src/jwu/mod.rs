// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! JSON Web Utilities: the byte-level codecs shared by every JOSE surface.

use base64::engine::general_purpose::STANDARD;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

use crate::error::Error;
use crate::error::Result;

/// Encodes `data` as base64url without padding.
pub fn encode_b64(data: impl AsRef<[u8]>) -> String {
  URL_SAFE_NO_PAD.encode(data.as_ref())
}

/// Decodes base64url `data` without padding.
///
/// Any character outside `[A-Za-z0-9_-]` (including `=` padding) is
/// rejected.
pub fn decode_b64(data: impl AsRef<[u8]>) -> Result<Vec<u8>> {
  URL_SAFE_NO_PAD
    .decode(data.as_ref())
    .map_err(|_| Error::BadInput("invalid base64url"))
}

/// Decodes standard (padded) base64 `data`, as used by `x5c`.
pub fn decode_b64_standard(data: impl AsRef<[u8]>) -> Result<Vec<u8>> {
  STANDARD
    .decode(data.as_ref())
    .map_err(|_| Error::BadInput("invalid base64"))
}

/// Compresses `data` with raw DEFLATE, the transformation selected by the
/// header member `"zip": "DEF"`.
pub fn deflate_compress(data: &[u8]) -> Vec<u8> {
  miniz_oxide::deflate::compress_to_vec(data, 6)
}

/// Decompresses raw-DEFLATE `data`.
pub fn deflate_decompress(data: &[u8]) -> Result<Vec<u8>> {
  miniz_oxide::inflate::decompress_to_vec(data).map_err(|_| Error::BadInput("invalid deflate stream"))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_b64_roundtrip() {
    assert_eq!(encode_b64([]), "");
    assert_eq!(decode_b64("").unwrap(), Vec::<u8>::new());

    let data: &[u8] = b"{\"iss\":\"joe\"}";
    assert_eq!(decode_b64(encode_b64(data)).unwrap(), data);
  }

  #[test]
  fn test_b64_rejects_foreign_characters() {
    assert!(decode_b64("ab+/").is_err());
    assert!(decode_b64("ab==").is_err());
    assert!(decode_b64("a b").is_err());
  }

  #[test]
  fn test_deflate_roundtrip() {
    let data: Vec<u8> = b"A".repeat(4096);
    let packed: Vec<u8> = deflate_compress(&data);
    assert!(packed.len() < data.len());
    assert_eq!(deflate_decompress(&packed).unwrap(), data);
  }

  #[test]
  fn test_deflate_rejects_garbage() {
    assert!(deflate_decompress(&[0xde, 0xad, 0xbe, 0xef]).is_err());
  }
}
