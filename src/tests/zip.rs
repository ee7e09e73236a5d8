// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use crate::jwk::Jwk;
use crate::jws::Jws;
use crate::jws::JwsAlgorithm;
use crate::jws::JwsHeader;
use crate::jwu;
use crate::tests::fixtures;

#[test]
fn test_zip_def_roundtrip() {
  let key: Jwk = Jwk::from_json(fixtures::OCT_HS256_JWK).unwrap();
  let payload: Vec<u8> = b"A".repeat(10 * 1024);

  let mut header: JwsHeader = JwsHeader::new();
  header.set_alg(JwsAlgorithm::HS256);
  header.set_zip("DEF");

  let mut jws: Jws = Jws::new();
  jws.set_header(header);
  jws.set_payload(payload.clone());
  let token: String = jws.serialize_compact(Some(&key)).unwrap();

  // The payload segment carries the deflated bytes.
  let segment: &str = token.split('.').nth(1).unwrap();
  assert!(jwu::decode_b64(segment).unwrap().len() < payload.len());

  let parsed: Jws = Jws::parse(&token).unwrap();
  assert_eq!(parsed.header().zip(), Some("DEF"));
  assert_eq!(parsed.payload(), payload.as_slice());
  assert_eq!(parsed.verify(Some(&key)), Ok(()));
}

#[test]
fn test_zip_def_with_garbage_payload_is_bad_input() {
  // A `zip` header whose payload segment does not inflate.
  let header: String = jwu::encode_b64(br#"{"alg":"HS256","zip":"DEF"}"#);
  let payload: String = jwu::encode_b64([0xde, 0xad, 0xbe, 0xef]);
  let token: String = format!("{header}.{payload}.AA");
  assert!(Jws::parse(&token).is_err());
}
