// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use crate::error::Error;
use crate::jwk::Jwk;
use crate::jws::Jws;
use crate::jws::JwsAlgorithm;
use crate::jws::JwsHeader;
use crate::tests::fixtures;

fn shared_key() -> Jwk {
  Jwk::from_json(fixtures::OCT_HS256_JWK).unwrap()
}

fn compose() -> Jws {
  let key: Jwk = shared_key();
  let mut header: JwsHeader = JwsHeader::new();
  header.set_alg(JwsAlgorithm::HS256);
  header.set_typ("JWT");

  let mut jws: Jws = Jws::new();
  jws.set_header(header);
  jws.set_payload(&br#"{"sub":"alice"}"#[..]);
  jws.add_signing_key(&key);
  jws.add_verifying_key(&key);
  jws
}

#[test]
fn test_hs256_sign_and_verify() {
  let mut jws: Jws = compose();
  let token: String = jws.serialize_compact(None).unwrap();

  let parsed: Jws = Jws::parse(&token).unwrap();
  assert_eq!(parsed.alg(), Some(JwsAlgorithm::HS256));
  assert_eq!(parsed.header().typ(), Some("JWT"));
  assert_eq!(parsed.payload(), br#"{"sub":"alice"}"#);
  assert_eq!(parsed.header(), jws.header());
  assert_eq!(parsed.signature_b64(), jws.signature_b64());

  assert_eq!(parsed.verify(Some(&shared_key())), Ok(()));
}

#[test]
fn test_hs256_deterministic_serialization() {
  let first: String = compose().serialize_compact(None).unwrap();
  let second: String = compose().serialize_compact(None).unwrap();
  assert_eq!(first, second);
}

#[test]
fn test_hs256_alg_adopted_from_key() {
  let mut jws: Jws = Jws::new();
  jws.set_payload(&b"payload"[..]);
  jws.add_signing_key(&shared_key());

  // The key's `alg` property names HS256; the object adopts it.
  assert_eq!(jws.alg(), Some(JwsAlgorithm::HS256));
  let token: String = jws.serialize_compact(None).unwrap();
  assert_eq!(Jws::parse(&token).unwrap().alg(), Some(JwsAlgorithm::HS256));
}

#[test]
fn test_hs256_tampered_payload_is_rejected() {
  let token: String = compose().serialize_compact(None).unwrap();
  let segments: Vec<&str> = token.split('.').collect();

  let mut payload: String = segments[1].to_owned();
  let flipped: char = if payload.starts_with('e') { 'f' } else { 'e' };
  payload.replace_range(0..1, &flipped.to_string());

  let tampered: String = format!("{}.{}.{}", segments[0], payload, segments[2]);
  let parsed: Jws = Jws::parse(&tampered).unwrap();
  assert_eq!(parsed.verify(Some(&shared_key())), Err(Error::InvalidSignature));
}

#[test]
fn test_hs256_tampered_signature_is_rejected() {
  let token: String = compose().serialize_compact(None).unwrap();
  let segments: Vec<&str> = token.split('.').collect();

  let mut signature: String = segments[2].to_owned();
  let flipped: char = if signature.starts_with('e') { 'f' } else { 'e' };
  signature.replace_range(0..1, &flipped.to_string());

  let tampered: String = format!("{}.{}.{}", segments[0], segments[1], signature);
  let parsed: Jws = Jws::parse(&tampered).unwrap();
  assert_eq!(parsed.verify(Some(&shared_key())), Err(Error::InvalidSignature));
}

#[test]
fn test_hs256_wrong_key_kind_is_invalid_key() {
  let token: String = compose().serialize_compact(None).unwrap();
  let parsed: Jws = Jws::parse(&token).unwrap();

  let ec_key: Jwk = Jwk::from_json(fixtures::EC_PUBLIC_JWK).unwrap();
  assert!(matches!(parsed.verify(Some(&ec_key)), Err(Error::InvalidKey(_))));
}

#[test]
fn test_rfc7515_a1() {
  let key: Jwk = Jwk::from_json(fixtures::RFC7515_A1_JWK).unwrap();
  let jws: Jws = Jws::parse(fixtures::RFC7515_A1_TOKEN).unwrap();

  assert_eq!(jws.alg(), Some(JwsAlgorithm::HS256));
  assert_eq!(jws.verify(Some(&key)), Ok(()));
  assert!(core::str::from_utf8(jws.payload()).unwrap().contains("joe"));
}
