// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use crate::error::Error;
use crate::jwk::Jwk;
use crate::jws::Jws;
use crate::jws::JwsAlgorithm;
use crate::jws::JwsHeader;
use crate::tests::fixtures;

const CLAIMS: &[u8] = br#"{"iss":"joe","exp":1300819380,"http://example.com/is_root":true}"#;

fn private_key() -> Jwk {
  Jwk::from_json(fixtures::RSA_PRIVATE_JWK).unwrap()
}

fn public_key() -> Jwk {
  Jwk::from_json(fixtures::RSA_PUBLIC_JWK).unwrap()
}

fn signed_token(alg: JwsAlgorithm) -> String {
  let mut header: JwsHeader = JwsHeader::new();
  header.set_alg(alg);

  let mut jws: Jws = Jws::new();
  jws.set_header(header);
  jws.set_payload(CLAIMS);
  jws.serialize_compact(Some(&private_key())).unwrap()
}

#[test]
fn test_rs256_sign_and_verify() {
  let token: String = signed_token(JwsAlgorithm::RS256);
  let parsed: Jws = Jws::parse(&token).unwrap();

  assert_eq!(parsed.payload(), CLAIMS);
  assert_eq!(parsed.kid(), Some("2011-04-29"));
  assert_eq!(parsed.verify(Some(&public_key())), Ok(()));
}

#[test]
fn test_rs256_kid_copied_from_key() {
  // The signing key carries a `kid`; serialization writes it into the
  // protected header.
  let token: String = signed_token(JwsAlgorithm::RS256);
  let parsed: Jws = Jws::parse(&token).unwrap();
  assert_eq!(parsed.header().kid(), Some("2011-04-29"));
}

#[test]
fn test_rs256_any_signature_flip_is_rejected() {
  let token: String = signed_token(JwsAlgorithm::RS256);
  let (rest, signature): (&str, &str) = token.rsplit_once('.').unwrap();
  let public: Jwk = public_key();

  for index in 0..signature.len() {
    let original: char = signature.as_bytes()[index] as char;
    let replacement: char = if original == 'A' { 'B' } else { 'A' };
    if original == replacement {
      continue;
    }

    let mut flipped: String = signature.to_owned();
    flipped.replace_range(index..index + 1, &replacement.to_string());

    let parsed: Jws = Jws::parse(&format!("{rest}.{flipped}")).unwrap();
    assert_eq!(parsed.verify(Some(&public)), Err(Error::InvalidSignature));
  }
}

#[test]
fn test_ps256_sign_and_verify() {
  // PSS is randomized, so the roundtrip is checked by verification.
  let token: String = signed_token(JwsAlgorithm::PS256);
  let other: String = signed_token(JwsAlgorithm::PS256);
  assert_ne!(token, other);

  let parsed: Jws = Jws::parse(&token).unwrap();
  assert_eq!(parsed.verify(Some(&public_key())), Ok(()));
}

#[test]
fn test_rs256_verify_with_symmetric_key_is_invalid_key() {
  let token: String = signed_token(JwsAlgorithm::RS256);
  let parsed: Jws = Jws::parse(&token).unwrap();
  let oct: Jwk = Jwk::from_json(fixtures::OCT_HS256_JWK).unwrap();
  assert!(matches!(parsed.verify(Some(&oct)), Err(Error::InvalidKey(_))));
}

#[test]
fn test_rs256_sign_with_public_key_is_invalid_key() {
  let mut header: JwsHeader = JwsHeader::new();
  header.set_alg(JwsAlgorithm::RS256);

  let mut jws: Jws = Jws::new();
  jws.set_header(header);
  jws.set_payload(CLAIMS);
  assert!(matches!(
    jws.serialize_compact(Some(&public_key())),
    Err(Error::InvalidKey(_))
  ));
}
