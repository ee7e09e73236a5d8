// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use crate::error::Error;
use crate::jwk::Jwk;
use crate::jws::Jws;
use crate::jws::JwsAlgorithm;
use crate::jws::JwsHeader;
use crate::tests::fixtures;

fn unsigned_token() -> String {
  let mut header: JwsHeader = JwsHeader::new();
  header.set_alg(JwsAlgorithm::NONE);

  let mut jws: Jws = Jws::new();
  jws.set_header(header);
  jws.set_payload(&br#"{"sub":"alice"}"#[..]);
  jws.serialize_compact_unsecure(None).unwrap()
}

#[test]
fn test_unsigned_token_keeps_the_trailing_dot() {
  let token: String = unsigned_token();
  assert!(token.ends_with('.'));
  assert_eq!(token.split('.').count(), 3);
  assert_eq!(token.split('.').next_back(), Some(""));
}

#[test]
fn test_secure_serialize_refuses_alg_none() {
  let mut header: JwsHeader = JwsHeader::new();
  header.set_alg(JwsAlgorithm::NONE);

  let mut jws: Jws = Jws::new();
  jws.set_header(header);
  jws.set_payload(&b"payload"[..]);
  assert!(matches!(jws.serialize_compact(None), Err(Error::InvalidKey(_))));
}

#[test]
fn test_secure_parse_rejects_alg_none() {
  assert!(matches!(Jws::parse(&unsigned_token()), Err(Error::BadInput(_))));
}

#[test]
fn test_unsecure_parse_accepts_alg_none_but_never_verifies() {
  let jws: Jws = Jws::parse_unsecure(&unsigned_token()).unwrap();
  assert_eq!(jws.alg(), Some(JwsAlgorithm::NONE));
  assert_eq!(jws.payload(), br#"{"sub":"alice"}"#);

  // There is no signature to verify, with or without a key.
  assert!(matches!(jws.verify(None), Err(Error::InvalidKey(_))));
  let key: Jwk = Jwk::from_json(fixtures::OCT_HS256_JWK).unwrap();
  assert!(matches!(jws.verify(Some(&key)), Err(Error::InvalidKey(_))));
}

#[test]
fn test_garbage_input_is_bad_input() {
  assert!(matches!(Jws::parse("not a token"), Err(Error::BadInput(_))));
  assert!(matches!(Jws::parse("ey.only"), Err(Error::BadInput(_))));
  assert!(matches!(Jws::parse("  \t"), Err(Error::BadInput(_))));
}

#[test]
fn test_leading_whitespace_is_accepted() {
  let token: String = format!("  \n{}", unsigned_token());
  assert!(Jws::parse_unsecure(&token).is_ok());
}
