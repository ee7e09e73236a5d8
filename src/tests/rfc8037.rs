// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use crate::jwk::Jwk;
use crate::jws::Jws;
use crate::jws::JwsAlgorithm;
use crate::jws::JwsHeader;
use crate::tests::fixtures;

#[test]
fn test_rfc8037_ed25519_signing_matches_the_rfc() {
  let secret: Jwk = Jwk::from_json(fixtures::RFC8037_ED25519_PRIVATE_JWK).unwrap();

  let mut header: JwsHeader = JwsHeader::new();
  header.set_alg(JwsAlgorithm::EdDSA);

  let mut jws: Jws = Jws::new();
  jws.set_header(header);
  jws.set_payload(&b"Example of Ed25519 signing"[..]);

  // Ed25519 is deterministic: the serialization reproduces the RFC token
  // byte for byte.
  let token: String = jws.serialize_compact(Some(&secret)).unwrap();
  assert_eq!(token, fixtures::RFC8037_ED25519_TOKEN);
}

#[test]
fn test_rfc8037_ed25519_verify() {
  let public: Jwk = Jwk::from_json(fixtures::RFC8037_ED25519_PUBLIC_JWK).unwrap();

  let jws: Jws = Jws::parse(fixtures::RFC8037_ED25519_TOKEN).unwrap();
  assert_eq!(jws.alg(), Some(JwsAlgorithm::EdDSA));
  assert_eq!(jws.payload(), b"Example of Ed25519 signing");
  assert_eq!(jws.verify(Some(&public)), Ok(()));
}
