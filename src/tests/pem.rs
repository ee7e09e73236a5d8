// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use crate::error::Error;
use crate::jwk::Jwk;
use crate::jwk::JwkParamsEc;
use crate::jwk::JwkParamsRsa;
use crate::tests::fixtures;

#[test]
fn test_ec_private_pem_import_matches_the_jwk() {
  let from_pem: Jwk = Jwk::from_pem(fixtures::EC_PRIVATE_PEM.as_bytes()).unwrap();
  let from_json: Jwk = Jwk::from_json(fixtures::EC_PRIVATE_JWK).unwrap();

  let a: &JwkParamsEc = from_pem.try_ec_params().unwrap();
  let b: &JwkParamsEc = from_json.try_ec_params().unwrap();
  assert_eq!(a, b);
}

#[test]
fn test_ec_public_pem_import_matches_the_jwk() {
  let from_pem: Jwk = Jwk::from_pem(fixtures::EC_PUBLIC_PEM.as_bytes()).unwrap();
  let from_json: Jwk = Jwk::from_json(fixtures::EC_PUBLIC_JWK).unwrap();

  let a: &JwkParamsEc = from_pem.try_ec_params().unwrap();
  let b: &JwkParamsEc = from_json.try_ec_params().unwrap();
  assert_eq!(a.crv, b.crv);
  assert_eq!(a.x, b.x);
  assert_eq!(a.y, b.y);
  assert!(a.d.is_none());
}

#[test]
fn test_rsa_pkcs1_pem_import_matches_the_jwk() {
  let from_pem: Jwk = Jwk::from_pem(fixtures::RSA_PRIVATE_PEM.as_bytes()).unwrap();
  let from_json: Jwk = Jwk::from_json(fixtures::RSA_PRIVATE_JWK).unwrap();

  let a: &JwkParamsRsa = from_pem.try_rsa_params().unwrap();
  let b: &JwkParamsRsa = from_json.try_rsa_params().unwrap();
  assert_eq!(a, b);
}

#[test]
fn test_rsa_public_pem_import_matches_the_jwk() {
  let from_pem: Jwk = Jwk::from_pem(fixtures::RSA_PUBLIC_PEM.as_bytes()).unwrap();
  let from_json: Jwk = Jwk::from_json(fixtures::RSA_PUBLIC_JWK).unwrap();

  let a: &JwkParamsRsa = from_pem.try_rsa_params().unwrap();
  let b: &JwkParamsRsa = from_json.try_rsa_params().unwrap();
  assert_eq!(a.n, b.n);
  assert_eq!(a.e, b.e);
  assert!(!from_pem.is_private());
}

#[test]
fn test_rsa_pkcs8_roundtrip() {
  let key: Jwk = Jwk::from_json(fixtures::RSA_PRIVATE_JWK).unwrap();
  let der = key.to_private_key_der().unwrap();
  let back: Jwk = Jwk::from_private_key_der(&der).unwrap();
  assert_eq!(key.try_rsa_params().unwrap(), back.try_rsa_params().unwrap());

  let public_der: Vec<u8> = key.to_public_key_der().unwrap();
  let public: Jwk = Jwk::from_public_key_der(&public_der).unwrap();
  assert_eq!(public.try_rsa_params().unwrap().n, key.try_rsa_params().unwrap().n);
}

#[test]
fn test_ec_pem_roundtrip() {
  let key: Jwk = Jwk::from_json(fixtures::EC_PRIVATE_JWK).unwrap();
  let pem = key.to_private_key_pem().unwrap();
  let back: Jwk = Jwk::from_pem(pem.as_bytes()).unwrap();
  assert_eq!(key.try_ec_params().unwrap(), back.try_ec_params().unwrap());

  let public_pem: String = key.to_public_key_pem().unwrap();
  assert_eq!(public_pem, fixtures::EC_PUBLIC_PEM);
}

#[test]
fn test_ed25519_pem_roundtrip() {
  let key: Jwk = Jwk::from_json(fixtures::RFC8037_ED25519_PRIVATE_JWK).unwrap();
  let pem = key.to_private_key_pem().unwrap();
  let back: Jwk = Jwk::from_pem(pem.as_bytes()).unwrap();
  assert_eq!(key.try_okp_params().unwrap(), back.try_okp_params().unwrap());

  let public_der: Vec<u8> = key.to_public_key_der().unwrap();
  let public: Jwk = Jwk::from_public_key_der(&public_der).unwrap();
  assert_eq!(public.try_okp_params().unwrap().x, key.try_okp_params().unwrap().x);
  assert!(public.is_public());
}

#[test]
fn test_symmetric_keys_have_no_pem_form() {
  let key: Jwk = Jwk::from_json(fixtures::OCT_HS256_JWK).unwrap();
  assert!(matches!(key.to_public_key_der(), Err(Error::InvalidKey(_))));
  assert!(matches!(key.to_private_key_der(), Err(Error::InvalidKey(_))));
}

#[test]
fn test_public_key_export_requires_no_private_material() {
  let key: Jwk = Jwk::from_json(fixtures::EC_PUBLIC_JWK).unwrap();
  assert!(key.to_public_key_pem().is_ok());
  assert!(matches!(key.to_private_key_pem(), Err(Error::InvalidKey(_))));
}

#[test]
fn test_garbage_pem_is_invalid_key() {
  assert!(matches!(Jwk::from_pem(b"not pem at all"), Err(Error::InvalidKey(_))));
  let pem: &str = "-----BEGIN SOMETHING-----\nAAAA\n-----END SOMETHING-----\n";
  assert!(matches!(Jwk::from_pem(pem.as_bytes()), Err(Error::InvalidKey(_))));
}
