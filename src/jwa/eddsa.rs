// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use crypto::signatures::ed25519::PublicKey;
use crypto::signatures::ed25519::SecretKey;
use crypto::signatures::ed25519::Signature;

use crate::error::Error;
use crate::error::Result;
use crate::jwk::EdCurve;
use crate::jwk::Jwk;
use crate::jwk::JwkParamsOkp;
use crate::jwu;

pub(crate) fn sign(jwk: &Jwk, message: &[u8]) -> Result<Vec<u8>> {
  let params: &JwkParamsOkp = jwk.try_okp_params()?;
  if params.try_ed_curve() != Ok(EdCurve::Ed25519) {
    return Err(Error::InvalidKey("EdDSA requires an Ed25519 key"));
  }

  let seed: Vec<u8> = params
    .d
    .as_deref()
    .map(jwu::decode_b64)
    .transpose()
    .map_err(|_| Error::InvalidKey("invalid `d` parameter"))?
    .ok_or(Error::InvalidKey("missing private parameters"))?;
  let seed: [u8; SecretKey::LENGTH] = seed
    .try_into()
    .map_err(|_| Error::InvalidKey("wrong Ed25519 key length"))?;

  let secret: SecretKey = SecretKey::from_bytes(&seed);
  Ok(secret.sign(message).to_bytes().to_vec())
}

pub(crate) fn verify(jwk: &Jwk, message: &[u8], signature: &[u8]) -> Result<()> {
  let params: &JwkParamsOkp = jwk.try_okp_params()?;
  if params.try_ed_curve() != Ok(EdCurve::Ed25519) {
    return Err(Error::InvalidKey("EdDSA requires an Ed25519 key"));
  }

  let x: Vec<u8> = jwu::decode_b64(&params.x).map_err(|_| Error::InvalidKey("invalid `x` parameter"))?;
  let x: [u8; PublicKey::LENGTH] = x.try_into().map_err(|_| Error::InvalidKey("wrong Ed25519 key length"))?;
  let public: PublicKey = PublicKey::try_from(x).map_err(|_| Error::InvalidKey("invalid Ed25519 public key"))?;

  let signature: [u8; Signature::LENGTH] = signature.try_into().map_err(|_| Error::InvalidSignature)?;
  if public.verify(&Signature::from_bytes(signature), message) {
    Ok(())
  } else {
    Err(Error::InvalidSignature)
  }
}
