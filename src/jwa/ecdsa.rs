// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! ECDSA signing and verification over the NIST curves.
//!
//! The JWS wire format for an ECDSA signature is the raw concatenation of
//! `r` and `s`, each left-padded to the curve's coordinate width (32, 48 and
//! 66 bytes). A decoded signature of any other length is invalid — reported
//! as a signature failure, not a parse error.

use zeroize::Zeroizing;

use crate::error::Error;
use crate::error::Result;
use crate::jwk::EcCurve;
use crate::jwk::Jwk;
use crate::jwk::JwkParamsEc;
use crate::jws::JwsAlgorithm;
use crate::jwu;

pub(crate) fn sign(alg: JwsAlgorithm, jwk: &Jwk, message: &[u8]) -> Result<Vec<u8>> {
  let params: &JwkParamsEc = jwk.try_ec_params()?;
  let curve: EcCurve = checked_curve(alg, params)?;
  let d: Zeroizing<Vec<u8>> = params
    .d
    .as_deref()
    .map(jwu::decode_b64)
    .transpose()
    .map_err(|_| Error::InvalidKey("invalid `d` parameter"))?
    .map(Zeroizing::new)
    .ok_or(Error::InvalidKey("missing private parameters"))?;

  match curve {
    EcCurve::P256 => {
      let key: p256::ecdsa::SigningKey =
        p256::ecdsa::SigningKey::from_slice(d.as_slice()).map_err(|_| Error::InvalidKey("invalid EC scalar"))?;
      let signature: p256::ecdsa::Signature = signature::Signer::sign(&key, message);
      Ok(signature.to_bytes().to_vec())
    }
    EcCurve::P384 => {
      let key: p384::ecdsa::SigningKey =
        p384::ecdsa::SigningKey::from_slice(d.as_slice()).map_err(|_| Error::InvalidKey("invalid EC scalar"))?;
      let signature: p384::ecdsa::Signature = signature::Signer::sign(&key, message);
      Ok(signature.to_bytes().to_vec())
    }
    EcCurve::P521 => {
      let key: p521::ecdsa::SigningKey =
        p521::ecdsa::SigningKey::from_slice(d.as_slice()).map_err(|_| Error::InvalidKey("invalid EC scalar"))?;
      let signature: p521::ecdsa::Signature = signature::Signer::sign(&key, message);
      Ok(signature.to_bytes().to_vec())
    }
  }
}

pub(crate) fn verify(alg: JwsAlgorithm, jwk: &Jwk, message: &[u8], signature: &[u8]) -> Result<()> {
  let params: &JwkParamsEc = jwk.try_ec_params()?;
  let curve: EcCurve = checked_curve(alg, params)?;

  // Exactly 2 * coordinate width, anything else never verifies.
  if signature.len() != 2 * curve.coordinate_len() {
    return Err(Error::InvalidSignature);
  }

  let point: Vec<u8> = public_sec1_bytes(params)?;

  match curve {
    EcCurve::P256 => {
      let key: p256::ecdsa::VerifyingKey =
        p256::ecdsa::VerifyingKey::from_sec1_bytes(&point).map_err(|_| Error::InvalidKey("invalid EC public key"))?;
      let signature: p256::ecdsa::Signature =
        p256::ecdsa::Signature::from_slice(signature).map_err(|_| Error::InvalidSignature)?;
      signature::Verifier::verify(&key, message, &signature).map_err(|_| Error::InvalidSignature)
    }
    EcCurve::P384 => {
      let key: p384::ecdsa::VerifyingKey =
        p384::ecdsa::VerifyingKey::from_sec1_bytes(&point).map_err(|_| Error::InvalidKey("invalid EC public key"))?;
      let signature: p384::ecdsa::Signature =
        p384::ecdsa::Signature::from_slice(signature).map_err(|_| Error::InvalidSignature)?;
      signature::Verifier::verify(&key, message, &signature).map_err(|_| Error::InvalidSignature)
    }
    EcCurve::P521 => {
      let key: p521::ecdsa::VerifyingKey =
        p521::ecdsa::VerifyingKey::from_sec1_bytes(&point).map_err(|_| Error::InvalidKey("invalid EC public key"))?;
      let signature: p521::ecdsa::Signature =
        p521::ecdsa::Signature::from_slice(signature).map_err(|_| Error::InvalidSignature)?;
      signature::Verifier::verify(&key, message, &signature).map_err(|_| Error::InvalidSignature)
    }
  }
}

/// Returns the uncompressed SEC1 point `0x04 || x || y` of the public key.
pub(crate) fn public_sec1_bytes(params: &JwkParamsEc) -> Result<Vec<u8>> {
  let x: Vec<u8> = jwu::decode_b64(&params.x).map_err(|_| Error::InvalidKey("invalid `x` parameter"))?;
  let y: Vec<u8> = jwu::decode_b64(&params.y).map_err(|_| Error::InvalidKey("invalid `y` parameter"))?;

  let mut point: Vec<u8> = Vec::with_capacity(1 + x.len() + y.len());
  point.push(0x04);
  point.extend_from_slice(&x);
  point.extend_from_slice(&y);
  Ok(point)
}

fn checked_curve(alg: JwsAlgorithm, params: &JwkParamsEc) -> Result<EcCurve> {
  let curve: EcCurve = params.try_ec_curve()?;
  let expected: EcCurve = match alg {
    JwsAlgorithm::ES256 => EcCurve::P256,
    JwsAlgorithm::ES384 => EcCurve::P384,
    JwsAlgorithm::ES512 => EcCurve::P521,
    _ => return Err(Error::InvalidKey("incompatible `alg` for ECDSA")),
  };
  if curve == expected {
    Ok(curve)
  } else {
    Err(Error::InvalidKey("curve does not match `alg`"))
  }
}
