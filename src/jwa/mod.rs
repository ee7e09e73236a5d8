// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! JSON Web Algorithms: dispatch from an `alg` value to the signature
//! primitives, gated on key kind and privacy.
//!
//! A key that does not fit the algorithm is always reported as
//! [`Error::InvalidKey`], never as [`Error::InvalidSignature`], so callers
//! can tell configuration mistakes from forgery attempts.

pub(crate) mod ecdsa;
pub(crate) mod eddsa;
pub(crate) mod hmac;
pub(crate) mod rsa;

use crate::error::Error;
use crate::error::Result;
use crate::jwk::Jwk;
use crate::jwk::JwkType;
use crate::jws::JwsAlgorithm;

/// Produces the signature bytes for `message` under `alg` and `jwk`.
pub(crate) fn sign(alg: JwsAlgorithm, jwk: &Jwk, message: &[u8]) -> Result<Vec<u8>> {
  match alg {
    JwsAlgorithm::HS256 | JwsAlgorithm::HS384 | JwsAlgorithm::HS512 => {
      if !jwk.is_symmetric() {
        return Err(Error::InvalidKey("HMAC requires a symmetric key"));
      }
      hmac::sign(alg, jwk, message)
    }
    JwsAlgorithm::RS256
    | JwsAlgorithm::RS384
    | JwsAlgorithm::RS512
    | JwsAlgorithm::PS256
    | JwsAlgorithm::PS384
    | JwsAlgorithm::PS512 => {
      if jwk.kty() != JwkType::Rsa {
        return Err(Error::InvalidKey("RSA signing requires an RSA key"));
      }
      if !jwk.is_private() {
        return Err(Error::InvalidKey("signing requires a private key"));
      }
      rsa::sign(alg, jwk, message)
    }
    JwsAlgorithm::ES256 | JwsAlgorithm::ES384 | JwsAlgorithm::ES512 => {
      if jwk.kty() != JwkType::Ec {
        return Err(Error::InvalidKey("ECDSA signing requires an EC key"));
      }
      if !jwk.is_private() {
        return Err(Error::InvalidKey("signing requires a private key"));
      }
      ecdsa::sign(alg, jwk, message)
    }
    JwsAlgorithm::EdDSA => {
      if jwk.kty() != JwkType::Okp {
        return Err(Error::InvalidKey("EdDSA signing requires an OKP key"));
      }
      if !jwk.is_private() {
        return Err(Error::InvalidKey("signing requires a private key"));
      }
      eddsa::sign(jwk, message)
    }
    JwsAlgorithm::NONE => Ok(Vec::new()),
    JwsAlgorithm::ES256K => Err(Error::InvalidKey("`ES256K` is not supported")),
  }
}

/// Verifies the signature bytes for `message` under `alg` and `jwk`.
pub(crate) fn verify(alg: JwsAlgorithm, jwk: &Jwk, message: &[u8], signature: &[u8]) -> Result<()> {
  match alg {
    JwsAlgorithm::HS256 | JwsAlgorithm::HS384 | JwsAlgorithm::HS512 => {
      if !jwk.is_symmetric() {
        return Err(Error::InvalidKey("HMAC requires a symmetric key"));
      }
      hmac::verify(alg, jwk, message, signature)
    }
    JwsAlgorithm::RS256
    | JwsAlgorithm::RS384
    | JwsAlgorithm::RS512
    | JwsAlgorithm::PS256
    | JwsAlgorithm::PS384
    | JwsAlgorithm::PS512 => {
      if jwk.kty() != JwkType::Rsa {
        return Err(Error::InvalidKey("RSA verification requires an RSA key"));
      }
      rsa::verify(alg, jwk, message, signature)
    }
    JwsAlgorithm::ES256 | JwsAlgorithm::ES384 | JwsAlgorithm::ES512 => {
      if jwk.kty() != JwkType::Ec {
        return Err(Error::InvalidKey("ECDSA verification requires an EC key"));
      }
      ecdsa::verify(alg, jwk, message, signature)
    }
    JwsAlgorithm::EdDSA => {
      if jwk.kty() != JwkType::Okp {
        return Err(Error::InvalidKey("EdDSA verification requires an OKP key"));
      }
      eddsa::verify(jwk, message, signature)
    }
    JwsAlgorithm::NONE => Err(Error::InvalidKey("unsigned tokens cannot be verified")),
    JwsAlgorithm::ES256K => Err(Error::InvalidKey("`ES256K` is not supported")),
  }
}
