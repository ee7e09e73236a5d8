// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use crypto::hashes::sha::SHA256_LEN;
use crypto::hashes::sha::SHA384_LEN;
use crypto::hashes::sha::SHA512_LEN;
use crypto::macs::hmac::HMAC_SHA256;
use crypto::macs::hmac::HMAC_SHA384;
use crypto::macs::hmac::HMAC_SHA512;
use subtle::ConstantTimeEq as _;
use zeroize::Zeroizing;

use crate::error::Error;
use crate::error::Result;
use crate::jwk::Jwk;
use crate::jws::JwsAlgorithm;

pub(crate) fn sign(alg: JwsAlgorithm, jwk: &Jwk, message: &[u8]) -> Result<Vec<u8>> {
  let key: Zeroizing<Vec<u8>> = shared_secret(jwk)?;
  mac(alg, &key, message)
}

pub(crate) fn verify(alg: JwsAlgorithm, jwk: &Jwk, message: &[u8], signature: &[u8]) -> Result<()> {
  let key: Zeroizing<Vec<u8>> = shared_secret(jwk)?;
  let mac: Vec<u8> = mac(alg, &key, message)?;

  if mac.ct_eq(signature).into() {
    Ok(())
  } else {
    Err(Error::InvalidSignature)
  }
}

fn shared_secret(jwk: &Jwk) -> Result<Zeroizing<Vec<u8>>> {
  let key: Zeroizing<Vec<u8>> = jwk.to_symmetric_key()?;
  if key.is_empty() {
    return Err(Error::InvalidKey("empty symmetric key"));
  }
  Ok(key)
}

fn mac(alg: JwsAlgorithm, key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
  match alg {
    JwsAlgorithm::HS256 => {
      let mut out: [u8; SHA256_LEN] = [0; SHA256_LEN];
      HMAC_SHA256(message, key, &mut out);
      Ok(out.to_vec())
    }
    JwsAlgorithm::HS384 => {
      let mut out: [u8; SHA384_LEN] = [0; SHA384_LEN];
      HMAC_SHA384(message, key, &mut out);
      Ok(out.to_vec())
    }
    JwsAlgorithm::HS512 => {
      let mut out: [u8; SHA512_LEN] = [0; SHA512_LEN];
      HMAC_SHA512(message, key, &mut out);
      Ok(out.to_vec())
    }
    _ => Err(Error::InvalidKey("incompatible `alg` for HMAC")),
  }
}
