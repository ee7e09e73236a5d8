// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use rsa::BigUint;
use rsa::Pkcs1v15Sign;
use rsa::Pss;
use rsa::RsaPrivateKey;
use rsa::RsaPublicKey;
use sha2::Digest as _;
use sha2::Sha256;
use sha2::Sha384;
use sha2::Sha512;

use crate::error::Error;
use crate::error::Result;
use crate::jwk::Jwk;
use crate::jwk::JwkParamsRsa;
use crate::jws::JwsAlgorithm;
use crate::jwu;

pub(crate) fn sign(alg: JwsAlgorithm, jwk: &Jwk, message: &[u8]) -> Result<Vec<u8>> {
  let key: RsaPrivateKey = private_key(jwk.try_rsa_params()?)?;
  let hashed: Vec<u8> = digest(alg, message)?;

  let signature: Result<Vec<u8>, rsa::Error> = match alg {
    JwsAlgorithm::RS256 => key.sign(Pkcs1v15Sign::new::<Sha256>(), &hashed),
    JwsAlgorithm::RS384 => key.sign(Pkcs1v15Sign::new::<Sha384>(), &hashed),
    JwsAlgorithm::RS512 => key.sign(Pkcs1v15Sign::new::<Sha512>(), &hashed),
    JwsAlgorithm::PS256 => key.sign_with_rng(&mut rand::thread_rng(), Pss::new::<Sha256>(), &hashed),
    JwsAlgorithm::PS384 => key.sign_with_rng(&mut rand::thread_rng(), Pss::new::<Sha384>(), &hashed),
    JwsAlgorithm::PS512 => key.sign_with_rng(&mut rand::thread_rng(), Pss::new::<Sha512>(), &hashed),
    _ => return Err(Error::InvalidKey("incompatible `alg` for RSA")),
  };

  signature.map_err(|_| Error::Internal("RSA signing failed"))
}

pub(crate) fn verify(alg: JwsAlgorithm, jwk: &Jwk, message: &[u8], signature: &[u8]) -> Result<()> {
  let key: RsaPublicKey = public_key(jwk.try_rsa_params()?)?;
  let hashed: Vec<u8> = digest(alg, message)?;

  let verified: Result<(), rsa::Error> = match alg {
    JwsAlgorithm::RS256 => key.verify(Pkcs1v15Sign::new::<Sha256>(), &hashed, signature),
    JwsAlgorithm::RS384 => key.verify(Pkcs1v15Sign::new::<Sha384>(), &hashed, signature),
    JwsAlgorithm::RS512 => key.verify(Pkcs1v15Sign::new::<Sha512>(), &hashed, signature),
    JwsAlgorithm::PS256 => key.verify(Pss::new::<Sha256>(), &hashed, signature),
    JwsAlgorithm::PS384 => key.verify(Pss::new::<Sha384>(), &hashed, signature),
    JwsAlgorithm::PS512 => key.verify(Pss::new::<Sha512>(), &hashed, signature),
    _ => return Err(Error::InvalidKey("incompatible `alg` for RSA")),
  };

  verified.map_err(|_| Error::InvalidSignature)
}

pub(crate) fn private_key(params: &JwkParamsRsa) -> Result<RsaPrivateKey> {
  let d: &str = params.d.as_deref().ok_or(Error::InvalidKey("missing private parameters"))?;
  let p: &str = params.p.as_deref().ok_or(Error::InvalidKey("incomplete RSA private key"))?;
  let q: &str = params.q.as_deref().ok_or(Error::InvalidKey("incomplete RSA private key"))?;

  RsaPrivateKey::from_components(
    decode_biguint(&params.n)?,
    decode_biguint(&params.e)?,
    decode_biguint(d)?,
    vec![decode_biguint(p)?, decode_biguint(q)?],
  )
  .map_err(|_| Error::InvalidKey("invalid RSA parameters"))
}

pub(crate) fn public_key(params: &JwkParamsRsa) -> Result<RsaPublicKey> {
  RsaPublicKey::new(decode_biguint(&params.n)?, decode_biguint(&params.e)?)
    .map_err(|_| Error::InvalidKey("invalid RSA parameters"))
}

pub(crate) fn decode_biguint(member: &str) -> Result<BigUint> {
  jwu::decode_b64(member)
    .map(|bytes| BigUint::from_bytes_be(&bytes))
    .map_err(|_| Error::InvalidKey("invalid RSA parameter"))
}

fn digest(alg: JwsAlgorithm, message: &[u8]) -> Result<Vec<u8>> {
  match alg {
    JwsAlgorithm::RS256 | JwsAlgorithm::PS256 => Ok(Sha256::digest(message).to_vec()),
    JwsAlgorithm::RS384 | JwsAlgorithm::PS384 => Ok(Sha384::digest(message).to_vec()),
    JwsAlgorithm::RS512 | JwsAlgorithm::PS512 => Ok(Sha512::digest(message).to_vec()),
    _ => Err(Error::InvalidKey("incompatible `alg` for RSA")),
  }
}
