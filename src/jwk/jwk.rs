// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use core::fmt::Debug;
use core::fmt::Formatter;

use crypto::hashes::sha::SHA256;
use crypto::hashes::sha::SHA256_LEN;
use serde::de;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde_json::Map;
use serde_json::Value;
use url::Url;
use zeroize::Zeroize;
use zeroize::Zeroizing;

use crate::error::Error;
use crate::error::Result;
use crate::jwk::FetchOptions;
use crate::jwk::JwkOperation;
use crate::jwk::JwkParams;
use crate::jwk::JwkParamsEc;
use crate::jwk::JwkParamsOct;
use crate::jwk::JwkParamsOkp;
use crate::jwk::JwkParamsRsa;
use crate::jwk::JwkType;
use crate::jwk::JwkUse;
use crate::jwk::RemoteFetcher;
use crate::jwu;

/// A JSON Web Key.
///
/// [More Info](https://tools.ietf.org/html/rfc7517#section-4)
///
/// The key type and curve are fixed at import and cannot be changed
/// afterwards. Members the library does not recognize are preserved verbatim
/// and round-trip through serialization.
#[derive(Clone, PartialEq, Eq)]
pub struct Jwk {
  kty: JwkType,
  use_: Option<JwkUse>,
  key_ops: Option<Vec<JwkOperation>>,
  alg: Option<String>,
  kid: Option<String>,
  x5u: Option<Url>,
  x5c: Option<Vec<String>>,
  x5t: Option<String>,
  x5t_s256: Option<String>,
  params: JwkParams,
  additional: Map<String, Value>,
}

impl Jwk {
  /// Creates a new `Jwk` from validated key parameters.
  pub fn from_params(params: impl Into<JwkParams>) -> Result<Self> {
    let params: JwkParams = params.into();
    params.check()?;
    Ok(Self {
      kty: params.kty(),
      use_: None,
      key_ops: None,
      alg: None,
      kid: None,
      x5u: None,
      x5c: None,
      x5t: None,
      x5t_s256: None,
      params,
      additional: Map::new(),
    })
  }

  /// Parses a `Jwk` from its JSON text representation.
  pub fn from_json(json: &str) -> Result<Self> {
    serde_json::from_str(json).map_err(|_| Error::InvalidKey("malformed JWK"))
  }

  /// Parses a `Jwk` from a JSON value.
  pub fn from_json_value(json: Value) -> Result<Self> {
    serde_json::from_value(json).map_err(|_| Error::InvalidKey("malformed JWK"))
  }

  /// Creates an `oct` key wrapping the raw bytes of a symmetric key.
  pub fn from_symmetric_key(key: impl AsRef<[u8]>) -> Self {
    Self::from_params(JwkParamsOct {
      k: jwu::encode_b64(key.as_ref()),
    })
    .expect("symmetric parameters are always valid")
  }

  /// Imports a public key from the leaf certificate of an `x5c` chain.
  ///
  /// The chain elements use standard base64, not base64url.
  pub fn from_x5c(chain: &[String]) -> Result<Self> {
    let leaf: &String = chain.first().ok_or(Error::InvalidKey("empty `x5c` chain"))?;
    let der: Vec<u8> = jwu::decode_b64_standard(leaf).map_err(|_| Error::InvalidKey("invalid `x5c` base64"))?;
    let mut jwk: Self = Self::from_certificate_der(&der)?;
    jwk.x5c = Some(chain.to_vec());
    Ok(jwk)
  }

  /// Imports a public key from the PEM certificate an `x5u` URL points to.
  ///
  /// Fails with [`Error::InvalidKey`] when `options.ignore_remote` forbids
  /// the fetch.
  pub fn from_x5u(url: &Url, fetcher: &dyn RemoteFetcher, options: FetchOptions) -> Result<Self> {
    if options.ignore_remote {
      return Err(Error::InvalidKey("remote key fetch refused"));
    }
    let data: Vec<u8> = fetcher.fetch(url, options)?;
    let mut jwk: Self = Self::from_pem(&data)?;
    jwk.x5u = Some(url.clone());
    Ok(jwk)
  }

  /// Returns the key type (`kty`).
  pub const fn kty(&self) -> JwkType {
    self.kty
  }

  /// Returns the public key use (`use`).
  pub fn use_(&self) -> Option<JwkUse> {
    self.use_
  }

  /// Sets the public key use (`use`).
  pub fn set_use(&mut self, value: JwkUse) {
    self.use_ = Some(value);
  }

  /// Returns the key operations (`key_ops`).
  pub fn key_ops(&self) -> Option<&[JwkOperation]> {
    self.key_ops.as_deref()
  }

  /// Sets the key operations (`key_ops`).
  pub fn set_key_ops(&mut self, value: impl IntoIterator<Item = JwkOperation>) {
    self.key_ops = Some(value.into_iter().collect());
  }

  /// Returns the algorithm the key is intended for (`alg`).
  pub fn alg(&self) -> Option<&str> {
    self.alg.as_deref()
  }

  /// Sets the algorithm the key is intended for (`alg`).
  pub fn set_alg(&mut self, value: impl Into<String>) {
    self.alg = Some(value.into());
  }

  /// Returns the key id (`kid`).
  pub fn kid(&self) -> Option<&str> {
    self.kid.as_deref()
  }

  /// Sets the key id (`kid`).
  pub fn set_kid(&mut self, value: impl Into<String>) {
    self.kid = Some(value.into());
  }

  /// Returns the X.509 URL (`x5u`).
  pub fn x5u(&self) -> Option<&Url> {
    self.x5u.as_ref()
  }

  /// Sets the X.509 URL (`x5u`).
  pub fn set_x5u(&mut self, value: Url) {
    self.x5u = Some(value);
  }

  /// Returns the X.509 certificate chain (`x5c`).
  pub fn x5c(&self) -> Option<&[String]> {
    self.x5c.as_deref()
  }

  /// Sets the X.509 certificate chain (`x5c`).
  ///
  /// The leaf certificate must carry the same public key as the JWK.
  pub fn set_x5c(&mut self, value: impl IntoIterator<Item = String>) -> Result<()> {
    let chain: Vec<String> = value.into_iter().collect();
    check_x5c_matches(&chain, &self.params)?;
    self.x5c = Some(chain);
    Ok(())
  }

  /// Returns the X.509 certificate SHA-1 thumbprint (`x5t`).
  pub fn x5t(&self) -> Option<&str> {
    self.x5t.as_deref()
  }

  /// Sets the X.509 certificate SHA-1 thumbprint (`x5t`).
  pub fn set_x5t(&mut self, value: impl Into<String>) {
    self.x5t = Some(value.into());
  }

  /// Returns the X.509 certificate SHA-256 thumbprint (`x5t#S256`).
  pub fn x5t_s256(&self) -> Option<&str> {
    self.x5t_s256.as_deref()
  }

  /// Sets the X.509 certificate SHA-256 thumbprint (`x5t#S256`).
  pub fn set_x5t_s256(&mut self, value: impl Into<String>) {
    self.x5t_s256 = Some(value.into());
  }

  /// Returns the typed key parameters.
  pub const fn params(&self) -> &JwkParams {
    &self.params
  }

  /// Returns the members of the key the library does not recognize.
  pub const fn additional(&self) -> &Map<String, Value> {
    &self.additional
  }

  /// Returns the EC parameters, or [`Error::InvalidKey`] for other key types.
  pub fn try_ec_params(&self) -> Result<&JwkParamsEc> {
    match &self.params {
      JwkParams::Ec(inner) => Ok(inner),
      _ => Err(Error::InvalidKey("expected an EC key")),
    }
  }

  /// Returns the RSA parameters, or [`Error::InvalidKey`] for other key types.
  pub fn try_rsa_params(&self) -> Result<&JwkParamsRsa> {
    match &self.params {
      JwkParams::Rsa(inner) => Ok(inner),
      _ => Err(Error::InvalidKey("expected an RSA key")),
    }
  }

  /// Returns the oct parameters, or [`Error::InvalidKey`] for other key types.
  pub fn try_oct_params(&self) -> Result<&JwkParamsOct> {
    match &self.params {
      JwkParams::Oct(inner) => Ok(inner),
      _ => Err(Error::InvalidKey("expected an oct key")),
    }
  }

  /// Returns the OKP parameters, or [`Error::InvalidKey`] for other key types.
  pub fn try_okp_params(&self) -> Result<&JwkParamsOkp> {
    match &self.params {
      JwkParams::Okp(inner) => Ok(inner),
      _ => Err(Error::InvalidKey("expected an OKP key")),
    }
  }

  /// Returns `true` if the key holds symmetric material.
  pub fn is_symmetric(&self) -> bool {
    self.kty == JwkType::Oct
  }

  /// Returns `true` if the key holds private key material.
  pub fn is_private(&self) -> bool {
    self.params.is_private()
  }

  /// Returns `true` if the key holds only public key material.
  pub fn is_public(&self) -> bool {
    !self.is_symmetric() && !self.is_private()
  }

  /// Returns a copy of the key with all private components removed.
  ///
  /// Fails with [`Error::InvalidKey`] for symmetric keys, which have no
  /// public form.
  pub fn to_public(&self) -> Result<Self> {
    let params: JwkParams = self
      .params
      .to_public()
      .ok_or(Error::InvalidKey("symmetric keys have no public form"))?;
    let mut this: Self = self.clone();
    this.params.zeroize();
    this.params = params;
    Ok(this)
  }

  /// Exports the raw bytes of a symmetric key.
  pub fn to_symmetric_key(&self) -> Result<Zeroizing<Vec<u8>>> {
    let params: &JwkParamsOct = self.try_oct_params()?;
    jwu::decode_b64(&params.k)
      .map(Zeroizing::new)
      .map_err(|_| Error::InvalidKey("invalid `k` parameter"))
  }

  /// Computes the RFC 7638 SHA-256 thumbprint of the key.
  pub fn thumbprint_sha256(&self) -> [u8; SHA256_LEN] {
    let mut required: Map<String, Value> = Map::new();
    required.insert("kty".to_owned(), self.kty.name().into());
    match &self.params {
      JwkParams::Ec(inner) => {
        required.insert("crv".to_owned(), inner.crv.clone().into());
        required.insert("x".to_owned(), inner.x.clone().into());
        required.insert("y".to_owned(), inner.y.clone().into());
      }
      JwkParams::Rsa(inner) => {
        required.insert("e".to_owned(), inner.e.clone().into());
        required.insert("n".to_owned(), inner.n.clone().into());
      }
      JwkParams::Oct(inner) => {
        required.insert("k".to_owned(), inner.k.clone().into());
      }
      JwkParams::Okp(inner) => {
        required.insert("crv".to_owned(), inner.crv.clone().into());
        required.insert("x".to_owned(), inner.x.clone().into());
      }
    }

    // Without `preserve_order` the map serializes its keys in lexicographic
    // order, which is exactly the canonical form RFC 7638 hashes.
    let json: String = Value::Object(required).to_string();

    let mut digest: [u8; SHA256_LEN] = [0; SHA256_LEN];
    SHA256(json.as_bytes(), &mut digest);
    digest
  }

  /// Computes the RFC 7638 SHA-256 thumbprint, base64url-encoded.
  pub fn thumbprint_sha256_b64(&self) -> String {
    jwu::encode_b64(self.thumbprint_sha256())
  }

  pub(crate) fn from_json_map(mut map: Map<String, Value>) -> Result<Self> {
    let kty: JwkType = match map.remove("kty") {
      Some(Value::String(value)) => JwkType::parse(&value)?,
      Some(_) => return Err(Error::InvalidKey("non-string `kty`")),
      None => return Err(Error::InvalidKey("missing `kty`")),
    };
    let params: JwkParams = JwkParams::from_map(kty, &mut map)?;

    let this: Self = Self {
      kty,
      use_: take_member(&mut map, "use")?,
      key_ops: take_member(&mut map, "key_ops")?,
      alg: take_member(&mut map, "alg")?,
      kid: take_member(&mut map, "kid")?,
      x5u: take_member(&mut map, "x5u")?,
      x5c: take_member(&mut map, "x5c")?,
      x5t: take_member(&mut map, "x5t")?,
      x5t_s256: take_member(&mut map, "x5t#S256")?,
      params,
      additional: map,
    };

    if let Some(chain) = this.x5c.as_deref() {
      check_x5c_matches(chain, &this.params)?;
    }

    Ok(this)
  }

  pub(crate) fn to_json_map(&self) -> Map<String, Value> {
    let mut map: Map<String, Value> = Map::new();
    map.insert("kty".to_owned(), self.kty.name().into());
    if let Some(use_) = self.use_ {
      map.insert("use".to_owned(), use_.name().into());
    }
    if let Some(key_ops) = self.key_ops.as_deref() {
      map.insert(
        "key_ops".to_owned(),
        serde_json::to_value(key_ops).expect("key operations always serialize"),
      );
    }
    if let Some(alg) = self.alg.as_deref() {
      map.insert("alg".to_owned(), alg.into());
    }
    if let Some(kid) = self.kid.as_deref() {
      map.insert("kid".to_owned(), kid.into());
    }
    self.params.write_into(&mut map);
    if let Some(x5u) = self.x5u.as_ref() {
      map.insert("x5u".to_owned(), x5u.as_str().into());
    }
    if let Some(x5c) = self.x5c.as_deref() {
      map.insert("x5c".to_owned(), serde_json::to_value(x5c).expect("strings always serialize"));
    }
    if let Some(x5t) = self.x5t.as_deref() {
      map.insert("x5t".to_owned(), x5t.into());
    }
    if let Some(x5t_s256) = self.x5t_s256.as_deref() {
      map.insert("x5t#S256".to_owned(), x5t_s256.into());
    }
    for (key, value) in &self.additional {
      map.insert(key.clone(), value.clone());
    }
    map
  }
}

impl Debug for Jwk {
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    // Private parameters stay out of debug output.
    f
      .debug_struct("Jwk")
      .field("kty", &self.kty)
      .field("kid", &self.kid)
      .field("alg", &self.alg)
      .finish_non_exhaustive()
  }
}

impl Drop for Jwk {
  fn drop(&mut self) {
    self.params.zeroize();
  }
}

impl Serialize for Jwk {
  fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
    self.to_json_map().serialize(serializer)
  }
}

impl<'de> Deserialize<'de> for Jwk {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
    let map: Map<String, Value> = Map::deserialize(deserializer)?;
    Self::from_json_map(map).map_err(de::Error::custom)
  }
}

fn check_x5c_matches(chain: &[String], params: &JwkParams) -> Result<()> {
  let leaf: &String = chain.first().ok_or(Error::InvalidKey("empty `x5c` chain"))?;
  let der: Vec<u8> = jwu::decode_b64_standard(leaf).map_err(|_| Error::InvalidKey("invalid `x5c` base64"))?;
  let cert_key: Jwk = Jwk::from_certificate_der(&der)?;
  if cert_key.params().public_components_match(params) {
    Ok(())
  } else {
    Err(Error::InvalidKey("`x5c` certificate does not match the key"))
  }
}

fn take_member<T: de::DeserializeOwned>(map: &mut Map<String, Value>, key: &str) -> Result<Option<T>> {
  map
    .remove(key)
    .map(|value| serde_json::from_value(value).map_err(|_| Error::InvalidKey("malformed JWK member")))
    .transpose()
}
