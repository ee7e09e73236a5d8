// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use serde_json::Map;
use serde_json::Value;
use zeroize::Zeroize;

use crate::error::Error;
use crate::error::Result;
use crate::jwk::EcCurve;
use crate::jwk::EcxCurve;
use crate::jwk::EdCurve;
use crate::jwk::JwkType;
use crate::jwu;

/// The key parameters of a JSON Web Key, discriminated by `kty`.
///
/// All byte-string parameters are stored in their base64url form, exactly as
/// they appear on the wire; widths are validated on construction.
#[derive(Clone, Debug, Hash, PartialEq, Eq, Zeroize)]
pub enum JwkParams {
  /// Elliptic Curve parameters.
  Ec(JwkParamsEc),
  /// RSA parameters.
  Rsa(JwkParamsRsa),
  /// Octet sequence parameters.
  Oct(JwkParamsOct),
  /// Octet string key pair parameters.
  Okp(JwkParamsOkp),
}

/// Parameters for Elliptic Curve keys.
///
/// [More Info](https://tools.ietf.org/html/rfc7518#section-6.2)
#[derive(Clone, Debug, Hash, PartialEq, Eq, Zeroize)]
pub struct JwkParamsEc {
  /// The name of the curve.
  pub crv: String,
  /// The `x` coordinate, base64url-encoded at the curve's coordinate width.
  pub x: String,
  /// The `y` coordinate, base64url-encoded at the curve's coordinate width.
  pub y: String,
  /// The private scalar, base64url-encoded at the curve's coordinate width.
  pub d: Option<String>,
}

/// Parameters for RSA keys.
///
/// [More Info](https://tools.ietf.org/html/rfc7518#section-6.3)
#[derive(Clone, Debug, Hash, PartialEq, Eq, Zeroize)]
pub struct JwkParamsRsa {
  /// The modulus.
  pub n: String,
  /// The public exponent.
  pub e: String,
  /// The private exponent.
  pub d: Option<String>,
  /// The first prime factor.
  pub p: Option<String>,
  /// The second prime factor.
  pub q: Option<String>,
  /// The first factor CRT exponent.
  pub dp: Option<String>,
  /// The second factor CRT exponent.
  pub dq: Option<String>,
  /// The first CRT coefficient.
  pub qi: Option<String>,
}

/// Parameters for symmetric keys.
///
/// [More Info](https://tools.ietf.org/html/rfc7518#section-6.4)
#[derive(Clone, Debug, Hash, PartialEq, Eq, Zeroize)]
pub struct JwkParamsOct {
  /// The key value.
  pub k: String,
}

/// Parameters for octet string key pairs.
///
/// [More Info](https://tools.ietf.org/html/rfc8037)
#[derive(Clone, Debug, Hash, PartialEq, Eq, Zeroize)]
pub struct JwkParamsOkp {
  /// The name of the curve.
  pub crv: String,
  /// The public key, base64url-encoded at the curve's key width.
  pub x: String,
  /// The private key, base64url-encoded at the curve's key width.
  pub d: Option<String>,
}

impl JwkParams {
  /// Returns the key type these parameters belong to.
  pub const fn kty(&self) -> JwkType {
    match self {
      Self::Ec(_) => JwkType::Ec,
      Self::Rsa(_) => JwkType::Rsa,
      Self::Oct(_) => JwkType::Oct,
      Self::Okp(_) => JwkType::Okp,
    }
  }

  /// Returns `true` if the parameters include private key material.
  pub fn is_private(&self) -> bool {
    match self {
      Self::Ec(inner) => inner.d.is_some(),
      Self::Rsa(inner) => inner.d.is_some(),
      Self::Oct(_) => false,
      Self::Okp(inner) => inner.d.is_some(),
    }
  }

  /// Returns a copy with all private components removed.
  ///
  /// Returns `None` for symmetric keys, which have no public form.
  pub fn to_public(&self) -> Option<Self> {
    match self {
      Self::Ec(inner) => Some(Self::Ec(JwkParamsEc {
        crv: inner.crv.clone(),
        x: inner.x.clone(),
        y: inner.y.clone(),
        d: None,
      })),
      Self::Rsa(inner) => Some(Self::Rsa(JwkParamsRsa {
        n: inner.n.clone(),
        e: inner.e.clone(),
        d: None,
        p: None,
        q: None,
        dp: None,
        dq: None,
        qi: None,
      })),
      Self::Oct(_) => None,
      Self::Okp(inner) => Some(Self::Okp(JwkParamsOkp {
        crv: inner.crv.clone(),
        x: inner.x.clone(),
        d: None,
      })),
    }
  }

  /// Checks every member for decodability and the fixed widths required by
  /// the key type and curve.
  pub fn check(&self) -> Result<()> {
    match self {
      Self::Ec(inner) => inner.check(),
      Self::Rsa(inner) => inner.check(),
      Self::Oct(inner) => inner.check(),
      Self::Okp(inner) => inner.check(),
    }
  }

  /// Returns `true` if `self` and `other` describe the same public key.
  ///
  /// Integer parameters are compared by value; a leading zero octet (as
  /// some certificate encoders emit) does not count as a difference.
  pub(crate) fn public_components_match(&self, other: &Self) -> bool {
    fn same(a: &str, b: &str) -> bool {
      match (jwu::decode_b64(a), jwu::decode_b64(b)) {
        (Ok(a), Ok(b)) => strip_leading_zeros(&a) == strip_leading_zeros(&b),
        _ => false,
      }
    }

    match (self, other) {
      (Self::Ec(a), Self::Ec(b)) => a.crv == b.crv && same(&a.x, &b.x) && same(&a.y, &b.y),
      (Self::Rsa(a), Self::Rsa(b)) => same(&a.n, &b.n) && same(&a.e, &b.e),
      (Self::Okp(a), Self::Okp(b)) => a.crv == b.crv && same(&a.x, &b.x),
      _ => false,
    }
  }

  /// Extracts and validates the parameters for `kty` from a JSON object,
  /// removing the members it consumes.
  pub(crate) fn from_map(kty: JwkType, map: &mut Map<String, Value>) -> Result<Self> {
    let params: Self = match kty {
      JwkType::Ec => Self::Ec(JwkParamsEc {
        crv: take_str(map, "crv")?.ok_or(Error::InvalidKey("missing `crv`"))?,
        x: take_str(map, "x")?.ok_or(Error::InvalidKey("missing `x`"))?,
        y: take_str(map, "y")?.ok_or(Error::InvalidKey("missing `y`"))?,
        d: take_str(map, "d")?,
      }),
      JwkType::Rsa => Self::Rsa(JwkParamsRsa {
        n: take_str(map, "n")?.ok_or(Error::InvalidKey("missing `n`"))?,
        e: take_str(map, "e")?.ok_or(Error::InvalidKey("missing `e`"))?,
        d: take_str(map, "d")?,
        p: take_str(map, "p")?,
        q: take_str(map, "q")?,
        dp: take_str(map, "dp")?,
        dq: take_str(map, "dq")?,
        qi: take_str(map, "qi")?,
      }),
      JwkType::Oct => Self::Oct(JwkParamsOct {
        k: take_str(map, "k")?.ok_or(Error::InvalidKey("missing `k`"))?,
      }),
      JwkType::Okp => Self::Okp(JwkParamsOkp {
        crv: take_str(map, "crv")?.ok_or(Error::InvalidKey("missing `crv`"))?,
        x: take_str(map, "x")?.ok_or(Error::InvalidKey("missing `x`"))?,
        d: take_str(map, "d")?,
      }),
    };
    params.check()?;
    Ok(params)
  }

  /// Writes the parameters into a JSON object.
  pub(crate) fn write_into(&self, map: &mut Map<String, Value>) {
    match self {
      Self::Ec(inner) => {
        map.insert("crv".to_owned(), inner.crv.clone().into());
        map.insert("x".to_owned(), inner.x.clone().into());
        map.insert("y".to_owned(), inner.y.clone().into());
        if let Some(d) = inner.d.as_deref() {
          map.insert("d".to_owned(), d.into());
        }
      }
      Self::Rsa(inner) => {
        map.insert("n".to_owned(), inner.n.clone().into());
        map.insert("e".to_owned(), inner.e.clone().into());
        for (name, value) in [
          ("d", &inner.d),
          ("p", &inner.p),
          ("q", &inner.q),
          ("dp", &inner.dp),
          ("dq", &inner.dq),
          ("qi", &inner.qi),
        ] {
          if let Some(value) = value.as_deref() {
            map.insert(name.to_owned(), value.into());
          }
        }
      }
      Self::Oct(inner) => {
        map.insert("k".to_owned(), inner.k.clone().into());
      }
      Self::Okp(inner) => {
        map.insert("crv".to_owned(), inner.crv.clone().into());
        map.insert("x".to_owned(), inner.x.clone().into());
        if let Some(d) = inner.d.as_deref() {
          map.insert("d".to_owned(), d.into());
        }
      }
    }
  }
}

impl JwkParamsEc {
  /// Returns the curve of the key.
  pub fn try_ec_curve(&self) -> Result<EcCurve> {
    EcCurve::parse(&self.crv)
  }

  fn check(&self) -> Result<()> {
    let curve: EcCurve = self.try_ec_curve()?;
    check_fixed_len(&self.x, curve.coordinate_len())?;
    check_fixed_len(&self.y, curve.coordinate_len())?;
    if let Some(d) = self.d.as_deref() {
      check_fixed_len(d, curve.coordinate_len())?;
    }
    Ok(())
  }
}

impl JwkParamsRsa {
  fn check(&self) -> Result<()> {
    check_b64(&self.n)?;
    check_b64(&self.e)?;
    for member in [&self.d, &self.p, &self.q, &self.dp, &self.dq, &self.qi] {
      if let Some(member) = member.as_deref() {
        check_b64(member)?;
      }
    }
    if self.d.is_some() && (self.p.is_none() || self.q.is_none()) {
      return Err(Error::InvalidKey("incomplete RSA private key"));
    }
    Ok(())
  }
}

impl JwkParamsOct {
  fn check(&self) -> Result<()> {
    check_b64(&self.k)?;
    Ok(())
  }
}

impl JwkParamsOkp {
  /// Returns the signing curve of the key, if it is a signing key.
  pub fn try_ed_curve(&self) -> Result<EdCurve> {
    EdCurve::parse(&self.crv)
  }

  /// Returns the key-agreement curve of the key, if it is one.
  pub fn try_ecx_curve(&self) -> Result<EcxCurve> {
    EcxCurve::parse(&self.crv)
  }

  fn key_len(&self) -> Result<usize> {
    if let Ok(curve) = self.try_ed_curve() {
      Ok(curve.key_len())
    } else {
      self.try_ecx_curve().map(EcxCurve::key_len)
    }
  }

  fn check(&self) -> Result<()> {
    let len: usize = self.key_len().map_err(|_| Error::InvalidKey("unknown OKP curve"))?;
    check_fixed_len(&self.x, len)?;
    if let Some(d) = self.d.as_deref() {
      check_fixed_len(d, len)?;
    }
    Ok(())
  }
}

impl From<JwkParamsEc> for JwkParams {
  fn from(other: JwkParamsEc) -> Self {
    Self::Ec(other)
  }
}

impl From<JwkParamsRsa> for JwkParams {
  fn from(other: JwkParamsRsa) -> Self {
    Self::Rsa(other)
  }
}

impl From<JwkParamsOct> for JwkParams {
  fn from(other: JwkParamsOct) -> Self {
    Self::Oct(other)
  }
}

impl From<JwkParamsOkp> for JwkParams {
  fn from(other: JwkParamsOkp) -> Self {
    Self::Okp(other)
  }
}

fn check_b64(member: &str) -> Result<Vec<u8>> {
  jwu::decode_b64(member).map_err(|_| Error::InvalidKey("invalid base64url parameter"))
}

fn check_fixed_len(member: &str, len: usize) -> Result<()> {
  if check_b64(member)?.len() == len {
    Ok(())
  } else {
    Err(Error::InvalidKey("wrong parameter length"))
  }
}

fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
  let mut bytes: &[u8] = bytes;
  while let [0, rest @ ..] = bytes {
    bytes = rest;
  }
  bytes
}

fn take_str(map: &mut Map<String, Value>, key: &str) -> Result<Option<String>> {
  match map.remove(key) {
    None => Ok(None),
    Some(Value::String(value)) => Ok(Some(value)),
    Some(_) => Err(Error::InvalidKey("non-string key parameter")),
  }
}
