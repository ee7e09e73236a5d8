// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use serde_json::Map;
use serde_json::Value;
use url::Url;

use crate::error::Error;
use crate::error::Result;
use crate::jwk::Jwk;
use crate::jws::JwsAlgorithm;

/// JSON Web Signature JOSE Header.
///
/// [More Info](https://tools.ietf.org/html/rfc7515#section-4)
///
/// Members the library does not recognize are preserved verbatim and are
/// part of the signed input like every other member.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct JwsHeader {
  /// Algorithm.
  ///
  /// Identifies the cryptographic algorithm used to secure the JWS.
  ///
  /// [More Info](https://tools.ietf.org/html/rfc7515#section-4.1.1)
  #[serde(skip_serializing_if = "Option::is_none")]
  alg: Option<JwsAlgorithm>,
  /// Compression.
  ///
  /// Only `"DEF"` (raw DEFLATE applied to the payload before base64url) is
  /// recognized.
  #[serde(skip_serializing_if = "Option::is_none")]
  zip: Option<String>,
  /// JWK Set URL.
  ///
  /// [More Info](https://tools.ietf.org/html/rfc7515#section-4.1.2)
  #[serde(skip_serializing_if = "Option::is_none")]
  jku: Option<Url>,
  /// JSON Web Key.
  ///
  /// [More Info](https://tools.ietf.org/html/rfc7515#section-4.1.3)
  #[serde(skip_serializing_if = "Option::is_none")]
  jwk: Option<Jwk>,
  /// Key ID.
  ///
  /// [More Info](https://tools.ietf.org/html/rfc7515#section-4.1.4)
  #[serde(skip_serializing_if = "Option::is_none")]
  kid: Option<String>,
  /// X.509 URL.
  ///
  /// [More Info](https://tools.ietf.org/html/rfc7515#section-4.1.5)
  #[serde(skip_serializing_if = "Option::is_none")]
  x5u: Option<Url>,
  /// X.509 Certificate Chain.
  ///
  /// The first element is the subject's certificate, in standard base64.
  ///
  /// [More Info](https://tools.ietf.org/html/rfc7515#section-4.1.6)
  #[serde(skip_serializing_if = "Option::is_none")]
  x5c: Option<Vec<String>>,
  /// X.509 Certificate SHA-1 Thumbprint.
  ///
  /// [More Info](https://tools.ietf.org/html/rfc7515#section-4.1.7)
  #[serde(skip_serializing_if = "Option::is_none")]
  x5t: Option<String>,
  /// X.509 Certificate SHA-256 Thumbprint.
  ///
  /// [More Info](https://tools.ietf.org/html/rfc7515#section-4.1.8)
  #[serde(rename = "x5t#S256", skip_serializing_if = "Option::is_none")]
  x5t_s256: Option<String>,
  /// Type.
  ///
  /// [More Info](https://tools.ietf.org/html/rfc7515#section-4.1.9)
  #[serde(skip_serializing_if = "Option::is_none")]
  typ: Option<String>,
  /// Content Type.
  ///
  /// [More Info](https://tools.ietf.org/html/rfc7515#section-4.1.10)
  #[serde(skip_serializing_if = "Option::is_none")]
  cty: Option<String>,
  /// Application members, preserved verbatim.
  #[serde(flatten)]
  custom: Map<String, Value>,
}

impl JwsHeader {
  /// Creates a new empty `JwsHeader`.
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns the value for the algorithm claim (alg).
  pub fn alg(&self) -> Option<JwsAlgorithm> {
    self.alg
  }

  /// Sets a value for the algorithm claim (alg).
  pub fn set_alg(&mut self, value: impl Into<JwsAlgorithm>) {
    self.alg = Some(value.into());
  }

  /// Returns the value of the compression claim (zip).
  pub fn zip(&self) -> Option<&str> {
    self.zip.as_deref()
  }

  /// Sets a value for the compression claim (zip).
  pub fn set_zip(&mut self, value: impl Into<String>) {
    self.zip = Some(value.into());
  }

  /// Returns the value of the JWK Set URL claim (jku).
  pub fn jku(&self) -> Option<&Url> {
    self.jku.as_ref()
  }

  /// Sets a value for the JWK Set URL claim (jku).
  pub fn set_jku(&mut self, value: Url) {
    self.jku = Some(value);
  }

  /// Returns the value of the JWK claim (jwk).
  pub fn jwk(&self) -> Option<&Jwk> {
    self.jwk.as_ref()
  }

  /// Sets a value for the JWK claim (jwk).
  pub fn set_jwk(&mut self, value: Jwk) {
    self.jwk = Some(value);
  }

  /// Returns the value of the key ID claim (kid).
  pub fn kid(&self) -> Option<&str> {
    self.kid.as_deref()
  }

  /// Sets a value for the key ID claim (kid).
  pub fn set_kid(&mut self, value: impl Into<String>) {
    self.kid = Some(value.into());
  }

  /// Returns the value of the X.509 URL claim (x5u).
  pub fn x5u(&self) -> Option<&Url> {
    self.x5u.as_ref()
  }

  /// Sets a value for the X.509 URL claim (x5u).
  pub fn set_x5u(&mut self, value: Url) {
    self.x5u = Some(value);
  }

  /// Returns the value of the X.509 certificate chain claim (x5c).
  pub fn x5c(&self) -> Option<&[String]> {
    self.x5c.as_deref()
  }

  /// Sets values for the X.509 certificate chain claim (x5c).
  pub fn set_x5c(&mut self, value: impl IntoIterator<Item = impl Into<String>>) {
    self.x5c = Some(value.into_iter().map(Into::into).collect());
  }

  /// Returns the value of the X.509 certificate SHA-1 thumbprint claim
  /// (x5t).
  pub fn x5t(&self) -> Option<&str> {
    self.x5t.as_deref()
  }

  /// Sets a value for the X.509 certificate SHA-1 thumbprint claim (x5t).
  pub fn set_x5t(&mut self, value: impl Into<String>) {
    self.x5t = Some(value.into());
  }

  /// Returns the value of the X.509 certificate SHA-256 thumbprint claim
  /// (x5t#S256).
  pub fn x5t_s256(&self) -> Option<&str> {
    self.x5t_s256.as_deref()
  }

  /// Sets a value for the X.509 certificate SHA-256 thumbprint claim
  /// (x5t#S256).
  pub fn set_x5t_s256(&mut self, value: impl Into<String>) {
    self.x5t_s256 = Some(value.into());
  }

  /// Returns the value of the token type claim (typ).
  pub fn typ(&self) -> Option<&str> {
    self.typ.as_deref()
  }

  /// Sets a value for the token type claim (typ).
  pub fn set_typ(&mut self, value: impl Into<String>) {
    self.typ = Some(value.into());
  }

  /// Returns the value of the content type claim (cty).
  pub fn cty(&self) -> Option<&str> {
    self.cty.as_deref()
  }

  /// Sets a value for the content type claim (cty).
  pub fn set_cty(&mut self, value: impl Into<String>) {
    self.cty = Some(value.into());
  }

  /// Returns the value of an application claim.
  pub fn claim(&self, name: &str) -> Option<&Value> {
    self.custom.get(name)
  }

  /// Sets the value of a claim by name.
  ///
  /// Recognized members are routed to their typed fields and validated;
  /// everything else lands among the application members.
  pub fn set_claim(&mut self, name: &str, value: Value) -> Result<()> {
    fn as_str(value: Value) -> Result<String> {
      match value {
        Value::String(string) => Ok(string),
        _ => Err(Error::BadInput("expected a string claim")),
      }
    }

    fn as_url(value: Value) -> Result<Url> {
      as_str(value).and_then(|string| Url::parse(&string).map_err(|_| Error::BadInput("invalid URL claim")))
    }

    match name {
      "alg" => {
        self.alg = Some(
          as_str(value)?
            .parse()
            .map_err(|_| Error::BadInput("unrecognized algorithm"))?,
        );
      }
      "zip" => self.zip = Some(as_str(value)?),
      "jku" => self.jku = Some(as_url(value)?),
      "jwk" => self.jwk = Some(Jwk::from_json_value(value).map_err(|_| Error::BadInput("malformed `jwk` claim"))?),
      "kid" => self.kid = Some(as_str(value)?),
      "x5u" => self.x5u = Some(as_url(value)?),
      "x5c" => {
        self.x5c = Some(serde_json::from_value(value).map_err(|_| Error::BadInput("malformed `x5c` claim"))?);
      }
      "x5t" => self.x5t = Some(as_str(value)?),
      "x5t#S256" => self.x5t_s256 = Some(as_str(value)?),
      "typ" => self.typ = Some(as_str(value)?),
      "cty" => self.cty = Some(as_str(value)?),
      _ => {
        self.custom.insert(name.to_owned(), value);
      }
    }
    Ok(())
  }

  /// Returns the header as a JSON object value.
  pub fn to_json_value(&self) -> Result<Value> {
    serde_json::to_value(self).map_err(|_| Error::Internal("header serialization failed"))
  }
}
