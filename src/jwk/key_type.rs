// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use core::fmt::Display;
use core::fmt::Formatter;

use crate::error::Error;
use crate::error::Result;

/// Supported types for the JSON Web Key `kty` property.
///
/// [More Info](https://www.iana.org/assignments/jose/jose.xhtml#web-key-types)
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub enum JwkType {
  /// Elliptic Curve.
  #[serde(rename = "EC")]
  Ec,
  /// RSA.
  #[serde(rename = "RSA")]
  Rsa,
  /// Octet sequence.
  #[serde(rename = "oct")]
  Oct,
  /// Octet string key pairs.
  #[serde(rename = "OKP")]
  Okp,
}

impl JwkType {
  /// Returns the JWK "kty" as a `str` slice.
  pub const fn name(self) -> &'static str {
    match self {
      Self::Ec => "EC",
      Self::Rsa => "RSA",
      Self::Oct => "oct",
      Self::Okp => "OKP",
    }
  }

  /// Parses a JWK "kty" property value.
  pub fn parse(string: &str) -> Result<Self> {
    match string {
      "EC" => Ok(Self::Ec),
      "RSA" => Ok(Self::Rsa),
      "oct" => Ok(Self::Oct),
      "OKP" => Ok(Self::Okp),
      _ => Err(Error::InvalidKey("unknown `kty` value")),
    }
  }
}

impl Display for JwkType {
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    f.write_str(self.name())
  }
}

/// Supported values for the JSON Web Key `use` property.
///
/// [More Info](https://www.iana.org/assignments/jose/jose.xhtml#web-key-use)
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub enum JwkUse {
  /// Digital Signature or MAC.
  #[serde(rename = "sig")]
  Signature,
  /// Encryption.
  #[serde(rename = "enc")]
  Encryption,
}

impl JwkUse {
  /// Returns the JWK "use" as a `str` slice.
  pub const fn name(self) -> &'static str {
    match self {
      Self::Signature => "sig",
      Self::Encryption => "enc",
    }
  }
}

impl Display for JwkUse {
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    f.write_str(self.name())
  }
}

/// Supported values for the JSON Web Key `key_ops` property.
///
/// [More Info](https://www.iana.org/assignments/jose/jose.xhtml#web-key-operations)
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub enum JwkOperation {
  /// Compute digital signature or MAC.
  #[serde(rename = "sign")]
  Sign,
  /// Verify digital signature or MAC.
  #[serde(rename = "verify")]
  Verify,
  /// Encrypt content.
  #[serde(rename = "encrypt")]
  Encrypt,
  /// Decrypt content and validate decryption.
  #[serde(rename = "decrypt")]
  Decrypt,
  /// Encrypt key.
  #[serde(rename = "wrapKey")]
  WrapKey,
  /// Decrypt key and validate decryption.
  #[serde(rename = "unwrapKey")]
  UnwrapKey,
  /// Derive key.
  #[serde(rename = "deriveKey")]
  DeriveKey,
  /// Derive bits not to be used as a key.
  #[serde(rename = "deriveBits")]
  DeriveBits,
}
