// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use core::fmt::Display;
use core::fmt::Formatter;

use crate::error::Error;
use crate::error::Result;

/// Supported Elliptic Curves.
///
/// [More Info](https://www.iana.org/assignments/jose/jose.xhtml#web-key-elliptic-curve)
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum EcCurve {
  /// P-256 Curve.
  P256,
  /// P-384 Curve.
  P384,
  /// P-521 Curve.
  P521,
}

impl EcCurve {
  /// Returns the JWK "crv" as a `str` slice.
  pub const fn name(self) -> &'static str {
    match self {
      Self::P256 => "P-256",
      Self::P384 => "P-384",
      Self::P521 => "P-521",
    }
  }

  /// Returns the size of a coordinate in bytes.
  ///
  /// Note: 66 for P-521, not 64.
  pub const fn coordinate_len(self) -> usize {
    match self {
      Self::P256 => 32,
      Self::P384 => 48,
      Self::P521 => 66,
    }
  }

  /// Parses a JWK "crv" property value.
  pub fn parse(string: &str) -> Result<Self> {
    match string {
      "P-256" => Ok(Self::P256),
      "P-384" => Ok(Self::P384),
      "P-521" => Ok(Self::P521),
      _ => Err(Error::InvalidKey("unknown EC curve")),
    }
  }
}

impl Display for EcCurve {
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    f.write_str(self.name())
  }
}

/// Supported Edwards-curve signing curves.
///
/// [More Info](https://tools.ietf.org/html/rfc8037)
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum EdCurve {
  /// Ed25519 signature algorithm key pairs.
  Ed25519,
}

impl EdCurve {
  /// Returns the JWK "crv" as a `str` slice.
  pub const fn name(self) -> &'static str {
    match self {
      Self::Ed25519 => "Ed25519",
    }
  }

  /// Returns the size of a public key or secret scalar in bytes.
  pub const fn key_len(self) -> usize {
    match self {
      Self::Ed25519 => 32,
    }
  }

  /// Parses a JWK "crv" property value.
  pub fn parse(string: &str) -> Result<Self> {
    match string {
      "Ed25519" => Ok(Self::Ed25519),
      _ => Err(Error::InvalidKey("unknown Ed curve")),
    }
  }
}

impl Display for EdCurve {
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    f.write_str(self.name())
  }
}

/// Supported Montgomery-curve key-agreement curves.
///
/// [More Info](https://tools.ietf.org/html/rfc8037)
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum EcxCurve {
  /// X25519 function key pairs.
  X25519,
  /// X448 function key pairs.
  X448,
}

impl EcxCurve {
  /// Returns the JWK "crv" as a `str` slice.
  pub const fn name(self) -> &'static str {
    match self {
      Self::X25519 => "X25519",
      Self::X448 => "X448",
    }
  }

  /// Returns the size of a public key or secret scalar in bytes.
  pub const fn key_len(self) -> usize {
    match self {
      Self::X25519 => 32,
      Self::X448 => 56,
    }
  }

  /// Parses a JWK "crv" property value.
  pub fn parse(string: &str) -> Result<Self> {
    match string {
      "X25519" => Ok(Self::X25519),
      "X448" => Ok(Self::X448),
      _ => Err(Error::InvalidKey("unknown Ecx curve")),
    }
  }
}

impl Display for EcxCurve {
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    f.write_str(self.name())
  }
}
