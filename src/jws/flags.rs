// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use core::ops::BitOr;
use core::ops::BitOrAssign;

/// A bitmask gating the side effects of header import during parsing.
///
/// Each `HEADER_*` flag permits one key-hint member of the protected header
/// to populate the public key set; `UNSIGNED` permits `"alg": "none"`.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct ParseFlags(u32);

impl ParseFlags {
  /// No side effects; key hints in the header are ignored.
  pub const NONE: Self = Self(0);
  /// Fetch and append the key set referenced by `jku`.
  pub const HEADER_JKU: Self = Self(1);
  /// Import an inline public `jwk`.
  pub const HEADER_JWK: Self = Self(1 << 1);
  /// Fetch and import the certificate referenced by `x5u`.
  pub const HEADER_X5U: Self = Self(1 << 2);
  /// Import the leaf certificate of an inline `x5c` chain.
  pub const HEADER_X5C: Self = Self(1 << 3);
  /// Accept tokens with `"alg": "none"`.
  pub const UNSIGNED: Self = Self(1 << 4);
  /// All header-import side effects, without `UNSIGNED`.
  pub const HEADER_ALL: Self = Self(Self::HEADER_JKU.0 | Self::HEADER_JWK.0 | Self::HEADER_X5U.0 | Self::HEADER_X5C.0);
  /// Everything, including `UNSIGNED`.
  pub const ALL: Self = Self(Self::HEADER_ALL.0 | Self::UNSIGNED.0);

  /// Returns `true` if every flag in `other` is set in `self`.
  pub const fn contains(self, other: Self) -> bool {
    self.0 & other.0 == other.0
  }
}

impl BitOr for ParseFlags {
  type Output = Self;

  fn bitor(self, rhs: Self) -> Self::Output {
    Self(self.0 | rhs.0)
  }
}

impl BitOrAssign for ParseFlags {
  fn bitor_assign(&mut self, rhs: Self) {
    self.0 |= rhs.0;
  }
}
