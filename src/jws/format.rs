// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

/// The serialization format of a JWS.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub enum JwsFormat {
  /// The compact serialization: three base64url segments joined by dots.
  #[default]
  Compact,
  /// The general JSON serialization: multiple signatures over one payload.
  General,
  /// The flattened JSON serialization: a single signature as a JSON object.
  Flatten,
}
