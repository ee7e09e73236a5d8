// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Errors produced by the library.

/// Alias for [`core::result::Result`] with [`Error`] as the default error.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All possible errors the library can produce.
///
/// The three domain variants are deliberately distinct so that callers can
/// tell malformed input (do not retry) from an invalid signature (other keys
/// may still verify) from a key that cannot be used for the operation at all.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
  /// Structurally malformed input: invalid base64, invalid JSON, a wrong
  /// segment count or a missing required member.
  #[error("bad input: {0}")]
  BadInput(&'static str),
  /// A key that cannot serve the requested operation: unknown `kty` or
  /// `alg`, missing or malformed parameters, or a kind/privacy mismatch
  /// between the key and the algorithm.
  #[error("invalid key: {0}")]
  InvalidKey(&'static str),
  /// The signature bytes do not verify against the signing input and key.
  #[error("invalid signature")]
  InvalidSignature,
  /// An unexpected failure inside an underlying cryptographic provider.
  #[error("internal error: {0}")]
  Internal(&'static str),
}
