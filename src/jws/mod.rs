// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! JSON Web Signatures ([JWS](https://tools.ietf.org/html/rfc7515)).

mod algorithm;
mod flags;
mod format;
mod header;
#[allow(clippy::module_inception)]
mod jws;

pub use self::algorithm::JwsAlgorithm;
pub use self::flags::ParseFlags;
pub use self::format::JwsFormat;
pub use self::header::JwsHeader;
pub use self::jws::Jws;
pub use self::jws::JwsParser;
