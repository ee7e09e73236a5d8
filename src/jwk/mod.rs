// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! JSON Web Keys ([JWK](https://tools.ietf.org/html/rfc7517)).

mod curve;
mod fetch;
#[allow(clippy::module_inception)]
mod jwk;
mod jwk_set;
mod key_params;
mod key_type;
mod pem;

pub use self::curve::EcCurve;
pub use self::curve::EcxCurve;
pub use self::curve::EdCurve;
pub use self::fetch::FetchOptions;
pub use self::fetch::RemoteFetcher;
pub use self::jwk::Jwk;
pub use self::jwk_set::JwkSet;
pub use self::key_params::JwkParams;
pub use self::key_params::JwkParamsEc;
pub use self::key_params::JwkParamsOct;
pub use self::key_params::JwkParamsOkp;
pub use self::key_params::JwkParamsRsa;
pub use self::key_type::JwkOperation;
pub use self::key_type::JwkType;
pub use self::key_type::JwkUse;
