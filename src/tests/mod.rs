// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

pub(crate) mod fixtures;

mod hs256;
mod pem;
mod rfc8037;
mod rs256;
mod unsecured;
mod zip;
