// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use url::Url;

use crate::error::Result;

/// Options applied to a remote key fetch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FetchOptions {
  /// Skip TLS certificate validation on the fetched host.
  pub ignore_server_certificate: bool,
  /// Refuse any network fetch; operations that need remote material fail.
  pub ignore_remote: bool,
}

/// A capability for fetching remote key material (`jku` and `x5u` headers).
///
/// The library never performs network I/O itself; callers inject an
/// implementation of this trait where remote lookups are wanted. Fetches are
/// synchronous; cancellation is the implementation's concern (a timeout on
/// the underlying client).
pub trait RemoteFetcher {
  /// Fetches the resource at `url` and returns its raw bytes.
  fn fetch(&self, url: &Url, options: FetchOptions) -> Result<Vec<u8>>;
}
