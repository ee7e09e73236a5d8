// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use core::ops::Index;
use core::slice::Iter;

use url::Url;

use crate::error::Error;
use crate::error::Result;
use crate::jwk::FetchOptions;
use crate::jwk::Jwk;
use crate::jwk::RemoteFetcher;

/// An ordered set of JSON Web Keys.
///
/// [More Info](https://tools.ietf.org/html/rfc7517#section-5)
///
/// Insertion order is preserved; `kid` lookup returns the first match.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct JwkSet {
  keys: Vec<Jwk>,
}

impl JwkSet {
  /// Creates a new empty `JwkSet`.
  pub const fn new() -> Self {
    Self { keys: Vec::new() }
  }

  /// Parses a `JwkSet` from its JSON text representation.
  pub fn from_json(json: &str) -> Result<Self> {
    serde_json::from_str(json).map_err(|_| Error::InvalidKey("malformed JWK set"))
  }

  /// Imports a `JwkSet` from a remote location, the `jku` path.
  ///
  /// Fails with [`Error::InvalidKey`] when `options.ignore_remote` forbids
  /// the fetch.
  pub fn from_url(url: &Url, fetcher: &dyn RemoteFetcher, options: FetchOptions) -> Result<Self> {
    if options.ignore_remote {
      return Err(Error::InvalidKey("remote key fetch refused"));
    }
    let data: Vec<u8> = fetcher.fetch(url, options)?;
    let json: &str = core::str::from_utf8(&data).map_err(|_| Error::InvalidKey("malformed JWK set"))?;
    Self::from_json(json)
  }

  /// Returns the number of keys in the set.
  pub fn len(&self) -> usize {
    self.keys.len()
  }

  /// Returns `true` if the set holds no keys.
  pub fn is_empty(&self) -> bool {
    self.keys.is_empty()
  }

  /// Returns the key at `index`, if any.
  pub fn get(&self, index: usize) -> Option<&Jwk> {
    self.keys.get(index)
  }

  /// Returns the first key with a matching key id, if any.
  pub fn get_kid(&self, kid: &str) -> Option<&Jwk> {
    self.keys.iter().find(|key| key.kid() == Some(kid))
  }

  /// Appends `key` to the set.
  pub fn add(&mut self, key: Jwk) {
    self.keys.push(key);
  }

  /// Returns an iterator over the keys in insertion order.
  pub fn iter(&self) -> Iter<'_, Jwk> {
    self.keys.iter()
  }
}

impl Index<usize> for JwkSet {
  type Output = Jwk;

  fn index(&self, index: usize) -> &Self::Output {
    &self.keys[index]
  }
}

impl<'a> IntoIterator for &'a JwkSet {
  type Item = &'a Jwk;
  type IntoIter = Iter<'a, Jwk>;

  fn into_iter(self) -> Self::IntoIter {
    self.keys.iter()
  }
}

impl Extend<Jwk> for JwkSet {
  fn extend<T: IntoIterator<Item = Jwk>>(&mut self, iter: T) {
    self.keys.extend(iter);
  }
}

impl FromIterator<Jwk> for JwkSet {
  fn from_iter<T: IntoIterator<Item = Jwk>>(iter: T) -> Self {
    Self {
      keys: iter.into_iter().collect(),
    }
  }
}
