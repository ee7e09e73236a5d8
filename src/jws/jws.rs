// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use serde_json::json;
use serde_json::Value;

use crate::error::Error;
use crate::error::Result;
use crate::jwa;
use crate::jwk::FetchOptions;
use crate::jwk::Jwk;
use crate::jwk::JwkSet;
use crate::jwk::RemoteFetcher;
use crate::jws::JwsAlgorithm;
use crate::jws::JwsFormat;
use crate::jws::JwsHeader;
use crate::jws::ParseFlags;
use crate::jwu;

/// A JSON Web Signature object.
///
/// A `Jws` starts out empty and is populated either by composition (set the
/// payload, the algorithm and the header, add keys, then serialize) or by
/// parsing a compact or JSON serialization through [`JwsParser`].
///
/// The object owns its header, payload, signature, both key sets and the
/// parsed JSON serialization tree; the base64url encodings of the three
/// segments are memoized and every header mutation drops the memo so a later
/// signature is always computed over the current header bytes.
#[derive(Clone, Debug, Default)]
pub struct Jws {
  header: JwsHeader,
  header_b64: Option<String>,
  payload: Vec<u8>,
  payload_b64: Option<String>,
  signature_b64: Option<String>,
  format: JwsFormat,
  jwks_private: JwkSet,
  jwks_public: JwkSet,
  json_serialization: Option<Value>,
}

impl Jws {
  /// Creates a new empty `Jws`.
  pub fn new() -> Self {
    Self::default()
  }

  /// Parses a token with the default flags ([`ParseFlags::HEADER_ALL`]).
  ///
  /// Unsigned tokens (`"alg": "none"`) are rejected.
  pub fn parse(token: &str) -> Result<Self> {
    JwsParser::new().parse(token)
  }

  /// Parses a token, additionally accepting `"alg": "none"`.
  pub fn parse_unsecure(token: &str) -> Result<Self> {
    JwsParser::new().flags(ParseFlags::ALL).parse(token)
  }

  /// Returns the payload bytes.
  pub fn payload(&self) -> &[u8] {
    &self.payload
  }

  /// Sets the payload bytes.
  pub fn set_payload(&mut self, payload: impl Into<Vec<u8>>) {
    self.payload = payload.into();
    self.payload_b64 = None;
  }

  /// Returns the signature algorithm, if one is configured.
  pub fn alg(&self) -> Option<JwsAlgorithm> {
    self.header.alg()
  }

  /// Sets the signature algorithm, writing it into the header.
  pub fn set_alg(&mut self, alg: JwsAlgorithm) {
    self.header.set_alg(alg);
    self.header_b64 = None;
  }

  /// Returns a reference to the protected header.
  pub fn header(&self) -> &JwsHeader {
    &self.header
  }

  /// Returns a mutable reference to the protected header.
  ///
  /// Accessing the header mutably drops the memoized encoding: the next
  /// serialization or verification re-encodes the current header bytes.
  pub fn header_mut(&mut self) -> &mut JwsHeader {
    self.header_b64 = None;
    &mut self.header
  }

  /// Replaces the protected header.
  pub fn set_header(&mut self, header: JwsHeader) {
    self.header = header;
    self.header_b64 = None;
  }

  /// Returns the serialization format the token was parsed from or last
  /// serialized to.
  pub fn format(&self) -> JwsFormat {
    self.format
  }

  /// Returns the key id of the token.
  ///
  /// For flattened tokens this falls back to the `kid` of the unprotected
  /// header.
  pub fn kid(&self) -> Option<&str> {
    if let Some(kid) = self.header.kid() {
      return Some(kid);
    }
    if self.format == JwsFormat::Flatten {
      self
        .json_serialization
        .as_ref()
        .and_then(|value| value.get("header"))
        .and_then(|header| header.get("kid"))
        .and_then(Value::as_str)
    } else {
      None
    }
  }

  /// Returns the base64url-encoded signature, if the token carries one.
  pub fn signature_b64(&self) -> Option<&str> {
    self.signature_b64.as_deref()
  }

  /// Returns the decoded signature bytes, if the token carries a signature.
  pub fn signature(&self) -> Result<Option<Vec<u8>>> {
    self.signature_b64.as_deref().map(jwu::decode_b64).transpose()
  }

  /// Returns the parsed or produced JSON serialization, if any.
  pub fn json_serialization(&self) -> Option<&Value> {
    self.json_serialization.as_ref()
  }

  /// Returns the owned set of signing keys.
  pub fn jwks_private(&self) -> &JwkSet {
    &self.jwks_private
  }

  /// Returns the owned set of verification keys.
  pub fn jwks_public(&self) -> &JwkSet {
    &self.jwks_public
  }

  /// Adds a copy of `jwk` to the signing keys.
  ///
  /// When the object has no algorithm yet and the key's `alg` property names
  /// one, that algorithm is adopted.
  pub fn add_signing_key(&mut self, jwk: &Jwk) {
    self.adopt_alg(jwk);
    self.jwks_private.add(jwk.clone());
  }

  /// Adds a copy of `jwk` to the verification keys.
  pub fn add_verifying_key(&mut self, jwk: &Jwk) {
    self.jwks_public.add(jwk.clone());
  }

  /// Wraps raw bytes as an `oct` key and adds it to both key sets.
  pub fn add_symmetric_key(&mut self, key: impl AsRef<[u8]>) {
    let jwk: Jwk = Jwk::from_symmetric_key(key);
    self.adopt_alg(&jwk);
    self.jwks_private.add(jwk.clone());
    self.jwks_public.add(jwk);
  }

  /// Adds copies of all keys in the given sets.
  pub fn add_jwks(&mut self, private: Option<&JwkSet>, public: Option<&JwkSet>) {
    if let Some(private) = private {
      for jwk in private {
        self.add_signing_key(jwk);
      }
    }
    if let Some(public) = public {
      for jwk in public {
        self.add_verifying_key(jwk);
      }
    }
  }

  /// Serializes the token in the compact form, signing it with the resolved
  /// key.
  ///
  /// The key is the explicit `key` argument if given, else the signing key
  /// matching the header `kid`, else the sole signing key. Unsigned tokens
  /// are refused; use [`Jws::serialize_compact_unsecure`] for those.
  pub fn serialize_compact(&mut self, key: Option<&Jwk>) -> Result<String> {
    if self.alg() == Some(JwsAlgorithm::NONE) {
      return Err(Error::InvalidKey("refusing to serialize an unsigned token"));
    }
    self.serialize_compact_unsecure(key)
  }

  /// Serializes the token in the compact form, allowing `"alg": "none"`.
  ///
  /// An unsigned token serializes as `header.payload.` with an empty third
  /// segment after the trailing dot.
  pub fn serialize_compact_unsecure(&mut self, key: Option<&Jwk>) -> Result<String> {
    let jwk: Option<Jwk> = self.resolve_signing_key(key);
    if let Some(jwk) = jwk.as_ref() {
      self.adopt_alg(jwk);
      self.adopt_kid(jwk);
    }

    let alg: JwsAlgorithm = self.alg().ok_or(Error::InvalidKey("no algorithm configured"))?;
    let header_b64: String = encode_header(&self.header)?;
    let payload_b64: String = self.encode_payload()?;
    let signing_input: String = format!("{header_b64}.{payload_b64}");

    let signature: Vec<u8> = if alg == JwsAlgorithm::NONE {
      Vec::new()
    } else {
      let jwk: Jwk = jwk.ok_or(Error::InvalidKey("no signing key available"))?;
      jwa::sign(alg, &jwk, signing_input.as_bytes())?
    };
    let signature_b64: String = jwu::encode_b64(&signature);

    self.header_b64 = Some(header_b64);
    self.payload_b64 = Some(payload_b64);
    self.signature_b64 = Some(signature_b64.clone());
    self.format = JwsFormat::Compact;

    Ok(format!("{signing_input}.{signature_b64}"))
  }

  /// Serializes the token in a JSON serialization.
  ///
  /// `keys` overrides the owned signing keys when given. The flattened form
  /// signs with a single key; the general form produces one signature per
  /// key, each under its own protected header carrying that key's `alg`.
  pub fn serialize_json(&mut self, keys: Option<&JwkSet>, format: JwsFormat) -> Result<Value> {
    let keys: JwkSet = keys.cloned().unwrap_or_else(|| self.jwks_private.clone());
    if keys.is_empty() {
      return Err(Error::InvalidKey("no signing keys available"));
    }

    match format {
      JwsFormat::Compact => Err(Error::BadInput("the compact form is not a JSON serialization")),
      JwsFormat::Flatten => self.serialize_json_flattened(&keys),
      JwsFormat::General => self.serialize_json_general(&keys),
    }
  }

  /// Serializes the token in a JSON serialization and returns the compact
  /// JSON text.
  pub fn serialize_json_string(&mut self, keys: Option<&JwkSet>, format: JwsFormat) -> Result<String> {
    self.serialize_json(keys, format).map(|value| value.to_string())
  }

  /// Verifies the token's signature.
  ///
  /// The verification key is the explicit `key` argument if given, else the
  /// public key matching the token's `kid`, else the sole public key.
  ///
  /// General tokens are verified by trying each element of `signatures`
  /// against its candidate keys in order; the walk stops at the first
  /// outcome other than [`Error::InvalidSignature`] and the final result is
  /// the last outcome observed.
  pub fn verify(&self, key: Option<&Jwk>) -> Result<()> {
    match self.format {
      JwsFormat::General => self.verify_general(key),
      JwsFormat::Compact | JwsFormat::Flatten => self.verify_single(key),
    }
  }

  fn verify_single(&self, key: Option<&Jwk>) -> Result<()> {
    let signature_b64: &str = self
      .signature_b64
      .as_deref()
      .ok_or(Error::BadInput("missing signature"))?;

    let jwk: Option<Jwk> = if let Some(key) = key {
      Some(key.clone())
    } else if let Some(kid) = self.kid() {
      self.jwks_public.get_kid(kid).cloned()
    } else if self.jwks_public.len() == 1 {
      Some(self.jwks_public[0].clone())
    } else {
      None
    };
    let jwk: Jwk = jwk.ok_or(Error::InvalidKey("no verification key available"))?;

    let alg: JwsAlgorithm = self.alg().ok_or(Error::InvalidKey("no algorithm configured"))?;
    let signing_input: String = format!("{}.{}", self.encoded_header()?, self.encoded_payload()?);
    let signature: Vec<u8> = jwu::decode_b64(signature_b64)?;

    jwa::verify(alg, &jwk, signing_input.as_bytes(), &signature)
  }

  fn verify_general(&self, key: Option<&Jwk>) -> Result<()> {
    let serialization: &Value = self
      .json_serialization
      .as_ref()
      .ok_or(Error::BadInput("not a parsed JSON serialization"))?;
    let payload_b64: &str = self
      .payload_b64
      .as_deref()
      .ok_or(Error::BadInput("missing payload"))?;
    let signatures: &Vec<Value> = serialization
      .get("signatures")
      .and_then(Value::as_array)
      .ok_or(Error::BadInput("missing `signatures` array"))?;

    let mut last: Result<()> = Err(Error::InvalidSignature);

    for element in signatures {
      // The candidate pair stays local; the object's own memo fields are
      // never rebound to the serialization tree.
      let protected_b64: &str = element
        .get("protected")
        .and_then(Value::as_str)
        .ok_or(Error::BadInput("missing `protected` member"))?;
      let signature_b64: &str = element
        .get("signature")
        .and_then(Value::as_str)
        .ok_or(Error::BadInput("missing `signature` member"))?;
      let kid: Option<&str> = element
        .get("header")
        .and_then(|header| header.get("kid"))
        .and_then(Value::as_str);

      let header_bytes: Vec<u8> = jwu::decode_b64(protected_b64)?;
      let header: JwsHeader =
        serde_json::from_slice(&header_bytes).map_err(|_| Error::BadInput("invalid protected header"))?;
      let signature: Vec<u8> = jwu::decode_b64(signature_b64)?;
      let signing_input: String = format!("{protected_b64}.{payload_b64}");

      last = match header.alg() {
        None => Err(Error::InvalidKey("no algorithm configured")),
        Some(alg) => {
          if let Some(key) = key {
            jwa::verify(alg, key, signing_input.as_bytes(), &signature)
          } else if let Some(kid) = kid {
            match self.jwks_public.get_kid(kid) {
              Some(jwk) => jwa::verify(alg, jwk, signing_input.as_bytes(), &signature),
              None => Err(Error::InvalidSignature),
            }
          } else {
            let mut outcome: Result<()> = Err(Error::InvalidSignature);
            for jwk in &self.jwks_public {
              outcome = jwa::verify(alg, jwk, signing_input.as_bytes(), &signature);
              if !matches!(outcome, Err(Error::InvalidSignature)) {
                break;
              }
            }
            outcome
          }
        }
      };

      if !matches!(last, Err(Error::InvalidSignature)) {
        break;
      }
    }

    last
  }

  fn serialize_json_flattened(&mut self, keys: &JwkSet) -> Result<Value> {
    let jwk: Jwk = if let Some(kid) = self.header.kid() {
      keys
        .get_kid(kid)
        .cloned()
        .ok_or(Error::InvalidKey("no signing key available"))?
    } else {
      keys[0].clone()
    };
    self.adopt_alg(&jwk);
    self.adopt_kid(&jwk);

    let alg: JwsAlgorithm = self.alg().ok_or(Error::InvalidKey("no algorithm configured"))?;
    let header_b64: String = encode_header(&self.header)?;
    let payload_b64: String = self.encode_payload()?;
    let signing_input: String = format!("{header_b64}.{payload_b64}");

    let signature: Vec<u8> = if alg == JwsAlgorithm::NONE {
      Vec::new()
    } else {
      jwa::sign(alg, &jwk, signing_input.as_bytes())?
    };
    let signature_b64: String = jwu::encode_b64(&signature);

    let mut object: Value = json!({
      "payload": payload_b64,
      "protected": header_b64,
      "signature": signature_b64,
    });
    if let Some(kid) = self.header.kid() {
      object["header"] = json!({ "kid": kid });
    }

    self.header_b64 = Some(header_b64);
    self.payload_b64 = Some(payload_b64);
    self.signature_b64 = Some(signature_b64);
    self.format = JwsFormat::Flatten;
    self.json_serialization = Some(object.clone());

    Ok(object)
  }

  fn serialize_json_general(&mut self, keys: &JwkSet) -> Result<Value> {
    let payload_b64: String = self.encode_payload()?;
    self.payload_b64 = Some(payload_b64.clone());

    let mut signatures: Vec<Value> = Vec::new();
    for jwk in keys {
      let alg: Option<JwsAlgorithm> = jwk
        .alg()
        .and_then(|name| name.parse().ok())
        .filter(|alg| *alg != JwsAlgorithm::NONE);
      let Some(alg) = alg else {
        tracing::warn!("skipping signing key without a usable `alg` property");
        continue;
      };

      // Every signature gets its own protected header with that key's alg.
      self.set_alg(alg);
      let header_b64: String = encode_header(&self.header)?;
      let signing_input: String = format!("{header_b64}.{payload_b64}");

      let signature: Vec<u8> = match jwa::sign(alg, jwk, signing_input.as_bytes()) {
        Ok(signature) => signature,
        Err(error) => {
          tracing::warn!(%error, "skipping signing key");
          continue;
        }
      };

      let mut element: Value = json!({
        "protected": header_b64,
        "signature": jwu::encode_b64(&signature),
      });
      if let Some(kid) = jwk.kid() {
        element["header"] = json!({ "kid": kid });
      }
      signatures.push(element);
    }

    let object: Value = json!({
      "payload": payload_b64,
      "signatures": signatures,
    });

    self.format = JwsFormat::General;
    self.json_serialization = Some(object.clone());

    Ok(object)
  }

  fn resolve_signing_key(&self, explicit: Option<&Jwk>) -> Option<Jwk> {
    if let Some(key) = explicit {
      return Some(key.clone());
    }
    if let Some(kid) = self.header.kid() {
      return self.jwks_private.get_kid(kid).cloned();
    }
    if self.jwks_private.len() == 1 {
      return Some(self.jwks_private[0].clone());
    }
    None
  }

  fn adopt_alg(&mut self, jwk: &Jwk) {
    if self.alg().is_some() {
      return;
    }
    if let Some(alg) = jwk.alg().and_then(|name| name.parse::<JwsAlgorithm>().ok()) {
      if alg != JwsAlgorithm::NONE {
        self.set_alg(alg);
      }
    }
  }

  fn adopt_kid(&mut self, jwk: &Jwk) {
    if self.header.kid().is_none() {
      if let Some(kid) = jwk.kid() {
        let kid: String = kid.to_owned();
        self.header.set_kid(kid);
        self.header_b64 = None;
      }
    }
  }

  fn encoded_header(&self) -> Result<String> {
    match self.header_b64.as_deref() {
      Some(cached) => Ok(cached.to_owned()),
      None => encode_header(&self.header),
    }
  }

  fn encoded_payload(&self) -> Result<String> {
    match self.payload_b64.as_deref() {
      Some(cached) => Ok(cached.to_owned()),
      None => self.encode_payload(),
    }
  }

  fn encode_payload(&self) -> Result<String> {
    if self.payload.is_empty() {
      return Err(Error::BadInput("empty payload"));
    }
    if self.header.zip() == Some("DEF") {
      Ok(jwu::encode_b64(jwu::deflate_compress(&self.payload)))
    } else {
      Ok(jwu::encode_b64(&self.payload))
    }
  }
}

/// A configurable parser for JWS tokens.
///
/// The flags gate which key hints of the protected header populate the
/// token's public key set; remote hints (`jku`, `x5u`) additionally need an
/// injected [`RemoteFetcher`] and are skipped otherwise. Fetch failures are
/// logged and ignored so that an unreachable key server never makes a token
/// unparseable.
pub struct JwsParser<'a> {
  flags: ParseFlags,
  fetch_options: FetchOptions,
  fetcher: Option<&'a dyn RemoteFetcher>,
}

impl<'a> JwsParser<'a> {
  /// Creates a new `JwsParser` with [`ParseFlags::HEADER_ALL`] and no
  /// fetcher.
  pub fn new() -> Self {
    Self {
      flags: ParseFlags::HEADER_ALL,
      fetch_options: FetchOptions::default(),
      fetcher: None,
    }
  }

  /// Sets the parse flags.
  pub fn flags(mut self, flags: ParseFlags) -> Self {
    self.flags = flags;
    self
  }

  /// Sets the options applied to remote fetches.
  pub fn fetch_options(mut self, options: FetchOptions) -> Self {
    self.fetch_options = options;
    self
  }

  /// Injects the capability used to resolve `jku` and `x5u` hints.
  pub fn fetcher(mut self, fetcher: &'a dyn RemoteFetcher) -> Self {
    self.fetcher = Some(fetcher);
    self
  }

  /// Parses a token, dispatching on its shape.
  ///
  /// Input starting with `ey` (after leading whitespace) is parsed as the
  /// compact serialization; input starting with `{` as a JSON
  /// serialization.
  pub fn parse(&self, token: &str) -> Result<Jws> {
    let token: &str = token.trim_start();
    if token.starts_with("ey") {
      self.parse_compact(token)
    } else if token.starts_with('{') {
      self.parse_json(token)
    } else {
      Err(Error::BadInput("unrecognized token shape"))
    }
  }

  /// Parses a compact serialization.
  pub fn parse_compact(&self, token: &str) -> Result<Jws> {
    let token: &str = token.trim_start();
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 2 && segments.len() != 3 {
      return Err(Error::BadInput("expected two or three segments"));
    }

    let header_bytes: Vec<u8> = jwu::decode_b64(segments[0])?;
    let payload_bytes: Vec<u8> = jwu::decode_b64(segments[1])?;
    let header: JwsHeader =
      serde_json::from_slice(&header_bytes).map_err(|_| Error::BadInput("invalid protected header"))?;

    let mut jws: Jws = Jws::new();
    self.extract_header(&header, &mut jws.jwks_public)?;

    if !self.flags.contains(ParseFlags::UNSIGNED) && header.alg() == Some(JwsAlgorithm::NONE) {
      return Err(Error::BadInput("unsigned token rejected"));
    }

    jws.payload = if header.zip() == Some("DEF") {
      jwu::deflate_decompress(&payload_bytes)?
    } else {
      payload_bytes
    };

    let signature_b64: Option<&str> = segments.get(2).copied();
    if header.alg() != Some(JwsAlgorithm::NONE) && signature_b64.unwrap_or_default().is_empty() {
      return Err(Error::BadInput("missing signature"));
    }

    jws.header = header;
    jws.header_b64 = Some(segments[0].to_owned());
    jws.payload_b64 = Some(segments[1].to_owned());
    jws.signature_b64 = signature_b64.map(ToOwned::to_owned);
    jws.format = JwsFormat::Compact;

    Ok(jws)
  }

  /// Parses a JSON serialization, flattened or general.
  pub fn parse_json(&self, json: &str) -> Result<Jws> {
    let value: Value = serde_json::from_str(json).map_err(|_| Error::BadInput("invalid JSON"))?;
    self.parse_json_value(&value)
  }

  /// Parses a JSON serialization from a parsed JSON value.
  pub fn parse_json_value(&self, value: &Value) -> Result<Jws> {
    if !value.is_object() {
      return Err(Error::BadInput("expected a JSON object"));
    }
    let payload_b64: &str = value
      .get("payload")
      .and_then(Value::as_str)
      .filter(|payload| !payload.is_empty())
      .ok_or(Error::BadInput("missing `payload` member"))?;

    let protected: Option<&str> = value
      .get("protected")
      .and_then(Value::as_str)
      .filter(|protected| !protected.is_empty());

    if let Some(protected) = protected {
      self.parse_json_flattened(value, payload_b64, protected)
    } else {
      self.parse_json_general(value, payload_b64)
    }
  }

  fn parse_json_flattened(&self, value: &Value, payload_b64: &str, protected_b64: &str) -> Result<Jws> {
    let signature_b64: &str = value
      .get("signature")
      .and_then(Value::as_str)
      .filter(|signature| !signature.is_empty())
      .ok_or(Error::BadInput("missing `signature` member"))?;
    jwu::decode_b64(signature_b64)?;

    let header_bytes: Vec<u8> = jwu::decode_b64(protected_b64)?;
    let header: JwsHeader =
      serde_json::from_slice(&header_bytes).map_err(|_| Error::BadInput("invalid protected header"))?;

    let mut jws: Jws = Jws::new();
    self.extract_header(&header, &mut jws.jwks_public)?;

    match value.get("header") {
      None => {}
      Some(unprotected) if unprotected.is_object() => {
        let unprotected: JwsHeader = serde_json::from_value(unprotected.clone())
          .map_err(|_| Error::BadInput("invalid unprotected header"))?;
        self.extract_header(&unprotected, &mut jws.jwks_public)?;
      }
      Some(_) => return Err(Error::BadInput("the unprotected header must be a JSON object")),
    }

    jws.payload = jwu::decode_b64(payload_b64)?;
    jws.header = header;
    jws.header_b64 = Some(protected_b64.to_owned());
    jws.payload_b64 = Some(payload_b64.to_owned());
    jws.signature_b64 = Some(signature_b64.to_owned());
    jws.format = JwsFormat::Flatten;
    jws.json_serialization = Some(value.clone());

    Ok(jws)
  }

  fn parse_json_general(&self, value: &Value, payload_b64: &str) -> Result<Jws> {
    let signatures: &Vec<Value> = value
      .get("signatures")
      .and_then(Value::as_array)
      .filter(|signatures| !signatures.is_empty())
      .ok_or(Error::BadInput("missing `signatures` array"))?;

    for element in signatures {
      let protected: &str = element
        .get("protected")
        .and_then(Value::as_str)
        .filter(|protected| !protected.is_empty())
        .ok_or(Error::BadInput("missing `protected` member"))?;
      jwu::decode_b64(protected)?;

      let signature: &str = element
        .get("signature")
        .and_then(Value::as_str)
        .filter(|signature| !signature.is_empty())
        .ok_or(Error::BadInput("missing `signature` member"))?;
      jwu::decode_b64(signature)?;

      if let Some(header) = element.get("header") {
        if !header.is_object() {
          return Err(Error::BadInput("the unprotected header must be a JSON object"));
        }
      }
    }

    let mut jws: Jws = Jws::new();
    jws.payload = jwu::decode_b64(payload_b64)?;
    jws.payload_b64 = Some(payload_b64.to_owned());
    jws.format = JwsFormat::General;
    jws.json_serialization = Some(value.clone());

    Ok(jws)
  }

  fn extract_header(&self, header: &JwsHeader, keys: &mut JwkSet) -> Result<()> {
    if self.flags.contains(ParseFlags::HEADER_JKU) {
      if let Some(jku) = header.jku() {
        match self.fetcher {
          Some(fetcher) if !self.fetch_options.ignore_remote => {
            match JwkSet::from_url(jku, fetcher, self.fetch_options) {
              Ok(set) => keys.extend(set.iter().cloned()),
              Err(_) => tracing::warn!(url = %jku, "failed to load key set from `jku`"),
            }
          }
          _ => tracing::debug!(url = %jku, "remote fetches disabled, ignoring `jku`"),
        }
      }
    }

    if self.flags.contains(ParseFlags::HEADER_JWK) {
      if let Some(jwk) = header.jwk() {
        if !jwk.is_public() {
          return Err(Error::BadInput("the header `jwk` must be a public key"));
        }
        keys.add(jwk.clone());
      }
    }

    if self.flags.contains(ParseFlags::HEADER_X5U) {
      if let Some(x5u) = header.x5u() {
        match self.fetcher {
          Some(fetcher) if !self.fetch_options.ignore_remote => match fetcher.fetch(x5u, self.fetch_options) {
            Ok(data) => {
              let mut jwk: Jwk = Jwk::from_pem(&data).map_err(|_| Error::BadInput("invalid `x5u` certificate"))?;
              jwk.set_x5u(x5u.clone());
              keys.add(jwk);
            }
            Err(_) => tracing::warn!(url = %x5u, "failed to fetch `x5u` certificate"),
          },
          _ => tracing::debug!(url = %x5u, "remote fetches disabled, ignoring `x5u`"),
        }
      }
    }

    if self.flags.contains(ParseFlags::HEADER_X5C) {
      if let Some(chain) = header.x5c() {
        let jwk: Jwk = Jwk::from_x5c(chain).map_err(|_| Error::BadInput("invalid `x5c` certificate"))?;
        keys.add(jwk);
      }
    }

    Ok(())
  }
}

impl Default for JwsParser<'_> {
  fn default() -> Self {
    Self::new()
  }
}

fn encode_header(header: &JwsHeader) -> Result<String> {
  serde_json::to_vec(header)
    .map(jwu::encode_b64)
    .map_err(|_| Error::Internal("header serialization failed"))
}
