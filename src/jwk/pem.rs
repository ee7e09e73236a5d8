// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! PEM, DER and X.509 bridges for [`Jwk`].

use num_bigint_dig::ModInverse;
use pem_rfc7468::LineEnding;
use pkcs8::der::asn1::BitStringRef;
use pkcs8::der::asn1::OctetStringRef;
use pkcs8::der::Decode;
use pkcs8::der::Encode;
use pkcs8::spki::AlgorithmIdentifierRef;
use pkcs8::spki::DecodePublicKey;
use pkcs8::spki::EncodePublicKey;
use pkcs8::spki::SubjectPublicKeyInfoRef;
use pkcs8::DecodePrivateKey;
use pkcs8::EncodePrivateKey;
use pkcs8::ObjectIdentifier;
use pkcs8::PrivateKeyInfo;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::traits::PrivateKeyParts;
use rsa::traits::PublicKeyParts;
use rsa::BigUint;
use rsa::RsaPrivateKey;
use rsa::RsaPublicKey;
use zeroize::Zeroizing;

use crate::error::Error;
use crate::error::Result;
use crate::jwa;
use crate::jwk::EcCurve;
use crate::jwk::EcxCurve;
use crate::jwk::EdCurve;
use crate::jwk::Jwk;
use crate::jwk::JwkParams;
use crate::jwk::JwkParamsEc;
use crate::jwk::JwkParamsOkp;
use crate::jwk::JwkParamsRsa;
use crate::jwu;

const OID_RSA_ENCRYPTION: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");
const OID_EC_PUBLIC_KEY: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");
const OID_SECP256R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");
const OID_SECP384R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.34");
const OID_SECP521R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.35");
const OID_X25519: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.110");
const OID_X448: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.111");
const OID_ED25519: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.112");

impl Jwk {
  /// Imports a key from PEM text.
  ///
  /// The PEM label selects the import path and distinguishes public from
  /// private keys; `PUBLIC KEY`, `PRIVATE KEY`, `RSA PUBLIC KEY`,
  /// `RSA PRIVATE KEY`, `EC PRIVATE KEY` and `CERTIFICATE` are recognized.
  pub fn from_pem(data: &[u8]) -> Result<Self> {
    let (label, der): (&str, Vec<u8>) =
      pem_rfc7468::decode_vec(data).map_err(|_| Error::InvalidKey("invalid PEM document"))?;
    match label {
      "PUBLIC KEY" => Self::from_public_key_der(&der),
      "PRIVATE KEY" => Self::from_private_key_der(&der),
      "RSA PUBLIC KEY" => {
        let key: RsaPublicKey =
          RsaPublicKey::from_pkcs1_der(&der).map_err(|_| Error::InvalidKey("invalid PKCS#1 public key"))?;
        Self::from_params(rsa_public_params(&key))
      }
      "RSA PRIVATE KEY" => {
        let key: RsaPrivateKey =
          RsaPrivateKey::from_pkcs1_der(&der).map_err(|_| Error::InvalidKey("invalid PKCS#1 private key"))?;
        Self::from_params(rsa_private_params(&key)?)
      }
      "EC PRIVATE KEY" => Self::from_sec1_der(&der),
      "CERTIFICATE" => Self::from_certificate_der(&der),
      _ => Err(Error::InvalidKey("unsupported PEM label")),
    }
  }

  /// Imports a public key from a DER SubjectPublicKeyInfo structure.
  pub fn from_public_key_der(der: &[u8]) -> Result<Self> {
    let spki: SubjectPublicKeyInfoRef<'_> =
      SubjectPublicKeyInfoRef::try_from(der).map_err(|_| Error::InvalidKey("invalid SubjectPublicKeyInfo"))?;
    let key_bytes: &[u8] = spki
      .subject_public_key
      .as_bytes()
      .ok_or(Error::InvalidKey("invalid public key bits"))?;

    let oid: ObjectIdentifier = spki.algorithm.oid;
    if oid == OID_RSA_ENCRYPTION {
      let key: RsaPublicKey =
        RsaPublicKey::from_public_key_der(der).map_err(|_| Error::InvalidKey("invalid RSA public key"))?;
      Self::from_params(rsa_public_params(&key))
    } else if oid == OID_EC_PUBLIC_KEY {
      let curve: EcCurve = ec_curve_from_oid(
        spki
          .algorithm
          .parameters_oid()
          .map_err(|_| Error::InvalidKey("missing EC curve parameters"))?,
      )?;
      Self::from_params(ec_public_params(curve, key_bytes)?)
    } else if oid == OID_ED25519 {
      Self::from_params(JwkParamsOkp {
        crv: EdCurve::Ed25519.name().to_owned(),
        x: jwu::encode_b64(key_bytes),
        d: None,
      })
    } else if oid == OID_X25519 || oid == OID_X448 {
      let curve: EcxCurve = if oid == OID_X25519 { EcxCurve::X25519 } else { EcxCurve::X448 };
      Self::from_params(JwkParamsOkp {
        crv: curve.name().to_owned(),
        x: jwu::encode_b64(key_bytes),
        d: None,
      })
    } else {
      Err(Error::InvalidKey("unsupported public key algorithm"))
    }
  }

  /// Imports a private key from a DER PKCS#8 structure.
  pub fn from_private_key_der(der: &[u8]) -> Result<Self> {
    let pki: PrivateKeyInfo<'_> =
      PrivateKeyInfo::try_from(der).map_err(|_| Error::InvalidKey("invalid PKCS#8 document"))?;

    let oid: ObjectIdentifier = pki.algorithm.oid;
    if oid == OID_RSA_ENCRYPTION {
      let key: RsaPrivateKey =
        RsaPrivateKey::from_pkcs8_der(der).map_err(|_| Error::InvalidKey("invalid RSA private key"))?;
      Self::from_params(rsa_private_params(&key)?)
    } else if oid == OID_EC_PUBLIC_KEY {
      let curve: EcCurve = ec_curve_from_oid(
        pki
          .algorithm
          .parameters_oid()
          .map_err(|_| Error::InvalidKey("missing EC curve parameters"))?,
      )?;
      let params: JwkParamsEc = match curve {
        EcCurve::P256 => ec_private_params_p256(
          &p256::SecretKey::from_pkcs8_der(der).map_err(|_| Error::InvalidKey("invalid EC private key"))?,
        ),
        EcCurve::P384 => ec_private_params_p384(
          &p384::SecretKey::from_pkcs8_der(der).map_err(|_| Error::InvalidKey("invalid EC private key"))?,
        ),
        EcCurve::P521 => ec_private_params_p521(
          &p521::SecretKey::from_pkcs8_der(der).map_err(|_| Error::InvalidKey("invalid EC private key"))?,
        ),
      };
      Self::from_params(params)
    } else if oid == OID_ED25519 {
      let seed: &[u8] = curve_private_key(&pki)?;
      let seed: [u8; 32] = seed.try_into().map_err(|_| Error::InvalidKey("wrong Ed25519 key length"))?;
      let public: crypto::signatures::ed25519::PublicKey =
        crypto::signatures::ed25519::SecretKey::from_bytes(&seed).public_key();
      Self::from_params(JwkParamsOkp {
        crv: EdCurve::Ed25519.name().to_owned(),
        x: jwu::encode_b64(public.as_slice()),
        d: Some(jwu::encode_b64(seed)),
      })
    } else if oid == OID_X25519 || oid == OID_X448 {
      let curve: EcxCurve = if oid == OID_X25519 { EcxCurve::X25519 } else { EcxCurve::X448 };
      // Key-agreement publics are not derived here; the PKCS#8 document must
      // embed the public key bits.
      let public: &[u8] = pki
        .public_key
        .ok_or(Error::InvalidKey("missing public key for key-agreement curve"))?;
      Self::from_params(JwkParamsOkp {
        crv: curve.name().to_owned(),
        x: jwu::encode_b64(public),
        d: Some(jwu::encode_b64(curve_private_key(&pki)?)),
      })
    } else {
      Err(Error::InvalidKey("unsupported private key algorithm"))
    }
  }

  /// Imports a public key from a DER X.509 certificate.
  pub fn from_certificate_der(der: &[u8]) -> Result<Self> {
    let (_, cert) =
      x509_parser::parse_x509_certificate(der).map_err(|_| Error::InvalidKey("invalid X.509 certificate"))?;
    Self::from_public_key_der(cert.public_key().raw)
  }

  /// Exports the public key as a DER SubjectPublicKeyInfo structure.
  pub fn to_public_key_der(&self) -> Result<Vec<u8>> {
    match self.params() {
      JwkParams::Rsa(inner) => {
        let key: RsaPublicKey = RsaPublicKey::new(jwa::rsa::decode_biguint(&inner.n)?, jwa::rsa::decode_biguint(&inner.e)?)
          .map_err(|_| Error::InvalidKey("invalid RSA parameters"))?;
        key
          .to_public_key_der()
          .map(|doc| doc.as_bytes().to_vec())
          .map_err(|_| Error::Internal("SubjectPublicKeyInfo encoding failed"))
      }
      JwkParams::Ec(inner) => ec_public_key_der(inner),
      JwkParams::Okp(inner) => {
        let x: Vec<u8> = jwu::decode_b64(&inner.x).map_err(|_| Error::InvalidKey("invalid `x` parameter"))?;
        let spki: SubjectPublicKeyInfoRef<'_> = SubjectPublicKeyInfoRef {
          algorithm: AlgorithmIdentifierRef {
            oid: okp_oid(inner)?,
            parameters: None,
          },
          subject_public_key: BitStringRef::from_bytes(&x)
            .map_err(|_| Error::Internal("SubjectPublicKeyInfo encoding failed"))?,
        };
        spki
          .to_der()
          .map_err(|_| Error::Internal("SubjectPublicKeyInfo encoding failed"))
      }
      JwkParams::Oct(_) => Err(Error::InvalidKey("symmetric keys have no public form")),
    }
  }

  /// Exports the public key as PEM text.
  pub fn to_public_key_pem(&self) -> Result<String> {
    let der: Vec<u8> = self.to_public_key_der()?;
    pem_rfc7468::encode_string("PUBLIC KEY", LineEnding::LF, &der).map_err(|_| Error::Internal("PEM encoding failed"))
  }

  /// Exports the private key as a DER PKCS#8 structure.
  pub fn to_private_key_der(&self) -> Result<Zeroizing<Vec<u8>>> {
    if !self.is_private() {
      return Err(Error::InvalidKey("missing private parameters"));
    }
    match self.params() {
      JwkParams::Rsa(inner) => {
        let key: RsaPrivateKey = jwa::rsa::private_key(inner)?;
        key
          .to_pkcs8_der()
          .map(|doc| Zeroizing::new(doc.as_bytes().to_vec()))
          .map_err(|_| Error::Internal("PKCS#8 encoding failed"))
      }
      JwkParams::Ec(inner) => ec_private_key_der(inner),
      JwkParams::Okp(inner) => {
        let d: Zeroizing<Vec<u8>> = decode_private_member(inner.d.as_deref())?;
        // RFC 8410: the PKCS#8 private key field wraps the raw key in a
        // nested OCTET STRING.
        let inner_der: Zeroizing<Vec<u8>> = OctetStringRef::new(d.as_slice())
          .and_then(|octets| octets.to_der())
          .map(Zeroizing::new)
          .map_err(|_| Error::Internal("PKCS#8 encoding failed"))?;
        let pki: PrivateKeyInfo<'_> = PrivateKeyInfo::new(
          AlgorithmIdentifierRef {
            oid: okp_oid(inner)?,
            parameters: None,
          },
          inner_der.as_slice(),
        );
        pki
          .to_der()
          .map(Zeroizing::new)
          .map_err(|_| Error::Internal("PKCS#8 encoding failed"))
      }
      JwkParams::Oct(_) => Err(Error::InvalidKey("symmetric keys have no PEM form")),
    }
  }

  /// Exports the private key as PEM text.
  pub fn to_private_key_pem(&self) -> Result<Zeroizing<String>> {
    let der: Zeroizing<Vec<u8>> = self.to_private_key_der()?;
    pem_rfc7468::encode_string("PRIVATE KEY", LineEnding::LF, &der)
      .map(Zeroizing::new)
      .map_err(|_| Error::Internal("PEM encoding failed"))
  }

  fn from_sec1_der(der: &[u8]) -> Result<Self> {
    let key: sec1::EcPrivateKey<'_> =
      sec1::EcPrivateKey::try_from(der).map_err(|_| Error::InvalidKey("invalid SEC1 private key"))?;
    let oid: ObjectIdentifier = key
      .parameters
      .as_ref()
      .and_then(|params| params.named_curve())
      .ok_or(Error::InvalidKey("missing EC curve parameters"))?;

    let params: JwkParamsEc = match ec_curve_from_oid(oid)? {
      EcCurve::P256 => ec_private_params_p256(
        &p256::SecretKey::from_slice(key.private_key).map_err(|_| Error::InvalidKey("invalid EC scalar"))?,
      ),
      EcCurve::P384 => ec_private_params_p384(
        &p384::SecretKey::from_slice(key.private_key).map_err(|_| Error::InvalidKey("invalid EC scalar"))?,
      ),
      EcCurve::P521 => ec_private_params_p521(
        &p521::SecretKey::from_slice(key.private_key).map_err(|_| Error::InvalidKey("invalid EC scalar"))?,
      ),
    };
    Self::from_params(params)
  }
}

fn curve_private_key<'a>(pki: &'a PrivateKeyInfo<'_>) -> Result<&'a [u8]> {
  OctetStringRef::from_der(pki.private_key)
    .map(|octets| octets.as_bytes())
    .map_err(|_| Error::InvalidKey("invalid curve private key"))
}

fn decode_private_member(member: Option<&str>) -> Result<Zeroizing<Vec<u8>>> {
  member
    .map(jwu::decode_b64)
    .transpose()
    .map_err(|_| Error::InvalidKey("invalid `d` parameter"))?
    .map(Zeroizing::new)
    .ok_or(Error::InvalidKey("missing private parameters"))
}

fn okp_oid(params: &JwkParamsOkp) -> Result<ObjectIdentifier> {
  if let Ok(curve) = params.try_ed_curve() {
    return match curve {
      EdCurve::Ed25519 => Ok(OID_ED25519),
    };
  }
  match params.try_ecx_curve()? {
    EcxCurve::X25519 => Ok(OID_X25519),
    EcxCurve::X448 => Ok(OID_X448),
  }
}

fn ec_curve_from_oid(oid: ObjectIdentifier) -> Result<EcCurve> {
  if oid == OID_SECP256R1 {
    Ok(EcCurve::P256)
  } else if oid == OID_SECP384R1 {
    Ok(EcCurve::P384)
  } else if oid == OID_SECP521R1 {
    Ok(EcCurve::P521)
  } else {
    Err(Error::InvalidKey("unsupported EC curve"))
  }
}

fn rsa_public_params(key: &RsaPublicKey) -> JwkParamsRsa {
  JwkParamsRsa {
    n: jwu::encode_b64(key.n().to_bytes_be()),
    e: jwu::encode_b64(key.e().to_bytes_be()),
    d: None,
    p: None,
    q: None,
    dp: None,
    dq: None,
    qi: None,
  }
}

fn rsa_private_params(key: &RsaPrivateKey) -> Result<JwkParamsRsa> {
  let primes: &[BigUint] = key.primes();
  if primes.len() != 2 {
    return Err(Error::InvalidKey("multi-prime RSA keys are not supported"));
  }
  let one: BigUint = BigUint::from(1u8);
  let p: &BigUint = &primes[0];
  let q: &BigUint = &primes[1];
  let dp: BigUint = key.d() % (p - &one);
  let dq: BigUint = key.d() % (q - &one);
  let qi: BigUint = q
    .mod_inverse(p)
    .and_then(|inverse| inverse.to_biguint())
    .ok_or(Error::InvalidKey("degenerate RSA primes"))?;

  Ok(JwkParamsRsa {
    n: jwu::encode_b64(key.n().to_bytes_be()),
    e: jwu::encode_b64(key.e().to_bytes_be()),
    d: Some(jwu::encode_b64(key.d().to_bytes_be())),
    p: Some(jwu::encode_b64(p.to_bytes_be())),
    q: Some(jwu::encode_b64(q.to_bytes_be())),
    dp: Some(jwu::encode_b64(dp.to_bytes_be())),
    dq: Some(jwu::encode_b64(dq.to_bytes_be())),
    qi: Some(jwu::encode_b64(qi.to_bytes_be())),
  })
}

fn ec_public_params(curve: EcCurve, sec1_bytes: &[u8]) -> Result<JwkParamsEc> {
  match curve {
    EcCurve::P256 => p256::PublicKey::from_sec1_bytes(sec1_bytes)
      .map_err(|_| Error::InvalidKey("invalid EC public point"))
      .map(|key| ec_params_from_point_p256(&key)),
    EcCurve::P384 => p384::PublicKey::from_sec1_bytes(sec1_bytes)
      .map_err(|_| Error::InvalidKey("invalid EC public point"))
      .map(|key| ec_params_from_point_p384(&key)),
    EcCurve::P521 => p521::PublicKey::from_sec1_bytes(sec1_bytes)
      .map_err(|_| Error::InvalidKey("invalid EC public point"))
      .map(|key| ec_params_from_point_p521(&key)),
  }
}

fn ec_public_key_der(params: &JwkParamsEc) -> Result<Vec<u8>> {
  let point: Vec<u8> = jwa::ecdsa::public_sec1_bytes(params)?;
  let result = match params.try_ec_curve()? {
    EcCurve::P256 => p256::PublicKey::from_sec1_bytes(&point)
      .map_err(|_| Error::InvalidKey("invalid EC public point"))?
      .to_public_key_der(),
    EcCurve::P384 => p384::PublicKey::from_sec1_bytes(&point)
      .map_err(|_| Error::InvalidKey("invalid EC public point"))?
      .to_public_key_der(),
    EcCurve::P521 => p521::PublicKey::from_sec1_bytes(&point)
      .map_err(|_| Error::InvalidKey("invalid EC public point"))?
      .to_public_key_der(),
  };
  result
    .map(|doc| doc.as_bytes().to_vec())
    .map_err(|_| Error::Internal("SubjectPublicKeyInfo encoding failed"))
}

fn ec_private_key_der(params: &JwkParamsEc) -> Result<Zeroizing<Vec<u8>>> {
  let d: Zeroizing<Vec<u8>> = decode_private_member(params.d.as_deref())?;
  let result = match params.try_ec_curve()? {
    EcCurve::P256 => p256::SecretKey::from_slice(d.as_slice())
      .map_err(|_| Error::InvalidKey("invalid EC scalar"))?
      .to_pkcs8_der(),
    EcCurve::P384 => p384::SecretKey::from_slice(d.as_slice())
      .map_err(|_| Error::InvalidKey("invalid EC scalar"))?
      .to_pkcs8_der(),
    EcCurve::P521 => p521::SecretKey::from_slice(d.as_slice())
      .map_err(|_| Error::InvalidKey("invalid EC scalar"))?
      .to_pkcs8_der(),
  };
  result
    .map(|doc| Zeroizing::new(doc.as_bytes().to_vec()))
    .map_err(|_| Error::Internal("PKCS#8 encoding failed"))
}

fn ec_params_from_point_p256(key: &p256::PublicKey) -> JwkParamsEc {
  use p256::elliptic_curve::sec1::ToEncodedPoint;
  let point = key.to_encoded_point(false);
  JwkParamsEc {
    crv: EcCurve::P256.name().to_owned(),
    x: jwu::encode_b64(point.x().expect("uncompressed points have coordinates")),
    y: jwu::encode_b64(point.y().expect("uncompressed points have coordinates")),
    d: None,
  }
}

fn ec_params_from_point_p384(key: &p384::PublicKey) -> JwkParamsEc {
  use p384::elliptic_curve::sec1::ToEncodedPoint;
  let point = key.to_encoded_point(false);
  JwkParamsEc {
    crv: EcCurve::P384.name().to_owned(),
    x: jwu::encode_b64(point.x().expect("uncompressed points have coordinates")),
    y: jwu::encode_b64(point.y().expect("uncompressed points have coordinates")),
    d: None,
  }
}

fn ec_params_from_point_p521(key: &p521::PublicKey) -> JwkParamsEc {
  use p521::elliptic_curve::sec1::ToEncodedPoint;
  let point = key.to_encoded_point(false);
  JwkParamsEc {
    crv: EcCurve::P521.name().to_owned(),
    x: jwu::encode_b64(point.x().expect("uncompressed points have coordinates")),
    y: jwu::encode_b64(point.y().expect("uncompressed points have coordinates")),
    d: None,
  }
}

fn ec_private_params_p256(secret: &p256::SecretKey) -> JwkParamsEc {
  let mut params: JwkParamsEc = ec_params_from_point_p256(&secret.public_key());
  params.d = Some(jwu::encode_b64(secret.to_bytes()));
  params
}

fn ec_private_params_p384(secret: &p384::SecretKey) -> JwkParamsEc {
  let mut params: JwkParamsEc = ec_params_from_point_p384(&secret.public_key());
  params.d = Some(jwu::encode_b64(secret.to_bytes()));
  params
}

fn ec_private_params_p521(secret: &p521::SecretKey) -> JwkParamsEc {
  let mut params: JwkParamsEc = ec_params_from_point_p521(&secret.public_key());
  params.d = Some(jwu::encode_b64(secret.to_bytes()));
  params
}
