// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use libjose::jwk::Jwk;
use libjose::jws::Jws;
use libjose::jws::JwsAlgorithm;
use libjose::jws::JwsFormat;
use libjose::jws::JwsHeader;

const CLAIMS: &[u8] = b"libjose roundtrip";

const OCT_JWK: &str = r#"{"kty":"oct","k":"AyM1SysPpbyDfgZld3umj1qzKObwVMkoqQ-EstJQLr_T-1qS0gZH75aKtMN3Yj0iPS4hcgUuTwjAzZr1Z9CAow"}"#;

const EC_JWK: &str = r#"
  {
    "kty": "EC",
    "crv": "P-256",
    "x": "f83OJ3D2xF1Bg8vub9tLe1gHMzV76e8Tus9uPHvRVEU",
    "y": "x_FEzRu9m36HLN_tue659LNpXW6pCyStikYjKIWI5a0",
    "d": "jpsQnnGQmL-YBIffH1136cspYG6-0iY7X1fCE9-E9LI"
  }
"#;

const OKP_JWK: &str = r#"
  {
    "kty": "OKP",
    "crv": "Ed25519",
    "d": "nWGxne_9WmC6hEr0kuwsxERJxWl7MmkZcDusAxyuf2A",
    "x": "11qYAYKxCrfVS_7TyWQHOg7hcvPapiMlrwIaaPcHURo"
  }
"#;

const RSA_JWK: &str = concat!(
  r#"{"kty":"RSA","n":"0vx7agoebGcQSuuPiLJXZptN9nndrQmbXEps2aiAFbWhM78LhWx4cbbfAAtVT86zwu1RK7aPFFxuhDR1L6tSoc_BJECPebWKR"#,
  r#"XjBZCiFV4n3oknjhMstn64tZ_2W-5JsGY4Hc5n9yBXArwl93lqt7_RN5w6Cf0h4QyQ5v-65YGjQR0_FDW2QvzqY368QQMicAtaSqzs8KJZgnYb9c7d0zgdAZHz"#,
  r#"u6qMQvRL5hajrn1n91CbOpbISD08qNLyrdkt-bFTWhAI4vMQFh6WeZu0fM4lFd2NcRwr3XPksINHaQ-G_xBniIqbw0Ls1jF44-csFCur-kEgU8awapJzKnqDKg"#,
  r#"w","e":"AQAB","d":"X4cTteJY_gn4FYPsXB8rdXix5vwsg1FLN5E3EaG6RJoVH-HLLKD9M7dx5oo7GURknchnrRweUkC7hT5fJLM0WbFAKNLWY2v"#,
  r#"v7B6NqXSzUvxT0_YSfqijwp3RTzlBaCxWp4doFk5N2o8Gy_nHNKroADIkJ46pRUohsXywbReAdYaMwFs9tv8d_cPVY3i07a3t8MN6TNwm0dSawm9v47UiCl3Sk"#,
  r#"5ZiG7xojPLu4sbg1U2jx4IBTNBznbJSzFHK66jT8bgkuqsk0GjskDJk19Z4qwjwbsnn4j2WBii3RL-Us2lGVkY8fkFzme1z0HbIkfz0Y6mqnOYtqc0X4jfcKoA"#,
  r#"C8Q","p":"83i-7IvMGXoMXCskv73TKr8637FiO7Z27zv8oj6pbWUQyLPQBQxtPVnwD20R-60eTDmD2ujnMt5PoqMrm8RfmNhVWDtjjMmCMjOpSXicFHj7"#,
  r#"XOuVIYQyqVWlWEh6dN36GVZYk93N8Bc9vY41xy8B9RzzOGVQzXvNEvn7O0nVbfs","q":"3dfOR9cuYq-0S-mkFLzgItgMEfFzB2q3hWehMuG0oCuqnb3v"#,
  r#"obLyumqjVZQO1dIrdwgTnCdpYzBcOfW5r370AFXjiWft_NGEiovonizhKpo9VVS78TzFgxkIdrecRezsZ-1kYd_s1qDbxtkDEgfAITAG9LUnADun4vIcb6yelx"#,
  r#"k","dp":"G4sPXkc6Ya9y8oJW9_ILj4xuppu0lzi_H7VTkS8xj5SdX3coE0oimYwxIi2emTAue0UOa5dpgFGyBJ4c8tQ2VF402XRugKDTP8akYhFo5tAA7"#,
  r#"7Qe_NmtuYZc3C3m3I24G2GvR5sSDxUyAN2zq8Lfn9EUms6rY3Ob8YeiKkTiBj0","dq":"s9lAH9fggBsoFR8Oac2R_E2gw282rT2kGOAhvIllETE1efrA"#,
  r#"6huUUvMfBcMpn8lqeW6vzznYY5SSQF7pMdC_agI3nG8Ibp1BUb0JUiraRNqUfLhcQb_d9GF4Dh7e74WbRsobRonujTYN1xCaP6TO61jvWrX-L18txXw494Q_cg"#,
  r#"k","qi":"GyM_p6JrXySiz1toFgKbWV-JdI3jQ4ypu9rbMWx3rQJBfmt0FoYzgUIZEVFEcOqwemRN81zoDAaa-Bk0KWNGDjJHZDdDmFhW3AN7lI-puxk_m"#,
  r#"HZGJ11rxyR8O55XLSe3SPmRfKwZI6yU24ZxvQKFYItdldUKGzO6Ia6zTKhAVRU"}"#
);

fn keypair(alg: JwsAlgorithm) -> (Jwk, Jwk) {
  let secret: Jwk = match alg {
    JwsAlgorithm::HS256 | JwsAlgorithm::HS384 | JwsAlgorithm::HS512 => Jwk::from_json(OCT_JWK).unwrap(),
    JwsAlgorithm::ES256 => Jwk::from_json(EC_JWK).unwrap(),
    JwsAlgorithm::EdDSA => Jwk::from_json(OKP_JWK).unwrap(),
    _ => Jwk::from_json(RSA_JWK).unwrap(),
  };
  let public: Jwk = if secret.is_symmetric() {
    secret.clone()
  } else {
    secret.to_public().unwrap()
  };
  (secret, public)
}

fn roundtrip(alg: JwsAlgorithm) {
  let (secret, public): (Jwk, Jwk) = keypair(alg);

  // Compact.
  let mut jws: Jws = Jws::new();
  let mut header: JwsHeader = JwsHeader::new();
  header.set_alg(alg);
  jws.set_header(header);
  jws.set_payload(CLAIMS);

  let token: String = jws.serialize_compact(Some(&secret)).unwrap();
  let decoded: Jws = Jws::parse(&token).unwrap();
  assert_eq!(decoded.alg(), Some(alg));
  assert_eq!(decoded.payload(), CLAIMS);
  assert_eq!(decoded.verify(Some(&public)), Ok(()));

  // Flattened and general JSON serializations.
  for format in [JwsFormat::Flatten, JwsFormat::General] {
    let mut signer: Jws = Jws::new();
    let mut header: JwsHeader = JwsHeader::new();
    header.set_alg(alg);
    signer.set_header(header);
    signer.set_payload(CLAIMS);
    let mut key: Jwk = secret.clone();
    key.set_alg(alg.name());
    signer.add_signing_key(&key);

    let json: String = signer.serialize_json_string(None, format).unwrap();
    let decoded: Jws = Jws::parse(&json).unwrap();
    assert_eq!(decoded.format(), format);
    assert_eq!(decoded.payload(), CLAIMS);
    assert_eq!(decoded.verify(Some(&public)), Ok(()));
  }
}

#[test]
fn test_roundtrip_hs256() {
  roundtrip(JwsAlgorithm::HS256);
}

#[test]
fn test_roundtrip_hs384() {
  roundtrip(JwsAlgorithm::HS384);
}

#[test]
fn test_roundtrip_hs512() {
  roundtrip(JwsAlgorithm::HS512);
}

#[test]
fn test_roundtrip_rs256() {
  roundtrip(JwsAlgorithm::RS256);
}

#[test]
fn test_roundtrip_rs384() {
  roundtrip(JwsAlgorithm::RS384);
}

#[test]
fn test_roundtrip_rs512() {
  roundtrip(JwsAlgorithm::RS512);
}

#[test]
fn test_roundtrip_ps256() {
  roundtrip(JwsAlgorithm::PS256);
}

#[test]
fn test_roundtrip_ps384() {
  roundtrip(JwsAlgorithm::PS384);
}

#[test]
fn test_roundtrip_ps512() {
  roundtrip(JwsAlgorithm::PS512);
}

#[test]
fn test_roundtrip_es256() {
  roundtrip(JwsAlgorithm::ES256);
}

#[test]
fn test_roundtrip_eddsa() {
  roundtrip(JwsAlgorithm::EdDSA);
}
