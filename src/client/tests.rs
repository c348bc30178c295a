//! Tests for transport plumbing that needs no live endpoint.

use rstest::rstest;

use crate::error::ApiError;

use super::{ApiEnvelope, Client, Environment, Session, error_from_body};

#[rstest]
#[case("production", Some(Environment::Production))]
#[case("Staging", Some(Environment::Staging))]
#[case(" PRODUCTION ", Some(Environment::Production))]
#[case("dev", None)]
fn environment_names_resolve(#[case] name: &str, #[case] expected: Option<Environment>) {
    assert_eq!(Environment::from_name(name), expected);
}

#[test]
fn custom_base_url_drops_trailing_slash() {
    let environment = Environment::Custom(String::from("http://localhost:8080/"));
    assert_eq!(environment.base_url(), "http://localhost:8080");
}

#[test]
fn request_urls_join_base_and_path() {
    let client = Client::with_session(
        Environment::Custom(String::from("http://localhost:8080")),
        Session::new("token"),
    );
    assert_eq!(
        client.url("/v2/product/abc"),
        "http://localhost:8080/v2/product/abc"
    );
}

#[test]
fn envelope_exposes_data_and_ignores_siblings() {
    let body = br#"{"message":"ok","terms":"...","data":{"token":"t0k3n"}}"#;
    let envelope: ApiEnvelope<serde_json::Value> =
        serde_json::from_slice(body).unwrap_or_else(|err| panic!("decode envelope: {err}"));
    assert_eq!(
        envelope.data.get("token").and_then(serde_json::Value::as_str),
        Some("t0k3n")
    );
}

#[test]
fn error_body_message_is_extracted() {
    let err = error_from_body(400, br#"{"message":"speed not offered at location"}"#);
    assert_eq!(
        err,
        ApiError::Api {
            status: 400,
            message: String::from("speed not offered at location"),
        }
    );
}

#[test]
fn unauthorized_maps_to_auth_error() {
    let err = error_from_body(401, br#"{"message":"session expired"}"#);
    assert_eq!(
        err,
        ApiError::Auth {
            message: String::from("session expired"),
        }
    );
}

#[test]
fn unparseable_error_body_falls_back_to_raw_text() {
    let err = error_from_body(502, b"Bad Gateway");
    assert_eq!(
        err,
        ApiError::Api {
            status: 502,
            message: String::from("Bad Gateway"),
        }
    );
}

#[test]
fn session_records_expiry() {
    let session = Session::new("abc").with_expires_at(1_700_000_000_000);
    assert_eq!(session.token(), "abc");
    assert_eq!(session.expires_at(), Some(1_700_000_000_000));
}

#[test]
fn credentials_trim_whitespace() {
    let credentials = super::Credentials::new(" ak ", " sk\n");
    assert_eq!(credentials.access_key(), "ak");
    assert_eq!(credentials.secret_key(), "sk");
}
