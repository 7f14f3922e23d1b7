//! Credential store behavior across the codec, storage, and normalization.

use std::sync::Arc;

use backoffice_core::{
    check_token_validity, decode_tokens, encode_tokens, normalize_token_response, CredentialStore,
    EncodedCredentialStore, KeyValueStore, MemoryStorage,
};
use backoffice_domain::CredentialPair;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::Utc;
use serde_json::json;

#[tokio::test]
async fn reads_blob_written_by_earlier_clients() {
    let storage = MemoryStorage::new();
    let legacy = STANDARD.encode(r#"{"token":"a.b.c","refreshToken":"r","email":"ana@example.com"}"#);
    storage.set_item("auth_tokens", &legacy).await.unwrap();

    let store = EncodedCredentialStore::new(Arc::new(storage), "auth_tokens");
    let pair = store.get().await.unwrap().unwrap();

    assert_eq!(pair, CredentialPair::new("a.b.c", "r", Some("ana@example.com".into())));
}

#[tokio::test]
async fn refreshed_pair_replaces_stored_one_and_keeps_subject() {
    let storage = MemoryStorage::new();
    let store = EncodedCredentialStore::new(Arc::new(storage.clone()), "auth_tokens");
    store.set(&CredentialPair::new("old", "r1", Some("ana@example.com".into()))).await.unwrap();

    let previous = store.get().await.unwrap();
    let refreshed = normalize_token_response(
        &json!({ "data": { "accessToken": "new" } }),
        previous.as_ref().and_then(|p| p.subject.as_deref()),
    )
    .unwrap();
    store.set(&refreshed).await.unwrap();

    let stored = decode_tokens(&storage.peek("auth_tokens").unwrap()).unwrap();
    assert_eq!(stored, CredentialPair::new("new", "new", Some("ana@example.com".into())));
}

#[test]
fn encoded_blob_round_trips_and_is_not_plain_json() {
    let pair = CredentialPair::new("x.y.z", "refresh", None);
    let blob = encode_tokens(&pair).unwrap();

    assert!(serde_json::from_str::<serde_json::Value>(&blob).is_err());
    assert_eq!(decode_tokens(&blob), Some(pair));
    assert_eq!(decode_tokens("%%%"), None);
}

#[test]
fn opaque_tokens_are_never_valid() {
    assert!(!check_token_validity("not-a-jwt", Utc::now()).is_valid);
}
