//! Integration tests for persistent slots.
//!
//! These tests exercise loading, fallback and write-through of the five
//! storefront slots against the in-memory and file backends.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;

use odhanee_core::{Cart, Catalog, ProductId, SettingsUpdate, SiteSettings, seed};
use odhanee_storefront::AppState;
use odhanee_storefront::store::{
    Backend, FailureKind, FileBackend, MemoryBackend, Slot, StoreError, keys,
};

fn decode<T: serde::de::DeserializeOwned>(backend: &MemoryBackend, key: &str) -> T {
    serde_json::from_str(&backend.raw(key).unwrap()).unwrap()
}

// =============================================================================
// Fallback
// =============================================================================

#[test]
fn test_fresh_store_uses_seeds_without_writing() {
    let backend = Arc::new(MemoryBackend::new());
    let state = AppState::open(backend.clone());

    assert!(state.load_errors().is_empty());
    assert_eq!(state.catalog(), &seed::products());
    assert_eq!(state.users(), &seed::users());
    assert_eq!(state.settings(), &seed::settings());
    assert!(state.cart().is_empty());
    assert!(state.current_user().is_none());
    assert_eq!(backend.usage(), 0);
}

#[test]
fn test_malformed_entry_falls_back_to_seed() {
    let backend = Arc::new(MemoryBackend::new());
    backend.insert_raw(keys::USERS, "{\"broken\":");

    let state = AppState::open(backend.clone());

    assert_eq!(state.users().len(), 2);
    assert_eq!(state.users(), &seed::users());
    assert_eq!(state.load_errors().len(), 1);
    assert!(matches!(
        state.load_errors().first(),
        Some(StoreError::Decode { key, .. }) if key == keys::USERS
    ));
    // The malformed entry is left alone until the next write.
    assert_eq!(backend.raw(keys::USERS).as_deref(), Some("{\"broken\":"));
}

#[test]
fn test_stored_values_win_over_seeds() {
    let backend = Arc::new(MemoryBackend::new());
    backend.insert_raw(
        keys::SETTINGS,
        r#"{"promoBanner":"DIWALI SALE","marqueeText":"LIGHTS","announcementActive":false}"#,
    );
    backend.insert_raw(keys::CATALOG, "[]");

    let state = AppState::open(backend);

    assert_eq!(state.settings().promo_banner, "DIWALI SALE");
    assert!(!state.settings().announcement_active);
    assert!(state.catalog().is_empty());
}

#[test]
fn test_missing_admin_flag_defaults_to_false() {
    let backend = Arc::new(MemoryBackend::new());
    backend.insert_raw(
        keys::USERS,
        r#"[{"id":"u-1","email":"old@odhanee.com","name":"Old Record","joinedAt":"2022-05-01"}]"#,
    );

    let state = AppState::open(backend);

    let user = state.users().users().first().unwrap();
    assert!(!user.is_admin);
    assert_eq!(user.joined_at.to_string(), "2022-05-01");
}

#[test]
fn test_cart_breaking_line_invariants_falls_back_to_empty() {
    let backend = Arc::new(MemoryBackend::new());
    let saree = serde_json::to_value(seed::products().find(&ProductId::new("1")).unwrap()).unwrap();
    let mut zero = saree.clone();
    zero["quantity"] = 0.into();
    let mut two = saree;
    two["quantity"] = 2.into();
    let stored = serde_json::to_string(&vec![zero, two]).unwrap();
    backend.insert_raw(keys::CART, stored.clone());

    let mut state = AppState::open(backend.clone());

    assert!(state.cart().is_empty());
    assert!(matches!(
        state.load_errors().first(),
        Some(StoreError::Decode { key, .. }) if key == keys::CART
    ));
    assert_eq!(backend.raw(keys::CART), Some(stored));

    state.cart_service().add(&ProductId::new("1")).unwrap();
    assert_eq!(state.cart().items().len(), 1);
    assert_eq!(state.cart().item_count(), 1);
    let written: Cart = decode(&backend, keys::CART);
    assert_eq!(&written, state.cart());
}

#[test]
fn test_directory_with_shared_email_falls_back_to_seed() {
    let backend = Arc::new(MemoryBackend::new());
    backend.insert_raw(
        keys::USERS,
        r#"[{"id":"u-1","email":"asha@odhanee.com","name":"Asha","joinedAt":"2024-02-15"},
            {"id":"u-2","email":"asha@odhanee.com","name":"Asha","joinedAt":"2024-02-16"}]"#,
    );

    let state = AppState::open(backend);

    assert_eq!(state.users(), &seed::users());
    assert_eq!(state.load_errors().len(), 1);
}

#[test]
fn test_stored_email_is_normalized_before_login() {
    let backend = Arc::new(MemoryBackend::new());
    backend.insert_raw(
        keys::USERS,
        r#"[{"id":"u-1","email":" x@y.z","name":"Old Record","joinedAt":"2022-05-01"}]"#,
    );

    let mut state = AppState::open(backend);
    let user = state.auth_service().login("x@y.z", None).unwrap();

    assert!(state.load_errors().is_empty());
    assert_eq!(user.name, "Old Record");
    assert_eq!(state.users().len(), 1);
}

// =============================================================================
// Write-through
// =============================================================================

#[test]
fn test_update_is_visible_to_fresh_load() {
    let backend = Arc::new(MemoryBackend::new());
    let mut state = AppState::open(backend.clone());

    state
        .cart_service()
        .add(&ProductId::new("2"))
        .unwrap();

    let reopened = AppState::open(backend.clone());
    assert_eq!(reopened.cart(), state.cart());

    let stored: Cart = decode(&backend, keys::CART);
    assert_eq!(&stored, state.cart());
}

#[test]
fn test_same_update_twice_matches_single_update() {
    let backend = Arc::new(MemoryBackend::new());
    let mut state = AppState::open(backend.clone());
    state.auth_service().login("admin@odhanee.com", None).unwrap();
    let update = SettingsUpdate {
        marquee_text: Some("FESTIVE EDIT".to_owned()),
        ..SettingsUpdate::default()
    };

    let once = state.admin_service().unwrap().update_settings(&update).clone();
    let stored_once = backend.raw(keys::SETTINGS);
    let twice = state.admin_service().unwrap().update_settings(&update).clone();

    assert_eq!(once, twice);
    assert_eq!(backend.raw(keys::SETTINGS), stored_once);
    assert_eq!(AppState::open(backend).settings(), &once);
}

#[test]
fn test_reopening_without_updates_leaves_store_untouched() {
    let backend = Arc::new(MemoryBackend::new());
    {
        let mut state = AppState::open(backend.clone());
        state.cart_service().add(&ProductId::new("1")).unwrap();
    }
    let before = backend.raw(keys::CART);

    let first = AppState::open(backend.clone());
    let second = AppState::open(backend.clone());

    assert_eq!(first.cart(), second.cart());
    assert_eq!(backend.raw(keys::CART), before);
}

#[test]
fn test_write_failure_keeps_memory_value_and_old_stored_value() {
    let backend = Arc::new(MemoryBackend::new());
    backend.insert_raw(
        keys::SETTINGS,
        serde_json::to_string(&seed::settings()).unwrap(),
    );
    let (mut settings, status) =
        Slot::initialize(backend.clone(), keys::SETTINGS, seed::settings());
    assert!(status.is_ok());

    backend.set_read_only(true);
    let update = SettingsUpdate {
        promo_banner: Some("FLASH SALE".to_owned()),
        ..SettingsUpdate::default()
    };
    let err = settings
        .update_with(|current| update.apply(current))
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::Write);
    assert_eq!(settings.get().promo_banner, "FLASH SALE");
    let stored: SiteSettings = decode(&backend, keys::SETTINGS);
    assert_eq!(stored, seed::settings());
}

#[test]
fn test_quota_exceeded_is_a_write_failure() {
    let backend = Arc::new(MemoryBackend::with_quota(64));
    let mut state = AppState::open(backend.clone());

    // Neither the session nor the catalog fits in the quota.
    state
        .auth_service()
        .login("admin@odhanee.com", None)
        .unwrap();
    assert!(backend.raw(keys::SESSION).is_none());

    let removed = state
        .admin_service()
        .unwrap()
        .delete_product(&ProductId::new("4"))
        .unwrap();
    assert_eq!(removed.id.as_str(), "4");
    assert_eq!(state.catalog().len(), 3);
    assert!(backend.raw(keys::CATALOG).is_none());
}

#[test]
fn test_direct_slot_round_trip() {
    let backend: Arc<dyn Backend> = Arc::new(MemoryBackend::new());
    let (mut catalog, _) = Slot::initialize(backend.clone(), keys::CATALOG, Catalog::default());
    catalog
        .replace_with(seed::products())
        .unwrap();

    let (reloaded, status) = Slot::initialize(backend, keys::CATALOG, Catalog::default());
    assert!(status.is_ok());
    assert_eq!(reloaded.get(), &seed::products());
}

// =============================================================================
// File backend
// =============================================================================

#[test]
fn test_file_backend_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let backend = FileBackend::open(dir.path()).unwrap();
        let mut state = AppState::open(Arc::new(backend));
        state
            .auth_service()
            .login("meera@odhanee.com", Some("Meera Shah"))
            .unwrap();
        state.cart_service().add(&ProductId::new("3")).unwrap();
        state.cart_service().add(&ProductId::new("3")).unwrap();
    }

    let backend = FileBackend::open(dir.path()).unwrap();
    let state = AppState::open(Arc::new(backend));

    assert!(state.load_errors().is_empty());
    assert_eq!(state.current_user().unwrap().name, "Meera Shah");
    assert_eq!(state.users().len(), 3);
    assert_eq!(state.cart().item_count(), 2);
    assert!(dir.path().join("odhanee_cart.json").exists());
}

#[test]
fn test_file_backend_corrupt_file_is_isolated() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("odhanee_users.json"), "not json").unwrap();

    let backend = FileBackend::open(dir.path()).unwrap();
    let state = AppState::open(Arc::new(backend));

    assert_eq!(state.load_errors().len(), 1);
    assert_eq!(state.users(), &seed::users());
    assert_eq!(state.catalog(), &seed::products());
}
