//! Integration tests for persisted cart and settings across sessions.

use std::sync::Arc;

use tempfile::tempdir;
use testresult::TestResult;

use timehouse::{
    cart::{CartSnapshot, CartStore, store::CART_STORAGE_KEY},
    persist::Persistence,
    products::ProductId,
    session::Session,
    settings::{Locale, SETTINGS_STORAGE_KEY, Theme},
    storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError},
};

#[test]
fn cart_survives_restart_on_disk() -> TestResult {
    let dir = tempdir()?;

    let before = {
        let mut session = Session::open(Arc::new(FileStorage::new(dir.path())))?;

        session.add_to_cart(&ProductId::from("tank-006"))?;
        session.add_to_cart(&ProductId::from("submariner-001"))?;
        session.add_to_cart(&ProductId::from("tank-006"))?;
        session
            .cart_mut()
            .update_quantity(&ProductId::from("submariner-001"), 4);

        session.cart().items().to_vec()
    };

    let session = Session::open(Arc::new(FileStorage::new(dir.path())))?;

    assert_eq!(session.cart().items(), before.as_slice());
    assert!(session.cart().state().is_stable());

    Ok(())
}

#[test]
fn snapshot_round_trip_preserves_order() -> TestResult {
    let storage = Arc::new(MemoryStorage::new());
    let mut session = Session::open(storage.clone())?;

    for id in ["serpenti-008", "daytona-002", "reverso-007"] {
        session.add_to_cart(&ProductId::from(id))?;
    }

    let persistence = Persistence::<CartSnapshot>::new(CART_STORAGE_KEY, storage);
    let snapshot = persistence.try_load()?.ok_or("nothing persisted")?;

    let order: Vec<&str> = snapshot.items().iter().map(|line| line.id().as_str()).collect();

    assert_eq!(order, ["serpenti-008", "daytona-002", "reverso-007"]);
    assert_eq!(snapshot.items(), session.cart().items());

    Ok(())
}

#[test]
fn persisted_cart_uses_flat_line_items() -> TestResult {
    let storage = Arc::new(MemoryStorage::new());
    let mut session = Session::open(storage.clone())?;

    session.add_to_cart(&ProductId::from("speedmaster-005"))?;

    let raw = storage.get(CART_STORAGE_KEY)?.ok_or("nothing persisted")?;
    let value: serde_json::Value = serde_json::from_str(&raw)?;
    let line = &value["state"]["items"][0];

    assert_eq!(value["version"], 0);
    assert_eq!(line["id"], "speedmaster-005");
    assert_eq!(line["brand"], "Omega");
    assert_eq!(line["price"]["currency"], "USD");
    assert_eq!(line["quantity"], 1);

    Ok(())
}

#[test]
fn cart_with_duplicate_lines_is_discarded() -> TestResult {
    let storage = Arc::new(MemoryStorage::new());
    let mut session = Session::open(storage.clone())?;

    session.add_to_cart(&ProductId::from("tank-006"))?;

    let raw = storage.get(CART_STORAGE_KEY)?.ok_or("nothing persisted")?;
    let mut value: serde_json::Value = serde_json::from_str(&raw)?;
    let line = value["state"]["items"][0].clone();
    value["state"]["items"] = serde_json::Value::Array(vec![line.clone(), line]);
    storage.set(CART_STORAGE_KEY, &value.to_string())?;

    let restored = CartStore::restore(storage);

    assert!(restored.items().is_empty());

    Ok(())
}

#[test]
fn cart_with_out_of_range_quantity_is_discarded() -> TestResult {
    let storage = Arc::new(MemoryStorage::new());
    let mut session = Session::open(storage.clone())?;

    session.add_to_cart(&ProductId::from("tank-006"))?;

    let raw = storage.get(CART_STORAGE_KEY)?.ok_or("nothing persisted")?;
    let mut value: serde_json::Value = serde_json::from_str(&raw)?;
    value["state"]["items"][0]["quantity"] = serde_json::json!(11);
    storage.set(CART_STORAGE_KEY, &value.to_string())?;

    let restored = CartStore::restore(storage);

    assert!(restored.items().is_empty());

    Ok(())
}

#[test]
fn settings_and_cart_persist_independently() -> TestResult {
    let storage = Arc::new(MemoryStorage::new());
    storage.set(SETTINGS_STORAGE_KEY, "corrupted")?;

    let mut session = Session::open(storage.clone())?;

    assert_eq!(session.settings().locale(), Locale::En);
    assert_eq!(session.settings().theme(), Theme::Dark);

    session.add_to_cart(&ProductId::from("nautilus-003"))?;
    session.settings_mut().set_theme(Theme::Light);

    let reopened = Session::open(storage)?;

    assert_eq!(reopened.cart().items().len(), 1);
    assert_eq!(reopened.settings().theme(), Theme::Light);

    Ok(())
}

/// Storage that accepts settings writes but rejects everything under the cart key.
#[derive(Debug, Default)]
struct CartQuotaExhausted {
    inner: MemoryStorage,
}

impl KeyValueStorage for CartQuotaExhausted {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if key == CART_STORAGE_KEY {
            return Err(StorageError::QuotaExceeded(value.len(), 0));
        }

        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }
}

#[test]
fn cart_write_failures_do_not_affect_settings_or_memory() -> TestResult {
    let storage = Arc::new(CartQuotaExhausted::default());
    let mut session = Session::open(storage.clone())?;

    session.add_to_cart(&ProductId::from("royal-oak-004"))?;
    session.settings_mut().toggle_locale();

    assert_eq!(session.cart().items().len(), 1);

    let reopened = Session::open(storage)?;

    assert!(reopened.cart().items().is_empty());
    assert_eq!(reopened.settings().locale(), Locale::Ar);

    Ok(())
}
