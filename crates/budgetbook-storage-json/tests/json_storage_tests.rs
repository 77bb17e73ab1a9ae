use std::{fs, sync::Arc};

use budgetbook_core::{
    CoreError, FixedClock, KeyValueStore, QueryService, TransactionRepository, BUDGET_DATA_KEY,
};
use budgetbook_domain::{NewTransaction, Period, TransactionKind};
use budgetbook_storage_json::JsonFileStore;
use chrono::NaiveDate;
use tempfile::tempdir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn file_store_round_trips_raw_values() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().join("store")).expect("create store");

    assert_eq!(store.get("primaryColor").unwrap(), None);
    store.set("primaryColor", "#D5232C").unwrap();
    assert_eq!(store.get("primaryColor").unwrap().as_deref(), Some("#D5232C"));
    assert!(store.key_path("primaryColor").exists());

    store.remove("primaryColor").unwrap();
    assert_eq!(store.get("primaryColor").unwrap(), None);
    store.remove("primaryColor").expect("removing twice is fine");
}

#[test]
fn ledger_survives_reopening_the_store() {
    let dir = tempdir().expect("tempdir");
    let clock = Arc::new(FixedClock::on(date(2024, 12, 31)));
    let id = {
        let store = Arc::new(JsonFileStore::new(dir.path().to_path_buf()).unwrap());
        let repo = TransactionRepository::with_clock(store, clock.clone());
        repo.append(
            NewTransaction::new(TransactionKind::Expense, "Phone", 25.0, date(2024, 11, 3))
                .with_note("prepaid"),
        )
        .unwrap()
        .id
    };

    let store = Arc::new(JsonFileStore::new(dir.path().to_path_buf()).unwrap());
    let repo = TransactionRepository::with_clock(store.clone(), clock);
    let queries = QueryService::new(repo.clone());
    let listed = queries.list_for_period(Period::new(11, 2024).unwrap());
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, id);
    assert_eq!(listed[0].note.as_deref(), Some("prepaid"));

    let raw = store.get(BUDGET_DATA_KEY).unwrap().expect("ledger written");
    let document: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(document["expense"][0]["type"], "expense");
    assert_eq!(document["expense"][0]["date"], "2024-11-03");
    assert_eq!(document["income"], serde_json::json!([]));
}

#[test]
fn corrupt_ledger_file_reads_as_empty() {
    let dir = tempdir().expect("tempdir");
    let store = Arc::new(JsonFileStore::new(dir.path().to_path_buf()).unwrap());
    fs::write(store.key_path(BUDGET_DATA_KEY), "\u{0}\u{1}garbage").unwrap();

    let repo = TransactionRepository::new(store);
    assert!(repo.all().is_empty());
}

#[test]
fn failed_write_preserves_previous_value() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().to_path_buf()).unwrap();
    store.set("dateFormat", "PPP").unwrap();

    // A directory squatting on the temp file name makes File::create fail.
    let path = store.key_path("dateFormat");
    fs::create_dir_all(path.with_extension("value.tmp")).unwrap();

    let err = store
        .set("dateFormat", "yyyy-MM-dd")
        .expect_err("write must fail");
    assert!(
        matches!(err, CoreError::StorageWriteFailed { ref key, .. } if key == "dateFormat"),
        "unexpected error: {err:?}"
    );
    assert_eq!(fs::read_to_string(&path).unwrap(), "PPP");
}
