//! Persistence of the ledger document under a single storage key.

use std::{
    collections::{BTreeMap, HashSet},
    sync::Arc,
};

use budgetbook_domain::{Ledger, Transaction, TransactionId, TransactionKind};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{CoreError, KeyValueStore};

/// Storage key holding `{ "income": [...], "expense": [...] }`.
pub const BUDGET_DATA_KEY: &str = "budgetData";

/// A ledger read for modification together with everything in the stored
/// document that did not decode into it.
///
/// Rejected records and unknown top-level fields are written back untouched
/// by [`LedgerStore::save_stored`], so editing the ledger never erases them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredLedger {
    ledger: Ledger,
    rejected: BTreeMap<TransactionKind, Vec<Value>>,
    malformed_buckets: BTreeMap<TransactionKind, Value>,
    extra: Map<String, Value>,
}

impl StoredLedger {
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    pub fn into_ledger(self) -> Ledger {
        self.ledger
    }

    /// Raw records of `kind` that were kept out of the ledger.
    pub fn rejected(&self, kind: TransactionKind) -> &[Value] {
        self.rejected.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    fn to_document(&self) -> Result<Value, serde_json::Error> {
        let mut document = self.extra.clone();
        for kind in TransactionKind::ALL {
            let mut records = self
                .ledger
                .bucket(kind)
                .iter()
                .map(serde_json::to_value)
                .collect::<Result<Vec<_>, _>>()?;
            records.extend(self.rejected(kind).iter().cloned());
            document.insert(kind.as_str().to_string(), Value::Array(records));
        }
        Ok(Value::Object(document))
    }
}

/// Reads and writes the whole ledger through a [`KeyValueStore`].
#[derive(Clone)]
pub struct LedgerStore {
    store: Arc<dyn KeyValueStore>,
}

impl LedgerStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Returns the persisted ledger, or an empty one when nothing usable is stored.
    ///
    /// Read errors and malformed documents are logged and never surfaced.
    pub fn load(&self) -> Ledger {
        match self.store.get(BUDGET_DATA_KEY) {
            Ok(Some(raw)) => decode_ledger(&raw),
            Ok(None) => {
                debug!("no ledger stored yet; starting empty");
                Ledger::new()
            }
            Err(err) => {
                warn!(error = %err, "could not read ledger; starting empty");
                Ledger::new()
            }
        }
    }

    /// Reads the ledger ahead of a write.
    ///
    /// Unlike [`load`](Self::load) this fails instead of substituting an empty
    /// ledger: a read error or a document that cannot be rewritten safely is
    /// returned as an error so the caller never overwrites stored data it
    /// could not see.
    pub fn load_for_update(&self) -> Result<StoredLedger, CoreError> {
        let Some(raw) = self.store.get(BUDGET_DATA_KEY)? else {
            return Ok(StoredLedger::default());
        };
        let stored = decode_document(&raw).map_err(|err| CoreError::CorruptLedger(err.to_string()))?;
        if let Some((kind, found)) = stored.malformed_buckets.iter().next() {
            return Err(CoreError::CorruptLedger(
                DocumentError::BucketNotList {
                    kind: *kind,
                    found: json_type(found),
                }
                .to_string(),
            ));
        }
        Ok(stored)
    }

    /// Replaces the stored ledger with `ledger` in a single write.
    pub fn save(&self, ledger: &Ledger) -> Result<(), CoreError> {
        let json = serde_json::to_string(ledger).map_err(|err| CoreError::Serde(err.to_string()))?;
        self.write(&json, ledger.len())
    }

    /// Writes `stored` back, including the records it could not decode.
    pub fn save_stored(&self, stored: &StoredLedger) -> Result<(), CoreError> {
        let json = stored
            .to_document()
            .map(|document| document.to_string())
            .map_err(|err| CoreError::Serde(err.to_string()))?;
        self.write(&json, stored.ledger.len())
    }

    fn write(&self, json: &str, records: usize) -> Result<(), CoreError> {
        self.store
            .set(BUDGET_DATA_KEY, json)
            .map_err(|err| match err {
                CoreError::StorageWriteFailed { .. } => err,
                other => CoreError::write_failed(BUDGET_DATA_KEY, other),
            })?;
        debug!(records, bytes = json.len(), "ledger saved");
        Ok(())
    }
}

#[derive(Debug, Error)]
enum DocumentError {
    #[error("stored ledger is not valid JSON: {0}")]
    NotJson(#[from] serde_json::Error),
    #[error("stored ledger is a JSON {0}, not an object")]
    NotObject(&'static str),
    #[error("`{kind}` bucket is a JSON {found}, not a list")]
    BucketNotList {
        kind: TransactionKind,
        found: &'static str,
    },
}

#[derive(Debug, Error)]
enum RecordRejection {
    #[error("{0}")]
    Malformed(#[from] serde_json::Error),
    #[error("record of type `{found}` stored in the wrong bucket")]
    BucketMismatch { found: TransactionKind },
    #[error("amount {0} is not a positive number")]
    NonPositiveAmount(f64),
    #[error("duplicate id `{0}`")]
    DuplicateId(TransactionId),
}

/// Decodes a stored ledger document record by record.
///
/// Anything that is not valid JSON, or not an object, yields an empty ledger.
/// Within each bucket, records that fail to decode, sit in the wrong bucket,
/// carry a non-positive amount or repeat an earlier id are left out. Missing
/// buckets are treated as empty.
pub fn decode_ledger(raw: &str) -> Ledger {
    match decode_document(raw) {
        Ok(stored) => {
            for (kind, found) in &stored.malformed_buckets {
                warn!(bucket = %kind, found = json_type(found), "bucket is not a list; ignoring it");
            }
            stored.into_ledger()
        }
        Err(err) => {
            warn!(error = %err, "starting with an empty ledger");
            Ledger::new()
        }
    }
}

fn decode_document(raw: &str) -> Result<StoredLedger, DocumentError> {
    let mut extra = match serde_json::from_str::<Value>(raw)? {
        Value::Object(map) => map,
        other => return Err(DocumentError::NotObject(json_type(&other))),
    };

    let mut stored = StoredLedger::default();
    let mut seen = HashSet::new();
    for kind in TransactionKind::ALL {
        let records = match extra.remove(kind.as_str()) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(records)) => records,
            Some(other) => {
                stored.malformed_buckets.insert(kind, other);
                continue;
            }
        };
        for (index, record) in records.into_iter().enumerate() {
            match decode_record(kind, record.clone(), &seen) {
                Ok(txn) => {
                    seen.insert(txn.id.clone());
                    stored.ledger.insert(txn);
                }
                Err(reason) => {
                    warn!(bucket = %kind, index, %reason, "skipping stored transaction");
                    stored.rejected.entry(kind).or_default().push(record);
                }
            }
        }
    }
    stored.extra = extra;
    Ok(stored)
}

fn decode_record(
    bucket: TransactionKind,
    record: Value,
    seen: &HashSet<TransactionId>,
) -> Result<Transaction, RecordRejection> {
    let txn = serde_json::from_value::<Transaction>(record)?.normalized();
    if txn.kind != bucket {
        return Err(RecordRejection::BucketMismatch { found: txn.kind });
    }
    if !(txn.amount.is_finite() && txn.amount > 0.0) {
        return Err(RecordRejection::NonPositiveAmount(txn.amount));
    }
    if seen.contains(&txn.id) {
        return Err(RecordRejection::DuplicateId(txn.id));
    }
    Ok(txn)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
