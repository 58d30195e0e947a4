//! In-memory trait doubles and request helpers for router tests.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;

use biostart_core::traits::{RecordSource, TextGenerator, UserSource};
use biostart_core::types::{Collection, RawFields, RawRecord, RecordId};
use biostart_core::{Error, Result};

/// In-memory store implementing both record-source traits.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<BTreeMap<String, Vec<RawRecord>>>,
    next_id: AtomicUsize,
}

impl MemoryStore {
    pub fn seed(&self, collection: &Collection, id: &str, fields: Value) {
        let fields: RawFields = serde_json::from_value(fields).unwrap();
        self.records
            .lock()
            .unwrap()
            .entry(collection.table_name().to_string())
            .or_default()
            .push(RawRecord::new(id, fields));
    }

    pub fn record(&self, collection: &Collection, id: &str) -> Option<RawRecord> {
        self.records
            .lock()
            .unwrap()
            .get(collection.table_name())?
            .iter()
            .find(|r| r.id.as_str() == id)
            .cloned()
    }

    pub fn count(&self, collection: &Collection) -> usize {
        self.records
            .lock()
            .unwrap()
            .get(collection.table_name())
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl RecordSource for MemoryStore {
    async fn fetch_all(&self, collection: &Collection) -> Result<Vec<RawRecord>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .get(collection.table_name())
            .cloned()
            .unwrap_or_default())
    }

    async fn create(&self, collection: &Collection, fields: RawFields) -> Result<RecordId> {
        let id = RecordId::new(format!("rec{}", self.next_id.fetch_add(1, Ordering::SeqCst)));
        self.records
            .lock()
            .unwrap()
            .entry(collection.table_name().to_string())
            .or_default()
            .push(RawRecord::new(id.clone(), fields));
        Ok(id)
    }

    async fn update(
        &self,
        collection: &Collection,
        id: &RecordId,
        fields: RawFields,
    ) -> Result<()> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .get_mut(collection.table_name())
            .and_then(|rs| rs.iter_mut().find(|r| &r.id == id))
            .ok_or_else(|| Error::NotFound(format!("record '{id}'")))?;
        for (name, value) in fields.iter() {
            record.fields.insert(name.clone(), value.clone());
        }
        Ok(())
    }

    async fn delete(&self, collection: &Collection, id: &RecordId) -> Result<()> {
        if let Some(records) = self
            .records
            .lock()
            .unwrap()
            .get_mut(collection.table_name())
        {
            records.retain(|r| &r.id != id);
        }
        Ok(())
    }
}

#[async_trait]
impl UserSource for MemoryStore {
    async fn fetch(&self, collection: &Collection, id: &RecordId) -> Result<RawRecord> {
        self.record(collection, id.as_str())
            .ok_or_else(|| Error::NotFound(format!("record '{id}'")))
    }

    async fn find_first(
        &self,
        collection: &Collection,
        filters: &[(&str, &str)],
    ) -> Result<Option<RawRecord>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .get(collection.table_name())
            .and_then(|records| {
                records
                    .iter()
                    .find(|record| {
                        filters.iter().all(|(field, value)| {
                            record.field(field).and_then(Value::as_str) == Some(*value)
                        })
                    })
                    .cloned()
            }))
    }
}

/// Generator double returning a fixed response.
pub struct CannedGenerator(pub &'static str);

#[async_trait]
impl TextGenerator for CannedGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Ok(self.0.to_string())
    }
}
