//! In-memory хранилище записей одного домена.
//!
//! Хранилище владеет упорядоченной коллекцией и выдаёт идентификаторы.
//! Наружу всегда уходят клоны: ссылка на запись не переживает блокировку.

use chrono::Utc;
use contracts::domain::common::{AggregateRoot, EntityMetadata, RecordId};
use tokio::sync::RwLock;

/// Запись, которую можно держать в хранилище
pub trait StoredRecord: AggregateRoot + Clone + Send + Sync + 'static {}

impl<T> StoredRecord for T where T: AggregateRoot + Clone + Send + Sync + 'static {}

#[derive(Debug)]
struct StoreState<T> {
    records: Vec<T>,
    /// Наибольший ID, когда-либо выданный или загруженный
    high_water: i64,
}

impl<T: StoredRecord> StoreState<T> {
    /// `max(ID) + 1` по текущему содержимому, но не ниже уже выданных
    fn next_id(&self) -> RecordId {
        let max_existing = self
            .records
            .iter()
            .map(|r| r.id().value())
            .max()
            .unwrap_or(0);
        RecordId::new(max_existing.max(self.high_water)).next()
    }

    fn position(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }
}

/// Упорядоченная коллекция записей с выдачей ID
#[derive(Debug)]
pub struct RecordStore<T> {
    state: RwLock<StoreState<T>>,
}

impl<T: StoredRecord> Default for RecordStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: StoredRecord> RecordStore<T> {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Хранилище с начальными данными (порядок сохраняется)
    pub fn with_records(records: Vec<T>) -> Self {
        let high_water = records.iter().map(|r| r.id().value()).max().unwrap_or(0);
        Self {
            state: RwLock::new(StoreState {
                records,
                high_water,
            }),
        }
    }

    /// Копии всех записей в порядке вставки
    pub async fn all(&self) -> Vec<T> {
        self.state.read().await.records.clone()
    }

    pub async fn find(&self, id: RecordId) -> Option<T> {
        let state = self.state.read().await;
        state.records.iter().find(|r| r.id() == id).cloned()
    }

    /// Копии записей, удовлетворяющих предикату, в исходном порядке
    pub async fn filter<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        let state = self.state.read().await;
        state
            .records
            .iter()
            .filter(|r| predicate(r))
            .cloned()
            .collect()
    }

    /// ID, который получит следующая вставка
    pub async fn next_id(&self) -> RecordId {
        self.state.read().await.next_id()
    }

    /// Вставить запись, построенную из выданного ID и метаданных.
    ///
    /// Выдача ID и вставка идут под одной блокировкой записи.
    pub async fn insert_with<F>(&self, build: F) -> T
    where
        F: FnOnce(RecordId, EntityMetadata) -> T,
    {
        let mut state = self.state.write().await;
        let id = state.next_id();
        let mut record = build(id, EntityMetadata::created_at(Utc::now()));
        record.set_id(id);
        state.high_water = state.high_water.max(id.value());
        state.records.push(record.clone());
        record
    }

    /// Изменить запись на месте.
    ///
    /// После `change` ID принудительно восстанавливается и обновляется
    /// `updated_at`. Возвращает копию записи или `None`, если ID нет.
    pub async fn modify<F>(&self, id: RecordId, change: F) -> Option<T>
    where
        F: FnOnce(&mut T),
    {
        let mut state = self.state.write().await;
        let index = state.position(id)?;
        let record = &mut state.records[index];
        change(record);
        record.set_id(id);
        record.metadata_mut().touch();
        Some(record.clone())
    }

    /// Удалить запись, вернуть удалённое значение
    pub async fn remove(&self, id: RecordId) -> Option<T> {
        let mut state = self.state.write().await;
        let index = state.position(id)?;
        Some(state.records.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_lead::{Lead, LeadDto};
    use std::sync::Arc;

    fn dto(name: &str) -> LeadDto {
        LeadDto {
            name: name.into(),
            company: "Acme".into(),
            ..Default::default()
        }
    }

    async fn store_with(names: &[&str]) -> RecordStore<Lead> {
        let store = RecordStore::new();
        for name in names {
            store
                .insert_with(|id, meta| Lead::from_dto(id, dto(name), meta))
                .await;
        }
        store
    }

    #[tokio::test]
    async fn test_empty_store_starts_at_one() {
        let store = RecordStore::<Lead>::new();
        assert_eq!(store.next_id().await, RecordId(1));
        let lead = store
            .insert_with(|id, meta| Lead::from_dto(id, dto("A"), meta))
            .await;
        assert_eq!(lead.id, RecordId(1));
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let store = store_with(&["A", "B", "C"]).await;
        store.remove(RecordId(2)).await.unwrap();
        let lead = store
            .insert_with(|id, meta| Lead::from_dto(id, dto("D"), meta))
            .await;
        assert_eq!(lead.id, RecordId(4));

        // Удаление текущего максимума тоже не возвращает его ID в оборот
        store.remove(RecordId(4)).await.unwrap();
        let lead = store
            .insert_with(|id, meta| Lead::from_dto(id, dto("E"), meta))
            .await;
        assert_eq!(lead.id, RecordId(5));
    }

    #[tokio::test]
    async fn test_seeded_ids_follow_max_existing() {
        let a = Lead::from_dto(RecordId(10), dto("A"), EntityMetadata::new());
        let b = Lead::from_dto(RecordId(3), dto("B"), EntityMetadata::new());
        let store = RecordStore::with_records(vec![a, b]);
        assert_eq!(store.next_id().await, RecordId(11));
    }

    #[tokio::test]
    async fn test_reads_are_copies() {
        let store = store_with(&["A"]).await;
        let mut copy = store.find(RecordId(1)).await.unwrap();
        copy.name = "mutated".into();
        let mut all = store.all().await;
        all[0].company = "mutated".into();

        let fresh = store.find(RecordId(1)).await.unwrap();
        assert_eq!(fresh.name, "A");
        assert_eq!(fresh.company, "Acme");
    }

    #[tokio::test]
    async fn test_modify_restores_id_and_touches() {
        let store = store_with(&["A"]).await;
        let before = store.find(RecordId(1)).await.unwrap();
        let after = store
            .modify(RecordId(1), |lead| {
                lead.id = RecordId(77);
                lead.name = "B".into();
            })
            .await
            .unwrap();
        assert_eq!(after.id, RecordId(1));
        assert_eq!(after.name, "B");
        assert_eq!(after.metadata.created_at, before.metadata.created_at);
        assert!(after.metadata.updated_at >= before.metadata.updated_at);
        assert!(store.find(RecordId(77)).await.is_none());
    }

    #[tokio::test]
    async fn test_missing_id_leaves_store_untouched() {
        let store = store_with(&["A", "B"]).await;
        let snapshot = store.all().await;
        assert!(store.modify(RecordId(999), |l| l.name = "X".into()).await.is_none());
        assert!(store.remove(RecordId(999)).await.is_none());
        assert_eq!(store.all().await, snapshot);
    }

    #[tokio::test]
    async fn test_filter_keeps_order() {
        let store = store_with(&["A", "B", "A"]).await;
        let found = store.filter(|l| l.name == "A").await;
        let ids: Vec<_> = found.iter().map(|l| l.id.value()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_get_distinct_ids() {
        let store = Arc::new(RecordStore::<Lead>::new());
        let mut handles = Vec::new();
        for i in 0..20 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .insert_with(|id, meta| Lead::from_dto(id, dto(&format!("L{i}")), meta))
                    .await
                    .id
            }));
        }
        let mut ids = Vec::new();
        for h in handles {
            ids.push(h.await.unwrap().value());
        }
        ids.sort_unstable();
        assert_eq!(ids, (1..=20).collect::<Vec<_>>());
        assert_eq!(store.all().await.len(), 20);
    }
}
