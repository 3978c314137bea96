//! Общий контракт репозитория поверх `RecordStore`.
//!
//! Принимает ID в любом представлении, приводит его к числу, выдерживает
//! имитируемую задержку и превращает отсутствие записи в `NotFound`.

use std::sync::Arc;

use contracts::domain::common::{EntityMetadata, RecordId, ToRecordId};

use super::latency::{Latency, Operation};
use super::record_store::{RecordStore, StoredRecord};
use crate::shared::error::{RepoResult, RepositoryError};

#[derive(Debug)]
pub struct Repository<T> {
    store: Arc<RecordStore<T>>,
    latency: Latency,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            latency: self.latency,
        }
    }
}

impl<T: StoredRecord> Repository<T> {
    pub fn new(store: Arc<RecordStore<T>>, latency: Latency) -> Self {
        Self { store, latency }
    }

    fn resolve(id: &impl ToRecordId) -> RepoResult<RecordId> {
        id.to_record_id()
            .ok_or_else(|| RepositoryError::not_found(T::element_name(), id.raw()))
    }

    fn missing(id: &impl ToRecordId) -> RepositoryError {
        RepositoryError::not_found(T::element_name(), id.raw())
    }

    pub async fn get_all(&self) -> Vec<T> {
        self.latency.wait(Operation::GetAll).await;
        self.store.all().await
    }

    pub async fn get_by_id(&self, id: impl ToRecordId) -> RepoResult<T> {
        self.latency.wait(Operation::GetById).await;
        let key = Self::resolve(&id)?;
        self.store.find(key).await.ok_or_else(|| Self::missing(&id))
    }

    pub async fn create_with<F>(&self, build: F) -> T
    where
        F: FnOnce(RecordId, EntityMetadata) -> T,
    {
        self.latency.wait(Operation::Create).await;
        let record = self.store.insert_with(build).await;
        tracing::info!("{} created: id={}", T::element_name(), record.id());
        record
    }

    /// Изменить запись; `op` определяет имитируемую задержку
    pub async fn update_with<F>(
        &self,
        op: Operation,
        id: impl ToRecordId,
        change: F,
    ) -> RepoResult<T>
    where
        F: FnOnce(&mut T),
    {
        self.latency.wait(op).await;
        let updated = match id.to_record_id() {
            Some(key) => self.store.modify(key, change).await,
            None => None,
        };
        match updated {
            Some(record) => {
                tracing::info!("{} updated: id={}", T::element_name(), record.id());
                Ok(record)
            }
            None => {
                tracing::warn!(
                    "{} update failed, not found: {}",
                    T::element_name(),
                    id.raw()
                );
                Err(Self::missing(&id))
            }
        }
    }

    pub async fn delete(&self, id: impl ToRecordId) -> RepoResult<T> {
        self.latency.wait(Operation::Delete).await;
        let removed = match id.to_record_id() {
            Some(key) => self.store.remove(key).await,
            None => None,
        };
        match removed {
            Some(record) => {
                tracing::info!("{} deleted: id={}", T::element_name(), record.id());
                Ok(record)
            }
            None => {
                tracing::warn!(
                    "{} delete failed, not found: {}",
                    T::element_name(),
                    id.raw()
                );
                Err(Self::missing(&id))
            }
        }
    }

    /// Загрузить демо-данные напрямую в хранилище, минуя задержку
    pub async fn seed<D, F>(&self, items: Vec<D>, build: F) -> usize
    where
        F: Fn(RecordId, D, EntityMetadata) -> T,
    {
        let count = items.len();
        for item in items {
            self.store
                .insert_with(|id, metadata| build(id, item, metadata))
                .await;
        }
        tracing::info!("Seeded {} {}", count, T::collection_name());
        count
    }

    /// Запрос по предикату (фильтр по статусу/стадии)
    pub async fn query<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        self.latency.wait(Operation::GetByStage).await;
        self.store.filter(predicate).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_lead::{Lead, LeadDto};
    use std::io;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::time::Instant;

    fn repo(latency: Latency) -> Repository<Lead> {
        Repository::new(Arc::new(RecordStore::new()), latency)
    }

    fn dto(name: &str) -> LeadDto {
        LeadDto {
            name: name.into(),
            company: "Acme".into(),
            ..Default::default()
        }
    }

    /// Буфер для перехвата вывода tracing в тестах
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_seed_skips_simulated_latency() {
        let repo = repo(Latency::simulated());
        let start = Instant::now();
        let count = repo
            .seed(vec![dto("A"), dto("B"), dto("C")], Lead::from_dto)
            .await;
        assert_eq!(count, 3);
        assert_eq!(start.elapsed(), Duration::ZERO);

        let ids: Vec<_> = repo.store.all().await.iter().map(|l| l.id.value()).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        repo.create_with(|id, meta| Lead::from_dto(id, dto("D"), meta))
            .await;
        assert_eq!(start.elapsed(), Operation::Create.delay());
    }

    #[tokio::test]
    async fn test_unparsable_and_missing_ids_are_logged_alike() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let repo = repo(Latency::disabled());
        repo.seed(vec![dto("A")], Lead::from_dto).await;

        let err = repo.update_with(Operation::Update, "abc", |_| {}).await;
        assert_eq!(err, Err(RepositoryError::not_found("Lead", "abc")));
        assert!(repo.delete("abc").await.is_err());
        assert!(repo.delete(999i64).await.is_err());

        let output = logs.contents();
        assert!(output.contains("Lead update failed, not found: abc"));
        assert!(output.contains("Lead delete failed, not found: abc"));
        assert!(output.contains("Lead delete failed, not found: 999"));
        assert_eq!(repo.store.all().await.len(), 1);
    }
}
