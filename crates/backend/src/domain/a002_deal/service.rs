use std::sync::Arc;

use chrono::NaiveDate;
use contracts::domain::a002_deal::{Deal, DealDto, DealPatch};
use contracts::domain::common::ToRecordId;
use contracts::enums::{DealStage, LeadSource};
use contracts::shared::list_filter::{FilterValue, ListFilter};

use crate::shared::data::latency::{Latency, Operation};
use crate::shared::data::record_store::RecordStore;
use crate::shared::data::repository::Repository;
use crate::shared::error::RepoResult;

/// Сервис сделок: CRUD, выборка по стадии, смена стадии
#[derive(Debug, Clone)]
pub struct DealService {
    repo: Repository<Deal>,
}

impl DealService {
    pub fn new(store: Arc<RecordStore<Deal>>, latency: Latency) -> Self {
        Self {
            repo: Repository::new(store, latency),
        }
    }

    pub async fn get_all(&self) -> Vec<Deal> {
        self.repo.get_all().await
    }

    pub async fn get_by_id(&self, id: impl ToRecordId) -> RepoResult<Deal> {
        self.repo.get_by_id(id).await
    }

    pub async fn create(&self, dto: DealDto) -> Deal {
        self.repo
            .create_with(|id, metadata| Deal::from_dto(id, dto, metadata))
            .await
    }

    pub async fn update(&self, id: impl ToRecordId, patch: DealPatch) -> RepoResult<Deal> {
        self.repo
            .update_with(Operation::Update, id, |deal| deal.apply(patch))
            .await
    }

    pub async fn delete(&self, id: impl ToRecordId) -> RepoResult<Deal> {
        self.repo.delete(id).await
    }

    /// Сделки на заданной стадии в исходном порядке
    pub async fn get_by_stage(&self, stage: DealStage) -> Vec<Deal> {
        self.repo.query(|deal| deal.stage == stage).await
    }

    /// Перевод сделки на другую стадию (меняется только стадия)
    pub async fn update_stage(
        &self,
        id: impl ToRecordId,
        stage: DealStage,
    ) -> RepoResult<Deal> {
        self.repo
            .update_with(Operation::UpdateStage, id, |deal| deal.stage = stage)
            .await
    }

    pub async fn list(&self, filter: &ListFilter<DealStage>) -> Vec<Deal> {
        let base = match filter.status {
            FilterValue::Only(stage) => self.get_by_stage(stage).await,
            FilterValue::All => self.get_all().await,
        };
        filter.apply(&base)
    }

    /// Вставка тестовых данных (без имитируемой задержки)
    pub async fn insert_test_data(&self) -> usize {
        let data = vec![
            DealDto {
                title: "CRM rollout".into(),
                company: "TechCorp Solutions".into(),
                contact_name: Some("Sarah Johnson".into()),
                contact_email: Some("sarah.johnson@techcorp.com".into()),
                source: Some(LeadSource::Website),
                stage: DealStage::New,
                value: 25000.0,
                probability: Some(10.0),
                ..Default::default()
            },
            DealDto {
                title: "Annual Pro plan".into(),
                company: "StartupXYZ".into(),
                contact_name: Some("Mike Chen".into()),
                source: Some(LeadSource::LinkedIn),
                stage: DealStage::Proposal,
                value: 12000.0,
                probability: Some(60.0),
                expected_close_date: NaiveDate::from_ymd_opt(2026, 11, 30),
                ..Default::default()
            },
            DealDto {
                title: "Store network expansion".into(),
                company: "Global Retail Inc".into(),
                contact_name: Some("Emily Davis".into()),
                source: Some(LeadSource::Referral),
                stage: DealStage::Proposal,
                value: 54000.0,
                probability: Some(45.0),
                assigned_to: Some("Jordan Lee".into()),
                ..Default::default()
            },
            DealDto {
                title: "Clinic scheduling suite".into(),
                company: "HealthPlus Clinics".into(),
                contact_name: Some("Lisa Thompson".into()),
                source: Some(LeadSource::GoogleAds),
                stage: DealStage::ClosedWon,
                value: 18500.0,
                probability: Some(100.0),
                ..Default::default()
            },
        ];

        self.repo.seed(data, Deal::from_dto).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::error::RepositoryError;
    use contracts::domain::common::RecordId;

    fn service() -> DealService {
        DealService::new(Arc::new(RecordStore::new()), Latency::disabled())
    }

    fn dto(title: &str, stage: DealStage) -> DealDto {
        DealDto {
            title: title.into(),
            company: "Initech".into(),
            stage,
            value: 500.0,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_get_by_stage_keeps_original_order() {
        let svc = service();
        for (title, stage) in [
            ("a", DealStage::New),
            ("b", DealStage::Proposal),
            ("c", DealStage::Proposal),
            ("d", DealStage::ClosedWon),
        ] {
            svc.create(dto(title, stage)).await;
        }
        let found = svc.get_by_stage(DealStage::Proposal).await;
        let titles: Vec<_> = found.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "c"]);
        let ids: Vec<_> = found.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![RecordId(2), RecordId(3)]);
    }

    #[tokio::test]
    async fn test_update_stage_touches_only_stage() {
        let svc = service();
        let created = svc.create(dto("a", DealStage::New)).await;
        let moved = svc
            .update_stage(created.id, DealStage::Negotiation)
            .await
            .unwrap();
        assert_eq!(moved.stage, DealStage::Negotiation);
        assert_eq!(
            Deal {
                stage: created.stage,
                metadata: created.metadata,
                ..moved.clone()
            },
            created
        );
    }

    #[tokio::test]
    async fn test_update_missing_deal_fails() {
        let svc = service();
        svc.insert_test_data().await;
        let snapshot = svc.get_all().await;
        let err = svc
            .update(999i64, DealPatch::stage(DealStage::ClosedLost))
            .await
            .unwrap_err();
        assert_eq!(err, RepositoryError::not_found("Deal", "999"));
        assert!(svc
            .update_stage("999", DealStage::ClosedLost)
            .await
            .is_err());
        assert_eq!(svc.get_all().await, snapshot);
    }

    #[tokio::test]
    async fn test_update_merges_patch() {
        let svc = service();
        let created = svc.create(dto("a", DealStage::New)).await;
        let patch = DealPatch {
            value: Some(750.0),
            notes: Some(Some("Follow up Monday".into())),
            ..Default::default()
        };
        let updated = svc.update("1", patch).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.value, 750.0);
        assert_eq!(updated.notes.as_deref(), Some("Follow up Monday"));
        assert_eq!(updated.title, "a");
    }

    #[tokio::test]
    async fn test_delete_returns_removed_deal() {
        let svc = service();
        svc.insert_test_data().await;
        let removed = svc.delete(RecordId(2)).await.unwrap();
        assert_eq!(removed.title, "Annual Pro plan");
        assert_eq!(svc.get_all().await.len(), 3);
        assert!(svc.get_by_id(RecordId(2)).await.is_err());
        let next = svc.create(dto("e", DealStage::New)).await;
        assert_eq!(next.id, RecordId(5));
    }

    #[tokio::test]
    async fn test_list_with_stage_and_search() {
        let svc = service();
        svc.insert_test_data().await;
        let filter = ListFilter::all()
            .with_status(DealStage::Proposal)
            .with_search("emily");
        let found = svc.list(&filter).await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].company, "Global Retail Inc");
    }
}
