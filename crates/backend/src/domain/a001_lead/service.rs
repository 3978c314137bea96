use std::sync::Arc;

use chrono::Utc;
use contracts::domain::a001_lead::{Lead, LeadDto, LeadPatch};
use contracts::domain::common::ToRecordId;
use contracts::enums::{LeadSource, LeadStatus};
use contracts::shared::list_filter::{FilterValue, ListFilter};

use crate::shared::data::latency::{Latency, Operation};
use crate::shared::data::record_store::RecordStore;
use crate::shared::data::repository::Repository;
use crate::shared::error::RepoResult;

/// Сервис лидов: CRUD, выборка по статусу, смена статуса
#[derive(Debug, Clone)]
pub struct LeadService {
    repo: Repository<Lead>,
}

impl LeadService {
    pub fn new(store: Arc<RecordStore<Lead>>, latency: Latency) -> Self {
        Self {
            repo: Repository::new(store, latency),
        }
    }

    /// Получение списка всех лидов
    pub async fn get_all(&self) -> Vec<Lead> {
        self.repo.get_all().await
    }

    /// Получение лида по ID
    pub async fn get_by_id(&self, id: impl ToRecordId) -> RepoResult<Lead> {
        self.repo.get_by_id(id).await
    }

    /// Создание нового лида
    pub async fn create(&self, dto: LeadDto) -> Lead {
        self.repo
            .create_with(|id, metadata| Lead::from_dto(id, dto, metadata))
            .await
    }

    /// Частичное обновление лида
    pub async fn update(&self, id: impl ToRecordId, patch: LeadPatch) -> RepoResult<Lead> {
        self.repo
            .update_with(Operation::Update, id, |lead| lead.apply(patch))
            .await
    }

    /// Удаление лида, возвращает удалённую запись
    pub async fn delete(&self, id: impl ToRecordId) -> RepoResult<Lead> {
        self.repo.delete(id).await
    }

    /// Лиды с заданным статусом в исходном порядке
    pub async fn get_by_status(&self, status: LeadStatus) -> Vec<Lead> {
        self.repo.query(|lead| lead.status == status).await
    }

    /// Смена статуса с отметкой о последнем контакте
    pub async fn update_status(
        &self,
        id: impl ToRecordId,
        status: LeadStatus,
    ) -> RepoResult<Lead> {
        let now = Utc::now();
        self.repo
            .update_with(Operation::UpdateStage, id, |lead| lead.set_status(status, now))
            .await
    }

    /// Список под фильтрами; фильтр по статусу уходит в запрос к хранилищу
    pub async fn list(&self, filter: &ListFilter<LeadStatus>) -> Vec<Lead> {
        let base = match filter.status {
            FilterValue::Only(status) => self.get_by_status(status).await,
            FilterValue::All => self.get_all().await,
        };
        filter.apply(&base)
    }

    /// Вставка тестовых данных (без имитируемой задержки)
    pub async fn insert_test_data(&self) -> usize {
        let data = vec![
            LeadDto {
                name: "Sarah Johnson".into(),
                company: "TechCorp Solutions".into(),
                email: Some("sarah.johnson@techcorp.com".into()),
                phone: Some("+1 (555) 123-4567".into()),
                source: LeadSource::Website,
                status: LeadStatus::New,
                value: 25000.0,
                website_url: Some("https://techcorp.com".into()),
                team_size: Some("51-200".into()),
                category: Some("SaaS".into()),
                sales_rep: Some("Alex Morgan".into()),
                notes: Some("Interested in the enterprise plan".into()),
                ..Default::default()
            },
            LeadDto {
                name: "Mike Chen".into(),
                company: "StartupXYZ".into(),
                email: Some("mike@startupxyz.io".into()),
                source: LeadSource::LinkedIn,
                status: LeadStatus::Contacted,
                value: 12000.0,
                arr: 480000.0,
                linkedin_url: Some("https://linkedin.com/in/mikechen".into()),
                funding_type: Some("Seed".into()),
                edition: Some("Pro".into()),
                ..Default::default()
            },
            LeadDto {
                name: "Emily Davis".into(),
                company: "Global Retail Inc".into(),
                source: LeadSource::Referral,
                status: LeadStatus::Qualified,
                value: 54000.0,
                team_size: Some("1000+".into()),
                assigned_to: Some("Jordan Lee".into()),
                ..Default::default()
            },
            LeadDto {
                name: "David Park".into(),
                company: "FinEdge Capital".into(),
                email: Some("dpark@finedge.com".into()),
                source: LeadSource::TradeShow,
                status: LeadStatus::Unqualified,
                value: 8000.0,
                notes: Some("Budget frozen until next fiscal year".into()),
                ..Default::default()
            },
            LeadDto {
                name: "Lisa Thompson".into(),
                company: "HealthPlus Clinics".into(),
                source: LeadSource::GoogleAds,
                status: LeadStatus::New,
                value: 18500.0,
                category: Some("Healthcare".into()),
                ..Default::default()
            },
        ];

        self.repo.seed(data, Lead::from_dto).await
    }
}
