use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateRoot, EntityMetadata, RecordId};
use crate::enums::{LeadSource, LeadStatus};
use crate::shared::list_filter::{FilterValue, ListFilter, Searchable};
use crate::shared::number::{lenient_amount, lenient_amount_opt};
use crate::shared::patch::merge_opt;

// ============================================================================
// Aggregate Root
// ============================================================================

/// Лид: потенциальный клиент.
///
/// Объединяет две формы данных: карточку компании (сайт, ARR, размер
/// команды, финансирование) и карточку контакта (email, телефон).
/// Всё, кроме имени, компании, источника, статуса и суммы, необязательно.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    #[serde(rename = "Id")]
    pub id: RecordId,

    pub name: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    pub source: LeadSource,
    pub status: LeadStatus,

    /// Оценочная сумма сделки
    #[serde(default, deserialize_with = "lenient_amount")]
    pub value: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub arr: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funding_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales_rep: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,

    /// Момент последнего контакта, проставляется при смене статуса
    #[serde(default)]
    pub last_contacted_at: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl Lead {
    /// Собрать лид из DTO создания с выданным хранилищем ID
    pub fn from_dto(id: RecordId, dto: LeadDto, metadata: EntityMetadata) -> Self {
        Self {
            id,
            name: dto.name,
            company: dto.company,
            email: dto.email,
            phone: dto.phone,
            source: dto.source,
            status: dto.status,
            value: dto.value,
            arr: dto.arr,
            notes: dto.notes,
            website_url: dto.website_url,
            linkedin_url: dto.linkedin_url,
            team_size: dto.team_size,
            category: dto.category,
            funding_type: dto.funding_type,
            edition: dto.edition,
            sales_rep: dto.sales_rep,
            assigned_to: dto.assigned_to,
            last_contacted_at: None,
            metadata,
        }
    }

    /// Применить частичное обновление: меняются только переданные поля
    pub fn apply(&mut self, patch: LeadPatch) {
        let LeadPatch {
            name,
            company,
            email,
            phone,
            source,
            status,
            value,
            arr,
            notes,
            website_url,
            linkedin_url,
            team_size,
            category,
            funding_type,
            edition,
            sales_rep,
            assigned_to,
            last_contacted_at,
        } = patch;

        if let Some(v) = name {
            self.name = v;
        }
        if let Some(v) = company {
            self.company = v;
        }
        if let Some(v) = source {
            self.source = v;
        }
        if let Some(v) = status {
            self.status = v;
        }
        if let Some(v) = value {
            self.value = v;
        }
        if let Some(v) = arr {
            self.arr = v;
        }
        merge_opt(&mut self.email, email);
        merge_opt(&mut self.phone, phone);
        merge_opt(&mut self.notes, notes);
        merge_opt(&mut self.website_url, website_url);
        merge_opt(&mut self.linkedin_url, linkedin_url);
        merge_opt(&mut self.team_size, team_size);
        merge_opt(&mut self.category, category);
        merge_opt(&mut self.funding_type, funding_type);
        merge_opt(&mut self.edition, edition);
        merge_opt(&mut self.sales_rep, sales_rep);
        merge_opt(&mut self.assigned_to, assigned_to);
        merge_opt(&mut self.last_contacted_at, last_contacted_at);
    }

    /// Смена статуса; контакт фиксируется для всех статусов, кроме `new`
    pub fn set_status(&mut self, status: LeadStatus, now: DateTime<Utc>) {
        self.status = status;
        self.last_contacted_at = match status {
            LeadStatus::New => None,
            _ => Some(now),
        };
    }
}

impl AggregateRoot for Lead {
    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.metadata
    }

    fn collection_name() -> &'static str {
        "leads"
    }

    fn element_name() -> &'static str {
        "Lead"
    }
}

impl Searchable for Lead {
    type Status = LeadStatus;

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.company.as_str()];
        if let Some(email) = self.email.as_deref() {
            fields.push(email);
        }
        fields
    }

    fn status(&self) -> LeadStatus {
        self.status
    }

    fn source(&self) -> Option<LeadSource> {
        Some(self.source)
    }
}

// ============================================================================
// DTOs
// ============================================================================

/// DTO для создания лида
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadDto {
    pub name: String,
    pub company: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub source: LeadSource,
    #[serde(default)]
    pub status: LeadStatus,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub value: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub arr: f64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub team_size: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub funding_type: Option<String>,
    #[serde(default)]
    pub edition: Option<String>,
    #[serde(default)]
    pub sales_rep: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
}

/// Частичное обновление лида.
///
/// У патча нет поля ID: идентичность записи через обновление не меняется,
/// лишние поля JSON (включая `Id`) игнорируются.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub phone: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<LeadSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<LeadStatus>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_amount_opt"
    )]
    pub value: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_amount_opt"
    )]
    pub arr: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub notes: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub website_url: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub linkedin_url: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub team_size: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub category: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub funding_type: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub edition: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub sales_rep: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub assigned_to: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub last_contacted_at: Option<Option<DateTime<Utc>>>,
}

impl LeadPatch {
    /// Патч, меняющий только статус
    pub fn status(status: LeadStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

/// Тело запроса смены статуса
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeadStatusChange {
    pub status: LeadStatus,
}

/// Параметры списка лидов (`?q=&status=&source=`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadListQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

impl LeadListQuery {
    /// Построить фильтр; `None`, если статус или источник не из перечня
    pub fn to_filter(&self) -> Option<ListFilter<LeadStatus>> {
        Some(ListFilter {
            search: self.q.clone().unwrap_or_default(),
            status: FilterValue::parse(self.status.as_deref())?,
            source: FilterValue::parse(self.source.as_deref())?,
        })
    }
}
