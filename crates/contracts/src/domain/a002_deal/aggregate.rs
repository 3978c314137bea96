use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateRoot, EntityMetadata, RecordId};
use crate::enums::{DealStage, LeadSource};
use crate::shared::list_filter::{FilterValue, ListFilter, Searchable};
use crate::shared::number::{lenient_amount, lenient_amount_opt, lenient_percent_opt};
use crate::shared::patch::merge_opt;

// ============================================================================
// Aggregate Root
// ============================================================================

/// Сделка в воронке продаж
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    #[serde(rename = "Id")]
    pub id: RecordId,

    pub title: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<LeadSource>,

    pub stage: DealStage,

    /// Сумма сделки
    #[serde(default, deserialize_with = "lenient_amount")]
    pub value: f64,
    /// Вероятность закрытия, 0..=100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_close_date: Option<NaiveDate>,

    /// Лид, из которого выросла сделка; ссылочная целостность не проверяется
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_id: Option<RecordId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,

    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl Deal {
    pub fn from_dto(id: RecordId, dto: DealDto, metadata: EntityMetadata) -> Self {
        Self {
            id,
            title: dto.title,
            company: dto.company,
            contact_name: dto.contact_name,
            contact_email: dto.contact_email,
            source: dto.source,
            stage: dto.stage,
            value: dto.value,
            probability: dto.probability,
            expected_close_date: dto.expected_close_date,
            lead_id: dto.lead_id,
            notes: dto.notes,
            assigned_to: dto.assigned_to,
            metadata,
        }
    }

    /// Применить частичное обновление
    pub fn apply(&mut self, patch: DealPatch) {
        let DealPatch {
            title,
            company,
            contact_name,
            contact_email,
            source,
            stage,
            value,
            probability,
            expected_close_date,
            lead_id,
            notes,
            assigned_to,
        } = patch;

        if let Some(v) = title {
            self.title = v;
        }
        if let Some(v) = company {
            self.company = v;
        }
        if let Some(v) = stage {
            self.stage = v;
        }
        if let Some(v) = value {
            self.value = v;
        }
        merge_opt(&mut self.contact_name, contact_name);
        merge_opt(&mut self.contact_email, contact_email);
        merge_opt(&mut self.source, source);
        merge_opt(&mut self.probability, probability);
        merge_opt(&mut self.expected_close_date, expected_close_date);
        merge_opt(&mut self.lead_id, lead_id);
        merge_opt(&mut self.notes, notes);
        merge_opt(&mut self.assigned_to, assigned_to);
    }
}

impl AggregateRoot for Deal {
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
        "deals"
    }

    fn element_name() -> &'static str {
        "Deal"
    }
}

impl Searchable for Deal {
    type Status = DealStage;

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.company.as_str()];
        fields.extend(self.contact_name.as_deref());
        fields.extend(self.contact_email.as_deref());
        fields
    }

    fn status(&self) -> DealStage {
        self.stage
    }

    fn source(&self) -> Option<LeadSource> {
        self.source
    }
}

// ============================================================================
// DTOs
// ============================================================================

/// DTO для создания сделки
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealDto {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub source: Option<LeadSource>,
    #[serde(default)]
    pub stage: DealStage,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub value: f64,
    #[serde(default, deserialize_with = "lenient_percent_opt")]
    pub probability: Option<f64>,
    #[serde(default)]
    pub expected_close_date: Option<NaiveDate>,
    #[serde(default)]
    pub lead_id: Option<RecordId>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
}

/// Частичное обновление сделки (без поля ID)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub contact_name: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub contact_email: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub source: Option<Option<LeadSource>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<DealStage>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_amount_opt"
    )]
    pub value: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_probability_patch"
    )]
    pub probability: Option<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub expected_close_date: Option<Option<NaiveDate>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub lead_id: Option<Option<RecordId>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub notes: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub assigned_to: Option<Option<String>>,
}

impl DealPatch {
    /// Патч, меняющий только стадию
    pub fn stage(stage: DealStage) -> Self {
        Self {
            stage: Some(stage),
            ..Default::default()
        }
    }
}

fn lenient_probability_patch<'de, D>(deserializer: D) -> Result<Option<Option<f64>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    lenient_percent_opt(deserializer).map(Some)
}

/// Тело запроса смены стадии
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DealStageChange {
    pub stage: DealStage,
}

/// Параметры списка сделок (`?q=&stage=&source=`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DealListQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

impl DealListQuery {
    pub fn to_filter(&self) -> Option<ListFilter<DealStage>> {
        Some(ListFilter {
            search: self.q.clone().unwrap_or_default(),
            status: FilterValue::parse(self.stage.as_deref())?,
            source: FilterValue::parse(self.source.as_deref())?,
        })
    }
}
