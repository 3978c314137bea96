use serde::{Deserialize, Serialize};

use crate::enums::{DealStage, EnumCode, LeadSource, LeadStatus};
use crate::shared::list_filter::ALL;

/// Пункт выпадающего списка
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Пункты перечисления, первым идёт «все»
pub fn options_with_all<E: EnumCode>(all_label: &str) -> Vec<SelectOption> {
    std::iter::once(SelectOption::new(ALL, all_label))
        .chain(
            E::all()
                .iter()
                .map(|v| SelectOption::new(v.code(), v.display_name())),
        )
        .collect()
}

/// Все перечисления для фильтров и форм
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub lead_statuses: Vec<SelectOption>,
    pub deal_stages: Vec<SelectOption>,
    pub sources: Vec<SelectOption>,
}

impl FilterOptions {
    pub fn build() -> Self {
        Self {
            lead_statuses: options_with_all::<LeadStatus>("All Status"),
            deal_stages: options_with_all::<DealStage>("All Stages"),
            sources: options_with_all::<LeadSource>("All Sources"),
        }
    }
}
