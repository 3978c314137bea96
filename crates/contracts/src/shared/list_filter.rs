//! Фильтрация списков записей: поиск по тексту, статус, источник.
//!
//! Три предиката независимы и объединяются через AND, поэтому порядок их
//! применения не влияет на результат. Порядок записей сохраняется.

use serde::{Deserialize, Serialize};

use crate::enums::{EnumCode, LeadSource};

/// Sentinel-значение «без фильтра»
pub const ALL: &str = "all";

/// Trait для записей, поддерживающих фильтрацию в списке
pub trait Searchable {
    /// Тип статуса/стадии записи
    type Status: EnumCode;

    /// Поля, по которым идёт текстовый поиск
    fn search_fields(&self) -> Vec<&str>;

    /// Текущий статус/стадия
    fn status(&self) -> Self::Status;

    /// Источник записи, если есть
    fn source(&self) -> Option<LeadSource>;
}

/// Значение фильтра: всё или конкретное значение перечисления
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterValue<T> {
    #[default]
    All,
    Only(T),
}

impl<T: EnumCode> FilterValue<T> {
    /// Разбор из параметра запроса: пусто или `"all"` → `All`,
    /// код из перечня → `Only`, иначе `None`
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw.map(str::trim) {
            None | Some("") | Some(ALL) => Some(FilterValue::All),
            Some(code) => T::from_code(code).map(FilterValue::Only),
        }
    }

    /// Код для параметра запроса
    pub fn code(&self) -> &'static str {
        match self {
            FilterValue::All => ALL,
            FilterValue::Only(v) => v.code(),
        }
    }

    pub fn accepts(&self, value: Option<T>) -> bool {
        match self {
            FilterValue::All => true,
            FilterValue::Only(expected) => value == Some(*expected),
        }
    }
}

/// Набор фильтров списка
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListFilter<S> {
    pub search: String,
    pub status: FilterValue<S>,
    pub source: FilterValue<LeadSource>,
}

impl<S> Default for ListFilter<S> {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: FilterValue::All,
            source: FilterValue::All,
        }
    }
}

impl<S: EnumCode> ListFilter<S> {
    /// Фильтр, пропускающий всё
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_status(mut self, status: S) -> Self {
        self.status = FilterValue::Only(status);
        self
    }

    pub fn with_source(mut self, source: LeadSource) -> Self {
        self.source = FilterValue::Only(source);
        self
    }

    /// Сбросить все фильтры
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Фильтр ничего не отсекает
    pub fn is_passthrough(&self) -> bool {
        self.search.is_empty()
            && self.status == FilterValue::All
            && self.source == FilterValue::All
    }

    pub fn matches_search<T: Searchable<Status = S>>(&self, item: &T) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let term = self.search.to_lowercase();
        item.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
    }

    pub fn matches_status<T: Searchable<Status = S>>(&self, item: &T) -> bool {
        self.status.accepts(Some(item.status()))
    }

    pub fn matches_source<T: Searchable<Status = S>>(&self, item: &T) -> bool {
        self.source.accepts(item.source())
    }

    /// Проверяет, проходит ли запись все три предиката
    pub fn matches<T: Searchable<Status = S>>(&self, item: &T) -> bool {
        self.matches_search(item) && self.matches_status(item) && self.matches_source(item)
    }

    /// Отфильтровать список, сохраняя порядок
    pub fn apply<T: Searchable<Status = S> + Clone>(&self, items: &[T]) -> Vec<T> {
        items.iter().filter(|item| self.matches(*item)).cloned().collect()
    }
}
