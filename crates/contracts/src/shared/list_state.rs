use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateRoot, RecordId};
use crate::shared::list_filter::{ListFilter, Searchable};

/// Локальная копия списка записей на стороне клиента.
///
/// Результаты вызовов сервиса вливаются сюда, а видимый набор
/// пересчитывается фильтром при каждом изменении.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordList<T> {
    items: Vec<T>,
}

impl<T> Default for RecordList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: AggregateRoot + Clone> RecordList<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Добавить только что созданную запись в начало списка
    pub fn prepend(&mut self, item: T) {
        self.items.insert(0, item);
    }

    /// Заменить запись с тем же ID на месте; `false`, если такой нет
    pub fn replace(&mut self, item: T) -> bool {
        self.try_replace(item).is_ok()
    }

    /// Заменить на месте или добавить в начало
    pub fn upsert(&mut self, item: T) {
        if let Err(item) = self.try_replace(item) {
            self.prepend(item);
        }
    }

    fn try_replace(&mut self, item: T) -> Result<(), T> {
        match self.items.iter().position(|existing| existing.id() == item.id()) {
            Some(index) => {
                self.items[index] = item;
                Ok(())
            }
            None => Err(item),
        }
    }

    pub fn remove(&mut self, id: RecordId) -> Option<T> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }

    /// Видимый набор записей под текущими фильтрами
    pub fn visible(&self, filter: &ListFilter<T::Status>) -> Vec<T>
    where
        T: Searchable,
    {
        filter.apply(&self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_deal::{Deal, DealDto};
    use crate::domain::common::EntityMetadata;
    use crate::enums::DealStage;

    fn deal(id: i64, title: &str, stage: DealStage) -> Deal {
        let dto = DealDto {
            title: title.into(),
            company: "Initech".into(),
            stage,
            ..Default::default()
        };
        Deal::from_dto(RecordId(id), dto, EntityMetadata::new())
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut list = RecordList::new(vec![
            deal(1, "A", DealStage::New),
            deal(2, "B", DealStage::New),
            deal(3, "C", DealStage::New),
        ]);
        let mut updated = deal(2, "B", DealStage::Proposal);
        updated.value = 100.0;
        assert!(list.replace(updated));
        let order: Vec<_> = list.items().iter().map(|d| d.id.value()).collect();
        assert_eq!(order, vec![1, 2, 3]);
        assert_eq!(list.get(RecordId(2)).map(|d| d.stage), Some(DealStage::Proposal));
        assert!(!list.replace(deal(9, "Z", DealStage::New)));
    }

    #[test]
    fn test_upsert_prepends_new_records() {
        let mut list = RecordList::new(vec![deal(1, "A", DealStage::New)]);
        list.upsert(deal(2, "B", DealStage::New));
        assert_eq!(list.items()[0].id, RecordId(2));
        list.upsert(deal(1, "A2", DealStage::New));
        assert_eq!(list.len(), 2);
        assert_eq!(list.items()[1].title, "A2");
    }

    #[test]
    fn test_remove_and_visible() {
        let mut list = RecordList::new(vec![
            deal(1, "A", DealStage::Proposal),
            deal(2, "B", DealStage::New),
            deal(3, "C", DealStage::Proposal),
        ]);
        assert!(list.remove(RecordId(1)).is_some());
        assert!(list.remove(RecordId(1)).is_none());
        let filter = ListFilter::all().with_status(DealStage::Proposal);
        let visible = list.visible(&filter);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, RecordId(3));
    }
}
