use super::{EntityMetadata, RecordId};

/// Трейт для корня агрегата
///
/// Определяет обязательные методы и метаданные для всех записей CRM
pub trait AggregateRoot {
    // ============================================================================
    // Методы экземпляра (данные конкретной записи)
    // ============================================================================

    /// Получить ID записи
    fn id(&self) -> RecordId;

    /// Установить ID записи (используется только хранилищем)
    fn set_id(&mut self, id: RecordId);

    /// Получить изменяемые метаданные
    fn metadata_mut(&mut self) -> &mut EntityMetadata;

    // ============================================================================
    // Метаданные класса агрегата (статические данные)
    // ============================================================================

    /// Имя коллекции (например, "leads")
    fn collection_name() -> &'static str;

    /// Имя элемента для UI и сообщений (единственное число)
    fn element_name() -> &'static str;
}
