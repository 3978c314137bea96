//! Вспомогательные функции для частичных обновлений.

/// Слить значение необязательного поля из патча
pub fn merge_opt<T>(target: &mut Option<T>, patch: Option<Option<T>>) {
    if let Some(v) = patch {
        *target = v;
    }
}
