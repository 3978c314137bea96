use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Метаданные экземпляра агрегата (lifecycle tracking)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityMetadata {
    /// Дата создания записи
    pub created_at: DateTime<Utc>,
    /// Дата последнего обновления
    pub updated_at: DateTime<Utc>,
}

impl EntityMetadata {
    /// Создать новые метаданные для нового агрегата
    pub fn new() -> Self {
        Self::created_at(Utc::now())
    }

    /// Метаданные с заданным моментом создания
    pub fn created_at(now: DateTime<Utc>) -> Self {
        Self {
            created_at: now,
            updated_at: now,
        }
    }

    /// Обновить timestamp
    pub fn touch(&mut self) {
        let now = Utc::now();
        // Часы могут отставать от момента создания на грубых таймерах
        self.updated_at = now.max(self.created_at);
    }
}

impl Default for EntityMetadata {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_metadata_has_equal_timestamps() {
        let m = EntityMetadata::new();
        assert_eq!(m.created_at, m.updated_at);
    }

    #[test]
    fn test_touch_never_goes_before_creation() {
        let mut m = EntityMetadata::new();
        let created = m.created_at;
        m.touch();
        assert_eq!(m.created_at, created);
        assert!(m.updated_at >= created);
    }

    #[test]
    fn test_serializes_as_camel_case_iso8601() {
        let m = EntityMetadata::new();
        let json = serde_json::to_value(m).unwrap();
        let created = json["createdAt"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(created).is_ok());
        assert!(json.get("updatedAt").is_some());
    }
}
