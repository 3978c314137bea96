use serde::{Deserialize, Serialize};
use std::fmt;

/// Числовой идентификатор записи, выдаётся хранилищем
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl RecordId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Следующий идентификатор после текущего
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Разбор идентификатора из текстового представления.
    ///
    /// Берётся целочисленный префикс после пробелов (`" 12abc"` → 12,
    /// `"3.9"` → 3). Если цифр нет, возвращается `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim_start();
        let (negative, rest) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return None;
        }
        let value: i64 = rest[..digits].parse().ok()?;
        Some(Self(if negative { -value } else { value }))
    }

    pub fn as_string(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Всё, что можно привести к идентификатору записи на границе сервиса.
///
/// `raw()` сохраняет исходное представление для сообщений об ошибках.
pub trait ToRecordId {
    fn to_record_id(&self) -> Option<RecordId>;

    fn raw(&self) -> String;
}

impl ToRecordId for RecordId {
    fn to_record_id(&self) -> Option<RecordId> {
        Some(*self)
    }

    fn raw(&self) -> String {
        self.as_string()
    }
}

impl ToRecordId for i64 {
    fn to_record_id(&self) -> Option<RecordId> {
        Some(RecordId(*self))
    }

    fn raw(&self) -> String {
        self.to_string()
    }
}

impl ToRecordId for &str {
    fn to_record_id(&self) -> Option<RecordId> {
        RecordId::parse(self)
    }

    fn raw(&self) -> String {
        (*self).to_string()
    }
}

impl ToRecordId for String {
    fn to_record_id(&self) -> Option<RecordId> {
        RecordId::parse(self)
    }

    fn raw(&self) -> String {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer_prefix() {
        assert_eq!(RecordId::parse("42"), Some(RecordId(42)));
        assert_eq!(RecordId::parse("  7"), Some(RecordId(7)));
        assert_eq!(RecordId::parse("12abc"), Some(RecordId(12)));
        assert_eq!(RecordId::parse("3.9"), Some(RecordId(3)));
        assert_eq!(RecordId::parse("-5"), Some(RecordId(-5)));
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert_eq!(RecordId::parse(""), None);
        assert_eq!(RecordId::parse("abc"), None);
        assert_eq!(RecordId::parse("-"), None);
        assert_eq!(RecordId::parse("99999999999999999999999"), None);
    }

    #[test]
    fn test_to_record_id_keeps_raw_input() {
        let input = "17x";
        assert_eq!(input.to_record_id(), Some(RecordId(17)));
        assert_eq!(input.raw(), "17x");
        assert_eq!(5i64.to_record_id(), Some(RecordId(5)));
    }

    #[test]
    fn test_serializes_as_plain_number() {
        assert_eq!(serde_json::to_string(&RecordId(3)).unwrap(), "3");
        let id: RecordId = serde_json::from_str("8").unwrap();
        assert_eq!(id, RecordId(8));
    }
}
