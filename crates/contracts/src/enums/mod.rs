pub mod deal_stage;
pub mod lead_source;
pub mod lead_status;

pub use deal_stage::DealStage;
pub use lead_source::LeadSource;
pub use lead_status::LeadStatus;

/// Закрытое перечисление с кодом для API и подписью для UI
pub trait EnumCode: Sized + Copy + PartialEq + 'static {
    /// Код значения (как в JSON)
    fn code(&self) -> &'static str;

    /// Человекочитаемое название
    fn display_name(&self) -> &'static str;

    /// Все значения в порядке отображения
    fn all() -> &'static [Self];

    /// Строгий разбор из кода
    fn from_code(code: &str) -> Option<Self> {
        Self::all().iter().copied().find(|v| v.code() == code)
    }
}
