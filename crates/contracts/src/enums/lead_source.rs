use serde::{Deserialize, Serialize};

use super::EnumCode;

/// Источник лида
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LeadSource {
    #[default]
    Website,
    LinkedIn,
    Referral,
    #[serde(rename = "Trade Show")]
    TradeShow,
    #[serde(rename = "Google Ads")]
    GoogleAds,
    #[serde(rename = "Email Campaign")]
    EmailCampaign,
}

impl EnumCode for LeadSource {
    fn code(&self) -> &'static str {
        match self {
            LeadSource::Website => "Website",
            LeadSource::LinkedIn => "LinkedIn",
            LeadSource::Referral => "Referral",
            LeadSource::TradeShow => "Trade Show",
            LeadSource::GoogleAds => "Google Ads",
            LeadSource::EmailCampaign => "Email Campaign",
        }
    }

    // Код и есть подпись
    fn display_name(&self) -> &'static str {
        self.code()
    }

    fn all() -> &'static [Self] {
        &[
            LeadSource::Website,
            LeadSource::LinkedIn,
            LeadSource::Referral,
            LeadSource::TradeShow,
            LeadSource::GoogleAds,
            LeadSource::EmailCampaign,
        ]
    }
}

impl std::fmt::Display for LeadSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_uses_display_codes() {
        let json = serde_json::to_string(&LeadSource::TradeShow).unwrap();
        assert_eq!(json, "\"Trade Show\"");
        let parsed: LeadSource = serde_json::from_str("\"Email Campaign\"").unwrap();
        assert_eq!(parsed, LeadSource::EmailCampaign);
    }

    #[test]
    fn test_from_code_is_case_sensitive() {
        assert_eq!(LeadSource::from_code("LinkedIn"), Some(LeadSource::LinkedIn));
        assert_eq!(LeadSource::from_code("linkedin"), None);
    }
}
