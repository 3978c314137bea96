use std::sync::Arc;

use crate::domain::a001_lead::service::LeadService;
use crate::domain::a002_deal::service::DealService;
use crate::shared::config::StoreConfig;
use crate::shared::data::latency::Latency;
use crate::shared::data::record_store::RecordStore;

/// Состояние приложения, передаваемое в обработчики
///
/// Хранилища живут столько же, сколько процесс, и внедряются в сервисы.
#[derive(Debug, Clone)]
pub struct AppState {
    pub leads: LeadService,
    pub deals: DealService,
}

impl AppState {
    pub fn new(latency: Latency) -> Self {
        Self {
            leads: LeadService::new(Arc::new(RecordStore::new()), latency),
            deals: DealService::new(Arc::new(RecordStore::new()), latency),
        }
    }

    /// Собрать состояние по конфигурации, при необходимости с демо-данными
    pub async fn from_config(config: &StoreConfig) -> Self {
        let state = Self::new(Latency::from_flag(config.simulate_latency));
        if config.seed_demo_data {
            let leads = state.leads.insert_test_data().await;
            let deals = state.deals.insert_test_data().await;
            tracing::info!("Demo data ready: {} leads, {} deals", leads, deals);
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_from_config_seeds_both_stores() {
        let config = StoreConfig {
            seed_demo_data: true,
            simulate_latency: false,
        };
        let state = AppState::from_config(&config).await;
        assert_eq!(state.leads.get_all().await.len(), 5);
        assert_eq!(state.deals.get_all().await.len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_seeding_ignores_simulated_latency() {
        let config = StoreConfig {
            seed_demo_data: true,
            simulate_latency: true,
        };
        let start = tokio::time::Instant::now();
        let state = AppState::from_config(&config).await;
        assert_eq!(start.elapsed(), std::time::Duration::ZERO);

        // Обычные операции по-прежнему ждут
        assert_eq!(state.deals.get_all().await.len(), 4);
        assert!(start.elapsed() > std::time::Duration::ZERO);
    }

    #[tokio::test]
    async fn test_stores_are_independent() {
        let config = StoreConfig {
            seed_demo_data: false,
            simulate_latency: false,
        };
        let state = AppState::from_config(&config).await;
        assert!(state.leads.get_all().await.is_empty());
        state.leads.insert_test_data().await;
        assert!(state.deals.get_all().await.is_empty());
    }
}
