use std::time::Duration;

/// Операция репозитория, для которой имитируется задержка сети
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    GetAll,
    GetById,
    Create,
    Update,
    Delete,
    GetByStage,
    UpdateStage,
}

impl Operation {
    pub fn delay(self) -> Duration {
        let ms = match self {
            Operation::GetAll => 350,
            Operation::GetById => 200,
            Operation::Create => 450,
            Operation::Update => 300,
            Operation::Delete => 250,
            Operation::GetByStage => 200,
            Operation::UpdateStage => 300,
        };
        Duration::from_millis(ms)
    }
}

/// Имитация задержки бэкенда; выключена по умолчанию
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Latency {
    enabled: bool,
}

impl Latency {
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn simulated() -> Self {
        Self { enabled: true }
    }

    pub fn from_flag(enabled: bool) -> Self {
        if enabled {
            Self::simulated()
        } else {
            Self::disabled()
        }
    }

    pub async fn wait(&self, op: Operation) {
        if self.enabled {
            tokio::time::sleep(op.delay()).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_is_slowest() {
        assert_eq!(Operation::Create.delay(), Duration::from_millis(450));
        assert!(Operation::GetById.delay() < Operation::GetAll.delay());
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_wait_advances_clock() {
        let start = tokio::time::Instant::now();
        Latency::simulated().wait(Operation::Delete).await;
        assert!(start.elapsed() >= Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_wait_returns_immediately() {
        let start = tokio::time::Instant::now();
        Latency::disabled().wait(Operation::Create).await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
