//! Движок смежности мест и проверки связности выбора.
//!
//! Все проверки чистые: на вход приходит снимок плана зала и текущий выбор,
//! на выход — решение. Между вызовами движок ничего не хранит, поэтому после
//! каждого обновления статусов вызывающая сторона просто спрашивает заново.

pub mod adjacency;
pub mod connectivity;
pub mod labels;
pub mod seat_map;
pub mod selection;

pub use seat_map::SeatMap;
pub use selection::{Selection, SelectionError};

use crate::config::EngineConfig;
use crate::models::{Seat, SeatStatus};

#[derive(Debug, Clone, Default)]
pub struct SeatEngine {
    config: EngineConfig,
}

impl SeatEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Можно ли взять место в выбор. Невыбираемое место служит барьером.
    pub fn is_selectable(&self, seat: &Seat) -> bool {
        match seat.status {
            SeatStatus::Available => true,
            SeatStatus::Reserved => self.config.reserved_is_selectable,
            SeatStatus::Sold => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_follows_policy() {
        let reserved = Seat::new("a", "R1", "1").with_status(SeatStatus::Reserved);

        assert!(SeatEngine::default().is_selectable(&reserved));

        let strict = SeatEngine::new(EngineConfig {
            reserved_is_selectable: false,
            ..EngineConfig::default()
        });
        assert!(!strict.is_selectable(&reserved));
    }

    #[test]
    fn sold_is_never_selectable() {
        let sold = Seat::new("a", "R1", "1").with_status(SeatStatus::Sold);
        assert!(!SeatEngine::default().is_selectable(&sold));
    }
}
