use serde::{Deserialize, Serialize};

/// Статус места в текущем снимке плана зала.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    Available,
    /// Место удерживается чужим незавершённым заказом.
    Reserved,
    Sold,
}

/// Место на плане зала, как его отдаёт слой данных витрины.
///
/// Запись только для чтения: движок никогда её не изменяет.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    pub place_id: String,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub row: Option<String>,
    #[serde(default)]
    pub seat: Option<String>,
    #[serde(default)]
    pub section: Option<String>,
    pub status: SeatStatus,
}

impl Seat {
    /// Доступное место без координат и секции.
    pub fn new(place_id: impl Into<String>, row: impl Into<String>, seat: impl Into<String>) -> Self {
        Self {
            place_id: place_id.into(),
            x: None,
            y: None,
            row: Some(row.into()),
            seat: Some(seat.into()),
            section: None,
            status: SeatStatus::Available,
        }
    }

    pub fn in_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn with_status(mut self, status: SeatStatus) -> Self {
        self.status = status;
        self
    }

    /// Пустой `placeId` — битая запись, такое место ни с чем не соседствует.
    pub fn is_well_formed(&self) -> bool {
        !self.place_id.trim().is_empty()
    }

    pub fn position(&self) -> Option<(f64, f64)> {
        match (self.x, self.y) {
            (Some(x), Some(y)) => Some((x, y)),
            _ => None,
        }
    }
}
