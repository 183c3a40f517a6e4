use std::collections::HashMap;

use crate::models::Seat;

/// Снимок плана зала на один вызов движка.
///
/// Индексирует места по `placeId`; при повторе идентификатора для поиска
/// используется первая запись. Записи с пустым `placeId` в индекс не попадают,
/// но остаются в общем списке.
#[derive(Debug, Clone, Default)]
pub struct SeatMap {
    seats: Vec<Seat>,
    index: HashMap<String, usize>,
}

impl SeatMap {
    pub fn new(seats: Vec<Seat>) -> Self {
        let mut index = HashMap::with_capacity(seats.len());
        for (i, seat) in seats.iter().enumerate() {
            if seat.is_well_formed() {
                index.entry(seat.place_id.clone()).or_insert(i);
            }
        }
        Self { seats, index }
    }

    pub fn get(&self, place_id: &str) -> Option<&Seat> {
        self.index.get(place_id).map(|&i| &self.seats[i])
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }
}
