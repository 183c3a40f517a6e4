//! Правила выбора мест поверх проверок смежности.
//!
//! Выбор — неизменяемое значение: каждое правило либо возвращает новый выбор,
//! либо причину отказа, и никогда не применяется частично.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::{SeatEngine, SeatMap};

/// Упорядоченный список `placeId` выбранных мест.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection(Vec<String>);

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, place_id: &str) -> bool {
        self.0.iter().any(|id| id == place_id)
    }

    fn with(&self, place_id: &str) -> Self {
        let mut ids = self.0.clone();
        ids.push(place_id.to_string());
        Self(ids)
    }

    fn without(&self, place_id: &str) -> Self {
        Self(self.0.iter().filter(|id| *id != place_id).cloned().collect())
    }
}

impl<'a> FromIterator<&'a str> for Selection {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(str::to_string).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("seat {0} is already selected")]
    AlreadySelected(String),
    #[error("seat {0} is not selected")]
    NotSelected(String),
    #[error("a selection is limited to {max} seats")]
    SelectionFull { max: usize },
    #[error("seat {0} is not on the seat map")]
    UnknownSeat(String),
    #[error("seat {0} is not available")]
    SeatUnavailable(String),
    #[error("seat {0} is selected more than once")]
    DuplicateSeat(String),
    #[error("seat {0} is not next to any selected seat")]
    StrandedSeat(String),
    #[error("deselecting seat {0} would strand other selected seats")]
    WouldStrand(String),
    #[error("no seats selected")]
    EmptySelection,
    #[error("selected seats do not form one connected group")]
    Disconnected,
}

impl SelectionError {
    /// Стабильный код для клиентов, которые сами подбирают текст сообщения.
    pub fn code(&self) -> &'static str {
        match self {
            SelectionError::AlreadySelected(_) => "already_selected",
            SelectionError::NotSelected(_) => "not_selected",
            SelectionError::SelectionFull { .. } => "selection_full",
            SelectionError::UnknownSeat(_) => "unknown_seat",
            SelectionError::SeatUnavailable(_) => "seat_unavailable",
            SelectionError::DuplicateSeat(_) => "duplicate_seat",
            SelectionError::StrandedSeat(_) => "stranded_seat",
            SelectionError::WouldStrand(_) => "would_strand",
            SelectionError::EmptySelection => "empty_selection",
            SelectionError::Disconnected => "disconnected",
        }
    }

    pub fn place_id(&self) -> Option<&str> {
        match self {
            SelectionError::AlreadySelected(id)
            | SelectionError::NotSelected(id)
            | SelectionError::UnknownSeat(id)
            | SelectionError::SeatUnavailable(id)
            | SelectionError::DuplicateSeat(id)
            | SelectionError::StrandedSeat(id)
            | SelectionError::WouldStrand(id) => Some(id),
            SelectionError::SelectionFull { .. }
            | SelectionError::EmptySelection
            | SelectionError::Disconnected => None,
        }
    }
}

impl SeatEngine {
    /// Добавить место в выбор.
    pub fn select(&self, selection: &Selection, place_id: &str, map: &SeatMap) -> Result<Selection, SelectionError> {
        if selection.contains(place_id) {
            return Err(SelectionError::AlreadySelected(place_id.to_string()));
        }

        let max = self.config.max_selection;
        if selection.len() >= max {
            debug!(place_id, max, "selection is full");
            return Err(SelectionError::SelectionFull { max });
        }

        let seat = map
            .get(place_id)
            .ok_or_else(|| SelectionError::UnknownSeat(place_id.to_string()))?;
        if !self.is_selectable(seat) {
            return Err(SelectionError::SeatUnavailable(place_id.to_string()));
        }

        if !self.can_add_seat(seat, selection.ids(), map) {
            debug!(place_id, selected = selection.len(), "rejecting stranded seat");
            return Err(SelectionError::StrandedSeat(place_id.to_string()));
        }

        Ok(selection.with(place_id))
    }

    /// Убрать место из выбора, если оставшиеся места остаются связными.
    pub fn deselect(&self, selection: &Selection, place_id: &str, map: &SeatMap) -> Result<Selection, SelectionError> {
        if !selection.contains(place_id) {
            return Err(SelectionError::NotSelected(place_id.to_string()));
        }

        let remaining = selection.without(place_id);
        if selection.len() > 1 && !self.is_selection_connected(remaining.ids(), map) {
            debug!(place_id, remaining = remaining.len(), "deselect would strand seats");
            return Err(SelectionError::WouldStrand(place_id.to_string()));
        }

        Ok(remaining)
    }

    /// Клик по месту на схеме: выбранное снимается, невыбранное добавляется.
    pub fn toggle(&self, selection: &Selection, place_id: &str, map: &SeatMap) -> Result<Selection, SelectionError> {
        if selection.contains(place_id) {
            self.deselect(selection, place_id, map)
        } else {
            self.select(selection, place_id, map)
        }
    }

    /// Последняя проверка перед оформлением заказа.
    pub fn confirm(&self, selection: &Selection, map: &SeatMap) -> Result<(), SelectionError> {
        if selection.is_empty() {
            return Err(SelectionError::EmptySelection);
        }

        let max = self.config.max_selection;
        if selection.len() > max {
            return Err(SelectionError::SelectionFull { max });
        }

        let mut seen = HashSet::with_capacity(selection.len());
        for id in selection.ids() {
            if !seen.insert(id.as_str()) {
                return Err(SelectionError::DuplicateSeat(id.clone()));
            }
            let seat = map.get(id).ok_or_else(|| SelectionError::UnknownSeat(id.clone()))?;
            if !self.is_selectable(seat) {
                return Err(SelectionError::SeatUnavailable(id.clone()));
            }
        }

        if !self.is_selection_connected(selection.ids(), map) {
            return Err(SelectionError::Disconnected);
        }
        Ok(())
    }

    /// Выбранные места, которые после обновления снимка пропали или стали недоступны.
    pub fn stale_seats(&self, selection: &Selection, map: &SeatMap) -> Vec<String> {
        selection
            .ids()
            .iter()
            .filter(|id| !map.get(id).is_some_and(|seat| self.is_selectable(seat)))
            .cloned()
            .collect()
    }
}
