use std::collections::{HashSet, VecDeque};

use tracing::trace;

use super::{SeatEngine, SeatMap};
use crate::models::Seat;

impl SeatEngine {
    /// Можно ли добавить место к текущему выбору, не оставив его в стороне.
    ///
    /// Первое место берётся без ограничений. Каждое следующее должно быть
    /// смежным (с учётом статусов) хотя бы с одним выбранным местом, которое
    /// всё ещё доступно.
    pub fn can_add_seat<S: AsRef<str>>(&self, candidate: &Seat, selection: &[S], map: &SeatMap) -> bool {
        if !candidate.is_well_formed() || !self.is_selectable(candidate) {
            return false;
        }
        if selection.is_empty() {
            return true;
        }

        selection
            .iter()
            .filter_map(|id| map.get(id.as_ref()))
            .filter(|anchor| self.is_selectable(anchor))
            .any(|anchor| self.is_adjacent_considering_status(candidate, anchor, map.seats()))
    }

    /// Образуют ли выбранные места одну связную группу.
    ///
    /// Неизвестный или недоступный идентификатор делает выбор несвязным,
    /// как и выбор длиннее `max_selection`.
    pub fn is_selection_connected<S: AsRef<str>>(&self, place_ids: &[S], map: &SeatMap) -> bool {
        if place_ids.len() <= 1 {
            return true;
        }
        if place_ids.len() > self.config.max_selection {
            trace!(requested = place_ids.len(), max = self.config.max_selection, "selection over the cap");
            return false;
        }

        let resolved: Vec<&Seat> = place_ids
            .iter()
            .filter_map(|id| map.get(id.as_ref()))
            .filter(|seat| self.is_selectable(seat))
            .collect();
        if resolved.len() != place_ids.len() {
            trace!(
                requested = place_ids.len(),
                resolved = resolved.len(),
                "selection references unknown or unavailable seats"
            );
            return false;
        }

        let mut neighbors: Vec<Vec<usize>> = vec![Vec::new(); resolved.len()];
        for i in 0..resolved.len() {
            for j in (i + 1)..resolved.len() {
                if self.is_adjacent_considering_status(resolved[i], resolved[j], map.seats()) {
                    neighbors[i].push(j);
                    neighbors[j].push(i);
                }
            }
        }

        let mut visited = vec![false; resolved.len()];
        let mut queue = VecDeque::from([0]);
        visited[0] = true;
        while let Some(node) = queue.pop_front() {
            for &next in &neighbors[node] {
                if !visited[next] {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }

        let reached: HashSet<&str> = resolved
            .iter()
            .zip(&visited)
            .filter(|(_, seen)| **seen)
            .map(|(seat, _)| seat.place_id.as_str())
            .collect();
        reached.len() == resolved.len()
    }
}
