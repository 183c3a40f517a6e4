//! Смежность двух мест.
//!
//! Сначала сравниваются подписи в пределах ряда; геометрия используется
//! только для соседних рядов и только с жёстким порогом расстояния, потому
//! что координаты в данных площадок бывают неполными или шумными.

use std::cmp::Ordering;

use tracing::trace;

use super::labels::{numeric_value, single_letter};
use super::SeatEngine;
use crate::models::Seat;

/// Места в соседних рядах могут смещаться не больше чем на одну колонку.
const MAX_COLUMN_OFFSET: u32 = 1;

impl SeatEngine {
    /// Могут ли два места вообще быть соседями. Статус не учитывается.
    pub fn is_physically_adjacent(&self, a: &Seat, b: &Seat) -> bool {
        if !a.is_well_formed() || !b.is_well_formed() || a.place_id == b.place_id {
            return false;
        }
        if a.section != b.section {
            return false;
        }

        if shares_row(a, b) {
            same_row_adjacent(a, b)
        } else {
            self.cross_row_adjacent(a, b)
        }
    }

    /// Смежность с учётом статусов: проданные места не соединяют и не
    /// пропускают соединение через себя.
    pub fn is_adjacent_considering_status(&self, a: &Seat, b: &Seat, all: &[Seat]) -> bool {
        if !self.is_selectable(a) || !self.is_selectable(b) {
            return false;
        }
        if !self.is_physically_adjacent(a, b) {
            return false;
        }

        // Для соседних рядов порог расстояния уже ограничил связь.
        if shares_row(a, b) && self.is_path_blocked(a, b, all) {
            trace!(a = %a.place_id, b = %b.place_id, "row path blocked by unavailable seat");
            return false;
        }
        true
    }

    fn cross_row_adjacent(&self, a: &Seat, b: &Seat) -> bool {
        let (Some((ax, ay)), Some((bx, by))) = (a.position(), b.position()) else {
            return false;
        };

        let (Some(row_a), Some(row_b)) = (label_number(&a.row), label_number(&b.row)) else {
            return false;
        };
        let row_gap = row_a.abs_diff(row_b);
        if row_gap == 0 || row_gap > self.config.max_row_gap {
            return false;
        }

        let (Some(col_a), Some(col_b)) = (label_number(&a.seat), label_number(&b.seat)) else {
            return false;
        };
        if col_a.abs_diff(col_b) > MAX_COLUMN_OFFSET {
            return false;
        }

        (ax - bx).hypot(ay - by) <= self.config.max_cross_row_distance
    }

    /// Есть ли между двумя местами одного ряда недоступное место.
    fn is_path_blocked(&self, a: &Seat, b: &Seat, all: &[Seat]) -> bool {
        let mut row: Vec<&Seat> = all
            .iter()
            .filter(|s| s.section == a.section && s.row == a.row)
            .collect();
        order_row(&mut row);

        let position = |target: &Seat| row.iter().position(|s| s.place_id == target.place_id);
        let (Some(i), Some(j)) = (position(a), position(b)) else {
            return false;
        };

        let (lo, hi) = (i.min(j), i.max(j));
        row.get(lo + 1..hi)
            .is_some_and(|between| between.iter().any(|s| !self.is_selectable(s)))
    }
}

fn shares_row(a: &Seat, b: &Seat) -> bool {
    matches!((&a.row, &b.row), (Some(ra), Some(rb)) if ra == rb)
}

fn same_row_adjacent(a: &Seat, b: &Seat) -> bool {
    if let (Some(na), Some(nb)) = (label_number(&a.seat), label_number(&b.seat)) {
        return na.abs_diff(nb) == 1;
    }

    let letter = |seat: &Seat| seat.seat.as_deref().and_then(single_letter);
    match (letter(a), letter(b)) {
        (Some(la), Some(lb)) => (la as u32).abs_diff(lb as u32) == 1,
        _ => false,
    }
}

fn label_number(label: &Option<String>) -> Option<u32> {
    label.as_deref().and_then(numeric_value)
}

/// Слева направо: по `x`, если координата есть у всех мест ряда, затем по
/// номеру места, затем по исходной подписи.
fn order_row(row: &mut [&Seat]) {
    let by_x = row.iter().all(|s| s.x.is_some());
    row.sort_by(|a, b| {
        let x_order = match (a.x, b.x) {
            (Some(ax), Some(bx)) if by_x => ax.total_cmp(&bx),
            _ => Ordering::Equal,
        };
        x_order
            .then_with(|| label_number(&a.seat).cmp(&label_number(&b.seat)))
            .then_with(|| a.seat.cmp(&b.seat))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::models::SeatStatus;

    fn engine() -> SeatEngine {
        SeatEngine::default()
    }

    fn seat(id: &str, row: &str, number: &str) -> Seat {
        Seat::new(id, row, number).in_section("A")
    }

    #[test]
    fn same_row_numeric_rule() {
        let e = engine();
        assert!(e.is_physically_adjacent(&seat("a", "R5", "12"), &seat("b", "R5", "13")));
        assert!(!e.is_physically_adjacent(&seat("a", "R5", "12"), &seat("b", "R5", "14")));
        assert!(e.is_physically_adjacent(&seat("a", "R5", "Seat 7"), &seat("b", "R5", "8")));
    }

    #[test]
    fn same_row_letter_fallback() {
        let e = engine();
        assert!(e.is_physically_adjacent(&seat("a", "R1", "A"), &seat("b", "R1", "b")));
        assert!(!e.is_physically_adjacent(&seat("a", "R1", "A"), &seat("b", "R1", "C")));
        // Буква и число не сравниваются.
        assert!(!e.is_physically_adjacent(&seat("a", "R1", "A"), &seat("b", "R1", "2")));
    }

    #[test]
    fn different_sections_never_adjacent() {
        let e = engine();
        let a = Seat::new("a", "R1", "1").in_section("A").at(0.0, 0.0);
        let b = Seat::new("b", "R1", "2").in_section("B").at(1.0, 0.0);
        assert!(!e.is_physically_adjacent(&a, &b));
    }

    #[test]
    fn seat_is_not_its_own_neighbor() {
        let a = seat("a", "R1", "1");
        assert!(!engine().is_physically_adjacent(&a, &a));
    }

    #[test]
    fn cross_row_within_threshold() {
        let e = engine();
        let a = seat("a", "R5", "10").at(100.0, 100.0);
        let b = seat("b", "R6", "11").at(130.0, 140.0);
        assert!(e.is_physically_adjacent(&a, &b));

        // Ровно на пороге.
        let c = seat("c", "R6", "10").at(100.0, 160.0);
        assert!(e.is_physically_adjacent(&a, &c));

        let far = seat("d", "R6", "10").at(100.0, 160.5);
        assert!(!e.is_physically_adjacent(&a, &far));
    }

    #[test]
    fn cross_row_never_jumps_a_row() {
        let e = engine();
        let a = seat("a", "R5", "10").at(100.0, 100.0);
        let b = seat("b", "R7", "10").at(100.0, 110.0);
        assert!(!e.is_physically_adjacent(&a, &b));
    }

    #[test]
    fn cross_row_requires_neighboring_column() {
        let e = engine();
        let a = seat("a", "R5", "10").at(100.0, 100.0);
        let b = seat("b", "R6", "12").at(100.0, 110.0);
        assert!(!e.is_physically_adjacent(&a, &b));
    }

    #[test]
    fn cross_row_requires_coordinates() {
        let e = engine();
        let a = seat("a", "R5", "10").at(100.0, 100.0);
        let b = seat("b", "R6", "10");
        assert!(!e.is_physically_adjacent(&a, &b));
    }

    #[test]
    fn cross_row_threshold_is_configurable() {
        let wide = SeatEngine::new(EngineConfig {
            max_cross_row_distance: 200.0,
            ..EngineConfig::default()
        });
        let a = seat("a", "R5", "10").at(0.0, 0.0);
        let b = seat("b", "R6", "10").at(0.0, 150.0);
        assert!(!engine().is_physically_adjacent(&a, &b));
        assert!(wide.is_physically_adjacent(&a, &b));
    }

    #[test]
    fn row_labels_without_digits_fall_through() {
        let e = engine();
        let a = seat("a", "Balcony", "1").at(0.0, 0.0);
        let b = seat("b", "Stalls", "1").at(0.0, 10.0);
        assert!(!e.is_physically_adjacent(&a, &b));
    }

    #[test]
    fn sold_seats_fail_status_gate() {
        let e = engine();
        let a = seat("a", "R1", "1");
        let b = seat("b", "R1", "2").with_status(SeatStatus::Sold);
        let all = vec![a.clone(), b.clone()];
        assert!(e.is_physically_adjacent(&a, &b));
        assert!(!e.is_adjacent_considering_status(&a, &b, &all));
    }

    #[test]
    fn sold_seat_between_blocks_path() {
        let e = engine();
        // Нерегулярная нумерация: 1 и 2 отличаются на единицу, но между ними
        // на плане стоит проданное место.
        let a = seat("a", "R1", "1").at(0.0, 0.0);
        let gap = seat("gap", "R1", "1A").at(10.0, 0.0).with_status(SeatStatus::Sold);
        let b = seat("b", "R1", "2").at(20.0, 0.0);
        let all = vec![a.clone(), gap, b.clone()];

        assert!(e.is_physically_adjacent(&a, &b));
        assert!(!e.is_adjacent_considering_status(&a, &b, &all));
    }

    #[test]
    fn sold_seat_splits_row() {
        let e = engine();
        let one = seat("1", "R1", "1");
        let two = seat("2", "R1", "2").with_status(SeatStatus::Sold);
        let three = seat("3", "R1", "3");
        let all = vec![one.clone(), two.clone(), three.clone()];

        assert!(!e.is_adjacent_considering_status(&one, &three, &all));
        assert!(!e.is_adjacent_considering_status(&one, &two, &all));
        assert!(!e.is_adjacent_considering_status(&two, &three, &all));
        assert!(e.is_physically_adjacent(&one, &two));
    }

    #[test]
    fn available_seat_between_does_not_block() {
        let e = engine();
        let a = seat("a", "R1", "1").at(0.0, 0.0);
        let mid = seat("mid", "R1", "1A").at(10.0, 0.0);
        let b = seat("b", "R1", "2").at(20.0, 0.0);
        let all = vec![b.clone(), mid, a.clone()];

        assert!(e.is_adjacent_considering_status(&a, &b, &all));
    }

    #[test]
    fn row_order_falls_back_to_numbers_without_coordinates() {
        let e = engine();
        let a = seat("a", "R1", "1");
        let b = seat("b", "R1", "2");
        let sold_elsewhere = seat("c", "R1", "3").with_status(SeatStatus::Sold);
        let all = vec![sold_elsewhere, b.clone(), a.clone()];

        assert!(e.is_adjacent_considering_status(&a, &b, &all));
    }

    #[test]
    fn reserved_blocks_only_when_policy_says_so() {
        let a = seat("a", "R1", "1");
        let b = seat("b", "R1", "2").with_status(SeatStatus::Reserved);
        let all = vec![a.clone(), b.clone()];

        assert!(engine().is_adjacent_considering_status(&a, &b, &all));

        let strict = SeatEngine::new(EngineConfig {
            reserved_is_selectable: false,
            ..EngineConfig::default()
        });
        assert!(!strict.is_adjacent_considering_status(&a, &b, &all));
    }

    #[test]
    fn seats_outside_context_skip_blocking_check() {
        let e = engine();
        let a = seat("a", "R1", "1");
        let b = seat("b", "R1", "2");
        assert!(e.is_adjacent_considering_status(&a, &b, &[]));
    }
}
