use criterion::{black_box, criterion_group, criterion_main, Criterion};

use seat_engine::models::Seat;
use seat_engine::seating::{SeatEngine, SeatMap};

/// Зал 40 рядов по 30 мест, шаг 25 единиц.
fn venue() -> SeatMap {
    let seats = (1..=40)
        .flat_map(|row| {
            (1..=30).map(move |n| {
                Seat::new(format!("R{row}-{n}"), format!("R{row}"), n.to_string())
                    .in_section("stalls")
                    .at(f64::from(n) * 25.0, f64::from(row) * 40.0)
            })
        })
        .collect();
    SeatMap::new(seats)
}

fn bench_connectivity(c: &mut Criterion) {
    let map = venue();
    let engine = SeatEngine::default();
    let selection: Vec<String> = (11..=20).map(|n| format!("R20-{n}")).collect();

    c.bench_function("full selection connectivity", |b| {
        b.iter(|| engine.is_selection_connected(black_box(selection.as_slice()), black_box(&map)))
    });

    c.bench_function("single seat admission", |b| {
        let candidate = map.get("R20-21").cloned().unwrap_or_else(|| Seat::new("x", "R20", "21"));
        b.iter(|| engine.can_add_seat(black_box(&candidate), black_box(&selection[..9]), black_box(&map)))
    });
}

criterion_group!(benches, bench_connectivity);
criterion_main!(benches);
