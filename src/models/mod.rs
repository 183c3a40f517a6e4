pub mod seat;
pub mod section;

pub use seat::{Seat, SeatStatus};
pub use section::{Point, Section, SectionGeometry};
