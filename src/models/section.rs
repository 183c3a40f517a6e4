use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Контур секции на плане зала: прямоугольник или многоугольник.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SectionGeometry {
    #[serde(rename_all = "camelCase")]
    Rect {
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    },
    Polygon { points: Vec<Point> },
}

impl SectionGeometry {
    /// Границы прямоугольника включаются; многоугольник проверяется
    /// чётно-нечётным правилом, меньше трёх вершин не содержат ничего.
    pub fn contains(&self, point: Point) -> bool {
        match self {
            SectionGeometry::Rect { min_x, min_y, max_x, max_y } => {
                point.x >= *min_x && point.x <= *max_x && point.y >= *min_y && point.y <= *max_y
            }
            SectionGeometry::Polygon { points } => polygon_contains(points, point),
        }
    }

    /// Ограничивающий прямоугольник `(min, max)`.
    pub fn bounds(&self) -> Option<(Point, Point)> {
        match self {
            SectionGeometry::Rect { min_x, min_y, max_x, max_y } => {
                Some((Point::new(*min_x, *min_y), Point::new(*max_x, *max_y)))
            }
            SectionGeometry::Polygon { points } => {
                let first = points.first()?;
                let init = (*first, *first);
                Some(points.iter().fold(init, |(lo, hi), p| {
                    (
                        Point::new(lo.x.min(p.x), lo.y.min(p.y)),
                        Point::new(hi.x.max(p.x), hi.y.max(p.y)),
                    )
                }))
            }
        }
    }
}

fn polygon_contains(points: &[Point], point: Point) -> bool {
    if points.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        if (a.y > point.y) != (b.y > point.y) {
            let cross_x = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub geometry: SectionGeometry,
}

impl Section {
    /// Первая секция, контур которой содержит точку.
    pub fn locate(sections: &[Section], point: Point) -> Option<&Section> {
        sections.iter().find(|section| section.geometry.contains(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> SectionGeometry {
        SectionGeometry::Polygon {
            points: vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0), Point::new(0.0, 100.0)],
        }
    }

    #[test]
    fn rect_bounds_are_inclusive() {
        let rect = SectionGeometry::Rect { min_x: 0.0, min_y: 0.0, max_x: 10.0, max_y: 5.0 };
        assert!(rect.contains(Point::new(10.0, 5.0)));
        assert!(rect.contains(Point::new(3.0, 2.0)));
        assert!(!rect.contains(Point::new(10.1, 2.0)));
    }

    #[test]
    fn polygon_uses_even_odd_rule() {
        let tri = triangle();
        assert!(tri.contains(Point::new(10.0, 10.0)));
        assert!(!tri.contains(Point::new(80.0, 80.0)));
        assert!(!tri.contains(Point::new(-1.0, 10.0)));
    }

    #[test]
    fn degenerate_polygon_contains_nothing() {
        let line = SectionGeometry::Polygon {
            points: vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)],
        };
        assert!(!line.contains(Point::new(5.0, 5.0)));
        assert_eq!(SectionGeometry::Polygon { points: vec![] }.bounds(), None);
    }

    #[test]
    fn polygon_bounds() {
        let (lo, hi) = triangle().bounds().unwrap();
        assert_eq!(lo, Point::new(0.0, 0.0));
        assert_eq!(hi, Point::new(100.0, 100.0));
    }

    #[test]
    fn locates_first_matching_section() {
        let sections = vec![
            Section {
                id: "stalls".to_string(),
                geometry: SectionGeometry::Rect { min_x: 0.0, min_y: 0.0, max_x: 100.0, max_y: 50.0 },
            },
            Section {
                id: "balcony".to_string(),
                geometry: SectionGeometry::Rect { min_x: 0.0, min_y: 50.0, max_x: 100.0, max_y: 90.0 },
            },
        ];

        let at = |x, y| Section::locate(&sections, Point::new(x, y)).map(|s| s.id.as_str());
        assert_eq!(at(10.0, 70.0), Some("balcony"));
        assert_eq!(at(10.0, 10.0), Some("stalls"));
        // Общая граница достаётся секции, перечисленной раньше.
        assert_eq!(at(10.0, 50.0), Some("stalls"));
        assert_eq!(at(10.0, 95.0), None);
    }

    #[test]
    fn geometry_is_tagged_in_json() {
        let rect: SectionGeometry = serde_json::from_str(
            r#"{"type":"rect","minX":0,"minY":0,"maxX":50,"maxY":20}"#,
        )
        .unwrap();
        assert!(rect.contains(Point::new(25.0, 10.0)));

        let poly: SectionGeometry = serde_json::from_str(
            r#"{"type":"polygon","points":[{"x":0,"y":0},{"x":10,"y":0},{"x":10,"y":10},{"x":0,"y":10}]}"#,
        )
        .unwrap();
        assert!(poly.contains(Point::new(5.0, 5.0)));
    }
}
