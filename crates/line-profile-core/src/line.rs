use crate::geom::Point;

/// Iterator over the discrete pixel coordinates of the segment `p1..=p2`.
///
/// All-octant integer Bresenham with the error-accumulator formulation:
/// the major axis advances every step and the minor axis only when the
/// doubled error crosses the axis delta, so exactly
/// `max(|dx|, |dy|) + 1` coordinates are produced, both endpoints included.
#[derive(Clone, Debug)]
pub struct Bresenham {
    x: i32,
    y: i32,
    x1: i32,
    y1: i32,
    dx: i32,
    dy: i32,
    sx: i32,
    sy: i32,
    err: i32,
    done: bool,
}

/// Enumerate the rasterized coordinates of the segment from `p1` to `p2`.
pub fn bresenham(p1: Point, p2: Point) -> Bresenham {
    let dx = (p2.x - p1.x).abs();
    let dy = -(p2.y - p1.y).abs();
    Bresenham {
        x: p1.x,
        y: p1.y,
        x1: p2.x,
        y1: p2.y,
        dx,
        dy,
        sx: if p1.x < p2.x { 1 } else { -1 },
        sy: if p1.y < p2.y { 1 } else { -1 },
        err: dx + dy,
        done: false,
    }
}

impl Iterator for Bresenham {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.done {
            return None;
        }
        let out = Point::new(self.x, self.y);
        if self.x == self.x1 && self.y == self.y1 {
            self.done = true;
            return Some(out);
        }
        let e2 = 2 * self.err;
        if e2 >= self.dy {
            self.err += self.dy;
            self.x += self.sx;
        }
        if e2 <= self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }
        Some(out)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let remaining = (self.x1 - self.x).abs().max((self.y1 - self.y).abs()) as usize + 1;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Bresenham {}

#[cfg(test)]
mod tests {
    use super::bresenham;
    use crate::geom::Point;

    #[test]
    fn degenerate_segment_yields_single_point() {
        let pts: Vec<Point> = bresenham(Point::new(3, 7), Point::new(3, 7)).collect();
        assert_eq!(pts, vec![Point::new(3, 7)]);
    }

    #[test]
    fn horizontal_segment_is_inclusive_and_monotone() {
        let pts: Vec<Point> = bresenham(Point::new(0, 4), Point::new(6, 4)).collect();
        assert_eq!(pts.len(), 7);
        for (i, p) in pts.iter().enumerate() {
            assert_eq!(p.x, i as i32);
            assert_eq!(p.y, 4);
        }
    }

    #[test]
    fn point_count_matches_major_axis_delta() {
        let cases: [((i32, i32), (i32, i32)); 6] = [
            ((0, 0), (9, 0)),
            ((0, 0), (0, 9)),
            ((0, 0), (9, 9)),
            ((2, 3), (-5, 8)),
            ((10, 1), (3, -4)),
            ((1454, 627), (1548, 772)),
        ];
        for ((x0, y0), (x1, y1)) in cases {
            let expected = (x1 - x0).abs().max((y1 - y0).abs()) as usize + 1;
            let pts: Vec<Point> = bresenham(Point::new(x0, y0), Point::new(x1, y1)).collect();
            assert_eq!(pts.len(), expected, "segment ({x0},{y0})->({x1},{y1})");
            assert_eq!(pts.first().copied(), Some(Point::new(x0, y0)));
            assert_eq!(pts.last().copied(), Some(Point::new(x1, y1)));
        }
    }

    #[test]
    fn steps_are_unit_moves() {
        let pts: Vec<Point> = bresenham(Point::new(-3, 2), Point::new(8, -9)).collect();
        for pair in pts.windows(2) {
            let dx = (pair[1].x - pair[0].x).abs();
            let dy = (pair[1].y - pair[0].y).abs();
            assert!(dx <= 1 && dy <= 1 && dx + dy >= 1);
        }
    }

    #[test]
    fn size_hint_is_exact() {
        let it = bresenham(Point::new(0, 0), Point::new(4, 2));
        assert_eq!(it.len(), 5);
        assert_eq!(it.count(), 5);
    }
}
