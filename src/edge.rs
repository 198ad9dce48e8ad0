use std::fmt;

use crate::geometry::Point;

/// Index of a [`BreakpointEdge`] within one sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub(crate) usize);

impl EdgeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A Voronoi edge traced out by a breakpoint of the beachline.
///
/// The edge separates `left_focus` (the arc to its left on the beachline)
/// from `right_focus`. It starts where the breakpoint appeared and ends at
/// the Voronoi vertex where the breakpoint vanished; until then it is open,
/// a ray from `start` along `direction`.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakpointEdge {
    left_focus: Point,
    right_focus: Point,
    start: Point,
    end: Option<Point>,

    /// Slope of the bisector, infinite when the foci share a `y`.
    slope: f64,
    /// +1 when the left focus lies left of the right focus (or directly
    /// above it), -1 otherwise.
    orientation: f64,
    /// Unit vector the breakpoint travels along as the sweep line moves down.
    direction: Point,

    /// The other half of the bisector, when the edge was created by
    /// splitting an arc.
    twin: Option<EdgeId>,
}

impl BreakpointEdge {
    pub fn new(left_focus: Point, right_focus: Point, start: Point) -> BreakpointEdge {
        let orientation = if left_focus.x < right_focus.x || (left_focus.x == right_focus.x && left_focus.y > right_focus.y) {
            1.0
        } else {
            -1.0
        };

        let (slope, direction) = if left_focus.y == right_focus.y {
            (f64::INFINITY, Point::new(0.0, -orientation))
        } else {
            // Bisector heading that keeps the arc of the left focus on the
            // left of the breakpoint while the sweep line moves down.
            let heading = Point::new(right_focus.y - left_focus.y, left_focus.x - right_focus.x);
            (heading.y / heading.x, heading * (1.0 / heading.length()))
        };

        BreakpointEdge {
            left_focus,
            right_focus,
            start,
            end: None,
            slope,
            orientation,
            direction,
            twin: None,
        }
    }

    pub fn left_focus(&self) -> Point {
        self.left_focus
    }

    pub fn right_focus(&self) -> Point {
        self.right_focus
    }

    pub fn start(&self) -> Point {
        self.start
    }

    /// The end point, `None` while the edge is still open.
    pub fn end(&self) -> Option<Point> {
        self.end
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn orientation(&self) -> f64 {
        self.orientation
    }

    pub fn direction(&self) -> Point {
        self.direction
    }

    pub fn twin(&self) -> Option<EdgeId> {
        self.twin
    }

    pub fn is_vertical(&self) -> bool {
        self.slope.is_infinite()
    }

    pub fn is_finished(&self) -> bool {
        self.end.is_some()
    }

    /// Whether `site` is one of the two sites this edge separates.
    pub fn separates(&self, site: Point) -> bool {
        self.left_focus == site || self.right_focus == site
    }

    pub(crate) fn set_twin(&mut self, twin: EdgeId) {
        self.twin = Some(twin);
    }

    /// Sets the end point. An edge is finished exactly once; a second call
    /// leaves the edge untouched and returns the end it already had.
    pub(crate) fn finish(&mut self, end: Point) -> Result<(), Point> {
        match self.end {
            Some(existing) => Err(existing),
            None => {
                self.end = Some(end);
                Ok(())
            }
        }
    }
}

impl fmt::Display for BreakpointEdge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.end {
            Some(end) => write!(f, "{}|{} {} -> {}", self.left_focus, self.right_focus, self.start, end),
            None => write!(f, "{}|{} {} -> ...", self.left_focus, self.right_focus, self.start),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn level_foci_make_a_vertical_edge_heading_down() {
        let edge = BreakpointEdge::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(5.0, f64::INFINITY));

        assert!(edge.is_vertical());
        assert_eq!(edge.orientation(), 1.0);
        assert_eq!(edge.direction(), Point::new(0.0, -1.0));
    }

    #[test]
    fn direction_is_perpendicular_to_the_foci() {
        let left = Point::new(1.0, 2.0);
        let right = Point::new(4.0, -3.0);
        let edge = BreakpointEdge::new(left, right, Point::new(2.5, -0.5));
        let between = right - left;

        assert_relative_eq!(edge.direction().length(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(edge.direction().x * between.x + edge.direction().y * between.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(edge.slope(), edge.direction().y / edge.direction().x, epsilon = 1e-12);
        // Heading down the page, west is on the right hand.
        assert!(edge.direction().cross(left - edge.start()) < 0.0);
    }

    #[test]
    fn swapped_foci_head_the_other_way() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(4.0, -3.0);
        let start = Point::new(0.0, 0.0);

        let ab = BreakpointEdge::new(a, b, start);
        let ba = BreakpointEdge::new(b, a, start);

        assert_relative_eq!(ab.direction().x, -ba.direction().x);
        assert_relative_eq!(ab.direction().y, -ba.direction().y);
        assert_eq!(ab.orientation(), -ba.orientation());
    }

    #[test]
    fn finishing_twice_keeps_the_first_end() {
        let mut edge = BreakpointEdge::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(0.0, 1.0));
        assert!(!edge.is_finished());

        assert_eq!(edge.finish(Point::new(1.0, 0.0)), Ok(()));
        assert_eq!(edge.finish(Point::new(2.0, -1.0)), Err(Point::new(1.0, 0.0)));
        assert_eq!(edge.end(), Some(Point::new(1.0, 0.0)));
    }

    #[test]
    fn separates_its_foci_only() {
        let edge = BreakpointEdge::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(0.0, 1.0));

        assert!(edge.separates(Point::new(0.0, 0.0)));
        assert!(edge.separates(Point::new(1.0, 1.0)));
        assert!(!edge.separates(Point::new(0.0, 1.0)));
    }
}
