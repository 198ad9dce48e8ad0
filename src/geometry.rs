use std::fmt;
use std::ops::{Add, Mul, Sub};

use ordered_float::OrderedFloat;

use crate::edge::BreakpointEdge;
use crate::parabola::FocusDirectrixParabola;

/// Basic Point type for usage in the Voronoi lib.
///
/// Sites handed to the public entry points must be finite. Points computed
/// during the sweep may sit at infinity, see [`Point::INFINITY`].
#[derive(Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The sentinel returned for circumcenters of colinear points.
    pub const INFINITY: Point = Point { x: f64::INFINITY, y: f64::INFINITY };

    pub const fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Length of the point read as a vector from the origin.
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// The z component of the cross product of two vectors.
    pub fn cross(self, other: Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Hashable, totally ordered view of the coordinates.
    pub(crate) fn key(&self) -> (OrderedFloat<f64>, OrderedFloat<f64>) {
        (OrderedFloat(self.x), OrderedFloat(self.y))
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, scalar: f64) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Point {
        Point::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Point {{ x: {}, y: {} }}", self.x, self.y)
    }
}

/// Euclidean distance between two points.
pub fn distance(p: Point, q: Point) -> f64 {
    (p - q).length()
}

/// Whether two finite points are the same up to `epsilon`, relative to their
/// distance from the origin once that exceeds 1.
pub(crate) fn coincide(p: Point, q: Point, epsilon: f64) -> bool {
    p.is_finite() && q.is_finite() && distance(p, q) <= epsilon * p.length().max(1.0)
}

/// Vertical distance from `p` to the parabola with the given focus whose
/// directrix passes through `p`.
///
/// When a new site reaches the sweep line this is how far above it the arc
/// of `focus` currently is. Infinite when `p` and the focus share a `y`,
/// as the parabola has degenerated into a vertical ray.
pub fn distance_to_parabola(p: Point, focus: Point) -> f64 {
    if p.y == focus.y {
        return f64::INFINITY;
    }

    let d = distance(p, focus);
    d * d / (2.0 * (p.y - focus.y).abs())
}

/// Center of the circle through three points.
///
/// Returns [`Point::INFINITY`] when the points are colinear.
pub fn circumcenter(a: Point, b: Point, c: Point) -> Point {
    // Both perpendicular bisectors, written relative to `c`, form the system
    // (a - c) . X = ka and (b - c) . X = kb.
    let ac = a - c;
    let bc = b - c;
    let determinant = ac.cross(bc);

    if determinant == 0.0 {
        return Point::INFINITY;
    }

    let ka = (ac.x * (a.x + c.x) + ac.y * (a.y + c.y)) / 2.0;
    let kb = (bc.x * (b.x + c.x) + bc.y * (b.y + c.y)) / 2.0;

    Point::new(
        (ka * bc.y - kb * ac.y) / determinant,
        (kb * ac.x - ka * bc.x) / determinant,
    )
}

/// The `x` coordinate of the breakpoint between the arc of `left_focus`
/// (to the left) and the arc of `right_focus` (to the right) when the sweep
/// line is at `sweep_y`.
pub fn breakpoint_x(left_focus: Point, right_focus: Point, sweep_y: f64) -> f64 {
    if left_focus.y == right_focus.y {
        // Vertical breakpoint.
        return (left_focus.x + right_focus.x) / 2.0;
    }

    let left = FocusDirectrixParabola::new(left_focus, sweep_y);
    let right = FocusDirectrixParabola::new(right_focus, sweep_y);

    match left.crossings(&right) {
        // The wider parabola (focus farther from the sweep line) wraps around
        // the narrower one, so which crossing separates `left` from `right`
        // depends on which of the two is wider.
        Some((low, high)) => {
            if left_focus.y > right_focus.y {
                low
            } else {
                high
            }
        }
        None => (left_focus.x + right_focus.x) / 2.0,
    }
}

/// Whether the arc of `focus`, between the arcs of `left` and `right`, has
/// no width anywhere below `vertex` once the sweep line has reached the
/// bottom of the circle around `vertex` through `focus`.
///
/// Such an arc is left behind when a site event lands exactly on a Voronoi
/// vertex: both of its breakpoints start at the vertex and have already
/// crossed.
pub(crate) fn arc_is_pinched(left: Point, focus: Point, right: Point, vertex: Point) -> bool {
    // Both breakpoints are rays from `vertex`, so any sweep line below the
    // circle tells which way they go.
    let below = vertex.y - 2.0 * distance(vertex, focus);

    breakpoint_x(left, focus, below) >= breakpoint_x(focus, right, below)
}

/// Whether two breakpoint edges, followed as rays from their start points,
/// meet ahead of both start points.
///
/// A crossing exactly at both start points does not count; `epsilon` is the
/// tolerance under which a ray parameter is treated as zero.
pub fn rays_converge(a: &BreakpointEdge, b: &BreakpointEdge, epsilon: f64) -> bool {
    let crossing = if a.is_vertical() {
        vertical_crossing(a, b)
    } else if b.is_vertical() {
        vertical_crossing(b, a).map(|(t, s)| (s, t))
    } else {
        let det = a.direction().cross(b.direction());
        if det == 0.0 {
            None
        } else {
            let w = b.start() - a.start();
            Some((w.cross(b.direction()) / det, w.cross(a.direction()) / det))
        }
    };

    match crossing {
        Some((s, t)) => (s >= -epsilon && t >= epsilon) || (s >= epsilon && t >= -epsilon),
        None => false,
    }
}

/// Ray parameters `(along vertical, along other)` of the crossing between a
/// vertical ray and another ray.
///
/// The vertical ray may start at infinity; its parameter is then infinite
/// and any crossing is ahead of it.
fn vertical_crossing(vertical: &BreakpointEdge, other: &BreakpointEdge) -> Option<(f64, f64)> {
    if other.is_vertical() {
        return None;
    }

    let t = (vertical.start().x - other.start().x) / other.direction().x;
    let y = other.start().y + t * other.direction().y;
    // The vertical direction is a unit vector, so dividing by its `y` is
    // multiplying by it.
    let s = (y - vertical.start().y) * vertical.direction().y;

    Some((s, t))
}
