use std::collections::HashMap;
use std::fmt;

use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::edge::BreakpointEdge;
use crate::geometry::{coincide, Point};

/// A closed polygon given by its corners in order. The last corner connects
/// back to the first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Polygon {
        Polygon { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn sides(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.iter().cloned().circular_tuple_windows()
    }

    /// Shoelace area, positive when the corners run counterclockwise.
    pub fn signed_area(&self) -> f64 {
        if self.points.len() < 3 {
            return 0.0;
        }

        self.sides().map(|(a, b)| a.cross(b)).sum::<f64>() / 2.0
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Center of mass of the enclosed area. `None` for polygons without
    /// area.
    pub fn centroid(&self) -> Option<Point> {
        let area = self.signed_area();
        if area == 0.0 {
            return None;
        }

        let sum = self
            .sides()
            .fold(Point::default(), |sum, (a, b)| sum + (a + b) * a.cross(b));

        Some(sum * (1.0 / (6.0 * area)))
    }

    /// Even-odd test with a ray toward positive `x`. Points on the boundary
    /// may land either way.
    pub fn contains(&self, p: Point) -> bool {
        self.sides()
            .filter(|&(a, b)| (a.y > p.y) != (b.y > p.y))
            .filter(|&(a, b)| p.x < a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y))
            .count()
            % 2
            == 1
    }

    /// Whether no two sides cross, apart from neighbouring sides sharing a
    /// corner.
    pub fn is_simple(&self) -> bool {
        let n = self.points.len();
        if n < 3 {
            return false;
        }

        let sides: Vec<(Point, Point)> = self.sides().collect();

        (0..n)
            .tuple_combinations()
            .filter(|&(i, j)| j != i + 1 && !(i == 0 && j == n - 1))
            .all(|(i, j)| !segments_cross(sides[i], sides[j]))
    }

    /// The polygon without corners where the boundary runs straight on.
    ///
    /// A corner is dropped when the sine of the turn there is at most
    /// `tolerance`.
    pub fn corners(&self, tolerance: f64) -> Polygon {
        let n = self.points.len();
        if n < 3 {
            return self.clone();
        }

        let points = (0..n)
            .filter(|&i| {
                let before = self.points[(i + n - 1) % n];
                let here = self.points[i];
                let after = self.points[(i + 1) % n];

                let (incoming, outgoing) = (here - before, after - here);
                incoming.cross(outgoing).abs() > tolerance * incoming.length() * outgoing.length()
            })
            .map(|i| self.points[i])
            .collect();

        Polygon { points }
    }
}

/// Proper crossing: each segment has the ends of the other strictly on
/// opposite sides.
fn segments_cross((a, b): (Point, Point), (c, d): (Point, Point)) -> bool {
    let side = |p: Point, q: Point, r: Point| (q - p).cross(r - p).signum();

    side(a, b, c) * side(a, b, d) < 0.0 && side(c, d, a) * side(c, d, b) < 0.0
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Polygon[{}]", itertools::join(self.points.iter(), ", "))
    }
}

/// One patch per site, in the order of `sites`.
///
/// Every edge with both end points contributes its end points to the
/// patches of the two sites it separates. The points of a patch are sorted
/// by angle around its site, and points within `epsilon` of each other are
/// kept once. Points at infinity are left out. Sites must be distinct.
pub fn extract_patches<'e, I>(sites: &[Point], edges: I, epsilon: f64) -> Vec<Polygon>
where
    I: IntoIterator<Item = &'e BreakpointEdge>,
{
    let index: HashMap<_, usize> = sites.iter().enumerate().map(|(i, site)| (site.key(), i)).collect();
    let mut corners: Vec<Vec<Point>> = vec![Vec::new(); sites.len()];

    for edge in edges {
        let end = match edge.end() {
            Some(end) => end,
            None => continue,
        };

        for &focus in &[edge.left_focus(), edge.right_focus()] {
            if let Some(&i) = index.get(&focus.key()) {
                corners[i].extend([edge.start(), end].iter().filter(|p| p.is_finite()));
            }
        }
    }

    sites
        .iter()
        .zip(corners)
        .map(|(&site, points)| Polygon::new(sort_around(site, points, epsilon)))
        .collect()
}

fn sort_around(site: Point, points: Vec<Point>, epsilon: f64) -> Vec<Point> {
    let mut sorted: Vec<Point> = points
        .into_iter()
        .sorted_by_key(|p| {
            let angle = (p.y - site.y).atan2(p.x - site.x);
            (OrderedFloat(angle), OrderedFloat(p.x), OrderedFloat(p.y))
        })
        .dedup_by(|a, b| coincide(*a, *b, epsilon))
        .collect();

    // The sort wraps around at the negative x axis.
    if sorted.len() > 1 && coincide(sorted[0], sorted[sorted.len() - 1], epsilon) {
        sorted.pop();
    }

    sorted
}
