use std::collections::HashMap;
use std::fmt;

use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::config::Frame;
use crate::edge::BreakpointEdge;
use crate::fortune::{fortune_with_logger, Sweep};
use crate::geometry::Point;
use crate::logger::SweepLogger;
use crate::patch::{extract_patches, Polygon};

/// A whole Voronoi edge between two sites, with both halves traced from
/// one arc split joined up.
///
/// `None` at either end means the edge runs off to infinity there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagramEdge {
    pub sites: (Point, Point),
    pub from: Option<Point>,
    pub to: Option<Point>,
}

impl DiagramEdge {
    pub fn is_bounded(&self) -> bool {
        self.from.is_some() && self.to.is_some()
    }
}

impl fmt::Display for DiagramEdge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let end = |p: Option<Point>| p.map_or_else(|| String::from("inf"), |p| p.to_string());

        write!(f, "{}|{}: {} -- {}", self.sites.0, self.sites.1, end(self.from), end(self.to))
    }
}

/// A Voronoi diagram of a set of sites.
///
/// Duplicate sites are swept once; every copy maps to the same patch.
#[derive(Debug, Clone)]
pub struct Voronoi {
    /// Distinct sites in order of first appearance.
    sites: Vec<Point>,
    /// Input position to index into `sites`.
    slots: Vec<usize>,
    lookup: HashMap<(OrderedFloat<f64>, OrderedFloat<f64>), usize>,
    sweep: Sweep,
    patches: Vec<Polygon>,
}

impl Voronoi {
    /// Sweeps `input` followed by `extra`. Only `input` positions can be
    /// looked up with [`Voronoi::patch_of`].
    pub(crate) fn sweep<L>(input: &[Point], extra: &[Point], epsilon: f64, logger: L) -> Voronoi
    where
        L: SweepLogger,
    {
        let mut sites = Vec::with_capacity(input.len() + extra.len());
        let mut lookup = HashMap::with_capacity(input.len() + extra.len());
        let mut slot_of = |site: Point| {
            *lookup.entry(site.key()).or_insert_with(|| {
                sites.push(site);
                sites.len() - 1
            })
        };

        let slots: Vec<usize> = input.iter().map(|&site| slot_of(site)).collect();
        for &site in extra {
            slot_of(site);
        }

        let sweep = fortune_with_logger(&sites, epsilon, logger);
        let patches = extract_patches(&sites, sweep.finished_edges(), epsilon);

        Voronoi {
            sites,
            slots,
            lookup,
            sweep,
            patches,
        }
    }

    /// The distinct sites that were swept.
    pub fn sites(&self) -> &[Point] {
        &self.sites
    }

    /// Finished edges, in the order the sweep finished them.
    pub fn edges(&self) -> impl Iterator<Item = &BreakpointEdge> {
        self.sweep.finished_edges()
    }

    /// Edges that never got an end point: rays to infinity, or whole lines
    /// when their twin is open as well.
    pub fn open_edges(&self) -> impl Iterator<Item = &BreakpointEdge> {
        self.sweep.open_edges()
    }

    pub fn sweep_result(&self) -> &Sweep {
        &self.sweep
    }

    /// Every Voronoi edge once, twin halves joined.
    ///
    /// Edges that start and end at the same vertex are left out. They come
    /// from arcs that vanished the moment they appeared, when four or more
    /// sites lie on one circle.
    pub fn diagram_edges(&self) -> Vec<DiagramEdge> {
        let edges = self.sweep.all_edges();

        edges
            .iter()
            .enumerate()
            .filter_map(|(i, edge)| match edge.twin() {
                Some(twin) if twin.index() < i => None,
                Some(twin) => Some(DiagramEdge {
                    sites: (edge.left_focus(), edge.right_focus()),
                    from: edge.end(),
                    to: edges[twin.index()].end(),
                }),
                None => Some(DiagramEdge {
                    sites: (edge.left_focus(), edge.right_focus()),
                    from: Some(edge.start()).filter(Point::is_finite),
                    to: edge.end(),
                }),
            })
            .filter(|edge| !(edge.is_bounded() && edge.from == edge.to))
            .collect()
    }

    /// The Voronoi vertices, each once.
    pub fn vertices(&self) -> Vec<Point> {
        self.edges()
            .filter_map(BreakpointEdge::end)
            .unique_by(|p| p.key())
            .collect()
    }

    /// The patch of the site at position `index` of the input.
    pub fn patch_of(&self, index: usize) -> Option<&Polygon> {
        self.slots.get(index).map(|&slot| &self.patches[slot])
    }

    /// The patch of the given site.
    pub fn patch_at(&self, site: Point) -> Option<&Polygon> {
        self.lookup.get(&site.key()).map(|&slot| &self.patches[slot])
    }

    /// Every distinct site with its patch.
    pub fn patches(&self) -> impl Iterator<Item = (Point, &Polygon)> {
        self.sites.iter().cloned().zip(self.patches.iter())
    }
}

/// A diagram padded with four auxiliary sites so that the patch of every
/// real site is a bounded polygon.
#[derive(Debug, Clone)]
pub struct BoundedVoronoi {
    voronoi: Voronoi,
    /// Number of distinct real sites; they come first in `voronoi.sites`.
    real: usize,
    frame: Frame,
    auxiliary: [Point; 4],
}

impl BoundedVoronoi {
    pub(crate) fn new(voronoi: Voronoi, real: usize, frame: Frame, auxiliary: [Point; 4]) -> BoundedVoronoi {
        BoundedVoronoi {
            voronoi,
            real,
            frame,
            auxiliary,
        }
    }

    /// The whole padded diagram, auxiliary sites included.
    pub fn diagram(&self) -> &Voronoi {
        &self.voronoi
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn auxiliary_sites(&self) -> &[Point; 4] {
        &self.auxiliary
    }

    /// The distinct real sites.
    pub fn sites(&self) -> &[Point] {
        &self.voronoi.sites()[..self.real]
    }

    pub fn patch_of(&self, index: usize) -> Option<&Polygon> {
        self.voronoi.patch_of(index)
    }

    /// The patch of a real site; `None` for auxiliary and unknown sites.
    pub fn patch_at(&self, site: Point) -> Option<&Polygon> {
        match self.voronoi.lookup.get(&site.key()) {
            Some(&slot) if slot < self.real => Some(&self.voronoi.patches[slot]),
            _ => None,
        }
    }

    pub fn patches(&self) -> impl Iterator<Item = (Point, &Polygon)> {
        self.voronoi.patches().take(self.real)
    }
}
