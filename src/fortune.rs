//! Fortune's Algorithm.
//!
//! The sweep line moves from the highest site downward. Above it the
//! beachline separates the part of the plane whose nearest site is already
//! known from the rest; its breakpoints trace out the Voronoi edges.
//!
//! https://en.wikipedia.org/wiki/Fortune%27s_algorithm

use crate::beachline::{Beachline, NodeId};
use crate::edge::{BreakpointEdge, EdgeId};
use crate::event::{CircleEvent, CircleKey, Event, EventQueue};
use crate::geometry::{
    arc_is_pinched, circumcenter, coincide, distance, distance_to_parabola, rays_converge, Point,
};
use crate::logger::{DiscardLogger, SkipReason, SweepLogMessage, SweepLogger};

/// Result of one sweep.
#[derive(Debug, Clone, Default)]
pub struct Sweep {
    edges: Vec<BreakpointEdge>,
    finished: Vec<EdgeId>,
    site_events: usize,
    circle_events: usize,
}

impl Sweep {
    /// Every edge traced during the sweep, open or finished, indexed by
    /// [`EdgeId`].
    pub fn all_edges(&self) -> &[BreakpointEdge] {
        &self.edges
    }

    pub fn edge(&self, id: EdgeId) -> &BreakpointEdge {
        &self.edges[id.0]
    }

    /// Edges with both end points, in the order they were finished.
    pub fn finished_edges(&self) -> impl Iterator<Item = &BreakpointEdge> {
        self.finished.iter().map(move |id| &self.edges[id.0])
    }

    /// Edges still open when the sweep ended. These are rays to infinity.
    pub fn open_edges(&self) -> impl Iterator<Item = &BreakpointEdge> {
        self.edges.iter().filter(|edge| !edge.is_finished())
    }

    pub fn site_events(&self) -> usize {
        self.site_events
    }

    pub fn circle_events(&self) -> usize {
        self.circle_events
    }
}

/// Sweeps `sites` with the default tolerance and no logging.
///
/// The sites are expected to be finite and distinct.
pub fn fortune(sites: &[Point]) -> Sweep {
    fortune_with_logger(sites, 1e-10, DiscardLogger)
}

pub fn fortune_with_logger<L>(sites: &[Point], epsilon: f64, logger: L) -> Sweep
where
    L: SweepLogger,
{
    let mut queue = EventQueue::from_sites(sites, epsilon);

    // An empty beachline cannot be searched, so it starts with the first site.
    let first = match queue.pop() {
        Some(Event::Site(site)) => site,
        _ => return Sweep::default(),
    };

    let mut engine = Engine {
        queue,
        beachline: Beachline::new(first),
        finished: Vec::new(),
        epsilon,
        next_circle: 0,
        site_events: 1,
        circle_events: 0,
        logger,
    };
    engine.logger.log(SweepLogMessage::SiteEvent(first));

    while let Some(event) = engine.queue.pop() {
        match event {
            Event::Site(site) => engine.handle_site(site),
            Event::Circle(circle) => engine.handle_circle(circle),
        }
    }

    engine.finish()
}

struct Engine<L> {
    queue: EventQueue,
    beachline: Beachline,
    finished: Vec<EdgeId>,
    epsilon: f64,
    next_circle: u64,
    site_events: usize,
    circle_events: usize,
    logger: L,
}

impl<L> Engine<L>
where
    L: SweepLogger,
{
    fn handle_site(&mut self, site: Point) {
        self.site_events += 1;
        self.logger.log(SweepLogMessage::SiteEvent(site));

        let arc = self.beachline.locate_arc(site.x, site.y);
        let focus = self.beachline.site(arc);
        self.cancel_circle(arc);

        if focus.y == site.y {
            // Only while the first row of sites is coming in.
            let (left, right) = self.beachline.split_degenerate(arc, site);
            self.schedule_circle(left);
            self.schedule_circle(right);
            return;
        }

        let start = Point::new(site.x, site.y + distance_to_parabola(site, focus));
        let split = self.beachline.split(arc, site, start);
        debug_assert_eq!(self.beachline.site(split.middle), site);

        // The right neighbour's circle event still names the old arc as its
        // left arc, which is now the right copy.
        if let Some((neighbor, _)) = self.beachline.right_neighbor(split.right) {
            if let Some(key) = self.beachline.circle(neighbor) {
                if let Some(circle) = self.queue.find_mut(key) {
                    if circle.arcs[0] == arc {
                        circle.arcs[0] = split.right;
                    }
                }
            }
        }

        self.schedule_circle(split.left);
        self.schedule_circle(split.right);
    }

    fn handle_circle(&mut self, circle: CircleEvent) {
        self.circle_events += 1;

        let [left, arc, right] = circle.arcs;
        self.logger.log(SweepLogMessage::CircleEvent {
            site: self.beachline.site(arc),
            vertex: circle.vertex,
        });

        self.beachline.take_circle(arc);
        self.cancel_circle(left);
        self.cancel_circle(right);

        let merged = match self.beachline.merge_away(arc, circle.vertex) {
            Some(merged) => merged,
            None => {
                let site = self.beachline.site(arc);
                return self.logger.log(SweepLogMessage::UnmergedArc { site, vertex: circle.vertex });
            }
        };

        self.finished.extend(merged.closed.iter().cloned());
        for (edge, end) in merged.reclosed {
            self.logger.log(SweepLogMessage::EdgeReclosed {
                edge,
                end,
                rejected: circle.vertex,
            });
        }

        self.schedule_circle(merged.left);
        self.schedule_circle(merged.right);
    }

    /// Queues the circle event for `arc` if its breakpoints will meet.
    fn schedule_circle(&mut self, arc: NodeId) {
        self.cancel_circle(arc);

        let site = self.beachline.site(arc);
        let neighbors = (self.beachline.left_neighbor(arc), self.beachline.right_neighbor(arc));
        let ((left, left_branch), (right, right_branch)) = match neighbors {
            (Some(left), Some(right)) => (left, right),
            _ => return self.skip(site, SkipReason::NoNeighbor),
        };

        let (a, c) = (self.beachline.site(left), self.beachline.site(right));
        if a == c {
            return self.skip(site, SkipReason::SameSite);
        }

        let edges = [self.beachline.branch_edge(left_branch), self.beachline.branch_edge(right_branch)];
        let (left_edge, right_edge) = (self.beachline.edge(edges[0]), self.beachline.edge(edges[1]));

        // A site that landed on a vertex leaves an arc whose breakpoints
        // both start there. It vanishes at that vertex right away.
        let pinched = left_edge.twin() != Some(edges[1])
            && coincide(left_edge.start(), right_edge.start(), self.epsilon)
            && arc_is_pinched(a, site, c, left_edge.start());

        let vertex = if pinched {
            left_edge.start()
        } else if !rays_converge(left_edge, right_edge, self.epsilon) {
            return self.skip(site, SkipReason::Diverging);
        } else {
            circumcenter(a, site, c)
        };

        if !vertex.is_finite() {
            return self.skip(site, SkipReason::Colinear);
        }

        let priority = Point::new(vertex.x, vertex.y - distance(vertex, site));
        let key = CircleKey {
            id: self.next_circle,
            y: priority.y,
        };
        self.next_circle += 1;

        self.queue.insert(Event::Circle(CircleEvent {
            key,
            arcs: [left, arc, right],
            edges,
            vertex,
            priority,
        }));
        self.beachline.set_circle(arc, key);

        self.logger.log(SweepLogMessage::CircleScheduled {
            sites: [a, site, c],
            vertex,
            y: priority.y,
        });
    }

    fn skip(&mut self, site: Point, reason: SkipReason) {
        self.logger.log(SweepLogMessage::CircleSkipped { site, reason });
    }

    /// Drops the pending circle event of `arc`, if any.
    fn cancel_circle(&mut self, arc: NodeId) {
        let key = match self.beachline.take_circle(arc) {
            Some(key) => key,
            None => return,
        };

        let site = self.beachline.site(arc);
        match self.queue.remove(key) {
            Some(..) => self.logger.log(SweepLogMessage::CircleCancelled { site, y: key.y }),
            None => self.logger.log(SweepLogMessage::MissingEvent { site, y: key.y }),
        }
    }

    fn finish(mut self) -> Sweep {
        let arcs = self.beachline.leaves().len();
        let edges = self.beachline.into_edges();

        self.logger.log(SweepLogMessage::Finished {
            site_events: self.site_events,
            circle_events: self.circle_events,
            arcs,
            edges: edges.len(),
        });

        Sweep {
            edges,
            finished: self.finished,
            site_events: self.site_events,
            circle_events: self.circle_events,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn no_sites_no_edges() {
        let sweep = fortune(&[]);

        assert!(sweep.all_edges().is_empty());
        assert_eq!(sweep.site_events(), 0);
    }

    #[test]
    fn one_site_no_edges() {
        let sweep = fortune(&[Point::new(1.0, 1.0)]);

        assert!(sweep.all_edges().is_empty());
        assert_eq!(sweep.site_events(), 1);
        assert_eq!(sweep.circle_events(), 0);
    }

    #[test]
    fn two_level_sites_give_one_vertical_edge() {
        let sweep = fortune(&[Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);

        assert_eq!(sweep.all_edges().len(), 1);
        assert_eq!(sweep.finished_edges().count(), 0);

        let edge = &sweep.all_edges()[0];
        assert!(edge.is_vertical());
        assert_relative_eq!(edge.start().x, 5.0);
        assert_eq!(edge.direction(), Point::new(0.0, -1.0));
        assert_eq!(edge.end(), None);
    }

    #[test]
    fn two_stacked_sites_give_twin_rays() {
        let sweep = fortune(&[Point::new(0.0, 0.0), Point::new(0.0, 10.0)]);

        assert_eq!(sweep.all_edges().len(), 2);
        for edge in sweep.all_edges() {
            assert_eq!(edge.start(), Point::new(0.0, 5.0));
            assert_eq!(edge.slope(), 0.0);
            assert!(edge.twin().is_some());
        }
        let (a, b) = (&sweep.all_edges()[0], &sweep.all_edges()[1]);
        assert_eq!(a.direction(), b.direction() * -1.0);
    }

    #[test]
    fn triangle_meets_at_its_circumcenter() {
        let sites = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(5.0, 10.0)];
        let mut messages: Vec<SweepLogMessage> = Vec::new();

        let sweep = fortune_with_logger(&sites, 1e-10, &mut messages);
        let center = circumcenter(sites[0], sites[1], sites[2]);

        assert_eq!(sweep.site_events(), 3);
        assert_eq!(sweep.circle_events(), 1);
        assert_eq!(sweep.finished_edges().count(), 2);
        for edge in sweep.finished_edges() {
            let end = edge.end().unwrap();
            assert_relative_eq!(end.x, center.x, epsilon = 1e-9);
            assert_relative_eq!(end.y, center.y, epsilon = 1e-9);
        }

        assert!(messages.iter().any(|message| matches!(message, SweepLogMessage::CircleEvent { .. })));
        assert!(!messages.iter().any(|message| matches!(message, SweepLogMessage::MissingEvent { .. })));
        assert!(matches!(messages.last(), Some(SweepLogMessage::Finished { site_events: 3, .. })));
    }

    #[test]
    fn site_on_a_vertex_closes_the_pinched_arc() {
        // The bottom site arrives exactly when the arc of (0, 10) vanishes
        // at the origin, and lands on that vertex.
        let sites = [
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(-10.0, 0.0),
            Point::new(0.0, -10.0),
        ];
        let mut messages: Vec<SweepLogMessage> = Vec::new();

        let sweep = fortune_with_logger(&sites, 1e-10, &mut messages);

        assert_eq!(sweep.circle_events(), 2);
        assert_eq!(sweep.finished_edges().count(), 4);
        for edge in sweep.finished_edges() {
            let end = edge.end().unwrap();
            assert_relative_eq!(end.x, 0.0, epsilon = 1e-9);
            assert_relative_eq!(end.y, 0.0, epsilon = 1e-9);
        }

        // The left and bottom sites end up neighbours.
        let shared = sweep
            .open_edges()
            .find(|edge| edge.separates(sites[2]) && edge.separates(sites[3]))
            .unwrap();
        assert_relative_eq!(shared.start().x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(shared.start().y, 0.0, epsilon = 1e-9);

        assert!(matches!(messages.last(), Some(SweepLogMessage::Finished { arcs: 5, .. })));
    }

    #[test]
    fn circle_event_without_neighbours_is_reported() {
        let site = Point::new(0.0, 0.0);
        let beachline = Beachline::new(site);
        let root = beachline.leaves()[0];
        let mut messages: Vec<SweepLogMessage> = Vec::new();

        let mut engine = Engine {
            queue: EventQueue::new(1e-10),
            beachline,
            finished: Vec::new(),
            epsilon: 1e-10,
            next_circle: 1,
            site_events: 1,
            circle_events: 0,
            logger: &mut messages,
        };
        engine.handle_circle(CircleEvent {
            key: CircleKey { id: 0, y: -1.0 },
            arcs: [root, root, root],
            edges: [EdgeId(0), EdgeId(0)],
            vertex: Point::new(0.0, 1.0),
            priority: Point::new(0.0, -1.0),
        });
        let sweep = engine.finish();

        assert_eq!(sweep.finished_edges().count(), 0);
        assert!(messages.contains(&SweepLogMessage::UnmergedArc {
            site,
            vertex: Point::new(0.0, 1.0),
        }));
    }

    #[test]
    fn every_open_edge_is_unfinished() {
        let sites = [
            Point::new(0.0, 0.0),
            Point::new(4.1, 1.3),
            Point::new(7.9, -2.2),
            Point::new(2.3, 5.7),
            Point::new(-3.4, 3.1),
        ];
        let sweep = fortune(&sites);

        assert_eq!(
            sweep.finished_edges().count() + sweep.open_edges().count(),
            sweep.all_edges().len()
        );
        assert!(sweep.open_edges().all(|edge| edge.end().is_none()));
    }
}
