use std::fmt;

use crate::edge::EdgeId;
use crate::geometry::Point;

/// Why a triple of arcs did not get a circle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The arc is the first or last one on the beachline.
    NoNeighbor,
    /// The arcs on both sides belong to the same site.
    SameSite,
    /// The breakpoints around the arc move apart or in parallel.
    Diverging,
    /// The three sites are colinear.
    Colinear,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let reason = match *self {
            SkipReason::NoNeighbor => "arc at the end of the beachline",
            SkipReason::SameSite => "same site on both sides",
            SkipReason::Diverging => "breakpoints do not converge",
            SkipReason::Colinear => "sites are colinear",
        };
        f.write_str(reason)
    }
}

/// Everything the sweep reports while it runs.
#[derive(Debug, Clone, PartialEq)]
pub enum SweepLogMessage {
    SiteEvent(Point),
    /// A circle event fired, making the arc of `site` vanish at `vertex`.
    CircleEvent { site: Point, vertex: Point },
    CircleScheduled { sites: [Point; 3], vertex: Point, y: f64 },
    CircleSkipped { site: Point, reason: SkipReason },
    CircleCancelled { site: Point, y: f64 },
    /// A circle event was to be removed but was not queued.
    MissingEvent { site: Point, y: f64 },
    /// An edge was ended a second time; it keeps its first end point.
    EdgeReclosed { edge: EdgeId, end: Point, rejected: Point },
    /// A circle event fired for an arc that no longer had neighbours on both
    /// sides; nothing was merged.
    UnmergedArc { site: Point, vertex: Point },
    /// The sweep is done; `arcs` were left on the beachline.
    Finished { site_events: usize, circle_events: usize, arcs: usize, edges: usize },
}

impl fmt::Display for SweepLogMessage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SweepLogMessage::SiteEvent(site) => write!(f, "Site event at {}.", site),
            SweepLogMessage::CircleEvent { site, vertex } => {
                write!(f, "Circle event: arc of {} vanishes at {}.", site, vertex)
            }
            SweepLogMessage::CircleScheduled { sites: [a, b, c], vertex, y } => {
                write!(f, "Scheduled circle event for {} {} {} at y = {} (vertex {}).", a, b, c, y, vertex)
            }
            SweepLogMessage::CircleSkipped { site, reason } => {
                write!(f, "No circle event for the arc of {}: {}.", site, reason)
            }
            SweepLogMessage::CircleCancelled { site, y } => {
                write!(f, "Cancelled circle event for the arc of {} at y = {}.", site, y)
            }
            SweepLogMessage::MissingEvent { site, y } => {
                write!(f, "Circle event for the arc of {} at y = {} was not in the queue.", site, y)
            }
            SweepLogMessage::EdgeReclosed { edge, end, rejected } => {
                write!(f, "Edge {} already ends at {}; ignored end {}.", edge.index(), end, rejected)
            }
            SweepLogMessage::UnmergedArc { site, vertex } => {
                write!(f, "Arc of {} could not vanish at {}: it lacks a neighbour.", site, vertex)
            }
            SweepLogMessage::Finished { site_events, circle_events, arcs, edges } => write!(
                f,
                "Sweep finished: {} site events, {} circle events, {} arcs left, {} edges.",
                site_events, circle_events, arcs, edges
            ),
        }
    }
}

/// Logger trait for Fortune's algorithm.
pub trait SweepLogger {
    /// The function that gets a SweepLogMessage and does the actual logging.
    fn log(&mut self, message: SweepLogMessage);
}

impl<'a, L> SweepLogger for &'a mut L
where
    L: SweepLogger + ?Sized,
{
    fn log(&mut self, message: SweepLogMessage) {
        (**self).log(message);
    }
}

/// Collects every message, mostly for tests.
impl SweepLogger for Vec<SweepLogMessage> {
    fn log(&mut self, message: SweepLogMessage) {
        self.push(message);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardLogger;

impl SweepLogger for DiscardLogger {
    fn log(&mut self, _message: SweepLogMessage) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PrintlnLogger;

impl SweepLogger for PrintlnLogger {
    fn log(&mut self, message: SweepLogMessage) {
        println!("{}", message);
    }
}

/// Forwards to `tracing`. Events are `trace`, circle bookkeeping is `debug`
/// and inconsistencies are `warn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl SweepLogger for TracingLogger {
    fn log(&mut self, message: SweepLogMessage) {
        match message {
            SweepLogMessage::SiteEvent(..) | SweepLogMessage::CircleEvent { .. } => {
                tracing::trace!("{message}");
            }
            SweepLogMessage::MissingEvent { .. }
            | SweepLogMessage::EdgeReclosed { .. }
            | SweepLogMessage::UnmergedArc { .. } => {
                tracing::warn!("{message}");
            }
            SweepLogMessage::CircleScheduled { .. }
            | SweepLogMessage::CircleSkipped { .. }
            | SweepLogMessage::CircleCancelled { .. }
            | SweepLogMessage::Finished { .. } => {
                tracing::debug!("{message}");
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn vec_collects_through_a_borrow() {
        fn log_site<L: SweepLogger>(mut logger: L) {
            logger.log(SweepLogMessage::SiteEvent(Point::new(1.0, 2.0)));
        }

        let mut messages: Vec<SweepLogMessage> = Vec::new();
        log_site(&mut messages);

        assert_eq!(messages, vec![SweepLogMessage::SiteEvent(Point::new(1.0, 2.0))]);
    }

    #[test]
    fn messages_read_as_sentences() {
        let skipped = SweepLogMessage::CircleSkipped {
            site: Point::new(0.0, 1.0),
            reason: SkipReason::Diverging,
        };

        assert_eq!(skipped.to_string(), "No circle event for the arc of (0, 1): breakpoints do not converge.");
        assert_eq!(SweepLogMessage::SiteEvent(Point::new(3.0, -1.5)).to_string(), "Site event at (3, -1.5).");
    }
}
