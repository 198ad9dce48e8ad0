use std::collections::VecDeque;
use std::fmt;

use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::beachline::NodeId;
use crate::edge::EdgeId;
use crate::geometry::Point;

/// Identity of a scheduled circle event, together with the sweep position
/// it was scheduled at so the queue knows where to look for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleKey {
    pub(crate) id: u64,
    pub(crate) y: f64,
}

/// The moment an arc shrinks to nothing and its two breakpoints meet in a
/// Voronoi vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleEvent {
    pub(crate) key: CircleKey,
    /// Left neighbour, vanishing arc, right neighbour.
    pub(crate) arcs: [NodeId; 3],
    /// The breakpoints left and right of the vanishing arc.
    pub(crate) edges: [EdgeId; 2],
    pub(crate) vertex: Point,
    /// Bottom of the circle through the three sites.
    pub(crate) priority: Point,
}

impl CircleEvent {
    pub fn vertex(&self) -> Point {
        self.vertex
    }

    pub fn priority(&self) -> Point {
        self.priority
    }

    /// The edges that end at the vertex.
    pub fn edges(&self) -> [EdgeId; 2] {
        self.edges
    }
}

/// An event to be processed in Fortune's Algorithm.
///
/// Events are processed from the highest `y` downward.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Handled when the sweepline is passing this point.
    Site(Point),

    /// Handled when the associated arc collapses into a single point.
    /// May be removed from the event queue by the addition of another arc.
    Circle(CircleEvent),
}

impl Event {
    /// The sweep position at which the event happens.
    pub fn y(&self) -> f64 {
        match *self {
            Event::Site(Point { y, .. }) => y,
            Event::Circle(ref circle) => circle.priority.y,
        }
    }

    fn is_circle(&self, key: CircleKey) -> bool {
        match *self {
            Event::Circle(ref circle) => circle.key.id == key.id,
            Event::Site(..) => false,
        }
    }
}

impl From<Point> for Event {
    fn from(p: Point) -> Event {
        Event::Site(p)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Event::Site(site) => write!(f, "site {}", site),
            Event::Circle(ref circle) => write!(f, "circle {} at y = {}", circle.vertex, circle.priority.y),
        }
    }
}

/// Events ordered by descending `y`, kept in a plain sequence.
///
/// Ties within `epsilon` are resolved by insertion: an inserted event goes
/// in front of every event it ties with. Insertion and removal are linear.
#[derive(Debug, Clone)]
pub struct EventQueue {
    events: VecDeque<Event>,
    epsilon: f64,
}

impl EventQueue {
    pub fn new(epsilon: f64) -> EventQueue {
        EventQueue {
            events: VecDeque::new(),
            epsilon,
        }
    }

    /// Queue holding one site event per site, highest first, ties left to
    /// right.
    pub fn from_sites(sites: &[Point], epsilon: f64) -> EventQueue {
        let events = sites
            .iter()
            .sorted_by_key(|site| (OrderedFloat(-site.y), OrderedFloat(site.x)))
            .map(|&site| Event::Site(site))
            .collect();

        EventQueue { events, epsilon }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn pop(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    /// First index whose event is not above `y` by more than epsilon.
    fn position(&self, y: f64) -> usize {
        self.events
            .iter()
            .position(|event| event.y() <= y + self.epsilon)
            .unwrap_or(self.events.len())
    }

    pub fn insert(&mut self, event: Event) {
        let index = self.position(event.y());
        self.events.insert(index, event);
    }

    /// Index of the circle event, searched within its `y` neighbourhood.
    fn find(&self, key: CircleKey) -> Option<usize> {
        let start = self.position(key.y);

        self.events
            .iter()
            .enumerate()
            .skip(start)
            .take_while(|&(_, event)| event.y() >= key.y - self.epsilon)
            .find(|&(_, event)| event.is_circle(key))
            .map(|(index, _)| index)
    }

    pub fn find_mut(&mut self, key: CircleKey) -> Option<&mut CircleEvent> {
        let index = self.find(key)?;

        match self.events.get_mut(index) {
            Some(Event::Circle(circle)) => Some(circle),
            _ => None,
        }
    }

    /// Removes the circle event. `None` when it is not queued, which the
    /// caller reports; the sweep carries on either way.
    pub fn remove(&mut self, key: CircleKey) -> Option<CircleEvent> {
        let index = self.find(key)?;

        match self.events.remove(index) {
            Some(Event::Circle(circle)) => Some(circle),
            _ => None,
        }
    }
}

impl fmt::Display for EventQueue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "EventQueue{{\n    {}\n}}", itertools::join(self.events.iter(), ",\n    "))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn circle(id: u64, y: f64) -> Event {
        Event::Circle(CircleEvent {
            key: CircleKey { id, y },
            arcs: [NodeId(0), NodeId(1), NodeId(2)],
            edges: [EdgeId(0), EdgeId(1)],
            vertex: Point::new(0.0, y + 1.0),
            priority: Point::new(0.0, y),
        })
    }

    fn key(id: u64, y: f64) -> CircleKey {
        CircleKey { id, y }
    }

    fn ys(queue: &EventQueue) -> Vec<f64> {
        queue.iter().map(Event::y).collect()
    }

    #[test]
    fn sites_are_seeded_top_down_then_left_to_right() {
        let sites = [
            Point::new(3.0, 0.0),
            Point::new(0.0, 5.0),
            Point::new(-1.0, 0.0),
            Point::new(2.0, 7.0),
        ];

        let queue = EventQueue::from_sites(&sites, 1e-10);
        let order: Vec<Event> = queue.iter().cloned().collect();

        assert_eq!(
            order,
            vec![
                Event::Site(Point::new(2.0, 7.0)),
                Event::Site(Point::new(0.0, 5.0)),
                Event::Site(Point::new(-1.0, 0.0)),
                Event::Site(Point::new(3.0, 0.0)),
            ]
        );
    }

    #[test]
    fn insert_keeps_descending_order() {
        let mut queue = EventQueue::from_sites(&[Point::new(0.0, 10.0), Point::new(0.0, 0.0)], 1e-10);

        queue.insert(circle(0, 5.0));
        queue.insert(circle(1, -3.0));
        queue.insert(circle(2, 12.0));

        assert_eq!(ys(&queue), vec![12.0, 10.0, 5.0, 0.0, -3.0]);
    }

    #[test]
    fn inserted_event_goes_before_near_ties() {
        let mut queue = EventQueue::new(1e-10);
        queue.insert(circle(0, 1.0));
        queue.insert(circle(1, 1.0 + 1e-12));
        queue.insert(circle(2, 1.0 - 1e-12));

        let ids: Vec<u64> = queue
            .iter()
            .map(|event| match *event {
                Event::Circle(ref circle) => circle.key.id,
                Event::Site(..) => unreachable!(),
            })
            .collect();

        assert_eq!(ids, vec![2, 1, 0]);
    }

    #[test]
    fn pop_takes_the_highest_event() {
        let mut queue = EventQueue::from_sites(&[Point::new(0.0, 1.0), Point::new(0.0, 2.0)], 1e-10);

        assert_eq!(queue.pop(), Some(Event::Site(Point::new(0.0, 2.0))));
        assert_eq!(queue.pop(), Some(Event::Site(Point::new(0.0, 1.0))));
        assert_eq!(queue.pop(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn remove_by_identity_among_ties() {
        let mut queue = EventQueue::new(1e-10);
        queue.insert(Event::Site(Point::new(0.0, 4.0)));
        queue.insert(circle(7, 4.0));
        queue.insert(circle(8, 4.0));
        queue.insert(circle(9, 2.0));

        let removed = queue.remove(key(7, 4.0)).expect("event 7 is queued");

        assert_eq!(removed.key.id, 7);
        assert_eq!(queue.len(), 3);
        assert!(queue.find(key(8, 4.0)).is_some());
        assert!(queue.find(key(9, 2.0)).is_some());
    }

    #[test]
    fn removing_a_missing_event_changes_nothing() {
        let mut queue = EventQueue::new(1e-10);
        queue.insert(circle(1, 3.0));

        assert_eq!(queue.remove(key(2, 3.0)), None);
        assert_eq!(queue.remove(key(1, 3.0)).map(|c| c.key.id), Some(1));
        assert_eq!(queue.remove(key(1, 3.0)), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn find_mut_edits_in_place() {
        let mut queue = EventQueue::new(1e-10);
        queue.insert(circle(3, 1.0));

        queue.find_mut(key(3, 1.0)).expect("event 3 is queued").arcs[0] = NodeId(42);

        match queue.pop() {
            Some(Event::Circle(circle)) => assert_eq!(circle.arcs[0], NodeId(42)),
            other => panic!("unexpected event {:?}", other),
        }
    }
}
