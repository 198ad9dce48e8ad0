use crate::edge::{BreakpointEdge, EdgeId};
use crate::event::CircleKey;
use crate::geometry::{breakpoint_x, Point};

/// Index of a node in the beachline arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// An arc on the beachline.
///
/// A parabola with the specified focus and a directrix of the sweep line.
/// Since the sweep line moves during the algorithm, this represents an
/// entire class of parabolas, though only one parabola at any point in time.
#[derive(Debug, Clone)]
struct Arc {
    /// The focus of the parabolas where the directrix is the sweep line.
    site: Point,

    /// The pending circle event that would make this arc vanish.
    circle: Option<CircleKey>,
}

/// Where two arcs meet. The edge it traces separates the rightmost arc of
/// the left subtree from the leftmost arc of the right subtree.
#[derive(Debug, Clone)]
struct Breakpoint {
    edge: EdgeId,
    left: NodeId,
    right: NodeId,
}

#[derive(Debug, Clone)]
enum NodeKind {
    Leaf(Arc),
    Branch(Breakpoint),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    kind: NodeKind,
}

/// The three arcs left by splitting an arc with a new site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitArcs {
    /// The original arc, now only its part left of the new site.
    pub left: NodeId,
    /// The arc of the new site.
    pub middle: NodeId,
    /// The part of the original arc right of the new site.
    pub right: NodeId,
}

/// Outcome of removing a vanished arc.
#[derive(Debug, Clone, PartialEq)]
pub struct Merged {
    /// The arcs that became neighbours.
    pub left: NodeId,
    pub right: NodeId,
    /// Edges that got their end point.
    pub closed: Vec<EdgeId>,
    /// Edges that already had an end point, and that end point.
    pub reclosed: Vec<(EdgeId, Point)>,
}

/// The beachline as a binary tree: leaves are arcs read left to right,
/// branches are the breakpoints between them.
///
/// Nodes live in an arena and refer to each other by index. Nodes that
/// leave the tree stay in the arena, unreachable. The beachline also owns
/// every edge any breakpoint ever traced.
#[derive(Debug, Clone)]
pub struct Beachline {
    nodes: Vec<Node>,
    root: NodeId,
    edges: Vec<BreakpointEdge>,
}

impl Beachline {
    /// A beachline of a single arc.
    pub fn new(site: Point) -> Beachline {
        Beachline {
            nodes: vec![Node {
                parent: None,
                kind: NodeKind::Leaf(Arc { site, circle: None }),
            }],
            root: NodeId(0),
            edges: Vec::new(),
        }
    }

    fn push_node(&mut self, parent: Option<NodeId>, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { parent, kind });
        id
    }

    fn push_edge(&mut self, edge: BreakpointEdge) -> EdgeId {
        let id = EdgeId(self.edges.len());
        self.edges.push(edge);
        id
    }

    fn arc(&self, leaf: NodeId) -> &Arc {
        match self.nodes[leaf.0].kind {
            NodeKind::Leaf(ref arc) => arc,
            NodeKind::Branch(..) => panic!("Node {:?} is a breakpoint, not an arc.", leaf),
        }
    }

    fn arc_mut(&mut self, leaf: NodeId) -> &mut Arc {
        match self.nodes[leaf.0].kind {
            NodeKind::Leaf(ref mut arc) => arc,
            NodeKind::Branch(..) => panic!("Node {:?} is a breakpoint, not an arc.", leaf),
        }
    }

    fn breakpoint(&self, branch: NodeId) -> &Breakpoint {
        match self.nodes[branch.0].kind {
            NodeKind::Branch(ref breakpoint) => breakpoint,
            NodeKind::Leaf(..) => panic!("Node {:?} is an arc, not a breakpoint.", branch),
        }
    }

    fn breakpoint_mut(&mut self, branch: NodeId) -> &mut Breakpoint {
        match self.nodes[branch.0].kind {
            NodeKind::Branch(ref mut breakpoint) => breakpoint,
            NodeKind::Leaf(..) => panic!("Node {:?} is an arc, not a breakpoint.", branch),
        }
    }

    pub fn site(&self, leaf: NodeId) -> Point {
        self.arc(leaf).site
    }

    pub fn circle(&self, leaf: NodeId) -> Option<CircleKey> {
        self.arc(leaf).circle
    }

    pub fn set_circle(&mut self, leaf: NodeId, circle: CircleKey) {
        self.arc_mut(leaf).circle = Some(circle);
    }

    /// Clears and returns the pending circle event of the arc.
    pub fn take_circle(&mut self, leaf: NodeId) -> Option<CircleKey> {
        self.arc_mut(leaf).circle.take()
    }

    /// The edge traced by a breakpoint node.
    pub fn branch_edge(&self, branch: NodeId) -> EdgeId {
        self.breakpoint(branch).edge
    }

    pub fn edge(&self, id: EdgeId) -> &BreakpointEdge {
        &self.edges[id.0]
    }

    pub fn into_edges(self) -> Vec<BreakpointEdge> {
        self.edges
    }

    /// The arc directly above `x` when the sweep line is at `sweep_y`.
    pub fn locate_arc(&self, x: f64, sweep_y: f64) -> NodeId {
        let mut node = self.root;

        loop {
            match self.nodes[node.0].kind {
                NodeKind::Leaf(..) => return node,
                NodeKind::Branch(ref breakpoint) => {
                    let edge = &self.edges[breakpoint.edge.0];
                    let breakpoint_at = breakpoint_x(edge.left_focus(), edge.right_focus(), sweep_y);

                    node = if x < breakpoint_at { breakpoint.left } else { breakpoint.right };
                }
            }
        }
    }

    fn leftmost_leaf(&self, mut node: NodeId) -> NodeId {
        while let NodeKind::Branch(ref breakpoint) = self.nodes[node.0].kind {
            node = breakpoint.left;
        }
        node
    }

    fn rightmost_leaf(&self, mut node: NodeId) -> NodeId {
        while let NodeKind::Branch(ref breakpoint) = self.nodes[node.0].kind {
            node = breakpoint.right;
        }
        node
    }

    /// The arc left of `leaf` and the breakpoint between them.
    pub fn left_neighbor(&self, leaf: NodeId) -> Option<(NodeId, NodeId)> {
        let mut node = leaf;

        while let Some(parent) = self.nodes[node.0].parent {
            let breakpoint = self.breakpoint(parent);
            if breakpoint.right == node {
                return Some((self.rightmost_leaf(breakpoint.left), parent));
            }
            node = parent;
        }

        None
    }

    /// The arc right of `leaf` and the breakpoint between them.
    pub fn right_neighbor(&self, leaf: NodeId) -> Option<(NodeId, NodeId)> {
        let mut node = leaf;

        while let Some(parent) = self.nodes[node.0].parent {
            let breakpoint = self.breakpoint(parent);
            if breakpoint.left == node {
                return Some((self.leftmost_leaf(breakpoint.right), parent));
            }
            node = parent;
        }

        None
    }

    /// Puts `new` where `old` is in the tree.
    fn replace(&mut self, old: NodeId, new: NodeId) {
        let parent = self.nodes[old.0].parent;

        match parent {
            Some(parent) => {
                let breakpoint = self.breakpoint_mut(parent);
                if breakpoint.left == old {
                    breakpoint.left = new;
                } else {
                    breakpoint.right = new;
                }
            }
            None => self.root = new,
        }

        self.nodes[new.0].parent = parent;
    }

    /// Splits `arc` where the arc of `site` appears below it at `start`.
    ///
    /// ```text
    ///     a            (a|s)
    ///           =>    /     \
    ///                a     (s|a)
    ///                      /   \
    ///                     s     a
    /// ```
    ///
    /// Both new edges start at `start` and are twins. The arc keeps its node
    /// as the left remainder; its pending circle event must have been
    /// cancelled by the caller.
    pub fn split(&mut self, arc: NodeId, site: Point, start: Point) -> SplitArcs {
        let focus = self.site(arc);

        let left_edge = self.push_edge(BreakpointEdge::new(focus, site, start));
        let right_edge = self.push_edge(BreakpointEdge::new(site, focus, start));
        self.edges[left_edge.0].set_twin(right_edge);
        self.edges[right_edge.0].set_twin(left_edge);

        let middle = self.push_node(None, NodeKind::Leaf(Arc { site, circle: None }));
        let right = self.push_node(None, NodeKind::Leaf(Arc { site: focus, circle: None }));
        let right_branch = self.push_node(
            None,
            NodeKind::Branch(Breakpoint {
                edge: right_edge,
                left: middle,
                right,
            }),
        );
        let left_branch = self.push_node(
            None,
            NodeKind::Branch(Breakpoint {
                edge: left_edge,
                left: arc,
                right: right_branch,
            }),
        );

        self.replace(arc, left_branch);
        self.nodes[arc.0].parent = Some(left_branch);
        self.nodes[right_branch.0].parent = Some(left_branch);
        self.nodes[middle.0].parent = Some(right_branch);
        self.nodes[right.0].parent = Some(right_branch);

        SplitArcs {
            left: arc,
            middle,
            right,
        }
    }

    /// Adds the arc of `site` next to `arc` when both foci lie on the sweep
    /// line, so neither parabola has opened yet.
    ///
    /// The two arcs are separated by one vertical edge coming down from
    /// infinity. Returns the arcs as (left, right).
    pub fn split_degenerate(&mut self, arc: NodeId, site: Point) -> (NodeId, NodeId) {
        let focus = self.site(arc);
        let new = self.push_node(None, NodeKind::Leaf(Arc { site, circle: None }));

        let (left, right) = if site.x < focus.x { (new, arc) } else { (arc, new) };
        let (left_site, right_site) = (self.site(left), self.site(right));

        let start = Point::new((left_site.x + right_site.x) / 2.0, f64::INFINITY);
        let edge = self.push_edge(BreakpointEdge::new(left_site, right_site, start));

        let branch = self.push_node(None, NodeKind::Branch(Breakpoint { edge, left, right }));

        self.replace(arc, branch);
        self.nodes[left.0].parent = Some(branch);
        self.nodes[right.0].parent = Some(branch);

        (left, right)
    }

    /// Removes the vanished `arc`, ending both edges around it at `vertex`.
    ///
    /// Of the two breakpoints around the arc one is its parent and the other
    /// an ancestor further up. The parent leaves the tree with the arc; the
    /// ancestor now separates the former neighbours and traces a new edge
    /// from `vertex`.
    ///
    /// Returns `None` when the arc lacks a neighbour on either side.
    pub fn merge_away(&mut self, arc: NodeId, vertex: Point) -> Option<Merged> {
        let (left, left_branch) = self.left_neighbor(arc)?;
        let (right, right_branch) = self.right_neighbor(arc)?;

        let mut closed = Vec::with_capacity(2);
        let mut reclosed = Vec::new();
        for &branch in &[left_branch, right_branch] {
            let id = self.branch_edge(branch);
            match self.edges[id.0].finish(vertex) {
                Ok(()) => closed.push(id),
                Err(end) => reclosed.push((id, end)),
            }
        }

        let parent = self.nodes[arc.0].parent?;
        let (sibling, survivor) = if parent == left_branch {
            (self.breakpoint(parent).left, right_branch)
        } else {
            (self.breakpoint(parent).right, left_branch)
        };

        self.replace(parent, sibling);
        self.nodes[parent.0].parent = None;
        self.nodes[arc.0].parent = None;

        let edge = self.push_edge(BreakpointEdge::new(self.site(left), self.site(right), vertex));
        self.breakpoint_mut(survivor).edge = edge;

        Some(Merged {
            left,
            right,
            closed,
            reclosed,
        })
    }

    /// The arcs, left to right.
    pub fn leaves(&self) -> Vec<NodeId> {
        let mut leaves = Vec::new();
        let mut stack = vec![self.root];

        while let Some(node) = stack.pop() {
            match self.nodes[node.0].kind {
                NodeKind::Leaf(..) => leaves.push(node),
                NodeKind::Branch(ref breakpoint) => {
                    stack.push(breakpoint.right);
                    stack.push(breakpoint.left);
                }
            }
        }

        leaves
    }
}
