//! Orthogonal wire router.
//!
//! Builds a sparse visibility grid from the obstacle edges and the two
//! endpoints, links each node to its nearest neighbour along every row and
//! column, and runs a shortest-path search over the result. Edges that would
//! pass through an obstacle interior are never added.

use petgraph::algo::astar;
use petgraph::graph::{NodeIndex, UnGraph};

use super::obstacles::Obstacle;
use crate::core::{RouteOptions, DEFAULT_ROUTE_MARGIN};
use crate::geometry::{Point, Rect};

/// Router with a fixed clearance around each obstacle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthogonalRouter {
    margin: f64,
}

impl Default for OrthogonalRouter {
    fn default() -> Self {
        Self::new(DEFAULT_ROUTE_MARGIN)
    }
}

impl OrthogonalRouter {
    pub fn new(margin: f64) -> Self {
        Self { margin }
    }

    pub fn from_options(options: &RouteOptions) -> Self {
        Self::new(options.margin)
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// Shortest axis-aligned polyline from `start` to `end`.
    ///
    /// Always returns at least two points with `start` first and `end` last.
    /// When an endpoint sits inside an obstacle, or no path exists, the result
    /// is the simple L-shaped [`fallback_route`].
    pub fn route(&self, start: Point, end: Point, obstacles: &[Obstacle]) -> Vec<Point> {
        if start == end {
            return vec![start, end];
        }

        let boxes: Vec<Rect> = obstacles.iter().map(|o| o.rect.expand(self.margin)).collect();
        let blocked = |p: &Point| boxes.iter().any(|b| b.contains_strict(p));

        if blocked(&start) || blocked(&end) {
            tracing::debug!("Endpoint {} or {} is inside an obstacle, using fallback", start, end);
            return fallback_route(start, end);
        }

        let grid = VisibilityGrid::build(start, end, &boxes);
        let (Some(from), Some(to)) = (grid.node_at(start), grid.node_at(end)) else {
            return fallback_route(start, end);
        };

        match astar(&grid.graph, from, |n| n == to, |e| *e.weight(), |_| 0.0) {
            Some((cost, path)) => {
                tracing::debug!("Routed {} -> {} with length {}", start, end, cost);
                let points: Vec<Point> = path.into_iter().map(|n| grid.graph[n]).collect();
                compress_collinear(&points)
            }
            None => {
                tracing::debug!("No route from {} to {}, using fallback", start, end);
                fallback_route(start, end)
            }
        }
    }
}

/// Route with an explicit margin.
pub fn route(start: Point, end: Point, obstacles: &[Obstacle], margin: f64) -> Vec<Point> {
    OrthogonalRouter::new(margin).route(start, end, obstacles)
}

/// Horizontal leg to the target column, then straight to the target.
pub fn fallback_route(start: Point, end: Point) -> Vec<Point> {
    vec![start, Point::new(end.x, start.y), end]
}

/// Drop interior points that lie on a straight run between their neighbours.
pub fn compress_collinear(points: &[Point]) -> Vec<Point> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let mut out = vec![points[0]];
    for window in points.windows(3) {
        let (prev, cur, next) = (out[out.len() - 1], window[1], window[2]);
        let vertical = prev.x == cur.x && cur.x == next.x;
        let horizontal = prev.y == cur.y && cur.y == next.y;
        if !vertical && !horizontal {
            out.push(cur);
        }
    }
    out.push(points[points.len() - 1]);
    out
}

struct VisibilityGrid {
    xs: Vec<f64>,
    ys: Vec<f64>,
    cells: Vec<Option<NodeIndex>>,
    graph: UnGraph<Point, f64>,
}

impl VisibilityGrid {
    fn build(start: Point, end: Point, boxes: &[Rect]) -> Self {
        let xs = sorted_unique(
            [start.x, end.x]
                .into_iter()
                .chain(boxes.iter().flat_map(|b| [b.min_x, b.max_x])),
        );
        let ys = sorted_unique(
            [start.y, end.y]
                .into_iter()
                .chain(boxes.iter().flat_map(|b| [b.min_y, b.max_y])),
        );

        let mut graph = UnGraph::<Point, f64>::default();
        let mut cells = vec![None; xs.len() * ys.len()];
        for (i, &x) in xs.iter().enumerate() {
            for (j, &y) in ys.iter().enumerate() {
                let p = Point::new(x, y);
                if !boxes.iter().any(|b| b.contains_strict(&p)) {
                    cells[i * ys.len() + j] = Some(graph.add_node(p));
                }
            }
        }

        let mut grid = Self { xs, ys, cells, graph };
        grid.link(boxes);
        grid
    }

    fn cell(&self, i: usize, j: usize) -> Option<NodeIndex> {
        self.cells[i * self.ys.len() + j]
    }

    fn node_at(&self, p: Point) -> Option<NodeIndex> {
        let i = self.xs.iter().position(|&x| x == p.x)?;
        let j = self.ys.iter().position(|&y| y == p.y)?;
        self.cell(i, j)
    }

    /// Connect nearest present neighbours in every column, then every row.
    fn link(&mut self, boxes: &[Rect]) {
        let (nx, ny) = (self.xs.len(), self.ys.len());
        let mut pairs = Vec::new();

        for i in 0..nx {
            let mut prev = None;
            for j in 0..ny {
                if let Some(n) = self.cell(i, j) {
                    if let Some(p) = prev {
                        pairs.push((p, n));
                    }
                    prev = Some(n);
                }
            }
        }
        for j in 0..ny {
            let mut prev = None;
            for i in 0..nx {
                if let Some(n) = self.cell(i, j) {
                    if let Some(p) = prev {
                        pairs.push((p, n));
                    }
                    prev = Some(n);
                }
            }
        }

        for (a, b) in pairs {
            let (pa, pb) = (self.graph[a], self.graph[b]);
            if boxes.iter().any(|r| r.segment_crosses(&pa, &pb)) {
                continue;
            }
            self.graph.add_edge(a, b, pa.manhattan(&pb));
        }
    }

    #[cfg(test)]
    fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        use petgraph::visit::EdgeRef;
        self.graph
            .edge_references()
            .map(|e| (self.graph[e.source()], self.graph[e.target()]))
    }
}

fn sorted_unique(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut v: Vec<f64> = values.collect();
    v.sort_by(|a, b| a.total_cmp(b));
    v.dedup_by(|a, b| a == b);
    v
}
