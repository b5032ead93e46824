//! R-tree over stop positions for proximity and nearest-node queries.
//!
//! All distances are Euclidean in the units of the indexed coordinates.

use geo::Point;
use rstar::{AABB, PointDistance, RTree, RTreeObject};

/// Position tagged with the index it was supplied at
#[derive(Debug, Clone, Copy)]
pub struct IndexedPoint {
    pub index: usize,
    point: [f64; 2],
}

impl IndexedPoint {
    pub fn new(index: usize, point: Point<f64>) -> Self {
        Self {
            index,
            point: [point.x(), point.y()],
        }
    }

    pub fn point(&self) -> Point<f64> {
        Point::new(self.point[0], self.point[1])
    }
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for IndexedPoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

#[derive(Debug, Clone)]
pub struct SpatialIndex {
    tree: RTree<IndexedPoint>,
}

impl SpatialIndex {
    /// Index `points`; query results refer to positions in this slice
    pub fn new(points: &[Point<f64>]) -> Self {
        let items = points
            .iter()
            .enumerate()
            .map(|(index, point)| IndexedPoint::new(index, *point))
            .collect();
        Self {
            tree: RTree::bulk_load(items),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// All unordered pairs `(i, j)` with `i < j` no farther apart than
    /// `radius` (inclusive), sorted
    pub fn pairs_within(&self, radius: f64) -> Vec<(usize, usize)> {
        if radius < 0.0 || !radius.is_finite() {
            return Vec::new();
        }
        let radius_2 = radius * radius;

        let mut pairs: Vec<(usize, usize)> = self
            .tree
            .iter()
            .flat_map(|source| {
                let [x, y] = source.point;
                let envelope =
                    AABB::from_corners([x - radius, y - radius], [x + radius, y + radius]);
                self.tree
                    .locate_in_envelope(&envelope)
                    .filter(move |candidate| {
                        candidate.index > source.index
                            && candidate.distance_2(&source.point) <= radius_2
                    })
                    .map(move |candidate| (source.index, candidate.index))
            })
            .collect();

        pairs.sort_unstable();
        pairs
    }

    /// Nearest indexed point and its distance
    pub fn nearest(&self, point: Point<f64>) -> Option<(usize, f64)> {
        let query = [point.x(), point.y()];
        self.tree
            .nearest_neighbor(&query)
            .map(|found| (found.index, found.distance_2(&query).sqrt()))
    }

    /// Up to `k` nearest indexed points, closest first
    pub fn nearest_k(&self, point: Point<f64>, k: usize) -> Vec<(usize, f64)> {
        let query = [point.x(), point.y()];
        self.tree
            .nearest_neighbor_iter(&query)
            .take(k)
            .map(|found| (found.index, found.distance_2(&query).sqrt()))
            .collect()
    }
}
