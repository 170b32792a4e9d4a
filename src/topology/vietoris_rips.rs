//! Vietoris-Rips Complex Construction
//!
//! The Vietoris-Rips complex VR_ε(X) is a simplicial complex where:
//! - 0-simplices are the points in X
//! - A k-simplex [v₀, ..., vₖ] exists iff d(vᵢ, vⱼ) ≤ ε for all i,j
//!
//! This module prepares the 1-skeleton of the filtration: distinct points,
//! the Euclidean distance matrix, and the edges in filtration order, each
//! tagged as merging two components or closing a cycle.

use std::collections::HashSet;

use ndarray::Array2;

use crate::error::{Error, Result};

/// Marker for "no edge" in the edge index matrix
const NO_EDGE: usize = usize::MAX;

/// An edge of the filtration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilteredEdge {
    pub i: usize,
    pub j: usize,
    /// Filtration value (edge length)
    pub length: f64,
    /// True if the edge closes a 1-cycle instead of merging components
    pub positive: bool,
}

/// Vietoris-Rips 1-skeleton over a de-duplicated point cloud
#[derive(Debug, Clone)]
pub struct VietorisRips {
    /// Distinct points, first occurrence order
    points: Vec<[f64; 2]>,
    /// Distance matrix (precomputed)
    distances: Array2<f64>,
    /// Largest edge length admitted
    threshold: f64,
    /// Edges sorted by (length, i, j)
    edges: Vec<FilteredEdge>,
    /// edge_index[[i, j]] = position of edge {i, j} in `edges`
    edge_index: Array2<usize>,
}

impl VietorisRips {
    /// Build the filtration skeleton from an n × 2 point cloud
    ///
    /// Duplicate rows are collapsed. With `max_epsilon = None` the
    /// filtration is truncated at the enclosing radius, past which the
    /// complex is a cone and carries no homology.
    ///
    /// # Errors
    /// * [`Error::Oracle`] if the cloud is not 2-dimensional, contains
    ///   non-finite coordinates, or `max_epsilon` is negative/NaN
    pub fn from_points(points: &Array2<f64>, max_epsilon: Option<f64>) -> Result<Self> {
        if points.ncols() != 2 {
            return Err(Error::oracle(format!(
                "expected 2 columns, got {}",
                points.ncols()
            )));
        }
        if let Some(eps) = max_epsilon {
            if eps.is_nan() || eps < 0.0 {
                return Err(Error::oracle(format!("invalid max_epsilon {eps}")));
            }
        }

        let points = Self::distinct_points(points)?;
        let distances = Self::compute_distance_matrix(&points);
        let threshold = match max_epsilon {
            Some(eps) => eps.min(Self::enclosing_radius(&distances)),
            None => Self::enclosing_radius(&distances),
        };

        let n = points.len();
        let mut edges = Vec::new();
        for i in 0..n {
            for j in i + 1..n {
                let length = distances[[i, j]];
                if length <= threshold {
                    edges.push(FilteredEdge {
                        i,
                        j,
                        length,
                        positive: false,
                    });
                }
            }
        }
        edges.sort_by(|a, b| {
            a.length
                .total_cmp(&b.length)
                .then(a.i.cmp(&b.i))
                .then(a.j.cmp(&b.j))
        });

        let mut edge_index = Array2::<usize>::from_elem((n, n), NO_EDGE);
        for (idx, e) in edges.iter().enumerate() {
            edge_index[[e.i, e.j]] = idx;
            edge_index[[e.j, e.i]] = idx;
        }

        Self::classify_edges(n, &mut edges);

        Ok(Self {
            points,
            distances,
            threshold,
            edges,
            edge_index,
        })
    }

    /// Collapse repeated rows, keeping first occurrences in order
    fn distinct_points(points: &Array2<f64>) -> Result<Vec<[f64; 2]>> {
        let mut seen = HashSet::new();
        let mut distinct = Vec::with_capacity(points.nrows());

        for row in points.rows() {
            let (x, y) = (row[0], row[1]);
            if !x.is_finite() || !y.is_finite() {
                return Err(Error::oracle(format!("non-finite point ({x}, {y})")));
            }
            // +0.0 and -0.0 are the same point
            let key = ((x + 0.0).to_bits(), (y + 0.0).to_bits());
            if seen.insert(key) {
                distinct.push([x, y]);
            }
        }

        Ok(distinct)
    }

    /// Compute Euclidean distance matrix
    fn compute_distance_matrix(points: &[[f64; 2]]) -> Array2<f64> {
        let n = points.len();
        let mut dm = Array2::<f64>::zeros((n, n));

        for i in 0..n {
            for j in i + 1..n {
                let dx = points[i][0] - points[j][0];
                let dy = points[i][1] - points[j][1];
                let dist = (dx * dx + dy * dy).sqrt();
                dm[[i, j]] = dist;
                dm[[j, i]] = dist;
            }
        }

        dm
    }

    /// min over points of the distance to the farthest other point
    fn enclosing_radius(distances: &Array2<f64>) -> f64 {
        distances
            .rows()
            .into_iter()
            .map(|row| row.iter().cloned().fold(0.0, f64::max))
            .fold(f64::INFINITY, f64::min)
    }

    /// Mark edges that close a cycle, using Union-Find in filtration order
    fn classify_edges(n: usize, edges: &mut [FilteredEdge]) {
        let mut parent: Vec<usize> = (0..n).collect();
        let mut rank = vec![0usize; n];

        fn find(parent: &mut [usize], i: usize) -> usize {
            if parent[i] != i {
                parent[i] = find(parent, parent[i]);
            }
            parent[i]
        }

        for edge in edges.iter_mut() {
            let rx = find(&mut parent, edge.i);
            let ry = find(&mut parent, edge.j);
            if rx == ry {
                edge.positive = true;
            } else if rank[rx] < rank[ry] {
                parent[rx] = ry;
            } else if rank[rx] > rank[ry] {
                parent[ry] = rx;
            } else {
                parent[ry] = rx;
                rank[rx] += 1;
            }
        }
    }

    /// Number of distinct points
    pub fn n_points(&self) -> usize {
        self.points.len()
    }

    pub fn points(&self) -> &[[f64; 2]] {
        &self.points
    }

    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.distances[[i, j]]
    }

    /// Largest filtration value in the complex
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Edges in filtration order
    pub fn edges(&self) -> &[FilteredEdge] {
        &self.edges
    }

    /// Filtration position of edge {i, j}, if it is in the complex
    pub fn edge_id(&self, i: usize, j: usize) -> Option<usize> {
        match self.edge_index[[i, j]] {
            NO_EDGE => None,
            idx => Some(idx),
        }
    }

    /// Number of cycle-closing edges (H1 births, zero-length bars included)
    pub fn n_positive_edges(&self) -> usize {
        self.edges.iter().filter(|e| e.positive).count()
    }
}
