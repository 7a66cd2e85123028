//! Dense all-pairs shortest paths (Floyd–Warshall) with next-hop reconstruction.
//!
//! Both matrices are `n * n`, row-major. `u32::MAX` in the next-hop matrix marks
//! an unreachable pair; `f64::INFINITY` does the same for distances.

use std::time::Instant;

use tracing::debug;

use crate::errors::FloorPathError;
use crate::graph::builder::EdgeList;
use crate::models::PointIndex;

const NO_HOP: u32 = u32::MAX;

#[derive(Clone, Debug, PartialEq)]
pub struct ShortestPathTable {
    n: usize,
    dist: Vec<f64>,
    next: Vec<u32>,
}

impl ShortestPathTable {
    /// Fails with `TooManyPoints` before allocating when `n > cap`.
    ///
    /// Panics on negative or non-finite edge weights and on edges that
    /// reference points outside `0..n`.
    pub fn build(n: usize, edges: &EdgeList, cap: usize) -> Result<Self, FloorPathError> {
        if n > cap {
            return Err(FloorPathError::TooManyPoints { count: n, cap });
        }
        let started = Instant::now();
        let mut dist = vec![f64::INFINITY; n * n];
        let mut next = vec![NO_HOP; n * n];

        for (u, v, w) in edges.iter() {
            assert!(w.is_finite() && w >= 0.0, "invalid edge weight {w} on ({u}, {v})");
            let (ui, vi) = (u as usize, v as usize);
            assert!(ui < n && vi < n, "edge ({u}, {v}) outside 0..{n}");
            dist[ui * n + vi] = w;
            next[ui * n + vi] = v;
        }
        for i in 0..n {
            dist[i * n + i] = 0.0;
            next[i * n + i] = i as u32;
        }
        let init_ms = started.elapsed().as_millis() as u64;

        for k in 0..n {
            for i in 0..n {
                let dik = dist[i * n + k];
                if dik == f64::INFINITY {
                    continue;
                }
                let hop = next[i * n + k];
                for j in 0..n {
                    let cand = dik + dist[k * n + j];
                    if cand < dist[i * n + j] {
                        dist[i * n + j] = cand;
                        next[i * n + j] = hop;
                    }
                }
            }
        }
        debug!(
            nodes = n,
            edges = edges.len(),
            init_ms,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "all-pairs relaxation done"
        );
        Ok(Self { n, dist, next })
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    fn at(&self, u: PointIndex, v: PointIndex) -> usize {
        let (u, v) = (u as usize, v as usize);
        assert!(u < self.n && v < self.n, "pair ({u}, {v}) outside 0..{}", self.n);
        u * self.n + v
    }

    /// Raw distance, `f64::INFINITY` when unreachable.
    pub fn dist(&self, u: PointIndex, v: PointIndex) -> f64 {
        self.dist[self.at(u, v)]
    }

    pub fn distance(&self, u: PointIndex, v: PointIndex) -> Option<f64> {
        let d = self.dist(u, v);
        d.is_finite().then_some(d)
    }

    /// First hop on the shortest path from `u` to `v`.
    pub fn next_hop(&self, u: PointIndex, v: PointIndex) -> Option<PointIndex> {
        let h = self.next[self.at(u, v)];
        (h != NO_HOP).then_some(h)
    }

    pub fn reachable(&self, u: PointIndex, v: PointIndex) -> bool {
        self.next_hop(u, v).is_some()
    }

    /// Ordered point indices from `u` to `v` inclusive; empty when unreachable.
    ///
    /// Panics if the walk does not reach `v` within `n` hops, which can only
    /// happen with a corrupted next-hop matrix.
    pub fn reconstruct_path(&self, u: PointIndex, v: PointIndex) -> Vec<PointIndex> {
        if self.next_hop(u, v).is_none() {
            return Vec::new();
        }
        let mut path = Vec::new();
        let mut cur = u;
        while cur != v {
            path.push(cur);
            assert!(path.len() <= self.n, "next-hop cycle while walking {u} -> {v}");
            cur = match self.next_hop(cur, v) {
                Some(h) => h,
                None => panic!("next-hop chain from {u} to {v} broken at {cur}"),
            };
        }
        path.push(v);
        path
    }

    /// Like [`reconstruct_path`](Self::reconstruct_path) but reports an
    /// unreachable pair as `NoPathFound`.
    pub fn require_path(&self, u: PointIndex, v: PointIndex) -> Result<Vec<PointIndex>, FloorPathError> {
        let path = self.reconstruct_path(u, v);
        if path.is_empty() {
            return Err(FloorPathError::NoPathFound);
        }
        Ok(path)
    }
}
