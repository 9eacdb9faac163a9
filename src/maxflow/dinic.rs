/*
 * Copyright (c) 2017-2026 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

//! This module implements Dinic' max flow algorithm
//!
//! A search computes the BFS distance labels of the residual network, an
//! augmentation step sends a blocking flow through the level graph. The
//! blocking flow is found by an iterative search with a current-arc
//! pointer per node, so long paths do not need deep recursion.
//!
//! # Example
//!
//! ```
//! use rs_maxflow::{solve, Algorithm, Edge, SolverOptions};
//!
//! let edges = vec![
//!     Edge::new('s', 'b', 18).unwrap(),
//!     Edge::new('s', 'e', 27).unwrap(),
//!     Edge::new('b', 'a', 8).unwrap(),
//!     Edge::new('b', 'c', 9).unwrap(),
//!     Edge::new('b', 'f', 6).unwrap(),
//!     Edge::new('a', 'c', 1).unwrap(),
//!     Edge::new('a', 'd', 10).unwrap(),
//!     Edge::new('c', 'd', 8).unwrap(),
//!     Edge::new('d', 'c', 3).unwrap(),
//!     Edge::new('d', 't', 33).unwrap(),
//!     Edge::new('e', 'c', 5).unwrap(),
//!     Edge::new('e', 'd', 2).unwrap(),
//!     Edge::new('e', 'f', 9).unwrap(),
//!     Edge::new('e', 'h', 5).unwrap(),
//!     Edge::new('f', 'g', 6).unwrap(),
//!     Edge::new('h', 'd', 8).unwrap(),
//!     Edge::new('h', 'g', 4).unwrap(),
//!     Edge::new('g', 't', 6).unwrap(),
//! ];
//!
//! let opts = SolverOptions::default().with_algorithm(Algorithm::Dinic);
//! let sol = solve(edges, &'s', &'t', &opts).unwrap();
//! assert_eq!(sol.value, 29);
//!
//! let mut mincut = sol.mincut.source_side.clone();
//! mincut.sort();
//! assert_eq!(mincut, vec!['b', 'c', 'e', 'f', 's']);
//! ```

use super::MaxFlow;
use crate::edge::{Capacity, NodeId};
use crate::network::{Network, Path};

use log::trace;
use std::collections::VecDeque;

/// The dinic max-flow algorithm.
pub struct Dinic {
    src: usize,
    snk: usize,
    dist: Vec<usize>,
    current: Vec<usize>,
    queue: VecDeque<usize>,
}

impl Dinic {
    /// Create a new Dinic algorithm instance for a network.
    pub fn new<N, F>(net: &Network<N, F>, src: usize, snk: usize) -> Self
    where
        N: NodeId,
        F: Capacity,
    {
        assert_ne!(src, snk, "Source and sink node must not be equal");
        Dinic {
            src,
            snk,
            dist: vec![usize::MAX; net.num_nodes()],
            current: vec![0; net.num_nodes()],
            queue: VecDeque::with_capacity(net.num_nodes()),
        }
    }

    /// Return the distance label of node `u` computed by the last search.
    ///
    /// Nodes that cannot be reached from the source have label `usize::MAX`.
    pub fn dist(&self, u: usize) -> usize {
        self.dist[u]
    }

    // Find the next path in the level graph from `src` to `snk`.
    //
    // Dead ends are removed from the level graph by resetting their
    // distance label.
    fn next_path<N, F>(&mut self, net: &Network<N, F>) -> Option<Path>
    where
        N: NodeId,
        F: Capacity,
    {
        let mut arcs = vec![];
        let mut u = self.src;
        while u != self.snk {
            let mut next = None;
            while self.current[u] < net.outdegree(u) {
                let (e, v) = net.outarc(u, self.current[u]);
                if self.dist[v] != usize::MAX && self.dist[v] == self.dist[u] + 1 && net.residual(e) > F::zero() {
                    next = Some((e, v));
                    break;
                }
                self.current[u] += 1;
            }

            match next {
                Some((e, v)) => {
                    arcs.push(e);
                    u = v;
                }
                None => {
                    // nothing can be sent from this node, delete the node
                    self.dist[u] = usize::MAX;
                    let e = arcs.pop()?;
                    u = net.tail(e);
                    self.current[u] += 1;
                }
            }
        }
        Some(Path::new(arcs))
    }
}

impl<N, F> MaxFlow<N, F> for Dinic
where
    N: NodeId,
    F: Capacity,
{
    fn search(&mut self, net: &Network<N, F>) -> bool {
        let n = net.num_nodes();
        self.dist.clear();
        self.dist.resize(n, usize::MAX);
        self.current.clear();
        self.current.resize(n, 0);

        self.dist[self.src] = 0;
        self.queue.clear();
        self.queue.push_back(self.src);

        while let Some(u) = self.queue.pop_front() {
            let d = self.dist[u];
            if d >= self.dist[self.snk] {
                break;
            }
            for (e, v) in net.outarcs(u) {
                if self.dist[v] == usize::MAX && net.residual(e) > F::zero() {
                    self.dist[v] = d + 1;
                    self.queue.push_back(v);
                }
            }
        }

        self.dist[self.snk] != usize::MAX
    }

    fn augment(&mut self, net: &mut Network<N, F>) -> F {
        let mut df = F::zero();
        let mut npaths = 0;
        while let Some(path) = self.next_path(net) {
            df += net.augment(&path);
            npaths += 1;
        }
        trace!("Augmented {:?} along a blocking flow of {} paths", df, npaths);
        df
    }
}
