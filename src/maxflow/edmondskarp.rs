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

//! This module implements the max flow algorithm of Edmonds-Karp.
//!
//! Each iteration searches a shortest augmenting path (by number of
//! arcs) with a breadth-first search in the residual network and
//! augments the flow along it. This bounds the number of augmentations
//! by `O(|arcs| * |nodes|)`.
//!
//! # Example
//!
//! ```
//! use rs_maxflow::maxflow::{EdmondsKarp, MaxFlow};
//! use rs_maxflow::{DuplicatePolicy, Edge, Network};
//!
//! let edges = vec![
//!     Edge::new('s', 'a', 5).unwrap(),
//!     Edge::new('s', 'c', 5).unwrap(),
//!     Edge::new('a', 'b', 2).unwrap(),
//!     Edge::new('a', 'c', 1).unwrap(),
//!     Edge::new('a', 'd', 1).unwrap(),
//!     Edge::new('c', 'd', 2).unwrap(),
//!     Edge::new('d', 'b', 2).unwrap(),
//!     Edge::new('b', 't', 4).unwrap(),
//!     Edge::new('d', 't', 5).unwrap(),
//! ];
//! let mut net = Network::build(edges, DuplicatePolicy::Sum).unwrap();
//! let (s, t) = net.terminals(&'s', &'t').unwrap();
//!
//! let mut ek = EdmondsKarp::new(&net, s, t);
//!
//! // the first path is a shortest one
//! let path = ek.find_path(&net).unwrap();
//! assert_eq!(path.len(), 3);
//!
//! let mut value = net.augment(&path);
//! while ek.search(&net) {
//!     value += ek.augment(&mut net);
//! }
//! assert_eq!(value, 5);
//! ```

use super::MaxFlow;
use crate::edge::{Capacity, NodeId};
use crate::network::{Network, Path};

use log::trace;
use std::collections::VecDeque;

const NONE: usize = usize::MAX;

/// Max-flow algorithm of Edmonds and Karp.
pub struct EdmondsKarp {
    src: usize,
    snk: usize,
    pred: Vec<usize>,
    queue: VecDeque<usize>,
    path: Option<Path>,
}

impl EdmondsKarp {
    /// Create a new Edmonds-Karp instance for a network.
    pub fn new<N, F>(net: &Network<N, F>, src: usize, snk: usize) -> Self
    where
        N: NodeId,
        F: Capacity,
    {
        assert_ne!(src, snk, "Source and sink node must not be equal");
        EdmondsKarp {
            src,
            snk,
            pred: vec![NONE; net.num_nodes()],
            queue: VecDeque::with_capacity(net.num_nodes()),
            path: None,
        }
    }

    /// Find a shortest augmenting path from the source to the sink.
    ///
    /// Only arcs with positive residual capacity are followed. The
    /// outgoing arcs of a node are visited in insertion order, so the
    /// path found is the same for the same input.
    ///
    /// Returns `None` if the sink cannot be reached.
    pub fn find_path<N, F>(&mut self, net: &Network<N, F>) -> Option<Path>
    where
        N: NodeId,
        F: Capacity,
    {
        let (src, snk) = (self.src, self.snk);

        self.pred.clear();
        self.pred.resize(net.num_nodes(), NONE);

        // just some dummy arc, the source must not be visited again
        self.pred[src] = 0;
        self.queue.clear();
        self.queue.push_back(src);
        'bfs: while let Some(u) = self.queue.pop_front() {
            for (e, v) in net.outarcs(u) {
                if self.pred[v] == NONE && net.residual(e) > F::zero() {
                    self.pred[v] = e;
                    self.queue.push_back(v);
                    if v == snk {
                        break 'bfs;
                    }
                }
            }
        }

        // sink cannot be reached -> stop
        if self.pred[snk] == NONE {
            return None;
        }

        let mut arcs = vec![];
        let mut v = snk;
        while v != src {
            let e = self.pred[v];
            arcs.push(e);
            v = net.tail(e);
        }
        arcs.reverse();

        Some(Path::new(arcs))
    }
}

impl<N, F> MaxFlow<N, F> for EdmondsKarp
where
    N: NodeId,
    F: Capacity,
{
    fn search(&mut self, net: &Network<N, F>) -> bool {
        self.path = self.find_path(net);
        self.path.is_some()
    }

    fn augment(&mut self, net: &mut Network<N, F>) -> F {
        match self.path.take() {
            Some(path) => {
                let df = net.augment(&path);
                debug_assert!(!df.is_zero());
                trace!("Augmented {:?} along path with {} arcs", df, path.len());
                df
            }
            None => F::zero(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EdmondsKarp;
    use crate::maxflow::MaxFlow;
    use crate::{DuplicatePolicy, Edge, Network};

    fn network() -> Network<usize, u32> {
        let edges = [
            (0, 2, 15),
            (0, 4, 10),
            (2, 3, 6),
            (2, 4, 7),
            (3, 1, 5),
            (3, 5, 2),
            (4, 3, 11),
            (4, 5, 4),
            (5, 3, 4),
            (5, 1, 20),
        ];
        Network::build(
            edges.iter().map(|&(u, v, c)| Edge::new(u, v, c).unwrap()),
            DuplicatePolicy::Sum,
        )
        .unwrap()
    }

    #[test]
    fn test_edmondskarp() {
        let mut net = network();
        let (s, t) = net.terminals(&0, &1).unwrap();
        let mut ek = EdmondsKarp::new(&net, s, t);

        let mut value = 0;
        let mut lengths = vec![];
        while let Some(path) = ek.find_path(&net) {
            assert_eq!(net.tail(path.arcs()[0]), s);
            assert_eq!(net.head(path.arcs()[path.len() - 1]), t);
            lengths.push(path.len());
            value += net.augment(&path);
        }

        assert_eq!(value, 11);
        // shortest augmenting paths never get shorter
        assert!(lengths.windows(2).all(|w| w[0] <= w[1]));
        assert!(!ek.search(&net));
        assert_eq!(ek.augment(&mut net), 0);
    }

    #[test]
    fn test_deterministic_paths() {
        let paths = |net: &mut Network<usize, u32>| {
            let (s, t) = net.terminals(&0, &1).unwrap();
            let mut ek = EdmondsKarp::new(net, s, t);
            let mut paths = vec![];
            while let Some(path) = ek.find_path(net) {
                net.augment(&path);
                paths.push(path);
            }
            paths
        };
        let first = paths(&mut network());
        let second = paths(&mut network());
        assert_eq!(first, second);
    }
}
