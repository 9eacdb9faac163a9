/*
 * Copyright (c) 2026 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! The residual network.
//!
//! Arcs are stored in pairs. Arc `2k` is the first seen direction of a
//! pair of nodes, arc `2k+1 = 2k ^ 1` the opposite direction. If only one
//! direction has been given in the input, the other one is a synthetic
//! arc with capacity 0.
//!
//! Each arc stores its original capacity `upper` and its current
//! `residual` capacity. The flow on an arc is `upper - residual`, which
//! may be negative on an arc carrying reverse cancellation. Since the
//! capacity type may be unsigned, the flow itself is never stored;
//! instead each augmentation keeps
//!
//! `residual(e) + residual(e ^ 1) == upper(e) + upper(e ^ 1)`
//!
//! which is equivalent to `flow(e) == -flow(e ^ 1)`.
//!
//! # Example
//!
//! ```
//! use rs_maxflow::{DuplicatePolicy, Edge, Network};
//!
//! let edges = vec![
//!     Edge::new("a", "b", 3).unwrap(),
//!     Edge::new("b", "a", 1).unwrap(),
//!     Edge::new("a", "b", 2).unwrap(),
//! ];
//! let net = Network::build(edges, DuplicatePolicy::Sum).unwrap();
//!
//! assert_eq!(net.num_nodes(), 2);
//! assert_eq!(net.num_arcs(), 2);
//!
//! let a = net.node_id(&"a").unwrap();
//! let b = net.node_id(&"b").unwrap();
//! let ab = net.arc_between(a, b).unwrap();
//! assert_eq!(net.upper(ab), 5);
//! assert_eq!(net.upper(ab ^ 1), 1);
//! ```

use crate::edge::{Capacity, Edge, NodeId};
use crate::error::{Error, Result};
use crate::options::DuplicatePolicy;

use log::debug;
use std::collections::{HashMap, VecDeque};

/// An augmenting path.
///
/// The arcs are ordered from the source to the sink.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    arcs: Vec<usize>,
}

impl Path {
    pub(crate) fn new(arcs: Vec<usize>) -> Self {
        Path { arcs }
    }

    /// Return the arcs of the path.
    pub fn arcs(&self) -> &[usize] {
        &self.arcs
    }

    /// Return the number of arcs on the path.
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }
}

#[derive(Clone, Debug)]
struct ArcInfo<F> {
    tail: usize,
    head: usize,
    upper: F,
    residual: F,
    /// Whether this direction has been given in the input.
    genuine: bool,
}

/// A residual network owning all nodes and arcs.
#[derive(Clone, Debug)]
pub struct Network<N, F> {
    nodes: Vec<N>,
    ids: HashMap<N, usize>,
    arcs: Vec<ArcInfo<F>>,
    pairs: HashMap<(usize, usize), usize>,
    neighs: Vec<Vec<(usize, usize)>>,
}

impl<N, F> Default for Network<N, F>
where
    N: NodeId,
    F: Capacity,
{
    fn default() -> Self {
        Network::new()
    }
}

impl<N, F> Network<N, F>
where
    N: NodeId,
    F: Capacity,
{
    /// Create an empty network.
    pub fn new() -> Self {
        Network {
            nodes: vec![],
            ids: HashMap::new(),
            arcs: vec![],
            pairs: HashMap::new(),
            neighs: vec![],
        }
    }

    /// Build the residual network of a list of edges.
    ///
    /// Nodes are numbered in order of their first appearance, the
    /// outgoing arcs of each node are kept in insertion order.
    pub fn build<I>(edges: I, duplicates: DuplicatePolicy) -> Result<Self>
    where
        I: IntoIterator<Item = Edge<N, F>>,
    {
        let mut net = Network::new();
        for e in edges {
            net.add_edge(e, duplicates)?;
        }
        debug!(
            "Built residual network with {} nodes and {} arcs",
            net.num_nodes(),
            net.num_arcs()
        );
        Ok(net)
    }

    /// Add an input edge and return the id of its forward arc.
    ///
    /// Capacities of repeated `(tail, head)` pairs are summed unless
    /// `duplicates` is `DuplicatePolicy::Reject`.
    pub fn add_edge(&mut self, edge: Edge<N, F>, duplicates: DuplicatePolicy) -> Result<usize> {
        edge.validate()?;

        let u = self.add_node(&edge.tail);
        let v = self.add_node(&edge.head);
        let c = edge.capacity;

        if let Some(&e) = self.pairs.get(&(u, v)) {
            // residual(e) + residual(e ^ 1) stays equal to this sum while
            // flow is pushed, so it must fit the capacity type
            let opposite = self.arcs[e ^ 1].upper;
            let arc = &mut self.arcs[e];
            if arc.genuine && duplicates == DuplicatePolicy::Reject {
                return Err(Error::DuplicateEdge { edge: edge.describe() });
            }
            let (upper, residual) = match (arc.upper.checked_add(&c), arc.residual.checked_add(&c)) {
                (Some(upper), Some(residual)) => (upper, residual),
                _ => {
                    return Err(Error::InvalidCapacity {
                        edge: edge.describe(),
                        msg: "accumulated capacity overflows".to_string(),
                    })
                }
            };
            if upper.checked_add(&opposite).is_none() {
                return Err(Error::InvalidCapacity {
                    edge: edge.describe(),
                    msg: "capacities of the edge and its reverse edge overflow".to_string(),
                });
            }
            arc.upper = upper;
            arc.residual = residual;
            arc.genuine = true;
            return Ok(e);
        }

        let e = self.arcs.len();
        self.arcs.push(ArcInfo {
            tail: u,
            head: v,
            upper: c,
            residual: c,
            genuine: true,
        });
        self.arcs.push(ArcInfo {
            tail: v,
            head: u,
            upper: F::zero(),
            residual: F::zero(),
            genuine: false,
        });
        self.pairs.insert((u, v), e);
        self.pairs.insert((v, u), e | 1);
        self.neighs[u].push((e, v));
        self.neighs[v].push((e | 1, u));

        Ok(e)
    }

    fn add_node(&mut self, node: &N) -> usize {
        if let Some(&u) = self.ids.get(node) {
            return u;
        }
        let u = self.nodes.len();
        self.nodes.push(node.clone());
        self.ids.insert(node.clone(), u);
        self.neighs.push(vec![]);
        u
    }

    /// Return the number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Return the number of arcs (including synthetic reverse arcs).
    pub fn num_arcs(&self) -> usize {
        self.arcs.len()
    }

    /// Return the node with id `u`.
    pub fn node(&self, u: usize) -> &N {
        &self.nodes[u]
    }

    /// Return the id of a node, if it is an endpoint of some edge.
    pub fn node_id(&self, node: &N) -> Option<usize> {
        self.ids.get(node).copied()
    }

    /// Return the arc `u -> v`, if any.
    pub fn arc_between(&self, u: usize, v: usize) -> Option<usize> {
        self.pairs.get(&(u, v)).copied()
    }

    /// Return the outgoing arcs of node `u` as pairs `(arc, head)`.
    pub fn outarcs(&self, u: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.neighs[u].iter().copied()
    }

    /// Return the number of outgoing arcs of node `u`.
    pub fn outdegree(&self, u: usize) -> usize {
        self.neighs[u].len()
    }

    /// Return the `i`-th outgoing arc of node `u` as pair `(arc, head)`.
    pub fn outarc(&self, u: usize, i: usize) -> (usize, usize) {
        self.neighs[u][i]
    }

    pub fn tail(&self, e: usize) -> usize {
        self.arcs[e].tail
    }

    pub fn head(&self, e: usize) -> usize {
        self.arcs[e].head
    }

    /// Return the original capacity of arc `e` (0 for synthetic arcs).
    pub fn upper(&self, e: usize) -> F {
        self.arcs[e].upper
    }

    /// Return the residual capacity of arc `e`.
    pub fn residual(&self, e: usize) -> F {
        self.arcs[e].residual
    }

    /// Return whether arc `e` stems from an input edge.
    pub fn is_genuine(&self, e: usize) -> bool {
        self.arcs[e].genuine
    }

    /// Return the positive part of the flow on arc `e`.
    ///
    /// An arc with non-positive flow returns 0, the flow is then
    /// carried by the opposite arc `e ^ 1`.
    pub fn flow(&self, e: usize) -> F {
        let arc = &self.arcs[e];
        if arc.residual < arc.upper {
            arc.upper - arc.residual
        } else {
            F::zero()
        }
    }

    /// Return the node ids of a source and sink node.
    ///
    /// Both must be endpoints of some edge and must be distinct.
    pub fn terminals(&self, src: &N, snk: &N) -> Result<(usize, usize)> {
        if src == snk {
            return Err(Error::UnknownNode {
                msg: format!("source and sink are both {:?}", src),
            });
        }
        let s = self.node_id(src).ok_or_else(|| Error::UnknownNode {
            msg: format!("source {:?} is not an endpoint of any edge", src),
        })?;
        let t = self.node_id(snk).ok_or_else(|| Error::UnknownNode {
            msg: format!("sink {:?} is not an endpoint of any edge", snk),
        })?;
        Ok((s, t))
    }

    /// Return the total capacity of the arcs leaving node `u`.
    ///
    /// This bounds the value of every flow from `u`. Fails with
    /// `InvalidCapacity` if the sum does not fit the capacity type.
    pub fn outcapacity(&self, u: usize) -> Result<F> {
        self.neighs[u].iter().try_fold(F::zero(), |sum, &(e, _)| {
            sum.checked_add(&self.arcs[e].upper)
                .ok_or_else(|| Error::InvalidCapacity {
                    edge: format!("({:?}, *)", self.nodes[u]),
                    msg: "total capacity leaving the node overflows".to_string(),
                })
        })
    }

    /// Remove all flow.
    pub fn reset(&mut self) {
        for arc in &mut self.arcs {
            arc.residual = arc.upper;
        }
    }

    /// Return the smallest residual capacity on a path.
    pub fn bottleneck(&self, path: &Path) -> F {
        path.arcs
            .iter()
            .map(|&e| self.arcs[e].residual)
            .min()
            .unwrap_or_else(F::zero)
    }

    /// Push `df` units of flow over arc `e`.
    ///
    /// Requires `df <= residual(e)`.
    pub fn push(&mut self, e: usize, df: F) {
        debug_assert!(df <= self.arcs[e].residual);
        self.arcs[e].residual -= df;
        self.arcs[e ^ 1].residual += df;
    }

    /// Augment the flow along a path by its bottleneck capacity.
    ///
    /// Returns the bottleneck. The bottleneck is computed in full before
    /// any arc is changed.
    pub fn augment(&mut self, path: &Path) -> F {
        let df = self.bottleneck(path);
        if !df.is_zero() {
            for &e in &path.arcs {
                self.push(e, df);
            }
        }
        df
    }

    /// Return the nodes reachable from `src` over arcs with positive
    /// residual capacity.
    pub fn reachable(&self, src: usize) -> Vec<bool> {
        let mut seen = vec![false; self.num_nodes()];
        let mut queue = VecDeque::with_capacity(self.num_nodes());
        seen[src] = true;
        queue.push_back(src);
        while let Some(u) = queue.pop_front() {
            for &(e, v) in &self.neighs[u] {
                if !seen[v] && self.arcs[e].residual > F::zero() {
                    seen[v] = true;
                    queue.push_back(v);
                }
            }
        }
        seen
    }
}
