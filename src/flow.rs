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

//! Extraction of the final flow from a residual network.

use crate::edge::{Capacity, NodeId};
use crate::error::{Error, Result};
use crate::network::Network;

use log::warn;
use std::collections::HashMap;

#[cfg(feature = "serialize")]
use serde_derive::Serialize;

/// The flow on a single edge.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
pub struct ArcFlow<N, F> {
    pub tail: N,
    pub head: N,
    pub flow: F,
}

/// The flow on all edges with positive flow.
///
/// Entries are ordered like the arcs of the network, i.e. by first
/// appearance of the `(tail, head)` pair in the input.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
#[cfg_attr(feature = "serialize", serde(transparent))]
pub struct FlowAssignment<N, F>
where
    N: NodeId,
{
    flows: Vec<ArcFlow<N, F>>,
    #[cfg_attr(feature = "serialize", serde(skip))]
    index: HashMap<(N, N), usize>,
}

impl<N, F> FlowAssignment<N, F>
where
    N: NodeId,
    F: Capacity,
{
    /// Extract the flow of all genuine arcs carrying positive flow.
    ///
    /// Arcs with zero original capacity and arcs with non-positive flow
    /// (unused or only carrying reverse cancellation) are omitted.
    pub fn from_network(net: &Network<N, F>) -> Self {
        let mut flows = vec![];
        let mut index = HashMap::new();
        for e in 0..net.num_arcs() {
            if net.upper(e) > F::zero() {
                let flow = net.flow(e);
                if flow > F::zero() {
                    let tail = net.node(net.tail(e)).clone();
                    let head = net.node(net.head(e)).clone();
                    index.insert((tail.clone(), head.clone()), flows.len());
                    flows.push(ArcFlow { tail, head, flow });
                }
            }
        }
        FlowAssignment { flows, index }
    }

    /// Return the flow on edge `tail -> head`, if positive.
    pub fn get(&self, tail: &N, head: &N) -> Option<F> {
        self.index
            .get(&(tail.clone(), head.clone()))
            .map(|&i| self.flows[i].flow)
    }

    /// Return the number of edges with positive flow.
    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArcFlow<N, F>> {
        self.flows.iter()
    }

    /// Return the total flow entering `node`.
    pub fn inflow(&self, node: &N) -> F {
        self.flows
            .iter()
            .filter(|f| &f.head == node)
            .fold(F::zero(), |sum, f| sum + f.flow)
    }

    /// Return the total flow leaving `node`.
    pub fn outflow(&self, node: &N) -> F {
        self.flows
            .iter()
            .filter(|f| &f.tail == node)
            .fold(F::zero(), |sum, f| sum + f.flow)
    }
}

impl<'a, N, F> IntoIterator for &'a FlowAssignment<N, F>
where
    N: NodeId,
{
    type Item = &'a ArcFlow<N, F>;
    type IntoIter = std::slice::Iter<'a, ArcFlow<N, F>>;

    fn into_iter(self) -> Self::IntoIter {
        self.flows.iter()
    }
}

/// A minimal cut.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
pub struct MinCut<N, F> {
    /// The nodes reachable from the source in the final residual network.
    pub source_side: Vec<N>,
    /// The total capacity of all edges leaving the source side.
    pub capacity: F,
}

impl<N, F> MinCut<N, F>
where
    N: NodeId,
    F: Capacity,
{
    /// Compute the cut of nodes reachable from `src` in the residual network.
    ///
    /// For a maximum flow the cut capacity equals the flow value. For other
    /// flows it may exceed the capacity type, which fails with `Infeasible`.
    pub fn from_network(net: &Network<N, F>, src: usize) -> Result<Self> {
        let seen = net.reachable(src);
        let source_side = (0..net.num_nodes())
            .filter(|&u| seen[u])
            .map(|u| net.node(u).clone())
            .collect();
        let capacity = (0..net.num_arcs())
            .filter(|&e| seen[net.tail(e)] && !seen[net.head(e)])
            .try_fold(F::zero(), |sum, e| sum.checked_add(&net.upper(e)))
            .ok_or_else(|| Error::Infeasible {
                msg: "capacity of the residual cut overflows".to_string(),
            })?;
        Ok(MinCut { source_side, capacity })
    }

    /// Return whether `node` is on the source side of the cut.
    pub fn contains(&self, node: &N) -> bool {
        self.source_side.contains(node)
    }
}

/// An optimal solution of a max-flow problem.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
pub struct Solution<N, F>
where
    N: NodeId,
{
    /// The value of the maximum flow.
    pub value: F,
    /// The flow on each edge with positive flow.
    pub flows: FlowAssignment<N, F>,
    /// A minimal cut certifying optimality.
    pub mincut: MinCut<N, F>,
    /// The number of augmentation steps.
    pub augmentations: usize,
}

impl<N, F> Solution<N, F>
where
    N: NodeId,
    F: Capacity,
{
    /// Extract the solution from the final residual network.
    pub fn extract(net: &Network<N, F>, src: usize, value: F, augmentations: usize) -> Result<Self> {
        Ok(Solution {
            value,
            flows: FlowAssignment::from_network(net),
            mincut: MinCut::from_network(net, src)?,
            augmentations,
        })
    }
}

/// Check the optimality certificate of a flow in a residual network.
///
/// The following is verified:
///
/// 1. every genuine arc carries a flow between 0 and its capacity,
/// 2. flow is conserved at all nodes but the source and the sink,
/// 3. `value` leaves the source and enters the sink,
/// 4. the residual cut of the source has capacity `value`.
///
/// A violation raises `Error::Infeasible`.
pub fn certify<N, F>(net: &Network<N, F>, src: usize, snk: usize, value: F) -> Result<()>
where
    N: NodeId,
    F: Capacity,
{
    let fail = |msg: String| {
        warn!("Flow certificate failed: {}", msg);
        Err(Error::Infeasible { msg })
    };

    let n = net.num_nodes();
    let mut inflow = vec![Some(F::zero()); n];
    let mut outflow = vec![Some(F::zero()); n];
    for e in 0..net.num_arcs() {
        let flow = net.flow(e);
        if flow > net.upper(e) {
            return fail(format!(
                "flow {:?} on arc ({:?}, {:?}) exceeds its capacity {:?}",
                flow,
                net.node(net.tail(e)),
                net.node(net.head(e)),
                net.upper(e)
            ));
        }
        if net.residual(e).checked_add(&net.residual(e ^ 1)) != net.upper(e).checked_add(&net.upper(e ^ 1)) {
            return fail(format!(
                "flow on arc ({:?}, {:?}) is not antisymmetric",
                net.node(net.tail(e)),
                net.node(net.head(e))
            ));
        }
        let (u, v) = (net.tail(e), net.head(e));
        outflow[u] = outflow[u].and_then(|sum| sum.checked_add(&flow));
        inflow[v] = inflow[v].and_then(|sum| sum.checked_add(&flow));
    }

    for u in 0..n {
        if inflow[u].is_none() || outflow[u].is_none() {
            return fail(format!("total flow at node {:?} overflows", net.node(u)));
        }
    }
    for u in (0..n).filter(|&u| u != src && u != snk) {
        if inflow[u] != outflow[u] {
            return fail(format!("flow is not conserved at node {:?}", net.node(u)));
        }
    }

    if outflow[src] != inflow[src].and_then(|sum| sum.checked_add(&value)) {
        return fail(format!("source flow differs from value {:?}", value));
    }
    if inflow[snk] != outflow[snk].and_then(|sum| sum.checked_add(&value)) {
        return fail(format!("sink flow differs from value {:?}", value));
    }

    let cut = match MinCut::from_network(net, src) {
        Ok(cut) => cut,
        Err(_) => return fail("capacity of the residual cut overflows".to_string()),
    };
    if cut.contains(net.node(snk)) {
        return fail("sink is reachable in the residual network".to_string());
    }
    if cut.capacity != value {
        return fail(format!("cut capacity {:?} differs from value {:?}", cut.capacity, value));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{certify, FlowAssignment, MinCut};
    use crate::network::{Network, Path};
    use crate::{DuplicatePolicy, Edge, Error};

    fn network() -> Network<&'static str, u64> {
        let edges = [("a", "b", 3), ("b", "c", 2), ("a", "c", 1), ("c", "b", 4), ("a", "d", 0)];
        Network::build(
            edges.iter().map(|&(u, v, c)| Edge::new(u, v, c).unwrap()),
            DuplicatePolicy::Sum,
        )
        .unwrap()
    }

    #[test]
    fn test_extract() {
        let mut net = network();
        assert!(FlowAssignment::from_network(&net).is_empty());

        // a -> b -> c
        net.augment(&Path::new(vec![0, 2]));
        // a -> c -> b, cancels one unit on b -> c
        net.augment(&Path::new(vec![4, 3]));

        let flows = FlowAssignment::from_network(&net);
        assert_eq!(flows.len(), 3);
        assert_eq!(flows.get(&"a", &"b"), Some(2));
        assert_eq!(flows.get(&"b", &"c"), Some(1));
        assert_eq!(flows.get(&"c", &"b"), None);
        assert_eq!(flows.get(&"a", &"c"), Some(1));
        assert_eq!(flows.get(&"a", &"d"), None);
        assert_eq!(flows.outflow(&"a"), 3);
        assert_eq!(flows.inflow(&"c"), 2);
        assert_eq!(
            flows.iter().map(|f| (f.tail, f.head)).collect::<Vec<_>>(),
            vec![("a", "b"), ("b", "c"), ("a", "c")]
        );
    }

    #[test]
    fn test_mincut() {
        let mut net = network();
        let (a, c) = net.terminals(&"a", &"c").unwrap();
        assert!(certify(&net, a, c, 3).is_err());

        net.augment(&Path::new(vec![0, 2]));
        net.augment(&Path::new(vec![4]));

        let cut = MinCut::from_network(&net, a).unwrap();
        assert_eq!(cut.source_side, vec!["a", "b"]);
        assert_eq!(cut.capacity, 3);
        assert!(certify(&net, a, c, 3).is_ok());
        assert!(matches!(certify(&net, a, c, 2), Err(Error::Infeasible { .. })));
    }
}
