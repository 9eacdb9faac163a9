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

//! Capacitated input edges.

use crate::error::{Error, Result};
use crate::num::traits::{CheckedAdd, NumAssign};

use std::convert::TryFrom;
use std::fmt::Debug;
use std::hash::Hash;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// A node identifier.
///
/// Nodes have no attributes, they are implied by appearing as an edge
/// endpoint. Any hashable, cloneable type can be used, e.g. `&str`,
/// `String` or `usize`.
pub trait NodeId: Hash + Eq + Clone + Debug {}

impl<T> NodeId for T where T: Hash + Eq + Clone + Debug {}

/// A capacity (and flow) value.
///
/// Only totally ordered number types qualify, i.e. the integer types.
/// All comparisons and the bottleneck computations are exact.
pub trait Capacity: NumAssign + CheckedAdd + Ord + Copy + Debug {}

impl<T> Capacity for T where T: NumAssign + CheckedAdd + Ord + Copy + Debug {}

/// A directed edge `tail -> head` with a non-negative capacity.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Edge<N, F> {
    pub tail: N,
    pub head: N,
    pub capacity: F,
}

impl<N, F> Edge<N, F>
where
    N: NodeId,
    F: Capacity,
{
    /// Create a new edge.
    ///
    /// Fails with `InvalidCapacity` if the capacity is negative and with
    /// `SelfLoop` if `tail == head`.
    pub fn new(tail: N, head: N, capacity: F) -> Result<Self> {
        let e = Edge { tail, head, capacity };
        e.validate()?;
        Ok(e)
    }

    /// Check the edge invariants.
    ///
    /// The fields are public, so the network builder checks every edge
    /// again.
    pub fn validate(&self) -> Result<()> {
        if self.capacity < F::zero() {
            return Err(Error::InvalidCapacity {
                edge: self.describe(),
                msg: format!("negative capacity {:?}", self.capacity),
            });
        }
        if self.tail == self.head {
            return Err(Error::SelfLoop {
                node: format!("{:?}", self.tail),
            });
        }
        Ok(())
    }

    pub(crate) fn describe(&self) -> String {
        format!("({:?}, {:?})", self.tail, self.head)
    }
}

impl<N, F> TryFrom<(N, N, F)> for Edge<N, F>
where
    N: NodeId,
    F: Capacity,
{
    type Error = Error;

    fn try_from((tail, head, capacity): (N, N, F)) -> Result<Self> {
        Edge::new(tail, head, capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::Edge;
    use crate::Error;
    use std::convert::TryFrom;

    #[test]
    fn test_valid_edge() {
        let e = Edge::new("a", "b", 3).unwrap();
        assert_eq!(e.tail, "a");
        assert_eq!(e.head, "b");
        assert_eq!(e.capacity, 3);

        // zero capacities are valid no-op edges
        assert!(Edge::new(1, 2, 0u32).is_ok());
    }

    #[test]
    fn test_negative_capacity() {
        match Edge::try_from(("a", "b", -1)) {
            Err(Error::InvalidCapacity { edge, .. }) => assert_eq!(edge, "(\"a\", \"b\")"),
            r => panic!("unexpected result: {:?}", r),
        }
    }

    #[test]
    fn test_self_loop() {
        assert!(matches!(Edge::new(4, 4, 1), Err(Error::SelfLoop { .. })));
    }
}
