// Copyright (c) 2015-2026 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

#![forbid(unsafe_code)]

//! A library for computing maximum flows in capacitated networks.
//!
//! The flow is computed by augmenting paths in a residual network. For
//! each original edge the flow on it is reported, together with a
//! minimal cut certifying the optimality of the flow value.
//!
//! ```
//! use rs_maxflow::solve_max_flow;
//!
//! let (value, flows) = solve_max_flow(vec![("A", "B", 5)], "A", "B").unwrap();
//! assert_eq!(value, 5);
//! assert_eq!(flows.get(&"A", &"B"), Some(5));
//! ```

mod num {
    pub use num_traits as traits;
}

// # Data structures

pub mod edge;
pub use self::edge::{Capacity, Edge, NodeId};

pub mod error;
pub use self::error::{Error, Result};

pub mod network;
pub use self::network::{Network, Path};

pub mod flow;
pub use self::flow::{ArcFlow, FlowAssignment, MinCut, Solution};

pub mod options;
pub use self::options::{Algorithm, DuplicatePolicy, SolverOptions};

// # Algorithms

pub mod maxflow;
pub use self::maxflow::{solve, solve_max_flow, Outcome, Solver};

pub mod worker;
pub use self::worker::{CancelToken, SolveHandle};

// # Input and output

#[cfg_attr(not(feature = "dimacs"), allow(dead_code))]
mod reader;

pub mod table;

#[cfg(feature = "dimacs")]
pub mod dimacs;
