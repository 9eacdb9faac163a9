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

//! Errors raised while building or solving a max-flow problem.

use std::io;
use thiserror::Error;

/// Error of a single solve call.
///
/// All errors are terminal, no partial result is ever returned.
#[derive(Debug, Error)]
pub enum Error {
    /// A capacity is negative, not a number or does not fit the capacity type.
    #[error("invalid capacity on edge {edge}: {msg}")]
    InvalidCapacity { edge: String, msg: String },

    /// An edge whose tail equals its head.
    #[error("self-loop at node {node}")]
    SelfLoop { node: String },

    /// A repeated `(tail, head)` pair under `DuplicatePolicy::Reject`.
    #[error("duplicate edge {edge}")]
    DuplicateEdge { edge: String },

    /// Source or sink is not an edge endpoint, or source equals sink.
    #[error("unknown node: {msg}")]
    UnknownNode { msg: String },

    /// No optimality certificate could be established.
    ///
    /// The augmenting path methods always terminate with an optimal
    /// flow on well-formed input, so this is only raised by the optional
    /// certificate check (see `SolverOptions::verify`).
    #[error("no optimal solution found: {msg}")]
    Infeasible { msg: String },

    /// The solve has been stopped by a limit or a cancel request.
    ///
    /// Only produced by `Outcome::into_solution`, the solver itself
    /// reports cancellation as `Outcome::Cancelled`.
    #[error("solve cancelled after {augmentations} augmentations")]
    Cancelled { augmentations: usize },

    #[error(transparent)]
    Io(#[from] io::Error),

    /// Malformed line in a text input.
    #[error("format error on line {line}: {msg}")]
    Format { line: usize, msg: String },
}

pub type Result<T> = std::result::Result<T, Error>;
