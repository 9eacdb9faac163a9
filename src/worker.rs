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

//! Solving in a background thread.
//!
//! The worker thread owns the whole residual network while solving, the
//! caller only holds a handle to cancel or wait for the result.
//!
//! # Example
//!
//! ```
//! use rs_maxflow::worker;
//! use rs_maxflow::{Edge, Solver};
//!
//! let edges = vec![Edge::new(1, 2, 4u64).unwrap(), Edge::new(2, 3, 7).unwrap()];
//! let handle = worker::spawn(Solver::default(), edges, 1, 3);
//! let sol = handle.join().unwrap().into_solution().unwrap();
//! assert_eq!(sol.value, 4);
//! ```

use crate::edge::{Capacity, Edge, NodeId};
use crate::error::Result;
use crate::maxflow::{Outcome, Solver};

use log::debug;
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// A flag for cooperative cancellation.
///
/// Clones share the same flag. A solver checks the flag only between
/// augmentation steps.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        CancelToken(Arc::new(AtomicBool::new(false)))
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Handle of a solve running in a background thread.
pub struct SolveHandle<N, F>
where
    N: NodeId,
{
    cancel: CancelToken,
    handle: JoinHandle<Result<Outcome<N, F>>>,
}

impl<N, F> SolveHandle<N, F>
where
    N: NodeId,
    F: Capacity,
{
    /// Request cancellation of the solve.
    ///
    /// The solve stops before its next search and returns
    /// `Outcome::Cancelled`.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Return the cancel token of this solve.
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Return whether the worker thread has finished.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the result of the solve.
    ///
    /// A panic of the worker thread is propagated to the caller.
    pub fn join(self) -> Result<Outcome<N, F>> {
        match self.handle.join() {
            Ok(result) => result,
            Err(err) => panic::resume_unwind(err),
        }
    }
}

/// Solve a max-flow problem in a new thread.
pub fn spawn<N, F>(solver: Solver, edges: Vec<Edge<N, F>>, src: N, snk: N) -> SolveHandle<N, F>
where
    N: NodeId + Send + 'static,
    F: Capacity + Send + 'static,
{
    let cancel = CancelToken::new();
    let token = cancel.clone();
    let handle = thread::spawn(move || {
        debug!("Worker thread solving max flow on {} edges", edges.len());
        solver.solve_with_cancel(edges, &src, &snk, &token)
    });
    SolveHandle { cancel, handle }
}

#[cfg(test)]
mod tests {
    use super::{spawn, CancelToken};
    use crate::{Edge, Solver};

    #[test]
    fn test_cancel_token() {
        let token = CancelToken::new();
        let other = token.clone();
        assert!(!other.is_cancelled());
        token.cancel();
        assert!(other.is_cancelled());
    }

    #[test]
    fn test_spawn_error() {
        let edges = vec![Edge::new("a", "b", 1).unwrap()];
        let handle = spawn(Solver::default(), edges, "a", "x");
        assert!(handle.join().is_err());
    }
}
