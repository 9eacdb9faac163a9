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

//! Maximum flow algorithms.
//!
//! A solve runs through the states
//!
//! `Built -> Searching -> Augmenting -> (Searching | Done)`
//!
//! An algorithm implements the two phases by the `MaxFlow` trait, the
//! `MaxFlowRun` drives them and keeps track of the flow value. Every
//! augmentation is applied completely before the next search starts.
//!
//! # Example
//!
//! ```
//! use rs_maxflow::maxflow::{MaxFlowRun, State};
//! use rs_maxflow::{Algorithm, DuplicatePolicy, Edge, Network};
//!
//! let edges = vec![Edge::new("a", "b", 5).unwrap(), Edge::new("b", "c", 3).unwrap()];
//! let net = Network::build(edges, DuplicatePolicy::Sum).unwrap();
//! let mut run = MaxFlowRun::new(net, &"a", &"c", Algorithm::EdmondsKarp).unwrap();
//!
//! assert_eq!(run.state(), State::Built);
//! assert_eq!(run.step(), State::Augmenting);
//! assert_eq!(run.step(), State::Searching);
//! assert_eq!(run.value(), 3);
//! assert_eq!(run.step(), State::Done);
//! assert_eq!(run.augmentations(), 1);
//! ```

mod dinic;
pub use self::dinic::Dinic;

mod edmondskarp;
pub use self::edmondskarp::EdmondsKarp;

use crate::edge::{Capacity, Edge, NodeId};
use crate::error::{Error, Result};
use crate::flow::{certify, FlowAssignment, Solution};
use crate::network::Network;
use crate::options::{Algorithm, SolverOptions};
use crate::worker::CancelToken;

use log::{debug, info};
use std::time::Instant;

/// A max-flow algorithm working on a residual network.
pub trait MaxFlow<N, F> {
    /// Search augmenting paths in the current residual network.
    ///
    /// Returns `false` if the sink cannot be reached anymore.
    fn search(&mut self, net: &Network<N, F>) -> bool;

    /// Augment the flow along the paths found by the last search.
    ///
    /// Returns the amount of flow sent from the source to the sink.
    fn augment(&mut self, net: &mut Network<N, F>) -> F;
}

/// The state of a max-flow computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// The network has been built, no search has been done.
    Built,
    /// The next step searches augmenting paths.
    Searching,
    /// Augmenting paths have been found, the next step augments.
    Augmenting,
    /// No augmenting path exists, the flow is maximal.
    Done,
}

/// A single max-flow computation.
///
/// The run owns the residual network exclusively until it is turned
/// into a solution.
pub struct MaxFlowRun<N, F> {
    net: Network<N, F>,
    alg: Box<dyn MaxFlow<N, F> + Send>,
    src: usize,
    snk: usize,
    state: State,
    value: F,
    augmentations: usize,
}

impl<N, F> MaxFlowRun<N, F>
where
    N: NodeId,
    F: Capacity,
{
    /// Prepare a max-flow computation from `src` to `snk`.
    ///
    /// Fails with `UnknownNode` if `src` or `snk` is not a node of the
    /// network or if both are equal, and with `InvalidCapacity` if the
    /// total capacity leaving `src` does not fit the capacity type.
    pub fn new(net: Network<N, F>, src: &N, snk: &N, algorithm: Algorithm) -> Result<Self> {
        let (s, t) = net.terminals(src, snk)?;
        // bounds the flow value and every partial sum of it
        net.outcapacity(s)?;
        let alg: Box<dyn MaxFlow<N, F> + Send> = match algorithm {
            Algorithm::EdmondsKarp => Box::new(EdmondsKarp::new(&net, s, t)),
            Algorithm::Dinic => Box::new(Dinic::new(&net, s, t)),
        };
        Ok(MaxFlowRun {
            net,
            alg,
            src: s,
            snk: t,
            state: State::Built,
            value: F::zero(),
            augmentations: 0,
        })
    }

    /// Return the current state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Return the value of the current flow.
    pub fn value(&self) -> F {
        self.value
    }

    /// Return the number of augmentation steps done so far.
    pub fn augmentations(&self) -> usize {
        self.augmentations
    }

    /// Return the residual network.
    pub fn network(&self) -> &Network<N, F> {
        &self.net
    }

    /// Do a single state transition and return the new state.
    pub fn step(&mut self) -> State {
        self.state = match self.state {
            State::Built | State::Searching => {
                if self.alg.search(&self.net) {
                    State::Augmenting
                } else {
                    State::Done
                }
            }
            State::Augmenting => {
                let df = self.alg.augment(&mut self.net);
                self.value += df;
                self.augmentations += 1;
                State::Searching
            }
            State::Done => State::Done,
        };
        self.state
    }

    /// Run until no augmenting path exists.
    pub fn run(&mut self) -> F {
        while self.step() != State::Done {}
        self.value
    }

    /// Check the optimality certificate of the current flow.
    pub fn certify(&self) -> Result<()> {
        certify(&self.net, self.src, self.snk, self.value)
    }

    /// Extract the flow.
    ///
    /// Should be called in state `Done`, otherwise the returned flow is
    /// feasible but not maximal. Fails with `Infeasible` if the capacity
    /// of the residual cut does not fit the capacity type, which cannot
    /// happen in state `Done`.
    pub fn into_solution(self) -> Result<Solution<N, F>> {
        Solution::extract(&self.net, self.src, self.value, self.augmentations)
    }
}

/// The result of a solve.
#[derive(Clone, Debug)]
pub enum Outcome<N, F>
where
    N: NodeId,
{
    /// A maximum flow has been found.
    Optimal(Solution<N, F>),
    /// The solve has been stopped by a limit or a cancel request
    /// before the flow has been maximal.
    Cancelled { augmentations: usize, value: F },
}

impl<N, F> Outcome<N, F>
where
    N: NodeId,
    F: Capacity,
{
    pub fn is_optimal(&self) -> bool {
        matches!(self, Outcome::Optimal(_))
    }

    /// Return the optimal solution.
    ///
    /// A cancelled solve is turned into `Error::Cancelled`.
    pub fn into_solution(self) -> Result<Solution<N, F>> {
        match self {
            Outcome::Optimal(sol) => Ok(sol),
            Outcome::Cancelled { augmentations, .. } => Err(Error::Cancelled { augmentations }),
        }
    }
}

/// A max-flow solver.
#[derive(Clone, Debug, Default)]
pub struct Solver {
    options: SolverOptions,
}

impl Solver {
    pub fn new(options: SolverOptions) -> Self {
        Solver { options }
    }

    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    /// Solve the max-flow problem on a list of edges.
    pub fn solve<N, F, I>(&self, edges: I, src: &N, snk: &N) -> Result<Outcome<N, F>>
    where
        N: NodeId,
        F: Capacity,
        I: IntoIterator<Item = Edge<N, F>>,
    {
        self.solve_with_cancel(edges, src, snk, &CancelToken::new())
    }

    /// Solve the max-flow problem on a list of edges.
    ///
    /// The cancel token is checked before each search.
    pub fn solve_with_cancel<N, F, I>(&self, edges: I, src: &N, snk: &N, cancel: &CancelToken) -> Result<Outcome<N, F>>
    where
        N: NodeId,
        F: Capacity,
        I: IntoIterator<Item = Edge<N, F>>,
    {
        let net = Network::build(edges, self.options.duplicates)?;
        self.solve_network(net, src, snk, cancel)
    }

    /// Solve the max-flow problem on a residual network.
    pub fn solve_network<N, F>(&self, net: Network<N, F>, src: &N, snk: &N, cancel: &CancelToken) -> Result<Outcome<N, F>>
    where
        N: NodeId,
        F: Capacity,
    {
        let start = Instant::now();
        let mut run = MaxFlowRun::new(net, src, snk, self.options.algorithm)?;
        debug!(
            "Solving max flow from {:?} to {:?} with {:?}",
            src, snk, self.options.algorithm
        );

        loop {
            let cancelled = match run.state() {
                State::Built | State::Searching => {
                    cancel.is_cancelled() || self.options.time_limit.map_or(false, |limit| start.elapsed() >= limit)
                }
                State::Augmenting => self
                    .options
                    .max_augmentations
                    .map_or(false, |n| run.augmentations() >= n),
                State::Done => break,
            };
            if cancelled {
                info!(
                    "Max flow cancelled after {} augmentations with value {:?}",
                    run.augmentations(),
                    run.value()
                );
                return Ok(Outcome::Cancelled {
                    augmentations: run.augmentations(),
                    value: run.value(),
                });
            }
            run.step();
        }

        info!(
            "Max flow {:?} found with {} augmentations in {:.3}s",
            run.value(),
            run.augmentations(),
            start.elapsed().as_secs_f64()
        );

        if self.options.verify {
            run.certify()?;
        }

        Ok(Outcome::Optimal(run.into_solution()?))
    }
}

/// Solve a max-flow problem with the given options.
///
/// Convenience function for `Solver::new(opts).solve(..)` that turns a
/// cancelled solve into `Error::Cancelled`.
pub fn solve<N, F, I>(edges: I, src: &N, snk: &N, opts: &SolverOptions) -> Result<Solution<N, F>>
where
    N: NodeId,
    F: Capacity,
    I: IntoIterator<Item = Edge<N, F>>,
{
    Solver::new(opts.clone()).solve(edges, src, snk)?.into_solution()
}

/// Solve the maxflow problem using the algorithm of Edmonds-Karp.
///
/// `edges` is a list of triples `(tail, head, capacity)`. Capacities of
/// repeated `(tail, head)` pairs are summed.
///
/// The function returns the flow value and the flow on each edge with
/// positive flow.
///
/// # Example
///
/// ```
/// use rs_maxflow::solve_max_flow;
///
/// let edges = vec![("A", "B", 3), ("A", "C", 2), ("B", "C", 1), ("B", "D", 2), ("C", "D", 3)];
/// let (value, flows) = solve_max_flow(edges, "A", "D").unwrap();
/// assert_eq!(value, 5);
/// assert_eq!(flows.outflow(&"A"), 5);
/// assert_eq!(flows.get(&"B", &"D"), Some(2));
/// ```
pub fn solve_max_flow<N, F, I>(edges: I, source: N, sink: N) -> Result<(F, FlowAssignment<N, F>)>
where
    N: NodeId,
    F: Capacity,
    I: IntoIterator<Item = (N, N, F)>,
{
    let edges = edges
        .into_iter()
        .map(|(u, v, c)| Edge::new(u, v, c))
        .collect::<Result<Vec<_>>>()?;
    let sol = solve(edges, &source, &sink, &SolverOptions::default())?;
    Ok((sol.value, sol.flows))
}
