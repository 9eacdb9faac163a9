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

//! Solver configuration.

use std::time::Duration;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// The max-flow algorithm used by the solver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Algorithm {
    /// Shortest augmenting paths found by breadth-first search.
    EdmondsKarp,
    /// Blocking flows on the BFS level graph.
    Dinic,
}

impl Default for Algorithm {
    fn default() -> Self {
        Algorithm::EdmondsKarp
    }
}

/// How repeated `(tail, head)` pairs in the input are handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum DuplicatePolicy {
    /// Sum the capacities into a single arc.
    Sum,
    /// Fail with `Error::DuplicateEdge`.
    Reject,
}

impl Default for DuplicatePolicy {
    fn default() -> Self {
        DuplicatePolicy::Sum
    }
}

/// Options of a `Solver`.
///
/// # Example
///
/// ```
/// use rs_maxflow::{Algorithm, SolverOptions};
///
/// let opts = SolverOptions::default()
///     .with_algorithm(Algorithm::Dinic)
///     .with_max_augmentations(100);
/// assert_eq!(opts.max_augmentations, Some(100));
/// assert!(opts.time_limit.is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(default))]
pub struct SolverOptions {
    pub algorithm: Algorithm,
    pub duplicates: DuplicatePolicy,
    /// Maximal number of augmentation steps before the solve is cancelled.
    pub max_augmentations: Option<usize>,
    /// Maximal wall-clock time before the solve is cancelled.
    pub time_limit: Option<Duration>,
    /// Check the optimality certificate of the final flow.
    pub verify: bool,
}

impl SolverOptions {
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    pub fn with_max_augmentations(mut self, n: usize) -> Self {
        self.max_augmentations = Some(n);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }
}

#[cfg(test)]
mod tests {
    #[cfg(feature = "serialize")]
    mod serialize {
        use crate::{Algorithm, DuplicatePolicy, SolverOptions};
        use serde_json;
        use std::time::Duration;

        #[test]
        fn test_serde() {
            let opts = SolverOptions::default()
                .with_algorithm(Algorithm::Dinic)
                .with_duplicates(DuplicatePolicy::Reject)
                .with_time_limit(Duration::from_secs(2));
            let serialized = serde_json::to_string(&opts).unwrap();
            let deserialized: SolverOptions = serde_json::from_str(&serialized).unwrap();
            assert_eq!(deserialized, opts);

            let partial: SolverOptions = serde_json::from_str(r#"{"verify": true}"#).unwrap();
            assert!(partial.verify);
            assert_eq!(partial.algorithm, Algorithm::EdmondsKarp);
        }
    }
}
