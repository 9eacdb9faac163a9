/*
 * Copyright (c) 2015-2026 Frank Fischer <frank-fischer@shadow-soft.de>
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

use time::OffsetDateTime;

use rustop::opts;

use rs_maxflow::{dimacs, table};
use rs_maxflow::{Algorithm, DuplicatePolicy, Edge, NodeId, Outcome, Solver, SolverOptions};

use std::error::Error;
use std::fmt::Display;
use std::io;

fn run<N>(edges: Vec<Edge<N, u64>>, src: N, snk: N, opts: SolverOptions) -> Result<(), Box<dyn Error>>
where
    N: NodeId + Display,
{
    println!("  number of edges: {}", edges.len());

    let tstart = OffsetDateTime::now_utc();
    let outcome = Solver::new(opts).solve(edges, &src, &snk)?;
    let tend = OffsetDateTime::now_utc();
    println!("Time: {}", (tend - tstart).as_seconds_f64());

    match outcome {
        Outcome::Optimal(sol) => {
            println!("Flow: {}", sol.value);
            println!("  augmentations: {}", sol.augmentations);
            println!("  source side of min cut: {}", sol.mincut.source_side.len());
            table::write(io::stdout().lock(), &sol.flows)?;
        }
        Outcome::Cancelled { augmentations, value } => {
            println!("Cancelled after {} augmentations", augmentations);
            println!("Flow (not maximal): {}", value);
        }
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let (args, _) = opts! {
        synopsis "Solve max-flow problem with augmenting paths.";
        opt dimacs:bool, desc:"Read the instance in DIMACS max-flow format.";
        opt dinic:bool, desc:"Use Dinic's algorithm instead of Edmonds-Karp.";
        opt reject_duplicates:bool, desc:"Fail on repeated edges instead of summing them.";
        opt max_augmentations:Option<usize>, desc:"Cancel after this number of augmentations.";
        opt verify:bool, desc:"Verify the optimality certificate.";
        param file:String, desc:"Instance file name";
        param source:Option<String>, desc:"Source node (edge tables only)";
        param sink:Option<String>, desc:"Sink node (edge tables only)";
    }
    .parse_or_exit();

    let mut opts = SolverOptions::default().with_verify(args.verify);
    if args.dinic {
        opts = opts.with_algorithm(Algorithm::Dinic);
    }
    if args.reject_duplicates {
        opts = opts.with_duplicates(DuplicatePolicy::Reject);
    }
    if let Some(n) = args.max_augmentations {
        opts = opts.with_max_augmentations(n);
    }

    let tstart = OffsetDateTime::now_utc();
    if args.dimacs {
        let instance = dimacs::max::read_from_file::<u64>(&args.file)?;
        let tend = OffsetDateTime::now_utc();
        println!("Time: {}", (tend - tstart).as_seconds_f64());
        println!("  number of nodes: {}", instance.num_nodes);
        run(instance.edges, instance.src, instance.snk, opts)
    } else {
        let edges = table::read_from_file(&args.file)?;
        let tend = OffsetDateTime::now_utc();
        println!("Time: {}", (tend - tstart).as_seconds_f64());
        match (args.source, args.sink) {
            (Some(src), Some(snk)) => run(edges, src, snk, opts),
            _ => Err("source and sink nodes are required for edge tables".into()),
        }
    }
}
