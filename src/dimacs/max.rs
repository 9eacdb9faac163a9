/*
 * Copyright (c) 2021-2026 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! The DIMACS max-flow format.
//!
//! Lines starting with `c` are comments, empty lines are ignored. The
//! remaining lines are, in this order,
//!
//! - the problem line `p max <nodes> <arcs>`,
//! - two terminal lines `n <node> s` and `n <node> t` (in any order),
//! - exactly `<arcs>` arc lines `a <tail> <head> <capacity>`.
//!
//! Nodes are numbered `1..=<nodes>`. Loops are rejected with `SelfLoop`,
//! a capacity that is negative or not a number with `InvalidCapacity`.
//! Parallel arcs are passed on as separate edges (the solver sums them by
//! default), although the original format does not allow them.

use crate::edge::{Capacity, Edge};
use crate::error::{Error, Result};
use crate::reader::EdgeReader;

use std::fmt::Display;
use std::io::{Read, Write};
use std::str::FromStr;

/// A max-flow instance.
///
/// Nodes are numbered `1..=num_nodes` as in the file.
#[derive(Clone, Debug)]
pub struct Instance<F> {
    /// The number of nodes.
    pub num_nodes: usize,
    /// The source node.
    pub src: usize,
    /// The sink node.
    pub snk: usize,
    /// The edges with their capacities.
    pub edges: Vec<Edge<usize, F>>,
}

fn node_in_range(u: usize, num_nodes: usize, line: usize) -> Result<usize> {
    if u >= 1 && u <= num_nodes {
        Ok(u)
    } else {
        Err(Error::Format {
            line,
            msg: format!("node {} out of range 1..={}", u, num_nodes),
        })
    }
}

/// Read a max-flow instance.
pub fn read<R, F>(r: R) -> Result<Instance<F>>
where
    R: Read,
    F: Capacity + FromStr,
    F::Err: Display,
{
    let mut reader = EdgeReader::new(r, 'c', false);

    let (num_nodes, num_edges) = {
        let mut problem = reader.expect_line("p")?;
        problem.expect("max")?;
        let sizes = (problem.number::<usize>()?, problem.number::<usize>()?);
        problem.end()?;
        sizes
    };

    let mut src = None;
    let mut snk = None;
    for _ in 0..2 {
        let mut terminal = reader.expect_line("n")?;
        let line = terminal.line;
        let u = node_in_range(terminal.number()?, num_nodes, line)?;
        let (slot, name) = match terminal.str()? {
            "s" => (&mut src, "source"),
            "t" => (&mut snk, "sink"),
            what => {
                return Err(Error::Format {
                    line,
                    msg: format!("node type must be 's' or 't', got '{}'", what),
                })
            }
        };
        if slot.replace(u).is_some() {
            return Err(Error::Format {
                line,
                msg: format!("duplicate {} node", name),
            });
        }
        terminal.end()?;
    }

    let mut edges = Vec::with_capacity(num_edges);
    for _ in 0..num_edges {
        let mut arc = reader.expect_line("a")?;
        let e: Edge<usize, F> = arc.edge()?;
        node_in_range(e.tail, num_nodes, arc.line)?;
        node_in_range(e.head, num_nodes, arc.line)?;
        arc.end()?;
        edges.push(e);
    }

    if let Some(extra) = reader.next_line()? {
        return Err(Error::Format {
            line: extra.line,
            msg: format!("expected exactly {} 'a' lines", num_edges),
        });
    }

    match (src, snk) {
        (Some(src), Some(snk)) => Ok(Instance {
            num_nodes,
            src,
            snk,
            edges,
        }),
        _ => Err(Error::Format {
            line: reader.line,
            msg: "source or sink node missing".to_string(),
        }),
    }
}

/// Read a max-flow instance from a named file.
pub fn read_from_file<F>(filename: &str) -> Result<Instance<F>>
where
    F: Capacity + FromStr,
    F::Err: Display,
{
    read(std::fs::File::open(filename)?)
}

/// Write a max-flow instance.
pub fn write<W, F>(mut w: W, instance: &Instance<F>) -> std::io::Result<()>
where
    W: Write,
    F: Capacity + Display,
{
    writeln!(w, "p max {} {}", instance.num_nodes, instance.edges.len())?;
    writeln!(w, "n {} s", instance.src)?;
    writeln!(w, "n {} t", instance.snk)?;
    for e in &instance.edges {
        writeln!(w, "a {} {} {}", e.tail, e.head, e.capacity)?;
    }

    Ok(())
}

/// Write a max-flow instance to a named file.
pub fn write_to_file<F>(filename: &str, instance: &Instance<F>) -> std::io::Result<()>
where
    F: Capacity + Display,
{
    write(&mut std::fs::File::create(filename)?, instance)
}

#[cfg(test)]
mod tests {

    use crate::dimacs;
    use crate::{Edge, Error, Solver};
    use std::io::{self, Cursor};

    #[test]
    fn parse_file_test() {
        let file = "c this is a test file

p max 6 9
n 5 s
n 6 t

c there might be empty lines

a 5 1 10
a 5 2 10
a 1 2 2
a 1 3 4
a 1 4 8
a 2 4 9
a 3 6 10
a 4 3 6
a 4 6 10

c end of the file
";
        let instance = dimacs::max::read::<_, u32>(io::Cursor::new(file)).unwrap();

        assert_eq!(instance.num_nodes, 6);
        assert_eq!(instance.edges.len(), 9);
        assert_eq!(instance.src, 5);
        assert_eq!(instance.snk, 6);

        let mut arcs: Vec<_> = instance.edges.iter().map(|e| (e.tail, e.head, e.capacity)).collect();

        arcs.sort();

        assert_eq!(
            arcs,
            vec![
                (1, 2, 2),
                (1, 3, 4),
                (1, 4, 8),
                (2, 4, 9),
                (3, 6, 10),
                (4, 3, 6),
                (4, 6, 10),
                (5, 1, 10),
                (5, 2, 10),
            ]
        );

        let sol = Solver::default()
            .solve(instance.edges, &instance.src, &instance.snk)
            .unwrap()
            .into_solution()
            .unwrap();
        assert_eq!(sol.value, 19);
    }

    #[test]
    fn parse_errors_test() {
        let err = |file: &str| dimacs::max::read::<_, i64>(Cursor::new(file.to_string())).unwrap_err();

        assert!(matches!(err("p min 2 1\n"), Error::Format { line: 1, .. }));
        assert!(matches!(err("c empty\n\n"), Error::Format { line: 2, .. }));
        assert!(matches!(err("p max 2 1\nn 1 s\nn 3 t\n"), Error::Format { line: 3, .. }));
        assert!(matches!(err("p max 2 1\nn 1 s\nn 2 s\n"), Error::Format { line: 3, .. }));
        assert!(matches!(err("p max 2 1\nn 1 s\nn 2 x\n"), Error::Format { line: 3, .. }));
        assert!(matches!(
            err("p max 2 1\nn 1 s\nn 2 t\na 1 5 3\n"),
            Error::Format { line: 4, .. }
        ));
        assert!(matches!(
            err("p max 2 1\nn 1 s\nn 2 t\na 1 2 3 4\n"),
            Error::Format { line: 4, .. }
        ));
        assert!(matches!(
            err("p max 2 1\nn 1 s\nn 2 t\na 1 2 3\na 2 1 3\n"),
            Error::Format { line: 5, .. }
        ));
        assert!(matches!(
            err("p max 2 1\nn 1 s\nn 2 t\na 1 2 -3\n"),
            Error::InvalidCapacity { .. }
        ));
        assert!(matches!(
            err("p max 2 1\nn 1 s\nn 2 t\na 1 2 x\n"),
            Error::InvalidCapacity { .. }
        ));
        match err("p max 2 1\nn 1 s\nn 2 t\nc loop\na 1 1 3\n") {
            Error::SelfLoop { node } => assert_eq!(node, "1 on line 5"),
            e => panic!("unexpected error: {:?}", e),
        }
    }

    #[test]
    fn write_test_file() {
        let instance = dimacs::max::Instance {
            num_nodes: 4,
            src: 1,
            snk: 4,
            edges: vec![
                Edge::new(1, 2, 4).unwrap(),
                Edge::new(1, 3, 2).unwrap(),
                Edge::new(2, 3, 2).unwrap(),
                Edge::new(2, 4, 3).unwrap(),
                Edge::new(3, 4, 5).unwrap(),
            ],
        };

        let mut buf = Cursor::new(Vec::new());
        dimacs::max::write(&mut buf, &instance).unwrap();

        assert_eq!(
            String::from_utf8(buf.into_inner()).unwrap(),
            "p max 4 5
n 1 s
n 4 t
a 1 2 4
a 1 3 2
a 2 3 2
a 2 4 3
a 3 4 5
"
        );
    }
}
