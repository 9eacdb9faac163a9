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

//! Reading and writing plain edge tables.
//!
//! An edge table has one edge per line of the form
//!
//! `<tail> <head> <capacity>`
//!
//! Fields are separated by whitespace and/or commas, node names are
//! arbitrary words. Empty lines and lines starting with `#` are ignored.
//! The capacity must be a non-negative integer.
//!
//! # Example
//!
//! ```
//! use rs_maxflow::table;
//!
//! let edges = table::read("# my network\ns a 4\ns,b,2\na t 3\nb t 5\n".as_bytes()).unwrap();
//! assert_eq!(edges.len(), 4);
//! assert_eq!(edges[1].tail, "s");
//! assert_eq!(edges[1].capacity, 2);
//! ```

use crate::edge::{Capacity, Edge, NodeId};
use crate::error::{Error, Result};
use crate::flow::FlowAssignment;
use crate::reader::EdgeReader;

use std::fmt::Display;
use std::io::{Read, Write};

/// Read an edge table.
///
/// A line with other than three fields is a `Format` error, a bad
/// capacity is `InvalidCapacity` and a loop is `SelfLoop`, each naming
/// the line.
pub fn read<R: Read>(r: R) -> Result<Vec<Edge<String, u64>>> {
    let mut reader = EdgeReader::new(r, '#', true);
    let mut edges = vec![];
    while let Some(mut fields) = reader.next_line()? {
        if fields.len() != 3 {
            return Err(Error::Format {
                line: fields.line,
                msg: format!("expected '<tail> <head> <capacity>', got {} fields", fields.len()),
            });
        }
        edges.push(fields.edge()?);
    }
    Ok(edges)
}

/// Read an edge table from a named file.
pub fn read_from_file(filename: &str) -> Result<Vec<Edge<String, u64>>> {
    read(std::fs::File::open(filename)?)
}

/// Write a flow assignment as edge table with the flow as last column.
pub fn write<W, N, F>(mut w: W, flows: &FlowAssignment<N, F>) -> std::io::Result<()>
where
    W: Write,
    N: NodeId + Display,
    F: Capacity + Display,
{
    for f in flows {
        writeln!(w, "{} {} {}", f.tail, f.head, f.flow)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{solve_max_flow, table, Error};
    use std::io::Cursor;

    #[test]
    fn parse_table_test() {
        let file = "# edges of a small network
A B 3
A, C, 2

B C 1
  B	D 2
C D 3
";
        let edges = table::read(Cursor::new(file)).unwrap();
        let arcs: Vec<_> = edges
            .iter()
            .map(|e| (e.tail.as_str(), e.head.as_str(), e.capacity))
            .collect();
        assert_eq!(
            arcs,
            vec![("A", "B", 3), ("A", "C", 2), ("B", "C", 1), ("B", "D", 2), ("C", "D", 3)]
        );
    }

    #[test]
    fn parse_errors_test() {
        match table::read(Cursor::new("a b 1\na c x\n")) {
            Err(Error::InvalidCapacity { edge, .. }) => assert_eq!(edge, "(\"a\", \"c\") on line 2"),
            r => panic!("unexpected result: {:?}", r),
        }
        assert!(matches!(
            table::read(Cursor::new("a b -1\n")),
            Err(Error::InvalidCapacity { .. })
        ));
        assert!(matches!(
            table::read(Cursor::new("a b 1\n\na b\n")),
            Err(Error::Format { line: 3, .. })
        ));
        assert!(matches!(
            table::read(Cursor::new("a b 1 2\n")),
            Err(Error::Format { line: 1, .. })
        ));
    }

    #[test]
    fn self_loop_test() {
        // same error class as for edges given in code
        match table::read(Cursor::new("# loops\na b 1\nb b 1\n")) {
            Err(Error::SelfLoop { node }) => assert_eq!(node, "\"b\" on line 3"),
            r => panic!("unexpected result: {:?}", r),
        }
        assert!(matches!(
            solve_max_flow(vec![("b", "b", 1)], "a", "b"),
            Err(Error::SelfLoop { .. })
        ));
    }

    #[test]
    fn write_table_test() {
        let edges = vec![("s", "a", 2u32), ("a", "t", 1), ("s", "t", 4)];
        let (_, flows) = solve_max_flow(edges, "s", "t").unwrap();

        let mut buf = Cursor::new(Vec::new());
        table::write(&mut buf, &flows).unwrap();
        assert_eq!(String::from_utf8(buf.into_inner()).unwrap(), "s a 1\na t 1\ns t 4\n");
    }
}
