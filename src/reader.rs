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

//! Line tokenizer shared by the edge table and DIMACS readers.

use crate::edge::{Capacity, Edge, NodeId};
use crate::error::{Error, Result};

use std::fmt::Display;
use std::io::{BufRead, BufReader, Read};
use std::str::FromStr;

/// Reads an edge list line by line.
pub(crate) struct EdgeReader<R: Read> {
    io: BufReader<R>,
    buf: String,
    /// Number of the last line read.
    pub line: usize,
    comment: char,
    commas: bool,
}

impl<R: Read> EdgeReader<R> {
    /// Create a reader skipping lines that start with `comment`.
    ///
    /// If `commas` is set, commas separate fields like whitespace.
    pub fn new(reader: R, comment: char, commas: bool) -> Self {
        EdgeReader {
            io: BufReader::new(reader),
            buf: String::new(),
            line: 0,
            comment,
            commas,
        }
    }

    /// Move to the next non-empty, non-comment line.
    ///
    /// Returns `false` at the end of the input.
    fn advance(&mut self) -> Result<bool> {
        loop {
            self.buf.clear();
            if self.io.read_line(&mut self.buf)? == 0 {
                return Ok(false);
            }
            self.line += 1;
            let text = self.buf.trim();
            if !text.is_empty() && !text.starts_with(self.comment) {
                return Ok(true);
            }
        }
    }

    /// Split the current line into fields.
    fn fields(&self) -> Fields<'_> {
        let commas = self.commas;
        Fields {
            toks: self
                .buf
                .split(|c: char| c.is_whitespace() || (commas && c == ','))
                .filter(|tok| !tok.is_empty())
                .collect(),
            pos: 0,
            line: self.line,
        }
    }

    /// Return the fields of the next non-empty, non-comment line.
    pub fn next_line(&mut self) -> Result<Option<Fields<'_>>> {
        if self.advance()? {
            Ok(Some(self.fields()))
        } else {
            Ok(None)
        }
    }

    /// Return the fields of the next line, which must start with `descriptor`.
    ///
    /// The descriptor itself is consumed.
    pub fn expect_line(&mut self, descriptor: &str) -> Result<Fields<'_>> {
        if !self.advance()? {
            return Err(Error::Format {
                line: self.line,
                msg: format!("unexpected end of file, expected '{}' line", descriptor),
            });
        }
        let mut fields = self.fields();
        fields.expect(descriptor)?;
        Ok(fields)
    }
}

/// The fields of a single line.
pub(crate) struct Fields<'a> {
    toks: Vec<&'a str>,
    pos: usize,
    pub line: usize,
}

impl<'a> Fields<'a> {
    /// Return the number of fields on the line.
    pub fn len(&self) -> usize {
        self.toks.len()
    }

    fn format_err(&self, msg: String) -> Error {
        Error::Format { line: self.line, msg }
    }

    /// Return the next field.
    pub fn str(&mut self) -> Result<&'a str> {
        let tok = self
            .toks
            .get(self.pos)
            .copied()
            .ok_or_else(|| self.format_err("missing field".to_string()))?;
        self.pos += 1;
        Ok(tok)
    }

    /// Fail unless the next field is `tok`.
    pub fn expect(&mut self, tok: &str) -> Result<()> {
        let nxt = self.str()?;
        if nxt == tok {
            Ok(())
        } else {
            Err(self.format_err(format!("expected '{}', got '{}'", tok, nxt)))
        }
    }

    /// Return the next field as a number.
    pub fn number<T>(&mut self) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let tok = self.str()?;
        tok.parse::<T>()
            .map_err(|e| self.format_err(format!("invalid number '{}': {}", tok, e)))
    }

    /// Read an edge `<tail> <head> <capacity>` from the next fields.
    ///
    /// An unparsable or negative capacity is `InvalidCapacity`, equal
    /// endpoints are `SelfLoop`, both naming the line.
    pub fn edge<N, F>(&mut self) -> Result<Edge<N, F>>
    where
        N: NodeId + FromStr,
        N::Err: Display,
        F: Capacity + FromStr,
        F::Err: Display,
    {
        let tail: N = self.number()?;
        let head: N = self.number()?;
        let tok = self.str()?;
        let capacity = tok.parse::<F>().map_err(|e| Error::InvalidCapacity {
            edge: format!("({:?}, {:?}) on line {}", tail, head, self.line),
            msg: format!("'{}': {}", tok, e),
        })?;
        Edge::new(tail, head, capacity).map_err(|err| match err {
            Error::InvalidCapacity { edge, msg } => Error::InvalidCapacity {
                edge: format!("{} on line {}", edge, self.line),
                msg,
            },
            Error::SelfLoop { node } => Error::SelfLoop {
                node: format!("{} on line {}", node, self.line),
            },
            err => err,
        })
    }

    /// Fail if there are fields left.
    pub fn end(&self) -> Result<()> {
        match self.toks.get(self.pos) {
            Some(tok) => Err(self.format_err(format!("unexpected field at end of line: {}", tok))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EdgeReader;
    use crate::{Edge, Error};

    #[test]
    fn test_fields() {
        let mut r = EdgeReader::new("# comment\n\n  a, b 3\nc d\n".as_bytes(), '#', true);
        {
            let mut f = r.next_line().unwrap().unwrap();
            assert_eq!(f.line, 3);
            assert_eq!(f.len(), 3);
            let e: Edge<String, u32> = f.edge().unwrap();
            assert_eq!(e, Edge::new("a".to_string(), "b".to_string(), 3).unwrap());
            assert!(f.end().is_ok());
        }
        {
            let mut f = r.next_line().unwrap().unwrap();
            assert_eq!(f.line, 4);
            assert_eq!(f.str().unwrap(), "c");
            assert!(f.end().is_err());
        }
        assert!(r.next_line().unwrap().is_none());
    }

    #[test]
    fn test_edge_errors() {
        let edge = |text: &str| {
            let mut r = EdgeReader::new(text.as_bytes(), 'c', false);
            let mut f = r.next_line().unwrap().unwrap();
            f.edge::<usize, i32>()
        };
        match edge("\n1 1 4\n") {
            Err(Error::SelfLoop { node }) => assert_eq!(node, "1 on line 2"),
            r => panic!("unexpected result: {:?}", r),
        }
        match edge("1 2 -4\n") {
            Err(Error::InvalidCapacity { edge, .. }) => assert_eq!(edge, "(1, 2) on line 1"),
            r => panic!("unexpected result: {:?}", r),
        }
        assert!(matches!(edge("1 2 x\n"), Err(Error::InvalidCapacity { .. })));
        assert!(matches!(edge("1 x 3\n"), Err(Error::Format { line: 1, .. })));
        assert!(matches!(edge("1 2\n"), Err(Error::Format { line: 1, .. })));
    }
}
