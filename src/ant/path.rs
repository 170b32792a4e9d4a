//! Path log: the ordered trace of an ant run
//!
//! One [`PathEntry`] is recorded for the initial state and one after every
//! transition. The log can be exported as the `x,y,h,N` path artifact and
//! read back by downstream tools.

use std::io::{BufRead, Write};

use ndarray::Array2;

use crate::error::{Error, Result};

/// Header of the path artifact
pub const PATH_CSV_HEADER: [&str; 4] = ["x", "y", "h", "N"];

/// One recorded ant state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathEntry {
    pub x: i64,
    pub y: i64,
    /// Global height after this transition
    pub height: u64,
    /// Collatz value carried after this transition
    pub value: u64,
}

impl PathEntry {
    /// Lattice cell of this entry
    pub fn cell(&self) -> (i64, i64) {
        (self.x, self.y)
    }
}

/// Append-only, temporally ordered sequence of [`PathEntry`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathLog {
    entries: Vec<PathEntry>,
}

impl PathLog {
    /// Log holding only the initial state `(0, 0, 0, seed)`
    pub fn starting_at(seed: u64) -> Self {
        Self {
            entries: vec![PathEntry {
                x: 0,
                y: 0,
                height: 0,
                value: seed,
            }],
        }
    }

    pub(crate) fn push(&mut self, entry: PathEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[PathEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn first(&self) -> Option<&PathEntry> {
        self.entries.first()
    }

    pub fn last(&self) -> Option<&PathEntry> {
        self.entries.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathEntry> {
        self.entries.iter()
    }

    /// Collatz values in temporal order
    pub fn values(&self) -> Vec<u64> {
        self.entries.iter().map(|e| e.value).collect()
    }

    /// Highest story reached, 0 for an empty log
    pub fn height_max(&self) -> u64 {
        self.entries.iter().map(|e| e.height).max().unwrap_or(0)
    }

    /// `(x, y)` projection as an n × 2 point cloud, duplicates kept
    pub fn point_cloud(&self) -> Array2<f64> {
        let mut points = Array2::<f64>::zeros((self.entries.len(), 2));
        for (i, e) in self.entries.iter().enumerate() {
            points[[i, 0]] = e.x as f64;
            points[[i, 1]] = e.y as f64;
        }
        points
    }

    /// Write the `x,y,h,N` artifact, one row per entry
    pub fn write_csv<W: Write>(&self, mut writer: W) -> Result<()> {
        writeln!(writer, "{}", PATH_CSV_HEADER.join(","))?;
        for e in &self.entries {
            writeln!(writer, "{},{},{},{}", e.x, e.y, e.height, e.value)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Parse an `x,y,h,N` artifact
    ///
    /// Blank lines are skipped. The header must match exactly (modulo
    /// whitespace around fields).
    pub fn read_csv<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = reader.lines().enumerate();

        let header = match lines.next() {
            Some((_, line)) => line?,
            None => return Err(Error::parse(1, "empty path file")),
        };
        let columns: Vec<&str> = header.split(',').map(str::trim).collect();
        if columns != PATH_CSV_HEADER {
            return Err(Error::parse(1, format!("unexpected header '{header}'")));
        }

        let mut entries = Vec::new();
        for (idx, line) in lines {
            let line = line?;
            let line_no = idx + 1;
            if line.trim().is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            if fields.len() != PATH_CSV_HEADER.len() {
                return Err(Error::parse(
                    line_no,
                    format!("expected 4 fields, found {}", fields.len()),
                ));
            }

            let parse_err = |name: &str, raw: &str| {
                Error::parse(line_no, format!("invalid {name} '{raw}'"))
            };
            entries.push(PathEntry {
                x: fields[0].parse().map_err(|_| parse_err("x", fields[0]))?,
                y: fields[1].parse().map_err(|_| parse_err("y", fields[1]))?,
                height: fields[2].parse().map_err(|_| parse_err("h", fields[2]))?,
                value: fields[3].parse().map_err(|_| parse_err("N", fields[3]))?,
            });
        }

        Ok(Self { entries })
    }
}

impl<'a> IntoIterator for &'a PathLog {
    type Item = &'a PathEntry;
    type IntoIter = std::slice::Iter<'a, PathEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
