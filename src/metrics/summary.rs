//! Seed-range summary table
//!
//! One row per seed, ascending. Serialized as CSV with the header in
//! [`SUMMARY_CSV_HEADER`]; an undefined stopping time is an empty field.

use std::io::{BufRead, Write};

use super::h1::H1Metrics;
use super::sequence::SequenceStats;
use crate::error::{Error, Result};

pub const SUMMARY_CSV_HEADER: [&str; 12] = [
    "Seed",
    "H1_max",
    "H1_avg",
    "H1_count",
    "height_max",
    "total_steps",
    "stopping_time",
    "max_value",
    "odd_steps",
    "max_consecutive_odds",
    "sum_of_values",
    "peak_ratio",
];

/// Metrics of one seed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryRow {
    pub seed: u64,
    pub h1_max: f64,
    pub h1_avg: f64,
    pub h1_count: usize,
    pub height_max: u64,
    pub total_steps: usize,
    pub stopping_time: Option<usize>,
    pub max_value: u64,
    pub odd_steps: usize,
    pub max_consecutive_odds: usize,
    pub sum_of_values: f64,
    pub peak_ratio: f64,
}

impl SummaryRow {
    pub fn new(seed: u64, h1: H1Metrics, height_max: u64, stats: SequenceStats) -> Self {
        Self {
            seed,
            h1_max: h1.max,
            h1_avg: h1.avg,
            h1_count: h1.count,
            height_max,
            total_steps: stats.total_steps,
            stopping_time: stats.stopping_time,
            max_value: stats.max_value,
            odd_steps: stats.odd_steps,
            max_consecutive_odds: stats.max_consecutive_odds,
            sum_of_values: stats.sum_of_values,
            peak_ratio: stats.peak_ratio,
        }
    }

    /// CSV record without trailing newline
    ///
    /// Reals use the shortest round-tripping form (`{:?}`), so `36.0` stays
    /// recognisably real rather than printing as `36`.
    pub fn to_csv_record(&self) -> String {
        let stopping_time = self
            .stopping_time
            .map(|t| t.to_string())
            .unwrap_or_default();
        format!(
            "{},{:?},{:?},{},{},{},{},{},{},{},{:?},{:?}",
            self.seed,
            self.h1_max,
            self.h1_avg,
            self.h1_count,
            self.height_max,
            self.total_steps,
            stopping_time,
            self.max_value,
            self.odd_steps,
            self.max_consecutive_odds,
            self.sum_of_values,
            self.peak_ratio,
        )
    }

    fn parse_record(line_no: usize, line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != SUMMARY_CSV_HEADER.len() {
            return Err(Error::parse(
                line_no,
                format!(
                    "expected {} fields, found {}",
                    SUMMARY_CSV_HEADER.len(),
                    fields.len()
                ),
            ));
        }

        fn field<T: std::str::FromStr>(line_no: usize, idx: usize, raw: &str) -> Result<T> {
            raw.parse().map_err(|_| {
                Error::parse(
                    line_no,
                    format!("invalid {} '{}'", SUMMARY_CSV_HEADER[idx], raw),
                )
            })
        }

        let stopping_time = match fields[6] {
            "" => None,
            raw => Some(field(line_no, 6, raw)?),
        };

        Ok(Self {
            seed: field(line_no, 0, fields[0])?,
            h1_max: field(line_no, 1, fields[1])?,
            h1_avg: field(line_no, 2, fields[2])?,
            h1_count: field(line_no, 3, fields[3])?,
            height_max: field(line_no, 4, fields[4])?,
            total_steps: field(line_no, 5, fields[5])?,
            stopping_time,
            max_value: field(line_no, 7, fields[7])?,
            odd_steps: field(line_no, 8, fields[8])?,
            max_consecutive_odds: field(line_no, 9, fields[9])?,
            sum_of_values: field(line_no, 10, fields[10])?,
            peak_ratio: field(line_no, 11, fields[11])?,
        })
    }
}

/// Ordered collection of [`SummaryRow`]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SummaryTable {
    rows: Vec<SummaryRow>,
}

impl SummaryTable {
    pub fn new(rows: Vec<SummaryRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<SummaryRow> {
        self.rows
    }

    pub fn write_csv<W: Write>(&self, mut writer: W) -> Result<()> {
        writeln!(writer, "{}", SUMMARY_CSV_HEADER.join(","))?;
        for row in &self.rows {
            writeln!(writer, "{}", row.to_csv_record())?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn read_csv<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = reader.lines().enumerate();

        let header = match lines.next() {
            Some((_, line)) => line?,
            None => return Err(Error::parse(1, "empty summary file")),
        };
        let columns: Vec<&str> = header.split(',').map(str::trim).collect();
        if columns != SUMMARY_CSV_HEADER {
            return Err(Error::parse(1, format!("unexpected header '{header}'")));
        }

        let mut rows = Vec::new();
        for (idx, line) in lines {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            rows.push(SummaryRow::parse_record(idx + 1, &line)?);
        }

        Ok(Self { rows })
    }
}

impl From<Vec<SummaryRow>> for SummaryTable {
    fn from(rows: Vec<SummaryRow>) -> Self {
        Self::new(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_five_row() -> SummaryRow {
        SummaryRow {
            seed: 5,
            h1_max: 2.0_f64.sqrt() - 1.0,
            h1_avg: 2.0_f64.sqrt() - 1.0,
            h1_count: 1,
            height_max: 2,
            total_steps: 5,
            stopping_time: Some(3),
            max_value: 16,
            odd_steps: 2,
            max_consecutive_odds: 1,
            sum_of_values: 36.0,
            peak_ratio: 3.2,
        }
    }

    #[test]
    fn test_header_line() {
        let mut buf = Vec::new();
        SummaryTable::default().write_csv(&mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Seed,H1_max,H1_avg,H1_count,height_max,total_steps,stopping_time,\
             max_value,odd_steps,max_consecutive_odds,sum_of_values,peak_ratio\n"
        );
    }

    #[test]
    fn test_record_format() {
        let row = SummaryRow {
            seed: 1,
            h1_max: 0.0,
            h1_avg: 0.0,
            h1_count: 0,
            height_max: 0,
            total_steps: 0,
            stopping_time: None,
            max_value: 1,
            odd_steps: 1,
            max_consecutive_odds: 1,
            sum_of_values: 1.0,
            peak_ratio: 1.0,
        };
        assert_eq!(row.to_csv_record(), "1,0.0,0.0,0,0,0,,1,1,1,1.0,1.0");
    }

    #[test]
    fn test_table_reads_back() {
        let mut second = seed_five_row();
        second.seed = 6;
        second.stopping_time = None;
        let table = SummaryTable::new(vec![seed_five_row(), second]);

        let mut buf = Vec::new();
        table.write_csv(&mut buf).unwrap();
        let parsed = SummaryTable::read_csv(buf.as_slice()).unwrap();
        assert_eq!(parsed, table);
    }

    #[test]
    fn test_rejects_short_record() {
        let text = format!("{}\n1,0.0,0.0\n", SUMMARY_CSV_HEADER.join(","));
        let err = SummaryTable::read_csv(text.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
    }

    #[test]
    fn test_rejects_bad_number() {
        let text = format!(
            "{}\n1,0.0,0.0,zero,0,0,,1,1,1,1.0,1.0\n",
            SUMMARY_CSV_HEADER.join(",")
        );
        let err = SummaryTable::read_csv(text.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("H1_count"));
    }

    #[test]
    fn test_rejects_foreign_header() {
        assert!(SummaryTable::read_csv("x,y,h,N\n0,0,0,1\n".as_bytes()).is_err());
    }
}
