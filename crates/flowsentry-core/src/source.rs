//! Record sources feeding the detection loop

use crate::{FeatureRecord, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;
use tracing::warn;

/// A finite, ordered sequence of feature records
///
/// End-of-sequence is a normal termination condition, reported as `None`.
/// Sources may block on I/O inside `next_record`; that is one of the two
/// places the detection loop is allowed to wait.
#[async_trait]
pub trait RecordSource: Send {
    /// Next record in arrival order, or `None` when the source is exhausted
    async fn next_record(&mut self) -> Option<FeatureRecord>;
}

/// In-memory record source for tests and drills
#[derive(Debug, Default)]
pub struct VecSource {
    records: VecDeque<FeatureRecord>,
}

impl VecSource {
    /// Create a source over a fixed list of records
    pub fn new(records: Vec<FeatureRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }
}

#[async_trait]
impl RecordSource for VecSource {
    async fn next_record(&mut self) -> Option<FeatureRecord> {
        self.records.pop_front()
    }
}

/// Record source reading one JSON object per line
///
/// Malformed lines are logged and skipped; a single bad line must never
/// starve the detection loop.
pub struct JsonlSource {
    lines: Lines<BufReader<File>>,
    line_no: usize,
}

impl JsonlSource {
    /// Open a JSONL record file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
            line_no: 0,
        })
    }
}

#[async_trait]
impl RecordSource for JsonlSource {
    async fn next_record(&mut self) -> Option<FeatureRecord> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    warn!(line = self.line_no, error = %e, "failed to read record line");
                    self.line_no += 1;
                    continue;
                }
            };
            self.line_no += 1;

            if line.trim().is_empty() {
                continue;
            }

            let parsed = serde_json::from_str::<serde_json::Value>(&line)
                .map_err(crate::Error::from)
                .and_then(|value| FeatureRecord::from_json(&value));

            match parsed {
                Ok(record) => return Some(record),
                Err(e) => {
                    warn!(line = self.line_no - 1, error = %e, "skipping malformed record");
                }
            }
        }
    }
}
