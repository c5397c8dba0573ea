use std::fmt;

/// How a single task settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Image fetched and written to its destination
    Downloaded { bytes: usize },
    /// Destination already present, no request made
    Skipped,
    /// Image host answered with a non-success status
    Failed { status: u16 },
    /// Transport or filesystem error
    Errored { message: String },
}

/// Per-run tally of task outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
    pub errored: usize,
}

impl BatchReport {
    pub fn record(&mut self, outcome: &FetchOutcome) {
        match outcome {
            FetchOutcome::Downloaded { .. } => self.downloaded += 1,
            FetchOutcome::Skipped => self.skipped += 1,
            FetchOutcome::Failed { .. } => self.failed += 1,
            FetchOutcome::Errored { .. } => self.errored += 1,
        }
    }

    pub fn merge(&mut self, other: &BatchReport) {
        self.downloaded += other.downloaded;
        self.skipped += other.skipped;
        self.failed += other.failed;
        self.errored += other.errored;
    }

    pub fn total(&self) -> usize {
        self.downloaded + self.skipped + self.failed + self.errored
    }

    pub fn failures(&self) -> usize {
        self.failed + self.errored
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} downloaded, {} skipped, {} failed, {} errored",
            self.downloaded, self.skipped, self.failed, self.errored
        )
    }
}
