//! Cycle-time and takt-time statistics.

use std::fmt;

use pl_core::{SimClock, Tick};

use crate::{StatsError, StatsResult};

/// Mean and maximum of a non-empty sample sequence, in seconds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SampleSummary {
    pub count: usize,
    pub mean:  f64,
    pub max:   f64,
}

/// A labelled sequence of interval samples, in seconds.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleSeries {
    pub label:   String,
    pub samples: Vec<f64>,
}

impl SampleSeries {
    pub fn new(label: impl Into<String>, samples: Vec<f64>) -> Self {
        Self { label: label.into(), samples }
    }

    /// Convert tick-count samples to seconds.
    pub fn from_ticks(label: impl Into<String>, ticks: &[u64], clock: &SimClock) -> Self {
        Self::new(label, ticks.iter().map(|&t| clock.secs(t)).collect())
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Fails with [`StatsError::EmptySamples`] when nothing was recorded.
    pub fn summary(&self) -> StatsResult<SampleSummary> {
        if self.samples.is_empty() {
            return Err(StatsError::EmptySamples(self.label.clone()));
        }
        let count = self.samples.len();
        let mean = self.samples.iter().sum::<f64>() / count as f64;
        let max = self.samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Ok(SampleSummary { count, mean, max })
    }
}

// ── Takt ──────────────────────────────────────────────────────────────────────

/// Records the gap between successive completions at the final position.
/// The first completion only starts the clock.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaktMeter {
    last: Option<Tick>,
    samples: Vec<u64>,
}

impl TaktMeter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, now: Tick) {
        if let Some(last) = self.last.replace(now) {
            self.samples.push(now - last);
        }
    }

    /// Samples in ticks.
    pub fn samples(&self) -> &[u64] {
        &self.samples
    }

    pub fn last(&self) -> Option<Tick> {
        self.last
    }
}

// ── Report ────────────────────────────────────────────────────────────────────

/// End-of-run statistics.
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    /// Simulated seconds covered by the run.
    pub elapsed_secs: f64,
    /// Pallets released over the run.
    pub releases: u64,
    /// One series per robot, in configuration order.
    pub robots: Vec<SampleSeries>,
    pub takt: SampleSeries,
}

impl RunReport {
    pub fn robot(&self, label: &str) -> Option<&SampleSeries> {
        self.robots.iter().find(|s| s.label == label)
    }
}

fn write_line(f: &mut fmt::Formatter<'_>, series: &SampleSeries, what: &str) -> fmt::Result {
    match series.summary() {
        Ok(s) => writeln!(f, "{} avg/max {what}: {:.3} / {:.3}", series.label, s.mean, s.max),
        Err(e) => writeln!(f, "{e}"),
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for series in &self.robots {
            write_line(f, series, "cycle time")?;
        }
        writeln!(f)?;
        write_line(f, &self.takt, "takt time")?;
        write!(f, "{} pallets released in {:.2} s", self.releases, self.elapsed_secs)
    }
}
