use serde::Serialize;
use std::fmt;

use crate::simulator::{Priority, Statistics, Status};

/// Derived figures for a finished run. `None` means there was nothing to
/// average over.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    #[serde(flatten)]
    pub statistics: Statistics,
    pub throughput: Option<f64>,
    pub avg_wait_high: Option<f64>,
    pub avg_wait_medium: Option<f64>,
    pub avg_wait_low: Option<f64>,
    pub avg_wait_overall: Option<f64>,
    pub avg_turnaround: Option<f64>,
}

fn ratio(numerator: u64, denominator: u64) -> Option<f64> {
    if denominator == 0 {
        None
    } else {
        Some(numerator as f64 / denominator as f64)
    }
}

impl Report {
    pub fn new(statistics: Statistics) -> Self {
        let average_wait = |priority: Option<Priority>| {
            let (sum, count) = statistics.total_wait(priority);
            ratio(sum, count as u64)
        };

        let throughput = ratio(
            statistics.cpu_busy * 100,
            statistics.cpu_busy + statistics.cpu_idle,
        );
        let avg_wait_high = average_wait(Some(Priority::High));
        let avg_wait_medium = average_wait(Some(Priority::Medium));
        let avg_wait_low = average_wait(Some(Priority::Low));
        let avg_wait_overall = average_wait(None);

        let turnaround: u64 = statistics
            .processes
            .iter()
            .filter_map(|process| process.end_time)
            .sum();
        let avg_turnaround = ratio(turnaround, statistics.processes.len() as u64);

        Self {
            statistics,
            throughput,
            avg_wait_high,
            avg_wait_medium,
            avg_wait_low,
            avg_wait_overall,
            avg_turnaround,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

struct Figure(Option<f64>);

impl fmt::Display for Figure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{:.6}", value),
            None => write!(f, "no data"),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let stats = &self.statistics;
        match stats.quantum {
            Some(quantum) => writeln!(f, "   Scheduler: {} (quantum {})", stats.scheduler, quantum)?,
            None => writeln!(f, "   Scheduler: {}", stats.scheduler)?,
        }
        writeln!(f, "   Processes: {}", stats.processes.len())?;
        writeln!(f, "   Elapsed Time: {}", stats.elapsed)?;
        writeln!(f, "   CPU Busy Time: {}", stats.cpu_busy)?;
        writeln!(f, "   CPU Idle Time: {}", stats.cpu_idle)?;
        writeln!(f, "   Avg. Throughput: {}", Figure(self.throughput))?;
        writeln!(f, "   Avg. Wait times:")?;
        writeln!(f, "    |-HIGH    : {}", Figure(self.avg_wait_high))?;
        writeln!(f, "    |-MED     : {}", Figure(self.avg_wait_medium))?;
        writeln!(f, "    |-LOW     : {}", Figure(self.avg_wait_low))?;
        writeln!(f, "    |-OVERALL : {}", Figure(self.avg_wait_overall))?;
        writeln!(f, "   Avg. Turnaround: {}", Figure(self.avg_turnaround))?;
        write!(f, "   Context Switches: {}", stats.context_switches)
    }
}

/// `│  elapsed  running  waiting-ids     │`, with `xx` for nothing.
impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let running = match self.running {
            Some(id) => id.to_string(),
            None => "xx".to_string(),
        };
        let waiting = if self.waiting.is_empty() {
            "xx".to_string()
        } else {
            self.waiting
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        };
        write!(f, "│  {:>4} {:>9} {:>9}     │", self.elapsed, running, waiting)
    }
}
