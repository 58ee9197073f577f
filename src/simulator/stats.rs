use serde::{Deserialize, Serialize};

use crate::simulator::{Priority, Scheduler, PCB};

/// Final fields of one process, as handed to the reporter.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProcessSummary {
    pub id: u32,
    pub priority: Priority,
    pub start_time: Option<u64>,
    pub end_time: Option<u64>,
    pub wait_time: u64,
}

impl From<&PCB> for ProcessSummary {
    fn from(pcb: &PCB) -> Self {
        Self {
            id: pcb.id,
            priority: pcb.priority,
            start_time: pcb.start_time,
            end_time: pcb.end_time,
            wait_time: pcb.wait_time,
        }
    }
}

/// Raw counters of a finished run.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Statistics {
    pub scheduler: Scheduler,
    pub quantum: Option<u32>,
    pub elapsed: u64,
    pub cpu_busy: u64,
    pub cpu_idle: u64,
    pub context_switches: u64,
    pub processes: Vec<ProcessSummary>,
}

impl Statistics {
    /// Sum of wait times and number of processes, optionally for one class.
    pub fn total_wait(&self, priority: Option<Priority>) -> (u64, usize) {
        self.processes
            .iter()
            .filter(|process| priority.map_or(true, |p| process.priority == p))
            .fold((0, 0), |(sum, count), process| (sum + process.wait_time, count + 1))
    }
}
