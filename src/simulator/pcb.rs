use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Dispatch order, highest first.
    pub const ORDER: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];
}

impl TryFrom<u32> for Priority {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Priority::Low),
            2 => Ok(Priority::Medium),
            3 => Ok(Priority::High),
            _ => Err(Error::InvalidPriority(value)),
        }
    }
}

impl From<Priority> for u32 {
    fn from(p: Priority) -> u32 {
        match p {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "LOW"),
            Priority::Medium => write!(f, "MED"),
            Priority::High => write!(f, "HIGH"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum ProcessState {
    Ready,
    Running,
    Waiting,
    Terminated,
}

/// One line of the workload: what a process will do, before it is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProcessDescriptor {
    pub id: u32,
    pub cpu_burst: u32,
    pub io_burst: u32,
    pub reps: u32,
    pub priority: Priority,
}

/// Process control block, the mutable record of one simulated process.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PCB {
    pub id: u32,
    pub priority: Priority,
    pub process_state: ProcessState,
    pub cpu_burst: u32,
    pub io_burst: u32,
    pub reps_remaining: u32,
    pub burst_countdown: u32,
    pub io_countdown: u32,
    pub quantum_countdown: u32,
    pub start_time: Option<u64>,
    pub end_time: Option<u64>,
    pub wait_time: u64,
}

impl PCB {
    pub fn new(descriptor: &ProcessDescriptor) -> Self {
        Self {
            id: descriptor.id,
            priority: descriptor.priority,
            process_state: ProcessState::Ready,
            cpu_burst: descriptor.cpu_burst,
            io_burst: descriptor.io_burst,
            reps_remaining: descriptor.reps,
            burst_countdown: 0,
            io_countdown: 0,
            quantum_countdown: 0,
            start_time: None,
            end_time: None,
            wait_time: 0,
        }
    }

    pub fn is_terminated(&self) -> bool {
        self.process_state == ProcessState::Terminated
    }

    /// READY -> RUNNING. A fresh burst is loaded only when the previous one
    /// was completed, a preempted burst keeps its countdown.
    pub fn dispatch(&mut self, now: u64, quantum: Option<u32>) {
        debug_assert_eq!(self.process_state, ProcessState::Ready);

        self.process_state = ProcessState::Running;
        if self.start_time.is_none() {
            self.start_time = Some(now);
        }
        if self.burst_countdown == 0 {
            self.burst_countdown = self.cpu_burst;
        }
        self.quantum_countdown = quantum.unwrap_or(0);
    }

    /// RUNNING -> TERMINATED or WAITING once the burst is used up.
    pub fn complete_burst(&mut self, now: u64) {
        debug_assert_eq!(self.process_state, ProcessState::Running);
        debug_assert_eq!(self.burst_countdown, 0);
        debug_assert!(self.reps_remaining > 0);

        self.reps_remaining -= 1;
        if self.reps_remaining == 0 {
            self.terminate(now);
        } else {
            self.process_state = ProcessState::Waiting;
            self.io_countdown = self.io_burst;
        }
    }

    /// RUNNING -> READY when the time slice ran out mid burst.
    pub fn preempt(&mut self) {
        debug_assert_eq!(self.process_state, ProcessState::Running);
        debug_assert!(self.burst_countdown > 0);

        self.process_state = ProcessState::Ready;
        self.quantum_countdown = 0;
    }

    /// Advance one tick of I/O. Returns true when the process became READY.
    pub fn tick_io(&mut self) -> bool {
        debug_assert_eq!(self.process_state, ProcessState::Waiting);
        // Only a process with work left is ever sent to WAITING
        debug_assert!(self.reps_remaining > 0);

        self.io_countdown = self.io_countdown.saturating_sub(1);
        if self.io_countdown == 0 {
            self.process_state = ProcessState::Ready;
            true
        } else {
            false
        }
    }

    pub fn terminate(&mut self, now: u64) {
        self.process_state = ProcessState::Terminated;
        self.end_time = Some(now);
    }
}
