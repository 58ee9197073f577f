use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::simulator::{Priority, RunQueues, PCB};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Scheduler {
    FCFS,
    RR,
    SJF,
}

impl fmt::Display for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Scheduler::FCFS => write!(f, "FCFS"),
            Scheduler::RR => write!(f, "RR"),
            Scheduler::SJF => write!(f, "SJF"),
        }
    }
}

impl FromStr for Scheduler {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "FCFS" => Ok(Scheduler::FCFS),
            "RR" => Ok(Scheduler::RR),
            "SJF" => Ok(Scheduler::SJF),
            _ => Err(Self::Err::ParseSchedulerError(s.to_string())),
        }
    }
}

/// The dispatch discipline used for a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Single FIFO, priorities are ignored, bursts run to completion.
    Fcfs,
    /// Priority stratified FIFOs with a fixed time slice.
    RoundRobin { quantum: u32 },
}

impl Policy {
    pub fn new(scheduler: Scheduler, quantum: u32) -> Result<Self, Error> {
        match scheduler {
            Scheduler::FCFS => Ok(Policy::Fcfs),
            Scheduler::RR if quantum == 0 => Err(Error::InvalidQuantum),
            Scheduler::RR => Ok(Policy::RoundRobin { quantum }),
            Scheduler::SJF => Err(Error::UnsupportedScheduler(scheduler)),
        }
    }

    pub fn scheduler(&self) -> Scheduler {
        match self {
            Policy::Fcfs => Scheduler::FCFS,
            Policy::RoundRobin { .. } => Scheduler::RR,
        }
    }

    pub fn quantum(&self) -> Option<u32> {
        match self {
            Policy::Fcfs => None,
            Policy::RoundRobin { quantum } => Some(*quantum),
        }
    }

    /// The queue level a ready process goes to.
    pub fn level(&self, priority: Priority) -> Priority {
        match self {
            // FCFS keeps every process on a single queue
            Policy::Fcfs => Priority::High,
            Policy::RoundRobin { .. } => priority,
        }
    }

    pub fn enqueue(&self, queues: &mut RunQueues, index: usize, pcb: &PCB) {
        queues.enqueue(index, self.level(pcb.priority));
    }

    pub fn dispatch(&self, queues: &mut RunQueues) -> Option<usize> {
        match self {
            Policy::Fcfs => queues.dequeue(Priority::High),
            Policy::RoundRobin { .. } => queues.dequeue_highest(),
        }
    }

    /// Whether the running process must give up the CPU with work left.
    pub fn should_preempt(&self, pcb: &PCB) -> bool {
        match self {
            Policy::Fcfs => false,
            Policy::RoundRobin { .. } => pcb.quantum_countdown == 0 && pcb.burst_countdown > 0,
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Policy::Fcfs => write!(f, "FCFS"),
            Policy::RoundRobin { quantum } => write!(f, "RR (quantum {})", quantum),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::ProcessDescriptor;

    fn pcb(priority: Priority) -> PCB {
        PCB::new(&ProcessDescriptor {
            id: 0,
            cpu_burst: 3,
            io_burst: 1,
            reps: 1,
            priority,
        })
    }

    #[test]
    fn parse_scheduler() {
        assert_eq!("FCFS".parse::<Scheduler>(), Ok(Scheduler::FCFS));
        assert_eq!("rr".parse::<Scheduler>(), Ok(Scheduler::RR));
        assert_eq!("SJF".parse::<Scheduler>(), Ok(Scheduler::SJF));
        assert_eq!(
            "LIFO".parse::<Scheduler>(),
            Err(Error::ParseSchedulerError("LIFO".to_string()))
        );
    }

    #[test]
    fn unsupported_schedulers_fail() {
        assert_eq!(
            Policy::new(Scheduler::SJF, 5),
            Err(Error::UnsupportedScheduler(Scheduler::SJF))
        );
        assert_eq!(Policy::new(Scheduler::RR, 0), Err(Error::InvalidQuantum));
        assert_eq!(Policy::new(Scheduler::FCFS, 0), Ok(Policy::Fcfs));
    }

    #[test]
    fn fcfs_ignores_priority() {
        let policy = Policy::Fcfs;
        let mut queues = RunQueues::new();

        policy.enqueue(&mut queues, 0, &pcb(Priority::Low));
        policy.enqueue(&mut queues, 1, &pcb(Priority::High));
        policy.enqueue(&mut queues, 2, &pcb(Priority::Medium));

        assert_eq!(policy.dispatch(&mut queues), Some(0));
        assert_eq!(policy.dispatch(&mut queues), Some(1));
        assert_eq!(policy.dispatch(&mut queues), Some(2));
        assert_eq!(policy.dispatch(&mut queues), None);
    }

    #[test]
    fn round_robin_prefers_high() {
        let policy = Policy::RoundRobin { quantum: 2 };
        let mut queues = RunQueues::new();

        policy.enqueue(&mut queues, 0, &pcb(Priority::Low));
        policy.enqueue(&mut queues, 1, &pcb(Priority::Medium));
        policy.enqueue(&mut queues, 2, &pcb(Priority::High));

        assert_eq!(policy.dispatch(&mut queues), Some(2));
        assert_eq!(policy.dispatch(&mut queues), Some(1));
        assert_eq!(policy.dispatch(&mut queues), Some(0));
    }

    #[test]
    fn preemption_needs_expired_quantum_and_work_left() {
        let policy = Policy::RoundRobin { quantum: 2 };
        let mut process = pcb(Priority::High);
        process.dispatch(0, policy.quantum());

        process.quantum_countdown = 0;
        process.burst_countdown = 1;
        assert!(policy.should_preempt(&process));

        process.burst_countdown = 0;
        assert!(!policy.should_preempt(&process));

        process.quantum_countdown = 0;
        process.burst_countdown = 4;
        assert!(!Policy::Fcfs.should_preempt(&process));
    }
}
