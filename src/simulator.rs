pub mod cpu;
pub mod pcb;
pub mod run_queue;
pub mod scheduler;
pub mod simulation;
pub mod stats;

pub use cpu::CPU;
pub use pcb::*;
pub use run_queue::RunQueues;
pub use scheduler::{Policy, Scheduler};
pub use simulation::{SimulationState, Status};
pub use stats::{ProcessSummary, Statistics};
