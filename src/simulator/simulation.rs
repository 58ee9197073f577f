use log::{debug, info, trace};

use crate::simulator::stats::{ProcessSummary, Statistics};
use crate::simulator::{Policy, ProcessDescriptor, ProcessState, RunQueues, CPU, PCB};

/// What the CPU and the I/O devices are doing at a given tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub elapsed: u64,
    pub running: Option<u32>,
    pub waiting: Vec<u32>,
}

/// Everything a run mutates: process table, run queues, CPU and clock.
///
/// Every tick is spent on exactly one of three things: dispatching a process
/// (a context switch), advancing the running process by one unit of its
/// burst, or idling. The dispatch tick does not advance the burst, so a
/// process dispatched at tick `t` with a burst of `n` completes at `t + n`.
/// `start_time` is the tick of the first dispatch and `end_time` the tick in
/// which the last unit of work finished. After the CPU step, every READY or
/// WAITING process is charged one tick of wait and WAITING processes advance
/// their I/O, including a process that left the CPU in this very tick.
#[derive(Debug, Clone)]
pub struct SimulationState {
    processes: Vec<PCB>,
    queues: RunQueues,
    policy: Policy,
    cpu: CPU,
    clock: u64,
    terminated: usize,
}

impl SimulationState {
    pub fn new(workload: &[ProcessDescriptor], policy: Policy) -> Self {
        let mut state = Self {
            processes: Vec::with_capacity(workload.len()),
            queues: RunQueues::new(),
            policy,
            cpu: CPU::new(),
            clock: 0,
            terminated: 0,
        };

        for (index, descriptor) in workload.iter().enumerate() {
            let mut pcb = PCB::new(descriptor);
            if pcb.reps_remaining == 0 {
                // Nothing to run
                pcb.terminate(0);
                state.terminated += 1;
            } else {
                policy.enqueue(&mut state.queues, index, &pcb);
            }
            state.processes.push(pcb);
        }

        state
    }

    pub fn clock(&self) -> u64 {
        self.clock
    }

    pub fn processes(&self) -> &[PCB] {
        &self.processes
    }

    pub fn queues(&self) -> &RunQueues {
        &self.queues
    }

    pub fn cpu(&self) -> &CPU {
        &self.cpu
    }

    pub fn terminated(&self) -> usize {
        self.terminated
    }

    pub fn is_finished(&self) -> bool {
        self.terminated == self.processes.len()
    }

    pub fn status(&self) -> Status {
        Status {
            elapsed: self.clock,
            running: self.cpu.running.map(|index| self.processes[index].id),
            waiting: self
                .processes
                .iter()
                .filter(|pcb| pcb.process_state == ProcessState::Waiting)
                .map(|pcb| pcb.id)
                .collect(),
        }
    }

    /// Advance the simulation by one tick.
    pub fn tick(&mut self) {
        match self.cpu.running {
            Some(index) => self.advance_running(index),
            None => self.context_switch(),
        }

        self.advance_others();
        self.clock += 1;
    }

    pub fn run(self) -> Statistics {
        self.run_with(|_| {})
    }

    /// Run to completion, handing the status of every tick to `observer`.
    pub fn run_with<F: FnMut(&Status)>(mut self, mut observer: F) -> Statistics {
        info!(
            "Running {} over {} processes",
            self.policy,
            self.processes.len()
        );

        while !self.is_finished() {
            self.tick();
            observer(&self.status());
        }

        info!(
            "Finished after {} ticks, {} context switches",
            self.clock, self.cpu.context_switches
        );
        self.statistics()
    }

    pub fn statistics(&self) -> Statistics {
        Statistics {
            scheduler: self.policy.scheduler(),
            quantum: self.policy.quantum(),
            elapsed: self.clock,
            cpu_busy: self.cpu.busy,
            cpu_idle: self.cpu.idle,
            context_switches: self.cpu.context_switches,
            processes: self.processes.iter().map(ProcessSummary::from).collect(),
        }
    }

    fn advance_running(&mut self, index: usize) {
        let now = self.clock;
        let pcb = &mut self.processes[index];

        pcb.burst_countdown = pcb.burst_countdown.saturating_sub(1);
        if self.policy.quantum().is_some() {
            pcb.quantum_countdown = pcb.quantum_countdown.saturating_sub(1);
        }
        self.cpu.busy += 1;

        if pcb.burst_countdown == 0 {
            self.cpu.release();
            pcb.complete_burst(now);
            if pcb.is_terminated() {
                self.terminated += 1;
                debug!("[{}] process {} terminated", now, pcb.id);
            } else {
                trace!("[{}] process {} waiting on I/O", now, pcb.id);
            }
        } else if self.policy.should_preempt(pcb) {
            self.cpu.release();
            pcb.preempt();
            self.policy.enqueue(&mut self.queues, index, pcb);
            trace!(
                "[{}] process {} preempted with {} left",
                now,
                pcb.id,
                pcb.burst_countdown
            );
        }
    }

    /// Dispatch the next ready process, or count the tick as idle.
    fn context_switch(&mut self) {
        match self.policy.dispatch(&mut self.queues) {
            Some(index) => {
                let pcb = &mut self.processes[index];
                pcb.dispatch(self.clock, self.policy.quantum());
                self.cpu.load(index);
                trace!("[{}] dispatched process {}", self.clock, pcb.id);
            }
            None => self.cpu.idle += 1,
        }
    }

    /// Wait and I/O accounting for everything not on the CPU after this
    /// tick's CPU step.
    fn advance_others(&mut self) {
        for (index, pcb) in self.processes.iter_mut().enumerate() {
            match pcb.process_state {
                ProcessState::Ready => pcb.wait_time += 1,
                ProcessState::Waiting => {
                    pcb.wait_time += 1;
                    if pcb.tick_io() {
                        self.policy.enqueue(&mut self.queues, index, pcb);
                    }
                }
                ProcessState::Running | ProcessState::Terminated => {}
            }
        }
    }

    /// Check the structural invariants of the process table and run queues.
    pub fn check_invariants(&self) -> Result<(), String> {
        let running: Vec<usize> = self
            .processes
            .iter()
            .enumerate()
            .filter(|(_, pcb)| pcb.process_state == ProcessState::Running)
            .map(|(index, _)| index)
            .collect();
        if running.len() > 1 || running.first().copied() != self.cpu.running {
            return Err(format!(
                "running processes {:?}, CPU holds {:?}",
                running, self.cpu.running
            ));
        }

        for (index, pcb) in self.processes.iter().enumerate() {
            let queued = self.queues.iter().filter(|queued| *queued == index).count();
            let expected = match pcb.process_state {
                ProcessState::Ready => 1,
                _ => 0,
            };
            if queued != expected {
                return Err(format!(
                    "process {} is {:?} but queued {} times",
                    pcb.id, pcb.process_state, queued
                ));
            }
            if queued == 1 && self.queues.position(index) != Some(self.policy.level(pcb.priority)) {
                return Err(format!("process {} queued on the wrong level", pcb.id));
            }
        }

        let terminated = self.processes.iter().filter(|pcb| pcb.is_terminated()).count();
        if terminated != self.terminated {
            return Err(format!(
                "{} processes terminated, counter says {}",
                terminated, self.terminated
            ));
        }

        Ok(())
    }
}
