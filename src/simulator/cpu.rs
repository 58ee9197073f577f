/// The single logical CPU: who is on it and how its ticks were spent.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CPU {
    pub running: Option<usize>,
    pub busy: u64,
    pub idle: u64,
    pub context_switches: u64,
}

impl CPU {
    pub fn new() -> Self {
        Self {
            ..Default::default()
        }
    }

    /// Put a process on the CPU, counting the switch.
    pub fn load(&mut self, process: usize) {
        debug_assert!(self.running.is_none(), "CPU already running a process");
        self.running = Some(process);
        self.context_switches += 1;
    }

    pub fn release(&mut self) -> Option<usize> {
        self.running.take()
    }
}
