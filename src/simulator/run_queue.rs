use std::collections::VecDeque;

use crate::simulator::Priority;

/// Ready processes, one FIFO per priority level.
///
/// The queues hold indices into the simulation's process table, never the
/// processes themselves.
#[derive(Debug, Default, Clone)]
pub struct RunQueues {
    high: VecDeque<usize>,
    medium: VecDeque<usize>,
    low: VecDeque<usize>,
}

impl RunQueues {
    pub fn new() -> Self {
        Self::default()
    }

    fn level(&self, priority: Priority) -> &VecDeque<usize> {
        match priority {
            Priority::High => &self.high,
            Priority::Medium => &self.medium,
            Priority::Low => &self.low,
        }
    }

    fn level_mut(&mut self, priority: Priority) -> &mut VecDeque<usize> {
        match priority {
            Priority::High => &mut self.high,
            Priority::Medium => &mut self.medium,
            Priority::Low => &mut self.low,
        }
    }

    /// Append to the tail of the given level. The caller owns the state change.
    pub fn enqueue(&mut self, process: usize, priority: Priority) {
        debug_assert!(!self.contains(process), "process {} queued twice", process);
        self.level_mut(priority).push_back(process);
    }

    /// Pop the head of the first non empty level, HIGH -> MEDIUM -> LOW.
    pub fn dequeue_highest(&mut self) -> Option<usize> {
        Priority::ORDER
            .iter()
            .find_map(|priority| self.level_mut(*priority).pop_front())
    }

    /// Pop the head of one level only.
    pub fn dequeue(&mut self, priority: Priority) -> Option<usize> {
        self.level_mut(priority).pop_front()
    }

    pub fn len(&self) -> usize {
        self.high.len() + self.medium.len() + self.low.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, process: usize) -> bool {
        self.high.contains(&process) || self.medium.contains(&process) || self.low.contains(&process)
    }

    /// Which level a process is queued on, if any.
    pub fn position(&self, process: usize) -> Option<Priority> {
        Priority::ORDER
            .iter()
            .copied()
            .find(|priority| self.level(*priority).contains(&process))
    }

    /// Queued indices in dispatch order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.high
            .iter()
            .chain(self.medium.iter())
            .chain(self.low.iter())
            .copied()
    }
}
