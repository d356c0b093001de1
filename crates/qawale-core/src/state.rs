/// Register and run flag for a single run. Built fresh by every call to
/// [`crate::FrequencyLoop::run`] and dropped when it returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessState {
    memory: i64,
    running: bool,
}

impl ProcessState {
    pub fn new() -> Self {
        Self {
            memory: 0,
            running: true,
        }
    }

    pub fn memory(&self) -> i64 {
        self.memory
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub(crate) fn add(&mut self, amount: i64) -> i64 {
        self.memory = self.memory.wrapping_add(amount);
        self.memory
    }

    pub(crate) fn subtract(&mut self, amount: i64) -> i64 {
        self.memory = self.memory.wrapping_sub(amount);
        self.memory
    }

    pub(crate) fn stop(&mut self) {
        self.running = false;
    }
}

impl Default for ProcessState {
    fn default() -> Self {
        Self::new()
    }
}
