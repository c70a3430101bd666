/// Monotonic request counter. A reply is applied only if no newer request
/// was issued after the one it answers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RequestGeneration {
    current: u64,
}

impl RequestGeneration {
    /// Start a new request and return its ticket; older tickets go stale.
    pub fn advance(&mut self) -> u64 {
        self.current += 1;
        self.current
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        ticket == self.current
    }

    pub fn current(&self) -> u64 {
        self.current
    }
}
