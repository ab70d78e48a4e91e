//! Request fencing for one response channel.

/// Monotonic request token for one channel.
///
/// Every request is tagged with the token current when it was issued. A
/// response is applied only if no newer request was issued (and the channel
/// was not invalidated) in the meantime.
#[derive(Debug, Default, Clone)]
pub struct RequestFence {
    current: u64,
}

impl RequestFence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding any in flight.
    pub fn issue(&mut self) -> u64 {
        self.current += 1;
        self.current
    }

    pub fn is_current(&self, token: u64) -> bool {
        token != 0 && token == self.current
    }

    /// Drop interest in whatever is in flight.
    pub fn invalidate(&mut self) {
        self.current += 1;
    }

    pub fn current(&self) -> u64 {
        self.current
    }
}
