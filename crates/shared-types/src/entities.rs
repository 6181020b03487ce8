//! # Core Entities
//!
//! Block-scoped context and primitive aliases.

use serde::{Deserialize, Serialize};

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// Bech32 account address of a profile owner on the host chain.
pub type OwnerId = String;

/// Separator used between segments of persisted keys.
pub const KEY_SEPARATOR: char = '/';

/// Context of the block currently being executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BlockContext {
    /// Block height.
    pub height: u64,
    /// Block time (consensus time, not wall clock).
    pub time: Timestamp,
}

impl BlockContext {
    /// Create a new block context.
    pub fn new(height: u64, time: Timestamp) -> Self {
        Self { height, time }
    }

    /// Context for the following block, `elapsed` seconds later.
    pub fn advance(&self, elapsed: u64) -> Self {
        Self {
            height: self.height + 1,
            time: self.time.saturating_add(elapsed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_moves_height_and_time() {
        let ctx = BlockContext::new(10, 1_000);
        let next = ctx.advance(6);
        assert_eq!(next.height, 11);
        assert_eq!(next.time, 1_006);
    }

    #[test]
    fn test_advance_saturates() {
        let ctx = BlockContext::new(1, u64::MAX - 1);
        assert_eq!(ctx.advance(10).time, u64::MAX);
    }
}
