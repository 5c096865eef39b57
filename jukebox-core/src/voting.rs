use serde::Deserialize;

use crate::{ItemId, ItemStore, StoreError};

/// Direction of a member's vote on an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    pub fn delta(&self) -> i32 {
        match self {
            VoteDirection::Up => 1,
            VoteDirection::Down => -1,
        }
    }
}

impl ItemStore {
    /// Applies a vote to an item and returns the new score.
    ///
    /// Scores are unbounded in both directions. Callers run this under the
    /// room's serialization boundary, which is what keeps two concurrent
    /// votes from clobbering each other.
    pub fn apply_vote(
        &mut self,
        item_id: ItemId,
        direction: VoteDirection,
    ) -> Result<i32, StoreError> {
        let item = self.get_mut(item_id)?;
        item.votes += direction.delta();

        Ok(item.votes)
    }
}
