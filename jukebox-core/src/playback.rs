use crate::{rank, Item, ItemId, ItemStore, StoreError};

/// The "now playing" side of a room: which item is current and how the
/// pointer moves.
///
/// Transitions take `&mut` access to both this state and the store, so a
/// caller holding the room's serialization boundary applies the played-flag
/// write and the current-item write as one step.
#[derive(Debug, Default)]
pub struct Playback {
    state: PlaybackState,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Nothing is playing. Implies an empty queue, since adding to an idle
    /// room always promotes the new item.
    #[default]
    Idle,
    /// The referenced item is current. It is unplayed and excluded from the
    /// ranked queue view.
    Playing(ItemId),
}

impl Playback {
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn current_id(&self) -> Option<ItemId> {
        match self.state {
            PlaybackState::Idle => None,
            PlaybackState::Playing(id) => Some(id),
        }
    }

    /// Looks up the current item in the store.
    pub fn current_item(&self, store: &ItemStore) -> Option<Item> {
        self.current_id().and_then(|id| store.get(id).cloned())
    }

    /// Promotes a just-added item to current if nothing is playing.
    ///
    /// This bypasses ranking on purpose: the first item added to an idle
    /// room starts playing no matter how later votes would order it.
    pub fn play_if_idle(&mut self, item: &Item) -> bool {
        match self.state {
            PlaybackState::Idle => {
                self.state = PlaybackState::Playing(item.id);
                true
            }
            PlaybackState::Playing(_) => false,
        }
    }

    /// Marks the current item played and promotes the head of the ranked
    /// queue, if any. Advancing while idle changes nothing.
    pub fn advance(&mut self, store: &mut ItemStore) -> Result<Option<Item>, StoreError> {
        if let PlaybackState::Playing(current) = self.state {
            store.mark_played(current)?;
        }

        let next = rank(store.unplayed()).into_iter().next();

        self.state = match &next {
            Some(item) => PlaybackState::Playing(item.id),
            None => PlaybackState::Idle,
        };

        Ok(next)
    }

    /// The ranked queue as members see it: unplayed items minus the current
    /// one.
    pub fn queue(&self, store: &ItemStore) -> Vec<Item> {
        let current = self.current_id();

        let upcoming = store
            .unplayed()
            .into_iter()
            .filter(|i| Some(i.id) != current)
            .collect();

        rank(upcoming)
    }
}

#[cfg(test)]
mod test {
    use super::{Playback, PlaybackState};
    use crate::{ItemStore, NewItem, VoteDirection};

    #[test]
    fn first_add_becomes_current_immediately() {
        let mut store = ItemStore::default();
        let mut playback = Playback::default();

        let first = store.create(NewItem::mock("strawberries"));
        assert!(playback.play_if_idle(&first));
        assert_eq!(playback.current_id(), Some(first.id));
        assert!(playback.queue(&store).is_empty());

        // Later adds never touch the current item.
        let second = store.create(NewItem::mock("bananas"));
        assert!(!playback.play_if_idle(&second));
        assert_eq!(playback.current_id(), Some(first.id));
        assert_eq!(playback.queue(&store).len(), 1);
    }

    #[test]
    fn advance_walks_the_ranked_queue() {
        let mut store = ItemStore::default();
        let mut playback = Playback::default();

        let a = store.create(NewItem::mock("a"));
        playback.play_if_idle(&a);

        let b = store.create(NewItem::mock("b"));
        playback.play_if_idle(&b);

        store.apply_vote(b.id, VoteDirection::Up).unwrap();

        let next = playback.advance(&mut store).unwrap().unwrap();
        assert_eq!(next.id, b.id);
        assert!(store.get(a.id).unwrap().played);
        assert!(playback.queue(&store).is_empty());

        let after = playback.advance(&mut store).unwrap();
        assert!(after.is_none());
        assert_eq!(playback.state(), PlaybackState::Idle);
    }

    #[test]
    fn advance_while_idle_is_a_no_op() {
        let mut store = ItemStore::default();
        let mut playback = Playback::default();

        assert!(playback.advance(&mut store).unwrap().is_none());
        assert_eq!(playback.state(), PlaybackState::Idle);

        // Twice in a row stays fine, it is not an error.
        assert!(playback.advance(&mut store).unwrap().is_none());
    }

    #[test]
    fn queue_never_contains_played_or_current_items() {
        let mut store = ItemStore::default();
        let mut playback = Playback::default();

        let a = store.create(NewItem::mock("a"));
        playback.play_if_idle(&a);
        let b = store.create(NewItem::mock("b"));
        playback.play_if_idle(&b);
        let c = store.create(NewItem::mock("c"));
        playback.play_if_idle(&c);

        playback.advance(&mut store).unwrap();

        let queue = playback.queue(&store);
        let current = playback.current_id().unwrap();

        assert!(queue.iter().all(|i| !i.played));
        assert!(queue.iter().all(|i| i.id != current));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn higher_voted_items_advance_first() {
        let mut store = ItemStore::default();
        let mut playback = Playback::default();

        let a = store.create(NewItem::mock("a"));
        playback.play_if_idle(&a);
        let b = store.create(NewItem::mock("b"));
        let c = store.create(NewItem::mock("c"));

        store.apply_vote(c.id, VoteDirection::Up).unwrap();
        store.apply_vote(c.id, VoteDirection::Up).unwrap();
        store.apply_vote(b.id, VoteDirection::Up).unwrap();

        let next = playback.advance(&mut store).unwrap().unwrap();
        assert_eq!(next.id, c.id);

        let next = playback.advance(&mut store).unwrap().unwrap();
        assert_eq!(next.id, b.id);
    }
}
