/// Ordered game list with load bookkeeping.
pub mod game_list;
/// Per-player win/draw/loss summary over the list.
pub mod standings;

use tokio::sync::{RwLock, watch};

use crate::dto::game::Game;

pub use self::{game_list::GameList, standings::PlayerRecord};

/// Read-only view of the list handed to the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListSnapshot {
    /// Games in display order.
    pub games: Vec<Game>,
    /// Set when the latest load failed and `games` predates it.
    pub stale: bool,
    /// Mutation counter of the list this snapshot was taken from.
    pub version: u64,
}

impl From<&GameList> for ListSnapshot {
    fn from(list: &GameList) -> Self {
        Self {
            games: list.games().to_vec(),
            stale: list.is_stale(),
            version: list.version(),
        }
    }
}

/// The controller's list cell together with its change feed and shutdown flag.
pub struct ListState {
    list: RwLock<GameList>,
    updates: watch::Sender<ListSnapshot>,
    shutdown: watch::Sender<bool>,
}

impl ListState {
    /// Empty list, running.
    pub fn new() -> Self {
        let (updates, _rx) = watch::channel(ListSnapshot::default());
        let (shutdown, _rx) = watch::channel(false);
        Self {
            list: RwLock::new(GameList::default()),
            updates,
            shutdown,
        }
    }

    /// Current contents of the list.
    pub async fn snapshot(&self) -> ListSnapshot {
        let guard = self.list.read().await;
        ListSnapshot::from(&*guard)
    }

    /// Subscribe to list changes; the receiver starts at the current snapshot.
    pub fn subscribe(&self) -> watch::Receiver<ListSnapshot> {
        self.updates.subscribe()
    }

    /// Apply `mutation` to the current list and publish the result.
    ///
    /// Returns `None` without touching the list once the state has been shut down.
    pub async fn mutate<F, T>(&self, mutation: F) -> Option<T>
    where
        F: FnOnce(&mut GameList) -> T,
    {
        let mut guard = self.list.write().await;
        if self.is_shut_down() {
            return None;
        }

        let before = guard.version();
        let value = mutation(&mut *guard);
        if guard.version() != before {
            self.updates.send_replace(ListSnapshot::from(&*guard));
        }
        Some(value)
    }

    /// Whether [`ListState::shut_down`] has been called.
    pub fn is_shut_down(&self) -> bool {
        *self.shutdown.borrow()
    }

    /// Watch handle resolving once the state is shut down.
    pub fn shutdown_watcher(&self) -> watch::Receiver<bool> {
        self.shutdown.subscribe()
    }

    /// Stop accepting mutations and wake every pending shutdown watcher.
    pub fn shut_down(&self) {
        self.shutdown.send_replace(true);
    }
}

impl Default for ListState {
    fn default() -> Self {
        Self::new()
    }
}
