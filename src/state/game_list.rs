use crate::dto::game::{Game, GameId};

/// Ordered local cache of the games displayed to the user.
///
/// Order is the server's on load and append order afterwards. Every
/// mutation bumps `version` so observers can tell snapshots apart. Loads are
/// numbered by the caller; once a load has settled, older ones are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameList {
    games: Vec<Game>,
    stale: bool,
    version: u64,
    settled_load: u64,
}

impl GameList {
    /// Games in display order.
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    /// Whether the most recent load failed and the list predates it.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Mutation counter, starting at zero.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Replace the whole list with the collection fetched by load `generation`.
    ///
    /// Returns `false`, leaving the list alone, when a newer load already settled.
    pub fn apply_load(&mut self, generation: u64, games: Vec<Game>) -> bool {
        if !self.settle(generation) {
            return false;
        }
        self.games = games;
        self.stale = false;
        self.bump();
        true
    }

    /// Flag the list as out of date after load `generation` failed; contents are kept.
    ///
    /// Returns `false` when a newer load already settled.
    pub fn apply_load_failure(&mut self, generation: u64) -> bool {
        if !self.settle(generation) {
            return false;
        }
        if !self.stale {
            self.stale = true;
            self.bump();
        }
        true
    }

    /// Append a game confirmed by the server.
    ///
    /// A record carrying an identifier already held locally replaces the
    /// older copy in place so identifiers stay unique.
    pub fn append(&mut self, game: Game) {
        match self.games.iter_mut().find(|existing| existing.id == game.id) {
            Some(existing) => *existing = game,
            None => self.games.push(game),
        }
        self.bump();
    }

    /// Remove the game with `id`, returning it when it was present.
    pub fn remove(&mut self, id: &GameId) -> Option<Game> {
        let index = self.games.iter().position(|game| &game.id == id)?;
        let removed = self.games.remove(index);
        self.bump();
        Some(removed)
    }

    fn settle(&mut self, generation: u64) -> bool {
        if generation <= self.settled_load {
            return false;
        }
        self.settled_load = generation;
        true
    }

    fn bump(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}
