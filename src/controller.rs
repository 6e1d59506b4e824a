//! List controller keeping the local game list in step with the remote collection.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    api::GameApi,
    dto::game::{Game, GameId, NewGame},
    error::ControllerError,
    state::{ListSnapshot, ListState, PlayerRecord, standings},
};

/// Result of a confirmed deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The game was present locally and has been removed.
    Removed(Game),
    /// The server confirmed the deletion but the game was no longer listed.
    NotPresent,
}

/// Owns the displayed game list and reconciles it with the game API.
///
/// Operations take `&self` so several can be in flight at once; each one
/// applies its change to the list as it stands when its response arrives.
pub struct GameListController {
    api: Arc<dyn GameApi>,
    state: ListState,
    load_generation: AtomicU64,
}

impl GameListController {
    /// Create a controller with an empty list backed by `api`.
    pub fn new(api: Arc<dyn GameApi>) -> Self {
        Self {
            api,
            state: ListState::new(),
            load_generation: AtomicU64::new(0),
        }
    }

    /// Games currently displayed, in order.
    pub async fn games(&self) -> Vec<Game> {
        self.state.snapshot().await.games
    }

    /// Current list together with its staleness flag and version.
    pub async fn snapshot(&self) -> ListSnapshot {
        self.state.snapshot().await
    }

    /// Look up a displayed game by identifier.
    pub async fn find(&self, id: &GameId) -> Option<Game> {
        self.state
            .snapshot()
            .await
            .games
            .into_iter()
            .find(|game| &game.id == id)
    }

    /// Per-player win/draw/loss records over the displayed games.
    pub async fn standings(&self) -> Vec<PlayerRecord> {
        standings::standings(&self.state.snapshot().await.games)
    }

    /// Subscribe to every change of the displayed list.
    pub fn subscribe(&self) -> watch::Receiver<ListSnapshot> {
        self.state.subscribe()
    }

    /// Replace the list with the server's collection, returning the number of games.
    ///
    /// On failure the previous list is kept and flagged stale. A load that
    /// settles after a newer one has settled leaves the list alone. Shutting
    /// the controller down while the request is in flight abandons it.
    pub async fn load(&self) -> Result<usize, ControllerError> {
        self.ensure_running()?;

        let generation = self.load_generation.fetch_add(1, Ordering::Relaxed) + 1;
        let mut shutdown = self.state.shutdown_watcher();
        let outcome = tokio::select! {
            result = self.api.list_games() => result,
            _ = shutdown.wait_for(|down| *down) => {
                debug!(generation, "game list load abandoned on shutdown");
                return Err(ControllerError::ShutDown);
            }
        };

        match outcome {
            Ok(games) => {
                let count = games.len();
                let applied = self
                    .state
                    .mutate(|list| list.apply_load(generation, games))
                    .await
                    .ok_or(ControllerError::ShutDown)?;
                if applied {
                    info!(count, "game list loaded");
                } else {
                    debug!(generation, "newer load already settled; response discarded");
                }
                Ok(count)
            }
            Err(err) => {
                let applied = self
                    .state
                    .mutate(|list| list.apply_load_failure(generation))
                    .await;
                if applied == Some(true) {
                    warn!(error = %err, "failed to load games; keeping previous list as stale");
                } else {
                    warn!(error = %err, generation, "superseded load failed");
                }
                Err(err.into())
            }
        }
    }

    /// Create a game on the server and append the stored record to the list.
    ///
    /// The list is left untouched when the request fails.
    pub async fn add_game(&self, new_game: NewGame) -> Result<Game, ControllerError> {
        self.ensure_running()?;

        let game = self.api.create_game(new_game).await.map_err(|err| {
            warn!(error = %err, "failed to add game");
            ControllerError::from(err)
        })?;

        self.state
            .mutate(|list| list.append(game.clone()))
            .await
            .ok_or(ControllerError::ShutDown)?;
        info!(id = %game.id, "game added");
        Ok(game)
    }

    /// Delete `game` on the server, then drop it from the list.
    ///
    /// Removal is by identifier against the list as it stands once the server
    /// confirms; a game that is no longer listed yields
    /// [`DeleteOutcome::NotPresent`]. The list is left untouched when the
    /// request fails.
    pub async fn delete_game(&self, game: &Game) -> Result<DeleteOutcome, ControllerError> {
        self.ensure_running()?;

        let id = game.id.clone();
        self.api.delete_game(id.clone()).await.map_err(|err| {
            warn!(%id, error = %err, "failed to delete game");
            ControllerError::from(err)
        })?;

        let removed = self
            .state
            .mutate(|list| list.remove(&id))
            .await
            .ok_or(ControllerError::ShutDown)?;

        match removed {
            Some(game) => {
                info!(%id, "game deleted");
                Ok(DeleteOutcome::Removed(game))
            }
            None => {
                debug!(%id, "deleted game was not in the local list");
                Ok(DeleteOutcome::NotPresent)
            }
        }
    }

    /// Tear the controller down: pending loads are abandoned and no later
    /// response mutates the list.
    ///
    /// Creations and deletions already sent may still be applied by the server.
    pub fn shutdown(&self) {
        self.state.shut_down();
        debug!("game list controller shut down");
    }

    fn ensure_running(&self) -> Result<(), ControllerError> {
        if self.state.is_shut_down() {
            Err(ControllerError::ShutDown)
        } else {
            Ok(())
        }
    }
}
