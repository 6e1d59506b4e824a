//! HTTP collaborator consumed by the list controller.

mod config;
pub mod error;
mod http;

use futures::future::BoxFuture;

use crate::dto::game::{Game, GameId, NewGame};

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use http::HttpGameApi;

/// Abstraction over the remote game collection.
pub trait GameApi: Send + Sync {
    /// Fetch the full collection, in server order.
    fn list_games(&self) -> BoxFuture<'static, ApiResult<Vec<Game>>>;
    /// Create a game and return the stored record with its identifier.
    fn create_game(&self, game: NewGame) -> BoxFuture<'static, ApiResult<Game>>;
    /// Delete the game addressed by `id`.
    fn delete_game(&self, id: GameId) -> BoxFuture<'static, ApiResult<()>>;
}
