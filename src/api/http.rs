use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::dto::game::{Game, GameCollection, GameId, NewGame};

use super::{
    GameApi,
    config::ApiConfig,
    error::{ApiError, ApiResult},
};

/// [`GameApi`] implementation speaking JSON over HTTP with `reqwest`.
#[derive(Clone)]
pub struct HttpGameApi {
    client: Client,
    collection: Arc<Url>,
}

impl HttpGameApi {
    /// Build a client for the collection endpoint described by `config`.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|source| ApiError::ClientBuilder { source })?;

        let url = config.collection_url();
        let collection = Url::parse(&url)
            .ok()
            .filter(|parsed| !parsed.cannot_be_a_base())
            .ok_or(ApiError::InvalidUrl { url })?;

        Ok(Self {
            client,
            collection: Arc::new(collection),
        })
    }

    fn game_url(&self, id: &GameId) -> ApiResult<Url> {
        let mut url = Url::clone(&self.collection);
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl {
                url: self.collection.to_string(),
            })?
            .pop_if_empty()
            .push(&id.to_string());
        Ok(url)
    }

    async fn send(
        &self,
        builder: reqwest::RequestBuilder,
        path: &str,
    ) -> ApiResult<reqwest::Response> {
        let response = builder
            .send()
            .await
            .map_err(|source| ApiError::RequestSend {
                path: path.to_string(),
                source,
            })?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(ApiError::RequestStatus {
                path: path.to_string(),
                status,
            })
        }
    }

    async fn decode<T>(response: reqwest::Response, path: &str) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        response
            .json::<T>()
            .await
            .map_err(|source| ApiError::DecodeResponse {
                path: path.to_string(),
                source,
            })
    }

    async fn fetch_collection(&self) -> ApiResult<GameCollection> {
        let url = Url::clone(&self.collection);
        let path = url.path().to_string();
        debug!(%path, "fetching game collection");

        let builder = self.client.request(Method::GET, url);
        let response = self.send(builder, &path).await?;
        Self::decode(response, &path).await
    }

    async fn post_game(&self, game: &NewGame) -> ApiResult<Game> {
        let url = Url::clone(&self.collection);
        let path = url.path().to_string();
        debug!(%path, player_a = %game.player_a, player_b = %game.player_b, "creating game");

        let builder = self.client.request(Method::POST, url).json(game);
        let response = self.send(builder, &path).await?;
        Self::decode(response, &path).await
    }

    async fn send_delete(&self, id: &GameId) -> ApiResult<()> {
        let url = self.game_url(id)?;
        let path = url.path().to_string();
        debug!(%path, "deleting game");

        let builder = self.client.request(Method::DELETE, url);
        // Confirmation is the status alone; an echoed record is ignored.
        self.send(builder, &path).await.map(|_| ())
    }
}

impl GameApi for HttpGameApi {
    fn list_games(&self) -> BoxFuture<'static, ApiResult<Vec<Game>>> {
        let api = self.clone();
        Box::pin(async move {
            let collection = api.fetch_collection().await?;
            if collection.is_truncated() {
                warn!(
                    returned = collection.objects.len(),
                    total = ?collection.num_results,
                    "server paginated the collection; only the first page is listed"
                );
            }
            Ok(collection.objects)
        })
    }

    fn create_game(&self, game: NewGame) -> BoxFuture<'static, ApiResult<Game>> {
        let api = self.clone();
        Box::pin(async move { api.post_game(&game).await })
    }

    fn delete_game(&self, id: GameId) -> BoxFuture<'static, ApiResult<()>> {
        let api = self.clone();
        Box::pin(async move { api.send_delete(&id).await })
    }
}

#[cfg(test)]
mod tests {
    use std::{net::SocketAddr, time::Duration};

    use axum::{
        Json, Router,
        extract::{Path, State},
        http::StatusCode,
        routing::{delete, get},
    };
    use serde_json::{Value, json};
    use tokio::{net::TcpListener, sync::Mutex};

    use super::*;
    use crate::dto::game::Score;

    #[derive(Clone, Default)]
    struct StubBackend {
        games: Arc<Mutex<Vec<Game>>>,
        next_id: Arc<Mutex<i64>>,
    }

    async fn list(State(backend): State<StubBackend>) -> Json<Value> {
        let games = backend.games.lock().await.clone();
        Json(json!({
            "num_results": games.len(),
            "objects": games,
            "page": 1,
            "total_pages": 1,
        }))
    }

    async fn create(
        State(backend): State<StubBackend>,
        Json(payload): Json<NewGame>,
    ) -> (StatusCode, Json<Game>) {
        let id = {
            let mut next = backend.next_id.lock().await;
            *next += 1;
            *next
        };
        let game = Game {
            id: GameId::Number(id),
            player_a: Some(payload.player_a),
            player_b: Some(payload.player_b),
            score_a: payload.score_a,
            score_b: payload.score_b,
            timestamp: payload.timestamp,
            deleted: None,
        };
        backend.games.lock().await.push(game.clone());
        (StatusCode::CREATED, Json(game))
    }

    async fn remove(State(backend): State<StubBackend>, Path(id): Path<i64>) -> StatusCode {
        let mut games = backend.games.lock().await;
        match games.iter().position(|game| game.id == GameId::Number(id)) {
            Some(index) => {
                games.remove(index);
                StatusCode::NO_CONTENT
            }
            None => StatusCode::NOT_FOUND,
        }
    }

    async fn serve(router: Router) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }

    async fn stub_api() -> HttpGameApi {
        let router = Router::new()
            .route("/api/game", get(list).post(create))
            .route("/api/game/{id}", delete(remove))
            .with_state(StubBackend::default());
        let addr = serve(router).await;
        HttpGameApi::new(&ApiConfig::new(format!("http://{addr}"))).unwrap()
    }

    #[tokio::test]
    async fn create_list_and_delete_round_trip_through_the_backend() {
        let api = stub_api().await;

        assert!(api.list_games().await.unwrap().is_empty());

        let first = api
            .create_game(NewGame::new("ann", "bob", 21, 18))
            .await
            .unwrap();
        let second = api
            .create_game(NewGame::new("cat", "dan", "test", "test"))
            .await
            .unwrap();
        assert_eq!(first.id, GameId::Number(1));
        assert_eq!(second.score_a, Score::Text("test".into()));

        let listed = api.list_games().await.unwrap();
        assert_eq!(listed, vec![first.clone(), second.clone()]);

        api.delete_game(first.id.clone()).await.unwrap();
        assert_eq!(api.list_games().await.unwrap(), vec![second]);
    }

    #[tokio::test]
    async fn missing_record_surfaces_the_status() {
        let api = stub_api().await;

        let err = api.delete_game(GameId::Number(99)).await.unwrap_err();
        match err {
            ApiError::RequestStatus { path, status } => {
                assert_eq!(path, "/api/game/99");
                assert_eq!(status, StatusCode::NOT_FOUND);
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn server_error_is_reported_as_status() {
        let router = Router::new().route(
            "/api/game",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let addr = serve(router).await;
        let api = HttpGameApi::new(&ApiConfig::new(format!("http://{addr}"))).unwrap();

        let err = api.list_games().await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::RequestStatus { status, .. } if status == StatusCode::INTERNAL_SERVER_ERROR
        ));
    }

    #[tokio::test]
    async fn malformed_envelope_is_a_decode_error() {
        let router = Router::new().route(
            "/api/game",
            get(|| async { Json(json!({"games": []})) }),
        );
        let addr = serve(router).await;
        let api = HttpGameApi::new(&ApiConfig::new(format!("http://{addr}"))).unwrap();

        let err = api.list_games().await.unwrap_err();
        assert!(matches!(err, ApiError::DecodeResponse { .. }));
    }

    #[tokio::test]
    async fn form_recorded_rows_decode() {
        let router = Router::new().route(
            "/api/game",
            get(|| async {
                Json(json!({
                    "num_results": 2,
                    "objects": [
                        {"id": 1, "player_a": "ann", "player_b": "bob", "score_a": 21, "score_b": 8,
                         "timestamp": 1500000000.123, "deleted": false},
                        {"id": 2, "player_a": "cat", "player_b": null, "score_a": null, "score_b": 3,
                         "timestamp": null, "deleted": null}
                    ]
                }))
            }),
        );
        let addr = serve(router).await;
        let api = HttpGameApi::new(&ApiConfig::new(format!("http://{addr}"))).unwrap();

        let games = api.list_games().await.unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].timestamp, Some(1_500_000_000));
        assert_eq!(games[1].player_b, None);
        assert_eq!(games[1].score_a, Score::Missing);
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_send_error() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };
        let config =
            ApiConfig::new(format!("http://{addr}")).with_timeout(Duration::from_secs(2));
        let api = HttpGameApi::new(&config).unwrap();

        let err = api.list_games().await.unwrap_err();
        assert!(matches!(err, ApiError::RequestSend { .. }));
    }

    #[test]
    fn text_identifiers_are_escaped_into_one_segment() {
        let api = HttpGameApi::new(&ApiConfig::new("http://localhost:5000")).unwrap();
        let url = api.game_url(&GameId::Text("a/b c".into())).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/game/a%2Fb%20c");
    }

    #[test]
    fn rejects_unusable_base_urls() {
        let err = HttpGameApi::new(&ApiConfig::new("not a url")).err().unwrap();
        assert!(matches!(err, ApiError::InvalidUrl { .. }));
    }
}
