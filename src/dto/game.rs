use std::{convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::dto::{format_unix_timestamp, unix_seconds};

/// Server-assigned identifier of a game; opaque to the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GameId {
    /// Integer primary key (what the SQL-backed API hands out).
    Number(i64),
    /// Any other identifier representation.
    Text(String),
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameId::Number(id) => write!(f, "{id}"),
            GameId::Text(id) => f.write_str(id),
        }
    }
}

impl FromStr for GameId {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(value
            .parse::<i64>()
            .map(GameId::Number)
            .unwrap_or_else(|_| GameId::Text(value.to_string())))
    }
}

/// Score as submitted by the form: usually points, but free text is accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Score {
    /// Numeric score.
    Points(i64),
    /// Unparsed score text, passed through to the server as-is.
    Text(String),
    /// No score stored (`null` or absent on the wire).
    #[default]
    Missing,
}

impl Score {
    /// Numeric value of the score, reading numeric text as well.
    pub fn points(&self) -> Option<i64> {
        match self {
            Score::Points(points) => Some(*points),
            Score::Text(text) => text.trim().parse().ok(),
            Score::Missing => None,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Points(points) => write!(f, "{points}"),
            Score::Text(text) => f.write_str(text),
            Score::Missing => Ok(()),
        }
    }
}

impl FromStr for Score {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(value
            .trim()
            .parse::<i64>()
            .map(Score::Points)
            .unwrap_or_else(|_| Score::Text(value.to_string())))
    }
}

impl From<i64> for Score {
    fn from(value: i64) -> Self {
        Score::Points(value)
    }
}

impl From<&str> for Score {
    fn from(value: &str) -> Self {
        match value.parse() {
            Ok(score) => score,
            Err(never) => match never {},
        }
    }
}

/// One recorded match result as returned by the backend.
///
/// The backend stores whatever the form posted, so every descriptive field
/// may come back `null`; such records still decode and render blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    /// Server-assigned identifier.
    pub id: GameId,
    /// First player, if the server stored one.
    #[serde(default)]
    pub player_a: Option<String>,
    /// Second player, if the server stored one.
    #[serde(default)]
    pub player_b: Option<String>,
    /// First player's score.
    #[serde(default)]
    pub score_a: Score,
    /// Second player's score.
    #[serde(default)]
    pub score_b: Score,
    /// Unix seconds at which the match was recorded, when the server knows it.
    #[serde(
        default,
        deserialize_with = "unix_seconds::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<i64>,
    /// Soft-delete marker set by the backend's admin tooling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
}

impl Game {
    /// Human readable recording time, if any.
    pub fn recorded_at(&self) -> Option<String> {
        self.timestamp.map(format_unix_timestamp)
    }

    /// Whether the backend flagged this record as deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted == Some(true)
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} - {} {}",
            self.id,
            self.player_a.as_deref().unwrap_or_default(),
            self.score_a,
            self.score_b,
            self.player_b.as_deref().unwrap_or_default()
        )?;
        if let Some(recorded_at) = self.recorded_at() {
            write!(f, " ({recorded_at})")?;
        }
        if self.is_deleted() {
            f.write_str(" [deleted]")?;
        }
        Ok(())
    }
}

/// Creation payload: a game the server has not assigned an identifier to yet.
///
/// Fields are forwarded without client-side validation; the backend decides
/// what it accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGame {
    /// First player.
    pub player_a: String,
    /// Second player.
    pub player_b: String,
    /// First player's score.
    pub score_a: Score,
    /// Second player's score.
    pub score_b: Score,
    /// Recording time in unix seconds, sent only when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl NewGame {
    /// Build a creation payload without a recording time.
    pub fn new(
        player_a: impl Into<String>,
        player_b: impl Into<String>,
        score_a: impl Into<Score>,
        score_b: impl Into<Score>,
    ) -> Self {
        Self {
            player_a: player_a.into(),
            player_b: player_b.into(),
            score_a: score_a.into(),
            score_b: score_b.into(),
            timestamp: None,
        }
    }

    /// Stamp the payload with the current wall-clock time.
    pub fn recorded_now(mut self) -> Self {
        self.timestamp = Some(OffsetDateTime::now_utc().unix_timestamp());
        self
    }
}

/// Collection envelope returned by `GET /api/game`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameCollection {
    /// Records in server order.
    pub objects: Vec<Game>,
    /// Total number of records on the server, when the envelope reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_results: Option<usize>,
}

impl GameCollection {
    /// Whether the server holds more records than this envelope carries.
    pub fn is_truncated(&self) -> bool {
        self.num_results
            .is_some_and(|total| total > self.objects.len())
    }
}
