use std::{cmp::Ordering, collections::HashMap};

use crate::dto::game::Game;

/// Win/draw/loss tally of one player across the listed games.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerRecord {
    /// Player name with whitespace removed, as used to group games.
    pub player: String,
    /// Games counted for this player.
    pub played: u32,
    /// Games won.
    pub wins: u32,
    /// Games drawn.
    pub draws: u32,
    /// Games lost.
    pub losses: u32,
}

/// Tally every countable game into per-player records.
///
/// A game counts when it is not soft-deleted, names two distinct players and
/// carries numeric scores on both sides. Records are ordered by wins, then
/// fewest losses, then name.
pub fn standings(games: &[Game]) -> Vec<PlayerRecord> {
    let mut records: HashMap<String, PlayerRecord> = HashMap::new();

    for game in games.iter().filter(|game| !game.is_deleted()) {
        let (Some(player_a), Some(player_b)) = (
            game.player_a.as_deref().and_then(normalize_name),
            game.player_b.as_deref().and_then(normalize_name),
        ) else {
            continue;
        };
        let (Some(score_a), Some(score_b)) = (game.score_a.points(), game.score_b.points()) else {
            continue;
        };
        if player_a == player_b {
            continue;
        }

        let outcome = score_a.cmp(&score_b);
        tally(&mut records, player_a, outcome);
        tally(&mut records, player_b, outcome.reverse());
    }

    let mut table = records.into_values().collect::<Vec<_>>();
    table.sort_by(|left, right| {
        right
            .wins
            .cmp(&left.wins)
            .then(left.losses.cmp(&right.losses))
            .then_with(|| left.player.cmp(&right.player))
    });
    table
}

fn tally(records: &mut HashMap<String, PlayerRecord>, player: String, outcome: Ordering) {
    let record = records
        .entry(player)
        .or_insert_with_key(|name| PlayerRecord {
            player: name.clone(),
            ..PlayerRecord::default()
        });
    record.played += 1;
    match outcome {
        Ordering::Greater => record.wins += 1,
        Ordering::Equal => record.draws += 1,
        Ordering::Less => record.losses += 1,
    }
}

fn normalize_name(name: &str) -> Option<String> {
    let name = name.split_whitespace().collect::<String>();
    (!name.is_empty()).then_some(name)
}
