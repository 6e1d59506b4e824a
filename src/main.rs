//! pong-front binary: list, record and delete games against the backend API.

use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pong_front::{
    api::HttpGameApi,
    config::AppConfig,
    controller::{DeleteOutcome, GameListController},
    dto::game::{Game, GameId, NewGame, Score},
    state::PlayerRecord,
};

#[derive(Debug, Parser)]
#[command(name = "pong-front", version, about = "Keep track of recorded ping-pong games")]
struct Cli {
    /// Backend base URL; overrides the config file and `PONG_API_BASE_URL`.
    #[arg(long, global = true)]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show every recorded game.
    List,
    /// Record a new game.
    Add {
        #[arg(long)]
        player_a: String,
        #[arg(long)]
        player_b: String,
        #[arg(long)]
        score_a: Score,
        #[arg(long)]
        score_b: Score,
    },
    /// Delete a recorded game by identifier.
    Delete { id: GameId },
    /// Summarize wins, draws and losses per player.
    Standings,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let mut config = AppConfig::load();
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }

    let api = HttpGameApi::new(config.api()).context("building game API client")?;
    let controller = GameListController::new(Arc::new(api));

    let outcome = run(&controller, cli.command).await;
    controller.shutdown();
    outcome
}

async fn run(controller: &GameListController, command: Command) -> anyhow::Result<()> {
    match command {
        Command::List => {
            controller.load().await.context("loading games")?;
            print_games(&controller.games().await);
        }
        Command::Add {
            player_a,
            player_b,
            score_a,
            score_b,
        } => {
            let new_game = NewGame::new(player_a, player_b, score_a, score_b).recorded_now();
            let game = controller
                .add_game(new_game)
                .await
                .context("adding game")?;
            println!("added {game}");
        }
        Command::Delete { id } => {
            controller.load().await.context("loading games")?;
            let Some(game) = controller.find(&id).await else {
                bail!("game `{id}` is not listed");
            };
            match controller
                .delete_game(&game)
                .await
                .context("deleting game")?
            {
                DeleteOutcome::Removed(game) => println!("deleted {game}"),
                DeleteOutcome::NotPresent => println!("deleted game {id}"),
            }
        }
        Command::Standings => {
            controller.load().await.context("loading games")?;
            print_standings(&controller.standings().await);
        }
    }

    Ok(())
}

fn print_games(games: &[Game]) {
    if games.is_empty() {
        println!("no games recorded");
        return;
    }
    for game in games {
        println!("{game}");
    }
}

fn print_standings(records: &[PlayerRecord]) {
    if records.is_empty() {
        println!("no decided games");
        return;
    }
    for record in records {
        println!(
            "{}: {}W {}D {}L ({} played)",
            record.player, record.wins, record.draws, record.losses, record.played
        );
    }
}

/// Configure tracing so logs go to stderr and stdout stays for results.
fn init_tracing() {
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
