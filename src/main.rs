//! Demo binary: an interactive stdin scorer driving one match end to end
//! with synthetic rosters, the in-memory store, and the live score feed.

use std::{env, sync::Arc};

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pitchside_scoring::{
    config::ScoringConfig,
    dao::match_store::{MatchStore, memory::InMemoryMatchStore},
    dto::score::ScorecardView,
    dto::setup::{NewMatchRequest, TeamSetupInput},
    engine::{
        CreaseEnd, DismissalKind, ExtraKind, PendingSelection, ScoringEvent, WicketCall,
        roster::EmptyRoster,
    },
    services::{match_service, scoring_service, storage_supervisor},
    state::{AppState, SharedState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ScoringConfig::load();
    let state = AppState::new(config);

    // The in-memory store stands in for the application's database; a real
    // backend plugs into the same supervisor loop.
    tokio::spawn(storage_supervisor::run(state.clone(), || async {
        Ok(Arc::new(InMemoryMatchStore::new()) as Arc<dyn MatchStore>)
    }));

    let mut args = env::args().skip(1);
    let team_one = args.next().unwrap_or_else(|| "Harbour Kings".into());
    let team_two = args.next().unwrap_or_else(|| "Mill Road XI".into());

    let request = NewMatchRequest {
        teams: vec![
            TeamSetupInput {
                name: team_one,
                players: Vec::new(),
                bowlers: Vec::new(),
            },
            TeamSetupInput {
                name: team_two,
                players: Vec::new(),
                bowlers: Vec::new(),
            },
        ],
        total_overs: None,
        batting_first: None,
        openers: None,
    };
    let summary = match_service::create_match(&state, request, &EmptyRoster)
        .await
        .context("creating demo match")?;
    info!(match_id = %summary.id, "demo match created");

    println!(
        "{} v {} ({} overs a side). Type `help` for commands.",
        summary.teams[0], summary.teams[1], summary.total_overs
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let command = match parse_command(line) {
            Some(command) => command,
            None => {
                println!("unrecognised command `{line}`; type `help`");
                continue;
            }
        };

        match command {
            Command::Help => print_help(),
            Command::Quit => break,
            Command::Card => match scoring_service::scorecard(&state, summary.id).await {
                Ok(card) => print_scorecard(&card),
                Err(err) => println!("error: {err}"),
            },
            Command::Score => match scoring_service::score(&state, summary.id).await {
                Ok(payload) => {
                    println!(
                        "{} {}/{} ({})  |  {} {}/{} ({})",
                        summary.teams[0],
                        payload.team1_score.runs,
                        payload.team1_score.wickets,
                        payload.team1_score.overs,
                        summary.teams[1],
                        payload.team2_score.runs,
                        payload.team2_score.wickets,
                        payload.team2_score.overs,
                    );
                }
                Err(err) => println!("error: {err}"),
            },
            Command::Event(event) => {
                match scoring_service::apply_event(&state, summary.id, event).await {
                    Ok(outcome) => {
                        if let Some(last) = &outcome.payload.match_data.last_ball {
                            println!("{last}");
                        }
                        print_gate(&outcome.pending);
                        if outcome.completed {
                            if let Some(result) = &outcome.result {
                                println!("=== {result} ===");
                            }
                            if let Ok(card) =
                                scoring_service::scorecard(&state, summary.id).await
                            {
                                print_scorecard(&card);
                            }
                            break;
                        }
                    }
                    Err(err) => println!("rejected: {err}"),
                }
            }
        }
    }

    shutdown(&state).await;
    Ok(())
}

enum Command {
    Event(ScoringEvent),
    Card,
    Score,
    Help,
    Quit,
}

/// Parse one scorer command. Names may contain spaces; multi-name
/// commands separate them with commas.
fn parse_command(line: &str) -> Option<Command> {
    let (word, rest) = match line.split_once(' ') {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "help" => Some(Command::Help),
        "quit" | "exit" => Some(Command::Quit),
        "card" | "scorecard" => Some(Command::Card),
        "score" => Some(Command::Score),
        "0" | "1" | "2" | "3" | "4" | "6" if rest.is_empty() => {
            Some(Command::Event(ScoringEvent::Runs(word.parse().ok()?)))
        }
        "run" | "runs" => Some(Command::Event(ScoringEvent::Runs(rest.parse().ok()?))),
        "wide" => extra(ExtraKind::Wide, rest, 1),
        "noball" | "no-ball" => extra(ExtraKind::NoBall, rest, 1),
        "bye" => extra(ExtraKind::Bye, rest, 1),
        "legbye" | "leg-bye" => extra(ExtraKind::LegBye, rest, 1),
        "wicket" | "out" => parse_wicket(rest),
        "batter" if !rest.is_empty() => {
            Some(Command::Event(ScoringEvent::NextBatter(rest.to_string())))
        }
        "bowler" if !rest.is_empty() => {
            Some(Command::Event(ScoringEvent::NextBowler(rest.to_string())))
        }
        "innings" => {
            let mut names = rest.split(',').map(str::trim);
            let striker = names.next()?.to_string();
            let non_striker = names.next()?.to_string();
            let opening_bowler = names.next()?.to_string();
            Some(Command::Event(ScoringEvent::SecondInnings {
                striker,
                non_striker,
                opening_bowler,
            }))
        }
        _ => None,
    }
}

fn extra(kind: ExtraKind, rest: &str, default_runs: u16) -> Option<Command> {
    let runs = if rest.is_empty() {
        default_runs
    } else {
        rest.parse().ok()?
    };
    Some(Command::Event(ScoringEvent::Extra { kind, runs }))
}

/// `wicket <kind> [runs N] [nonstriker] [fielder ...]`
fn parse_wicket(rest: &str) -> Option<Command> {
    let mut tokens = rest.split_whitespace();
    let kind = match tokens.next()?.to_ascii_lowercase().as_str() {
        "bowled" => DismissalKind::Bowled,
        "caught" => DismissalKind::Caught,
        "runout" | "run-out" => DismissalKind::RunOut,
        "hitwicket" | "hit-wicket" => DismissalKind::HitWicket,
        "stumped" | "stump-out" => DismissalKind::Stumped,
        "wide-wicket" => DismissalKind::WideWicket,
        "noball-wicket" | "no-ball-wicket" => DismissalKind::NoBallWicket,
        "bye-wicket" => DismissalKind::ByeWicket,
        "legbye-wicket" | "leg-bye-wicket" => DismissalKind::LegByeWicket,
        _ => return None,
    };

    let mut call = WicketCall {
        kind,
        fielder: None,
        dismissed_end: CreaseEnd::Striker,
        replacement: None,
        extra_runs: 0,
    };

    let mut fielder_words: Vec<&str> = Vec::new();
    while let Some(token) = tokens.next() {
        match token.to_ascii_lowercase().as_str() {
            "nonstriker" | "non-striker" => call.dismissed_end = CreaseEnd::NonStriker,
            "runs" => call.extra_runs = tokens.next()?.parse().ok()?,
            _ => fielder_words.push(token),
        }
    }
    if !fielder_words.is_empty() {
        call.fielder = Some(fielder_words.join(" "));
    }

    Some(Command::Event(ScoringEvent::Wicket(call)))
}

fn print_gate(pending: &PendingSelection) {
    match pending {
        PendingSelection::None => {}
        PendingSelection::NextBowler => {
            println!("» next bowler required: `bowler <name>`");
        }
        PendingSelection::NextBatter { .. } => {
            println!("» next batter required: `batter <name>`");
        }
        PendingSelection::SecondInningsSetup => {
            println!("» innings break: `innings <striker>, <non-striker>, <bowler>`");
        }
    }
}

fn print_scorecard(card: &ScorecardView) {
    for innings in &card.innings {
        println!(
            "--- {}  {}/{} ({} ov)  extras {} ---",
            innings.batting_team,
            innings.runs,
            innings.wickets,
            innings.overs,
            innings.extras.total
        );
        for line in &innings.batting {
            let status = line.dismissal.as_deref().unwrap_or("not out");
            println!(
                "  {:<28} {:>3} ({:>3})  4s {:<2} 6s {:<2} SR {:>6.1}  {status}",
                line.name, line.runs, line.balls, line.fours, line.sixes, line.strike_rate
            );
        }
        for line in &innings.bowling {
            println!(
                "  {:<28} {:>4.1} ov  {:>3} runs  {} wkts  econ {}",
                line.name,
                line.overs,
                line.runs_conceded,
                line.wickets,
                line.economy
                    .map_or_else(|| "-".into(), |economy| format!("{economy:.2}")),
            );
        }
    }
    if let Some(target) = card.target {
        println!("target: {target}");
    }
    if let Some(result) = &card.result {
        println!("result: {result}");
    }
}

fn print_help() {
    println!(
        "commands:\n  \
         0|1|2|3|4|6 or `run <n>`     runs off the bat\n  \
         wide|noball|bye|legbye [n]   extras (total runs, default 1)\n  \
         wicket <kind> [runs <n>] [nonstriker] [fielder]\n  \
         batter <name>                resolve a next-batter gate\n  \
         bowler <name>                resolve a next-bowler gate\n  \
         innings <s>, <ns>, <bowler>  start the second innings\n  \
         score | card | help | quit"
    );
}

async fn shutdown(state: &SharedState) {
    if state.deferred_save_count() > 0 {
        if let Some(store) = state.match_store().await {
            storage_supervisor::flush_deferred_saves(state, store.as_ref()).await;
        }
    }
    info!("scorer session over");
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_digits_are_runs() {
        match parse_command("4") {
            Some(Command::Event(ScoringEvent::Runs(4))) => {}
            _ => panic!("expected runs"),
        }
        assert!(parse_command("5").is_none());
    }

    #[test]
    fn extras_default_to_one_run() {
        match parse_command("wide") {
            Some(Command::Event(ScoringEvent::Extra {
                kind: ExtraKind::Wide,
                runs: 1,
            })) => {}
            _ => panic!("expected wide"),
        }
        match parse_command("noball 5") {
            Some(Command::Event(ScoringEvent::Extra {
                kind: ExtraKind::NoBall,
                runs: 5,
            })) => {}
            _ => panic!("expected no-ball"),
        }
    }

    #[test]
    fn wicket_flags_parse() {
        match parse_command("wicket runout nonstriker Jones") {
            Some(Command::Event(ScoringEvent::Wicket(call))) => {
                assert_eq!(call.kind, DismissalKind::RunOut);
                assert_eq!(call.dismissed_end, CreaseEnd::NonStriker);
                assert_eq!(call.fielder.as_deref(), Some("Jones"));
            }
            _ => panic!("expected wicket"),
        }

        match parse_command("wicket bye-wicket runs 2") {
            Some(Command::Event(ScoringEvent::Wicket(call))) => {
                assert_eq!(call.kind, DismissalKind::ByeWicket);
                assert_eq!(call.extra_runs, 2);
            }
            _ => panic!("expected combination wicket"),
        }
    }

    #[test]
    fn multi_word_names_survive() {
        match parse_command("bowler Mill Road XI Bowler 2") {
            Some(Command::Event(ScoringEvent::NextBowler(name))) => {
                assert_eq!(name, "Mill Road XI Bowler 2");
            }
            _ => panic!("expected bowler selection"),
        }

        match parse_command("innings A One, B Two, C Three") {
            Some(Command::Event(ScoringEvent::SecondInnings {
                striker,
                non_striker,
                opening_bowler,
            })) => {
                assert_eq!(striker, "A One");
                assert_eq!(non_striker, "B Two");
                assert_eq!(opening_bowler, "C Three");
            }
            _ => panic!("expected innings setup"),
        }
    }
}
