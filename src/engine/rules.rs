//! Event application: the cricket scoring rules.
//!
//! Every operation validates its preconditions, mutates the aggregate in
//! place, and returns the derived [`EngineEvent`]s for the caller to act
//! on. A rejected event leaves the state untouched.

use thiserror::Error;

use crate::engine::events::{
    BallEvent, BallRecord, CreaseEnd, DismissalKind, EngineEvent, ExtraKind, Inning, ScoringEvent,
    WicketCall,
};
use crate::engine::match_state::{MatchResult, MatchState, Openers, PendingSelection};

/// A scoring event that violates a rule. Always recoverable: the event is
/// rejected and the match state is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidEvent {
    /// The match has finished; nothing further can be scored.
    #[error("match is already completed")]
    MatchCompleted,
    /// A selection dialog is outstanding.
    #[error("scoring is paused: {pending} is required first")]
    SelectionPending {
        /// What must be resolved before scoring resumes.
        pending: PendingSelection,
    },
    /// The current over already holds six legal balls.
    #[error("the over is already complete; a seventh ball cannot be bowled")]
    OverFull,
    /// No bowler has been selected for the current over.
    #[error("no bowler selected for the current over")]
    NoBowler,
    /// The crease is not fully occupied.
    #[error("both batting positions must be filled before scoring")]
    NoBatters,
    /// Striker and non-striker are the same player.
    #[error("striker and non-striker are both `{name}`")]
    DuplicateBatters {
        /// The duplicated player name.
        name: String,
    },
    /// Runs off the bat must be 0, 1, 2, 3, 4 or 6.
    #[error("invalid run value {runs}: expected 0, 1, 2, 3, 4 or 6")]
    InvalidRuns {
        /// The rejected value.
        runs: u8,
    },
    /// Wides and no-balls always award at least the penalty run.
    #[error("a {kind} must award at least one run")]
    ExtraWithoutRuns {
        /// The extra category.
        kind: ExtraKind,
    },
    /// Extra runs are only bundled with combination dismissals.
    #[error("extra runs cannot be awarded on a plain `{kind}` dismissal")]
    UnexpectedExtraRuns {
        /// The dismissal kind.
        kind: DismissalKind,
    },
    /// Only run-outs can dismiss the non-striker.
    #[error("a `{kind}` dismissal always applies to the striker")]
    CannotNominateEnd {
        /// The dismissal kind.
        kind: DismissalKind,
    },
    /// All ten wickets have fallen.
    #[error("all ten wickets have already fallen")]
    WicketsExhausted,
    /// The named player is not on the batting roster.
    #[error("`{name}` is not on the {team} batting roster")]
    NotOnBattingRoster {
        /// The rejected player.
        name: String,
        /// The batting team.
        team: String,
    },
    /// The named player is not on the bowling roster.
    #[error("`{name}` is not on the {team} bowling roster")]
    NotOnBowlingRoster {
        /// The rejected player.
        name: String,
        /// The fielding team.
        team: String,
    },
    /// The named player is already at the crease.
    #[error("`{name}` is already batting")]
    AlreadyAtCrease {
        /// The rejected player.
        name: String,
    },
    /// The named player was dismissed earlier this innings.
    #[error("`{name}` is already dismissed and cannot bat again this innings")]
    AlreadyDismissed {
        /// The rejected player.
        name: String,
    },
    /// The named bowler bowled the previous over.
    #[error("`{name}` bowled the previous over and cannot bowl consecutive overs")]
    ConsecutiveOvers {
        /// The rejected bowler.
        name: String,
    },
    /// `select_next_bowler` called without an open bowler gate.
    #[error("no next-bowler selection is pending")]
    NoBowlerPending,
    /// `select_next_batter` called without an open batter gate.
    #[error("no next-batter selection is pending")]
    NoBatterPending,
    /// `begin_second_innings` called outside the innings break.
    #[error("match is not awaiting second-innings setup")]
    NotAwaitingSecondInnings,
}

/// Names involved in a live delivery, resolved by the precondition check.
struct Crease {
    striker: String,
    non_striker: String,
    bowler: String,
}

impl MatchState {
    /// Apply one scoring command, dispatching to the matching operation.
    ///
    /// Replaying the same accepted command sequence against a fresh state
    /// reproduces the same final state.
    pub fn apply(&mut self, event: &ScoringEvent) -> Result<Vec<EngineEvent>, InvalidEvent> {
        match event {
            ScoringEvent::Runs(runs) => self.record_runs(*runs),
            ScoringEvent::Wicket(call) => self.record_wicket(call),
            ScoringEvent::Extra { kind, runs } => self.record_extra(*kind, *runs),
            ScoringEvent::NextBowler(name) => self.select_next_bowler(name),
            ScoringEvent::NextBatter(name) => self.select_next_batter(name),
            ScoringEvent::SecondInnings {
                striker,
                non_striker,
                opening_bowler,
            } => self.begin_second_innings(Openers {
                striker: striker.clone(),
                non_striker: non_striker.clone(),
                bowler: opening_bowler.clone(),
            }),
        }
    }

    /// Score runs off the bat on a legal delivery.
    pub fn record_runs(&mut self, runs: u8) -> Result<Vec<EngineEvent>, InvalidEvent> {
        let crease = self.ensure_live()?;
        if !matches!(runs, 0 | 1 | 2 | 3 | 4 | 6) {
            return Err(InvalidEvent::InvalidRuns { runs });
        }

        let mut out = Vec::new();
        self.push_record(BallEvent::Runs {
            batter: crease.striker.clone(),
            runs,
        });

        let innings = self.current_innings_mut();
        innings.runs += u32::from(runs);
        innings.legal_balls += 1;
        innings
            .batting
            .entry(crease.striker)
            .or_default()
            .record_ball(runs);
        innings
            .bowling
            .entry(crease.bowler)
            .or_default()
            .record_legal_ball(u16::from(runs));
        self.ball_in_over += 1;

        if self.chase_complete(&mut out) {
            return Ok(out);
        }

        if runs % 2 == 1 {
            self.swap_strike();
        }
        if self.ball_in_over == 6 {
            self.end_of_over(u16::from(runs), &mut out);
        }

        Ok(out)
    }

    /// Record a dismissal, optionally bundled with extra runs.
    pub fn record_wicket(&mut self, call: &WicketCall) -> Result<Vec<EngineEvent>, InvalidEvent> {
        let crease = self.ensure_live()?;

        if call.extra_runs > 0 && !call.kind.is_combination() {
            return Err(InvalidEvent::UnexpectedExtraRuns { kind: call.kind });
        }
        if call.dismissed_end == CreaseEnd::NonStriker && !call.kind.allows_nominated_end() {
            return Err(InvalidEvent::CannotNominateEnd { kind: call.kind });
        }
        if self.current_innings().wickets >= 10 {
            return Err(InvalidEvent::WicketsExhausted);
        }

        // Wides and no-balls always carry their one-run penalty, wicket or not.
        let runs = match call.kind.extra_kind() {
            Some(ExtraKind::Wide | ExtraKind::NoBall) => call.extra_runs.max(1),
            Some(_) => call.extra_runs,
            None => 0,
        };
        let legal = call.kind.counts_as_legal_ball();
        let dismissed = match call.dismissed_end {
            CreaseEnd::Striker => crease.striker.clone(),
            CreaseEnd::NonStriker => crease.non_striker.clone(),
        };

        // Validate the replacement up front so a bad name rejects the whole
        // event instead of leaving a half-applied wicket behind.
        if let Some(replacement) = &call.replacement {
            self.validate_new_batter(replacement, &dismissed)?;
        }

        let mut out = Vec::new();
        let dismissal = dismissal_text(call, &crease.bowler);

        self.push_record(BallEvent::Wicket {
            batter: dismissed.clone(),
            kind: call.kind,
            bowler: crease.bowler.clone(),
            fielder: call.fielder.clone(),
            runs,
        });

        let innings = self.current_innings_mut();
        innings.runs += u32::from(runs);
        innings.wickets += 1;
        match call.kind.extra_kind() {
            Some(ExtraKind::Wide) => innings.extras.wides += u32::from(runs),
            Some(ExtraKind::NoBall) => innings.extras.no_balls += u32::from(runs),
            Some(ExtraKind::Bye) => innings.extras.byes += u32::from(runs),
            Some(ExtraKind::LegBye) => innings.extras.leg_byes += u32::from(runs),
            None => {}
        }

        let bowling = innings.bowling.entry(crease.bowler).or_default();
        let conceded = match call.kind.extra_kind() {
            Some(kind) if kind.charged_to_bowler() => runs,
            _ => 0,
        };
        if legal {
            bowling.record_legal_ball(conceded);
        } else {
            bowling.record_illegal_ball(conceded);
        }
        if call.kind.credits_bowler() {
            bowling.wickets += 1;
        }

        // The striker faces every legal delivery, even when the non-striker
        // is the one run out.
        if legal {
            let facing = innings.batting.entry(crease.striker).or_default();
            facing.balls += 1;
            if runs == 0 {
                facing.dots += 1;
            }
            innings.legal_balls += 1;
        }

        let batter = innings.batting.entry(dismissed.clone()).or_default();
        batter.dismissal = Some(dismissal);
        innings.dismissed.insert(dismissed);

        // Vacate the crease slot; the replacement (or the gated selection)
        // fills the empty end.
        match call.dismissed_end {
            CreaseEnd::Striker => self.striker = None,
            CreaseEnd::NonStriker => self.non_striker = None,
        }
        if legal {
            self.ball_in_over += 1;
        }

        if self.chase_complete(&mut out) {
            return Ok(out);
        }

        if self.current_innings().wickets >= 10 {
            self.complete_innings(&mut out);
            return Ok(out);
        }

        let over_ends = legal && self.ball_in_over == 6;
        let overs_exhausted =
            over_ends && self.current_innings().legal_balls >= self.rules.balls_per_innings();

        // No replacement is seated when the innings is ending anyway.
        if !overs_exhausted {
            match &call.replacement {
                Some(replacement) => self.seat_batter(replacement.clone()),
                None => {
                    self.pending = PendingSelection::NextBatter {
                        end: call.dismissed_end,
                    };
                }
            }
        }

        if over_ends {
            self.end_of_over(runs, &mut out);
        }

        Ok(out)
    }

    /// Record a wide, no-ball, bye or leg bye worth `runs` in total.
    pub fn record_extra(
        &mut self,
        kind: ExtraKind,
        runs: u16,
    ) -> Result<Vec<EngineEvent>, InvalidEvent> {
        let crease = self.ensure_live()?;
        if runs == 0 && !kind.counts_as_legal_ball() {
            return Err(InvalidEvent::ExtraWithoutRuns { kind });
        }

        let mut out = Vec::new();
        self.push_record(BallEvent::Extra { kind, runs });

        let innings = self.current_innings_mut();
        innings.runs += u32::from(runs);

        // A no-ball splits into the one-run penalty (an extra) and whatever
        // the striker hit, which stays off the striker's ball count.
        match kind {
            ExtraKind::Wide => innings.extras.wides += u32::from(runs),
            ExtraKind::NoBall => innings.extras.no_balls += 1,
            ExtraKind::Bye => innings.extras.byes += u32::from(runs),
            ExtraKind::LegBye => innings.extras.leg_byes += u32::from(runs),
        }

        let bowling = innings.bowling.entry(crease.bowler).or_default();
        let conceded = if kind.charged_to_bowler() { runs } else { 0 };
        if kind.counts_as_legal_ball() {
            bowling.record_legal_ball(conceded);
            innings.legal_balls += 1;
        } else {
            bowling.record_illegal_ball(conceded);
        }

        let batting = innings.batting.entry(crease.striker).or_default();
        match kind {
            ExtraKind::NoBall => {
                let bat_runs = runs - 1;
                if bat_runs > 0 {
                    batting.record_bat_runs(bat_runs as u8);
                }
            }
            ExtraKind::Bye | ExtraKind::LegBye => {
                batting.balls += 1;
                if runs == 0 {
                    batting.dots += 1;
                }
            }
            ExtraKind::Wide => {}
        }

        if kind.counts_as_legal_ball() {
            self.ball_in_over += 1;
        }

        if self.chase_complete(&mut out) {
            return Ok(out);
        }

        // Wides and no-balls rotate on the runs actually run beyond the
        // penalty; byes and leg byes rotate on the full total.
        let rotating_runs = match kind {
            ExtraKind::Wide | ExtraKind::NoBall => runs - 1,
            ExtraKind::Bye | ExtraKind::LegBye => runs,
        };
        if rotating_runs % 2 == 1 {
            self.swap_strike();
        }

        if kind.counts_as_legal_ball() && self.ball_in_over == 6 {
            self.end_of_over(runs, &mut out);
        }

        Ok(out)
    }

    /// Resolve a pending next-bowler selection.
    pub fn select_next_bowler(&mut self, name: &str) -> Result<Vec<EngineEvent>, InvalidEvent> {
        if self.completed {
            return Err(InvalidEvent::MatchCompleted);
        }
        if self.pending != PendingSelection::NextBowler {
            return Err(InvalidEvent::NoBowlerPending);
        }
        if !self.bowling_roster().iter().any(|player| player == name) {
            return Err(InvalidEvent::NotOnBowlingRoster {
                name: name.to_string(),
                team: self.teams[self.fielding_side()].name.clone(),
            });
        }
        if self.current_innings().last_over_bowler.as_deref() == Some(name) {
            return Err(InvalidEvent::ConsecutiveOvers {
                name: name.to_string(),
            });
        }

        self.bowler = Some(name.to_string());
        self.pending = PendingSelection::None;
        Ok(Vec::new())
    }

    /// Resolve a pending next-batter selection.
    pub fn select_next_batter(&mut self, name: &str) -> Result<Vec<EngineEvent>, InvalidEvent> {
        if self.completed {
            return Err(InvalidEvent::MatchCompleted);
        }
        if !matches!(self.pending, PendingSelection::NextBatter { .. }) {
            return Err(InvalidEvent::NoBatterPending);
        }
        self.validate_new_batter(name, "")?;

        self.seat_batter(name.to_string());
        // A wicket on the final ball of an over leaves both gates open; the
        // bowler one is resolved second.
        self.pending = if self.bowler.is_none() {
            PendingSelection::NextBowler
        } else {
            PendingSelection::None
        };
        Ok(Vec::new())
    }

    /// Open the chase with fresh openers after the innings break.
    pub fn begin_second_innings(
        &mut self,
        openers: Openers,
    ) -> Result<Vec<EngineEvent>, InvalidEvent> {
        if self.completed {
            return Err(InvalidEvent::MatchCompleted);
        }
        if self.pending != PendingSelection::SecondInningsSetup {
            return Err(InvalidEvent::NotAwaitingSecondInnings);
        }
        self.seat_openers(openers)?;
        Ok(Vec::new())
    }

    pub(crate) fn seat_openers(&mut self, openers: Openers) -> Result<(), InvalidEvent> {
        if openers.striker == openers.non_striker {
            return Err(InvalidEvent::DuplicateBatters {
                name: openers.striker,
            });
        }
        for batter in [&openers.striker, &openers.non_striker] {
            if !self.batting_roster().iter().any(|player| player == batter) {
                return Err(InvalidEvent::NotOnBattingRoster {
                    name: batter.clone(),
                    team: self.teams[self.batting_side()].name.clone(),
                });
            }
            if self.current_innings().dismissed.contains(batter.as_str()) {
                return Err(InvalidEvent::AlreadyDismissed {
                    name: batter.clone(),
                });
            }
        }
        if !self
            .bowling_roster()
            .iter()
            .any(|player| player == &openers.bowler)
        {
            return Err(InvalidEvent::NotOnBowlingRoster {
                name: openers.bowler,
                team: self.teams[self.fielding_side()].name.clone(),
            });
        }

        let innings = self.current_innings_mut();
        innings.batting.entry(openers.striker.clone()).or_default();
        innings
            .batting
            .entry(openers.non_striker.clone())
            .or_default();
        self.striker = Some(openers.striker);
        self.non_striker = Some(openers.non_striker);
        self.bowler = Some(openers.bowler);
        self.pending = PendingSelection::None;
        Ok(())
    }

    fn ensure_live(&self) -> Result<Crease, InvalidEvent> {
        if self.completed {
            return Err(InvalidEvent::MatchCompleted);
        }
        if !self.pending.is_none() {
            return Err(InvalidEvent::SelectionPending {
                pending: self.pending,
            });
        }
        if self.ball_in_over >= 6 {
            return Err(InvalidEvent::OverFull);
        }
        let Some(bowler) = self.bowler.clone() else {
            return Err(InvalidEvent::NoBowler);
        };
        let (Some(striker), Some(non_striker)) = (self.striker.clone(), self.non_striker.clone())
        else {
            return Err(InvalidEvent::NoBatters);
        };
        if striker == non_striker {
            return Err(InvalidEvent::DuplicateBatters { name: striker });
        }
        Ok(Crease {
            striker,
            non_striker,
            bowler,
        })
    }

    fn validate_new_batter(&self, name: &str, dismissed: &str) -> Result<(), InvalidEvent> {
        if !self.batting_roster().iter().any(|player| player == name) {
            return Err(InvalidEvent::NotOnBattingRoster {
                name: name.to_string(),
                team: self.teams[self.batting_side()].name.clone(),
            });
        }
        let at_crease = [&self.striker, &self.non_striker]
            .into_iter()
            .flatten()
            .any(|player| player == name && player != dismissed);
        if at_crease {
            return Err(InvalidEvent::AlreadyAtCrease {
                name: name.to_string(),
            });
        }
        if self.current_innings().dismissed.contains(name) || name == dismissed {
            return Err(InvalidEvent::AlreadyDismissed {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Seat a batter in the vacated crease slot.
    fn seat_batter(&mut self, name: String) {
        self.current_innings_mut()
            .batting
            .entry(name.clone())
            .or_default();
        if self.striker.is_none() {
            self.striker = Some(name);
        } else {
            self.non_striker = Some(name);
        }
    }

    fn swap_strike(&mut self) {
        std::mem::swap(&mut self.striker, &mut self.non_striker);
    }

    fn push_record(&mut self, event: BallEvent) {
        let record = BallRecord {
            over: self.over,
            ball: self.ball_in_over + 1,
            event,
        };
        self.current_innings_mut().log.push(record);
    }

    fn push_marker(&mut self, event: BallEvent) {
        let record = BallRecord {
            over: self.over,
            ball: self.ball_in_over,
            event,
        };
        self.current_innings_mut().log.push(record);
    }

    /// Ends the match immediately when the chasing side reaches its target,
    /// bypassing over completion for the remaining balls of the over.
    fn chase_complete(&mut self, out: &mut Vec<EngineEvent>) -> bool {
        let Some(target) = self.target else {
            return false;
        };
        if self.inning != Inning::Second || self.current_innings().runs < target {
            return false;
        }

        let innings = self.current_innings();
        let (runs, wickets) = (innings.runs, innings.wickets);
        let result = MatchResult::WonByWickets {
            team: self.teams[innings.batting_team].name.clone(),
            wickets: 10 - wickets,
        };
        self.push_marker(BallEvent::InningsComplete { runs, wickets });
        out.push(EngineEvent::InningsCompleted {
            inning: Inning::Second,
        });
        self.complete_match(result, out);
        true
    }

    fn end_of_over(&mut self, final_ball_runs: u16, out: &mut Vec<EngineEvent>) {
        self.over += 1;
        self.ball_in_over = 0;

        // Batters change ends between overs; combined with the on-ball odd
        // rotation this nets out to the familiar strike pattern.
        if final_ball_runs % 2 == 0 {
            self.swap_strike();
        }

        let bowler = self.bowler.take().expect("a live over has a bowler");
        let over = self.over;
        self.current_innings_mut().last_over_bowler = Some(bowler.clone());
        self.push_marker(BallEvent::OverComplete {
            over,
            bowler: bowler.clone(),
        });
        out.push(EngineEvent::OverCompleted { over, bowler });

        if self.current_innings().legal_balls >= self.rules.balls_per_innings() {
            self.complete_innings(out);
        } else if self.pending.is_none() {
            self.pending = PendingSelection::NextBowler;
        }
    }

    fn complete_innings(&mut self, out: &mut Vec<EngineEvent>) {
        let innings = self.current_innings();
        let (runs, wickets) = (innings.runs, innings.wickets);
        self.push_marker(BallEvent::InningsComplete { runs, wickets });
        out.push(EngineEvent::InningsCompleted {
            inning: self.inning,
        });

        match self.inning {
            Inning::First => {
                let target = runs + 1;
                self.target = Some(target);
                out.push(EngineEvent::TargetSet { target });
                self.inning = Inning::Second;
                self.over = 0;
                self.ball_in_over = 0;
                self.striker = None;
                self.non_striker = None;
                self.bowler = None;
                self.pending = PendingSelection::SecondInningsSetup;
            }
            Inning::Second => {
                let target = self.target.expect("target is set at the innings break");
                let deficit = (target - 1) - runs;
                let result = if deficit == 0 {
                    MatchResult::Tied
                } else {
                    MatchResult::WonByRuns {
                        team: self.teams[self.innings[0].batting_team].name.clone(),
                        runs: deficit,
                    }
                };
                self.complete_match(result, out);
            }
        }
    }

    fn complete_match(&mut self, result: MatchResult, out: &mut Vec<EngineEvent>) {
        self.completed = true;
        self.pending = PendingSelection::None;
        self.push_marker(BallEvent::MatchComplete {
            result: result.to_string(),
        });
        out.push(EngineEvent::MatchCompleted {
            result: result.to_string(),
        });
        self.result = Some(result);
    }
}

fn dismissal_text(call: &WicketCall, bowler: &str) -> String {
    match (call.kind, &call.fielder) {
        (DismissalKind::Bowled, _) => format!("b {bowler}"),
        (DismissalKind::Caught, Some(fielder)) => format!("c {fielder} b {bowler}"),
        (DismissalKind::Caught, None) => format!("c & b {bowler}"),
        (DismissalKind::RunOut, Some(fielder)) => format!("run out ({fielder})"),
        (DismissalKind::RunOut, None) => "run out".to_string(),
        (DismissalKind::HitWicket, _) => format!("hit wicket b {bowler}"),
        (DismissalKind::Stumped, Some(fielder)) => format!("st {fielder} b {bowler}"),
        (DismissalKind::Stumped, None) => format!("st b {bowler}"),
        (DismissalKind::WideWicket, Some(fielder)) => format!("st {fielder} b {bowler} (wide)"),
        (DismissalKind::WideWicket, None) => format!("st b {bowler} (wide)"),
        (DismissalKind::NoBallWicket, _) => format!("out b {bowler} (no-ball)"),
        (DismissalKind::ByeWicket, Some(fielder)) => format!("run out ({fielder}) (bye)"),
        (DismissalKind::ByeWicket, None) => "run out (bye)".to_string(),
        (DismissalKind::LegByeWicket, Some(fielder)) => format!("run out ({fielder}) (leg bye)"),
        (DismissalKind::LegByeWicket, None) => "run out (leg bye)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::match_state::{MatchRules, TeamInfo};
    use uuid::Uuid;

    fn team(name: &str) -> TeamInfo {
        TeamInfo {
            name: name.to_string(),
            batting_order: (1..=11).map(|n| format!("{name} Batsman {n}")).collect(),
            bowling_order: (1..=6).map(|n| format!("{name} Bowler {n}")).collect(),
        }
    }

    fn live_match(total_overs: u16) -> MatchState {
        MatchState::new(
            Uuid::new_v4(),
            [team("Lions"), team("Sharks")],
            MatchRules { total_overs },
            0,
            Openers {
                striker: "Lions Batsman 1".into(),
                non_striker: "Lions Batsman 2".into(),
                bowler: "Sharks Bowler 1".into(),
            },
        )
        .unwrap()
    }

    /// Apply events in order, resolving open selection gates first, the way
    /// a scorer clicking through dialogs would.
    fn drive(state: &mut MatchState, events: impl IntoIterator<Item = ScoringEvent>) {
        for event in events {
            resolve_gates(state);
            state.apply(&event).unwrap();
        }
    }

    fn resolve_gates(state: &mut MatchState) {
        while !state.completed {
            match state.pending {
                PendingSelection::NextBowler => {
                    let last = state.current_innings().last_over_bowler.clone();
                    let bowler = state
                        .bowling_roster()
                        .iter()
                        .find(|player| Some(player.as_str()) != last.as_deref())
                        .unwrap()
                        .clone();
                    state.select_next_bowler(&bowler).unwrap();
                }
                PendingSelection::NextBatter { .. } => {
                    let batter = next_available_batter(state);
                    state.select_next_batter(&batter).unwrap();
                }
                PendingSelection::SecondInningsSetup => {
                    let roster: Vec<String> = state.batting_roster().to_vec();
                    let bowler = state.bowling_roster()[0].clone();
                    state
                        .begin_second_innings(Openers {
                            striker: roster[0].clone(),
                            non_striker: roster[1].clone(),
                            bowler,
                        })
                        .unwrap();
                }
                PendingSelection::None => break,
            }
        }
    }

    fn next_available_batter(state: &MatchState) -> String {
        let innings = state.current_innings();
        state
            .batting_roster()
            .iter()
            .find(|player| {
                !innings.dismissed.contains(*player)
                    && state.striker.as_deref() != Some(player.as_str())
                    && state.non_striker.as_deref() != Some(player.as_str())
            })
            .unwrap()
            .clone()
    }

    fn wicket(kind: DismissalKind) -> ScoringEvent {
        ScoringEvent::Wicket(WicketCall {
            kind,
            fielder: None,
            dismissed_end: CreaseEnd::Striker,
            replacement: None,
            extra_runs: 0,
        })
    }

    fn wicket_call_no_replacement() -> WicketCall {
        WicketCall {
            kind: DismissalKind::Bowled,
            fielder: None,
            dismissed_end: CreaseEnd::Striker,
            replacement: None,
            extra_runs: 0,
        }
    }

    #[test]
    fn runs_update_totals_and_stats() {
        let mut state = live_match(20);
        state.record_runs(4).unwrap();
        state.record_runs(0).unwrap();
        state.record_runs(3).unwrap();

        let innings = state.current_innings();
        assert_eq!(innings.runs, 7);
        assert_eq!(innings.legal_balls, 3);
        assert_eq!(state.ball_in_over, 3);

        let opener = &innings.batting["Lions Batsman 1"];
        assert_eq!(opener.runs, 7);
        assert_eq!(opener.balls, 3);
        assert_eq!(opener.dots, 1);
        assert_eq!(opener.fours, 1);

        let bowling = &innings.bowling["Sharks Bowler 1"];
        assert_eq!(bowling.runs_conceded, 7);
        assert_eq!(bowling.legal_balls, 3);

        // Three was odd, so the openers have swapped.
        assert_eq!(state.striker.as_deref(), Some("Lions Batsman 2"));
    }

    #[test]
    fn five_runs_is_rejected() {
        let mut state = live_match(20);
        assert_eq!(
            state.record_runs(5).unwrap_err(),
            InvalidEvent::InvalidRuns { runs: 5 }
        );
        assert_eq!(state.current_innings().runs, 0);
        assert!(state.current_innings().log.is_empty());
    }

    #[test]
    fn odd_runs_swap_strike_and_even_final_ball_swaps_at_over_end() {
        let mut state = live_match(20);

        // Five dots, then two off the final ball: the on-ball rotation does
        // not fire (even runs) but the over-end rotation does.
        for _ in 0..5 {
            state.record_runs(0).unwrap();
        }
        assert_eq!(state.striker.as_deref(), Some("Lions Batsman 1"));
        state.record_runs(2).unwrap();
        assert_eq!(state.striker.as_deref(), Some("Lions Batsman 2"));
        assert_eq!(state.pending, PendingSelection::NextBowler);

        // An over ending on an odd single: on-ball swap then over-end no-op.
        state.select_next_bowler("Sharks Bowler 2").unwrap();
        for _ in 0..5 {
            state.record_runs(0).unwrap();
        }
        state.record_runs(1).unwrap();
        assert_eq!(state.striker.as_deref(), Some("Lions Batsman 1"));
    }

    #[test]
    fn over_completes_after_exactly_six_legal_balls() {
        let mut state = live_match(20);

        for _ in 0..5 {
            state.record_runs(0).unwrap();
        }
        // A wide does not advance the over.
        state.record_extra(ExtraKind::Wide, 1).unwrap();
        assert_eq!(state.ball_in_over, 5);
        assert_eq!(state.over, 0);

        let events = state.record_runs(0).unwrap();
        assert_eq!(state.over, 1);
        assert_eq!(state.ball_in_over, 0);
        assert!(matches!(
            events[0],
            EngineEvent::OverCompleted { over: 1, .. }
        ));
        assert_eq!(state.pending, PendingSelection::NextBowler);
        assert_eq!(
            state.current_innings().last_over_bowler.as_deref(),
            Some("Sharks Bowler 1")
        );
    }

    #[test]
    fn scoring_is_rejected_while_bowler_selection_pending() {
        let mut state = live_match(20);
        for _ in 0..6 {
            state.record_runs(0).unwrap();
        }

        assert!(matches!(
            state.record_runs(1).unwrap_err(),
            InvalidEvent::SelectionPending {
                pending: PendingSelection::NextBowler
            }
        ));
    }

    #[test]
    fn consecutive_over_bowler_is_rejected() {
        let mut state = live_match(20);
        for _ in 0..6 {
            state.record_runs(0).unwrap();
        }
        assert_eq!(
            state.select_next_bowler("Sharks Bowler 1").unwrap_err(),
            InvalidEvent::ConsecutiveOvers {
                name: "Sharks Bowler 1".into()
            }
        );
        state.select_next_bowler("Sharks Bowler 2").unwrap();

        // The previous over's bowler is eligible again one over later.
        for _ in 0..6 {
            state.record_runs(0).unwrap();
        }
        state.select_next_bowler("Sharks Bowler 1").unwrap();
        assert_eq!(state.bowler.as_deref(), Some("Sharks Bowler 1"));
    }

    #[test]
    fn bowler_off_the_fielding_roster_is_rejected() {
        let mut state = live_match(20);
        for _ in 0..6 {
            state.record_runs(0).unwrap();
        }
        assert!(matches!(
            state.select_next_bowler("Lions Bowler 1").unwrap_err(),
            InvalidEvent::NotOnBowlingRoster { .. }
        ));
    }

    #[test]
    fn wicket_books_bowler_credit_and_dismissal() {
        let mut state = live_match(20);
        let events = state
            .record_wicket(&WicketCall {
                kind: DismissalKind::Caught,
                fielder: Some("Sharks Bowler 3".into()),
                dismissed_end: CreaseEnd::Striker,
                replacement: Some("Lions Batsman 3".into()),
                extra_runs: 0,
            })
            .unwrap();
        assert!(events.is_empty());

        let innings = state.current_innings();
        assert_eq!(innings.wickets, 1);
        assert_eq!(innings.legal_balls, 1);
        assert!(innings.dismissed.contains("Lions Batsman 1"));
        assert_eq!(
            innings.batting["Lions Batsman 1"].dismissal.as_deref(),
            Some("c Sharks Bowler 3 b Sharks Bowler 1")
        );
        assert_eq!(innings.bowling["Sharks Bowler 1"].wickets, 1);
        assert_eq!(state.striker.as_deref(), Some("Lions Batsman 3"));
    }

    #[test]
    fn run_out_of_the_nominated_non_striker() {
        let mut state = live_match(20);
        state
            .record_wicket(&WicketCall {
                kind: DismissalKind::RunOut,
                fielder: Some("Jones".into()),
                dismissed_end: CreaseEnd::NonStriker,
                replacement: Some("Lions Batsman 3".into()),
                extra_runs: 0,
            })
            .unwrap();

        let innings = state.current_innings();
        assert!(innings.dismissed.contains("Lions Batsman 2"));
        assert_eq!(
            innings.batting["Lions Batsman 2"].dismissal.as_deref(),
            Some("run out (Jones)")
        );
        // No bowler credit for a run-out.
        assert_eq!(innings.bowling["Sharks Bowler 1"].wickets, 0);
        // The striker keeps strike and is charged the faced ball.
        assert_eq!(state.striker.as_deref(), Some("Lions Batsman 1"));
        assert_eq!(innings.batting["Lions Batsman 1"].balls, 1);
        assert_eq!(state.non_striker.as_deref(), Some("Lions Batsman 3"));
    }

    #[test]
    fn non_striker_cannot_be_nominated_for_bowled() {
        let mut state = live_match(20);
        let err = state
            .record_wicket(&WicketCall {
                kind: DismissalKind::Bowled,
                fielder: None,
                dismissed_end: CreaseEnd::NonStriker,
                replacement: Some("Lions Batsman 3".into()),
                extra_runs: 0,
            })
            .unwrap_err();
        assert_eq!(
            err,
            InvalidEvent::CannotNominateEnd {
                kind: DismissalKind::Bowled
            }
        );
    }

    #[test]
    fn dismissed_player_cannot_return() {
        let mut state = live_match(20);
        state
            .record_wicket(&WicketCall::simple(
                DismissalKind::Bowled,
                "Lions Batsman 3",
            ))
            .unwrap();

        let err = state
            .record_wicket(&WicketCall::simple(
                DismissalKind::Bowled,
                "Lions Batsman 1",
            ))
            .unwrap_err();
        assert_eq!(
            err,
            InvalidEvent::AlreadyDismissed {
                name: "Lions Batsman 1".into()
            }
        );

        let err = state
            .record_wicket(&WicketCall::simple(
                DismissalKind::Bowled,
                "Lions Batsman 2",
            ))
            .unwrap_err();
        assert_eq!(
            err,
            InvalidEvent::AlreadyAtCrease {
                name: "Lions Batsman 2".into()
            }
        );
    }

    #[test]
    fn wicket_without_replacement_gates_on_next_batter() {
        let mut state = live_match(20);
        state.record_wicket(&wicket_call_no_replacement()).unwrap();
        assert_eq!(
            state.pending,
            PendingSelection::NextBatter {
                end: CreaseEnd::Striker
            }
        );
        assert!(matches!(
            state.record_runs(1).unwrap_err(),
            InvalidEvent::SelectionPending { .. }
        ));

        state.select_next_batter("Lions Batsman 3").unwrap();
        assert_eq!(state.pending, PendingSelection::None);
        assert_eq!(state.striker.as_deref(), Some("Lions Batsman 3"));
        state.record_runs(1).unwrap();
    }

    #[test]
    fn wicket_on_final_ball_of_over_opens_both_gates_in_order() {
        let mut state = live_match(20);
        for _ in 0..5 {
            state.record_runs(0).unwrap();
        }
        state.record_wicket(&wicket_call_no_replacement()).unwrap();

        assert!(matches!(
            state.pending,
            PendingSelection::NextBatter { .. }
        ));
        assert!(state.bowler.is_none());
        assert_eq!(state.over, 1);

        state.select_next_batter("Lions Batsman 3").unwrap();
        assert_eq!(state.pending, PendingSelection::NextBowler);
        state.select_next_bowler("Sharks Bowler 2").unwrap();
        assert_eq!(state.pending, PendingSelection::None);

        // The survivor changed ends at the over break (dot-ball wicket), so
        // the incoming batter starts at the non-striker's end.
        assert_eq!(state.striker.as_deref(), Some("Lions Batsman 2"));
        assert_eq!(state.non_striker.as_deref(), Some("Lions Batsman 3"));
    }

    #[test]
    fn no_ball_splits_penalty_and_bat_runs() {
        let mut state = live_match(20);
        state.record_extra(ExtraKind::NoBall, 5).unwrap();

        let innings = state.current_innings();
        assert_eq!(innings.runs, 5);
        assert_eq!(innings.extras.no_balls, 1);
        assert_eq!(innings.legal_balls, 0);

        let striker = &innings.batting["Lions Batsman 1"];
        assert_eq!(striker.runs, 4);
        assert_eq!(striker.balls, 0);
        assert_eq!(striker.dots, 0);
        assert_eq!(striker.fours, 1);

        let bowling = &innings.bowling["Sharks Bowler 1"];
        assert_eq!(bowling.runs_conceded, 5);
        assert_eq!(bowling.legal_balls, 0);
        assert_eq!(bowling.total_balls, 1);
    }

    #[test]
    fn wide_runs_rotate_on_runs_beyond_the_penalty() {
        let mut state = live_match(20);
        // Wide plus one run actually run: odd beyond-penalty count swaps.
        state.record_extra(ExtraKind::Wide, 2).unwrap();
        assert_eq!(state.striker.as_deref(), Some("Lions Batsman 2"));
        assert_eq!(state.current_innings().extras.wides, 2);
        // A plain wide does not rotate.
        state.record_extra(ExtraKind::Wide, 1).unwrap();
        assert_eq!(state.striker.as_deref(), Some("Lions Batsman 2"));
    }

    #[test]
    fn wide_without_runs_is_rejected() {
        let mut state = live_match(20);
        assert_eq!(
            state.record_extra(ExtraKind::Wide, 0).unwrap_err(),
            InvalidEvent::ExtraWithoutRuns {
                kind: ExtraKind::Wide
            }
        );
    }

    #[test]
    fn byes_charge_the_striker_a_ball_but_not_the_bowler() {
        let mut state = live_match(20);
        state.record_extra(ExtraKind::Bye, 1).unwrap();

        let innings = state.current_innings();
        assert_eq!(innings.runs, 1);
        assert_eq!(innings.extras.byes, 1);
        assert_eq!(innings.legal_balls, 1);
        assert_eq!(innings.batting["Lions Batsman 1"].balls, 1);
        assert_eq!(innings.batting["Lions Batsman 1"].runs, 0);
        assert_eq!(innings.bowling["Sharks Bowler 1"].runs_conceded, 0);
        assert_eq!(innings.bowling["Sharks Bowler 1"].legal_balls, 1);
        // One bye rotates strike.
        assert_eq!(state.striker.as_deref(), Some("Lions Batsman 2"));
    }

    #[test]
    fn wide_wicket_clamps_runs_to_the_penalty() {
        let mut state = live_match(20);
        state
            .record_wicket(&WicketCall {
                kind: DismissalKind::WideWicket,
                fielder: Some("Sharks Bowler 4".into()),
                dismissed_end: CreaseEnd::Striker,
                replacement: Some("Lions Batsman 3".into()),
                extra_runs: 0,
            })
            .unwrap();

        let innings = state.current_innings();
        assert_eq!(innings.runs, 1);
        assert_eq!(innings.extras.wides, 1);
        assert_eq!(innings.wickets, 1);
        // Not a legal ball, and the striker faced nothing.
        assert_eq!(innings.legal_balls, 0);
        assert_eq!(innings.batting["Lions Batsman 3"].balls, 0);
        // A stumping off a wide still credits the bowler.
        assert_eq!(innings.bowling["Sharks Bowler 1"].wickets, 1);
        assert_eq!(innings.bowling["Sharks Bowler 1"].runs_conceded, 1);
        assert_eq!(innings.bowling["Sharks Bowler 1"].total_balls, 1);
    }

    #[test]
    fn extra_runs_on_plain_dismissals_are_rejected() {
        let mut state = live_match(20);
        let err = state
            .record_wicket(&WicketCall {
                kind: DismissalKind::Bowled,
                fielder: None,
                dismissed_end: CreaseEnd::Striker,
                replacement: Some("Lions Batsman 3".into()),
                extra_runs: 2,
            })
            .unwrap_err();
        assert_eq!(
            err,
            InvalidEvent::UnexpectedExtraRuns {
                kind: DismissalKind::Bowled
            }
        );
    }

    #[test]
    fn batter_runs_plus_extras_equal_the_team_total() {
        let mut state = live_match(20);
        drive(
            &mut state,
            vec![
                ScoringEvent::Runs(4),
                ScoringEvent::Extra {
                    kind: ExtraKind::Wide,
                    runs: 2,
                },
                ScoringEvent::Runs(1),
                ScoringEvent::Extra {
                    kind: ExtraKind::NoBall,
                    runs: 5,
                },
                ScoringEvent::Extra {
                    kind: ExtraKind::Bye,
                    runs: 1,
                },
                ScoringEvent::Runs(6),
                ScoringEvent::Wicket(WicketCall {
                    kind: DismissalKind::ByeWicket,
                    fielder: None,
                    dismissed_end: CreaseEnd::Striker,
                    replacement: Some("Lions Batsman 3".into()),
                    extra_runs: 2,
                }),
                ScoringEvent::Runs(2),
            ],
        );

        let innings = state.current_innings();
        let batted: u32 = innings.batting.values().map(|stats| stats.runs).sum();
        assert_eq!(batted + innings.extras.total(), innings.runs);
        assert_eq!(innings.runs, 4 + 2 + 1 + 5 + 1 + 6 + 2 + 2);
    }

    #[test]
    fn replay_of_the_same_event_log_is_identical() {
        let events = vec![
            ScoringEvent::Runs(4),
            ScoringEvent::Runs(1),
            ScoringEvent::Extra {
                kind: ExtraKind::Wide,
                runs: 1,
            },
            ScoringEvent::Wicket(WicketCall {
                kind: DismissalKind::Caught,
                fielder: Some("Sharks Bowler 5".into()),
                dismissed_end: CreaseEnd::Striker,
                replacement: Some("Lions Batsman 3".into()),
                extra_runs: 0,
            }),
            ScoringEvent::Runs(0),
            ScoringEvent::Runs(2),
            ScoringEvent::Runs(6),
            ScoringEvent::NextBowler("Sharks Bowler 2".into()),
            ScoringEvent::Runs(3),
        ];

        let id = Uuid::new_v4();
        let fresh = || {
            MatchState::new(
                id,
                [team("Lions"), team("Sharks")],
                MatchRules { total_overs: 20 },
                0,
                Openers {
                    striker: "Lions Batsman 1".into(),
                    non_striker: "Lions Batsman 2".into(),
                    bowler: "Sharks Bowler 1".into(),
                },
            )
            .unwrap()
        };

        let mut first = fresh();
        let mut second = fresh();
        for event in &events {
            first.apply(event).unwrap();
        }
        for event in &events {
            second.apply(event).unwrap();
        }
        assert_eq!(first, second);
    }

    #[test]
    fn all_out_completes_the_first_innings() {
        let mut state = live_match(20);
        for _ in 0..9 {
            resolve_gates(&mut state);
            state.record_wicket(&wicket_call_no_replacement()).unwrap();
        }
        resolve_gates(&mut state);
        let events = state.record_wicket(&wicket_call_no_replacement()).unwrap();

        assert!(matches!(
            events[0],
            EngineEvent::InningsCompleted {
                inning: Inning::First
            }
        ));
        assert_eq!(events[1], EngineEvent::TargetSet { target: 1 });
        assert_eq!(state.pending, PendingSelection::SecondInningsSetup);
        assert_eq!(state.inning, Inning::Second);
        assert_eq!(state.innings[0].wickets, 10);

        // The eleventh wicket (or any other scoring) is rejected at the gate.
        assert!(matches!(
            state.record_wicket(&wicket_call_no_replacement()),
            Err(InvalidEvent::SelectionPending {
                pending: PendingSelection::SecondInningsSetup
            })
        ));
    }

    #[test]
    fn full_match_scenario_chase_won_mid_over() {
        let mut state = live_match(20);

        // First innings: nine of the first eighteen overs open with a
        // wicket, then twelve quick runs and the final wicket at 18.4.
        let mut events: Vec<ScoringEvent> = Vec::new();
        for over in 0..18 {
            if over < 9 {
                events.push(wicket(DismissalKind::Bowled));
                events.extend([1, 1, 1, 1, 3].map(ScoringEvent::Runs));
            } else {
                events.extend([1, 1, 1, 1, 1, 3].map(ScoringEvent::Runs));
            }
        }
        events.extend([4, 4, 4].map(ScoringEvent::Runs));
        drive(&mut state, events);
        assert_eq!(state.innings[0].runs, 147);
        assert_eq!(state.innings[0].wickets, 9);

        // Tenth wicket: run out going for a third bye.
        state
            .record_wicket(&WicketCall {
                kind: DismissalKind::ByeWicket,
                fielder: None,
                dismissed_end: CreaseEnd::Striker,
                replacement: None,
                extra_runs: 3,
            })
            .unwrap();

        assert_eq!(state.innings[0].runs, 150);
        assert_eq!(state.innings[0].wickets, 10);
        assert_eq!(state.innings[0].overs(), "18.4");
        assert_eq!(state.target, Some(151));
        assert_eq!(state.pending, PendingSelection::SecondInningsSetup);

        // Second innings: four early wickets, then the chase completes at
        // 15.2 with a boundary, ending the match mid-over.
        resolve_gates(&mut state);
        let mut chase: Vec<ScoringEvent> = Vec::new();
        for over in 0..15 {
            if over < 4 {
                chase.push(wicket(DismissalKind::Bowled));
                chase.extend([2, 2, 2, 2, 2].map(ScoringEvent::Runs));
            } else if over < 13 {
                chase.extend([2, 2, 2, 2, 2, 1].map(ScoringEvent::Runs));
            } else {
                chase.extend([1, 1, 1, 0, 0, 0].map(ScoringEvent::Runs));
            }
        }
        chase.push(ScoringEvent::Runs(2));
        drive(&mut state, chase);
        assert_eq!(state.innings[1].runs, 147);
        assert_eq!(state.innings[1].wickets, 4);

        let events = state.record_runs(4).unwrap();

        assert!(state.completed);
        assert_eq!(state.innings[1].runs, 151);
        assert_eq!(state.innings[1].overs(), "15.2");
        assert_eq!(
            state.result,
            Some(MatchResult::WonByWickets {
                team: "Sharks".into(),
                wickets: 6,
            })
        );
        assert!(events.contains(&EngineEvent::MatchCompleted {
            result: "Sharks won by 6 wickets".into()
        }));

        // Completion is terminal.
        assert_eq!(
            state.record_runs(1).unwrap_err(),
            InvalidEvent::MatchCompleted
        );
    }

    #[test]
    fn defending_side_wins_by_runs_when_overs_run_out() {
        let mut state = live_match(1);

        // One-over match: six singles set a target of 7.
        drive(&mut state, (0..6).map(|_| ScoringEvent::Runs(1)));
        assert_eq!(state.target, Some(7));
        resolve_gates(&mut state);

        // The chase manages only four.
        drive(&mut state, [1, 1, 0, 1, 1, 0].map(ScoringEvent::Runs));

        assert!(state.completed);
        assert_eq!(
            state.result,
            Some(MatchResult::WonByRuns {
                team: "Lions".into(),
                runs: 2,
            })
        );
    }

    #[test]
    fn level_scores_at_the_end_of_the_chase_tie_the_match() {
        let mut state = live_match(1);
        drive(&mut state, (0..6).map(|_| ScoringEvent::Runs(1)));
        resolve_gates(&mut state);
        drive(&mut state, [1, 1, 1, 1, 1, 1].map(ScoringEvent::Runs));

        assert!(state.completed);
        assert_eq!(state.result, Some(MatchResult::Tied));
    }

    #[test]
    fn second_innings_starts_from_a_clean_sheet() {
        let mut state = live_match(1);
        drive(&mut state, (0..6).map(|_| ScoringEvent::Runs(1)));

        assert_eq!(state.pending, PendingSelection::SecondInningsSetup);
        assert_eq!(state.over, 0);
        assert_eq!(state.ball_in_over, 0);
        assert!(state.striker.is_none());

        state
            .begin_second_innings(Openers {
                striker: "Sharks Batsman 1".into(),
                non_striker: "Sharks Batsman 2".into(),
                bowler: "Lions Bowler 1".into(),
            })
            .unwrap();

        let innings = state.current_innings();
        assert_eq!(innings.runs, 0);
        assert_eq!(innings.legal_balls, 0);
        assert!(innings.dismissed.is_empty());
        assert!(innings.log.is_empty());
        assert_eq!(innings.batting.len(), 2);
    }

    #[test]
    fn second_innings_openers_must_be_distinct_roster_members() {
        let mut state = live_match(1);
        drive(&mut state, (0..6).map(|_| ScoringEvent::Runs(1)));

        let err = state
            .begin_second_innings(Openers {
                striker: "Sharks Batsman 1".into(),
                non_striker: "Sharks Batsman 1".into(),
                bowler: "Lions Bowler 1".into(),
            })
            .unwrap_err();
        assert_eq!(
            err,
            InvalidEvent::DuplicateBatters {
                name: "Sharks Batsman 1".into()
            }
        );

        let err = state
            .begin_second_innings(Openers {
                striker: "Lions Batsman 1".into(),
                non_striker: "Sharks Batsman 2".into(),
                bowler: "Lions Bowler 1".into(),
            })
            .unwrap_err();
        assert!(matches!(err, InvalidEvent::NotOnBattingRoster { .. }));
    }

    #[test]
    fn commentary_window_is_truncated_to_the_latest_entries() {
        let mut state = live_match(20);
        drive(
            &mut state,
            (0..15).map(|n| ScoringEvent::Runs(if n % 2 == 0 { 0 } else { 1 })),
        );

        let window = state.commentary_window(12);
        assert_eq!(window.len(), 12);
        let full = state.commentary_window(usize::MAX);
        assert_eq!(&full[full.len() - 12..], window.as_slice());
        assert_eq!(
            state.last_ball().as_deref(),
            window.last().map(String::as_str)
        );
    }

    #[test]
    fn completion_marker_flips_exactly_once() {
        let mut state = live_match(1);
        drive(&mut state, (0..6).map(|_| ScoringEvent::Runs(1)));
        resolve_gates(&mut state);
        drive(&mut state, [1, 1, 1, 1, 1, 1].map(ScoringEvent::Runs));

        assert!(state.completed);
        assert!(state.mark_result_processed());
        assert!(!state.mark_result_processed());
    }
}
