//! The game state machine.
//!
//! `GameMachine` owns every piece of mutable game state and is the only
//! thing that changes it. The front end reads it through the accessors and
//! reports player intents through the event methods. Each event method
//! reports whether it was applied. A refused intent leaves the state
//! untouched.
//!
//! ```text
//! welcome -> lobby -> map <-> puzzle -> meta -> debrief -> welcome
//!                      \________/________________^  (time expired)
//! ```

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::attempt::{Feedback, PuzzleAttempt};
use super::continents::{ContinentGraph, ContinentNode};
use super::session::{generate_room_code, normalize_room_code, DebriefReason, GameSession, Screen};
use super::timer::{Countdown, Delay};
use crate::config::Rules;
use crate::evaluator::{evaluate, Evaluation};
use crate::puzzle::{Catalog, PuzzleDefinition};

pub struct GameMachine {
    rules: Rules,
    catalog: Catalog,
    graph: ContinentGraph,
    session: GameSession,
    attempt: Option<PuzzleAttempt>,
    countdown: Countdown,
    feedback_timer: Option<Delay>,
}

impl GameMachine {
    pub fn new(catalog: Catalog, rules: Rules) -> Self {
        if catalog.playable_count() < rules.fragment_target {
            warn!(
                playable = catalog.playable_count(),
                target = rules.fragment_target,
                "catalog has fewer puzzles than the fragment target; meta screen is unreachable"
            );
        }

        GameMachine {
            graph: ContinentGraph::from_specs(catalog.continents()),
            session: GameSession::new(rules.time_limit_secs),
            attempt: None,
            countdown: Countdown::new(rules.tick),
            feedback_timer: None,
            catalog,
            rules,
        }
    }

    // ── Read side ──

    pub fn screen(&self) -> Screen {
        self.session.screen
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn continents(&self) -> &[ContinentNode] {
        self.graph.nodes()
    }

    pub fn attempt(&self) -> Option<&PuzzleAttempt> {
        self.attempt.as_ref()
    }

    pub fn active_puzzle(&self) -> Option<&PuzzleDefinition> {
        self.attempt
            .as_ref()
            .and_then(|a| self.catalog.lookup(&a.continent_id))
    }

    pub fn can_use_hint(&self) -> bool {
        match (&self.attempt, self.active_puzzle()) {
            (Some(attempt), Some(puzzle)) => {
                !attempt.clues_revealed && (self.session.hints_used as usize) < puzzle.clues.len()
            }
            _ => false,
        }
    }

    /// Clues currently on screen for the active puzzle.
    pub fn visible_clues(&self) -> &[String] {
        match (&self.attempt, self.active_puzzle()) {
            (Some(attempt), Some(puzzle)) => attempt.visible_clues(puzzle, self.session.hints_used),
            _ => &[],
        }
    }

    /// First cultural fact of each completed continent, in map order.
    pub fn learned(&self) -> Vec<(&str, &str)> {
        self.graph
            .completed()
            .filter_map(|node| {
                let fact = self.catalog.lookup(&node.id)?.cultural_facts.first()?;
                Some((node.name.as_str(), fact.as_str()))
            })
            .collect()
    }

    /// How long the front end may sleep before `update` has work to do.
    pub fn next_wakeup(&self, now: Instant) -> Option<Duration> {
        let tick = self.countdown.until_next(now);
        if self.feedback_timer.is_some() {
            // Delays anchor on their first poll; come back soon to check
            return Some(tick.map_or(Duration::from_millis(50), |t| t.min(Duration::from_millis(50))));
        }
        tick
    }

    // ── Welcome / lobby ──

    pub fn set_player_name(&mut self, name: &str) -> bool {
        if self.session.screen != Screen::Welcome {
            return false;
        }
        self.session.player_name = name.to_string();
        true
    }

    pub fn set_room_code(&mut self, code: &str) -> bool {
        if self.session.screen != Screen::Welcome {
            return false;
        }
        self.session.room_code = normalize_room_code(code);
        true
    }

    /// Welcome -> lobby. Needs a player name; keeps a typed room code or
    /// makes one up.
    pub fn enter_lobby(&mut self) -> bool {
        if self.session.screen != Screen::Welcome || self.session.player_name.is_empty() {
            debug!("lobby refused: no player name");
            return false;
        }
        if self.session.room_code.is_empty() {
            self.session.room_code = generate_room_code(&mut rand::thread_rng());
        }
        info!(player = %self.session.player_name, room = %self.session.room_code, "joined lobby");
        self.transition(Screen::Lobby);
        true
    }

    pub fn begin_session(&mut self) -> bool {
        if self.session.screen != Screen::Lobby {
            return false;
        }
        self.transition(Screen::Map);
        if self.session.time_remaining == 0 {
            self.expire();
        }
        true
    }

    // ── Map / puzzle ──

    /// Locked and puzzle-less continents are ignored.
    pub fn select_continent(&mut self, id: &str) -> bool {
        if self.session.screen != Screen::Map {
            return false;
        }
        if !self.graph.is_unlocked(id) || self.catalog.lookup(id).is_none() {
            debug!(continent = id, "continent not selectable");
            return false;
        }
        self.transition(Screen::Puzzle);
        self.attempt = Some(PuzzleAttempt::new(id));
        info!(continent = id, "puzzle opened");
        true
    }

    pub fn set_answer_input(&mut self, text: &str) -> bool {
        match self.attempt.as_mut() {
            Some(attempt) if !attempt.is_settling() => {
                attempt.input = text.to_string();
                true
            }
            _ => false,
        }
    }

    /// Evaluates `text` against the open puzzle.
    ///
    /// A correct answer shows its feedback for `correct_feedback` before
    /// the solve is applied; a wrong one shows feedback for
    /// `incorrect_feedback` and can be retried at once.
    pub fn submit_answer(&mut self, text: &str) -> Option<Evaluation> {
        if self.session.screen != Screen::Puzzle {
            return None;
        }
        let attempt = self.attempt.as_mut().filter(|a| !a.is_settling())?;
        let puzzle = self.catalog.lookup(&attempt.continent_id)?;

        let evaluation = evaluate(puzzle, text);
        attempt.input = text.to_string();
        match evaluation.fragment() {
            Some(fragment) => {
                info!(continent = %attempt.continent_id, %fragment, "answer accepted");
                attempt.feedback = Some(Feedback::Correct);
                attempt.pending_fragment = Some(fragment);
                if self.rules.correct_feedback.is_zero() {
                    self.commit_solve();
                } else {
                    self.feedback_timer = Some(Delay::new(self.rules.correct_feedback));
                }
            }
            None => {
                debug!(continent = %attempt.continent_id, "answer rejected");
                attempt.feedback = Some(Feedback::Incorrect);
                self.feedback_timer = Some(Delay::new(self.rules.incorrect_feedback));
            }
        }
        Some(evaluation)
    }

    /// Spends a hint: one more clue, minus the time penalty.
    ///
    /// Allowed once per puzzle visit, and only while the session-wide hint
    /// count is below this puzzle's clue count.
    pub fn use_hint(&mut self) -> bool {
        if self.session.screen != Screen::Puzzle || !self.can_use_hint() {
            debug!("hint refused");
            return false;
        }
        let Some(attempt) = self.attempt.as_mut() else {
            return false;
        };

        attempt.clues_revealed = true;
        self.session.hints_used += 1;
        self.session.time_remaining = self
            .session
            .time_remaining
            .saturating_sub(self.rules.hint_penalty_secs);
        info!(
            hints_used = self.session.hints_used,
            time_remaining = self.session.time_remaining,
            "hint used"
        );

        if self.session.time_remaining == 0 {
            self.expire();
        }
        true
    }

    pub fn go_back_to_map(&mut self) -> bool {
        if self.session.screen != Screen::Puzzle {
            return false;
        }
        if self.attempt.as_ref().is_some_and(PuzzleAttempt::is_settling) {
            debug!("back refused: solve in progress");
            return false;
        }
        self.transition(Screen::Map);
        true
    }

    // ── Meta / debrief ──

    /// Meta -> debrief. The key is recorded, not checked.
    pub fn submit_final_key(&mut self, key: &str) -> bool {
        if self.session.screen != Screen::Meta {
            return false;
        }
        info!(key, fragments = %self.session.fragment_key(), "final key submitted");
        self.session.final_key = Some(key.to_string());
        self.session.debrief_reason = Some(DebriefReason::KeySubmitted);
        self.transition(Screen::Debrief);
        true
    }

    /// Debrief -> welcome with a fresh session and map. The player name
    /// and room code are kept for the welcome form.
    pub fn restart(&mut self) -> bool {
        if self.session.screen != Screen::Debrief {
            return false;
        }
        let mut fresh = GameSession::new(self.rules.time_limit_secs);
        fresh.player_name = std::mem::take(&mut self.session.player_name);
        fresh.room_code = std::mem::take(&mut self.session.room_code);
        self.session = fresh;
        self.graph.reset();
        self.transition(Screen::Welcome);
        info!("game restarted");
        true
    }

    // ── Time ──

    /// One countdown interval.
    pub fn tick(&mut self) {
        if !self.session.screen.is_active() {
            return;
        }
        self.session.time_remaining = self.session.time_remaining.saturating_sub(1);
        if self.session.time_remaining == 0 {
            self.expire();
        }
    }

    /// Applies whatever wall-clock work is due at `now`.
    pub fn update(&mut self, now: Instant) {
        let ticks = self.countdown.poll(now);
        for _ in 0..ticks {
            if !self.session.screen.is_active() {
                break;
            }
            self.tick();
        }

        let due = self
            .feedback_timer
            .as_mut()
            .is_some_and(|delay| delay.elapsed(now));
        if due {
            self.feedback_timer = None;
            self.settle_feedback();
        }
    }

    // ── Internals ──

    fn settle_feedback(&mut self) {
        match self.attempt.as_mut() {
            Some(attempt) if attempt.is_settling() => self.commit_solve(),
            Some(attempt) => attempt.feedback = None,
            None => {}
        }
    }

    fn commit_solve(&mut self) {
        let Some(attempt) = self.attempt.take() else {
            return;
        };
        let Some(fragment) = attempt.pending_fragment else {
            self.attempt = Some(attempt);
            return;
        };

        self.session.fragments.push(fragment);
        self.graph.unlock_next(&attempt.continent_id);

        let collected = self.session.fragments.len();
        info!(continent = %attempt.continent_id, collected, "fragment collected");
        if collected >= self.rules.fragment_target {
            self.transition(Screen::Meta);
        } else {
            self.transition(Screen::Map);
        }
    }

    fn expire(&mut self) {
        warn!(screen = ?self.session.screen, "time expired");
        self.session.debrief_reason = Some(DebriefReason::TimeExpired);
        self.transition(Screen::Debrief);
    }

    fn transition(&mut self, to: Screen) {
        let from = self.session.screen;
        self.session.screen = to;

        self.attempt = None;
        self.feedback_timer = None;

        if to.is_active() {
            self.countdown.arm();
        } else {
            self.countdown.disarm();
        }
        info!(?from, ?to, "screen changed");
    }
}
