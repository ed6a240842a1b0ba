//! Scenario files: a board definition plus an ordered list of operations.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use repboard_core::error::BoardError;
use repboard_core::events::BoardEvent;
use repboard_core::types::{Identity, LeaderboardEntry, TokenId};
use repboard_engine::{Board, BoardInit, BoardSettings, StaticHoldings};

/// Board definition. Identities and tokens are labels or 64-char hex keys.
#[derive(Debug, Clone, Deserialize)]
pub struct BoardSpec {
    pub admin: String,
    pub token: String,
    pub min_token_balance: u64,
    pub role_thresholds: Vec<u64>,
    /// Clock value at initialization, Unix seconds.
    #[serde(default)]
    pub start: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Register { who: String },
    Vote { from: String, to: String, up: bool },
    Advance { secs: i64 },
    Decay,
    Reset { by: String },
    SetThresholds { by: String, thresholds: Vec<u64> },
    Fund { who: String, amount: u64 },
    Leaderboard,
}

impl Step {
    fn name(&self) -> &'static str {
        match self {
            Self::Register { .. } => "register",
            Self::Vote { .. } => "vote",
            Self::Advance { .. } => "advance",
            Self::Decay => "decay",
            Self::Reset { .. } => "reset",
            Self::SetThresholds { .. } => "set_thresholds",
            Self::Fund { .. } => "fund",
            Self::Leaderboard => "leaderboard",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// Board tunables. When absent, `REPBOARD_*` environment overrides apply.
    #[serde(default)]
    pub settings: Option<BoardSettings>,
    pub board: BoardSpec,
    /// Holdings of the board token by identity label.
    #[serde(default)]
    pub balances: BTreeMap<String, u64>,
    pub steps: Vec<Step>,
}

/// Result of one replayed step, printed as a JSON line.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub op: &'static str,
    pub now: i64,
    pub ok: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<BoardEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leaderboard: Option<Vec<LeaderboardEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of a full replay.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub members: u64,
    pub failed_steps: usize,
    pub leaderboard: Vec<LeaderboardEntry>,
}

/// Resolve a label or hex key to an identity.
pub fn identity(name: &str) -> Identity {
    name.parse().unwrap_or_else(|_| Identity::from_label(name))
}

fn token(name: &str) -> TokenId {
    name.parse().unwrap_or_else(|_| TokenId::from_label(name))
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing scenario {}", path.display()))
    }

    pub fn effective_settings(&self) -> Result<BoardSettings> {
        match &self.settings {
            Some(settings) => Ok(settings.clone()),
            None => BoardSettings::from_env().context("reading settings from environment"),
        }
    }

    /// Run every step against a fresh board.
    ///
    /// `report` is called after each step. With `keep_going` false the replay
    /// stops at the first failing step.
    pub fn replay<F>(&self, keep_going: bool, mut report: F) -> Result<Summary>
    where
        F: FnMut(&StepReport) -> Result<()>,
    {
        let token_id = token(&self.board.token);
        let holdings = Arc::new(StaticHoldings::new());
        for (who, amount) in &self.balances {
            holdings.set_balance(token_id, identity(who), *amount);
        }

        let init = BoardInit {
            admin: identity(&self.board.admin),
            required_token: token_id,
            min_token_balance: self.board.min_token_balance,
            role_thresholds: self.board.role_thresholds.clone(),
        };
        let settings = self.effective_settings()?;
        let mut now = self.board.start;
        let (board, init_event) = Board::initialize(init, settings, holdings.clone(), now)
                .context("initializing board")?;
        info!(event = %init_event, steps = self.steps.len(), "replay started");

        let mut failed_steps = 0;
        for (idx, step) in self.steps.iter().enumerate() {
            if let Step::Advance { secs } = step {
                now = now.saturating_add(*secs);
            }
            let outcome = apply(&board, &holdings, token_id, step, now);
            let mut rep = StepReport {
                step: idx,
                op: step.name(),
                now,
                ok: true,
                events: Vec::new(),
                leaderboard: None,
                code: None,
                error: None,
            };
            match outcome {
                Ok(Applied::Events(events)) => rep.events = events,
                Ok(Applied::Leaderboard(lb)) => rep.leaderboard = Some(lb),
                Ok(Applied::Nothing) => {}
                Err(e) => {
                    debug!(step = idx, code = e.code(), error = %e, "step failed");
                    rep.ok = false;
                    rep.code = Some(e.code());
                    rep.error = Some(e.to_string());
                    failed_steps += 1;
                }
            }
            report(&rep)?;
            if !rep.ok && !keep_going {
                break;
            }
        }

        Ok(Summary {
            members: board.member_count(),
            failed_steps,
            leaderboard: board.leaderboard(),
        })
    }
}

enum Applied {
    Events(Vec<BoardEvent>),
    Leaderboard(Vec<LeaderboardEntry>),
    Nothing,
}

fn apply(
    board: &Board,
    holdings: &StaticHoldings,
    token_id: TokenId,
    step: &Step,
    now: i64,
) -> Result<Applied, BoardError> {
    let events = match step {
        Step::Register { who } => vec![board.register_identity(identity(who), now)?],
        Step::Vote { from, to, up } => board.vote(identity(from), identity(to), *up, now)?.events,
        Step::Decay => vec![board.apply_decay(now)?],
        Step::Reset { by } => vec![board.reset_all_scores(identity(by))?],
        Step::SetThresholds { by, thresholds } => {
            vec![board.set_role_thresholds(identity(by), thresholds.clone())?]
        }
        Step::Fund { who, amount } => {
            holdings.set_balance(token_id, identity(who), *amount);
            return Ok(Applied::Nothing);
        }
        Step::Leaderboard => return Ok(Applied::Leaderboard(board.leaderboard())),
        Step::Advance { .. } => return Ok(Applied::Nothing),
    };
    Ok(Applied::Events(events))
}
