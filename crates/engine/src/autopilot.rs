//! Autopilot: decide once per piece, then feed the executor one step per tick.

use autotris_core::GameState;
use autotris_types::GameAction;

use crate::executor::{apply_step, DropStyle, ExecuteError, StepOutcome};
use crate::search::{choose_scored_move, ScoredPlacement};

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    style: DropStyle,
    /// Decision for the piece with this id
    current: Option<(u32, Option<ScoredPlacement>)>,
    decisions: u32,
}

impl Autopilot {
    pub fn new(style: DropStyle) -> Self {
        Self {
            style,
            current: None,
            decisions: 0,
        }
    }

    /// Number of searches run so far
    pub fn decisions(&self) -> u32 {
        self.decisions
    }

    /// Decision for the current piece, if one has been made
    pub fn current(&self) -> Option<&ScoredPlacement> {
        self.current.as_ref().and_then(|(_, best)| best.as_ref())
    }

    /// Search for the active piece unless it already has a decision
    fn refresh(&mut self, state: &GameState) {
        let piece_id = state.piece_id();
        if matches!(self.current, Some((id, _)) if id == piece_id) {
            return;
        }
        let best = state
            .active()
            .and_then(|piece| choose_scored_move(state.board(), piece));
        self.decisions += 1;
        self.current = Some((piece_id, best));
    }

    /// Advance the live game by one primitive.
    ///
    /// A piece with no reachable placement is hard dropped where it stands.
    pub fn step(&mut self, state: &mut GameState) -> Result<StepOutcome, ExecuteError> {
        if !state.playable() {
            return Err(ExecuteError::NotPlayable);
        }
        if state.active().is_none() {
            return Err(ExecuteError::NoActive);
        }

        self.refresh(state);
        match self.current().map(|best| best.placement) {
            Some(decision) => apply_step(state, &decision, self.style),
            None => {
                let piece_id = state.piece_id();
                state.apply_action(GameAction::HardDrop);
                Ok(StepOutcome {
                    action: GameAction::HardDrop,
                    done: state.piece_id() != piece_id || state.game_over(),
                })
            }
        }
    }
}
