//! Turning a placement decision into primitive game actions
//!
//! The executor is stateless: every call looks at the live piece, compares it
//! with the decision, and issues the single next primitive. Rotation comes
//! first, then horizontal shifts, then the drop.

use autotris_core::{GameState, Piece};
use autotris_types::GameAction;

use crate::placement::Placement;

/// How the final descent is performed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropStyle {
    /// One hard drop locks the piece immediately
    #[default]
    Hard,
    /// One soft drop per step until the piece locks
    Soft,
}

impl DropStyle {
    pub fn action(self) -> GameAction {
        match self {
            DropStyle::Hard => GameAction::HardDrop,
            DropStyle::Soft => GameAction::SoftDrop,
        }
    }
}

/// Result of one applied primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    pub action: GameAction,
    /// The piece locked during this step
    pub done: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecuteError {
    RotationBlocked,
    ShiftBlocked,
    NotPlayable,
    NoActive,
}

impl ExecuteError {
    pub fn code(self) -> &'static str {
        match self {
            ExecuteError::RotationBlocked | ExecuteError::ShiftBlocked => "blocked",
            ExecuteError::NotPlayable | ExecuteError::NoActive => "not_playable",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ExecuteError::RotationBlocked => "could not rotate to target rotation",
            ExecuteError::ShiftBlocked => "could not move to target column due to collision",
            ExecuteError::NotPlayable => "game is not playable",
            ExecuteError::NoActive => "no active piece",
        }
    }
}

impl std::fmt::Display for ExecuteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for ExecuteError {}

/// The next primitive that brings `piece` closer to `decision`
pub fn next_action(piece: &Piece, decision: &Placement, style: DropStyle) -> GameAction {
    if !piece.matches_rotation(decision.rotation) {
        GameAction::RotateCw
    } else if piece.x > decision.column {
        GameAction::MoveLeft
    } else if piece.x < decision.column {
        GameAction::MoveRight
    } else {
        style.action()
    }
}

/// Full action sequence from `piece` to `decision`, ending in one drop
pub fn plan_actions(piece: &Piece, decision: &Placement, style: DropStyle) -> Vec<GameAction> {
    let unique = piece.kind.unique_rotations();
    let turns = (decision.rotation % unique + unique - piece.rotation % unique) % unique;

    let mut plan = vec![GameAction::RotateCw; turns as usize];
    let shift = decision.column - piece.x;
    let step = if shift < 0 {
        GameAction::MoveLeft
    } else {
        GameAction::MoveRight
    };
    plan.extend(std::iter::repeat(step).take(shift.unsigned_abs() as usize));
    plan.push(style.action());
    plan
}

/// Apply exactly one primitive toward `decision` on the live state
pub fn apply_step(
    state: &mut GameState,
    decision: &Placement,
    style: DropStyle,
) -> Result<StepOutcome, ExecuteError> {
    if !state.playable() {
        return Err(ExecuteError::NotPlayable);
    }
    let Some(piece) = state.active() else {
        return Err(ExecuteError::NoActive);
    };

    let action = next_action(piece, decision, style);
    let piece_id = state.piece_id();

    if !state.apply_action(action) {
        return Err(match action {
            GameAction::RotateCw => ExecuteError::RotationBlocked,
            GameAction::MoveLeft | GameAction::MoveRight => ExecuteError::ShiftBlocked,
            _ => ExecuteError::NotPlayable,
        });
    }

    Ok(StepOutcome {
        action,
        done: state.piece_id() != piece_id || state.game_over(),
    })
}
