//! Game phase machine, score and lives
//!
//! The simulation only requests terminal transitions through events; every
//! phase change goes through [`GameSession`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::GameEvent;
use crate::consts::STARTING_LIVES;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen
    #[default]
    Menu,
    /// Active gameplay; the only phase in which physics runs
    Playing,
    /// The player died
    GameOver,
    /// The goal was reached
    Victory,
}

/// Requested transition that is not allowed from the current phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot {action} while in {from:?}")]
pub struct TransitionError {
    pub from: GamePhase,
    pub action: &'static str,
}

/// Where a retry leads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryOutcome {
    /// Lives remain; the same level must be reloaded
    Replay,
    /// Out of lives; back to the menu
    OutOfLives,
}

/// Phase, score and lives for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    phase: GamePhase,
    pub score: u64,
    pub lives: u8,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Menu,
            score: 0,
            lives: STARTING_LIVES,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::info!("Phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    /// Menu -> Playing with a fresh run
    pub fn start(&mut self) -> Result<(), TransitionError> {
        if self.phase != GamePhase::Menu {
            return Err(TransitionError {
                from: self.phase,
                action: "start a run",
            });
        }
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.set_phase(GamePhase::Playing);
        Ok(())
    }

    /// Fold one frame's events into the session. Ignored outside `Playing`.
    pub fn apply(&mut self, events: &[GameEvent]) {
        if self.phase != GamePhase::Playing {
            return;
        }
        for event in events {
            match *event {
                GameEvent::CoinCollected { points, .. } => {
                    self.score = self.score.saturating_add(points)
                }
                GameEvent::EnemyStomped { .. } => {}
                GameEvent::PlayerDied { cause } => {
                    log::info!("Player died: {:?}", cause);
                    self.lives = self.lives.saturating_sub(1);
                    self.set_phase(GamePhase::GameOver);
                }
                GameEvent::GoalReached => {
                    log::info!("Level clear with score {}", self.score);
                    self.set_phase(GamePhase::Victory);
                }
            }
            if event.is_terminal() {
                return;
            }
        }
    }

    /// GameOver -> Playing (same level) or Menu when no lives remain
    pub fn retry(&mut self) -> Result<RetryOutcome, TransitionError> {
        if self.phase != GamePhase::GameOver {
            return Err(TransitionError {
                from: self.phase,
                action: "retry",
            });
        }
        if self.lives > 0 {
            self.set_phase(GamePhase::Playing);
            Ok(RetryOutcome::Replay)
        } else {
            self.set_phase(GamePhase::Menu);
            Ok(RetryOutcome::OutOfLives)
        }
    }

    /// Victory -> Playing on a new level; the score starts over
    pub fn next_level(&mut self) -> Result<(), TransitionError> {
        if self.phase != GamePhase::Victory {
            return Err(TransitionError {
                from: self.phase,
                action: "advance to the next level",
            });
        }
        self.score = 0;
        self.set_phase(GamePhase::Playing);
        Ok(())
    }

    /// Any phase -> Menu
    pub fn to_menu(&mut self) {
        self.set_phase(GamePhase::Menu);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::EntityId;
    use crate::sim::state::DeathCause;

    fn died() -> GameEvent {
        GameEvent::PlayerDied {
            cause: DeathCause::FellOutOfWorld,
        }
    }

    #[test]
    fn test_start_from_menu_only() {
        let mut session = GameSession::new();
        assert_eq!(session.phase(), GamePhase::Menu);
        session.start().unwrap();
        assert!(session.is_playing());
        assert_eq!(
            session.start(),
            Err(TransitionError {
                from: GamePhase::Playing,
                action: "start a run"
            })
        );
    }

    #[test]
    fn test_score_and_death() {
        let mut session = GameSession::new();
        session.start().unwrap();
        session.apply(&[
            GameEvent::CoinCollected {
                coin: EntityId(3),
                points: 100,
            },
            GameEvent::EnemyStomped { enemy: EntityId(4) },
            GameEvent::CoinCollected {
                coin: EntityId(5),
                points: 100,
            },
        ]);
        assert_eq!(session.score, 200);

        session.apply(&[died()]);
        assert_eq!(session.phase(), GamePhase::GameOver);
        assert_eq!(session.lives, STARTING_LIVES - 1);

        // Events after the phase left Playing are ignored
        session.apply(&[GameEvent::GoalReached]);
        assert_eq!(session.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_score_saturates() {
        let mut session = GameSession::new();
        session.start().unwrap();
        let coin = GameEvent::CoinCollected {
            coin: EntityId(0),
            points: u64::MAX,
        };
        session.apply(&[coin, coin]);
        assert_eq!(session.score, u64::MAX);
        assert!(session.is_playing());
    }

    #[test]
    fn test_events_after_terminal_are_ignored() {
        let mut session = GameSession::new();
        session.start().unwrap();
        session.apply(&[
            GameEvent::GoalReached,
            died(),
            GameEvent::CoinCollected {
                coin: EntityId(3),
                points: 100,
            },
        ]);
        assert_eq!(session.phase(), GamePhase::Victory);
        assert_eq!(session.lives, STARTING_LIVES);
        assert_eq!(session.score, 0);
    }

    #[test]
    fn test_retry_until_out_of_lives() {
        let mut session = GameSession::new();
        session.start().unwrap();
        for remaining in (0..STARTING_LIVES).rev() {
            session.apply(&[died()]);
            assert_eq!(session.lives, remaining);
            let outcome = session.retry().unwrap();
            if remaining > 0 {
                assert_eq!(outcome, RetryOutcome::Replay);
                assert!(session.is_playing());
            } else {
                assert_eq!(outcome, RetryOutcome::OutOfLives);
                assert_eq!(session.phase(), GamePhase::Menu);
            }
        }
    }

    #[test]
    fn test_victory_then_next_level() {
        let mut session = GameSession::new();
        session.start().unwrap();
        session.apply(&[
            GameEvent::CoinCollected {
                coin: EntityId(1),
                points: 100,
            },
            GameEvent::GoalReached,
        ]);
        assert_eq!(session.phase(), GamePhase::Victory);
        assert_eq!(session.score, 100);
        assert!(session.retry().is_err());

        session.next_level().unwrap();
        assert!(session.is_playing());
        assert_eq!(session.score, 0);
    }

    #[test]
    fn test_to_menu_from_anywhere() {
        let mut session = GameSession::new();
        session.start().unwrap();
        session.apply(&[GameEvent::GoalReached]);
        session.to_menu();
        assert_eq!(session.phase(), GamePhase::Menu);
        session.start().unwrap();
        assert_eq!(session.lives, STARTING_LIVES);
    }
}
