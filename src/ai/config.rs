use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// CPU strength as stored by the settings screen (0, 1, 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Normal,
    Hard,
}

impl TryFrom<u8> for Difficulty {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Difficulty::Easy),
            1 => Ok(Difficulty::Normal),
            2 => Ok(Difficulty::Hard),
            other => Err(EngineError::InvalidDifficulty(other)),
        }
    }
}

/// How the CPU picks among legal moves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Policy {
    /// Roulette over moves ranked by corner, edge and flip count.
    /// Larger exponents push the choice toward the best-ranked moves.
    Weighted { exponent: f32 },
    /// Alpha-beta minimax to `depth` plies, solving the endgame exactly once
    /// no more than `exact_solve_empties` squares remain.
    Minimax { depth: u8, exact_solve_empties: u8 },
}

const DEFAULT_TIMEOUT_MS: u64 = 2_000;
const DEFAULT_SEED: u64 = 0x0E11_0C0D_5EED;

/// Per-difficulty CPU settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CpuConfig {
    pub easy: Policy,
    pub normal: Policy,
    pub hard: Policy,
    /// Wall-clock budget for one minimax selection.
    pub timeout_ms: u64,
    pub seed: u64,
}

impl CpuConfig {
    pub fn policy_for(&self, difficulty: Difficulty) -> Policy {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Normal => self.normal,
            Difficulty::Hard => self.hard,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self {
            easy: Policy::Weighted { exponent: 0.5 },
            normal: Policy::Weighted { exponent: 3.0 },
            hard: Policy::Minimax {
                depth: 4,
                exact_solve_empties: 10,
            },
            timeout_ms: DEFAULT_TIMEOUT_MS,
            seed: DEFAULT_SEED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_from_stored_index() {
        assert_eq!(Difficulty::try_from(0), Ok(Difficulty::Easy));
        assert_eq!(Difficulty::try_from(2), Ok(Difficulty::Hard));
        assert_eq!(
            Difficulty::try_from(3),
            Err(EngineError::InvalidDifficulty(3))
        );
    }

    #[test]
    fn default_tiers_grow_stronger() {
        let config = CpuConfig::default();

        let Policy::Weighted { exponent: easy } = config.policy_for(Difficulty::Easy) else {
            panic!("easy should be weighted");
        };
        let Policy::Weighted { exponent: normal } = config.policy_for(Difficulty::Normal) else {
            panic!("normal should be weighted");
        };
        assert!(normal > easy);
        assert!(matches!(
            config.policy_for(Difficulty::Hard),
            Policy::Minimax { .. }
        ));
    }
}
