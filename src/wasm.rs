//! Browser-facing wrapper around [`Game`]. Each `Session` owns one game.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::ai::{CpuConfig, CpuPlayer, Difficulty};
use crate::game::Game;
use crate::types::Position;

#[wasm_bindgen]
pub struct Session {
    game: Game,
    config: CpuConfig,
    games_started: u64,
}

#[wasm_bindgen]
impl Session {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> Session {
        Self::from_config(CpuConfig::default().with_seed(seed))
    }

    /// Builds a session from a `CpuConfig` object; missing fields take defaults.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config: JsValue) -> Result<Session, JsError> {
        let config: CpuConfig = serde_wasm_bindgen::from_value(config)?;
        Ok(Self::from_config(config))
    }

    /// Starts over. Each game draws from its own seed so the CPU does not
    /// replay the previous game's choices.
    #[wasm_bindgen(js_name = newGame)]
    pub fn new_game(&mut self) {
        self.games_started += 1;
        self.game = game_with_seed(self.config, self.games_started);
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        to_js(&self.game.snapshot())
    }

    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsError> {
        to_js(&self.game.legal_moves())
    }

    #[wasm_bindgen(js_name = playMove)]
    pub fn play_move(&mut self, row: u8, col: u8) -> Result<JsValue, JsError> {
        let result = self.game.play_move(Position::new(row, col)?)?;
        to_js(&result)
    }

    /// Returns the CPU's choice without playing it.
    #[wasm_bindgen(js_name = cpuMove)]
    pub fn cpu_move(&mut self, difficulty: u8) -> Result<JsValue, JsError> {
        let difficulty = Difficulty::try_from(difficulty)?;
        to_js(&self.game.cpu_move(difficulty)?)
    }

    #[wasm_bindgen(js_name = playCpuTurn)]
    pub fn play_cpu_turn(&mut self, difficulty: u8) -> Result<JsValue, JsError> {
        let difficulty = Difficulty::try_from(difficulty)?;
        to_js(&self.game.play_cpu_turn(difficulty)?)
    }

    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.game.is_terminal()
    }

    /// `undefined` while the game is running.
    pub fn result(&self) -> Result<JsValue, JsError> {
        to_js(&self.game.result())
    }
}

impl Session {
    fn from_config(config: CpuConfig) -> Self {
        Self {
            game: game_with_seed(config, 0),
            config,
            games_started: 0,
        }
    }
}

fn game_with_seed(config: CpuConfig, game_index: u64) -> Game {
    let seed = config.seed.wrapping_add(game_index);
    Game::new(Box::new(CpuPlayer::new(config.with_seed(seed))))
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    Ok(serde_wasm_bindgen::to_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn easy_picks(session: &mut Session) -> Vec<Position> {
        (0..20)
            .map(|_| session.game.cpu_move(Difficulty::Easy).unwrap())
            .collect()
    }

    #[test]
    fn new_game_reseeds_the_cpu() {
        let mut first = Session::new(11);
        let mut replay = Session::new(11);
        let mut restarted = Session::new(11);
        restarted.new_game();

        let picks = easy_picks(&mut first);

        assert_eq!(picks, easy_picks(&mut replay));
        assert_ne!(picks, easy_picks(&mut restarted));
        assert_eq!(restarted.games_started, 1);
    }
}
