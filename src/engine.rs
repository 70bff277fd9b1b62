//! Turn orchestration for a single game: validates and applies moves, tracks
//! whose turn it is, detects the end of the game and lets the configured
//! computer opponent answer human moves.

use log::{debug, info, warn};

use crate::ai::{Agent, AlphaBetaAgent, MonteCarloAgent};
use crate::config::AppConfig;
use crate::error::MoveError;
use crate::game::{is_valid_move, winner, Board, Player, COLS};

/// The seat the computer takes in the human-vs-computer modes.
pub const COMPUTER_PLAYER: Player = Player::Two;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpponentMode {
    HumanVsHuman,
    HumanVsAlphaBeta,
    HumanVsMonteCarlo,
}

impl OpponentMode {
    pub fn label(self) -> &'static str {
        match self {
            OpponentMode::HumanVsHuman => "Human vs Human",
            OpponentMode::HumanVsAlphaBeta => "Human vs Alpha-Beta",
            OpponentMode::HumanVsMonteCarlo => "Human vs Monte Carlo",
        }
    }

    /// Whether the second seat is played by the computer.
    pub fn has_computer(self) -> bool {
        self != OpponentMode::HumanVsHuman
    }

    /// The next mode in menu order, wrapping around.
    pub fn next(self) -> OpponentMode {
        match self {
            OpponentMode::HumanVsHuman => OpponentMode::HumanVsAlphaBeta,
            OpponentMode::HumanVsAlphaBeta => OpponentMode::HumanVsMonteCarlo,
            OpponentMode::HumanVsMonteCarlo => OpponentMode::HumanVsHuman,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(Player),
    Draw,
}

/// Where a token landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub player: Player,
    pub column: usize,
    pub row: usize,
}

/// Result of an accepted human move, including the computer's answer when
/// one was played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accepted {
    pub placed: Placement,
    pub reply: Option<Placement>,
    pub status: GameStatus,
}

/// Build the agent that plays the computer seat for `mode`.
pub fn build_opponent(mode: OpponentMode, config: &AppConfig) -> Option<Box<dyn Agent>> {
    match mode {
        OpponentMode::HumanVsHuman => None,
        OpponentMode::HumanVsAlphaBeta => {
            let agent = AlphaBetaAgent::new(config.alphabeta.depth);
            info!("alpha-beta opponent searches {} plies", agent.depth());
            Some(Box::new(agent))
        }
        OpponentMode::HumanVsMonteCarlo => {
            let sims = config.monte_carlo.simulations_per_move;
            let agent = match config.monte_carlo.seed {
                Some(seed) => MonteCarloAgent::with_seed(sims, seed),
                None => MonteCarloAgent::new(sims),
            };
            info!(
                "monte carlo opponent runs {} playouts per column",
                agent.simulations_per_move()
            );
            Some(Box::new(agent))
        }
    }
}

/// Owns the board of record for one game session.
pub struct TurnEngine {
    config: AppConfig,
    mode: OpponentMode,
    opponent: Option<Box<dyn Agent>>,
    board: Board,
    to_move: Player,
    status: GameStatus,
    moves_played: usize,
}

impl TurnEngine {
    /// Start a game in the mode named by `config.game.opponent`.
    pub fn new(config: AppConfig) -> Self {
        let mode = config.game.opponent;
        let opponent = build_opponent(mode, &config);
        info!("new game: {}", mode.label());
        TurnEngine {
            config,
            mode,
            opponent,
            board: Board::new(),
            to_move: Player::One,
            status: GameStatus::InProgress,
            moves_played: 0,
        }
    }

    pub fn current_board(&self) -> Board {
        self.board
    }

    pub fn current_player(&self) -> Player {
        self.to_move
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn mode(&self) -> OpponentMode {
        self.mode
    }

    pub fn moves_played(&self) -> usize {
        self.moves_played
    }

    /// A fresh copy of the computer opponent, for running it elsewhere.
    pub fn opponent_agent(&self) -> Option<Box<dyn Agent>> {
        self.opponent.as_ref().map(|agent| agent.clone_agent())
    }

    /// True when the game is live and the computer holds the move.
    pub fn computer_to_move(&self) -> bool {
        self.status == GameStatus::InProgress
            && self.mode.has_computer()
            && self.to_move == COMPUTER_PLAYER
    }

    /// Apply a human move. When the computer holds the next move it answers
    /// immediately, before this returns.
    pub fn request_move(&mut self, column: usize) -> Result<Accepted, MoveError> {
        if self.status != GameStatus::InProgress {
            return Err(MoveError::GameOver);
        }
        if self.computer_to_move() {
            return Err(MoveError::NotHumanTurn);
        }

        let placed = self.apply_move(column)?;
        let reply = self.play_computer_move();

        Ok(Accepted {
            placed,
            reply,
            status: self.status,
        })
    }

    /// Commit one move for whoever is to move, without a computer answer.
    pub fn apply_move(&mut self, column: usize) -> Result<Placement, MoveError> {
        if self.status != GameStatus::InProgress {
            return Err(MoveError::GameOver);
        }
        if !is_valid_move(&self.board, column) {
            return Err(if column >= COLS {
                MoveError::ColumnOutOfRange { column }
            } else {
                MoveError::ColumnFull { column }
            });
        }

        let player = self.to_move;
        let row = self.board.place(column, player)?;
        self.moves_played += 1;
        self.to_move = player.other();
        debug!("{} plays column {column} (row {row})", player.name());

        self.status = match winner(&self.board) {
            Some(p) => GameStatus::Won(p),
            None if self.board.is_full() => GameStatus::Draw,
            None => GameStatus::InProgress,
        };
        match self.status {
            GameStatus::Won(p) => info!("{} wins after {} moves", p.name(), self.moves_played),
            GameStatus::Draw => info!("draw after {} moves", self.moves_played),
            GameStatus::InProgress => {}
        }

        Ok(Placement { player, column, row })
    }

    /// Let the computer choose and play its move, if it holds the move.
    pub fn play_computer_move(&mut self) -> Option<Placement> {
        if !self.computer_to_move() {
            return None;
        }
        let me = self.to_move;
        let column = self.opponent.as_mut()?.select_column(&self.board, me)?;
        match self.apply_move(column) {
            Ok(placement) => Some(placement),
            Err(e) => {
                warn!("computer chose column {column} but it was rejected: {e}");
                None
            }
        }
    }

    /// Empty the board and give player 1 the move. The mode is kept.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.to_move = Player::One;
        self.status = GameStatus::InProgress;
        self.moves_played = 0;
        info!("game restarted: {}", self.mode.label());
    }

    /// Reset and switch to a different opponent.
    pub fn new_game(&mut self, mode: OpponentMode) {
        self.mode = mode;
        self.opponent = build_opponent(mode, &self.config);
        self.reset();
    }
}
