use crate::ai::SearchWorker;
use crate::config::AppConfig;
use crate::engine::{GameStatus, OpponentMode, TurnEngine, COMPUTER_PLAYER};
use crate::error::MoveError;
use crate::game::{CENTER_COL, COLS};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::debug;
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::Duration;

pub struct App {
    engine: TurnEngine,
    worker: Option<SearchWorker>,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let engine = TurnEngine::new(config);
        let worker = engine.opponent_agent().map(SearchWorker::spawn);
        App {
            engine,
            worker,
            selected_column: CENTER_COL,
            should_quit: false,
            message: None,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.poll_computer();
            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                if self.selected_column > 0 {
                    self.selected_column -= 1;
                }
            }
            KeyCode::Right => {
                if self.selected_column < COLS - 1 {
                    self.selected_column += 1;
                }
            }
            KeyCode::Char(c @ '1'..='7') => {
                self.selected_column = (c as usize) - ('1' as usize);
                self.drop_piece();
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('r') => {
                self.cancel_search();
                self.engine.reset();
                self.selected_column = CENTER_COL;
                self.message = Some("Game restarted!".to_string());
            }
            KeyCode::Char('m') => {
                self.switch_mode(self.engine.mode().next());
            }
            _ => {}
        }
    }

    fn switch_mode(&mut self, mode: OpponentMode) {
        self.cancel_search();
        self.engine.new_game(mode);
        self.worker = self.engine.opponent_agent().map(SearchWorker::spawn);
        self.selected_column = CENTER_COL;
        self.message = Some(format!("New game: {}", mode.label()));
    }

    fn cancel_search(&mut self) {
        if let Some(worker) = self.worker.as_mut() {
            worker.cancel();
        }
    }

    fn is_thinking(&self) -> bool {
        self.worker.as_ref().is_some_and(SearchWorker::is_busy)
    }

    /// Drop piece in selected column
    fn drop_piece(&mut self) {
        if self.engine.status() != GameStatus::InProgress {
            self.message = Some("Game over! Press 'r' to restart or 'm' for a new opponent.".to_string());
            return;
        }
        if self.is_thinking() || self.engine.computer_to_move() {
            self.message = Some("The computer is thinking...".to_string());
            return;
        }

        match self.engine.apply_move(self.selected_column) {
            Ok(_) => {
                self.announce_result();
                self.start_search();
            }
            Err(MoveError::ColumnFull { .. }) => {
                self.message = Some("Column is full!".to_string());
            }
            Err(err) => {
                self.message = Some(format!("Invalid move: {err}"));
            }
        }
    }

    fn start_search(&mut self) {
        if !self.engine.computer_to_move() {
            return;
        }
        if let Some(worker) = self.worker.as_mut() {
            let ticket = worker.request(self.engine.current_board(), COMPUTER_PLAYER);
            debug!("search {ticket} started");
        }
    }

    /// Apply the computer's move once the worker has one.
    fn poll_computer(&mut self) {
        let Some(reply) = self.worker.as_mut().and_then(SearchWorker::try_reply) else {
            return;
        };
        let Some(column) = reply.column else {
            return;
        };
        match self.engine.apply_move(column) {
            Ok(placement) => {
                self.message = Some(format!("Computer plays column {}", placement.column + 1));
                self.announce_result();
            }
            Err(err) => {
                self.message = Some(format!("Computer move rejected: {err}"));
            }
        }
    }

    fn announce_result(&mut self) {
        match self.engine.status() {
            GameStatus::Won(player) => {
                self.message = Some(format!("{} wins!", player.name()));
            }
            GameStatus::Draw => {
                self.message = Some("It's a draw!".to_string());
            }
            GameStatus::InProgress => {}
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(
            frame,
            &self.engine,
            self.selected_column,
            &self.message,
            self.is_thinking(),
        );
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Board, Player};
    use crossterm::event::KeyModifiers;
    use std::thread;
    use std::time::Instant;

    fn app(mode: OpponentMode) -> App {
        let mut config = AppConfig::default();
        config.game.opponent = mode;
        config.monte_carlo.simulations_per_move = 20;
        config.monte_carlo.seed = Some(11);
        App::new(config)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    /// Poll the worker the way the event loop does until `done` holds.
    fn poll_until(app: &mut App, done: impl Fn(&App) -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_secs(30);
        while Instant::now() < deadline {
            app.poll_computer();
            if done(app) {
                return true;
            }
            thread::sleep(Duration::from_millis(5));
        }
        false
    }

    #[test]
    fn computer_reply_is_applied_when_polled() {
        let mut app = app(OpponentMode::HumanVsAlphaBeta);
        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.engine.moves_played(), 1);
        assert!(app.is_thinking());

        assert!(poll_until(&mut app, |a| a.engine.moves_played() == 2));
        assert!(!app.is_thinking());
        assert_eq!(app.engine.current_player(), Player::One);
        assert!(app
            .message
            .as_deref()
            .is_some_and(|m| m.starts_with("Computer plays column")));
    }

    #[test]
    fn human_cannot_drop_while_computer_thinks() {
        let mut app = app(OpponentMode::HumanVsAlphaBeta);
        press(&mut app, KeyCode::Char('4'));
        press(&mut app, KeyCode::Char('1'));

        assert_eq!(app.engine.moves_played(), 1);
        assert_eq!(app.message.as_deref(), Some("The computer is thinking..."));
        assert!(poll_until(&mut app, |a| a.engine.moves_played() == 2));
    }

    #[test]
    fn restart_discards_search_in_flight() {
        let mut app = app(OpponentMode::HumanVsAlphaBeta);
        press(&mut app, KeyCode::Char('4'));
        press(&mut app, KeyCode::Char('r'));
        assert!(!app.is_thinking());

        // Let the abandoned search finish; its reply must not land on the new game.
        thread::sleep(Duration::from_millis(200));
        app.poll_computer();
        assert_eq!(app.engine.current_board(), Board::new());
        assert_eq!(app.engine.moves_played(), 0);
        assert_eq!(app.message.as_deref(), Some("Game restarted!"));

        press(&mut app, KeyCode::Char('1'));
        assert!(poll_until(&mut app, |a| a.engine.moves_played() == 2));
        assert_eq!(app.engine.current_board().get(5, 0).owner(), Some(Player::One));
    }

    #[test]
    fn mode_switch_starts_fresh_game_with_new_opponent() {
        let mut app = app(OpponentMode::HumanVsAlphaBeta);
        press(&mut app, KeyCode::Char('4'));
        press(&mut app, KeyCode::Char('m'));

        assert_eq!(app.engine.mode(), OpponentMode::HumanVsMonteCarlo);
        assert_eq!(app.engine.moves_played(), 0);
        assert!(!app.is_thinking());

        press(&mut app, KeyCode::Char('4'));
        assert!(poll_until(&mut app, |a| a.engine.moves_played() == 2));
    }

    #[test]
    fn human_vs_human_has_no_worker() {
        let mut app = app(OpponentMode::HumanVsHuman);
        assert!(app.worker.is_none());
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);

        let board = app.engine.current_board();
        assert_eq!(board.get(5, CENTER_COL + 1).owner(), Some(Player::One));
        assert_eq!(board.get(4, CENTER_COL + 1).owner(), Some(Player::Two));
        assert!(!app.is_thinking());
    }
}
