//! Terminal UI for playing Connect Four against a human or the computer.

mod app;
mod game_view;

pub use app::App;
