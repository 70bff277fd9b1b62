//! # Connect Four Engine
//!
//! Connect Four against a human or one of two computer opponents, with a
//! terminal UI built on Ratatui.
//!
//! ## Modules
//!
//! - [`game`] — Board, players, move legality and four-in-a-row detection
//! - [`ai`] — Agent trait, window heuristic, alpha-beta and Monte Carlo search,
//!   background search worker
//! - [`engine`] — Turn orchestration for one game session
//! - [`ui`] — Terminal UI: board view and key handling
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod ui;
