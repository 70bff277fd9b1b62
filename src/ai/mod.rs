//! Computer opponents: the `Agent` trait, the window heuristic, alpha-beta and
//! Monte Carlo search, and a background search worker.

mod agent;
pub mod alphabeta;
pub mod heuristic;
pub mod monte_carlo;
mod worker;

pub use agent::Agent;
pub use alphabeta::{AlphaBetaAgent, WIN_SCORE};
pub use heuristic::{Heuristic, WindowHeuristic};
pub use monte_carlo::MonteCarloAgent;
pub use worker::{SearchReply, SearchWorker};
