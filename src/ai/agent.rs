use crate::game::{Board, Player};

/// Universal interface for computer opponents.
pub trait Agent: Send {
    /// Choose a column for `me` to play on `board`, or `None` if every
    /// column is full.
    fn select_column(&mut self, board: &Board, me: Player) -> Option<usize>;

    /// Return the agent's display name.
    fn name(&self) -> &str;

    /// Clone the agent into a boxed trait object.
    fn clone_agent(&self) -> Box<dyn Agent>;
}
