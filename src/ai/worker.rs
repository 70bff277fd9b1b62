//! Background search so an interactive front end stays responsive while the
//! computer thinks.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, warn};

use crate::game::{Board, Player};

use super::agent::Agent;

struct SearchRequest {
    ticket: u64,
    board: Board,
    me: Player,
}

/// A finished search, tagged with the ticket of the request that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchReply {
    pub ticket: u64,
    pub column: Option<usize>,
}

/// Owns an agent on its own thread. Requests and replies travel over
/// channels; a reply whose ticket is no longer current is dropped.
pub struct SearchWorker {
    requests: Option<Sender<SearchRequest>>,
    replies: Receiver<SearchReply>,
    handle: Option<JoinHandle<()>>,
    next_ticket: u64,
    pending: Option<u64>,
}

impl SearchWorker {
    pub fn spawn(mut agent: Box<dyn Agent>) -> Self {
        let (request_tx, request_rx) = mpsc::channel::<SearchRequest>();
        let (reply_tx, reply_rx) = mpsc::channel::<SearchReply>();

        let handle = thread::spawn(move || {
            for request in request_rx {
                let column = agent.select_column(&request.board, request.me);
                let reply = SearchReply {
                    ticket: request.ticket,
                    column,
                };
                if reply_tx.send(reply).is_err() {
                    break;
                }
            }
        });

        SearchWorker {
            requests: Some(request_tx),
            replies: reply_rx,
            handle: Some(handle),
            next_ticket: 0,
            pending: None,
        }
    }

    /// Queue a search for `me` on `board`. Any earlier pending search is
    /// abandoned. Returns the ticket of the new request.
    pub fn request(&mut self, board: Board, me: Player) -> u64 {
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        self.pending = Some(ticket);

        let sent = self
            .requests
            .as_ref()
            .map(|tx| tx.send(SearchRequest { ticket, board, me }).is_ok())
            .unwrap_or(false);
        if !sent {
            warn!("search worker is gone, request {ticket} dropped");
            self.pending = None;
        }
        ticket
    }

    /// Whether a search is outstanding.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Forget the outstanding search. Its reply is discarded when it arrives.
    pub fn cancel(&mut self) {
        if let Some(ticket) = self.pending.take() {
            debug!("search {ticket} abandoned");
        }
    }

    /// Non-blocking poll for the current search's reply.
    pub fn try_reply(&mut self) -> Option<SearchReply> {
        loop {
            match self.replies.try_recv() {
                Ok(reply) => {
                    if let Some(reply) = self.accept(reply) {
                        return Some(reply);
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return None,
            }
        }
    }

    /// Blocking wait for the current search's reply, up to `timeout`.
    pub fn wait_reply(&mut self, timeout: Duration) -> Option<SearchReply> {
        self.pending?;
        let deadline = std::time::Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(std::time::Instant::now());
            match self.replies.recv_timeout(remaining) {
                Ok(reply) => {
                    if let Some(reply) = self.accept(reply) {
                        return Some(reply);
                    }
                }
                Err(_) => return None,
            }
        }
    }

    fn accept(&mut self, reply: SearchReply) -> Option<SearchReply> {
        if self.pending == Some(reply.ticket) {
            self.pending = None;
            Some(reply)
        } else {
            debug!("discarding stale search reply {}", reply.ticket);
            None
        }
    }
}

impl Drop for SearchWorker {
    fn drop(&mut self) {
        // Closing the request channel ends the worker loop.
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::AlphaBetaAgent;

    fn forced_win_board() -> Board {
        Board::from_rows([
            ".......",
            ".......",
            ".......",
            ".......",
            ".......",
            "OOO....",
        ])
        .unwrap()
    }

    #[test]
    fn returns_search_result() {
        let mut worker = SearchWorker::spawn(Box::new(AlphaBetaAgent::new(2)));
        let ticket = worker.request(forced_win_board(), Player::Two);
        assert!(worker.is_busy());

        let reply = worker
            .wait_reply(Duration::from_secs(30))
            .expect("worker should reply");
        assert_eq!(reply.ticket, ticket);
        assert_eq!(reply.column, Some(3));
        assert!(!worker.is_busy());
    }

    #[test]
    fn newer_request_supersedes_older() {
        let mut worker = SearchWorker::spawn(Box::new(AlphaBetaAgent::new(2)));
        let first = worker.request(Board::new(), Player::Two);
        let second = worker.request(forced_win_board(), Player::Two);
        assert_ne!(first, second);

        let reply = worker
            .wait_reply(Duration::from_secs(30))
            .expect("worker should reply");
        assert_eq!(reply.ticket, second);
        assert_eq!(reply.column, Some(3));
    }

    #[test]
    fn cancelled_search_is_ignored() {
        let mut worker = SearchWorker::spawn(Box::new(AlphaBetaAgent::new(1)));
        worker.request(Board::new(), Player::Two);
        worker.cancel();
        assert!(!worker.is_busy());
        assert_eq!(worker.wait_reply(Duration::from_millis(50)), None);

        // Give the abandoned reply time to arrive, then make sure it is dropped.
        thread::sleep(Duration::from_millis(100));
        assert_eq!(worker.try_reply(), None);
    }

    #[test]
    fn full_board_replies_none() {
        let board = Board::from_rows([
            "XOXOXOX",
            "XOXOXOX",
            "OXOXOXO",
            "OXOXOXO",
            "XOXOXOX",
            "XOXOXOX",
        ])
        .unwrap();
        let mut worker = SearchWorker::spawn(Box::new(AlphaBetaAgent::new(2)));
        worker.request(board, Player::One);
        let reply = worker.wait_reply(Duration::from_secs(30)).unwrap();
        assert_eq!(reply.column, None);
    }
}
