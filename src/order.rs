//! # Player Ordering
//!
//! A player order decides who acts on each step of a gesture. Given the
//! piece's player count it produces the step sequence once, up front; the
//! scheduler then cycles through it. A step names either a single player or a
//! group acting simultaneously, with zero-based ids.
//!
//! Closures over the player count work directly:
//!
//! ```rust
//! use tactus::order::{PlayerOrder, Step};
//!
//! let pairs = |n: usize| -> Vec<Step> {
//!     (0..n / 2).map(|i| Step::Group(vec![2 * i, 2 * i + 1])).collect()
//! };
//! assert_eq!(pairs.steps(4).len(), 2);
//! ```

/// One step of a gesture: the players acting at the same time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Solo(usize),
    Group(Vec<usize>),
}

impl Step {
    /// The players for this step, solo steps included.
    pub fn players(&self) -> &[usize] {
        match self {
            Step::Solo(player) => std::slice::from_ref(player),
            Step::Group(players) => players,
        }
    }
}

/// Maps a player count to the ordered steps of a gesture.
pub trait PlayerOrder {
    fn steps(&self, num_players: usize) -> Vec<Step>;
}

impl<F> PlayerOrder for F
where
    F: Fn(usize) -> Vec<Step>,
{
    fn steps(&self, num_players: usize) -> Vec<Step> {
        self(num_players)
    }
}

/// The same single player, every step.
pub struct OnePlayer(pub usize);

impl PlayerOrder for OnePlayer {
    fn steps(&self, _num_players: usize) -> Vec<Step> {
        vec![Step::Solo(self.0)]
    }
}

/// Players take turns in id order.
pub struct InOrder;

impl PlayerOrder for InOrder {
    fn steps(&self, num_players: usize) -> Vec<Step> {
        (0..num_players).map(Step::Solo).collect()
    }
}

/// Players take turns in reverse id order.
pub struct ReverseOrder;

impl PlayerOrder for ReverseOrder {
    fn steps(&self, num_players: usize) -> Vec<Step> {
        (0..num_players).rev().map(Step::Solo).collect()
    }
}

/// Only the even-numbered players, in increasing order.
pub struct EvenPlayers;

impl PlayerOrder for EvenPlayers {
    fn steps(&self, num_players: usize) -> Vec<Step> {
        (0..num_players).filter(|p| p % 2 == 0).map(Step::Solo).collect()
    }
}

/// Only the odd-numbered players, in increasing order.
pub struct OddPlayers;

impl PlayerOrder for OddPlayers {
    fn steps(&self, num_players: usize) -> Vec<Step> {
        (0..num_players).filter(|p| p % 2 == 1).map(Step::Solo).collect()
    }
}

/// Up through the players and back down, without repeating the endpoints.
/// Four players bounce 0, 1, 2, 3, 2, 1.
pub struct Bounce;

impl PlayerOrder for Bounce {
    fn steps(&self, num_players: usize) -> Vec<Step> {
        let mut steps: Vec<Step> = (0..num_players).map(Step::Solo).collect();
        if num_players > 2 {
            steps.extend((1..num_players - 1).rev().map(Step::Solo));
        }
        steps
    }
}

/// Player 0 alone, then players 0 and 1 together, then 0 through 2, and so on
/// until everyone plays at once.
pub struct Explode;

impl PlayerOrder for Explode {
    fn steps(&self, num_players: usize) -> Vec<Step> {
        (0..num_players)
            .map(|i| Step::Group((0..=i).collect()))
            .collect()
    }
}

/// Everyone at once first, then one fewer each step down to player 0 alone.
pub struct ReverseExplode;

impl PlayerOrder for ReverseExplode {
    fn steps(&self, num_players: usize) -> Vec<Step> {
        let mut steps = Explode.steps(num_players);
        steps.reverse();
        steps
    }
}
