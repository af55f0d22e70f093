//! Game rules for tic-tac-toe.
//!
//! Pure functions over a `Board`: line scanning, win detection and tie
//! detection. Rules are separated from board storage so the controller,
//! the bot and the invariants can share them.

pub mod line;
pub mod tie;
pub mod win;

pub use line::{Line, LineTally, scan};
pub use tie::is_full;
pub use win::{evaluate, winner};
