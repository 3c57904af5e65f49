//! Grid snake with direction-reversing food.
//!
//! The simulation core ([`grid`], [`direction`], [`snake`], [`food`] and
//! [`session`]) knows nothing about terminals or timers. A host feeds
//! [`session::Session::tick`] one pending direction per tick and draws the
//! per-cell classification it exposes. The remaining modules are the terminal
//! host shipped with the `flipsnake` binary.

pub mod config;
pub mod direction;
pub mod error;
pub mod food;
pub mod grid;
pub mod input;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod snake;
