//! Roll animation

pub mod session;

pub use session::RollSession;
