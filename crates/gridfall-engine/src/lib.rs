pub use self::{board::*, geometry::*, piece_source::*};

pub mod board;
pub mod geometry;
pub mod piece_source;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("placement tops out the board")]
pub struct TopOutError;
