mod analyzer;
pub mod defs;
mod die;
mod face;
pub mod prelude;
mod session;
pub mod table;

pub use analyzer::Analyzer;
pub use die::Die;
pub use face::{DefaultFace, Face};
pub use session::{ResultFormat, Results, Session};
pub use table::WeightTable;
use thiserror::Error;

pub type Result<T> = ::core::result::Result<T, Error>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("invalid state: {0}")]
    InvalidState(&'static str),
    #[error("face not found: {0}")]
    LookupFailure(String),
}

const DEFAULT_WEIGHT: f64 = 1.0;
const NO_PLAY: &str = "no play recorded";
const ALL_WEIGHTS_ZERO: &str = "all weights are zero";
