pub use crate::defs::*;
pub use crate::table::{CountTable, FaceCountTable, NarrowTable, WideTable};
pub use crate::{Analyzer, Die, Error, Face, ResultFormat, Results, Session, WeightTable};
