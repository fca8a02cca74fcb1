use std::fmt::{Debug, Display};
use std::hash::Hash;

pub type DefaultFace = i32;

/// A value a die can show.
///
/// Implemented for integer primitives and for text (`char`, `String`,
/// `&'static str`). A die holds a single face type, so numeric and text
/// faces never mix.
pub trait Face: Sized + Send + Sync + Debug + Display + Clone + Eq + Hash + Ord {}

macro_rules! impl_face {
    ($($typ:ty),* $(,)?) => {
        $(impl $crate::face::Face for $typ {})*
    };
}

impl_face!(u8, u16, u32, u64, u128, usize);
impl_face!(i8, i16, i32, i64, i128, isize);
impl_face!(char, String, &'static str);
