mod inner;

use std::fmt::{self, Debug, Display};
use std::sync::Arc;

pub(crate) use inner::Sampler;
use inner::DieInner;
use log::{debug, trace};
use num::ToPrimitive;
use rand::{thread_rng, Rng};

use crate::face::{DefaultFace, Face};
use crate::table::WeightTable;
use crate::{Error, Result};

/// A weighted die with a fixed set of distinct faces.
///
/// `Die` is a shared handle: clones refer to the same faces and weights,
/// so a weight change made through one clone is seen by every session
/// holding another.
#[derive(Clone)]
pub struct Die<T = DefaultFace>(Arc<DieInner<T>>)
where
    T: Face;

impl Die {
    /// A die with faces `1..=sides`.
    pub fn numeric(sides: DefaultFace) -> Result<Self> {
        Die::new(1..=sides)
    }
}

impl<T> Die<T>
where
    T: Face,
{
    /// Creates a die from distinct faces, each with weight 1.0.
    pub fn new<I>(faces: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        DieInner::new(faces).map(|inner| Self(Arc::new(inner)))
    }

    pub(crate) fn from_distinct(faces: Vec<T>) -> Self {
        Self(Arc::new(DieInner::from_distinct(faces)))
    }

    /// Faces in declaration order.
    #[must_use]
    pub fn faces(&self) -> &[T] {
        self.0.faces()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.faces().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.faces().is_empty()
    }

    #[must_use]
    pub fn contains(&self, face: &T) -> bool {
        self.0.position(face).is_some()
    }

    pub(crate) fn position(&self, face: &T) -> Option<usize> {
        self.0.position(face)
    }

    pub(crate) fn sampler(&self) -> Result<Sampler<'_, T>> {
        self.0.sampler()
    }

    /// Whether both handles refer to the same die.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn weight(&self, face: &T) -> Result<f64> {
        self.0.weight(face)
    }

    /// Replaces the weight of `face`.
    ///
    /// Accepts any integer or float. The weight must be finite and
    /// non-negative, and the sum of all weights must stay finite.
    pub fn change_weight<W>(&self, face: &T, weight: W) -> Result<()>
    where
        W: ToPrimitive + Debug,
    {
        let value = weight
            .to_f64()
            .filter(|w| w.is_finite() && *w >= 0.0)
            .ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "weight must be a finite non-negative number, got {weight:?}"
                ))
            })?;
        let old = self.0.set_weight(face, value)?;
        debug!("change_weight({face}): {old} -> {value}");
        Ok(())
    }

    /// An independent copy of the face to weight table.
    #[must_use]
    pub fn weights(&self) -> WeightTable<T> {
        self.0.snapshot()
    }

    /// Weights normalized to sum to one, in face order.
    pub fn probabilities(&self) -> Result<Vec<(T, f64)>> {
        self.0.probabilities()
    }

    pub fn roll(&self) -> Result<T> {
        self.roll_with(&mut thread_rng())
    }

    pub fn roll_with<G>(&self, rng: &mut G) -> Result<T>
    where
        G: Rng + ?Sized,
    {
        let mut faces = self.0.sample_many(1, rng)?;
        faces
            .pop()
            .ok_or(Error::InvalidState("empty roll"))
    }

    pub fn roll_many(&self, times: usize) -> Result<Vec<T>> {
        self.roll_many_with(times, &mut thread_rng())
    }

    /// Rolls the die `times` times. Draws are independent and with
    /// replacement; nothing is recorded.
    pub fn roll_many_with<G>(&self, times: usize, rng: &mut G) -> Result<Vec<T>>
    where
        G: Rng + ?Sized,
    {
        let faces = self.0.sample_many(times, rng)?;
        trace!("roll_many({times}): {} faces", self.len());
        Ok(faces)
    }
}

impl<T> Debug for Die<T>
where
    T: Face,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Die")
            .field("weights", &self.weights())
            .finish()
    }
}

impl<T> Display for Die<T>
where
    T: Face,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.weights(), f)
    }
}
