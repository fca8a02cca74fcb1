use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use itertools::Itertools;
use rand::distributions::{Distribution, WeightedError, WeightedIndex};
use rand::Rng;

use crate::face::Face;
use crate::table::WeightTable;
use crate::{Error, Result, ALL_WEIGHTS_ZERO, DEFAULT_WEIGHT};

#[derive(Debug)]
pub struct DieInner<T>
where
    T: Face,
{
    faces: Vec<T>,
    index: HashMap<T, usize>,
    weights: RwLock<Vec<f64>>,
}

impl<T> DieInner<T>
where
    T: Face,
{
    pub fn new<I>(faces: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let faces = faces.into_iter().collect_vec();
        if faces.is_empty() {
            return Err(Error::InvalidArgument("a die needs at least one face".into()));
        }
        let repeated = faces.iter().duplicates().collect_vec();
        if !repeated.is_empty() {
            return Err(Error::InvalidArgument(format!(
                "faces must be distinct, repeated: {}",
                repeated.iter().join(", ")
            )));
        }
        Ok(Self::from_distinct(faces))
    }

    /// Callers guarantee `faces` is non-empty and free of repeats.
    pub fn from_distinct(faces: Vec<T>) -> Self {
        let index = faces
            .iter()
            .enumerate()
            .map(|(i, face)| (face.clone(), i))
            .collect();
        let weights = RwLock::new(vec![DEFAULT_WEIGHT; faces.len()]);
        Self {
            faces,
            index,
            weights,
        }
    }

    #[must_use]
    pub fn faces(&self) -> &[T] {
        &self.faces
    }

    #[must_use]
    pub fn position(&self, face: &T) -> Option<usize> {
        self.index.get(face).copied()
    }

    pub fn lookup(&self, face: &T) -> Result<usize> {
        self.position(face)
            .ok_or_else(|| Error::LookupFailure(face.to_string()))
    }

    pub fn weight(&self, face: &T) -> Result<f64> {
        let pos = self.lookup(face)?;
        Ok(self.read()[pos])
    }

    /// Replaces one weight. The new total of all weights must stay finite.
    pub fn set_weight(&self, face: &T, weight: f64) -> Result<f64> {
        let pos = self.lookup(face)?;
        let mut weights = self.write();
        let total: f64 = weights
            .iter()
            .enumerate()
            .map(|(i, w)| if i == pos { weight } else { *w })
            .sum();
        if !total.is_finite() {
            return Err(Error::InvalidArgument(format!(
                "weight {weight} of {face} makes the total weight overflow"
            )));
        }
        Ok(std::mem::replace(&mut weights[pos], weight))
    }

    #[must_use]
    pub fn snapshot(&self) -> WeightTable<T> {
        self.faces
            .iter()
            .cloned()
            .zip(self.read().iter().copied())
            .collect()
    }

    pub fn probabilities(&self) -> Result<Vec<(T, f64)>> {
        let weights = self.read();
        let total = checked_total(&weights)?;
        Ok(self
            .faces
            .iter()
            .cloned()
            .zip(weights.iter().map(|w| w / total))
            .collect())
    }

    /// Draws `n` faces with replacement.
    pub fn sample_many<G>(&self, n: usize, rng: &mut G) -> Result<Vec<T>>
    where
        G: Rng + ?Sized,
    {
        Ok(self.sampler()?.sample_many(n, rng))
    }

    /// Locks the weights for reading until the sampler is dropped, so a
    /// concurrent weight change lands either before or after every draw
    /// made through it.
    pub fn sampler(&self) -> Result<Sampler<'_, T>> {
        let weights = self.read();
        checked_total(&weights)?;
        let dist = WeightedIndex::<f64>::new(weights.iter()).map_err(|e| match e {
            WeightedError::AllWeightsZero => Error::InvalidState(ALL_WEIGHTS_ZERO),
            e => Error::InvalidArgument(e.to_string()),
        })?;
        Ok(Sampler {
            faces: &self.faces,
            _weights: weights,
            dist,
        })
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<f64>> {
        self.weights.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<f64>> {
        self.weights.write().unwrap_or_else(PoisonError::into_inner)
    }
}

pub struct Sampler<'a, T>
where
    T: Face,
{
    faces: &'a [T],
    _weights: RwLockReadGuard<'a, Vec<f64>>,
    dist: WeightedIndex<f64>,
}

impl<T> Sampler<'_, T>
where
    T: Face,
{
    pub fn sample_many<G>(&self, n: usize, rng: &mut G) -> Vec<T>
    where
        G: Rng + ?Sized,
    {
        (0..n)
            .map(|_| self.faces[self.dist.sample(&mut *rng)].clone())
            .collect()
    }
}

fn checked_total(weights: &[f64]) -> Result<f64> {
    let total: f64 = weights.iter().sum();
    if !total.is_finite() {
        Err(Error::InvalidArgument("total weight is not finite".into()))
    } else if total <= 0.0 {
        Err(Error::InvalidState(ALL_WEIGHTS_ZERO))
    } else {
        Ok(total)
    }
}
