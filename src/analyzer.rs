use itertools::Itertools;
use rand::Rng;

use crate::face::Face;
use crate::table::{CountTable, FaceCountTable, WideTable};
use crate::{Error, Result, Session};

/// Statistics over the most recent play of a session.
///
/// Nothing is cached: every call reads the session's current results, so a
/// later `play` on the bound session is reflected immediately.
#[derive(Debug)]
pub struct Analyzer<'a, T, G>
where
    T: Face,
    G: Rng,
{
    session: &'a Session<T, G>,
}

impl<'a, T, G> Analyzer<'a, T, G>
where
    T: Face,
    G: Rng,
{
    #[must_use]
    pub fn new(session: &'a Session<T, G>) -> Self {
        Self { session }
    }

    #[must_use]
    pub fn session(&self) -> &'a Session<T, G> {
        self.session
    }

    /// Number of rolls in which every die shows the same face.
    pub fn jackpot(&self) -> Result<usize> {
        self.session
            .with_last_play(|t| t.rows().filter(|row| row.iter().all_equal()).count())
    }

    /// Share of rolls that were jackpots, 0.0 for an empty play.
    pub fn jackpot_rate(&self) -> Result<f64> {
        let rolls = self.session.with_last_play(WideTable::len)?;
        let jackpots = self.jackpot()?;
        Ok(if rolls == 0 {
            0.0
        } else {
            jackpots as f64 / rolls as f64
        })
    }

    /// Per-roll occurrences of each face of the first die.
    ///
    /// An outcome that is not a face of the first die is a lookup failure.
    pub fn face_counts(&self) -> Result<FaceCountTable<T>> {
        let first = &self.session.dice()[0];
        let rows = self.session.with_last_play(|t| {
            t.rows()
                .map(|row| -> Result<Vec<usize>> {
                    let mut counts = vec![0; first.len()];
                    for value in row {
                        let column = first
                            .position(value)
                            .ok_or_else(|| Error::LookupFailure(value.to_string()))?;
                        counts[column] += 1;
                    }
                    Ok(counts)
                })
                .collect::<Result<Vec<_>>>()
        })??;
        Ok(FaceCountTable::new(first.faces().to_vec(), rows))
    }

    /// Occurrences of each face of the first die over the whole play.
    pub fn face_totals(&self) -> Result<Vec<(T, usize)>> {
        let counts = self.face_counts()?;
        let totals = counts.rows().fold(vec![0; counts.faces().len()], |mut acc, row| {
            acc.iter_mut().zip(row).for_each(|(a, c)| *a += c);
            acc
        });
        Ok(counts.faces().iter().cloned().zip(totals).collect())
    }

    /// Distinct order-independent outcomes with their counts.
    pub fn combo_count(&self) -> Result<CountTable<T>> {
        self.session.with_last_play(|t| {
            CountTable::tally(
                t.rows()
                    .map(|row| row.iter().cloned().sorted().collect::<Vec<_>>()),
            )
        })
    }

    /// Distinct ordered outcomes with their counts.
    pub fn permutation_count(&self) -> Result<CountTable<T>> {
        self.session
            .with_last_play(|t| CountTable::tally(t.rows().map(<[T]>::to_vec)))
    }
}
