use std::fmt::{self, Display};
use std::str::FromStr;
use std::sync::{Mutex, PoisonError, RwLock};

use bon::bon;
use itertools::Itertools;
use log::debug;
use rand::rngs::ThreadRng;
use rand::{thread_rng, Rng};

use crate::face::{DefaultFace, Face};
use crate::table::{NarrowTable, WideTable};
use crate::{Die, Error, Result, NO_PLAY};

/// Shape of the table returned by [`Session::results`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResultFormat {
    Wide,
    Narrow,
}

impl FromStr for ResultFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "wide" => Ok(Self::Wide),
            "narrow" => Ok(Self::Narrow),
            _ => Err(Error::InvalidArgument(format!(
                "result format must be \"wide\" or \"narrow\", got {s:?}"
            ))),
        }
    }
}

impl Display for ResultFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wide => f.write_str("wide"),
            Self::Narrow => f.write_str("narrow"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Results<T> {
    Wide(WideTable<T>),
    Narrow(NarrowTable<T>),
}

impl<T> Results<T> {
    #[must_use]
    pub fn format(&self) -> ResultFormat {
        match self {
            Self::Wide(_) => ResultFormat::Wide,
            Self::Narrow(_) => ResultFormat::Narrow,
        }
    }

    #[must_use]
    pub fn into_wide(self) -> Option<WideTable<T>> {
        match self {
            Self::Wide(t) => Some(t),
            Self::Narrow(_) => None,
        }
    }

    #[must_use]
    pub fn into_narrow(self) -> Option<NarrowTable<T>> {
        match self {
            Self::Wide(_) => None,
            Self::Narrow(t) => Some(t),
        }
    }
}

/// A group of dice rolled together.
///
/// Only the most recent play is kept. Dice are shared with the caller and
/// never modified; their face sets are not checked against each other.
#[derive(Debug)]
pub struct Session<T = DefaultFace, G = ThreadRng>
where
    T: Face,
    G: Rng,
{
    dice: Vec<Die<T>>,
    rng: Mutex<G>,
    last_play: RwLock<Option<WideTable<T>>>,
}

impl<T> Session<T, ThreadRng>
where
    T: Face,
{
    /// A session rolling with the thread-local generator.
    pub fn from_dice(dice: Vec<Die<T>>) -> Result<Self> {
        Self::builder().dice(dice).build(thread_rng())
    }
}

#[bon]
impl<T, G> Session<T, G>
where
    T: Face,
    G: Rng,
{
    #[builder]
    pub fn new(#[builder(finish_fn)] rng: G, dice: Vec<Die<T>>) -> Result<Self> {
        if dice.is_empty() {
            return Err(Error::InvalidArgument(
                "a session needs at least one die".into(),
            ));
        }
        Ok(Self {
            dice,
            rng: Mutex::new(rng),
            last_play: RwLock::new(None),
        })
    }
}

impl<T, G> Session<T, G>
where
    T: Face,
    G: Rng,
{
    #[must_use]
    pub fn dice(&self) -> &[Die<T>] {
        &self.dice
    }

    /// Number of dice.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dice.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    /// Rolls in the most recent play, `None` before the first one.
    #[must_use]
    pub fn roll_count(&self) -> Option<usize> {
        self.with_last_play(WideTable::len).ok()
    }

    /// Rolls every die `roll_number` times and stores the outcomes,
    /// replacing the previous play. If any die cannot be rolled the
    /// previous play is kept.
    ///
    /// The weights of every die stay read-locked for the whole play, so a
    /// die listed twice rolls both columns with the same weights.
    pub fn play(&self, roll_number: usize) -> Result<()> {
        let mut unique: Vec<&Die<T>> = Vec::with_capacity(self.dice.len());
        let slots = self
            .dice
            .iter()
            .map(|die| match unique.iter().position(|u| u.ptr_eq(die)) {
                Some(i) => i,
                None => {
                    unique.push(die);
                    unique.len() - 1
                }
            })
            .collect_vec();
        let samplers = unique
            .iter()
            .map(|&die| die.sampler())
            .collect::<Result<Vec<_>>>()?;
        let columns = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            slots
                .iter()
                .map(|&i| samplers[i].sample_many(roll_number, &mut *rng))
                .collect_vec()
        };
        drop(samplers);
        let table = WideTable::from_columns(columns);
        debug!("play({roll_number}): {} dice", table.columns());
        *self
            .last_play
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(table);
        Ok(())
    }

    pub fn results(&self, format: ResultFormat) -> Result<Results<T>> {
        match format {
            ResultFormat::Wide => self.wide().map(Results::Wide),
            ResultFormat::Narrow => self.narrow().map(Results::Narrow),
        }
    }

    /// A copy of the most recent play, one row per roll.
    pub fn wide(&self) -> Result<WideTable<T>> {
        self.with_last_play(WideTable::clone)
    }

    /// The most recent play in long form: every die of roll 0, then every
    /// die of roll 1, and so on. This is roll-major, unlike a column-wise
    /// melt of the wide table, which lists die 0 for every roll first.
    pub fn narrow(&self) -> Result<NarrowTable<T>> {
        self.with_last_play(WideTable::to_narrow)
    }

    pub(crate) fn with_last_play<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&WideTable<T>) -> R,
    {
        let guard = self
            .last_play
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        guard.as_ref().map(f).ok_or(Error::InvalidState(NO_PLAY))
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use test_log::test;

    use super::*;

    fn seeded(dice: Vec<Die<i32>>) -> Session<i32, StdRng> {
        Session::builder()
            .dice(dice)
            .build(StdRng::seed_from_u64(7))
            .unwrap()
    }

    #[test]
    fn test_empty_session_rejected() {
        let err = Session::<i32>::from_dice(vec![]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_results_before_play() {
        let session = seeded(vec![Die::numeric(6).unwrap()]);

        assert_eq!(session.roll_count(), None);
        assert_eq!(session.wide(), Err(Error::InvalidState(NO_PLAY)));
        assert_eq!(
            session.results(ResultFormat::Narrow),
            Err(Error::InvalidState(NO_PLAY))
        );
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("wide".parse::<ResultFormat>(), Ok(ResultFormat::Wide));
        assert_eq!("narrow".parse::<ResultFormat>(), Ok(ResultFormat::Narrow));
        for bad in ["Wide", "long", ""] {
            assert!(matches!(
                bad.parse::<ResultFormat>(),
                Err(Error::InvalidArgument(_))
            ));
        }
        assert_eq!(ResultFormat::Narrow.to_string(), "narrow");
    }

    #[test]
    fn test_play_shapes() {
        let d6 = Die::numeric(6).unwrap();
        let session = seeded(vec![d6.clone(), d6.clone(), d6]);
        session.play(10).unwrap();

        let wide = session.results(ResultFormat::Wide).unwrap().into_wide().unwrap();
        assert_eq!(wide.len(), 10);
        assert_eq!(wide.columns(), 3);
        assert!(wide.rows().flatten().all(|x| (1..=6).contains(x)));

        let narrow = session.results("narrow".parse().unwrap()).unwrap();
        assert_eq!(narrow.format(), ResultFormat::Narrow);
        let narrow = narrow.into_narrow().unwrap();
        assert_eq!(narrow.len(), 30);
        for r in &narrow {
            assert_eq!(wide.get(r.roll_number, r.die_number), Some(&r.value));
        }
        assert_eq!(session.roll_count(), Some(10));
    }

    #[test]
    fn test_play_replaces_previous() {
        let session = seeded(vec![Die::numeric(6).unwrap(), Die::numeric(6).unwrap()]);
        session.play(8).unwrap();
        session.play(3).unwrap();

        assert_eq!(session.wide().unwrap().len(), 3);
        assert_eq!(session.narrow().unwrap().len(), 6);

        session.play(0).unwrap();
        assert!(session.wide().unwrap().is_empty());
        assert_eq!(session.wide().unwrap().columns(), 2);
    }

    #[test]
    fn test_failed_play_keeps_previous() {
        let coin = Die::new([0, 1]).unwrap();
        let session = seeded(vec![Die::numeric(6).unwrap(), coin.clone()]);
        session.play(4).unwrap();

        coin.change_weight(&0, 0).unwrap();
        coin.change_weight(&1, 0).unwrap();
        assert!(matches!(session.play(5), Err(Error::InvalidState(_))));
        assert_eq!(session.roll_count(), Some(4));
    }

    #[test]
    fn test_session_sees_weight_changes() {
        let die = Die::new(["H", "T"]).unwrap();
        let session = Session::from_dice(vec![die.clone()]).unwrap();
        die.change_weight(&"T", 0).unwrap();
        session.play(50).unwrap();

        assert!(session.wide().unwrap().column(0).all(|&x| x == "H"));
    }

    #[test]
    fn test_mismatched_dice_are_accepted() {
        let session = Session::builder()
            .dice(vec![
                Die::new(["a", "b"]).unwrap(),
                Die::new(["x", "y", "z"]).unwrap(),
            ])
            .build(StdRng::seed_from_u64(1))
            .unwrap();
        session.play(20).unwrap();

        let wide = session.wide().unwrap();
        assert!(wide.column(0).all(|x| ["a", "b"].contains(x)));
        assert!(wide.column(1).all(|x| ["x", "y", "z"].contains(x)));
    }

    #[test]
    fn test_seeded_play_is_reproducible() {
        let d6 = Die::numeric(6).unwrap();
        let a = seeded(vec![d6.clone(), d6.clone()]);
        let b = seeded(vec![d6.clone(), d6]);
        a.play(25).unwrap();
        b.play(25).unwrap();

        assert_eq!(a.wide(), b.wide());
    }

    #[test]
    fn test_repeated_die_sees_one_weight_state() {
        let die = Die::new([1, 2]).unwrap();
        die.change_weight(&2, 0).unwrap();
        let session = seeded(vec![die.clone(), die.clone()]);

        std::thread::scope(|scope| {
            scope.spawn(|| {
                for _ in 0..50 {
                    session.play(200).unwrap();
                    let wide = session.wide().unwrap();
                    let first = wide.get(0, 0).copied();
                    assert!(wide.rows().flatten().all(|x| Some(*x) == first));
                }
            });
            scope.spawn(|| {
                for i in 0..50 {
                    let weight = if i % 2 == 0 { 1e300 } else { 0.0 };
                    die.change_weight(&2, weight).unwrap();
                }
            });
        });
    }
}
