//! Row-oriented result tables.

use std::collections::HashMap;
use std::fmt::{self, Display};

use itertools::Itertools;

use crate::face::Face;

/// Face to weight pairs, in face declaration order.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightTable<T> {
    rows: Vec<(T, f64)>,
}

impl<T> WeightTable<T>
where
    T: Face,
{
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn get(&self, face: &T) -> Option<f64> {
        self.rows.iter().find(|(f, _)| f == face).map(|(_, w)| *w)
    }

    /// Updates this copy only. Returns the previous weight.
    pub fn set(&mut self, face: &T, weight: f64) -> Option<f64> {
        self.rows
            .iter_mut()
            .find(|(f, _)| f == face)
            .map(|(_, w)| std::mem::replace(w, weight))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&T, &f64)> {
        self.rows.iter().map(|(f, w)| (f, w))
    }
}

impl<T> FromIterator<(T, f64)> for WeightTable<T> {
    fn from_iter<I: IntoIterator<Item = (T, f64)>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<T> Display for WeightTable<T>
where
    T: Face,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "face\tweight")?;
        for (face, weight) in &self.rows {
            writeln!(f, "{face}\t{weight}")?;
        }
        Ok(())
    }
}

/// Outcomes of a play: one row per roll, one column per die.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WideTable<T> {
    columns: usize,
    rows: Vec<Vec<T>>,
}

impl<T> WideTable<T>
where
    T: Face,
{
    /// Builds the table from per-die outcome sequences of equal length.
    pub(crate) fn from_columns(columns: Vec<Vec<T>>) -> Self {
        let width = columns.len();
        let height = columns.first().map_or(0, Vec::len);
        let mut rows = vec![Vec::with_capacity(width); height];
        for column in columns {
            for (row, value) in rows.iter_mut().zip(column) {
                row.push(value);
            }
        }
        Self {
            columns: width,
            rows,
        }
    }

    /// Number of rolls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of dice.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[must_use]
    pub fn row(&self, roll_number: usize) -> Option<&[T]> {
        self.rows.get(roll_number).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.rows.iter().map(Vec::as_slice)
    }

    pub fn column(&self, die_number: usize) -> impl Iterator<Item = &T> {
        self.rows.iter().filter_map(move |row| row.get(die_number))
    }

    #[must_use]
    pub fn get(&self, roll_number: usize, die_number: usize) -> Option<&T> {
        self.rows.get(roll_number)?.get(die_number)
    }

    /// Long form of the table: every die of roll 0, then every die of
    /// roll 1, and so on.
    #[must_use]
    pub fn to_narrow(&self) -> NarrowTable<T> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(roll_number, row)| {
                row.iter()
                    .enumerate()
                    .map(move |(die_number, value)| NarrowRow {
                        roll_number,
                        die_number,
                        value: value.clone(),
                    })
            })
            .collect()
    }
}

impl<T> Display for WideTable<T>
where
    T: Face,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "roll_number\t{}", (0..self.columns).join("\t"))?;
        for (i, row) in self.rows.iter().enumerate() {
            writeln!(f, "{i}\t{}", row.iter().join("\t"))?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NarrowRow<T> {
    pub roll_number: usize,
    pub die_number: usize,
    pub value: T,
}

/// Outcomes of a play in long form, keyed by `(roll_number, die_number)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NarrowTable<T> {
    rows: Vec<NarrowRow<T>>,
}

impl<T> NarrowTable<T>
where
    T: Face,
{
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn get(&self, roll_number: usize, die_number: usize) -> Option<&T> {
        self.rows
            .iter()
            .find(|r| r.roll_number == roll_number && r.die_number == die_number)
            .map(|r| &r.value)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NarrowRow<T>> {
        self.rows.iter()
    }
}

impl<T> FromIterator<NarrowRow<T>> for NarrowTable<T> {
    fn from_iter<I: IntoIterator<Item = NarrowRow<T>>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a NarrowTable<T> {
    type Item = &'a NarrowRow<T>;
    type IntoIter = std::slice::Iter<'a, NarrowRow<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl<T> Display for NarrowTable<T>
where
    T: Face,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "roll_number\tdie_number\tvalue")?;
        for r in &self.rows {
            writeln!(f, "{}\t{}\t{}", r.roll_number, r.die_number, r.value)?;
        }
        Ok(())
    }
}

/// Per-roll occurrence counts of each face.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaceCountTable<T> {
    faces: Vec<T>,
    rows: Vec<Vec<usize>>,
}

impl<T> FaceCountTable<T>
where
    T: Face,
{
    pub(crate) fn new(faces: Vec<T>, rows: Vec<Vec<usize>>) -> Self {
        Self { faces, rows }
    }

    /// Column labels.
    #[must_use]
    pub fn faces(&self) -> &[T] {
        &self.faces
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn row(&self, roll_number: usize) -> Option<&[usize]> {
        self.rows.get(roll_number).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[usize]> {
        self.rows.iter().map(Vec::as_slice)
    }

    #[must_use]
    pub fn get(&self, roll_number: usize, face: &T) -> Option<usize> {
        let column = self.faces.iter().position(|f| f == face)?;
        self.rows.get(roll_number).map(|row| row[column])
    }
}

impl<T> Display for FaceCountTable<T>
where
    T: Face,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "roll_number\t{}", self.faces.iter().join("\t"))?;
        for (i, row) in self.rows.iter().enumerate() {
            writeln!(f, "{i}\t{}", row.iter().join("\t"))?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CountRow<T> {
    pub outcome: Vec<T>,
    pub count: usize,
}

/// Distinct outcome tuples with the number of rolls that produced them,
/// in order of first appearance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CountTable<T> {
    rows: Vec<CountRow<T>>,
}

impl<T> CountTable<T>
where
    T: Face,
{
    pub(crate) fn tally<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = Vec<T>>,
    {
        let mut index = HashMap::<Vec<T>, usize>::new();
        let mut rows: Vec<CountRow<T>> = Vec::new();
        for outcome in outcomes {
            let found = index.get(&outcome).copied();
            match found {
                Some(i) => rows[i].count += 1,
                None => {
                    index.insert(outcome.clone(), rows.len());
                    rows.push(CountRow { outcome, count: 1 });
                }
            }
        }
        Self { rows }
    }

    /// Number of distinct outcomes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn get(&self, outcome: &[T]) -> Option<usize> {
        self.rows
            .iter()
            .find(|r| r.outcome == outcome)
            .map(|r| r.count)
    }

    /// Sum of all counts, the number of rolls tallied.
    #[must_use]
    pub fn total(&self) -> usize {
        self.rows.iter().map(|r| r.count).sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CountRow<T>> {
        self.rows.iter()
    }
}

impl<'a, T> IntoIterator for &'a CountTable<T> {
    type Item = &'a CountRow<T>;
    type IntoIter = std::slice::Iter<'a, CountRow<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl<T> Display for CountTable<T>
where
    T: Face,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "outcome\tcount")?;
        for r in &self.rows {
            writeln!(f, "({})\t{}", r.outcome.iter().join(", "), r.count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide() -> WideTable<i32> {
        WideTable::from_columns(vec![vec![1, 2, 3], vec![4, 5, 6]])
    }

    #[test]
    fn test_from_columns_transposes() {
        let t = wide();

        assert_eq!(t.len(), 3);
        assert_eq!(t.columns(), 2);
        assert_eq!(t.row(0), Some(&[1, 4][..]));
        assert_eq!(t.row(2), Some(&[3, 6][..]));
        assert_eq!(t.column(1).copied().collect::<Vec<_>>(), vec![4, 5, 6]);
        assert_eq!(t.get(1, 0), Some(&2));
        assert_eq!(t.get(3, 0), None);
    }

    #[test]
    fn test_empty_play() {
        let t = WideTable::<i32>::from_columns(vec![vec![], vec![]]);
        assert!(t.is_empty());
        assert_eq!(t.columns(), 2);
        assert!(t.to_narrow().is_empty());
    }

    #[test]
    fn test_narrow_order() {
        let narrow = wide().to_narrow();
        let keys: Vec<_> = narrow
            .iter()
            .map(|r| (r.roll_number, r.die_number, r.value))
            .collect();

        assert_eq!(
            keys,
            vec![
                (0, 0, 1),
                (0, 1, 4),
                (1, 0, 2),
                (1, 1, 5),
                (2, 0, 3),
                (2, 1, 6)
            ]
        );
        assert_eq!(narrow.get(2, 1), Some(&6));
        assert_eq!(narrow.get(2, 2), None);
    }

    #[test]
    fn test_tally_keeps_first_appearance_order() {
        let counts = CountTable::tally(vec![vec![2, 1], vec![1, 1], vec![2, 1], vec![2, 1]]);

        assert_eq!(counts.len(), 2);
        assert_eq!(counts.total(), 4);
        assert_eq!(counts.get(&[2, 1]), Some(3));
        assert_eq!(counts.get(&[1, 2]), None);
        assert_eq!(counts.iter().next().map(|r| r.count), Some(3));
    }

    #[test]
    fn test_display() {
        let t = WideTable::from_columns(vec![vec!["H", "T"]]);
        assert_eq!(t.to_string(), "roll_number\t0\n0\tH\n1\tT\n");

        let counts = CountTable::tally(vec![vec!["T", "T"]]);
        assert_eq!(counts.to_string(), "outcome\tcount\n(T, T)\t1\n");
    }
}
