//! Common dice. Every call returns a new die with its own weights.

use crate::face::DefaultFace;
use crate::Die;

fn standard(sides: DefaultFace) -> Die {
    Die::from_distinct((1..=sides).collect())
}

pub fn d2() -> Die {
    standard(2)
}

pub fn d4() -> Die {
    standard(4)
}

pub fn d6() -> Die {
    standard(6)
}

pub fn d8() -> Die {
    standard(8)
}

pub fn d10() -> Die {
    standard(10)
}

pub fn d12() -> Die {
    standard(12)
}

pub fn d20() -> Die {
    standard(20)
}

pub fn d100() -> Die {
    standard(100)
}

/// A two-sided die with faces `"H"` and `"T"`.
pub fn coin() -> Die<&'static str> {
    Die::from_distinct(vec!["H", "T"])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_faces() {
        assert_eq!(d6().faces(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(d100().len(), 100);
        assert_eq!(coin().faces(), &["H", "T"]);
    }

    #[test]
    fn test_dice_are_independent() {
        let a = d6();
        let b = d6();
        a.change_weight(&6, 10).unwrap();

        assert!(!a.ptr_eq(&b));
        assert_eq!(b.weight(&6), Ok(1.0));
    }
}
