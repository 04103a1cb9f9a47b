//! Positional diff between the listing before and after editing.
//!
//! Lines are paired by index only: line `i` of the edited listing is the new value
//! of entry `i`. Nothing is matched by content.

use std::fmt;

use crate::errors::EdmvError;

/// One position where the original and edited listings differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangePair {
    pub original: String,
    pub edited: String,
}

impl ChangePair {
    pub fn new(original: impl Into<String>, edited: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            edited: edited.into(),
        }
    }
}

impl fmt::Display for ChangePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' -> '{}'", self.original, self.edited)
    }
}

/// Pair up `original` and `edited` by index and keep the positions that changed,
/// in index order. Both listings must have the same length.
pub fn resolve_changes<S: AsRef<str>>(
    original: &[S],
    edited: &[S],
) -> Result<Vec<ChangePair>, EdmvError> {
    if original.len() != edited.len() {
        return Err(EdmvError::LengthMismatch {
            original: original.len(),
            edited: edited.len(),
        });
    }

    Ok(original
        .iter()
        .zip(edited)
        .filter_map(|(o, e)| {
            let (o, e): (&str, &str) = (o.as_ref(), e.as_ref());
            (o != e).then(|| ChangePair::new(o, e))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_listings_have_no_changes() {
        let a = ["a.txt", "b/", "c"];
        assert!(resolve_changes(&a, &a).unwrap().is_empty());
    }

    #[test]
    fn keeps_exactly_the_changed_indices_in_order() {
        let a = ["one", "two", "three", "four"];
        let b = ["one", "2", "three", ""];
        let got = resolve_changes(&a, &b).unwrap();
        assert_eq!(
            got,
            vec![ChangePair::new("two", "2"), ChangePair::new("four", "")]
        );
    }

    #[test]
    fn swapped_lines_are_two_changes() {
        let a = ["x", "y"];
        let b = ["y", "x"];
        let got = resolve_changes(&a, &b).unwrap();
        assert_eq!(got.len(), 2);
        assert_eq!(got[0], ChangePair::new("x", "y"));
        assert_eq!(got[1], ChangePair::new("y", "x"));
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let a = ["x", "y"];
        let b = ["x"];
        match resolve_changes(&a, &b) {
            Err(EdmvError::LengthMismatch { original, edited }) => {
                assert_eq!((original, edited), (2, 1));
            }
            other => panic!("expected LengthMismatch, got {other:?}"),
        }
    }

    #[test]
    fn works_with_owned_strings() {
        let a = vec!["a".to_string()];
        let b = vec!["b".to_string()];
        assert_eq!(resolve_changes(&a, &b).unwrap().len(), 1);
    }
}
