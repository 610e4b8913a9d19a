use crate::side::Side;
use core::ops::{Index, IndexMut};
use derivative::Derivative;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// One value per team. Serializes as `teamA` / `teamB` so it can be flattened
/// straight into the persisted match record.
#[derive(Derivative, Serialize, Deserialize)]
#[derivative(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamBundle<T> {
    #[serde(rename = "teamA")]
    pub a: T,
    #[serde(rename = "teamB")]
    pub b: T,
}

impl<T> TeamBundle<T> {
    pub fn new(a: T, b: T) -> Self {
        Self { a, b }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        self.into_iter()
    }

    pub fn map<'a, U, F: FnMut(&'a T) -> U>(&'a self, mut f: F) -> TeamBundle<U> {
        TeamBundle {
            a: f(&self.a),
            b: f(&self.b),
        }
    }

    /// Returns the pair in `(left, right)` display order.
    pub fn ordered(&self, swapped: bool) -> (&T, &T) {
        if swapped {
            (&self.b, &self.a)
        } else {
            (&self.a, &self.b)
        }
    }
}

impl<T> Index<Side> for TeamBundle<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        match side {
            Side::A => &self.a,
            Side::B => &self.b,
        }
    }
}

impl<T> IndexMut<Side> for TeamBundle<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        match side {
            Side::A => &mut self.a,
            Side::B => &mut self.b,
        }
    }
}

impl<T: Display> Display for TeamBundle<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "A: {}, B: {}", self.a, self.b)
    }
}

pub struct TeamBundleIterator<'a, T> {
    bundle: &'a TeamBundle<T>,
    index: usize,
}

impl<'a, T> Iterator for TeamBundleIterator<'a, T> {
    type Item = (Side, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let value = match self.index {
            0 => (Side::A, &self.bundle.a),
            1 => (Side::B, &self.bundle.b),
            _ => return None,
        };

        self.index += 1;
        Some(value)
    }
}

impl<'a, T> IntoIterator for &'a TeamBundle<T> {
    type Item = (Side, &'a T);
    type IntoIter = TeamBundleIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        TeamBundleIterator {
            bundle: self,
            index: 0,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use enum_iterator::all;

    #[test]
    fn test_index_by_side() {
        let mut bundle = TeamBundle::new(3u8, 7u8);
        assert_eq!(bundle[Side::A], 3);
        assert_eq!(bundle[Side::B], 7);

        bundle[Side::B] = 9;
        assert_eq!(bundle, TeamBundle::new(3, 9));
        assert_eq!(bundle.to_string(), "A: 3, B: 9");
    }

    #[test]
    fn test_iter_order() {
        let bundle = TeamBundle::new("home", "away");
        let sides: Vec<_> = bundle.iter().map(|(side, _)| side).collect();
        assert_eq!(sides, all::<Side>().collect::<Vec<_>>());
        assert_eq!(
            bundle.iter().map(|(_, v)| *v).collect::<Vec<_>>(),
            vec!["home", "away"]
        );
    }

    #[test]
    fn test_map_borrows() {
        let bundle = TeamBundle::new("Eagles".to_string(), "Sharks".to_string());
        assert_eq!(bundle.map(String::as_str), TeamBundle::new("Eagles", "Sharks"));
        assert_eq!(bundle.map(|name| name.len()), TeamBundle::new(6, 6));
    }

    #[test]
    fn test_ordered() {
        let bundle = TeamBundle::new(1, 2);
        assert_eq!(bundle.ordered(false), (&1, &2));
        assert_eq!(bundle.ordered(true), (&2, &1));
    }
}
