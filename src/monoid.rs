//! Monoids and folding iterators through them.
//!
//! A [`Monoid`] has an identity value and an associative way to combine two values, so any
//! sequence of them can be reduced without a special case for the empty sequence. [`FoldMap`]
//! maps the items of an iterator into a monoid and combines the results.

use num_traits::{Bounded, CheckedAdd, CheckedMul, One, Zero};

/// A type with an identity element and an associative combining operation.
///
/// Implementations must satisfy `empty().concat(x) == x`, `x.concat(empty()) == x`, and
/// `a.concat(b).concat(c) == a.concat(b.concat(c))`.
pub trait Monoid {
    /// The identity element.
    fn empty() -> Self;

    /// Combine two values.
    #[must_use]
    fn concat(self, other: Self) -> Self;
}

/// Iterator extension for reducing items through a [`Monoid`].
pub trait FoldMap: Iterator + Sized {
    /// Map every item into `M` and combine them in order, starting from [`Monoid::empty`].
    fn fold_map<M, F>(self, mut map: F) -> M
    where
        M: Monoid,
        F: FnMut(Self::Item) -> M,
    {
        self.fold(M::empty(), |acc, item| acc.concat(map(item)))
    }
}

impl<I: Iterator> FoldMap for I {}

/// Conjunction: `true` only when every combined value is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct All(pub bool);

impl Monoid for All {
    fn empty() -> Self {
        Self(true)
    }

    fn concat(self, other: Self) -> Self {
        Self(self.0 && other.0)
    }
}

/// Disjunction: `true` when any combined value is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Any(pub bool);

impl Monoid for Any {
    fn empty() -> Self {
        Self(false)
    }

    fn concat(self, other: Self) -> Self {
        Self(self.0 || other.0)
    }
}

/// Overflow-checked addition. `None` once any addition overflowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sum<T>(pub Option<T>);

impl<T> Sum<T> {
    pub fn of(value: T) -> Self {
        Self(Some(value))
    }
}

impl<T: CheckedAdd + Zero> Monoid for Sum<T> {
    fn empty() -> Self {
        Self(Some(T::zero()))
    }

    fn concat(self, other: Self) -> Self {
        Self(self.0.zip(other.0).and_then(|(a, b)| a.checked_add(&b)))
    }
}

/// Overflow-checked multiplication. `None` once any multiplication overflowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Product<T>(pub Option<T>);

impl<T> Product<T> {
    pub fn of(value: T) -> Self {
        Self(Some(value))
    }
}

impl<T: CheckedMul + One> Monoid for Product<T> {
    fn empty() -> Self {
        Self(Some(T::one()))
    }

    fn concat(self, other: Self) -> Self {
        Self(self.0.zip(other.0).and_then(|(a, b)| a.checked_mul(&b)))
    }
}

/// The largest combined value; the type's minimum when nothing was combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Max<T>(pub T);

impl<T: Ord + Bounded> Monoid for Max<T> {
    fn empty() -> Self {
        Self(T::min_value())
    }

    fn concat(self, other: Self) -> Self {
        Self(self.0.max(other.0))
    }
}

/// Iterator extension for multiplying integers with overflow checking.
pub trait CheckedProduct<T> {
    /// The product of all items, `None` if it overflowed. An empty iterator yields one.
    fn checked_product(self) -> Option<T>;
}

impl<T, I> CheckedProduct<T> for I
where
    T: CheckedMul + One,
    I: Iterator<Item = T>,
{
    fn checked_product(self) -> Option<T> {
        self.fold_map(Product::of).0
    }
}
