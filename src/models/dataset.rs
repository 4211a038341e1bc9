//! Read-only collection of normalized records

use crate::predicate::Predicate;

/// Normalized records for one domain, fixed once built
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset<T> {
    records: Vec<T>,
}

impl<T> Dataset<T> {
    #[must_use]
    pub fn new(records: Vec<T>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn records(&self) -> &[T] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records matching `predicate`, in dataset order
    #[must_use]
    pub fn filter(&self, predicate: &Predicate<T>) -> Vec<&T> {
        self.records.iter().filter(|r| predicate.matches(r)).collect()
    }
}

impl<T> FromIterator<T> for Dataset<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
