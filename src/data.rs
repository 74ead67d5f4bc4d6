//! Possibly-masked observation arrays.
//!
//! Every capability method receives its observations as a [`MaskedData`]. A
//! masked entry is present in the array (it keeps its position, so elementwise
//! results line up with the input) but carries no observation: it must be
//! excluded from every aggregate, not treated as a zero.

use itertools::izip;

use crate::error::{BayesError, Result};

/// A one-dimensional array of observations with an optional mask.
///
/// `T` is the native shape of one observation, e.g. `f64` for a scalar
/// distribution or `Vec<f64>` for a multivariate one. A `true` mask entry
/// marks the observation at that index as missing.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskedData<T> {
    values: Vec<T>,
    mask: Option<Vec<bool>>,
}

impl<T> MaskedData<T> {
    pub fn new(values: Vec<T>) -> Self {
        MaskedData { values, mask: None }
    }

    pub fn with_mask(values: Vec<T>, mask: Vec<bool>) -> Result<Self> {
        if values.len() != mask.len() {
            return Err(BayesError::ShapeMismatch {
                what: "mask",
                expected: values.len(),
                found: mask.len(),
            });
        }
        let mask = if mask.iter().any(|&m| m) {
            Some(mask)
        } else {
            None
        };
        Ok(MaskedData { values, mask })
    }

    pub fn empty() -> Self {
        MaskedData::new(Vec::new())
    }

    /// Number of entries, masked ones included.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_masked(&self, idx: usize) -> bool {
        self.mask.as_ref().is_some_and(|mask| mask[idx])
    }

    pub fn has_mask(&self) -> bool {
        self.mask.is_some()
    }

    /// Number of entries that carry an observation.
    pub fn count_observed(&self) -> usize {
        match &self.mask {
            None => self.values.len(),
            Some(mask) => mask.iter().filter(|&&m| !m).count(),
        }
    }

    /// Raw values, masked entries included.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// The mask as a dense vector, `true` for missing entries.
    pub fn mask(&self) -> Vec<bool> {
        match &self.mask {
            None => vec![false; self.values.len()],
            Some(mask) => mask.clone(),
        }
    }

    /// Iterate over all entries, yielding `None` for masked ones.
    pub fn iter(&self) -> impl Iterator<Item = Option<&T>> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(move |(idx, value)| (!self.is_masked(idx)).then_some(value))
    }

    pub fn iter_observed(&self) -> impl Iterator<Item = &T> + '_ {
        self.iter().flatten()
    }

    /// Iterate over observed entries together with the matching weight.
    ///
    /// Weights are aligned with all entries, masked ones included.
    pub fn iter_weighted<'a>(
        &'a self,
        weights: &'a [f64],
    ) -> Result<impl Iterator<Item = (&'a T, f64)> + 'a> {
        if weights.len() != self.len() {
            return Err(BayesError::ShapeMismatch {
                what: "weights",
                expected: self.len(),
                found: weights.len(),
            });
        }
        Ok(izip!(self.iter(), weights).filter_map(|(value, &w)| value.map(|v| (v, w))))
    }

    /// Apply `func` to every observed entry. Masked entries stay masked.
    pub fn try_map<U, F>(&self, mut func: F) -> Result<MaskedData<U>>
    where
        F: FnMut(&T) -> Result<U>,
        U: Default,
    {
        let values = self
            .iter()
            .map(|value| match value {
                Some(value) => func(value),
                None => Ok(U::default()),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(MaskedData {
            values,
            mask: self.mask.clone(),
        })
    }

    pub fn map<U, F>(&self, mut func: F) -> MaskedData<U>
    where
        F: FnMut(&T) -> U,
        U: Default,
    {
        let values = self
            .iter()
            .map(|value| value.map(&mut func).unwrap_or_default())
            .collect();
        MaskedData {
            values,
            mask: self.mask.clone(),
        }
    }
}

impl MaskedData<f64> {
    /// Sum over observed entries only.
    pub fn sum_observed(&self) -> f64 {
        self.iter_observed().sum()
    }
}

impl<T> Default for MaskedData<T> {
    fn default() -> Self {
        MaskedData::empty()
    }
}

impl<T> From<Vec<T>> for MaskedData<T> {
    fn from(values: Vec<T>) -> Self {
        MaskedData::new(values)
    }
}

impl<T> FromIterator<T> for MaskedData<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        MaskedData::new(iter.into_iter().collect())
    }
}

/// Concatenate several data arrays into one, preserving masks.
///
/// This is the single routine used to form unions of data sets, so that
/// predictive computations see the same layout as everything else.
pub fn combine_data<T: Clone>(parts: &[&MaskedData<T>]) -> MaskedData<T> {
    let total = parts.iter().map(|part| part.len()).sum();
    let mut values = Vec::with_capacity(total);
    let any_mask = parts.iter().any(|part| part.has_mask());
    let mut mask = if any_mask {
        Some(Vec::with_capacity(total))
    } else {
        None
    };

    for part in parts {
        values.extend_from_slice(&part.values);
        if let Some(mask) = mask.as_mut() {
            match &part.mask {
                Some(part_mask) => mask.extend_from_slice(part_mask),
                None => mask.extend(std::iter::repeat(false).take(part.len())),
            }
        }
    }

    MaskedData { values, mask }
}
