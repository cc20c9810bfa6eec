//! Label storage for mutable curves.

use crate::types::{CurveError, GridPointLabel};

/// Labels of a [`GridPointCurve`](crate::curves::GridPointCurve).
///
/// While every label equals the one its argument implies, no label array is
/// kept. The first diverging label materializes the full array.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum LabelStore<L> {
    Arguments,
    Explicit(Vec<L>),
}

impl<L: GridPointLabel> Default for LabelStore<L> {
    fn default() -> Self {
        LabelStore::Arguments
    }
}

impl<L: GridPointLabel> LabelStore<L> {
    /// Returns true while labels are derived from the arguments.
    #[inline]
    pub(crate) fn is_implicit(&self) -> bool {
        matches!(self, LabelStore::Arguments)
    }

    pub(crate) fn get(&self, index: usize, arguments: &[f64]) -> Option<L> {
        match self {
            LabelStore::Arguments => arguments
                .get(index)
                .and_then(|&argument| L::from_argument(argument)),
            LabelStore::Explicit(labels) => labels.get(index).cloned(),
        }
    }

    pub(crate) fn position(&self, label: &L, arguments: &[f64]) -> Option<usize> {
        match self {
            LabelStore::Arguments => arguments
                .iter()
                .position(|&argument| L::from_argument(argument).as_ref() == Some(label)),
            LabelStore::Explicit(labels) => labels.iter().position(|l| l == label),
        }
    }

    /// Check that `label` can be stored for `argument` without failing later.
    ///
    /// Must be called before any array of the curve is touched.
    pub(crate) fn prepare(
        &mut self,
        label: &L,
        argument: f64,
        arguments: &[f64],
    ) -> Result<(), CurveError> {
        if self.is_implicit() && L::from_argument(argument).as_ref() != Some(label) {
            self.materialize(arguments)?;
        }
        Ok(())
    }

    /// Insert at `index`; [`prepare`](Self::prepare) must have succeeded.
    pub(crate) fn insert(&mut self, index: usize, label: L) {
        if let LabelStore::Explicit(labels) = self {
            labels.insert(index, label);
        }
    }

    pub(crate) fn remove(&mut self, index: usize) {
        if let LabelStore::Explicit(labels) = self {
            labels.remove(index);
        }
    }

    pub(crate) fn clear(&mut self) {
        *self = LabelStore::Arguments;
    }

    fn materialize(&mut self, arguments: &[f64]) -> Result<(), CurveError> {
        let labels = arguments
            .iter()
            .map(|&argument| L::from_argument(argument))
            .collect::<Option<Vec<L>>>()
            .ok_or_else(|| {
                CurveError::InvalidInput(
                    "existing labels cannot be recovered from their arguments".to_string(),
                )
            })?;
        *self = LabelStore::Explicit(labels);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_implicit_until_label_differs() {
        let arguments = vec![1.0, 2.0];
        let mut store = LabelStore::<f64>::default();
        store.prepare(&3.0, 3.0, &arguments).unwrap();
        assert!(store.is_implicit());
        assert_eq!(store.get(1, &arguments), Some(2.0));
        assert_eq!(store.position(&2.0, &arguments), Some(1));

        store.prepare(&99.0, 3.0, &arguments).unwrap();
        assert_eq!(store, LabelStore::Explicit(vec![1.0, 2.0]));
        store.insert(2, 99.0);
        assert_eq!(store.get(2, &[1.0, 2.0, 3.0]), Some(99.0));
    }

    #[test]
    fn test_non_numeric_labels_are_explicit_from_the_start() {
        let mut store = LabelStore::<String>::default();
        store.prepare(&"1Y".to_string(), 1.0, &[]).unwrap();
        assert!(!store.is_implicit());
        store.insert(0, "1Y".to_string());
        assert_eq!(store.position(&"1Y".to_string(), &[1.0]), Some(0));
        store.remove(0);
        assert_eq!(store.get(0, &[]), None);
    }
}
