//! Shared strategy carrying a free-text annotation.

use super::traits::{Fitter, FittingQuality, FittingStrategy, StrategyKind};
use std::sync::{Arc, PoisonError, RwLock};

/// Wraps a fitting strategy with a note that can be changed after it is shared.
///
/// Every other attribute, and every fitter it creates, comes from the wrapped
/// strategy unchanged.
///
/// # Example
///
/// ```
/// use curve_core::fitting::{AnnotatedStrategy, FittingStrategy, LinearInterpolation};
/// use std::sync::Arc;
///
/// let strategy = Arc::new(AnnotatedStrategy::new(Arc::new(LinearInterpolation), "desk A"));
/// strategy.set_annotation("desk B");
/// assert_eq!(strategy.annotation().as_deref(), Some("desk B"));
/// assert_eq!(strategy.name(), "Linear");
/// ```
#[derive(Debug)]
pub struct AnnotatedStrategy {
    inner: Arc<dyn FittingStrategy>,
    annotation: RwLock<String>,
}

impl AnnotatedStrategy {
    /// Wrap `inner` with an initial annotation.
    pub fn new(inner: Arc<dyn FittingStrategy>, annotation: impl Into<String>) -> Self {
        Self {
            inner,
            annotation: RwLock::new(annotation.into()),
        }
    }

    /// The wrapped strategy.
    pub fn inner(&self) -> &Arc<dyn FittingStrategy> {
        &self.inner
    }

    /// Replace the annotation.
    pub fn set_annotation(&self, annotation: impl Into<String>) {
        let mut guard = self.annotation.write().unwrap_or_else(PoisonError::into_inner);
        *guard = annotation.into();
    }
}

impl FittingStrategy for AnnotatedStrategy {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn long_name(&self) -> &str {
        self.inner.long_name()
    }

    fn kind(&self) -> StrategyKind {
        self.inner.kind()
    }

    fn minimal_required_grid_points(&self) -> usize {
        self.inner.minimal_required_grid_points()
    }

    fn quality(&self) -> FittingQuality {
        self.inner.quality()
    }

    fn is_local_approach(&self) -> bool {
        self.inner.is_local_approach()
    }

    fn is_differentiable(&self) -> bool {
        self.inner.is_differentiable()
    }

    fn left_localness_level(&self, index: usize, count: usize) -> usize {
        self.inner.left_localness_level(index, count)
    }

    fn right_localness_level(&self, index: usize, count: usize) -> usize {
        self.inner.right_localness_level(index, count)
    }

    fn annotation(&self) -> Option<String> {
        let guard = self.annotation.read().unwrap_or_else(PoisonError::into_inner);
        Some(guard.clone())
    }

    fn create(&self) -> Box<dyn Fitter> {
        self.inner.create()
    }
}
