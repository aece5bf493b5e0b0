//! Slice registry for feature panels.
//! A minimal type-erased container for initialized feature slices.

use crate::features::FeatureId;
use std::any::{Any, TypeId};
use std::fmt::Debug;

/// An initialized feature panel that can be shared across threads.
pub trait FeatureSlice: Any + Debug + Send + Sync {
    /// The panel this slice serves.
    fn feature(&self) -> FeatureId;

    /// Helper to allow downcasting from the trait object.
    fn as_any(&self) -> &dyn Any;
}

/// A registered slice together with its concrete type id.
#[derive(Debug)]
pub struct InitializedSlice {
    pub id: TypeId,
    pub feature: FeatureId,
    pub state: Box<dyn FeatureSlice>,
}

impl InitializedSlice {
    pub fn new<T: FeatureSlice>(state: T) -> Self {
        Self { id: TypeId::of::<T>(), feature: state.feature(), state: Box::new(state) }
    }

    /// Downcasts to the concrete slice type.
    #[must_use]
    pub fn downcast<T: FeatureSlice>(&self) -> Option<&T> {
        self.state.as_any().downcast_ref::<T>()
    }
}
