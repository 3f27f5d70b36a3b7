//! Read-only, identifier-indexed views over model collections.

use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::core::error::{Error, Result};
use crate::core::model::Identified;

/// Order-preserving view over a sequence of model objects.
///
/// Cloning is cheap: the backing storage is shared, so the same view can be
/// handed to several template helpers of one render pass. Templates see it as
/// a plain array.
#[derive(Debug)]
pub struct ObjectList<T> {
    objects: Arc<[T]>,
}

impl<T: Identified + Clone> ObjectList<T> {
    pub fn new(objects: &[T]) -> Self {
        Self {
            objects: Arc::from(objects),
        }
    }
}

impl<T: Identified> ObjectList<T> {
    /// Iterate over the objects in their original order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.objects.iter()
    }

    /// Look up an object by identifier
    pub fn get(&self, id: &str) -> Result<&T> {
        self.objects
            .iter()
            .find(|o| o.id() == id)
            .ok_or_else(|| Error::not_found(T::KIND, id))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl<T> Clone for ObjectList<T> {
    fn clone(&self) -> Self {
        Self {
            objects: Arc::clone(&self.objects),
        }
    }
}

impl<'a, T: Identified> IntoIterator for &'a ObjectList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Serialize> Serialize for ObjectList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.objects.iter())
    }
}
