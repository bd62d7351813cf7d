//! Classifier port trait

use async_trait::async_trait;
use flowsentry_core::{Classification, FeatureRecord, Result};

/// Port to the external traffic classifier
///
/// Implementations must be deterministic for a given record/model pair and
/// must report failures as [`flowsentry_core::Error::Classifier`], never as
/// a silent default label.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify the given feature record
    async fn classify(&self, record: &FeatureRecord) -> Result<Classification>;

    /// Get the classifier name
    fn name(&self) -> &str;
}
