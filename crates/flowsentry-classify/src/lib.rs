//! FlowSentry Classifiers
//!
//! The classifier port consumed by the detection loop, plus substitutable
//! doubles for tests and replay drills.
//!
//! The real model lives outside this system; everything here treats the
//! classifier as a black box mapping a feature record to a label and a
//! confidence score.

pub mod classifier;
pub mod doubles;

pub use classifier::Classifier;
pub use doubles::{
    FailingClassifier, FixedClassifier, ReplayClassifier, ScriptedClassifier, ScriptedOutcome,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::Classifier;
    pub use crate::doubles::{FixedClassifier, ReplayClassifier, ScriptedClassifier};
}
