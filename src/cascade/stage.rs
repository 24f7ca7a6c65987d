//! Stage trait.

use super::Detection;

/// A single stage in the detection cascade.
///
/// Each stage examines the title and either:
/// - Returns `Some(detection)` when it can decide, including deciding that
///   the title is *not* a sequel (a known first installment)
/// - Returns `None` to pass to the next stage
///
/// Stages never fail. Anything a stage cannot make sense of is a `None`.
pub trait Stage: Send + Sync {
    /// The name of this stage (for logging).
    fn name(&self) -> &'static str;

    /// Try to decide whether `title` is a sequel.
    fn detect(&self, title: &str) -> Option<Detection>;
}
