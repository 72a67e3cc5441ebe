//! Controlled label vocabulary and tag reconciliation.

pub mod reconciler;
pub mod vocabulary;

pub use reconciler::LabelReconciler;
pub use vocabulary::{collapse, load_labels, normalize_tag, SEPARATOR};
