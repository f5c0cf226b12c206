//! Structured error reporting for the Tara compiler (spec.md §7).
//!
//! The core never renders diagnostics to text for a human; it produces
//! [`Diagnostic`] values and [`ErrorGuaranteed`] proofs-of-emission. A host
//! (`tarac`) decides how to present them.

pub mod diagnostic;
pub mod fatal;
pub mod guarantee;
pub mod label;
pub mod queue;
pub mod severity;

pub use diagnostic::{Code, Diagnostic};
pub use fatal::FatalError;
pub use guarantee::ErrorGuaranteed;
pub use label::Label;
pub use queue::Queue;
pub use severity::Severity;
