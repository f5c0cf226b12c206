//! Proof-of-emission token.
//!
//! `ErrorGuaranteed` can only be produced by [`crate::Queue::error`], which
//! requires that a diagnostic has actually been pushed onto the queue. A
//! function returning `Result<T, ErrorGuaranteed>` is documenting, in the
//! type, that its error path has already reported something to the user —
//! callers must not report again, and must not silently swallow the `Err`.

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ErrorGuaranteed(());

impl ErrorGuaranteed {
    pub(crate) fn new_from_queue() -> Self {
        ErrorGuaranteed(())
    }
}
