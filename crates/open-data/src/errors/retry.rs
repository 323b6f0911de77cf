/// Classification for the fetch retry policy.
///
/// | Class | Behavior |
/// |-------|----------|
/// | `AfterDelay` | Sleep the fixed inter-attempt delay, then retry, up to the ceiling |
/// | `Abort` | Give up on this fetch immediately, keep accumulated rows |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Transient failure (timeout). Retry after the fixed delay.
    AfterDelay,

    /// Terminal failure for this slice (HTTP error status, malformed body,
    /// transport fault). Retrying within the same request will not help.
    Abort,
}
