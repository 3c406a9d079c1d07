/// Classification for retry policy.
///
/// The quote poller retries a `WithBackoff` failure once before the next
/// tick; a `Never` failure is logged as an error and left for the next tick.
///
/// | Class | Retry? |
/// |-------|--------|
/// | `Never` | No, the request itself is wrong |
/// | `WithBackoff` | Yes, after a delay |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Never retry - bad symbol or a response we cannot parse.
    Never,

    /// Transient failure such as a timeout, a 5xx or the exchange throttling
    /// the client. Retrying after a delay is expected to succeed.
    WithBackoff,
}
