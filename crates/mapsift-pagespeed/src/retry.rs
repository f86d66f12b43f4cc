//! Pure retry policy for the variant/attempt loop.
//!
//! The loop state is (variant index, attempt index); this module holds the
//! transition function so the timing decisions are testable without any IO.
//! A successful audit short-circuits in the driver before this function is
//! consulted, terminating the loop across all remaining variants.

use std::time::Duration;

use crate::error::PagespeedError;

/// How one failed attempt is classified for the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AttemptOutcome {
    /// HTTP 429.
    RateLimited,
    /// 2xx with no lighthouse result in the body.
    EmptyAudit,
    /// Everything else: non-2xx status, network failure, decode failure.
    Failed,
}

/// The next move after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// Sleep `delay`, then try the same variant again.
    RetrySameVariant { delay: Duration },
    /// Sleep `delay`, then move on to the next variant.
    AdvanceVariant { delay: Duration },
}

pub(crate) fn classify(err: &PagespeedError) -> AttemptOutcome {
    match err {
        PagespeedError::RateLimited { .. } => AttemptOutcome::RateLimited,
        PagespeedError::EmptyAudit { .. } => AttemptOutcome::EmptyAudit,
        _ => AttemptOutcome::Failed,
    }
}

/// Decides what follows a failed attempt.
///
/// - A 429 escalates linearly: `base_delay × (attempt + 1)`, and the delay is
///   served even when the variant advances afterwards.
/// - An empty audit retries immediately.
/// - Any other failure retries after the flat `base_delay`, except after the
///   variant's last attempt, which advances with no delay.
pub(crate) fn next_step(
    outcome: AttemptOutcome,
    attempt: u32,
    max_retries: u32,
    base_delay: Duration,
) -> Step {
    let last_attempt = attempt + 1 >= max_retries;
    match outcome {
        AttemptOutcome::RateLimited => {
            let delay = base_delay * (attempt + 1);
            if last_attempt {
                Step::AdvanceVariant { delay }
            } else {
                Step::RetrySameVariant { delay }
            }
        }
        AttemptOutcome::EmptyAudit => {
            if last_attempt {
                Step::AdvanceVariant {
                    delay: Duration::ZERO,
                }
            } else {
                Step::RetrySameVariant {
                    delay: Duration::ZERO,
                }
            }
        }
        AttemptOutcome::Failed => {
            if last_attempt {
                Step::AdvanceVariant {
                    delay: Duration::ZERO,
                }
            } else {
                Step::RetrySameVariant { delay: base_delay }
            }
        }
    }
}
