//! Correlation id shared by a request's log lines, its error body and the
//! `trace-id` response header.
//!
//! The [`crate::Trace`] middleware opens a scope per request. Anything the
//! parcel and session services build inside that scope, [`super::Error`] in
//! particular, reads the id back with [`TraceId::current`]. The scope is a
//! tokio task-local, so work moved onto a spawned task must be wrapped in
//! [`TraceId::scope`] again.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    static ACTIVE: TraceId;
}

/// Response header carrying the trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// UUIDv4 naming one HTTP request.
///
/// # Examples
/// ```
/// use evo_backend::TraceId;
///
/// async fn book_parcel() {
///     let trace_id = TraceId::current().map(|id| id.to_string());
///     tracing::info!(?trace_id, "booking parcel");
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Fresh random id for an incoming request.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Id of the request being served, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        ACTIVE.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` as the current request id.
    ///
    /// # Examples
    /// ```
    /// use evo_backend::TraceId;
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let id: TraceId = "6f1c2a9e-8b47-4d1e-9a55-0c3e7b2d4f10".parse().expect("uuid");
    /// let seen = TraceId::scope(id, async { TraceId::current() }).await;
    /// assert_eq!(seen, Some(id));
    /// # });
    /// ```
    pub async fn scope<F: Future>(trace_id: Self, fut: F) -> F::Output {
        ACTIVE.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Error, ErrorCode};
    use rstest::rstest;

    #[tokio::test]
    async fn errors_built_in_scope_carry_the_id() {
        let id = TraceId::generate();
        let error = TraceId::scope(id, async { Error::new(ErrorCode::NotFound, "gone") }).await;
        assert_eq!(error.trace_id(), Some(id.to_string().as_str()));
    }

    #[tokio::test]
    async fn nothing_is_current_outside_a_request() {
        assert_eq!(TraceId::current(), None);
        assert_eq!(Error::new(ErrorCode::NotFound, "gone").trace_id(), None);
    }

    #[rstest]
    #[case("6f1c2a9e-8b47-4d1e-9a55-0c3e7b2d4f10")]
    #[case("00000000-0000-0000-0000-000000000000")]
    fn header_text_parses_back(#[case] raw: &str) {
        let id: TraceId = raw.parse().expect("uuid");
        assert_eq!(id.to_string(), raw);
    }

    #[rstest]
    fn malformed_header_text_is_rejected() {
        assert!("parcel-abc1234".parse::<TraceId>().is_err());
    }
}
