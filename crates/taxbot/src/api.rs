//! Seam between the tool invoker and the HTTP transport.

use std::future::Future;

use crate::error::Error;
use crate::outcome::{QueryOutcome, QueryRequest};

/// Remote question-answering API.
///
/// The invoker depends on this trait rather than the concrete HTTP client,
/// so tests can substitute the remote side.
pub trait QueryApi: Send + Sync {
    /// Submit one question. One attempt, one outcome or error per call.
    fn query(
        &self,
        request: QueryRequest,
    ) -> impl Future<Output = Result<QueryOutcome, Error>> + Send;
}
