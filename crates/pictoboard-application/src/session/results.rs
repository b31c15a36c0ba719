//! Collaborator result panes.
//!
//! One pane per result list (search, upload). A pane hands out a ticket
//! when a request starts and only applies a completion carrying the
//! current ticket: a result arriving after the pane was reset — a new
//! query typed, a new file selected — is discarded, never applied.

use pictoboard_core::error::PictoError;
use pictoboard_core::pictogram::PictogramDescriptor;
use pictoboard_core::recognition::QueryStatus;

/// Identifies one collaborator request against its pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// Read-only result set plus request lifecycle state.
#[derive(Debug, Default)]
pub struct ResultPane {
    status: QueryStatus,
    results: Vec<PictogramDescriptor>,
    generation: u64,
}

impl ResultPane {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a pane around results rehydrated from storage.
    pub fn restore(results: Vec<PictogramDescriptor>) -> Self {
        Self {
            status: QueryStatus::Idle,
            results,
            generation: 0,
        }
    }

    pub fn status(&self) -> &QueryStatus {
        &self.status
    }

    pub fn results(&self) -> &[PictogramDescriptor] {
        &self.results
    }

    /// Starts a new attempt: clears the previous results, marks the pane
    /// in progress, and invalidates every outstanding ticket.
    pub fn begin(&mut self) -> RequestTicket {
        self.generation += 1;
        self.results.clear();
        self.status = QueryStatus::InProgress;
        RequestTicket(self.generation)
    }

    /// Applies a finished request.
    ///
    /// Returns `false` — and changes nothing — when `ticket` is stale,
    /// i.e. the pane was reset while the request was in flight.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<Vec<PictogramDescriptor>, PictoError>,
    ) -> bool {
        if ticket.0 != self.generation {
            tracing::debug!("discarding stale collaborator result (ticket {})", ticket.0);
            return false;
        }

        match outcome {
            Ok(results) => {
                self.results = results;
                self.status = QueryStatus::Succeeded;
            }
            Err(err) => {
                tracing::warn!("collaborator request failed: {err}");
                self.status = QueryStatus::Failed(err.to_string());
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(id: &str) -> PictogramDescriptor {
        PictogramDescriptor::new(id, format!("name-{id}"), "")
    }

    #[test]
    fn test_begin_clears_previous_results() {
        let mut pane = ResultPane::restore(vec![descriptor("1")]);
        let ticket = pane.begin();
        assert!(pane.results().is_empty());
        assert!(pane.status().is_in_progress());

        assert!(pane.complete(ticket, Ok(vec![descriptor("2")])));
        assert_eq!(pane.status(), &QueryStatus::Succeeded);
        assert_eq!(pane.results().len(), 1);
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut pane = ResultPane::new();
        let first = pane.begin();
        let second = pane.begin();

        // The first request resolves after a second attempt started.
        assert!(!pane.complete(first, Ok(vec![descriptor("old")])));
        assert!(pane.results().is_empty());
        assert!(pane.status().is_in_progress());

        assert!(pane.complete(second, Ok(vec![descriptor("new")])));
        assert_eq!(pane.results()[0].id, "new");
    }

    #[test]
    fn test_failure_becomes_status_message() {
        let mut pane = ResultPane::new();
        let ticket = pane.begin();
        assert!(pane.complete(ticket, Err(PictoError::collaborator("network down"))));

        match pane.status() {
            QueryStatus::Failed(message) => assert!(message.contains("network down")),
            other => panic!("expected failure status, got {other:?}"),
        }
        assert!(pane.results().is_empty());
    }

    #[test]
    fn test_results_stay_visible_until_next_attempt() {
        let mut pane = ResultPane::new();
        let ticket = pane.begin();
        pane.complete(ticket, Ok(vec![descriptor("1")]));
        assert_eq!(pane.results().len(), 1);

        // Only a new attempt clears them.
        pane.begin();
        assert!(pane.results().is_empty());
    }
}
