//! Analysis workflow state management
//!
//! The workflow controller is the single owner of the dashboard state. It
//! moves between idle, loading, error and ready as the user submits files
//! and the service answers, and makes sure only the latest submission can
//! ever change what the user sees.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use riskdesk_core::AnalysisResponse;
use tokio::sync::mpsc;

use crate::api::{AnalysisService, ClientError, PortfolioUpload};

// ============================================================================
// Workflow State
// ============================================================================

/// Where the analysis workflow currently is. Exactly one holds at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AnalysisState {
    /// Waiting for the user to pick a file
    #[default]
    Idle,
    /// A submission is in flight
    Loading { started_at: DateTime<Utc> },
    /// The last submission failed
    Error(String),
    /// The last submission produced a report
    Ready(Box<AnalysisResponse>),
}

impl AnalysisState {
    pub fn is_loading(&self) -> bool {
        matches!(self, AnalysisState::Loading { .. })
    }

    /// The report being viewed, if any
    pub fn response(&self) -> Option<&AnalysisResponse> {
        match self {
            AnalysisState::Ready(response) => Some(response.as_ref()),
            _ => None,
        }
    }

    /// The error message being shown, if any
    pub fn error(&self) -> Option<&str> {
        match self {
            AnalysisState::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Which top-level view presents this state
    pub fn active_view(&self) -> ActiveView {
        match self {
            AnalysisState::Ready(_) => ActiveView::Results,
            _ => ActiveView::Upload,
        }
    }
}

/// Top-level view of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Upload,
    Results,
}

// ============================================================================
// Submissions
// ============================================================================

/// Tag of one submission. Later submissions have larger ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubmissionId(u64);

/// The resolved outcome of one submission, tagged with its id.
#[derive(Debug)]
pub struct Completion {
    pub id: SubmissionId,
    pub outcome: Result<AnalysisResponse, ClientError>,
}

// ============================================================================
// Workflow Controller
// ============================================================================

/// Owns the analysis state and the lifecycle of submissions.
///
/// Each `submit` runs the analysis on a spawned task; the outcome comes back
/// as a [`Completion`] through [`next_completion`](Self::next_completion).
/// A completion only applies while it belongs to the latest generation,
/// so a superseded request can never overwrite newer state.
pub struct WorkflowController<S: AnalysisService> {
    service: Arc<S>,
    state: AnalysisState,
    generation: u64,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
}

impl<S: AnalysisService> WorkflowController<S> {
    pub fn new(service: S) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            service: Arc::new(service),
            state: AnalysisState::Idle,
            generation: 0,
            completions_tx,
            completions_rx,
        }
    }

    /// Current state
    pub fn state(&self) -> &AnalysisState {
        &self.state
    }

    /// The submission whose outcome would currently be applied
    pub fn current_submission(&self) -> Option<SubmissionId> {
        self.state
            .is_loading()
            .then_some(SubmissionId(self.generation))
    }

    /// Submit a holdings file for analysis.
    ///
    /// Always allowed; supersedes whatever was shown or in flight before.
    /// Must be called from within a Tokio runtime.
    pub fn submit(&mut self, upload: PortfolioUpload) -> SubmissionId {
        self.generation += 1;
        let id = SubmissionId(self.generation);
        self.state = AnalysisState::Loading {
            started_at: Utc::now(),
        };

        tracing::info!(
            submission = id.0,
            file = %upload.file_name,
            bytes = upload.len(),
            "Submitting portfolio for analysis"
        );

        let service = Arc::clone(&self.service);
        let completions = self.completions_tx.clone();
        tokio::spawn(async move {
            let outcome = service.analyze(upload).await;
            // Receiver only goes away with the controller itself
            let _ = completions.send(Completion { id, outcome });
        });

        id
    }

    /// Return to idle from a report or an error. Returns whether it did.
    ///
    /// Ignored while loading: the in-flight submission still resolves normally.
    pub fn reset(&mut self) -> bool {
        match self.state {
            AnalysisState::Ready(_) | AnalysisState::Error(_) => {
                self.generation += 1;
                self.state = AnalysisState::Idle;
                tracing::debug!("Workflow reset");
                true
            }
            AnalysisState::Idle | AnalysisState::Loading { .. } => false,
        }
    }

    /// Apply a resolved submission. Returns false when it was superseded.
    pub fn apply(&mut self, completion: Completion) -> bool {
        let Completion { id, outcome } = completion;

        if id.0 != self.generation || !self.state.is_loading() {
            tracing::debug!(
                submission = id.0,
                current = self.generation,
                "Discarding superseded analysis outcome"
            );
            return false;
        }

        self.state = match outcome {
            Ok(response) => {
                tracing::info!(
                    submission = id.0,
                    scenarios = response.simulation_results.len(),
                    "Analysis ready"
                );
                AnalysisState::Ready(Box::new(response))
            }
            Err(e) => {
                tracing::warn!(submission = id.0, "Analysis failed: {}", e);
                AnalysisState::Error(e.to_string())
            }
        };
        true
    }

    /// Wait for the next submission to resolve and apply it.
    ///
    /// Returns whether the state changed. Cancel safe: a completion that
    /// has been received is always applied before returning.
    pub async fn next_completion(&mut self) -> bool {
        match self.completions_rx.recv().await {
            Some(completion) => self.apply(completion),
            // The controller holds a sender, so the channel never closes
            None => false,
        }
    }
}
