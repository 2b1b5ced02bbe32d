//! HTTP client for the portfolio stress-testing service
//!
//! Provides async methods for submitting holdings files to the service
//! running behind the configured API URL.

pub mod client;

pub use client::*;

use futures::future::{BoxFuture, FutureExt};
use riskdesk_core::AnalysisResponse;

/// Something that can run a portfolio analysis on behalf of the workflow
/// controller.
///
/// The returned future must own everything it needs, since the controller
/// drives it on a spawned task.
pub trait AnalysisService: Send + Sync + 'static {
    fn analyze(&self, upload: PortfolioUpload) -> BoxFuture<'static, Result<AnalysisResponse>>;
}

impl AnalysisService for AnalysisClient {
    fn analyze(&self, upload: PortfolioUpload) -> BoxFuture<'static, Result<AnalysisResponse>> {
        let client = self.clone();
        async move { AnalysisClient::analyze(&client, upload).await }.boxed()
    }
}
