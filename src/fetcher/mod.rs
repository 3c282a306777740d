//! The fetch-dedup-persist cycle.
//!
//! Each request captures the most recently stored question, pulls a batch
//! from the provider, keeps only questions the store has never seen, asks
//! the provider for replacements while duplicates remain (bounded by a retry
//! budget), and commits the surviving batch in one transaction. The captured
//! question is what the caller receives, so every response answers the
//! request that came before it.

use std::collections::HashSet;
use std::sync::Arc;

use crate::db::Repository;
use crate::errors::AppError;
use crate::models::StoredQuestion;
use crate::upstream::UpstreamClient;

/// Runs one fetch-dedup-persist cycle per request.
#[derive(Clone)]
pub struct QuestionFetcher {
    repo: Arc<Repository>,
    upstream: Arc<UpstreamClient>,
    retry_budget: u32,
}

impl QuestionFetcher {
    pub fn new(repo: Arc<Repository>, upstream: Arc<UpstreamClient>, retry_budget: u32) -> Self {
        Self {
            repo,
            upstream,
            retry_budget,
        }
    }

    /// Run one cycle and return the question stored before this call's batch.
    ///
    /// `count` must already be validated and clamped by the handler. Running
    /// out of retries with slots unfilled is a degraded success, not an
    /// error; any store or provider failure aborts before the commit, so a
    /// failed request inserts nothing.
    pub async fn collect(&self, count: u32) -> Result<Option<StoredQuestion>, AppError> {
        let mut tx = self.repo.begin().await?;

        // Captured before anything is inserted; this is the caller's answer.
        let previous = self.repo.most_recent(&mut tx).await?;
        match &previous {
            Some(question) => tracing::info!("Previous question has id {}", question.id),
            None => tracing::info!("No questions in database yet"),
        }

        let mut batch = self.upstream.fetch_random(count).await?;

        // A short first batch lowers the target; an exhausted provider is
        // not an error.
        let mut outstanding = batch.len();
        let mut checked: HashSet<i64> = HashSet::new();
        let mut retries = 0;

        loop {
            for candidate in &batch {
                // Each external id is decided at most once per request,
                // however often the provider repeats it.
                if !checked.insert(candidate.id) {
                    continue;
                }

                if self
                    .repo
                    .find_by_external_id(&mut tx, candidate.id)
                    .await?
                    .is_some()
                {
                    tracing::info!("Question {} already stored, skipping", candidate.id);
                    continue;
                }

                if self.repo.insert(&mut tx, candidate).await?.is_some() {
                    tracing::info!("Saved unique question {}", candidate.id);
                    outstanding = outstanding.saturating_sub(1);
                } else {
                    // Lost the insert race against a concurrent request;
                    // same outcome as any other duplicate.
                    tracing::info!("Question {} was stored concurrently, skipping", candidate.id);
                }
            }

            if outstanding == 0 || retries >= self.retry_budget {
                break;
            }

            retries += 1;
            tracing::info!(
                "Retry {} to replace {} duplicate question(s)",
                retries,
                outstanding
            );
            batch = self.upstream.fetch_random(outstanding as u32).await?;
        }

        if outstanding > 0 {
            tracing::warn!(
                "Stopped with {} slot(s) unfilled after {} retries",
                outstanding,
                retries
            );
        }

        tx.commit().await?;
        tracing::info!("Committed question batch");

        Ok(previous)
    }
}
