//! Per-client outcomes and the aggregated run report
//!
//! Every unit of work resolves to a tagged outcome at the join barrier.
//! The report owns all of them plus the figures derived from them;
//! nothing here is shared while the run is in flight.

use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::common::Error;

/// How one unit of work ended.
#[derive(Debug)]
pub enum ClientOutcome {
    /// The bulk insert went through.
    Completed { inserted: u64, elapsed: Duration },
    /// The unit failed somewhere between connect and insert.
    Failed { error: Error },
}

impl ClientOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, ClientOutcome::Completed { .. })
    }

    /// Insert duration, if the unit completed.
    pub fn elapsed(&self) -> Option<Duration> {
        match self {
            ClientOutcome::Completed { elapsed, .. } => Some(*elapsed),
            ClientOutcome::Failed { .. } => None,
        }
    }

    /// The failure, if the unit failed.
    pub fn error(&self) -> Option<&Error> {
        match self {
            ClientOutcome::Completed { .. } => None,
            ClientOutcome::Failed { error } => Some(error),
        }
    }
}

/// One client's line in the report.
#[derive(Debug)]
pub struct ClientReport {
    pub client_index: u64,
    pub outcome: ClientOutcome,
}

/// Aggregated result of a whole run.
///
/// Built once, after every unit of work has completed or failed. The
/// global duration therefore always covers the slowest unit.
#[derive(Debug)]
pub struct RunReport {
    /// Correlation id, also attached to every log event of the run.
    pub run_id: Uuid,
    /// Wall-clock start of the run.
    pub started_at: DateTime<Utc>,
    /// From first spawn to the end of the join barrier.
    pub total_elapsed: Duration,
    /// Per-client outcomes, ordered by client index.
    pub clients: Vec<ClientReport>,
}

impl RunReport {
    pub fn completed_count(&self) -> usize {
        self.clients
            .iter()
            .filter(|c| c.outcome.is_completed())
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.clients.len() - self.completed_count()
    }

    pub fn all_completed(&self) -> bool {
        self.failed_count() == 0
    }

    /// Documents acknowledged across all completed clients.
    pub fn documents_inserted(&self) -> u64 {
        self.clients
            .iter()
            .map(|c| match &c.outcome {
                ClientOutcome::Completed { inserted, .. } => *inserted,
                ClientOutcome::Failed { .. } => 0,
            })
            .sum()
    }

    /// Overall throughput; zero for an instant or empty run.
    pub fn docs_per_second(&self) -> f64 {
        if self.total_elapsed.is_zero() {
            return 0.0;
        }
        self.documents_inserted() as f64 / self.total_elapsed.as_secs_f64()
    }

    pub fn fastest_insert(&self) -> Option<Duration> {
        self.clients.iter().filter_map(|c| c.outcome.elapsed()).min()
    }

    pub fn slowest_insert(&self) -> Option<Duration> {
        self.clients.iter().filter_map(|c| c.outcome.elapsed()).max()
    }

    pub fn mean_insert(&self) -> Option<Duration> {
        let times: Vec<Duration> = self
            .clients
            .iter()
            .filter_map(|c| c.outcome.elapsed())
            .collect();
        if times.is_empty() {
            return None;
        }
        let total: Duration = times.iter().sum();
        Some(total / times.len() as u32)
    }

    /// Every failure, paired with the index of the client it hit.
    pub fn failures(&self) -> Vec<(u64, &Error)> {
        self.clients
            .iter()
            .filter_map(|c| c.outcome.error().map(|e| (c.client_index, e)))
            .collect()
    }
}
