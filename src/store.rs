//! Append-only run log keyed by run id
//!
//! Each run is stored as one JSON line holding the inputs, the outcome and
//! the wall-clock time taken. Completed runs also carry the summary and the
//! full monthly records; rejected runs carry the error message instead.
//! Stored runs are never rewritten.

use crate::assumptions::Assumptions;
use crate::error::{DataError, ProjectionError};
use crate::projection::{ProjectionResult, ProjectionSummary};
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use uuid::Uuid;

/// One persisted projection run, completed or rejected
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRun {
    pub run_id: String,
    pub timestamp: DateTime<Utc>,
    pub assumptions: Assumptions,
    pub success: bool,
    #[serde(default)]
    pub error_message: Option<String>,
    pub elapsed_ms: f64,
    #[serde(default)]
    pub summary: Option<ProjectionSummary>,
    #[serde(default)]
    pub result: Option<ProjectionResult>,
}

/// Listing entry without the monthly records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunListing {
    pub run_id: String,
    pub timestamp: DateTime<Utc>,
    pub policy_count: u64,
    pub term_months: u32,
    pub success: bool,
    pub error_message: Option<String>,
    pub elapsed_ms: f64,
    pub total_premiums: Option<f64>,
    pub total_claims: Option<f64>,
}

/// Aggregate statistics over all stored runs
///
/// Policy and cashflow totals cover completed runs only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreStats {
    pub run_count: usize,
    pub success_count: usize,
    pub error_count: usize,
    pub avg_elapsed_ms: f64,
    pub total_policies: u64,
    pub total_premiums: f64,
    pub total_claims: f64,
    pub first_run: Option<DateTime<Utc>>,
    pub last_run: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct RunStore {
    path: PathBuf,
}

impl RunStore {
    /// Open a store file, creating it (and its directory) if missing
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist a completed run and return its id
    pub fn save(
        &self,
        assumptions: &Assumptions,
        result: &ProjectionResult,
        elapsed: Duration,
    ) -> Result<String, DataError> {
        let run = StoredRun {
            run_id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            assumptions: assumptions.clone(),
            success: true,
            error_message: None,
            elapsed_ms: elapsed.as_secs_f64() * 1000.0,
            summary: Some(result.summary()),
            result: Some(result.clone()),
        };
        self.append(&run)?;

        info!("Stored run {} ({} months) in {}", run.run_id, result.len(), self.path.display());
        Ok(run.run_id)
    }

    /// Persist a rejected run and return its id
    pub fn save_failure(
        &self,
        assumptions: &Assumptions,
        error: &ProjectionError,
        elapsed: Duration,
    ) -> Result<String, DataError> {
        let run = StoredRun {
            run_id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            assumptions: assumptions.clone(),
            success: false,
            error_message: Some(error.to_string()),
            elapsed_ms: elapsed.as_secs_f64() * 1000.0,
            summary: None,
            result: None,
        };
        self.append(&run)?;

        info!("Stored rejected run {} in {}: {}", run.run_id, self.path.display(), error);
        Ok(run.run_id)
    }

    /// Look up a run by id
    pub fn get(&self, run_id: &str) -> Result<Option<StoredRun>, DataError> {
        Ok(self.read_all()?.into_iter().find(|run| run.run_id == run_id))
    }

    /// Runs, most recent first
    pub fn list(&self, limit: usize, offset: usize) -> Result<Vec<RunListing>, DataError> {
        Ok(self
            .read_all()?
            .into_iter()
            .rev()
            .skip(offset)
            .take(limit)
            .map(|run| RunListing {
                run_id: run.run_id,
                timestamp: run.timestamp,
                policy_count: run.assumptions.policy_count,
                term_months: run.assumptions.term_months,
                success: run.success,
                total_premiums: run.summary.as_ref().map(|s| s.total_premiums),
                total_claims: run.summary.as_ref().map(|s| s.total_claims),
                error_message: run.error_message,
                elapsed_ms: run.elapsed_ms,
            })
            .collect())
    }

    pub fn count(&self) -> Result<usize, DataError> {
        let reader = BufReader::new(File::open(&self.path)?);
        let mut count = 0;
        for line in reader.lines() {
            if !line?.trim().is_empty() {
                count += 1;
            }
        }
        Ok(count)
    }

    pub fn stats(&self) -> Result<StoreStats, DataError> {
        let runs = self.read_all()?;
        let mut stats = runs.iter().fold(StoreStats::default(), |mut acc, run| {
            acc.run_count += 1;
            acc.avg_elapsed_ms += run.elapsed_ms;
            if run.success {
                acc.success_count += 1;
            } else {
                acc.error_count += 1;
            }
            if let Some(summary) = run.summary.as_ref().filter(|_| run.success) {
                acc.total_policies += run.assumptions.policy_count;
                acc.total_premiums += summary.total_premiums;
                acc.total_claims += summary.total_claims;
            }
            acc.first_run = Some(acc.first_run.map_or(run.timestamp, |t| t.min(run.timestamp)));
            acc.last_run = Some(acc.last_run.map_or(run.timestamp, |t| t.max(run.timestamp)));
            acc
        });
        if stats.run_count > 0 {
            stats.avg_elapsed_ms /= stats.run_count as f64;
        }
        Ok(stats)
    }

    fn append(&self, run: &StoredRun) -> Result<(), DataError> {
        let line = serde_json::to_string(run)?;
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<StoredRun>, DataError> {
        let reader = BufReader::new(File::open(&self.path)?);
        let mut runs = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let run = serde_json::from_str(&line).map_err(|e| DataError::Parse {
                line: index + 1,
                reason: e.to_string(),
            })?;
            runs.push(run);
        }

        Ok(runs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::MortalityRegistry;
    use crate::projection::ProjectionEngine;
    use approx::assert_relative_eq;

    const ELAPSED: Duration = Duration::from_millis(4);

    fn scratch_store(name: &str) -> RunStore {
        let dir = std::env::temp_dir().join(format!(
            "term_projection_store_{}_{}",
            std::process::id(),
            name
        ));
        let _ = fs::remove_dir_all(&dir);
        RunStore::open(dir.join("runs.jsonl")).unwrap()
    }

    fn run(policy_count: u64) -> (Assumptions, ProjectionResult) {
        let assumptions = Assumptions::new(policy_count, 100_000.0, 12, 40, 0.03, 50.0);
        let result = ProjectionEngine::default()
            .project_assumptions(&assumptions, &MortalityRegistry::with_builtin())
            .unwrap();
        (assumptions, result)
    }

    #[test]
    fn test_save_and_get_round_trip() {
        let store = scratch_store("round_trip");
        let (assumptions, result) = run(1000);

        let run_id = store.save(&assumptions, &result, ELAPSED).unwrap();
        let stored = store.get(&run_id).unwrap().expect("run should be stored");

        assert!(stored.success);
        assert_eq!(stored.error_message, None);
        assert_relative_eq!(stored.elapsed_ms, 4.0, max_relative = 1e-12);
        assert_eq!(stored.assumptions, assumptions);
        assert_eq!(stored.result, Some(result.clone()));
        assert_eq!(stored.summary, Some(result.summary()));
        assert!(store.get("missing").unwrap().is_none());
    }

    #[test]
    fn test_list_most_recent_first() {
        let store = scratch_store("listing");
        let ids: Vec<String> = [100, 200, 300]
            .iter()
            .map(|&n| {
                let (a, r) = run(n);
                store.save(&a, &r, ELAPSED).unwrap()
            })
            .collect();

        assert_eq!(store.count().unwrap(), 3);
        let listing = store.list(2, 0).unwrap();
        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].run_id, ids[2]);
        assert_eq!(listing[0].policy_count, 300);
        assert_eq!(listing[1].run_id, ids[1]);

        let rest = store.list(10, 2).unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].run_id, ids[0]);
    }

    #[test]
    fn test_stats() {
        let store = scratch_store("stats");
        assert_eq!(store.stats().unwrap(), StoreStats::default());

        let (a1, r1) = run(100);
        let (a2, r2) = run(300);
        store.save(&a1, &r1, ELAPSED).unwrap();
        store.save(&a2, &r2, ELAPSED).unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats.run_count, 2);
        assert_eq!(stats.total_policies, 400);
        assert_eq!(
            stats.total_premiums,
            r1.summary().total_premiums + r2.summary().total_premiums
        );
        assert_eq!(stats.success_count, 2);
        assert_eq!(stats.error_count, 0);
        assert_relative_eq!(stats.avg_elapsed_ms, 4.0, max_relative = 1e-12);
        assert!(stats.first_run.unwrap() <= stats.last_run.unwrap());
    }

    #[test]
    fn test_rejected_run_is_logged() {
        let store = scratch_store("rejected");
        let (a, r) = run(500);
        store.save(&a, &r, Duration::from_millis(2)).unwrap();

        let bad = Assumptions::new(10, 100_000.0, 0, 40, 0.03, 50.0);
        let error = ProjectionEngine::default()
            .project_assumptions(&bad, &MortalityRegistry::with_builtin())
            .unwrap_err();
        let run_id = store.save_failure(&bad, &error, Duration::from_millis(6)).unwrap();

        let stored = store.get(&run_id).unwrap().expect("rejected run should be stored");
        assert!(!stored.success);
        assert!(stored.result.is_none());
        assert!(stored.summary.is_none());
        assert!(stored.error_message.as_deref().unwrap().contains("term_months"));

        let listing = store.list(10, 0).unwrap();
        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].run_id, run_id);
        assert!(!listing[0].success);
        assert_eq!(listing[0].total_premiums, None);
        assert!(listing[1].success);

        let stats = store.stats().unwrap();
        assert_eq!(stats.run_count, 2);
        assert_eq!(stats.success_count, 1);
        assert_eq!(stats.error_count, 1);
        assert_eq!(stats.total_policies, 500);
        assert_eq!(stats.total_premiums, r.summary().total_premiums);
        assert_relative_eq!(stats.avg_elapsed_ms, 4.0, max_relative = 1e-12);
    }

    #[test]
    fn test_run_ids_are_unique() {
        let store = scratch_store("unique_ids");
        let (a, r) = run(10);
        let first = store.save(&a, &r, ELAPSED).unwrap();
        let second = store.save(&a, &r, ELAPSED).unwrap();
        assert_ne!(first, second);
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_corrupt_line_reports_position() {
        let store = scratch_store("corrupt");
        let (a, r) = run(10);
        store.save(&a, &r, ELAPSED).unwrap();
        let mut file = OpenOptions::new().append(true).open(store.path()).unwrap();
        writeln!(file, "{{not json").unwrap();

        assert!(matches!(store.list(10, 0), Err(DataError::Parse { line: 2, .. })));
    }
}
