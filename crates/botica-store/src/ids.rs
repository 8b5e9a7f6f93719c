//! # Id Generation
//!
//! Generators for the engine's record identifiers.
//!
//! ## Formats
//! ```text
//! Transaction:  {branch}-{yymmdd}-{seq:05}     e.g. B001-260805-00001
//! Held:         HELD-{yyyymmdd-hhmmss}-{seq:04} e.g. HELD-20260805-103000-0001
//! Return:       RET-{yyyymmdd-hhmmss}-{seq:04}  e.g. RET-20260805-110212-0003
//! ```
//!
//! Transaction sequences are monotonic within a branch and day and reset at
//! local midnight (the register day). Time-based ids carry a process-wide
//! monotonic suffix so two records created in the same second never collide
//! within a store.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use chrono::{Local, NaiveDate};

// =============================================================================
// Transaction Ids
// =============================================================================

#[derive(Debug)]
struct DayState {
    day: NaiveDate,
    sequence: u32,
}

/// Generates branch-date-sequence transaction ids.
///
/// Shared per branch: every terminal session of a branch draws from the
/// same generator, which is what keeps the sequence monotonic within the
/// branch/day.
#[derive(Debug)]
pub struct TransactionIdGenerator {
    branch_id: String,
    state: Mutex<DayState>,
}

impl TransactionIdGenerator {
    /// Creates a generator for a branch, starting at sequence 1.
    pub fn new(branch_id: impl Into<String>) -> Self {
        TransactionIdGenerator {
            branch_id: branch_id.into(),
            state: Mutex::new(DayState {
                day: Local::now().date_naive(),
                sequence: 0,
            }),
        }
    }

    /// Returns the branch this generator serves.
    pub fn branch_id(&self) -> &str {
        &self.branch_id
    }

    /// Issues the next transaction id for the current register day.
    pub fn next(&self) -> String {
        let today = Local::now().date_naive();
        let mut state = self.state.lock().expect("id generator mutex poisoned");

        if state.day != today {
            state.day = today;
            state.sequence = 0;
        }
        state.sequence += 1;

        format!(
            "{}-{}-{:05}",
            self.branch_id,
            state.day.format("%y%m%d"),
            state.sequence
        )
    }
}

// =============================================================================
// Time-Based Ids (held / return records)
// =============================================================================

/// Generates time-based ids with a monotonic suffix.
#[derive(Debug)]
pub struct TimeIdGenerator {
    prefix: &'static str,
    sequence: AtomicU64,
}

impl TimeIdGenerator {
    /// Creates a generator with the given record prefix ("HELD", "RET").
    pub const fn new(prefix: &'static str) -> Self {
        TimeIdGenerator {
            prefix,
            sequence: AtomicU64::new(0),
        }
    }

    /// Issues the next id.
    pub fn next(&self) -> String {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        format!(
            "{}-{}-{:04}",
            self.prefix,
            Local::now().format("%Y%m%d-%H%M%S"),
            sequence
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_transaction_ids_are_sequential() {
        let ids = TransactionIdGenerator::new("B001");

        let first = ids.next();
        let second = ids.next();

        assert!(first.starts_with("B001-"));
        assert!(first.ends_with("-00001"));
        assert!(second.ends_with("-00002"));
    }

    #[test]
    fn test_transaction_ids_unique_across_threads() {
        let ids = Arc::new(TransactionIdGenerator::new("B001"));
        let mut handles = Vec::new();
        for _ in 0..4 {
            let ids = Arc::clone(&ids);
            handles.push(std::thread::spawn(move || {
                (0..50).map(|_| ids.next()).collect::<Vec<_>>()
            }));
        }

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().expect("generator thread") {
                assert!(seen.insert(id), "duplicate transaction id issued");
            }
        }
        assert_eq!(seen.len(), 200);
    }

    #[test]
    fn test_time_ids_never_collide_within_a_second() {
        let ids = TimeIdGenerator::new("HELD");

        let first = ids.next();
        let second = ids.next();

        assert!(first.starts_with("HELD-"));
        assert_ne!(first, second);
    }
}
