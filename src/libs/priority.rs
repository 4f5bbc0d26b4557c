//! Heuristic task ranking.
//!
//! This is a labelled heuristic, not a route optimiser. Pending tasks are scored
//! by urgency, first matching rule wins:
//!
//! | rule                    | score          |
//! |-------------------------|----------------|
//! | overdue                 | 1000           |
//! | due within 24 hours     | 900            |
//! | priority 3 (high)       | 800 + jitter   |
//! | priority 2 (medium)     | 600 + jitter   |
//! | anything else           | 400 + jitter   |
//!
//! Jitter is drawn from `[0, 50)` by the caller-supplied RNG, so tests can pin
//! it with a seeded generator. Tasks without a due date skip the two date rules.

use crate::libs::task::{Task, TaskStatus};
use chrono::{Duration, NaiveDateTime};
use rand::Rng;
use serde::Serialize;

pub const DEFAULT_LIMIT: usize = 5;

const JITTER_SPAN: f64 = 50.0;

#[derive(Debug, Clone, Serialize)]
pub struct ScoredTask {
    #[serde(flatten)]
    pub task: Task,
    /// Fractional days until due; negative when overdue.
    pub days_until_due: Option<f64>,
    pub heuristic_score: f64,
}

pub fn score<R: Rng>(task: &Task, now: NaiveDateTime, rng: &mut R) -> f64 {
    if let Some(due) = task.due_date {
        let remaining = due - now;
        if remaining < Duration::zero() {
            return 1000.0;
        }
        if remaining < Duration::hours(24) {
            return 900.0;
        }
    }

    let base = match task.priority {
        3 => 800.0,
        2 => 600.0,
        _ => 400.0,
    };
    base + rng.gen_range(0.0..JITTER_SPAN)
}

/// Scores the pending tasks and returns the best `limit`, highest first.
pub fn prioritize<R: Rng>(tasks: Vec<Task>, now: NaiveDateTime, rng: &mut R, limit: usize) -> Vec<ScoredTask> {
    let mut scored: Vec<ScoredTask> = tasks
        .into_iter()
        .filter(|t| t.status == TaskStatus::Pending)
        .map(|task| {
            let heuristic_score = score(&task, now, rng);
            let days_until_due = task.due_date.map(|due| (due - now).num_milliseconds() as f64 / 86_400_000.0);
            ScoredTask {
                task,
                days_until_due,
                heuristic_score,
            }
        })
        .collect();

    scored.sort_by(|a, b| b.heuristic_score.total_cmp(&a.heuristic_score));
    scored.truncate(limit);
    scored
}
