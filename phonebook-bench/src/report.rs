//! Human-readable result lines.

use core::fmt;
use std::time::Duration;

use crate::bench::{BenchmarkReport, Phase, PhaseReport};

/// `"MM min. SS sec. mmm ms."`
pub fn format_duration(d: Duration) -> String {
    let ms = d.as_millis();
    format!(
        "{:02} min. {:02} sec. {:03} ms.",
        ms / 60_000,
        ms / 1_000 % 60,
        ms % 1_000
    )
}

pub fn found_message(matched: usize, total: usize, elapsed: Duration) -> String {
    format!(
        "Found {matched} / {total} entries. Time taken: {}",
        format_duration(elapsed)
    )
}

pub fn step_message(label: &str, elapsed: Duration) -> String {
    format!("{label}: {}", format_duration(elapsed))
}

impl fmt::Display for PhaseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            found_message(self.matched(), self.total_queries, self.elapsed())
        )?;
        if self.phase == Phase::Baseline {
            return Ok(());
        }
        let Some((search, prep)) = self.steps.split_last() else {
            return Ok(());
        };
        for step in prep {
            write!(f, "\n{}", step.message)?;
            if step.deadline_exceeded {
                write!(f, " - STOPPED, moved to linear search")?;
            }
        }
        write!(f, "\n{}", step_message("Searching time", search.elapsed))
    }
}

impl fmt::Display for BenchmarkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, phase) in self.phases.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
                writeln!(f)?;
            }
            writeln!(f, "Start searching ({})...", phase.phase.as_str())?;
            write!(f, "{phase}")?;
        }
        Ok(())
    }
}
