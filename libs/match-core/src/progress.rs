//! Overall learning progress across sessions.

use serde::{Deserialize, Serialize};

/// Snapshot of the three lists for the progress panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub total: usize,
    pub learned: usize,
    pub mismatched: usize,
    pub remaining: usize,
    pub learned_percent: u32,
}

fn plural(count: usize) -> &'static str {
    if count > 1 {
        "s"
    } else {
        ""
    }
}

impl ProgressSummary {
    pub fn new(total: usize, learned: usize, mismatched: usize) -> Self {
        let learned_percent = if total > 0 {
            (learned as f64 / total as f64 * 100.0).round() as u32
        } else {
            0
        };
        Self {
            total,
            learned,
            mismatched,
            remaining: total.saturating_sub(learned),
            learned_percent,
        }
    }

    /// Every word learned and nothing left to fix.
    pub fn is_mastered(&self) -> bool {
        self.total > 0 && self.learned_percent == 100 && self.mismatched == 0
    }

    pub fn mismatched_label(&self) -> String {
        match self.mismatched {
            0 => "All caught up!".to_string(),
            n => format!("{} word{} incorrect", n, plural(n)),
        }
    }

    /// One-line summary, `None` while no words are imported.
    pub fn message(&self) -> Option<String> {
        if self.total == 0 {
            return None;
        }

        let mut message = format!(
            "Progress Summary: {}/{} words learned ({}%)",
            self.learned, self.total, self.learned_percent
        );
        if self.mismatched > 0 {
            message.push_str(&format!(
                " - {} word{} incorrect",
                self.mismatched,
                plural(self.mismatched)
            ));
        }
        if self.remaining > 0 {
            message.push_str(&format!(
                " - {} word{} remaining",
                self.remaining,
                plural(self.remaining)
            ));
        }
        Some(message)
    }
}
