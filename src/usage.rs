//! Local usage log: an append-only list of actions capped at the most recent
//! entries, plus summary statistics.

#[cfg(test)]
#[path = "usage_test.rs"]
mod usage_test;

use serde::{Deserialize, Serialize};

/// One tracked action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageEvent {
    pub action: String,
    pub timestamp: String,
    #[serde(default)]
    pub details: serde_json::Value,
}

/// The stored usage document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageLog {
    pub sessions: Vec<UsageEvent>,
}

/// How often one action occurs in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCount {
    pub action: String,
    pub count: usize,
}

/// Summary of the log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStats {
    pub total_sessions: usize,
    pub recent_sessions: Vec<UsageEvent>,
    pub most_used_actions: Vec<ActionCount>,
}

const RECENT_COUNT: usize = 10;
const TOP_ACTIONS: usize = 5;

impl UsageLog {
    /// Parse a stored log. Anything unreadable starts a fresh log.
    #[must_use]
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(parsed) => parsed,
            Err(e) => {
                log::warn!("usage log unreadable, starting fresh: {e}");
                Self::default()
            }
        }
    }

    /// Append `event`, evicting the oldest entries beyond `cap`.
    pub fn push(&mut self, event: UsageEvent, cap: usize) {
        self.sessions.push(event);
        if self.sessions.len() > cap {
            let excess = self.sessions.len() - cap;
            self.sessions.drain(..excess);
        }
    }

    #[must_use]
    pub fn stats(&self) -> UsageStats {
        let recent_start = self.sessions.len().saturating_sub(RECENT_COUNT);

        // Counts in first-seen order so equal counts keep a stable ranking.
        let mut ranked: Vec<ActionCount> = Vec::new();
        for event in &self.sessions {
            if let Some(idx) = ranked.iter().position(|c| c.action == event.action) {
                ranked[idx].count += 1;
            } else {
                ranked.push(ActionCount { action: event.action.clone(), count: 1 });
            }
        }
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(TOP_ACTIONS);

        UsageStats {
            total_sessions: self.sessions.len(),
            recent_sessions: self.sessions[recent_start..].to_vec(),
            most_used_actions: ranked,
        }
    }
}
