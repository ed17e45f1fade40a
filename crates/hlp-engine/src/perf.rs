use std::time::Duration;

use serde::{Deserialize, Serialize};

/// One labelled section of a run's timing breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerfMoment {
    /// Section name ("setup", "init", "iterations", "finalize").
    pub label: String,
    /// Wall-clock duration of the section.
    pub duration: Duration,
}

/// Performance summary returned by [`crate::LabelPropagation::run`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerfReport {
    /// Number of iterations performed.
    pub iterations: usize,
    /// Total wall-clock time of the run.
    pub total_time: Duration,
    /// Ordered timing breakdown.
    pub moments: Vec<PerfMoment>,
}

impl PerfReport {
    /// Appends a labelled section to the breakdown.
    pub(crate) fn add_moment(&mut self, label: &str, duration: Duration) {
        self.moments.push(PerfMoment {
            label: label.to_string(),
            duration,
        });
    }

    /// Looks up a section of the breakdown by label.
    pub fn moment(&self, label: &str) -> Option<Duration> {
        self.moments
            .iter()
            .find(|moment| moment.label == label)
            .map(|moment| moment.duration)
    }
}
