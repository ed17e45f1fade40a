use hlp_core::{HlpError, MAX_LABELS_CAP};
use serde::{Deserialize, Serialize};

/// Hard upper bound on the per-team worker count of the work-group kernel.
pub const MAX_TEAM_SIZE: usize = 1024;

/// Backend execution options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceOptions {
    /// Host worker count for the multi-core backend; 0 auto-detects.
    #[serde(default)]
    pub threads: usize,
    /// Per-team worker count for the work-group kernel; clamped to
    /// [`MAX_TEAM_SIZE`], 0 selects the default of 256.
    #[serde(default = "default_workgroup_size")]
    pub workgroup_size: usize,
    /// Upper bound on label values; must be in `(0, MAX_LABELS_CAP]`.
    #[serde(default = "default_max_labels")]
    pub max_labels: usize,
}

fn default_workgroup_size() -> usize {
    256
}

fn default_max_labels() -> usize {
    10
}

impl Default for DeviceOptions {
    fn default() -> Self {
        Self {
            threads: 0,
            workgroup_size: default_workgroup_size(),
            max_labels: default_max_labels(),
        }
    }
}

impl DeviceOptions {
    /// Validates the options, normalizing `workgroup_size` into
    /// `[1, MAX_TEAM_SIZE]`.
    pub fn validated(mut self) -> Result<Self, HlpError> {
        if self.max_labels == 0 {
            return Err(HlpError::config("max-labels-zero", "max_labels must be > 0"));
        }
        if self.max_labels > MAX_LABELS_CAP {
            return Err(HlpError::config(
                "max-labels-cap",
                "max_labels exceeds the compile-time cap",
            )
            .with_context("max_labels", self.max_labels)
            .with_context("cap", MAX_LABELS_CAP));
        }
        if self.workgroup_size == 0 {
            self.workgroup_size = default_workgroup_size();
        }
        self.workgroup_size = self.workgroup_size.min(MAX_TEAM_SIZE);
        Ok(self)
    }
}
