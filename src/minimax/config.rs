//! Alpha-beta configuration parameters.

use serde::{Deserialize, Serialize};

use crate::core::{PatchworkError, Result};

/// Alpha-beta configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimaxConfig {
    /// Plies searched below the current state (default: 3).
    pub depth: u32,

    /// Placements kept per purchase slot after fit ordering (default: 3).
    /// Walking is never pruned.
    pub actions_per_patch: usize,
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            actions_per_patch: 3,
        }
    }
}

impl MinimaxConfig {
    /// Create a new config with a custom search depth.
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Create a new config with a custom top-K per purchase slot.
    pub fn with_actions_per_patch(mut self, actions_per_patch: usize) -> Self {
        self.actions_per_patch = actions_per_patch;
        self
    }

    /// # Errors
    ///
    /// [`PatchworkError::InvalidConfiguration`] for a zero depth or top-K.
    pub fn validate(&self) -> Result<()> {
        if self.depth == 0 {
            return Err(PatchworkError::InvalidConfiguration(
                "depth must be > 0".into(),
            ));
        }
        if self.actions_per_patch == 0 {
            return Err(PatchworkError::InvalidConfiguration(
                "actions_per_patch must be > 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MinimaxConfig::default();
        assert_eq!(config.depth, 3);
        assert_eq!(config.actions_per_patch, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        assert!(MinimaxConfig::default().with_depth(0).validate().is_err());
        assert!(MinimaxConfig::default()
            .with_actions_per_patch(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_serialization() {
        let config = MinimaxConfig::default().with_depth(2);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<MinimaxConfig>(&json).unwrap(), config);
    }
}
