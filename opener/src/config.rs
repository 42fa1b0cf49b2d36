//! Store configuration

use crate::session::SessionId;

/// Configuration for a mounted session store.
///
/// Controls the stacking value handed to the rendering surface for each
/// session. The value is presentation only and never affects store logic.
///
/// # Example
///
/// ```
/// use opener::StoreConfig;
///
/// let config = StoreConfig::default().with_base_z(100).with_layer_step(5);
/// assert_eq!(config.base_z, 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Stacking value below the first layer.
    ///
    /// Default: 0
    pub base_z: i64,

    /// Distance between two consecutive session ids.
    ///
    /// Default: 10
    pub layer_step: i64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_z: 0,
            layer_step: 10,
        }
    }
}

impl StoreConfig {
    /// Creates a new store config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base stacking value.
    pub fn with_base_z(mut self, base_z: i64) -> Self {
        self.base_z = base_z;
        self
    }

    /// Sets the step between layers.
    pub fn with_layer_step(mut self, layer_step: i64) -> Self {
        self.layer_step = layer_step;
        self
    }

    /// Stacking value for a session: `base_z + (id + 1) * layer_step`.
    pub fn z_index(&self, id: SessionId) -> i64 {
        let slot = i64::try_from(id.get()).unwrap_or(i64::MAX).saturating_add(1);
        self.base_z.saturating_add(slot.saturating_mul(self.layer_step))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_ten_per_layer() {
        let config = StoreConfig::default();
        assert_eq!(config.z_index(SessionId::new(0)), 10);
        assert_eq!(config.z_index(SessionId::new(4)), 50);
    }

    #[test]
    fn base_shifts_every_layer() {
        let config = StoreConfig::new().with_base_z(1000).with_layer_step(2);
        assert_eq!(config.z_index(SessionId::new(0)), 1002);
        assert_eq!(config.z_index(SessionId::new(9)), 1020);
    }
}
