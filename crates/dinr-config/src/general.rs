//! General application configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Insert the demo dataset when opening a database with no users.
    #[serde(default)]
    pub seed_on_open: bool,
}
