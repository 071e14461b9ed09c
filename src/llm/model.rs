//! Model selection by diff size.

use tracing::info;

use crate::config::DiffConfig;
use crate::error::ConfigError;
use crate::git::DiffStats;

/// Pick the short model for small diffs and the long model otherwise.
///
/// A diff whose insertions plus deletions equal the threshold counts as large.
pub fn select_model<'a>(stats: &DiffStats, config: &'a DiffConfig) -> Result<&'a str, ConfigError> {
    let total = stats.total_changes();
    let (model, which) = if total < config.threshold {
        info!(
            "{} changes < threshold {}, using short model {}",
            total, config.threshold, config.short_model
        );
        (config.short_model.as_str(), "short_model")
    } else {
        info!(
            "{} changes >= threshold {}, using long model {}",
            total, config.threshold, config.long_model
        );
        (config.long_model.as_str(), "long_model")
    };

    if model.trim().is_empty() {
        return Err(ConfigError::EmptyModel { which });
    }
    Ok(model)
}
