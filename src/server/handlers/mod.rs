//! Route handlers, one module per resource group

pub mod directory;
pub mod grafana;
pub mod grafana_native;
pub mod prometheus;
pub mod statistics;
pub mod system;
pub mod tickets;

use super::HttpError;

/// Largest `limit` accepted by the list endpoints
pub const MAX_LIMIT: usize = 100;

/// Reject `value` outside `min..=max`.
pub(crate) fn check_range(
    name: &str,
    value: usize,
    min: usize,
    max: usize,
) -> Result<(), HttpError> {
    if value < min || value > max {
        return Err(HttpError::bad_request(format!(
            "{} must be between {} and {}, got {}",
            name, min, max, value
        )));
    }
    Ok(())
}
