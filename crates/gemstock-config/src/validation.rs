//! Configuration validation

use crate::schema::RawConfig;
use thiserror::Error;

/// Longest accepted currency symbol, in characters
const MAX_CURRENCY_SYMBOL_LEN: usize = 8;

/// Validation error
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Store config error: {0}")]
    StoreError(String),

    #[error("Display config error: {0}")]
    DisplayError(String),
}

/// Validate a raw configuration
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(data_dir) = &config.store.data_dir
        && data_dir.as_os_str().is_empty()
    {
        errors.push(ValidationError::StoreError(
            "data_dir cannot be empty".into(),
        ));
    }

    if let Some(symbol) = &config.display.currency_symbol {
        if symbol.trim().is_empty() {
            errors.push(ValidationError::DisplayError(
                "currency_symbol cannot be empty".into(),
            ));
        } else if symbol.chars().count() > MAX_CURRENCY_SYMBOL_LEN {
            errors.push(ValidationError::DisplayError(format!(
                "currency_symbol '{}' is longer than {} characters",
                symbol, MAX_CURRENCY_SYMBOL_LEN
            )));
        }
    }

    errors
}
