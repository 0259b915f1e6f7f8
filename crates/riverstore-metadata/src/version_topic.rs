//! Version Topic Codec
//!
//! Every store version has a dedicated log topic named `{store}_v{number}`.
//! The store name may itself contain underscores (or even `_v`), so parsing
//! splits on the *last* separator.
//!
//! ## Usage
//!
//! ```
//! use riverstore_metadata::version_topic;
//!
//! let topic = version_topic::compose_version_topic("orders", 3);
//! assert_eq!(topic, "orders_v3");
//! assert_eq!(version_topic::parse_version_number(&topic).unwrap(), 3);
//! assert_eq!(version_topic::parse_store_name(&topic).unwrap(), "orders");
//! ```

use crate::error::{MetadataError, Result};

const VERSION_SEPARATOR: &str = "_v";

/// Build the version topic name for a store version.
pub fn compose_version_topic(store_name: &str, version: u64) -> String {
    format!("{}{}{}", store_name, VERSION_SEPARATOR, version)
}

/// Extract the version number from a version topic name.
pub fn parse_version_number(topic: &str) -> Result<u64> {
    let idx = separator_index(topic)?;
    topic[idx + VERSION_SEPARATOR.len()..]
        .parse::<u64>()
        .map_err(|_| MetadataError::InvalidVersionTopic(topic.to_string()))
}

/// Extract the store name from a version topic name.
pub fn parse_store_name(topic: &str) -> Result<&str> {
    let idx = separator_index(topic)?;
    // Reject topics whose suffix is not a number, e.g. "orders_view".
    topic[idx + VERSION_SEPARATOR.len()..]
        .parse::<u64>()
        .map_err(|_| MetadataError::InvalidVersionTopic(topic.to_string()))?;
    Ok(&topic[..idx])
}

fn separator_index(topic: &str) -> Result<usize> {
    match topic.rfind(VERSION_SEPARATOR) {
        Some(idx) if idx > 0 => Ok(idx),
        _ => Err(MetadataError::InvalidVersionTopic(topic.to_string())),
    }
}
