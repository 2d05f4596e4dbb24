//! Connector validation.

use super::document::ConfigDocument;
use super::keys;
use crate::{Error, Result};

/// Connectors with a non-empty value, in document order.
///
/// Every key of `[Microsoft Teams]` is a candidate; the key name itself is
/// not constrained.
pub fn connectors(doc: &ConfigDocument) -> impl Iterator<Item = (&str, &str)> {
    doc.section(keys::MICROSOFT_TEAMS)
        .into_iter()
        .flat_map(|section| section.iter())
        .filter(|(_, url)| !url.trim().is_empty())
        .map(|(name, url)| (name.as_str(), url.as_str()))
}

/// Require at least one usable connector.
///
/// # Arguments
///
/// * `doc` - The merged document
///
/// # Errors
///
/// Returns [`Error::MissingConnectorConfigKey`] if `[Microsoft Teams]` is
/// absent or has no key with a non-empty value.
pub fn validate(doc: &ConfigDocument) -> Result<()> {
    let count = connectors(doc).count();
    if count == 0 {
        if doc.contains_section(keys::MICROSOFT_TEAMS) {
            tracing::warn!(
                section = keys::MICROSOFT_TEAMS,
                "Connector section has no non-empty key"
            );
        } else {
            tracing::warn!(section = keys::MICROSOFT_TEAMS, "Connector section absent");
        }
        return Err(Error::MissingConnectorConfigKey {
            section: keys::MICROSOFT_TEAMS,
        });
    }

    tracing::debug!(connectors = count, "Connector configuration valid");
    Ok(())
}
