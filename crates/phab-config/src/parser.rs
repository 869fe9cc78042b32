//! Parameter scanning and the enabled gate
//!
//! The scan does a deterministic lookup per concept instead of iterating
//! the map, so when both an explicit key and its `env.`-sourced alias are
//! present the explicit key always wins.

use std::collections::HashMap;

use tracing::{info, warn};
use url::Url;

use crate::Configuration;

/// Parameter keys recognized by the integration
pub mod keys {
    /// Service base URL
    pub const PHAB_URL: &str = "tcphab.phabricatorUrl";
    /// Conduit API credential
    pub const CONDUIT_TOKEN: &str = "tcphab.conduitToken";
    /// Path to the review-tool executable
    pub const ARC_PATH: &str = "tcphab.pathToArc";
    /// Diff identifier
    pub const DIFF_ID: &str = "diffId";
    /// Environment-sourced diff identifier
    pub const ENV_DIFF_ID: &str = "env.diffId";
    /// CI build-target identifier
    pub const HARBORMASTER_PHID: &str = "harbormasterTargetPHID";
    /// Environment-sourced CI build-target identifier
    pub const ENV_HARBORMASTER_PHID: &str = "env.harbormasterTargetPHID";
    /// Revision identifier, reserved for commenting on diffs
    pub const REVISION_ID: &str = "revisionId";
    /// Environment-sourced revision identifier
    pub const ENV_REVISION_ID: &str = "env.revisionId";
}

pub(crate) fn parse(params: &HashMap<String, String>) -> Configuration {
    let mut config = Configuration::default();

    if let Some(raw) = lookup(params, keys::PHAB_URL) {
        info!("Found phabricator URL: {}", raw);
        match parse_phabricator_url(raw) {
            Ok(url) => config.phabricator_url = Some(url),
            Err(e) => warn!("Failed to parse phabricator URL `{}`: {}", raw, e),
        }
    }

    if let Some(token) = lookup(params, keys::CONDUIT_TOKEN) {
        // Credential: presence is logged, the value is not.
        info!("Found conduit token");
        config.conduit_token = Some(token.to_string());
    }

    if let Some(path) = lookup(params, keys::ARC_PATH) {
        info!("Found arc path: {}", path);
        config.arc_path = Some(path.to_string());
    }

    if let Some(diff_id) = lookup_either(params, keys::DIFF_ID, keys::ENV_DIFF_ID) {
        info!("Found diff id: {}", diff_id);
        config.diff_id = Some(diff_id.to_string());
    }

    if let Some(phid) = lookup_either(params, keys::HARBORMASTER_PHID, keys::ENV_HARBORMASTER_PHID)
    {
        info!("Found harbormaster target PHID: {}", phid);
        config.harbormaster_target_phid = Some(phid.to_string());
    }

    if let Some(revision_id) = lookup_either(params, keys::REVISION_ID, keys::ENV_REVISION_ID) {
        info!("Found revision id: {}", revision_id);
        config.revision_id = Some(revision_id.to_string());
    }

    // All-or-nothing: every required field present, or the gate stays shut.
    config.enabled = config.phabricator_url.is_some()
        && config.conduit_token.is_some()
        && config.arc_path.is_some()
        && config.diff_id.is_some()
        && config.harbormaster_target_phid.is_some();

    config
}

/// Look up a key, treating blank values as absent
fn lookup<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .map(String::as_str)
        .filter(|value| !value.trim().is_empty())
}

/// Look up a key with its env-sourced alias as fallback
fn lookup_either<'a>(
    params: &'a HashMap<String, String>,
    key: &str,
    alias: &str,
) -> Option<&'a str> {
    lookup(params, key).or_else(|| lookup(params, alias))
}

/// Parse the service URL and log its effective endpoint
///
/// The port defaulting (443 for https, 80 otherwise) is diagnostic only;
/// the returned URL is the as-parsed value.
fn parse_phabricator_url(raw: &str) -> Result<Url, url::ParseError> {
    let url = Url::parse(raw)?;
    let port = url
        .port()
        .unwrap_or(if url.scheme() == "https" { 443 } else { 80 });
    info!(
        "Phabricator endpoint: {}:{}",
        url.host_str().unwrap_or_default(),
        port
    );
    Ok(url)
}
