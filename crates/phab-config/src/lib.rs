//! # Phabricator Configuration
//!
//! Build-parameter configuration gate for the Phabricator integration.
//!
//! The hosting build system hands over a flat string-keyed parameter map;
//! [`Configuration::parse`] scans it for the recognized keys and derives a
//! single all-or-nothing `enabled` flag. Malformed input never fails the
//! parse; it only keeps the gate closed.

#![warn(missing_docs)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use url::Url;

pub mod parser;

/// Typed view of the build parameters recognized by the integration
///
/// Constructed once per configuration load by [`parse`](Self::parse) and
/// immutable afterwards, apart from the host attaching a working directory
/// with [`with_working_dir`](Self::with_working_dir).
#[derive(Debug, Clone, Default)]
pub struct Configuration {
    phabricator_url: Option<Url>,
    conduit_token: Option<String>,
    arc_path: Option<String>,
    diff_id: Option<String>,
    harbormaster_target_phid: Option<String>,
    revision_id: Option<String>,
    working_dir: Option<PathBuf>,
    enabled: bool,
}

impl Configuration {
    /// Scan a parameter map into a configuration record
    ///
    /// Recognized keys present with non-blank values populate the matching
    /// field; everything else is ignored. Never fails: a malformed service
    /// URL is logged and left unset, which keeps the gate closed.
    pub fn parse(params: &HashMap<String, String>) -> Self {
        parser::parse(params)
    }

    /// Attach the working directory the host wants review commands run in
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// The service base URL, exactly as parsed
    ///
    /// No default port is written back; see [`parser`] for the logging-only
    /// port defaulting.
    pub fn phabricator_url(&self) -> Option<&Url> {
        self.phabricator_url.as_ref()
    }

    /// The Conduit API credential
    pub fn conduit_token(&self) -> Option<&str> {
        self.conduit_token.as_deref()
    }

    /// Path to the review-tool executable
    pub fn arc_path(&self) -> Option<&str> {
        self.arc_path.as_deref()
    }

    /// Identifier of the diff under review
    pub fn diff_id(&self) -> Option<&str> {
        self.diff_id.as_deref()
    }

    /// Identifier correlating this build with the review system's build target
    pub fn harbormaster_target_phid(&self) -> Option<&str> {
        self.harbormaster_target_phid.as_deref()
    }

    /// Identifier of the revision under review, when the build carries one
    ///
    /// Recognized but not required; it does not participate in the gate.
    pub fn revision_id(&self) -> Option<&str> {
        self.revision_id.as_deref()
    }

    /// The working directory attached by the host, if any
    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    /// Whether the integration is active for this build
    ///
    /// True iff URL, token, arc path, diff identifier, and target PHID were
    /// all present and usable. There is no partial-enable state.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
