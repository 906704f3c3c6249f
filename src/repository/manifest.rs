// src/repository/manifest.rs

//! Sub-package manifests (package.xml)
//!
//! Each sub-package of a repository ships a `package.xml` at
//! `<owner>/<repo>/<branch>/<sub-package>/package.xml` on the raw-content
//! host. Only four direct children of the root element matter here:
//! `name`, `description`, `buildtool_depend` and `run_depend`.
//!
//! # Decoding modes
//!
//! Real-world manifests are occasionally malformed. In
//! [`ManifestMode::Lenient`] everything read before the first XML error is
//! kept and the error is logged; [`ManifestMode::Strict`] turns it into
//! [`Error::Decode`].

use crate::error::{Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{debug, warn};

use super::client::Fetcher;
use super::source_url::HostedRepo;

/// File name of a sub-package manifest
pub const MANIFEST_FILE_NAME: &str = "package.xml";

/// How XML errors in a manifest are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ManifestMode {
    /// Keep whatever was decoded before the error
    #[default]
    Lenient,
    /// Fail the manifest on any XML error
    Strict,
}

/// One installable unit described by a manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubPackage {
    pub name: String,
    pub description: String,
    /// `buildtool_depend` entries, first-seen order, no duplicates
    pub build_dependencies: Vec<String>,
    /// `run_depend` entries, first-seen order, no duplicates
    pub run_dependencies: Vec<String>,
}

impl SubPackage {
    /// Decode manifest bytes according to `mode`
    pub fn from_xml(bytes: &[u8], mode: ManifestMode) -> Result<Self> {
        let mut sub_package = SubPackage::default();

        match read_manifest(bytes, &mut sub_package) {
            Ok(()) => Ok(sub_package),
            Err(message) => match mode {
                ManifestMode::Strict => Err(Error::Decode(format!(
                    "Malformed {MANIFEST_FILE_NAME}: {message}"
                ))),
                ManifestMode::Lenient => {
                    warn!(
                        "Malformed {} for '{}', keeping partial record: {}",
                        MANIFEST_FILE_NAME, sub_package.name, message
                    );
                    Ok(sub_package)
                }
            },
        }
    }

    fn apply(&mut self, field: Field, text: String) {
        match field {
            Field::Name => self.name = text.trim().to_string(),
            Field::Description => self.description = text,
            Field::BuildtoolDepend => push_unique(&mut self.build_dependencies, text),
            Field::RunDepend => push_unique(&mut self.run_dependencies, text),
        }
    }
}

fn push_unique(list: &mut Vec<String>, value: String) {
    let value = value.trim();
    if !value.is_empty() && !list.iter().any(|existing| existing == value) {
        list.push(value.to_string());
    }
}

/// Manifest elements that populate a [`SubPackage`]
#[derive(Debug, Clone, Copy)]
enum Field {
    Name,
    Description,
    BuildtoolDepend,
    RunDepend,
}

impl Field {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"name" => Some(Self::Name),
            b"description" => Some(Self::Description),
            b"buildtool_depend" => Some(Self::BuildtoolDepend),
            b"run_depend" => Some(Self::RunDepend),
            _ => None,
        }
    }
}

/// Stream through the document, filling `sub_package` as fields close
///
/// Text nested deeper inside a field (e.g. `<a>` in a description) is
/// flattened into the field's text.
fn read_manifest(bytes: &[u8], sub_package: &mut SubPackage) -> std::result::Result<(), String> {
    let mut reader = Reader::from_reader(bytes);
    let mut buf = Vec::new();

    let mut depth = 0usize;
    let mut field: Option<Field> = None;
    let mut text = String::new();

    loop {
        match reader
            .read_event_into(&mut buf)
            .map_err(|e| format!("at byte {}: {e}", reader.buffer_position()))?
        {
            Event::Start(ref e) => {
                depth += 1;
                if depth == 2 {
                    field = Field::from_tag(e.local_name().as_ref());
                    text.clear();
                }
            }
            Event::End(_) => {
                if depth == 2 {
                    if let Some(done) = field.take() {
                        sub_package.apply(done, std::mem::take(&mut text));
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Event::Text(ref e) if field.is_some() => {
                let unescaped = e.unescape().map_err(|e| e.to_string())?;
                text.push_str(&unescaped);
            }
            Event::CData(e) if field.is_some() => {
                text.push_str(&String::from_utf8_lossy(&e.into_inner()));
            }
            Event::Eof => break,
            _ => {}
        }

        buf.clear();
    }

    Ok(())
}

/// Raw-content URL of a sub-package manifest
pub fn manifest_url(raw_host: &str, hosted: &HostedRepo, version: &str, sub_package: &str) -> String {
    format!(
        "{}/{}/{}/{}/{}",
        raw_host.trim_end_matches('/'),
        hosted,
        version,
        sub_package,
        MANIFEST_FILE_NAME
    )
}

/// Fetch and decode the manifest of one sub-package
///
/// `version` and `source_url` come from the repository's source entry.
/// A manifest without a usable `<name>` takes `sub_package` as its name.
pub fn fetch_sub_package_manifest(
    fetcher: &dyn Fetcher,
    raw_host: &str,
    sub_package: &str,
    version: &str,
    source_url: &str,
    mode: ManifestMode,
) -> Result<SubPackage> {
    let hosted = HostedRepo::parse(source_url)?;
    let url = manifest_url(raw_host, &hosted, version, sub_package);

    debug!("Fetching manifest for {} from {}", sub_package, url);
    let body = fetcher.fetch(&url)?;
    let mut record = SubPackage::from_xml(&body, mode)?;
    if record.name.is_empty() {
        warn!("{} has no <name>, using '{}'", url, sub_package);
        record.name = sub_package.to_string();
    }
    Ok(record)
}
