// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use mockito::{Mock, ServerGuard};
use rosvoid::{Error, Fetcher, GeneratorConfig, Result};
use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::path::Path;

/// Catalog path served by the mock server
pub const CATALOG_PATH: &str = "/ros/rosdistro/master/melodic/distribution.yaml";

/// One repository entry of a test catalog
pub struct CatalogEntry<'a> {
    pub name: &'a str,
    pub packages: &'a [&'a str],
    /// Path of the release repository on the mock server, empty for none
    pub release_path: &'a str,
    pub version: &'a str,
    /// Path of the source repository on the mock server
    pub source_path: &'a str,
    pub branch: &'a str,
}

/// Render a distribution.yaml whose URLs point at `base`
pub fn catalog_yaml(base: &str, entries: &[CatalogEntry<'_>]) -> String {
    let mut yaml = String::from("---\nrelease_platforms:\n  ubuntu:\n  - bionic\nrepositories:\n");

    for entry in entries {
        yaml.push_str(&format!("  {}:\n", entry.name));
        yaml.push_str("    release:\n");
        if !entry.packages.is_empty() {
            yaml.push_str("      packages:\n");
            for package in entry.packages {
                yaml.push_str(&format!("      - {package}\n"));
            }
        }
        let release_url = if entry.release_path.is_empty() {
            String::new()
        } else {
            format!("{base}{}", entry.release_path)
        };
        yaml.push_str(&format!("      url: '{release_url}'\n"));
        yaml.push_str(&format!("      version: '{}'\n", entry.version));
        yaml.push_str("    source:\n      type: git\n");
        yaml.push_str(&format!("      url: {base}{}\n", entry.source_path));
        yaml.push_str(&format!("      version: '{}'\n", entry.branch));
    }

    yaml.push_str("type: distribution\nversion: 2\n");
    yaml
}

/// A minimal package.xml
pub fn manifest_xml(name: &str, description: &str, buildtool: &[&str], run: &[&str]) -> String {
    let mut xml = format!(
        "<?xml version=\"1.0\"?>\n<package format=\"2\">\n  <name>{name}</name>\n  <version>1.0.0</version>\n  <description>{description}</description>\n"
    );
    for dep in buildtool {
        xml.push_str(&format!("  <buildtool_depend>{dep}</buildtool_depend>\n"));
    }
    for dep in run {
        xml.push_str(&format!("  <run_depend>{dep}</run_depend>\n"));
    }
    xml.push_str("</package>\n");
    xml
}

/// Serve `body` for `GET path`
pub fn serve(server: &mut ServerGuard, path: &str, body: impl AsRef<[u8]>) -> Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_body(body)
        .create()
}

/// Generator configuration pointing every endpoint at the mock server
pub fn test_config(server: &ServerGuard, output: &Path) -> GeneratorConfig {
    GeneratorConfig {
        catalog_url: format!("{}{}", server.url(), CATALOG_PATH),
        raw_host: server.url(),
        output_root: output.to_path_buf(),
        ..Default::default()
    }
}

/// Fetch a generated template as text
pub fn read_template(output: &Path, package_dir: &str) -> String {
    std::fs::read_to_string(output.join(package_dir).join("template")).unwrap()
}

/// Serves canned bodies for exact URLs on hosts a mock server cannot stand in for
#[derive(Default)]
pub struct StaticFetcher {
    bodies: HashMap<String, Vec<u8>>,
}

impl StaticFetcher {
    pub fn with(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.bodies.insert(url.to_string(), body.into());
        self
    }
}

impl Fetcher for StaticFetcher {
    fn open(&self, url: &str) -> Result<Box<dyn Read + Send>> {
        match self.bodies.get(url) {
            Some(body) => Ok(Box::new(Cursor::new(body.clone()))),
            None => Err(Error::Fetch {
                url: url.to_string(),
                message: "HTTP 404 Not Found".to_string(),
            }),
        }
    }
}
