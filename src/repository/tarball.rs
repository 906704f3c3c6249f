// src/repository/tarball.rs

//! Release tarball location and checksum
//!
//! bloom-released repositories publish one tag per package and version on
//! the release repository, and the hosting service exposes every tag as a
//! `.tar.gz` archive.

use crate::error::{Error, Result};
use crate::hash;
use tracing::{debug, info};

use super::client::Fetcher;

/// Archive URL of a released package
///
/// `release_url` is the release repository (usually ending in `.git`);
/// the tag path is `release/<distro>/<name>/<version>`.
pub fn derive_tarball_url(name: &str, version: &str, release_url: &str, distro: &str) -> String {
    let base = release_url.trim_end_matches('/');
    let base = base.strip_suffix(".git").unwrap_or(base);
    format!("{base}/archive/release/{distro}/{name}/{version}.tar.gz")
}

/// Download the full tarball and return its lowercase hex SHA-256
///
/// The body is hashed as it streams in; nothing is written to disk.
pub fn compute_checksum(fetcher: &dyn Fetcher, tarball_url: &str) -> Result<String> {
    info!("Downloading {}", tarball_url);
    let body = fetcher.open(tarball_url)?;
    let checksum = hash::sha256_reader(body)
        .map_err(|e| Error::fetch(tarball_url, format!("Failed to read response: {e}")))?;
    debug!("sha256 {} = {}", tarball_url, checksum);
    Ok(checksum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::client::testing::MemoryFetcher;

    #[test]
    fn test_derive_tarball_url() {
        assert_eq!(
            derive_tarball_url(
                "geometry2",
                "0.6.5-0",
                "https://github.com/ros-gbp/geometry2-release.git",
                "melodic"
            ),
            "https://github.com/ros-gbp/geometry2-release/archive/release/melodic/geometry2/0.6.5-0.tar.gz"
        );
    }

    #[test]
    fn test_derive_tarball_url_without_git_suffix() {
        assert_eq!(
            derive_tarball_url("angles", "1.9.11-0", "https://github.com/ros-gbp/angles-release", "noetic"),
            "https://github.com/ros-gbp/angles-release/archive/release/noetic/angles/1.9.11-0.tar.gz"
        );
    }

    #[test]
    fn test_only_trailing_git_is_stripped() {
        assert_eq!(
            derive_tarball_url("foo", "1.0", "https://git.example.com/ros/foo.github-release.git", "melodic"),
            "https://git.example.com/ros/foo.github-release/archive/release/melodic/foo/1.0.tar.gz"
        );
    }

    #[test]
    fn test_compute_checksum() {
        let url = "https://example.com/foo/archive/release/melodic/foo/1.0.tar.gz";
        let fetcher = MemoryFetcher::new().with(url, b"not really gzip".to_vec());
        let checksum = compute_checksum(&fetcher, url).unwrap();
        assert_eq!(checksum, hash::sha256_hex(b"not really gzip"));
        assert!(hash::is_sha256_hex(&checksum));
    }

    #[test]
    fn test_compute_checksum_fetch_failure() {
        let fetcher = MemoryFetcher::new();
        let err = compute_checksum(&fetcher, "https://example.com/missing.tar.gz").unwrap_err();
        assert!(matches!(err, Error::Fetch { .. }));
    }
}
