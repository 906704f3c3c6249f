// src/repository/source_url.rs

//! Hosting identifiers parsed from catalog source URLs
//!
//! Grammar accepted by [`HostedRepo::parse`]:
//!
//! ```text
//! source-url = scheme "://" *( segment "/" ) owner "/" repo [".git"] ["/"]
//! scheme     = 1*( ALPHA / DIGIT / "+" / "-" / "." )
//! segment    = *( any char except "/" )
//! owner      = 1*( any char except "/" )
//! repo       = 1*( any char except "/" ), not just ".git"
//! ```
//!
//! The identifier is the last two non-empty components, so the host itself
//! may act as the owner (`https://x/foo.git` is `x/foo`). Anything without a
//! scheme or with fewer than two components is rejected with
//! [`Error::InvalidSourceUrl`].

use crate::error::{Error, Result};
use std::fmt;

/// `owner/repo` pair on a hosting service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedRepo {
    pub owner: String,
    pub repo: String,
}

impl HostedRepo {
    /// Parse a source URL such as `https://github.com/ros/geometry2.git`
    pub fn parse(url: &str) -> Result<Self> {
        let invalid = || Error::InvalidSourceUrl(url.to_string());

        let (scheme, rest) = url.split_once("://").ok_or_else(invalid)?;
        if scheme.is_empty()
            || !scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        {
            return Err(invalid());
        }

        let mut components = rest.split('/').filter(|c| !c.is_empty()).rev();
        let repo = components.next().ok_or_else(invalid)?;
        let owner = components.next().ok_or_else(invalid)?;

        let repo = repo.strip_suffix(".git").unwrap_or(repo);
        if repo.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }
}

impl fmt::Display for HostedRepo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_github_url() {
        let hosted = HostedRepo::parse("https://github.com/ros/geometry2.git").unwrap();
        assert_eq!(hosted.owner, "ros");
        assert_eq!(hosted.repo, "geometry2");
        assert_eq!(hosted.to_string(), "ros/geometry2");
    }

    #[test]
    fn test_git_suffix_is_optional() {
        let hosted = HostedRepo::parse("https://github.com/ros-planning/navigation").unwrap();
        assert_eq!(hosted.to_string(), "ros-planning/navigation");

        let trailing = HostedRepo::parse("https://github.com/ros-planning/navigation/").unwrap();
        assert_eq!(trailing, hosted);
    }

    #[test]
    fn test_host_with_port() {
        let hosted = HostedRepo::parse("http://127.0.0.1:8080/ros/foo.git").unwrap();
        assert_eq!(hosted.to_string(), "ros/foo");
    }

    #[test]
    fn test_dotted_repo_names_survive() {
        let hosted = HostedRepo::parse("https://github.com/ros/ros_comm.msgs.git").unwrap();
        assert_eq!(hosted.repo, "ros_comm.msgs");
    }

    #[test]
    fn test_host_acts_as_owner() {
        let hosted = HostedRepo::parse("https://x/foo.git").unwrap();
        assert_eq!(hosted.owner, "x");
        assert_eq!(hosted.repo, "foo");
    }

    #[test]
    fn test_last_two_components_win() {
        let hosted = HostedRepo::parse("https://gitlab.example.com/group/sub/repo.git").unwrap();
        assert_eq!(hosted.to_string(), "sub/repo");

        let doubled = HostedRepo::parse("https://github.com//ros//foo.git/").unwrap();
        assert_eq!(doubled.to_string(), "ros/foo");
    }

    #[test]
    fn test_rejects_malformed_urls() {
        for url in [
            "",
            "github.com/ros/foo.git",
            "https://",
            "https://x.git",
            "https://github.com/",
            "https://github.com/ros/.git",
            "://github.com/ros/foo.git",
            "git@github.com:ros/foo.git",
        ] {
            let err = HostedRepo::parse(url).unwrap_err();
            assert!(
                matches!(err, Error::InvalidSourceUrl(ref u) if u == url),
                "expected rejection of {url:?}"
            );
        }
    }
}
