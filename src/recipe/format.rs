// src/recipe/format.rs

//! Text formatting helpers for xbps-src templates
//!
//! xbps-src package names use hyphens, versions may not contain `-` or `:`,
//! and `short_desc` has to fit the 72 column convention enforced by
//! `xlint`. Dependency lists are wrapped at column 100.

/// Build-toolchain packages every generated template gets implicitly
pub const IGNORED_DEPENDENCIES: [&str; 4] = ["cmake", "python3", "python", "catkin"];

/// Column at which dependency lists wrap
pub const WRAP_COLUMN: usize = 100;

const DESCRIPTION_LIMIT: usize = 72;
const DESCRIPTION_MARGIN: usize = 6;
const DESCRIPTION_KEEP: usize = 62;
const ELLIPSIS: &str = "...";

/// Replace every `_` with `-`
pub fn normalize_package_name(name: &str) -> String {
    name.replace('_', "-")
}

/// `<prefix>-<normalized name>`, the xbps package name of a ROS package
pub fn prefixed_name(prefix: &str, name: &str) -> String {
    format!("{}-{}", prefix, normalize_package_name(name))
}

/// Replace every `-` and `:` with `_`
pub fn normalize_version(version: &str) -> String {
    version.replace(['-', ':'], "_")
}

/// Trim a manifest description into a `short_desc` value
///
/// Leading/trailing whitespace and periods are removed. Anything whose
/// length plus the margin reaches the limit is cut to 62 characters plus
/// `...`.
pub fn truncate_description(description: &str) -> String {
    let trimmed = description.trim_matches(|c: char| c.is_whitespace() || c == '.');

    if trimmed.chars().count() + DESCRIPTION_MARGIN >= DESCRIPTION_LIMIT {
        let mut short: String = trimmed.chars().take(DESCRIPTION_KEEP).collect();
        short.push_str(ELLIPSIS);
        short
    } else {
        trimmed.to_string()
    }
}

/// Render a space separated, column wrapped dependency list
///
/// Each name outside [`IGNORED_DEPENDENCIES`] becomes `<prefix>-<name>`.
/// `start_column` is the column already consumed on the current line (9 for
/// `depends="`). Before an entry that would push the line past
/// [`WRAP_COLUMN`] a newline is emitted; with `indent_level == 1` the new
/// line starts with a tab, counted as two columns. When `first` is true the
/// first rendered entry gets no leading space.
pub fn wrap_dependency_list(
    prefix: &str,
    names: &[String],
    start_column: usize,
    indent_level: usize,
    first: bool,
) -> String {
    let mut out = String::new();
    let mut column = start_column;
    let mut first = first;

    for name in names
        .iter()
        .filter(|name| !IGNORED_DEPENDENCIES.contains(&name.as_str()))
    {
        let entry = prefixed_name(prefix, name);
        let width = entry.chars().count();

        if column + width + 1 > WRAP_COLUMN {
            out.push('\n');
            column = 1;
            if indent_level == 1 {
                out.push('\t');
                column += 2;
            }
        }
        if !first {
            out.push(' ');
            column += 1;
        }
        first = false;

        out.push_str(&entry);
        column += width;
    }

    out
}
