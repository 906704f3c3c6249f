// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Option taking a value, readable from `ROSVOID_<ENV>`
fn value_arg(id: &'static str, long: &'static str, env: &'static str, help: &'static str) -> Arg {
    Arg::new(id).long(long).env(env).help(help)
}

fn build_cli() -> Command {
    Command::new("rosvoid")
        .version(env!("CARGO_PKG_VERSION"))
        .author("rosvoid contributors")
        .about("Generate xbps-src templates from a ROS distribution catalog")
        .arg(
            value_arg("package", "package", "ROSVOID_PACKAGE", "Only generate the named catalog repository")
                .short('p'),
        )
        .arg(
            value_arg("catalog_url", "catalog-url", "ROSVOID_CATALOG_URL", "URL of the distribution.yaml catalog")
                .default_value("https://raw.githubusercontent.com/ros/rosdistro/master/melodic/distribution.yaml"),
        )
        .arg(
            value_arg("distro", "distro", "ROSVOID_DISTRO", "ROS distribution codename")
                .default_value("melodic"),
        )
        .arg(
            value_arg("raw_host", "raw-host", "ROSVOID_RAW_HOST", "Host serving raw package.xml files")
                .default_value("https://raw.githubusercontent.com"),
        )
        .arg(
            value_arg("output", "output", "ROSVOID_OUTPUT", "Output directory (one subdirectory per package)")
                .short('o')
                .default_value("out"),
        )
        .arg(
            value_arg("maintainer", "maintainer", "ROSVOID_MAINTAINER", "Maintainer line written into every template")
                .default_value("rosvoid <rosvoid@localhost>"),
        )
        .arg(
            value_arg("python_version", "python-version", "ROSVOID_PYTHON_VERSION", "Python version the packages build against")
                .default_value("3.6"),
        )
        .arg(
            Arg::new("strict_manifests")
                .long("strict-manifests")
                .env("ROSVOID_STRICT_MANIFESTS")
                .action(ArgAction::SetTrue)
                .help("Fail a repository on malformed package.xml instead of keeping partial data"),
        )
        .arg(
            value_arg("jobs", "jobs", "ROSVOID_JOBS", "Worker threads (0 = one per repository, up to 64)")
                .short('j')
                .default_value("0"),
        )
        .arg(
            value_arg("timeout", "timeout", "ROSVOID_TIMEOUT", "Per-request HTTP timeout in seconds")
                .value_name("SECS"),
        )
        .arg(
            value_arg("template", "template", "ROSVOID_TEMPLATE", "Template file replacing the built-in recipe template")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("rosvoid.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
