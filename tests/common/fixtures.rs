//! Test fixtures - fake Boost source trees and build tools.

use bempp_bootstrap::Config;
use bempp_bootstrap::contrib::boost::BoostPaths;
use std::fs::File;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Packaged build script: creates the build directory and records where
/// it ran and which PREFIX it saw.
pub const FAKE_BUILD_SCRIPT: &str = r#"#!/bin/sh
set -e
mkdir build
pwd > build/configured_in
printf %s "$PREFIX" > build/prefix
"#;

/// Build script that fails before creating anything.
pub const FAILING_BUILD_SCRIPT: &str = "#!/bin/sh\nexit 7\n";

/// Fake `make`: appends its arguments and working directory to make.log.
pub const FAKE_MAKE: &str = r#"#!/bin/sh
printf '%s\n' "$*" >> make.log
pwd >> make.log
"#;

/// Fake `make` that always fails.
pub const FAILING_MAKE: &str = "#!/bin/sh\necho make failed >&2\nexit 2\n";

/// A temporary source root with a prefix directory next to it.
pub struct Sandbox {
    _dir: TempDir,
    pub root: PathBuf,
    pub prefix: PathBuf,
    pub tools: PathBuf,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("src");
        let prefix = dir.path().join("prefix");
        let tools = dir.path().join("tools");
        std::fs::create_dir_all(&root).unwrap();
        std::fs::create_dir_all(&prefix).unwrap();
        std::fs::create_dir_all(&tools).unwrap();
        Self {
            _dir: dir,
            root,
            prefix,
            tools,
        }
    }

    pub fn paths(&self) -> BoostPaths {
        BoostPaths::new(&self.root)
    }

    /// Config with prefix and job count set.
    pub fn config(&self, jobs: &str) -> Config {
        let mut config = Config::new();
        config.set("Main", "prefix", self.prefix.to_string_lossy());
        config.set("Main", "build_jobs", jobs);
        config
    }

    /// Put a boost tarball with a `boost-cmake/` root into the download cache.
    pub fn write_boost_archive(&self) {
        self.write_archive(&[
            ("boost-cmake/CMakeLists.txt", b"project(Boost)\n"),
            ("boost-cmake/boost/version.hpp", b"#define BOOST_VERSION 104900\n"),
        ]);
    }

    /// Put a tarball with arbitrary entries into the download cache.
    pub fn write_archive(&self, entries: &[(&str, &[u8])]) {
        let archive = self.paths().archive;
        std::fs::create_dir_all(archive.parent().unwrap()).unwrap();
        write_tar_gz(&archive, entries);
    }

    /// Install the packaged POSIX build script.
    pub fn write_build_script(&self, content: &str) {
        let script = self.paths().script_src;
        std::fs::create_dir_all(script.parent().unwrap()).unwrap();
        std::fs::write(script, content).unwrap();
    }

    /// Write a fake make tool and point `[Main] make` at it.
    pub fn use_make(&self, config: &mut Config, content: &str) -> PathBuf {
        let path = self.tools.join("make.sh");
        std::fs::write(&path, content).unwrap();
        config.set("Main", "make", format!("sh {}", path.display()));
        path
    }

    /// A source tree as left behind by `prepare` + `configure`.
    pub fn write_configured_tree(&self) {
        std::fs::create_dir_all(self.paths().build_dir).unwrap();
    }
}

pub fn write_tar_gz(path: &Path, entries: &[(&str, &[u8])]) {
    let file = File::create(path).unwrap();
    let encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (name, content) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, name, *content).unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap();
}
