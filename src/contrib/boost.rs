//! Boost 1.49 (CMake-ified tarball)
//!
//! Lifecycle:
//! 1. `download()` - fetch `boost_1_49.tar.gz` into `contrib/files`
//! 2. `prepare()` - unpack into `contrib/boost`, copy the POSIX build script,
//!    publish `[Boost] unit_test_lib` and `[Boost] include_dir`
//! 3. `configure()` - run `sh ./boost_build.sh` (creates `contrib/boost/build`)
//! 4. `build()` - run `make -j<build_jobs>` in the build directory
//! 5. `install()` - run `make install` in the build directory
//!
//! Commands run with an explicit working directory and `PREFIX` set to
//! `[Main] prefix` in their environment.

use super::ContribLayout;
use crate::core::config::Config;
use crate::core::error::{BootstrapError, Result};
use crate::core::output;
use crate::core::platform::{Platform, host_platform_name};
use crate::helpers::acquire::download_file;
use crate::helpers::build::extract_file;
use crate::helpers::internal::fs_utils::{check_delete_directory, copy_file, move_path};
use crate::helpers::util::shell_in;
use std::path::{Path, PathBuf};

pub const BOOST_FNAME: &str = "boost_1_49.tar.gz";
pub const BOOST_URL: &str = "http://www.bempp.org/files/boost_1_49.tar.gz";
/// Top-level directory inside the tarball
pub const BOOST_EXTRACT_DIR: &str = "boost-cmake";
pub const BOOST_DIR: &str = "boost";
pub const BOOST_VERSION: &str = "1.49.0";

pub const BUILD_SCRIPT: &str = "boost_build.sh";
const UNIT_TEST_LIB_STEM: &str = "libboost_unit_test_framework-mt";

const MAIN: &str = "Main";
const SECTION: &str = "Boost";
const DEFAULT_MAKE: &str = "make";

/// Every path the Boost steps touch, derived from the source root
#[derive(Debug, Clone)]
pub struct BoostPaths {
    /// Cached download
    pub archive: PathBuf,
    /// Where the archive is unpacked
    pub contrib_dir: PathBuf,
    /// Directory the tarball unpacks to, before renaming
    pub extract_root: PathBuf,
    /// Stable source tree
    pub source_dir: PathBuf,
    /// Out-of-tree build directory created by the build script
    pub build_dir: PathBuf,
    /// Packaged build script
    pub script_src: PathBuf,
    /// Build script copy inside the source tree
    pub script_dest: PathBuf,
}

impl BoostPaths {
    pub fn new(root: &Path) -> Self {
        let layout = ContribLayout::new(root);
        let contrib_dir = layout.contrib_dir();
        let source_dir = contrib_dir.join(BOOST_DIR);
        Self {
            archive: layout.files_dir().join(BOOST_FNAME),
            extract_root: contrib_dir.join(BOOST_EXTRACT_DIR),
            build_dir: source_dir.join("build"),
            script_src: layout.posix_scripts_dir().join(BUILD_SCRIPT),
            script_dest: source_dir.join(BUILD_SCRIPT),
            source_dir,
            contrib_dir,
        }
    }
}

/// File name of the Boost unit test shared library on `platform`
pub fn unit_test_lib_name(platform: Platform) -> String {
    format!("{}.{}", UNIT_TEST_LIB_STEM, platform.shared_lib_suffix())
}

/// Fetch the Boost archive into the download cache.
///
/// An archive already in the cache is reused.
pub fn download(root: &Path, _config: &Config) -> Result<PathBuf> {
    let layout = ContribLayout::new(root);
    download_file(BOOST_FNAME, BOOST_URL, &layout.files_dir())
}

/// Unpack the archive into `contrib/boost` for the host platform.
pub fn prepare(root: &Path, config: &mut Config) -> Result<()> {
    prepare_for_platform(root, config, host_platform_name())
}

/// Unpack the archive into `contrib/boost`, resolving the unit test library
/// name for `platform_name`.
///
/// Any existing `contrib/boost` is removed first. The platform and prefix
/// are resolved before anything on disk changes.
pub fn prepare_for_platform(root: &Path, config: &mut Config, platform_name: &str) -> Result<()> {
    let paths = BoostPaths::new(root);

    let prefix = PathBuf::from(config.get(MAIN, "prefix")?);
    let include_dir = prefix.join("bempp").join("include");

    let platform = Platform::from_name(platform_name)?;
    let unit_test_lib = prefix
        .join("bempp")
        .join("lib")
        .join(unit_test_lib_name(platform));

    check_delete_directory(&paths.source_dir)?;
    // A leftover extraction root from an interrupted run would merge with
    // the fresh one.
    check_delete_directory(&paths.extract_root)?;

    output::action("Extracting Boost");
    extract_file(&paths.archive, &paths.contrib_dir)?;
    if !paths.extract_root.is_dir() {
        return Err(BootstrapError::MissingExtractRoot(paths.extract_root));
    }
    move_path(&paths.extract_root, &paths.source_dir)?;
    copy_file(&paths.script_src, &paths.script_dest)?;

    config.set_default_option(
        SECTION,
        "unit_test_lib",
        unit_test_lib.to_string_lossy(),
        true,
    );
    config.set_default_option(SECTION, "include_dir", include_dir.to_string_lossy(), true);
    output::detail(&format!("boost {} ready in {}", BOOST_VERSION, paths.source_dir.display()));

    Ok(())
}

/// Run the packaged build script, recreating `contrib/boost/build`.
pub fn configure(root: &Path, config: &Config) -> Result<()> {
    let paths = BoostPaths::new(root);
    let prefix = config.get(MAIN, "prefix")?;

    output::action("Configuring Boost");
    check_delete_directory(&paths.build_dir)?;
    shell_in(
        &paths.source_dir,
        &format!("sh ./{}", BUILD_SCRIPT),
        &[("PREFIX", prefix)],
    )
}

/// Compile with `[Main] build_jobs` parallel jobs.
pub fn build(root: &Path, config: &Config) -> Result<()> {
    let paths = BoostPaths::new(root);
    let jobs = config.get_int(MAIN, "build_jobs")?;
    let prefix = config.get(MAIN, "prefix")?;

    output::action("Build Boost");
    shell_in(
        &paths.build_dir,
        &format!("{} -j{}", make_command(config), jobs),
        &[("PREFIX", prefix)],
    )
}

/// Install into `[Main] prefix`.
pub fn install(root: &Path, config: &Config) -> Result<()> {
    let paths = BoostPaths::new(root);
    let prefix = config.get(MAIN, "prefix")?;

    output::action("Install Boost");
    shell_in(
        &paths.build_dir,
        &format!("{} install", make_command(config)),
        &[("PREFIX", prefix)],
    )
}

/// `[Main] make`, defaulting to plain `make`
fn make_command(config: &Config) -> &str {
    config
        .get_opt(MAIN, "make")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_MAKE)
}
