//! This is the `ConfigFile` struct.
//!
//! This is for finding the right default location for the configuration file of `qgc2dji`.
//! This is a configuration struct neutral loading engine, storing only the base directory and
//! with `load()` read the proper file or the default one.
//!
//! Contrary to a long-running daemon, the converter is fully usable without any configuration
//! so a missing default file is not an error, we just get `T::default()`.
//!
//! This encapsulates the configuration file, available with `.inner()` or `.inner_mut()`.
//!

use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use eyre::{eyre, Result};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::makepath;

/// Config filename
const CONFIG: &str = "qgc2dji.hcl";

/// Main name for the directory base
const TAG: &str = "qgc2dji";

/// Configuration file wrapper, knows where to look for the real thing.
///
#[derive(Debug)]
pub struct ConfigFile<T: Debug + Default + DeserializeOwned> {
    /// This is the base directory for all files.
    basedir: PathBuf,
    /// Where did we load it from, if anywhere.
    source: Option<PathBuf>,
    inner: T,
}

impl<T> ConfigFile<T>
where
    T: Debug + Default + DeserializeOwned,
{
    #[tracing::instrument]
    fn new(tag: &str) -> Self {
        let basedir: PathBuf = match BaseDirs::new() {
            Some(base) => {
                #[cfg(unix)]
                let base = base.home_dir().join(".config");

                #[cfg(windows)]
                let base = base.data_local_dir().to_path_buf();

                debug!("base = {base:?}");
                makepath!(base, tag)
            }
            // No home directory at all, use the current one.
            //
            None => makepath!(".", tag),
        };
        ConfigFile {
            basedir,
            source: None,
            inner: T::default(),
        }
    }

    /// Returns the path of the default config directory
    ///
    pub fn config_path(&self) -> PathBuf {
        self.basedir.clone()
    }

    /// Returns the path of the default config file
    ///
    pub fn default_file(&self) -> PathBuf {
        let cfg = self.config_path().join(CONFIG);
        debug!("default = {cfg:?}");
        cfg
    }

    /// Where the data came from, `None` means defaults.
    ///
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Load the file and return a struct T in the right format.
    ///
    /// Use the following search path:
    /// - file specified on CLI, must exist
    /// - default basedir (base on $HOME or $LOCALAPPDATA), may be absent
    ///
    #[tracing::instrument]
    pub fn load(fname: Option<&Path>) -> Result<ConfigFile<T>> {
        let mut cfg = ConfigFile::<T>::new(TAG);

        let fname = match fname {
            Some(fname) => {
                if !fname.exists() {
                    return Err(eyre!("Unknown config file {:?}", fname));
                }
                fname.to_path_buf()
            }
            None => {
                let def = cfg.default_file();
                if !def.exists() {
                    trace!("No config file in {:?}, using defaults", cfg.config_path());
                    return Ok(cfg);
                }
                def
            }
        };

        trace!("Loading config file {fname:?}");

        let data = fs::read_to_string(&fname)?;
        debug!("string data = {data}");

        let data: T = hcl::from_str(&data)?;
        debug!("struct data = {data:?}");

        cfg.inner = data;
        cfg.source = Some(fname);
        Ok(cfg)
    }

    /// Return the inner configuration
    ///
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Return the inner configuration as putable
    ///
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }
}
