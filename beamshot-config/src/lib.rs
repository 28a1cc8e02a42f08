//! Configuration for the beamshot send overlay.
//!
//! The config file is KDL, decoded with `knuffel`. Every node is optional; anything missing falls
//! back to the stock timings of the send ritual.

#[macro_use]
extern crate tracing;

use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use miette::{Context, IntoDiagnostic};

mod animations;

pub use animations::{Animations, Curve, Transition, TransitionPart};

#[derive(knuffel::Decode, Debug, Default, Clone, PartialEq)]
pub struct Config {
    #[knuffel(child, default)]
    pub animations: Animations,
}

impl Config {
    pub fn load(path: &Path) -> miette::Result<Self> {
        let contents = fs::read_to_string(path)
            .into_diagnostic()
            .with_context(|| format!("error reading {path:?}"))?;

        let filename = path
            .file_name()
            .and_then(OsStr::to_str)
            .unwrap_or("config.kdl");
        let config = Self::parse(filename, &contents).context("error parsing")?;
        debug!("loaded config from {path:?}");
        Ok(config)
    }

    pub fn parse(filename: &str, text: &str) -> Result<Self, knuffel::Error> {
        let _span = tracy_client::span!("Config::parse");
        knuffel::parse(filename, text)
    }
}

impl FromStr for Config {
    type Err = miette::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse("config.kdl", s).map_err(miette::Report::new)
    }
}
