//! Output settings for files written by the `plotkit` binary.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OutputConfig {
    /// Digits after the decimal point, scientific notation.
    #[serde(default = "default_precision")]
    pub precision: usize,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// Write a `<prefix>.summary.txt` next to converted coordinates.
    #[serde(default = "default_write_summary")]
    pub write_summary: bool,
}

fn default_precision() -> usize { 15 }
fn default_delimiter() -> char { ',' }
fn default_write_summary() -> bool { true }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
            delimiter: default_delimiter(),
            write_summary: default_write_summary(),
        }
    }
}

impl OutputConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config: OutputConfig = serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }
}
