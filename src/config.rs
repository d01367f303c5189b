//! Harness configuration.
//!
//! Loaded once at startup from a RON file. The sweep parameters are part of
//! the determinism contract: two hosts comparing traces must run identical
//! seeds and sample counts, or their digests describe different inputs and
//! the comparison is meaningless.

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct HarnessConfig {
    /// StdRng seed for the random bit-pattern sweep. Must match across hosts.
    pub seed: u64,
    /// Random samples per operation, on top of the fixed edge-case table.
    /// Must match across hosts.
    pub samples_per_op: u32,
    /// Default output path for `record`.
    pub trace_path: String,
    /// How many timestamped log files to keep around.
    pub log_keep_count: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            seed: 0x4B45_5354,
            samples_per_op: 65_536,
            trace_path: "kestrel_trace.bin".to_string(),
            log_keep_count: 25,
        }
    }
}

/// Read the config from `path`, falling back to defaults when the file does
/// not exist. A file that exists but fails to parse is a real error.
pub fn load_config(path: &str) -> Result<HarnessConfig, Box<dyn std::error::Error>> {
    if !Path::new(path).exists() {
        return Ok(HarnessConfig::default());
    }
    let text = std::fs::read_to_string(path)?;
    let config: HarnessConfig = ron::from_str(&text)?;
    Ok(config)
}
