use bon::Builder;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Channel loaded when none is configured
pub const DEFAULT_CHANNEL: &str = "Z";

/// Scan pass direction of the probe
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trace {
    /// Outbound sweep
    #[default]
    Forward = 0,
    /// Return sweep
    Backward = 1,
}

impl Trace {
    /// Position of this trace in a backend's ordered trace list
    pub fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<usize> for Trace {
    type Error = usize;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Trace::Forward),
            1 => Ok(Trace::Backward),
            other => Err(other),
        }
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trace::Forward => write!(f, "forward"),
            Trace::Backward => write!(f, "backward"),
        }
    }
}

/// Per-loader settings, fixed at construction.
///
/// The meaning of `channel` depends on the format: for Nanonis it names a signal inside the
/// `.sxm` file, for Matrix the channel is already encoded in the filename and the value is only
/// echoed back on the loaded record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
pub struct LoaderConfig {
    #[builder(default)]
    #[serde(default)]
    pub trace: Trace,
    #[builder(into, default = DEFAULT_CHANNEL.to_string())]
    #[serde(default = "default_channel")]
    pub channel: String,
}

fn default_channel() -> String {
    DEFAULT_CHANNEL.to_string()
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
