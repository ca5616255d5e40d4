use itertools::Itertools;
use log::debug;
use ndarray::Array2;
use std::path::Path;

use crate::backend::{NanonisBackend, NanonisScan, SignalPair};
use crate::error::{LoadError, Result};
use crate::types::{FileType, RawScanRecord, Trace};
use crate::utils::{flip_both, flip_columns, flip_rows};

/// `scan_dir` value of a top-to-bottom raster
const SCAN_DIR_DOWN: &str = "down";

/// Reads a Nanonis scan and picks the configured channel and trace, oriented so that rows run
/// top to bottom and columns left to right whatever direction the instrument scanned in.
pub(crate) fn read_nanonis(
    backend: &dyn NanonisBackend,
    path: &Path,
    trace: Trace,
    channel: &str,
) -> Result<RawScanRecord> {
    let NanonisScan {
        header,
        mut signals,
    } = backend
        .read_scan(path)
        .map_err(|e| LoadError::backend(FileType::Nanonis, e))?;

    let scanned_down = header.text("scan_dir")? == SCAN_DIR_DOWN;

    let signal = match signals.remove(channel) {
        Some(signal) => signal,
        None => {
            return Err(LoadError::MissingChannel {
                channel: channel.to_string(),
                available: signals.keys().join(", "),
            });
        }
    };
    debug!(
        "Selected Nanonis channel '{}' ({}, scanned {})",
        channel,
        trace,
        if scanned_down { "down" } else { "up" }
    );

    let data = orient_signal(signal, trace, scanned_down, channel)?;
    Ok(RawScanRecord::Nanonis { data, header })
}

/// Selects forward or backward samples and undoes the storage order of the scan direction.
///
/// | trace    | scanned down | otherwise    |
/// |----------|--------------|--------------|
/// | forward  | flip rows    | unchanged    |
/// | backward | flip both    | flip columns |
pub(crate) fn orient_signal(
    signal: SignalPair,
    trace: Trace,
    scanned_down: bool,
    channel: &str,
) -> Result<Array2<f64>> {
    match trace {
        Trace::Forward if scanned_down => Ok(flip_rows(signal.forward.view())),
        Trace::Forward => Ok(signal.forward),
        Trace::Backward => {
            let backward = signal.backward.ok_or_else(|| LoadError::MissingSignal {
                channel: channel.to_string(),
                direction: "backward",
            })?;
            if scanned_down {
                Ok(flip_both(backward.view()))
            } else {
                Ok(flip_columns(backward.view()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendError;
    use crate::types::{HeaderValue, NanonisHeader};
    use ndarray::array;
    use std::collections::BTreeMap;

    struct FixedScan(NanonisScan);

    impl NanonisBackend for FixedScan {
        fn read_scan(&self, _path: &Path) -> std::result::Result<NanonisScan, BackendError> {
            Ok(self.0.clone())
        }
    }

    fn pair() -> SignalPair {
        SignalPair {
            forward: array![[1.0, 2.0], [3.0, 4.0]],
            backward: Some(array![[5.0, 6.0], [7.0, 8.0]]),
        }
    }

    fn scan(scan_dir: Option<&str>, signals: BTreeMap<String, SignalPair>) -> NanonisScan {
        let mut header = NanonisHeader::new();
        if let Some(dir) = scan_dir {
            header.insert("scan_dir", HeaderValue::Text(dir.to_string()));
        }
        NanonisScan { header, signals }
    }

    #[test]
    fn test_orientation_table() -> Result<()> {
        assert_eq!(
            orient_signal(pair(), Trace::Forward, false, "Z")?,
            array![[1.0, 2.0], [3.0, 4.0]]
        );
        assert_eq!(
            orient_signal(pair(), Trace::Forward, true, "Z")?,
            array![[3.0, 4.0], [1.0, 2.0]]
        );
        assert_eq!(
            orient_signal(pair(), Trace::Backward, false, "Z")?,
            array![[6.0, 5.0], [8.0, 7.0]]
        );
        assert_eq!(
            orient_signal(pair(), Trace::Backward, true, "Z")?,
            array![[8.0, 7.0], [6.0, 5.0]]
        );
        Ok(())
    }

    #[test]
    fn test_forward_only_channel() {
        let signal = SignalPair {
            forward: array![[1.0]],
            backward: None,
        };
        assert!(matches!(
            orient_signal(signal, Trace::Backward, false, "Current"),
            Err(LoadError::MissingSignal { .. })
        ));
    }

    #[test]
    fn test_read_keeps_header() -> Result<()> {
        let backend = FixedScan(scan(Some("down"), BTreeMap::from([("Z".to_string(), pair())])));
        match read_nanonis(&backend, Path::new("a.sxm"), Trace::Forward, "Z")? {
            RawScanRecord::Nanonis { data, header } => {
                assert_eq!(data, array![[3.0, 4.0], [1.0, 2.0]]);
                assert_eq!(header.text("scan_dir")?, "down");
            }
            other => panic!("expected Nanonis record, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_unknown_channel() {
        let backend = FixedScan(scan(Some("up"), BTreeMap::from([("Z".to_string(), pair())])));
        match read_nanonis(&backend, Path::new("a.sxm"), Trace::Forward, "Bias") {
            Err(LoadError::MissingChannel { channel, available }) => {
                assert_eq!(channel, "Bias");
                assert_eq!(available, "Z");
            }
            other => panic!("expected MissingChannel, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_scan_dir() {
        let backend = FixedScan(scan(None, BTreeMap::from([("Z".to_string(), pair())])));
        assert!(matches!(
            read_nanonis(&backend, Path::new("a.sxm"), Trace::Forward, "Z"),
            Err(LoadError::MissingField { .. })
        ));
    }
}
