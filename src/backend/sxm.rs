//! Reader for Nanonis `.sxm` scan files

use itertools::Itertools;
use log::debug;
use ndarray::Array2;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use winnow::binary::Endianness;

use super::{BackendError, NanonisBackend, NanonisScan, SignalPair};
use crate::parser::{SxmSection, parse_frames, parse_sxm_header, split_sxm_file};
use crate::types::{HeaderValue, NanonisHeader};
use crate::utils::file_utils::read_binary_file_mmap;

/// Header keys holding whitespace-separated numbers
const LIST_KEYS: [&str; 4] = ["scan_pixels", "scan_range", "scan_offset", "scan_time"];

const SCAN_PIXELS: &str = "scan_pixels";

/// Header keys holding one number
const SCALAR_KEYS: [&str; 2] = ["bias", "acq_time"];

/// Header keys holding a tab-separated table whose first row names the columns
const TABLE_KEYS: [&str; 2] = ["data_info", "z-controller"];

/// Table whose columns are also exposed as top-level header entries
const FLATTENED_TABLE: &str = "z-controller";

/// Errors raised while decoding an `.sxm` file
#[derive(Error, Debug)]
pub enum SxmError {
    /// I/O error while opening or mapping the file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file structure could not be parsed
    #[error("Malformed SXM file: {0}")]
    Malformed(String),

    /// A header entry could not be converted to its expected type
    #[error("Invalid value for header entry '{key}': {value:?}")]
    InvalidValue { key: String, value: String },

    /// A header entry needed to decode the data is absent
    #[error("Missing header entry: {0}")]
    MissingEntry(&'static str),

    /// Fewer data bytes than the header announces
    #[error("Data block too short: expected {expected} bytes, found {found}")]
    Truncated { expected: usize, found: usize },
}

/// Default [`NanonisBackend`]: decodes `.sxm` files from a memory map
#[derive(Debug, Clone, Copy, Default)]
pub struct SxmReader;

impl SxmReader {
    pub fn new() -> Self {
        Self
    }

    /// Decode a complete `.sxm` file already held in memory
    pub fn read_bytes(&self, bytes: &[u8]) -> Result<NanonisScan, SxmError> {
        let mut input = bytes;
        let header_bytes = split_sxm_file(&mut input)
            .map_err(|e| SxmError::Malformed(format!("Failed to locate data block: {:?}", e)))?;

        let header_text = String::from_utf8_lossy(header_bytes);
        let sections = parse_sxm_header(&mut &*header_text)
            .map_err(|e| SxmError::Malformed(format!("Failed to parse header: {:?}", e)))?;
        let header = build_header(&sections)?;

        let signals = read_signals(&header, input)?;
        debug!(
            "Parsed SXM header with {} entries and {} channel(s)",
            header.len(),
            signals.len()
        );

        Ok(NanonisScan { header, signals })
    }
}

impl NanonisBackend for SxmReader {
    fn read_scan(&self, path: &Path) -> Result<NanonisScan, BackendError> {
        // The map is dropped when this function returns, on success or failure
        let mmap = read_binary_file_mmap(path).map_err(SxmError::from)?;
        Ok(self.read_bytes(&mmap)?)
    }
}

fn parse_numbers(key: &str, lines: &[&str]) -> Result<Vec<f64>, SxmError> {
    lines
        .iter()
        .flat_map(|line| line.split_whitespace())
        .map(|token| {
            token.parse::<f64>().map_err(|_| SxmError::InvalidValue {
                key: key.to_string(),
                value: token.to_string(),
            })
        })
        .collect()
}

/// Splits tab-separated rows into named columns. Short rows pad with empty strings.
fn parse_table(lines: &[&str]) -> BTreeMap<String, Vec<String>> {
    let rows = lines
        .iter()
        .map(|line| {
            line.trim_start_matches('\t')
                .trim_end()
                .split('\t')
                .map(str::trim)
                .collect_vec()
        })
        .collect_vec();

    let Some((names, values)) = rows.split_first() else {
        return BTreeMap::new();
    };

    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let column = values
                .iter()
                .map(|row| row.get(i).copied().unwrap_or_default().to_string())
                .collect_vec();
            (name.to_string(), column)
        })
        .collect()
}

fn build_header(sections: &[SxmSection<'_>]) -> Result<NanonisHeader, SxmError> {
    let mut header = NanonisHeader::new();

    for section in sections {
        let key = section.key.to_lowercase();
        let value = if LIST_KEYS.contains(&key.as_str()) {
            HeaderValue::Numbers(parse_numbers(&key, &section.lines)?)
        } else if SCALAR_KEYS.contains(&key.as_str()) {
            match parse_numbers(&key, &section.lines)?.as_slice() {
                [value] => HeaderValue::Number(*value),
                _ => {
                    return Err(SxmError::InvalidValue {
                        key,
                        value: section.lines.join(" "),
                    });
                }
            }
        } else if TABLE_KEYS.contains(&key.as_str()) {
            let table = parse_table(&section.lines);
            if key == FLATTENED_TABLE {
                for (name, column) in &table {
                    header.insert(name.clone(), HeaderValue::Column(column.clone()));
                }
            }
            HeaderValue::Table(table)
        } else {
            HeaderValue::Text(section.lines.iter().map(|line| line.trim()).join("\n"))
        };
        header.insert(key, value);
    }

    Ok(header)
}

fn pixel_counts(header: &NanonisHeader) -> Result<(usize, usize), SxmError> {
    if !header.contains_key(SCAN_PIXELS) {
        return Err(SxmError::MissingEntry(SCAN_PIXELS));
    }
    let count = |index| {
        header
            .count_at(SCAN_PIXELS, index)
            .map_err(|e| SxmError::InvalidValue {
                key: SCAN_PIXELS.to_string(),
                value: e.to_string(),
            })
    };
    Ok((count(0)?, count(1)?))
}

/// Bytes taken by `frames` frames of `points * lines` samples, `None` on overflow
fn data_size(points: usize, lines: usize, frames: usize) -> Option<usize> {
    points
        .checked_mul(lines)?
        .checked_mul(frames)?
        .checked_mul(std::mem::size_of::<f32>())
}

fn byte_order(header: &NanonisHeader) -> Endianness {
    match header.get("scanit_type") {
        Some(HeaderValue::Text(kind)) if kind.contains("LSBFIRST") => Endianness::Little,
        _ => Endianness::Big,
    }
}

/// Decodes the frames following the header, forward before backward for every channel.
fn read_signals(
    header: &NanonisHeader,
    mut data: &[u8],
) -> Result<BTreeMap<String, SignalPair>, SxmError> {
    let (points, lines) = pixel_counts(header)?;
    let data_info = match header.get("data_info") {
        Some(HeaderValue::Table(table)) => table,
        _ => return Err(SxmError::MissingEntry("data_info")),
    };
    let names = data_info
        .get("Name")
        .ok_or(SxmError::MissingEntry("data_info Name column"))?;
    let directions = data_info
        .get("Direction")
        .ok_or(SxmError::MissingEntry("data_info Direction column"))?;

    let both = directions.iter().map(|d| d == "both").collect_vec();
    let frame_count: usize = both.iter().map(|&b| if b { 2 } else { 1 }).sum();
    let expected =
        data_size(points, lines, frame_count).ok_or_else(|| SxmError::InvalidValue {
            key: SCAN_PIXELS.to_string(),
            value: format!("{} x {} pixels in {} frame(s) overflows", points, lines, frame_count),
        })?;
    let samples = points * lines;
    if data.len() < expected {
        return Err(SxmError::Truncated {
            expected,
            found: data.len(),
        });
    }

    let mut frames = parse_frames(&mut data, frame_count, samples, byte_order(header))
        .map_err(|e| SxmError::Malformed(format!("Failed to parse data block: {:?}", e)))?
        .into_iter()
        .map(|frame| {
            Array2::from_shape_vec((lines, points), frame.into_iter().map(f64::from).collect())
                .map_err(|e| SxmError::Malformed(format!("Bad frame shape: {}", e)))
        });

    let mut signals = BTreeMap::new();
    for (name, has_backward) in names.iter().zip(both) {
        let forward = frames
            .next()
            .ok_or(SxmError::MissingEntry("forward frame"))??;
        let backward = if has_backward {
            Some(
                frames
                    .next()
                    .ok_or(SxmError::MissingEntry("backward frame"))??,
            )
        } else {
            None
        };
        signals.insert(name.clone(), SignalPair { forward, backward });
    }

    Ok(signals)
}
