//! Parsers for Nanonis `.sxm` files and unit-carrying header values

mod quantity_parser;
pub mod sxm_data_parser;
pub mod sxm_header_parser;

// Re-export the parsing functions
pub use quantity_parser::{parse_leading_number, parse_number, parse_quantity};
pub use sxm_data_parser::{parse_frame, parse_frames};
pub use sxm_header_parser::{SxmSection, parse_sxm_header, split_sxm_file};
