use winnow::{
    Parser,
    ascii::{line_ending, till_line_ending},
    combinator::{delimited, eof, not, opt, preceded, repeat, terminated},
    error::ContextError,
    token::{literal, take_till, take_until},
};

/// Marker line closing the ASCII header of an `.sxm` file
pub const SCANIT_END: &[u8] = b":SCANIT_END:";

/// Two bytes preceding the binary frames
pub const DATA_MARKER: &[u8] = b"\x1a\x04";

/// One `:KEY:` entry of the header with its raw value lines
#[derive(Debug, Clone, PartialEq)]
pub struct SxmSection<'a> {
    pub key: &'a str,
    pub lines: Vec<&'a str>,
}

/// Splits an `.sxm` file into its header bytes, leaving `input` at the first data byte.
///
/// The layout is:
/// - ASCII header, up to `:SCANIT_END:`
/// - padding up to and including the `0x1A 0x04` marker
/// - binary frames
pub fn split_sxm_file<'a>(input: &mut &'a [u8]) -> Result<&'a [u8], ContextError> {
    let header = take_until(0.., SCANIT_END).parse_next(input)?;
    let _ = literal(SCANIT_END).parse_next(input)?;
    let _ = take_until(0.., DATA_MARKER).parse_next(input)?;
    let _ = literal(DATA_MARKER).parse_next(input)?;
    Ok(header)
}

/// `:KEY:` on a line of its own
fn section_key<'a>(input: &mut &'a str) -> Result<&'a str, ContextError> {
    terminated(
        delimited(':', take_till(1.., [':', '\r', '\n']), ':'),
        (till_line_ending, opt(line_ending)),
    )
    .parse_next(input)
}

/// Any line that does not start a new section
fn section_line<'a>(input: &mut &'a str) -> Result<&'a str, ContextError> {
    preceded(
        (not(':'), not(eof)),
        terminated(till_line_ending, opt(line_ending)),
    )
    .parse_next(input)
}

fn section<'a>(input: &mut &'a str) -> Result<SxmSection<'a>, ContextError> {
    let key = section_key.parse_next(input)?;
    let lines: Vec<&str> = repeat(0.., section_line).parse_next(input)?;
    let lines = lines
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .collect();
    Ok(SxmSection { key, lines })
}

/// Parses the header text (everything before `:SCANIT_END:`) into its sections, in file order.
pub fn parse_sxm_header<'a>(input: &mut &'a str) -> Result<Vec<SxmSection<'a>>, ContextError> {
    terminated(repeat(0.., section), eof).parse_next(input)
}
