use winnow::{
    Parser,
    binary::{Endianness, f32},
    combinator::repeat,
    error::ContextError,
};

/// Parses one frame of `samples` float32 values in the given byte order.
pub fn parse_frame(
    input: &mut &[u8],
    samples: usize,
    endianness: Endianness,
) -> Result<Vec<f32>, ContextError> {
    repeat(samples, f32(endianness)).parse_next(input)
}

/// Parses `frames` consecutive frames of `samples` values each.
pub fn parse_frames(
    input: &mut &[u8],
    frames: usize,
    samples: usize,
    endianness: Endianness,
) -> Result<Vec<Vec<f32>>, ContextError> {
    repeat(frames, |i: &mut &[u8]| parse_frame(i, samples, endianness)).parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_big_endian_frame() {
        let mut bytes = Vec::new();
        for value in [1.0f32, -2.5, 3.25] {
            bytes.extend_from_slice(&value.to_be_bytes());
        }
        let frame = parse_frame(&mut &bytes[..], 3, Endianness::Big).unwrap();
        assert_eq!(frame, vec![1.0, -2.5, 3.25]);
    }

    #[test]
    fn test_little_endian_frames() {
        let mut bytes = Vec::new();
        for value in [1.0f32, 2.0, 3.0, 4.0] {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        let mut input = &bytes[..];
        let frames = parse_frames(&mut input, 2, 2, Endianness::Little).unwrap();
        assert_eq!(frames, vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert!(input.is_empty());
    }

    #[test]
    fn test_truncated_frame() {
        let bytes = 1.0f32.to_be_bytes();
        assert!(parse_frame(&mut &bytes[..], 2, Endianness::Big).is_err());
    }
}
