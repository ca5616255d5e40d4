//! Format-specific extraction: one reader per controller platform

mod matrix_reader;
mod nanonis_reader;

pub(crate) use matrix_reader::read_matrix;
pub(crate) use nanonis_reader::read_nanonis;
