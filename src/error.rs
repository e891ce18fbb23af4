use std::io;
use thiserror::Error;

/// Errors from building a tree out of indented text (see [`parse_outline`](crate::parse_outline)).
///
/// Line numbers are 1-based and count blank lines too.
#[derive(Error, Debug)]
pub enum OutlineError {
    #[error("failed to read outline: {0}")]
    Io(#[from] io::Error),

    #[error("indentation width must be at least one space")]
    ZeroIndent,

    #[error("line {line}: not valid UTF-8")]
    InvalidUtf8 { line: usize },

    #[error("line {line}: indentation of {spaces} spaces is not a multiple of {indent}")]
    Misaligned {
        line: usize,
        spaces: usize,
        indent: usize,
    },

    #[error("line {line}: depth {depth} skips a level (deepest allowed here is {max})")]
    DepthJump { line: usize, depth: usize, max: usize },

    #[error("line {line}: a second root node")]
    MultipleRoots { line: usize },

    #[error("line {line}: an absent placeholder cannot have children")]
    ChildOfAbsent { line: usize },

    #[error("outline is empty")]
    Empty,
}
