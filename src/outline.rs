//! Building trees from indented text.
//!
//! Every non-blank line is one node; its depth is its number of leading spaces divided by the indentation width.
//! A node's children are the deeper lines that follow it, up to the next line at its own depth or above. A line
//! that consists of just the absent marker stands for an absent slot.
//!
//! ```text
//! root
//!   left
//!     ~
//!     right of left
//!   right
//! ```

use crate::*;

use std::io;
use std::str;

use tracing::debug;

/// Settings for [`parse_outline`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutlineOptions {
    /// Spaces per level.
    pub indent: usize,
    /// The text of a line that stands for an absent child slot.
    pub absent_marker: String,
}

impl Default for OutlineOptions {
    fn default() -> Self {
        OutlineOptions {
            indent: 2,
            absent_marker: "~".to_owned(),
        }
    }
}

impl OutlineOptions {
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_absent_marker(mut self, absent_marker: impl Into<String>) -> Self {
        self.absent_marker = absent_marker.into();
        self
    }
}

// A node whose line has been read but whose children may still follow.
enum Open<P: StoragePolicy> {
    Node { value: String, children: Vec<Handle<String, P>> },
    Absent,
}

impl<P: StoragePolicy> Open<P> {
    fn close(self) -> Handle<String, P> {
        match self {
            Open::Node { value, children } => Node::create(value, children),
            Open::Absent => Handle::absent(),
        }
    }
}

/// Build a tree from indented lines, e.g. those of a [`LineReader`] or (wrapped in `Ok`) a [`SliceLineReader`].
///
/// The first non-blank line must be unindented and becomes the root; it is the only line allowed at depth 0. Trailing
/// whitespace is not part of a value. An indentation width of 0 is rejected with [`OutlineError::ZeroIndent`].
///
/// ```
/// use policy_tree::{parse_outline, OutlineOptions, SliceLineReader, Unique};
///
/// let text = b"1\n  2\n    4\n    5\n  3\n";
/// let lines = SliceLineReader::new(text).map(Ok);
/// let tree = parse_outline::<Unique, _, _>(lines, &OutlineOptions::default()).unwrap();
/// let values: Vec<&str> = tree.get().unwrap().depth_first().map(|node| node.value().as_str()).collect();
/// assert_eq!(values, ["1", "2", "4", "5", "3"]);
/// ```
pub fn parse_outline<P, I, L>(lines: I, options: &OutlineOptions) -> Result<Handle<String, P>, OutlineError>
where
    P: StoragePolicy,
    I: IntoIterator<Item = io::Result<L>>,
    L: AsRef<[u8]>,
{
    if options.indent == 0 {
        return Err(OutlineError::ZeroIndent);
    }

    // open[d] is the unfinished node at depth d on the path to the current line
    let mut open: Vec<Open<P>> = Vec::new();
    let mut root: Option<Handle<String, P>> = None;
    let mut num_nodes = 0usize;

    for (index, line) in lines.into_iter().enumerate() {
        let line_no = index + 1;
        let line = line?;
        let text = str::from_utf8(line.as_ref())
            .map_err(|_| OutlineError::InvalidUtf8 { line: line_no })?
            .trim_end();
        let value = text.trim_start_matches(' ');
        if value.is_empty() {
            continue;
        }

        let spaces = text.len() - value.len();
        if spaces % options.indent != 0 {
            return Err(OutlineError::Misaligned {
                line: line_no,
                spaces,
                indent: options.indent,
            });
        }
        let depth = spaces / options.indent;
        if depth > open.len() {
            return Err(OutlineError::DepthJump {
                line: line_no,
                depth,
                max: open.len(),
            });
        }
        if depth == open.len() {
            if let Some(Open::Absent) = open.last() {
                return Err(OutlineError::ChildOfAbsent { line: line_no });
            }
        }

        while open.len() > depth {
            close_deepest(&mut open, &mut root);
        }
        if open.is_empty() && root.is_some() {
            return Err(OutlineError::MultipleRoots { line: line_no });
        }

        open.push(if value == options.absent_marker {
            Open::Absent
        } else {
            Open::Node {
                value: value.to_owned(),
                children: Vec::new(),
            }
        });
        num_nodes += 1;
    }

    while !open.is_empty() {
        close_deepest(&mut open, &mut root);
    }
    debug!(num_nodes, "parsed outline");
    root.ok_or(OutlineError::Empty)
}

fn close_deepest<P: StoragePolicy>(open: &mut Vec<Open<P>>, root: &mut Option<Handle<String, P>>) {
    let handle = match open.pop() {
        Some(deepest) => deepest.close(),
        None => return,
    };
    match open.last_mut() {
        Some(Open::Node { children, .. }) => children.push(handle),
        Some(Open::Absent) => unreachable!("absent placeholders never get children"),
        None => *root = Some(handle),
    }
}
