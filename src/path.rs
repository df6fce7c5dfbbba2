//! The bounded in-driver path buffer.
//!
//! `open` works on a mutable copy of the caller's path because
//! symlink resolution rewrites it in place: an absolute target
//! replaces everything up to and including the link component, a
//! relative target is spliced over the component with `.` segments
//! dropped and each `..` popping one already-resolved component,
//! clamped at the buffer start. The unresolved suffix after the link
//! component is kept either way, and traversal restarts from the
//! root. Input longer than the capacity is truncated.

use arrayvec::ArrayVec;

use crate::config::{PATH_MAX, SEPARATOR};

pub(crate) struct PathBuf {
    buf: ArrayVec<u8, PATH_MAX>,
    /// Byte index where the unresolved suffix starts.
    pos: usize,
}

impl PathBuf {
    pub(crate) const fn new() -> Self {
        PathBuf {
            buf: ArrayVec::new_const(),
            pos: 0,
        }
    }

    /// Replaces the buffer contents, truncating at capacity.
    pub(crate) fn load(&mut self, path: &[u8]) {
        self.buf.clear();
        push_clamped(&mut self.buf, path);
        self.pos = 0;
    }

    /// Restarts traversal at the first component, stepping over one
    /// leading separator if present.
    pub(crate) fn rewind(&mut self) {
        self.pos = usize::from(self.buf.first() == Some(&SEPARATOR));
    }

    fn component_end(&self) -> usize {
        self.buf[self.pos..]
            .iter()
            .position(|&b| b == SEPARATOR)
            .map_or(self.buf.len(), |i| self.pos + i)
    }

    /// The component currently being resolved.
    pub(crate) fn component(&self) -> &[u8] {
        &self.buf[self.pos..self.component_end()]
    }

    /// True when no separator follows the current component.
    pub(crate) fn is_last(&self) -> bool {
        self.component_end() == self.buf.len()
    }

    /// Steps past the current component and its separator.
    pub(crate) fn advance(&mut self) {
        self.pos = self.component_end() + 1;
    }

    /// Rewrites the path after the current component resolved to a
    /// symlink with the given target text. The caller rewinds and
    /// restarts traversal afterwards.
    pub(crate) fn follow(&mut self, target: &[u8]) {
        let end = self.component_end();
        let mut out: ArrayVec<u8, PATH_MAX> = ArrayVec::new();

        if target.first() == Some(&SEPARATOR) {
            push_clamped(&mut out, target);
        } else {
            push_clamped(&mut out, &self.buf[..self.pos]);
            for seg in target.split(|&b| b == SEPARATOR) {
                match seg {
                    b"" | b"." => {}
                    b".." => pop_component(&mut out),
                    _ => {
                        if !out.is_empty() && out.last() != Some(&SEPARATOR) {
                            push_clamped(&mut out, &[SEPARATOR]);
                        }
                        push_clamped(&mut out, seg);
                    }
                }
            }
        }
        // re-attach the untouched suffix without doubling the separator
        let mut suffix = &self.buf[end..];
        if out.last() == Some(&SEPARATOR) && suffix.first() == Some(&SEPARATOR) {
            suffix = &suffix[1..];
        }
        push_clamped(&mut out, suffix);
        self.buf = out;
        self.pos = 0;
    }
}

fn push_clamped(buf: &mut ArrayVec<u8, PATH_MAX>, bytes: &[u8]) {
    let take = bytes.len().min(buf.remaining_capacity());
    let _ = buf.try_extend_from_slice(&bytes[..take]);
}

/// Drops the last component of `buf`, separator included, never
/// popping past the start.
fn pop_component(buf: &mut ArrayVec<u8, PATH_MAX>) {
    while buf.last() == Some(&SEPARATOR) {
        buf.pop();
    }
    while let Some(&b) = buf.last() {
        if b == SEPARATOR {
            break;
        }
        buf.pop();
    }
}
