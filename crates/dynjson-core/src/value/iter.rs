//! Checked child traversal
//!
//! [`ValueIter`] is a cursor over one value's children that dispatches on
//! the node's kind: a position into the array, a position into the object's
//! member order, or a two-state begin/end sentinel for primitives. Every
//! operation is checked and misuse raises the invalid-iterator category
//! instead of walking out of bounds.
//!
//! The cursor holds a shared borrow of its node, so the borrow checker
//! already rules out the classic invalidation bug: the node cannot change
//! kind or be dropped while any cursor is alive.

use std::cmp::Ordering;

use super::JsonValue;
use crate::error::{JsonError, Result};

/// Cursor position, selected by the node's kind at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Cursor {
    /// Index into the element sequence; `len` is past-the-end.
    Array(usize),
    /// Index into the member order; `len` is past-the-end.
    Object(usize),
    /// Sentinel for primitives: 0 is begin, 1 is end.
    Primitive(u8),
}

/// Cursor over one value's children.
///
/// For a non-null primitive the cursor ranges over exactly one child (the
/// value itself); for null, begin and end coincide and there is nothing to
/// yield.
#[derive(Debug, Clone)]
pub struct ValueIter<'a> {
    target: &'a JsonValue,
    cursor: Cursor,
}

impl<'a> ValueIter<'a> {
    /// Cursor positioned at the first child.
    pub fn begin(target: &'a JsonValue) -> Self {
        let cursor = match target {
            JsonValue::Array(_) => Cursor::Array(0),
            JsonValue::Object(_) => Cursor::Object(0),
            // Null has no children; begin coincides with end.
            JsonValue::Null => Cursor::Primitive(1),
            _ => Cursor::Primitive(0),
        };
        Self { target, cursor }
    }

    /// Cursor positioned past the last child.
    pub fn end(target: &'a JsonValue) -> Self {
        let cursor = match target {
            JsonValue::Array(items) => Cursor::Array(items.len()),
            JsonValue::Object(members) => Cursor::Object(members.len()),
            _ => Cursor::Primitive(1),
        };
        Self { target, cursor }
    }

    /// The node this cursor traverses.
    pub fn target(&self) -> &'a JsonValue {
        self.target
    }

    fn begin_position(&self) -> usize {
        match (self.target, self.cursor) {
            // Null's only valid sentinel position is 1.
            (JsonValue::Null, _) => 1,
            _ => 0,
        }
    }

    fn end_position(&self) -> usize {
        match self.target {
            JsonValue::Array(items) => items.len(),
            JsonValue::Object(members) => members.len(),
            _ => 1,
        }
    }

    fn cursor_position(&self) -> usize {
        match self.cursor {
            Cursor::Array(pos) | Cursor::Object(pos) => pos,
            Cursor::Primitive(pos) => usize::from(pos),
        }
    }

    fn set_position(&mut self, pos: usize) {
        self.cursor = match self.cursor {
            Cursor::Array(_) => Cursor::Array(pos),
            Cursor::Object(_) => Cursor::Object(pos),
            Cursor::Primitive(_) => Cursor::Primitive(pos as u8),
        };
    }

    /// True when positioned at the first child.
    pub fn is_begin(&self) -> bool {
        self.cursor_position() == self.begin_position()
    }

    /// True when positioned past the last child.
    pub fn is_end(&self) -> bool {
        self.cursor_position() == self.end_position()
    }

    /// Step forward by one child.
    pub fn advance(&mut self) -> Result<()> {
        if self.is_end() {
            return Err(JsonError::invalid_iterator(
                "cannot advance an iterator past the end",
            ));
        }
        self.set_position(self.cursor_position() + 1);
        Ok(())
    }

    /// Step backward by one child.
    pub fn retreat(&mut self) -> Result<()> {
        if self.cursor_position() == self.begin_position() {
            return Err(JsonError::invalid_iterator(
                "cannot retreat an iterator before the begin",
            ));
        }
        self.set_position(self.cursor_position() - 1);
        Ok(())
    }

    /// Move by an arbitrary offset. Supported for array and primitive
    /// cursors; object member order offers no random access, so object
    /// cursors refuse any offset.
    pub fn offset(&mut self, delta: isize) -> Result<()> {
        if matches!(self.cursor, Cursor::Object(_)) {
            return Err(JsonError::invalid_iterator(
                "cannot offset an object iterator",
            ));
        }
        let target = self.cursor_position() as isize + delta;
        if target < self.begin_position() as isize || target > self.end_position() as isize {
            return Err(JsonError::invalid_iterator(format!(
                "offset {delta} moves the iterator out of range"
            )));
        }
        self.set_position(target as usize);
        Ok(())
    }

    /// The child at the cursor. Fails past the end.
    pub fn value(&self) -> Result<&'a JsonValue> {
        let past_end = || JsonError::invalid_iterator("cannot dereference a past-the-end iterator");
        match (self.target, self.cursor) {
            (JsonValue::Array(items), Cursor::Array(pos)) => items.get(pos).ok_or_else(past_end),
            (JsonValue::Object(members), Cursor::Object(pos)) => {
                members.get_index(pos).map(|(_, value)| value).ok_or_else(past_end)
            }
            (value, Cursor::Primitive(0)) => Ok(value),
            _ => Err(past_end()),
        }
    }

    /// The member key at the cursor. Fails on non-objects and past the end.
    pub fn key(&self) -> Result<&'a str> {
        match (self.target, self.cursor) {
            (JsonValue::Object(members), Cursor::Object(pos)) => members
                .get_index(pos)
                .map(|(key, _)| key.as_str())
                .ok_or_else(|| {
                    JsonError::invalid_iterator("cannot take the key of a past-the-end iterator")
                }),
            _ => Err(JsonError::invalid_iterator(
                "cannot take a key from a non-object iterator",
            )),
        }
    }

    /// Position equality. Fails for cursors over different nodes.
    pub fn try_eq(&self, other: &ValueIter<'a>) -> Result<bool> {
        self.check_same_target(other)?;
        Ok(self.cursor == other.cursor)
    }

    /// Position ordering. Fails for cursors over different nodes and for
    /// object cursors, whose member order defines no ranking.
    pub fn try_cmp(&self, other: &ValueIter<'a>) -> Result<Ordering> {
        self.check_same_target(other)?;
        match (self.cursor, other.cursor) {
            (Cursor::Array(a), Cursor::Array(b)) => Ok(a.cmp(&b)),
            (Cursor::Primitive(a), Cursor::Primitive(b)) => Ok(a.cmp(&b)),
            (Cursor::Object(_), Cursor::Object(_)) => Err(JsonError::invalid_iterator(
                "cannot order object iterators",
            )),
            _ => Err(JsonError::invalid_iterator(
                "cannot compare iterators of different shapes",
            )),
        }
    }

    fn check_same_target(&self, other: &ValueIter<'a>) -> Result<()> {
        if std::ptr::eq(self.target, other.target) {
            Ok(())
        } else {
            Err(JsonError::invalid_iterator(
                "cannot compare iterators over different values",
            ))
        }
    }
}

impl<'a> Iterator for ValueIter<'a> {
    type Item = &'a JsonValue;

    fn next(&mut self) -> Option<&'a JsonValue> {
        if self.is_end() {
            return None;
        }
        match self.value() {
            Ok(item) => {
                // advance cannot fail when not at the end
                let _ = self.advance();
                Some(item)
            }
            Err(_) => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end_position().saturating_sub(self.cursor_position());
        (remaining, Some(remaining))
    }
}
