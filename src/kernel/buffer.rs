//! Live editor buffer: the text the user currently sees and edits.
//!
//! Positions are char offsets into the text. The selection is the span between
//! the anchor (if any) and the cursor.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    DocStart,
    DocEnd,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorBuffer {
    text: String,
    cursor: usize,
    anchor: Option<usize>,
    /// Column the cursor tries to keep while moving vertically.
    preferred_col: Option<usize>,
}

impl EditorBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Replaces the whole text and resets cursor/selection (store → buffer direction).
    pub fn load(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.cursor = 0;
        self.anchor = None;
        self.preferred_col = None;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Ordered `(start, end)`; empty when there is no selection.
    pub fn selection(&self) -> (usize, usize) {
        match self.anchor {
            Some(anchor) if anchor <= self.cursor => (anchor, self.cursor),
            Some(anchor) => (self.cursor, anchor),
            None => (self.cursor, self.cursor),
        }
    }

    pub fn has_selection(&self) -> bool {
        let (start, end) = self.selection();
        start != end
    }

    pub fn selected_text(&self) -> &str {
        let (start, end) = self.selection();
        char_slice(&self.text, start, end)
    }

    pub fn set_selection(&mut self, start: usize, end: usize) -> bool {
        let len = self.char_len();
        let start = start.min(len);
        let end = end.min(len);
        let anchor = (start != end).then_some(start);
        let changed = self.anchor != anchor || self.cursor != end;
        self.anchor = anchor;
        self.cursor = end;
        self.preferred_col = None;
        changed
    }

    pub fn select_all(&mut self) -> bool {
        let len = self.char_len();
        self.set_selection(0, len)
    }

    pub fn clear_selection(&mut self) -> bool {
        self.anchor.take().is_some()
    }

    /// Inserts at the cursor, replacing the selection if there is one.
    pub fn insert_str(&mut self, s: &str) -> bool {
        let removed = self.delete_selection();
        if s.is_empty() {
            return removed;
        }
        let at = byte_offset(&self.text, self.cursor);
        self.text.insert_str(at, s);
        self.cursor += s.chars().count();
        self.preferred_col = None;
        true
    }

    pub fn insert_char(&mut self, ch: char) -> bool {
        let mut tmp = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut tmp))
    }

    pub fn delete_backward(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        if self.cursor == 0 {
            return false;
        }
        let start = byte_offset(&self.text, self.cursor - 1);
        let end = byte_offset(&self.text, self.cursor);
        self.text.replace_range(start..end, "");
        self.cursor -= 1;
        self.preferred_col = None;
        true
    }

    pub fn delete_forward(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        if self.cursor >= self.char_len() {
            return false;
        }
        let start = byte_offset(&self.text, self.cursor);
        let end = byte_offset(&self.text, self.cursor + 1);
        self.text.replace_range(start..end, "");
        self.preferred_col = None;
        true
    }

    /// Replaces the whole text but keeps the cursor at `cursor` (used for splices).
    pub fn replace_text(&mut self, text: String, cursor: usize) {
        self.text = text;
        self.anchor = None;
        self.preferred_col = None;
        self.cursor = cursor.min(self.char_len());
    }

    pub fn move_cursor(&mut self, motion: Motion, extend: bool) -> bool {
        let before = (self.cursor, self.anchor);
        if extend {
            if self.anchor.is_none() {
                self.anchor = Some(self.cursor);
            }
        } else if self.anchor.is_some() && matches!(motion, Motion::Left | Motion::Right) {
            // Collapse to the matching edge of the selection.
            let (start, end) = self.selection();
            self.anchor = None;
            self.cursor = if motion == Motion::Left { start } else { end };
            self.preferred_col = None;
            return true;
        } else {
            self.anchor = None;
        }

        let (line, col) = self.line_col(self.cursor);
        match motion {
            Motion::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                self.preferred_col = None;
            }
            Motion::Right => {
                self.cursor = (self.cursor + 1).min(self.char_len());
                self.preferred_col = None;
            }
            Motion::Up | Motion::Down => {
                let target_col = *self.preferred_col.get_or_insert(col);
                let target_line = if motion == Motion::Up {
                    line.checked_sub(1)
                } else {
                    Some(line + 1).filter(|l| *l < self.line_count())
                };
                match target_line {
                    Some(target) => self.cursor = self.offset_of(target, target_col),
                    None if motion == Motion::Up => self.cursor = 0,
                    None => self.cursor = self.char_len(),
                }
            }
            Motion::LineStart => {
                self.cursor -= col;
                self.preferred_col = None;
            }
            Motion::LineEnd => {
                self.cursor = self.offset_of(line, usize::MAX);
                self.preferred_col = None;
            }
            Motion::DocStart => {
                self.cursor = 0;
                self.preferred_col = None;
            }
            Motion::DocEnd => {
                self.cursor = self.char_len();
                self.preferred_col = None;
            }
        }

        if self.anchor == Some(self.cursor) {
            self.anchor = None;
        }
        before != (self.cursor, self.anchor)
    }

    /// Zero-based `(line, column)` of a char offset.
    pub fn line_col(&self, pos: usize) -> (usize, usize) {
        let mut line = 0;
        let mut col = 0;
        for ch in self.text.chars().take(pos) {
            if ch == '\n' {
                line += 1;
                col = 0;
            } else {
                col += 1;
            }
        }
        (line, col)
    }

    /// Char offset of `(line, col)`, clamping `col` to the line length.
    pub fn offset_of(&self, line: usize, col: usize) -> usize {
        let mut offset = 0;
        for (i, text) in self.text.split('\n').enumerate() {
            let len = text.chars().count();
            if i == line {
                return offset + col.min(len);
            }
            offset += len + 1;
        }
        self.char_len()
    }

    fn delete_selection(&mut self) -> bool {
        let (start, end) = self.selection();
        self.anchor = None;
        if start == end {
            return false;
        }
        let start_byte = byte_offset(&self.text, start);
        let end_byte = byte_offset(&self.text, end);
        self.text.replace_range(start_byte..end_byte, "");
        self.cursor = start;
        self.preferred_col = None;
        true
    }
}

/// Byte index of the char at `char_idx` (or the text length past the end).
pub fn byte_offset(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Substring by char offsets; out-of-range bounds are clamped.
pub fn char_slice(text: &str, start: usize, end: usize) -> &str {
    let start = byte_offset(text, start);
    let end = byte_offset(text, end).max(start);
    &text[start..end]
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/buffer.rs"]
mod tests;
