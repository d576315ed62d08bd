#![forbid(unsafe_code)]

//! Single-line text input.
//!
//! Holds its own value and cursor (a grapheme index), consumes key events,
//! and renders with horizontal scrolling when the value outgrows its area.
//! A [`CharMap`] hook filters or rewrites each typed character before it is
//! inserted, which is how the wizard forces ticker symbols to uppercase and
//! keeps numeric fields digits-only.

use forge_core::event::{Event, KeyCode, Modifiers};
use forge_core::geometry::Rect;
use forge_render::frame::Frame;
use forge_style::Style;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::{Widget, draw_text};

/// Per-character rewrite hook: return the text to insert in place of a
/// typed character, or `None` to reject it. Case mapping may expand a
/// single character into several (ß becomes SS).
pub type CharMap = fn(char) -> Option<String>;

/// A single-line text input widget.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    value: String,
    /// Cursor position as a grapheme index.
    cursor: usize,
    placeholder: String,
    max_length: Option<usize>,
    char_map: Option<CharMap>,
    style: Style,
    placeholder_style: Style,
    focused: bool,
}

impl TextInput {
    /// An empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: initial value, cursor at the end.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self.cursor = self.grapheme_count();
        self
    }

    /// Builder: placeholder shown while empty.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Builder: maximum length in graphemes.
    #[must_use]
    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Builder: per-character filter/rewrite hook.
    #[must_use]
    pub fn with_char_map(mut self, map: CharMap) -> Self {
        self.char_map = Some(map);
        self
    }

    /// Builder: text style.
    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Builder: placeholder style.
    #[must_use]
    pub fn with_placeholder_style(mut self, style: Style) -> Self {
        self.placeholder_style = style;
        self
    }

    /// Builder: focus state.
    #[must_use]
    pub fn with_focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value, clamping the cursor.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.cursor.min(self.grapheme_count());
    }

    /// Clear the value.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Cursor position as a grapheme index.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the input has focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Set focus; an unfocused input ignores key events.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Feed an event through the input. Returns `true` if consumed.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        if !self.focused {
            return false;
        }
        match event {
            Event::Key(key) => match key.code {
                KeyCode::Char(c) if !key.modifiers.intersects(Modifiers::CTRL | Modifiers::ALT) => {
                    self.insert_char(c);
                    true
                }
                KeyCode::Backspace => {
                    if self.cursor > 0 {
                        self.remove_grapheme(self.cursor - 1);
                        self.cursor -= 1;
                    }
                    true
                }
                KeyCode::Delete => {
                    if self.cursor < self.grapheme_count() {
                        self.remove_grapheme(self.cursor);
                    }
                    true
                }
                KeyCode::Left => {
                    self.cursor = self.cursor.saturating_sub(1);
                    true
                }
                KeyCode::Right => {
                    self.cursor = (self.cursor + 1).min(self.grapheme_count());
                    true
                }
                KeyCode::Home => {
                    self.cursor = 0;
                    true
                }
                KeyCode::End => {
                    self.cursor = self.grapheme_count();
                    true
                }
                _ => false,
            },
            Event::Paste(paste) => {
                for c in paste.text.chars() {
                    self.insert_char(c);
                }
                true
            }
            _ => false,
        }
    }

    fn insert_char(&mut self, c: char) {
        match self.char_map {
            Some(map) => {
                if let Some(mapped) = map(c) {
                    for mc in mapped.chars() {
                        self.insert_raw(mc);
                    }
                }
            }
            None => self.insert_raw(c),
        }
    }

    fn insert_raw(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        if let Some(max) = self.max_length
            && self.grapheme_count() >= max
        {
            return;
        }
        let offset = self.grapheme_byte_offset(self.cursor);
        self.value.insert(offset, c);
        self.cursor += 1;
    }

    fn remove_grapheme(&mut self, index: usize) {
        let start = self.grapheme_byte_offset(index);
        let end = self.grapheme_byte_offset(index + 1);
        self.value.replace_range(start..end, "");
    }

    fn grapheme_count(&self) -> usize {
        self.value.graphemes(true).count()
    }

    fn grapheme_byte_offset(&self, index: usize) -> usize {
        self.value
            .grapheme_indices(true)
            .nth(index)
            .map_or(self.value.len(), |(offset, _)| offset)
    }

    /// Visual cursor column within the value, in cells.
    fn cursor_visual_pos(&self) -> usize {
        let offset = self.grapheme_byte_offset(self.cursor);
        self.value[..offset].width()
    }

    /// Scroll offset that keeps the cursor inside `width` cells.
    fn scroll_for(&self, width: usize) -> usize {
        if width == 0 {
            return 0;
        }
        self.cursor_visual_pos().saturating_sub(width - 1)
    }
}

impl Widget for TextInput {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }
        if self.value.is_empty() {
            draw_text(
                frame,
                area.x,
                area.y,
                area.width,
                &self.placeholder,
                self.placeholder_style,
            );
        } else {
            let scroll = self.scroll_for(area.width as usize);
            let visible: String = self
                .value
                .graphemes(true)
                .skip(scroll)
                .collect();
            draw_text(frame, area.x, area.y, area.width, &visible, self.style);
        }
        if self.focused {
            let rel = (self.cursor_visual_pos() - self.scroll_for(area.width as usize)) as u16;
            let x = area.x.saturating_add(rel).min(area.right() - 1);
            frame.set_cursor(Some((x, area.y)));
        }
    }
}
