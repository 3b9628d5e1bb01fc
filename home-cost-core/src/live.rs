//! Reformatting amount fields while the user types.
//!
//! [`LiveNumberFormatter`] is the pure transform from one keystroke's text and
//! cursor to the grouped text and corrected cursor. [`LiveFieldBinding`] wraps
//! it for an editor whose `set_text` fires change notifications: while the
//! binding is rewriting a field, a nested notification is suppressed instead
//! of reformatting again.

use std::cell::Cell;

use tracing::trace;

use crate::NumberFormat;

/// Text and cursor after a successful reformat. `cursor` counts characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reformatted {
    pub text: String,
    pub cursor: usize,
}

#[derive(Debug, Clone, Default)]
pub struct LiveNumberFormatter {
    format: NumberFormat,
}

impl LiveNumberFormatter {
    pub fn new(format: NumberFormat) -> Self {
        Self { format }
    }

    pub fn number_format(&self) -> &NumberFormat {
        &self.format
    }

    /// Regroups `raw` and moves the cursor by however many characters the
    /// text grew or shrank.
    ///
    /// Returns `None` when `raw` is not a whole amount (empty, mid-edit, stray
    /// characters); the field is then left as typed.
    ///
    /// A resulting cursor outside `1..=len` is placed one character before
    /// the end of the text.
    ///
    /// # Example
    ///
    /// ```
    /// use home_cost_core::{LiveNumberFormatter, NumberFormat, Reformatted};
    ///
    /// let formatter = LiveNumberFormatter::new(NumberFormat::default());
    ///
    /// // "123" + '4' typed at the end
    /// assert_eq!(
    ///     formatter.reformat("1234", 4),
    ///     Some(Reformatted { text: "1,234".to_string(), cursor: 5 })
    /// );
    /// assert_eq!(formatter.reformat("12x", 3), None);
    /// ```
    pub fn reformat(
        &self,
        raw: &str,
        cursor_before: usize,
    ) -> Option<Reformatted> {
        let value = match self.format.parse_strict(raw) {
            Ok(value) => value,
            Err(error) => {
                trace!(input = %raw, %error, "leaving field unformatted");
                return None;
            }
        };

        let text = self.format.format(value);
        let old_len = raw.chars().count() as i64;
        let new_len = text.chars().count();
        let moved = cursor_before as i64 + (new_len as i64 - old_len);

        let cursor = if moved > 0 && moved <= new_len as i64 {
            moved as usize
        } else {
            new_len.saturating_sub(1)
        };

        Some(Reformatted { text, cursor })
    }
}

/// A text widget the binding can read and rewrite.
pub trait EditableText {
    fn text(&self) -> &str;

    /// Cursor position in characters.
    fn cursor(&self) -> usize;

    /// Replaces the text. Implementations may notify listeners, which can
    /// call back into [`LiveFieldBinding::after_text_changed`].
    fn set_text(
        &mut self,
        text: String,
    );

    fn set_cursor(
        &mut self,
        cursor: usize,
    );
}

/// Outcome of one [`LiveFieldBinding::after_text_changed`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The field was rewritten with grouped text.
    Reformatted,
    /// The text did not parse and was left alone.
    Unchanged,
    /// A reformat of this binding was already in progress.
    Suppressed,
}

impl Dispatch {
    /// Whether the caller should recompute from the field contents.
    pub fn needs_recalculation(self) -> bool {
        !matches!(self, Self::Suppressed)
    }
}

/// Runs the live formatter after every text change, at most once per edit.
#[derive(Debug, Default)]
pub struct LiveFieldBinding {
    formatter: LiveNumberFormatter,
    active: Cell<bool>,
}

impl LiveFieldBinding {
    pub fn new(formatter: LiveNumberFormatter) -> Self {
        Self {
            formatter,
            active: Cell::new(false),
        }
    }

    pub fn formatter(&self) -> &LiveNumberFormatter {
        &self.formatter
    }

    /// Whether a reformat is currently rewriting a field.
    pub fn is_dispatching(&self) -> bool {
        self.active.get()
    }

    /// Reformats `editor` in place unless a reformat is already running.
    ///
    /// Callers recompute after any result other than [`Dispatch::Suppressed`].
    pub fn after_text_changed<E>(
        &self,
        editor: &mut E,
    ) -> Dispatch
    where
        E: EditableText + ?Sized,
    {
        let Some(_guard) = DispatchGuard::acquire(&self.active) else {
            trace!("suppressed nested reformat");
            return Dispatch::Suppressed;
        };

        match self.formatter.reformat(editor.text(), editor.cursor()) {
            Some(Reformatted { text, cursor }) => {
                editor.set_text(text);
                editor.set_cursor(cursor);
                Dispatch::Reformatted
            }
            None => Dispatch::Unchanged,
        }
    }
}

/// Holds the binding's flag raised and lowers it on drop.
struct DispatchGuard<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> DispatchGuard<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            None
        } else {
            Some(Self { flag })
        }
    }
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}
