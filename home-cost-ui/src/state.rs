//! State of the calculator screen.
//!
//! The screen owns the two amount fields, the cash percentage, the last
//! rendered result and a transient notice. Every edit goes through the live
//! formatter and then recomputes the result; an invalid amount keeps the
//! previous result on screen and raises a notice instead.

use std::{
    path::Path,
    time::{Duration, Instant},
};

use home_cost_core::{
    AmountField, CashPercent, EditableText, FeeScheduleError, LiveFieldBinding,
    LiveNumberFormatter, MAX_CASH_PERCENT, NumberFormat, PricingCalculator, PurchaseBreakdown,
    SessionSnapshot,
};
use tracing::{debug, warn};

use crate::{config::AppConfig, templates};

/// How long a notice stays on screen.
pub const NOTICE_DURATION: Duration = Duration::from_millis(3500);

/// Single-line text input with a character cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    text: String,
    cursor: usize,
}

impl TextField {
    /// Creates a field with the cursor at the end.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(
        &self,
        cursor: usize,
    ) -> usize {
        self.text
            .char_indices()
            .nth(cursor)
            .map_or(self.text.len(), |(i, _)| i)
    }

    pub fn insert(
        &mut self,
        c: char,
    ) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    /// Removes the character before the cursor. Returns whether the text changed.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let start = self.byte_index(self.cursor - 1);
        let end = self.byte_index(self.cursor);
        self.text.replace_range(start..end, "");
        self.cursor -= 1;
        true
    }

    /// Removes the character under the cursor. Returns whether the text changed.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.len() {
            return false;
        }
        let start = self.byte_index(self.cursor);
        let end = self.byte_index(self.cursor + 1);
        self.text.replace_range(start..end, "");
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.len());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len();
    }
}

impl EditableText for TextField {
    fn text(&self) -> &str {
        &self.text
    }

    fn cursor(&self) -> usize {
        self.cursor
    }

    fn set_text(
        &mut self,
        text: String,
    ) {
        self.text = text;
        self.cursor = self.cursor.min(self.len());
    }

    fn set_cursor(
        &mut self,
        cursor: usize,
    ) {
        self.cursor = cursor.min(self.len());
    }
}

/// Which control receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Price,
    Mortgage,
    CashPercent,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Self::Price => Self::Mortgage,
            Self::Mortgage => Self::CashPercent,
            Self::CashPercent => Self::Price,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Price => Self::CashPercent,
            Self::Mortgage => Self::Price,
            Self::CashPercent => Self::Mortgage,
        }
    }

    /// The amount field this focus edits, if any.
    pub fn field(self) -> Option<AmountField> {
        match self {
            Self::Price => Some(AmountField::Price),
            Self::Mortgage => Some(AmountField::ExistingMortgage),
            Self::CashPercent => None,
        }
    }
}

/// A transient message shown below the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    raised_at: Instant,
}

impl Notice {
    pub fn is_expired(
        &self,
        now: Instant,
    ) -> bool {
        now.saturating_duration_since(self.raised_at) >= NOTICE_DURATION
    }
}

pub struct CalculatorScreen {
    calculator: PricingCalculator,
    binding: LiveFieldBinding,
    price: TextField,
    mortgage: TextField,
    cash_percent: CashPercent,
    focus: Focus,
    result: String,
    breakdown: Option<PurchaseBreakdown>,
    notice: Option<Notice>,
}

impl CalculatorScreen {
    /// Creates an empty screen and computes its initial result.
    pub fn new(
        calculator: PricingCalculator,
        format: NumberFormat,
    ) -> Self {
        let cash_percent = calculator.cash_percent(calculator.schedule().min_cash_percent);
        let mut screen = Self {
            calculator,
            binding: LiveFieldBinding::new(LiveNumberFormatter::new(format)),
            price: TextField::default(),
            mortgage: TextField::default(),
            cash_percent,
            focus: Focus::default(),
            result: String::new(),
            breakdown: None,
            notice: None,
        };
        screen.recalculate();
        screen
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, FeeScheduleError> {
        let calculator = PricingCalculator::new(config.fees.clone())?;
        Ok(Self::new(calculator, config.format))
    }

    pub fn number_format(&self) -> &NumberFormat {
        self.binding.formatter().number_format()
    }

    pub fn price(&self) -> &TextField {
        &self.price
    }

    pub fn mortgage(&self) -> &TextField {
        &self.mortgage
    }

    pub fn cash_percent(&self) -> CashPercent {
        self.cash_percent
    }

    pub fn cash_label(&self) -> String {
        templates::cash_label(self.cash_percent)
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// The last successfully rendered result.
    pub fn result(&self) -> &str {
        &self.result
    }

    pub fn breakdown(&self) -> Option<&PurchaseBreakdown> {
        self.breakdown.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Drops the notice once it has been shown for [`NOTICE_DURATION`].
    pub fn expire_notice(
        &mut self,
        now: Instant,
    ) {
        if self.notice.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notice = None;
        }
    }

    pub fn insert_char(
        &mut self,
        c: char,
    ) {
        self.edit_focused(|field| {
            field.insert(c);
            true
        });
    }

    pub fn backspace(&mut self) {
        self.edit_focused(TextField::backspace);
    }

    pub fn delete(&mut self) {
        self.edit_focused(TextField::delete);
    }

    /// Moves the cursor of the focused field. No-op on the slider.
    pub fn move_cursor(
        &mut self,
        movement: fn(&mut TextField),
    ) {
        if let Some(field) = self.focus.field() {
            movement(self.field_mut(field));
        }
    }

    /// Sets the cash percentage, clamped to the allowed range.
    pub fn set_percent(
        &mut self,
        raw: u8,
    ) {
        self.cash_percent = self.calculator.cash_percent(raw);
        self.recalculate();
    }

    pub fn step_percent(
        &mut self,
        delta: i16,
    ) {
        let raw = (i16::from(self.cash_percent.value()) + delta).clamp(0, i16::from(u8::MAX));
        self.set_percent(raw as u8);
    }

    /// Recomputes the result from the current field contents.
    ///
    /// On an invalid amount the previous result stays and a notice is raised.
    pub fn recalculate(&mut self) {
        let format = *self.number_format();
        match self.calculator.compute_text(
            self.price.text(),
            self.mortgage.text(),
            self.cash_percent,
            &format,
        ) {
            Ok(breakdown) => {
                debug!(total = breakdown.total, "result updated");
                self.result = templates::result_text(&breakdown, &format);
                self.breakdown = Some(breakdown);
            }
            Err(error) => {
                warn!(%error, "keeping previous result");
                self.notify(templates::invalid_number_notice(&error));
            }
        }
    }

    pub fn notify(
        &mut self,
        message: impl Into<String>,
    ) {
        self.notice = Some(Notice {
            message: message.into(),
            raised_at: Instant::now(),
        });
    }

    /// The values to save when the screen goes away.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            price: self.price.text().to_string(),
            mortgage: self.mortgage.text().to_string(),
            percent: i64::from(self.cash_percent.value()),
        }
    }

    /// Re-seeds the screen from a saved snapshot.
    ///
    /// Field text is restored as saved, without reformatting.
    pub fn restore(
        &mut self,
        snapshot: &SessionSnapshot,
    ) {
        self.price = TextField::new(snapshot.price.as_str());
        self.mortgage = TextField::new(snapshot.mortgage.as_str());
        let raw = snapshot.percent.clamp(0, i64::from(MAX_CASH_PERCENT));
        self.cash_percent = self
            .calculator
            .cash_percent(u8::try_from(raw).unwrap_or(MAX_CASH_PERCENT));
        self.recalculate();
    }

    /// Restores the snapshot saved at `path`, if there is a usable one.
    ///
    /// A missing file leaves the screen fresh. An unreadable or malformed
    /// file is logged and also leaves the screen fresh. Returns whether a
    /// snapshot was applied.
    pub fn restore_from_file(
        &mut self,
        path: &Path,
    ) -> bool {
        match SessionSnapshot::load(path) {
            Ok(Some(snapshot)) => {
                self.restore(&snapshot);
                true
            }
            Ok(None) => false,
            Err(error) => {
                warn!(path = %path.display(), %error, "ignoring unusable session file");
                false
            }
        }
    }

    fn field_mut(
        &mut self,
        field: AmountField,
    ) -> &mut TextField {
        match field {
            AmountField::Price => &mut self.price,
            AmountField::ExistingMortgage => &mut self.mortgage,
        }
    }

    fn edit_focused(
        &mut self,
        edit: impl FnOnce(&mut TextField) -> bool,
    ) {
        let Some(field) = self.focus.field() else {
            return;
        };
        if edit(self.field_mut(field)) {
            self.after_text_changed(field);
        }
    }

    fn after_text_changed(
        &mut self,
        field: AmountField,
    ) {
        let editor = match field {
            AmountField::Price => &mut self.price,
            AmountField::ExistingMortgage => &mut self.mortgage,
        };
        let dispatch = self.binding.after_text_changed(editor);
        if dispatch.needs_recalculation() {
            self.recalculate();
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn screen() -> CalculatorScreen {
        CalculatorScreen::new(PricingCalculator::default(), NumberFormat::default())
    }

    fn type_text(
        screen: &mut CalculatorScreen,
        text: &str,
    ) {
        for c in text.chars() {
            screen.insert_char(c);
        }
    }

    // =========================================================================
    // TextField tests
    // =========================================================================

    #[test]
    fn text_field_inserts_at_cursor() {
        let mut field = TextField::new("13");
        field.move_left();
        field.insert('2');

        assert_eq!(field.text(), "123");
        assert_eq!(field.cursor(), 2);
    }

    #[test]
    fn text_field_backspace_at_start_is_noop() {
        let mut field = TextField::new("12");
        field.move_home();

        assert!(!field.backspace());
        assert_eq!(field.text(), "12");
    }

    #[test]
    fn text_field_delete_at_end_is_noop() {
        let mut field = TextField::new("12");

        assert!(!field.delete());
        assert_eq!(field.text(), "12");
    }

    #[test]
    fn text_field_handles_multibyte_separator() {
        let mut field = TextField::new("1\u{a0}000");
        field.move_home();
        field.move_right();
        field.move_right();

        assert!(field.backspace());
        assert_eq!(field.text(), "1000");
        assert_eq!(field.cursor(), 1);
    }

    #[test]
    fn text_field_set_cursor_clamps_to_length() {
        let mut field = TextField::new("12");
        field.set_cursor(10);

        assert_eq!(field.cursor(), 2);
    }

    // =========================================================================
    // CalculatorScreen tests
    // =========================================================================

    #[test]
    fn new_screen_shows_result_for_empty_inputs() {
        let screen = screen();

        assert_eq!(
            screen.result(),
            "Cash: 0\nMortgage deed fee: 0\nTitle deed fee: 875\nTotal: 875"
        );
        assert_eq!(screen.cash_label(), "Cash: 15%");
        assert!(screen.notice().is_none());
    }

    #[test]
    fn typing_price_groups_digits_and_updates_result() {
        let mut screen = screen();

        type_text(&mut screen, "1000000");

        assert_eq!(screen.price().text(), "1,000,000");
        assert_eq!(screen.price().cursor(), 9);
        assert_eq!(
            screen.result(),
            "Cash: 150,000\nMortgage deed fee: 17,375\nTitle deed fee: 15,875\nTotal: 183,250"
        );
    }

    #[test]
    fn typing_mortgage_reduces_mortgage_fee() {
        let mut screen = screen();
        type_text(&mut screen, "1000000");
        screen.focus_next();

        type_text(&mut screen, "850000");

        assert_eq!(screen.mortgage().text(), "850,000");
        assert_eq!(screen.breakdown().map(|b| b.mortgage_fee), Some(0));
    }

    #[test]
    fn invalid_character_keeps_previous_result_and_raises_notice() {
        let mut screen = screen();
        type_text(&mut screen, "2000");
        let before = screen.result().to_string();

        screen.insert_char('x');

        assert_eq!(screen.price().text(), "2,000x");
        assert_eq!(screen.result(), before);
        assert_eq!(
            screen.notice().map(|n| n.message.as_str()),
            Some("Please enter a valid number for the price")
        );
    }

    #[test]
    fn clearing_field_counts_as_zero() {
        let mut screen = screen();
        type_text(&mut screen, "12");

        screen.backspace();
        screen.backspace();

        assert_eq!(screen.price().text(), "");
        assert_eq!(screen.breakdown().map(|b| b.total), Some(875));
        assert!(screen.notice().is_none());
    }

    #[test]
    fn backspace_after_separator_regroups_text() {
        let mut screen = screen();
        type_text(&mut screen, "12345");
        // "12,345" with cursor after the separator
        screen.move_cursor(TextField::move_home);
        screen.move_cursor(TextField::move_right);
        screen.move_cursor(TextField::move_right);
        screen.move_cursor(TextField::move_right);

        screen.backspace();

        assert_eq!(screen.price().text(), "12,345");
        assert_eq!(screen.price().cursor(), 3);
    }

    #[test]
    fn percent_below_minimum_is_clamped() {
        let mut screen = screen();

        screen.set_percent(3);

        assert_eq!(screen.cash_percent().value(), 15);
        assert_eq!(screen.cash_label(), "Cash: 15%");
    }

    #[test]
    fn step_percent_recalculates_cash() {
        let mut screen = screen();
        type_text(&mut screen, "1000000");

        screen.step_percent(5);

        assert_eq!(screen.cash_percent().value(), 20);
        assert_eq!(screen.breakdown().map(|b| b.cash), Some(200_000));
    }

    #[test]
    fn step_percent_stops_at_bounds() {
        let mut screen = screen();

        screen.step_percent(-50);
        assert_eq!(screen.cash_percent().value(), 15);

        screen.step_percent(500);
        assert_eq!(screen.cash_percent().value(), 100);
    }

    #[test]
    fn editing_keys_are_ignored_on_slider() {
        let mut screen = screen();
        screen.focus_prev();
        assert_eq!(screen.focus(), Focus::CashPercent);

        screen.insert_char('5');

        assert_eq!(screen.price().text(), "");
        assert_eq!(screen.mortgage().text(), "");
    }

    #[test]
    fn snapshot_captures_current_inputs() {
        let mut screen = screen();
        type_text(&mut screen, "2450000");
        screen.set_percent(25);

        assert_eq!(
            screen.snapshot(),
            SessionSnapshot {
                price: "2,450,000".to_string(),
                mortgage: String::new(),
                percent: 25,
            }
        );
    }

    #[test]
    fn restore_reseeds_fields_and_clamps_percent() {
        let mut screen = screen();

        screen.restore(&SessionSnapshot {
            price: "1,000,000".to_string(),
            mortgage: "600,000".to_string(),
            percent: 4,
        });

        assert_eq!(screen.price().text(), "1,000,000");
        assert_eq!(screen.mortgage().text(), "600,000");
        assert_eq!(screen.cash_percent().value(), 15);
        assert_eq!(screen.breakdown().map(|b| b.mortgage_fee), Some(5_375));
    }

    #[test]
    fn restore_clamps_percent_outside_slider_range() {
        let mut screen = screen();

        screen.restore(&SessionSnapshot {
            percent: 300,
            ..SessionSnapshot::default()
        });
        assert_eq!(screen.cash_percent().value(), 100);

        screen.restore(&SessionSnapshot {
            percent: -1,
            ..SessionSnapshot::default()
        });
        assert_eq!(screen.cash_percent().value(), 15);
    }

    #[test]
    fn notice_expires_after_duration() {
        let mut screen = screen();
        screen.notify("hello");
        let raised = Instant::now();

        screen.expire_notice(raised);
        assert!(screen.notice().is_some());

        screen.expire_notice(raised + NOTICE_DURATION + Duration::from_millis(10));
        assert!(screen.notice().is_none());
    }
}
