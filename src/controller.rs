use tracing::{debug, warn};

use crate::{
    CalendarConfig, CalendarDate, CalendarGrid, CommittedValue, ConstraintBundle, DateRange,
    Direction, ExternalValue, LocaleTable, RangeSelection, Selection, SelectionMode, YearMonth,
};

/// The state machine behind one calendar widget.
///
/// Every state-changing operation returns the value to hand back to the host:
/// `Some(value)` when the committed value was (re-)emitted, `None` when the
/// call was a no-op or left the committed value untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarController {
    constraints:  ConstraintBundle,
    visible:      YearMonth,
    selection:    Selection,
    /// What the host last saw from us, compared against on sync
    last_emitted: Option<ExternalValue>,
    today:        CalendarDate,
}

impl CalendarController {
    /// An empty controller showing the month of `today`.
    pub fn new(constraints: ConstraintBundle, today: CalendarDate) -> Self {
        Self {
            selection: Selection::empty(constraints.mode()),
            visible: today.year_month().clamp_to_grid(),
            last_emitted: None,
            constraints,
            today,
        }
    }

    /// Builds a controller from host configuration and loads its initial value.
    ///
    /// The second element is `Some` when the host should overwrite its copy:
    /// `Empty` for an unparseable initial value, the normalized value for one
    /// stored in a non-canonical form.
    pub fn from_config(config: &CalendarConfig, today: CalendarDate) -> (Self, Option<CommittedValue>) {
        let mut controller = Self::new(config.constraints(), today);
        let emitted = controller.initialize_from_external(config.initial_value.as_ref());
        (controller, emitted)
    }

    pub const fn constraints(&self) -> &ConstraintBundle {
        &self.constraints
    }

    pub const fn visible_month(&self) -> YearMonth {
        self.visible
    }

    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    pub const fn mode(&self) -> SelectionMode {
        self.selection.mode()
    }

    pub const fn today(&self) -> CalendarDate {
        self.today
    }

    pub const fn committed_value(&self) -> CommittedValue {
        self.selection.committed_value()
    }

    /// Moves "today" forward, e.g. when the widget outlives midnight.
    pub const fn set_today(&mut self, today: CalendarDate) {
        self.today = today;
    }

    /// Replaces the constraints. Switching between single and range mode
    /// discards the old selection and emits `Empty`.
    pub fn set_constraints(&mut self, constraints: ConstraintBundle) -> Option<CommittedValue> {
        let mode = constraints.mode();
        self.constraints = constraints;
        if mode == self.selection.mode() {
            return None;
        }
        debug!(%mode, "selection mode changed, clearing selection");
        self.selection = Selection::empty(mode);
        self.emit(CommittedValue::Empty)
    }

    pub fn can_navigate(&self, direction: Direction) -> bool {
        self.constraints.can_navigate(self.visible, direction)
    }

    /// Pages one month. Returns whether the visible month changed.
    pub fn navigate(&mut self, direction: Direction) -> bool {
        let target = direction
            .step(self.visible)
            .filter(|_| self.can_navigate(direction));
        match target {
            Some(target) => {
                debug!(from = %self.visible, to = %target, "navigated");
                self.visible = target;
                true
            },
            None => {
                debug!(%direction, visible = %self.visible, "navigation blocked");
                false
            },
        }
    }

    pub fn previous_month(&mut self) -> bool {
        self.navigate(Direction::Previous)
    }

    pub fn next_month(&mut self) -> bool {
        self.navigate(Direction::Next)
    }

    /// Lays out the visible month. Recomputed on every call.
    pub fn build_grid(&self) -> CalendarGrid {
        CalendarGrid::build(self.visible, &self.selection, &self.constraints, self.today)
    }

    /// Header text for the visible month, e.g. "June 2024"
    pub fn title(&self, locale: &LocaleTable) -> String {
        locale.month_year_label(self.visible)
    }

    /// Whether clicking `date` can change the selection.
    pub fn is_selectable(&self, date: &CalendarDate) -> bool {
        !self.constraints.is_disabled()
            && self.visible.contains(date)
            && !self.constraints.is_date_disabled(date)
    }

    pub fn handle_date_click(&mut self, date: CalendarDate) -> Option<CommittedValue> {
        if !self.is_selectable(&date) {
            debug!(%date, "ignored click on unselectable day");
            return None;
        }

        let next = match self.selection {
            Selection::Single(Some(selected)) if selected == date => {
                debug!(%date, "toggled selection off");
                Selection::Single(None)
            },
            Selection::Single(_) => Selection::Single(Some(date)),
            Selection::Range(RangeSelection::Anchored(anchor)) => {
                let range = DateRange::ordered(anchor, date);
                if self.constraints.is_valid_range(&range.start(), &range.end()) {
                    debug!(%range, "range committed");
                    Selection::Range(RangeSelection::Committed(range))
                } else {
                    debug!(%anchor, %date, "range crosses a disabled day, restarting");
                    Selection::Range(RangeSelection::Anchored(date))
                }
            },
            Selection::Range(RangeSelection::Empty | RangeSelection::Committed(_)) => {
                debug!(%date, "range anchor placed");
                Selection::Range(RangeSelection::Anchored(date))
            },
        };

        self.selection = next;
        self.emit(next.committed_value())
    }

    /// Shows today's month and, in single mode, selects today.
    ///
    /// Range selection is left alone: a lone day is not a committed range.
    pub fn go_to_today(&mut self) -> Option<CommittedValue> {
        let today = self.today;
        if self.constraints.is_disabled() || self.constraints.is_date_disabled(&today) {
            return None;
        }

        self.visible = today.year_month().clamp_to_grid();
        match self.selection {
            Selection::Single(_) => {
                self.selection = Selection::Single(Some(today));
                self.emit(CommittedValue::Single(today))
            },
            Selection::Range(_) => None,
        }
    }

    pub fn clear_selection(&mut self) -> Option<CommittedValue> {
        if self.constraints.is_disabled() {
            return None;
        }
        self.selection = Selection::empty(self.mode());
        self.emit(CommittedValue::Empty)
    }

    /// Loads a value stored by the host, showing the month it falls in.
    ///
    /// A value that cannot be parsed for the current mode clears the selection
    /// and emits `Empty`. A value that parses but is not in canonical form
    /// (legacy `"start,end"` string, reversed pair, time-of-day suffix) is
    /// emitted back normalized. Nothing is emitted otherwise.
    pub fn initialize_from_external(&mut self, value: Option<&ExternalValue>) -> Option<CommittedValue> {
        self.load_external(value, true)
    }

    /// Like [`Self::initialize_from_external`], but only when `value` differs
    /// from what this controller last produced, so echoes of our own
    /// emissions are ignored.
    pub fn sync_from_external(&mut self, value: Option<&ExternalValue>) -> Option<CommittedValue> {
        if value == self.last_emitted.as_ref() {
            return None;
        }
        debug!(?value, "external value changed, resynchronizing");
        self.load_external(value, false)
    }

    fn load_external(&mut self, value: Option<&ExternalValue>, reset_view: bool) -> Option<CommittedValue> {
        let mode = self.mode();
        match CommittedValue::from_external(value, mode) {
            Ok(committed) => {
                self.selection = Selection::from_committed(committed, mode);
                match committed.focus_date() {
                    Some(focus) => self.visible = focus.year_month().clamp_to_grid(),
                    None if reset_view => self.visible = self.today.year_month().clamp_to_grid(),
                    None => {},
                }
                if committed.to_external().as_ref() == value {
                    self.last_emitted = value.cloned();
                    return None;
                }
                debug!(%mode, "normalizing external value");
                self.emit(committed)
            },
            Err(error) => {
                warn!(%error, %mode, "discarding unparseable external value");
                self.selection = Selection::empty(mode);
                if reset_view {
                    self.visible = self.today.year_month().clamp_to_grid();
                }
                self.emit(CommittedValue::Empty)
            },
        }
    }

    fn emit(&mut self, value: CommittedValue) -> Option<CommittedValue> {
        self.last_emitted = value.to_external();
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, month, range};

    fn single() -> CalendarController {
        CalendarController::new(ConstraintBundle::new(), date(2024, 6, 12))
    }

    fn ranged(constraints: ConstraintBundle) -> CalendarController {
        CalendarController::new(constraints.with_range_mode(true), date(2024, 6, 12))
    }

    #[test]
    fn test_new_shows_todays_month() {
        let controller = single();
        assert_eq!(controller.visible_month(), month(2024, 6));
        assert_eq!(controller.committed_value(), CommittedValue::Empty);
        assert_eq!(controller.mode(), SelectionMode::Single);
    }

    #[test]
    fn test_single_click_selects_and_toggles_off() {
        let mut controller = single();

        let emitted = controller.handle_date_click(date(2024, 6, 5));
        assert_eq!(emitted, Some(CommittedValue::Single(date(2024, 6, 5))));

        let emitted = controller.handle_date_click(date(2024, 6, 7));
        assert_eq!(emitted, Some(CommittedValue::Single(date(2024, 6, 7))));

        let emitted = controller.handle_date_click(date(2024, 6, 7));
        assert_eq!(emitted, Some(CommittedValue::Empty));
        assert_eq!(controller.selection(), &Selection::Single(None));
    }

    #[test]
    fn test_clicks_outside_visible_month_are_ignored() {
        let mut controller = single();
        assert_eq!(controller.handle_date_click(date(2024, 5, 31)), None);
        assert_eq!(controller.handle_date_click(date(2024, 7, 1)), None);
        assert!(controller.selection().is_empty());
    }

    #[test]
    fn test_clicks_on_disabled_widget_are_ignored() {
        let mut controller =
            CalendarController::new(ConstraintBundle::new().with_disabled(true), date(2024, 6, 12));
        assert_eq!(controller.handle_date_click(date(2024, 6, 5)), None);
        assert_eq!(controller.clear_selection(), None);
        assert_eq!(controller.go_to_today(), None);
        assert!(!controller.next_month());
    }

    #[test]
    fn test_range_click_cycle() {
        let mut controller = ranged(ConstraintBundle::new());

        assert_eq!(controller.handle_date_click(date(2024, 6, 20)), Some(CommittedValue::Empty));
        assert_eq!(controller.selection().pending_anchor(), Some(date(2024, 6, 20)));

        assert_eq!(
            controller.handle_date_click(date(2024, 6, 10)),
            Some(CommittedValue::Range(range((2024, 6, 10), (2024, 6, 20))))
        );

        // a third click starts over
        assert_eq!(controller.handle_date_click(date(2024, 6, 25)), Some(CommittedValue::Empty));
        assert_eq!(
            controller.selection(),
            &Selection::Range(RangeSelection::Anchored(date(2024, 6, 25)))
        );
    }

    #[test]
    fn test_range_same_day_twice_commits_single_day_range() {
        let mut controller = ranged(ConstraintBundle::new());
        controller.handle_date_click(date(2024, 6, 5));
        assert_eq!(
            controller.handle_date_click(date(2024, 6, 5)),
            Some(CommittedValue::Range(range((2024, 6, 5), (2024, 6, 5))))
        );
    }

    #[test]
    fn test_invalid_second_click_restarts() {
        let mut controller = ranged(ConstraintBundle::new().with_disabled_dates([date(2024, 6, 4)]));

        assert_eq!(controller.handle_date_click(date(2024, 6, 5)), Some(CommittedValue::Empty));
        assert_eq!(controller.handle_date_click(date(2024, 6, 3)), Some(CommittedValue::Empty));
        assert_eq!(controller.selection().pending_anchor(), Some(date(2024, 6, 3)));
    }

    #[test]
    fn test_range_across_months() {
        let mut controller = ranged(ConstraintBundle::new());
        controller.handle_date_click(date(2024, 6, 28));
        assert!(controller.next_month());
        assert_eq!(
            controller.handle_date_click(date(2024, 7, 3)),
            Some(CommittedValue::Range(range((2024, 6, 28), (2024, 7, 3))))
        );
    }

    #[test]
    fn test_navigation_respects_bounds() {
        let constraints = ConstraintBundle::new()
            .with_min_date(Some(date(2024, 5, 20)))
            .with_max_date(Some(date(2024, 7, 1)));
        let mut controller = CalendarController::new(constraints, date(2024, 6, 12));

        assert!(controller.previous_month());
        assert_eq!(controller.visible_month(), month(2024, 5));
        assert!(!controller.previous_month());
        assert_eq!(controller.visible_month(), month(2024, 5));

        assert!(controller.next_month());
        assert!(controller.next_month());
        assert_eq!(controller.visible_month(), month(2024, 7));
        assert!(!controller.next_month());
        assert!(!controller.can_navigate(Direction::Next));
    }

    #[test]
    fn test_go_to_today_single_mode() {
        let mut controller = single();
        controller.next_month();
        controller.next_month();

        assert_eq!(controller.go_to_today(), Some(CommittedValue::Single(date(2024, 6, 12))));
        assert_eq!(controller.visible_month(), month(2024, 6));
    }

    #[test]
    fn test_go_to_today_range_mode_only_navigates() {
        let mut controller = ranged(ConstraintBundle::new());
        controller.handle_date_click(date(2024, 6, 3));
        controller.handle_date_click(date(2024, 6, 5));
        controller.next_month();

        assert_eq!(controller.go_to_today(), None);
        assert_eq!(controller.visible_month(), month(2024, 6));
        assert_eq!(controller.committed_value(), CommittedValue::Range(range((2024, 6, 3), (2024, 6, 5))));
    }

    #[test]
    fn test_go_to_today_blocked_when_today_disabled() {
        let constraints = ConstraintBundle::new().with_max_date(Some(date(2024, 6, 1)));
        let mut controller = CalendarController::new(constraints, date(2024, 6, 12));
        controller.previous_month();

        assert_eq!(controller.go_to_today(), None);
        assert_eq!(controller.visible_month(), month(2024, 5));
    }

    #[test]
    fn test_clear_selection_is_idempotent() {
        let mut controller = ranged(ConstraintBundle::new());
        controller.handle_date_click(date(2024, 6, 3));

        assert_eq!(controller.clear_selection(), Some(CommittedValue::Empty));
        let once = controller.clone();
        assert_eq!(controller.clear_selection(), Some(CommittedValue::Empty));
        assert_eq!(controller, once);
        assert_eq!(controller.selection(), &Selection::Range(RangeSelection::Empty));
    }

    #[test]
    fn test_initialize_moves_to_value_month() {
        let mut controller = single();
        let value = ExternalValue::from("2023-11-30");
        assert_eq!(controller.initialize_from_external(Some(&value)), None);
        assert_eq!(controller.visible_month(), month(2023, 11));
        assert_eq!(controller.committed_value(), CommittedValue::Single(date(2023, 11, 30)));
    }

    #[test]
    fn test_initialize_self_heals_on_garbage() {
        let mut controller = ranged(ConstraintBundle::new());
        controller.handle_date_click(date(2024, 6, 3));
        controller.next_month();

        let garbage = ExternalValue::from(["2024-06-03", "yesterday"]);
        assert_eq!(controller.initialize_from_external(Some(&garbage)), Some(CommittedValue::Empty));
        assert_eq!(controller.selection(), &Selection::Range(RangeSelection::Empty));
        assert_eq!(controller.visible_month(), month(2024, 6));
    }

    #[test]
    fn test_initialize_round_trip() {
        let mut producer = ranged(ConstraintBundle::new());
        producer.handle_date_click(date(2024, 6, 20));
        let produced = producer
            .handle_date_click(date(2024, 6, 10))
            .expect("second click commits");

        let mut consumer = ranged(ConstraintBundle::new());
        consumer.initialize_from_external(produced.to_external().as_ref());
        assert_eq!(consumer.committed_value(), produced);
    }

    #[test]
    fn test_sync_ignores_own_echo() {
        let mut controller = single();
        let emitted = controller
            .handle_date_click(date(2024, 6, 5))
            .expect("click emits");
        controller.next_month();

        // the host writes our own value back
        assert_eq!(controller.sync_from_external(emitted.to_external().as_ref()), None);
        assert_eq!(controller.visible_month(), month(2024, 7), "echo must not move the view");
    }

    #[test]
    fn test_sync_applies_foreign_change() {
        let mut controller = single();
        controller.handle_date_click(date(2024, 6, 5));

        let changed = ExternalValue::from("2024-09-01");
        assert_eq!(controller.sync_from_external(Some(&changed)), None);
        assert_eq!(controller.committed_value(), CommittedValue::Single(date(2024, 9, 1)));
        assert_eq!(controller.visible_month(), month(2024, 9));

        // the same value again is now known and ignored
        controller.handle_date_click(date(2024, 9, 2));
        assert_eq!(controller.sync_from_external(Some(&ExternalValue::from("2024-09-02"))), None);
        assert_eq!(controller.committed_value(), CommittedValue::Single(date(2024, 9, 2)));
    }

    #[test]
    fn test_initialize_writes_back_normalized_value() {
        struct TestCase {
            mode:        SelectionMode,
            value:       ExternalValue,
            expected:    CommittedValue,
            description: &'static str,
        }

        let cases = [
            TestCase {
                mode:        SelectionMode::Range,
                value:       ExternalValue::from("2024-07-20,2024-07-02"),
                expected:    CommittedValue::Range(range((2024, 7, 2), (2024, 7, 20))),
                description: "legacy comma string",
            },
            TestCase {
                mode:        SelectionMode::Range,
                value:       ExternalValue::from(["2024-07-20", "2024-07-02"]),
                expected:    CommittedValue::Range(range((2024, 7, 2), (2024, 7, 20))),
                description: "reversed pair",
            },
            TestCase {
                mode:        SelectionMode::Single,
                value:       ExternalValue::from("2024-07-20T10:00:00Z"),
                expected:    CommittedValue::Single(date(2024, 7, 20)),
                description: "datetime suffix",
            },
        ];

        for case in &cases {
            let constraints = ConstraintBundle::new().with_range_mode(case.mode == SelectionMode::Range);
            let mut controller = CalendarController::new(constraints, date(2024, 6, 12));

            let emitted = controller.initialize_from_external(Some(&case.value));
            assert_eq!(emitted, Some(case.expected), "{}", case.description);
            assert_eq!(controller.committed_value(), case.expected, "{}", case.description);
            assert_eq!(controller.visible_month(), month(2024, 7), "{}", case.description);

            // the host stores the normalized value and writes it back
            let echo = case.expected.to_external();
            assert_eq!(controller.sync_from_external(echo.as_ref()), None, "{}", case.description);
        }
    }

    #[test]
    fn test_initialize_canonical_value_emits_nothing() {
        let mut controller = ranged(ConstraintBundle::new());
        let value = ExternalValue::from(["2024-07-02", "2024-07-20"]);
        assert_eq!(controller.initialize_from_external(Some(&value)), None);
        assert_eq!(controller.sync_from_external(Some(&value)), None);
    }

    #[test]
    fn test_sync_clears_on_garbage_and_keeps_view() {
        let mut controller = ranged(ConstraintBundle::new());
        controller.handle_date_click(date(2024, 6, 3));
        controller.handle_date_click(date(2024, 6, 5));
        controller.next_month();

        let garbage = ExternalValue::from(["2024-06-03", "nope"]);
        assert_eq!(controller.sync_from_external(Some(&garbage)), Some(CommittedValue::Empty));
        assert_eq!(controller.selection(), &Selection::Range(RangeSelection::Empty));
        assert_eq!(controller.visible_month(), month(2024, 7));

        // the host stores null and echoes it back
        assert_eq!(controller.sync_from_external(None), None);
        assert!(controller.selection().is_empty());
        assert_eq!(controller.visible_month(), month(2024, 7));
    }

    #[test]
    fn test_sync_to_null_keeps_view() {
        let mut controller = single();
        controller.handle_date_click(date(2024, 6, 5));
        controller.next_month();

        assert_eq!(controller.sync_from_external(None), None);
        assert!(controller.selection().is_empty());
        assert_eq!(controller.visible_month(), month(2024, 7));
    }

    #[test]
    fn test_switching_mode_clears_selection() {
        let mut controller = single();
        controller.handle_date_click(date(2024, 6, 5));

        let emitted = controller.set_constraints(ConstraintBundle::new().with_range_mode(true));
        assert_eq!(emitted, Some(CommittedValue::Empty));
        assert_eq!(controller.selection(), &Selection::Range(RangeSelection::Empty));

        // same mode keeps the selection
        controller.handle_date_click(date(2024, 6, 5));
        let emitted = controller.set_constraints(
            ConstraintBundle::new()
                .with_range_mode(true)
                .with_max_date(Some(date(2024, 12, 31))),
        );
        assert_eq!(emitted, None);
        assert_eq!(controller.selection().pending_anchor(), Some(date(2024, 6, 5)));
    }

    #[test]
    fn test_grid_reflects_latest_state() {
        let mut controller = single();
        controller.handle_date_click(date(2024, 6, 5));

        let grid = controller.build_grid();
        assert_eq!(grid.month(), month(2024, 6));
        assert!(grid.cell(&date(2024, 6, 5)).is_some_and(|cell| cell.is_selected));
        assert!(grid.cell(&date(2024, 6, 12)).is_some_and(|cell| cell.is_today));

        controller.set_constraints(ConstraintBundle::new().with_disabled_dates([date(2024, 6, 6)]));
        let grid = controller.build_grid();
        assert!(grid.cell(&date(2024, 6, 6)).is_some_and(|cell| cell.is_disabled));
    }

    #[test]
    fn test_title_uses_locale_table() {
        let controller = single();
        assert_eq!(controller.title(&LocaleTable::english()), "June 2024");
    }
}
