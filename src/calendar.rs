//! Month grid and the outfit-per-day view.
//!
//! Outfits are placed on the day they were created. A day with several
//! outfits shows the first one in store order, which is newest first.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, TimeZone, Utc, Weekday};

use crate::models::Outfit;

pub const NO_OUTFIT_TODAY: &str = "No outfit planned for today";
pub const NO_OUTFIT_FOR_DAY: &str = "No outfit for this day";

/// Calendar day of `ts` as seen in `tz`
pub fn local_day<Tz: TimeZone>(ts: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    ts.with_timezone(tz).date_naive()
}

/// First outfit in `outfits` (expected newest first) created on `date`
pub fn outfit_for_date<'a, Tz: TimeZone>(
    outfits: &'a [Outfit],
    date: NaiveDate,
    tz: &Tz,
) -> Option<&'a Outfit> {
    outfits
        .iter()
        .find(|outfit| local_day(&outfit.date_created, tz) == date)
}

pub fn has_outfit_for_date<Tz: TimeZone>(outfits: &[Outfit], date: NaiveDate, tz: &Tz) -> bool {
    outfits
        .iter()
        .any(|outfit| local_day(&outfit.date_created, tz) == date)
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

/// Single-letter weekday headers starting at `first_weekday`
pub fn weekday_labels(first_weekday: Weekday) -> Vec<&'static str> {
    let mut day = first_weekday;
    (0..7)
        .map(|_| {
            let label = match day {
                Weekday::Mon => "M",
                Weekday::Tue | Weekday::Thu => "T",
                Weekday::Wed => "W",
                Weekday::Fri => "F",
                Weekday::Sat | Weekday::Sun => "S",
            };
            day = day.succ();
            label
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub is_today: bool,
    pub is_selected: bool,
    pub has_outfit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarState {
    displayed_month: NaiveDate, // always the first of a month
    selected: Option<NaiveDate>,
    cursor: NaiveDate,
}

impl CalendarState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            displayed_month: first_of_month(today),
            selected: None,
            cursor: today,
        }
    }

    pub fn displayed_month(&self) -> NaiveDate {
        self.displayed_month
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    fn show_month(&mut self, month: NaiveDate) {
        self.displayed_month = month;
        self.selected = None;
        self.cursor = month;
    }

    /// Show the following month and drop the selection
    pub fn next_month(&mut self) {
        if let Some(month) = self.displayed_month.checked_add_months(Months::new(1)) {
            self.show_month(month);
        }
    }

    /// Show the preceding month and drop the selection
    pub fn previous_month(&mut self) {
        if let Some(month) = self.displayed_month.checked_sub_months(Months::new(1)) {
            self.show_month(month);
        }
    }

    /// Select a day, or clear the selection if it was already selected
    pub fn select_day(&mut self, date: NaiveDate) {
        self.selected = if self.selected == Some(date) {
            None
        } else {
            Some(date)
        };
        self.cursor = date;
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Move the cursor by `days`, staying inside the displayed month
    pub fn move_cursor(&mut self, days: i64) {
        let days_in_month = self.days_in_month();
        let (Some(first), Some(last)) = (days_in_month.first(), days_in_month.last()) else {
            return;
        };
        let target = if days >= 0 {
            self.cursor.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            self.cursor.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        if let Some(target) = target {
            self.cursor = target.clamp(*first, *last);
        }
    }

    /// Day shown in the detail section: the selection, or today
    pub fn focus_date(&self, today: NaiveDate) -> NaiveDate {
        self.selected.unwrap_or(today)
    }

    /// e.g. "October 2026"
    pub fn month_title(&self) -> String {
        self.displayed_month.format("%B %Y").to_string()
    }

    pub fn days_in_month(&self) -> Vec<NaiveDate> {
        let month = self.displayed_month.month();
        self.displayed_month
            .iter_days()
            .take_while(|day| day.month() == month)
            .collect()
    }

    /// Empty cells before day 1 in a grid whose weeks start on `first_weekday`
    pub fn leading_blanks(&self, first_weekday: Weekday) -> usize {
        let first = self.displayed_month.weekday().num_days_from_sunday();
        let start = first_weekday.num_days_from_sunday();
        ((first + 7 - start) % 7) as usize
    }

    pub fn day_cells<Tz: TimeZone>(
        &self,
        outfits: &[Outfit],
        today: NaiveDate,
        tz: &Tz,
    ) -> Vec<DayCell> {
        self.days_in_month()
            .into_iter()
            .map(|date| DayCell {
                date,
                is_today: date == today,
                is_selected: self.selected == Some(date),
                has_outfit: has_outfit_for_date(outfits, date, tz),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Occasion;
    use chrono::FixedOffset;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn outfit(name: &str, created: DateTime<Utc>) -> Outfit {
        let mut outfit = Outfit::new(name.to_string(), Vec::new(), Occasion::Casual);
        outfit.date_created = created;
        outfit
    }

    fn newest_first(mut outfits: Vec<Outfit>) -> Vec<Outfit> {
        outfits.sort_by(|a, b| b.date_created.cmp(&a.date_created));
        outfits
    }

    #[test]
    fn same_day_outfits_resolve_to_the_latest() {
        let outfits = newest_first(vec![
            outfit("morning", Utc.with_ymd_and_hms(2026, 10, 18, 8, 0, 0).unwrap()),
            outfit("evening", Utc.with_ymd_and_hms(2026, 10, 18, 19, 30, 0).unwrap()),
            outfit("yesterday", Utc.with_ymd_and_hms(2026, 10, 17, 23, 59, 0).unwrap()),
        ]);

        let found = outfit_for_date(&outfits, date(2026, 10, 18), &Utc).unwrap();
        assert_eq!(found.name, "evening");
        assert_eq!(
            outfit_for_date(&outfits, date(2026, 10, 17), &Utc).unwrap().name,
            "yesterday"
        );
        assert!(outfit_for_date(&outfits, date(2026, 10, 16), &Utc).is_none());
        assert!(has_outfit_for_date(&outfits, date(2026, 10, 18), &Utc));
        assert!(!has_outfit_for_date(&outfits, date(2026, 10, 19), &Utc));
    }

    #[test]
    fn day_matching_follows_the_time_zone() {
        let created = Utc.with_ymd_and_hms(2026, 10, 18, 23, 0, 0).unwrap();
        let outfits = vec![outfit("late", created)];
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        assert!(has_outfit_for_date(&outfits, date(2026, 10, 18), &Utc));
        assert!(has_outfit_for_date(&outfits, date(2026, 10, 19), &tokyo));
        assert!(!has_outfit_for_date(&outfits, date(2026, 10, 18), &tokyo));
    }

    #[test]
    fn month_navigation_moves_exactly_one_month() {
        let mut state = CalendarState::new(date(2026, 12, 31));
        assert_eq!(state.displayed_month(), date(2026, 12, 1));

        state.next_month();
        assert_eq!(state.displayed_month(), date(2027, 1, 1));
        assert_eq!(state.month_title(), "January 2027");

        state.previous_month();
        state.previous_month();
        assert_eq!(state.displayed_month(), date(2026, 11, 1));
    }

    #[test]
    fn selection_toggles_and_clears_on_navigation() {
        let today = date(2026, 10, 18);
        let mut state = CalendarState::new(today);
        assert_eq!(state.focus_date(today), today);

        state.select_day(date(2026, 10, 3));
        assert_eq!(state.selected(), Some(date(2026, 10, 3)));
        assert_eq!(state.focus_date(today), date(2026, 10, 3));

        state.select_day(date(2026, 10, 3));
        assert_eq!(state.selected(), None);
        assert_eq!(state.focus_date(today), today);

        state.select_day(date(2026, 10, 5));
        state.next_month();
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn grid_shape_matches_the_month() {
        // October 1st 2026 is a Thursday
        let state = CalendarState::new(date(2026, 10, 18));
        assert_eq!(state.days_in_month().len(), 31);
        assert_eq!(state.leading_blanks(Weekday::Sun), 4);
        assert_eq!(state.leading_blanks(Weekday::Mon), 3);

        let february = CalendarState::new(date(2028, 2, 10));
        assert_eq!(february.days_in_month().len(), 29);

        assert_eq!(weekday_labels(Weekday::Sun), vec!["S", "M", "T", "W", "T", "F", "S"]);
        assert_eq!(weekday_labels(Weekday::Mon)[0], "M");
    }

    #[test]
    fn day_cells_flag_today_selection_and_outfits() {
        let today = date(2026, 10, 18);
        let outfits = vec![outfit("x", Utc.with_ymd_and_hms(2026, 10, 2, 12, 0, 0).unwrap())];
        let mut state = CalendarState::new(today);
        state.select_day(date(2026, 10, 20));

        let cells = state.day_cells(&outfits, today, &Utc);
        assert_eq!(cells.len(), 31);
        assert!(cells[1].has_outfit);
        assert!(cells[17].is_today);
        assert!(cells[19].is_selected);
        assert_eq!(cells.iter().filter(|c| c.has_outfit).count(), 1);
    }

    #[test]
    fn cursor_stays_inside_the_month() {
        let mut state = CalendarState::new(date(2026, 10, 30));
        state.move_cursor(7);
        assert_eq!(state.cursor(), date(2026, 10, 31));
        state.move_cursor(-40);
        assert_eq!(state.cursor(), date(2026, 10, 1));
        state.next_month();
        assert_eq!(state.cursor(), date(2026, 11, 1));
    }
}
