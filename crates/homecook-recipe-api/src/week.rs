use chrono::{Days, NaiveDate, Weekday};

use crate::model::Plan;

/// The Monday of the ISO week containing `day`. Sunday counts as day 7 of
/// the week that started the previous Monday.
pub fn week_start(day: NaiveDate) -> NaiveDate {
    day.week(Weekday::Mon).first_day()
}

/// A Monday-anchored 7-day planner window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    start: NaiveDate,
}

impl WeekWindow {
    pub fn of(anchor: NaiveDate) -> Self {
        Self {
            start: week_start(anchor),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the window, inclusive.
    pub fn end(&self) -> NaiveDate {
        self.start
            .checked_add_days(Days::new(6))
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end()
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take(7)
    }

    pub fn next(self) -> Self {
        match self.start.checked_add_days(Days::new(7)) {
            Some(start) => Self { start },
            None => self,
        }
    }

    pub fn prev(self) -> Self {
        match self.start.checked_sub_days(Days::new(7)) {
            Some(start) => Self { start },
            None => self,
        }
    }

    fn day_offset(&self, day: NaiveDate) -> Option<usize> {
        let offset = day.signed_duration_since(self.start).num_days();
        (0..7).contains(&offset).then_some(offset as usize)
    }
}

/// Distribute fetched plan entries into the window's seven day buckets by
/// exact calendar-date match, keeping the backend's order inside a day.
pub fn bucket_by_day(window: WeekWindow, plans: Vec<Plan>) -> [Vec<Plan>; 7] {
    let mut buckets: [Vec<Plan>; 7] = Default::default();
    for plan in plans {
        match window.day_offset(plan.date) {
            Some(i) => buckets[i].push(plan),
            None => tracing::warn!(
                "skipping plan {} for {}, outside the requested week",
                plan.id,
                plan.date
            ),
        }
    }
    buckets
}

#[cfg(test)]
mod tests {
    use chrono::Datelike;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn plan(id: i64, day: NaiveDate) -> Plan {
        Plan {
            id,
            date: day,
            slot: "dinner".into(),
            recipe_id: 1,
            is_completed: false,
            recipe: None,
        }
    }

    #[test]
    fn week_start_is_always_a_monday_containing_the_anchor() {
        let mut day = date(2024, 1, 1);
        for _ in 0..100 {
            let start = week_start(day);
            assert_eq!(start.weekday(), Weekday::Mon);
            assert!(start <= day);
            assert!(day <= start + Days::new(6));
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn wednesday_anchor_yields_the_surrounding_week() {
        let window = WeekWindow::of(date(2024, 6, 12));
        assert_eq!(window.start(), date(2024, 6, 10));
        assert_eq!(window.end(), date(2024, 6, 16));
    }

    #[test]
    fn sunday_belongs_to_the_previous_monday() {
        assert_eq!(week_start(date(2024, 6, 16)), date(2024, 6, 10));
        assert_eq!(week_start(date(2024, 6, 17)), date(2024, 6, 17));
    }

    #[test]
    fn navigation_round_trips() {
        let window = WeekWindow::of(date(2024, 6, 12));
        assert_eq!(window.next().prev(), window);
        assert_eq!(window.next().start(), date(2024, 6, 17));
        assert_eq!(window.prev().start(), date(2024, 6, 3));
    }

    #[test]
    fn days_are_seven_and_consecutive() {
        let window = WeekWindow::of(date(2024, 6, 12));
        let days: Vec<_> = window.days().collect();
        assert_eq!(days.len(), 7);
        for pair in days.windows(2) {
            assert_eq!(pair[0].succ_opt().unwrap(), pair[1]);
        }
    }

    #[test]
    fn bucketing_matches_exact_dates() {
        let window = WeekWindow::of(date(2024, 6, 12));
        let buckets = bucket_by_day(
            window,
            vec![
                plan(1, date(2024, 6, 10)),
                plan(2, date(2024, 6, 16)),
                plan(3, date(2024, 6, 10)),
                plan(4, date(2024, 6, 9)),
                plan(5, date(2024, 6, 17)),
            ],
        );

        // order inside a day follows the backend response
        assert_eq!(
            buckets[0].iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![1, 3]
        );
        assert_eq!(buckets[6].len(), 1);
        // days without entries stay empty, out-of-window entries vanish
        for bucket in &buckets[1..6] {
            assert!(bucket.is_empty());
        }
    }

    #[test]
    fn window_contains_only_its_own_days() {
        let window = WeekWindow::of(date(2024, 6, 12));
        assert!(window.contains(date(2024, 6, 10)));
        assert!(window.contains(date(2024, 6, 16)));
        assert!(!window.contains(date(2024, 6, 9)));
        assert!(!window.contains(date(2024, 6, 17)));
    }
}
