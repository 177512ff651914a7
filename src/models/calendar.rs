use super::appointment::Appointment;
use super::client::Client;
use super::service::Service;
use super::staff::Staff;
use crate::config::Config;
use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::rc::Rc;
use yew::functional::Reducible;

/// Hour rows of the week grid (8:00 through 19:00).
pub const GRID_HOURS: RangeInclusive<u32> =
    Config::CALENDAR_FIRST_HOUR..=Config::CALENDAR_FIRST_HOUR + Config::CALENDAR_HOUR_ROWS - 1;

/// The Sunday that starts the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_sunday()))
}

/// Grid cell an appointment belongs to: its local start date and the hour
/// of its start, minutes truncated. Duration plays no part.
pub fn cell_key<Tz: TimeZone>(start: &DateTime<Utc>, tz: &Tz) -> (NaiveDate, u32) {
    let local = start.with_timezone(tz);
    (local.date_naive(), local.hour())
}

/// Sunday-starting week around an anchor date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekView {
    anchor: NaiveDate,
}

impl WeekView {
    pub const fn new(anchor: NaiveDate) -> Self {
        Self { anchor }
    }

    pub const fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn start(&self) -> NaiveDate {
        week_start(self.anchor)
    }

    /// Always seven days, Sunday first.
    pub fn days(&self) -> [NaiveDate; 7] {
        let start = self.start();
        std::array::from_fn(|i| start + Days::new(i as u64))
    }

    /// Shifts the anchor by `direction` weeks.
    pub fn navigate(&self, direction: i32) -> Self {
        let days = Days::new(7 * u64::from(direction.unsigned_abs()));
        let anchor = if direction >= 0 {
            self.anchor.checked_add_days(days)
        } else {
            self.anchor.checked_sub_days(days)
        };
        Self::new(anchor.unwrap_or(self.anchor))
    }

    /// `[start, end)` of the week as instants: local midnight of Sunday to
    /// local midnight of the following Sunday.
    pub fn bounds<Tz: TimeZone>(&self, tz: &Tz) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = self.start();
        let end = start + Days::new(7);
        (local_midnight(start, tz), local_midnight(end, tz))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        let start = self.start();
        date >= start && date < start + Days::new(7)
    }
}

fn local_midnight<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&naive)
        .earliest()
        .map_or_else(|| naive.and_utc(), |dt| dt.with_timezone(&Utc))
}

/// Appointments bucketed by (date, hour) cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeekGrid {
    cells: BTreeMap<(NaiveDate, u32), Vec<Appointment>>,
}

impl WeekGrid {
    pub fn build<Tz: TimeZone>(view: &WeekView, appointments: &[Appointment], tz: &Tz) -> Self {
        let mut cells: BTreeMap<(NaiveDate, u32), Vec<Appointment>> = BTreeMap::new();

        for apt in appointments {
            let key = cell_key(&apt.start_time, tz);
            if view.contains(key.0) && GRID_HOURS.contains(&key.1) {
                cells.entry(key).or_default().push(apt.clone());
            }
        }

        Self { cells }
    }

    pub fn cell(&self, date: NaiveDate, hour: u32) -> &[Appointment] {
        self.cells.get(&(date, hour)).map_or(&[], Vec::as_slice)
    }

    pub fn is_empty_cell(&self, date: NaiveDate, hour: u32) -> bool {
        self.cell(date, hour).is_empty()
    }

    pub fn placed(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }
}

/// Identifies one fetch cycle of the calendar view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarLoad {
    pub week: WeekView,
    pub generation: u64,
}

/// Results of the four concurrent calendar fetches. `Err` carries the
/// message of an endpoint that failed; the others still apply.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarData {
    pub appointments: Result<Vec<Appointment>, String>,
    pub clients: Result<Vec<Client>, String>,
    pub services: Result<Vec<Service>, String>,
    pub staff: Result<Vec<Staff>, String>,
}

pub enum CalendarAction {
    /// Shift the anchor by ±weeks
    Navigate(i32),
    /// Reset the anchor to the given current date
    Today(NaiveDate),
    /// Reload the current week after a mutation
    Refresh,
    Loaded { load: CalendarLoad, data: CalendarData },
}

/// State of the calendar scheduling view.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarState {
    view: WeekView,
    generation: u64,
    loading: bool,
    pub appointments: Vec<Appointment>,
    pub clients: Vec<Client>,
    pub services: Vec<Service>,
    pub staff: Vec<Staff>,
    pub errors: Vec<String>,
}

impl CalendarState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            view: WeekView::new(today),
            generation: 0,
            loading: true,
            appointments: Vec::new(),
            clients: Vec::new(),
            services: Vec::new(),
            staff: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub const fn view(&self) -> &WeekView {
        &self.view
    }

    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// The fetch cycle the view currently wants results for.
    pub const fn current_load(&self) -> CalendarLoad {
        CalendarLoad {
            week: self.view,
            generation: self.generation,
        }
    }

    pub fn navigate(&mut self, direction: i32) {
        self.view = self.view.navigate(direction);
        self.begin_load();
    }

    pub fn go_to(&mut self, date: NaiveDate) {
        self.view = WeekView::new(date);
        self.begin_load();
    }

    pub fn refresh(&mut self) {
        self.begin_load();
    }

    fn begin_load(&mut self) {
        self.generation += 1;
        self.loading = true;
    }

    /// Applies a finished fetch cycle. Results from a superseded cycle are
    /// dropped; returns whether anything was applied.
    pub fn apply(&mut self, load: CalendarLoad, data: CalendarData) -> bool {
        if load != self.current_load() {
            return false;
        }

        self.loading = false;
        self.errors.clear();

        // A failed appointment fetch must not leave another week's entries on screen
        match data.appointments {
            Ok(appointments) => self.appointments = appointments,
            Err(e) => {
                self.appointments.clear();
                self.errors.push(e);
            }
        }
        match data.clients {
            Ok(clients) => self.clients = clients,
            Err(e) => self.errors.push(e),
        }
        match data.services {
            Ok(services) => self.services = services,
            Err(e) => self.errors.push(e),
        }
        match data.staff {
            Ok(staff) => self.staff = staff,
            Err(e) => self.errors.push(e),
        }

        true
    }

    pub fn grid<Tz: TimeZone>(&self, tz: &Tz) -> WeekGrid {
        WeekGrid::build(&self.view, &self.appointments, tz)
    }

    pub fn service_name(&self, service_id: &str) -> &str {
        self.services
            .iter()
            .find(|s| s.service_id == service_id)
            .map_or("Service", |s| s.name.as_str())
    }

    pub fn client_name(&self, client_id: &str) -> &str {
        super::client::client_name(&self.clients, client_id, "Unknown")
    }
}

impl Reducible for CalendarState {
    type Action = CalendarAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            CalendarAction::Navigate(direction) => next.navigate(direction),
            CalendarAction::Today(date) => next.go_to(date),
            CalendarAction::Refresh => next.refresh(),
            CalendarAction::Loaded { load, data } => {
                if !next.apply(load, data) {
                    return self;
                }
            }
        }
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::appointment::AppointmentStatus;
    use chrono::{FixedOffset, Weekday};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn apt(id: &str, start: DateTime<Utc>) -> Appointment {
        Appointment {
            appointment_id: id.into(),
            client_id: "c".into(),
            service_id: "s".into(),
            staff_id: "st".into(),
            start_time: start,
            end_time: None,
            status: AppointmentStatus::Scheduled,
            notes: None,
        }
    }

    fn data(appointments: Result<Vec<Appointment>, String>) -> CalendarData {
        CalendarData {
            appointments,
            clients: Ok(vec![]),
            services: Ok(vec![]),
            staff: Ok(vec![]),
        }
    }

    #[test]
    fn test_week_start_is_sunday() {
        assert_eq!(week_start(ymd(2024, 3, 14)), ymd(2024, 3, 10));
        assert_eq!(week_start(ymd(2024, 3, 10)), ymd(2024, 3, 10));
        assert_eq!(week_start(ymd(2024, 3, 16)), ymd(2024, 3, 10));
        // Crossing a month boundary
        assert_eq!(week_start(ymd(2024, 3, 2)), ymd(2024, 2, 25));
    }

    #[test]
    fn test_days_always_seven_from_sunday() {
        for offset in 0..14 {
            let anchor = ymd(2024, 3, 1) + Days::new(offset);
            let days = WeekView::new(anchor).days();
            assert_eq!(days[0].weekday(), Weekday::Sun);
            assert_eq!(days[6].weekday(), Weekday::Sat);
            assert!(days.contains(&anchor));
        }
    }

    #[test]
    fn test_grid_hours() {
        assert_eq!(GRID_HOURS.clone().count(), 12);
        assert_eq!(*GRID_HOURS.start(), 8);
        assert_eq!(*GRID_HOURS.end(), 19);
    }

    #[test]
    fn test_navigate_shifts_by_weeks() {
        let view = WeekView::new(ymd(2024, 3, 14));
        assert_eq!(view.navigate(1).anchor(), ymd(2024, 3, 21));
        assert_eq!(view.navigate(-1).anchor(), ymd(2024, 3, 7));
        assert_eq!(view.navigate(-1).start(), ymd(2024, 3, 3));
    }

    #[test]
    fn test_bounds_follow_local_midnight() {
        let brt = FixedOffset::west_opt(3 * 3600).unwrap();
        let (start, end) = WeekView::new(ymd(2024, 3, 14)).bounds(&brt);
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 3, 10, 3, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 3, 17, 3, 0, 0).unwrap());
    }

    #[test]
    fn test_appointment_lands_in_exactly_one_cell() {
        let view = WeekView::new(ymd(2024, 3, 14));
        let a = apt("a", Utc.with_ymd_and_hms(2024, 3, 14, 10, 45, 0).unwrap());
        let grid = WeekGrid::build(&view, std::slice::from_ref(&a), &Utc);

        let hits: Vec<_> = view
            .days()
            .iter()
            .flat_map(|d| GRID_HOURS.map(move |h| (*d, h)))
            .filter(|(d, h)| !grid.is_empty_cell(*d, *h))
            .collect();
        assert_eq!(hits, vec![(ymd(2024, 3, 14), 10)]);
        assert_eq!(grid.placed(), 1);
    }

    #[test]
    fn test_cell_uses_local_time() {
        let brt = FixedOffset::west_opt(3 * 3600).unwrap();
        let start = Utc.with_ymd_and_hms(2024, 3, 14, 1, 30, 0).unwrap();
        assert_eq!(cell_key(&start, &brt), (ymd(2024, 3, 13), 22));
    }

    #[test]
    fn test_outside_grid_hours_or_week_is_not_placed() {
        let view = WeekView::new(ymd(2024, 3, 14));
        let early = apt("early", Utc.with_ymd_and_hms(2024, 3, 14, 7, 0, 0).unwrap());
        let late = apt("late", Utc.with_ymd_and_hms(2024, 3, 14, 20, 0, 0).unwrap());
        let next_week = apt("next", Utc.with_ymd_and_hms(2024, 3, 18, 10, 0, 0).unwrap());
        let grid = WeekGrid::build(&view, &[early, late, next_week], &Utc);
        assert_eq!(grid.placed(), 0);
    }

    #[test]
    fn test_stale_load_is_dropped() {
        let mut state = CalendarState::new(ymd(2024, 3, 14));
        let first = state.current_load();
        state.navigate(1);
        let second = state.current_load();

        let old = apt("old", Utc.with_ymd_and_hms(2024, 3, 14, 10, 0, 0).unwrap());
        assert!(!state.apply(first, data(Ok(vec![old]))));
        assert!(state.is_loading());
        assert!(state.appointments.is_empty());

        let new = apt("new", Utc.with_ymd_and_hms(2024, 3, 21, 10, 0, 0).unwrap());
        assert!(state.apply(second, data(Ok(vec![new]))));
        assert!(!state.is_loading());
        assert_eq!(state.appointments[0].appointment_id, "new");
    }

    #[test]
    fn test_partial_failure_renders_what_loaded() {
        let mut state = CalendarState::new(ymd(2024, 3, 14));
        state.clients = vec![Client {
            client_id: "c".into(),
            name: "Ana".into(),
            email: None,
            phone: None,
            notes: None,
        }];
        let load = state.current_load();

        let applied = state.apply(
            load,
            CalendarData {
                appointments: Ok(vec![apt("a", Utc.with_ymd_and_hms(2024, 3, 14, 9, 0, 0).unwrap())]),
                clients: Err("Network error".into()),
                services: Ok(vec![]),
                staff: Err("Server error".into()),
            },
        );

        assert!(applied);
        assert_eq!(state.appointments.len(), 1);
        assert_eq!(state.client_name("c"), "Ana");
        assert_eq!(state.errors.len(), 2);
        assert_eq!(state.service_name("missing"), "Service");
    }

    #[test]
    fn test_refresh_reloads_same_week() {
        let mut state = CalendarState::new(ymd(2024, 3, 14));
        let before = state.current_load();
        state.refresh();
        let after = state.current_load();

        assert_eq!(before.week, after.week);
        assert_ne!(before.generation, after.generation);
    }

    #[test]
    fn test_reducer_today_resets_anchor() {
        let state = Rc::new(CalendarState::new(ymd(2024, 3, 14)));
        let state = state.reduce(CalendarAction::Navigate(3));
        assert_eq!(state.view().anchor(), ymd(2024, 4, 4));

        let state = state.reduce(CalendarAction::Today(ymd(2024, 3, 14)));
        assert_eq!(state.view().start(), ymd(2024, 3, 10));
    }
}
