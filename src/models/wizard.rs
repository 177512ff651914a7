//! Public booking wizard.
//!
//! The flow is linear: service → date/time → client details → confirmation →
//! success, with a back step from the middle three. Each step carries exactly
//! the data that is valid at that point, so e.g. a slot can never be chosen
//! without a date and staff member.
//!
//! Availability is fetched by the caller. Every lookup the wizard asks for is
//! tagged with a sequence number; a response is only applied while its tag is
//! still the one in flight, so a slow answer for an earlier date or staff
//! member can never overwrite the slots of the current selection.

use super::error::AppError;
use super::service::{Service, bookable};
use super::slot::{AvailableSlot, BookingConfirmation, BookingRequest, SlotQuery};
use super::staff::{Staff, active};
use crate::utils::calendar_month::{add_months, first_of_month, month_grid};
use crate::utils::format::{format_long_date, format_price};
use crate::utils::validation::{is_valid_email, optional};
use chrono::NaiveDate;
use std::rc::Rc;
use yew::functional::Reducible;

/// Contact details typed by the client on step 3.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl ClientDetails {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("Please enter your name"));
        }
        if !is_valid_email(&self.email) {
            return Err(AppError::validation("Please enter a valid email address"));
        }
        Ok(())
    }
}

/// An availability lookup tagged with the sequence number it was issued under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRequest {
    pub seq: u64,
    pub query: SlotQuery,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SlotState {
    /// Staff or date not chosen yet
    Idle,
    Loading(SlotRequest),
    Loaded {
        request: SlotRequest,
        slots: Vec<AvailableSlot>,
    },
    Failed {
        request: SlotRequest,
        message: String,
    },
}

impl SlotState {
    pub fn slots(&self) -> &[AvailableSlot] {
        match self {
            Self::Loaded { slots, .. } => slots,
            _ => &[],
        }
    }

    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading(_))
    }
}

/// Staff/date picks on step 2 and the slots fetched for them.
#[derive(Debug, Clone, PartialEq)]
pub struct DateTimeSelection {
    pub staff: Option<Staff>,
    pub date: Option<NaiveDate>,
    pub slots: SlotState,
}

/// Everything the booking is made for, fixed once a slot is picked.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingChoice {
    pub service: Service,
    pub staff: Staff,
    pub date: NaiveDate,
    pub slot: AvailableSlot,
}

impl BookingChoice {
    /// `"Thursday, March 14 at 09:30"`
    pub fn when(&self) -> String {
        format!("{} at {}", format_long_date(self.date), self.slot.time)
    }

    pub fn total(&self) -> String {
        format_price(self.service.price)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Idle,
    InFlight { attempt: u64, request: BookingRequest },
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum WizardStep {
    /// Step 1. Remembers staff/date picks when the client came back from step 2.
    SelectService {
        staff: Option<Staff>,
        date: Option<NaiveDate>,
    },
    SelectDateTime {
        service: Service,
        selection: DateTimeSelection,
    },
    EnterDetails {
        choice: BookingChoice,
        selection: DateTimeSelection,
    },
    Confirm {
        choice: BookingChoice,
        selection: DateTimeSelection,
        submission: Submission,
    },
    Success {
        choice: BookingChoice,
        confirmation: BookingConfirmation,
    },
}

/// One cell of the date picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: Option<NaiveDate>,
    pub selectable: bool,
    pub selected: bool,
}

pub enum WizardAction {
    SelectService(String),
    SelectStaff(String),
    SelectDate {
        date: NaiveDate,
        today: NaiveDate,
    },
    SlotsLoaded {
        request: SlotRequest,
        result: Result<Vec<AvailableSlot>, AppError>,
    },
    SelectSlot(String),
    UpdateDetails(ClientDetails),
    SubmitDetails,
    Confirm,
    BookingFinished {
        attempt: u64,
        result: Result<BookingConfirmation, AppError>,
    },
    Back,
    PreviousMonth,
    NextMonth,
    Reset,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookingWizard {
    services: Vec<Service>,
    staff: Vec<Staff>,
    step: WizardStep,
    details: ClientDetails,
    month: NaiveDate,
    next_seq: u64,
    error: Option<String>,
}

impl BookingWizard {
    /// Starts a wizard over the business's bookable services and active staff.
    /// A lone staff member is preselected.
    pub fn new(services: &[Service], staff: &[Staff], today: NaiveDate) -> Self {
        let staff = active(staff);
        let preselected = if staff.len() == 1 {
            staff.first().cloned()
        } else {
            None
        };

        Self {
            services: bookable(services),
            staff,
            step: WizardStep::SelectService {
                staff: preselected,
                date: None,
            },
            details: ClientDetails::default(),
            month: first_of_month(today),
            next_seq: 0,
            error: None,
        }
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn staff(&self) -> &[Staff] {
        &self.staff
    }

    /// Staff choice is only offered when there is more than one person.
    pub fn offers_staff_choice(&self) -> bool {
        self.staff.len() > 1
    }

    pub const fn step(&self) -> &WizardStep {
        &self.step
    }

    pub const fn details(&self) -> &ClientDetails {
        &self.details
    }

    pub const fn month(&self) -> NaiveDate {
        self.month
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// 1-based position in the flow, for the progress indicator.
    pub const fn step_number(&self) -> u8 {
        match self.step {
            WizardStep::SelectService { .. } => 1,
            WizardStep::SelectDateTime { .. } => 2,
            WizardStep::EnterDetails { .. } => 3,
            WizardStep::Confirm { .. } => 4,
            WizardStep::Success { .. } => 5,
        }
    }

    fn selection(&self) -> Option<&DateTimeSelection> {
        match &self.step {
            WizardStep::SelectDateTime { selection, .. } => Some(selection),
            _ => None,
        }
    }

    /// The availability lookup the caller should currently be running.
    pub fn slot_request_in_flight(&self) -> Option<&SlotRequest> {
        match self.selection().map(|s| &s.slots) {
            Some(SlotState::Loading(request)) => Some(request),
            _ => None,
        }
    }

    /// The booking submission the caller should currently be sending.
    pub fn booking_in_flight(&self) -> Option<(u64, &BookingRequest)> {
        match &self.step {
            WizardStep::Confirm {
                submission: Submission::InFlight { attempt, request },
                ..
            } => Some((*attempt, request)),
            _ => None,
        }
    }

    // STEP 1

    pub fn select_service(&mut self, service_id: &str) -> Result<Option<SlotRequest>, AppError> {
        let WizardStep::SelectService { staff, date } = &self.step else {
            return Err(AppError::validation("A service has already been chosen"));
        };

        let service = self
            .services
            .iter()
            .find(|s| s.service_id == service_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("This service is not available".to_string()))?;

        self.step = WizardStep::SelectDateTime {
            service,
            selection: DateTimeSelection {
                staff: staff.clone(),
                date: *date,
                slots: SlotState::Idle,
            },
        };
        Ok(self.reissue_slot_request())
    }

    // STEP 2

    pub fn select_staff(&mut self, staff_id: &str) -> Result<Option<SlotRequest>, AppError> {
        let staff = self
            .staff
            .iter()
            .find(|s| s.staff_id == staff_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("This staff member is not available".to_string()))?;

        let WizardStep::SelectDateTime { selection, .. } = &mut self.step else {
            return Err(AppError::validation("Choose a service first"));
        };

        if selection.staff.as_ref() == Some(&staff) {
            return Ok(None);
        }
        selection.staff = Some(staff);
        Ok(self.reissue_slot_request())
    }

    /// Whether `date` can be picked right now: today or later, with a staff
    /// member already chosen.
    pub fn is_date_selectable(&self, date: NaiveDate, today: NaiveDate) -> bool {
        date >= today && self.selection().is_some_and(|s| s.staff.is_some())
    }

    pub fn select_date(
        &mut self,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<Option<SlotRequest>, AppError> {
        let Some(selection) = self.selection() else {
            return Err(AppError::validation("Choose a service first"));
        };
        if selection.staff.is_none() {
            return Err(AppError::validation("Choose a staff member first"));
        }
        if date < today {
            return Err(AppError::validation("Choose today or a later date"));
        }

        if let WizardStep::SelectDateTime { selection, .. } = &mut self.step {
            selection.date = Some(date);
        }
        Ok(self.reissue_slot_request())
    }

    /// Drops whatever slots are shown and, when service, staff and date are
    /// all set, issues a fresh lookup for exactly that triple.
    fn reissue_slot_request(&mut self) -> Option<SlotRequest> {
        let WizardStep::SelectDateTime { service, selection } = &mut self.step else {
            return None;
        };

        let (Some(staff), Some(date)) = (&selection.staff, selection.date) else {
            selection.slots = SlotState::Idle;
            return None;
        };

        self.next_seq += 1;
        let request = SlotRequest {
            seq: self.next_seq,
            query: SlotQuery {
                staff_id: staff.staff_id.clone(),
                service_id: service.service_id.clone(),
                date,
            },
        };
        selection.slots = SlotState::Loading(request.clone());
        Some(request)
    }

    /// Applies an availability response. Returns `false` when the response
    /// belongs to a lookup that has since been superseded.
    pub fn apply_slots(
        &mut self,
        request: &SlotRequest,
        result: Result<Vec<AvailableSlot>, AppError>,
    ) -> bool {
        let WizardStep::SelectDateTime { selection, .. } = &mut self.step else {
            return false;
        };
        if !matches!(&selection.slots, SlotState::Loading(current) if current == request) {
            return false;
        }

        selection.slots = match result {
            Ok(slots) => SlotState::Loaded {
                request: request.clone(),
                slots,
            },
            Err(e) => SlotState::Failed {
                request: request.clone(),
                message: e.message().to_string(),
            },
        };
        true
    }

    pub fn select_slot(&mut self, time: &str) -> Result<(), AppError> {
        let WizardStep::SelectDateTime { service, selection } = &self.step else {
            return Err(AppError::validation("Choose a date first"));
        };
        let SlotState::Loaded { slots, .. } = &selection.slots else {
            return Err(AppError::validation("Available times are not loaded yet"));
        };
        let (Some(staff), Some(date)) = (&selection.staff, selection.date) else {
            return Err(AppError::validation("Choose a staff member and date first"));
        };
        let slot = slots
            .iter()
            .find(|s| s.time == time)
            .cloned()
            .ok_or_else(|| AppError::validation("That time is no longer available"))?;

        self.step = WizardStep::EnterDetails {
            choice: BookingChoice {
                service: service.clone(),
                staff: staff.clone(),
                date,
                slot,
            },
            selection: selection.clone(),
        };
        Ok(())
    }

    pub fn previous_month(&mut self) {
        self.month = add_months(self.month, -1);
    }

    pub fn next_month(&mut self) {
        self.month = add_months(self.month, 1);
    }

    /// Date picker cells for the displayed month.
    pub fn month_cells(&self, today: NaiveDate) -> Vec<DayCell> {
        let selected = self.selection().and_then(|s| s.date);
        month_grid(self.month)
            .into_iter()
            .map(|date| DayCell {
                date,
                selectable: date.is_some_and(|d| self.is_date_selectable(d, today)),
                selected: date.is_some() && date == selected,
            })
            .collect()
    }

    // STEP 3

    pub fn update_details(&mut self, details: ClientDetails) {
        self.details = details;
    }

    pub fn submit_details(&mut self) -> Result<(), AppError> {
        let WizardStep::EnterDetails { choice, selection } = &self.step else {
            return Err(AppError::validation("Choose a time first"));
        };
        self.details.validate()?;

        self.step = WizardStep::Confirm {
            choice: choice.clone(),
            selection: selection.clone(),
            submission: Submission::Idle,
        };
        Ok(())
    }

    // STEP 4

    /// Starts the booking submission. Yields the request to send exactly once;
    /// further confirms while it is in flight are refused.
    pub fn begin_booking(&mut self) -> Result<BookingRequest, AppError> {
        let WizardStep::Confirm {
            choice, submission, ..
        } = &mut self.step
        else {
            return Err(AppError::validation("Nothing to confirm yet"));
        };
        if matches!(submission, Submission::InFlight { .. }) {
            return Err(AppError::validation("Your booking is already being sent"));
        }

        let request = BookingRequest {
            client_name: self.details.name.trim().to_string(),
            client_email: self.details.email.trim().to_string(),
            client_phone: optional(&self.details.phone),
            service_id: choice.service.service_id.clone(),
            staff_id: choice.staff.staff_id.clone(),
            start_time: choice.slot.datetime,
        };

        self.next_seq += 1;
        *submission = Submission::InFlight {
            attempt: self.next_seq,
            request: request.clone(),
        };
        Ok(request)
    }

    /// Records the outcome of a submission. Success moves to the final step;
    /// a failure stays on confirmation with the server's message.
    pub fn finish_booking(
        &mut self,
        attempt: u64,
        result: Result<BookingConfirmation, AppError>,
    ) -> bool {
        let WizardStep::Confirm {
            choice, submission, ..
        } = &mut self.step
        else {
            return false;
        };
        if !matches!(submission, Submission::InFlight { attempt: a, .. } if *a == attempt) {
            return false;
        }

        match result {
            Ok(confirmation) => {
                self.step = WizardStep::Success {
                    choice: choice.clone(),
                    confirmation,
                };
            }
            Err(e) => *submission = Submission::Failed(e.message().to_string()),
        }
        true
    }

    // NAVIGATION

    /// Goes back one step from steps 2–4. Refused while a booking is in flight.
    pub fn back(&mut self) -> bool {
        let step = std::mem::replace(
            &mut self.step,
            WizardStep::SelectService {
                staff: None,
                date: None,
            },
        );

        let (step, moved) = match step {
            WizardStep::SelectDateTime { selection, .. } => (
                WizardStep::SelectService {
                    staff: selection.staff,
                    date: selection.date,
                },
                true,
            ),
            WizardStep::EnterDetails { choice, selection } => (
                WizardStep::SelectDateTime {
                    service: choice.service,
                    selection,
                },
                true,
            ),
            WizardStep::Confirm {
                choice,
                selection,
                submission,
            } if !matches!(submission, Submission::InFlight { .. }) => {
                (WizardStep::EnterDetails { choice, selection }, true)
            }
            other => (other, false),
        };

        self.step = step;
        moved
    }

    /// "Book another": back to step 1 with a clean form. The staff member of
    /// the finished booking stays selected.
    pub fn reset(&mut self) {
        let staff = match &self.step {
            WizardStep::Success { choice, .. } => Some(choice.staff.clone()),
            _ => self.selection().and_then(|s| s.staff.clone()),
        };

        self.step = WizardStep::SelectService { staff, date: None };
        self.details = ClientDetails::default();
        self.error = None;
    }

    /// Applies a user or network event. Events that no longer apply return
    /// `Ok(false)` and leave the wizard untouched.
    pub fn apply(&mut self, action: WizardAction) -> Result<bool, AppError> {
        match action {
            WizardAction::SelectService(id) => self.select_service(&id).map(|_| true),
            WizardAction::SelectStaff(id) => self.select_staff(&id).map(|_| true),
            WizardAction::SelectDate { date, today } => self.select_date(date, today).map(|_| true),
            WizardAction::SlotsLoaded { request, result } => Ok(self.apply_slots(&request, result)),
            WizardAction::SelectSlot(time) => self.select_slot(&time).map(|()| true),
            WizardAction::UpdateDetails(details) => {
                self.update_details(details);
                Ok(true)
            }
            WizardAction::SubmitDetails => self.submit_details().map(|()| true),
            WizardAction::Confirm => self.begin_booking().map(|_| true),
            WizardAction::BookingFinished { attempt, result } => {
                Ok(self.finish_booking(attempt, result))
            }
            WizardAction::Back => Ok(self.back()),
            WizardAction::PreviousMonth => {
                self.previous_month();
                Ok(true)
            }
            WizardAction::NextMonth => {
                self.next_month();
                Ok(true)
            }
            WizardAction::Reset => {
                self.reset();
                Ok(true)
            }
        }
    }
}

impl Reducible for BookingWizard {
    type Action = WizardAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match next.apply(action) {
            Ok(false) => return self,
            Ok(true) => next.error = None,
            Err(e) => next.error = Some(e.message().to_string()),
        }
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        ymd(2024, 3, 14)
    }

    fn service(id: &str, active: bool) -> Service {
        Service {
            service_id: id.into(),
            name: format!("Service {id}"),
            duration: 30,
            price: 25.0,
            description: None,
            is_active: active,
        }
    }

    fn staff(id: &str) -> Staff {
        Staff {
            staff_id: id.into(),
            name: format!("Staff {id}"),
            email: None,
            role: None,
            is_active: true,
        }
    }

    fn slot(time: &str, hour: u32, minute: u32) -> AvailableSlot {
        AvailableSlot {
            time: time.into(),
            datetime: Utc.with_ymd_and_hms(2024, 3, 15, hour, minute, 0).unwrap(),
        }
    }

    fn at_date_time(staff_members: &[Staff]) -> BookingWizard {
        let mut wizard = BookingWizard::new(&[service("s1", true)], staff_members, today());
        wizard.select_service("s1").unwrap();
        wizard
    }

    #[test]
    fn test_single_staff_is_preselected() {
        let wizard = at_date_time(&[staff("a")]);
        assert!(!wizard.offers_staff_choice());
        assert!(wizard.is_date_selectable(today(), today()));
    }

    #[test]
    fn test_date_needs_staff_when_several() {
        let mut wizard = at_date_time(&[staff("a"), staff("b")]);
        assert!(wizard.offers_staff_choice());
        assert!(!wizard.is_date_selectable(ymd(2024, 3, 15), today()));
        assert!(wizard.select_date(ymd(2024, 3, 15), today()).is_err());

        assert_eq!(wizard.select_staff("b").unwrap(), None);
        assert!(wizard.is_date_selectable(ymd(2024, 3, 15), today()));
    }

    #[test]
    fn test_past_dates_are_not_selectable() {
        let mut wizard = at_date_time(&[staff("a")]);
        assert!(!wizard.is_date_selectable(ymd(2024, 3, 13), today()));
        assert!(wizard.select_date(ymd(2024, 3, 13), today()).is_err());
    }

    #[test]
    fn test_inactive_service_cannot_be_chosen() {
        let mut wizard =
            BookingWizard::new(&[service("s1", true), service("s2", false)], &[staff("a")], today());
        assert_eq!(wizard.services().len(), 1);
        assert!(wizard.select_service("s2").is_err());
        assert_eq!(wizard.step_number(), 1);
    }

    #[test]
    fn test_date_pick_issues_lookup_for_exact_triple() {
        let mut wizard = at_date_time(&[staff("a")]);
        let request = wizard.select_date(ymd(2024, 3, 15), today()).unwrap().unwrap();

        assert_eq!(request.query.staff_id, "a");
        assert_eq!(request.query.service_id, "s1");
        assert_eq!(request.query.date, ymd(2024, 3, 15));
        assert_eq!(wizard.slot_request_in_flight(), Some(&request));
    }

    #[test]
    fn test_stale_slot_response_is_discarded() {
        let mut wizard = at_date_time(&[staff("a")]);
        let first = wizard.select_date(ymd(2024, 3, 15), today()).unwrap().unwrap();
        let second = wizard.select_date(ymd(2024, 3, 16), today()).unwrap().unwrap();

        // The answer for the 16th arrives first, then the late one for the 15th
        assert!(wizard.apply_slots(&second, Ok(vec![slot("10:00", 10, 0)])));
        assert!(!wizard.apply_slots(&first, Ok(vec![slot("09:00", 9, 0)])));

        let WizardStep::SelectDateTime { selection, .. } = wizard.step() else {
            panic!("expected date/time step");
        };
        assert_eq!(selection.slots.slots()[0].time, "10:00");
    }

    #[test]
    fn test_changing_dependency_invalidates_shown_slots() {
        let mut wizard = at_date_time(&[staff("a"), staff("b")]);
        wizard.select_staff("a").unwrap();
        let request = wizard.select_date(ymd(2024, 3, 15), today()).unwrap().unwrap();
        wizard.apply_slots(&request, Ok(vec![slot("09:00", 9, 0)]));

        let next = wizard.select_staff("b").unwrap().unwrap();
        assert_eq!(next.query.staff_id, "b");
        assert_eq!(next.query.date, ymd(2024, 3, 15));

        let WizardStep::SelectDateTime { selection, .. } = wizard.step() else {
            panic!("expected date/time step");
        };
        assert!(selection.slots.slots().is_empty());
        assert!(selection.slots.is_loading());
        assert!(wizard.select_slot("09:00").is_err());
    }

    #[test]
    fn test_slot_required_before_details() {
        let mut wizard = at_date_time(&[staff("a")]);
        assert!(wizard.select_slot("09:00").is_err());

        let request = wizard.select_date(ymd(2024, 3, 15), today()).unwrap().unwrap();
        assert!(wizard.select_slot("09:00").is_err());

        wizard.apply_slots(&request, Ok(vec![slot("09:00", 9, 0)]));
        assert!(wizard.select_slot("11:00").is_err());
        wizard.select_slot("09:00").unwrap();
        assert_eq!(wizard.step_number(), 3);
    }

    fn at_details() -> BookingWizard {
        let mut wizard = at_date_time(&[staff("a")]);
        let request = wizard.select_date(ymd(2024, 3, 15), today()).unwrap().unwrap();
        wizard.apply_slots(&request, Ok(vec![slot("09:00", 9, 0), slot("09:30", 9, 30)]));
        wizard.select_slot("09:30").unwrap();
        wizard
    }

    fn at_confirm() -> BookingWizard {
        let mut wizard = at_details();
        wizard.update_details(ClientDetails {
            name: "Ana Silva".into(),
            email: "ana@example.com".into(),
            phone: String::new(),
        });
        wizard.submit_details().unwrap();
        wizard
    }

    #[test]
    fn test_details_validation_blocks_confirm() {
        let mut wizard = at_details();
        wizard.update_details(ClientDetails {
            name: "  ".into(),
            email: "ana@example.com".into(),
            phone: String::new(),
        });
        assert!(wizard.submit_details().is_err());

        wizard.update_details(ClientDetails {
            name: "Ana".into(),
            email: "ana@".into(),
            phone: String::new(),
        });
        assert!(wizard.submit_details().is_err());
        assert_eq!(wizard.step_number(), 3);
    }

    #[test]
    fn test_confirm_shows_total_and_builds_request() {
        let mut wizard = at_confirm();
        let WizardStep::Confirm { choice, .. } = wizard.step() else {
            panic!("expected confirm step");
        };
        assert_eq!(choice.total(), "$25.00");
        assert_eq!(choice.when(), "Friday, March 15 at 09:30");

        let request = wizard.begin_booking().unwrap();
        assert_eq!(request.client_name, "Ana Silva");
        assert_eq!(request.client_phone, None);
        assert_eq!(request.staff_id, "a");
        assert_eq!(
            request.start_time,
            Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_one_request_per_submit() {
        let mut wizard = at_confirm();
        wizard.begin_booking().unwrap();
        assert!(wizard.begin_booking().is_err());
        assert!(!wizard.back());
    }

    #[test]
    fn test_failed_booking_stays_on_confirm_and_can_retry() {
        let mut wizard = at_confirm();
        wizard.begin_booking().unwrap();
        let (attempt, _) = wizard.booking_in_flight().unwrap();

        assert!(wizard.finish_booking(
            attempt,
            Err(AppError::ApiError("Time slot no longer available".into()))
        ));
        let WizardStep::Confirm { submission, .. } = wizard.step() else {
            panic!("expected confirm step");
        };
        assert_eq!(
            submission,
            &Submission::Failed("Time slot no longer available".into())
        );

        let retry = wizard.begin_booking();
        assert!(retry.is_ok());
        assert_ne!(wizard.booking_in_flight().unwrap().0, attempt);
    }

    #[test]
    fn test_successful_booking_and_book_another() {
        let mut wizard = at_confirm();
        wizard.begin_booking().unwrap();
        let (attempt, _) = wizard.booking_in_flight().unwrap();

        let confirmation = BookingConfirmation {
            appointment_id: "apt_1".into(),
            message: None,
            start_time: None,
            end_time: None,
            service: None,
        };
        assert!(wizard.finish_booking(attempt, Ok(confirmation)));
        assert_eq!(wizard.step_number(), 5);
        assert!(!wizard.finish_booking(attempt, Err(AppError::ApiError("late".into()))));

        wizard.reset();
        assert_eq!(wizard.step_number(), 1);
        assert_eq!(wizard.details(), &ClientDetails::default());
        assert_eq!(
            wizard.step(),
            &WizardStep::SelectService {
                staff: Some(staff("a")),
                date: None
            }
        );
    }

    #[test]
    fn test_back_navigation_keeps_picks() {
        let mut wizard = at_confirm();
        assert!(wizard.back());
        assert_eq!(wizard.step_number(), 3);
        assert_eq!(wizard.details().name, "Ana Silva");

        assert!(wizard.back());
        assert_eq!(wizard.step_number(), 2);
        let WizardStep::SelectDateTime { selection, .. } = wizard.step() else {
            panic!("expected date/time step");
        };
        assert_eq!(selection.date, Some(ymd(2024, 3, 15)));
        assert_eq!(selection.slots.slots().len(), 2);

        assert!(wizard.back());
        assert_eq!(wizard.step_number(), 1);
        assert!(!wizard.back());

        // Picking a service again re-runs the lookup for the remembered date
        let request = wizard.select_service("s1").unwrap();
        assert_eq!(request.unwrap().query.date, ymd(2024, 3, 15));
    }

    #[test]
    fn test_month_cells() {
        let mut wizard = at_date_time(&[staff("a")]);
        wizard.select_date(ymd(2024, 3, 15), today()).unwrap();

        let cells = wizard.month_cells(today());
        // March 2024 starts on Friday: five blanks
        assert!(cells[..5].iter().all(|c| c.date.is_none() && !c.selectable));
        let selectable: Vec<_> = cells.iter().filter(|c| c.selectable).collect();
        assert_eq!(selectable.len(), 18); // 14th..31st
        assert_eq!(cells.iter().filter(|c| c.selected).count(), 1);

        wizard.next_month();
        assert_eq!(wizard.month(), ymd(2024, 4, 1));
        assert!(wizard.month_cells(today()).iter().all(|c| !c.selected));
    }

    #[test]
    fn test_reducer_records_validation_error_and_ignores_stale() {
        let wizard = Rc::new(at_date_time(&[staff("a"), staff("b")]));
        let wizard = wizard.reduce(WizardAction::SelectDate {
            date: ymd(2024, 3, 15),
            today: today(),
        });
        assert_eq!(wizard.error(), Some("Choose a staff member first"));

        let wizard = wizard.reduce(WizardAction::SelectStaff("a".into()));
        assert_eq!(wizard.error(), None);

        let stale = SlotRequest {
            seq: 999,
            query: SlotQuery {
                staff_id: "a".into(),
                service_id: "s1".into(),
                date: ymd(2024, 3, 15),
            },
        };
        let before = Rc::clone(&wizard);
        let after = wizard.reduce(WizardAction::SlotsLoaded {
            request: stale,
            result: Ok(vec![]),
        });
        assert!(Rc::ptr_eq(&before, &after));
    }
}
