//! Day view: today's appointments, loaded over REST when the main screen
//! opens.

use crate::error::LoadError;
use crate::normalize::normalize_appointments;
use crate::types::{Appointment, RequestId, RequestStatus};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone};
use salon_core::effect::Effect;
use salon_core::environment::{Clock, RestClient};
use salon_core::reducer::Reducer;
use salon_core::{SmallVec, smallvec};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Milliseconds from midnight to 23:59:59.999
const LAST_MILLI_OF_DAY: i64 = 86_399_999;

/// How far past a nonexistent local time to look for the first valid one
const GAP_SEARCH_MINUTES: i64 = 180;

/// Inclusive range of epoch milliseconds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    /// First millisecond of the range
    pub from: i64,
    /// Last millisecond of the range
    pub to: i64,
}

impl TimeRange {
    /// REST path listing the appointments within the range
    #[must_use]
    pub fn path(&self) -> String {
        format!("/appointments/{}-{}/", self.from, self.to)
    }

    /// Whether `millis` falls within the range
    #[must_use]
    pub const fn contains(&self, millis: i64) -> bool {
        self.from <= millis && millis <= self.to
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// The calendar day of `reference`, in its own time zone
///
/// `from` is local midnight and `to` is 23:59:59.999 of the same day. A
/// midnight skipped by a DST transition resolves to the first valid instant
/// of the day; an ambiguous one to the earlier instant.
#[must_use]
pub fn day_range<Tz: TimeZone>(reference: &DateTime<Tz>) -> TimeRange {
    let zone = reference.timezone();
    let midnight = reference.date_naive().and_time(NaiveTime::MIN);
    let last = midnight
        .checked_add_signed(TimeDelta::milliseconds(LAST_MILLI_OF_DAY))
        .unwrap_or(NaiveDateTime::MAX);

    TimeRange {
        from: earliest_valid(&zone, midnight).timestamp_millis(),
        to: latest_valid(&zone, last).timestamp_millis(),
    }
}

/// Day range for a calendar date in the local time zone
#[must_use]
pub fn local_day_range(date: NaiveDate) -> TimeRange {
    day_range(&earliest_valid(&Local, date.and_time(NaiveTime::MIN)))
}

fn earliest_valid<Tz: TimeZone>(zone: &Tz, local: NaiveDateTime) -> DateTime<Tz> {
    (0..=GAP_SEARCH_MINUTES)
        .filter_map(|minutes| local.checked_add_signed(TimeDelta::minutes(minutes)))
        .find_map(|candidate| zone.from_local_datetime(&candidate).earliest())
        .unwrap_or_else(|| zone.from_utc_datetime(&local))
}

fn latest_valid<Tz: TimeZone>(zone: &Tz, local: NaiveDateTime) -> DateTime<Tz> {
    (0..=GAP_SEARCH_MINUTES)
        .filter_map(|minutes| local.checked_sub_signed(TimeDelta::minutes(minutes)))
        .find_map(|candidate| zone.from_local_datetime(&candidate).latest())
        .unwrap_or_else(|| zone.from_utc_datetime(&local))
}

/// State of the day view
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayViewState {
    /// Lifecycle of the most recent load
    pub status: RequestStatus,
    /// Range of the most recent load
    pub range: Option<TimeRange>,
    /// Appointments of the last successful load, as received
    pub appointments: Vec<Appointment>,
    /// Most recently issued load
    pub latest_request: RequestId,
}

/// Actions of the day view
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayViewAction {
    /// Load today's appointments, "today" being the clock's local date
    Load,
    /// Load the appointments within `range`
    LoadRange {
        /// Range to load
        range: TimeRange,
    },
    /// A load resolved
    Loaded {
        /// Load this result belongs to
        request: RequestId,
        /// Normalized appointments
        appointments: Vec<Appointment>,
    },
    /// A load failed for any reason
    LoadFailed {
        /// Load this result belongs to
        request: RequestId,
    },
}

impl DayViewAction {
    /// Whether this action ends a load
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Loaded { .. } | Self::LoadFailed { .. })
    }
}

/// Dependencies of the day view
#[derive(Clone)]
pub struct DayViewEnvironment {
    /// Source of "today"
    pub clock: Arc<dyn Clock>,
    /// Client used for the appointments endpoint
    pub appointments: Arc<dyn RestClient>,
}

impl DayViewEnvironment {
    /// Creates a new day view environment
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, appointments: Arc<dyn RestClient>) -> Self {
        Self {
            clock,
            appointments,
        }
    }
}

/// Reducer for the day view
#[derive(Clone, Debug, Default)]
pub struct DayViewReducer;

impl DayViewReducer {
    /// Creates a new day view reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn fetch_effect(
        client: Arc<dyn RestClient>,
        range: TimeRange,
        request: RequestId,
    ) -> Effect<DayViewAction> {
        Effect::Future(Box::pin(async move {
            match Self::load(client.as_ref(), range).await {
                Ok(appointments) => {
                    tracing::debug!(%range, count = appointments.len(), "Day view loaded");
                    Some(DayViewAction::Loaded {
                        request,
                        appointments,
                    })
                },
                Err(error) => {
                    tracing::warn!(%range, %error, "Day view load failed");
                    Some(DayViewAction::LoadFailed { request })
                },
            }
        }))
    }

    async fn load(client: &dyn RestClient, range: TimeRange) -> Result<Vec<Appointment>, LoadError> {
        let body = client.get_json(range.path()).await?;
        Ok(normalize_appointments(body)?)
    }

    fn start_load(
        state: &mut DayViewState,
        range: TimeRange,
        env: &DayViewEnvironment,
    ) -> SmallVec<[Effect<DayViewAction>; 4]> {
        let request = state.latest_request.next();
        state.latest_request = request;
        state.status = RequestStatus::Submitting;
        state.range = Some(range);

        smallvec![Self::fetch_effect(Arc::clone(&env.appointments), range, request)]
    }
}

impl Reducer for DayViewReducer {
    type State = DayViewState;
    type Action = DayViewAction;
    type Environment = DayViewEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            DayViewAction::Load => {
                let today = env.clock.now().with_timezone(&Local);
                Self::start_load(state, day_range(&today), env)
            },
            DayViewAction::LoadRange { range } => Self::start_load(state, range, env),
            DayViewAction::Loaded {
                request,
                appointments,
            } if request == state.latest_request => {
                state.status = RequestStatus::Successful;
                state.appointments = appointments;
                smallvec![Effect::None]
            },
            DayViewAction::LoadFailed { request } if request == state.latest_request => {
                state.status = RequestStatus::Failed;
                smallvec![Effect::None]
            },
            DayViewAction::Loaded { request, .. } | DayViewAction::LoadFailed { request } => {
                tracing::debug!(%request, "Ignoring result of a superseded load");
                smallvec![Effect::None]
            },
        }
    }
}
