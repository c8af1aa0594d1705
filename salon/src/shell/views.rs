//! Text view models derived from slice state.

use crate::customer_history::CustomerHistoryState;
use crate::day_view::DayViewState;
use crate::types::{Appointment, RequestStatus};
use chrono::TimeZone;
use std::fmt;

/// Shown while a request is in flight
pub const LOADING_MESSAGE: &str = "Loading";

/// Shown when a request failed, whatever the cause
pub const ERROR_MESSAGE: &str = "Sorry, an error occurred while pulling data from the server.";

/// Heading above the appointment table
pub const HISTORY_HEADING: &str = "Booked appointments";

/// Columns of the appointment table
pub const COLUMN_HEADINGS: [&str; 4] = ["When", "Stylist", "Service", "Notes"];

/// Shown when the day has no appointments
pub const EMPTY_DAY_MESSAGE: &str = "There are no appointments scheduled for today.";

const WHEN_FORMAT: &str = "%a %b %d %Y %H:%M";

fn local<Tz>(millis: i64, zone: &Tz, format: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    zone.timestamp_millis_opt(millis)
        .single()
        .map_or_else(|| millis.to_string(), |at| at.format(format).to_string())
}

/// Customer summary plus one table row per appointment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryData {
    /// "First Last"
    pub heading: String,
    /// Phone number
    pub phone_number: String,
    /// When, Stylist, Service, Notes
    pub rows: Vec<[String; 4]>,
}

/// What the customer history screen shows
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CustomerHistoryView {
    /// A query is in flight
    Loading,
    /// The last query failed
    Error,
    /// Customer and appointments
    Data(HistoryData),
}

impl CustomerHistoryView {
    /// Choose the view for `state`, formatting times in `zone`
    ///
    /// ```ignore
    /// let view = CustomerHistoryView::from_state(&state, &Local);
    /// println!("{view}");
    /// ```
    #[must_use]
    pub fn from_state<Tz>(state: &CustomerHistoryState, zone: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        match state.status {
            RequestStatus::Submitting => Self::Loading,
            RequestStatus::Failed => Self::Error,
            RequestStatus::Unstarted | RequestStatus::Successful => Self::Data(HistoryData {
                heading: state.customer.full_name(),
                phone_number: state.customer.phone_number.clone(),
                rows: state
                    .appointments
                    .iter()
                    .map(|appointment| history_row(appointment, zone))
                    .collect(),
            }),
        }
    }

    /// Element id of the view
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Error => "error",
            Self::Data(_) => "customer",
        }
    }
}

fn history_row<Tz>(appointment: &Appointment, zone: &Tz) -> [String; 4]
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    [
        local(appointment.starts_at, zone, WHEN_FORMAT),
        appointment.stylist.clone(),
        appointment.service.clone(),
        appointment.notes.clone(),
    ]
}

impl fmt::Display for CustomerHistoryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => f.write_str(LOADING_MESSAGE),
            Self::Error => f.write_str(ERROR_MESSAGE),
            Self::Data(data) => {
                writeln!(f, "{}", data.heading)?;
                writeln!(f, "{}", data.phone_number)?;
                writeln!(f, "{HISTORY_HEADING}")?;
                write!(f, "{}", COLUMN_HEADINGS.join(" | "))?;
                for row in &data.rows {
                    write!(f, "\n{}", row.join(" | "))?;
                }
                Ok(())
            },
        }
    }
}

/// What the main screen shows below its button bar
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DayView {
    /// Today's appointments are loading
    Loading,
    /// Loading failed
    Error,
    /// One `HH:MM  First Last` line per appointment, in received order
    Schedule(Vec<String>),
}

impl DayView {
    /// Choose the view for `state`, formatting times in `zone`
    #[must_use]
    pub fn from_state<Tz>(state: &DayViewState, zone: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        match state.status {
            RequestStatus::Submitting => Self::Loading,
            RequestStatus::Failed => Self::Error,
            RequestStatus::Unstarted | RequestStatus::Successful => Self::Schedule(
                state
                    .appointments
                    .iter()
                    .map(|appointment| {
                        let name = appointment
                            .customer
                            .as_ref()
                            .map(crate::types::Customer::full_name)
                            .unwrap_or_default();
                        format!("{}  {name}", local(appointment.starts_at, zone, "%H:%M"))
                            .trim_end()
                            .to_string()
                    })
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for DayView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => f.write_str(LOADING_MESSAGE),
            Self::Error => f.write_str(ERROR_MESSAGE),
            Self::Schedule(lines) if lines.is_empty() => f.write_str(EMPTY_DAY_MESSAGE),
            Self::Schedule(lines) => f.write_str(&lines.join("\n")),
        }
    }
}
