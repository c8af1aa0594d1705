//! Mapping between URL paths and screens.

use crate::types::CustomerId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A screen of the client
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    /// Button bar and today's appointments; the default route
    #[default]
    Main,
    /// Customer registration form
    AddCustomer,
    /// Appointment booking form
    AddAppointment,
    /// Customer search
    SearchCustomers,
    /// Appointment history of one customer
    CustomerHistory {
        /// Customer to show
        id: CustomerId,
    },
}

impl Route {
    /// Screen for `path`; unknown paths map to [`Route::Main`]
    ///
    /// A query string or fragment is ignored.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();

        match path {
            "/addCustomer" => Self::AddCustomer,
            "/addAppointment" => Self::AddAppointment,
            "/searchCustomers" => Self::SearchCustomers,
            other => other
                .strip_prefix("/customer/")
                .filter(|id| !id.is_empty() && !id.contains('/'))
                .map_or(Self::Main, |id| Self::CustomerHistory { id: id.into() }),
        }
    }

    /// Path of this screen
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Main => "/".to_string(),
            Self::AddCustomer => "/addCustomer".to_string(),
            Self::AddAppointment => "/addAppointment".to_string(),
            Self::SearchCustomers => "/searchCustomers".to_string(),
            Self::CustomerHistory { id } => format!("/customer/{id}"),
        }
    }

    /// Human-readable screen name
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Main => "Today's appointments",
            Self::AddCustomer => "Add customer",
            Self::AddAppointment => "Add appointment",
            Self::SearchCustomers => "Search customers",
            Self::CustomerHistory { .. } => "Customer history",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// A navigation link
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    /// Destination
    pub to: Route,
    /// Link text
    pub label: &'static str,
}

/// Links of the main screen's button bar, in order
#[must_use]
pub fn main_screen_links() -> [Link; 2] {
    [
        Link {
            to: Route::AddCustomer,
            label: "Add customer and appointment",
        },
        Link {
            to: Route::SearchCustomers,
            label: "Search customers",
        },
    ]
}

/// Buttons offered next to each customer in the search results
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchAction {
    /// Book an appointment for the customer
    CreateAppointment,
    /// Show the customer's history
    ViewHistory,
}

impl SearchAction {
    /// Every search action, in display order
    pub const ALL: [Self; 2] = [Self::CreateAppointment, Self::ViewHistory];

    /// Button text
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CreateAppointment => "Create appointment",
            Self::ViewHistory => "View history",
        }
    }
}
