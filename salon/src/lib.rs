//! # Salon
//!
//! Appointment client for a hairdressing salon: register customers, view
//! the day's appointments and query a customer's appointment history.
//!
//! Each screen is a slice (state, actions, reducer) run by a
//! [`salon_runtime::Store`]:
//!
//! - [`customer_history`]: query lifecycle behind `/customer/:id`
//! - [`day_view`]: today's appointments on the main screen
//! - [`customer_form`]: customer registration
//! - [`shell`]: routes, navigation and text views
//!
//! ## Example
//!
//! ```ignore
//! use salon::customer_history::*;
//!
//! let store = Store::new(
//!     CustomerHistoryState::default(),
//!     CustomerHistoryReducer::new(),
//!     CustomerHistoryEnvironment::new(queries),
//! );
//! let mut handle = store.send(CustomerHistoryAction::request(123)).await?;
//! handle.wait().await;
//! ```

pub mod app;
pub mod config;
pub mod customer_form;
pub mod customer_history;
pub mod day_view;
pub mod error;
pub mod normalize;
pub mod shell;
pub mod types;

pub use app::App;
pub use config::{Config, ConfigError};
pub use error::{AppError, LoadError, NormalizeError};
pub use types::{Appointment, Customer, CustomerId, RequestId, RequestStatus};
