//! Headless presentation shell: routes, navigation and text views.

pub mod navigation;
pub mod routes;
pub mod views;

pub use navigation::{ShellAction, ShellReducer, ShellState};
pub use routes::{Link, Route, SearchAction, main_screen_links};
pub use views::{CustomerHistoryView, DayView, HistoryData, ERROR_MESSAGE, LOADING_MESSAGE};
