//! Headless application: navigates to a path, runs the screen's slice and
//! renders the result as text.

use crate::customer_form::{CustomerField, CustomerFormState};
use crate::customer_history::{
    CustomerHistoryAction, CustomerHistoryEnvironment, CustomerHistoryReducer, CustomerHistoryState,
};
use crate::day_view::{DayViewAction, DayViewEnvironment, DayViewReducer, DayViewState};
use crate::error::AppError;
use crate::shell::{
    CustomerHistoryView, DayView, Route, SearchAction, ShellAction, ShellReducer, ShellState,
    main_screen_links,
};
use crate::types::CustomerId;
use chrono::TimeZone;
use salon_core::environment::{Clock, QueryClient, RestClient};
use salon_runtime::Store;
use std::fmt::{self, Write as _};
use std::sync::Arc;
use std::time::Duration;

const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

type ShellStore = Store<ShellState, ShellAction, (), ShellReducer>;

/// The client without a user interface
pub struct App {
    shell: ShellStore,
    queries: Arc<dyn QueryClient>,
    rest: Arc<dyn RestClient>,
    clock: Arc<dyn Clock>,
    wait: Duration,
}

impl App {
    /// Creates an app over its dependencies
    ///
    /// `wait` bounds how long a screen waits for its data.
    #[must_use]
    pub fn new(
        queries: Arc<dyn QueryClient>,
        rest: Arc<dyn RestClient>,
        clock: Arc<dyn Clock>,
        wait: Duration,
    ) -> Self {
        Self {
            shell: Store::new(ShellState::default(), ShellReducer::new(), ()),
            queries,
            rest,
            clock,
            wait,
        }
    }

    /// Navigate to `path` and render the screen, times shown in `zone`
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] if the screen's data did not arrive within the
    /// wait limit.
    pub async fn open<Tz>(&self, path: &str, zone: &Tz) -> Result<String, AppError>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        self.shell.send(ShellAction::Navigate(Route::parse(path))).await?;
        let route = self.shell.state(|state| state.route.clone()).await;
        tracing::info!(%route, "Opening screen");

        match route {
            Route::CustomerHistory { id } => self.customer_history(id, zone).await,
            Route::Main => self.main_screen(zone).await,
            Route::AddCustomer => Ok(render_customer_form(&CustomerFormState::default())),
            Route::SearchCustomers => Ok(format!(
                "{}\n[{}]",
                route.title(),
                SearchAction::ALL.map(SearchAction::label).join("] [")
            )),
            Route::AddAppointment => {
                let customer = self
                    .shell
                    .state(|state| state.customer_for_appointment.clone())
                    .await;
                Ok(customer.map_or_else(
                    || route.title().to_string(),
                    |customer| format!("{} for {}", route.title(), customer.full_name()),
                ))
            },
        }
    }

    async fn customer_history<Tz>(&self, id: CustomerId, zone: &Tz) -> Result<String, AppError>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let store = Store::new(
            CustomerHistoryState::default(),
            CustomerHistoryReducer::new(),
            CustomerHistoryEnvironment::new(Arc::clone(&self.queries)),
        );

        let mut handle = store.send(CustomerHistoryAction::request(id)).await?;
        handle.wait_with_timeout(self.wait).await?;

        let view = store
            .state(|state| CustomerHistoryView::from_state(state, zone))
            .await;
        store.shutdown(SHUTDOWN_GRACE).await?;
        Ok(view.to_string())
    }

    async fn main_screen<Tz>(&self, zone: &Tz) -> Result<String, AppError>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let store = Store::new(
            DayViewState::default(),
            DayViewReducer::new(),
            DayViewEnvironment::new(Arc::clone(&self.clock), Arc::clone(&self.rest)),
        );

        let mut handle = store.send(DayViewAction::Load).await?;
        handle.wait_with_timeout(self.wait).await?;

        let day = store.state(|state| DayView::from_state(state, zone)).await;
        store.shutdown(SHUTDOWN_GRACE).await?;

        let links = main_screen_links()
            .iter()
            .map(|link| format!("[{} -> {}]", link.label, link.to))
            .collect::<Vec<_>>()
            .join(" ");
        Ok(format!("{links}\n{}\n{day}", Route::Main.title()))
    }
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App").field("wait", &self.wait).finish_non_exhaustive()
    }
}

fn render_customer_form(form: &CustomerFormState) -> String {
    let mut text = Route::AddCustomer.title().to_string();
    for field in CustomerField::ALL {
        let _ = write!(text, "\n{}: {}", field.label(), form.value(field));
    }
    text
}
