//! Navigation between screens.

use super::routes::Route;
use crate::types::Customer;
use salon_core::effect::Effect;
use salon_core::reducer::Reducer;
use salon_core::{SmallVec, smallvec};
use serde::{Deserialize, Serialize};

/// Which screen is shown, plus what it was opened with
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellState {
    /// Current screen
    pub route: Route,
    /// Customer the appointment form books for
    pub customer_for_appointment: Option<Customer>,
}

/// Navigation gestures
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShellAction {
    /// Follow a link
    Navigate(Route),
    /// "Create appointment" pressed next to a search result
    CreateAppointment(Customer),
    /// "View history" pressed next to a search result
    ViewHistory(Customer),
}

/// Reducer for navigation
#[derive(Clone, Debug, Default)]
pub struct ShellReducer;

impl ShellReducer {
    /// Creates a new shell reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for ShellReducer {
    type State = ShellState;
    type Action = ShellAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ShellAction::Navigate(route) => {
                tracing::debug!(%route, "Navigating");
                state.route = route;
            },
            ShellAction::CreateAppointment(customer) => {
                state.customer_for_appointment = Some(customer);
                state.route = Route::AddAppointment;
            },
            ShellAction::ViewHistory(customer) => match customer.id {
                Some(id) => state.route = Route::CustomerHistory { id },
                None => tracing::warn!("Cannot show the history of an unsaved customer"),
            },
        }
        smallvec![Effect::None]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CustomerId;
    use salon_testing::{ReducerTest, assertions};

    fn saved_customer() -> Customer {
        Customer {
            id: Some(CustomerId::from(123)),
            ..Customer::default()
        }
    }

    #[test]
    fn navigate_switches_screen() {
        ReducerTest::new(ShellReducer::new())
            .with_env(())
            .given_state(ShellState::default())
            .when_action(ShellAction::Navigate(Route::SearchCustomers))
            .then_state(|state| assert_eq!(state.route, Route::SearchCustomers))
            .then_effects(|effects| assertions::assert_no_effects(effects))
            .run();
    }

    #[test]
    fn create_appointment_passes_the_customer_to_the_form() {
        ReducerTest::new(ShellReducer::new())
            .with_env(())
            .given_state(ShellState {
                route: Route::SearchCustomers,
                customer_for_appointment: None,
            })
            .when_action(ShellAction::CreateAppointment(saved_customer()))
            .then_state(|state| {
                assert_eq!(state.route, Route::AddAppointment);
                assert_eq!(state.customer_for_appointment, Some(saved_customer()));
            })
            .run();
    }

    #[test]
    fn view_history_navigates_to_the_customer() {
        ReducerTest::new(ShellReducer::new())
            .with_env(())
            .given_state(ShellState::default())
            .when_action(ShellAction::ViewHistory(saved_customer()))
            .then_state(|state| assert_eq!(state.route.path(), "/customer/123"))
            .run();
    }

    #[test]
    fn view_history_of_unsaved_customer_stays_put() {
        ReducerTest::new(ShellReducer::new())
            .with_env(())
            .given_state(ShellState::default())
            .when_action(ShellAction::ViewHistory(Customer::default()))
            .then_state(|state| assert_eq!(state.route, Route::Main))
            .run();
    }
}
