//! Customer history: the request-lifecycle slice behind `/customer/:id`.
//!
//! A [`CustomerHistoryAction::QueryCustomerRequest`] drives one query
//! through the following states:
//!
//! ```text
//! Unstarted ─request─▶ Submitting ─resolved─▶ Successful
//!                          │
//!                          └──────rejected──▶ Failed
//! ```
//!
//! Every status is re-entrant: a new request from any state passes through
//! `Submitting` again. Status actions carry the [`RequestId`] of the request
//! they belong to, and only the most recently issued request may change
//! state, so a slow response to an earlier request can never overwrite a
//! later one.

use crate::error::LoadError;
use crate::normalize::normalize_customer_payload;
use crate::types::{Appointment, Customer, CustomerId, RequestId, RequestStatus};
use salon_core::effect::Effect;
use salon_core::environment::{QueryClient, QuerySpec};
use salon_core::reducer::Reducer;
use salon_core::{SmallVec, smallvec};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// Query fetching a customer together with their booked appointments
pub static CUSTOMER_HISTORY_QUERY: QuerySpec = QuerySpec {
    name: "CustomerHistoryQuery",
    text: "query CustomerHistoryQuery($id: ID!) {
  customer(id: $id) {
    id
    firstName
    lastName
    phoneNumber
    appointments {
      startsAt
      stylist
      service
      notes
    }
  }
}",
};

/// State of the customer history screen
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerHistoryState {
    /// Lifecycle of the most recent request
    pub status: RequestStatus,
    /// Customer from the last successful response
    pub customer: Customer,
    /// Appointments from the last successful response, `starts_at` in epoch ms
    pub appointments: Vec<Appointment>,
    /// Most recently issued request
    pub latest_request: RequestId,
}

/// Actions of the customer history slice
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomerHistoryAction {
    /// Load the history of a customer
    QueryCustomerRequest {
        /// Customer to load
        id: CustomerId,
    },
    /// The query for `request` is about to be sent
    QueryCustomerSubmitting {
        /// Request this status belongs to
        request: RequestId,
    },
    /// The query for `request` resolved
    QueryCustomerSuccessful {
        /// Request this status belongs to
        request: RequestId,
        /// Customer fields
        customer: Customer,
        /// Normalized appointments
        appointments: Vec<Appointment>,
    },
    /// The query for `request` failed for any reason
    QueryCustomerFailed {
        /// Request this status belongs to
        request: RequestId,
    },
}

impl CustomerHistoryAction {
    /// Shorthand for [`CustomerHistoryAction::QueryCustomerRequest`]
    #[must_use]
    pub fn request(id: impl Into<CustomerId>) -> Self {
        Self::QueryCustomerRequest { id: id.into() }
    }

    /// Whether this action ends a request
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::QueryCustomerSuccessful { .. } | Self::QueryCustomerFailed { .. }
        )
    }

    /// Request a status action belongs to
    #[must_use]
    pub const fn request_id(&self) -> Option<RequestId> {
        match self {
            Self::QueryCustomerRequest { .. } => None,
            Self::QueryCustomerSubmitting { request }
            | Self::QueryCustomerSuccessful { request, .. }
            | Self::QueryCustomerFailed { request } => Some(*request),
        }
    }
}

/// Dependencies of the customer history slice
#[derive(Clone)]
pub struct CustomerHistoryEnvironment {
    /// Client used to run [`CUSTOMER_HISTORY_QUERY`]
    pub queries: Arc<dyn QueryClient>,
}

impl CustomerHistoryEnvironment {
    /// Creates a new customer history environment
    #[must_use]
    pub fn new(queries: Arc<dyn QueryClient>) -> Self {
        Self { queries }
    }
}

/// Reducer for the customer history slice
#[derive(Clone, Debug, Default)]
pub struct CustomerHistoryReducer;

impl CustomerHistoryReducer {
    /// Creates a new customer history reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Run the query and turn its outcome into a terminal action
    ///
    /// The query is only started when the effect is polled, after the
    /// submitting status has been reduced.
    fn query_effect(
        queries: Arc<dyn QueryClient>,
        id: CustomerId,
        request: RequestId,
    ) -> Effect<CustomerHistoryAction> {
        Effect::Future(Box::pin(async move {
            match Self::load(queries.as_ref(), &id).await {
                Ok((customer, appointments)) => {
                    tracing::debug!(customer = %id, %request, count = appointments.len(), "Customer history loaded");
                    Some(CustomerHistoryAction::QueryCustomerSuccessful {
                        request,
                        customer,
                        appointments,
                    })
                },
                Err(error) => {
                    tracing::warn!(customer = %id, %request, %error, "Customer history query failed");
                    Some(CustomerHistoryAction::QueryCustomerFailed { request })
                },
            }
        }))
    }

    async fn load(
        queries: &dyn QueryClient,
        id: &CustomerId,
    ) -> Result<(Customer, Vec<Appointment>), LoadError> {
        let data = queries
            .fetch_query(&CUSTOMER_HISTORY_QUERY, json!({ "id": id }))
            .await?;
        Ok(normalize_customer_payload(data)?)
    }
}

impl Reducer for CustomerHistoryReducer {
    type State = CustomerHistoryState;
    type Action = CustomerHistoryAction;
    type Environment = CustomerHistoryEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        if let Some(request) = action
            .request_id()
            .filter(|request| *request != state.latest_request)
        {
            tracing::debug!(%request, latest = %state.latest_request, "Ignoring status of a superseded request");
            return smallvec![Effect::None];
        }

        match action {
            CustomerHistoryAction::QueryCustomerRequest { id } => {
                let request = state.latest_request.next();
                state.latest_request = request;
                state.status = RequestStatus::Submitting;

                smallvec![Effect::chain(vec![
                    Effect::dispatch(CustomerHistoryAction::QueryCustomerSubmitting { request }),
                    Self::query_effect(Arc::clone(&env.queries), id, request),
                ])]
            },
            CustomerHistoryAction::QueryCustomerSubmitting { .. } => {
                state.status = RequestStatus::Submitting;
                smallvec![Effect::None]
            },
            CustomerHistoryAction::QueryCustomerSuccessful {
                customer,
                appointments,
                ..
            } => {
                state.status = RequestStatus::Successful;
                state.customer = customer;
                state.appointments = appointments;
                smallvec![Effect::None]
            },
            CustomerHistoryAction::QueryCustomerFailed { .. } => {
                state.status = RequestStatus::Failed;
                smallvec![Effect::None]
            },
        }
    }
}
