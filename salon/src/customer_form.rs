//! Customer registration form.

use crate::types::Customer;
use salon_core::effect::Effect;
use salon_core::reducer::Reducer;
use salon_core::{SmallVec, smallvec};
use serde::{Deserialize, Serialize};

/// Editable fields of the customer form
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomerField {
    /// First name
    FirstName,
    /// Last name
    LastName,
    /// Phone number
    PhoneNumber,
}

impl CustomerField {
    /// Every field, in form order
    pub const ALL: [Self; 3] = [Self::FirstName, Self::LastName, Self::PhoneNumber];

    /// Element id, shared by the input and its label
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::PhoneNumber => "phoneNumber",
        }
    }

    /// Label text
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::PhoneNumber => "Phone number",
        }
    }
}

/// Current values of the form
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerFormState {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Phone number
    pub phone_number: String,
}

impl CustomerFormState {
    /// Form pre-filled with an existing customer
    #[must_use]
    pub fn with_existing(customer: &Customer) -> Self {
        Self {
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            phone_number: customer.phone_number.clone(),
        }
    }

    /// Current value of `field`
    #[must_use]
    pub fn value(&self, field: CustomerField) -> &str {
        match field {
            CustomerField::FirstName => &self.first_name,
            CustomerField::LastName => &self.last_name,
            CustomerField::PhoneNumber => &self.phone_number,
        }
    }

    fn value_mut(&mut self, field: CustomerField) -> &mut String {
        match field {
            CustomerField::FirstName => &mut self.first_name,
            CustomerField::LastName => &mut self.last_name,
            CustomerField::PhoneNumber => &mut self.phone_number,
        }
    }

    /// The customer the form currently describes
    #[must_use]
    pub fn to_customer(&self) -> Customer {
        Customer {
            id: None,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone_number: self.phone_number.clone(),
        }
    }
}

/// Actions of the customer form
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomerFormAction {
    /// The user edited a field
    Changed {
        /// Edited field
        field: CustomerField,
        /// New value
        value: String,
    },
    /// The user submitted the form
    Submit,
    /// The form was submitted with these values
    Submitted {
        /// Values at submission time
        customer: Customer,
    },
}

/// Reducer for the customer form
#[derive(Clone, Debug, Default)]
pub struct CustomerFormReducer;

impl CustomerFormReducer {
    /// Creates a new customer form reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for CustomerFormReducer {
    type State = CustomerFormState;
    type Action = CustomerFormAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CustomerFormAction::Changed { field, value } => {
                *state.value_mut(field) = value;
                smallvec![Effect::None]
            },
            CustomerFormAction::Submit => {
                smallvec![Effect::dispatch(CustomerFormAction::Submitted {
                    customer: state.to_customer(),
                })]
            },
            // Observed by whoever hosts the form
            CustomerFormAction::Submitted { .. } => smallvec![Effect::None],
        }
    }
}
