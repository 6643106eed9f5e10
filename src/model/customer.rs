//! Customer entity and its write payloads

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::id::CustomerId;
use super::lenient;

/// A persisted customer record.
///
/// Serialized as `{ id, name, dateOfBirth, memberNumber, interests }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub member_number: i64,
    pub interests: String,
}

impl Customer {
    /// Materialize a new record under the given id
    pub fn from_new(id: CustomerId, new: NewCustomer) -> Self {
        Self {
            id,
            name: new.name,
            date_of_birth: new.date_of_birth,
            member_number: new.member_number,
            interests: new.interests,
        }
    }
}

/// Candidate fields for creating a customer. All four are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub name: String,
    #[serde(deserialize_with = "lenient::date")]
    pub date_of_birth: NaiveDate,
    #[serde(deserialize_with = "lenient::number")]
    pub member_number: i64,
    pub interests: String,
}

/// Fields to replace on an existing customer.
///
/// Only the fields present are written; absent and `null` fields leave the
/// stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::option_date"
    )]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::option_number"
    )]
    pub member_number: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interests: Option<String>,
}

impl CustomerPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.date_of_birth.is_none()
            && self.member_number.is_none()
            && self.interests.is_none()
    }

    /// Write the supplied fields onto `customer`. The id is never touched.
    pub fn apply_to(self, customer: &mut Customer) {
        if let Some(name) = self.name {
            customer.name = name;
        }
        if let Some(date_of_birth) = self.date_of_birth {
            customer.date_of_birth = date_of_birth;
        }
        if let Some(member_number) = self.member_number {
            customer.member_number = member_number;
        }
        if let Some(interests) = self.interests {
            customer.interests = interests;
        }
    }
}
