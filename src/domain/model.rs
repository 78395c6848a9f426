use crate::utils::error::LoaderError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One row of the guest table, bound positionally as
/// (first name, last name, email).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Guest {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }

    /// The two records inserted when nothing else is configured.
    pub fn defaults() -> Vec<Guest> {
        vec![
            Guest::new("Meribin", "joe", "exampel@mail.com"),
            Guest::new("Ram", "Kumar", "exampel1@mail.com"),
        ]
    }

    pub fn trimmed(&self) -> Guest {
        Guest::new(
            self.first_name.trim(),
            self.last_name.trim(),
            self.email.trim(),
        )
    }

    pub fn as_params(&self) -> [&str; 3] {
        [
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.email.as_str(),
        ]
    }
}

/// Parses `First,Last,email` as given to `--guest`.
impl FromStr for Guest {
    type Err = LoaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        match parts.as_slice() {
            [first, last, email] => Ok(Guest::new(*first, *last, *email).trimmed()),
            _ => Err(LoaderError::InvalidConfigValueError {
                field: "guest".to_string(),
                value: s.to_string(),
                reason: "Expected 'first,last,email'".to_string(),
            }),
        }
    }
}

pub type GuestBatch = Vec<Guest>;

#[derive(Debug, Clone, Serialize)]
pub struct InsertReport {
    pub table: String,
    pub statement: String,
    pub rows_inserted: u64,
    pub guests: GuestBatch,
}
