use crate::error::CrmError;
use chrono::Utc;
use std::fmt;
use std::str::FromStr;

/// Positional record id. See [`crate::codec`] for how ids are derived at load time.
pub type CustomerId = u64;

pub const STATUS_NEW: &str = "New";
pub const STATUS_PROSPECT: &str = "Prospect";
pub const STATUS_EXISTING: &str = "Existing Customer";

/// Date format used for `created_at`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Today's date (UTC) in `YYYY-MM-DD` form.
pub fn today() -> String {
    Utc::now().format(DATE_FORMAT).to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: CustomerId,
    pub customer_name: String,
    pub company_name: String,
    pub email: String,
    pub phone: String,
    pub status: String,
    pub assignee: String,
    pub notes: String,
    pub created_at: String,
}

impl Customer {
    /// Builds a record dated today.
    pub fn new(id: CustomerId, fields: CustomerFields) -> Self {
        Self::with_date(id, fields, today())
    }

    pub fn with_date(id: CustomerId, fields: CustomerFields, created_at: String) -> Self {
        Self {
            id,
            customer_name: fields.customer_name,
            company_name: fields.company_name,
            email: fields.email,
            phone: fields.phone,
            status: fields.status,
            assignee: fields.assignee,
            notes: fields.notes,
            created_at,
        }
    }

    /// Overwrites every field present in `update`. `id` and `created_at` never change.
    pub fn apply(&mut self, update: CustomerUpdate) {
        let CustomerUpdate {
            customer_name,
            company_name,
            email,
            phone,
            status,
            assignee,
            notes,
        } = update;

        if let Some(v) = customer_name {
            self.customer_name = v;
        }
        if let Some(v) = company_name {
            self.company_name = v;
        }
        if let Some(v) = email {
            self.email = v;
        }
        if let Some(v) = phone {
            self.phone = v;
        }
        if let Some(v) = status {
            self.status = v;
        }
        if let Some(v) = assignee {
            self.assignee = v;
        }
        if let Some(v) = notes {
            self.notes = v;
        }
    }

    pub fn fields(&self) -> CustomerFields {
        CustomerFields {
            customer_name: self.customer_name.clone(),
            company_name: self.company_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            status: self.status.clone(),
            assignee: self.assignee.clone(),
            notes: self.notes.clone(),
        }
    }
}

/// The editable part of a record, as submitted from a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerFields {
    pub customer_name: String,
    pub company_name: String,
    pub email: String,
    pub phone: String,
    pub status: String,
    pub assignee: String,
    pub notes: String,
}

impl CustomerFields {
    pub fn named(customer_name: impl Into<String>) -> Self {
        Self {
            customer_name: customer_name.into(),
            ..Self::default()
        }
    }
}

/// A partial edit: `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerUpdate {
    pub customer_name: Option<String>,
    pub company_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: Option<String>,
    pub assignee: Option<String>,
    pub notes: Option<String>,
}

impl From<CustomerFields> for CustomerUpdate {
    fn from(fields: CustomerFields) -> Self {
        Self {
            customer_name: Some(fields.customer_name),
            company_name: Some(fields.company_name),
            email: Some(fields.email),
            phone: Some(fields.phone),
            status: Some(fields.status),
            assignee: Some(fields.assignee),
            notes: Some(fields.notes),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = CrmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(CrmError::Api(format!("Unknown theme: {}", other))),
        }
    }
}

/// The records a fresh installation starts with.
pub fn sample_customers() -> Vec<Customer> {
    let sample = |id,
                  name: &str,
                  company: &str,
                  email: &str,
                  phone: &str,
                  status: &str,
                  assignee: &str,
                  notes: &str,
                  date: &str| Customer {
        id,
        customer_name: name.to_string(),
        company_name: company.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        status: status.to_string(),
        assignee: assignee.to_string(),
        notes: notes.to_string(),
        created_at: date.to_string(),
    };

    vec![
        sample(
            1,
            "Taro Tanaka",
            "Sample Corporation",
            "tanaka@sample.co.jp",
            "03-1234-5678",
            STATUS_EXISTING,
            "Sato Sales",
            "Regular follow-up required",
            "2025-01-01",
        ),
        sample(
            2,
            "Hanako Yamada",
            "Test Trading Company",
            "yamada@test.com",
            "06-9876-5432",
            STATUS_PROSPECT,
            "Suzuki Sales",
            "Presentation scheduled for next month",
            "2025-01-02",
        ),
        sample(
            3,
            "Jiro Sato",
            "Demo Corporation",
            "sato@demo.jp",
            "052-1111-2222",
            STATUS_NEW,
            "Tanaka Sales",
            "Initial contact completed",
            "2025-01-03",
        ),
    ]
}
