use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::Customer;
use crate::records::RecordStore;
use crate::store::KeyValueStore;

/// Search and status filter applied to the customer list.
///
/// The search term matches, case-insensitively, anywhere in the customer
/// name, company name or email. The status must match exactly. Empty values
/// match everything; when both are set a customer must satisfy both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerFilter {
    pub search: Option<String>,
    pub status: Option<String>,
}

impl CustomerFilter {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            status: None,
        }
    }

    pub fn status(status: impl Into<String>) -> Self {
        Self {
            search: None,
            status: Some(status.into()),
        }
    }

    pub fn matches(&self, customer: &Customer) -> bool {
        self.matches_search(customer) && self.matches_status(customer)
    }

    fn matches_search(&self, customer: &Customer) -> bool {
        let term = match self.search.as_deref() {
            Some(t) if !t.is_empty() => t.to_lowercase(),
            _ => return true,
        };
        [
            &customer.customer_name,
            &customer.company_name,
            &customer.email,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&term))
    }

    fn matches_status(&self, customer: &Customer) -> bool {
        match self.status.as_deref() {
            Some(s) if !s.is_empty() => customer.status == s,
            _ => true,
        }
    }
}

pub fn run<S: KeyValueStore>(
    store: &RecordStore<S>,
    filter: &CustomerFilter,
) -> Result<CmdResult> {
    let listed = store.list(|c| filter.matches(c));
    Ok(CmdResult::default().with_listed_customers(listed))
}
