use super::KeyValueStore;
use crate::error::Result;
use std::collections::HashMap;
use std::path::PathBuf;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    values: HashMap<String, Vec<u8>>,
    writes: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `set` calls, to check when the record store persists.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        self.values.insert(key.to_string(), value.to_vec());
        self.writes += 1;
        Ok(())
    }

    fn location(&self, _key: &str) -> Option<PathBuf> {
        None
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::codec;
    use crate::model::{Customer, CustomerFields};
    use crate::store::{DATA_KEY, THEME_KEY};

    pub struct StoreFixture {
        pub store: InMemoryStore,
        customers: Vec<Customer>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
                customers: Vec::new(),
            }
        }

        /// Appends a customer with the given name and status.
        pub fn with_customer(mut self, name: &str, status: &str) -> Self {
            let id = self.customers.len() as u64 + 1;
            let fields = CustomerFields {
                customer_name: name.to_string(),
                company_name: format!("{} Inc", name),
                email: format!("{}@example.com", name.to_lowercase()),
                status: status.to_string(),
                ..CustomerFields::default()
            };
            self.customers
                .push(Customer::with_date(id, fields, "2025-03-01".to_string()));
            self.persist();
            self
        }

        pub fn with_customers(mut self, count: usize) -> Self {
            for i in 0..count {
                self = self.with_customer(&format!("Customer{}", i + 1), "New");
            }
            self
        }

        /// Stores an empty blob so that loading does not seed samples.
        pub fn empty(mut self) -> Self {
            self.customers.clear();
            self.persist();
            self
        }

        pub fn with_raw_data(mut self, raw: &[u8]) -> Self {
            self.store.set(DATA_KEY, raw).unwrap();
            self
        }

        pub fn with_theme(mut self, theme: &str) -> Self {
            self.store.set(THEME_KEY, theme.as_bytes()).unwrap();
            self
        }

        fn persist(&mut self) {
            let blob = codec::encode(&self.customers);
            self.store.set(DATA_KEY, blob.as_bytes()).unwrap();
        }
    }
}
