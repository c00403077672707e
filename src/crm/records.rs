//! # Record Store
//!
//! [`RecordStore`] owns the ordered, in-memory collection of customers and
//! mirrors it to the [`DATA_KEY`] entry of a [`KeyValueStore`] after every
//! mutation. It also reads and writes the theme preference under [`THEME_KEY`].
//!
//! ## Malformed Data
//!
//! Persisted data that cannot be decoded never surfaces as an error: the
//! collection falls back to empty and a warning is logged. Storage failures
//! (a directory that cannot be read) are still returned to the caller.
//!
//! ## Ids
//!
//! Ids are positional (see [`crate::codec`]). A new record gets one more than
//! the largest id in the collection, which keeps ids unique for the lifetime
//! of the store.

use crate::codec;
use crate::error::Result;
use crate::model::{sample_customers, Customer, CustomerFields, CustomerId, CustomerUpdate, Theme};
use crate::store::{KeyValueStore, DATA_KEY, THEME_KEY};

pub struct RecordStore<S: KeyValueStore> {
    backend: S,
    customers: Vec<Customer>,
}

impl<S: KeyValueStore> RecordStore<S> {
    /// Wraps a backend. The collection is empty until [`RecordStore::load`] runs.
    pub fn new(backend: S) -> Self {
        Self {
            backend,
            customers: Vec::new(),
        }
    }

    /// Creates a store and loads it in one step.
    pub fn open(backend: S) -> Result<Self> {
        let mut store = Self::new(backend);
        store.load()?;
        Ok(store)
    }

    pub fn load(&mut self) -> Result<()> {
        match self.backend.get(DATA_KEY)? {
            None => {
                tracing::debug!("no stored customers, seeding sample data");
                self.customers = sample_customers();
                self.save()?;
            }
            Some(raw) => self.customers = decode_or_empty(&raw),
        }
        tracing::debug!(count = self.customers.len(), "loaded customers");
        Ok(())
    }

    pub fn save(&mut self) -> Result<()> {
        let blob = codec::encode(&self.customers);
        self.backend.set(DATA_KEY, blob.as_bytes())
    }

    pub fn add(&mut self, fields: CustomerFields) -> Result<Customer> {
        let customer = Customer::new(self.next_id(), fields);
        self.customers.push(customer.clone());
        self.save()?;
        Ok(customer)
    }

    /// Returns `None` (and persists nothing) when `id` is unknown.
    pub fn update(&mut self, id: CustomerId, update: CustomerUpdate) -> Result<Option<Customer>> {
        let Some(customer) = self.customers.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        customer.apply(update);
        let updated = customer.clone();
        self.save()?;
        Ok(Some(updated))
    }

    /// Returns `None` (and persists nothing) when `id` is unknown.
    pub fn remove(&mut self, id: CustomerId) -> Result<Option<Customer>> {
        let Some(pos) = self.customers.iter().position(|c| c.id == id) else {
            return Ok(None);
        };
        let removed = self.customers.remove(pos);
        self.save()?;
        Ok(Some(removed))
    }

    pub fn list<P>(&self, predicate: P) -> Vec<Customer>
    where
        P: Fn(&Customer) -> bool,
    {
        self.customers
            .iter()
            .filter(|c| predicate(c))
            .cloned()
            .collect()
    }

    pub fn records(&self) -> &[Customer] {
        &self.customers
    }

    pub fn get(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    /// Replaces the whole collection with the records in `raw`.
    ///
    /// `raw` itself is persisted unchanged, so exporting right after an import
    /// gives back the imported text.
    pub fn replace_all(&mut self, raw: &str) -> Result<()> {
        self.customers = codec::decode(raw);
        self.backend.set(DATA_KEY, raw.as_bytes())?;
        tracing::debug!(count = self.customers.len(), "replaced customers");
        Ok(())
    }

    /// The persisted blob, byte for byte. Empty when nothing has been stored yet.
    pub fn blob(&self) -> Result<Vec<u8>> {
        Ok(self.backend.get(DATA_KEY)?.unwrap_or_default())
    }

    pub fn theme(&self) -> Result<Theme> {
        let Some(raw) = self.backend.get(THEME_KEY)? else {
            return Ok(Theme::default());
        };
        let value = String::from_utf8_lossy(&raw);
        match value.trim().parse() {
            Ok(theme) => Ok(theme),
            Err(e) => {
                tracing::warn!(value = %value, "ignoring stored theme: {}", e);
                Ok(Theme::default())
            }
        }
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.backend.set(THEME_KEY, theme.as_str().as_bytes())
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    fn next_id(&self) -> CustomerId {
        self.customers.iter().map(|c| c.id).max().unwrap_or(0) + 1
    }
}

fn decode_or_empty(raw: &[u8]) -> Vec<Customer> {
    match codec::decode_bytes(raw) {
        Ok(customers) => customers,
        Err(e) => {
            tracing::warn!("error loading customer data, starting empty: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{today, STATUS_NEW, STATUS_PROSPECT};
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    fn ids<S: KeyValueStore>(store: &RecordStore<S>) -> Vec<CustomerId> {
        store.records().iter().map(|c| c.id).collect()
    }

    #[test]
    fn load_seeds_samples_and_persists_them() {
        let mut store = RecordStore::new(InMemoryStore::new());
        store.load().unwrap();

        assert_eq!(store.records(), sample_customers().as_slice());
        assert_eq!(store.backend().writes(), 1);

        let reloaded = RecordStore::open(store.backend().clone()).unwrap();
        assert_eq!(reloaded.records(), sample_customers().as_slice());
        assert_eq!(reloaded.backend().writes(), 1);
    }

    #[test]
    fn load_of_empty_blob_does_not_seed() {
        let fixture = StoreFixture::new().empty();
        let store = RecordStore::open(fixture.store).unwrap();
        assert!(store.records().is_empty());
    }

    #[test]
    fn malformed_blob_loads_as_empty_without_error() {
        let fixture = StoreFixture::new().with_raw_data(&[0xc3, 0x28, b'|', b'x']);
        let store = RecordStore::open(fixture.store).unwrap();
        assert!(store.records().is_empty());
    }

    #[test]
    fn malformed_blob_is_left_untouched() {
        let raw = [0xff, b'A'];
        let fixture = StoreFixture::new().with_raw_data(&raw);
        let store = RecordStore::open(fixture.store).unwrap();
        assert_eq!(store.backend().get(DATA_KEY).unwrap(), Some(raw.to_vec()));
    }

    #[test]
    fn add_to_empty_store() {
        let fixture = StoreFixture::new().empty();
        let mut store = RecordStore::open(fixture.store).unwrap();

        let added = store
            .add(CustomerFields {
                customer_name: "A".into(),
                company_name: "B".into(),
                ..CustomerFields::default()
            })
            .unwrap();

        assert_eq!(store.records().len(), 1);
        let only = &store.records()[0];
        assert_eq!(only, &added);
        assert_eq!(only.customer_name, "A");
        assert_eq!(only.company_name, "B");
        assert_ne!(only.id, 0);
        assert_eq!(only.created_at, today());
    }

    #[test]
    fn add_appends_and_persists() {
        let fixture = StoreFixture::new().with_customers(2);
        let mut store = RecordStore::open(fixture.store).unwrap();

        let added = store.add(CustomerFields::named("Third")).unwrap();
        assert_eq!(added.id, 3);
        assert_eq!(ids(&store), vec![1, 2, 3]);

        let reloaded = RecordStore::open(store.backend().clone()).unwrap();
        assert_eq!(reloaded.records().last().unwrap().customer_name, "Third");
        assert_eq!(reloaded.records().last().unwrap().id, added.id);
    }

    #[test]
    fn add_after_remove_never_reuses_a_live_id() {
        let fixture = StoreFixture::new().with_customers(3);
        let mut store = RecordStore::open(fixture.store).unwrap();

        store.remove(1).unwrap();
        let added = store.add(CustomerFields::named("New")).unwrap();

        assert_eq!(added.id, 4);
        assert_eq!(ids(&store), vec![2, 3, 4]);
    }

    #[test]
    fn update_merges_over_existing_record() {
        let fixture = StoreFixture::new().with_customers(3);
        let mut store = RecordStore::open(fixture.store).unwrap();
        let before = store.get(2).unwrap().clone();

        let updated = store
            .update(
                2,
                CustomerUpdate {
                    phone: Some("555".into()),
                    status: Some(STATUS_PROSPECT.into()),
                    ..CustomerUpdate::default()
                },
            )
            .unwrap()
            .unwrap();

        assert_eq!(updated.phone, "555");
        assert_eq!(updated.status, STATUS_PROSPECT);
        assert_eq!(updated.customer_name, before.customer_name);
        assert_eq!(updated.created_at, before.created_at);
        assert_eq!(updated.id, 2);

        let reloaded = RecordStore::open(store.backend().clone()).unwrap();
        assert_eq!(reloaded.get(2).unwrap().phone, "555");
    }

    #[test]
    fn update_unknown_id_is_a_silent_noop() {
        let fixture = StoreFixture::new().with_customers(3);
        let mut store = RecordStore::open(fixture.store).unwrap();
        let before = store.records().to_vec();
        let writes = store.backend().writes();

        let result = store
            .update(999, CustomerUpdate::from(CustomerFields::named("X")))
            .unwrap();

        assert!(result.is_none());
        assert_eq!(store.records(), before.as_slice());
        assert_eq!(store.backend().writes(), writes);
    }

    #[test]
    fn remove_keeps_relative_order() {
        let fixture = StoreFixture::new().with_customers(3);
        let mut store = RecordStore::open(fixture.store).unwrap();

        let removed = store.remove(2).unwrap().unwrap();

        assert_eq!(removed.customer_name, "Customer2");
        assert_eq!(ids(&store), vec![1, 3]);
    }

    #[test]
    fn remove_unknown_id_is_a_noop() {
        let fixture = StoreFixture::new().with_customers(3);
        let mut store = RecordStore::open(fixture.store).unwrap();
        assert!(store.remove(42).unwrap().is_none());
        assert_eq!(ids(&store), vec![1, 2, 3]);
    }

    #[test]
    fn reload_after_remove_renumbers_by_position() {
        let fixture = StoreFixture::new().with_customers(3);
        let mut store = RecordStore::open(fixture.store).unwrap();
        store.remove(1).unwrap();

        let reloaded = RecordStore::open(store.backend().clone()).unwrap();
        assert_eq!(ids(&reloaded), vec![1, 2]);
        assert_eq!(reloaded.get(1).unwrap().customer_name, "Customer2");
    }

    #[test]
    fn list_filters_in_insertion_order() {
        let fixture = StoreFixture::new()
            .with_customer("Ann", STATUS_NEW)
            .with_customer("Bob", STATUS_PROSPECT)
            .with_customer("Cid", STATUS_NEW);
        let store = RecordStore::open(fixture.store).unwrap();

        let listed = store.list(|c| c.status == STATUS_NEW);

        let names: Vec<_> = listed.iter().map(|c| c.customer_name.as_str()).collect();
        assert_eq!(names, vec!["Ann", "Cid"]);
        assert_eq!(store.records().len(), 3);
    }

    #[test]
    fn replace_all_swaps_collection_and_keeps_raw_blob() {
        let fixture = StoreFixture::new().with_customers(3);
        let mut store = RecordStore::open(fixture.store).unwrap();
        let raw = "Imported|Co|||New|||2025-05-05\n\n";

        store.replace_all(raw).unwrap();

        assert_eq!(store.records().len(), 1);
        assert_eq!(store.records()[0].customer_name, "Imported");
        assert_eq!(store.blob().unwrap(), raw.as_bytes());

        let reloaded = RecordStore::open(store.backend().clone()).unwrap();
        assert_eq!(reloaded.records(), store.records());
    }

    #[test]
    fn blob_keeps_undecodable_bytes() {
        let raw = [b'A', b'|', 0xff, 0xfe];
        let fixture = StoreFixture::new().with_raw_data(&raw);
        let store = RecordStore::open(fixture.store).unwrap();

        assert!(store.records().is_empty());
        assert_eq!(store.blob().unwrap(), raw.to_vec());
    }

    #[test]
    fn theme_defaults_to_light_and_round_trips() {
        let mut store = RecordStore::new(InMemoryStore::new());
        assert_eq!(store.theme().unwrap(), Theme::Light);

        store.set_theme(Theme::Dark).unwrap();
        assert_eq!(store.theme().unwrap(), Theme::Dark);
        assert_eq!(
            store.backend().get(THEME_KEY).unwrap(),
            Some(b"dark".to_vec())
        );
    }

    #[test]
    fn unknown_theme_value_reads_as_light() {
        let fixture = StoreFixture::new().with_theme("purple");
        let store = RecordStore::new(fixture.store);
        assert_eq!(store.theme().unwrap(), Theme::Light);
    }
}
