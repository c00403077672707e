use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::CustomerFields;
use crate::records::RecordStore;
use crate::store::KeyValueStore;

pub fn run<S: KeyValueStore>(
    store: &mut RecordStore<S>,
    fields: CustomerFields,
) -> Result<CmdResult> {
    let customer = store.add(fields)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Customer information added: {}",
        customer.customer_name
    )));
    result.affected_customers.push(customer);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::today;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn adds_customer_with_todays_date() {
        let fixture = StoreFixture::new().with_customers(1);
        let mut store = RecordStore::open(fixture.store).unwrap();

        let result = run(&mut store, CustomerFields::named("Acme Buyer")).unwrap();

        assert_eq!(result.affected_customers.len(), 1);
        let added = &result.affected_customers[0];
        assert_eq!(added.id, 2);
        assert_eq!(added.created_at, today());
        assert_eq!(store.records().len(), 2);
        assert_eq!(
            result.messages[0],
            CmdMessage::success("Customer information added: Acme Buyer")
        );
    }
}
