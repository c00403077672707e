use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{CustomerId, CustomerUpdate};
use crate::records::RecordStore;
use crate::store::KeyValueStore;

/// Unknown ids produce an empty result: no message, nothing persisted.
pub fn run<S: KeyValueStore>(
    store: &mut RecordStore<S>,
    id: CustomerId,
    update: CustomerUpdate,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    if let Some(customer) = store.update(id, update)? {
        result.add_message(CmdMessage::success(format!(
            "Customer information updated: {}",
            customer.customer_name
        )));
        result.affected_customers.push(customer);
    }

    Ok(result)
}
