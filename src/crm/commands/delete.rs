use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::CustomerId;
use crate::records::RecordStore;
use crate::store::KeyValueStore;

/// Removes a customer outright. Confirmation is the caller's job.
pub fn run<S: KeyValueStore>(
    store: &mut RecordStore<S>,
    id: CustomerId,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    if let Some(customer) = store.remove(id)? {
        result.add_message(CmdMessage::success(format!(
            "Customer information deleted: {}",
            customer.customer_name
        )));
        result.affected_customers.push(customer);
    }

    Ok(result)
}
