use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DocketError, Result};
use crate::model::{OrderRecord, ValueMap};
use crate::store::backend::StorageBackend;
use crate::store::docket_store::DocketStore;

/// Place an order: inject `values` into the effective template of
/// `template_key` and store the result as a frozen snapshot.
pub fn run<B: StorageBackend>(
    store: &DocketStore<B>,
    template_key: &str,
    order_number: &str,
    values: &ValueMap,
) -> Result<CmdResult> {
    let order_number = order_number.trim();
    if order_number.is_empty() {
        return Err(DocketError::Api("Order number cannot be empty".to_string()));
    }

    let template = store.templates.resolve(template_key)?;
    let document = store.injector().inject(&template.definition, values);

    let mut result = CmdResult::default();
    let identifiers = template.definition.identifiers();
    for key in values.keys() {
        if !identifiers.contains(&key.as_str()) {
            result.add_message(CmdMessage::warning(format!(
                "No field in {} is bound to '{}'",
                template.name, key
            )));
        }
    }

    let order = OrderRecord::new(order_number, &template.key, &template.name, document);
    store.orders.save(&order)?;

    result.add_message(CmdMessage::success(format!(
        "Placed order {} ({})",
        order.order_number, template.name
    )));
    Ok(result.with_orders(vec![order]))
}
