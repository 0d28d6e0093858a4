use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::SEED_ORDER_NUMBER;
use crate::store::backend::StorageBackend;
use crate::store::docket_store::DocketStore;

pub fn run<B: StorageBackend>(store: &DocketStore<B>, order_number: &str) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    if order_number == SEED_ORDER_NUMBER {
        result.add_message(CmdMessage::warning(format!(
            "Order {} is the sample order and cannot be deleted",
            order_number
        )));
        return Ok(result);
    }

    match store.orders.delete(order_number)? {
        0 => result.add_message(CmdMessage::info(format!(
            "No order numbered {}",
            order_number
        ))),
        1 => result.add_message(CmdMessage::success(format!(
            "Order deleted: {}",
            order_number
        ))),
        n => result.add_message(CmdMessage::success(format!(
            "Order deleted: {} ({} records)",
            order_number, n
        ))),
    }
    Ok(result)
}
