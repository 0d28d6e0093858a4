use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::docket_store::DocketStore;

pub fn run<B: StorageBackend>(store: &DocketStore<B>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_orders(store.orders.list()))
}
