use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::docket_store::DocketStore;

pub fn run<B: StorageBackend>(store: &DocketStore<B>, order_number: &str) -> Result<CmdResult> {
    let resolved = store.resolver().get_by_number(order_number)?;
    Ok(CmdResult::default()
        .with_orders(vec![resolved.record])
        .with_document(resolved.document))
}
