use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::docket_store::DocketStore;

pub fn run<B: StorageBackend>(store: &DocketStore<B>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    result.identifier_options = store.field_options().identifier_options();
    Ok(result)
}
