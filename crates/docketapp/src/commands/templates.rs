use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::TemplateDefinition;
use crate::session::EditSession;
use crate::store::backend::StorageBackend;
use crate::store::docket_store::DocketStore;
use serde_json::Value;

pub fn list<B: StorageBackend>(store: &DocketStore<B>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_templates(store.templates.list()))
}

pub fn show<B: StorageBackend>(store: &DocketStore<B>, key: &str) -> Result<CmdResult> {
    let resolved = store.templates.resolve(key)?;
    let mut result = CmdResult::default().with_document(resolved.definition);
    result.add_message(CmdMessage::info(format!(
        "{} ({}, {})",
        resolved.name, resolved.key, resolved.source
    )));
    Ok(result)
}

/// Save `definition` as the new version of `key`, the way the builder does:
/// open a session, apply the document as one change, save.
pub fn save<B: StorageBackend>(
    store: &mut DocketStore<B>,
    key: &str,
    definition: TemplateDefinition,
) -> Result<CmdResult> {
    let mut session = EditSession::open(&store.templates, key)?;
    session.apply_change(&Value::Null, definition);

    let mut result = CmdResult::default();
    if !session.is_dirty() {
        result.add_message(CmdMessage::info(format!(
            "Template {} is unchanged, saving anyway",
            key
        )));
    }
    session.save(&mut store.templates)?;

    result.add_message(CmdMessage::success(format!(
        "Saved template {} ({})",
        session.name(),
        key
    )));
    Ok(result.with_document(session.document().clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::error::DocketError;
    use crate::store::mem_backend::MemBackend;
    use crate::store::template_store::TemplateSource;

    fn store() -> DocketStore<MemBackend> {
        DocketStore::open(MemBackend::new()).unwrap()
    }

    #[test]
    fn lists_catalog() {
        let result = list(&store()).unwrap();
        assert_eq!(result.templates.len(), 5);
        assert!(result
            .templates
            .iter()
            .all(|t| t.source == TemplateSource::Builtin));
    }

    #[test]
    fn shows_effective_definition() {
        let store = store();
        let result = show(&store, "templateThree").unwrap();
        assert_eq!(
            result.document.unwrap(),
            store.templates.get_effective("templateThree").unwrap()
        );
        assert!(result.messages[0].content.contains("Fire Pump Inspection"));
    }

    #[test]
    fn show_unknown_template_fails() {
        assert!(matches!(
            show(&store(), "zzz"),
            Err(DocketError::TemplateNotFound(_))
        ));
    }

    #[test]
    fn save_updates_effective_template() {
        let mut store = store();
        let definition = TemplateDefinition::new("Mine", vec![]);
        let result = save(&mut store, "templateOne", definition.clone()).unwrap();

        assert_eq!(store.templates.get_effective("templateOne").unwrap(), definition);
        assert_eq!(result.messages.last().unwrap().level, MessageLevel::Success);
    }

    #[test]
    fn saving_unchanged_template_notes_it() {
        let mut store = store();
        let current = store.templates.get_effective("templateOne").unwrap();
        let result = save(&mut store, "templateOne", current).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Info);
    }
}
