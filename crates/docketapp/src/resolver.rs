//! # Order Resolution
//!
//! Turns an order number into the document to render.
//!
//! - Stored orders carry a frozen document; it is returned as saved, even if
//!   the template it came from has changed since.
//! - The seed order has no document. It is built on every call from the
//!   *current* effective template of its key, injected with the static values
//!   for that key. Row ids therefore differ between calls.

use crate::catalog::StaticValues;
use crate::error::{DocketError, Result};
use crate::inject::Injector;
use crate::model::{OrderRecord, TemplateDefinition, ValueMap};
use crate::store::backend::{StorageBackend, ORDERS_KEY};
use crate::store::order_store::OrderStore;
use crate::store::template_store::TemplateStore;

#[derive(Debug, Clone)]
pub struct ResolvedOrder {
    pub record: OrderRecord,
    pub document: TemplateDefinition,
}

pub struct OrderResolver<'a, B: StorageBackend> {
    templates: &'a TemplateStore<B>,
    orders: &'a OrderStore<B>,
    injector: &'a Injector,
    values: &'a StaticValues,
}

impl<'a, B: StorageBackend> OrderResolver<'a, B> {
    pub fn new(
        templates: &'a TemplateStore<B>,
        orders: &'a OrderStore<B>,
        injector: &'a Injector,
        values: &'a StaticValues,
    ) -> Self {
        Self {
            templates,
            orders,
            injector,
            values,
        }
    }

    pub fn get_by_number(&self, order_number: &str) -> Result<ResolvedOrder> {
        let record = self
            .orders
            .find(order_number)
            .ok_or_else(|| DocketError::OrderNotFound(order_number.to_string()))?;

        let document = match (&record.document, record.is_static) {
            (_, true) => self.static_document(&record.template_key)?,
            (Some(document), false) => document.clone(),
            (None, false) => {
                return Err(DocketError::StorageCorrupt {
                    key: ORDERS_KEY.to_string(),
                    message: format!("order '{}' has no document", record.order_number),
                })
            }
        };

        Ok(ResolvedOrder { record, document })
    }

    /// Effective template for `template_key` with its static values injected.
    pub fn static_document(&self, template_key: &str) -> Result<TemplateDefinition> {
        let template = self.templates.get_effective(template_key)?;
        let empty = ValueMap::new();
        let values = self.values.for_key(template_key).unwrap_or(&empty);
        Ok(self.injector.inject(&template, values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TemplateCatalog;
    use crate::field_options::FieldOptionCatalog;
    use crate::model::{Field, FieldKind, SEED_ORDER_NUMBER, SEED_TEMPLATE_KEY};
    use crate::store::mem_backend::MemBackend;
    use serde_json::json;
    use std::rc::Rc;

    struct Fixture {
        templates: TemplateStore<MemBackend>,
        orders: OrderStore<MemBackend>,
        injector: Injector,
        values: StaticValues,
    }

    impl Fixture {
        fn new() -> Self {
            let backend = Rc::new(MemBackend::new());
            Self {
                templates: TemplateStore::new(backend.clone(), TemplateCatalog::builtin().unwrap()),
                orders: OrderStore::new(backend),
                injector: Injector::with_field_options(FieldOptionCatalog::builtin().unwrap()),
                values: StaticValues::builtin().unwrap(),
            }
        }

        fn resolver(&self) -> OrderResolver<'_, MemBackend> {
            OrderResolver::new(&self.templates, &self.orders, &self.injector, &self.values)
        }
    }

    #[test]
    fn seed_document_is_injected_from_static_values() {
        let fixture = Fixture::new();
        let resolved = fixture.resolver().get_by_number(SEED_ORDER_NUMBER).unwrap();

        assert!(resolved.record.is_static);
        let doc = &resolved.document;
        assert_eq!(doc.field("order_number").unwrap().kind.value(), Some(&json!("PKG-001")));

        let products = doc.field("product_list").unwrap().kind.as_table().unwrap();
        assert_eq!(products.rows.len(), 2);
        assert!(products.columns.as_ref().is_some_and(|c| !c.is_empty()));
        assert!(products.row_order_is_consistent());
    }

    #[test]
    fn seed_follows_template_overrides() {
        let mut fixture = Fixture::new();
        let replacement = TemplateDefinition::new(
            "Slim",
            vec![Field::new(Some("order_number"), FieldKind::Text(None))],
        );
        fixture.templates.save(SEED_TEMPLATE_KEY, replacement).unwrap();

        let doc = fixture.resolver().get_by_number(SEED_ORDER_NUMBER).unwrap().document;
        assert_eq!(doc.fields.len(), 1);
        assert_eq!(doc.name.as_deref(), Some("Slim"));
        assert_eq!(doc.fields[0].kind.value(), Some(&json!("PKG-001")));
    }

    #[test]
    fn seed_rows_are_fresh_on_every_read() {
        let fixture = Fixture::new();
        let resolver = fixture.resolver();
        let first = resolver.get_by_number(SEED_ORDER_NUMBER).unwrap().document;
        let second = resolver.get_by_number(SEED_ORDER_NUMBER).unwrap().document;

        let ids = |doc: &TemplateDefinition| {
            doc.field("product_list").unwrap().kind.as_table().unwrap().rows[0].id.clone()
        };
        assert_ne!(ids(&first), ids(&second));
    }

    #[test]
    fn stored_orders_keep_their_snapshot() {
        let mut fixture = Fixture::new();
        let snapshot = fixture.templates.get_effective("templateTwo").unwrap();
        fixture
            .orders
            .save(&OrderRecord::new("ORD-7", "templateTwo", "Intake Form", snapshot.clone()))
            .unwrap();

        fixture
            .templates
            .save("templateTwo", TemplateDefinition::new("Changed", vec![]))
            .unwrap();

        let resolved = fixture.resolver().get_by_number("ORD-7").unwrap();
        assert_eq!(resolved.document, snapshot);
    }

    #[test]
    fn unknown_number_is_not_found() {
        let fixture = Fixture::new();
        assert!(matches!(
            fixture.resolver().get_by_number("nope"),
            Err(DocketError::OrderNotFound(ref n)) if n == "nope"
        ));
    }

    #[test]
    fn template_without_static_values_renders_as_is() {
        let fixture = Fixture::new();
        let doc = fixture.resolver().static_document("templateOne").unwrap();
        assert_eq!(doc, fixture.templates.get_effective("templateOne").unwrap());
    }
}
