use super::backend::StorageBackend;
use super::order_store::OrderStore;
use super::template_store::TemplateStore;
use crate::catalog::{StaticValues, TemplateCatalog};
use crate::error::Result;
use crate::field_options::FieldOptionCatalog;
use crate::inject::Injector;
use crate::resolver::OrderResolver;
use std::rc::Rc;

/// Both stores over one shared backend, plus what it takes to render orders.
pub struct DocketStore<B: StorageBackend> {
    pub templates: TemplateStore<B>,
    pub orders: OrderStore<B>,
    field_options: FieldOptionCatalog,
    injector: Injector,
    static_values: StaticValues,
}

impl<B: StorageBackend> DocketStore<B> {
    pub fn new(
        backend: B,
        catalog: TemplateCatalog,
        field_options: FieldOptionCatalog,
        static_values: StaticValues,
    ) -> Self {
        let backend = Rc::new(backend);
        Self {
            templates: TemplateStore::new(backend.clone(), catalog),
            orders: OrderStore::new(backend),
            injector: Injector::with_field_options(field_options.clone()),
            field_options,
            static_values,
        }
    }

    /// A store over the shipped catalogs, with saved overrides applied.
    pub fn open(backend: B) -> Result<Self> {
        let mut store = Self::new(
            backend,
            TemplateCatalog::builtin()?,
            FieldOptionCatalog::builtin()?,
            StaticValues::builtin()?,
        );
        store.templates.reconcile();
        Ok(store)
    }

    pub fn injector(&self) -> &Injector {
        &self.injector
    }

    pub fn field_options(&self) -> &FieldOptionCatalog {
        &self.field_options
    }

    pub fn resolver(&self) -> OrderResolver<'_, B> {
        OrderResolver::new(
            &self.templates,
            &self.orders,
            &self.injector,
            &self.static_values,
        )
    }
}
