//! Column schema resolution for table fields.
//!
//! A table field's columns usually live on the field itself. Some templates
//! define their tables out-of-band, in which case the schema is looked up in
//! the [`FieldOptionCatalog`] by the field's identifier. [`ColumnResolver`]
//! tries each [`ColumnSource`] in order and stops at the first hit.

use crate::field_options::FieldOptionCatalog;
use crate::model::{Field, TableColumn};

pub trait ColumnSource {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    fn columns_for(&self, field: &Field) -> Option<Vec<TableColumn>>;
}

/// Columns declared on the field (`tableColumns`).
pub struct DeclaredColumns;

impl ColumnSource for DeclaredColumns {
    fn name(&self) -> &'static str {
        "field"
    }

    fn columns_for(&self, field: &Field) -> Option<Vec<TableColumn>> {
        field
            .kind
            .as_table()?
            .columns
            .as_ref()
            .filter(|columns| !columns.is_empty())
            .cloned()
    }
}

impl ColumnSource for FieldOptionCatalog {
    fn name(&self) -> &'static str {
        "field options"
    }

    fn columns_for(&self, field: &Field) -> Option<Vec<TableColumn>> {
        let identifier = field.identifier.as_deref()?;
        self.table_columns(identifier).map(<[TableColumn]>::to_vec)
    }
}

#[derive(Default)]
pub struct ColumnResolver {
    sources: Vec<Box<dyn ColumnSource>>,
}

impl ColumnResolver {
    /// A resolver that only trusts the field's own columns.
    pub fn declared() -> Self {
        Self::default().with_source(DeclaredColumns)
    }

    pub fn with_source(mut self, source: impl ColumnSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    pub fn resolve(&self, field: &Field) -> Option<Vec<TableColumn>> {
        self.sources.iter().enumerate().find_map(|(position, source)| {
            let columns = source.columns_for(field)?;
            if position > 0 {
                log::debug!(
                    "table '{}' takes its columns from {}",
                    field.identifier.as_deref().unwrap_or("?"),
                    source.name()
                );
            }
            Some(columns)
        })
    }
}
