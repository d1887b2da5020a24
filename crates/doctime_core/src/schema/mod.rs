//! Record schemas: declared fields plus the pre-persist hook chain.
//!
//! # Responsibility
//! - Declare the field names and kinds documents of one kind conform to.
//! - Own the ordered pre-persist hooks and run them for each persist.
//! - Let plugins augment a schema once, at definition time.
//!
//! # Invariants
//! - Declaring a field under an existing name overwrites the old spec.
//! - Hooks run in registration order; the first failure stops the chain.
//! - A schema is shared read-only (`Arc<Schema>`) once stores use it.

pub mod field;
pub mod hook;

use crate::model::document::Document;
use crate::model::value::FieldValue;
use field::{FieldKind, FieldSpec};
use hook::{HookError, Next, PrePersistHook};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

/// Extension applied to a schema at definition time.
pub trait SchemaPlugin {
    fn apply(&self, schema: &mut Schema);
}

/// Declared shape and lifecycle hooks for one document kind.
pub struct Schema {
    name: String,
    fields: BTreeMap<String, FieldSpec>,
    hooks: Vec<Arc<dyn PrePersistHook>>,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: BTreeMap::new(),
            hooks: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declares one field, replacing any previous declaration of `name`.
    pub fn add_field(&mut self, name: impl Into<String>, spec: FieldSpec) -> &mut Self {
        let name = name.into();
        if let Some(previous) = self.fields.insert(name.clone(), spec) {
            debug!(
                "event=field_redeclared module=schema schema={} field={} previous_kind={} kind={}",
                self.name,
                name,
                previous.kind.as_str(),
                spec.kind.as_str()
            );
        }
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> &BTreeMap<String, FieldSpec> {
        &self.fields
    }

    /// Registers a hook run before every persist of this schema's documents.
    ///
    /// There is no unregister; hooks live as long as the schema.
    pub fn pre_persist(&mut self, hook: impl PrePersistHook + 'static) -> &mut Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    /// Applies `plugin` to this schema.
    pub fn plugin(&mut self, plugin: impl SchemaPlugin) -> &mut Self {
        plugin.apply(self);
        self
    }

    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    /// Runs the pre-persist chain against `document`.
    ///
    /// # Errors
    /// - Returns the first `HookError` signalled; later hooks are skipped.
    pub fn run_pre_persist(&self, document: &mut Document) -> Result<(), HookError> {
        for hook in &self.hooks {
            if let Err(err) = hook.pre_persist(document, Next::new()).into_result() {
                warn!(
                    "event=pre_persist module=schema status=error schema={} hook={} document={} error={}",
                    self.name,
                    hook.name(),
                    document.id(),
                    err
                );
                return Err(err);
            }
        }
        Ok(())
    }

    /// Projects `document` onto the declared fields for storage.
    ///
    /// Undeclared fields are dropped. Declared fields are kind-checked.
    ///
    /// # Errors
    /// - `SchemaError::UnexpectedKind` for a value of the wrong kind.
    /// - `SchemaError::MissingRequired` for an absent or null required field.
    pub fn check(&self, document: &Document) -> Result<BTreeMap<String, FieldValue>, SchemaError> {
        let mut projected = BTreeMap::new();
        for (name, spec) in &self.fields {
            match document.get(name) {
                Some(value) if !spec.accepts(value) => {
                    return Err(SchemaError::UnexpectedKind {
                        field: name.clone(),
                        expected: spec.kind,
                        found: value.kind_name(),
                    });
                }
                Some(value) if !value.is_null() => {
                    projected.insert(name.clone(), value.clone());
                }
                _ if spec.required => {
                    return Err(SchemaError::MissingRequired(name.clone()));
                }
                Some(value) => {
                    projected.insert(name.clone(), value.clone());
                }
                None => {}
            }
        }

        let dropped = document.fields().len() - projected.len();
        if dropped > 0 {
            debug!(
                "event=schema_check module=schema schema={} document={} dropped_fields={}",
                self.name,
                document.id(),
                dropped
            );
        }
        Ok(projected)
    }
}

impl Debug for Schema {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let hook_names: Vec<&str> = self.hooks.iter().map(|hook| hook.name()).collect();
        f.debug_struct("Schema")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("hooks", &hook_names)
            .finish()
    }
}

/// Document/schema mismatch found before persisting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    UnexpectedKind {
        field: String,
        expected: FieldKind,
        found: &'static str,
    },
    MissingRequired(String),
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedKind {
                field,
                expected,
                found,
            } => write!(
                f,
                "field `{field}` expects {} but got {found}",
                expected.as_str()
            ),
            Self::MissingRequired(field) => write!(f, "required field `{field}` is missing"),
        }
    }
}

impl Error for SchemaError {}

#[cfg(test)]
mod tests {
    use super::field::FieldSpec;
    use super::hook::{HookError, Next};
    use super::{Schema, SchemaError, SchemaPlugin};
    use crate::model::document::Document;
    use crate::model::value::FieldValue;

    struct Tagged;

    impl SchemaPlugin for Tagged {
        fn apply(&self, schema: &mut Schema) {
            schema.add_field("tag", FieldSpec::string());
        }
    }

    #[test]
    fn redeclaring_a_field_overwrites_it() {
        let mut schema = Schema::new("notes");
        schema
            .add_field("rank", FieldSpec::integer())
            .add_field("rank", FieldSpec::float());
        assert_eq!(schema.fields().len(), 1);
        assert_eq!(schema.field("rank"), Some(&FieldSpec::float()));
    }

    #[test]
    fn plugins_augment_the_schema() {
        let mut schema = Schema::new("notes");
        schema.plugin(Tagged);
        assert!(schema.field("tag").is_some());
    }

    #[test]
    fn hooks_run_in_order_and_stop_on_failure() {
        let mut schema = Schema::new("notes");
        schema
            .pre_persist(|document: &mut Document, next: Next| {
                document.set("first", true);
                next.proceed()
            })
            .pre_persist(|_: &mut Document, next: Next| {
                next.fail(HookError::new("guard", "no writes today"))
            })
            .pre_persist(|document: &mut Document, next: Next| {
                document.set("third", true);
                next.proceed()
            });

        let mut document = Document::new();
        let err = schema.run_pre_persist(&mut document).unwrap_err();
        assert_eq!(err.hook, "guard");
        assert!(document.contains("first"));
        assert!(!document.contains("third"));
    }

    #[test]
    fn check_drops_undeclared_and_rejects_wrong_kinds() {
        let mut schema = Schema::new("notes");
        schema.add_field("title", FieldSpec::string().required());

        let document = Document::from_fields([("title", "hello"), ("stray", "ignored")]);
        let projected = schema.check(&document).unwrap();
        assert_eq!(projected.len(), 1);
        assert_eq!(projected.get("title"), Some(&FieldValue::from("hello")));

        let wrong = Document::from_fields([("title", 7_i64)]);
        assert!(matches!(
            schema.check(&wrong),
            Err(SchemaError::UnexpectedKind { found: "integer", .. })
        ));

        let mut missing = Document::new();
        missing.set("title", FieldValue::Null);
        assert_eq!(
            schema.check(&missing),
            Err(SchemaError::MissingRequired("title".to_string()))
        );
    }
}
