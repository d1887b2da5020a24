//! Timestamp schema plugin and its pre-persist hook.

use crate::model::document::Document;
use crate::model::value::FieldValue;
use crate::schema::field::FieldSpec;
use crate::schema::hook::{HookOutcome, Next, PrePersistHook};
use crate::schema::{Schema, SchemaPlugin};
use crate::timestamp::clock::{Clock, SystemClock};
use crate::timestamp::config::{TimestampConfig, TimestampOptions};
use log::{debug, trace};

const HOOK_NAME: &str = "timestamps";

/// Declares timestamp fields on `schema` and registers the hook.
///
/// `None` behaves exactly like empty options.
pub fn timestamps(schema: &mut Schema, options: Option<TimestampOptions>) -> &mut Schema {
    schema.plugin(Timestamps::new(options))
}

/// Schema plugin recording creation and modification instants.
#[derive(Debug, Clone)]
pub struct Timestamps<C = SystemClock> {
    config: TimestampConfig,
    clock: C,
}

impl Timestamps<SystemClock> {
    pub fn new(options: Option<TimestampOptions>) -> Self {
        Self::with_clock(options, SystemClock)
    }
}

impl<C> Timestamps<C>
where
    C: Clock + Clone + 'static,
{
    /// Same as `new`, reading time from `clock` instead of the wall clock.
    pub fn with_clock(options: Option<TimestampOptions>, clock: C) -> Self {
        Self {
            config: TimestampConfig::resolve(options.as_ref()),
            clock,
        }
    }

    pub fn config(&self) -> &TimestampConfig {
        &self.config
    }
}

impl<C> SchemaPlugin for Timestamps<C>
where
    C: Clock + Clone + 'static,
{
    fn apply(&self, schema: &mut Schema) {
        let config = &self.config;
        if config.created_enabled() {
            schema.add_field(config.created_name(), FieldSpec::date_time());
        }
        if config.updated_enabled() {
            schema.add_field(config.updated_name(), FieldSpec::date_time());
        }

        // Registered even with both fields disabled; the hook then only proceeds.
        schema.pre_persist(TimestampHook::new(config.clone(), self.clock.clone()));

        debug!(
            "event=schema_augment module=timestamp status=ok schema={} created={} updated={}",
            schema.name(),
            field_label(config.created_enabled(), config.created_name()),
            field_label(config.updated_enabled(), config.updated_name()),
        );
    }
}

/// Pre-persist hook writing the configured timestamp fields.
#[derive(Debug, Clone)]
pub struct TimestampHook<C = SystemClock> {
    config: TimestampConfig,
    clock: C,
}

impl<C: Clock> TimestampHook<C> {
    pub fn new(config: TimestampConfig, clock: C) -> Self {
        Self { config, clock }
    }

    pub fn config(&self) -> &TimestampConfig {
        &self.config
    }
}

impl<C: Clock> PrePersistHook for TimestampHook<C> {
    fn name(&self) -> &str {
        HOOK_NAME
    }

    fn pre_persist(&self, document: &mut Document, next: Next) -> HookOutcome {
        let config = &self.config;
        // Sampled before the updated write so identical field names behave
        // like a single field.
        let first_persist = matches!(
            document.get(config.created_name()),
            None | Some(FieldValue::Null)
        );
        let now = self.clock.now();

        if config.updated_enabled() {
            document.set(config.updated_name(), now);
        }
        if config.created_enabled() && first_persist {
            document.set(config.created_name(), now);
        }

        trace!(
            "event=pre_persist module=timestamp status=ok document={} first_persist={} at={}",
            document.id(),
            first_persist,
            now.to_rfc3339()
        );
        next.proceed()
    }
}

fn field_label(enabled: bool, name: &str) -> &str {
    if enabled {
        name
    } else {
        "-"
    }
}

#[cfg(test)]
mod tests {
    use super::{timestamps, TimestampHook, Timestamps};
    use crate::model::document::Document;
    use crate::model::value::FieldValue;
    use crate::schema::field::FieldSpec;
    use crate::schema::Schema;
    use crate::timestamp::clock::Clock;
    use crate::timestamp::config::{TimestampConfig, TimestampOptions};
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct ManualClock(Arc<Mutex<DateTime<Utc>>>);

    impl ManualClock {
        fn starting_at(instant: DateTime<Utc>) -> Self {
            Self(Arc::new(Mutex::new(instant)))
        }

        fn advance(&self, by: Duration) {
            let mut now = self.0.lock().expect("clock lock");
            *now += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().expect("clock lock")
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    fn date(document: &Document, name: &str) -> Option<DateTime<Utc>> {
        document.get(name).and_then(FieldValue::as_date_time)
    }

    #[test]
    fn augment_declares_both_fields_and_one_hook() {
        let mut schema = Schema::new("notes");
        timestamps(&mut schema, None);

        assert_eq!(schema.field("createdAt"), Some(&FieldSpec::date_time()));
        assert_eq!(schema.field("updatedAt"), Some(&FieldSpec::date_time()));
        assert_eq!(schema.hook_count(), 1);
    }

    #[test]
    fn disabled_fields_are_not_declared_but_hook_is_registered() {
        let mut schema = Schema::new("notes");
        let options = TimestampOptions::new()
            .disable_created(true)
            .disable_updated(true);
        timestamps(&mut schema, Some(options));

        assert!(schema.fields().is_empty());
        assert_eq!(schema.hook_count(), 1);

        let mut document = Document::from_fields([("title", "untouched")]);
        schema.run_pre_persist(&mut document).unwrap();
        assert_eq!(document.fields().len(), 1);
    }

    #[test]
    fn first_persist_sets_both_fields_to_the_same_instant() {
        let clock = ManualClock::starting_at(t0());
        let hook = TimestampHook::new(TimestampConfig::default(), clock);

        let mut document = Document::new();
        hook.pre_persist_for_test(&mut document);

        assert_eq!(date(&document, "createdAt"), Some(t0()));
        assert_eq!(date(&document, "updatedAt"), Some(t0()));
    }

    #[test]
    fn later_persists_keep_created_and_advance_updated() {
        let clock = ManualClock::starting_at(t0());
        let mut schema = Schema::new("notes");
        schema.plugin(Timestamps::with_clock(None, clock.clone()));

        let mut document = Document::new();
        schema.run_pre_persist(&mut document).unwrap();

        for step in 1..=3 {
            clock.advance(Duration::seconds(5));
            schema.run_pre_persist(&mut document).unwrap();
            assert_eq!(date(&document, "createdAt"), Some(t0()));
            assert_eq!(
                date(&document, "updatedAt"),
                Some(t0() + Duration::seconds(5 * step))
            );
        }
    }

    #[test]
    fn null_created_field_counts_as_unset() {
        let clock = ManualClock::starting_at(t0());
        let hook = TimestampHook::new(TimestampConfig::default(), clock);

        let mut document = Document::new();
        document.set("createdAt", FieldValue::Null);
        hook.pre_persist_for_test(&mut document);
        assert_eq!(date(&document, "createdAt"), Some(t0()));
    }

    #[test]
    fn preset_created_value_is_left_untouched() {
        let clock = ManualClock::starting_at(t0());
        let hook = TimestampHook::new(TimestampConfig::default(), clock);

        let imported = t0() - Duration::days(30);
        let mut document = Document::new();
        document.set("createdAt", imported);
        hook.pre_persist_for_test(&mut document);

        assert_eq!(date(&document, "createdAt"), Some(imported));
        assert_eq!(date(&document, "updatedAt"), Some(t0()));
    }

    #[test]
    fn renamed_fields_replace_the_defaults() {
        let clock = ManualClock::starting_at(t0());
        let options = TimestampOptions::new()
            .created_name("created_at")
            .updated_name("updated_at");
        let mut schema = Schema::new("notes");
        schema.plugin(Timestamps::with_clock(Some(options), clock));

        let mut document = Document::new();
        schema.run_pre_persist(&mut document).unwrap();

        assert_eq!(date(&document, "created_at"), Some(t0()));
        assert_eq!(date(&document, "updated_at"), Some(t0()));
        assert!(!document.contains("createdAt"));
        assert!(!document.contains("updatedAt"));
    }

    #[test]
    fn shared_field_name_is_written_once_per_persist() {
        let clock = ManualClock::starting_at(t0());
        let options = TimestampOptions::new()
            .created_name("stamp")
            .updated_name("stamp");
        let mut schema = Schema::new("notes");
        schema.plugin(Timestamps::with_clock(Some(options), clock.clone()));
        assert_eq!(schema.fields().len(), 1);

        let mut document = Document::new();
        schema.run_pre_persist(&mut document).unwrap();
        clock.advance(Duration::seconds(1));
        schema.run_pre_persist(&mut document).unwrap();
        assert_eq!(date(&document, "stamp"), Some(t0() + Duration::seconds(1)));
    }

    impl<C: Clock> TimestampHook<C> {
        fn pre_persist_for_test(&self, document: &mut Document) {
            use crate::schema::hook::{Next, PrePersistHook};
            let outcome = self.pre_persist(document, Next::new());
            assert!(outcome.is_proceed());
        }
    }
}
