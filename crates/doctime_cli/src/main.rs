//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `doctime_core` linkage from a standalone binary.
//! - Show one create-then-update round trip with timestamp fields.
//!
//! Usage: `doctime_cli [OPTIONS_JSON]`, e.g.
//! `doctime_cli '{"createdName":"created_at","disableUpdated":false}'`.
//! Set `DOCTIME_LOG_DIR` (absolute) and optionally `DOCTIME_LOG_LEVEL` to
//! write a log file.

use doctime_core::db::open_db_in_memory;
use doctime_core::{
    default_log_level, init_logging, timestamps, Document, DocumentCollection, FieldSpec, Schema,
    SqliteCollection, TimestampOptions,
};
use std::error::Error;
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_run module=cli status=error error={err}");
            eprintln!("doctime_cli: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    if let Ok(log_dir) = std::env::var("DOCTIME_LOG_DIR") {
        let level =
            std::env::var("DOCTIME_LOG_LEVEL").unwrap_or_else(|_| default_log_level().to_string());
        init_logging(&level, &log_dir)?;
    }

    println!("doctime_core version={}", doctime_core::core_version());

    let options = match std::env::args().nth(1) {
        Some(json) => TimestampOptions::from_json(&json)?,
        None => TimestampOptions::default(),
    };

    let mut schema = Schema::new("notes");
    schema.add_field("title", FieldSpec::string());
    timestamps(&mut schema, Some(options));

    let conn = open_db_in_memory()?;
    let notes = SqliteCollection::new(&conn, Arc::new(schema));

    let mut note = notes.create(Document::from_fields([("title", "first draft")]))?;
    println!("created={}", serde_json::to_string(note.fields())?);

    note.set("title", "second draft");
    notes.save(&mut note)?;
    let stored = notes
        .find_by_id(note.id())?
        .ok_or("saved document is missing")?;
    println!("updated={}", serde_json::to_string(stored.fields())?);

    Ok(())
}
