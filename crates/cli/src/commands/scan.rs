//! Offline inspection of an assistant reply.
//!
//! Runs the same scan, decode and validation steps as the chat endpoint but
//! never writes a booking. With `--catalog` the house-list directive is also
//! ranked against a catalog file.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use staybot_core::directive::{
    no_availability_message, payload, ranker, scanner, validator, DirectiveError, DirectiveKind,
    Ranking,
};
use staybot_core::domain::accommodation::AccommodationRecord;
use staybot_core::ports::CatalogSource;
use staybot_db::FileCatalog;

use crate::commands::{runtime, CommandResult};

#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Reads stdin when `None`.
    pub file: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
}

pub fn run(options: ScanOptions) -> CommandResult {
    let reply = match read_reply(options.file.as_deref()) {
        Ok(reply) => reply,
        Err(error) => {
            return CommandResult::failure(
                "scan",
                "input_read",
                format!("could not read reply text: {error}"),
                3,
            );
        }
    };

    let catalog = match options.catalog {
        Some(path) => match load_catalog(path) {
            Ok(records) => Some(records),
            Err(failure) => return failure,
        },
        None => None,
    };

    inspect(&reply, catalog.as_deref())
}

/// Reports which directive `reply` carries and whether it would be accepted.
pub fn inspect(reply: &str, catalog: Option<&[AccommodationRecord]>) -> CommandResult {
    let Some((kind, block)) = scanner::detect(reply) else {
        let message = if scanner::contains_directive(reply) {
            "directive tag found but its block is not closed; reply would be shown as-is"
        } else {
            "no directive found; reply would be shown as-is"
        };
        return CommandResult::success_with_details(
            "scan",
            message,
            Some(json!({ "kind": DirectiveKind::None })),
        );
    };

    match kind {
        DirectiveKind::AccommodationQuery => match payload::decode_accommodation_query(block) {
            Ok(query) => {
                let mut details = json!({ "kind": kind, "payload": query });
                let message = match catalog.map(|records| ranker::rank(records, query.guests)) {
                    Some(Ranking::Ranked(options)) => {
                        let message = format!("{} houses would be offered", options.len());
                        details["options"] = json!(options);
                        message
                    }
                    Some(Ranking::NoMatch { guests }) => no_availability_message(guests),
                    None => format!("house list requested for {} guests", query.guests),
                };
                CommandResult::success_with_details("scan", message, Some(details))
            }
            Err(error) => rejected(kind, DirectiveError::from(error), None),
        },
        DirectiveKind::BookingSubmission => match payload::decode_booking_submission(block) {
            Ok(submission) => {
                let payload = serde_json::to_value(&submission).unwrap_or(Value::Null);
                match validator::validate(&submission) {
                    Ok(()) => CommandResult::success_with_details(
                        "scan",
                        "booking is valid and would be stored as pending",
                        Some(json!({ "kind": kind, "payload": payload })),
                    ),
                    Err(rule) => rejected(kind, DirectiveError::from(rule), Some(payload)),
                }
            }
            Err(error) => rejected(kind, DirectiveError::from(error), None),
        },
        DirectiveKind::None => CommandResult::success("scan", "no directive found"),
    }
}

fn rejected(kind: DirectiveKind, error: DirectiveError, payload: Option<Value>) -> CommandResult {
    let mut details = json!({ "kind": kind });
    if let Some(payload) = payload {
        details["payload"] = payload;
    }
    CommandResult::failure_with_details("scan", error.code(), error.to_string(), 1, Some(details))
}

fn read_reply(file: Option<&Path>) -> io::Result<String> {
    match file {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut reply = String::new();
            io::stdin().read_to_string(&mut reply)?;
            Ok(reply)
        }
    }
}

fn load_catalog(path: PathBuf) -> Result<Vec<AccommodationRecord>, CommandResult> {
    let runtime = runtime("scan")?;
    runtime.block_on(FileCatalog::new(path).fetch_catalog()).map_err(|error| {
        CommandResult::failure("scan", "catalog_unavailable", error.to_string(), 4)
    })
}
