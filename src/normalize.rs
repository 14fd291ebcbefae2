//! Lenient decoding of stored snapshots.
//!
//! Stored data may come from older builds or hand edits. Every field that is
//! missing or has the wrong shape falls back to its default; list entries
//! that cannot be read are dropped one by one. Decoding never fails.

use crate::cell::{Cell, RunSegment, MAX_OUTS};
use crate::team::{Player, TeamSnapshot};
use schema::{Outcome, PitchMark};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Decode `value` as `T`, or `T::default()` when it doesn't fit.
fn field_or_default<T: DeserializeOwned + Default>(object: &Map<String, Value>, key: &str) -> T {
    object
        .get(key)
        .and_then(|value| T::deserialize(value).ok())
        .unwrap_or_default()
}

/// Decode each array entry as `T`, skipping entries that don't fit.
fn list_of<T: DeserializeOwned>(value: Option<&Value>) -> Vec<T> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(|item| T::deserialize(item).ok()).collect())
        .unwrap_or_default()
}

pub fn normalize_segment(value: &Value) -> Option<RunSegment> {
    let segment = RunSegment::deserialize(value).ok()?;
    if segment.is_well_formed() {
        Some(segment)
    } else {
        log::warn!("dropping stored run segment {}→{}", segment.from, segment.to);
        None
    }
}

pub fn normalize_cell(value: &Value) -> Cell {
    let Some(object) = value.as_object() else {
        return Cell::default();
    };

    let run_path: Vec<RunSegment> = object
        .get("runPath")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(normalize_segment).collect())
        .unwrap_or_default();
    let outs: u64 = field_or_default(object, "outsRecorded");

    let mut cell = Cell {
        pitch_sequence: list_of::<PitchMark>(object.get("pitchSequence")),
        outcome: field_or_default::<Outcome>(object, "outcome"),
        base_reached: 0,
        outs_recorded: outs.min(u64::from(MAX_OUTS)) as u8,
        run_path,
        notes: field_or_default(object, "notes"),
    };
    cell.sync_base_reached();
    cell
}

/// Players may be stored as objects or as bare names.
pub fn normalize_player(value: &Value) -> Option<Player> {
    match value {
        Value::String(name) => Some(Player::named(name.clone())),
        Value::Object(object) => Some(Player {
            name: field_or_default(object, "name"),
            number: match object.get("number") {
                Some(Value::Number(number)) => number.to_string(),
                _ => field_or_default(object, "number"),
            },
            position: field_or_default(object, "position"),
        }),
        _ => None,
    }
}

/// Turn any stored value into a well-formed snapshot.
pub fn normalize_snapshot(value: &Value) -> TeamSnapshot {
    let Some(object) = value.as_object() else {
        if !value.is_null() {
            log::warn!("stored team is not an object; starting from an empty snapshot");
        }
        return TeamSnapshot::default();
    };

    let players = object
        .get("players")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(normalize_player).collect())
        .unwrap_or_default();

    let grid = object
        .get("grid")
        .and_then(Value::as_array)
        .map(|rows| {
            rows.iter()
                .map(|row| {
                    row.as_array()
                        .map(|cells| cells.iter().map(normalize_cell).collect())
                        .unwrap_or_default()
                })
                .collect()
        })
        .unwrap_or_default();

    let inning_outs = object
        .get("inningOuts")
        .and_then(Value::as_array)
        .map(|outs| {
            outs.iter()
                .map(|value| value.as_u64().unwrap_or(0).min(u64::from(MAX_OUTS)) as u8)
                .collect()
        })
        .unwrap_or_default();

    TeamSnapshot {
        team_name: field_or_default(object, "teamName"),
        players,
        grid,
        inning_outs,
    }
}
