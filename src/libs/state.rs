//! Storage keys and value encoding for everything lenslog persists.
//!
//! This is the only module that knows key names or how values are laid out
//! in the [`PersistenceAdapter`]. All values are JSON; timestamps are stored
//! as epoch seconds of the local wall-clock time. The one exception is the
//! legacy history map written by earlier versions, whose keys are real UTC
//! epochs and are converted to local time on read.
//!
//! Reads never fail: a missing, unreadable or corrupt value falls back to its
//! default and a warning is emitted, so callers always get a usable state.

use crate::libs::cycle::{CompletedInterval, LensKind};
use crate::libs::messages::Message;
use crate::libs::prescription::{EyePrescription, EyeSide, Prescription, PrescriptionField};
use crate::libs::reminder::Reminder;
use crate::libs::store::{PersistenceAdapter, WriteOp};
use crate::msg_warning;
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const REMINDERS_KEY: &str = "reminders";
const PRESCRIPTION_PREFIX: &str = "prescription";

/// Keys of one tracker namespace (`wear` or `pair`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleKeys {
    pub active: String,
    pub start: String,
    pub kind: String,
    pub pairs_remaining: String,
    pub last_end: String,
    pub history: String,
}

impl CycleKeys {
    pub fn new(namespace: &str) -> Self {
        Self {
            active: format!("{namespace}.active"),
            start: format!("{namespace}.start"),
            kind: format!("{namespace}.kind"),
            pairs_remaining: format!("{namespace}.pairs_remaining"),
            last_end: format!("{namespace}.last_end"),
            history: format!("{namespace}.history"),
        }
    }
}

/// Everything a tracker persists.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CycleState {
    pub active: bool,
    pub start: Option<NaiveDateTime>,
    pub kind: LensKind,
    pub pairs_remaining: u32,
    pub last_end: Option<NaiveDateTime>,
    pub history: Vec<CompletedInterval>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct HistoryRecord {
    start: i64,
    duration_secs: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ReminderRecord {
    at: i64,
    title: String,
    body: String,
}

pub fn to_epoch(time: NaiveDateTime) -> i64 {
    time.and_utc().timestamp()
}

pub fn from_epoch(secs: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp(secs, 0).map(|dt| dt.naive_utc())
}

/// Reads a key of the legacy history map, which holds real UTC epoch
/// seconds, as local wall-clock time.
pub fn from_legacy_epoch(secs: i64) -> Option<NaiveDateTime> {
    Local.timestamp_opt(secs, 0).earliest().map(|dt| dt.naive_local())
}

/// Reads and decodes one JSON value, treating any failure as absent.
fn read_json<S, T>(store: &S, key: &str) -> Option<T>
where
    S: PersistenceAdapter + ?Sized,
    T: DeserializeOwned,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            msg_warning!(Message::StoreReadFailed {
                key: key.to_string(),
                reason: e.to_string(),
            });
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            msg_warning!(Message::StoredValueCorrupt {
                key: key.to_string(),
                reason: e.to_string(),
            });
            None
        }
    }
}

fn read_timestamp<S: PersistenceAdapter + ?Sized>(store: &S, key: &str) -> Option<NaiveDateTime> {
    let secs: i64 = read_json(store, key)?;
    let time = from_epoch(secs);
    if time.is_none() {
        msg_warning!(Message::StoredValueCorrupt {
            key: key.to_string(),
            reason: format!("timestamp {secs} is out of range"),
        });
    }
    time
}

fn set_json<T: Serialize + ?Sized>(key: &str, value: &T) -> WriteOp {
    // Plain data types always serialize.
    WriteOp::set(key, serde_json::to_string(value).unwrap_or_else(|_| "null".to_string()))
}

fn set_or_remove<T: Serialize>(key: &str, value: Option<&T>) -> WriteOp {
    match value {
        Some(value) => set_json(key, value),
        None => WriteOp::remove(key),
    }
}

/// Decodes history in either layout: the current list of records, or the
/// older mapping keyed by epoch seconds with fractional-second durations.
fn decode_history(key: &str, value: Value) -> Vec<CompletedInterval> {
    let mut history = Vec::new();
    match value {
        Value::Array(_) => match serde_json::from_value::<Vec<HistoryRecord>>(value) {
            Ok(records) => {
                for record in records {
                    let start = from_epoch(record.start);
                    let duration = Duration::try_seconds(record.duration_secs.max(0));
                    if let (Some(start), Some(duration)) = (start, duration) {
                        history.push(CompletedInterval { start, duration });
                    }
                }
            }
            Err(e) => msg_warning!(Message::StoredValueCorrupt {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        },
        Value::Object(map) => {
            for (start, duration) in map {
                let start = start.parse::<i64>().ok().and_then(from_legacy_epoch);
                let duration = duration.as_f64().and_then(|secs| Duration::try_seconds(secs.max(0.0) as i64));
                if let (Some(start), Some(duration)) = (start, duration) {
                    history.push(CompletedInterval { start, duration });
                }
            }
            history.sort_by_key(|interval| interval.start);
        }
        Value::Null => {}
        other => msg_warning!(Message::StoredValueCorrupt {
            key: key.to_string(),
            reason: format!("unexpected history value {other}"),
        }),
    }
    history
}

/// Restores a tracker namespace, with nominal cycle lengths of the pair kinds.
pub fn load_cycle_state<S: PersistenceAdapter + ?Sized>(store: &S, keys: &CycleKeys) -> CycleState {
    load_cycle_state_with(store, keys, LensKind::nominal_duration)
}

/// Restores a tracker namespace. `nominal` gives the cycle length for a kind;
/// a stored start whose due time cannot be represented counts as corrupt.
pub fn load_cycle_state_with<S, F>(store: &S, keys: &CycleKeys, nominal: F) -> CycleState
where
    S: PersistenceAdapter + ?Sized,
    F: Fn(LensKind) -> Duration,
{
    let mut state = CycleState {
        active: read_json(store, &keys.active).unwrap_or(false),
        start: read_timestamp(store, &keys.start),
        kind: read_json(store, &keys.kind).unwrap_or_default(),
        pairs_remaining: read_json(store, &keys.pairs_remaining).unwrap_or(0),
        last_end: read_timestamp(store, &keys.last_end),
        history: read_json::<S, Value>(store, &keys.history)
            .map(|value| decode_history(&keys.history, value))
            .unwrap_or_default(),
    };

    if let Some(start) = state.start {
        if start.checked_add_signed(nominal(state.kind)).is_none() {
            msg_warning!(Message::StoredValueCorrupt {
                key: keys.start.clone(),
                reason: format!("due time of {start} is out of range"),
            });
            state.start = None;
        }
    }
    if state.active && state.start.is_none() {
        msg_warning!(Message::InconsistentCycleState(keys.active.clone()));
        state.active = false;
    }
    if !state.active {
        state.start = None;
    }
    state
}

/// Full set of writes that makes the store match `state`.
pub fn cycle_state_writes(keys: &CycleKeys, state: &CycleState) -> Vec<WriteOp> {
    let start = state.start.filter(|_| state.active).map(to_epoch);
    let history: Vec<HistoryRecord> = state
        .history
        .iter()
        .map(|interval| HistoryRecord {
            start: to_epoch(interval.start),
            duration_secs: interval.duration.num_seconds(),
        })
        .collect();

    vec![
        set_json(&keys.active, &(state.active && start.is_some())),
        set_or_remove(&keys.start, start.as_ref()),
        set_json(&keys.kind, &state.kind),
        set_json(&keys.pairs_remaining, &state.pairs_remaining),
        set_or_remove(&keys.last_end, state.last_end.map(to_epoch).as_ref()),
        set_json(&keys.history, &history),
    ]
}

pub fn load_reminders<S: PersistenceAdapter + ?Sized>(store: &S) -> Vec<Reminder> {
    read_json::<S, Vec<ReminderRecord>>(store, REMINDERS_KEY)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|record| {
            from_epoch(record.at).map(|at| Reminder {
                at,
                title: record.title,
                body: record.body,
            })
        })
        .collect()
}

pub fn reminders_write(reminders: &[Reminder]) -> WriteOp {
    let records: Vec<ReminderRecord> = reminders
        .iter()
        .map(|reminder| ReminderRecord {
            at: to_epoch(reminder.at),
            title: reminder.title.clone(),
            body: reminder.body.clone(),
        })
        .collect();
    set_json(REMINDERS_KEY, &records)
}

fn prescription_key(suffix: &str) -> String {
    format!("{PRESCRIPTION_PREFIX}.{suffix}")
}

fn eye_field_key(side: EyeSide, field: PrescriptionField) -> String {
    prescription_key(&format!("{}.{}", side.key(), field.key()))
}

fn load_eye<S: PersistenceAdapter + ?Sized>(store: &S, side: EyeSide) -> EyePrescription {
    let mut eye = EyePrescription::default();
    for field in PrescriptionField::ALL {
        let value: Option<String> = read_json(store, &eye_field_key(side, field));
        eye.set(field, value);
    }
    eye
}

pub fn load_prescription<S: PersistenceAdapter + ?Sized>(store: &S) -> Prescription {
    let expiration: Option<String> = read_json(store, &prescription_key("expiration"));
    Prescription {
        same_for_both_eyes: read_json(store, &prescription_key("same_for_both_eyes")).unwrap_or(false),
        left: load_eye(store, EyeSide::Left),
        right: load_eye(store, EyeSide::Right),
        expiration: expiration.and_then(|date| NaiveDate::parse_from_str(&date, "%Y-%m-%d").ok()),
        image_path: read_json(store, &prescription_key("image")),
    }
}

/// Writes every prescription field; unset fields remove their key.
pub fn prescription_writes(prescription: &Prescription) -> Vec<WriteOp> {
    let mut ops = vec![set_json(&prescription_key("same_for_both_eyes"), &prescription.same_for_both_eyes)];
    for (side, eye) in [(EyeSide::Left, &prescription.left), (EyeSide::Right, &prescription.right)] {
        for field in PrescriptionField::ALL {
            ops.push(set_or_remove(&eye_field_key(side, field), eye.get(field)));
        }
    }
    let expiration = prescription.expiration.map(|date| date.format("%Y-%m-%d").to_string());
    ops.push(set_or_remove(&prescription_key("expiration"), expiration.as_ref()));
    ops.push(set_or_remove(&prescription_key("image"), prescription.image_path.as_ref()));
    ops
}
