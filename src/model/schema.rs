//! Persisted round documents and their upgrade to the current shape.
//!
//! Two record shapes exist in storage: the current `{par, swings, completed}` and the
//! earlier `{par, strokes}` which only counted strokes. Anything else is salvaged for its
//! par and otherwise reset.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::round::{DEFAULT_PAR, HoleRecord, Round, SwingRecord};
use crate::storage::KvStore;
use crate::storage::keys::scores_key;

/// Legacy stroke counts above this are treated as corrupt rather than expanded into swings.
pub const MAX_LEGACY_STROKES: usize = 200;

/// One stored hole record, classified by the schema version it was written with.
#[derive(Debug, Clone, PartialEq)]
pub enum HoleSchema {
    Current {
        par: Option<i32>,
        swings: Vec<Value>,
        completed: Option<bool>,
    },
    Legacy {
        par: Option<i32>,
        strokes: usize,
    },
    Unrecognized {
        par: Option<i32>,
    },
}

impl HoleSchema {
    #[must_use]
    pub fn detect(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::Unrecognized { par: None };
        };
        let par = numeric_par(obj);
        if let Some(swings) = obj.get("swings").and_then(Value::as_array) {
            return Self::Current {
                par,
                swings: swings.clone(),
                completed: obj.get("completed").and_then(Value::as_bool),
            };
        }
        if let Some(strokes) = obj.get("strokes").and_then(Value::as_u64) {
            return match usize::try_from(strokes) {
                Ok(strokes) if strokes <= MAX_LEGACY_STROKES => Self::Legacy { par, strokes },
                _ => Self::Unrecognized { par },
            };
        }
        Self::Unrecognized { par }
    }

    #[must_use]
    pub fn upgrade(self) -> HoleRecord {
        match self {
            Self::Current {
                par,
                swings,
                completed,
            } => HoleRecord {
                par: par.unwrap_or(DEFAULT_PAR),
                swings: swings.iter().map(upgrade_swing).collect(),
                completed: completed.unwrap_or(false),
            },
            Self::Legacy { par, strokes } => HoleRecord {
                par: par.unwrap_or(DEFAULT_PAR),
                swings: vec![SwingRecord::default(); strokes],
                completed: false,
            },
            Self::Unrecognized { par } => HoleRecord {
                par: par.unwrap_or(DEFAULT_PAR),
                ..HoleRecord::default()
            },
        }
    }
}

fn numeric_par(obj: &Map<String, Value>) -> Option<i32> {
    let par = obj.get("par")?;
    if let Some(int) = par.as_i64() {
        return i32::try_from(int).ok();
    }
    par.as_f64()
        .filter(|f| f.is_finite())
        .map(|f| f.trunc() as i32)
}

fn upgrade_swing(value: &Value) -> SwingRecord {
    let mut swing = SwingRecord::default();
    let Some(obj) = value.as_object() else {
        return swing;
    };
    if let Some(club) = obj.get("club").and_then(Value::as_str) {
        swing.club = club.to_string();
    }
    if let Some(terrain) = obj
        .get("terrain")
        .and_then(Value::as_str)
        .and_then(|t| t.parse().ok())
    {
        swing.terrain = terrain;
    }
    if let Some(feel) = obj
        .get("satisfaction")
        .and_then(Value::as_u64)
        .filter(|v| (1..=5).contains(v))
    {
        swing.satisfaction = u8::try_from(feel).unwrap_or(swing.satisfaction);
    }
    if let Some(notes) = obj.get("notes").and_then(Value::as_str) {
        swing.notes = notes.to_string();
    }
    swing
}

/// Decodes a stored round document. `None` means the text is not a JSON array.
#[must_use]
pub fn parse_round(text: &str) -> Option<Round> {
    let value: Value = serde_json::from_str(text).ok()?;
    round_from_value(&value)
}

/// Upgrades an already decoded round document. `None` unless `value` is an array.
#[must_use]
pub fn round_from_value(value: &Value) -> Option<Round> {
    let holes = value
        .as_array()?
        .iter()
        .map(|record| HoleSchema::detect(record).upgrade())
        .collect();
    Some(Round::from_holes(holes))
}

/// Decodes one stored snapshot whose `data` field is a round, upgrading that round first.
///
/// `None` when the entry is not an object, has no usable round, or its other fields do not
/// match `T`.
#[must_use]
pub fn decode_snapshot<T: DeserializeOwned>(mut entry: Value) -> Option<T> {
    let obj = entry.as_object_mut()?;
    let round = round_from_value(obj.get("data")?)?;
    obj.insert("data".to_string(), serde_json::to_value(round).ok()?);
    serde_json::from_value(entry).ok()
}

/// Loads the round for `holes` from `scores:{holes}`, normalized and sized to `holes`.
///
/// Absent, unreadable and malformed documents all yield a fresh round.
#[must_use]
pub fn load_round(store: &dyn KvStore, holes: usize) -> Round {
    let key = scores_key(holes);
    let stored = match store.get(&key) {
        Ok(stored) => stored,
        Err(e) => {
            log::warn!("event=round_load module=schema status=fallback key={key} error={e}");
            None
        }
    };
    let Some(text) = stored else {
        return Round::with_holes(holes);
    };
    match parse_round(&text) {
        Some(mut round) => {
            round.resize(holes);
            round
        }
        None => {
            log::debug!("event=round_load module=schema status=malformed key={key}");
            Round::with_holes(holes)
        }
    }
}
