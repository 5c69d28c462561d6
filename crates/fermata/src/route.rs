//! Route descriptions: the JSON produced by the hold-marking frontend.
//!
//! ```json
//! {
//!   "holds": [{"id": 0, "xNorm": 0.35, "yNorm": 0.9}, ...],
//!   "start": {"RH": 6, "LH": 5, "RF": 3, "LF": 0},
//!   "finish": 13
//! }
//! ```
//!
//! The top level must carry exactly `holds`, `start` and `finish`. Per-hold
//! extras (the frontend's `type`, detector confidences) are ignored.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::state::{Limb, State};
use crate::wall::{Frame, HoldId, Wall};

/// Top-level keys of a route file.
pub const ROUTE_KEYS: [&str; 3] = ["finish", "holds", "start"];

/// One hold as written in a route file.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HoldSpec {
    pub id: HoldId,
    #[serde(rename = "xNorm")]
    pub x_norm: f64,
    #[serde(rename = "yNorm")]
    pub y_norm: f64,
}

/// A validated route.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteSpec {
    pub holds: Vec<HoldSpec>,
    pub start: State,
    pub finish: HoldId,
}

/// Route loading and validation failures.
#[derive(Debug)]
pub enum RouteError {
    Io { path: PathBuf, source: std::io::Error },
    Json(serde_json::Error),
    NotAnObject,
    Structure { missing: Vec<String>, unexpected: Vec<String> },
    DuplicateHold(HoldId),
    OutOfRange { id: HoldId, x: f64, y: f64 },
    UnknownStartHold { limb: Limb, id: HoldId },
    UnknownFinish(HoldId),
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::Io { path, source } => write!(f, "reading {}: {source}", path.display()),
            RouteError::Json(e) => write!(f, "malformed route JSON: {e}"),
            RouteError::NotAnObject => write!(
                f,
                "Invalid JSON structure. Expected an object with keys: {}",
                ROUTE_KEYS.join(", ")
            ),
            RouteError::Structure {
                missing,
                unexpected,
            } => {
                let mut parts = Vec::new();
                if !missing.is_empty() {
                    parts.push(format!("Missing keys: {}", missing.join(", ")));
                }
                if !unexpected.is_empty() {
                    parts.push(format!("Unexpected keys: {}", unexpected.join(", ")));
                }
                write!(f, "Invalid JSON structure. {}", parts.join("; "))
            }
            RouteError::DuplicateHold(id) => write!(f, "hold id {id} appears more than once"),
            RouteError::OutOfRange { id, x, y } => {
                write!(f, "hold {id} has coordinates ({x}, {y}) outside [0, 1]")
            }
            RouteError::UnknownStartHold { limb, id } => {
                write!(f, "start {limb} references unknown hold {id}")
            }
            RouteError::UnknownFinish(id) => write!(f, "finish references unknown hold {id}"),
        }
    }
}

impl std::error::Error for RouteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RouteError::Io { source, .. } => Some(source),
            RouteError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for RouteError {
    fn from(e: serde_json::Error) -> Self {
        RouteError::Json(e)
    }
}

/// Compare top-level keys against [`ROUTE_KEYS`].
pub fn check_structure(value: &Value) -> Result<(), RouteError> {
    let obj = value.as_object().ok_or(RouteError::NotAnObject)?;
    let expected: BTreeSet<&str> = ROUTE_KEYS.into_iter().collect();
    let found: BTreeSet<&str> = obj.keys().map(String::as_str).collect();
    let missing: Vec<String> = expected.difference(&found).map(|k| k.to_string()).collect();
    let unexpected: Vec<String> = found.difference(&expected).map(|k| k.to_string()).collect();
    if missing.is_empty() && unexpected.is_empty() {
        Ok(())
    } else {
        Err(RouteError::Structure {
            missing,
            unexpected,
        })
    }
}

impl RouteSpec {
    /// Parse and validate a route from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, RouteError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Validate a parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, RouteError> {
        check_structure(&value)?;
        let route: RouteSpec = serde_json::from_value(value)?;
        route.validate()?;
        Ok(route)
    }

    /// Read, parse and validate a route file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RouteError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| RouteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Unique ids, coordinates in [0,1], start and finish on the wall.
    pub fn validate(&self) -> Result<(), RouteError> {
        let mut ids = HashSet::with_capacity(self.holds.len());
        for h in &self.holds {
            if !ids.insert(h.id) {
                return Err(RouteError::DuplicateHold(h.id));
            }
            let in_unit = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);
            if !(in_unit(h.x_norm) && in_unit(h.y_norm)) {
                return Err(RouteError::OutOfRange {
                    id: h.id,
                    x: h.x_norm,
                    y: h.y_norm,
                });
            }
        }
        for limb in Limb::ALL {
            let id = self.start.get(limb);
            if !ids.contains(&id) {
                return Err(RouteError::UnknownStartHold { limb, id });
            }
        }
        if !ids.contains(&self.finish) {
            return Err(RouteError::UnknownFinish(self.finish));
        }
        Ok(())
    }

    /// Hold table scaled into `frame`.
    pub fn wall(&self, frame: Frame) -> Wall {
        Wall::new(
            frame,
            self.holds.iter().map(|h| (h.id, h.x_norm, h.y_norm)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> Value {
        json!({
            "holds": [
                {"id": 0, "xNorm": 0.35, "yNorm": 0.9, "type": "start_foot"},
                {"id": 1, "xNorm": 0.65, "yNorm": 0.9},
                {"id": 2, "xNorm": 0.45, "yNorm": 0.75, "type": "start_hand"},
                {"id": 3, "xNorm": 0.55, "yNorm": 0.75},
                {"id": 4, "xNorm": 0.5, "yNorm": 0.6, "type": "finish_hold"}
            ],
            "start": {"RH": 3, "LH": 2, "RF": 1, "LF": 0},
            "finish": 4
        })
    }

    #[test]
    fn loads_valid_route() {
        let route = RouteSpec::from_value(valid()).unwrap();
        assert_eq!(route.holds.len(), 5);
        assert_eq!(route.finish, HoldId(4));
        assert_eq!(route.start.get(Limb::RightFoot), HoldId(1));
        let wall = route.wall(Frame::new(800.0, 1000.0));
        assert!((wall.pos(HoldId(4)).x - 400.0).abs() < 1e-9);
    }

    #[test]
    fn missing_key_is_named() {
        let mut v = valid();
        v.as_object_mut().unwrap().remove("finish");
        let err = RouteSpec::from_value(v).unwrap_err();
        assert_eq!(err.to_string(), "Invalid JSON structure. Missing keys: finish");
    }

    #[test]
    fn unexpected_key_is_named() {
        let mut v = valid();
        v["extra"] = json!(1);
        let err = RouteSpec::from_value(v).unwrap_err();
        assert_eq!(err.to_string(), "Invalid JSON structure. Unexpected keys: extra");
    }

    #[test]
    fn missing_and_unexpected_together() {
        let mut v = valid();
        v.as_object_mut().unwrap().remove("finish");
        v["extra"] = json!(true);
        let err = RouteSpec::from_value(v).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid JSON structure. Missing keys: finish; Unexpected keys: extra"
        );
    }

    #[test]
    fn non_object_and_bad_types() {
        assert!(matches!(
            RouteSpec::from_json_str("[1, 2]"),
            Err(RouteError::NotAnObject)
        ));
        let mut v = valid();
        v["finish"] = json!("top");
        assert!(matches!(RouteSpec::from_value(v), Err(RouteError::Json(_))));
        assert!(matches!(
            RouteSpec::from_json_str("{not json"),
            Err(RouteError::Json(_))
        ));
    }

    #[test]
    fn semantic_checks() {
        let mut v = valid();
        v["holds"][1]["id"] = json!(0);
        assert!(matches!(
            RouteSpec::from_value(v),
            Err(RouteError::DuplicateHold(HoldId(0)))
        ));

        let mut v = valid();
        v["holds"][0]["xNorm"] = json!(1.5);
        assert!(matches!(
            RouteSpec::from_value(v),
            Err(RouteError::OutOfRange { .. })
        ));

        let mut v = valid();
        v["start"]["LF"] = json!(42);
        assert!(matches!(
            RouteSpec::from_value(v),
            Err(RouteError::UnknownStartHold {
                limb: Limb::LeftFoot,
                id: HoldId(42)
            })
        ));

        let mut v = valid();
        v["finish"] = json!(9);
        assert!(matches!(
            RouteSpec::from_value(v),
            Err(RouteError::UnknownFinish(HoldId(9)))
        ));
    }
}
