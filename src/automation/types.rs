//! Automation lane type definitions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::NotationError;

/// Interpolation from a point to the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveType {
    #[default]
    Linear,
    /// Fast start, slow finish: `1 - (1 - t)^3`
    Exponential,
    /// Cubic ease in/out: `t^2 (3 - 2t)`
    Smooth,
    /// Hold the value until the next point
    Step,
    /// Cubic Bezier through the points' handles
    Bezier,
}

/// A Bezier control handle, as an offset from its point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BezierHandle {
    pub beat: f64,
    pub value: f64,
}

/// One control point of a lane. `value` is normalized to `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationPoint {
    pub id: Uuid,
    pub beat: f64,
    pub value: f64,
    pub curve_type: CurveType,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub bezier_out: Option<BezierHandle>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub bezier_in: Option<BezierHandle>,
}

impl AutomationPoint {
    pub fn new(beat: f64, value: f64, curve_type: CurveType) -> Self {
        Self {
            id: Uuid::new_v4(),
            beat,
            value: clamp_unit(value),
            curve_type,
            bezier_out: None,
            bezier_in: None,
        }
    }

    pub fn with_handles(mut self, bezier_out: Option<BezierHandle>, bezier_in: Option<BezierHandle>) -> Self {
        self.bezier_out = bezier_out;
        self.bezier_in = bezier_in;
        self
    }
}

pub(crate) fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Kind of entity whose parameter is automated. Each kind is written as its
/// own call in source code, e.g. `voice("lead")`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Group,
    Voice,
    Effect,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Group, EntityKind::Voice, EntityKind::Effect];

    /// Function name used in source code.
    pub fn call_name(&self) -> &'static str {
        match self {
            EntityKind::Group => "group",
            EntityKind::Voice => "voice",
            EntityKind::Effect => "effect",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.call_name())
    }
}

impl FromStr for EntityKind {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.call_name() == s.trim())
            .ok_or_else(|| NotationError::UnknownEntityKind(s.to_string()))
    }
}

/// The parameter a lane drives: `<kind>("<name>")`'s `<parameter>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AutomationTarget {
    pub kind: EntityKind,
    pub name: String,
    pub parameter: String,
}

impl AutomationTarget {
    pub fn new(kind: EntityKind, name: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            parameter: parameter.into(),
        }
    }
}

/// Automation lane for a single parameter
///
/// Points are kept ordered by beat by the editing methods; `points` is public,
/// so evaluation sorts them on every call. Points sharing a beat keep
/// their insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationLane {
    pub target: AutomationTarget,
    pub points: Vec<AutomationPoint>,
    pub min_value: f64,
    pub max_value: f64,
}

impl AutomationLane {
    pub fn new(target: AutomationTarget, min_value: f64, max_value: f64) -> Self {
        Self {
            target,
            points: Vec::new(),
            min_value,
            max_value,
        }
    }

    /// Add a point after any existing points at the same beat. Returns its id.
    pub fn add_point(&mut self, beat: f64, value: f64, curve_type: CurveType) -> Uuid {
        self.insert_point(AutomationPoint::new(beat, value, curve_type))
    }

    pub fn insert_point(&mut self, point: AutomationPoint) -> Uuid {
        let id = point.id;
        let idx = self.points.partition_point(|p| p.beat <= point.beat);
        self.points.insert(idx, point);
        id
    }

    pub fn remove_point(&mut self, id: Uuid) -> Option<AutomationPoint> {
        let index = self.points.iter().position(|p| p.id == id)?;
        Some(self.points.remove(index))
    }

    /// Move a point, keeping the lane ordered. Returns false for an unknown id.
    pub fn move_point(&mut self, id: Uuid, beat: f64, value: f64) -> bool {
        let Some(mut point) = self.remove_point(id) else {
            return false;
        };
        point.beat = beat;
        point.value = clamp_unit(value);
        self.insert_point(point);
        true
    }

    pub fn point(&self, id: Uuid) -> Option<&AutomationPoint> {
        self.points.iter().find(|p| p.id == id)
    }

    /// Points ordered by beat; ties keep their stored order.
    pub fn sorted_points(&self) -> Vec<AutomationPoint> {
        let mut points = self.points.clone();
        points.sort_by(|a, b| a.beat.total_cmp(&b.beat));
        points
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
