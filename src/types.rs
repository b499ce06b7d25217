use cgmath::Vector3;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/////////////////////////////////////////////////////////////////////////////////////////////////

pub type Position = Vector3<f64>;
pub type JointName = String;

/////////////////////////////////////////////////////////////////////////////////////////////////

/// Joint tree recovered from the HIERARCHY block.
///
/// Joints are keyed by name. Names are assumed unique within a file; when they are not, the
/// later declaration overwrites the earlier one's offset and shares its children list.
#[derive(Debug, Clone, Default)]
pub struct Hierarchy {
    /// First `ROOT` (or top-level `JOINT`) declaration. `None` if the block declared no joints.
    pub root: Option<JointName>,
    /// Children of every joint that has any, in declaration order.
    pub children: HashMap<JointName, Vec<JointName>>,
    /// Local offsets of joints, in file-native length units.
    pub offsets: HashMap<JointName, Position>,
    /// Offsets of `End Site` blocks, keyed by the joint owning the end site.
    pub end_sites: HashMap<JointName, Position>,
    /// Appearance order of `ROOT`/`JOINT` declarations (depth-first pre-order).
    pub order: Vec<JointName>,
}

impl Hierarchy {
    pub fn num_joints(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn children_of(&self, name: &str) -> &[JointName] {
        self.children.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Re-derive parent links from the children lists.
    pub fn parents(&self) -> HashMap<&str, &str> {
        let mut parents = HashMap::new();
        for (parent, children) in self.children.iter() {
            for child in children {
                parents.insert(child.as_str(), parent.as_str());
            }
        }
        parents
    }
}

/////////////////////////////////////////////////////////////////////////////////////////////////

/// The few MOTION header fields this tool cares about. Frame values are never read.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionInfo {
    pub num_frames: Option<usize>,
    pub frame_time: Option<f64>,
    pub fps: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct BvhSkeleton {
    pub hierarchy: Hierarchy,
    pub motion: MotionInfo,
}

/////////////////////////////////////////////////////////////////////////////////////////////////

/// Coarse guess of the file's length unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitScale {
    CentimeterLike,
    MeterLike,
    Unknown,
}

impl fmt::Display for UnitScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UnitScale::CentimeterLike => "cm-like",
            UnitScale::MeterLike => "m-like",
            UnitScale::Unknown => "unknown",
        })
    }
}

/////////////////////////////////////////////////////////////////////////////////////////////////

/// Suggested mapping from source joint names onto canonical names.
///
/// Keeps insertion order, which is the order the mapping rules produced the entries in.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NameMap {
    entries: IndexMap<JointName, &'static str>,
}

impl NameMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, source: &str) -> Option<&'static str> {
        self.entries.get(source).copied()
    }

    pub fn contains_source(&self, source: &str) -> bool {
        self.entries.contains_key(source)
    }

    /// Whether some source already maps onto `target`.
    pub fn claims(&self, target: &str) -> bool {
        self.entries.values().any(|t| *t == target)
    }

    /// First source mapped onto `target`.
    pub fn source_for(&self, target: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, t)| **t == target)
            .map(|(s, _)| s.as_str())
    }

    /// Insert `source -> target` unless `source` is already mapped. Returns whether it was inserted.
    pub fn insert_if_absent(&mut self, source: &str, target: &'static str) -> bool {
        if self.entries.contains_key(source) {
            return false;
        }
        self.entries.insert(source.to_string(), target);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &'static str)> + '_ {
        self.entries.iter().map(|(s, t)| (s.as_str(), *t))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
