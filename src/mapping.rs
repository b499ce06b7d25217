//! Heuristic mapping of vendor joint names onto the canonical (GMR) humanoid names.
//!
//! The rules run in a fixed order against one [`NameMap`]. A rule never overwrites a source that
//! an earlier rule already mapped, so earlier rules take precedence.

use crate::types::{JointName, NameMap};
use tracing::debug;

/////////////////////////////////////////////////////////////////////////////////////////////////

/// Canonical joint names expected by the retargeting pipeline.
pub const CANONICAL_GMR_SET: [&str; 22] = [
    // torso
    "Hips", "Spine", "Spine1", "Spine2", "Neck", "Head",
    // left arm
    "LeftShoulder", "LeftArm", "LeftForeArm", "LeftHand",
    // right arm
    "RightShoulder", "RightArm", "RightForeArm", "RightHand",
    // left leg
    "LeftUpLeg", "LeftLeg", "LeftFoot", "LeftToe",
    // right leg
    "RightUpLeg", "RightLeg", "RightFoot", "RightToe",
];

/// Roll and toe-base variants mapped onto their canonical base joint.
pub const KNOWN_VARIANTS: [(&str, &str); 8] = [
    ("LeftToeBase", "LeftToe"),
    ("RightToeBase", "RightToe"),
    ("LeftUpLegRoll", "LeftUpLeg"),
    ("RightUpLegRoll", "RightUpLeg"),
    ("LeftArmRoll", "LeftArm"),
    ("RightArmRoll", "RightArm"),
    ("LeftForeArmRoll", "LeftForeArm"),
    ("RightForeArmRoll", "RightForeArm"),
];

pub const LEFT_PREFIXES: [&str; 2] = ["Left", "L"];
pub const RIGHT_PREFIXES: [&str; 2] = ["Right", "R"];
pub const TOE_HINTS: [&str; 4] = ["ToeBase", "Toe", "toe", "toes"];

/////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn shoulder(self) -> &'static str {
        match self {
            Side::Left => "LeftShoulder",
            Side::Right => "RightShoulder",
        }
    }

    pub fn toe(self) -> &'static str {
        match self {
            Side::Left => "LeftToe",
            Side::Right => "RightToe",
        }
    }

    pub fn foot(self) -> &'static str {
        match self {
            Side::Left => "LeftFoot",
            Side::Right => "RightFoot",
        }
    }
}

/// Laterality from a literal name prefix. Any name starting with `R` is right-lateral, whatever
/// the `R` stands for.
pub fn laterality(name: &str) -> Option<Side> {
    if LEFT_PREFIXES.iter().any(|p| name.starts_with(p)) {
        Some(Side::Left)
    } else if RIGHT_PREFIXES.iter().any(|p| name.starts_with(p)) {
        Some(Side::Right)
    } else {
        None
    }
}

pub fn is_canonical(name: &str) -> bool {
    CANONICAL_GMR_SET.contains(&name)
}

fn __canonical(name: &str) -> Option<&'static str> {
    CANONICAL_GMR_SET.iter().copied().find(|c| *c == name)
}

fn __has_toe_hint(name: &str) -> bool {
    TOE_HINTS.iter().any(|hint| name.contains(hint))
}

///////////////////////////////////////////////////////////////////////////////////////////////////

type Rule = fn(&[JointName], &mut NameMap);

/// Mapping rules in precedence order.
const RULES: [(&str, Rule); 4] = [
    ("identity", map_identity),
    ("known variant", map_known_variants),
    ("clavicle", map_clavicles),
    ("toe", map_toes),
];

fn map_identity(order: &[JointName], map: &mut NameMap) {
    for name in order {
        if let Some(target) = __canonical(name) {
            map.insert_if_absent(name, target);
        }
    }
}

fn map_known_variants(order: &[JointName], map: &mut NameMap) {
    for (variant, base) in KNOWN_VARIANTS {
        let Some(target) = __canonical(base) else {
            continue;
        };
        if order.iter().any(|name| name == variant) {
            map.insert_if_absent(variant, target);
        }
    }
}

fn map_clavicles(order: &[JointName], map: &mut NameMap) {
    for name in order {
        if !name.to_lowercase().contains("clavicle") {
            continue;
        }
        let Some(side) = laterality(name) else {
            continue;
        };
        if !map.claims(side.shoulder()) {
            map.insert_if_absent(name, side.shoulder());
        }
    }
}

/// The last toe candidate in traversal order wins; toe chains are declared parent before child,
/// so it is the most distal one.
fn map_toes(order: &[JointName], map: &mut NameMap) {
    for side in [Side::Left, Side::Right] {
        if map.claims(side.toe()) {
            continue;
        }
        let candidate = order
            .iter()
            .rev()
            .find(|name| laterality(name) == Some(side) && __has_toe_hint(name));
        if let Some(name) = candidate {
            map.insert_if_absent(name, side.toe());
        }
    }
}

//////////////////////////////////////////////////////////////// PUBLIC ///////////////////////////////////////////////////////////////////////

/// Suggest a mapping for the joint names in traversal order. Joints no rule recognizes are left
/// out. The result is advisory and meant to be reviewed by hand.
pub fn suggest_name_map(order: &[JointName]) -> NameMap {
    let mut map = NameMap::new();
    for (rule, apply) in RULES {
        let before = map.len();
        apply(order, &mut map);
        debug!("{} rule mapped {} joints", rule, map.len() - before);
    }
    map
}
