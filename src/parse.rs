use crate::error::ProbeError;
use crate::types::*;
use crate::utils;
use regex::{Captures, Regex};
use std::collections::HashSet;
use std::path::Path;
use std::str::Lines;
use tracing::{debug, trace, warn};

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Route lines into the HIERARCHY block and the MOTION block in a single forward pass.
/// The `HIERARCHY` line itself is dropped, the `MOTION` line is kept with the motion block.
fn __split_blocks(lines: Lines) -> (Vec<&str>, Vec<&str>) {
    let mut header_lines = Vec::new();
    let mut motion_lines = Vec::new();
    let mut in_hierarchy = false;
    let mut in_motion = false;

    for line in lines {
        let trimmed = line.trim();
        if trimmed.starts_with("HIERARCHY") {
            in_hierarchy = true;
            continue;
        }
        if trimmed.starts_with("MOTION") {
            in_motion = true;
            in_hierarchy = false;
        }
        if in_motion {
            motion_lines.push(line);
        } else if in_hierarchy {
            header_lines.push(line);
        }
    }
    (header_lines, motion_lines)
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Pull the frame count and frame time out of the MOTION block. Scanning stops at the first
/// `Frame Time` field, whether or not its value is usable.
fn parse_motion(motion_lines: &[&str]) -> MotionInfo {
    let re_frames = Regex::new(r"Frames:\s*(\d+)").expect("valid regex");
    let re_frame_time = Regex::new(r"Frame Time:\s*([0-9.eE+-]+)").expect("valid regex");

    let mut motion = MotionInfo::default();
    for line in motion_lines {
        if motion.num_frames.is_none() {
            if let Some(captures) = re_frames.captures(line) {
                motion.num_frames = captures[1].parse::<usize>().ok();
            }
        }
        if let Some(captures) = re_frame_time.captures(line) {
            match captures[1].parse::<f64>() {
                Ok(frame_time) => {
                    motion.frame_time = Some(frame_time);
                    motion.fps = utils::__fps_from_frame_time(frame_time);
                }
                Err(_) => debug!("ignoring unparsable frame time {:?}", &captures[1]),
            }
            break;
        }
    }

    if motion.fps.is_none() {
        warn!("no usable `Frame Time` found, frame rate is unknown");
    }
    motion
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Brace state of the `End Site` block being read, if any.
#[derive(Debug, Default)]
struct EndSiteScope {
    pending: bool,
    depth: usize,
}

/// Account for every brace on a line. Braces belonging to an end site are netted against its
/// scope first; only a `}` outside of any end site pops the joint stack.
fn __apply_braces(line: &str, end_site: &mut EndSiteScope, stack: &mut Vec<JointName>) {
    for c in line.chars() {
        match c {
            '{' if end_site.pending => {
                end_site.pending = false;
                end_site.depth += 1;
            }
            '{' if end_site.depth > 0 => end_site.depth += 1,
            '}' if end_site.depth > 0 => end_site.depth -= 1,
            '}' => {
                if stack.pop().is_none() {
                    debug!("ignoring stray closing brace");
                }
            }
            _ => {}
        }
    }
}

fn __parse_offset(captures: &Captures) -> Option<Position> {
    let x = captures[1].parse::<f64>().ok()?;
    let y = captures[2].parse::<f64>().ok()?;
    let z = captures[3].parse::<f64>().ok()?;
    Some(Position::new(x, y, z))
}

/// Build the joint tree from the HIERARCHY block.
///
/// Only `ROOT`/`JOINT` push onto the joint stack and only `}` pops it. An `End Site` arms a
/// pending scope so that its own `{ ... }`, on one line or several, never pops a joint.
fn parse_hierarchy(header_lines: &[&str]) -> Hierarchy {
    let re_joint = Regex::new(r"^\s*(ROOT|JOINT)\s+([A-Za-z0-9_\-.]+)").expect("valid regex");
    let re_end_site = Regex::new(r"^\s*End Site").expect("valid regex");
    let re_offset = Regex::new(r"OFFSET\s+([-+0-9.eE]+)\s+([-+0-9.eE]+)\s+([-+0-9.eE]+)")
        .expect("valid regex");

    let mut hierarchy = Hierarchy::default();
    let mut stack: Vec<JointName> = Vec::new();
    let mut seen: HashSet<JointName> = HashSet::new();
    let mut end_site = EndSiteScope::default();

    for line in header_lines {
        if let Some(captures) = re_joint.captures(line) {
            //// Declare joint
            let name = captures[2].to_string();
            trace!("{} {}", &captures[1], name);
            if !seen.insert(name.clone()) {
                warn!("duplicate joint name {:?}, later declaration shares its entry", name);
            }
            hierarchy.order.push(name.clone());
            match stack.last() {
                Some(parent) => hierarchy
                    .children
                    .entry(parent.clone())
                    .or_default()
                    .push(name.clone()),
                None if hierarchy.root.is_none() => hierarchy.root = Some(name.clone()),
                None => warn!("ignoring additional root {:?}", name),
            }
            stack.push(name);
            continue;
        }
        if re_end_site.is_match(line) {
            //// End site, possibly written on a single line
            end_site.pending = true;
            if let (Some(captures), Some(owner)) = (re_offset.captures(line), stack.last()) {
                if let Some(offset) = __parse_offset(&captures) {
                    hierarchy.end_sites.insert(owner.clone(), offset);
                }
            }
            __apply_braces(line, &mut end_site, &mut stack);
            continue;
        }
        if line.contains('{') || line.contains('}') {
            __apply_braces(line, &mut end_site, &mut stack);
            continue;
        }
        if !line.trim_start().starts_with("OFFSET") {
            continue;
        }
        if let Some(captures) = re_offset.captures(line) {
            //// Parse offset
            let Some(current) = stack.last() else {
                continue;
            };
            let Some(offset) = __parse_offset(&captures) else {
                debug!("ignoring malformed offset for {:?}: {:?}", current, line.trim());
                continue;
            };
            if end_site.depth > 0 {
                hierarchy.end_sites.insert(current.clone(), offset);
            } else {
                hierarchy.offsets.insert(current.clone(), offset);
            }
        }
    }

    if hierarchy.root.is_none() {
        warn!("no ROOT found in HIERARCHY block");
    }
    hierarchy
}

//////////////////////////////////////////////////////////////// PUBLIC ///////////////////////////////////////////////////////////////////////

/// Load a bvh skeleton from a file path. Invalid UTF-8 is replaced rather than rejected.
pub fn load_skeleton_from_file(file_path: impl AsRef<Path>) -> Result<BvhSkeleton, ProbeError> {
    let file_path = file_path.as_ref();
    let bytes = std::fs::read(file_path).map_err(|source| ProbeError::Read {
        path: file_path.to_path_buf(),
        source,
    })?;
    let contents = String::from_utf8_lossy(&bytes);
    Ok(__load_skeleton(contents.lines()))
}

/// Load a bvh skeleton from a string.
pub fn load_skeleton_from_string(bvh_string: &str) -> BvhSkeleton {
    __load_skeleton(bvh_string.lines())
}

fn __load_skeleton(lines: Lines) -> BvhSkeleton {
    let (header_lines, motion_lines) = __split_blocks(lines);
    let hierarchy = parse_hierarchy(&header_lines);
    let motion = parse_motion(&motion_lines);
    debug!(
        "parsed {} joints, fps {:?}",
        hierarchy.num_joints(),
        motion.fps
    );
    BvhSkeleton { hierarchy, motion }
}
