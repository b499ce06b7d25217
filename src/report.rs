use crate::mapping::Side;
use crate::types::{BvhSkeleton, Hierarchy, NameMap};
use crate::utils::guess_unit_scale;
use std::fmt;

const INDENT: &str = "  ";

/// Console report of a probed skeleton: joint tree, stats, suggested name map and toe fallbacks.
pub struct Report<'a> {
    pub skeleton: &'a BvhSkeleton,
    pub name_map: &'a NameMap,
}

impl<'a> Report<'a> {
    pub fn new(skeleton: &'a BvhSkeleton, name_map: &'a NameMap) -> Self {
        Report { skeleton, name_map }
    }
}

fn __write_tree<'h>(
    f: &mut fmt::Formatter<'_>,
    hierarchy: &'h Hierarchy,
    name: &'h str,
    ancestors: &mut Vec<&'h str>,
) -> fmt::Result {
    writeln!(f, "{}- {}", INDENT.repeat(ancestors.len()), name)?;
    // only reachable through duplicate joint names
    if ancestors.contains(&name) {
        return Ok(());
    }
    ancestors.push(name);
    for child in hierarchy.children_of(name) {
        __write_tree(f, hierarchy, child, ancestors)?;
    }
    ancestors.pop();
    Ok(())
}

fn __toe_line(f: &mut fmt::Formatter<'_>, name_map: &NameMap, side: Side) -> fmt::Result {
    match name_map.source_for(side.toe()) {
        Some(source) => writeln!(f, "{:<8} source: {}", side.toe(), source),
        None => writeln!(
            f,
            "{:<8} source: NOT FOUND (fallback to {} orientation)",
            side.toe(),
            side.foot()
        ),
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hierarchy = &self.skeleton.hierarchy;
        let motion = &self.skeleton.motion;

        //// Joint tree
        writeln!(f, "== BVH Hierarchy (JOINT order) ==")?;
        match &hierarchy.root {
            Some(root) => __write_tree(f, hierarchy, root, &mut Vec::new())?,
            None => writeln!(f, "(no ROOT found)")?,
        }

        //// Stats
        writeln!(f)?;
        writeln!(f, "== Stats ==")?;
        writeln!(f, "Joints: {}", hierarchy.num_joints())?;
        match motion.num_frames {
            Some(frames) => writeln!(f, "Frames: {}", frames)?,
            None => writeln!(f, "Frames: unknown")?,
        }
        match motion.fps {
            Some(fps) => writeln!(f, "FPS   : {}", fps)?,
            None => writeln!(f, "FPS   : unknown")?,
        }
        writeln!(
            f,
            "Unit? : {} (heuristic)",
            guess_unit_scale(hierarchy.offsets.values())
        )?;

        //// Name map
        writeln!(f)?;
        writeln!(f, "== Suggested Bandai->GMR name map ==")?;
        for (source, target) in self.name_map.iter() {
            writeln!(f, "{}  ->  {}", source, target)?;
        }

        //// Toe fallbacks
        writeln!(f)?;
        writeln!(f, "== Toe Fallbacks ==")?;
        __toe_line(f, self.name_map, Side::Left)?;
        __toe_line(f, self.name_map, Side::Right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::suggest_name_map;
    use crate::parse::load_skeleton_from_string;

    const BVH: &str = "\
HIERARCHY
ROOT Hips
{
  OFFSET 0 0.9 0
  JOINT LeftUpLeg
  {
    OFFSET 0.1 0 0
    JOINT LeftFoot
    {
      OFFSET 0 -0.8 0
      JOINT LeftToe_01
      {
        OFFSET 0 0 0.1
        End Site
        {
          OFFSET 0 0 0.05
        }
      }
    }
  }
}
MOTION
Frames: 1
Frame Time: 0.0333333
";

    #[test]
    fn renders_indented_tree_and_stats() {
        let skeleton = load_skeleton_from_string(BVH);
        let map = suggest_name_map(&skeleton.hierarchy.order);
        let report = Report::new(&skeleton, &map).to_string();

        assert!(report.contains("- Hips\n  - LeftUpLeg\n    - LeftFoot\n      - LeftToe_01\n"));
        assert!(report.contains("Joints: 4\n"));
        assert!(report.contains("Frames: 1\n"));
        assert!(report.contains("FPS   : 30\n"));
        assert!(report.contains("Unit? : m-like (heuristic)\n"));
        assert!(report.contains("LeftToe_01  ->  LeftToe\n"));
        assert!(report.contains("LeftToe  source: LeftToe_01\n"));
        assert!(report.contains("RightToe source: NOT FOUND (fallback to RightFoot orientation)\n"));
    }

    #[test]
    fn empty_skeleton_reports_zero_counts() {
        let skeleton = BvhSkeleton::default();
        let map = NameMap::new();
        let report = Report::new(&skeleton, &map).to_string();

        assert!(report.contains("(no ROOT found)\n"));
        assert!(report.contains("Joints: 0\n"));
        assert!(report.contains("FPS   : unknown\n"));
        assert!(report.contains("Unit? : unknown (heuristic)\n"));
        assert!(report.contains("LeftToe  source: NOT FOUND (fallback to LeftFoot orientation)\n"));
    }

    #[test]
    fn self_referencing_duplicate_does_not_recurse_forever() {
        let skeleton = load_skeleton_from_string(
            "HIERARCHY\nROOT A\n{\nJOINT A\n{\n}\n}\nMOTION\n",
        );
        let map = NameMap::new();
        let report = Report::new(&skeleton, &map).to_string();
        assert!(report.contains("- A\n  - A\n\n"));
    }
}
