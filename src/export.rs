use crate::error::ProbeError;
use crate::types::NameMap;
use std::path::Path;
use tracing::info;

/// Name of the constant the retargeting pipeline imports the map from.
pub const NAME_MAP_CONST: &str = "NAME_MAP_BANDAI2GMR";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapFormat {
    /// Python module defining [`NAME_MAP_CONST`] as a dict literal.
    Python,
    /// Plain JSON object.
    Json,
}

impl MapFormat {
    /// `.json` files get JSON, anything else a Python module.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => MapFormat::Json,
            _ => MapFormat::Python,
        }
    }
}

fn __python_str(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            '\n' => quoted.push_str("\\n"),
            c => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}

pub fn render_python_module(name_map: &NameMap) -> String {
    let mut module = String::new();
    module.push_str("# Auto-generated by bvh-skeleton-probe\n");
    module.push_str(&format!("{} = {{\n", NAME_MAP_CONST));
    for (source, target) in name_map.iter() {
        module.push_str(&format!(
            "    {}: {},\n",
            __python_str(source),
            __python_str(target)
        ));
    }
    module.push_str("}\n");
    module
}

pub fn render_json(name_map: &NameMap) -> Result<String, ProbeError> {
    let mut json = serde_json::to_string_pretty(name_map)?;
    json.push('\n');
    Ok(json)
}

/// Write the map to `path`, replacing whatever is there.
pub fn write_name_map(path: impl AsRef<Path>, name_map: &NameMap) -> Result<(), ProbeError> {
    let path = path.as_ref();
    let format = MapFormat::from_path(path);
    let contents = match format {
        MapFormat::Python => render_python_module(name_map),
        MapFormat::Json => render_json(name_map)?,
    };
    std::fs::write(path, contents).map_err(|source| ProbeError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!("wrote {} entries as {:?} to {:?}", name_map.len(), format, path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NameMap {
        let mut map = NameMap::new();
        map.insert_if_absent("Hips", "Hips");
        map.insert_if_absent("LeftToeBase", "LeftToe");
        map
    }

    #[test]
    fn python_module_defines_the_constant() {
        assert_eq!(
            render_python_module(&sample()),
            "# Auto-generated by bvh-skeleton-probe\n\
             NAME_MAP_BANDAI2GMR = {\n    \
             'Hips': 'Hips',\n    \
             'LeftToeBase': 'LeftToe',\n\
             }\n"
        );
    }

    #[test]
    fn json_keeps_entry_order() {
        let json = render_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["LeftToeBase"], "LeftToe");
        assert!(json.find("Hips").unwrap() < json.find("LeftToeBase").unwrap());
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(MapFormat::from_path(Path::new("map.json")), MapFormat::Json);
        assert_eq!(MapFormat::from_path(Path::new("map.JSON")), MapFormat::Json);
        assert_eq!(MapFormat::from_path(Path::new("bandai_name_map.py")), MapFormat::Python);
        assert_eq!(MapFormat::from_path(Path::new("map")), MapFormat::Python);
    }

    #[test]
    fn python_strings_are_escaped() {
        assert_eq!(__python_str("a'b\\c"), "'a\\'b\\\\c'");
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bandai_name_map.py");
        std::fs::write(&path, "stale").unwrap();
        write_name_map(&path, &sample()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# Auto-generated"));
        assert!(!written.contains("stale"));
    }
}
