use std::fmt;

/// A user supplied map name that is safe to turn into `<name>.<ext>` inside the
/// output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapFileName(String);

impl MapFileName {
    pub fn parse(name: &str) -> Result<Self, String> {
        if name.is_empty() {
            return Err("Missing name parameter".to_string());
        }
        if name == "." || name.contains("..") {
            return Err(format!("Invalid map name: {}", name));
        }
        if name
            .chars()
            .any(|c| c == '/' || c == '\\' || c.is_control())
        {
            return Err(format!("Invalid map name: {}", name));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn with_extension(&self, extension: &str) -> String {
        format!("{}.{}", self.0, extension)
    }
}

impl fmt::Display for MapFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
