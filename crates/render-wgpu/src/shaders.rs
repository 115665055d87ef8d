use std::fs;
use std::path::{Path, PathBuf};

pub const SHIP_SHADER_FILE: &str = "ship.wgsl";
pub const LIGHT_SHADER_FILE: &str = "light.wgsl";

/// WGSL for the lit ship pass, built into the binary.
pub const SHIP_SHADER: &str = include_str!("../shaders/ship.wgsl");
/// WGSL for the unlit light-cube pass, built into the binary.
pub const LIGHT_SHADER: &str = include_str!("../shaders/light.wgsl");

#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("failed to read shader {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Source text for both shader programs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderLibrary {
    pub ship: String,
    pub light: String,
}

impl ShaderLibrary {
    pub fn embedded() -> Self {
        Self {
            ship: SHIP_SHADER.to_string(),
            light: LIGHT_SHADER.to_string(),
        }
    }

    /// Read `ship.wgsl` and `light.wgsl` from `dir`.
    ///
    /// Compilation happens later on the GPU device; this only reads text.
    pub fn load(dir: &Path) -> Result<Self, ShaderError> {
        let shaders = Self {
            ship: read_source(&dir.join(SHIP_SHADER_FILE))?,
            light: read_source(&dir.join(LIGHT_SHADER_FILE))?,
        };
        tracing::debug!("loaded shaders from {}", dir.display());
        Ok(shaders)
    }
}

impl Default for ShaderLibrary {
    fn default() -> Self {
        Self::embedded()
    }
}

fn read_source(path: &Path) -> Result<String, ShaderError> {
    fs::read_to_string(path).map_err(|source| ShaderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_shaders_declare_entry_points() {
        let lib = ShaderLibrary::embedded();
        assert!(lib.ship.contains("fn vs_main"));
        assert!(lib.ship.contains("fn fs_main"));
        assert!(lib.light.contains("fn vs_light"));
        assert!(lib.light.contains("fn fs_light"));
    }

    #[test]
    fn load_reads_both_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SHIP_SHADER_FILE), "// ship").unwrap();
        fs::write(dir.path().join(LIGHT_SHADER_FILE), "// light").unwrap();

        let lib = ShaderLibrary::load(dir.path()).unwrap();
        assert_eq!(lib.ship, "// ship");
        assert_eq!(lib.light, "// light");
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SHIP_SHADER_FILE), "// ship").unwrap();

        let err = ShaderLibrary::load(dir.path()).unwrap_err();
        let ShaderError::Io { path, source } = &err;
        assert_eq!(path, &dir.path().join(LIGHT_SHADER_FILE));
        assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        assert!(err.to_string().contains(LIGHT_SHADER_FILE));
    }
}
