//! Well-known directories next to the executable

use std::path::PathBuf;

use super::ResourceError;

/// Directory holding game media, relative to the executable
pub const RESOURCES_DIR_NAME: &str = "game_resources";

/// Directory holding editor media, relative to the executable
pub const EDITOR_RESOURCES_DIR_NAME: &str = "editor_resources";

/// Directory containing the running executable
pub fn executable_dir() -> Result<PathBuf, ResourceError> {
    let exe = std::env::current_exe()?;
    exe.parent()
        .map(PathBuf::from)
        .ok_or(ResourceError::NotFound(exe))
}

/// `<executable dir>/game_resources`
pub fn resources_dir() -> Result<PathBuf, ResourceError> {
    Ok(executable_dir()?.join(RESOURCES_DIR_NAME))
}

/// `<executable dir>/editor_resources`
pub fn editor_resources_dir() -> Result<PathBuf, ResourceError> {
    Ok(executable_dir()?.join(EDITOR_RESOURCES_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_dirs_sit_next_to_executable() {
        let exe_dir = executable_dir().unwrap();
        assert!(exe_dir.is_dir());
        assert_eq!(resources_dir().unwrap(), exe_dir.join("game_resources"));
        assert_eq!(editor_resources_dir().unwrap(), exe_dir.join("editor_resources"));
    }
}
