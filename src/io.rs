//! JSON file access for merge jobs and reports.
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Read and deserialize a JSON document. Errors name the file.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&text).map_err(|e| format!("Failed to parse {}: {e}", path.display()))
}

/// Pretty-print `value` to `path`. Missing parent directories are created.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
            .map_err(|e| format!("Failed to create report directory {}: {e}", dir.display()))?,
        _ => {}
    }
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to encode report for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(tag: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("phase_merge_{tag}_{}", std::process::id()))
    }

    #[test]
    fn writes_into_missing_directory() {
        let dir = scratch_dir("write");
        let path = dir.join("nested").join("value.json");
        write_json_file(&path, &vec![1, 2, 3]).unwrap();
        let back: Vec<i32> = read_json_file(&path).unwrap();
        assert_eq!(back, vec![1, 2, 3]);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn read_errors_name_the_file() {
        let dir = scratch_dir("read");
        let missing = dir.join("missing.json");
        let err = read_json_file::<Vec<i32>>(&missing).unwrap_err();
        assert!(err.starts_with("Failed to read"), "{err}");
        assert!(err.contains("missing.json"), "{err}");

        fs::create_dir_all(&dir).unwrap();
        let broken = dir.join("broken.json");
        fs::write(&broken, "[1, 2,").unwrap();
        let err = read_json_file::<Vec<i32>>(&broken).unwrap_err();
        assert!(err.starts_with("Failed to parse"), "{err}");
        let _ = fs::remove_dir_all(&dir);
    }
}
