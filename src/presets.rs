use log::{debug, warn};
use resolver::types::NO_SELECTION;
use std::path::Path;

pub(crate) const FALLBACK_PRESET: &str = "1:1";
pub(crate) const FALLBACK_BASE_RESOLUTION: &str = "1024";

/// Reads one entry per line, trimmed, blank lines dropped
async fn read_entries(path: &Path) -> std::io::Result<Vec<String>> {
    let text = tokio::fs::read_to_string(path).await?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

/// Loads the aspect preset dropdown. The "None" entry always comes first.
pub(crate) async fn load_aspect_presets(path: &Path) -> Vec<String> {
    let presets = match read_entries(path).await {
        Ok(presets) => presets,
        Err(e) => {
            warn!(
                "Failed to read aspect presets from {:?} ({}), falling back to {}",
                path, e, FALLBACK_PRESET
            );
            vec![FALLBACK_PRESET.to_string()]
        }
    };
    debug!("Loaded {} aspect presets from {:?}", presets.len(), path);
    std::iter::once(NO_SELECTION.to_string())
        .chain(presets)
        .collect()
}

/// Loads the base resolution dropdown, never empty
pub(crate) async fn load_base_resolutions(path: &Path) -> Vec<String> {
    match read_entries(path).await {
        Ok(bases) if !bases.is_empty() => {
            debug!("Loaded {} base resolutions from {:?}", bases.len(), path);
            bases
        }
        Ok(_) => {
            warn!(
                "No base resolutions in {:?}, falling back to {}",
                path, FALLBACK_BASE_RESOLUTION
            );
            vec![FALLBACK_BASE_RESOLUTION.to_string()]
        }
        Err(e) => {
            warn!(
                "Failed to read base resolutions from {:?} ({}), falling back to {}",
                path, e, FALLBACK_BASE_RESOLUTION
            );
            vec![FALLBACK_BASE_RESOLUTION.to_string()]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn presets_are_trimmed_and_prefixed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aspect_presets.txt");
        std::fs::write(&path, "1:1\n 16:9 \n\n2:3\r\n").unwrap();

        assert_eq!(
            load_aspect_presets(&path).await,
            vec!["None", "1:1", "16:9", "2:3"]
        );
    }

    #[tokio::test]
    async fn missing_presets_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let presets = load_aspect_presets(&dir.path().join("missing.txt")).await;
        assert_eq!(presets, vec!["None", "1:1"]);
    }

    #[tokio::test]
    async fn empty_presets_keep_only_sentinel() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aspect_presets.txt");
        std::fs::write(&path, "\n\n").unwrap();

        assert_eq!(load_aspect_presets(&path).await, vec!["None"]);
    }

    #[tokio::test]
    async fn base_resolutions_load_and_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("base_resolutions.txt");
        std::fs::write(&path, "1024\n768\n").unwrap();
        assert_eq!(load_base_resolutions(&path).await, vec!["1024", "768"]);

        std::fs::write(&path, "").unwrap();
        assert_eq!(load_base_resolutions(&path).await, vec!["1024"]);

        let missing = dir.path().join("missing.txt");
        assert_eq!(load_base_resolutions(&missing).await, vec!["1024"]);
    }
}
