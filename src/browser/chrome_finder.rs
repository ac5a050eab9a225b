use std::path::{Path, PathBuf};

use log::debug;

use super::BrowserError;

/// Picks an installed browser binary to drive.
///
/// An explicitly given path must exist and be executable.
/// Otherwise `candidates` are tried in order (normally [`default_paths`]);
/// `None` means none of them is usable.
pub fn find_chrome(
    custom_path: Option<&Path>,
    candidates: Vec<PathBuf>,
) -> Result<Option<PathBuf>, BrowserError> {
    if let Some(path) = custom_path {
        return validate_chrome_path(path).map(Some);
    }
    let found = candidates
        .into_iter()
        .find(|path| validate_chrome_path(path).is_ok());
    debug!("Chrome in default locations: {found:?}");
    Ok(found)
}

pub fn default_paths() -> Vec<PathBuf> {
    #[cfg(target_os = "macos")]
    return vec![
        PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome"),
        PathBuf::from("/Applications/Chromium.app/Contents/MacOS/Chromium"),
    ];

    #[cfg(target_os = "linux")]
    return vec![
        PathBuf::from("/usr/bin/google-chrome"),
        PathBuf::from("/usr/bin/chromium"),
        PathBuf::from("/usr/bin/chromium-browser"),
    ];

    #[cfg(target_os = "windows")]
    return vec![
        PathBuf::from(r"C:\Program Files\Google\Chrome\Application\chrome.exe"),
        PathBuf::from(r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe"),
    ];

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    return vec![];
}

fn validate_chrome_path(path: &Path) -> Result<PathBuf, BrowserError> {
    if !path.is_file() {
        return Err(BrowserError::ChromeNotFound(path.to_path_buf()));
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs_err::metadata(path)?.permissions().mode();
        if mode & 0o111 == 0 {
            return Err(BrowserError::NotExecutable(path.to_path_buf()));
        }
    }

    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::find_chrome;
    use crate::browser::BrowserError;

    #[test]
    fn custom_path_is_used() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let path = temp.path();

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
        }

        assert_eq!(find_chrome(Some(path), vec![]).unwrap().as_deref(), Some(path));
    }

    #[test]
    fn first_existing_candidate_wins() {
        let dir = tempfile::tempdir().unwrap();
        let chromium = dir.path().join("chromium");
        fs_err::write(&chromium, "").unwrap();

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&chromium, std::fs::Permissions::from_mode(0o755)).unwrap();
        }

        let candidates = vec![dir.path().join("google-chrome"), chromium.clone()];
        assert_eq!(find_chrome(None, candidates).unwrap(), Some(chromium));
        assert_eq!(find_chrome(None, vec![]).unwrap(), None);
    }

    #[test]
    fn missing_custom_path() {
        let result = find_chrome(Some(Path::new("/nonexistent/chrome")), vec![]);
        assert!(matches!(result, Err(BrowserError::ChromeNotFound(_))));
    }

    #[cfg(unix)]
    #[test]
    fn custom_path_must_be_executable() {
        use std::os::unix::fs::PermissionsExt;
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::set_permissions(temp.path(), std::fs::Permissions::from_mode(0o644)).unwrap();
        let result = find_chrome(Some(temp.path()), vec![]);
        assert!(matches!(result, Err(BrowserError::NotExecutable(_))));
    }
}
