use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;

/// Reads a TOML file into `T`.
/// Errors carry the path, and for malformed contents also the target type.
pub fn read_toml<P: AsRef<Path>, T: DeserializeOwned>(path: P) -> anyhow::Result<T> {
    let path = path.as_ref();
    let text = fs_err::read_to_string(path)?;
    toml::from_str(&text).with_context(|| {
        format!(
            "{path:?} is not a valid {}",
            std::any::type_name::<T>()
        )
    })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::read_toml;

    #[derive(Debug, PartialEq, Eq, Deserialize)]
    struct Sample {
        url: String,
        secs: u64,
    }

    #[test]
    fn reads_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.toml");
        fs_err::write(&path, "url = \"https://example.com/\"\nsecs = 2\n").unwrap();
        assert_eq!(
            read_toml::<_, Sample>(&path).unwrap(),
            Sample {
                url: "https://example.com/".to_owned(),
                secs: 2,
            }
        );
    }

    #[test]
    fn error_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs_err::write(&path, "url = ").unwrap();
        let error = read_toml::<_, Sample>(&path).unwrap_err();
        assert!(format!("{error:?}").contains("broken.toml"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_toml::<_, Sample>(dir.path().join("absent.toml")).is_err());
    }
}
