use crate::error::{Result, ViewError};
use crate::types::{Breach, VerifiedEmail};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path).map_err(|e| ViewError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&contents).map_err(|e| ViewError::InputParse {
        path: path.to_path_buf(),
        source: e,
    })
}

pub fn load_breach(path: &Path) -> Result<Breach> {
    let breach: Breach = read_json(path)?;
    log::debug!(
        "Loaded breach {} with {} data classes",
        breach.name,
        breach.data_classes.len()
    );
    Ok(breach)
}

pub fn load_verified_emails(path: &Path) -> Result<Vec<VerifiedEmail>> {
    let emails: Vec<VerifiedEmail> = read_json(path)?;
    log::debug!("Loaded {} verified emails", emails.len());
    Ok(emails)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_breach_reports_bad_dates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("breach.json");
        fs::write(
            &path,
            r#"{"Name":"X","Title":"X","BreachDate":"yesterday","AddedDate":"2020-01-01"}"#,
        )
        .unwrap();

        let err = load_breach(&path).unwrap_err();
        assert!(matches!(err, ViewError::InputParse { .. }));
        assert!(err.to_string().contains("breach.json"));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = load_verified_emails(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ViewError::Read { .. }));
    }

    #[test]
    fn test_load_verified_emails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("emails.json");
        fs::write(
            &path,
            r#"[{"email":"me@example.com","breaches":[{"name":"Adobe","dataClasses":["passwords"],"isResolved":true}]}]"#,
        )
        .unwrap();

        let emails = load_verified_emails(&path).unwrap();
        assert_eq!(emails.len(), 1);
        assert!(emails[0].breaches[0].is_resolved);
    }
}
