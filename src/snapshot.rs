//! Backend snapshot files
//!
//! Item and competition rows exported from the backend, as JSON or YAML.
//! The format is chosen by file extension; a leading UTF-8 BOM is ignored.

use std::path::{Path, PathBuf};

use cookoff_core::{CompetitionWindow, ContentItem, WindowShape};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::ConfigLimits;
use crate::error::{CookoffError, SnapshotError};

/// Serialization format of a snapshot file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    /// `.json`
    Json,
    /// `.yaml` / `.yml`
    Yaml,
}

impl SnapshotFormat {
    /// Detects the format from the file extension.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::UnsupportedFormat` for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, SnapshotError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(SnapshotError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// A competition row with its validated window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Competition {
    /// Backend identifier.
    pub id: String,
    /// Display title, when the row carries one.
    pub title: Option<String>,
    /// Phase boundaries.
    pub window: CompetitionWindow,
}

impl Competition {
    /// Title if present, otherwise the id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, Deserialize)]
struct CompetitionRow {
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(flatten)]
    window: WindowShape,
}

/// Reads content item rows.
///
/// # Errors
///
/// Returns a `SnapshotError` when the file is unreadable, too large, in an
/// unknown format or does not contain a list of item rows.
pub fn load_items(path: &Path, limits: &ConfigLimits) -> Result<Vec<ContentItem>, SnapshotError> {
    let items = read_rows(path, limits)?;
    tracing::debug!(path = %path.display(), count = items.len(), "loaded item snapshot");
    Ok(items)
}

/// Reads competition rows and validates each window.
///
/// # Errors
///
/// Returns `CookoffError::Snapshot` for unreadable or malformed files and
/// `CookoffError::Validation` for a window whose boundaries are out of order.
pub fn load_competitions(
    path: &Path,
    limits: &ConfigLimits,
) -> Result<Vec<Competition>, CookoffError> {
    let rows: Vec<CompetitionRow> = read_rows(path, limits)?;

    let competitions = rows
        .into_iter()
        .map(|row| -> Result<Competition, CookoffError> {
            let window = CompetitionWindow::try_from(row.window).inspect_err(|err| {
                tracing::warn!(id = %row.id, error = %err, "rejected competition window");
            })?;
            Ok(Competition {
                id: row.id,
                title: row.title,
                window,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(path = %path.display(), count = competitions.len(), "loaded competition snapshot");
    Ok(competitions)
}

/// Finds the competition with `id`.
///
/// # Errors
///
/// Returns `SnapshotError::UnknownCompetition` if no row has that id.
pub fn find_competition(
    competitions: Vec<Competition>,
    id: &str,
    path: &Path,
) -> Result<Competition, SnapshotError> {
    competitions
        .into_iter()
        .find(|c| c.id == id)
        .ok_or_else(|| SnapshotError::UnknownCompetition {
            id: id.to_string(),
            path: path.to_path_buf(),
        })
}

fn read_rows<T: DeserializeOwned>(path: &Path, limits: &ConfigLimits) -> Result<Vec<T>, SnapshotError> {
    let format = SnapshotFormat::from_path(path)?;

    let unreadable = |source| SnapshotError::Unreadable {
        path: path.to_path_buf(),
        source,
    };

    let size = std::fs::metadata(path).map_err(unreadable)?.len();
    if usize::try_from(size).unwrap_or(usize::MAX) > limits.max_snapshot_size {
        return Err(SnapshotError::TooLarge {
            path: path.to_path_buf(),
            actual: format!("{size} bytes"),
            limit: format!("{} bytes", limits.max_snapshot_size),
        });
    }

    let raw = std::fs::read_to_string(path).map_err(unreadable)?;
    let content = raw.strip_prefix('\u{feff}').unwrap_or(&raw);

    let rows: Vec<T> = parse_rows(content, format, path)?;

    if rows.len() > limits.max_items {
        return Err(SnapshotError::TooLarge {
            path: path.to_path_buf(),
            actual: format!("{} rows", rows.len()),
            limit: format!("{} rows", limits.max_items),
        });
    }

    Ok(rows)
}

fn parse_rows<T: DeserializeOwned>(
    content: &str,
    format: SnapshotFormat,
    path: &Path,
) -> Result<Vec<T>, SnapshotError> {
    let malformed = |line: Option<usize>, message: String| SnapshotError::Malformed {
        path: PathBuf::from(path),
        line,
        message,
    };

    match format {
        SnapshotFormat::Json => {
            serde_json::from_str(content).map_err(|e| malformed(Some(e.line()), e.to_string()))
        }
        SnapshotFormat::Yaml => {
            if content.trim().is_empty() {
                return Ok(Vec::new());
            }
            serde_yaml::from_str(content)
                .map_err(|e| malformed(e.location().map(|l| l.line()), e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use cookoff_core::Phase;
    use std::io::Write;

    fn write_snapshot(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(
            SnapshotFormat::from_path(Path::new("a.json")).unwrap(),
            SnapshotFormat::Json
        );
        assert_eq!(
            SnapshotFormat::from_path(Path::new("a.YML")).unwrap(),
            SnapshotFormat::Yaml
        );
        assert!(matches!(
            SnapshotFormat::from_path(Path::new("a.csv")),
            Err(SnapshotError::UnsupportedFormat { .. })
        ));
        assert!(SnapshotFormat::from_path(Path::new("items")).is_err());
    }

    #[test]
    fn test_load_items_json_with_aliases() {
        let file = write_snapshot(
            ".json",
            r#"[
                {"id": "a", "created_at": "2025-06-01T10:00:00Z", "likes_count": 3, "comments_count": 1},
                {"id": "b", "created_at": "2025-06-01T11:00:00Z"}
            ]"#,
        );
        let items = load_items(file.path(), &ConfigLimits::default()).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].likes, 3);
        assert_eq!(items[0].comments, 1);
        assert_eq!(items[1].likes, 0);
    }

    #[test]
    fn test_load_items_yaml_with_bom() {
        let file = write_snapshot(
            ".yaml",
            "\u{feff}- id: a\n  created_at: 2025-06-01T10:00:00Z\n  likes: 2\n",
        );
        let items = load_items(file.path(), &ConfigLimits::default()).unwrap();
        assert_eq!(items[0].id, "a");
    }

    #[test]
    fn test_empty_yaml_is_empty_list() {
        let file = write_snapshot(".yaml", "\n");
        let items = load_items(file.path(), &ConfigLimits::default()).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_negative_counter_is_malformed() {
        let file = write_snapshot(
            ".json",
            r#"[{"id": "a", "created_at": "2025-06-01T10:00:00Z", "likes": -1}]"#,
        );
        let err = load_items(file.path(), &ConfigLimits::default()).unwrap_err();
        assert!(matches!(err, SnapshotError::Malformed { line: Some(1), .. }));
    }

    #[test]
    fn test_row_limit() {
        let file = write_snapshot(
            ".json",
            r#"[{"id": "a", "created_at": "2025-06-01T10:00:00Z"},
                {"id": "b", "created_at": "2025-06-01T10:00:00Z"}]"#,
        );
        let limits = ConfigLimits {
            max_items: 1,
            ..ConfigLimits::default()
        };
        let err = load_items(file.path(), &limits).unwrap_err();
        assert!(matches!(err, SnapshotError::TooLarge { .. }));
    }

    #[test]
    fn test_byte_limit() {
        let file = write_snapshot(".json", "[]");
        let limits = ConfigLimits {
            max_snapshot_size: 1,
            ..ConfigLimits::default()
        };
        assert!(matches!(
            load_items(file.path(), &limits),
            Err(SnapshotError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_missing_file_unreadable() {
        let err = load_items(Path::new("/nonexistent/items.json"), &ConfigLimits::default())
            .unwrap_err();
        assert!(matches!(err, SnapshotError::Unreadable { .. }));
    }

    #[test]
    fn test_load_both_window_shapes() {
        let file = write_snapshot(
            ".yaml",
            r"
- id: summer
  title: Summer Grill-off
  registration_start: 2025-06-01T00:00:00Z
  competition_start: 2025-06-02T00:00:00Z
  competition_end: 2025-06-03T00:00:00Z
  voting_end: 2025-06-04T00:00:00Z
- id: quick
  submission_deadline: 2025-06-02T00:00:00Z
  voting_deadline: 2025-06-03T00:00:00Z
",
        );
        let competitions = load_competitions(file.path(), &ConfigLimits::default()).unwrap();
        assert_eq!(competitions.len(), 2);
        assert_eq!(competitions[0].display_name(), "Summer Grill-off");
        assert_eq!(competitions[1].display_name(), "quick");

        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(competitions[0].window.status_at(now).phase, Phase::Registration);
        assert_eq!(competitions[1].window.status_at(now).phase, Phase::Competing);
    }

    #[test]
    fn test_out_of_order_window_is_validation_error() {
        let file = write_snapshot(
            ".yaml",
            r"
- id: broken
  submission_deadline: 2025-06-03T00:00:00Z
  voting_deadline: 2025-06-02T00:00:00Z
",
        );
        let err = load_competitions(file.path(), &ConfigLimits::default()).unwrap_err();
        assert!(matches!(err, CookoffError::Validation(_)));
    }

    #[test]
    fn test_find_competition() {
        let file = write_snapshot(
            ".json",
            r#"[{"id": "x", "submission_deadline": "2025-06-02T00:00:00Z", "voting_deadline": "2025-06-03T00:00:00Z"}]"#,
        );
        let competitions = load_competitions(file.path(), &ConfigLimits::default()).unwrap();
        assert!(find_competition(competitions.clone(), "x", file.path()).is_ok());
        assert!(matches!(
            find_competition(competitions, "y", file.path()),
            Err(SnapshotError::UnknownCompetition { .. })
        ));
    }
}
