use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::color::Rgb;
use crate::error::SyncError;

/// File names Cavasik reads. Both live under the configured data dir.
pub const FG_FILE: &str = "cavasik_fg_colors.rgb";
pub const BG_FILE: &str = "cavasik_bg_colors.rgb";

pub fn fg_path(data_dir: &Path) -> PathBuf {
    data_dir.join(FG_FILE)
}

pub fn bg_path(data_dir: &Path) -> PathBuf {
    data_dir.join(BG_FILE)
}

/// Serialize one color sequence as `R,G,B` lines and overwrite `path` with
/// it. Whole-file replacement, one color per line, newline-terminated.
pub fn write_colors(path: &Path, colors: &[Rgb]) -> Result<(), SyncError> {
    let mut content = String::new();
    for color in colors {
        // Writing into a String cannot fail.
        let _ = writeln!(content, "{color}");
    }
    std::fs::write(path, content).map_err(|e| SyncError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_file(path: &Path) -> Vec<Rgb> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| {
                let mut parts = line.split(',').map(|p| p.parse::<u8>().unwrap());
                Rgb::new(
                    parts.next().unwrap(),
                    parts.next().unwrap(),
                    parts.next().unwrap(),
                )
            })
            .collect()
    }

    #[test]
    fn write_then_reparse_round_trips_exactly() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(FG_FILE);
        let colors = vec![
            Rgb::new(200, 50, 50),
            Rgb::new(10, 10, 200),
            Rgb::new(0, 255, 0),
            Rgb::new(128, 128, 128),
            Rgb::new(255, 255, 0),
        ];

        write_colors(&path, &colors).unwrap();
        assert_eq!(parse_file(&path), colors);

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.ends_with('\n'));
        assert_eq!(raw.lines().count(), colors.len());
    }

    #[test]
    fn rewrites_replace_previous_content_entirely() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(BG_FILE);

        write_colors(&path, &vec![Rgb::new(1, 2, 3); 5]).unwrap();
        write_colors(&path, &[Rgb::BLACK, Rgb::BLACK]).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw, "0,0,0\n0,0,0\n");
    }

    #[test]
    fn black_bg_file_content_is_five_zero_lines() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(BG_FILE);

        write_colors(&path, &vec![Rgb::BLACK; 5]).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "0,0,0\n".repeat(5)
        );
    }

    #[test]
    fn missing_parent_directory_is_a_write_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("no_such_dir").join(FG_FILE);

        let err = write_colors(&path, &[Rgb::BLACK]).unwrap_err();
        assert!(matches!(err, SyncError::Write { .. }), "got {err:?}");
    }
}
