//! JSON point-list I/O for the driver.
//!
//! Clouds and hulls travel as `[[x, y], ...]` so they can be piped between
//! invocations or fed from hand-written files.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use stephull::Vec2;

/// Read a cloud from a JSON array of `[x, y]` pairs.
pub fn read_points<P: AsRef<Path>>(path: P) -> Result<Vec<Vec2<f64>>> {
    let path = path.as_ref();
    let raw = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let pairs: Vec<[f64; 2]> =
        serde_json::from_slice(&raw).context("point list must be a JSON array of [x, y] pairs")?;
    Ok(pairs.into_iter().map(|[x, y]| Vec2::new(x, y)).collect())
}

/// Flatten points into serializable pairs.
pub fn to_pairs(points: &[Vec2<f64>]) -> Vec<[f64; 2]> {
    points.iter().map(|p| [p.x, p.y]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn point_list_reads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cloud.json");
        let pts = vec![Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.5)];
        fs::write(&path, serde_json::to_vec(&to_pairs(&pts)).unwrap()).unwrap();
        assert_eq!(read_points(&path).unwrap(), pts);
    }

    #[test]
    fn malformed_lists_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, b"{\"not\": \"points\"}").unwrap();
        assert!(read_points(&path).is_err());
    }
}
