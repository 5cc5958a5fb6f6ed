//! Training-curve CSV export

use std::path::Path;

use tracing::info;

use crate::error::TrainerError;
use crate::trainer::TrainingCycleResult;

/// Write the curve as CSV with a `cycle,bypass_rate,detect_rate` header.
///
/// Serialization is deterministic, so exporting unchanged results twice
/// produces byte-identical files.
pub fn export_results(path: &Path, results: &[TrainingCycleResult]) -> Result<(), TrainerError> {
    let mut writer = csv::Writer::from_path(path)?;
    for result in results {
        writer.serialize(result)?;
    }
    writer.flush()?;
    info!(path = %path.display(), cycles = results.len(), "training curve exported");
    Ok(())
}

/// Read a curve back from CSV.
pub fn load_results(path: &Path) -> Result<Vec<TrainingCycleResult>, TrainerError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut results = Vec::new();
    for row in reader.deserialize() {
        results.push(row?);
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve() -> Vec<TrainingCycleResult> {
        vec![
            TrainingCycleResult {
                cycle: 1,
                bypass_rate: 75.0,
                detect_rate: 25.0,
            },
            TrainingCycleResult {
                cycle: 2,
                bypass_rate: 50.0,
                detect_rate: 50.0,
            },
            TrainingCycleResult {
                cycle: 3,
                bypass_rate: 0.0,
                detect_rate: 100.0,
            },
        ]
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("curve.csv");
        export_results(&path, &curve()).unwrap();
        let loaded = load_results(&path).unwrap();
        assert_eq!(loaded, curve());
    }

    #[test]
    fn test_header_and_row_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("curve.csv");
        export_results(&path, &curve()[..1].to_vec()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("cycle,bypass_rate,detect_rate"));
        assert_eq!(lines.next(), Some("1,75.0,25.0"));
    }

    #[test]
    fn test_re_export_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.csv");
        let b = dir.path().join("b.csv");
        export_results(&a, &curve()).unwrap();
        export_results(&b, &curve()).unwrap();
        assert_eq!(std::fs::read(&a).unwrap(), std::fs::read(&b).unwrap());
    }

    #[test]
    fn test_empty_curve_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("curve.csv");
        export_results(&path, &[]).unwrap();
        let loaded = load_results(&path).unwrap();
        assert!(loaded.is_empty());
    }
}
