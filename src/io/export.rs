//! Export search results to CSV and JSON.
//!
//! The CSV is meant to be easy to consume in spreadsheets or plotting scripts
//! (one row per retained subset). The JSON keeps the full table plus the
//! per-criterion choice and can be read back with [`read_results_json`].

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{CriterionChoice, ResultsFile, SubsetTable};
use crate::error::AppError;

/// Write one CSV row per retained subset.
pub fn write_results_csv(path: &Path, table: &SubsetTable) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_results(file, table)
}

// Predictor labels come from CSV headers and dummy levels, so they may need quoting.
fn write_results<W: Write>(out: W, table: &SubsetTable) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(out);
    writer
        .write_record(["size", "rank", "k", "predictors", "r2", "adj_r2", "rss", "cp", "aicc", "bic"])
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for r in &table.records {
        writer
            .write_record([
                r.size.to_string(),
                r.rank.to_string(),
                r.k.to_string(),
                table.label(r),
                format!("{:.10}", r.r2),
                format!("{:.10}", r.adj_r2),
                format!("{:.10}", r.rss),
                format!("{:.10}", r.cp),
                r.aicc.map(|v| format!("{v:.10}")).unwrap_or_default(),
                format!("{:.10}", r.bic),
            ])
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

/// Write the full result table as pretty JSON.
pub fn write_results_json(
    path: &Path,
    response: &str,
    table: &SubsetTable,
    choice: &CriterionChoice,
) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create results JSON '{}': {e}", path.display())))?;

    let results = ResultsFile {
        tool: "subsets".to_string(),
        response: response.to_string(),
        table: table.clone(),
        choice: choice.clone(),
    };

    serde_json::to_writer_pretty(file, &results)
        .map_err(|e| AppError::new(2, format!("Failed to write results JSON: {e}")))?;

    Ok(())
}

/// Read a results JSON file.
pub fn read_results_json(path: &Path) -> Result<ResultsFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open results JSON '{}': {e}", path.display())))?;
    let results: ResultsFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid results JSON: {e}")))?;
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SubsetRecord;

    fn small_table() -> SubsetTable {
        SubsetTable {
            n: 10,
            n_predictors: 2,
            max_size: 2,
            best_per_size: 1,
            tss: 20.0,
            rss_full: 3.5,
            mse_full: 0.5,
            predictor_names: vec!["age".to_string(), "bmi".to_string()],
            records: vec![
                SubsetRecord {
                    size: 1,
                    rank: 1,
                    predictors: vec![1],
                    k: 2,
                    rss: 5.0,
                    r2: 0.75,
                    adj_r2: 0.71875,
                    cp: 3.75,
                    aicc: Some(1.5),
                    bic: 2.0,
                    coefficients: vec![0.5, 1.0],
                },
                SubsetRecord {
                    size: 2,
                    rank: 1,
                    predictors: vec![0, 1],
                    k: 3,
                    rss: 4.0,
                    r2: 0.8,
                    adj_r2: 0.742857,
                    cp: 3.0,
                    aicc: None,
                    bic: 3.0,
                    coefficients: vec![0.1, 0.2, 0.9],
                },
            ],
        }
    }

    #[test]
    fn csv_rows_use_predictor_names_and_blank_undefined_aicc() {
        let mut buf = Vec::new();
        write_results(&mut buf, &small_table()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "size,rank,k,predictors,r2,adj_r2,rss,cp,aicc,bic");
        assert!(lines[1].starts_with("1,1,2,bmi,0.7500000000,"));
        assert!(lines[2].starts_with("2,1,3,age+bmi,"));
        assert!(lines[2].contains(",3.0000000000,,3.0000000000"), "{}", lines[2]);
    }

    #[test]
    fn csv_quotes_labels_that_contain_delimiters() {
        let mut table = small_table();
        table.predictor_names = vec!["a,b".to_string(), "say \"hi\"".to_string()];

        let mut buf = Vec::new();
        write_results(&mut buf, &table).unwrap();

        let mut reader = csv::Reader::from_reader(buf.as_slice());
        assert_eq!(reader.headers().unwrap().len(), 10);
        let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][3], "say \"hi\"");
        assert_eq!(&rows[1][3], "a,b+say \"hi\"");
        assert_eq!(&rows[1][8], "");
        assert_eq!(&rows[1][9], "3.0000000000");
    }

    #[test]
    fn json_export_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        let table = small_table();
        let choice = CriterionChoice {
            bic: Some(1),
            ..CriterionChoice::default()
        };

        write_results_json(&path, "lpsa", &table, &choice).unwrap();
        let back = read_results_json(&path).unwrap();
        assert_eq!(back.response, "lpsa");
        assert_eq!(back.table, table);
        assert_eq!(back.choice, choice);
    }
}
