//! In-memory observation table.
//!
//! Rows are subjects, columns are named variables. A column is either numeric
//! (missing values stored as NaN) or categorical (raw labels). The evaluator
//! only accepts numeric matrices, so categorical columns must be expanded into
//! indicator columns with [`ObservationTable::encode_dummies`] first.

use std::collections::BTreeSet;

use nalgebra::DMatrix;

use crate::error::{SubsetError, SubsetResult};

#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Numeric(Vec<f64>),
    Categorical(Vec<String>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(v) => v.len(),
            Column::Categorical(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_missing(&self, row: usize) -> bool {
        match self {
            Column::Numeric(v) => !v[row].is_finite(),
            Column::Categorical(v) => v[row].is_empty(),
        }
    }

    fn select_rows(&self, rows: &[usize]) -> Column {
        match self {
            Column::Numeric(v) => Column::Numeric(rows.iter().map(|&i| v[i]).collect()),
            Column::Categorical(v) => Column::Categorical(rows.iter().map(|&i| v[i].clone()).collect()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationTable {
    names: Vec<String>,
    columns: Vec<Column>,
}

impl ObservationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column. All columns must have the same length and unique names.
    pub fn push(&mut self, name: impl Into<String>, column: Column) -> SubsetResult<()> {
        let name = name.into();
        if self.names.iter().any(|n| n == &name) {
            return Err(SubsetError::input(format!("duplicate column name `{name}`")));
        }
        if let Some(first) = self.columns.first() {
            if first.len() != column.len() {
                return Err(SubsetError::Dimension {
                    what: format!("column `{name}`"),
                    expected: first.len(),
                    found: column.len(),
                });
            }
        }
        self.names.push(name);
        self.columns.push(column);
        Ok(())
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, name: &str) -> SubsetResult<&Column> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| &self.columns[i])
            .ok_or_else(|| SubsetError::input(format!("unknown column `{name}`")))
    }

    /// Stack the named numeric columns into an `n × K` matrix.
    ///
    /// Fails on categorical columns and on missing values.
    pub fn matrix(&self, names: &[String]) -> SubsetResult<DMatrix<f64>> {
        let n = self.n_rows();
        let mut out = DMatrix::<f64>::zeros(n, names.len());
        for (j, name) in names.iter().enumerate() {
            let Column::Numeric(values) = self.column(name)? else {
                return Err(SubsetError::input(format!(
                    "column `{name}` is categorical; dummy-encode it before the search"
                )));
            };
            if let Some(i) = values.iter().position(|v| !v.is_finite()) {
                return Err(SubsetError::input(format!(
                    "column `{name}` has a missing value at row {}",
                    i + 1
                )));
            }
            for (i, &v) in values.iter().enumerate() {
                out[(i, j)] = v;
            }
        }
        Ok(out)
    }

    /// Names of the indicator columns [`encode_dummies`](Self::encode_dummies)
    /// produces for a categorical column, in order.
    pub fn dummy_names(&self, name: &str) -> SubsetResult<Vec<String>> {
        match self.column(name)? {
            Column::Categorical(labels) => Ok(non_reference_levels(name, labels)?
                .into_iter()
                .map(|level| format!("{name}_{level}"))
                .collect()),
            Column::Numeric(_) => Ok(vec![name.to_string()]),
        }
    }

    /// Replace each named categorical column by `L - 1` indicator columns.
    ///
    /// Levels are sorted; the first level is the reference and gets no column.
    /// Indicator columns are named `<column>_<level>` and take the original
    /// column's position. Numeric columns named here are left unchanged.
    /// Missing labels (empty strings) become NaN in every indicator.
    pub fn encode_dummies(&self, names: &[String]) -> SubsetResult<ObservationTable> {
        for name in names {
            self.column(name)?;
        }

        let mut out = ObservationTable::new();
        for (name, column) in self.names.iter().zip(&self.columns) {
            match column {
                Column::Categorical(labels) if names.contains(name) => {
                    for level in non_reference_levels(name, labels)? {
                        let indicator = labels
                            .iter()
                            .map(|l| {
                                if l.is_empty() {
                                    f64::NAN
                                } else if l == level {
                                    1.0
                                } else {
                                    0.0
                                }
                            })
                            .collect();
                        out.push(format!("{name}_{level}"), Column::Numeric(indicator))?;
                    }
                }
                _ => out.push(name.clone(), column.clone())?,
            }
        }
        Ok(out)
    }

    /// Keep only rows with no missing value in any of the named columns.
    pub fn drop_missing_rows(&self, names: &[String]) -> SubsetResult<ObservationTable> {
        let selected = names
            .iter()
            .map(|n| self.column(n))
            .collect::<SubsetResult<Vec<_>>>()?;
        let keep: Vec<usize> = (0..self.n_rows())
            .filter(|&i| selected.iter().all(|c| !c.is_missing(i)))
            .collect();

        let dropped = self.n_rows() - keep.len();
        if dropped > 0 {
            log::info!("dropped {dropped} of {} rows with missing values", self.n_rows());
        }

        let mut out = ObservationTable::new();
        for (name, column) in self.names.iter().zip(&self.columns) {
            out.push(name.clone(), column.select_rows(&keep))?;
        }
        Ok(out)
    }
}

/// Sorted distinct non-missing levels, minus the first (reference) level.
fn non_reference_levels<'a>(name: &str, labels: &'a [String]) -> SubsetResult<Vec<&'a str>> {
    let levels: BTreeSet<&str> = labels
        .iter()
        .map(String::as_str)
        .filter(|s| !s.is_empty())
        .collect();
    if levels.len() < 2 {
        return Err(SubsetError::input(format!(
            "categorical column `{name}` has fewer than two levels"
        )));
    }
    Ok(levels.into_iter().skip(1).collect())
}
