//! Columnar table with width compaction and JSON serialization.
//!
//! The final artifact of a run: columns {name, date, rating, review},
//! with numeric columns narrowed to the smallest storage type whose
//! range covers the observed values.

use crate::normalize::NormalizedReview;
use chrono::NaiveDate;
use serde::Serialize;

/// Column storage. The dtype tag is part of the serialized output, so
/// the narrowing chosen by [`Table::shrink`] stays visible in the file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "dtype", content = "values")]
pub enum Column {
    #[serde(rename = "utf8")]
    Utf8(Vec<String>),
    #[serde(rename = "date")]
    Date(Vec<NaiveDate>),
    #[serde(rename = "i8")]
    I8(Vec<i8>),
    #[serde(rename = "i16")]
    I16(Vec<i16>),
    #[serde(rename = "i32")]
    I32(Vec<i32>),
    #[serde(rename = "i64")]
    I64(Vec<i64>),
    #[serde(rename = "f32")]
    F32(Vec<f32>),
    #[serde(rename = "f64")]
    F64(Vec<f64>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Utf8(v) => v.len(),
            Column::Date(v) => v.len(),
            Column::I8(v) => v.len(),
            Column::I16(v) => v.len(),
            Column::I32(v) => v.len(),
            Column::I64(v) => v.len(),
            Column::F32(v) => v.len(),
            Column::F64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Integer values widened to i64, if this is an integer column.
    pub fn as_i64(&self) -> Option<Vec<i64>> {
        match self {
            Column::I8(v) => Some(v.iter().map(|&x| x as i64).collect()),
            Column::I16(v) => Some(v.iter().map(|&x| x as i64).collect()),
            Column::I32(v) => Some(v.iter().map(|&x| x as i64).collect()),
            Column::I64(v) => Some(v.clone()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedColumn {
    pub name: String,
    #[serde(flatten)]
    pub data: Column,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub columns: Vec<NamedColumn>,
}

impl Table {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// Build the {name, date, rating, review} table from normalized rows.
    pub fn from_reviews(rows: &[NormalizedReview]) -> Self {
        let mut table = Table::new();
        table.push_column("name", Column::Utf8(rows.iter().map(|r| r.name.clone()).collect()));
        table.push_column("date", Column::Date(rows.iter().map(|r| r.date).collect()));
        table.push_column("rating", Column::I64(rows.iter().map(|r| r.rating as i64).collect()));
        table.push_column("review", Column::Utf8(rows.iter().map(|r| r.review.clone()).collect()));
        table
    }

    pub fn push_column(&mut self, name: impl Into<String>, data: Column) {
        self.columns.push(NamedColumn {
            name: name.into(),
            data,
        });
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.data)
    }

    pub fn num_rows(&self) -> usize {
        self.columns.first().map(|c| c.data.len()).unwrap_or(0)
    }

    /// Narrow every numeric column to the smallest storage type whose
    /// exclusive bounds contain the observed min/max. Lossless for
    /// integers; for floats the "narrower if the range fits" heuristic
    /// can round, the same approximation the source of this scheme
    /// (numpy-style dataframe shrinking) makes.
    pub fn shrink(&mut self) {
        for column in &mut self.columns {
            column.data = shrink_column(std::mem::replace(&mut column.data, Column::I64(Vec::new())));
        }
    }

    pub fn write_json<W: std::io::Write>(&self, writer: W) -> Result<(), serde_json::Error> {
        serde_json::to_writer_pretty(writer, self)
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

fn shrink_column(column: Column) -> Column {
    match column {
        Column::I8(_) | Column::Utf8(_) | Column::Date(_) => column,
        Column::I16(v) => shrink_ints(v.into_iter().map(|x| x as i64).collect()),
        Column::I32(v) => shrink_ints(v.into_iter().map(|x| x as i64).collect()),
        Column::I64(v) => shrink_ints(v),
        Column::F32(_) => column,
        Column::F64(v) => shrink_floats(v),
    }
}

fn shrink_ints(values: Vec<i64>) -> Column {
    let (Some(&min), Some(&max)) = (values.iter().min(), values.iter().max()) else {
        return Column::I64(values);
    };
    if min > i8::MIN as i64 && max < i8::MAX as i64 {
        Column::I8(values.into_iter().map(|x| x as i8).collect())
    } else if min > i16::MIN as i64 && max < i16::MAX as i64 {
        Column::I16(values.into_iter().map(|x| x as i16).collect())
    } else if min > i32::MIN as i64 && max < i32::MAX as i64 {
        Column::I32(values.into_iter().map(|x| x as i32).collect())
    } else {
        Column::I64(values)
    }
}

fn shrink_floats(values: Vec<f64>) -> Column {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if values.is_empty() {
        return Column::F64(values);
    }
    if min > f32::MIN as f64 && max < f32::MAX as f64 {
        Column::F32(values.into_iter().map(|x| x as f32).collect())
    } else {
        Column::F64(values)
    }
}
