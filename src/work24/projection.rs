// src/work24/projection.rs
//! Pure projections of a parsed record sequence: display table, category
//! counts for the charts, and the CSV export.

use crate::types::{JobListing, JobRecord};
use serde::Serialize;
use std::collections::HashMap;

pub const CSV_FILE_NAME: &str = "job_listings.csv";
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Display names, in `JobRecord::as_row` order.
pub const COLUMN_HEADERS: [&str; 7] = ["회사", "제목", "급여", "지역", "고용형태", "경력", "학력"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobTable {
    pub headers: [&'static str; 7],
    pub rows: Vec<[String; 7]>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Table plus both chart aggregations for one search result.
#[derive(Debug, Clone, Serialize)]
pub struct JobProjection {
    pub total: usize,
    pub table: JobTable,
    pub region_counts: Vec<CategoryCount>,
    pub employment_type_counts: Vec<CategoryCount>,
}

impl JobProjection {
    pub fn from_listing(listing: &JobListing) -> Self {
        let records = listing.records();
        Self {
            total: records.len(),
            table: table(records),
            region_counts: sorted_counts(&region_counts(records)),
            employment_type_counts: sorted_counts(&employment_type_counts(records)),
        }
    }
}

pub fn table(records: &[JobRecord]) -> JobTable {
    JobTable {
        headers: COLUMN_HEADERS,
        rows: records
            .iter()
            .map(|record| record.as_row().map(str::to_string))
            .collect(),
    }
}

pub fn region_counts(records: &[JobRecord]) -> HashMap<String, usize> {
    count_by(records, |record| &record.region)
}

pub fn employment_type_counts(records: &[JobRecord]) -> HashMap<String, usize> {
    count_by(records, |record| &record.employment_type)
}

fn count_by<F>(records: &[JobRecord], key: F) -> HashMap<String, usize>
where
    F: Fn(&JobRecord) -> &String,
{
    let mut counts = HashMap::new();
    for record in records {
        *counts.entry(key(record).clone()).or_insert(0) += 1;
    }
    counts
}

/// Chart order: largest count first, ties by category name.
pub fn sorted_counts(counts: &HashMap<String, usize>) -> Vec<CategoryCount> {
    let mut sorted: Vec<CategoryCount> = counts
        .iter()
        .map(|(category, count)| CategoryCount {
            category: category.clone(),
            count: *count,
        })
        .collect();
    sorted.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.cmp(&b.category)));
    sorted
}

/// UTF-8 CSV with a leading BOM so spreadsheet apps pick the right encoding.
pub fn to_csv(records: &[JobRecord]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(UTF8_BOM.to_vec());
    writer.write_record(COLUMN_HEADERS)?;
    for record in records {
        writer.write_record(record.as_row())?;
    }
    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}
