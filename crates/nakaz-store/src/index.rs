//! Article code to amendment history, with in-force resolution.

use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use nakaz_core::{ArticleRecord, EffectiveRecord};

/// Records grouped by article code in load order.
#[derive(Debug, Default)]
pub struct ReferenceIndex {
    by_code: HashMap<String, Vec<ArticleRecord>>,
    count: usize,
}

impl ReferenceIndex {
    pub fn from_records(records: impl IntoIterator<Item = ArticleRecord>) -> Self {
        let mut index = Self::default();
        for record in records {
            index
                .by_code
                .entry(record.article_code.clone())
                .or_default()
                .push(record);
            index.count += 1;
        }
        index
    }

    /// Total number of records, counting every amendment.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Number of distinct article codes.
    pub fn code_count(&self) -> usize {
        self.by_code.len()
    }

    pub fn records_for(&self, code: &str) -> &[ArticleRecord] {
        self.by_code.get(code).map(Vec::as_slice).unwrap_or_default()
    }

    /// Position of the record in force on `on`: the latest effective date not
    /// after `on`, the earliest-loaded among equal dates. When no record
    /// qualifies the first-loaded one is used.
    fn resolve_index(records: &[ArticleRecord], on: NaiveDate) -> Option<usize> {
        if records.is_empty() {
            return None;
        }
        let mut best: Option<(usize, NaiveDate)> = None;
        for (i, record) in records.iter().enumerate() {
            let date = record.effective_date();
            if date <= on && best.is_none_or(|(_, best_date)| date > best_date) {
                best = Some((i, date));
            }
        }
        Some(best.map_or(0, |(i, _)| i))
    }

    pub fn resolve(&self, code: &str, on: NaiveDate) -> Option<&ArticleRecord> {
        let records = self.records_for(code);
        Self::resolve_index(records, on).map(|i| &records[i])
    }

    /// Resolved record with its effective window. The window ends the day
    /// before the nearest later amendment.
    pub fn effective_range(&self, code: &str, on: NaiveDate) -> Option<EffectiveRecord> {
        let records = self.records_for(code);
        let record = &records[Self::resolve_index(records, on)?];
        let from = record.effective_date();

        let next = records
            .iter()
            .map(ArticleRecord::effective_date)
            .filter(|date| *date > from)
            .min();

        Some(EffectiveRecord {
            record: record.clone(),
            effective_from: record.d_izm,
            effective_to: next.and_then(|date| date.checked_sub_days(Days::new(1))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(code: &str, hard: &str, d_izm: Option<NaiveDate>) -> ArticleRecord {
        ArticleRecord {
            article_code: code.into(),
            hard: hard.into(),
            d_izm,
            ..Default::default()
        }
    }

    fn history() -> ReferenceIndex {
        ReferenceIndex::from_records([
            record("1880002", "a", Some(date(2018, 1, 1))),
            record("1880002", "b", None),
            record("1880002", "c", Some(date(2021, 7, 10))),
            record("0990001", "x", Some(date(2020, 1, 1))),
        ])
    }

    #[test]
    fn counts() {
        let index = history();
        assert_eq!(index.count(), 4);
        assert_eq!(index.code_count(), 2);
        assert_eq!(index.records_for("1880002").len(), 3);
        assert!(index.records_for("nope").is_empty());
    }

    #[test]
    fn picks_latest_not_after_date() {
        let index = history();
        assert_eq!(index.resolve("1880002", date(2017, 5, 1)).unwrap().hard, "b");
        assert_eq!(index.resolve("1880002", date(2018, 1, 1)).unwrap().hard, "a");
        assert_eq!(index.resolve("1880002", date(2021, 7, 9)).unwrap().hard, "a");
        assert_eq!(index.resolve("1880002", date(2025, 1, 1)).unwrap().hard, "c");
    }

    #[test]
    fn falls_back_to_first_loaded() {
        let index = history();
        assert_eq!(index.resolve("0990001", date(2019, 1, 1)).unwrap().hard, "x");
        assert!(index.resolve("1234567", date(2019, 1, 1)).is_none());
    }

    #[test]
    fn equal_dates_keep_first_loaded() {
        let index = ReferenceIndex::from_records([
            record("1", "first", Some(date(2020, 1, 1))),
            record("1", "second", Some(date(2020, 1, 1))),
        ]);
        assert_eq!(index.resolve("1", date(2022, 1, 1)).unwrap().hard, "first");
    }

    #[test]
    fn effective_window() {
        let index = history();
        let found = index.effective_range("1880002", date(2019, 1, 1)).unwrap();
        assert_eq!(found.record.hard, "a");
        assert_eq!(found.effective_from, Some(date(2018, 1, 1)));
        assert_eq!(found.effective_to, Some(date(2021, 7, 9)));

        let latest = index.effective_range("1880002", NaiveDate::MAX).unwrap();
        assert_eq!(latest.record.hard, "c");
        assert_eq!(latest.effective_to, None);

        let always = index.effective_range("1880002", date(2010, 1, 1)).unwrap();
        assert_eq!(always.effective_from, None);
        assert_eq!(always.effective_to, Some(date(2017, 12, 31)));
    }
}
