//! Decoded reference lines into [`ArticleRecord`]s.

use std::collections::HashMap;

use chrono::NaiveDate;
use nakaz_core::ArticleRecord;
use tracing::debug;

/// Column holding the packed article code.
const CODE_COLUMN: &str = "p2";

/// Build records from decoded lines; the first line is the header.
///
/// Header names are matched case-insensitively. Blank lines and rows without
/// an article code are skipped; missing columns read as empty.
pub fn parse_records(lines: &[Vec<String>]) -> Vec<ArticleRecord> {
    let Some((header, rows)) = lines.split_first() else {
        return Vec::new();
    };
    let columns: HashMap<String, usize> = header
        .iter()
        .enumerate()
        .map(|(i, name)| (name.trim().to_lowercase(), i))
        .collect();

    let mut skipped = 0usize;
    let records: Vec<ArticleRecord> = rows
        .iter()
        .filter(|fields| fields.iter().any(|f| !f.trim().is_empty()))
        .filter_map(|fields| {
            let record = parse_row(&columns, fields);
            if record.is_none() {
                skipped += 1;
            }
            record
        })
        .collect();

    if skipped > 0 {
        debug!(skipped, "reference rows without article code");
    }
    records
}

fn parse_row(columns: &HashMap<String, usize>, fields: &[String]) -> Option<ArticleRecord> {
    let get = |name: &str| -> String {
        columns
            .get(name)
            .and_then(|&i| fields.get(i))
            .map(|f| f.trim().to_string())
            .unwrap_or_default()
    };

    let article_code = get(CODE_COLUMN);
    if article_code.is_empty() {
        return None;
    }

    Some(ArticleRecord {
        article_code,
        stat: get("stat"),
        hard: get("hard"),
        prest: get("prest"),
        fs1r64: get("fs1r64").into(),
        fs1r64_nn: get("fs1r64_nn").into(),
        fs1r64_05n: get("fs1r64_05n"),
        fs1r64_05x: get("fs1r64_05x"),
        fs1r64_06n: get("fs1r64_06n"),
        fs1r64_06x: get("fs1r64_06x"),
        fs1r64_09n: get("fs1r64_09n"),
        fs1r64_09x: get("fs1r64_09x"),
        fs1r64_12n: get("fs1r64_12n"),
        fs1r64_12x: get("fs1r64_12x"),
        fs1r64_11n: get("fs1r64_11n"),
        fs1r64_11x: get("fs1r64_11x"),
        fs1r64_01n: get("fs1r64_01n"),
        fs1r64_01x: get("fs1r64_01x"),
        fs1r65_o: get("fs1r65_o").into(),
        fs1r65_n: get("fs1r65_n").into(),
        fs1r65_02n: get("fs1r65_02n"),
        fs1r65_02x: get("fs1r65_02x"),
        fl1u: get("fl1u"),
        d_izm: parse_amendment_date(&get("d_izm")),
    })
}

/// `DD.MM.YYYY`; empty, `-`, `--` and anything unparsable mean "always in
/// force".
pub fn parse_amendment_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if matches!(raw, "" | "-" | "--") {
        return None;
    }
    let mut parts = raw.split('.');
    let (Some(day), Some(month), Some(year), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };
    NaiveDate::from_ymd_opt(
        year.trim().parse().ok()?,
        month.trim().parse().ok()?,
        day.trim().parse().ok()?,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn header_case_and_missing_columns() {
        let lines = vec![
            line(&["STAT", " P2 ", "Hard", "fs1r64", "d_izm"]),
            line(&["Кража", "1880002", "2", "0105", "01.07.2020"]),
            line(&["", "1880003"]),
        ];
        let records = parse_records(&lines);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].stat, "Кража");
        assert_eq!(records[0].hard, "2");
        assert_eq!(records[0].fs1r64.as_str(), "0105");
        assert_eq!(records[0].d_izm, NaiveDate::from_ymd_opt(2020, 7, 1));
        assert_eq!(records[1].hard, "");
        assert_eq!(records[1].d_izm, None);
    }

    #[test]
    fn rows_without_code_and_blank_rows_skipped() {
        let lines = vec![
            line(&["p2", "hard"]),
            line(&["", "2"]),
            line(&["", ""]),
            line(&[" 0990001 ", "4"]),
        ];
        let records = parse_records(&lines);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].article_code, "0990001");
    }

    #[test]
    fn empty_input() {
        assert!(parse_records(&[]).is_empty());
    }

    #[test]
    fn amendment_dates() {
        assert_eq!(parse_amendment_date("05.03.2021"), NaiveDate::from_ymd_opt(2021, 3, 5));
        assert_eq!(parse_amendment_date("-"), None);
        assert_eq!(parse_amendment_date("--"), None);
        assert_eq!(parse_amendment_date("31.02.2021"), None);
        assert_eq!(parse_amendment_date("2021-03-05"), None);
        assert_eq!(parse_amendment_date("1.2.3.4"), None);
    }
}
