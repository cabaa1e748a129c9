//! Calculation entry points over an injected reference lookup.

use chrono::NaiveDate;
use tracing::debug;

use crate::article::{ArticleInfo, parse_article};
use crate::engine::{self, Sentence};
use crate::error::IntakeError;
use crate::input::EngineInput;
use crate::intake::{CalculateRequest, normalize, normalize_lang};
use crate::record::ArticleRecord;
use crate::response::{CalculationResponse, StructuredResponse};
use crate::table::ResultTable;

/// The in-force record with the window it is in force for.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveRecord {
    pub record: ArticleRecord,
    pub effective_from: Option<NaiveDate>,
    /// Day before the next amendment; `None` while still in force.
    pub effective_to: Option<NaiveDate>,
}

/// Source of sanction records.
pub trait ReferenceLookup {
    /// The record for `code` in force on `on`.
    fn get_by_code(&self, code: &str, on: NaiveDate) -> Option<ArticleRecord>;

    /// Like [`get_by_code`](Self::get_by_code), with the effective window.
    fn get_with_range(&self, code: &str, on: NaiveDate) -> Option<EffectiveRecord>;
}

/// Resolve the record for `input` and compute its sentence.
pub fn sentence_for(lookup: &dyn ReferenceLookup, input: &EngineInput) -> Sentence {
    let record = if input.article_code.is_empty() {
        None
    } else {
        lookup.get_by_code(&input.article_code, input.crime_date)
    };

    debug!(
        code = %input.article_code,
        crime_date = %input.crime_date,
        found = record.is_some(),
        "calculating sentence"
    );

    match record {
        Some(record) => engine::calculate(input, &record),
        None => Sentence::not_found(),
    }
}

/// Table and structured response for a normalised input.
pub fn calculate(
    lookup: &dyn ReferenceLookup,
    input: &EngineInput,
) -> (ResultTable, StructuredResponse) {
    let sentence = sentence_for(lookup, input);
    (
        ResultTable::from_sentence(&sentence),
        StructuredResponse::from_sentence(&sentence),
    )
}

/// Validate, normalise and calculate a request. `today` stands in for
/// absent dates.
pub fn calculate_request(
    lookup: &dyn ReferenceLookup,
    request: &CalculateRequest,
    today: NaiveDate,
) -> Result<CalculationResponse, IntakeError> {
    let lang = normalize_lang(request.lang.as_deref())?;
    let input = normalize(request, today)?;
    if let Some(case_id) = request.case_id.as_deref() {
        debug!(case_id, "request for case");
    }

    let (table, structured) = calculate(lookup, &input);
    Ok(CalculationResponse {
        lang,
        table,
        structured,
    })
}

/// Summary of the latest version of the article `query` refers to.
pub fn article_info(lookup: &dyn ReferenceLookup, query: &str) -> Option<ArticleInfo> {
    let parsed = parse_article(query)?;
    if parsed.code.is_empty() {
        return None;
    }
    let found = lookup.get_with_range(&parsed.code, NaiveDate::MAX)?;
    Some(ArticleInfo::new(
        &parsed,
        &found.record,
        found.effective_from,
        found.effective_to,
    ))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde_json::json;

    use super::*;
    use crate::messages::Message;

    #[derive(Default)]
    struct Fixed(HashMap<String, ArticleRecord>);

    impl ReferenceLookup for Fixed {
        fn get_by_code(&self, code: &str, _on: NaiveDate) -> Option<ArticleRecord> {
            self.0.get(code).cloned()
        }

        fn get_with_range(&self, code: &str, _on: NaiveDate) -> Option<EffectiveRecord> {
            self.0.get(code).map(|record| EffectiveRecord {
                record: record.clone(),
                effective_from: record.d_izm,
                effective_to: None,
            })
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 12).unwrap()
    }

    fn lookup() -> Fixed {
        let record = ArticleRecord {
            article_code: "1880002".into(),
            stat: "Кража".into(),
            hard: "2".into(),
            prest: "1".into(),
            fs1r64: "0105".into(),
            fs1r64_05x: "2000".into(),
            fs1r64_01x: "5".into(),
            d_izm: NaiveDate::from_ymd_opt(2020, 1, 1),
            ..Default::default()
        };
        Fixed(HashMap::from([(record.article_code.clone(), record)]))
    }

    fn request(json: &str) -> CalculateRequest {
        CalculateRequest::from_json(json).unwrap()
    }

    #[test]
    fn unknown_article_reports_not_found() {
        let req = request(r#"{"crime": {"article_code": "9990001"}}"#);
        let response = calculate_request(&lookup(), &req, today()).unwrap();
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["lang"], json!("ru"));
        assert_eq!(value["structured"]["meta"]["reference_found"], json!(false));
        for row in 0..7 {
            assert_eq!(value["aNakaz"][row][3], json!(Message::NotProvided.text()));
            assert_eq!(value["aNakaz"][row][0], json!(false));
        }
    }

    #[test]
    fn empty_code_skips_lookup() {
        let input = EngineInput::new("", today(), today());
        assert!(!sentence_for(&lookup(), &input).reference_found);
    }

    #[test]
    fn known_article_full_response() {
        let req = request(
            r#"{"lang": "RU", "calc_date": "2025-09-12",
                "person": {"birth_date": "1990-04-01", "gender": "1"},
                "crime": {"article": "188", "part": "2", "crime_date": "2025-06-01"}}"#,
        );
        let response = calculate_request(&lookup(), &req, today()).unwrap();
        assert_eq!(response.lang, "ru");
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["aNakaz"].as_array().unwrap().len(), 15);
        assert_eq!(value["aNakaz"][0][0], json!(true));
        assert_eq!(value["structured"]["punishments"]["fine"]["max_value"], json!(2000.0));
        assert_eq!(
            value["structured"]["punishments"]["imprisonment"]["formatted_text"],
            json!("от 6 месяцев до 5 лет")
        );
    }

    #[test]
    fn unsupported_language_is_rejected() {
        let req = request(r#"{"lang": "en", "crime": {"article_code": "1880002"}}"#);
        assert!(matches!(
            calculate_request(&lookup(), &req, today()),
            Err(IntakeError::UnsupportedLang(_))
        ));
    }

    #[test]
    fn article_info_lookup() {
        let info = article_info(&lookup(), "ст. 188 ч.2").unwrap();
        assert_eq!(info.code, "1880002");
        assert_eq!(info.name, "Кража");
        assert_eq!(info.imprisonment_max, 5.0);
        assert_eq!(info.effective_from, NaiveDate::from_ymd_opt(2020, 1, 1));

        assert!(article_info(&lookup(), "ст. 300").is_none());
        assert!(article_info(&lookup(), "").is_none());
    }
}
