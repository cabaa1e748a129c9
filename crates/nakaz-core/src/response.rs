//! Structured response: the result table regrouped under named keys.

use serde::{Deserialize, Serialize};

use crate::engine::{AdditionalOutcome, PunishmentOutcome, Sentence};
use crate::table::ResultTable;

/// Reason reported in `meta` when no sanction record is in force.
pub const ARTICLE_NOT_FOUND: &str = "article_not_found";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PunishmentItem {
    pub is_applicable: bool,
    pub min_value: f64,
    pub max_value: f64,
    pub formatted_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_years: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_months: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_days: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_years: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_months: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_days: Option<i64>,
}

impl PunishmentItem {
    fn from_outcome(out: &PunishmentOutcome) -> Self {
        Self {
            is_applicable: out.applicable,
            min_value: out.min,
            max_value: out.max,
            formatted_text: out.text.clone(),
            min_years: None,
            min_months: None,
            min_days: None,
            max_years: None,
            max_months: None,
            max_days: None,
        }
    }

    fn with_terms(out: &PunishmentOutcome) -> Self {
        Self {
            min_years: Some(out.min_term.years),
            min_months: Some(out.min_term.months),
            min_days: Some(out.min_term.days),
            max_years: Some(out.max_term.years),
            max_months: Some(out.max_term.months),
            max_days: Some(out.max_term.days),
            ..Self::from_outcome(out)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditionalItem {
    pub is_applicable: bool,
    pub is_mandatory: bool,
    pub formatted_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_years: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_years: Option<f64>,
}

impl AdditionalItem {
    fn from_outcome(out: &AdditionalOutcome) -> Self {
        Self {
            is_applicable: out.applicable,
            is_mandatory: out.applicable && out.mandatory,
            formatted_text: out.text.clone(),
            min_years: None,
            max_years: None,
        }
    }
}

/// Main punishments; empty when the article was not found.
///
/// The death penalty stays in the table only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Punishments {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fine: Option<PunishmentItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corrective_work: Option<PunishmentItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mandatory_work: Option<PunishmentItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restriction_of_freedom: Option<PunishmentItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrest: Option<PunishmentItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imprisonment: Option<PunishmentItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdditionalPunishments {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confiscation: Option<AdditionalItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deportation: Option<AdditionalItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifetime_prohibition: Option<AdditionalItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prohibition_term: Option<AdditionalItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprivation_of_citizenship: Option<AdditionalItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    pub reference_found: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_misdemeanor: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_criminal_liability: Option<bool>,
    /// Liability reason text, or [`ARTICLE_NOT_FOUND`].
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredResponse {
    pub punishments: Punishments,
    pub additional_punishments: AdditionalPunishments,
    pub meta: Meta,
}

impl StructuredResponse {
    pub fn from_sentence(sentence: &Sentence) -> Self {
        if !sentence.reference_found {
            return Self {
                punishments: Punishments::default(),
                additional_punishments: AdditionalPunishments::default(),
                meta: Meta {
                    reference_found: false,
                    is_misdemeanor: None,
                    no_criminal_liability: None,
                    reason: ARTICLE_NOT_FOUND.to_string(),
                },
            };
        }

        let term = &sentence.prohibition_term;
        let prohibition_term = AdditionalItem {
            min_years: Some(term.min_years),
            max_years: Some(term.max_years),
            ..AdditionalItem::from_outcome(term)
        };

        let liability = &sentence.liability;
        Self {
            punishments: Punishments {
                fine: Some(PunishmentItem::from_outcome(&sentence.fine)),
                corrective_work: Some(PunishmentItem::from_outcome(&sentence.corrective_work)),
                mandatory_work: Some(PunishmentItem::from_outcome(&sentence.mandatory_work)),
                restriction_of_freedom: Some(PunishmentItem::with_terms(
                    &sentence.restriction_of_freedom,
                )),
                arrest: Some(PunishmentItem::from_outcome(&sentence.arrest)),
                imprisonment: Some(PunishmentItem::with_terms(&sentence.imprisonment)),
            },
            additional_punishments: AdditionalPunishments {
                confiscation: Some(AdditionalItem::from_outcome(&sentence.confiscation)),
                deportation: Some(AdditionalItem::from_outcome(&sentence.deportation)),
                lifetime_prohibition: Some(AdditionalItem::from_outcome(
                    &sentence.lifetime_prohibition,
                )),
                prohibition_term: Some(prohibition_term),
                deprivation_of_citizenship: Some(AdditionalItem::from_outcome(
                    &sentence.citizenship_deprivation,
                )),
            },
            meta: Meta {
                reference_found: true,
                is_misdemeanor: Some(liability.misdemeanor),
                no_criminal_liability: Some(liability.no_criminal_liability),
                reason: if liability.no_criminal_liability {
                    liability.reason_text().to_string()
                } else {
                    String::new()
                },
            },
        }
    }
}

/// Full calculation response: language, the raw table and its structured form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResponse {
    pub lang: String,
    #[serde(rename = "aNakaz")]
    pub table: ResultTable,
    pub structured: StructuredResponse,
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;
    use crate::engine::calculate;
    use crate::input::EngineInput;
    use crate::record::ArticleRecord;

    #[test]
    fn not_found_shape() {
        let value = serde_json::to_value(StructuredResponse::from_sentence(&Sentence::not_found()))
            .unwrap();
        assert_eq!(
            value,
            json!({
                "punishments": {},
                "additional_punishments": {},
                "meta": {"reference_found": false, "reason": "article_not_found"},
            })
        );
    }

    #[test]
    fn found_shape() {
        let day = NaiveDate::from_ymd_opt(2025, 9, 12).unwrap();
        let input = EngineInput {
            birth_date: NaiveDate::from_ymd_opt(1980, 1, 1),
            ..EngineInput::new("1880002", day, day)
        };
        let record = ArticleRecord {
            hard: "2".into(),
            prest: "1".into(),
            fs1r64: "0105".into(),
            fs1r64_01x: "5".into(),
            fs1r65_o: "02".into(),
            fs1r65_02n: "2".into(),
            fs1r65_02x: "3".into(),
            ..Default::default()
        };
        let structured = StructuredResponse::from_sentence(&calculate(&input, &record));
        let value = serde_json::to_value(&structured).unwrap();

        let punishments = value["punishments"].as_object().unwrap();
        assert_eq!(punishments.len(), 6);
        assert!(!punishments.contains_key("death_penalty"));
        assert!(value["punishments"]["fine"].get("min_years").is_none());
        assert_eq!(value["punishments"]["imprisonment"]["max_years"], json!(5));
        assert_eq!(value["punishments"]["imprisonment"]["min_months"], json!(6));

        let term = &value["additional_punishments"]["prohibition_term"];
        assert_eq!(term["is_mandatory"], json!(true));
        assert_eq!(term["min_years"], json!(2.0));
        assert_eq!(term["max_years"], json!(3.0));
        assert!(value["additional_punishments"]["confiscation"].get("min_years").is_none());

        assert_eq!(
            value["meta"],
            json!({
                "reference_found": true,
                "is_misdemeanor": false,
                "no_criminal_liability": false,
                "reason": "",
            })
        );
    }
}
