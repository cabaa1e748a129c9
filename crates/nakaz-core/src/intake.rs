//! Calculation requests and their normalisation into [`EngineInput`].
//!
//! Requests are loose: most fields are optional, string fields also accept
//! JSON numbers, and several facts may arrive either under a readable name
//! or under the statistical form field name (`mitigating` or `fs1r571p1`).
//! The first non-empty source wins.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::article::{build_code, is_article_number, parse_article, zfill};
use crate::codes::CodeSet;
use crate::error::IntakeError;
use crate::input::{CrimeStage, EngineInput, Gender};

pub const DEFAULT_LANG: &str = "ru";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculateRequest {
    #[serde(default, deserialize_with = "loose_string")]
    pub lang: Option<String>,
    /// Overrides "today" for term computation.
    #[serde(default, deserialize_with = "loose_string")]
    pub calc_date: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub case_id: Option<String>,
    #[serde(default)]
    pub person: PersonIn,
    #[serde(default)]
    pub crime: CrimeIn,
}

impl CalculateRequest {
    pub fn from_json(text: &str) -> Result<Self, IntakeError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonIn {
    #[serde(default, deserialize_with = "loose_string")]
    pub birth_date: Option<String>,
    /// "1"/"male" or "2"/"female".
    #[serde(default, deserialize_with = "loose_string")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub citizenship: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub dependents: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub fs1r21p1: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub additional_marks: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub fs1r231p1: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub fs1r041p1: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub fs1r042p1: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub fs1r23p1: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub fs1r26p1: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrimeIn {
    #[serde(default, deserialize_with = "loose_string")]
    pub crime_date: Option<String>,
    /// Packed `AAASSPP` code; takes precedence over `article`/`part`.
    #[serde(default, deserialize_with = "loose_string")]
    pub article_code: Option<String>,
    /// Article number (`188`, `99-1`) or a free-text reference.
    #[serde(default, deserialize_with = "loose_string")]
    pub article: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub part: Option<String>,
    /// Used as `article_parts` when those are not given.
    #[serde(default, deserialize_with = "loose_string")]
    pub paragraph: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub article_parts: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub crime_stage: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub fs1r56p1: Option<String>,
    /// Stands in for mitigating code "1" when no codes are given.
    #[serde(default)]
    pub has_mitigating: Option<bool>,
    #[serde(default)]
    pub has_aggravating: Option<bool>,
    #[serde(default, deserialize_with = "loose_string")]
    pub mitigating: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub fs1r571p1: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub aggravating: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub fs1r572p1: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub special_condition: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub fs1r573p1: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub fs1r041p1: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub fs1r042p1: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub fs1r23p1: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub fs1r26p1: Option<String>,
}

/// Accept a string, a number or null.
fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Str(String),
        Int(i64),
        Float(f64),
        Bool(bool),
    }

    Ok(Option::<Loose>::deserialize(deserializer)?.map(|v| match v {
        Loose::Str(s) => s,
        Loose::Int(n) => n.to_string(),
        Loose::Float(n) => n.to_string(),
        Loose::Bool(b) => b.to_string(),
    }))
}

/// First source that is present and non-empty.
fn first<'a>(sources: &[&'a Option<String>]) -> Option<&'a str> {
    sources
        .iter()
        .filter_map(|s| Option::as_deref(*s))
        .find(|s| !s.is_empty())
}

fn first_owned(sources: &[&Option<String>]) -> String {
    first(sources).unwrap_or_default().to_string()
}

/// Trimmed, lowercased language; `ru` when absent. Anything else is refused.
pub fn normalize_lang(lang: Option<&str>) -> Result<String, IntakeError> {
    let lang = lang.map(|l| l.trim().to_lowercase()).unwrap_or_default();
    if lang.is_empty() || lang == DEFAULT_LANG {
        Ok(DEFAULT_LANG.to_string())
    } else {
        Err(IntakeError::UnsupportedLang(lang))
    }
}

/// `YYYY-MM-DD` or `DDMMYYYY`; empty means absent.
pub fn parse_date(field: &'static str, raw: Option<&str>) -> Result<Option<NaiveDate>, IntakeError> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Ok(None);
    }
    let format = if raw.len() == 8 && raw.bytes().all(|b| b.is_ascii_digit()) {
        "%d%m%Y"
    } else {
        "%Y-%m-%d"
    };
    NaiveDate::parse_from_str(raw, format)
        .map(Some)
        .map_err(|_| IntakeError::InvalidDate {
            field,
            value: raw.to_string(),
        })
}

pub fn parse_gender(raw: Option<&str>) -> Gender {
    let value = raw.map(|v| v.trim().to_lowercase()).unwrap_or_default();
    match value.as_str() {
        "2" | "female" | "f" | "жен" | "женщина" => Gender::Female,
        _ => Gender::Male,
    }
}

pub fn parse_stage(raw: Option<&str>) -> CrimeStage {
    let value = raw.map(|v| v.trim().to_lowercase()).unwrap_or_default();
    match value.as_str() {
        "1" | "preparation" | "prep" => CrimeStage::Preparation,
        "2" | "attempt" => CrimeStage::Attempt,
        _ => CrimeStage::Completed,
    }
}

/// Packed code from `article_code`, or built from `article` and `part`.
///
/// A numeric `article_code` of 5 or 7 digits is used verbatim and shorter
/// ones are zero-padded to 7. A bare `article` number is packed with `part`
/// (default `01`); any other `article` text goes through the free-text
/// parser. Empty when nothing usable was given.
pub fn resolve_article_code(crime: &CrimeIn) -> String {
    if let Some(code) = first(&[&crime.article_code]) {
        let code = code.trim();
        if !code.is_empty() && code.bytes().all(|b| b.is_ascii_digit()) {
            return if matches!(code.len(), 5 | 7) {
                code.to_string()
            } else {
                zfill(code, 7)
            };
        }
    }

    match first(&[&crime.article]) {
        Some(article) if is_article_number(article) => {
            build_code(article, first(&[&crime.part]))
        }
        Some(article) => parse_article(article)
            .map(|parsed| parsed.code)
            .unwrap_or_default(),
        None => String::new(),
    }
}

/// Normalise a request. `today` stands in for absent crime and calculation
/// dates.
pub fn normalize(req: &CalculateRequest, today: NaiveDate) -> Result<EngineInput, IntakeError> {
    let (person, crime) = (&req.person, &req.crime);

    let crime_date = parse_date("crime_date", crime.crime_date.as_deref())?.unwrap_or(today);
    let calc_date = parse_date("calc_date", req.calc_date.as_deref())?.unwrap_or(today);
    let birth_date = parse_date("birth_date", person.birth_date.as_deref())?;

    let mut article_parts = crime
        .article_parts
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();
    if article_parts.is_empty() {
        if let Some(paragraph) = first(&[&crime.paragraph]) {
            article_parts = zfill(paragraph.trim(), 2);
        }
    }

    let flagged = |codes: Option<&str>, flag: Option<bool>| match codes {
        Some(codes) => codes.to_string(),
        None if flag.unwrap_or(false) => "1".to_string(),
        None => String::new(),
    };
    let mitigating = flagged(
        first(&[&crime.mitigating, &crime.fs1r571p1]),
        crime.has_mitigating,
    );
    let aggravating = flagged(
        first(&[&crime.aggravating, &crime.fs1r572p1]),
        crime.has_aggravating,
    );

    Ok(EngineInput {
        crime_date,
        article_code: resolve_article_code(crime),
        article_parts: CodeSet::new(article_parts),
        crime_stage: parse_stage(first(&[&crime.crime_stage, &crime.fs1r56p1])),
        mitigating: CodeSet::new(mitigating),
        aggravating: CodeSet::new(aggravating),
        special_condition: first_owned(&[&crime.special_condition, &crime.fs1r573p1]).into(),
        birth_date,
        gender: parse_gender(person.gender.as_deref()),
        citizenship: first_owned(&[&person.citizenship]),
        dependents: first_owned(&[&person.dependents, &person.fs1r21p1]).into(),
        additional_marks: first_owned(&[&person.additional_marks, &person.fs1r231p1]).into(),
        fs1r041p1: first_owned(&[&crime.fs1r041p1, &person.fs1r041p1]),
        fs1r042p1: first_owned(&[&crime.fs1r042p1, &person.fs1r042p1]),
        fs1r23p1: first_owned(&[&crime.fs1r23p1, &person.fs1r23p1]).into(),
        fs1r26p1: first_owned(&[&crime.fs1r26p1, &person.fs1r26p1]).into(),
        calc_date,
    })
}
