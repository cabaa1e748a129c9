//! Article references: packed codes, free-text parsing and article summaries.
//!
//! A packed code is `AAASSPP`: three-digit article, two-digit sub-article
//! (`00` when the article has none) and two-digit part.
//!
//! | input             | form            | article | part | paragraph | code      |
//! |-------------------|-----------------|---------|------|-----------|-----------|
//! | `1880003`         | packed code     | `188`   | `3`  |           | `1880003` |
//! | `ст. 188 ч.3 п.2` | `ст.` reference | `188`   | `3`  | `2`       | `1880003` |
//! | `Статья 99-1`     | `ст.` reference | `99-1`  |      |           | `0990101` |
//! | `188.3`           | article.part    | `188`   | `3`  |           | `1880003` |
//! | `99-1`            | article-part    | `99`    | `1`  |           | `0990001` |
//! | `188`             | bare article    | `188`   |      |           | `1880001` |
//!
//! After `ст.`/`статья` a hyphen joins a sub-article to the article; in a
//! bare `N-M` it separates article and part.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

use crate::record::ArticleRecord;

static PACKED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{7}$").expect("packed code pattern"));

/// Tried in order; the first match wins.
static PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        r"(?i)(?:ст(?:атья)?\.?\s*)(\d+(?:-\d+)?)\s*(?:ч(?:асть)?\.?\s*(\d+))?\s*(?:п(?:ункт)?\.?\s*(\d+))?",
        r"^(\d+)[./\-](\d+)(?:[./\-](\d+))?$",
        r"^(\d{1,3})$",
    ]
    .map(|p| Regex::new(p).expect("article pattern"))
});

static ARTICLE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)(?:-(\d+))?$").expect("article number pattern"));

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("digits pattern"));

/// A recognised article reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedArticle {
    /// Article number, with `-N` for a sub-article.
    pub article: String,
    pub part: Option<String>,
    pub paragraph: Option<String>,
    pub code: String,
    pub raw: String,
    /// 1.0 for a packed code, 0.9 with a part, 0.8 without, 0.5 when the
    /// numbers were only scanned out of the text.
    pub confidence: f32,
}

/// Parse a packed code or a free-text article reference.
///
/// Returns `None` when the text holds no number at all.
pub fn parse_article(text: &str) -> Option<ParsedArticle> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if PACKED.is_match(text) {
        return Some(parse_packed(text));
    }

    for pattern in PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            let group = |i| caps.get(i).map(|m| m.as_str().to_string());
            let article = group(1).unwrap_or_default();
            let part = group(2);
            let paragraph = group(3);
            let confidence = if part.is_some() { 0.9 } else { 0.8 };
            return Some(ParsedArticle {
                code: build_code(&article, part.as_deref()),
                article,
                part,
                paragraph,
                raw: text.to_string(),
                confidence,
            });
        }
    }

    let mut numbers = DIGITS.find_iter(text).map(|m| m.as_str().to_string());
    let article = numbers.next()?;
    let part = numbers.next();
    let paragraph = numbers.next();
    Some(ParsedArticle {
        code: build_code(&article, part.as_deref()),
        article,
        part,
        paragraph,
        raw: text.to_string(),
        confidence: 0.5,
    })
}

/// Unpack a 7-digit code. Sub-article `00` is dropped and part `00` reads
/// as no part.
fn parse_packed(code: &str) -> ParsedArticle {
    let number = |s: &str| s.parse::<u32>().unwrap_or(0);
    let article = number(&code[..3]);
    let sub_article = number(&code[3..5]);
    let part = number(&code[5..7]);

    let article = if sub_article > 0 {
        format!("{article}-{sub_article}")
    } else {
        article.to_string()
    };

    ParsedArticle {
        article,
        part: (part > 0).then(|| part.to_string()),
        paragraph: None,
        code: code.to_string(),
        raw: code.to_string(),
        confidence: 1.0,
    }
}

/// Pack an article number (`"188"` or `"99-1"`) and part into `AAASSPP`.
///
/// A missing part packs as `01`. Returns an empty string for an empty
/// article.
pub fn build_code(article: &str, part: Option<&str>) -> String {
    let article = article.trim();
    if article.is_empty() {
        return String::new();
    }

    let (number, sub_article) = match ARTICLE_NUMBER.captures(article) {
        Some(caps) => (
            caps.get(1).map_or(article, |m| m.as_str()),
            caps.get(2).map_or("0", |m| m.as_str()),
        ),
        None => (article, "0"),
    };
    let part = part.map(str::trim).filter(|p| !p.is_empty()).unwrap_or("1");

    format!("{}{}{}", zfill(number, 3), zfill(sub_article, 2), zfill(part, 2))
}

/// True when `article` is a bare `N` or `N-M` number.
pub fn is_article_number(article: &str) -> bool {
    ARTICLE_NUMBER.is_match(article.trim())
}

/// `ст.188 ч.3 п.2`.
pub fn to_display_name(article: &str, part: Option<&str>, paragraph: Option<&str>) -> String {
    let mut name = format!("ст.{article}");
    if let Some(part) = part {
        name.push_str(&format!(" ч.{part}"));
    }
    if let Some(paragraph) = paragraph {
        name.push_str(&format!(" п.{paragraph}"));
    }
    name
}

/// Left-pad with zeros to `width`; longer values are returned unchanged.
pub(crate) fn zfill(s: &str, width: usize) -> String {
    format!("{s:0>width$}")
}

/// Severity class names for `hard` values 0 through 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Minor,
    Small,
    Medium,
    Serious,
    EspeciallySerious,
}

impl Severity {
    /// Unparsable values read as 0; out-of-range values are clamped.
    pub fn from_hard(hard: &str) -> Self {
        match hard.trim().parse::<i64>().unwrap_or(0).clamp(0, 4) {
            1 => Self::Small,
            2 => Self::Medium,
            3 => Self::Serious,
            4 => Self::EspeciallySerious,
            _ => Self::Minor,
        }
    }
}

/// Caption markers of an article that has been repealed. The garbled forms
/// come from captions the decoder could not repair.
const EXCLUDED_MARKERS: &[&str] = &[
    "(Исключена)",
    "(Исключен",
    "(8A:;NG5=0)",
    "(8A:;NG5=",
    "Исключена",
    "Исключен",
];

pub fn is_excluded(caption: &str) -> bool {
    EXCLUDED_MARKERS.iter().any(|m| caption.contains(m))
}

/// Keep digits, dots and minus signs and parse what is left; 0.0 otherwise.
fn parse_years(raw: &str) -> f64 {
    let clean: String = raw
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    clean.parse().unwrap_or(0.0)
}

/// Summary of the latest version of an article.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleInfo {
    pub code: String,
    /// Caption, or the display name when the record has none.
    pub name: String,
    pub severity: Severity,
    /// Imprisonment bounds in years.
    pub imprisonment_min: f64,
    pub imprisonment_max: f64,
    pub is_excluded: bool,
    pub effective_from: Option<NaiveDate>,
    pub effective_to: Option<NaiveDate>,
}

impl ArticleInfo {
    pub fn new(
        parsed: &ParsedArticle,
        record: &ArticleRecord,
        effective_from: Option<NaiveDate>,
        effective_to: Option<NaiveDate>,
    ) -> Self {
        let caption = record.stat.trim();
        let name = if caption.is_empty() {
            to_display_name(
                &parsed.article,
                parsed.part.as_deref(),
                parsed.paragraph.as_deref(),
            )
        } else {
            caption.to_string()
        };

        Self {
            code: record.article_code.clone(),
            name,
            severity: Severity::from_hard(&record.hard),
            imprisonment_min: parse_years(&record.fs1r64_01n),
            imprisonment_max: parse_years(&record.fs1r64_01x),
            is_excluded: is_excluded(&record.stat),
            effective_from,
            effective_to,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_code() {
        let p = parse_article("1880003").unwrap();
        assert_eq!(p.article, "188");
        assert_eq!(p.part.as_deref(), Some("3"));
        assert_eq!(p.code, "1880003");
        assert_eq!(p.confidence, 1.0);
    }

    #[test]
    fn packed_code_with_sub_article() {
        let p = parse_article("0991000").unwrap();
        assert_eq!(p.article, "99-10");
        assert_eq!(p.part, None);
    }

    #[test]
    fn russian_reference() {
        let p = parse_article("ст. 188 ч.3 п.2").unwrap();
        assert_eq!(p.article, "188");
        assert_eq!(p.part.as_deref(), Some("3"));
        assert_eq!(p.paragraph.as_deref(), Some("2"));
        assert_eq!(p.code, "1880003");
        assert_eq!(p.confidence, 0.9);

        let p = parse_article("Статья 99-1").unwrap();
        assert_eq!(p.code, "0990101");
        assert_eq!(p.confidence, 0.8);
    }

    #[test]
    fn dotted_reference() {
        let p = parse_article("188.3").unwrap();
        assert_eq!(p.code, "1880003");
        let p = parse_article("188-1/2").unwrap();
        assert_eq!((p.part.as_deref(), p.paragraph.as_deref()), (Some("1"), Some("2")));
    }

    #[test]
    fn hyphen_reads_as_part_unless_prefixed() {
        let bare = parse_article("99-1").unwrap();
        assert_eq!((bare.article.as_str(), bare.code.as_str()), ("99", "0990001"));
        let prefixed = parse_article("ст. 99-1").unwrap();
        assert_eq!((prefixed.article.as_str(), prefixed.code.as_str()), ("99-1", "0990101"));
    }

    #[test]
    fn bare_number() {
        let p = parse_article("99").unwrap();
        assert_eq!(p.code, "0990001");
        assert_eq!(p.confidence, 0.8);
    }

    #[test]
    fn digit_scan_fallback() {
        let p = parse_article("УК РК 188 часть 2").unwrap();
        assert_eq!(p.code, "1880002");
        assert_eq!(p.confidence, 0.5);
    }

    #[test]
    fn nothing_numeric() {
        assert!(parse_article("").is_none());
        assert!(parse_article("кража").is_none());
    }

    #[test]
    fn build_code_pads() {
        assert_eq!(build_code("99", Some("2")), "0990002");
        assert_eq!(build_code("99-1", None), "0990101");
        assert_eq!(build_code("", Some("2")), "");
    }

    #[test]
    fn display_name() {
        assert_eq!(to_display_name("188", Some("3"), Some("2")), "ст.188 ч.3 п.2");
        assert_eq!(to_display_name("188", None, None), "ст.188");
    }

    #[test]
    fn severity_names() {
        assert_eq!(Severity::from_hard("3"), Severity::Serious);
        assert_eq!(Severity::from_hard("9"), Severity::EspeciallySerious);
        assert_eq!(Severity::from_hard("x"), Severity::Minor);
        assert_eq!(
            serde_json::to_value(Severity::EspeciallySerious).unwrap(),
            "ESPECIALLY_SERIOUS"
        );
    }

    #[test]
    fn info_from_record() {
        let parsed = parse_article("188.3").unwrap();
        let record = ArticleRecord {
            article_code: "1880003".into(),
            stat: "Кража (Исключена)".into(),
            hard: "3".into(),
            fs1r64_01n: "2".into(),
            fs1r64_01x: "7 лет".into(),
            ..Default::default()
        };
        let info = ArticleInfo::new(&parsed, &record, None, None);
        assert_eq!(info.name, "Кража (Исключена)");
        assert!(info.is_excluded);
        assert_eq!((info.imprisonment_min, info.imprisonment_max), (2.0, 7.0));

        let bare = ArticleRecord {
            stat: String::new(),
            ..record
        };
        assert_eq!(ArticleInfo::new(&parsed, &bare, None, None).name, "ст.188 ч.3");
    }
}
