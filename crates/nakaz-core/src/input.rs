//! Canonical engine input.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::codes::CodeSet;

/// Stage the crime reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrimeStage {
    Preparation,
    Attempt,
    #[default]
    Completed,
}

impl CrimeStage {
    /// Legacy form code: "1", "2" or "3".
    pub fn code(self) -> &'static str {
        match self {
            Self::Preparation => "1",
            Self::Attempt => "2",
            Self::Completed => "3",
        }
    }

    /// Preparation or attempt.
    pub fn is_unfinished(self) -> bool {
        !matches!(self, Self::Completed)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    /// Legacy form code: "1" or "2".
    pub fn code(self) -> &'static str {
        match self {
            Self::Male => "1",
            Self::Female => "2",
        }
    }
}

/// Normalised facts about the person and the crime.
///
/// Built by [`crate::intake::normalize`]. Fields named `fs1r*` carry the
/// statistical form field of the same name unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineInput {
    pub crime_date: NaiveDate,
    /// Packed `AAASSPP` article code.
    pub article_code: String,
    /// Article points (paragraphs) the act was qualified under.
    pub article_parts: CodeSet,
    pub crime_stage: CrimeStage,
    pub mitigating: CodeSet,
    pub aggravating: CodeSet,
    /// Special condition codes ("01" through "05").
    pub special_condition: CodeSet,
    pub birth_date: Option<NaiveDate>,
    pub gender: Gender,
    /// Citizenship code; "1" is a citizen.
    pub citizenship: String,
    pub dependents: CodeSet,
    pub additional_marks: CodeSet,
    /// Procedural agreement: "1" plea agreement, "3" the reduced fine variant.
    pub fs1r041p1: String,
    /// Cooperation agreement: "1" when concluded.
    pub fs1r042p1: String,
    /// Social/service status code.
    pub fs1r23p1: CodeSet,
    /// Service detail; any value activates the service-status exclusions.
    pub fs1r26p1: CodeSet,
    /// Date used as "today" for term computation.
    pub calc_date: NaiveDate,
}

impl EngineInput {
    /// A completed crime with no optional facts, mostly useful as a base for
    /// struct update syntax.
    pub fn new(article_code: impl Into<String>, crime_date: NaiveDate, calc_date: NaiveDate) -> Self {
        Self {
            crime_date,
            article_code: article_code.into(),
            article_parts: CodeSet::default(),
            crime_stage: CrimeStage::Completed,
            mitigating: CodeSet::default(),
            aggravating: CodeSet::default(),
            special_condition: CodeSet::default(),
            birth_date: None,
            gender: Gender::Male,
            citizenship: String::new(),
            dependents: CodeSet::default(),
            additional_marks: CodeSet::default(),
            fs1r041p1: String::new(),
            fs1r042p1: String::new(),
            fs1r23p1: CodeSet::default(),
            fs1r26p1: CodeSet::default(),
            calc_date,
        }
    }

    /// Plea or cooperation agreement concluded.
    pub fn has_agreement(&self) -> bool {
        self.fs1r041p1 == "1" || self.fs1r042p1 == "1"
    }

    /// Mitigating circumstances present with no aggravating ones.
    pub fn mitigation_only(&self) -> bool {
        self.mitigating.has_value() && !self.aggravating.has_value()
    }

    /// Special condition "01" or "04" lowers the minimum bound.
    pub fn lowers_minimum(&self) -> bool {
        self.special_condition.contains_any(&["01", "04"])
    }

    /// First five digits of the article code (article and sub-article).
    pub fn article_prefix(&self) -> &str {
        let end = self
            .article_code
            .char_indices()
            .nth(5)
            .map(|(i, _)| i)
            .unwrap_or(self.article_code.len());
        &self.article_code[..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> EngineInput {
        let d = NaiveDate::from_ymd_opt(2025, 9, 12).unwrap();
        EngineInput::new("1880003", d, d)
    }

    #[test]
    fn article_prefix_takes_five_digits() {
        assert_eq!(base().article_prefix(), "18800");
        let short = EngineInput {
            article_code: "188".into(),
            ..base()
        };
        assert_eq!(short.article_prefix(), "188");
    }

    #[test]
    fn mitigation_only_requires_no_aggravating() {
        let inp = EngineInput {
            mitigating: "01".into(),
            ..base()
        };
        assert!(inp.mitigation_only());
        let both = EngineInput {
            aggravating: "02".into(),
            ..inp
        };
        assert!(!both.mitigation_only());
    }

    #[test]
    fn agreement_flags() {
        assert!(!base().has_agreement());
        let plea = EngineInput {
            fs1r042p1: "1".into(),
            ..base()
        };
        assert!(plea.has_agreement());
    }

    #[test]
    fn stage_codes() {
        assert_eq!(CrimeStage::Preparation.code(), "1");
        assert!(CrimeStage::Attempt.is_unfinished());
        assert!(!CrimeStage::Completed.is_unfinished());
    }
}
