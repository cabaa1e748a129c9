//! Sentencing rule engine.
//!
//! A single deterministic pass over one fact pattern: discount ratios are
//! computed once from the crime stage and procedural/mitigation status, then
//! every punishment kind is evaluated independently in the legacy order and
//! returns its own outcome. Nothing here fails; absent or malformed sanction
//! values fall back to per-field defaults and unknown codes read as "absent".

mod additional;
mod format;
mod liability;
mod outcome;
mod primary;

use chrono::NaiveDate;
use tracing::debug;

use crate::calendar::whole_years_between;
use crate::input::{CrimeStage, EngineInput, Gender};
use crate::record::ArticleRecord;

pub use format::{format_range, format_term};
pub use outcome::{AdditionalOutcome, LiabilityOutcome, PunishmentOutcome, Sentence, reason};

/// Compute every punishment for `input` under the in-force `record`.
pub fn calculate(input: &EngineInput, record: &ArticleRecord) -> Sentence {
    let facts = Facts::new(input, record);
    let discount = DiscountFactors::compute(input, record);

    let fine = primary::fine(&facts, discount);
    let corrective_work = primary::corrective_work(&facts, discount);
    let mandatory_work = primary::mandatory_work(&facts, discount);
    let arrest = primary::arrest(&facts, discount);
    let death_penalty = primary::death_penalty(&facts);
    let restriction_of_freedom = primary::restriction_of_freedom(&facts, discount);
    let mut imprisonment = primary::imprisonment(&facts, discount);
    imprisonment.discount_mask = discount.reason_mask;

    Sentence {
        reference_found: true,
        fine,
        corrective_work,
        mandatory_work,
        restriction_of_freedom,
        arrest,
        imprisonment,
        death_penalty,
        confiscation: additional::confiscation(&facts),
        deportation: additional::deportation(&facts),
        lifetime_prohibition: additional::lifetime_prohibition(&facts),
        prohibition_term: additional::prohibition_term(&facts),
        citizenship_deprivation: additional::citizenship_deprivation(&facts),
        liability: liability::assess(&facts),
    }
}

/// Multiplicative adjustments to maximum bounds.
///
/// Applied in the fixed legacy order: agreement, stage, mitigation. Each
/// ratio is a numerator/denominator pair; `1/1` means no adjustment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscountFactors {
    pub agreement_num: f64,
    pub agreement_den: f64,
    pub stage_num: f64,
    pub stage_den: f64,
    pub mitigation_num: f64,
    pub mitigation_den: f64,
    /// Informational: +2 for an unfinished crime, +1 for an agreement.
    pub reason_mask: u32,
}

impl Default for DiscountFactors {
    fn default() -> Self {
        Self {
            agreement_num: 1.0,
            agreement_den: 1.0,
            stage_num: 1.0,
            stage_den: 1.0,
            mitigation_num: 1.0,
            mitigation_den: 1.0,
            reason_mask: 0,
        }
    }
}

impl DiscountFactors {
    pub fn compute(input: &EngineInput, record: &ArticleRecord) -> Self {
        let mut factors = Self::default();

        match input.crime_stage {
            CrimeStage::Preparation => {
                factors.stage_num = 1.0;
                factors.stage_den = 2.0;
                factors.reason_mask += 2;
            }
            CrimeStage::Attempt => {
                factors.stage_num = 3.0;
                factors.stage_den = 4.0;
                factors.reason_mask += 2;
            }
            CrimeStage::Completed => {}
        }

        if input.has_agreement() {
            factors.agreement_den = 2.0;
            factors.reason_mask += 1;
        } else if input.mitigation_only() {
            let (num, den) = match record.hard.as_str() {
                "1" | "2" => (1.0, 2.0),
                "3" => (2.0, 3.0),
                "4" => (3.0, 4.0),
                _ => (1.0, 1.0),
            };
            factors.mitigation_num = num;
            factors.mitigation_den = den;
        }

        factors
    }

    /// Apply every ratio to `value` in the legacy operation order.
    pub fn apply(self, value: f64) -> f64 {
        value / self.agreement_den * self.agreement_num / self.stage_den * self.stage_num
            / self.mitigation_den
            * self.mitigation_num
    }
}

/// Facts shared by every punishment rule.
pub(crate) struct Facts<'a> {
    pub input: &'a EngineInput,
    pub record: &'a ArticleRecord,
    /// Full years on the crime date; 0 when the birth date is unknown.
    pub age: i64,
}

impl<'a> Facts<'a> {
    fn new(input: &'a EngineInput, record: &'a ArticleRecord) -> Self {
        Self {
            input,
            record,
            age: age_on(input.birth_date, input.crime_date),
        }
    }

    pub fn is_minor(&self) -> bool {
        self.age < 18
    }

    pub fn is_female(&self) -> bool {
        self.input.gender == Gender::Female
    }

    /// Under 18, female, or over 62.
    pub fn is_protected_person(&self) -> bool {
        self.is_minor() || self.is_female() || self.age > 62
    }

    /// Disability, caregiver or age grounds that exclude labour-type and
    /// custodial punishments such as mandatory work and arrest.
    pub fn labour_exempt(&self) -> bool {
        let inp = self.input;
        inp.additional_marks.contains("83")
            || (self.is_female() && (inp.dependents.contains("02") || self.age > 57))
            || inp.dependents.contains("04")
            || self.age > 62
    }

    pub fn misdemeanor_or<T>(&self, misdemeanor: T, otherwise: T) -> T {
        if self.record.is_misdemeanor() {
            misdemeanor
        } else {
            otherwise
        }
    }
}

/// Full years between birth and crime date; 0 without a birth date.
pub fn age_on(birth_date: Option<NaiveDate>, crime_date: NaiveDate) -> i64 {
    birth_date
        .map(|birth| whole_years_between(birth, crime_date))
        .unwrap_or(0)
}

/// Parse a numeric sanction value the lenient legacy way.
///
/// Leading digits, signs and decimal points are taken, a comma counts as a
/// decimal point, and parsing stops at the first other character, so
/// `"200xN"` is 200 and `"2,5 лет"` is 2.5. Returns `None` when nothing
/// numeric leads the value.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let mut num = String::new();
    for ch in raw.trim().chars() {
        match ch {
            '0'..='9' | '.' | '-' | '+' => num.push(ch),
            ',' => num.push('.'),
            _ => break,
        }
    }
    match num.as_str() {
        "" | "+" | "-" | "." => None,
        s => s.parse().ok(),
    }
}

/// [`parse_amount`] with a fallback, logging unparsable non-empty values.
pub(crate) fn amount_or(raw: &str, field: &'static str, default: f64) -> f64 {
    match parse_amount(raw) {
        Some(value) => value,
        None => {
            if !raw.trim().is_empty() {
                debug!(field, raw, default, "unparsable sanction value, using default");
            }
            default
        }
    }
}

/// Truncate toward zero at two decimal places.
pub fn floor2(value: f64) -> f64 {
    (value * 100.0).trunc() / 100.0
}
