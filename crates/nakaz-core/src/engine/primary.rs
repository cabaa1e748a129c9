//! Main punishments: fine, corrective work, mandatory work, arrest, death
//! penalty, restriction of freedom and imprisonment.

use crate::calendar::{Term, term_via_day_span};
use crate::messages::{Case, Message};

use super::format::{format_range, format_term};
use super::outcome::{PunishmentOutcome, reason};
use super::{DiscountFactors, Facts, amount_or, floor2, parse_amount};

/// Articles whose fine (and, inverted, restriction of freedom) depends on
/// whether point "02" was charged.
const FINE_POINT_ARTICLES: &[&str] = &["1890003", "1900003", "3070003"];
const RESTRICTION_POINT_ARTICLES: &[&str] = &["1890003", "1900003"];

/// Aggravated form of this article carries 10 to 20 years and the life-term
/// alternative.
const AGGRAVATED_LIFE_ARTICLE: &str = "4370003";

/// Social status code that excludes fines and corrective work for minors.
const SERVICE_STATUS_EXCLUDED: &str = "082";
const SERVICE_STATUS_RANGE: &[&str] = &["024", "025", "026", "027", "028", "029", "030"];

pub(crate) fn fine(facts: &Facts, discount: DiscountFactors) -> PunishmentOutcome {
    let (input, record) = (facts.input, facts.record);

    let carved_out = FINE_POINT_ARTICLES
        .iter()
        .any(|code| input.article_code == *code && !input.article_parts.contains("02"));
    let provided = (record.fs1r64.contains("05") && !carved_out)
        || (record.fs1r64_nn.contains("05") && input.special_condition.is("02"));
    if !provided {
        return PunishmentOutcome::not_provided().with_reason(reason::FINE_NOT_PROVIDED);
    }

    let mut out = PunishmentOutcome::not_provided();
    let mut min = if input.lowers_minimum() {
        0.0
    } else {
        amount_or(&record.fs1r64_05n, "fs1r64_05n", facts.misdemeanor_or(20.0, 200.0))
    };
    let mut max = amount_or(&record.fs1r64_05x, "fs1r64_05x", facts.misdemeanor_or(200.0, 10000.0));

    if input.fs1r041p1 == "3" {
        min = min.min(facts.misdemeanor_or(10.0, 50.0));
        max = max.min(facts.misdemeanor_or(20.0, 200.0));
    }

    if facts.is_minor() {
        let marks = &input.additional_marks;
        let earns_income = marks.contains_any(&["90", "91", "92"])
            && !input.fs1r23p1.is(SERVICE_STATUS_EXCLUDED)
            && !marks.contains_any(&["85", "86"]);
        if earns_income {
            min = min.min(5.0);
            max = max.min(100.0);
        } else {
            out.text = Message::FineBarredMinor.text().to_string();
            out.reason = Some(reason::FINE_BARRED_MINOR);
            max = 0.0;
        }
    }

    let max = floor2(discount.apply(max));
    if max > 0.0 {
        let raw = record.fs1r64_05x.as_str();
        let unit = if raw.contains("xN") {
            Message::UnitPercent
        } else if raw.contains("xK") {
            Message::UnitTenge
        } else {
            Message::UnitMrp
        };
        out.applicable = true;
        out.min = max.min(min);
        out.max = max;
        out.text = format_range(out.min, out.max, unit.text());
    }
    out
}

pub(crate) fn corrective_work(facts: &Facts, discount: DiscountFactors) -> PunishmentOutcome {
    let (input, record) = (facts.input, facts.record);

    let provided = record.fs1r64.contains("06")
        || (record.fs1r64_nn.contains("06") && input.special_condition.is("02"));
    if !provided {
        return PunishmentOutcome::not_provided();
    }

    if input.fs1r23p1.is(SERVICE_STATUS_EXCLUDED)
        || input.additional_marks.contains_any(&["85", "86", "87", "88"])
    {
        return PunishmentOutcome::barred(Message::CorrectiveWorkBarred)
            .with_reason(reason::CORRECTIVE_WORK_BARRED);
    }

    let mut out = PunishmentOutcome::not_provided();
    let mut min = if input.lowers_minimum() {
        0.0
    } else {
        amount_or(&record.fs1r64_06n, "fs1r64_06n", facts.misdemeanor_or(20.0, 200.0))
    };
    let mut max = amount_or(&record.fs1r64_06x, "fs1r64_06x", facts.misdemeanor_or(200.0, 10000.0));

    if facts.is_minor() {
        if input.additional_marks.contains_any(&["90", "91", "92"]) {
            min = min.min(5.0);
            max = max.min(100.0);
        } else {
            out.text = Message::CorrectiveWorkBarredMinor.text().to_string();
            max = 0.0;
        }
    }

    let max = floor2(discount.apply(max));
    if max > 0.0 {
        out.applicable = true;
        out.min = max.min(min);
        out.max = max;
        out.text = format_range(out.min, out.max, Message::UnitMrp.text());
    }
    out
}

pub(crate) fn mandatory_work(facts: &Facts, discount: DiscountFactors) -> PunishmentOutcome {
    let (input, record) = (facts.input, facts.record);

    if !record.fs1r64.contains("09") {
        return PunishmentOutcome::not_provided();
    }

    let personal = facts.labour_exempt();
    let service = input.additional_marks.contains_any(&["85", "93"])
        || (input.fs1r23p1.contains_any(SERVICE_STATUS_RANGE) && input.fs1r26p1.has_value());
    if personal || service {
        let code = if personal {
            reason::MANDATORY_WORK_BARRED_PERSON
        } else {
            reason::MANDATORY_WORK_BARRED_SERVICE
        };
        return PunishmentOutcome::barred(Message::MandatoryWorkBarred).with_reason(code);
    }

    let mut min = if input.lowers_minimum() {
        0.0
    } else {
        amount_or(&record.fs1r64_09n, "fs1r64_09n", facts.misdemeanor_or(20.0, 200.0))
    };
    let mut max = amount_or(&record.fs1r64_09x, "fs1r64_09x", facts.misdemeanor_or(200.0, 1200.0));

    if facts.is_minor() {
        min = min.min(10.0);
        max = max.min(75.0);
    }

    let max = discount.apply(max).trunc();
    let min = max.min(min);
    PunishmentOutcome {
        applicable: true,
        min,
        max,
        text: format_range(min, max, Message::UnitHours.text()),
        ..PunishmentOutcome::not_provided()
    }
}

pub(crate) fn arrest(facts: &Facts, discount: DiscountFactors) -> PunishmentOutcome {
    let (input, record) = (facts.input, facts.record);

    if !record.fs1r64.contains("12") {
        return PunishmentOutcome::not_provided();
    }

    let minor_grounds = facts.is_minor() || input.additional_marks.contains("85");
    if minor_grounds || facts.labour_exempt() {
        let code = if minor_grounds {
            reason::ARREST_BARRED_MINOR
        } else {
            reason::ARREST_BARRED_PERSON
        };
        return PunishmentOutcome::barred(Message::ArrestBarred).with_reason(code);
    }

    let min = if input.lowers_minimum() {
        0.0
    } else {
        amount_or(&record.fs1r64_12n, "fs1r64_12n", 10.0)
    };
    let max = amount_or(&record.fs1r64_12x, "fs1r64_12x", 0.0);

    let max = discount.apply(max).trunc();
    let min = max.min(min);
    PunishmentOutcome {
        applicable: true,
        min,
        max,
        text: format_range(min, max, Message::UnitDays.text()),
        ..PunishmentOutcome::not_provided()
    }
}

pub(crate) fn death_penalty(facts: &Facts) -> PunishmentOutcome {
    let input = facts.input;

    if !facts.record.fs1r64.contains("02") {
        return PunishmentOutcome::not_provided();
    }

    if facts.is_protected_person() {
        PunishmentOutcome::barred(Message::DeathBarredPerson).with_reason(reason::DEATH_BARRED_PERSON)
    } else if input.mitigation_only() {
        PunishmentOutcome::barred(Message::DeathBarredMitigating)
            .with_reason(reason::DEATH_BARRED_MITIGATION)
    } else if input.crime_stage.is_unfinished() {
        PunishmentOutcome::barred(Message::DeathBarredStage).with_reason(reason::UNFINISHED_CRIME)
    } else {
        PunishmentOutcome {
            applicable: true,
            ..PunishmentOutcome::barred(Message::DeathPenalty)
        }
    }
}

pub(crate) fn restriction_of_freedom(facts: &Facts, discount: DiscountFactors) -> PunishmentOutcome {
    let (input, record) = (facts.input, facts.record);

    let carved_out = RESTRICTION_POINT_ARTICLES
        .iter()
        .any(|code| input.article_code == *code && input.article_parts.contains("02"));
    let provided = (record.fs1r64.contains("11") && !carved_out)
        || (record.fs1r64_nn.contains("11") && input.special_condition.is("02"));
    if !provided {
        return PunishmentOutcome::not_provided().with_reason(reason::RESTRICTION_NOT_PROVIDED);
    }

    let mut min = if input.lowers_minimum() {
        0.0
    } else {
        parse_amount(&record.fs1r64_11n)
            .map(|years| years * 12.0)
            .unwrap_or(6.0)
    };
    let mut max = amount_or(&record.fs1r64_11x, "fs1r64_11x", 7.0) * 12.0;

    if facts.is_minor() {
        min = 0.0;
        max = max.min(24.0);
    }

    let range = TermRange::compute(input.calc_date, min, discount.apply(max));
    let text = if range.exact {
        range.max_text.clone()
    } else {
        format!("от {} до {}", range.min_text, range.max_text)
            .trim()
            .to_string()
    };
    PunishmentOutcome {
        applicable: true,
        min: range.min,
        max: range.max,
        text,
        min_term: range.min_term,
        max_term: range.max_term,
        ..PunishmentOutcome::not_provided()
    }
}

pub(crate) fn imprisonment(facts: &Facts, discount: DiscountFactors) -> PunishmentOutcome {
    let (input, record) = (facts.input, facts.record);
    let mut out = PunishmentOutcome::not_provided();

    if !record.fs1r64.contains("01") {
        return out;
    }

    let aggravated_life_article =
        input.article_code == AGGRAVATED_LIFE_ARTICLE && input.aggravating.has_value();
    let mut life_alternative = record.fs1r64.contains("03") || aggravated_life_article;

    // Later grounds overwrite earlier ones.
    if input.has_agreement() {
        life_alternative = false;
        out.override_reason = Some(reason::LIFE_TERM_AGREEMENT);
    } else if input.mitigation_only() {
        life_alternative = false;
        out.override_reason = Some(reason::LIFE_TERM_MITIGATION);
    }
    if facts.is_protected_person() {
        life_alternative = false;
        out.override_reason = Some(reason::LIFE_TERM_PERSON);
    }
    if input.crime_stage.is_unfinished() {
        life_alternative = false;
        out.override_reason = Some(reason::UNFINISHED_CRIME);
    }

    let prefix = input.article_prefix();
    let lighter_alternatives = record.fs1r64.contains_any(&["05", "06", "11"])
        && input.mitigating.contains("06")
        && (record.hard_in(&["1", "2"])
            || (("21400"..="24700").contains(&prefix) && prefix != "21800"));
    if lighter_alternatives {
        out.text = Message::ImprisonmentBarredAlternatives.text().to_string();
        out.reason = Some(reason::IMPRISONMENT_BARRED_ALTERNATIVES);
        out.override_reason = Some(reason::IMPRISONMENT_BARRED_ALTERNATIVES);
        return out;
    }

    let juvenile_parts = record.fl1u.trim();
    let juvenile_allowed = record.fl1u == "ALL"
        || (!record.fl1u.is_empty() && input.article_parts.contains(juvenile_parts));
    if facts.is_minor() && !record.hard_in(&["3", "4"]) && !juvenile_allowed {
        out.text = Message::ImprisonmentBarredMinor.text().to_string();
        out.reason = Some(reason::IMPRISONMENT_BARRED_MINOR);
        out.override_reason = Some(reason::IMPRISONMENT_BARRED_MINOR);
        return out;
    }

    let mut min = parse_amount(&record.fs1r64_01n).unwrap_or(0.0) * 12.0;
    let mut max = parse_amount(&record.fs1r64_01x).unwrap_or(0.0) * 12.0;
    if aggravated_life_article {
        min = 10.0 * 12.0;
        max = 20.0 * 12.0;
    }

    // Six months is both the floor under special conditions and the
    // default when the sanction states no minimum.
    if input.lowers_minimum() || min == 0.0 {
        min = 6.0;
    }

    if facts.is_minor() {
        let code = input.article_code.as_str();
        max = if (code.starts_with("09900") && input.aggravating.has_value())
            || code.starts_with("25500")
            || code == "0990002"
        {
            12.0 * 12.0
        } else {
            10.0 * 12.0
        };
        min = min.min(max);
    }

    if max == 0.0 {
        return out;
    }

    let range = TermRange::compute(input.calc_date, min, discount.apply(max));
    let mut text = if range.exact {
        String::new()
    } else {
        format!("от {} до ", range.min_text)
    };
    text.push_str(&range.max_text);
    if life_alternative {
        text.push(' ');
        text.push_str(Message::LifeImprisonmentAlternative.text());
    }

    out.applicable = true;
    out.min = range.min;
    out.max = range.max;
    out.min_term = range.min_term;
    out.max_term = range.max_term;
    out.text = text;
    out
}

/// Bounds of a term punishment in legacy form.
struct TermRange {
    /// Minimum in months, or the maximum value when they meet.
    min: f64,
    /// `months + days / 10` of the day-span decomposed maximum.
    max: f64,
    min_term: Term,
    max_term: Term,
    min_text: String,
    max_text: String,
    /// Minimum reaches the maximum; the text reads as one exact term.
    exact: bool,
}

impl TermRange {
    /// `min_months` is taken as a plain month count; `max_months` is
    /// converted to a day span anchored at `anchor` and decomposed back.
    fn compute(anchor: chrono::NaiveDate, min_months: f64, max_months: f64) -> Self {
        let max_term = term_via_day_span(anchor, max_months);
        let total_months = max_term.years * 12 + max_term.months;
        let max = total_months as f64 + max_term.days as f64 / 10.0;

        let exact = min_months >= max;
        let max_case = if exact { Case::Nominative } else { Case::Genitive };
        let max_text = format_term(max_term, max_case);

        // The minimum's day cell carries the maximum's day remainder; only
        // its text drops the days.
        let min_term = Term::from_months(min_months.trunc() as i64, max_term.days);
        let min_text = format_term(Term { days: 0, ..min_term }, Case::Genitive);

        if exact {
            Self {
                min: max,
                max,
                min_term: max_term,
                max_term,
                min_text,
                max_text,
                exact,
            }
        } else {
            Self {
                min: min_months,
                max,
                min_term,
                max_term,
                min_text,
                max_text,
                exact,
            }
        }
    }
}
