//! Additional punishments.
//!
//! Each is gated on its code in the mandatory (`fs1r65_o`) or discretionary
//! (`fs1r65_n`) field. Special condition "03" lifts the mandatory flag but
//! never the punishment itself.

use crate::messages::{Case, Message, TimeUnit, unit_word};

use super::Facts;
use super::amount_or;
use super::outcome::AdditionalOutcome;

const CONFISCATION: &str = "01";
const PROHIBITION_TERM: &str = "02";
const DEPORTATION: &str = "04";
const CITIZENSHIP: &str = "05";
const LIFETIME_PROHIBITION: &str = "22";

/// Article code and point combinations that carry a mandatory lifetime
/// prohibition regardless of the sanction columns.
const LIFETIME_PROHIBITION_POINTS: &[(&str, &[&str])] = &[
    ("1200003", &["05"]),
    ("1210003", &["05"]),
    ("1340004", &["02"]),
    ("1890003", &["02"]),
    ("1900003", &["02"]),
    ("2150002", &["03"]),
    ("2160002", &["04"]),
    ("2170003", &["03"]),
    ("2180003", &["01"]),
    ("2340003", &["01"]),
    ("2490003", &["02"]),
    ("3070003", &["03"]),
    ("3120003", &["01", "02"]),
    ("3620004", &["03"]),
    ("4510002", &["02"]),
];

/// Same, for mandatory confiscation.
const CONFISCATION_POINTS: &[(&str, &[&str])] = &[("3620004", &["03"]), ("4510002", &["02"])];

/// Citizenship codes of foreigners and stateless persons.
const NON_CITIZEN_CODES: &[&str] = &["2", "3", "4"];
const CITIZEN_CODE: &str = "1";

/// Special condition that makes the term-limited prohibition available
/// with a one-year minimum.
const PROHIBITION_CONDITION: &str = "05";

fn charged_under(facts: &Facts, table: &[(&str, &[&str])]) -> bool {
    let input = facts.input;
    table
        .iter()
        .any(|(code, points)| input.article_code == *code && input.article_parts.contains_any(points))
}

struct Gate {
    mandatory: bool,
    discretionary: bool,
}

impl Gate {
    fn new(facts: &Facts, code: &str) -> Self {
        Self {
            mandatory: facts.record.fs1r65_o.contains(code),
            discretionary: facts.record.fs1r65_n.contains(code),
        }
    }

    fn open(&self) -> bool {
        self.mandatory || self.discretionary
    }

    /// Mandatory unless special condition "03" applies.
    fn binding(&self, facts: &Facts) -> bool {
        self.mandatory && !facts.input.special_condition.is("03")
    }
}

pub(crate) fn confiscation(facts: &Facts) -> AdditionalOutcome {
    let gate = Gate::new(facts, CONFISCATION);
    let by_article = charged_under(facts, CONFISCATION_POINTS);
    if !gate.open() && !by_article {
        return AdditionalOutcome::default();
    }
    if facts.is_minor() {
        return AdditionalOutcome::barred(Message::ConfiscationBarredMinor);
    }

    let mandatory_text = gate.mandatory || by_article;
    let mandatory = mandatory_text && !facts.input.special_condition.is("03");
    let text = if mandatory_text {
        Message::ConfiscationMandatory
    } else {
        Message::ConfiscationDiscretionary
    };
    AdditionalOutcome::applies(mandatory, text)
}

pub(crate) fn deportation(facts: &Facts) -> AdditionalOutcome {
    let gate = Gate::new(facts, DEPORTATION);
    if !gate.open() {
        return AdditionalOutcome::default();
    }
    if facts.is_minor() {
        return AdditionalOutcome::barred(Message::DeportationBarredMinor);
    }

    let citizenship = facts.input.citizenship.as_str();
    let text = match (gate.mandatory, NON_CITIZEN_CODES.contains(&citizenship)) {
        (false, _) => Message::DeportationDiscretionary,
        (true, true) => Message::DeportationMandatoryForeigner,
        (true, false) => Message::DeportationMandatoryCitizen,
    };
    AdditionalOutcome::applies(gate.binding(facts), text)
}

pub(crate) fn lifetime_prohibition(facts: &Facts) -> AdditionalOutcome {
    let gate = Gate::new(facts, LIFETIME_PROHIBITION);
    let by_article = charged_under(facts, LIFETIME_PROHIBITION_POINTS);
    if !gate.open() && !by_article {
        return AdditionalOutcome::default();
    }
    if facts.is_minor() {
        return AdditionalOutcome::barred(Message::LifetimeProhibitionBarredMinor);
    }

    // The article list changes the wording only; the flag follows the column.
    let text = if gate.mandatory || by_article {
        Message::LifetimeProhibitionMandatory
    } else {
        Message::LifetimeProhibitionDiscretionary
    };
    AdditionalOutcome::applies(gate.binding(facts), text)
}

pub(crate) fn prohibition_term(facts: &Facts) -> AdditionalOutcome {
    let (input, record) = (facts.input, facts.record);
    let gate = Gate::new(facts, PROHIBITION_TERM);
    let by_condition = input.special_condition.is(PROHIBITION_CONDITION);
    if !(gate.open() || by_condition) || charged_under(facts, LIFETIME_PROHIBITION_POINTS) {
        return AdditionalOutcome::default();
    }

    let mut min = if by_condition {
        1.0
    } else {
        amount_or(&record.fs1r65_02n, "fs1r65_02n", 1.0)
    };
    let mut max = amount_or(&record.fs1r65_02x, "fs1r65_02x", 10.0);
    if facts.is_minor() {
        max = 2.0;
        min = min.min(2.0);
    }

    let prefix = if gate.mandatory {
        Message::ProhibitionTermMandatory
    } else {
        Message::ProhibitionTermDiscretionary
    }
    .text();

    let mut out = AdditionalOutcome {
        applicable: true,
        mandatory: gate.binding(facts),
        min_years: min,
        ..Default::default()
    };

    let years = |n: f64, case: Case| {
        let n = n.trunc() as i64;
        format!("{n} {}", unit_word(n, TimeUnit::Year, case))
    };

    if max == 0.0 && facts.age > 17 {
        out.unlimited = true;
        out.max_years = 999.0;
        out.text = format!(
            "{prefix} от {} {}",
            years(min, Case::Genitive),
            Message::UnitUnlimited.text()
        );
    } else if min >= max {
        out.max_years = max;
        out.min_years = max;
        out.text = format!("{prefix} на {}", years(max, Case::Nominative));
    } else {
        out.max_years = max;
        out.text = format!(
            "{prefix} от {} до {}",
            years(min, Case::Genitive),
            years(max, Case::Genitive)
        );
    }
    out
}

pub(crate) fn citizenship_deprivation(facts: &Facts) -> AdditionalOutcome {
    let record = facts.record;
    let gate = Gate::new(facts, CITIZENSHIP);
    if !gate.open() {
        return AdditionalOutcome::default();
    }
    if facts.is_minor() {
        return AdditionalOutcome::barred(Message::CitizenshipBarredMinor);
    }

    // Citizens get the mandatory wording only when the deportation code is
    // also mandatory, as the legacy tables expect.
    let text = if facts.input.citizenship != CITIZEN_CODE {
        if gate.mandatory {
            Message::CitizenshipMandatoryForeigner
        } else {
            Message::CitizenshipDiscretionary
        }
    } else if record.fs1r65_o.contains(DEPORTATION) {
        Message::CitizenshipMandatoryCitizen
    } else {
        Message::CitizenshipDiscretionary
    };
    AdditionalOutcome::applies(gate.binding(facts), text)
}
