//! Range and term texts.

use crate::calendar::Term;
use crate::messages::{Case, TimeUnit, format_number, unit_word};

/// "от MIN до MAX UNIT", "до MAX UNIT" when the minimum is zero, or
/// "MAX UNIT" when both bounds coincide.
pub fn format_range(min: f64, max: f64, unit: &str) -> String {
    if min != max {
        let prefix = if min > 0.0 {
            format!("от {} ", format_number(min))
        } else {
            String::new()
        };
        format!("{prefix}до {} {unit}", format_number(max))
            .trim()
            .to_string()
    } else {
        format!("{} {unit}", format_number(max)).trim().to_string()
    }
}

/// "2 года 6 месяцев 3 дня"; zero components are omitted.
pub fn format_term(term: Term, case: Case) -> String {
    let parts = [
        (term.years, TimeUnit::Year),
        (term.months, TimeUnit::Month),
        (term.days, TimeUnit::Day),
    ];
    parts
        .iter()
        .filter(|(n, _)| *n > 0)
        .map(|(n, unit)| format!("{n} {}", unit_word(*n, *unit, case)))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_with_minimum() {
        assert_eq!(format_range(200.0, 5000.0, "МРП"), "от 200 до 5000 МРП");
    }

    #[test]
    fn range_without_minimum() {
        assert_eq!(format_range(0.0, 120.0, "час."), "до 120 час.");
    }

    #[test]
    fn exact_amount() {
        assert_eq!(format_range(100.0, 100.0, "МРП"), "100 МРП");
    }

    #[test]
    fn fractional_amounts() {
        assert_eq!(format_range(200.0, 333.33, "МРП"), "от 200 до 333,33 МРП");
    }

    #[test]
    fn term_components() {
        let term = Term {
            years: 2,
            months: 6,
            days: 3,
        };
        assert_eq!(format_term(term, Case::Nominative), "2 года 6 месяцев 3 дня");
        assert_eq!(format_term(term, Case::Genitive), "2 лет 6 месяцев 3 дней");
    }

    #[test]
    fn term_skips_zero_parts() {
        let term = Term {
            years: 1,
            months: 0,
            days: 0,
        };
        assert_eq!(format_term(term, Case::Genitive), "1 года");
        assert_eq!(format_term(Term::default(), Case::Genitive), "");
    }
}
