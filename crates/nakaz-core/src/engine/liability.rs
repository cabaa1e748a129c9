//! Misdemeanor status and grounds for no criminal liability.

use crate::input::CrimeStage;
use crate::messages::Message;

use super::Facts;
use super::outcome::LiabilityOutcome;

/// Articles (by five-digit prefix) where preparation and attempt stay
/// punishable regardless of severity class.
const STAGE_RULE_EXEMPT: &[&str] = &[
    "17000", "17100", "17300", "17700", "17800", "18400", "25500", "25600", "25700", "25800",
    "25900", "26000", "26100", "26900", "27000",
];

/// Articles for which liability starts at fourteen.
const FOURTEEN_ARTICLES: &[&str] = &[
    "09900", "10600", "12000", "12100", "12500", "17300", "17400", "17700", "17800", "18400",
    "19200", "25500", "25600", "25800", "26100", "26900", "27300", "29100", "29400", "29800",
    "35000",
];

/// Article parts for which liability starts at fourteen.
const FOURTEEN_ARTICLE_PARTS: &[&str] = &[
    "1070002", "1880002", "1880003", "1880004", "1910002", "1910003", "1910004", "1940002",
    "1940003", "1940004", "2000002", "2000003", "2000004", "2020002", "2020003", "2570001",
    "2570002", "2930002", "2930003", "3140002",
];

pub(crate) fn assess(facts: &Facts) -> LiabilityOutcome {
    let (input, record) = (facts.input, facts.record);
    let prefix = input.article_prefix();

    let mut out = LiabilityOutcome {
        misdemeanor: record.is_misdemeanor(),
        ..Default::default()
    };

    if !STAGE_RULE_EXEMPT.contains(&prefix) {
        match input.crime_stage {
            CrimeStage::Preparation if !record.hard_in(&["3", "4"]) => {
                out.no_criminal_liability = true;
                out.reason = Some(Message::PreparationNotPunishable);
            }
            CrimeStage::Attempt if !record.hard_in(&["2", "3", "4"]) => {
                out.no_criminal_liability = true;
                out.reason = Some(Message::AttemptNotPunishable);
            }
            _ => {}
        }
    }

    // Age grounds take precedence over stage grounds.
    if facts.age < 14 {
        out.no_criminal_liability = true;
        out.reason = Some(Message::UnderAgeOfLiability);
    } else if facts.age < 16
        && !FOURTEEN_ARTICLES.contains(&prefix)
        && !FOURTEEN_ARTICLE_PARTS.contains(&input.article_code.as_str())
    {
        out.no_criminal_liability = true;
        out.reason = Some(Message::UnderSixteenForArticle);
    }

    out
}
