//! Russian message catalog and numeral declension for sentence texts.

/// Fixed texts placed into result rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    NotProvided,

    FineBarredMinor,
    CorrectiveWorkBarred,
    CorrectiveWorkBarredMinor,
    MandatoryWorkBarred,
    ArrestBarred,

    DeathBarredPerson,
    DeathBarredMitigating,
    DeathBarredStage,
    DeathPenalty,

    LifeImprisonmentAlternative,
    ImprisonmentBarredAlternatives,
    ImprisonmentBarredMinor,

    UnitMrp,
    UnitPercent,
    UnitTenge,
    UnitHours,
    UnitDays,
    UnitUnlimited,

    ConfiscationMandatory,
    ConfiscationDiscretionary,
    ConfiscationBarredMinor,
    DeportationMandatoryCitizen,
    DeportationMandatoryForeigner,
    DeportationDiscretionary,
    DeportationBarredMinor,
    LifetimeProhibitionMandatory,
    LifetimeProhibitionDiscretionary,
    LifetimeProhibitionBarredMinor,
    ProhibitionTermMandatory,
    ProhibitionTermDiscretionary,
    CitizenshipMandatoryForeigner,
    CitizenshipMandatoryCitizen,
    CitizenshipDiscretionary,
    CitizenshipBarredMinor,

    UnderAgeOfLiability,
    UnderSixteenForArticle,
    PreparationNotPunishable,
    AttemptNotPunishable,
}

impl Message {
    pub fn text(self) -> &'static str {
        match self {
            Self::NotProvided => "не предусмотрено",

            Self::FineBarredMinor => "штраф несовершеннолетнему не назначается",
            Self::CorrectiveWorkBarred => "исправительные работы не назначаются",
            Self::CorrectiveWorkBarredMinor => {
                "исправительные работы несовершеннолетнему не назначаются"
            }
            Self::MandatoryWorkBarred => "общественные работы не назначаются",
            Self::ArrestBarred => "арест не назначается",

            Self::DeathBarredPerson => {
                "смертная казнь не назначается несовершеннолетним, женщинам и лицам старше 62 лет"
            }
            Self::DeathBarredMitigating => {
                "смертная казнь не назначается при смягчающих и отсутствии отягчающих обстоятельств"
            }
            Self::DeathBarredStage => "смертная казнь не назначается за приготовление и покушение",
            Self::DeathPenalty => "смертная казнь",

            Self::LifeImprisonmentAlternative => "или пожизненное лишение свободы",
            Self::ImprisonmentBarredAlternatives => {
                "лишение свободы не назначается, применяется более мягкий вид наказания"
            }
            Self::ImprisonmentBarredMinor => "лишение свободы несовершеннолетнему не назначается",

            Self::UnitMrp => "МРП",
            Self::UnitPercent => "% от суммы",
            Self::UnitTenge => "тенге",
            Self::UnitHours => "час.",
            Self::UnitDays => "сут.",
            Self::UnitUnlimited => "без ограничения верхнего предела",

            Self::ConfiscationMandatory => "конфискация имущества (обязательно)",
            Self::ConfiscationDiscretionary => "конфискация имущества (на усмотрение суда)",
            Self::ConfiscationBarredMinor => {
                "конфискация имущества несовершеннолетнему не назначается"
            }
            Self::DeportationMandatoryCitizen => {
                "выдворение за пределы страны (обязательно), к гражданам не применяется"
            }
            Self::DeportationMandatoryForeigner => {
                "выдворение иностранца или лица без гражданства за пределы страны (обязательно)"
            }
            Self::DeportationDiscretionary => {
                "выдворение иностранца или лица без гражданства за пределы страны (на усмотрение суда)"
            }
            Self::DeportationBarredMinor => "выдворение несовершеннолетнему не назначается",
            Self::LifetimeProhibitionMandatory => {
                "пожизненное лишение права занимать определенную должность или заниматься определенной деятельностью (обязательно)"
            }
            Self::LifetimeProhibitionDiscretionary => {
                "пожизненное лишение права занимать определенную должность или заниматься определенной деятельностью (на усмотрение суда)"
            }
            Self::LifetimeProhibitionBarredMinor => {
                "пожизненное лишение права несовершеннолетнему не назначается"
            }
            Self::ProhibitionTermMandatory => {
                "лишение права занимать определенную должность или заниматься определенной деятельностью (обязательно)"
            }
            Self::ProhibitionTermDiscretionary => {
                "лишение права занимать определенную должность или заниматься определенной деятельностью (на усмотрение суда)"
            }
            Self::CitizenshipMandatoryForeigner => {
                "лишение гражданства (обязательно), к лицам без гражданства страны не применяется"
            }
            Self::CitizenshipMandatoryCitizen => "лишение гражданства (обязательно)",
            Self::CitizenshipDiscretionary => "лишение гражданства (на усмотрение суда)",
            Self::CitizenshipBarredMinor => {
                "лишение гражданства несовершеннолетнему не назначается"
            }

            Self::UnderAgeOfLiability => {
                "лицо не достигло четырнадцатилетнего возраста, уголовной ответственности не подлежит"
            }
            Self::UnderSixteenForArticle => {
                "лицо не достигло шестнадцатилетнего возраста, по данной статье уголовной ответственности не подлежит"
            }
            Self::PreparationNotPunishable => {
                "приготовление к уголовному правонарушению данной категории не влечет уголовной ответственности"
            }
            Self::AttemptNotPunishable => {
                "покушение на уголовное правонарушение данной категории не влечет уголовной ответственности"
            }
        }
    }
}

/// Calendar unit of a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Day,
    Month,
    Year,
}

/// Grammatical case a numeral phrase is declined into.
///
/// Exact terms read in the nominative ("2 года"), bounds of a range in the
/// genitive ("от 2 лет до 5 лет").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Nominative,
    Genitive,
}

/// Noun form of `unit` agreeing with the numeral `n`.
pub fn unit_word(n: i64, unit: TimeUnit, case: Case) -> &'static str {
    let n = n.unsigned_abs();
    let last_two = n % 100;
    let last = n % 10;
    let teen = (11..=14).contains(&last_two);

    // Index: 0 = singular form, 1 = paucal (2-4), 2 = plural.
    let form = if teen {
        2
    } else if last == 1 {
        0
    } else if (2..=4).contains(&last) {
        1
    } else {
        2
    };

    match (unit, case, form) {
        (TimeUnit::Year, Case::Nominative, 0) => "год",
        (TimeUnit::Year, Case::Nominative, 1) => "года",
        (TimeUnit::Year, Case::Nominative, _) => "лет",
        (TimeUnit::Year, Case::Genitive, 0) => "года",
        (TimeUnit::Year, Case::Genitive, _) => "лет",

        (TimeUnit::Month, Case::Nominative, 0) => "месяц",
        (TimeUnit::Month, Case::Nominative, 1) => "месяца",
        (TimeUnit::Month, Case::Nominative, _) => "месяцев",
        (TimeUnit::Month, Case::Genitive, 0) => "месяца",
        (TimeUnit::Month, Case::Genitive, _) => "месяцев",

        (TimeUnit::Day, Case::Nominative, 0) => "день",
        (TimeUnit::Day, Case::Nominative, 1) => "дня",
        (TimeUnit::Day, Case::Nominative, _) => "дней",
        (TimeUnit::Day, Case::Genitive, 0) => "дня",
        (TimeUnit::Day, Case::Genitive, _) => "дней",
    }
}

/// Render an amount the way sentence texts show it: whole values without a
/// fraction, others with up to two decimals and a decimal comma.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        return format!("{}", value as i64);
    }
    let fixed = format!("{value:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    trimmed.replace('.', ",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn years_nominative() {
        assert_eq!(unit_word(1, TimeUnit::Year, Case::Nominative), "год");
        assert_eq!(unit_word(3, TimeUnit::Year, Case::Nominative), "года");
        assert_eq!(unit_word(5, TimeUnit::Year, Case::Nominative), "лет");
        assert_eq!(unit_word(11, TimeUnit::Year, Case::Nominative), "лет");
        assert_eq!(unit_word(21, TimeUnit::Year, Case::Nominative), "год");
        assert_eq!(unit_word(22, TimeUnit::Year, Case::Nominative), "года");
    }

    #[test]
    fn years_genitive() {
        assert_eq!(unit_word(1, TimeUnit::Year, Case::Genitive), "года");
        assert_eq!(unit_word(2, TimeUnit::Year, Case::Genitive), "лет");
        assert_eq!(unit_word(12, TimeUnit::Year, Case::Genitive), "лет");
        assert_eq!(unit_word(21, TimeUnit::Year, Case::Genitive), "года");
    }

    #[test]
    fn months_and_days() {
        assert_eq!(unit_word(6, TimeUnit::Month, Case::Genitive), "месяцев");
        assert_eq!(unit_word(2, TimeUnit::Month, Case::Nominative), "месяца");
        assert_eq!(unit_word(1, TimeUnit::Day, Case::Nominative), "день");
        assert_eq!(unit_word(14, TimeUnit::Day, Case::Genitive), "дней");
    }

    #[test]
    fn number_formatting() {
        assert_eq!(format_number(200.0), "200");
        assert_eq!(format_number(12.5), "12,5");
        assert_eq!(format_number(66.66), "66,66");
        assert_eq!(format_number(0.0), "0");
    }
}
