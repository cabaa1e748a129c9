//! Per-punishment outcomes and the assembled sentence.

use crate::calendar::Term;
use crate::messages::Message;

/// Reason codes reported in the "why not applicable" and override columns.
pub mod reason {
    pub const FINE_NOT_PROVIDED: u32 = 6379;
    pub const FINE_BARRED_MINOR: u32 = 6176;
    pub const CORRECTIVE_WORK_BARRED: u32 = 6177;
    pub const MANDATORY_WORK_BARRED_PERSON: u32 = 6026;
    pub const MANDATORY_WORK_BARRED_SERVICE: u32 = 6030;
    pub const ARREST_BARRED_PERSON: u32 = 6027;
    pub const ARREST_BARRED_MINOR: u32 = 6031;
    pub const DEATH_BARRED_PERSON: u32 = 6029;
    pub const DEATH_BARRED_MITIGATION: u32 = 6172;
    /// Preparation or attempt; shared by death penalty and imprisonment.
    pub const UNFINISHED_CRIME: u32 = 6173;
    pub const RESTRICTION_NOT_PROVIDED: u32 = 6380;
    pub const LIFE_TERM_AGREEMENT: u32 = 6174;
    pub const LIFE_TERM_MITIGATION: u32 = 6175;
    pub const LIFE_TERM_PERSON: u32 = 6028;
    pub const IMPRISONMENT_BARRED_ALTERNATIVES: u32 = 6170;
    pub const IMPRISONMENT_BARRED_MINOR: u32 = 6171;
}

/// Result for one main punishment.
#[derive(Debug, Clone, PartialEq)]
pub struct PunishmentOutcome {
    pub applicable: bool,
    pub min: f64,
    pub max: f64,
    pub text: String,
    /// Decomposed minimum; terms only.
    pub min_term: Term,
    /// Decomposed maximum; terms only.
    pub max_term: Term,
    /// Why the punishment is not applicable.
    pub reason: Option<u32>,
    /// Why the life-term alternative was dropped or imprisonment blocked.
    pub override_reason: Option<u32>,
    /// Accumulated discount grounds; set on the imprisonment row only.
    pub discount_mask: u32,
}

impl PunishmentOutcome {
    /// Not applicable, with the "not provided" placeholder text.
    pub fn not_provided() -> Self {
        Self::barred(Message::NotProvided)
    }

    pub(crate) fn barred(message: Message) -> Self {
        Self {
            applicable: false,
            min: 0.0,
            max: 0.0,
            text: message.text().to_string(),
            min_term: Term::default(),
            max_term: Term::default(),
            reason: None,
            override_reason: None,
            discount_mask: 0,
        }
    }

    pub(crate) fn with_reason(mut self, code: u32) -> Self {
        self.reason = Some(code);
        self
    }
}

/// Result for one additional punishment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdditionalOutcome {
    pub applicable: bool,
    pub mandatory: bool,
    pub text: String,
    /// Term-limited prohibition only.
    pub min_years: f64,
    /// Term-limited prohibition only; 999 when unlimited.
    pub max_years: f64,
    /// Term-limited prohibition with no configured maximum.
    pub unlimited: bool,
}

impl AdditionalOutcome {
    pub(crate) fn barred(message: Message) -> Self {
        Self {
            text: message.text().to_string(),
            ..Default::default()
        }
    }

    pub(crate) fn applies(mandatory: bool, message: Message) -> Self {
        Self {
            applicable: true,
            mandatory,
            text: message.text().to_string(),
            ..Default::default()
        }
    }
}

/// Misdemeanor status and criminal liability.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiabilityOutcome {
    pub misdemeanor: bool,
    pub no_criminal_liability: bool,
    /// Why there is no criminal liability.
    pub reason: Option<Message>,
}

impl LiabilityOutcome {
    pub fn reason_text(&self) -> &'static str {
        self.reason.map(Message::text).unwrap_or("")
    }
}

/// Every punishment computed for one fact pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct Sentence {
    /// False when no in-force sanction record was found; every other field
    /// then holds its empty value.
    pub reference_found: bool,
    pub fine: PunishmentOutcome,
    pub corrective_work: PunishmentOutcome,
    pub mandatory_work: PunishmentOutcome,
    pub restriction_of_freedom: PunishmentOutcome,
    pub arrest: PunishmentOutcome,
    pub imprisonment: PunishmentOutcome,
    pub death_penalty: PunishmentOutcome,
    pub confiscation: AdditionalOutcome,
    pub deportation: AdditionalOutcome,
    pub lifetime_prohibition: AdditionalOutcome,
    pub prohibition_term: AdditionalOutcome,
    pub citizenship_deprivation: AdditionalOutcome,
    pub liability: LiabilityOutcome,
}

impl Sentence {
    /// The sentence reported when the article has no in-force record.
    pub fn not_found() -> Self {
        Self {
            reference_found: false,
            fine: PunishmentOutcome::not_provided(),
            corrective_work: PunishmentOutcome::not_provided(),
            mandatory_work: PunishmentOutcome::not_provided(),
            restriction_of_freedom: PunishmentOutcome::not_provided(),
            arrest: PunishmentOutcome::not_provided(),
            imprisonment: PunishmentOutcome::not_provided(),
            death_penalty: PunishmentOutcome::not_provided(),
            confiscation: AdditionalOutcome::default(),
            deportation: AdditionalOutcome::default(),
            lifetime_prohibition: AdditionalOutcome::default(),
            prohibition_term: AdditionalOutcome::default(),
            citizenship_deprivation: AdditionalOutcome::default(),
            liability: LiabilityOutcome::default(),
        }
    }

    /// Main punishments in table row order.
    pub fn main_rows(&self) -> [&PunishmentOutcome; 7] {
        [
            &self.fine,
            &self.corrective_work,
            &self.mandatory_work,
            &self.restriction_of_freedom,
            &self.arrest,
            &self.imprisonment,
            &self.death_penalty,
        ]
    }

    /// Additional punishments in table row order.
    pub fn additional_rows(&self) -> [&AdditionalOutcome; 5] {
        [
            &self.confiscation,
            &self.deportation,
            &self.lifetime_prohibition,
            &self.prohibition_term,
            &self.citizenship_deprivation,
        ]
    }
}
