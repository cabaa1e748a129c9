//! Per-article sanction records from the legacy reference table.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::codes::CodeSet;

/// Severity class value marking a misdemeanor in the `prest` column.
pub const MISDEMEANOR_MARKER: &str = "2";

/// Sanctions for one article code as of one amendment date.
///
/// Numeric bounds are kept as the raw column text; the engine parses them
/// with legacy leniency (`"200xN"` reads as 200) and substitutes per-field
/// defaults when a value is absent. Field names follow the reference columns:
/// `fs1r64_*` are main punishments, `fs1r65_*` additional ones, and the
/// two-digit infix is the punishment code (`05` fine, `06` corrective work,
/// `09` mandatory work, `12` arrest, `11` restriction of freedom, `01`
/// imprisonment; `02` term-limited prohibition for additional punishments).
/// A trailing `n`/`x` is the minimum/maximum bound.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// Packed 7-digit article code (`p2` column).
    pub article_code: String,
    /// Decoded caption (`stat` column).
    pub stat: String,
    /// Severity class, "1" (lowest) to "4".
    pub hard: String,
    /// Misdemeanor flag; see [`MISDEMEANOR_MARKER`].
    pub prest: String,
    /// Main punishment codes provided by the sanction.
    pub fs1r64: CodeSet,
    /// Main punishment codes available only under special condition "02".
    pub fs1r64_nn: CodeSet,
    pub fs1r64_05n: String,
    pub fs1r64_05x: String,
    pub fs1r64_06n: String,
    pub fs1r64_06x: String,
    pub fs1r64_09n: String,
    pub fs1r64_09x: String,
    pub fs1r64_12n: String,
    pub fs1r64_12x: String,
    pub fs1r64_11n: String,
    pub fs1r64_11x: String,
    pub fs1r64_01n: String,
    pub fs1r64_01x: String,
    /// Mandatory additional punishment codes.
    pub fs1r65_o: CodeSet,
    /// Discretionary additional punishment codes.
    pub fs1r65_n: CodeSet,
    pub fs1r65_02n: String,
    pub fs1r65_02x: String,
    /// Article parts for which imprisonment of minors is allowed; "ALL" for every part.
    pub fl1u: String,
    /// Amendment date; `None` means the record has always been in force.
    pub d_izm: Option<NaiveDate>,
}

impl ArticleRecord {
    pub fn is_misdemeanor(&self) -> bool {
        self.prest == MISDEMEANOR_MARKER
    }

    /// Effective date used for in-force resolution; undated records sort first.
    pub fn effective_date(&self) -> NaiveDate {
        self.d_izm.unwrap_or(NaiveDate::MIN)
    }

    /// Severity class is one of `classes` (compared as raw text).
    pub fn hard_in(&self, classes: &[&str]) -> bool {
        classes.contains(&self.hard.as_str())
    }
}
