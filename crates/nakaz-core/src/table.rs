//! The fixed 15×13 result table (`aNakaz`).
//!
//! Downstream consumers index this table by position, so its shape and
//! cell types are a wire contract:
//!
//! | rows  | content                                                         |
//! |-------|-----------------------------------------------------------------|
//! | 0–6   | fine, corrective work, mandatory work, restriction of freedom,  |
//! |       | arrest, imprisonment, death penalty                             |
//! | 7–11  | confiscation, deportation, lifetime prohibition, term-limited   |
//! |       | prohibition, deprivation of citizenship                         |
//! | 12–13 | reserved                                                        |
//! | 14    | misdemeanor flag, no-liability flag, reason text                |
//!
//! Main rows: `[0]` applicable, `[1]`/`[2]` min/max, `[3]` text, `[4..=6]`
//! and `[7..=9]` min/max as years, months, days, `[10]` reason code, `[11]`
//! discount mask, `[12]` override reason. Cells that a rule never writes keep
//! the integer zero they start with.

use serde::{Serialize, Serializer};

use crate::calendar::Term;
use crate::engine::{AdditionalOutcome, PunishmentOutcome, Sentence};

pub const ROWS: usize = 15;
pub const COLS: usize = 13;

pub const ROW_FINE: usize = 0;
pub const ROW_CORRECTIVE_WORK: usize = 1;
pub const ROW_MANDATORY_WORK: usize = 2;
pub const ROW_RESTRICTION_OF_FREEDOM: usize = 3;
pub const ROW_ARREST: usize = 4;
pub const ROW_IMPRISONMENT: usize = 5;
pub const ROW_DEATH_PENALTY: usize = 6;
pub const ROW_CONFISCATION: usize = 7;
pub const ROW_DEPORTATION: usize = 8;
pub const ROW_LIFETIME_PROHIBITION: usize = 9;
pub const ROW_PROHIBITION_TERM: usize = 10;
pub const ROW_CITIZENSHIP: usize = 11;
pub const ROW_META: usize = 14;

/// One table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Bool(bool),
    /// Whole values are written as JSON integers.
    Num(f64),
    Text(String),
}

impl Cell {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Cell::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_num(&self) -> Option<f64> {
        match self {
            Cell::Num(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Bool cells as-is, numeric cells as non-zero.
    pub fn truthy(&self) -> bool {
        match self {
            Cell::Bool(b) => *b,
            Cell::Num(n) => *n != 0.0,
            Cell::Text(s) => !s.is_empty(),
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Num(0.0)
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Bool(b) => serializer.serialize_bool(*b),
            Cell::Num(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => {
                serializer.serialize_i64(*n as i64)
            }
            Cell::Num(n) => serializer.serialize_f64(*n),
            Cell::Text(s) => serializer.serialize_str(s),
        }
    }
}

pub type Row = [Cell; COLS];

/// `aNakaz`: fifteen rows of thirteen cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResultTable {
    rows: [Row; ROWS],
}

fn blank_row() -> Row {
    let mut row: Row = std::array::from_fn(|_| Cell::default());
    row[0] = Cell::Bool(false);
    row[3] = Cell::Text(String::new());
    row
}

fn main_row(out: &PunishmentOutcome) -> Row {
    let mut row = blank_row();
    row[0] = Cell::Bool(out.applicable);
    row[1] = Cell::Num(out.min);
    row[2] = Cell::Num(out.max);
    row[3] = Cell::Text(out.text.clone());
    put_term(&mut row, 4, out.min_term);
    put_term(&mut row, 7, out.max_term);
    row[10] = Cell::Num(out.reason.unwrap_or(0).into());
    row[11] = Cell::Num(out.discount_mask.into());
    row[12] = Cell::Num(out.override_reason.unwrap_or(0).into());
    row
}

fn put_term(row: &mut Row, at: usize, term: Term) {
    row[at] = Cell::Num(term.years as f64);
    row[at + 1] = Cell::Num(term.months as f64);
    row[at + 2] = Cell::Num(term.days as f64);
}

fn additional_row(out: &AdditionalOutcome, with_term: bool) -> Row {
    let mut row = blank_row();
    row[0] = Cell::Bool(out.applicable);
    row[3] = Cell::Text(out.text.clone());
    if out.applicable {
        row[1] = Cell::Bool(out.mandatory);
        if with_term {
            if out.unlimited {
                row[2] = Cell::Bool(true);
            }
            row[4] = Cell::Num(out.min_years);
            row[5] = Cell::Num(out.max_years);
        }
    }
    row
}

impl ResultTable {
    /// All-zero table; main rows empty.
    pub fn blank() -> Self {
        Self {
            rows: std::array::from_fn(|_| blank_row()),
        }
    }

    pub fn from_sentence(sentence: &Sentence) -> Self {
        let mut table = Self::blank();

        for (i, out) in sentence.main_rows().into_iter().enumerate() {
            table.rows[ROW_FINE + i] = main_row(out);
        }
        for (i, out) in sentence.additional_rows().into_iter().enumerate() {
            let with_term = ROW_CONFISCATION + i == ROW_PROHIBITION_TERM;
            table.rows[ROW_CONFISCATION + i] = additional_row(out, with_term);
        }

        if sentence.reference_found {
            let meta = &mut table.rows[ROW_META];
            let liability = &sentence.liability;
            meta[0] = Cell::Bool(liability.misdemeanor);
            if liability.no_criminal_liability {
                meta[1] = Cell::Bool(true);
                meta[3] = Cell::Text(liability.reason_text().to_string());
            }
        }

        table
    }

    pub fn row(&self, index: usize) -> &Row {
        &self.rows[index]
    }

    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        &self.rows[row][col]
    }

    pub fn rows(&self) -> &[Row; ROWS] {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;
    use crate::engine::calculate;
    use crate::input::EngineInput;
    use crate::messages::Message;
    use crate::record::ArticleRecord;

    fn sentence() -> Sentence {
        let day = NaiveDate::from_ymd_opt(2025, 9, 12).unwrap();
        let input = EngineInput {
            birth_date: NaiveDate::from_ymd_opt(1980, 1, 1),
            ..EngineInput::new("1880002", day, day)
        };
        let record = ArticleRecord {
            hard: "2".into(),
            fs1r64: "0511".into(),
            fs1r64_05x: "2000".into(),
            fs1r64_11n: "1".into(),
            fs1r64_11x: "2".into(),
            fs1r65_n: "02".into(),
            ..Default::default()
        };
        calculate(&input, &record)
    }

    #[test]
    fn shape_is_fixed() {
        let value = serde_json::to_value(ResultTable::from_sentence(&sentence())).unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), ROWS);
        assert!(rows.iter().all(|r| r.as_array().unwrap().len() == COLS));
    }

    #[test]
    fn main_row_cells() {
        let table = ResultTable::from_sentence(&sentence());
        let value = serde_json::to_value(table.row(ROW_FINE)).unwrap();
        assert_eq!(
            value,
            json!([true, 200, 2000, "от 200 до 2000 МРП", 0, 0, 0, 0, 0, 0, 0, 0, 0])
        );

        let restriction = table.row(ROW_RESTRICTION_OF_FREEDOM);
        assert_eq!(restriction[3], Cell::Text("от 1 года до 2 лет".into()));
        assert_eq!(restriction[4], Cell::Num(1.0));
        assert_eq!(restriction[7], Cell::Num(2.0));

        assert_eq!(table.cell(ROW_ARREST, 0), &Cell::Bool(false));
        assert_eq!(
            table.cell(ROW_ARREST, 3).as_text(),
            Some(Message::NotProvided.text())
        );
    }

    #[test]
    fn fractional_cells_stay_floats() {
        let value = serde_json::to_value(Cell::Num(166.66)).unwrap();
        assert_eq!(value, json!(166.66));
        assert_eq!(serde_json::to_value(Cell::Num(12.0)).unwrap(), json!(12));
    }

    #[test]
    fn prohibition_term_row_carries_years() {
        let table = ResultTable::from_sentence(&sentence());
        let row = serde_json::to_value(table.row(ROW_PROHIBITION_TERM)).unwrap();
        assert_eq!(row[0], json!(true));
        assert_eq!(row[1], json!(false));
        assert_eq!(row[2], json!(0));
        assert_eq!(row[4], json!(1));
        assert_eq!(row[5], json!(10));

        let confiscation = serde_json::to_value(table.row(ROW_CONFISCATION)).unwrap();
        assert_eq!(confiscation[1], json!(0));
    }

    #[test]
    fn not_found_table() {
        let table = ResultTable::from_sentence(&Sentence::not_found());
        for row in ROW_FINE..=ROW_DEATH_PENALTY {
            assert_eq!(table.cell(row, 3).as_text(), Some(Message::NotProvided.text()));
            assert!(!table.cell(row, 0).truthy());
        }
        assert_eq!(table.cell(ROW_META, 0), &Cell::Bool(false));
        assert_eq!(table.cell(ROW_META, 3).as_text(), Some(""));
    }
}
