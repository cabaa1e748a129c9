//! Vertical card display for calculation results, article summaries and
//! reference status.

use std::fmt::{self, Write};

use nakaz_core::response::{AdditionalItem, PunishmentItem};
use nakaz_core::{ArticleInfo, CalculationResponse};
use nakaz_store::ReferenceStatus;

// ── Public API ──

pub fn print_calculation_card(code: &str, response: &CalculationResponse) -> anyhow::Result<()> {
    print!("{}", render_calculation(code, response)?);
    Ok(())
}

pub fn print_article_card(info: &ArticleInfo) -> anyhow::Result<()> {
    print!("{}", render_article(info)?);
    Ok(())
}

pub fn print_status(status: &ReferenceStatus) -> anyhow::Result<()> {
    print!("{}", render_status(status)?);
    Ok(())
}

// ── Rendering ──

fn render_calculation(code: &str, response: &CalculationResponse) -> Result<String, fmt::Error> {
    let structured = &response.structured;
    let mut out = String::new();

    writeln!(out, "=== {code} ===")?;
    if !structured.meta.reference_found {
        writeln!(out, "article not found in reference ({})", structured.meta.reason)?;
        return Ok(out);
    }
    writeln!(out)?;

    let p = &structured.punishments;
    let main = [
        ("fine", &p.fine),
        ("corrective_work", &p.corrective_work),
        ("mandatory_work", &p.mandatory_work),
        ("restriction_of_freedom", &p.restriction_of_freedom),
        ("arrest", &p.arrest),
        ("imprisonment", &p.imprisonment),
    ];
    writeln!(out, "Punishments")?;
    for (label, item) in main {
        if let Some(item) = item {
            punishment_line(&mut out, label, item)?;
        }
    }
    writeln!(out)?;

    let a = &structured.additional_punishments;
    let additional = [
        ("confiscation", &a.confiscation),
        ("deportation", &a.deportation),
        ("lifetime_prohibition", &a.lifetime_prohibition),
        ("prohibition_term", &a.prohibition_term),
        ("deprivation_of_citizenship", &a.deprivation_of_citizenship),
    ];
    writeln!(out, "Additional Punishments")?;
    for (label, item) in additional {
        if let Some(item) = item {
            additional_line(&mut out, label, item)?;
        }
    }
    writeln!(out)?;

    let meta = &structured.meta;
    writeln!(out, "Liability")?;
    field(&mut out, "misdemeanor", yes_no(meta.is_misdemeanor.unwrap_or(false)))?;
    let no_liability = meta.no_criminal_liability.unwrap_or(false);
    field(&mut out, "no_criminal_liability", yes_no(no_liability))?;
    if no_liability {
        field(&mut out, "reason", &meta.reason)?;
    }
    Ok(out)
}

fn punishment_line(out: &mut impl Write, label: &str, item: &PunishmentItem) -> fmt::Result {
    let mark = if item.is_applicable { "+" } else { "-" };
    writeln!(out, "  {mark} {label:<24} {}", item.formatted_text)
}

fn additional_line(out: &mut impl Write, label: &str, item: &AdditionalItem) -> fmt::Result {
    let mark = match (item.is_applicable, item.is_mandatory) {
        (true, true) => "!",
        (true, false) => "+",
        _ => "-",
    };
    writeln!(out, "  {mark} {label:<24} {}", item.formatted_text)
}

fn render_article(info: &ArticleInfo) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "=== {} ===", info.code)?;
    writeln!(out, "{}", info.name)?;
    writeln!(out)?;

    writeln!(out, "Classification")?;
    field(&mut out, "severity", &format!("{:?}", info.severity))?;
    field(&mut out, "excluded", yes_no(info.is_excluded))?;
    writeln!(out)?;

    writeln!(out, "Imprisonment (years)")?;
    field(&mut out, "min", &info.imprisonment_min.to_string())?;
    field(&mut out, "max", &info.imprisonment_max.to_string())?;
    writeln!(out)?;

    writeln!(out, "Dates")?;
    let date = |d: Option<chrono::NaiveDate>| d.map_or_else(|| "-".to_string(), |d| d.to_string());
    field(&mut out, "effective_from", &date(info.effective_from))?;
    field(&mut out, "effective_to", &date(info.effective_to))?;
    Ok(out)
}

fn render_status(status: &ReferenceStatus) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "Reference")?;
    field(&mut out, "source", &status.source)?;
    field(&mut out, "count", &status.count.to_string())?;
    field(&mut out, "file_path", &status.file_path)?;
    Ok(out)
}

fn field(out: &mut impl Write, name: &str, value: &str) -> fmt::Result {
    writeln!(out, "  {name:<26} {value}")
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
