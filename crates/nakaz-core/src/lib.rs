//! Legacy sentencing rules: article records, calendar math, the rule
//! engine and its result table.

pub mod article;
pub mod calendar;
pub mod codes;
pub mod engine;
mod error;
pub mod input;
pub mod intake;
pub mod messages;
pub mod record;
pub mod response;
pub mod service;
pub mod table;

pub use article::{ArticleInfo, ParsedArticle, parse_article};
pub use codes::CodeSet;
pub use engine::{Sentence, calculate};
pub use error::IntakeError;
pub use input::{CrimeStage, EngineInput, Gender};
pub use intake::{CalculateRequest, normalize};
pub use record::ArticleRecord;
pub use response::{CalculationResponse, StructuredResponse};
pub use service::{EffectiveRecord, ReferenceLookup};
pub use table::{Cell, ResultTable};
