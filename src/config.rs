//! Report configuration

use crate::encoding::OutputEncoding;
use crate::error::{Error, Result};
use crate::report::FailurePolicy;
use pdfplumber::{Strategy, TableSettings};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// How table boundaries are found on a page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableStrategy {
    /// Ruling lines and rectangle sides
    #[default]
    Lattice,
    /// Ruling lines only
    LatticeStrict,
    /// Text alignment, for tables drawn without rules
    Stream,
}

impl TableStrategy {
    pub fn settings(&self) -> TableSettings {
        match self {
            TableStrategy::Lattice => TableSettings::default(),
            TableStrategy::LatticeStrict => TableSettings {
                strategy: Strategy::LatticeStrict,
                ..TableSettings::default()
            },
            TableStrategy::Stream => TableSettings {
                strategy: Strategy::Stream,
                ..TableSettings::default()
            },
        }
    }
}

impl FromStr for TableStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "lattice" | "lines" => Ok(TableStrategy::Lattice),
            "lattice-strict" | "lines-strict" => Ok(TableStrategy::LatticeStrict),
            "stream" | "text" => Ok(TableStrategy::Stream),
            other => Err(format!("unsupported table strategy: {}", other)),
        }
    }
}

impl fmt::Display for TableStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TableStrategy::Lattice => "lattice",
            TableStrategy::LatticeStrict => "lattice-strict",
            TableStrategy::Stream => "stream",
        };
        f.write_str(name)
    }
}

/// Which backend supplies page text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextEngine {
    /// The same parser that finds tables, images and rects
    #[default]
    Plumber,
    /// PDFium's text layer, grouped into lines by position
    Pdfium,
}

impl FromStr for TextEngine {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plumber" | "pdfplumber" => Ok(TextEngine::Plumber),
            "pdfium" => Ok(TextEngine::Pdfium),
            other => Err(format!("unsupported text engine: {}", other)),
        }
    }
}

impl fmt::Display for TextEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TextEngine::Plumber => "plumber",
            TextEngine::Pdfium => "pdfium",
        })
    }
}

/// Everything needed to produce one report
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// PDF to report on
    pub path: PathBuf,
    /// Password for encrypted documents
    pub password: Option<String>,
    /// Page range to report (e.g., "1-3,7"); all pages when unset
    pub pages: Option<String>,
    /// Encoding of the written report
    pub encoding: OutputEncoding,
    /// Behaviour on a page that cannot be extracted
    pub failure_policy: FailurePolicy,
    pub table_strategy: TableStrategy,
    pub text_engine: TextEngine,
}

impl ReportConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            password: None,
            pages: None,
            encoding: OutputEncoding::default(),
            failure_policy: FailurePolicy::default(),
            table_strategy: TableStrategy::default(),
            text_engine: TextEngine::default(),
        }
    }

    /// Reject configurations that cannot produce a report
    pub fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(Error::InvalidConfig {
                reason: "a PDF path is required".to_string(),
            });
        }

        if let Some(pages) = &self.pages {
            if pages.trim().is_empty() {
                return Err(Error::InvalidPageRange {
                    range: pages.clone(),
                });
            }
        }

        Ok(())
    }
}
