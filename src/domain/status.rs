// src/domain/status.rs
use serde_json::Value;
use std::fmt;

/// How tickets for a day are handed out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyType {
    Lottery,
    Sale,
    Unknown(String),
}

/// Whether tickets for a day can still be bought.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaleStatus {
    Sale,
    SoldOut,
    Unknown(String),
}

/// Whether the museum is open on a day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenStatus {
    Open,
    RegularHoliday,
    Unknown(String),
}

impl From<Option<&Value>> for ApplyType {
    fn from(raw: Option<&Value>) -> Self {
        match raw.and_then(Value::as_i64) {
            Some(2) => ApplyType::Lottery,
            Some(3) => ApplyType::Sale,
            _ => ApplyType::Unknown(unknown_text(raw)),
        }
    }
}

impl From<Option<&Value>> for SaleStatus {
    fn from(raw: Option<&Value>) -> Self {
        match raw.and_then(Value::as_i64) {
            Some(1) => SaleStatus::Sale,
            Some(2) => SaleStatus::SoldOut,
            _ => SaleStatus::Unknown(unknown_text(raw)),
        }
    }
}

impl From<Option<&Value>> for OpenStatus {
    fn from(raw: Option<&Value>) -> Self {
        match raw.and_then(Value::as_i64) {
            Some(1) => OpenStatus::Open,
            Some(2) => OpenStatus::RegularHoliday,
            _ => OpenStatus::Unknown(unknown_text(raw)),
        }
    }
}

// `pad` rather than `write_str` so the report can use `{:<12}`.
impl fmt::Display for ApplyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplyType::Lottery => f.pad("LOTTERY"),
            ApplyType::Sale => f.pad("SALE"),
            ApplyType::Unknown(code) => f.pad(&format!("UNKNOWN({code})")),
        }
    }
}

impl fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaleStatus::Sale => f.pad("SALE"),
            SaleStatus::SoldOut => f.pad("SOLD_OUT"),
            SaleStatus::Unknown(code) => f.pad(&format!("UNKNOWN({code})")),
        }
    }
}

impl fmt::Display for OpenStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpenStatus::Open => f.pad("OPEN"),
            OpenStatus::RegularHoliday => f.pad("REGULAR_HOLIDAY"),
            OpenStatus::Unknown(code) => f.pad(&format!("UNKNOWN({code})")),
        }
    }
}

/// What goes inside `UNKNOWN(...)`: the code as sent, strings unquoted.
fn unknown_text(raw: Option<&Value>) -> String {
    match raw {
        None | Some(Value::Null) => "None".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
