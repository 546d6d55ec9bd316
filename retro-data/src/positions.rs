//! Translating the wire representations of [`Position`] (numeric codes in
//! player JSON, free-text strings in the eligibility CSV) into the domain
//! type.

use std::collections::HashSet;

use retro_core::Position;

use crate::error::LoadError;

/// `1=DEF 2=MID 3=RUC 4=FWD`, per the player data contract.
pub fn position_from_code(code: i64, path: &str) -> Result<Position, LoadError> {
    match code {
        1 => Ok(Position::Def),
        2 => Ok(Position::Mid),
        3 => Ok(Position::Ruc),
        4 => Ok(Position::Fwd),
        other => Err(LoadError::UnknownPositionCode {
            path: path.to_string(),
            code: other,
        }),
    }
}

pub fn positions_from_codes(codes: &[i64], path: &str) -> Result<HashSet<Position>, LoadError> {
    codes.iter().map(|&c| position_from_code(c, path)).collect()
}

/// Parses a free-text position, as found in the eligibility-update CSV.
/// Case-insensitive; accepts `RUCK` as an alias for `RUC`.
pub fn parse_position_str(value: &str, path: &str) -> Result<Position, LoadError> {
    let mut normalized = value.trim().to_uppercase();
    if normalized == "RUCK" {
        normalized = "RUC".to_string();
    }
    match normalized.as_str() {
        "DEF" => Ok(Position::Def),
        "MID" => Ok(Position::Mid),
        "RUC" => Ok(Position::Ruc),
        "FWD" => Ok(Position::Fwd),
        _ => Err(LoadError::UnknownPositionString {
            path: path.to_string(),
            value: value.to_string(),
        }),
    }
}
