//! Row validation applied to raw CSV records before they reach the store.
//!
//! A row is accepted only when it has exactly the entity's arity and no
//! field is the empty string. Whitespace-only fields count as present.
//! The `parse_*` functions go one step further and coerce the numeric
//! columns of a call-log row; a coercion failure rejects the row the same
//! way a structural failure does. Only base-10 integer text is accepted:
//! `100.0` and `1e3` are rejected.

use crate::error::RowRejection;
use crate::models::{NewCallLog, NewUser};

/// Field count of a raw user row: `[userId, firstName, lastName]`.
pub const USER_ROW_ARITY: usize = 3;

/// Field count of a raw call-log row:
/// `[callId, phoneNumber, startTimeEpoch, endTimeEpoch, callDirection, userId]`.
pub const CALL_ROW_ARITY: usize = 6;

/// `true` iff `fields` is a well-formed user row.
pub fn validate_user_row<S: AsRef<str>>(fields: &[S]) -> bool {
    check_row(fields, USER_ROW_ARITY).is_ok()
}

/// `true` iff `fields` is a well-formed call-log row.
pub fn validate_call_row<S: AsRef<str>>(fields: &[S]) -> bool {
    check_row(fields, CALL_ROW_ARITY).is_ok()
}

/// Check arity first, then report the first empty field.
pub fn check_row<S: AsRef<str>>(fields: &[S], arity: usize) -> Result<(), RowRejection> {
    if fields.len() != arity {
        return Err(RowRejection::WrongArity {
            expected: arity,
            found: fields.len(),
        });
    }
    match fields.iter().position(|f| f.as_ref().is_empty()) {
        Some(index) => Err(RowRejection::EmptyField { index }),
        None => Ok(()),
    }
}

/// Validate a user row and build the insert draft. The source id column is
/// discarded.
pub fn parse_user_row<S: AsRef<str>>(fields: &[S]) -> Result<NewUser, RowRejection> {
    check_row(fields, USER_ROW_ARITY)?;
    Ok(NewUser {
        first_name: fields[1].as_ref().to_string(),
        last_name: fields[2].as_ref().to_string(),
    })
}

/// Validate a call-log row and coerce its integer columns.
pub fn parse_call_row<S: AsRef<str>>(fields: &[S]) -> Result<NewCallLog, RowRejection> {
    check_row(fields, CALL_ROW_ARITY)?;
    Ok(NewCallLog {
        source_call_id: fields[0].as_ref().to_string(),
        phone_number: fields[1].as_ref().to_string(),
        start_time_epoch: parse_integer("startTimeEpoch", fields[2].as_ref())?,
        end_time_epoch: parse_integer("endTimeEpoch", fields[3].as_ref())?,
        call_direction: fields[4].as_ref().to_string(),
        user_id: parse_integer("userId", fields[5].as_ref())?,
    })
}

fn parse_integer(column: &'static str, raw: &str) -> Result<i64, RowRejection> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| RowRejection::NotNumeric {
            column,
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── validate_user_row ─────────────────────────────────────────────────────

    #[test]
    fn test_validate_user_row_accepts_complete_row() {
        assert!(validate_user_row(&["1", "Ann", "Lee"]));
    }

    #[test]
    fn test_validate_user_row_rejects_empty_field() {
        assert!(!validate_user_row(&["1", "Ann", ""]));
        assert!(!validate_user_row(&["", "Ann", "Lee"]));
    }

    #[test]
    fn test_validate_user_row_rejects_wrong_arity() {
        assert!(!validate_user_row(&["1", "Ann"]));
        assert!(!validate_user_row(&["1", "Ann", "Lee", "extra"]));
        assert!(!validate_user_row::<&str>(&[]));
    }

    #[test]
    fn test_validate_user_row_whitespace_is_not_empty() {
        assert!(validate_user_row(&["1", " ", "Lee"]));
    }

    #[test]
    fn test_validate_accepts_owned_strings() {
        let fields = vec!["1".to_string(), "Bo".to_string(), "Ng".to_string()];
        assert!(validate_user_row(&fields));
    }

    // ── validate_call_row ─────────────────────────────────────────────────────

    #[test]
    fn test_validate_call_row_accepts_complete_row() {
        assert!(validate_call_row(&["9", "555", "100", "140", "in", "1"]));
    }

    #[test]
    fn test_validate_call_row_rejects_any_empty_field() {
        let full = ["9", "555", "100", "140", "in", "1"];
        for i in 0..full.len() {
            let mut row = full;
            row[i] = "";
            assert!(!validate_call_row(&row), "empty field {i} must be rejected");
        }
    }

    #[test]
    fn test_validate_call_row_rejects_wrong_arity() {
        assert!(!validate_call_row(&["9", "555", "100", "140", "in"]));
    }

    // ── check_row ─────────────────────────────────────────────────────────────

    #[test]
    fn test_check_row_reports_arity_before_empty_fields() {
        let err = check_row(&["", ""], 3).unwrap_err();
        assert_eq!(
            err,
            RowRejection::WrongArity {
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_check_row_reports_first_empty_index() {
        let err = check_row(&["a", "", ""], 3).unwrap_err();
        assert_eq!(err, RowRejection::EmptyField { index: 1 });
    }

    // ── parse_user_row ────────────────────────────────────────────────────────

    #[test]
    fn test_parse_user_row_discards_source_id() {
        let user = parse_user_row(&["42", "Ann", "Lee"]).unwrap();
        assert_eq!(user.first_name, "Ann");
        assert_eq!(user.last_name, "Lee");
    }

    // ── parse_call_row ────────────────────────────────────────────────────────

    #[test]
    fn test_parse_call_row_coerces_integers() {
        let call = parse_call_row(&["7", "555-0100", "100", " 140 ", "out", "2"]).unwrap();
        assert_eq!(call.source_call_id, "7");
        assert_eq!(call.phone_number, "555-0100");
        assert_eq!(call.start_time_epoch, 100);
        assert_eq!(call.end_time_epoch, 140);
        assert_eq!(call.call_direction, "out");
        assert_eq!(call.user_id, 2);
    }

    #[test]
    fn test_parse_call_row_rejects_non_numeric_epoch() {
        let err = parse_call_row(&["7", "555", "noon", "140", "in", "1"]).unwrap_err();
        assert_eq!(
            err,
            RowRejection::NotNumeric {
                column: "startTimeEpoch",
                value: "noon".to_string()
            }
        );
    }

    #[test]
    fn test_parse_call_row_rejects_non_numeric_user_id() {
        let err = parse_call_row(&["7", "555", "100", "140", "in", "u1"]).unwrap_err();
        assert!(matches!(
            err,
            RowRejection::NotNumeric {
                column: "userId",
                ..
            }
        ));
    }

    #[test]
    fn test_parse_call_row_rejects_decimal_and_exponent_forms() {
        for raw in ["100.0", "1e3", "0x10", "+-1"] {
            let err = parse_call_row(&["7", "555", raw, "140", "in", "1"]).unwrap_err();
            assert_eq!(
                err,
                RowRejection::NotNumeric {
                    column: "startTimeEpoch",
                    value: raw.to_string()
                },
                "{raw} must be rejected"
            );
        }
        assert!(parse_call_row(&["7", "555", "100", "140", "in", "1.0"]).is_err());
    }

    #[test]
    fn test_parse_call_row_accepts_negative_epochs() {
        let call = parse_call_row(&["7", "555", "-10", "-5", "in", "1"]).unwrap();
        assert_eq!(call.start_time_epoch, -10);
        assert_eq!(call.end_time_epoch, -5);
    }
}
