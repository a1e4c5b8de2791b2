/// Converts an unsigned counter to the signed column type, saturating at `i64::MAX`.
pub fn to_db_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
