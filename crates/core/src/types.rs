use serde::{Deserialize, Deserializer};

/// All primary keys are SQLite `INTEGER PRIMARY KEY` rowids.
pub type DbId = i64;

/// Format used for every stored calendar date (`YYYY-MM-DD`, zero-padded).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Today's UTC date in [`DATE_FORMAT`].
pub fn today_iso() -> String {
    chrono::Utc::now().date_naive().format(DATE_FORMAT).to_string()
}

/// Deserialize a patch field where an explicit `null` differs from an
/// absent key. Use with `#[serde(default, deserialize_with = "nullable")]`:
/// absent gives `None` (keep), `null` gives `Some(None)` (clear).
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
