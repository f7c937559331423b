use chrono::NaiveDate;

pub fn get_str(params: &serde_json::Value, key: &str) -> Option<String> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

pub fn opt_str(params: &serde_json::Value, key: &str) -> String {
    get_str(params, key).unwrap_or_default()
}

pub fn opt_bool(params: &serde_json::Value, key: &str, default: bool) -> bool {
    params
        .get(key)
        .and_then(|v| v.as_bool())
        .unwrap_or(default)
}

pub fn opt_u32(params: &serde_json::Value, key: &str, default: u32) -> u32 {
    params
        .get(key)
        .and_then(|v| v.as_u64())
        .map(|v| v as u32)
        .unwrap_or(default)
}

/// A missing key or non-array reads as empty; non-string elements are
/// skipped rather than rejected.
pub fn str_list(params: &serde_json::Value, key: &str) -> Vec<String> {
    params
        .get(key)
        .and_then(|v| v.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(|s| s.to_string()))
                .collect()
        })
        .unwrap_or_default()
}

/// Optional ISO date param. Absent or null means "use today"; anything
/// else must parse as YYYY-MM-DD.
pub fn opt_date(params: &serde_json::Value, key: &str) -> Result<Option<NaiveDate>, String> {
    let Some(v) = params.get(key) else {
        return Ok(None);
    };
    if v.is_null() {
        return Ok(None);
    }
    let Some(s) = v.as_str() else {
        return Err(format!("{} must be a string", key));
    };
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map(Some)
        .map_err(|_| format!("{} must be YYYY-MM-DD", key))
}
