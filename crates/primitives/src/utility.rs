use crate::error::ApiError;

const COUNTRY_PREFIX: &str = "254";
const SUBSCRIBER_LEN: usize = 9;

/// Normalises a Kenyan mobile number to `254XXXXXXXXX`.
pub fn normalize_phone_number(input: &str) -> Result<String, ApiError> {
    let digits: String = input
        .trim()
        .trim_start_matches('+')
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid(input));
    }

    let subscriber = if let Some(rest) = digits.strip_prefix(COUNTRY_PREFIX) {
        rest
    } else if let Some(rest) = digits.strip_prefix('0') {
        rest
    } else {
        digits.as_str()
    };

    if subscriber.len() != SUBSCRIBER_LEN || !subscriber.starts_with(['7', '1']) {
        return Err(invalid(input));
    }

    Ok(format!("{}{}", COUNTRY_PREFIX, subscriber))
}

fn invalid(input: &str) -> ApiError {
    tracing::debug!(phone_number = %input, "Rejected phone number");
    ApiError::BadRequest("Invalid phone number".into())
}
