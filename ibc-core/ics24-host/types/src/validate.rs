use crate::error::IdentifierError as Error;
use crate::identifiers::{ChannelId, ConnectionId};

const VALID_SPECIAL_CHARS: &str = "._+-#[]<>";

/// Checks that the identifier is made of alphanumeric characters and the
/// separators allowed by ICS-24 only.
pub fn validate_identifier_chars(id: &str) -> Result<(), Error> {
    if id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || VALID_SPECIAL_CHARS.contains(c))
    {
        Ok(())
    } else {
        Err(Error::InvalidCharacter { id: id.into() })
    }
}

/// Checks that the identifier length falls in `[min, max]`. Empty
/// identifiers are always rejected.
pub fn validate_identifier_length(id: &str, min: u64, max: u64) -> Result<(), Error> {
    let min = min.max(1);
    let length = id.len() as u64;
    if (min..=max).contains(&length) {
        Ok(())
    } else {
        Err(Error::InvalidLength {
            id: id.into(),
            min,
            max,
        })
    }
}

/// Checks the length of a prefix so that `{prefix}-{counter}` stays within
/// `[min_id_length, max_id_length]` for every `u64` counter.
pub fn validate_prefix_length(
    prefix: &str,
    min_id_length: u64,
    max_id_length: u64,
) -> Result<(), Error> {
    // "-0" is the shortest suffix, "-18446744073709551615" the longest
    let min = min_id_length.saturating_sub(2);
    let max = max_id_length.saturating_sub(21);

    validate_identifier_length(prefix, min, max)
}

/// Checks that the identifier has the shape `{name}-{u64}` without leading
/// zeros, e.g. `connection-12`.
pub fn validate_named_u64_index(id: &str, name: &str) -> Result<(), Error> {
    let invalid = || Error::InvalidPrefix { prefix: id.into() };

    let number = id
        .strip_prefix(name)
        .and_then(|rest| rest.strip_prefix('-'))
        .ok_or_else(invalid)?;

    if number.len() > 1 && number.starts_with('0') {
        return Err(invalid());
    }

    number.parse::<u64>().map(|_| ()).map_err(|_| invalid())
}

pub fn validate_client_type(id: &str) -> Result<(), Error> {
    validate_identifier_chars(id)?;
    validate_prefix_length(id, 9, 64)
}

/// A client identifier is 9 to 64 characters long.
pub fn validate_client_identifier(id: &str) -> Result<(), Error> {
    validate_identifier_chars(id)?;
    validate_identifier_length(id, 9, 64)
}

/// A connection identifier is 10 to 64 characters long and shaped like
/// `connection-{n}`.
pub fn validate_connection_identifier(id: &str) -> Result<(), Error> {
    validate_identifier_chars(id)?;
    validate_identifier_length(id, 10, 64)?;
    validate_named_u64_index(id, ConnectionId::prefix())
}

/// A port identifier is 2 to 128 characters long.
pub fn validate_port_identifier(id: &str) -> Result<(), Error> {
    validate_identifier_chars(id)?;
    validate_identifier_length(id, 2, 128)
}

/// A channel identifier is 8 to 64 characters long and shaped like
/// `channel-{n}`.
pub fn validate_channel_identifier(id: &str) -> Result<(), Error> {
    validate_identifier_chars(id)?;
    validate_identifier_length(id, 8, 64)?;
    validate_named_u64_index(id, ChannelId::prefix())
}
