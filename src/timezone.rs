use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::Error;

/// Get the current UTC offset for a canonical timezone name, e.g. "Pacific/Auckland".
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// Like [get_local_offset], but fails with [Error::InvalidTimezoneError] for unknown names.
pub fn local_offset(canonical_timezone: &str) -> Result<UtcOffset, Error> {
    get_local_offset(canonical_timezone)
        .ok_or_else(|| Error::InvalidTimezoneError(canonical_timezone.to_owned()))
}
