use std::str::FromStr;
use time::{Date, Duration, Month, OffsetDateTime, PrimitiveDateTime, UtcOffset};
use tracing::warn;

/// Time zone the campaign's price schedule is published in.
///
/// Parsed from settings as `central_european` or a whole-hour offset such
/// as `+2`, `0` or `-5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CampaignTimezone {
    /// UTC+1, or UTC+2 while European summer time is in effect.
    #[default]
    CentralEuropean,
    /// A fixed offset from UTC in whole hours.
    Fixed(i8),
}

impl CampaignTimezone {
    /// The UTC offset in effect at `now`.
    pub fn offset_at(&self, now: OffsetDateTime) -> UtcOffset {
        let hours = match self {
            CampaignTimezone::CentralEuropean if is_european_summer_time(now) => 2,
            CampaignTimezone::CentralEuropean => 1,
            CampaignTimezone::Fixed(hours) => *hours,
        };
        UtcOffset::from_hms(hours, 0, 0).unwrap_or_else(|e| {
            warn!("Campaign offset of {} hours is out of range ({}), using UTC", hours, e);
            UtcOffset::UTC
        })
    }
}

impl FromStr for CampaignTimezone {
    type Err = rtw_error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("central_european") {
            return Ok(CampaignTimezone::CentralEuropean);
        }
        let invalid = || rtw_error::Error::InvalidArgument(format!("unknown campaign timezone: {s}"));
        let hours = s.parse::<i8>().map_err(|_| invalid())?;
        UtcOffset::from_hms(hours, 0, 0).map_err(|_| invalid())?;
        Ok(CampaignTimezone::Fixed(hours))
    }
}

/// The campaign-local calendar date of an instant. This is the default
/// reference date for tier resolution.
pub fn campaign_date(now: OffsetDateTime, timezone: CampaignTimezone) -> Date {
    now.to_offset(timezone.offset_at(now)).date()
}

/// Summer time runs from 01:00 UTC on the last Sunday of March until
/// 01:00 UTC on the last Sunday of October.
fn is_european_summer_time(now: OffsetDateTime) -> bool {
    let now = now.to_offset(UtcOffset::UTC);
    let year = now.year();
    let switch_over = |month| {
        last_sunday(year, month)
            .and_then(|day| day.with_hms(1, 0, 0).ok())
            .map(PrimitiveDateTime::assume_utc)
    };
    match (switch_over(Month::March), switch_over(Month::October)) {
        (Some(start), Some(end)) => start <= now && now < end,
        _ => false,
    }
}

fn last_sunday(year: i32, month: Month) -> Option<Date> {
    let last_day = time::util::days_in_year_month(year, month);
    let date = Date::from_calendar_date(year, month, last_day).ok()?;
    let back = i64::from(date.weekday().number_days_from_sunday());
    date.checked_sub(Duration::days(back))
}
