//! Today's date in the viewer's local calendar.

use time::Date;

/// Local calendar date. Native builds use UTC.
pub fn today() -> Date {
    #[cfg(feature = "csr")]
    {
        let now = js_sys::Date::new_0();
        let month = u8::try_from(now.get_month() + 1).ok().and_then(|m| time::Month::try_from(m).ok());
        let day = u8::try_from(now.get_date()).ok();
        let year = i32::try_from(now.get_full_year()).ok();
        match (year, month, day) {
            (Some(year), Some(month), Some(day)) => {
                Date::from_calendar_date(year, month, day).unwrap_or_else(|_| utc_today())
            }
            _ => utc_today(),
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        utc_today()
    }
}

fn utc_today() -> Date {
    time::OffsetDateTime::now_utc().date()
}
