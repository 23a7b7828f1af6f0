use chrono::{DateTime, Utc};
use chrono_tz::Tz;

pub const TIMEZONE: Tz = chrono_tz::America::Argentina::Buenos_Aires;

/// `YYYY/MM/DD HH:mm:ss`, day of month, 24-hour clock.
pub const DATE_TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Current wall-clock time in Buenos Aires
pub fn now_in_buenos_aires() -> DateTime<Tz> {
    Utc::now().with_timezone(&TIMEZONE)
}

pub fn format_date_time(moment: &DateTime<Tz>) -> String {
    moment.format(DATE_TIME_FORMAT).to_string()
}

/// Current Buenos Aires date and time, e.g. `2024/03/05 14:07:09`.
pub fn get_date_time() -> String {
    format_date_time(&now_in_buenos_aires())
}
