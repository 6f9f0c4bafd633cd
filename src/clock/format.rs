//! Fixed date/time layouts used for outcome timestamps and the `now` command.

use chrono::{DateTime, Local, TimeZone};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Layout of the date part
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DateFormat {
    /// dd/MM/yyyy
    Slashed,
    /// yyyyMMdd
    #[default]
    Compact,
    /// yyyy_MM_dd
    Underscored,
    /// MMddyyyy
    MonthFirst,
    /// MM_dd_yyyy
    MonthFirstUnderscored,
    /// ddMMyyyy
    DayFirst,
    /// dd_MM_yyyy
    DayFirstUnderscored,
}

impl DateFormat {
    fn pattern(self) -> &'static str {
        match self {
            Self::Slashed => "%d/%m/%Y",
            Self::Compact => "%Y%m%d",
            Self::Underscored => "%Y_%m_%d",
            Self::MonthFirst => "%m%d%Y",
            Self::MonthFirstUnderscored => "%m_%d_%Y",
            Self::DayFirst => "%d%m%Y",
            Self::DayFirstUnderscored => "%d_%m_%Y",
        }
    }
}

/// Layout of the time part (24-hour clock)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TimeFormat {
    /// HH:mm:ss
    Colon,
    /// HHmmss
    #[default]
    Compact,
    /// HH_mm_ss
    Underscored,
}

impl TimeFormat {
    fn pattern(self) -> &'static str {
        match self {
            Self::Colon => "%H:%M:%S",
            Self::Compact => "%H%M%S",
            Self::Underscored => "%H_%M_%S",
        }
    }

    /// Render an hour/minute/second triple in this layout
    pub fn render_hms(self, hours: u64, minutes: u64, seconds: u64) -> String {
        match self {
            Self::Colon => format!("{:02}:{:02}:{:02}", hours, minutes, seconds),
            Self::Compact => format!("{:02}{:02}{:02}", hours, minutes, seconds),
            Self::Underscored => format!("{:02}_{:02}_{:02}", hours, minutes, seconds),
        }
    }
}

/// How the date and time parts are joined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Order {
    /// "date time"
    Spaced,
    /// "datetime"
    #[default]
    Joined,
    /// "date_time"
    Underscored,
    /// "timedate"
    TimeFirst,
    /// "time_date"
    TimeFirstUnderscored,
}

/// Formatter for "now" in a chosen layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Now {
    pub date: DateFormat,
    pub time: TimeFormat,
    pub order: Order,
}

/// Layout used to stamp outcome records: `yyyy_MM_dd HH:mm:ss`
pub const RECORD_STAMP: Now = Now {
    date: DateFormat::Underscored,
    time: TimeFormat::Colon,
    order: Order::Spaced,
};

impl Now {
    pub fn new(date: DateFormat, time: TimeFormat, order: Order) -> Self {
        Self { date, time, order }
    }

    /// Current local date
    pub fn date(&self) -> String {
        self.date_at(&Local::now())
    }

    /// Current local time
    pub fn time(&self) -> String {
        self.time_at(&Local::now())
    }

    /// Current local date and time, joined per `order`
    pub fn date_time(&self) -> String {
        self.date_time_at(&Local::now())
    }

    pub fn date_at<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        at.format(self.date.pattern()).to_string()
    }

    pub fn time_at<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        at.format(self.time.pattern()).to_string()
    }

    pub fn date_time_at<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        let date = self.date_at(at);
        let time = self.time_at(at);
        match self.order {
            Order::Spaced => format!("{} {}", date, time),
            Order::Joined => format!("{}{}", date, time),
            Order::Underscored => format!("{}_{}", date, time),
            Order::TimeFirst => format!("{}{}", time, date),
            Order::TimeFirstUnderscored => format!("{}_{}", time, date),
        }
    }
}
