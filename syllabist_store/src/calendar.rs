//! `calendar`：围绕一个 UTC 时间点的最小日期运算（加减天数、区间判断）。
use chrono::{DateTime, Duration, Utc};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    date: DateTime<Utc>,
}

impl Calendar {
    pub fn new(date: DateTime<Utc>) -> Self {
        Self { date }
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn add(&self, days: i64) -> DateTime<Utc> {
        self.date + Duration::days(days)
    }

    pub fn subtract(&self, days: i64) -> DateTime<Utc> {
        self.date - Duration::days(days)
    }

    /// 严格位于 `(after, before)` 之间，两端都不含。
    pub fn between(&self, after: DateTime<Utc>, before: DateTime<Utc>) -> bool {
        self.date > after && self.date < before
    }

    /// 只给一端时做单边比较；两端都给等同 `between`；都不给是错误。
    pub fn is(&self, after: Option<DateTime<Utc>>, before: Option<DateTime<Utc>>) -> Result<bool> {
        match (after, before) {
            (Some(after), Some(before)) => Ok(self.between(after, before)),
            (Some(after), None) => Ok(self.date > after),
            (None, Some(before)) => Ok(self.date < before),
            (None, None) => Err(Error::InvalidRange("empty before and after".to_string())),
        }
    }
}
