//! National holiday lookup with a static fallback.
//!
//! Holidays are fetched per calendar year from a public API and held in a
//! transient in-memory cache; they are never persisted and never partitioned
//! by user. A failed fetch degrades to a fixed list of Brazil's fixed-date
//! national holidays instead of surfacing an error (availability over
//! freshness).

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date_key::DateKey;
use crate::error::{DaymarkError, DaymarkResult};

/// Holidays-by-year endpoint; the year is appended as a path segment.
pub const DEFAULT_HOLIDAY_ENDPOINT: &str = "https://brasilapi.com.br/api/feriados/v1";

/// Fixed-date national holidays used when the fetch fails. Movable feasts
/// (Carnaval, Corpus Christi) cannot live in a static table and are simply
/// absent in fallback mode.
const FALLBACK_HOLIDAYS: &[(u32, u32, &str)] = &[
    (1, 1, "Confraternização mundial"),
    (4, 21, "Tiradentes"),
    (5, 1, "Dia do trabalho"),
    (9, 7, "Independência do Brasil"),
    (10, 12, "Nossa Senhora Aparecida"),
    (11, 2, "Finados"),
    (11, 15, "Proclamação da República"),
    (12, 25, "Natal"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HolidayKind {
    National,
    Optional,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: HolidayKind,
}

/// In-memory date → holiday map, rebuilt per calendar year on demand.
pub struct HolidayCache {
    http: reqwest::Client,
    base_url: String,
    by_date: BTreeMap<NaiveDate, Holiday>,
}

impl Default for HolidayCache {
    fn default() -> Self {
        HolidayCache::new()
    }
}

impl HolidayCache {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_HOLIDAY_ENDPOINT)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        HolidayCache {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            by_date: BTreeMap::new(),
        }
    }

    /// Fetch the holidays for `year`, replacing the entire cache with the
    /// result. On any fetch failure the static fallback list (with the year
    /// substituted) is used instead; this never returns an error.
    pub async fn load_for_year(&mut self, year: i32) -> Vec<Holiday> {
        let holidays = match self.fetch_year(year).await {
            Ok(holidays) => holidays,
            Err(err) => {
                log::warn!("holiday fetch for {year} failed, using fallback data: {err}");
                fallback_for_year(year)
            }
        };

        self.by_date = holidays
            .iter()
            .map(|holiday| (holiday.date, holiday.clone()))
            .collect();
        holidays
    }

    async fn fetch_year(&self, year: i32) -> DaymarkResult<Vec<Holiday>> {
        let url = format!("{}/{}", self.base_url, year);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| DaymarkError::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DaymarkError::Fetch(format!(
                "{} returned {}",
                url,
                response.status()
            )));
        }

        response
            .json::<Vec<Holiday>>()
            .await
            .map_err(|e| DaymarkError::Fetch(e.to_string()))
    }

    pub fn for_date(&self, date: DateKey) -> Option<&Holiday> {
        self.by_date.get(&date.date())
    }

    pub fn for_month(&self, year: i32, month: u32) -> Vec<&Holiday> {
        self.by_date
            .values()
            .filter(|holiday| DateKey::new(holiday.date).in_month(year, month))
            .collect()
    }

    pub fn is_holiday(&self, date: DateKey) -> bool {
        self.by_date.contains_key(&date.date())
    }
}

/// The static fallback list with every date's year set to `year`.
pub fn fallback_for_year(year: i32) -> Vec<Holiday> {
    FALLBACK_HOLIDAYS
        .iter()
        .filter_map(|(month, day, name)| {
            NaiveDate::from_ymd_opt(year, *month, *day).map(|date| Holiday {
                date,
                name: (*name).to_string(),
                kind: HolidayKind::National,
            })
        })
        .collect()
}
