//! Search input: the JSON body accepted at the HTTP boundary and the validated
//! query the pipeline runs on.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use thiserror::Error;

use crate::hotels::CertificationLevel;

/// Validation failures for a search request. All map to a client error.
#[derive(Debug, Error, PartialEq)]
pub enum QueryError {
    #[error("destination must be non-empty")]
    EmptyDestination,

    #[error("{field} is not an ISO-8601 date: '{value}'")]
    InvalidDate { field: &'static str, value: String },

    #[error("checkIn {check_in} is before {earliest}")]
    CheckInInPast {
        check_in: NaiveDate,
        earliest: NaiveDate,
    },

    #[error("checkOut {check_out} must be after checkIn {check_in}")]
    InvertedDates {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    #[error("unknown certification level '{0}'")]
    UnknownCertification(String),

    #[error("invalid price range [{min}, {max}]")]
    InvalidPriceRange { min: f64, max: f64 },
}

/// Inclusive nightly price bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    min: f64,
    max: f64,
}

impl PriceRange {
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidPriceRange`] if either bound is NaN or
    /// `min > max`.
    pub fn new(min: f64, max: f64) -> Result<Self, QueryError> {
        if min.is_nan() || max.is_nan() || min > max {
            return Err(QueryError::InvalidPriceRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// `[0, +inf)`, the range applied when the caller supplies none.
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            min: 0.0,
            max: f64::INFINITY,
        }
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.min <= 0.0 && self.max == f64::INFINITY
    }

    /// A listing without a known price is admitted only by an unbounded range.
    #[must_use]
    pub fn admits(&self, price: Option<f64>) -> bool {
        match price {
            Some(p) => self.min <= p && p <= self.max,
            None => self.is_unbounded(),
        }
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// User-selected predicates, combined with logical AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Empty means no certification filtering.
    pub certifications: HashSet<CertificationLevel>,
    pub price_range: PriceRange,
    /// Requested amenity tags; see the filter engine for how hotels without
    /// amenity data are treated.
    pub amenities: Vec<String>,
}

/// A validated search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub destination: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub filters: FilterCriteria,
}

/// Raw JSON body of a search request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub destination: String,
    pub check_in: String,
    pub check_out: String,
    #[serde(default)]
    pub certifications: Option<Vec<String>>,
    #[serde(default)]
    pub price_range: Option<[f64; 2]>,
    #[serde(default)]
    pub amenities: Option<Vec<String>>,
}

impl SearchRequest {
    /// Validates the request against `today` (UTC) and converts it into a
    /// [`SearchQuery`].
    ///
    /// A check-in one day before `today` is accepted: callers west of UTC
    /// are still on that date.
    ///
    /// # Errors
    ///
    /// Returns the first [`QueryError`] found: empty destination, unparseable
    /// dates, a check-in more than a day before `today`, a check-out not after
    /// check-in, an unknown certification label, or an invalid price range.
    pub fn into_query(self, today: NaiveDate) -> Result<SearchQuery, QueryError> {
        let destination = self.destination.trim().to_string();
        if destination.is_empty() {
            return Err(QueryError::EmptyDestination);
        }

        let check_in = parse_date("checkIn", &self.check_in)?;
        let check_out = parse_date("checkOut", &self.check_out)?;
        let earliest = today.pred_opt().unwrap_or(today);
        if check_in < earliest {
            return Err(QueryError::CheckInInPast {
                check_in,
                earliest,
            });
        }
        if check_out <= check_in {
            return Err(QueryError::InvertedDates {
                check_in,
                check_out,
            });
        }

        let certifications = self
            .certifications
            .unwrap_or_default()
            .iter()
            .map(|label| {
                label
                    .parse::<CertificationLevel>()
                    .map_err(|_| QueryError::UnknownCertification(label.clone()))
            })
            .collect::<Result<HashSet<_>, _>>()?;

        let price_range = match self.price_range {
            Some([min, max]) => PriceRange::new(min, max)?,
            None => PriceRange::unbounded(),
        };

        let amenities = self
            .amenities
            .unwrap_or_default()
            .into_iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();

        Ok(SearchQuery {
            destination,
            check_in,
            check_out,
            filters: FilterCriteria {
                certifications,
                price_range,
                amenities,
            },
        })
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp, keeping only the date.
fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, QueryError> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.date_naive()))
        .map_err(|_| QueryError::InvalidDate {
            field,
            value: value.to_string(),
        })
}
