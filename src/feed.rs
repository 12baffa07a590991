//! [Tibber](https://developer.tibber.com) `priceInfo` documents.
//!
//! Fetching is up to the caller: this module only converts an already received document.

use chrono::DateTime;
use serde::Deserialize;

use crate::{
    core::{
        analysis::Quotes,
        point::PricePoint,
        price_level::{PriceLevel, UnknownPriceLevel},
        series::Series,
    },
    prelude::*,
    quantity::price::KilowattHourPrice,
};

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("failed to parse the price info document")]
    Json(#[from] serde_json::Error),

    #[error("the first home has no current subscription")]
    NoSubscription,

    #[error(transparent)]
    MalformedRecord(#[from] MalformedFeedRecord),
}

/// A quote which cannot be converted. Fails the whole document.
#[derive(Debug, PartialEq, thiserror::Error)]
#[error("malformed `{period}` record #{index}: {defect}")]
pub struct MalformedFeedRecord {
    pub period: &'static str,
    pub index: usize,
    pub defect: Defect,
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum Defect {
    #[error("missing `{0}`")]
    MissingField(&'static str),

    #[error(transparent)]
    UnknownLevel(#[from] UnknownPriceLevel),

    #[error("invalid timestamp `{0}`")]
    InvalidTimestamp(String),

    #[error("invalid price {0}")]
    InvalidPrice(f64),
}

/// Parse either the full GraphQL response or the bare `priceInfo` object.
#[instrument(skip_all, fields(len = json.len()))]
pub fn parse(json: &str) -> Result<Quotes, FeedError> {
    let price_info = match serde_json::from_str::<Document>(json)? {
        Document::Response(response) => response
            .data
            .viewer
            .homes
            .into_iter()
            .next()
            .and_then(|home| home.current_subscription)
            .ok_or(FeedError::NoSubscription)?
            .price_info,
        Document::PriceInfo(price_info) => price_info,
    };
    let quotes = price_info.try_into_quotes()?;
    info!(
        has_current = quotes.current.is_some(),
        n_today = quotes.today.len(),
        n_tomorrow = quotes.tomorrow.len(),
        "parsed"
    );
    Ok(quotes)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    Response(Response),
    PriceInfo(PriceInfo),
}

#[derive(Deserialize)]
struct Response {
    data: Data,
}

#[derive(Deserialize)]
struct Data {
    viewer: Viewer,
}

#[derive(Deserialize)]
struct Viewer {
    homes: Vec<Home>,
}

#[derive(Deserialize)]
struct Home {
    #[serde(rename = "currentSubscription")]
    current_subscription: Option<Subscription>,
}

#[derive(Deserialize)]
struct Subscription {
    #[serde(rename = "priceInfo")]
    price_info: PriceInfo,
}

#[derive(Deserialize)]
struct PriceInfo {
    #[serde(default)]
    current: Option<RawQuote>,

    #[serde(default)]
    today: Vec<RawQuote>,

    #[serde(default)]
    tomorrow: Vec<RawQuote>,
}

#[derive(Deserialize)]
struct RawQuote {
    /// Total price including taxes.
    total: Option<f64>,

    #[serde(rename = "startsAt")]
    starts_at: Option<String>,

    level: Option<String>,
}

impl RawQuote {
    fn try_level(&self) -> Result<PriceLevel, Defect> {
        Ok(self.level.as_deref().ok_or(Defect::MissingField("level"))?.parse::<PriceLevel>()?)
    }

    fn try_price(&self) -> Result<KilowattHourPrice, Defect> {
        let total = self.total.ok_or(Defect::MissingField("total"))?;
        if total.is_finite() && total >= 0.0 {
            Ok(KilowattHourPrice(total))
        } else {
            Err(Defect::InvalidPrice(total))
        }
    }

    /// Convert the current quote, which has no meaningful start time.
    fn try_into_current(self) -> Result<PricePoint, Defect> {
        Ok(PricePoint::new(self.try_level()?, None, self.try_price()?))
    }

    fn try_into_slot(self) -> Result<PricePoint, Defect> {
        let starts_at = self.starts_at.as_deref().ok_or(Defect::MissingField("startsAt"))?;
        let starts_at = DateTime::parse_from_rfc3339(starts_at)
            .map_err(|_| Defect::InvalidTimestamp(starts_at.to_owned()))?;
        Ok(PricePoint::new(self.try_level()?, Some(starts_at), self.try_price()?))
    }
}

impl PriceInfo {
    fn try_into_quotes(self) -> Result<Quotes, MalformedFeedRecord> {
        let current = self
            .current
            .map(|quote| {
                quote
                    .try_into_current()
                    .map_err(|defect| MalformedFeedRecord { period: "current", index: 0, defect })
            })
            .transpose()?;
        Ok(Quotes {
            current,
            today: try_convert_series("today", self.today)?,
            tomorrow: try_convert_series("tomorrow", self.tomorrow)?,
        })
    }
}

fn try_convert_series(
    period: &'static str,
    quotes: Vec<RawQuote>,
) -> Result<Series, MalformedFeedRecord> {
    let series = quotes
        .into_iter()
        .enumerate()
        .map(|(index, quote)| {
            quote.try_into_slot().map_err(|defect| MalformedFeedRecord { period, index, defect })
        })
        .collect::<Result<Series, _>>()?;
    if !series.is_sorted_by_key(|point| point.starts_at) {
        warn!(period, "the quotes are not in chronological order");
    }
    Ok(series)
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};

    use super::*;

    const RESPONSE: &str = r#"{
        "data": {
            "viewer": {
                "homes": [
                    {
                        "currentSubscription": {
                            "priceInfo": {
                                "current": {"total": 0.2451, "currency": "EUR", "level": "NORMAL"},
                                "today": [
                                    {"total": 0.2451, "startsAt": "2024-05-01T00:00:00.000+02:00", "level": "NORMAL"},
                                    {"total": 0.2212, "startsAt": "2024-05-01T01:00:00.000+02:00", "level": "CHEAP"},
                                    {"total": 0.3105, "startsAt": "2024-05-01T02:00:00.000+02:00", "level": "EXPENSIVE"}
                                ],
                                "tomorrow": []
                            }
                        }
                    }
                ]
            }
        }
    }"#;

    #[test]
    fn test_parse_response() -> Result<(), FeedError> {
        let quotes = parse(RESPONSE)?;
        let current = quotes.current.unwrap();
        assert_eq!(current.price, KilowattHourPrice(0.2451));
        assert_eq!(current.level, PriceLevel::Normal);
        assert_eq!(current.starts_at, None);

        assert_eq!(quotes.today.len(), 3);
        assert_eq!(quotes.today[1].level, PriceLevel::Cheap);
        assert_eq!(
            quotes.today[2].starts_at,
            Some(
                FixedOffset::east_opt(7200).unwrap().with_ymd_and_hms(2024, 5, 1, 2, 0, 0).unwrap()
            ),
        );
        assert!(quotes.tomorrow.is_empty());
        Ok(())
    }

    #[test]
    fn test_parse_bare_price_info() -> Result<(), FeedError> {
        let quotes = parse(
            r#"{"today": [{"total": 0.1, "startsAt": "2024-05-01T00:00:00+02:00", "level": "very_cheap"}]}"#,
        )?;
        assert!(quotes.current.is_none());
        assert_eq!(quotes.today[0].level, PriceLevel::VeryCheap);
        assert!(quotes.tomorrow.is_empty());
        Ok(())
    }

    #[test]
    fn test_parse_no_subscription() {
        let result = parse(r#"{"data": {"viewer": {"homes": [{"currentSubscription": null}]}}}"#);
        assert!(matches!(result, Err(FeedError::NoSubscription)));
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(parse("[1, 2, 3]"), Err(FeedError::Json(_))));
    }

    fn malformed(json: &str) -> MalformedFeedRecord {
        match parse(json) {
            Err(FeedError::MalformedRecord(record)) => record,
            Err(error) => panic!("unexpected error: {error:#}"),
            Ok(_) => panic!("the document should be rejected"),
        }
    }

    #[test]
    fn test_unknown_level() {
        let record = malformed(
            r#"{"today": [
                {"total": 0.1, "startsAt": "2024-05-01T00:00:00+02:00", "level": "NORMAL"},
                {"total": 0.1, "startsAt": "2024-05-01T01:00:00+02:00", "level": "DIRT_CHEAP"}
            ]}"#,
        );
        assert_eq!(record.period, "today");
        assert_eq!(record.index, 1);
        assert_eq!(record.defect, Defect::UnknownLevel(UnknownPriceLevel("DIRT_CHEAP".to_owned())));
    }

    #[test]
    fn test_missing_fields() {
        let record = malformed(r#"{"tomorrow": [{"total": 0.1, "level": "NORMAL"}]}"#);
        assert_eq!(record.period, "tomorrow");
        assert_eq!(record.defect, Defect::MissingField("startsAt"));

        let record = malformed(r#"{"current": {"level": "NORMAL"}}"#);
        assert_eq!(record.period, "current");
        assert_eq!(record.defect, Defect::MissingField("total"));

        let record =
            malformed(r#"{"today": [{"total": 0.1, "startsAt": "2024-05-01T00:00:00+02:00"}]}"#);
        assert_eq!(record.defect, Defect::MissingField("level"));
    }

    #[test]
    fn test_invalid_timestamp_and_price() {
        let record =
            malformed(r#"{"today": [{"total": 0.1, "startsAt": "yesterday", "level": "NORMAL"}]}"#);
        assert_eq!(record.defect, Defect::InvalidTimestamp("yesterday".to_owned()));

        let record = malformed(
            r#"{"today": [{"total": -0.01, "startsAt": "2024-05-01T00:00:00+02:00", "level": "NORMAL"}]}"#,
        );
        assert_eq!(record.defect, Defect::InvalidPrice(-0.01));
    }
}
