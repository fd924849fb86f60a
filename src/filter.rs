//! Listing filter as received from callers, and its validated, typed form.
//!
//! Validation happens entirely before any SQL is built: a filter either turns
//! into a [`ValidatedFilter`] made of closed [`Predicate`] variants, or the
//! request is rejected with [`ListError::Validation`].
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::Listing;
use crate::error::ListError;
use crate::model::UncategorizedView;
use crate::pagination::PageRequest;

/// Filter options accepted by the uncategorized transactions listing.
///
/// Every field is optional; an absent field imposes no predicate. Presence,
/// not truthiness, decides: `minAmount: 0` is a real lower bound.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UncategorizedFilter {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub match_description: Option<String>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
    pub view: Option<String>,
}

/// One optional, conjunctive condition on uncategorized transactions.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `date` on or after the start of this day.
    FromDate(NaiveDate),
    /// `date` on or before the end of this day.
    ToDate(NaiveDate),
    MinAmount(f64),
    MaxAmount(f64),
    DescriptionContains {
        needle: String,
        ignore_case: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedFilter {
    pub page: PageRequest,
    pub view: UncategorizedView,
    pub predicates: Vec<Predicate>,
}

impl UncategorizedFilter {
    pub fn validate(&self, listing: &Listing) -> Result<ValidatedFilter, ListError> {
        let page_size = self.page_size.unwrap_or(listing.default_page_size);
        if page_size > listing.max_page_size {
            return Err(ListError::Validation(format!(
                "pageSize must not exceed {}, got {page_size}",
                listing.max_page_size
            )));
        }
        let page = PageRequest::new(self.page.unwrap_or(1), page_size)?;

        let view = match self.view.as_deref() {
            None => UncategorizedView::default(),
            Some(s) => UncategorizedView::parse_view(s)
                .ok_or_else(|| ListError::Validation(format!("unknown view {s:?}")))?,
        };

        let mut predicates = Vec::new();
        if let Some(d) = self.min_date {
            predicates.push(Predicate::FromDate(d));
        }
        if let Some(d) = self.max_date {
            predicates.push(Predicate::ToDate(d));
        }
        if let Some(v) = self.min_amount {
            predicates.push(Predicate::MinAmount(finite("minAmount", v)?));
        }
        if let Some(v) = self.max_amount {
            predicates.push(Predicate::MaxAmount(finite("maxAmount", v)?));
        }
        if let Some(needle) = self.match_description.as_deref().filter(|s| !s.is_empty()) {
            predicates.push(Predicate::DescriptionContains {
                needle: needle.to_string(),
                ignore_case: listing.case_insensitive_description,
            });
        }

        Ok(ValidatedFilter {
            page,
            view,
            predicates,
        })
    }
}

fn finite(name: &str, v: f64) -> Result<f64, ListError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ListError::Validation(format!("{name} must be a finite number")))
    }
}
