//! Static revenue-tier classification.
//!
//! A pure threshold lookup, independent of any AI call. Bands follow the
//! published definitions: Super Platinum above $1Bn, Platinum $500Mn to
//! $1Bn inclusive, Diamond $100Mn up to $500Mn, Gold below $100Mn.

use serde::{Deserialize, Serialize};

const BILLION: f64 = 1_000_000_000.0;
const MILLION: f64 = 1_000_000.0;
const THOUSAND: f64 = 1_000.0;

/// Revenue bucket for a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "Super Platinum")]
    SuperPlatinum,
    Platinum,
    Diamond,
    Gold,
    Unknown,
}

impl Tier {
    /// Classify annual operating revenue in USD.
    ///
    /// Exactly $1Bn is Platinum: the Super Platinum band is strictly
    /// above $1Bn, matching the "$500Mn to $1Bn" definition.
    pub fn from_revenue(revenue_usd: Option<f64>) -> Self {
        let Some(revenue) = revenue_usd else {
            return Tier::Unknown;
        };

        if revenue > BILLION {
            Tier::SuperPlatinum
        } else if revenue >= 500.0 * MILLION {
            Tier::Platinum
        } else if revenue >= 100.0 * MILLION {
            Tier::Diamond
        } else {
            Tier::Gold
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::SuperPlatinum => "Super Platinum",
            Tier::Platinum => "Platinum",
            Tier::Diamond => "Diamond",
            Tier::Gold => "Gold",
            Tier::Unknown => "Unknown",
        }
    }

    /// What the band means, for the run summary.
    pub fn description(self) -> &'static str {
        match self {
            Tier::SuperPlatinum => "Annual revenue from operations > $1Bn",
            Tier::Platinum => "Annual revenue from operations $500Mn to $1Bn",
            Tier::Diamond => "Annual revenue from operations $100Mn to $500Mn",
            Tier::Gold => "Annual revenue from operations below $100Mn",
            Tier::Unknown => "Revenue information not available",
        }
    }

    /// All bands in descending order, for summary output.
    pub fn all() -> [Tier; 5] {
        [
            Tier::SuperPlatinum,
            Tier::Platinum,
            Tier::Diamond,
            Tier::Gold,
            Tier::Unknown,
        ]
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Format revenue for display ("$2.50B", "$150.00M", "Not Available").
pub fn format_revenue(revenue_usd: Option<f64>) -> String {
    let Some(revenue) = revenue_usd else {
        return "Not Available".to_string();
    };

    if revenue >= BILLION {
        format!("${:.2}B", revenue / BILLION)
    } else if revenue >= MILLION {
        format!("${:.2}M", revenue / MILLION)
    } else if revenue >= THOUSAND {
        format!("${:.2}K", revenue / THOUSAND)
    } else {
        format!("${revenue:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_exactly_one_billion_is_platinum() {
        assert_eq!(Tier::from_revenue(Some(1_000_000_000.0)), Tier::Platinum);
    }

    #[test]
    fn band_boundaries() {
        assert_eq!(Tier::from_revenue(Some(1_000_000_001.0)), Tier::SuperPlatinum);
        assert_eq!(Tier::from_revenue(Some(999_999_999.0)), Tier::Platinum);
        assert_eq!(Tier::from_revenue(Some(500_000_000.0)), Tier::Platinum);
        assert_eq!(Tier::from_revenue(Some(499_999_999.0)), Tier::Diamond);
        assert_eq!(Tier::from_revenue(Some(100_000_000.0)), Tier::Diamond);
        assert_eq!(Tier::from_revenue(Some(99_999_999.0)), Tier::Gold);
        assert_eq!(Tier::from_revenue(Some(0.0)), Tier::Gold);
        assert_eq!(Tier::from_revenue(None), Tier::Unknown);
    }

    #[test]
    fn revenue_display() {
        assert_eq!(format_revenue(Some(2_500_000_000.0)), "$2.50B");
        assert_eq!(format_revenue(Some(150_000_000.0)), "$150.00M");
        assert_eq!(format_revenue(Some(42_000.0)), "$42.00K");
        assert_eq!(format_revenue(Some(999.5)), "$999.50");
        assert_eq!(format_revenue(None), "Not Available");
    }
}
