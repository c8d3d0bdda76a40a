//! Plain threshold advice for one scored row of indicators.

use std::fmt;

use crate::inputs::Inputs;
use crate::reference::{COSTS, INVESTMENTS, MARKET_SHARE, TAX_RATE};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recommendation {
    /// Efficiency below 30
    RaiseEfficiencyUrgently,
    /// Costs above 70
    CutCosts,
    /// Investments below 30
    IncreaseInvestments,
    /// Market share below 30
    GrowMarketShare,
    /// Tax rate above 50
    ConsultTaxSpecialist,
    AllIndicatorsNormal,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::RaiseEfficiencyUrgently => "take urgent measures to raise efficiency",
            Self::CutCosts => "reduce costs",
            Self::IncreaseInvestments => "consider increasing investments",
            Self::GrowMarketShare => "develop a strategy to grow market share",
            Self::ConsultTaxSpecialist => "consult a tax specialist",
            Self::AllIndicatorsNormal => "all indicators are normal",
        })
    }
}

/// Advice for a row, in a fixed order. Indicators missing from `row` are not judged.
/// Never empty: falls back to [`Recommendation::AllIndicatorsNormal`].
pub fn recommend(row: &Inputs, efficiency: f64) -> Vec<Recommendation> {
    let below = |name: &str, limit: f64| row.get(name).is_some_and(|v| v < limit);
    let above = |name: &str, limit: f64| row.get(name).is_some_and(|v| v > limit);
    let checks = [
        (efficiency < 30., Recommendation::RaiseEfficiencyUrgently),
        (above(COSTS, 70.), Recommendation::CutCosts),
        (below(INVESTMENTS, 30.), Recommendation::IncreaseInvestments),
        (below(MARKET_SHARE, 30.), Recommendation::GrowMarketShare),
        (above(TAX_RATE, 50.), Recommendation::ConsultTaxSpecialist),
    ];
    let advice: Vec<_> = checks.into_iter().filter_map(|(hit, r)| hit.then_some(r)).collect();

    if advice.is_empty() {
        vec![Recommendation::AllIndicatorsNormal]
    } else {
        advice
    }
}

#[test]
fn test_recommend() {
    let struggling = Inputs::from([(COSTS, 90.), (INVESTMENTS, 10.), (MARKET_SHARE, 10.), (TAX_RATE, 90.)]);

    assert_eq!(
        recommend(&struggling, 18.),
        [
            Recommendation::RaiseEfficiencyUrgently,
            Recommendation::CutCosts,
            Recommendation::IncreaseInvestments,
            Recommendation::GrowMarketShare,
            Recommendation::ConsultTaxSpecialist,
        ]
    );

    let healthy = Inputs::from([(COSTS, 70.), (INVESTMENTS, 30.), (MARKET_SHARE, 80.), (TAX_RATE, 50.)]);
    assert_eq!(recommend(&healthy, 30.), [Recommendation::AllIndicatorsNormal]);
    assert_eq!(recommend(&Inputs::new(), 75.), [Recommendation::AllIndicatorsNormal]);
    assert_eq!(Recommendation::CutCosts.to_string(), "reduce costs");
}
