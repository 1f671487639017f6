/// Aggregated load totals for one pollutant on one record, straight from
/// the two simulation runs: `*_unadjusted` comes from the stripped tree,
/// the rest from the calibrated one.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadSummary {
    pub anthropogenic_unadjusted: f64,
    pub atmospheric_unadjusted: f64,
    pub natural_unadjusted: f64,
    pub unadjusted_retention: f64,
    pub anthropogenic: f64,
    pub atmospheric: f64,
    pub natural: f64,
    pub retention: f64,
}

/// Totals derived from a [`LoadSummary`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedLoads {
    pub unadjusted_estimate: f64,
    pub adjustment: f64,
    pub estimate: f64,
}

/// Computes the calibration adjustment ratio and the final load totals.
///
/// Atmospheric deposition is not calibratable: it must not influence the
/// ratio, so both totals are formed from the anthropogenic and natural
/// components first, the ratio is taken, and only then are the atmospheric
/// terms folded into the totals. A zero uncalibrated base means there was
/// nothing to calibrate; the ratio is the neutral `1.0` in that case.
pub fn derive(summary: &LoadSummary) -> DerivedLoads {
    let mut unadjusted_estimate = summary.anthropogenic_unadjusted + summary.natural_unadjusted;
    let mut estimate = summary.anthropogenic + summary.natural;

    let adjustment = if unadjusted_estimate != 0.0 {
        estimate / unadjusted_estimate
    } else {
        1.0
    };

    unadjusted_estimate += summary.atmospheric_unadjusted;
    estimate += summary.atmospheric;

    DerivedLoads {
        unadjusted_estimate,
        adjustment,
        estimate,
    }
}
