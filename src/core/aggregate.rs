use crate::core::flatten::subcatchments_below;
use crate::domain::model::{DiffuseSource, Estimate, Model, Parameter, PointSource, Subcatchment};

/// Structural quantities carried by diffuse sources. Subcatchments and
/// models do not store these directly; querying them there rolls the
/// source values up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceField {
    Area,
    DrainedArea,
    HarvestedArea,
    ClaySoilArea,
    FertileSoilArea,
    PeatSoilArea,
    ScatteredPopulation,
}

/// The four per-pollutant components of a simulation estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimateField {
    Anthropogenic,
    Atmospheric,
    Natural,
    Retention,
}

/// An aggregatable attribute, resolved to its kind once at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attr {
    /// Structural field: read verbatim where the node carries it, summed
    /// over sources where it does not.
    Field(SourceField),
    /// Observed load: sum of matching measurement discharges.
    Measured(Parameter),
    /// Calibration correction: product of matching adjustment factors.
    /// The only multiplicative attribute; an empty adjustment list yields
    /// the identity `1.0`, not `0`.
    Factor(Parameter),
    /// Simulated load component: sum of the matching estimate entries.
    Estimate(EstimateField, Parameter),
    /// Fertilizer application: sum of matching amounts.
    Fertilizer(Parameter),
}

/// Node-kind-specific attribute aggregation.
///
/// Every combination of node and attribute is total: where a node carries
/// no such quantity the additive attributes yield `0.0` and `Factor` yields
/// `1.0`, so callers can query uniformly across node kinds.
pub trait Aggregate {
    fn aggregate(&self, attr: Attr) -> f64;
}

fn estimate_sum(estimates: &[Estimate], field: EstimateField, parameter: Parameter) -> f64 {
    estimates
        .iter()
        .filter(|e| e.parameter == parameter.code())
        .map(|e| match field {
            EstimateField::Anthropogenic => e.anthropogenic_discharge,
            EstimateField::Atmospheric => e.atmospheric_deposition,
            EstimateField::Natural => e.natural_discharge,
            EstimateField::Retention => e.retention,
        })
        .sum()
}

impl Aggregate for DiffuseSource {
    fn aggregate(&self, attr: Attr) -> f64 {
        match attr {
            Attr::Field(field) => match field {
                SourceField::Area => self.area,
                SourceField::DrainedArea => self.drained_area,
                SourceField::HarvestedArea => self.harvested_area,
                SourceField::ClaySoilArea => self.clay_soil_area,
                SourceField::FertileSoilArea => self.fertile_soil_area,
                SourceField::PeatSoilArea => self.peat_soil_area,
                SourceField::ScatteredPopulation => self.scattered_population,
            },
            Attr::Measured(_) => 0.0,
            Attr::Factor(_) => 1.0,
            Attr::Estimate(field, parameter) => estimate_sum(&self.estimates, field, parameter),
            Attr::Fertilizer(parameter) => self
                .fertilizers
                .iter()
                .filter(|f| f.parameter == parameter.code())
                .map(|f| f.amount)
                .sum(),
        }
    }
}

impl Aggregate for PointSource {
    fn aggregate(&self, attr: Attr) -> f64 {
        match attr {
            Attr::Field(_) => 0.0,
            Attr::Measured(parameter) => self
                .measurements
                .iter()
                .filter(|m| m.parameter == parameter.code())
                .map(|m| m.discharge)
                .sum(),
            Attr::Factor(_) => 1.0,
            Attr::Estimate(field, parameter) => estimate_sum(&self.estimates, field, parameter),
            Attr::Fertilizer(_) => 0.0,
        }
    }
}

impl Aggregate for Subcatchment {
    fn aggregate(&self, attr: Attr) -> f64 {
        match attr {
            // Observed loads and calibration corrections belong to the
            // subcatchment itself, never to its sources.
            Attr::Measured(parameter) => self
                .measurements
                .iter()
                .filter(|m| m.parameter == parameter.code())
                .map(|m| m.discharge)
                .sum(),
            Attr::Factor(parameter) => self
                .adjustments
                .iter()
                .filter(|a| a.parameter == parameter.code())
                .fold(1.0, |product, a| product * a.factor),
            // Everything else is a source-level quantity rolled up over the
            // node's own diffuse and point sources. This covers estimates
            // too: a subcatchment's reported loads are the sum of what its
            // sources contribute, not its own estimate entries.
            Attr::Field(_) | Attr::Estimate(..) | Attr::Fertilizer(_) => {
                let diffuse: f64 = self.diffuse_sources.iter().map(|s| s.aggregate(attr)).sum();
                let point: f64 = self.point_sources.iter().map(|s| s.aggregate(attr)).sum();
                diffuse + point
            }
        }
    }
}

impl Aggregate for Model {
    /// Whole-catchment totals: the sum over every descendant subcatchment
    /// of the tree, flat, so no value is counted twice through intermediate
    /// levels.
    fn aggregate(&self, attr: Attr) -> f64 {
        subcatchments_below(self)
            .iter()
            .map(|sc| sc.aggregate(attr))
            .sum()
    }
}
