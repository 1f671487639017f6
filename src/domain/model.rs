use serde::{Deserialize, Serialize};

/// Pollutant parameters the report carries columns for.
///
/// Measurements, adjustments, estimates and fertilizers reference their
/// parameter by code on the wire; codes other than these are preserved in
/// the data but never aggregated into the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameter {
    Tn,
    Tp,
}

impl Parameter {
    pub const ALL: [Parameter; 2] = [Parameter::Tn, Parameter::Tp];

    pub fn code(self) -> &'static str {
        match self {
            Parameter::Tn => "tn",
            Parameter::Tp => "tp",
        }
    }
}

/// A station or waterbody reference as returned by the model store listing
/// endpoints. Only the code is needed to fetch the attached models.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteRef {
    pub code: String,
}

/// Catchment root: one drainage area, modelled for one year.
///
/// The sequence fields of the tree are required on the wire; a node that
/// lacks one is a malformed tree and fails at deserialization rather than
/// being silently skipped later.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub code: String,
    pub name: String,
    pub year: i32,
    pub subcatchments: Vec<Subcatchment>,
}

/// Nested drainage sub-area. Subcatchments form a finite rooted tree below
/// the model; a node carries its own hydraulics plus the sources,
/// measurements and calibration inputs attributed to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subcatchment {
    pub code: String,
    pub name: String,
    pub distance: f64,
    pub water_depth: f64,
    pub water_discharge: f64,
    pub flow_velocity: f64,
    pub subcatchments: Vec<Subcatchment>,
    pub diffuse_sources: Vec<DiffuseSource>,
    pub point_sources: Vec<PointSource>,
    pub measurements: Vec<Measurement>,
    pub adjustments: Vec<Adjustment>,
    pub estimates: Vec<Estimate>,
}

/// Non-point pollutant contributor (agricultural runoff, scattered
/// settlement, ...) attributed to a subcatchment by area fraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffuseSource {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub area: f64,
    pub drained_area: f64,
    pub harvested_area: f64,
    pub clay_soil_area: f64,
    pub fertile_soil_area: f64,
    pub peat_soil_area: f64,
    pub scattered_population: f64,
    #[serde(default)]
    pub fertilizers: Vec<Fertilizer>,
    pub estimates: Vec<Estimate>,
}

impl DiffuseSource {
    /// Source type as reported, with absent and empty collapsing to `other`.
    pub fn kind_or_other(&self) -> &str {
        match self.kind.as_deref() {
            Some(kind) if !kind.is_empty() => kind,
            _ => "other",
        }
    }
}

/// Discrete pollutant contributor with its own discharge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointSource {
    pub code: String,
    pub name: String,
    pub distance: f64,
    pub water_discharge: f64,
    pub measurements: Vec<Measurement>,
    pub estimates: Vec<Estimate>,
}

/// Observed load for one pollutant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measurement {
    pub parameter: String,
    pub discharge: f64,
}

/// Multiplicative calibration correction derived from field measurements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Adjustment {
    pub parameter: String,
    pub factor: f64,
}

/// Simulation output: load breakdown for one pollutant on one node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimate {
    pub parameter: String,
    pub anthropogenic_discharge: f64,
    pub atmospheric_deposition: f64,
    pub natural_discharge: f64,
    pub retention: f64,
}

/// Fertilizer application on a diffuse source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fertilizer {
    pub parameter: String,
    pub amount: f64,
}
