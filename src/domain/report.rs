use serde::Serialize;

/// One line of the statistics report. Fields that do not apply to a row's
/// type stay `None` and serialize as blank columns.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub year: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub c_code: String,
    pub c_name: String,
    pub sc_code: Option<String>,
    pub sc_name: Option<String>,
    pub s_code: Option<String>,
    pub s_name: Option<String>,
    pub area: Option<f64>,
    pub distance: Option<f64>,
    pub depth: Option<f64>,
    pub flow_q: f64,
    pub flow_v: Option<f64>,
    pub tn_measurement: Option<f64>,
    pub tp_measurement: Option<f64>,
    pub drained_area: Option<f64>,
    pub harvested_area: Option<f64>,
    pub clay_soil_area: Option<f64>,
    pub fertile_soil_area: Option<f64>,
    pub peat_soil_area: Option<f64>,
    pub scattered_population: Option<f64>,
    pub tn_fertilizer_amount: Option<f64>,
    pub tp_fertilizer_amount: Option<f64>,
    pub tn_anthropogenic_unadjusted_estimate: f64,
    pub tn_atmospheric_unadjusted_estimate: f64,
    pub tn_natural_unadjusted_estimate: f64,
    pub tn_unadjusted_estimate: f64,
    pub tn_unadjusted_retention: f64,
    pub tn_adjustment: f64,
    pub tn_anthropogenic_estimate: f64,
    pub tn_atmospheric_estimate: f64,
    pub tn_natural_estimate: f64,
    pub tn_estimate: f64,
    pub tn_retention: f64,
    pub tp_anthropogenic_unadjusted_estimate: f64,
    pub tp_atmospheric_unadjusted_estimate: f64,
    pub tp_natural_unadjusted_estimate: f64,
    pub tp_unadjusted_estimate: f64,
    pub tp_unadjusted_retention: f64,
    pub tp_adjustment: f64,
    pub tp_anthropogenic_estimate: f64,
    pub tp_atmospheric_estimate: f64,
    pub tp_natural_estimate: f64,
    pub tp_estimate: f64,
    pub tp_retention: f64,
}

impl ReportRow {
    /// Column order of the report file. Written explicitly so an empty batch
    /// still produces a header line.
    pub const COLUMNS: [&'static str; 45] = [
        "year",
        "type",
        "c_code",
        "c_name",
        "sc_code",
        "sc_name",
        "s_code",
        "s_name",
        "area",
        "distance",
        "depth",
        "flow_q",
        "flow_v",
        "tn_measurement",
        "tp_measurement",
        "drained_area",
        "harvested_area",
        "clay_soil_area",
        "fertile_soil_area",
        "peat_soil_area",
        "scattered_population",
        "tn_fertilizer_amount",
        "tp_fertilizer_amount",
        "tn_anthropogenic_unadjusted_estimate",
        "tn_atmospheric_unadjusted_estimate",
        "tn_natural_unadjusted_estimate",
        "tn_unadjusted_estimate",
        "tn_unadjusted_retention",
        "tn_adjustment",
        "tn_anthropogenic_estimate",
        "tn_atmospheric_estimate",
        "tn_natural_estimate",
        "tn_estimate",
        "tn_retention",
        "tp_anthropogenic_unadjusted_estimate",
        "tp_atmospheric_unadjusted_estimate",
        "tp_natural_unadjusted_estimate",
        "tp_unadjusted_estimate",
        "tp_unadjusted_retention",
        "tp_adjustment",
        "tp_anthropogenic_estimate",
        "tp_atmospheric_estimate",
        "tp_natural_estimate",
        "tp_estimate",
        "tp_retention",
    ];

    /// A row with the shared catchment identity filled in and everything
    /// else blank or zero. Callers fill the fields their row type carries.
    pub fn blank(year: i32, kind: &str, c_code: &str, c_name: &str) -> Self {
        Self {
            year,
            kind: kind.to_string(),
            c_code: c_code.to_string(),
            c_name: c_name.to_string(),
            sc_code: None,
            sc_name: None,
            s_code: None,
            s_name: None,
            area: None,
            distance: None,
            depth: None,
            flow_q: 0.0,
            flow_v: None,
            tn_measurement: None,
            tp_measurement: None,
            drained_area: None,
            harvested_area: None,
            clay_soil_area: None,
            fertile_soil_area: None,
            peat_soil_area: None,
            scattered_population: None,
            tn_fertilizer_amount: None,
            tp_fertilizer_amount: None,
            tn_anthropogenic_unadjusted_estimate: 0.0,
            tn_atmospheric_unadjusted_estimate: 0.0,
            tn_natural_unadjusted_estimate: 0.0,
            tn_unadjusted_estimate: 0.0,
            tn_unadjusted_retention: 0.0,
            tn_adjustment: 1.0,
            tn_anthropogenic_estimate: 0.0,
            tn_atmospheric_estimate: 0.0,
            tn_natural_estimate: 0.0,
            tn_estimate: 0.0,
            tn_retention: 0.0,
            tp_anthropogenic_unadjusted_estimate: 0.0,
            tp_atmospheric_unadjusted_estimate: 0.0,
            tp_natural_unadjusted_estimate: 0.0,
            tp_unadjusted_estimate: 0.0,
            tp_unadjusted_retention: 0.0,
            tp_adjustment: 1.0,
            tp_anthropogenic_estimate: 0.0,
            tp_atmospheric_estimate: 0.0,
            tp_natural_estimate: 0.0,
            tp_estimate: 0.0,
            tp_retention: 0.0,
        }
    }
}

/// All rows derived from one extraction batch, in output order.
#[derive(Debug, Clone, Default)]
pub struct ReportBatch {
    pub rows: Vec<ReportRow>,
}
