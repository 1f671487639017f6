use crate::core::aggregate::{Aggregate, Attr, EstimateField, SourceField};
use crate::core::flatten::subcatchments_below;
use crate::core::ratio::{self, LoadSummary};
use crate::domain::model::{Model, Parameter, Subcatchment};
use crate::domain::report::ReportRow;
use crate::utils::error::{Result, StatError};

/// Deep copy of a model with every calibration input removed: adjustments
/// and measurements are cleared on each subcatchment at every depth.
/// Re-simulating this copy yields the uncalibrated baseline estimates.
pub fn stripped_copy(model: &Model) -> Model {
    let mut copy = model.clone();
    for sc in &mut copy.subcatchments {
        strip(sc);
    }
    copy
}

fn strip(sc: &mut Subcatchment) {
    sc.adjustments.clear();
    sc.measurements.clear();
    for child in &mut sc.subcatchments {
        strip(child);
    }
}

/// Derives the report rows for one model: the catchment total first, then
/// each subcatchment in traversal order, each followed by its diffuse and
/// point sources.
///
/// `actual` is the calibrated tree as loaded from the store; `baseline` is
/// the stripped copy after re-simulation. The two trees are walked in
/// lock-step and must match structurally; a mismatch means the simulator
/// broke its contract and aborts the model.
pub fn build_rows(actual: &Model, baseline: &Model) -> Result<Vec<ReportRow>> {
    let actual_subcatchments = subcatchments_below(actual);
    let baseline_subcatchments = subcatchments_below(baseline);
    if actual_subcatchments.len() != baseline_subcatchments.len() {
        return Err(StatError::StructureMismatch {
            message: format!(
                "model {}: {} subcatchments before simulation, {} after",
                actual.code,
                actual_subcatchments.len(),
                baseline_subcatchments.len()
            ),
        });
    }

    let mut rows = Vec::new();

    let mut row = ReportRow::blank(actual.year, "catchment", &actual.code, &actual.name);
    row.area = Some(actual.aggregate(Attr::Field(SourceField::Area)));
    row.flow_q = actual
        .subcatchments
        .iter()
        .map(|sc| sc.water_discharge)
        .sum();
    fill_source_fields(&mut row, actual);
    fill_loads(&mut row, actual, baseline);
    rows.push(row);

    for (&sc, &sc_baseline) in actual_subcatchments.iter().zip(baseline_subcatchments.iter()) {
        if sc.diffuse_sources.len() != sc_baseline.diffuse_sources.len()
            || sc.point_sources.len() != sc_baseline.point_sources.len()
        {
            return Err(StatError::StructureMismatch {
                message: format!(
                    "model {}: subcatchment {} changed its sources during simulation",
                    actual.code, sc.code
                ),
            });
        }

        let sc_area = sc.aggregate(Attr::Field(SourceField::Area));
        // Net inflow added at this node: its own discharge minus what its
        // direct children already carry.
        let local_flow = sc.water_discharge
            - sc
                .subcatchments
                .iter()
                .map(|child| child.water_discharge)
                .sum::<f64>();

        let mut row = ReportRow::blank(actual.year, "subcatchment", &actual.code, &actual.name);
        row.sc_code = Some(sc.code.clone());
        row.sc_name = Some(sc.name.clone());
        row.area = Some(sc_area);
        row.distance = Some(sc.distance);
        row.depth = Some(sc.water_depth);
        row.flow_q = local_flow;
        row.flow_v = Some(sc.flow_velocity);
        // Zero total means "not measured" here, so the column stays blank.
        row.tn_measurement = non_zero(sc.aggregate(Attr::Measured(Parameter::Tn)));
        row.tp_measurement = non_zero(sc.aggregate(Attr::Measured(Parameter::Tp)));
        fill_source_fields(&mut row, sc);
        fill_loads(&mut row, sc, sc_baseline);
        rows.push(row);

        for (ds, ds_baseline) in sc.diffuse_sources.iter().zip(&sc_baseline.diffuse_sources) {
            let mut row =
                ReportRow::blank(actual.year, ds.kind_or_other(), &actual.code, &actual.name);
            row.sc_code = Some(sc.code.clone());
            row.sc_name = Some(sc.name.clone());
            row.area = Some(ds.area);
            row.distance = Some(sc.distance);
            row.depth = Some(sc.water_depth);
            // Diffuse sources carry no discharge of their own; they borrow
            // the parent's net inflow prorated by area fraction.
            row.flow_q = local_flow / sc_area * ds.area;
            row.flow_v = Some(sc.flow_velocity);
            fill_source_fields(&mut row, ds);
            fill_loads(&mut row, ds, ds_baseline);
            rows.push(row);
        }

        for (ps, ps_baseline) in sc.point_sources.iter().zip(&sc_baseline.point_sources) {
            let mut row = ReportRow::blank(actual.year, "point", &actual.code, &actual.name);
            row.sc_code = Some(sc.code.clone());
            row.sc_name = Some(sc.name.clone());
            row.s_code = Some(ps.code.clone());
            row.s_name = Some(ps.name.clone());
            row.distance = Some(ps.distance);
            row.depth = Some(sc.water_depth);
            row.flow_q = ps.water_discharge;
            row.flow_v = Some(sc.flow_velocity);
            row.tn_measurement = non_zero(ps.aggregate(Attr::Measured(Parameter::Tn)));
            row.tp_measurement = non_zero(ps.aggregate(Attr::Measured(Parameter::Tp)));
            fill_loads(&mut row, ps, ps_baseline);
            rows.push(row);
        }
    }

    Ok(rows)
}

fn non_zero(value: f64) -> Option<f64> {
    if value == 0.0 {
        None
    } else {
        Some(value)
    }
}

fn fill_source_fields<A: Aggregate>(row: &mut ReportRow, node: &A) {
    row.drained_area = Some(node.aggregate(Attr::Field(SourceField::DrainedArea)));
    row.harvested_area = Some(node.aggregate(Attr::Field(SourceField::HarvestedArea)));
    row.clay_soil_area = Some(node.aggregate(Attr::Field(SourceField::ClaySoilArea)));
    row.fertile_soil_area = Some(node.aggregate(Attr::Field(SourceField::FertileSoilArea)));
    row.peat_soil_area = Some(node.aggregate(Attr::Field(SourceField::PeatSoilArea)));
    row.scattered_population = Some(node.aggregate(Attr::Field(SourceField::ScatteredPopulation)));
    row.tn_fertilizer_amount = Some(node.aggregate(Attr::Fertilizer(Parameter::Tn)));
    row.tp_fertilizer_amount = Some(node.aggregate(Attr::Fertilizer(Parameter::Tp)));
}

fn summarize<A: Aggregate>(calibrated: &A, uncalibrated: &A, parameter: Parameter) -> LoadSummary {
    LoadSummary {
        anthropogenic_unadjusted: uncalibrated
            .aggregate(Attr::Estimate(EstimateField::Anthropogenic, parameter)),
        atmospheric_unadjusted: uncalibrated
            .aggregate(Attr::Estimate(EstimateField::Atmospheric, parameter)),
        natural_unadjusted: uncalibrated
            .aggregate(Attr::Estimate(EstimateField::Natural, parameter)),
        unadjusted_retention: uncalibrated
            .aggregate(Attr::Estimate(EstimateField::Retention, parameter)),
        anthropogenic: calibrated
            .aggregate(Attr::Estimate(EstimateField::Anthropogenic, parameter)),
        atmospheric: calibrated.aggregate(Attr::Estimate(EstimateField::Atmospheric, parameter)),
        natural: calibrated.aggregate(Attr::Estimate(EstimateField::Natural, parameter)),
        retention: calibrated.aggregate(Attr::Estimate(EstimateField::Retention, parameter)),
    }
}

fn fill_loads<A: Aggregate>(row: &mut ReportRow, calibrated: &A, uncalibrated: &A) {
    for parameter in Parameter::ALL {
        let summary = summarize(calibrated, uncalibrated, parameter);
        let derived = ratio::derive(&summary);
        match parameter {
            Parameter::Tn => {
                row.tn_anthropogenic_unadjusted_estimate = summary.anthropogenic_unadjusted;
                row.tn_atmospheric_unadjusted_estimate = summary.atmospheric_unadjusted;
                row.tn_natural_unadjusted_estimate = summary.natural_unadjusted;
                row.tn_unadjusted_estimate = derived.unadjusted_estimate;
                row.tn_unadjusted_retention = summary.unadjusted_retention;
                row.tn_adjustment = derived.adjustment;
                row.tn_anthropogenic_estimate = summary.anthropogenic;
                row.tn_atmospheric_estimate = summary.atmospheric;
                row.tn_natural_estimate = summary.natural;
                row.tn_estimate = derived.estimate;
                row.tn_retention = summary.retention;
            }
            Parameter::Tp => {
                row.tp_anthropogenic_unadjusted_estimate = summary.anthropogenic_unadjusted;
                row.tp_atmospheric_unadjusted_estimate = summary.atmospheric_unadjusted;
                row.tp_natural_unadjusted_estimate = summary.natural_unadjusted;
                row.tp_unadjusted_estimate = derived.unadjusted_estimate;
                row.tp_unadjusted_retention = summary.unadjusted_retention;
                row.tp_adjustment = derived.adjustment;
                row.tp_anthropogenic_estimate = summary.anthropogenic;
                row.tp_atmospheric_estimate = summary.atmospheric;
                row.tp_natural_estimate = summary.natural;
                row.tp_estimate = derived.estimate;
                row.tp_retention = summary.retention;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Adjustment, DiffuseSource, Estimate, Measurement, PointSource};

    fn estimate(parameter: &str, anthropogenic: f64, atmospheric: f64, natural: f64) -> Estimate {
        Estimate {
            parameter: parameter.to_string(),
            anthropogenic_discharge: anthropogenic,
            atmospheric_deposition: atmospheric,
            natural_discharge: natural,
            retention: 0.25,
        }
    }

    fn diffuse_source(area: f64) -> DiffuseSource {
        DiffuseSource {
            kind: None,
            area,
            drained_area: 0.0,
            harvested_area: 0.0,
            clay_soil_area: 0.0,
            fertile_soil_area: 0.0,
            peat_soil_area: 0.0,
            scattered_population: 0.0,
            fertilizers: Vec::new(),
            estimates: vec![estimate("tn", 10.0, 2.0, 5.0)],
        }
    }

    fn point_source(discharge: f64) -> PointSource {
        PointSource {
            code: "ps1".to_string(),
            name: "Plant".to_string(),
            distance: 3.0,
            water_discharge: discharge,
            measurements: Vec::new(),
            estimates: vec![estimate("tn", 1.0, 0.0, 1.0)],
        }
    }

    fn subcatchment(code: &str, water_discharge: f64) -> Subcatchment {
        Subcatchment {
            code: code.to_string(),
            name: code.to_uppercase(),
            distance: 10.0,
            water_depth: 1.5,
            water_discharge,
            flow_velocity: 0.6,
            subcatchments: Vec::new(),
            diffuse_sources: Vec::new(),
            point_sources: Vec::new(),
            measurements: Vec::new(),
            adjustments: Vec::new(),
            estimates: Vec::new(),
        }
    }

    fn model(subcatchments: Vec<Subcatchment>) -> Model {
        Model {
            code: "m1".to_string(),
            name: "River".to_string(),
            year: 2023,
            subcatchments,
        }
    }

    /// One catchment holding one subcatchment (discharge 100, child with
    /// discharge 20) with 200 units of diffuse-source area and one point
    /// source.
    fn scenario_model() -> Model {
        let mut sc = subcatchment("sc1", 100.0);
        sc.subcatchments.push(subcatchment("sc2", 20.0));
        sc.diffuse_sources.push(diffuse_source(50.0));
        sc.diffuse_sources.push(diffuse_source(150.0));
        sc.point_sources.push(point_source(7.5));
        sc.measurements.push(Measurement {
            parameter: "tn".to_string(),
            discharge: 3.0,
        });
        sc.measurements.push(Measurement {
            parameter: "tn".to_string(),
            discharge: 4.0,
        });
        sc.adjustments.push(Adjustment {
            parameter: "tn".to_string(),
            factor: 1.2,
        });
        model(vec![sc])
    }

    #[test]
    fn stripped_copy_clears_calibration_inputs_at_every_depth() {
        let mut inner = subcatchment("inner", 1.0);
        inner.measurements.push(Measurement {
            parameter: "tp".to_string(),
            discharge: 2.0,
        });
        let mut outer = subcatchment("outer", 2.0);
        outer.adjustments.push(Adjustment {
            parameter: "tn".to_string(),
            factor: 2.0,
        });
        outer.subcatchments.push(inner);
        let source = model(vec![outer]);

        let stripped = stripped_copy(&source);

        let nodes = subcatchments_below(&stripped);
        assert_eq!(nodes.len(), 2);
        assert!(nodes.iter().all(|sc| sc.adjustments.is_empty()));
        assert!(nodes.iter().all(|sc| sc.measurements.is_empty()));
        // The source tree is untouched.
        assert_eq!(source.subcatchments[0].adjustments.len(), 1);
    }

    #[test]
    fn rows_come_out_in_traversal_order() {
        let rows = build_rows(&scenario_model(), &stripped_copy(&scenario_model())).unwrap();
        let kinds: Vec<&str> = rows.iter().map(|r| r.kind.as_str()).collect();
        assert_eq!(
            kinds,
            ["catchment", "subcatchment", "other", "other", "point", "subcatchment"]
        );
    }

    #[test]
    fn local_flow_subtracts_direct_children() {
        let rows = build_rows(&scenario_model(), &stripped_copy(&scenario_model())).unwrap();
        let sc_row = &rows[1];
        assert_eq!(sc_row.sc_code.as_deref(), Some("sc1"));
        assert_eq!(sc_row.flow_q, 80.0);
        assert_eq!(sc_row.area, Some(200.0));
    }

    #[test]
    fn diffuse_flow_is_prorated_by_area_fraction() {
        let rows = build_rows(&scenario_model(), &stripped_copy(&scenario_model())).unwrap();
        let ds_row = &rows[2];
        assert_eq!(ds_row.kind, "other");
        assert_eq!(ds_row.area, Some(50.0));
        assert_eq!(ds_row.flow_q, 20.0);
        // Hydraulic context comes from the parent subcatchment.
        assert_eq!(ds_row.depth, Some(1.5));
        assert_eq!(ds_row.flow_v, Some(0.6));
        assert_eq!(ds_row.s_code, None);
    }

    #[test]
    fn point_source_uses_its_own_discharge() {
        let rows = build_rows(&scenario_model(), &stripped_copy(&scenario_model())).unwrap();
        let ps_row = &rows[4];
        assert_eq!(ps_row.kind, "point");
        assert_eq!(ps_row.s_code.as_deref(), Some("ps1"));
        assert_eq!(ps_row.flow_q, 7.5);
        assert_eq!(ps_row.distance, Some(3.0));
        assert_eq!(ps_row.area, None);
        assert_eq!(ps_row.drained_area, None);
        assert_eq!(ps_row.tn_fertilizer_amount, None);
    }

    #[test]
    fn measurement_totals_surface_and_zero_becomes_blank() {
        let rows = build_rows(&scenario_model(), &stripped_copy(&scenario_model())).unwrap();
        let sc_row = &rows[1];
        assert_eq!(sc_row.tn_measurement, Some(7.0));
        // No tp measurements: blank, not 0.
        assert_eq!(sc_row.tp_measurement, None);
        // Catchment rows never carry measurement columns.
        assert_eq!(rows[0].tn_measurement, None);
    }

    #[test]
    fn catchment_row_totals_the_whole_tree() {
        let rows = build_rows(&scenario_model(), &stripped_copy(&scenario_model())).unwrap();
        let catchment = &rows[0];
        assert_eq!(catchment.area, Some(200.0));
        // Direct children only; the nested node's 20.0 is already counted
        // inside its parent's discharge.
        assert_eq!(catchment.flow_q, 100.0);
        assert_eq!(catchment.sc_code, None);
        assert_eq!(catchment.distance, None);
        // Two diffuse sources at 10.0 anthropogenic each plus the point
        // source's 1.0.
        assert_eq!(catchment.tn_anthropogenic_estimate, 21.0);
    }

    #[test]
    fn identical_trees_yield_neutral_adjustments_everywhere() {
        // A model without calibration inputs: both simulation runs see the
        // same input, so every ratio is 1.0 and the totals agree.
        let mut source = scenario_model();
        for sc in &mut source.subcatchments {
            sc.measurements.clear();
            sc.adjustments.clear();
        }
        let baseline = stripped_copy(&source);
        let rows = build_rows(&source, &baseline).unwrap();

        for row in &rows {
            assert_eq!(row.tn_adjustment, 1.0, "row type {}", row.kind);
            assert_eq!(row.tp_adjustment, 1.0);
            assert_eq!(row.tn_estimate, row.tn_unadjusted_estimate);
            assert_eq!(row.tp_estimate, row.tp_unadjusted_estimate);
        }
    }

    #[test]
    fn adjustment_ratio_reflects_calibration_gain() {
        let mut source = scenario_model();
        // Calibrated run reports 25% higher anthropogenic + natural loads
        // on the first diffuse source.
        source.subcatchments[0].diffuse_sources[0].estimates = vec![Estimate {
            parameter: "tn".to_string(),
            anthropogenic_discharge: 12.5,
            atmospheric_deposition: 2.0,
            natural_discharge: 6.25,
            retention: 0.25,
        }];
        let baseline = stripped_copy(&scenario_model());
        let rows = build_rows(&source, &baseline).unwrap();

        let ds_row = &rows[2];
        assert_eq!(ds_row.tn_adjustment, 1.25);
        assert_eq!(ds_row.tn_unadjusted_estimate, 17.0);
        assert_eq!(ds_row.tn_estimate, 20.75);
    }

    #[test]
    fn mismatched_trees_fail_fast() {
        let source = scenario_model();
        let mut baseline = stripped_copy(&source);
        baseline.subcatchments[0].subcatchments.clear();
        let err = build_rows(&source, &baseline).unwrap_err();
        assert!(matches!(err, StatError::StructureMismatch { .. }));

        let mut baseline = stripped_copy(&source);
        baseline.subcatchments[0].point_sources.clear();
        let err = build_rows(&source, &baseline).unwrap_err();
        assert!(matches!(err, StatError::StructureMismatch { .. }));
    }
}
