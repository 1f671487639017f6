use crate::domain::model::{Model, Subcatchment};

/// Every subcatchment below the model root, in traversal order: parent
/// before children, siblings in declaration order. The root itself is
/// never part of the result.
///
/// Called on matching actual and stripped trees, the two results line up
/// positionally because both trees share their structure by construction.
pub fn subcatchments_below(model: &Model) -> Vec<&Subcatchment> {
    let mut out = Vec::new();
    for sc in &model.subcatchments {
        collect(sc, &mut out);
    }
    out
}

/// Flattens a subtree rooted at a subcatchment, starting with the node
/// itself.
pub fn flatten(sc: &Subcatchment) -> Vec<&Subcatchment> {
    let mut out = Vec::new();
    collect(sc, &mut out);
    out
}

fn collect<'a>(sc: &'a Subcatchment, out: &mut Vec<&'a Subcatchment>) {
    out.push(sc);
    for child in &sc.subcatchments {
        collect(child, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subcatchment(code: &str, children: Vec<Subcatchment>) -> Subcatchment {
        Subcatchment {
            code: code.to_string(),
            name: code.to_string(),
            distance: 0.0,
            water_depth: 0.0,
            water_discharge: 0.0,
            flow_velocity: 0.0,
            subcatchments: children,
            diffuse_sources: Vec::new(),
            point_sources: Vec::new(),
            measurements: Vec::new(),
            adjustments: Vec::new(),
            estimates: Vec::new(),
        }
    }

    fn model(children: Vec<Subcatchment>) -> Model {
        Model {
            code: "m".to_string(),
            name: "m".to_string(),
            year: 2023,
            subcatchments: children,
        }
    }

    #[test]
    fn empty_model_flattens_to_nothing() {
        assert!(subcatchments_below(&model(Vec::new())).is_empty());
    }

    #[test]
    fn parent_comes_before_children_and_siblings_keep_order() {
        let tree = model(vec![
            subcatchment(
                "a",
                vec![
                    subcatchment("a1", vec![subcatchment("a1x", Vec::new())]),
                    subcatchment("a2", Vec::new()),
                ],
            ),
            subcatchment("b", Vec::new()),
        ]);

        let codes: Vec<&str> = subcatchments_below(&tree)
            .iter()
            .map(|sc| sc.code.as_str())
            .collect();
        assert_eq!(codes, ["a", "a1", "a1x", "a2", "b"]);
    }

    #[test]
    fn flatten_starts_with_the_node_itself() {
        let sc = subcatchment("root", vec![subcatchment("child", Vec::new())]);
        let codes: Vec<&str> = flatten(&sc).iter().map(|n| n.code.as_str()).collect();
        assert_eq!(codes, ["root", "child"]);
    }

    #[test]
    fn flattened_length_matches_descendant_count() {
        let tree = model(vec![subcatchment(
            "a",
            vec![subcatchment("b", vec![subcatchment("c", Vec::new())])],
        )]);
        assert_eq!(subcatchments_below(&tree).len(), 3);
    }
}
