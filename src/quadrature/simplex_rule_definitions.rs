//! Symmetric quadrature rules on the reference triangle
//!
//! Points are given as `[s_0, t_0, s_1, t_1, ...]` and weights sum to the area of
//! the reference triangle, 1/2.

use std::collections::HashMap;

/// Order, points and weights of a rule, keyed by number of points
pub type RuleTable = HashMap<usize, (usize, Vec<f64>, Vec<f64>)>;

fn symmetric_orbit(a: f64) -> [f64; 6] {
    let b = 1.0 - 2.0 * a;
    [a, a, b, a, a, b]
}

lazy_static! {
    /// Triangle rules with 1, 3, 4, 6 and 7 points
    pub static ref TRIANGLE_RULE_DEFINITIONS: RuleTable = {
        let mut rules = RuleTable::new();

        rules.insert(1, (1, vec![1.0 / 3.0, 1.0 / 3.0], vec![0.5]));

        rules.insert(3, (2, symmetric_orbit(1.0 / 6.0).to_vec(), vec![1.0 / 6.0; 3]));

        let mut points = vec![1.0 / 3.0, 1.0 / 3.0];
        points.extend_from_slice(&symmetric_orbit(0.2));
        rules.insert(
            4,
            (3, points, vec![-27.0 / 96.0, 25.0 / 96.0, 25.0 / 96.0, 25.0 / 96.0]),
        );

        let mut points = symmetric_orbit(0.445948490915965).to_vec();
        points.extend_from_slice(&symmetric_orbit(0.091576213509771));
        let w1 = 0.223381589678011 / 2.0;
        let w2 = 0.109951743655322 / 2.0;
        rules.insert(6, (4, points, vec![w1, w1, w1, w2, w2, w2]));

        let mut points = vec![1.0 / 3.0, 1.0 / 3.0];
        points.extend_from_slice(&symmetric_orbit(0.470142064105115));
        points.extend_from_slice(&symmetric_orbit(0.101286507323456));
        let w0 = 0.225 / 2.0;
        let w1 = 0.132394152788506 / 2.0;
        let w2 = 0.125939180544827 / 2.0;
        rules.insert(7, (5, points, vec![w0, w1, w1, w1, w2, w2, w2]));

        rules
    };
}
