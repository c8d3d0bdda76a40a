use fuzzy_efficiency::reference::{self, EFFICIENCY, INDICATORS};
use fuzzy_efficiency::*;
use proptest::prelude::*;

fn arb_shape() -> impl Strategy<Value = (f64, f64, f64)> {
    prop::array::uniform3(-100f64..200.).prop_map(|mut p| {
        p.sort_by(|a, b| a.total_cmp(b));
        (p[0], p[1], p[2])
    })
}

fn arb_row() -> impl Strategy<Value = Inputs> {
    prop::array::uniform6(0f64..=100.).prop_map(|values| INDICATORS.into_iter().zip(values).collect())
}

fn engine_with(rules: Vec<Rule>) -> InferenceEngine {
    let base = reference::efficiency_knowledge_base().unwrap();
    let mut builder = KnowledgeBase::builder();

    for variable in base.inputs().chain(base.outputs()) {
        builder.variable(variable.clone());
    }
    builder.rules(rules);

    InferenceEngine::new(builder.build().unwrap())
}

fn score(engine: &InferenceEngine, inputs: &Inputs) -> Option<f64> {
    engine.evaluate(inputs).ok().and_then(|r| r.get(EFFICIENCY))
}

proptest! {
    #[test]
    fn degree_is_zero_outside_support((a, b, c) in arb_shape(), x in -500f64..500.) {
        let mf = MembershipFunction::triangular(a, b, c).unwrap();

        prop_assert_eq!(mf.degree(b), 1.);
        if x < a || x > c {
            prop_assert_eq!(mf.degree(x), 0.);
        }
    }

    #[test]
    fn degree_is_monotonic_on_each_side((a, b, c) in arb_shape(), t in 0f64..=1., u in 0f64..=1.) {
        let mf = MembershipFunction::triangular(a, b, c).unwrap();
        let (lo, hi) = (t.min(u), t.max(u));

        // rising edge; clamped since a + (b - a) can round past b
        let (x1, x2) = ((a + (b - a) * lo).clamp(a, b), (a + (b - a) * hi).clamp(a, b));
        prop_assert!(mf.degree(x1) <= mf.degree(x2));

        // falling edge
        let (x1, x2) = ((b + (c - b) * lo).clamp(b, c), (b + (c - b) * hi).clamp(b, c));
        prop_assert!(mf.degree(x1) >= mf.degree(x2));
    }

    #[test]
    fn degree_is_continuous((a, b, c) in arb_shape(), x in -100f64..200.) {
        let mf = MembershipFunction::triangular(a, b, c).unwrap();
        let eps = 1e-7;
        let left = b - a;
        let right = c - b;

        // away from the shoulder jumps the slope is bounded by 1 / edge width
        if left > 1e-3 && right > 1e-3 && (x - a).abs() > eps && (x - c).abs() > eps {
            let slope = 1. / left.min(right);
            prop_assert!((mf.degree(x + eps) - mf.degree(x)).abs() <= slope * eps * 1.01 + 1e-12);
        }
    }

    #[test]
    fn fuzzified_degrees_are_bounded(x in -1000f64..1000.) {
        let kb = reference::efficiency_knowledge_base().unwrap();

        for variable in kb.inputs().chain(kb.outputs()) {
            for degree in variable.fuzzify(x).values() {
                prop_assert!((0. ..=1.).contains(degree));
            }
        }
    }

    #[test]
    fn rule_order_does_not_matter(
        inputs in arb_row(),
        rules in Just(reference::efficiency_rules()).prop_shuffle(),
    ) {
        let canonical = reference::efficiency_engine().unwrap();
        let shuffled = engine_with(rules);

        prop_assert_eq!(score(&canonical, &inputs), score(&shuffled, &inputs));
    }

    #[test]
    fn duplicate_rules_are_absorbed(inputs in arb_row(), dup in 0usize..6) {
        let canonical = reference::efficiency_engine().unwrap();
        let mut rules = reference::efficiency_rules();
        rules.push(rules[dup].clone());

        prop_assert_eq!(score(&canonical, &inputs), score(&engine_with(rules), &inputs));
    }

    #[test]
    fn centroid_of_symmetric_triangle_is_its_peak(m in 10u32..=90, w in 1u32..=10) {
        let (m, w) = (f64::from(m), f64::from(w));
        let universe = Universe::new(0., 100., 1.).unwrap();
        let mut builder = KnowledgeBase::builder();

        builder
            .input("x", universe, Terms::new().with("any", MembershipFunction::triangular(0., 50., 100.).unwrap()))
            .unwrap();
        builder
            .output("y", universe, Terms::new().with("peak", MembershipFunction::triangular(m - w, m, m + w).unwrap()))
            .unwrap();
        builder.rule(Rule::implies(is("x", "any"), "y", "peak"));

        let result = InferenceEngine::new(builder.build().unwrap())
            .evaluate(&Inputs::from([("x", 50.)]))
            .unwrap();

        // Mirrored samples carry bit-identical degrees, but the weighted sum is
        // accumulated left to right, so only rounding separates it from `m`
        prop_assert!((result.get("y").unwrap() - m).abs() < 1e-9);
    }
}
