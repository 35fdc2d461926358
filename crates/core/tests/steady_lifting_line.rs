//! Steady horseshoe solve against classical results and its own symmetry
mod common;

use approx::assert_relative_eq;
use common::{full_wing, half_wing, lifting_line_estimate};
use vlm_core::solver::{
    integrate_forces, CirculationConvention, CirculationSolver, FlowConditions, InfluenceContext,
    SolverType,
};

#[test]
fn test_zero_alpha_produces_no_lift() {
    let mut vlm = half_wing(5.0, 1.0, 2, 10);
    let coefficients = vlm.run_lifting_line(&FlowConditions::new(30.0, 0.0)).unwrap();

    assert_relative_eq!(coefficients.cl, 0.0, epsilon = 1e-9);
    assert_relative_eq!(coefficients.cdi, 0.0, epsilon = 1e-9);
    for panel in vlm.plane().panels() {
        assert_relative_eq!(panel.circulation, 0.0, epsilon = 1e-9);
    }
}

#[test]
fn test_rectangular_wing_at_ten_degrees() {
    // Span 10, chord 1, one chordwise by ten spanwise panels per half
    let mut vlm = half_wing(5.0, 1.0, 1, 10);
    let flow = FlowConditions::new(30.0, 10.0);
    let coefficients = vlm.run_lifting_line(&flow).unwrap();

    assert!(coefficients.cl > 0.0, "CL = {}", coefficients.cl);
    assert!(coefficients.cdi > 0.0, "CDi = {}", coefficients.cdi);

    let expected = lifting_line_estimate(10.0_f64.to_radians().sin(), 10.0);
    assert_relative_eq!(coefficients.cl, expected, max_relative = 0.15);
    assert_eq!(vlm.solver_type(), Some(SolverType::LiftingLine));
    assert_eq!(vlm.cl(), coefficients.cl);
}

#[test]
fn test_lift_slope_trends_to_lifting_line() {
    let mut vlm = half_wing(5.0, 1.0, 4, 20);
    let coefficients = vlm.run_lifting_line(&FlowConditions::new(30.0, 5.0)).unwrap();
    let expected = lifting_line_estimate(5.0_f64.to_radians(), 10.0);
    assert_relative_eq!(coefficients.cl, expected, max_relative = 0.15);
}

#[test]
fn test_induced_drag_has_plausible_span_efficiency() {
    let mut vlm = half_wing(5.0, 1.0, 2, 20);
    let c = vlm.run_lifting_line(&FlowConditions::new(30.0, 5.0)).unwrap();
    // Downwash is sampled at the collocation points rather than in the
    // Trefftz plane, so only the order of magnitude is checked
    let e = c.span_efficiency(10.0).unwrap();
    assert!(e > 0.4 && e < 1.2, "span efficiency {e}");
}

#[test]
fn test_half_model_matches_full_wing() {
    let flow = FlowConditions::new(30.0, 6.0);
    let mut half = half_wing(5.0, 1.0, 2, 10);
    let mut full = full_wing(10.0, 1.0, 2, 20);

    let h = half.run_lifting_line(&flow).unwrap();
    let f = full.run_lifting_line(&flow).unwrap();

    assert_relative_eq!(h.cl, f.cl, max_relative = 1e-8);
    assert_relative_eq!(h.cdi, f.cdi, max_relative = 1e-8);
    assert_relative_eq!(2.0 * h.lift, f.lift, max_relative = 1e-8);
}

#[test]
fn test_spanwise_loading_peaks_at_root() {
    let mut vlm = half_wing(5.0, 1.0, 1, 10);
    vlm.run_lifting_line(&FlowConditions::new(30.0, 5.0)).unwrap();
    let gamma: Vec<f64> = vlm.plane().panels().iter().map(|p| p.circulation).collect();
    for pair in gamma.windows(2) {
        assert!(pair[0] > pair[1], "loading should fall towards the tip: {gamma:?}");
    }
}

#[test]
fn test_force_integration_is_idempotent() {
    let vlm = half_wing(5.0, 1.0, 2, 8);
    let flow = FlowConditions::new(30.0, 4.0);
    let context = InfluenceContext::horseshoe(vlm.plane(), vlm.config(), &flow);
    let solver = CirculationSolver::new(context.assemble()).unwrap();
    let rhs = vlm_core::solver::influence::freestream_rhs(
        vlm.plane().panels(),
        &flow.freestream_velocity(),
    );
    let solution = solver.solve(&rhs).unwrap();

    let first = integrate_forces(vlm.plane(), &solution, &flow, CirculationConvention::OwnCirculation);
    let second = integrate_forces(vlm.plane(), &solution, &flow, CirculationConvention::OwnCirculation);
    assert_eq!(first.coefficients, second.coefficients);
    assert_eq!(first.d_lift, second.d_lift);
}

#[test]
fn test_results_are_published_into_panels() {
    let mut vlm = half_wing(5.0, 1.0, 2, 6);
    let flow = FlowConditions::new(30.0, 5.0);
    let c = vlm.run_lifting_line(&flow).unwrap();

    let lift: f64 = vlm.plane().panels().iter().map(|p| p.d_lift).sum();
    let drag: f64 = vlm.plane().panels().iter().map(|p| p.d_drag).sum();
    assert_relative_eq!(lift, c.lift, max_relative = 1e-12);
    assert_relative_eq!(drag, c.induced_drag, max_relative = 1e-12);
    assert!(vlm.plane().panels().iter().all(|p| p.w_ind < 0.0));

    vlm.reset();
    assert!(vlm.coefficients().is_none());
    assert!(vlm.plane().panels().iter().all(|p| p.circulation == 0.0));
}
