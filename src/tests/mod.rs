#![cfg(test)]

use glam::{DVec2, DVec3};

use crate::{
    body_presets, generate, generate_with_report, position, solve_eccentric_anomalies,
    solve_eccentric_anomaly, true_anomaly, AnimationState, Body, BodyId, Orbit, OrbitalElements,
    SimulationParams, SolverOptions, Trajectories, Trajectory, TrajectoryError, Universe,
};
use std::f64::consts::{PI, TAU};

const RANDOM_ITERS: usize = 2048;


use assertions::*;
use seeders::*;

fn unit_orbit() -> Orbit {
    Orbit::new(1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0)
}

/// Rotates about the z axis, then x, then z again, one step at a time.
fn rotate_step_by_step(pqw: DVec2, elements: &OrbitalElements) -> DVec3 {
    fn rotate_z(v: DVec3, angle: f64) -> DVec3 {
        let (s, c) = angle.sin_cos();
        DVec3::new(v.x * c - v.y * s, v.x * s + v.y * c, v.z)
    }
    fn rotate_x(v: DVec3, angle: f64) -> DVec3 {
        let (s, c) = angle.sin_cos();
        DVec3::new(v.x, v.y * c - v.z * s, v.y * s + v.z * c)
    }

    let v = pqw.extend(0.0);
    let v = rotate_z(v, elements.arg_periapsis_deg.to_radians());
    let v = rotate_x(v, elements.inclination_deg.to_radians());
    rotate_z(v, elements.long_asc_node_deg.to_radians())
}

fn body(name: &str, elements: OrbitalElements) -> Body {
    Body::new(name, elements)
}

/// primary -> planet -> moon
fn three_level_chain() -> (Universe, [BodyId; 3]) {
    let mut universe = Universe::new();
    let primary = universe
        .add_body(body("primary", OrbitalElements::stationary()), None)
        .unwrap();
    let planet = universe
        .add_body(
            body(
                "planet",
                OrbitalElements::new(1.0, 0.1, 5.0, 30.0, 60.0, 10.0, 100.0),
            ),
            Some(primary),
        )
        .unwrap();
    let moon = universe
        .add_body(
            body(
                "moon",
                OrbitalElements::new(0.01, 0.05, 20.0, 90.0, 45.0, 200.0, 7.0),
            ),
            Some(planet),
        )
        .unwrap();

    (universe, [primary, planet, moon])
}

#[test]
fn unit_orbit_angle_3d() {
    let orbit = unit_orbit();

    assert_orbit_positions_3d(
        &orbit,
        &[
            ("unit orbit 1", 0.0 * PI, DVec3::new(1.0, 0.0, 0.0)),
            ("unit orbit 2", 0.5 * PI, DVec3::new(0.0, 1.0, 0.0)),
            ("unit orbit 3", 1.0 * PI, DVec3::new(-1.0, 0.0, 0.0)),
            ("unit orbit 4", 1.5 * PI, DVec3::new(0.0, -1.0, 0.0)),
            ("unit orbit 5", 2.0 * PI, DVec3::new(1.0, 0.0, 0.0)),
        ],
    );
}

#[test]
fn unit_orbit_angle_2d() {
    let orbit = unit_orbit();

    assert_orbit_positions_2d(
        &orbit,
        &[
            ("unit orbit 1", 0.0 * PI, DVec2::new(1.0, 0.0)),
            ("unit orbit 2", 0.5 * PI, DVec2::new(0.0, 1.0)),
            ("unit orbit 3", 1.0 * PI, DVec2::new(-1.0, 0.0)),
            ("unit orbit 4", 1.5 * PI, DVec2::new(0.0, -1.0)),
            ("unit orbit 5", 2.0 * PI, DVec2::new(1.0, 0.0)),
        ],
    );
}

#[test]
fn unit_orbit_transformation() {
    // Test how the inclination and LAN tilts points in the orbit.
    // Since inclination is zero, it should not do anything.
    let orbit = unit_orbit();

    let tests = [(1.0, 1.0), (1.0, 0.0), (0.0, 1.0), (0.0, 0.0)];

    for point in tests {
        let transformed = orbit.transform_pqw_vector(DVec2::new(point.0, point.1));

        assert_eq!(transformed.x, point.0);
        assert_eq!(transformed.y, point.1);
        assert_eq!(transformed.z, 0.0);
    }
}

#[test]
fn tilted_90deg() {
    let orbit = Orbit::new(1.0, 0.0, PI / 2.0, 0.0, 0.0, 0.0, 1.0);

    assert_orbit_positions_3d(
        &orbit,
        &[
            ("tilted 1", 0.0 * PI, DVec3::new(1.0, 0.0, 0.0)),
            ("tilted 2", 0.5 * PI, DVec3::new(0.0, 0.0, 1.0)),
            ("tilted 3", 1.0 * PI, DVec3::new(-1.0, 0.0, 0.0)),
            ("tilted 4", 1.5 * PI, DVec3::new(0.0, 0.0, -1.0)),
        ],
    );
}

#[test]
fn rotation_order_is_periapsis_inclination_node() {
    for _ in 0..RANDOM_ITERS {
        let elements = random_any();
        let orbit = Orbit::from(&elements);
        let nu = random_mean_anomaly();

        let expected = rotate_step_by_step(orbit.get_pqw_position_at_true_anomaly(nu), &elements);
        let scale = elements.semi_major_axis.max(1.0);

        assert_almost_eq_vec3(
            orbit.position_at_true_anomaly(nu) / scale,
            expected / scale,
            &format!("cached orbit vs step-by-step rotation for {elements:?} at {nu}"),
        );
        assert_almost_eq_vec3(
            position(
                nu,
                elements.semi_major_axis,
                elements.eccentricity,
                elements.inclination_deg,
                elements.arg_periapsis_deg,
                elements.long_asc_node_deg,
                None,
            ) / scale,
            expected / scale,
            &format!("free position fn vs step-by-step rotation for {elements:?} at {nu}"),
        );
    }
}

#[test]
fn rotation_order_matters() {
    // Inclined with a non-zero node and periapsis: swapping the two
    // z rotations must land somewhere else.
    let elements = OrbitalElements::new(1.0, 0.0, 45.0, 30.0, 70.0, 0.0, 1.0);
    let swapped = OrbitalElements {
        arg_periapsis_deg: elements.long_asc_node_deg,
        long_asc_node_deg: elements.arg_periapsis_deg,
        ..elements
    };

    let a = Orbit::from(&elements).position_at_true_anomaly(0.0);
    let b = Orbit::from(&swapped).position_at_true_anomaly(0.0);

    assert!((a - b).length() > 0.1, "{a} vs {b}");
}

#[test]
fn circular_mean_is_eccentric() {
    for _ in 0..RANDOM_ITERS {
        let m = random_mean_anomaly();
        assert_eq!(solve_eccentric_anomaly(m, 0.0, SolverOptions::default()), m);
    }

    let means: Vec<f64> = (0..RANDOM_ITERS).map(|_| random_mean_anomaly()).collect();
    let (eccs, report) = solve_eccentric_anomalies(&means, 0.0, SolverOptions::default());

    assert!(report.converged);
    assert_eq!(report.max_correction, 0.0);
    assert_eq!(eccs, means);
}

#[test]
fn keplers_equation_holds() {
    let options = SolverOptions::default();

    for step in 0..=99 {
        let e = step as f64 * 0.01;
        let means: Vec<f64> = (0..256).map(|i| i as f64 * TAU / 256.0).collect();
        let (eccs, report) = solve_eccentric_anomalies(&means, e, options);

        assert!(report.converged, "batch did not converge for e={e}: {report:?}");
        for (&m, &ecc) in means.iter().zip(&eccs) {
            assert_solves_kepler(m, e, ecc, "batched");
            assert_solves_kepler(m, e, solve_eccentric_anomaly(m, e, options), "scalar");
        }
    }
}

#[test]
fn keplers_equation_holds_random() {
    let options = SolverOptions::default();

    for _ in 0..RANDOM_ITERS {
        let e = rand::random_range(0.0..0.99);
        let m = random_mean_anomaly();
        assert_solves_kepler(m, e, solve_eccentric_anomaly(m, e, options), "random");
    }
}

#[test]
fn true_anomaly_continuous_at_apoapsis() {
    const EPSILON: f64 = 1e-6;
    let options = SolverOptions::default();

    for e in [0.0, 0.0167, 0.2, 0.5, 0.85, 0.97] {
        let before = true_anomaly(solve_eccentric_anomaly(PI - EPSILON, e, options), e);
        let at = true_anomaly(solve_eccentric_anomaly(PI, e, options), e);
        let after = true_anomaly(solve_eccentric_anomaly(PI + EPSILON, e, options), e);

        for (what, nu) in [("before", before), ("at", at), ("after", after)] {
            assert!(
                (nu - PI).abs() < 1e-4,
                "true anomaly {what} apoapsis is {nu} for e={e}"
            );
        }
        assert!(before <= after, "{before} > {after} for e={e}");
    }
}

#[test]
fn true_anomaly_quadrants() {
    let e = 0.3;
    let options = SolverOptions::default();

    for i in 0..64 {
        let m = i as f64 * TAU / 64.0;
        let nu = true_anomaly(solve_eccentric_anomaly(m, e, options), e);

        assert!((0.0..TAU).contains(&nu), "{nu} out of range for M={m}");
        // The true anomaly leads the mean anomaly on the way out, trails it back
        if m > 0.0 && m < PI {
            assert!(nu >= m, "nu={nu} < M={m}");
        } else if m > PI {
            assert!(nu <= m, "nu={nu} > M={m}");
        }
    }
}

#[test]
fn planar_orbit_is_plain_ellipse() {
    for _ in 0..RANDOM_ITERS {
        let a = rand::random_range(0.01..100.0);
        let e = rand::random_range(0.0..0.99);
        let nu = random_mean_anomaly();

        let r = a * (1.0 - e * e) / (1.0 + e * nu.cos());
        let expected = DVec3::new(r * nu.cos(), r * nu.sin(), 0.0);

        let pos = position(nu, a, e, 0.0, 0.0, 0.0, None);
        assert_almost_eq_vec3(pos / a, expected / a, &format!("a={a}, e={e}, nu={nu}"));
        assert_eq!(pos.z, 0.0);
    }
}

#[test]
fn moon_composition_is_translation() {
    for _ in 0..RANDOM_ITERS {
        let elements = random_any();
        let nu = random_mean_anomaly();
        let parent = DVec3::new(
            rand::random_range(-50.0..50.0),
            rand::random_range(-50.0..50.0),
            rand::random_range(-50.0..50.0),
        );

        let args = (
            elements.semi_major_axis,
            elements.eccentricity,
            elements.inclination_deg,
            elements.arg_periapsis_deg,
            elements.long_asc_node_deg,
        );
        let with_parent = position(nu, args.0, args.1, args.2, args.3, args.4, Some(parent));
        let without = position(nu, args.0, args.1, args.2, args.3, args.4, None);

        assert_eq!(with_parent, without + parent);
    }
}

#[test]
fn stationary_bodies_do_not_move() {
    let params = SimulationParams::new(50, 500.0);

    let primary = Orbit::from(OrbitalElements::stationary());
    let trajectory = generate(&primary, &params, None).unwrap();
    assert_eq!(trajectory.len(), 50);
    assert!(trajectory.iter().all(|p| p == DVec3::ZERO));

    // A period of zero pins the body to its periapsis
    let pinned = Orbit::from(OrbitalElements::new(2.0, 0.5, 0.0, 0.0, 0.0, 123.0, 0.0));
    let trajectory = generate(&pinned, &params, None).unwrap();
    assert!(trajectory.iter().all(|p| p == DVec3::new(1.0, 0.0, 0.0)));
}

#[test]
fn earth_like_orbit_end_to_end() {
    let a = 1.0;
    let e = 0.0167;
    let orbit = Orbit::from(OrbitalElements::new(a, e, 0.0, 0.0, 0.0, 0.0, 365.25));
    let trajectory = generate(&orbit, &SimulationParams::new(365, 365.25), None).unwrap();

    assert_eq!(trajectory.len(), 365);
    assert_almost_eq_vec3(
        trajectory.get(0).unwrap(),
        DVec3::new(a * (1.0 - e), 0.0, 0.0),
        "periapsis at frame 0",
    );

    let half = trajectory.get(365 / 2).unwrap();
    assert!((half.x + a * (1.0 + e)).abs() < 1e-3, "{half}");
    assert!(half.y.abs() < 2e-2, "{half}");
    assert_eq!(half.z, 0.0);
}

#[test]
fn frames_span_duration() {
    let params = SimulationParams::new(365, 365.25);

    assert_almost_eq(params.time_per_frame(), 365.25 / 365.0, "time per frame");
    assert_almost_eq(params.elapsed_at(100), 100.0 * 365.25 / 365.0, "elapsed");
    assert_eq!(SimulationParams::new(0, 10.0).time_per_frame(), 0.0);

    // Four frames over one period land on the quarter points
    let orbit = unit_orbit();
    let trajectory = generate(&orbit, &SimulationParams::new(4, 1.0), None).unwrap();
    let expected = [
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(0.0, 1.0, 0.0),
        DVec3::new(-1.0, 0.0, 0.0),
        DVec3::new(0.0, -1.0, 0.0),
    ];
    for (frame, (got, want)) in trajectory.iter().zip(expected).enumerate() {
        assert_almost_eq_vec3(got, want, &format!("frame {frame}"));
    }
}

#[test]
fn zero_frames_is_empty() {
    let (universe, _) = three_level_chain();
    let trajectories = Trajectories::generate_all(&universe, SimulationParams::new(0, 1.0)).unwrap();

    for (_, _, trajectory) in trajectories.iter(&universe) {
        assert!(trajectory.is_empty());
    }
}

#[test]
fn out_of_order_generation_is_rejected() {
    let (universe, [primary, planet, moon]) = three_level_chain();
    let params = SimulationParams::new(20, 40.0);
    let mut trajectories = Trajectories::new(&universe, params);

    assert_eq!(
        trajectories.generate_body(&universe, moon).unwrap_err(),
        TrajectoryError::ParentNotComputed {
            body: "moon".to_string(),
            parent: "planet".to_string(),
        }
    );
    assert!(matches!(
        trajectories.generate_body(&universe, planet),
        Err(TrajectoryError::ParentNotComputed { .. })
    ));
    assert!(trajectories.get(moon).is_none());
    assert!(trajectories.get(planet).is_none());

    trajectories.generate_body(&universe, primary).unwrap();
    trajectories.generate_body(&universe, planet).unwrap();
    trajectories.generate_body(&universe, moon).unwrap();

    let in_order = Trajectories::generate_all(&universe, params).unwrap();
    assert_eq!(trajectories, in_order);

    // An id handed out by a bigger universe
    let mut bigger = Universe::new();
    let mut foreign = None;
    for i in 0..5 {
        foreign = Some(
            bigger
                .add_body(body(&format!("body {i}"), OrbitalElements::stationary()), None)
                .unwrap(),
        );
    }
    let foreign = foreign.unwrap();

    assert_eq!(
        trajectories.generate_body(&universe, foreign).unwrap_err(),
        TrajectoryError::UnknownBody(foreign)
    );
}

#[test]
fn unconverged_solve_still_generates() {
    let (universe, [_, planet, _]) = three_level_chain();
    let params = SimulationParams {
        solver: SolverOptions {
            tolerance: 0.0,
            max_iterations: 2,
        },
        ..SimulationParams::new(30, 90.0)
    };

    let orbit = universe.get_orbit(planet).unwrap();
    let (_, report) = generate_with_report(orbit, &params, None).unwrap();
    let report = report.unwrap();
    assert!(!report.converged);
    assert_eq!(report.iterations, 2);

    let trajectories = Trajectories::generate_all(&universe, params).unwrap();
    assert_eq!(trajectories.iter(&universe).count(), universe.len());
    for (id, body, trajectory) in trajectories.iter(&universe) {
        assert_eq!(trajectory.len(), 30, "{}", body.name);
        assert!(trajectory.iter().all(|p| p.is_finite()), "{}", body.name);

        // Direct lookups with the same budget land on the same estimates
        for frame in [0, 11, 29] {
            let direct = universe
                .get_body_position(id, params.elapsed_at(frame), params.solver)
                .unwrap();
            assert_almost_eq_vec3(
                trajectory.get(frame).unwrap(),
                direct,
                &format!("{} at frame {frame}", body.name),
            );
        }
    }
}

#[test]
fn parent_trajectory_must_match_frames() {
    let orbit = unit_orbit();
    let parent = Trajectory::from(vec![DVec3::ZERO; 3]);

    assert_eq!(
        generate(&orbit, &SimulationParams::new(5, 1.0), Some(&parent)).unwrap_err(),
        TrajectoryError::FrameCountMismatch {
            expected: 5,
            actual: 3,
        }
    );
}

#[test]
fn moons_ride_with_their_planet() {
    let (universe, [primary, planet, moon]) = three_level_chain();
    let params = SimulationParams::new(100, 250.0);
    let trajectories = Trajectories::generate_all(&universe, params).unwrap();

    let moon_orbit = universe.get_orbit(moon).unwrap();
    let relative = generate(moon_orbit, &params, None).unwrap();

    for frame in 0..params.frame_count {
        let planet_pos = trajectories.position(planet, frame).unwrap();
        let moon_pos = trajectories.position(moon, frame).unwrap();

        assert_eq!(trajectories.position(primary, frame), Some(DVec3::ZERO));
        assert_almost_eq_vec3(
            moon_pos,
            planet_pos + relative.get(frame).unwrap(),
            &format!("moon at frame {frame}"),
        );
    }
}

#[test]
fn trajectories_match_direct_evaluation() {
    for _ in 0..64 {
        let mut universe = Universe::new();
        let mut previous = None;
        for depth in 0..4 {
            let elements = OrbitalElements {
                semi_major_axis: rand::random_range(0.01..10.0),
                ..random_any()
            };
            previous = Some(
                universe
                    .add_body(body(&format!("body {depth}"), elements), previous)
                    .unwrap(),
            );
        }

        let params = SimulationParams::new(64, rand::random_range(1.0..1e5));
        let trajectories = Trajectories::generate_all(&universe, params).unwrap();

        for (id, body, trajectory) in trajectories.iter(&universe) {
            for frame in [0, 1, 17, 63] {
                let direct = universe
                    .get_body_position(id, params.elapsed_at(frame), params.solver)
                    .unwrap();
                assert_almost_eq_vec3(
                    trajectory.get(frame).unwrap(),
                    direct,
                    &format!("{} at frame {frame}", body.name),
                );
            }
        }
    }
}

#[test]
fn preset_solar_system() {
    let config = body_presets::solar_system();
    let (universe, params) = config.load_system().unwrap();
    let trajectories = Trajectories::generate_all(&universe, params).unwrap();

    assert_eq!(params.frame_count, 365);
    for (id, body, trajectory) in trajectories.iter(&universe) {
        assert_eq!(trajectory.len(), 365, "{}", body.name);
        assert!(
            trajectory.iter().all(|p| p.is_finite()),
            "{} has non-finite positions",
            body.name
        );

        if let Some(parent) = universe.get_parent(id) {
            let elements = body.elements;
            let max_distance = elements.semi_major_axis * (1.0 + elements.eccentricity) + 1e-9;
            for frame in 0..params.frame_count {
                let offset = trajectory.get(frame).unwrap()
                    - trajectories.position(parent, frame).unwrap();
                assert!(
                    offset.length() <= max_distance,
                    "{} strays from its parent at frame {frame}",
                    body.name
                );
            }
        }
    }

    let earth = universe.get_body_index_with_name("earth").unwrap();
    let distance = trajectories.position(earth, 0).unwrap().length();
    assert!((0.98..1.02).contains(&distance), "earth at {distance} AU");
}

#[test]
fn animation_follows_focus() {
    let (universe, [_, planet, _]) = three_level_chain();
    let params = SimulationParams::new(10, 10.0);
    let trajectories = Trajectories::generate_all(&universe, params).unwrap();

    let mut state = AnimationState::new(params.frame_count);
    assert_eq!(state.focus_position(&trajectories), Some(DVec3::ZERO));

    state.set_focus(Some(planet));
    state.seek(4);
    assert_eq!(
        state.focus_position(&trajectories),
        trajectories.position(planet, 4)
    );
    assert_almost_eq(state.elapsed(params.time_per_frame()), 4.0, "elapsed");
}

#[test]
fn trajectory_serializes_as_triples() {
    let trajectory = Trajectory::from(vec![DVec3::new(1.0, 2.0, 3.0), DVec3::ZERO]);
    let json = serde_json::to_string(&trajectory).unwrap();

    assert_eq!(json, "[[1.0,2.0,3.0],[0.0,0.0,0.0]]");
    assert_eq!(serde_json::from_str::<Trajectory>(&json).unwrap(), trajectory);
}

#[test]
fn random_angles_wrap() {
    for _ in 0..RANDOM_ITERS {
        let elements = random_elliptic();
        let orbit = Orbit::from(&elements);
        let nu = random_mean_anomaly();

        assert_almost_eq_angle(
            orbit.get_mean_anomaly_at_time(elements.orbital_period).unwrap(),
            orbit.get_mean_anomaly_at_epoch(),
            "one full period later",
        );
        assert_almost_eq_vec3(
            orbit.position_at_true_anomaly(nu) / elements.semi_major_axis,
            orbit.position_at_true_anomaly(nu + TAU) / elements.semi_major_axis,
            "true anomaly plus a turn",
        );
    }
}
