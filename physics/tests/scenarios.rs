//! End-to-end checks of the derivative evaluation against hand-worked rigid-body cases.
use approx::{assert_abs_diff_eq, assert_relative_eq};
use rover_physics::{
    Environment, Rover, RoverModel, Thruster, ThrusterArray, VehicleConfig, VehicleParams,
};
use rover_utils::{Matrix3, Scalar, Vector3};

const F: f64 = 3.0;
const MASS: f64 = 15.0;

/// five thrusters; only the first two are positioned to matter, the rest are idle lateral units.
fn five_thruster_params(volume: f64, cb: Vector3<f64>) -> VehicleParams<f64, 5> {
    let idle = Thruster::new(Vector3::new(0.4, 0.0, 0.0), Vector3::unit_y());
    VehicleParams {
        mass: MASS,
        volume,
        inertia: Matrix3::from_diagonal(Vector3::new(0.5, 0.8, 1.25)),
        cb,
        thrusters: ThrusterArray::new([
            Thruster::new(Vector3::zeros(), Vector3::unit_x()),
            Thruster::new(Vector3::new(0.0, 1.0, 0.0), Vector3::unit_x()),
            idle,
            idle,
            idle,
        ]),
        singularity_epsilon: f64::SINGULARITY_EPSILON,
    }
}

fn rotation_about_z(angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    Matrix3::from_array([[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]])
}

fn rotation_about_x(angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    Matrix3::from_array([[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]])
}

#[test]
fn neutrally_buoyant_rover_at_rest_stays_at_rest() {
    let env = Environment::default();
    let mut rover = RoverModel::new(
        five_thruster_params(env.neutral_volume(MASS), Vector3::zeros()),
        env,
    )
    .unwrap();

    rover.update(&[0.0; 5]).unwrap();

    assert_abs_diff_eq!(rover.velocity.derivative, Vector3::zeros(), epsilon = 1e-12);
    assert_abs_diff_eq!(rover.angvel.derivative, Vector3::zeros(), epsilon = 1e-12);
    assert_eq!(rover.position.derivative, Vector3::zeros());
    assert_eq!(rover.attitude.derivative, Matrix3::zeros());
}

#[test]
fn thruster_at_cg_accelerates_without_torque() {
    // no gravity and no volume, so thrust is the only load.
    let mut rover =
        RoverModel::new(five_thruster_params(0.0, Vector3::zeros()), Environment::new(0.0, 1035.0))
            .unwrap();
    rover.update(&[F, 0.0, 0.0, 0.0, 0.0]).unwrap();

    assert_eq!(rover.last_forces().thrust_torque_body, Vector3::zeros());
    assert_relative_eq!(rover.velocity.derivative, Vector3::new(F / MASS, 0.0, 0.0));
    assert_eq!(rover.angvel.derivative, Vector3::zeros());

    // yawed 90 degrees: body +x now points along inertial +y.
    let yaw = rotation_about_z(std::f64::consts::FRAC_PI_2);
    rover.attitude.value = yaw;
    rover.update(&[F, 0.0, 0.0, 0.0, 0.0]).unwrap();
    assert_abs_diff_eq!(
        rover.velocity.derivative,
        yaw * Vector3::new(F / MASS, 0.0, 0.0),
        epsilon = 1e-15
    );
    assert_abs_diff_eq!(rover.velocity.derivative, Vector3::new(0.0, F / MASS, 0.0), epsilon = 1e-15);
}

#[test]
fn offset_thruster_produces_pure_yaw_torque() {
    let mut rover =
        RoverModel::new(five_thruster_params(0.0, Vector3::zeros()), Environment::new(0.0, 1035.0))
            .unwrap();
    rover.update(&[0.0, F, 0.0, 0.0, 0.0]).unwrap();

    let torque = rover.last_forces().thrust_torque_body;
    assert_eq!(torque, Vector3::new(0.0, 1.0, 0.0).cross(&Vector3::new(F, 0.0, 0.0)));
    assert_eq!(torque, Vector3::new(0.0, 0.0, -F));
    assert_relative_eq!(rover.angvel.derivative, *rover.moi_inv() * Vector3::new(0.0, 0.0, -F));
    assert_relative_eq!(rover.angvel.derivative, Vector3::new(0.0, 0.0, -F / 1.25));
}

#[test]
fn attitude_derivative_is_skew_of_angular_velocity() {
    let omega = 0.7;
    let mut rover = RoverModel::new(five_thruster_params(0.0, Vector3::zeros()), Environment::default())
        .unwrap();
    rover.angvel.value = Vector3::new(0.0, 0.0, omega);
    rover.update(&[0.0; 5]).unwrap();

    let expected = Matrix3::from_array([[0.0, -omega, 0.0], [omega, 0.0, 0.0], [0.0, 0.0, 0.0]]);
    assert_eq!(rover.attitude.derivative, expected);
}

#[test]
fn attitude_derivative_is_right_multiplied() {
    // R_dot = R * skew(w), not skew(w) * R.
    let w = Vector3::new(0.2, -0.1, 0.4);
    let r = rotation_about_x(0.5) * rotation_about_z(-1.1);
    let mut rover = RoverModel::new(five_thruster_params(0.0, Vector3::zeros()), Environment::default())
        .unwrap();
    rover.angvel.value = w;
    rover.attitude.value = r;
    rover.update(&[0.0; 5]).unwrap();

    assert_relative_eq!(rover.attitude.derivative, r * Matrix3::skew(&w), epsilon = 1e-15);
    // R^T R_dot is skew-symmetric for an orthonormal R.
    let body_rate = r.transpose() * rover.attitude.derivative;
    assert_abs_diff_eq!(body_rate, -body_rate.transpose(), epsilon = 1e-12);
}

#[test]
fn update_is_idempotent_and_leaves_values_alone() {
    let mut rover: Rover = VehicleConfig::reference().build().unwrap();
    rover.position.value = Vector3::new(1.0, -4.0, 12.0);
    rover.velocity.value = Vector3::new(0.3, 0.1, -0.05);
    rover.angvel.value = Vector3::new(0.02, -0.3, 0.15);
    rover.attitude.value = rotation_about_x(0.2) * rotation_about_z(0.9);
    let commands = [10.0, -4.0, 2.5, 2.5, 1.0];

    let values = (
        rover.position.value,
        rover.velocity.value,
        rover.angvel.value,
        rover.attitude.value,
    );

    rover.update(&commands).unwrap();
    let first = (
        rover.position.derivative,
        rover.velocity.derivative,
        rover.angvel.derivative,
        rover.attitude.derivative,
    );
    let first_forces = *rover.last_forces();

    rover.update(&commands).unwrap();
    let second = (
        rover.position.derivative,
        rover.velocity.derivative,
        rover.angvel.derivative,
        rover.attitude.derivative,
    );

    assert_eq!(first, second);
    assert_eq!(&first_forces, rover.last_forces());
    assert_eq!(
        values,
        (
            rover.position.value,
            rover.velocity.value,
            rover.angvel.value,
            rover.attitude.value
        )
    );
    assert_eq!(rover.mass(), 12.0);
}

#[test]
fn buoyancy_above_cg_rights_a_rolled_rover() {
    // CB 0.1 m above the CG (NED body frame, so -z), rolled 0.3 rad.
    let h = 0.1;
    let roll = 0.3;
    let env = Environment::default();
    let volume = env.neutral_volume(MASS);
    let mut rover =
        RoverModel::new(five_thruster_params(volume, Vector3::new(0.0, 0.0, -h)), env).unwrap();
    rover.attitude.value = rotation_about_x(roll);
    rover.update(&[0.0; 5]).unwrap();

    let b = env.gravity * env.water_density * volume;
    let torque = rover.last_forces().buoyancy_torque_body;
    assert_relative_eq!(torque, Vector3::new(-h * roll.sin() * b, 0.0, 0.0), epsilon = 1e-12);
    assert!(rover.angvel.derivative.x < 0.0);
    // force balance is unaffected by where the buoyancy acts.
    assert_abs_diff_eq!(rover.velocity.derivative, Vector3::zeros(), epsilon = 1e-12);
}

#[test]
fn single_precision_model_agrees_with_double() {
    let params32 = VehicleParams::<f32, 1> {
        mass: 4.0,
        volume: 0.002,
        inertia: Matrix3::from_diagonal(Vector3::new(0.1, 0.2, 0.3)),
        cb: Vector3::new(0.0, 0.0, -0.01),
        thrusters: ThrusterArray::new([Thruster::new(Vector3::new(0.1, 0.05, 0.0), Vector3::unit_x())]),
        singularity_epsilon: f32::SINGULARITY_EPSILON,
    };
    let params64 = VehicleParams::<f64, 1> {
        mass: 4.0,
        volume: 0.002,
        inertia: Matrix3::from_diagonal(Vector3::new(0.1, 0.2, 0.3)),
        cb: Vector3::new(0.0, 0.0, -0.01),
        thrusters: ThrusterArray::new([Thruster::new(Vector3::new(0.1, 0.05, 0.0), Vector3::unit_x())]),
        singularity_epsilon: f64::SINGULARITY_EPSILON,
    };
    let mut r32 = RoverModel::new(params32, Environment::default()).unwrap();
    let mut r64 = RoverModel::new(params64, Environment::default()).unwrap();
    r32.angvel.value = Vector3::new(0.1, 0.2, 0.3);
    r64.angvel.value = Vector3::new(0.1, 0.2, 0.3);
    r32.update(&[2.0]).unwrap();
    r64.update(&[2.0]).unwrap();

    let widen = |v: Vector3<f32>| Vector3::new(f64::from(v.x), f64::from(v.y), f64::from(v.z));
    assert_relative_eq!(widen(r32.velocity.derivative), r64.velocity.derivative, epsilon = 1e-4, max_relative = 1e-4);
    assert_relative_eq!(widen(r32.angvel.derivative), r64.angvel.derivative, epsilon = 1e-4, max_relative = 1e-4);
}

#[test]
fn small_single_precision_vehicle_builds() {
    // a palm-sized f32 vehicle; det(I) ~ 1e-7 is well conditioned relative to its scale.
    let params = VehicleParams::<f32, 1> {
        mass: 0.3,
        volume: 0.0,
        inertia: Matrix3::from_diagonal(Vector3::new(0.005, 0.005, 0.005)),
        cb: Vector3::zeros(),
        thrusters: ThrusterArray::new([Thruster::new(Vector3::new(0.0, 0.02, 0.0), Vector3::unit_x())]),
        singularity_epsilon: f32::SINGULARITY_EPSILON,
    };
    let mut rover = RoverModel::new(params, Environment::new(0.0, 1035.0)).unwrap();
    rover.update(&[0.01]).unwrap();
    // (0, 0.02, 0) x (0.01, 0, 0) = (0, 0, -2e-4); Izz = 0.005
    assert_relative_eq!(rover.angvel.derivative, Vector3::new(0.0, 0.0, -0.04), max_relative = 1e-5);

    let mut flat = params;
    flat.inertia = Matrix3::from_array([[0.005, 0.005, 0.0], [0.005, 0.005, 0.0], [0.0, 0.0, 0.005]]);
    assert!(RoverModel::new(flat, Environment::new(0.0, 1035.0)).is_err());
}
