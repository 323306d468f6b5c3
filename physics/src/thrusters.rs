//! Rigidly mounted thruster geometry. Positions are offsets from the CG and directions are unit vectors, both in the
//! body frame; a command scales the direction into a force.
use rover_utils::{Scalar, Vector3};

/// A single thruster mount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thruster<T> {
    /// mounting point relative to CG, body frame.
    pub position: Vector3<T>,
    /// thrust direction, body frame. Expected to be unit length; not checked.
    pub direction: Vector3<T>,
}

impl<T: Scalar> Thruster<T> {
    pub fn new(position: Vector3<T>, direction: Vector3<T>) -> Self {
        //! thruster at `position` pushing along `direction`.
        Self {
            position,
            direction,
        }
    }

    pub fn force(&self, command: T) -> Vector3<T> {
        //! body-frame force for a signed command magnitude.
        self.direction * command
    }

    pub fn torque(&self, command: T) -> Vector3<T> {
        //! body-frame torque about the CG for a signed command magnitude.
        self.position.cross(&self.force(command))
    }
}

/// Fixed set of `N` thrusters, one command slot each.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrusterArray<T, const N: usize> {
    thrusters: [Thruster<T>; N],
}

impl<T: Scalar, const N: usize> ThrusterArray<T, N> {
    pub fn new(thrusters: [Thruster<T>; N]) -> Self {
        //! thruster `i` takes command slot `i`.
        Self { thrusters }
    }

    pub fn from_geometry(positions: [Vector3<T>; N], directions: [Vector3<T>; N]) -> Self {
        //! pairs up parallel position and direction arrays.
        let mut directions = directions.into_iter();
        Self::new(positions.map(|position| {
            Thruster::new(position, directions.next().unwrap_or_default())
        }))
    }

    pub const fn len(&self) -> usize {
        //! number of thrusters, always `N`.
        N
    }

    pub const fn is_empty(&self) -> bool {
        //! true only for a zero-thruster array.
        N == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Thruster<T>> {
        //! thrusters in command-slot order.
        self.thrusters.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Thruster<T>> {
        //! thruster in command slot `index`, if there is one.
        self.thrusters.get(index)
    }

    pub fn net_force(&self, commands: &[T; N]) -> Vector3<T> {
        //! sum of every thruster's force, body frame.
        self.thrusters
            .iter()
            .zip(commands)
            .fold(Vector3::zeros(), |acc, (t, &c)| acc + t.force(c))
    }

    pub fn net_torque(&self, commands: &[T; N]) -> Vector3<T> {
        //! sum of every thruster's moment about the CG, body frame.
        self.thrusters
            .iter()
            .zip(commands)
            .fold(Vector3::zeros(), |acc, (t, &c)| acc + t.torque(c))
    }
}
