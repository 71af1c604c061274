use std::num::NonZeroUsize;

use rapier2d::prelude::IntegrationParameters;

use crate::physics_world::PhysicsWorld;

/// Advances a [`PhysicsWorld`] by a fixed timestep with fixed solver iteration counts.
///
/// Wall-clock frame time never reaches the solver. Calling [`SimulationStepper::step`] is the
/// only way simulated time moves forward.
#[derive(Clone, Debug)]
pub struct SimulationStepper {
    params: IntegrationParameters,
    steps: u64,
}

impl SimulationStepper {
    /// Iteration counts of zero are raised to one.
    pub fn new(timestep: f32, velocity_iterations: usize, position_iterations: usize) -> Self {
        let velocity = NonZeroUsize::new(velocity_iterations).unwrap_or(NonZeroUsize::MIN);
        let position = position_iterations.max(1);

        Self {
            params: IntegrationParameters {
                dt: timestep,
                num_solver_iterations: velocity.into(),
                num_internal_stabilization_iterations: position,
                ..IntegrationParameters::default()
            },
            steps: 0,
        }
    }

    /// Integrate exactly one fixed step.
    pub fn step(&mut self, world: &mut PhysicsWorld) {
        world.step(&self.params);
        self.steps += 1;
    }

    pub fn timestep(&self) -> f32 {
        self.params.dt
    }

    /// Number of steps taken so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Simulated time elapsed, in seconds.
    pub fn elapsed(&self) -> f64 {
        self.steps as f64 * self.params.dt as f64
    }
}
