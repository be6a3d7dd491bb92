use bevy::prelude::*;

/// Order of the per-tick simulation, all in `FixedUpdate`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Smooth rudder, sails, lens and hoists toward their targets
    Controls,
    /// Sail and oar power, rudder yaw
    Propulsion,
    /// Buoyancy, drag and wave following
    Float,
}
