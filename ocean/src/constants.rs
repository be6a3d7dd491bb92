/// Smoothing factor of the drag moving average fed to spray effects.
pub const DRAG_SMOOTHING: f32 = 0.05;

/// Largest total (|yaw| + |pitch| + |roll|) wave correction per tick, in
/// degrees. Larger corrections are scaled down to this size.
pub const MAX_WAVE_CORRECTION: f32 = 1.0;

/// Gain of the sail/oar power response curve.
pub const POWER_FALLOFF_GAIN: f32 = 10.0;

/// Default fixed simulation rate.
pub const TICKS_PER_SECOND: u32 = 60;

/// Below this squared distance constant-rate interpolation snaps to target.
pub const INTERP_SNAP_EPSILON: f32 = 1e-8;
