//! Damped spring integration.

/// Spring response parameters.
///
/// The defaults match the fragment transition feel of the reference
/// scene (critically under-damped, settling in about a second).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    pub mass: f32,
    pub tension: f32,
    pub friction: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            mass: 1.0,
            tension: 120.0,
            friction: 14.0,
        }
    }
}

/// Displacement and velocity below which a spring counts as settled.
const REST_THRESHOLD: f32 = 1e-3;

/// One scalar damped spring chasing a target value.
#[derive(Debug, Clone, Copy)]
pub struct Spring {
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    /// A spring at rest at `value`.
    pub fn at(value: f32) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Retargets the spring without touching its current state, so a
    /// mid-flight change stays continuous.
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Advances one timestep with semi-implicit Euler integration.
    pub fn step(&mut self, config: &SpringConfig, dt: f32) {
        let mass = config.mass.max(1e-6);
        let acceleration =
            (-config.tension * (self.value - self.target) - config.friction * self.velocity) / mass;
        self.velocity += acceleration * dt;
        self.value += self.velocity * dt;
    }

    /// True once both displacement and velocity are negligible.
    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < REST_THRESHOLD && self.velocity.abs() < REST_THRESHOLD
    }

    /// Snaps exactly onto the target and kills residual velocity.
    pub fn snap(&mut self) {
        self.value = self.target;
        self.velocity = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spring_converges_to_its_target() {
        let config = SpringConfig::default();
        let mut spring = Spring::at(0.0);
        spring.set_target(10.0);

        for _ in 0..2000 {
            spring.step(&config, 1.0 / 120.0);
        }
        assert!((spring.value() - 10.0).abs() < 0.01);
        assert!(spring.is_settled());
    }

    #[test]
    fn test_retarget_keeps_current_state() {
        let config = SpringConfig::default();
        let mut spring = Spring::at(0.0);
        spring.set_target(10.0);
        for _ in 0..30 {
            spring.step(&config, 1.0 / 120.0);
        }

        let mid_value = spring.value();
        assert!(mid_value > 0.0 && mid_value < 10.0);
        spring.set_target(-5.0);
        // No jump on retarget, only a new destination.
        assert_eq!(spring.value(), mid_value);

        for _ in 0..2000 {
            spring.step(&config, 1.0 / 120.0);
        }
        assert!((spring.value() + 5.0).abs() < 0.01);
    }

    #[test]
    fn test_spring_at_rest_stays_put() {
        let config = SpringConfig::default();
        let mut spring = Spring::at(3.0);
        spring.step(&config, 1.0 / 120.0);
        assert_eq!(spring.value(), 3.0);
        assert!(spring.is_settled());
    }
}
