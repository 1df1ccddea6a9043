use rand::rngs::ThreadRng;
use rand::Rng;
use std::f32::consts::{PI, TAU};

/// Largest heading change per step, in radians.
const MAX_TURN: f32 = 0.35;
/// Distance traveled per step, in virtual pixels.
const STEP_PX: f32 = 9.0;

/// Wandering synthetic pointer used when no one is driving the mouse.
///
/// Walks the viewport with a drifting heading and reflects off the
/// edges, so the dots keep reacting even in an idle terminal.
pub struct Autopilot {
    x: f32,
    y: f32,
    heading: f32,
    rng: ThreadRng,
}

impl Autopilot {
    pub fn new(width: f32, height: f32) -> Self {
        let mut rng = rand::thread_rng();
        let heading = rng.gen_range(0.0..TAU);
        Self {
            x: width / 2.0,
            y: height / 2.0,
            heading,
            rng,
        }
    }

    /// Advances one step and returns the new pointer position.
    pub fn step(&mut self, width: f32, height: f32) -> (f32, f32) {
        self.heading += self.rng.gen_range(-MAX_TURN..MAX_TURN);
        self.x += STEP_PX * self.heading.cos();
        self.y += STEP_PX * self.heading.sin();

        if self.x < 0.0 {
            self.x = -self.x;
            self.heading = PI - self.heading;
        } else if self.x > width {
            self.x = width - (self.x - width);
            self.heading = PI - self.heading;
        }
        if self.y < 0.0 {
            self.y = -self.y;
            self.heading = -self.heading;
        } else if self.y > height {
            self.y = height - (self.y - height);
            self.heading = -self.heading;
        }

        (self.x, self.y)
    }

    /// Moves back to the viewport center after a resize.
    pub fn recenter(&mut self, width: f32, height: f32) {
        self.x = width / 2.0;
        self.y = height / 2.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_stays_inside_the_viewport() {
        let mut pilot = Autopilot::new(800.0, 400.0);
        for _ in 0..2000 {
            let (x, y) = pilot.step(800.0, 400.0);
            assert!((0.0..=800.0).contains(&x));
            assert!((0.0..=400.0).contains(&y));
        }
    }

    #[test]
    fn test_recenter_returns_to_the_middle() {
        let mut pilot = Autopilot::new(800.0, 400.0);
        for _ in 0..50 {
            pilot.step(800.0, 400.0);
        }
        pilot.recenter(600.0, 300.0);
        let (x, y) = pilot.step(600.0, 300.0);
        assert!((x - 300.0).abs() <= STEP_PX + 1e-3);
        assert!((y - 150.0).abs() <= STEP_PX + 1e-3);
    }
}
