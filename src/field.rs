use crate::sampler::Point;

/// Divisor that turns remaining pointer distance into push strength.
const REPEL_FALLOFF: f32 = 5.0;

/// One dot of the effect. `original_*` is the grid anchor it always
/// returns to; `current_*` is where it is drawn this frame.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub original_x: f32,
    pub original_y: f32,
    pub current_x: f32,
    pub current_y: f32,
}

impl Particle {
    fn at_rest(point: Point) -> Self {
        Self {
            original_x: point.x as f32,
            original_y: point.y as f32,
            current_x: point.x as f32,
            current_y: point.y as f32,
        }
    }

    /// Distance from the anchor, zero when resting.
    pub fn displacement(&self) -> f32 {
        let dx = self.current_x - self.original_x;
        let dy = self.current_y - self.original_y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// The sampled dot set plus which dots are close enough to link.
///
/// Adjacency is measured between anchors once per populate and never
/// re-derived from displaced positions, so links stay stable while the
/// pointer stirs the dots around.
pub struct ParticleField {
    particles: Vec<Particle>,
    pairs: Vec<(usize, usize)>,
}

impl ParticleField {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
            pairs: Vec::new(),
        }
    }

    /// Replaces the field contents with freshly sampled points at rest.
    pub fn populate(&mut self, points: &[Point], neighbor_radius: f32) {
        self.particles = points.iter().copied().map(Particle::at_rest).collect();
        self.pairs = find_adjacent_pairs(&self.particles, neighbor_radius);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.pairs.clear();
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Ordered index pairs; every link appears once per direction.
    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Distinct links, counting each mirrored pair once.
    pub fn link_count(&self) -> usize {
        self.pairs.len() / 2
    }

    /// Pushes every particle away from the pointer, or snaps it back.
    ///
    /// Inside `repel_radius` the push grows as the pointer closes in,
    /// capped at `max_repel`. Outside it the particle returns to its
    /// anchor exactly, with no easing.
    pub fn apply_pointer(&mut self, pointer_x: f32, pointer_y: f32, repel_radius: f32, max_repel: f32) {
        for particle in &mut self.particles {
            let dx = pointer_x - particle.original_x;
            let dy = pointer_y - particle.original_y;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist < repel_radius {
                let angle = dy.atan2(dx);
                let repel = ((repel_radius - dist) / REPEL_FALLOFF).min(max_repel);
                particle.current_x = particle.original_x - angle.cos() * repel;
                particle.current_y = particle.original_y - angle.sin() * repel;
            } else {
                particle.current_x = particle.original_x;
                particle.current_y = particle.original_y;
            }
        }
    }
}

impl Default for ParticleField {
    fn default() -> Self {
        Self::new()
    }
}

fn find_adjacent_pairs(particles: &[Particle], neighbor_radius: f32) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for i in 0..particles.len() {
        for j in 0..particles.len() {
            if i == j {
                continue;
            }
            let dx = particles[i].original_x - particles[j].original_x;
            let dy = particles[i].original_y - particles[j].original_y;
            if (dx * dx + dy * dy).sqrt() <= neighbor_radius {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_with(anchors: &[(u32, u32)], neighbor_radius: f32) -> ParticleField {
        let points: Vec<Point> = anchors.iter().map(|&(x, y)| Point { x, y }).collect();
        let mut field = ParticleField::new();
        field.populate(&points, neighbor_radius);
        field
    }

    #[test]
    fn test_neighbors_link_within_radius_only() {
        let field = field_with(&[(100, 100), (110, 105), (200, 100)], 22.5);
        assert!(field.pairs().contains(&(0, 1)));
        assert!(field.pairs().contains(&(1, 0)));
        assert!(!field.pairs().iter().any(|&(a, b)| a == 2 || b == 2));
        assert_eq!(field.link_count(), 1);
    }

    #[test]
    fn test_pairs_are_symmetric() {
        let field = field_with(&[(0, 0), (10, 0), (20, 0), (300, 300)], 15.0);
        assert_eq!(field.pairs().len() % 2, 0);
        for &(a, b) in field.pairs() {
            assert!(field.pairs().contains(&(b, a)));
        }
    }

    #[test]
    fn test_far_pointer_snaps_back_exactly() {
        let mut field = field_with(&[(100, 100)], 22.5);
        field.apply_pointer(105.0, 100.0, 150.0, 30.0);
        assert!(field.particles()[0].displacement() > 0.0);
        field.apply_pointer(5000.0, 5000.0, 150.0, 30.0);
        assert_eq!(field.particles()[0].current_x, 100.0);
        assert_eq!(field.particles()[0].current_y, 100.0);
    }

    #[test]
    fn test_push_never_exceeds_the_cap() {
        let mut field = field_with(&[(100, 100)], 22.5);
        for step in 0..200 {
            let px = 50.0 + step as f32 * 1.5;
            field.apply_pointer(px, 100.0, 150.0, 30.0);
            assert!(field.particles()[0].displacement() <= 30.0 + 1e-3);
        }
    }

    #[test]
    fn test_push_grows_as_the_pointer_closes_in() {
        let mut field = field_with(&[(100, 100)], 22.5);
        let mut last = 0.0;
        let mut dist = 149.0;
        while dist > 0.0 {
            field.apply_pointer(100.0 + dist, 100.0, 150.0, 30.0);
            let displacement = field.particles()[0].displacement();
            assert!(displacement >= last);
            last = displacement;
            dist -= 7.0;
        }
        field.apply_pointer(100.0, 100.0, 150.0, 30.0);
        assert!((field.particles()[0].displacement() - 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_particles_move_directly_away_from_the_pointer() {
        let mut field = field_with(&[(100, 100)], 22.5);
        field.apply_pointer(150.0, 100.0, 150.0, 30.0);
        let particle = field.particles()[0];
        assert!(particle.current_x < 100.0);
        assert!((particle.current_y - 100.0).abs() < 1e-3);
        assert!((particle.displacement() - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_populate_replaces_the_previous_set() {
        let mut field = field_with(&[(0, 0), (10, 0)], 15.0);
        assert_eq!(field.len(), 2);
        field.populate(&[Point { x: 5, y: 5 }], 15.0);
        assert_eq!(field.len(), 1);
        assert!(field.pairs().is_empty());
    }

    #[test]
    fn test_empty_field_tolerates_the_pointer() {
        let mut field = ParticleField::new();
        field.populate(&[], 22.5);
        field.apply_pointer(10.0, 10.0, 150.0, 30.0);
        assert!(field.is_empty());
        assert_eq!(field.link_count(), 0);
    }
}
