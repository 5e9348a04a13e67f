// Integration tests (native) for the drawing pass, using a recording surface
// in place of the canvas so geometry and alpha can be asserted exactly.

use constellation_bg::{LINK_WIDTH, Particle, ParticleField, Rgba, Surface, render};

#[derive(Debug, Clone, PartialEq)]
enum Op {
    Clear { width: f64, height: f64 },
    Circle { x: f64, y: f64, radius: f64, color: Rgba },
    Line { x1: f64, y1: f64, x2: f64, y2: f64, color: Rgba, width: f64 },
}

#[derive(Default)]
struct RecordingSurface {
    ops: Vec<Op>,
}

impl RecordingSurface {
    fn circles(&self) -> Vec<&Op> {
        self.ops.iter().filter(|op| matches!(op, Op::Circle { .. })).collect()
    }

    fn lines(&self) -> Vec<&Op> {
        self.ops.iter().filter(|op| matches!(op, Op::Line { .. })).collect()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.ops.push(Op::Clear { width, height });
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba) {
        self.ops.push(Op::Circle { x, y, radius, color });
    }

    fn line_segment(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Rgba, width: f64) {
        self.ops.push(Op::Line { x1, y1, x2, y2, color, width });
    }
}

fn pair_field(ax: f64, ay: f64, bx: f64, by: f64) -> ParticleField {
    let particles = vec![
        Particle::from_parts(ax, ay, 0.0, 0.0, 1.5, 0.4),
        Particle::from_parts(bx, by, 0.0, 0.0, 1.5, 0.4),
    ];
    ParticleField::from_particles(particles, 400.0, 400.0).expect("valid field")
}

#[test]
fn distant_particles_are_not_linked() {
    let field = pair_field(0.0, 0.0, 150.0, 0.0);
    let mut surface = RecordingSurface::default();
    render(&field, &mut surface);
    assert_eq!(surface.circles().len(), 2);
    assert!(surface.lines().is_empty());
}

#[test]
fn particles_exactly_at_threshold_are_not_linked() {
    let field = pair_field(0.0, 0.0, 100.0, 0.0);
    let mut surface = RecordingSurface::default();
    render(&field, &mut surface);
    assert!(surface.lines().is_empty());
}

#[test]
fn nearby_particles_get_a_distance_faded_link() {
    let field = pair_field(0.0, 0.0, 50.0, 0.0);
    let mut surface = RecordingSurface::default();
    render(&field, &mut surface);

    let lines = surface.lines();
    assert_eq!(lines.len(), 1);
    let Op::Line { x1, y1, x2, y2, color, width } = lines[0] else {
        unreachable!()
    };
    assert_eq!((*x1, *y1, *x2, *y2), (0.0, 0.0, 50.0, 0.0));
    // alpha = 0.2 - 50/500
    assert!((color.a - 0.1).abs() < 1e-12);
    assert_eq!(*width, LINK_WIDTH);
}

#[test]
fn dots_use_the_accent_hue_and_their_own_opacity() {
    let particles = vec![
        Particle::from_parts(10.0, 20.0, 0.0, 0.0, 2.0, 0.25),
        Particle::from_parts(300.0, 350.0, 0.0, 0.0, 0.5, 0.65),
    ];
    let field = ParticleField::from_particles(particles, 400.0, 400.0).expect("valid field");
    let mut surface = RecordingSurface::default();
    render(&field, &mut surface);

    let circles = surface.circles();
    assert_eq!(
        *circles[0],
        Op::Circle { x: 10.0, y: 20.0, radius: 2.0, color: Rgba::accent(0.25) }
    );
    assert_eq!(
        *circles[1],
        Op::Circle { x: 300.0, y: 350.0, radius: 0.5, color: Rgba::accent(0.65) }
    );
}

#[test]
fn dots_draw_before_links() {
    // Three mutually-close particles: 3 circles then 3 pair links.
    let particles = vec![
        Particle::from_parts(0.0, 0.0, 0.0, 0.0, 1.0, 0.5),
        Particle::from_parts(30.0, 0.0, 0.0, 0.0, 1.0, 0.5),
        Particle::from_parts(0.0, 30.0, 0.0, 0.0, 1.0, 0.5),
    ];
    let field = ParticleField::from_particles(particles, 400.0, 400.0).expect("valid field");
    let mut surface = RecordingSurface::default();
    render(&field, &mut surface);

    assert_eq!(surface.ops.len(), 6);
    assert!(surface.ops[..3].iter().all(|op| matches!(op, Op::Circle { .. })));
    assert!(surface.ops[3..].iter().all(|op| matches!(op, Op::Line { .. })));
}
