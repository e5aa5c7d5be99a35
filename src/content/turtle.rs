/// A straight stroke in cell coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

#[derive(Debug, Clone, Copy)]
struct Pose {
    x: f32,
    y: f32,
    heading: f32,
}

/// Turtle interpreter for bracketed L-system strings.
///
/// `F` draws forward, `+`/`-` turn, `[`/`]` push/pop the pose. Anything else
/// is ignored. A `]` with nothing to pop is ignored as well.
#[derive(Debug, Clone)]
pub struct Turtle {
    start: Pose,
    turn: f32,
    step: f32,
}

impl Turtle {
    /// Angles in degrees, counter-clockwise on screen
    pub fn new(x: f32, y: f32, heading_deg: f32, angle_deg: f32, step: f32) -> Self {
        Self {
            start: Pose { x, y, heading: heading_deg.to_radians() },
            turn: angle_deg.to_radians(),
            step,
        }
    }

    pub fn trace(&self, program: &str) -> Vec<Segment> {
        let mut pose = self.start;
        let mut stack: Vec<Pose> = Vec::new();
        let mut segments = Vec::new();

        for symbol in program.chars() {
            match symbol {
                'F' => {
                    let x1 = pose.x + pose.heading.cos() * self.step;
                    let y1 = pose.y - pose.heading.sin() * self.step;
                    segments.push(Segment { x0: pose.x, y0: pose.y, x1, y1 });
                    pose.x = x1;
                    pose.y = y1;
                }
                '+' => pose.heading += self.turn,
                '-' => pose.heading -= self.turn,
                '[' => stack.push(pose),
                ']' => {
                    if let Some(saved) = stack.pop() {
                        pose = saved;
                    }
                }
                _ => {}
            }
        }

        segments
    }
}
