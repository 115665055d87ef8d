use crate::transforms::{FrameTransforms, Projection};
use astro_kernel::PoseState;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads the pose and projection, then produces output. It
/// never mutates the pose; pose state is owned by the game loop.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given pose and projection.
    fn render(&self, pose: &PoseState, projection: &Projection) -> Self::Output;
}

/// Text renderer for headless runs and tests.
///
/// Describes the frame a GPU backend would draw: pose scalars, where the ship
/// and light end up, and the draw calls issued.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    ship_vertices: u32,
    light_indices: u32,
}

impl DebugTextRenderer {
    pub fn new(ship_vertices: u32, light_indices: u32) -> Self {
        Self {
            ship_vertices,
            light_indices,
        }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, pose: &PoseState, projection: &Projection) -> String {
        let frame = FrameTransforms::from_pose(pose, projection);
        let ship = frame.ship.model.transform_point3(glam::Vec3::ZERO);
        let light = frame.light_position;

        let mut out = String::new();
        out.push_str(&format!(
            "=== Frame (fov={:.0}, aspect={:.3}) ===\n",
            projection.fov_y_degrees, projection.aspect
        ));
        out.push_str(&format!(
            "Pose: offset={:.2} tilt_x={:.3} tilt_y={:.3}\n",
            pose.offset_x, pose.tilt_x, pose.tilt_y
        ));
        out.push_str(&format!("Ship origin: ({:.2}, {:.2}, {:.2})\n", ship.x, ship.y, ship.z));
        out.push_str(&format!(
            "Light: pos=({:.2}, {:.2}, {:.2}) color=({:.2}, {:.2}, {:.2})\n",
            light.x,
            light.y,
            light.z,
            frame.light_color.x,
            frame.light_color.y,
            frame.light_color.z
        ));
        out.push_str(&format!("  draw ship: {} vertices\n", self.ship_vertices));
        out.push_str(&format!("  draw_indexed light: {} indices\n", self.light_indices));

        out
    }
}
