use astro_kernel::PoseState;
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Camera distance behind the ship.
pub const SHIP_VIEW_DISTANCE: f32 = 20.0;

/// Perspective projection parameters shared by both passes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            aspect: width as f32 / height.max(1) as f32,
            ..Self::default()
        }
    }

    /// Right-handed perspective with a `[0, 1]` depth range.
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        )
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y_degrees: 45.0,
            aspect: 480.0 / 360.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Model, view and projection for one drawn object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectTransforms {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
}

impl ObjectTransforms {
    pub fn model_view_projection(&self) -> Mat4 {
        self.projection * self.view * self.model
    }
}

/// Everything a backend needs to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTransforms {
    pub ship: ObjectTransforms,
    pub light: ObjectTransforms,
    pub light_position: Vec3,
    pub light_color: Vec3,
}

impl FrameTransforms {
    pub fn from_pose(pose: &PoseState, projection: &Projection) -> Self {
        let projection = projection.matrix();
        Self {
            ship: ObjectTransforms {
                model: ship_model(pose),
                view: Mat4::from_translation(Vec3::new(0.0, 0.0, -SHIP_VIEW_DISTANCE)),
                projection,
            },
            light: ObjectTransforms {
                model: Mat4::from_translation(pose.light.position),
                view: Mat4::IDENTITY,
                projection,
            },
            light_position: pose.light.position,
            light_color: pose.light.color,
        }
    }
}

/// Translate by the offset, then bank about Z, then pitch about X.
pub fn ship_model(pose: &PoseState) -> Mat4 {
    Mat4::from_translation(Vec3::new(pose.offset_x, 0.0, 0.0))
        * Mat4::from_rotation_z(pose.tilt_x)
        * Mat4::from_rotation_x(pose.tilt_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn resting_ship_is_identity_model() {
        let frame = FrameTransforms::from_pose(&PoseState::default(), &Projection::default());
        assert_eq!(frame.ship.model, Mat4::IDENTITY);
        assert_eq!(frame.light.view, Mat4::IDENTITY);
    }

    #[test]
    fn ship_view_pulls_back_twenty() {
        let frame = FrameTransforms::from_pose(&PoseState::default(), &Projection::default());
        let eye_space = frame.ship.view.transform_point3(Vec3::ZERO);
        assert!(close(eye_space, Vec3::new(0.0, 0.0, -20.0)));
    }

    #[test]
    fn offset_translates_ship() {
        let pose = PoseState {
            offset_x: 3.0,
            ..PoseState::default()
        };
        let model = ship_model(&pose);
        assert!(close(model.transform_point3(Vec3::ZERO), Vec3::new(3.0, 0.0, 0.0)));
    }

    #[test]
    fn rotations_apply_pitch_before_bank() {
        let pose = PoseState {
            tilt_x: std::f32::consts::FRAC_PI_2,
            tilt_y: std::f32::consts::FRAC_PI_2,
            ..PoseState::default()
        };
        // Pitch about X takes +Y to +Z; bank about Z leaves +Z alone.
        let p = ship_model(&pose).transform_point3(Vec3::Y);
        assert!(close(p, Vec3::Z));
        // +X is untouched by the pitch, then banked to +Y.
        let p = ship_model(&pose).transform_point3(Vec3::X);
        assert!(close(p, Vec3::Y));
    }

    #[test]
    fn light_model_follows_light_position() {
        let mut pose = PoseState::default();
        pose.light.position = Vec3::new(0.0, 5.0, -33.0);
        let frame = FrameTransforms::from_pose(&pose, &Projection::default());
        assert!(close(
            frame.light.model.transform_point3(Vec3::ZERO),
            Vec3::new(0.0, 5.0, -33.0)
        ));
        assert_eq!(frame.light_position, pose.light.position);
        assert_eq!(frame.light_color, Vec3::ONE);
    }

    #[test]
    fn projection_uses_window_aspect() {
        let p = Projection::with_size(480, 360);
        assert!((p.aspect - 4.0 / 3.0).abs() < 1e-6);
        assert_eq!(p.fov_y_degrees, 45.0);
        assert!(!p.matrix().is_nan());
    }

    #[test]
    fn ship_centre_lands_in_clip_volume() {
        let frame = FrameTransforms::from_pose(&PoseState::default(), &Projection::default());
        let clip = frame.ship.model_view_projection() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!((0.0..=1.0).contains(&ndc.z));
    }
}
