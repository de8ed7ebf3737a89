//! GPU-free scene state: everything a frame needs to know besides the
//! GPU resources themselves.
//!
//! [`BoxScene`] owns the box model, the resize dolly, the camera flight
//! and the orbit controller, and turns [`BoxCommand`]s into changes of
//! that state. The engine drains the dirty flags each frame to decide
//! which uniforms to re-upload.

use glam::Vec3;

use super::box_model::{BoxModel, DimensionError};
use super::dimension::DimensionController;
use crate::camera::approach::{ApproachDirection, CameraApproach};
use crate::camera::controller::CameraController;
use crate::engine::command::BoxCommand;
use crate::options::{CameraOptions, LightingOptions, Options};

/// Mutable scene state driven by commands and the frame clock.
pub struct BoxScene {
    camera: CameraController,
    model: BoxModel,
    dimensions: DimensionController,
    approach: CameraApproach,
    lighting: LightingOptions,
    camera_options: CameraOptions,
    nudge_step: f32,
    model_dirty: bool,
    lighting_dirty: bool,
}

impl BoxScene {
    /// Build the start scene for a viewport of `width` x `height` pixels.
    #[must_use]
    pub fn new(options: &Options, width: u32, height: u32) -> Self {
        let model = BoxModel::new(&options.model);
        Self {
            camera: CameraController::new(&options.camera, width, height),
            dimensions: DimensionController::new(&model),
            model,
            approach: CameraApproach::new(options.approach.clone()),
            lighting: options.lighting.clone(),
            camera_options: options.camera.clone(),
            nudge_step: options.model.nudge_step,
            model_dirty: true,
            lighting_dirty: true,
        }
    }

    /// Apply one command.
    ///
    /// # Errors
    ///
    /// Returns [`DimensionError`] if a resize command carries invalid
    /// dimensions; the scene is left unchanged in that case.
    pub fn apply(&mut self, command: &BoxCommand) -> Result<(), DimensionError> {
        match *command {
            BoxCommand::SetDimensions { width, depth } => {
                self.resize_box(width, depth)?;
            }
            BoxCommand::NudgeDimensions { width, depth } => {
                let target = self
                    .model
                    .nudged(width * self.nudge_step, depth * self.nudge_step)?;
                self.resize_box(target.width, target.depth)?;
            }
            BoxCommand::MoveFront => self.request_flight(ApproachDirection::Front),
            BoxCommand::MoveLeft => self.request_flight(ApproachDirection::Left),
            BoxCommand::ResetCamera => {
                self.approach.cancel();
                self.camera.reset(&self.camera_options);
            }
            BoxCommand::RotateCamera { delta } => self.camera.rotate(delta),
            BoxCommand::PanCamera { delta } => self.camera.pan(delta),
            BoxCommand::Zoom { delta } => self.camera.zoom(delta),
            BoxCommand::SetAmbientIntensity(intensity) => {
                self.lighting.ambient_intensity = intensity.max(0.0);
                self.lighting_dirty = true;
            }
            BoxCommand::SetDirectionalLight {
                intensity,
                position,
            } => {
                self.lighting.directional_intensity = intensity.max(0.0);
                self.lighting.directional_position = position.to_array();
                self.lighting_dirty = true;
            }
        }
        Ok(())
    }

    fn resize_box(&mut self, width: f32, depth: f32) -> Result<(), DimensionError> {
        let outcome = self.dimensions.apply(
            &mut self.model,
            self.camera.camera.eye,
            self.approach.is_active(),
            width,
            depth,
        )?;
        self.camera.camera.eye += outcome.camera_offset;
        self.model_dirty = true;
        log::debug!(
            "box resized to {} x {}",
            outcome.dimensions.width,
            outcome.dimensions.depth
        );
        Ok(())
    }

    fn request_flight(&mut self, direction: ApproachDirection) {
        let _ = self
            .approach
            .request(direction, &self.model, &self.camera.camera);
    }

    /// Advance one frame: move the flight, then fold drag input into the
    /// camera.
    pub fn tick(&mut self, dt: f32) {
        let _ = self.approach.advance(&mut self.camera.camera.eye, dt);
        let _ = self.camera.update();
    }

    /// Replace option-driven parameters. Box width, depth and the camera
    /// pose are kept; height and the nudge range follow the new options.
    pub fn set_options(&mut self, options: &Options) {
        self.camera.apply_options(&options.camera);
        self.camera_options = options.camera.clone();
        self.approach.set_options(options.approach.clone());
        self.lighting = options.lighting.clone();
        self.nudge_step = options.model.nudge_step;
        let height_changed = options.model.height != self.model.height();
        self.model.apply_options(&options.model);
        if height_changed {
            self.dimensions.reset(&self.model);
            self.model_dirty = true;
        }
        self.lighting_dirty = true;
    }

    /// Track a new viewport size.
    pub fn resize_viewport(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
    }

    /// The camera controller.
    #[must_use]
    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    /// The box model.
    #[must_use]
    pub fn model(&self) -> &BoxModel {
        &self.model
    }

    /// The flight controller.
    #[must_use]
    pub fn approach(&self) -> &CameraApproach {
        &self.approach
    }

    /// Current lighting parameters.
    #[must_use]
    pub fn lighting(&self) -> &LightingOptions {
        &self.lighting
    }

    /// Current eye position.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        self.camera.camera.eye
    }

    /// Return and clear the "box changed" flag.
    pub fn take_model_dirty(&mut self) -> bool {
        std::mem::take(&mut self.model_dirty)
    }

    /// Return and clear the "lighting changed" flag.
    pub fn take_lighting_dirty(&mut self) -> bool {
        std::mem::take(&mut self.lighting_dirty)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::camera::approach::ApproachState;

    fn scene() -> BoxScene {
        let mut scene = BoxScene::new(&Options::default(), 1200, 800);
        assert!(scene.take_model_dirty());
        assert!(scene.take_lighting_dirty());
        scene
    }

    #[test]
    fn move_left_is_ignored_while_moving_front() {
        let mut s = scene();
        s.apply(&BoxCommand::MoveFront).unwrap();
        s.tick(0.016);
        s.apply(&BoxCommand::MoveLeft).unwrap();
        assert_eq!(s.approach().state(), ApproachState::ApproachingFront);

        for _ in 0..2000 {
            s.tick(0.016);
        }
        assert_eq!(s.approach().state(), ApproachState::Idle);
        let front = Vec3::new(0.0, 1.0, 1.0).normalize() * 1.3;
        assert!(s.eye().distance(front) < 0.1);
    }

    #[test]
    fn resize_mid_flight_does_not_move_camera() {
        let mut s = scene();
        s.apply(&BoxCommand::MoveLeft).unwrap();
        s.tick(0.016);
        let eye = s.eye();
        let target = s.approach().target();
        s.apply(&BoxCommand::SetDimensions {
            width: 6.0,
            depth: 6.0,
        })
        .unwrap();
        assert_eq!(s.eye(), eye);
        assert_eq!(s.approach().target(), target);
        assert_eq!(s.model().scale(), Vec3::new(6.0, 0.8, 6.0));
        assert!(s.take_model_dirty());
    }

    #[test]
    fn resize_when_idle_dollies_camera() {
        let mut s = scene();
        let before = s.eye();
        s.apply(&BoxCommand::SetDimensions {
            width: 3.0,
            depth: 2.0,
        })
        .unwrap();
        let moved = s.eye() - before;
        let horizontal = Vec3::new(before.x, 0.0, before.z).normalize();
        assert!(moved.distance(horizontal * 2.0) < 1e-5);
    }

    #[test]
    fn nudge_uses_configured_step_and_limits() {
        let mut s = scene();
        s.apply(&BoxCommand::NudgeDimensions {
            width: 1.0,
            depth: 0.0,
        })
        .unwrap();
        assert_eq!(s.model().dimensions().width, 2.0);
        s.apply(&BoxCommand::NudgeDimensions {
            width: -1.0,
            depth: 0.0,
        })
        .unwrap();
        let _ = s.apply(&BoxCommand::NudgeDimensions {
            width: -1.0,
            depth: 0.0,
        })
        .unwrap_err();
        assert_eq!(s.model().dimensions().width, 1.0);
    }

    #[test]
    fn invalid_dimensions_report_error() {
        let mut s = scene();
        assert!(s
            .apply(&BoxCommand::SetDimensions {
                width: f32::NAN,
                depth: 2.0
            })
            .is_err());
        assert!(!s.take_model_dirty());
    }

    #[test]
    fn reset_cancels_flight() {
        let mut s = scene();
        s.apply(&BoxCommand::MoveFront).unwrap();
        s.apply(&BoxCommand::RotateCamera {
            delta: Vec2::new(40.0, 0.0),
        })
        .unwrap();
        s.tick(0.1);
        s.apply(&BoxCommand::ResetCamera).unwrap();
        assert!(!s.approach().is_active());
        s.tick(0.016);
        assert!(s.eye().distance(Vec3::new(4.0, 2.0, 5.0)) < 1e-4);
    }

    #[test]
    fn lighting_commands_mark_dirty() {
        let mut s = scene();
        s.apply(&BoxCommand::SetAmbientIntensity(-1.0)).unwrap();
        assert_eq!(s.lighting().ambient_intensity, 0.0);
        s.apply(&BoxCommand::SetDirectionalLight {
            intensity: 1.5,
            position: Vec3::new(-3.0, 8.0, 1.0),
        })
        .unwrap();
        assert_eq!(s.lighting().directional_position, [-3.0, 8.0, 1.0]);
        assert!(s.take_lighting_dirty());
        assert!(!s.take_lighting_dirty());
    }

    #[test]
    fn set_options_updates_height_and_nudge_range() {
        let mut s = scene();
        s.apply(&BoxCommand::SetDimensions {
            width: 3.0,
            depth: 2.0,
        })
        .unwrap();
        let _ = s.take_model_dirty();

        let mut options = Options::default();
        options.model.height = 1.5;
        options.model.max_dimension = 4.0;
        s.set_options(&options);
        assert!(s.take_model_dirty());
        assert_eq!(s.model().scale(), Vec3::new(3.0, 1.5, 2.0));

        s.apply(&BoxCommand::NudgeDimensions {
            width: 2.0,
            depth: 0.0,
        })
        .unwrap();
        assert_eq!(s.model().dimensions().width, 4.0);
    }
}
