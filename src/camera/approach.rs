//! Fly-to camera flights ("move front" / "move left").
//!
//! A flight computes one target position for the eye and then pulls the
//! eye toward it a little every frame until it is within the arrival
//! distance. Only one flight runs at a time: a request for the other
//! direction while a flight is in progress is dropped, a request for the
//! same direction retargets it.

use glam::Vec3;

use crate::camera::core::Camera;
pub use crate::options::ApproachStrategy;
use crate::options::ApproachOptions;
use crate::scene::box_model::BoxModel;

/// Where a flight goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApproachDirection {
    /// In front of the box (+z side).
    Front,
    /// Left of the box (-x side).
    Left,
}

/// Flight state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApproachState {
    /// No flight in progress.
    #[default]
    Idle,
    /// Flying to the front target.
    ApproachingFront,
    /// Flying to the left target.
    ApproachingLeft,
}

impl ApproachState {
    /// Direction of the running flight.
    #[must_use]
    pub fn direction(self) -> Option<ApproachDirection> {
        match self {
            Self::Idle => None,
            Self::ApproachingFront => Some(ApproachDirection::Front),
            Self::ApproachingLeft => Some(ApproachDirection::Left),
        }
    }
}

impl From<ApproachDirection> for ApproachState {
    fn from(direction: ApproachDirection) -> Self {
        match direction {
            ApproachDirection::Front => Self::ApproachingFront,
            ApproachDirection::Left => Self::ApproachingLeft,
        }
    }
}

/// Outcome of [`CameraApproach::request`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApproachRequest {
    /// A new flight started from idle.
    Started,
    /// The running flight in the same direction got a fresh target.
    Retargeted,
    /// The other direction is in flight; the request was ignored.
    Dropped,
}

/// The flight controller. Owns the state machine and the current target.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraApproach {
    state: ApproachState,
    target: Vec3,
    options: ApproachOptions,
}

impl CameraApproach {
    /// Idle controller with the given parameters.
    #[must_use]
    pub fn new(options: ApproachOptions) -> Self {
        Self {
            state: ApproachState::Idle,
            target: Vec3::ZERO,
            options,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> ApproachState {
        self.state
    }

    /// Whether a flight is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state != ApproachState::Idle
    }

    /// Target of the running (or last) flight.
    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Replace the parameters. A running flight keeps its target.
    pub fn set_options(&mut self, options: ApproachOptions) {
        self.options = options;
    }

    /// Ask for a flight toward `direction`.
    pub fn request(
        &mut self,
        direction: ApproachDirection,
        model: &BoxModel,
        camera: &Camera,
    ) -> ApproachRequest {
        let outcome = match self.state.direction() {
            None => ApproachRequest::Started,
            Some(running) if running == direction => {
                ApproachRequest::Retargeted
            }
            Some(_) => {
                log::debug!("{direction:?} flight dropped, {:?}", self.state);
                return ApproachRequest::Dropped;
            }
        };
        self.target = self.compute_target(direction, model, camera);
        self.state = direction.into();
        log::debug!("{direction:?} flight to {}", self.target);
        outcome
    }

    /// Target position for `direction` under the configured strategy.
    #[must_use]
    pub fn compute_target(
        &self,
        direction: ApproachDirection,
        model: &BoxModel,
        camera: &Camera,
    ) -> Vec3 {
        match self.options.strategy {
            ApproachStrategy::BoundingExtent => {
                let (dir, factor) = match direction {
                    ApproachDirection::Front => (
                        self.options.front_direction,
                        self.options.front_factor,
                    ),
                    ApproachDirection::Left => {
                        (self.options.left_direction, self.options.left_factor)
                    }
                };
                Vec3::from_array(dir).normalize_or_zero()
                    * model.bounding_extent()
                    * factor
            }
            ApproachStrategy::FitToView => {
                fit_to_view_target(direction, model, camera)
            }
        }
    }

    /// Move `eye` one frame toward the target. Returns `true` while the
    /// flight is still running afterwards.
    ///
    /// The eye is linearly interpolated by `dt * speed` (capped at 1), so
    /// every step with `dt > 0` strictly shortens the remaining distance.
    /// The flight ends once that distance drops below the arrival epsilon.
    pub fn advance(&mut self, eye: &mut Vec3, dt: f32) -> bool {
        if !self.is_active() {
            return false;
        }
        let t = (dt * self.options.speed).clamp(0.0, 1.0);
        *eye = eye.lerp(self.target, t);
        if eye.distance(self.target) < self.options.arrival_epsilon {
            log::debug!("{:?} flight arrived", self.state);
            self.state = ApproachState::Idle;
        }
        self.is_active()
    }

    /// Abort any flight.
    pub fn cancel(&mut self) {
        self.state = ApproachState::Idle;
    }
}

/// Eye position from which the whole box fits the view frustum.
///
/// The distance is the larger of the distances that fit the box height
/// into the vertical field of view and the facing side into the
/// horizontal one, measured from the near face of the box.
#[must_use]
pub fn fit_to_view_target(
    direction: ApproachDirection,
    model: &BoxModel,
    camera: &Camera,
) -> Vec3 {
    let size = model.bounding_size();
    let center_y = model.translation().y;
    let tan_v = (camera.fovy.to_radians() * 0.5).tan();
    let tan_h = (camera.horizontal_fov() * 0.5).tan();
    let depth_height = (size.y * 0.5) / tan_v;

    match direction {
        ApproachDirection::Front => {
            let depth_width = (size.x * 0.5) / tan_h;
            let z = depth_height.max(depth_width) + size.z * 0.5;
            Vec3::new(0.0, center_y, z)
        }
        ApproachDirection::Left => {
            let depth_width = (size.z * 0.5) / tan_h;
            let x = depth_height.max(depth_width) + size.x * 0.5;
            Vec3::new(-x, center_y, 0.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{CameraOptions, ModelOptions};

    fn fixtures() -> (BoxModel, Camera) {
        (
            BoxModel::new(&ModelOptions::default()),
            Camera::from_options(&CameraOptions::default(), 1.5),
        )
    }

    fn fit_options() -> ApproachOptions {
        ApproachOptions {
            strategy: ApproachStrategy::FitToView,
            ..ApproachOptions::default()
        }
    }

    #[test]
    fn bounding_extent_targets() {
        let (mut model, camera) = fixtures();
        let mut approach = CameraApproach::new(ApproachOptions::default());
        let front = approach.compute_target(
            ApproachDirection::Front,
            &model,
            &camera,
        );
        let expected = Vec3::new(0.0, 1.0, 1.0).normalize() * 1.3;
        assert!(front.distance(expected) < 1e-5);

        let _ = model.set_dimensions(4.0, 2.0).unwrap();
        assert_eq!(
            approach.request(ApproachDirection::Left, &model, &camera),
            ApproachRequest::Started
        );
        let expected = Vec3::new(-1.0, 1.0, 0.0).normalize() * 4.0 * 1.5;
        assert!(approach.target().distance(expected) < 1e-5);
    }

    #[test]
    fn fit_to_view_front_for_unit_box() {
        let (model, camera) = fixtures();
        let target =
            fit_to_view_target(ApproachDirection::Front, &model, &camera);

        let tan_v = (75f32.to_radians() * 0.5).tan();
        let tan_h = (camera.horizontal_fov() * 0.5).tan();
        let depth_height = 0.4 / tan_v;
        let depth_width = 0.5 / tan_h;
        assert!((target.z - (depth_height.max(depth_width) + 0.5)).abs() < 1e-5);
        assert_eq!(target.x, 0.0);
        assert_eq!(target.y, 0.4);
    }

    #[test]
    fn fit_to_view_left_mirrors_front_for_square_box() {
        let (model, camera) = fixtures();
        let approach = CameraApproach::new(fit_options());
        let front =
            approach.compute_target(ApproachDirection::Front, &model, &camera);
        let left =
            approach.compute_target(ApproachDirection::Left, &model, &camera);
        assert!((left.x + front.z).abs() < 1e-6);
        assert_eq!(left.z, 0.0);
    }

    #[test]
    fn fit_to_view_backs_off_for_wide_boxes() {
        let (mut model, camera) = fixtures();
        let near =
            fit_to_view_target(ApproachDirection::Front, &model, &camera);
        let _ = model.set_dimensions(12.0, 1.0).unwrap();
        let far = fit_to_view_target(ApproachDirection::Front, &model, &camera);
        assert!(far.z > near.z);
    }

    #[test]
    fn second_direction_is_dropped_while_first_flies() {
        let (model, camera) = fixtures();
        let mut approach = CameraApproach::new(ApproachOptions::default());
        let mut eye = camera.eye;

        assert_eq!(
            approach.request(ApproachDirection::Front, &model, &camera),
            ApproachRequest::Started
        );
        let front_target = approach.target();
        assert!(approach.advance(&mut eye, 0.016));

        assert_eq!(
            approach.request(ApproachDirection::Left, &model, &camera),
            ApproachRequest::Dropped
        );
        assert_eq!(approach.state(), ApproachState::ApproachingFront);
        assert_eq!(approach.target(), front_target);
    }

    #[test]
    fn same_direction_retargets() {
        let (mut model, camera) = fixtures();
        let mut approach = CameraApproach::new(ApproachOptions::default());
        let _ = approach.request(ApproachDirection::Front, &model, &camera);
        let first = approach.target();
        let _ = model.set_dimensions(3.0, 1.0).unwrap();
        assert_eq!(
            approach.request(ApproachDirection::Front, &model, &camera),
            ApproachRequest::Retargeted
        );
        assert!(approach.target().length() > first.length());
    }

    #[test]
    fn every_step_strictly_shortens_the_distance() {
        let (model, camera) = fixtures();
        for strategy in [ApproachStrategy::BoundingExtent, ApproachStrategy::FitToView] {
            let mut approach = CameraApproach::new(ApproachOptions {
                strategy,
                ..ApproachOptions::default()
            });
            for start in [
                Vec3::new(4.0, 2.0, 5.0),
                Vec3::new(-20.0, 0.1, 3.0),
                Vec3::new(0.0, 30.0, 0.0),
            ] {
                let mut eye = start;
                let _ = approach.request(ApproachDirection::Left, &model, &camera);
                let mut prev = eye.distance(approach.target());
                let mut frames = 0;
                while approach.advance(&mut eye, 0.016) {
                    let d = eye.distance(approach.target());
                    assert!(d < prev, "distance grew from {prev} to {d}");
                    prev = d;
                    frames += 1;
                    assert!(frames < 10_000);
                }
                assert!(eye.distance(approach.target()) < 0.09);
                assert_eq!(approach.state(), ApproachState::Idle);
            }
        }
    }

    #[test]
    fn zero_dt_holds_position() {
        let (model, camera) = fixtures();
        let mut approach = CameraApproach::new(ApproachOptions::default());
        let mut eye = camera.eye;
        let _ = approach.request(ApproachDirection::Front, &model, &camera);
        assert!(approach.advance(&mut eye, 0.0));
        assert_eq!(eye, camera.eye);
    }

    #[test]
    fn large_dt_snaps_to_target() {
        let (model, camera) = fixtures();
        let mut approach = CameraApproach::new(ApproachOptions::default());
        let mut eye = camera.eye;
        let _ = approach.request(ApproachDirection::Front, &model, &camera);
        assert!(!approach.advance(&mut eye, 5.0));
        assert!(eye.distance(approach.target()) < 1e-6);
    }

    #[test]
    fn idle_advance_is_a_no_op() {
        let mut approach = CameraApproach::new(ApproachOptions::default());
        let mut eye = Vec3::new(1.0, 2.0, 3.0);
        assert!(!approach.advance(&mut eye, 0.5));
        assert_eq!(eye, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn after_arrival_the_other_direction_starts() {
        let (model, camera) = fixtures();
        let mut approach = CameraApproach::new(ApproachOptions::default());
        let mut eye = camera.eye;
        let _ = approach.request(ApproachDirection::Front, &model, &camera);
        while approach.advance(&mut eye, 0.1) {}
        assert_eq!(
            approach.request(ApproachDirection::Left, &model, &camera),
            ApproachRequest::Started
        );
        assert_eq!(approach.state(), ApproachState::ApproachingLeft);
        approach.cancel();
        assert!(!approach.is_active());
    }
}
