//! Host-page form controls and the commands they produce.
//!
//! The browser entry point listens on these element ids and asks
//! [`PageControl::command`] to turn the current field values into a
//! [`BoxCommand`]. Keeping the mapping here lets it be tested without a
//! DOM.

use glam::Vec3;

use crate::engine::command::BoxCommand;

/// A control group on the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageControl {
    /// `#set-dimension` button, reading `#width` and `#depth`.
    SetDimension,
    /// `#move-front` button.
    MoveFront,
    /// `#move-left` button.
    MoveLeft,
    /// `#ambient-intensity` slider.
    AmbientIntensity,
    /// `#directional-intensity` and `#light-x` / `#light-y` / `#light-z`
    /// sliders.
    DirectionalLight,
}

impl PageControl {
    /// Every control group, in page order.
    pub const ALL: [Self; 5] = [
        Self::SetDimension,
        Self::MoveFront,
        Self::MoveLeft,
        Self::AmbientIntensity,
        Self::DirectionalLight,
    ];

    /// Element ids whose events trigger this control.
    #[must_use]
    pub fn trigger_ids(self) -> &'static [&'static str] {
        match self {
            Self::SetDimension => &["set-dimension"],
            Self::MoveFront => &["move-front"],
            Self::MoveLeft => &["move-left"],
            Self::AmbientIntensity => &["ambient-intensity"],
            Self::DirectionalLight => {
                &["directional-intensity", "light-x", "light-y", "light-z"]
            }
        }
    }

    /// DOM event to listen for: buttons fire on `click`, sliders on
    /// every `input`.
    #[must_use]
    pub fn event_name(self) -> &'static str {
        match self {
            Self::SetDimension | Self::MoveFront | Self::MoveLeft => "click",
            Self::AmbientIntensity | Self::DirectionalLight => "input",
        }
    }

    /// Build the command from the page's numeric fields. `read` returns a
    /// field's value by element id (NaN when empty or missing).
    ///
    /// Dimensions are passed through as typed so invalid input reaches
    /// the engine and is rejected there with a logged error. Lighting
    /// sliders with a non-finite value yield `None`.
    #[must_use]
    pub fn command(self, read: impl Fn(&str) -> f32) -> Option<BoxCommand> {
        match self {
            Self::SetDimension => Some(BoxCommand::SetDimensions {
                width: read("width"),
                depth: read("depth"),
            }),
            Self::MoveFront => Some(BoxCommand::MoveFront),
            Self::MoveLeft => Some(BoxCommand::MoveLeft),
            Self::AmbientIntensity => {
                let intensity = read("ambient-intensity");
                intensity
                    .is_finite()
                    .then_some(BoxCommand::SetAmbientIntensity(intensity))
            }
            Self::DirectionalLight => {
                let intensity = read("directional-intensity");
                let position =
                    Vec3::new(read("light-x"), read("light-y"), read("light-z"));
                (intensity.is_finite() && position.is_finite()).then_some(
                    BoxCommand::SetDirectionalLight {
                        intensity,
                        position,
                    },
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::options::Options;
    use crate::scene::BoxScene;

    fn fields(values: &[(&str, f32)]) -> impl Fn(&str) -> f32 {
        let map: HashMap<String, f32> =
            values.iter().map(|&(k, v)| (k.to_owned(), v)).collect();
        move |id| map.get(id).copied().unwrap_or(f32::NAN)
    }

    #[test]
    fn lighting_sliders_reach_the_scene() {
        let read = fields(&[
            ("ambient-intensity", 0.3),
            ("directional-intensity", 1.7),
            ("light-x", -12.0),
            ("light-y", 9.5),
            ("light-z", 0.25),
        ]);
        let mut scene = BoxScene::new(&Options::default(), 800, 600);
        let _ = scene.take_lighting_dirty();

        for control in [PageControl::AmbientIntensity, PageControl::DirectionalLight] {
            let command = control.command(&read).unwrap();
            scene.apply(&command).unwrap();
        }
        assert_eq!(scene.lighting().ambient_intensity, 0.3);
        assert_eq!(scene.lighting().directional_intensity, 1.7);
        assert_eq!(scene.lighting().directional_position, [-12.0, 9.5, 0.25]);
        assert!(scene.take_lighting_dirty());
    }

    #[test]
    fn empty_light_field_sends_nothing() {
        let read = fields(&[("directional-intensity", 1.0), ("light-x", 1.0)]);
        assert_eq!(PageControl::DirectionalLight.command(&read), None);
        assert_eq!(PageControl::AmbientIntensity.command(&read), None);
    }

    #[test]
    fn dimension_button_forwards_typed_values() {
        let read = fields(&[("width", 0.5)]);
        let command = PageControl::SetDimension.command(&read);
        assert!(matches!(
            command,
            Some(BoxCommand::SetDimensions { width, depth })
                if width == 0.5 && depth.is_nan()
        ));
    }

    #[test]
    fn buttons_click_and_sliders_input() {
        assert_eq!(PageControl::MoveFront.event_name(), "click");
        assert_eq!(PageControl::DirectionalLight.event_name(), "input");
        let ids: Vec<_> = PageControl::ALL
            .iter()
            .flat_map(|c| c.trigger_ids())
            .collect();
        assert_eq!(ids.len(), 8);
    }

    #[test]
    fn host_page_has_every_control() {
        let page = include_str!("../../web/index.html");
        let fields = ["width", "depth"];
        for control in PageControl::ALL {
            for id in control.trigger_ids().iter().chain(&fields) {
                assert!(page.contains(&format!("id=\"{id}\"")), "#{id} missing");
            }
        }
    }
}
