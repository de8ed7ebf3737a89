//! Runtime options access for [`BoxEngine`].

use super::BoxEngine;
use crate::options::Options;

impl BoxEngine {
    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace options. Box width, depth and camera pose are kept; the
    /// model height and nudge range apply now. The initial width and
    /// depth, mesh segments and texture root only seed a new engine.
    pub fn set_options(&mut self, options: Options) {
        self.scene.set_options(&options);
        self.input.set_key_bindings(options.keybindings.clone());
        self.floor_renderer
            .apply_options(&self.context.device, &options.floor);
        self.box_renderer.update_model(
            &self.context.queue,
            self.scene.model(),
            options.model.ao_intensity,
            options.model.displacement_scale,
        );
        self.options = options;
    }
}
