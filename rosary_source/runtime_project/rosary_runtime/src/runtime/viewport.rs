use super::{Runtime, configured_pose, configured_projection, populate};
use rosary_bridge::Effect;

impl Runtime {
    /// Rebuilds the scene for a new aspect ratio and replays the stored selection.
    /// Node IDs from before the rebuild stop resolving. A rebuild that yields no
    /// items leaves the previous scene in place.
    pub fn viewport_changed(&mut self, aspect: f32) {
        let mut scene = self.scene.successor();
        let sequence = populate(&mut scene, &self.config, self.layout);
        if sequence.is_empty() {
            log::error!("viewport: rebuild produced no items, keeping previous scene");
            return;
        }
        self.scene = scene;
        self.sequence = sequence;
        self.selection.forget_highlight();

        let projection = configured_projection(&self.config, aspect);
        self.aspect = projection.aspect;
        self.camera.reset(configured_pose(&self.config), projection);
        log::info!(
            "viewport: rebuilt {} items at aspect {:.3}",
            self.sequence.item_count(),
            self.aspect
        );
        self.effects.push(Effect::SceneRebuilt {
            item_count: self.sequence.item_count(),
        });
        self.replay_session();
    }

    /// Restores selection through the same path as live navigation.
    pub(super) fn replay_session(&mut self) {
        let record = self.session.record().clone();
        if let Err(err) = self.select_index(record.current_index as usize) {
            log::error!("replay: {err}");
        }
        self.set_zoom_level(record.zoom_level);
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }
}
