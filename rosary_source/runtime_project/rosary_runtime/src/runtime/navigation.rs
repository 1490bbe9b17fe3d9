use super::Runtime;
use crate::{HitResolver, NavigationError, selection};
use rosary_bridge::{CameraTarget, Effect};
use rosary_ids::ItemID;
use rosary_structs::Ray;

impl Runtime {
    /// Focuses item `index`. Out-of-range indices change nothing.
    pub fn select_index(&mut self, index: usize) -> Result<(), NavigationError> {
        let id = HitResolver::resolve_index(&self.sequence, index).inspect_err(|err| {
            log::warn!("selection rejected: {err}");
        })?;
        self.apply_selection(id);
        Ok(())
    }

    pub fn select_next(&mut self) {
        let index = selection::next_index(self.selection.current(), self.sequence.item_count());
        self.select_clamped(index);
    }

    pub fn select_previous(&mut self) {
        let index = selection::previous_index(self.selection.current());
        self.select_clamped(index);
    }

    /// Returns whether the ray selected an item.
    pub fn select_by_hit(&mut self, ray: &Ray) -> bool {
        match HitResolver::resolve_ray(&self.scene, &self.sequence, ray) {
            Some(id) => {
                self.apply_selection(id);
                true
            }
            None => {
                log::trace!("pointer: no selectable hit");
                false
            }
        }
    }

    /// Pointer in normalized device coordinates.
    pub fn select_by_pointer(&mut self, ndc_x: f32, ndc_y: f32) -> bool {
        match Ray::from_ndc(self.camera.pose(), self.camera.projection(), ndc_x, ndc_y) {
            Some(ray) => self.select_by_hit(&ray),
            None => false,
        }
    }

    /// Clamps, persists and re-frames the current item. Highlights are untouched.
    pub fn set_zoom_level(&mut self, level: u32) {
        let zoom = self.config.zoom;
        let level = level.clamp(zoom.min, zoom.max);
        self.selection.set_zoom(level);
        self.session.set_zoom_level(level);
        self.effects.push(Effect::ZoomChanged {
            level,
            enabled: self.session.record().zoom_enabled,
        });
        self.request_camera();
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom_level(self.selection.zoom().saturating_add(1));
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom_level(self.selection.zoom().saturating_sub(1));
    }

    /// When disabled the camera stays at the baseline at every zoom level.
    pub fn set_zoom_enabled(&mut self, enabled: bool) {
        self.session.set_zoom_enabled(enabled);
        self.effects.push(Effect::ZoomChanged {
            level: self.selection.zoom(),
            enabled,
        });
        self.request_camera();
    }

    /// Zoom back to minimum, then focus item 0 (one baseline transition).
    pub fn reset(&mut self) {
        let min = self.config.zoom.min;
        self.selection.set_zoom(min);
        self.session.set_zoom_level(min);
        self.effects.push(Effect::ZoomChanged {
            level: min,
            enabled: self.session.record().zoom_enabled,
        });
        self.select_clamped(0);
    }

    fn select_clamped(&mut self, index: usize) {
        if let Err(err) = self.select_index(index) {
            log::error!("clamped selection failed: {err}");
        }
    }

    /// The synchronous part of a selection, in order: highlight, prompts, chime,
    /// persistence. The camera request is issued last.
    pub(super) fn apply_selection(&mut self, id: ItemID) {
        let item = self.sequence.item_at(id);

        self.selection.clear_highlight(&mut self.scene, &self.sequence);
        self.effects.push(Effect::ClearPrompts);
        self.selection.focus(&mut self.scene, item);
        self.effects.push(Effect::FocusChanged {
            item: id,
            highlighted: item.scene_objects().to_vec(),
        });
        self.effects.push(Effect::ShowPrompts {
            item: id,
            prompts: item.prompts.clone(),
        });
        if !item.chime.is_none() {
            self.effects.push(Effect::PlayChime {
                item: id,
                cue: item.chime,
            });
        }
        log::debug!("selection: {id} ({:?})", item.role);

        self.session.set_current_index(id.0);
        self.request_camera();
    }

    /// Frames the current item above minimum zoom, otherwise returns to the baseline.
    pub(super) fn request_camera(&mut self) {
        let zoom = self.selection.zoom();
        let zoomed = zoom > self.config.zoom.min && self.session.record().zoom_enabled;
        let (handle, target) = if zoomed {
            let id = self.selection.current();
            let bounds = self.scene.world_bounds(self.sequence.item_at(id).bounds_node());
            let params = self.framing_params();
            (self.camera.focus(&bounds, zoom, &params), CameraTarget::Item(id))
        } else {
            (self.camera.restore_baseline(), CameraTarget::Baseline)
        };
        self.effects.push(Effect::CameraTransition {
            token: handle.0,
            target,
        });
    }
}
