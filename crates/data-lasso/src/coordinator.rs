//! Selection mode state machine.
//!
//! [`SelectionCoordinator`] owns its collaborators (camera, entry store,
//! overlay) and is driven by explicit calls from the host's input handling
//! and render loop. Notifications for the UI are queued and collected with
//! [`SelectionCoordinator::drain_events`].

use nalgebra::{Point3, Vector2};

use crate::{
    CameraProvider, ClickOutcome, EntryId, EntryStore, LassoCollector, LassoConfig, LassoError,
    LassoOverlay, ProjectionPlane, SelectionModifier, hover, resolve_selection,
};

/// Interaction mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Camera controls active, clicks ignored.
    #[default]
    Viewing,
    /// Clicks place lasso points, camera controls disabled.
    Selecting,
}

/// Notification published for UI affordances.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    ModeChanged(Mode),
    ModifierChanged(SelectionModifier),
    /// A lasso completed; carries the new selection.
    SelectionMade(Vec<EntryId>),
}

/// Drives lasso selection from user gestures.
pub struct SelectionCoordinator<C, S, O> {
    config: LassoConfig,
    camera: C,
    store: S,
    overlay: O,
    projection: ProjectionPlane,
    lasso: LassoCollector,
    mode: Mode,
    modifier: SelectionModifier,
    /// Seconds left before the finished lasso is removed from the overlay.
    cleanup_timer: Option<f32>,
    events: Vec<SelectionEvent>,
}

impl<C, S, O> SelectionCoordinator<C, S, O>
where
    C: CameraProvider,
    S: EntryStore,
    O: LassoOverlay,
{
    /// Creates a coordinator in [`Mode::Viewing`] with the projection plane
    /// placed for the camera's current state.
    pub fn new(config: LassoConfig, camera: C, store: S, overlay: O) -> Result<Self, LassoError> {
        config.validate()?;
        let mut projection = ProjectionPlane::from_config(&config);
        projection.update(&camera.camera());
        let lasso = LassoCollector::new(config.lasso_points);

        Ok(Self {
            config,
            camera,
            store,
            overlay,
            projection,
            lasso,
            mode: Mode::Viewing,
            modifier: SelectionModifier::None,
            cleanup_timer: None,
            events: Vec::new(),
        })
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn modifier(&self) -> SelectionModifier {
        self.modifier
    }

    #[inline]
    pub fn config(&self) -> &LassoConfig {
        &self.config
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }

    /// Mutable access to the camera. Call [`Self::camera_moved`] after
    /// changing it.
    pub fn camera_mut(&mut self) -> &mut C {
        &mut self.camera
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    pub fn projection(&self) -> &ProjectionPlane {
        &self.projection
    }

    /// Lasso points placed so far in the current selection.
    pub fn lasso_points(&self) -> &[Point3<f32>] {
        self.lasso.points()
    }

    /// Re-places the projection plane. Must be called after every camera
    /// movement; clicks are projected against the last placement.
    pub fn camera_moved(&mut self) {
        self.projection.update(&self.camera.camera());
    }

    /// Enters selection mode, starting a fresh lasso.
    ///
    /// Calling this while already selecting discards the points placed so far.
    pub fn enter_selection(&mut self) {
        self.cleanup_timer = None;
        self.lasso.cancel(&mut self.overlay);

        if self.mode == Mode::Selecting {
            log::debug!("selection restarted");
            return;
        }

        self.mode = Mode::Selecting;
        self.camera.set_controls_enabled(false);
        self.events.push(SelectionEvent::ModeChanged(Mode::Selecting));
        log::debug!("entered selection mode");
    }

    /// Leaves selection mode without selecting anything.
    pub fn exit_selection(&mut self) {
        if self.mode != Mode::Selecting {
            return;
        }

        self.lasso.cancel(&mut self.overlay);
        self.mode = Mode::Viewing;
        self.camera.set_controls_enabled(true);
        self.events.push(SelectionEvent::ModeChanged(Mode::Viewing));
        log::debug!("selection cancelled");
    }

    /// Sets the modifier applied when the next lasso completes.
    pub fn set_modifier(&mut self, modifier: SelectionModifier) {
        if self.modifier == modifier {
            return;
        }
        self.modifier = modifier;
        self.events.push(SelectionEvent::ModifierChanged(modifier));
    }

    /// Updates the lasso preview for a cursor at `ndc`.
    pub fn cursor_moved(&mut self, ndc: Vector2<f32>) {
        if self.mode != Mode::Selecting {
            return;
        }
        match self.camera.camera().ray_through(ndc) {
            Some(ray) => self.lasso.on_cursor_move(&self.projection, &ray, &mut self.overlay),
            None => self.overlay.set_preview(None),
        }
    }

    /// Handles a primary-button click at `ndc`.
    ///
    /// In selection mode this places a lasso point; the final point resolves
    /// the selection, publishes it to the store and returns to viewing.
    pub fn primary_click(&mut self, ndc: Vector2<f32>) -> ClickOutcome {
        if self.mode != Mode::Selecting {
            return ClickOutcome::Ignored;
        }

        let camera = self.camera.camera();
        let Some(ray) = camera.ray_through(ndc) else {
            log::trace!("no cursor ray for {ndc:?}, click ignored");
            return ClickOutcome::Ignored;
        };
        let outcome = self.lasso.on_primary_click(&self.projection, &ray, &mut self.overlay);

        if let ClickOutcome::Completed(points) = &outcome {
            self.mode = Mode::Viewing;
            self.camera.set_controls_enabled(true);

            let selection = resolve_selection(
                self.store.entries(),
                points,
                camera.position,
                self.store.selection(),
                self.modifier,
            );
            self.store.replace_selection(selection.clone());

            self.events.push(SelectionEvent::ModeChanged(Mode::Viewing));
            self.events.push(SelectionEvent::SelectionMade(selection));
            self.schedule_cleanup();
        }

        outcome
    }

    /// Advances the lasso cleanup timer by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        let Some(remaining) = self.cleanup_timer else {
            return;
        };
        let remaining = remaining - dt;
        if remaining <= 0.0 {
            self.cleanup_timer = None;
            self.overlay.clear_segments();
        } else {
            self.cleanup_timer = Some(remaining);
        }
    }

    /// Entry under the cursor at `ndc`, if any point is within `threshold`
    /// of the cursor ray.
    pub fn hovered(&self, ndc: Vector2<f32>, threshold: f32) -> Option<EntryId> {
        let ray = self.camera.camera().ray_through(ndc)?;
        hover::pick_entry(self.store.entries(), &ray, threshold)
    }

    /// Takes all notifications queued since the last call.
    pub fn drain_events(&mut self) -> Vec<SelectionEvent> {
        std::mem::take(&mut self.events)
    }

    fn schedule_cleanup(&mut self) {
        let delay = self.config.cleanup_delay();
        if delay > 0.0 {
            self.cleanup_timer = Some(delay);
        } else {
            self.overlay.clear_segments();
        }
    }
}
