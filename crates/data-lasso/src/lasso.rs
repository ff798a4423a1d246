//! Lasso point collection.
//!
//! Each accepted click adds one point on the projection plane. Visual
//! feedback (the preview line following the cursor and the finalized lasso
//! edges) is pushed to a [`LassoOverlay`] so the collector stays independent
//! of any renderer.

use nalgebra::Point3;

use crate::{ProjectionPlane, Ray};

/// A line segment between two lasso points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point3<f32>,
    pub end: Point3<f32>,
}

impl Segment {
    pub fn new(start: Point3<f32>, end: Point3<f32>) -> Self {
        Self { start, end }
    }
}

/// Receiver for lasso visuals, implemented by the scene renderer.
pub trait LassoOverlay {
    /// Replaces the preview segment; `None` removes it.
    fn set_preview(&mut self, segment: Option<Segment>);

    /// Adds a finalized lasso edge.
    fn add_segment(&mut self, segment: Segment);

    /// Removes all finalized lasso edges.
    fn clear_segments(&mut self);
}

/// Overlay that simply records what it is given.
#[derive(Debug, Default, Clone)]
pub struct CollectingOverlay {
    preview: Option<Segment>,
    segments: Vec<Segment>,
}

impl CollectingOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preview(&self) -> Option<&Segment> {
        self.preview.as_ref()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

impl LassoOverlay for CollectingOverlay {
    fn set_preview(&mut self, segment: Option<Segment>) {
        self.preview = segment;
    }

    fn add_segment(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    fn clear_segments(&mut self) {
        self.segments.clear();
    }
}

/// Result of feeding a click to the collector.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// The cursor did not hit the projection plane; nothing changed.
    Ignored,
    /// The point was stored; the lasso now holds this many points.
    Accepted(usize),
    /// The last point was placed. The collector has been reset and hands
    /// back the full lasso in click order.
    Completed(Vec<Point3<f32>>),
}

/// Accumulates a fixed number of lasso points.
#[derive(Debug, Clone)]
pub struct LassoCollector {
    capacity: usize,
    points: Vec<Point3<f32>>,
}

impl LassoCollector {
    /// Creates an empty collector that completes after `capacity` points.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            points: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Points accepted so far, in click order.
    #[inline]
    pub fn points(&self) -> &[Point3<f32>] {
        &self.points
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Handles a primary-button click along `ray`.
    pub fn on_primary_click<O: LassoOverlay>(
        &mut self,
        projection: &ProjectionPlane,
        ray: &Ray,
        overlay: &mut O,
    ) -> ClickOutcome {
        let Some(point) = projection.project_cursor(ray) else {
            log::trace!("lasso click missed the projection plane");
            return ClickOutcome::Ignored;
        };

        if let Some(&previous) = self.points.last() {
            overlay.add_segment(Segment::new(previous, point));
        }
        self.points.push(point);

        if self.points.len() < self.capacity {
            return ClickOutcome::Accepted(self.points.len());
        }

        overlay.add_segment(Segment::new(point, self.points[0]));
        overlay.set_preview(None);
        let points = std::mem::replace(&mut self.points, Vec::with_capacity(self.capacity));
        log::debug!("lasso completed with {} points", points.len());
        ClickOutcome::Completed(points)
    }

    /// Updates the preview segment from the last point to the cursor.
    pub fn on_cursor_move<O: LassoOverlay>(
        &self,
        projection: &ProjectionPlane,
        ray: &Ray,
        overlay: &mut O,
    ) {
        let preview = self.points.last().and_then(|&last| {
            let cursor = projection.project_cursor(ray)?;
            Some(Segment::new(last, cursor))
        });
        overlay.set_preview(preview);
    }

    /// Drops all points and visuals without selecting anything.
    pub fn cancel<O: LassoOverlay>(&mut self, overlay: &mut O) {
        self.points.clear();
        overlay.set_preview(None);
        overlay.clear_segments();
    }
}
