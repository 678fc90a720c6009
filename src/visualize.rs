//! Visualizer hand-off.
//!
//! The trainer reports the map's state at the start of a run, every
//! `snapshot_every` samples, and at the end. Visualizers only ever see shared
//! references, and nothing they do feeds back into training.

use crate::som::{Coordinate, NeuronMap};
use serde::Serialize;

/// Read-only view of the training state at one point in a run.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    /// Zero-based pass index.
    pub pass: usize,
    /// Zero-based index of the last absorbed sample within the pass.
    pub sample_index: usize,
    /// Neighborhood radius in effect for that sample.
    pub radius: usize,
    /// The map being trained.
    pub map: &'a NeuronMap,
    /// The sample sequence in the order of the current pass.
    pub samples: &'a [Coordinate],
}

/// Receives snapshots while a map trains.
pub trait Visualizer {
    /// Called once before the first sample.
    fn on_start(&mut self, _snapshot: &Snapshot<'_>) {}

    /// Called after selected samples.
    fn on_sample(&mut self, snapshot: &Snapshot<'_>);

    /// Called once after the last sample.
    fn on_finish(&mut self, _snapshot: &Snapshot<'_>) {}
}

/// A visualizer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopVisualizer;

impl Visualizer for NoopVisualizer {
    fn on_sample(&mut self, _snapshot: &Snapshot<'_>) {}
}

/// Kind of event a [`Frame`] was captured at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameKind {
    /// Before training.
    Start,
    /// After a sample.
    Sample,
    /// After training.
    Finish,
}

/// An owned copy of a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// When the frame was captured.
    pub kind: FrameKind,
    /// Zero-based pass index.
    pub pass: usize,
    /// Zero-based sample index within the pass.
    pub sample_index: usize,
    /// Radius in effect.
    pub radius: usize,
    /// Neuron positions, flat (row-major for the grid).
    pub positions: Vec<Coordinate>,
}

impl Frame {
    fn capture(kind: FrameKind, snapshot: &Snapshot<'_>) -> Self {
        Self {
            kind,
            pass: snapshot.pass,
            sample_index: snapshot.sample_index,
            radius: snapshot.radius,
            positions: snapshot.map.positions(),
        }
    }
}

/// Records every snapshot it is handed.
#[derive(Debug, Clone, Default)]
pub struct SnapshotRecorder {
    frames: Vec<Frame>,
}

impl SnapshotRecorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded frames, oldest first.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Consumes the recorder, returning its frames.
    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }

    /// Number of recorded frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// True if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl Visualizer for SnapshotRecorder {
    fn on_start(&mut self, snapshot: &Snapshot<'_>) {
        self.frames.push(Frame::capture(FrameKind::Start, snapshot));
    }

    fn on_sample(&mut self, snapshot: &Snapshot<'_>) {
        self.frames.push(Frame::capture(FrameKind::Sample, snapshot));
    }

    fn on_finish(&mut self, snapshot: &Snapshot<'_>) {
        self.frames.push(Frame::capture(FrameKind::Finish, snapshot));
    }
}
