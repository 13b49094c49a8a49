//! Diagnostics collaborator and a bounded in-memory implementation of it.
//!
//! The engine periodically emits net momentum and net kinetic energy. A sink
//! receives them as `(tick, value)` samples on two independent streams.

use log::info;
use std::collections::VecDeque;

/// Default number of samples kept per stream.
pub const DEFAULT_HISTORY_LEN: usize = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StreamId {
    NetMomentum,
    NetKineticEnergy,
}

impl StreamId {
    pub fn label(self) -> &'static str {
        match self {
            StreamId::NetMomentum => "net momentum",
            StreamId::NetKineticEnergy => "net kinetic energy",
        }
    }
}

pub trait DiagnosticsSink {
    fn append_sample(&mut self, stream: StreamId, tick: u64, value: f32);
}

/// Sink that drops every sample.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl DiagnosticsSink for NullSink {
    fn append_sample(&mut self, _stream: StreamId, _tick: u64, _value: f32) {}
}

/// Sink that forwards samples to the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl DiagnosticsSink for LogSink {
    fn append_sample(&mut self, stream: StreamId, tick: u64, value: f32) {
        info!("tick {tick}: {} = {value:.3}", stream.label());
    }
}

/// Fixed-capacity FIFO of samples; the oldest sample is evicted on overflow.
#[derive(Clone, Debug)]
pub struct SampleWindow {
    samples: VecDeque<(u64, f32)>,
    capacity: usize,
}

impl SampleWindow {
    /// ### Panics
    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "sample window needs room for one sample");
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, tick: u64, value: f32) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back((tick, value));
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latest(&self) -> Option<(u64, f32)> {
        self.samples.back().copied()
    }

    /// Samples from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = (u64, f32)> + '_ {
        self.samples.iter().copied()
    }

    /// `(min, max)` of the stored values, or `None` when empty.
    pub fn value_range(&self) -> Option<(f32, f32)> {
        self.samples.iter().fold(None, |acc, &(_, v)| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

/// One bounded window per diagnostics stream.
#[derive(Clone, Debug)]
pub struct DiagnosticsHistory {
    momentum: SampleWindow,
    kinetic_energy: SampleWindow,
}

impl Default for DiagnosticsHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_LEN)
    }
}

impl DiagnosticsHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            momentum: SampleWindow::with_capacity(capacity),
            kinetic_energy: SampleWindow::with_capacity(capacity),
        }
    }

    pub fn stream(&self, stream: StreamId) -> &SampleWindow {
        match stream {
            StreamId::NetMomentum => &self.momentum,
            StreamId::NetKineticEnergy => &self.kinetic_energy,
        }
    }

    pub fn clear(&mut self) {
        self.momentum.clear();
        self.kinetic_energy.clear();
    }
}

impl DiagnosticsSink for DiagnosticsHistory {
    fn append_sample(&mut self, stream: StreamId, tick: u64, value: f32) {
        match stream {
            StreamId::NetMomentum => self.momentum.push(tick, value),
            StreamId::NetKineticEnergy => self.kinetic_energy.push(tick, value),
        }
    }
}
