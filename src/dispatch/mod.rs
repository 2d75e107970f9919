//! Command-triggered mixing
//!
//! One arriving [`ControlInput`] means exactly one mix pass and one sink
//! write. [`MixerTask`] owns the latest command (overwritten on arrival),
//! the mixer and the sink; nothing persists beyond the most recent
//! input/output pair.
//!
//! ## Concurrency
//!
//! The task holds no shared state. Callers serialize `handle_command`
//! invocations themselves (e.g. from a single dispatch loop); the mixer
//! underneath is a pure function, so no locking is needed here.

use crate::mixer::{ControlInput, GeometryError, MotorOutputs, MultirotorMixer, RotorGeometry};
use crate::output::{OutputError, OutputSink};

/// Glue between a command source and an output sink
///
/// Built once at startup from a validated geometry/sink pair; afterwards it
/// only reacts to commands.
pub struct MixerTask<S: OutputSink> {
    mixer: MultirotorMixer,
    input: ControlInput,
    sink: S,
}

impl<S: OutputSink> MixerTask<S> {
    /// Build a task after checking the geometry against the sink
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::CountMismatch` if the sink drives a different
    /// number of channels than the geometry describes. A mismatched pair is
    /// fatal here; it is never discovered on the command path.
    pub fn new(geometry: RotorGeometry, sink: S) -> Result<Self, GeometryError> {
        if geometry.rotor_count() != sink.channel_count() {
            return Err(GeometryError::CountMismatch {
                expected: sink.channel_count(),
                actual: geometry.rotor_count(),
            });
        }
        crate::log_info!("mixer task ready: {} rotors", geometry.rotor_count());
        Ok(Self {
            mixer: MultirotorMixer::new(geometry),
            input: ControlInput::default(),
            sink,
        })
    }

    /// Accept one command: overwrite the stored input, mix, hand the result
    /// to the sink
    ///
    /// The returned outputs are the same values the sink received, for
    /// callers that also want to inspect them.
    ///
    /// # Errors
    ///
    /// Propagates the sink's `OutputError` if the downstream write fails.
    pub fn handle_command(&mut self, input: ControlInput) -> Result<MotorOutputs, OutputError> {
        self.input = input;
        let outputs = self.mixer.mix(&self.input);
        if let Err(e) = self.sink.write(&outputs) {
            crate::log_warn!("output write failed: {}", e);
            return Err(e);
        }
        Ok(outputs)
    }

    /// Latest command seen by the task
    pub fn input(&self) -> ControlInput {
        self.input
    }

    /// The mixer core
    pub fn mixer(&self) -> &MultirotorMixer {
        &self.mixer
    }

    /// The sink receiving the outputs
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the sink
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mixer::GeometryPreset;

    /// Mock sink recording every write (no hardware dependencies)
    struct RecordingSink {
        channels: usize,
        writes: usize,
        last: Option<MotorOutputs>,
        fail_next: bool,
    }

    impl RecordingSink {
        fn new(channels: usize) -> Self {
            Self {
                channels,
                writes: 0,
                last: None,
                fail_next: false,
            }
        }
    }

    impl OutputSink for RecordingSink {
        fn channel_count(&self) -> usize {
            self.channels
        }

        fn write(&mut self, outputs: &MotorOutputs) -> Result<(), OutputError> {
            if self.fail_next {
                self.fail_next = false;
                return Err(OutputError::HardwareFault);
            }
            self.writes += 1;
            self.last = Some(outputs.clone());
            Ok(())
        }
    }

    #[test]
    fn test_rotor_count_mismatch_is_fatal() {
        let sink = RecordingSink::new(6);
        let result = MixerTask::new(RotorGeometry::quad_x(), sink);
        assert!(matches!(
            result,
            Err(GeometryError::CountMismatch {
                expected: 6,
                actual: 4
            })
        ));
    }

    #[test]
    fn test_one_write_per_command() {
        let sink = RecordingSink::new(4);
        let mut task = MixerTask::new(RotorGeometry::quad_x(), sink).unwrap();

        for i in 0..5 {
            task.handle_command(ControlInput::new(0.0, 0.0, 0.0, 0.1 * i as f32))
                .unwrap();
        }
        assert_eq!(task.sink().writes, 5);
    }

    #[test]
    fn test_latest_command_overwrites() {
        let sink = RecordingSink::new(4);
        let mut task = MixerTask::new(RotorGeometry::quad_x(), sink).unwrap();

        task.handle_command(ControlInput::new(0.5, 0.0, 0.0, 0.5))
            .unwrap();
        let second = ControlInput::new(0.0, -0.25, 0.0, 0.8);
        task.handle_command(second).unwrap();

        assert_eq!(task.input(), second);

        // The sink holds exactly what the mixer produced for the latest input
        let expected = task.mixer().mix(&second);
        assert_eq!(task.sink().last.as_ref(), Some(&expected));
    }

    #[test]
    fn test_sink_failure_propagates() {
        let mut sink = RecordingSink::new(4);
        sink.fail_next = true;
        let mut task = MixerTask::new(RotorGeometry::quad_x(), sink).unwrap();

        let result = task.handle_command(ControlInput::new(0.0, 0.0, 0.0, 0.5));
        assert_eq!(result, Err(OutputError::HardwareFault));
        assert_eq!(task.sink().writes, 0);

        // The stored command still advanced; the next write succeeds
        task.handle_command(ControlInput::new(0.0, 0.0, 0.0, 0.5))
            .unwrap();
        assert_eq!(task.sink().writes, 1);
    }

    #[test]
    fn test_task_works_for_every_preset() {
        for preset in [
            GeometryPreset::QuadX,
            GeometryPreset::QuadPlus,
            GeometryPreset::Quadshot,
        ] {
            let geometry = preset.geometry();
            let sink = RecordingSink::new(geometry.rotor_count());
            let mut task = MixerTask::new(geometry, sink).unwrap();

            let out = task
                .handle_command(ControlInput::new(0.2, -0.1, 0.1, 0.6))
                .unwrap();
            assert_eq!(out.rotor_count(), 4);
            for &t in out.as_slice() {
                assert!((0.0..=1.0).contains(&t));
            }
        }
    }
}
