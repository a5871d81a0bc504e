//! Cooperative multi-tick tasks
//!
//! Timers and color blends are plain data advanced once per tick by their
//! owning controller. Nothing here suspends; a task is `{phase, progress,
//! kind}` and each call to [`Task::step`] is one tick-slice.

use bevy::color::Srgba;
use bevy::prelude::*;
use indexmap::IndexMap;

use crate::math::{Real, lerp_color};

pub type TaskId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskPhase {
    Running,
    Finished,
}

/// Whose surface a blend writes to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendTarget {
    OwnSurface,
    Partner(Entity),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TaskKind {
    /// Ends a pour after `duration` seconds; progress counts elapsed seconds.
    PourTimeout { duration: Real },
    /// Interpolates `start -> end`; progress is the blend factor `t`.
    Blend {
        target: BlendTarget,
        start: Srgba,
        end: Srgba,
        rate: Real,
    },
}

/// What one tick-slice of a task produced
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TaskOutput {
    Waiting,
    TimedOut,
    Tint {
        target: BlendTarget,
        color: Srgba,
        done: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Task {
    pub kind: TaskKind,
    pub phase: TaskPhase,
    pub progress: Real,
}

impl Task {
    pub fn pour_timeout(duration: Real) -> Self {
        Self {
            kind: TaskKind::PourTimeout { duration },
            phase: TaskPhase::Running,
            progress: 0.0,
        }
    }

    pub fn blend(target: BlendTarget, start: Srgba, end: Srgba, rate: Real) -> Self {
        Self {
            kind: TaskKind::Blend {
                target,
                start,
                end,
                rate,
            },
            phase: TaskPhase::Running,
            progress: 0.0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase == TaskPhase::Finished
    }

    /// Run one tick-slice. Finished tasks produce `Waiting` forever.
    pub fn step(&mut self, dt: Real) -> TaskOutput {
        if self.is_finished() {
            return TaskOutput::Waiting;
        }

        match self.kind {
            TaskKind::PourTimeout { duration } => {
                self.progress += dt;
                if self.progress >= duration {
                    self.phase = TaskPhase::Finished;
                    TaskOutput::TimedOut
                } else {
                    TaskOutput::Waiting
                }
            }
            TaskKind::Blend {
                target,
                start,
                end,
                rate,
            } => {
                self.progress += dt * rate;
                let done = self.progress >= 1.0;
                if done {
                    self.phase = TaskPhase::Finished;
                }
                TaskOutput::Tint {
                    target,
                    color: lerp_color(start, end, self.progress),
                    done,
                }
            }
        }
    }
}

/// Tasks owned by one controller, in registration order.
#[derive(Clone, Debug, Default)]
pub struct TaskRegistry {
    tasks: IndexMap<TaskId, Task>,
    next_id: TaskId,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TaskId, &Task)> {
        self.tasks.iter().map(|(&id, task)| (id, task))
    }

    pub fn spawn(&mut self, task: Task) -> TaskId {
        let id = self.next_id;
        self.next_id += 1;
        self.tasks.insert(id, task);
        id
    }

    /// Run the first slice of a task right away, the way a freshly started
    /// routine runs until its first suspension point.
    pub fn spawn_and_step(&mut self, task: Task, dt: Real) -> (TaskId, TaskOutput) {
        let id = self.spawn(task);
        let output = self.step_one(id, dt).unwrap_or(TaskOutput::Waiting);
        (id, output)
    }

    pub fn step_one(&mut self, id: TaskId, dt: Real) -> Option<TaskOutput> {
        let task = self.tasks.get_mut(&id)?;
        let output = task.step(dt);
        if task.is_finished() {
            self.tasks.shift_remove(&id);
        }
        Some(output)
    }

    /// Advance every registered task by one tick and drop the ones that finished.
    pub fn advance(&mut self, dt: Real) -> Vec<TaskOutput> {
        let outputs = self
            .tasks
            .values_mut()
            .map(|task| task.step(dt))
            .collect();
        self.tasks.retain(|_, task| !task.is_finished());
        outputs
    }

    /// Drop every pending task. Nothing cancelled here can produce output later.
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.tasks.len();
        self.tasks.clear();
        cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLUE: Srgba = Srgba::new(0.0, 0.0, 1.0, 1.0);
    const GREEN: Srgba = Srgba::new(0.0, 1.0, 0.0, 1.0);

    #[test]
    fn timeout_fires_once_when_duration_elapses() {
        let mut task = Task::pour_timeout(1.0);
        assert_eq!(task.step(0.25), TaskOutput::Waiting);
        assert_eq!(task.step(0.25), TaskOutput::Waiting);
        assert_eq!(task.step(0.25), TaskOutput::Waiting);
        assert_eq!(task.step(0.25), TaskOutput::TimedOut);
        assert!(task.is_finished());
        assert_eq!(task.step(0.25), TaskOutput::Waiting);
    }

    #[test]
    fn blend_reaches_target_at_rate_three() {
        let mut task = Task::blend(BlendTarget::OwnSurface, BLUE, GREEN, 3.0);

        match task.step(0.125) {
            TaskOutput::Tint { color, done, .. } => {
                assert!(!done);
                assert_eq!(color, lerp_color(BLUE, GREEN, 0.375));
            }
            other => panic!("unexpected output {other:?}"),
        }
        task.step(0.125);
        match task.step(0.125) {
            TaskOutput::Tint { color, done, .. } => {
                assert!(done);
                assert_eq!(color, GREEN);
            }
            other => panic!("unexpected output {other:?}"),
        }
    }

    #[test]
    fn registry_drops_finished_tasks_and_keeps_order() {
        let mut registry = TaskRegistry::new();
        registry.spawn(Task::pour_timeout(0.5));
        let blend = registry.spawn(Task::blend(BlendTarget::OwnSurface, BLUE, GREEN, 3.0));

        let outputs = registry.advance(0.5);
        assert_eq!(outputs.len(), 2);
        assert_eq!(outputs[0], TaskOutput::TimedOut);
        assert!(matches!(outputs[1], TaskOutput::Tint { done: true, .. }));
        assert!(registry.is_empty());
        assert!(registry.get(blend).is_none());
    }

    #[test]
    fn cancelled_tasks_never_fire() {
        let mut registry = TaskRegistry::new();
        registry.spawn(Task::pour_timeout(1.0));
        assert_eq!(registry.cancel_all(), 1);

        for _ in 0..8 {
            assert!(registry.advance(0.25).is_empty());
        }
    }

    #[test]
    fn spawn_and_step_runs_first_slice() {
        let mut registry = TaskRegistry::new();
        let (id, output) =
            registry.spawn_and_step(Task::blend(BlendTarget::OwnSurface, BLUE, GREEN, 3.0), 0.125);
        assert!(matches!(output, TaskOutput::Tint { done: false, .. }));
        assert_eq!(registry.get(id).map(|task| task.progress), Some(0.375));
    }

    #[test]
    fn ids_are_not_reused_after_cancel() {
        let mut registry = TaskRegistry::new();
        let first = registry.spawn(Task::pour_timeout(1.0));
        registry.cancel_all();
        let second = registry.spawn(Task::pour_timeout(1.0));
        assert_ne!(first, second);
    }
}
