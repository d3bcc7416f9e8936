use super::SerDes;
use crate::Entity;

/// Whether a mapping is inside an operation, and how deeply it has
/// re-entered it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(super) enum Phase {
    #[default]
    Idle,
    Active {
        depth: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Stage {
    Deserialize,
    CreateTable,
}

impl Phase {
    pub(super) fn is_active(self) -> bool {
        matches!(self, Phase::Active { .. })
    }

    pub(super) fn enter(&mut self) {
        *self = match *self {
            Phase::Idle => Phase::Active { depth: 1 },
            Phase::Active { depth } => Phase::Active { depth: depth + 1 },
        };
    }

    pub(super) fn exit(&mut self) {
        *self = match *self {
            Phase::Active { depth } if depth > 1 => Phase::Active { depth: depth - 1 },
            _ => Phase::Idle,
        };
    }
}

/// Leaves the stage when dropped, including when the operation fails.
pub(super) struct Guard<'a, T: Entity> {
    serdes: &'a SerDes<T>,
    stage: Stage,
}

impl<'a, T: Entity> Guard<'a, T> {
    pub(super) fn new(serdes: &'a SerDes<T>, stage: Stage) -> Guard<'a, T> {
        Guard { serdes, stage }
    }
}

impl<T: Entity> Drop for Guard<'_, T> {
    fn drop(&mut self) {
        self.serdes.state.borrow_mut().phase(self.stage).exit();
    }
}
