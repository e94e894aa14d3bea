/// Session lifecycle. `Dead` is a sink state: a session never leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    AwaitingJavaLogin,
    Spawned,
    Disconnecting,
    Dead,
}

impl SessionState {
    pub fn is_dead(self) -> bool {
        matches!(self, SessionState::Dead)
    }

    pub fn is_spawned(self) -> bool {
        matches!(self, SessionState::Spawned)
    }
}
