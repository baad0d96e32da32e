#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelLifecycle {
    Uninitialized,
    Created,
    Attached,
}

impl PanelLifecycle {
    pub fn is_created(self) -> bool {
        !matches!(self, Self::Uninitialized)
    }
}

pub fn can_transition(from: PanelLifecycle, to: PanelLifecycle) -> bool {
    matches!(
        (from, to),
        (PanelLifecycle::Uninitialized, PanelLifecycle::Created)
            | (PanelLifecycle::Created, PanelLifecycle::Attached)
    ) || from == to
}
