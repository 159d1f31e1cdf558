/// Receives `PlaySound` commands and forwards them as audio events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SoundNode;
