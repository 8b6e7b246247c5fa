#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerMessage {
	TogglePause,
	FrameForward,
	Reset,
	Resize([u32; 2]),
}
