mod picker;

// Public API
pub use picker::{run_picker, PickOutcome, PickerState};
