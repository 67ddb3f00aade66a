// ============================================================================
// STATE MODULE - Shared state with Rc<RefCell> + change notifications
// ============================================================================

pub mod reactivity;
pub mod session_state;
pub mod loading_state;

pub use reactivity::*;
pub use session_state::*;
pub use loading_state::*;
