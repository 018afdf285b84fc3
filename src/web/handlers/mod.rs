pub mod analysis_handlers;
pub mod job_handlers;
pub mod session_handlers;
pub mod system_handlers;

pub use analysis_handlers::*;
pub use job_handlers::*;
pub use session_handlers::*;
pub use system_handlers::*;
