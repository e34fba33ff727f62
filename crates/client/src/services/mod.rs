mod jnf;
mod placement;
mod session;
mod student;

pub use jnf::JnfService;
pub use placement::{PlacementService, StepResult};
pub use session::PlacementSessionService;
pub use student::StudentService;
