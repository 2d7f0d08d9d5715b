//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError(s), not panic.

pub mod course;
pub mod user;
pub mod validation;

pub use course::{Course, CourseDetails, CourseInput};
pub use user::{EmailAddress, NewUser, Password, User, UserSummary};
pub use validation::{FieldError, ValidationError, ValidationErrors};
