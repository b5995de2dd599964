pub mod dates;
pub mod due;
pub mod grade;
pub mod mind_map;
pub mod review_data;
pub mod review_session;
pub mod sm2;
pub mod subject;

pub use due::{DueItem, Reviewable, select_due};
pub use grade::Grade;
pub use mind_map::MindMapNode;
pub use review_data::ReviewState;
pub use review_session::{ReviewSession, SessionEntry};
pub use subject::{Subject, SubjectDraft};
