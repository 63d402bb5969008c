pub mod answer;
pub mod extracted;
pub mod record_type;
pub mod result;
pub mod zone;

pub use answer::{AnswerData, AnswerRecord};
pub use extracted::{ExtractedRecord, SrvData};
pub use record_type::RecordType;
pub use result::EnumerationResult;
pub use zone::ZoneTransfer;
