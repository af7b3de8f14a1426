pub mod identifiers;
pub mod records;

pub use identifiers::{JobId, NormalizedKey};
pub use records::{
    jobs_from_json, PayloadError, RawJob, RawSkill, SkillConnections, SkillsPayload,
    SubcategoryEntry,
};
