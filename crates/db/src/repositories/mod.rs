//! Repositories, one per table. Each is a unit struct with associated
//! async functions taking the pool explicitly.

mod character_repo;
mod faq_repo;
mod persona_repo;
mod role_repo;
mod roundtable_settings_repo;
mod session_repo;
mod study_repo;
mod tier_settings_repo;
mod transcript_chunk_repo;
mod user_repo;

pub use character_repo::CharacterRepo;
pub use faq_repo::FaqRepo;
pub use persona_repo::PersonaRepo;
pub use role_repo::RoleRepo;
pub use roundtable_settings_repo::RoundtableSettingsRepo;
pub use session_repo::SessionRepo;
pub use study_repo::StudyRepo;
pub use tier_settings_repo::TierSettingsRepo;
pub use transcript_chunk_repo::TranscriptChunkRepo;
pub use user_repo::UserRepo;
