//! Plain data types shared by the stability sample generator: the study
//! metadata a user enters, the storage conditions and time points of a
//! stability design, the controlled vocabularies, and the sample records
//! that are exported for LIMS import.

pub mod condition;
pub mod file_formats;
pub mod record;
pub mod study;
pub mod vocabulary;
