pub mod judicial;
pub mod key_documents;

pub use judicial::JudicialBinderProcessor;
pub use key_documents::KeyDocumentsBinderProcessor;
